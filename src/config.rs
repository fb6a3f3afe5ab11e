use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Nutrient database settings
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct NutritionConfig {
    /// API key for the nutrient database (can also be set via USDA_API_KEY)
    pub api_key: Option<String>,
    /// Base URL of the FoodData Central API
    pub base_url: String,
    /// Number of candidates requested per ingredient
    pub page_size: u32,
    /// Request timeout in seconds
    pub timeout: u64,
}

impl Default for NutritionConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            page_size: default_page_size(),
            timeout: default_timeout(),
        }
    }
}

// Default value functions
fn default_base_url() -> String {
    "https://api.nal.usda.gov/fdc/v1".to_string()
}

fn default_page_size() -> u32 {
    5
}

fn default_timeout() -> u64 {
    30
}

impl NutritionConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPE_BOX__ prefix
    /// 2. config.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: RECIPE_BOX__API_KEY
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }
}

/// Load configuration from file and environment variables
///
/// See [`NutritionConfig::load`] for the source priority.
pub fn load_config() -> Result<NutritionConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("config").required(false))
        .add_source(
            Environment::with_prefix("RECIPE_BOX")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
