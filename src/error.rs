use thiserror::Error;

/// Errors that can occur while importing a recipe
#[derive(Error, Debug)]
pub enum RecipeError {
    /// Input text was empty or whitespace only
    #[error("Recipe text cannot be empty")]
    EmptyInput,

    /// Builder configuration error
    #[error("Builder error: {0}")]
    BuilderError(String),

    /// Nutrition estimation was aborted
    #[error("Nutrition estimation failed: {0}")]
    NutritionError(#[from] NutritionError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),
}

/// Errors raised by nutrient lookups and nutrition aggregation
#[derive(Error, Debug)]
pub enum NutritionError {
    /// No API key in config or environment; aborts before any lookup is issued
    #[error("Nutrition API key not found in config or environment")]
    MissingApiKey,

    /// Failed to reach the nutrient database
    #[error("Failed to fetch nutrient data: {0}")]
    FetchError(#[from] reqwest::Error),

    /// Nutrient database answered with a non-success status
    #[error("Nutrient API returned {status}: {message}")]
    ApiError { status: u16, message: String },

    /// Nutrient database answered with a body we could not read
    #[error("Invalid nutrient API response: {0}")]
    InvalidResponse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),
}
