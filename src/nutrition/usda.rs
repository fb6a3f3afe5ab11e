use super::{FoodCandidate, NutrientLookup};
use crate::config::NutritionConfig;
use crate::error::NutritionError;
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use std::error::Error;
use std::time::Duration;

/// Nutrient lookup backed by the USDA FoodData Central search API
pub struct UsdaLookup {
    client: Client,
    api_key: String,
    base_url: String,
    page_size: u32,
    timeout: Duration,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    foods: Vec<SearchFood>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchFood {
    description: String,
    #[serde(default)]
    data_type: String,
    #[serde(default)]
    food_nutrients: Vec<SearchNutrient>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchNutrient {
    nutrient_name: String,
    #[serde(default)]
    unit_name: String,
    value: Option<f64>,
}

impl SearchFood {
    fn into_candidate(self) -> FoodCandidate {
        let nutrients: HashMap<String, f64> = self
            .food_nutrients
            .into_iter()
            // Energy is reported in both kcal and kJ
            .filter(|n| {
                !n.nutrient_name.to_lowercase().contains("energy")
                    || n.unit_name.eq_ignore_ascii_case("kcal")
            })
            .filter_map(|n| n.value.map(|value| (n.nutrient_name, value)))
            .collect();

        FoodCandidate {
            description: self.description,
            data_type: self.data_type,
            nutrients,
        }
    }
}

impl UsdaLookup {
    /// Create a lookup from configuration
    ///
    /// Falls back to the USDA_API_KEY environment variable when the config
    /// has no key, and fails with [`NutritionError::MissingApiKey`] if
    /// neither is set.
    pub fn new(config: &NutritionConfig) -> Result<Self, NutritionError> {
        Self::with_timeout(config, Duration::from_secs(config.timeout))
    }

    /// Like [`new`](Self::new), with a request timeout that replaces
    /// `config.timeout`
    pub fn with_timeout(
        config: &NutritionConfig,
        timeout: Duration,
    ) -> Result<Self, NutritionError> {
        // Try config first, then fall back to environment variable
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .or_else(|| std::env::var("USDA_API_KEY").ok())
            .filter(|key| !key.trim().is_empty())
            .ok_or(NutritionError::MissingApiKey)?;

        let client = Client::builder().timeout(timeout).build()?;

        Ok(UsdaLookup {
            client,
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            page_size: config.page_size,
            timeout,
        })
    }

    #[doc(hidden)]
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        UsdaLookup {
            client: Client::new(),
            api_key,
            base_url,
            page_size: 5,
            timeout: Duration::from_secs(30),
        }
    }

    async fn search(&self, query: &str) -> Result<Vec<FoodCandidate>, NutritionError> {
        let page_size = self.page_size.to_string();
        let response = self
            .client
            .get(format!("{}/foods/search", self.base_url))
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("query", query),
                ("pageSize", page_size.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(NutritionError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| NutritionError::InvalidResponse(e.to_string()))?;
        debug!("USDA search '{}' returned {} foods", query, body.foods.len());

        Ok(body
            .foods
            .into_iter()
            .map(SearchFood::into_candidate)
            .collect())
    }
}

#[async_trait]
impl NutrientLookup for UsdaLookup {
    fn source_name(&self) -> &str {
        "usda"
    }

    async fn lookup(
        &self,
        food_query: &str,
    ) -> Result<Vec<FoodCandidate>, Box<dyn Error + Send + Sync>> {
        Ok(self.search(food_query).await?)
    }
}
