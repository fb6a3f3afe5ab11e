//! Ingredient-based nutrition estimates.
//!
//! Each ingredient line is normalized to grams, looked up in a nutrient
//! database through a [`NutrientLookup`], scaled from per-100g values, and
//! summed. Lookups run concurrently and a failed lookup only loses that
//! ingredient's contribution.

mod matching;
mod usda;

pub use self::matching::{best_match, clean_query, score_candidate};
pub use self::usda::UsdaLookup;

use crate::ingredients::parse_ingredient;
use crate::model::Nutrition;
use async_trait::async_trait;
use futures::future::join_all;
use log::{debug, info, warn};
use std::collections::HashMap;
use std::error::Error;
use std::ops::{Add, AddAssign};

/// One food record returned by a nutrient database search
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FoodCandidate {
    pub description: String,
    /// Database category, e.g. "Foundation", "SR Legacy" or "Branded"
    pub data_type: String,
    /// Nutrient name to amount per 100g
    pub nutrients: HashMap<String, f64>,
}

/// Source of per-100g nutrient data for a food description
#[async_trait]
pub trait NutrientLookup: Send + Sync {
    /// Get the source name (e.g., "usda")
    fn source_name(&self) -> &str;

    /// Search foods matching `food_query`, best database matches first
    async fn lookup(
        &self,
        food_query: &str,
    ) -> Result<Vec<FoodCandidate>, Box<dyn Error + Send + Sync>>;
}

/// Calories plus protein, carbs and fat in grams
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MacroNutrients {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

impl MacroNutrients {
    /// Pick the four macros out of a nutrient map.
    ///
    /// Names are matched loosely ("Energy", "Protein", "Carbohydrate, by
    /// difference", "Total lipid (fat)"). The first name in alphabetical
    /// order wins when several match; non-finite amounts are ignored.
    pub fn from_nutrients(nutrients: &HashMap<String, f64>) -> Self {
        let mut names: Vec<&String> = nutrients.keys().collect();
        names.sort();

        let mut calories = None;
        let mut protein = None;
        let mut carbs = None;
        let mut fat = None;

        for name in names {
            let amount = nutrients[name];
            if !amount.is_finite() {
                continue;
            }
            let lower = name.to_lowercase();
            let slot = if lower.contains("energy") || lower.contains("calories") {
                &mut calories
            } else if lower.contains("protein") {
                &mut protein
            } else if lower.contains("carbohydrate") || lower.contains("carbs") {
                &mut carbs
            } else if lower.contains("lipid") || lower == "fat" || lower == "total fat" {
                &mut fat
            } else {
                continue;
            };
            slot.get_or_insert(amount);
        }

        MacroNutrients {
            calories: calories.unwrap_or(0.0),
            protein: protein.unwrap_or(0.0),
            carbs: carbs.unwrap_or(0.0),
            fat: fat.unwrap_or(0.0),
        }
    }

    pub fn scaled(self, factor: f64) -> Self {
        MacroNutrients {
            calories: self.calories * factor,
            protein: self.protein * factor,
            carbs: self.carbs * factor,
            fat: self.fat * factor,
        }
    }

    /// Round to whole numbers for display.
    pub fn to_nutrition(self) -> Nutrition {
        Nutrition {
            calories: format!("{}", self.calories.round() as i64),
            protein: format!("{}g", self.protein.round() as i64),
            carbs: format!("{}g", self.carbs.round() as i64),
            fat: format!("{}g", self.fat.round() as i64),
        }
    }
}

impl Add for MacroNutrients {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        MacroNutrients {
            calories: self.calories + other.calories,
            protein: self.protein + other.protein,
            carbs: self.carbs + other.carbs,
            fat: self.fat + other.fat,
        }
    }
}

impl AddAssign for MacroNutrients {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

/// Sum the estimated macros of all ingredients.
///
/// Returns `None` for an empty list without touching `lookup`. Every
/// ingredient is looked up concurrently; one that fails or has no candidate
/// contributes zero instead of failing the whole estimate.
pub async fn calculate_nutrition<S: AsRef<str>>(
    ingredients: &[S],
    lookup: &dyn NutrientLookup,
) -> Option<Nutrition> {
    if ingredients.is_empty() {
        return None;
    }

    info!(
        "Estimating nutrition for {} ingredients using {}",
        ingredients.len(),
        lookup.source_name()
    );

    let estimates = join_all(
        ingredients
            .iter()
            .map(|line| ingredient_macros(line.as_ref(), lookup)),
    )
    .await;

    let mut totals = MacroNutrients::default();
    for estimate in estimates {
        totals += estimate;
    }

    info!("Nutrition totals: {:?}", totals);
    Some(totals.to_nutrition())
}

async fn ingredient_macros(line: &str, lookup: &dyn NutrientLookup) -> MacroNutrients {
    let parsed = parse_ingredient(line);
    let query = if parsed.food.is_empty() {
        line.trim()
    } else {
        parsed.food.as_str()
    };

    let candidates = match lookup.lookup(query).await {
        Ok(candidates) => candidates,
        Err(e) => {
            warn!("Nutrient lookup failed for '{}': {}", line, e);
            return MacroNutrients::default();
        }
    };

    let Some(candidate) = best_match(query, &candidates) else {
        debug!("No nutrient data found for '{}'", query);
        return MacroNutrients::default();
    };

    let grams = parsed.grams();
    debug!(
        "'{}' matched '{}' ({}), {} g",
        line, candidate.description, candidate.data_type, grams
    );

    let macros = MacroNutrients::from_nutrients(&candidate.nutrients).scaled(grams / 100.0);
    if [macros.calories, macros.protein, macros.carbs, macros.fat]
        .iter()
        .all(|v| v.is_finite())
    {
        macros
    } else {
        warn!("Discarding non-finite nutrient estimate for '{}'", line);
        MacroNutrients::default()
    }
}
