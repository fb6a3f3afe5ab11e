pub mod builder;
pub mod config;
pub mod error;
pub mod ingredients;
pub mod model;
pub mod nutrition;
pub mod parsers;

// Re-export commonly used types
pub use crate::builder::{InputSource, RecipeImporter, RecipeImporterBuilder};
pub use crate::config::NutritionConfig;
pub use crate::error::{NutritionError, RecipeError};
pub use crate::ingredients::{convert_to_grams, parse_ingredient, ParsedIngredient, Unit};
pub use crate::model::{Nutrition, Recipe, RecipeMetadata};
pub use crate::nutrition::{calculate_nutrition, FoodCandidate, NutrientLookup, UsdaLookup};
pub use crate::parsers::{MarkdownParser, PlainTextParser, RecipeParser};

/// Parse a recipe written in the heading-based markdown dialect
///
/// # Example
/// ```
/// let recipe = recipe_box::parse_markdown("# Tea\n## Ingredients\n- water\n");
/// assert_eq!(recipe.title, "Tea");
/// assert_eq!(recipe.ingredients, vec!["water"]);
/// ```
pub fn parse_markdown(markdown: &str) -> Recipe {
    MarkdownParser.parse(markdown)
}

/// Parse unstructured pasted recipe text
pub fn parse_plain_text(text: &str) -> Recipe {
    PlainTextParser.parse(text)
}

/// Render a recipe as markdown
pub fn recipe_to_markdown(recipe: &Recipe) -> String {
    recipe.to_markdown()
}

/// Estimate nutrition for ingredient lines using the USDA database
///
/// Returns `Ok(None)` for an empty list without issuing any request. A
/// missing API key aborts before any lookup; individual lookup failures only
/// lower the totals.
///
/// # Example
/// ```no_run
/// # use recipe_box::{estimate_nutrition, NutritionConfig};
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = NutritionConfig::load()?;
/// let nutrition = estimate_nutrition(&["2 cloves garlic", "1 cup rice"], &config).await?;
/// # Ok(())
/// # }
/// ```
pub async fn estimate_nutrition<S: AsRef<str>>(
    ingredients: &[S],
    config: &NutritionConfig,
) -> Result<Option<Nutrition>, NutritionError> {
    if ingredients.is_empty() {
        return Ok(None);
    }

    let lookup = UsdaLookup::new(config)?;
    Ok(calculate_nutrition(ingredients, &lookup).await)
}
