use std::sync::Arc;
use std::time::Duration;

use log::debug;

use crate::config::load_config;
use crate::nutrition::{calculate_nutrition, NutrientLookup, UsdaLookup};
use crate::parsers::{MarkdownParser, PlainTextParser, RecipeParser};
use crate::{Recipe, RecipeError};

/// Represents the input source for a recipe
#[derive(Debug, Clone)]
pub enum InputSource {
    /// Markdown in the `# Title` / `## Section` dialect
    Markdown(String),
    /// Unstructured pasted text
    Text(String),
}

/// Builder for configuring and executing recipe imports
#[derive(Default)]
pub struct RecipeImporterBuilder {
    source: Option<InputSource>,
    nutrition: bool,
    lookup: Option<Arc<dyn NutrientLookup>>,
    timeout: Option<Duration>,
    api_key: Option<String>,
    base_url: Option<String>,
}

impl RecipeImporterBuilder {
    /// Set the input source to a markdown recipe
    ///
    /// # Example
    /// ```
    /// use recipe_box::RecipeImporter;
    ///
    /// let builder = RecipeImporter::builder()
    ///     .markdown("# Tea\n## Ingredients\n- water\n");
    /// ```
    pub fn markdown(mut self, markdown: impl Into<String>) -> Self {
        self.source = Some(InputSource::Markdown(markdown.into()));
        self
    }

    /// Set the input source to plain text
    ///
    /// Use this for pasted recipes without headings. Sections are detected
    /// from cue lines such as "Ingredients" or "Method".
    ///
    /// # Example
    /// ```
    /// use recipe_box::RecipeImporter;
    ///
    /// let recipe_text = "Pancakes\nIngredients:\n1 cup flour\n2 eggs\nMethod\nMix and fry.";
    /// let builder = RecipeImporter::builder()
    ///     .text(recipe_text);
    /// ```
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.source = Some(InputSource::Text(text.into()));
        self
    }

    /// Estimate nutrition from the parsed ingredients
    ///
    /// Replaces `Recipe.nutrition` when the recipe has ingredients. Uses the
    /// lookup passed to [`lookup`](Self::lookup), or a USDA lookup built
    /// from configuration.
    pub fn with_nutrition(mut self) -> Self {
        self.nutrition = true;
        self
    }

    /// Use a custom nutrient lookup for nutrition estimates
    ///
    /// Implies [`with_nutrition`](Self::with_nutrition).
    pub fn lookup(mut self, lookup: Arc<dyn NutrientLookup>) -> Self {
        self.lookup = Some(lookup);
        self.nutrition = true;
        self
    }

    /// Set a timeout for nutrient database requests
    ///
    /// Replaces the configured `timeout` for this import only; other
    /// settings still come from `config.toml` and `RECIPE_BOX__*` variables.
    ///
    /// # Example
    /// ```
    /// use recipe_box::RecipeImporter;
    /// use std::time::Duration;
    ///
    /// let builder = RecipeImporter::builder()
    ///     .text("Toast\nIngredients\n2 slices bread")
    ///     .with_nutrition()
    ///     .timeout(Duration::from_secs(10));
    /// ```
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Set the API key for the nutrient database
    ///
    /// This allows passing the API key directly instead of relying on
    /// environment variables or config files.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the base URL of the nutrient database
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Build and execute the recipe import operation
    ///
    /// # Errors
    /// Returns `RecipeError` if:
    /// - No input source was specified
    /// - The input is empty
    /// - Nutrition was requested for a recipe with ingredients but no API
    ///   key is available
    ///
    /// Individual ingredient lookup failures are not errors; they only
    /// lower the estimate.
    ///
    /// # Example
    /// ```no_run
    /// # use recipe_box::RecipeImporter;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let recipe = RecipeImporter::builder()
    ///     .text("Toast\nIngredients\n2 slices bread\n1 tbsp butter")
    ///     .with_nutrition()
    ///     .build()
    ///     .await?;
    /// println!("{}", recipe.to_markdown());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn build(self) -> Result<Recipe, RecipeError> {
        // Validate that source is set
        let source = self.source.ok_or_else(|| {
            RecipeError::BuilderError(
                "No input source specified. Use .markdown() or .text()".to_string(),
            )
        })?;

        let (parser, input): (&dyn RecipeParser, String) = match source {
            InputSource::Markdown(markdown) => (&MarkdownParser as &dyn RecipeParser, markdown),
            InputSource::Text(text) => (&PlainTextParser as &dyn RecipeParser, text),
        };

        if input.trim().is_empty() {
            return Err(RecipeError::EmptyInput);
        }

        let mut recipe = parser.parse(&input);
        debug!("Parsed '{}' with {} parser", recipe.title, parser.parser_name());

        if !self.nutrition || recipe.ingredients.is_empty() {
            return Ok(recipe);
        }

        let lookup: Arc<dyn NutrientLookup> = match self.lookup {
            Some(lookup) => lookup,
            None => {
                // Builder settings win over config file and environment
                let mut config = load_config()?;
                if let Some(api_key) = self.api_key {
                    config.api_key = Some(api_key);
                }
                if let Some(base_url) = self.base_url {
                    config.base_url = base_url;
                }
                let timeout = self
                    .timeout
                    .unwrap_or_else(|| Duration::from_secs(config.timeout));
                Arc::new(UsdaLookup::with_timeout(&config, timeout)?)
            }
        };

        let estimate = calculate_nutrition(recipe.ingredients.as_slice(), lookup.as_ref()).await;
        if let Some(nutrition) = estimate {
            recipe.nutrition = nutrition;
        }

        Ok(recipe)
    }
}

/// Main entry point for the builder API
pub struct RecipeImporter;

impl RecipeImporter {
    /// Creates a new builder for importing recipes
    ///
    /// # Example
    /// ```
    /// use recipe_box::RecipeImporter;
    ///
    /// let builder = RecipeImporter::builder();
    /// ```
    pub fn builder() -> RecipeImporterBuilder {
        RecipeImporterBuilder::default()
    }
}
