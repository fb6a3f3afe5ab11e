use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static SLUG_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9]+").expect("valid slug regex"));

/// Canonical recipe record shared by both parsers and the markdown serializer.
///
/// Every field is always present; missing sections are empty strings or
/// empty lists, never absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Recipe {
    pub title: String,
    pub description: String,
    /// Raw ingredient lines in recipe order
    pub ingredients: Vec<String>,
    /// Instructions in order, without their numbering
    pub steps: Vec<String>,
    pub variations: Vec<String>,
    /// Links to social posts about the recipe
    pub social: Vec<String>,
    pub additional_info: String,
    pub metadata: RecipeMetadata,
    pub nutrition: Nutrition,
}

/// Free-text metadata such as "30m" or "4"
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecipeMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prep_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub servings: Option<String>,
}

/// Macro totals as displayed: calories is a bare number, the rest carry a "g".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Nutrition {
    pub calories: String,
    pub protein: String,
    pub carbs: String,
    pub fat: String,
}

impl Nutrition {
    pub fn is_empty(&self) -> bool {
        self.calories.is_empty()
            && self.protein.is_empty()
            && self.carbs.is_empty()
            && self.fat.is_empty()
    }
}

impl Recipe {
    /// True when the recipe has neither a title nor any section content.
    pub fn is_empty(&self) -> bool {
        self.title.is_empty()
            && self.description.is_empty()
            && self.ingredients.is_empty()
            && self.steps.is_empty()
            && self.variations.is_empty()
            && self.social.is_empty()
            && self.additional_info.is_empty()
    }

    /// Storage filename derived from the title, e.g. `mom-s-apple-pie.md`.
    pub fn filename(&self) -> String {
        let lower = self.title.to_lowercase();
        format!("{}.md", SLUG_SEPARATOR.replace_all(&lower, "-"))
    }

    /// Render the recipe in the heading-based markdown dialect.
    ///
    /// Sections are always written in the same order (Description,
    /// Ingredients, Steps, Variations, Social, Additional Information) and
    /// empty sections are left out. Steps are renumbered from 1.
    /// Metadata and nutrition are not part of the dialect.
    pub fn to_markdown(&self) -> String {
        let mut markdown = format!("# {}\n\n", self.title);

        if !self.description.is_empty() {
            markdown.push_str(&format!("## Description\n{}\n\n", self.description));
        }

        push_list(&mut markdown, "Ingredients", &self.ingredients);

        if !self.steps.is_empty() {
            markdown.push_str("## Steps\n");
            for (i, step) in self.steps.iter().enumerate() {
                markdown.push_str(&format!("{}. {}\n", i + 1, step));
            }
            markdown.push('\n');
        }

        push_list(&mut markdown, "Variations", &self.variations);
        push_list(&mut markdown, "Social", &self.social);

        if !self.additional_info.is_empty() {
            markdown.push_str(&format!(
                "## Additional Information\n{}\n",
                self.additional_info
            ));
        }

        markdown
    }
}

fn push_list(markdown: &mut String, heading: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    markdown.push_str(&format!("## {}\n", heading));
    for item in items {
        markdown.push_str(&format!("- {}\n", item));
    }
    markdown.push('\n');
}
