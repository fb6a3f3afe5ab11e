use super::{push_line, strip_list_marker, RecipeParser};
use crate::model::Recipe;
use log::debug;
use regex::Regex;
use std::sync::LazyLock;

static STEP_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.\s*").expect("valid step number regex"));

/// Parser for the heading-based markdown dialect written by
/// [`Recipe::to_markdown`]: one `# Title` line followed by `## Section`
/// headings.
pub struct MarkdownParser;

/// Section a content line is routed to, set by the last `##` heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    None,
    Description,
    Ingredients,
    Steps,
    Variations,
    AdditionalInfo,
    Social,
}

impl Section {
    /// Resolve a heading by substring, first match wins.
    fn from_heading(heading: &str) -> Self {
        let name = heading.to_lowercase();
        if name.contains("description") {
            Section::Description
        } else if name.contains("ingredients") {
            Section::Ingredients
        } else if name.contains("steps") {
            Section::Steps
        } else if name.contains("variations") {
            Section::Variations
        } else if name.contains("additional") {
            Section::AdditionalInfo
        } else if name.contains("social") {
            Section::Social
        } else {
            Section::None
        }
    }

    fn append(self, recipe: &mut Recipe, line: &str) {
        match self {
            Section::None => {}
            Section::Description => push_line(&mut recipe.description, line),
            Section::Ingredients => recipe.ingredients.push(list_item(line)),
            Section::Steps => recipe.steps.push(step_item(line)),
            Section::Variations => recipe.variations.push(list_item(line)),
            // Lines are concatenated with no separator here
            Section::AdditionalInfo => recipe.additional_info.push_str(line),
            Section::Social => recipe.social.push(list_item(line)),
        }
    }
}

fn list_item(line: &str) -> String {
    strip_list_marker(line).unwrap_or(line).to_string()
}

fn step_item(line: &str) -> String {
    if STEP_NUMBER.is_match(line) {
        STEP_NUMBER.replace(line, "").trim().to_string()
    } else {
        list_item(line)
    }
}

impl RecipeParser for MarkdownParser {
    fn parser_name(&self) -> &str {
        "markdown"
    }

    fn parse(&self, input: &str) -> Recipe {
        let mut recipe = Recipe::default();
        let mut section = Section::None;

        for line in input.lines().map(str::trim).filter(|l| !l.is_empty()) {
            if let Some(title) = line.strip_prefix("# ") {
                recipe.title = title.trim().to_string();
            } else if let Some(heading) = line.strip_prefix("## ") {
                section = Section::from_heading(heading.trim());
                debug!("Heading '{}' -> {:?}", heading.trim(), section);
            } else {
                section.append(&mut recipe, line);
            }
        }

        debug!(
            "Parsed markdown recipe '{}': {} ingredients, {} steps",
            recipe.title,
            recipe.ingredients.len(),
            recipe.steps.len()
        );

        recipe
    }
}
