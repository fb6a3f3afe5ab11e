use super::{push_line, RecipeParser};
use crate::model::Recipe;
use log::debug;
use regex::Regex;
use std::sync::LazyLock;

static BULLET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-*•]\s*").expect("valid bullet regex"));

static STEP_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.\s*").expect("valid step number regex"));

/// Lowercased line prefixes that start a new section, checked in order.
static SECTION_CUES: LazyLock<Vec<(Regex, Section)>> = LazyLock::new(|| {
    [
        (r"^(ingredients|what you need|shopping list)", Section::Ingredients),
        (r"^(instructions|steps|directions|method|how to make)", Section::Steps),
        (r"^(notes|tips|additional info)", Section::AdditionalInfo),
        (r"^(nutrition|nutritional info)", Section::Nutrition),
    ]
    .into_iter()
    .map(|(pattern, section)| (Regex::new(pattern).expect("valid cue regex"), section))
    .collect()
});

/// Heuristic parser for pasted recipe text with no markdown structure.
///
/// The first non-blank line becomes the title. Everything after it is
/// description until a cue line such as "Ingredients:" or "Method" switches
/// the section. If no ingredients or steps are found, the partly filled
/// recipe is returned as is for the user to finish.
pub struct PlainTextParser;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Description,
    Ingredients,
    Steps,
    AdditionalInfo,
    Nutrition,
}

impl Section {
    fn from_cue(lower: &str) -> Option<Self> {
        SECTION_CUES
            .iter()
            .find(|(cue, _)| cue.is_match(lower))
            .map(|(_, section)| *section)
    }

    fn append(self, recipe: &mut Recipe, line: &str) {
        let lower = line.to_lowercase();
        match self {
            Section::Ingredients => recipe.ingredients.push(strip_bullet(line).to_string()),
            Section::Steps => {
                let unnumbered = STEP_NUMBER.replace(line, "");
                recipe.steps.push(strip_bullet(&unnumbered).to_string());
            }
            Section::Description => {
                if lower.contains("prep time") || lower.contains("time:") {
                    recipe.metadata.prep_time = Some(value_or_line(line));
                } else if lower.contains("servings") || lower.contains("yields") {
                    recipe.metadata.servings = Some(value_or_line(line));
                } else {
                    push_line(&mut recipe.description, line);
                }
            }
            Section::Nutrition => {
                let nutrition = &mut recipe.nutrition;
                if lower.contains("calories") {
                    nutrition.calories = value_after_colon(line).unwrap_or_default();
                }
                if lower.contains("protein") {
                    nutrition.protein = value_after_colon(line).unwrap_or_default();
                }
                if lower.contains("carbs") {
                    nutrition.carbs = value_after_colon(line).unwrap_or_default();
                }
                if lower.contains("fat") {
                    nutrition.fat = value_after_colon(line).unwrap_or_default();
                }
            }
            // Newline-joined, unlike the markdown dialect
            Section::AdditionalInfo => push_line(&mut recipe.additional_info, line),
        }
    }
}

fn strip_bullet(line: &str) -> &str {
    match BULLET.find(line) {
        Some(m) => &line[m.end()..],
        None => line,
    }
}

fn value_after_colon(line: &str) -> Option<String> {
    line.split_once(':').map(|(_, value)| value.trim().to_string())
}

/// Text after the first colon, or the whole line when there is none.
fn value_or_line(line: &str) -> String {
    value_after_colon(line)
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| line.to_string())
}

impl RecipeParser for PlainTextParser {
    fn parser_name(&self) -> &str {
        "plain_text"
    }

    fn parse(&self, input: &str) -> Recipe {
        let mut lines = input.lines().map(str::trim).filter(|l| !l.is_empty());
        let mut recipe = Recipe {
            title: lines.next().unwrap_or_default().to_string(),
            ..Default::default()
        };

        let mut section = Section::Description;
        for line in lines {
            if let Some(next) = Section::from_cue(&line.to_lowercase()) {
                debug!("Cue '{}' -> {:?}", line, next);
                section = next;
                continue;
            }
            section.append(&mut recipe, line);
        }

        if recipe.ingredients.is_empty() && recipe.steps.is_empty() {
            debug!("No ingredients or steps detected in '{}'", recipe.title);
        }

        recipe
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Recipe {
        PlainTextParser.parse(input)
    }

    #[test]
    fn test_first_line_is_title() {
        let recipe = parse("\n\n  Banana Bread  \nMoist and easy.\n");
        assert_eq!(recipe.title, "Banana Bread");
        assert_eq!(recipe.description, "Moist and easy.");
    }

    #[test]
    fn test_ingredients_cue() {
        let recipe = parse(
            "Pancakes\nFluffy.\nIngredients:\n- 1 cup flour\n* 1 egg\n• 1 cup milk\npinch of salt\n",
        );
        assert_eq!(recipe.description, "Fluffy.");
        assert_eq!(
            recipe.ingredients,
            vec!["1 cup flour", "1 egg", "1 cup milk", "pinch of salt"]
        );
    }

    #[test]
    fn test_alternative_cues() {
        let recipe = parse(
            "Salad\nWhat you need\nlettuce\nHow to make it\nToss\nTips\nServe cold\nNutritional info\nCalories: 120\n",
        );
        assert_eq!(recipe.ingredients, vec!["lettuce"]);
        assert_eq!(recipe.steps, vec!["Toss"]);
        assert_eq!(recipe.additional_info, "Serve cold");
        assert_eq!(recipe.nutrition.calories, "120");
    }

    #[test]
    fn test_cue_is_prefix_match_only() {
        let recipe = parse("Soup\nThe ingredients are simple.\n");
        assert_eq!(recipe.description, "The ingredients are simple.");
        assert!(recipe.ingredients.is_empty());
    }

    #[test]
    fn test_steps_strip_numbers_and_bullets() {
        let recipe = parse("Rice\nDirections\n1. Rinse rice\n2.- Add water\n- Simmer\n10.Rest\n");
        assert_eq!(
            recipe.steps,
            vec!["Rinse rice", "Add water", "Simmer", "Rest"]
        );
    }

    #[test]
    fn test_metadata_in_description() {
        let recipe = parse("Stew\nPrep Time: 20 minutes\nServings: 4\nRich and slow.\n");
        assert_eq!(recipe.metadata.prep_time.as_deref(), Some("20 minutes"));
        assert_eq!(recipe.metadata.servings.as_deref(), Some("4"));
        assert_eq!(recipe.description, "Rich and slow.");
    }

    #[test]
    fn test_metadata_without_colon_keeps_line() {
        let recipe = parse("Stew\nYields 6 bowls\n");
        assert_eq!(recipe.metadata.servings.as_deref(), Some("Yields 6 bowls"));
    }

    #[test]
    fn test_metadata_with_empty_value_keeps_line() {
        let recipe = parse("Stew\nPrep time:\nServings:   \n");
        assert_eq!(recipe.metadata.prep_time.as_deref(), Some("Prep time:"));
        assert_eq!(recipe.metadata.servings.as_deref(), Some("Servings:"));
    }

    #[test]
    fn test_metadata_keeps_text_after_first_colon() {
        let recipe = parse("Stew\nTotal time: 1:30\n");
        assert_eq!(recipe.metadata.prep_time.as_deref(), Some("1:30"));
    }

    #[test]
    fn test_nutrition_section() {
        let recipe = parse(
            "Oats\nNutrition\nCalories: 350\nProtein: 12g\nCarbs: 60g\nFat: 6g\n",
        );
        assert_eq!(recipe.nutrition.calories, "350");
        assert_eq!(recipe.nutrition.protein, "12g");
        assert_eq!(recipe.nutrition.carbs, "60g");
        assert_eq!(recipe.nutrition.fat, "6g");
    }

    #[test]
    fn test_additional_info_newline_joined() {
        let recipe = parse("Cake\nNotes\nStore covered.\nBest next day.\n");
        assert_eq!(recipe.additional_info, "Store covered.\nBest next day.");
    }

    #[test]
    fn test_no_sections_detected_is_not_an_error() {
        let recipe = parse("Just a title\nand some words\n");
        assert_eq!(recipe.title, "Just a title");
        assert_eq!(recipe.description, "and some words");
        assert!(recipe.ingredients.is_empty());
        assert!(recipe.steps.is_empty());
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(parse(""), Recipe::default());
    }
}
