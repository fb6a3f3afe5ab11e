use async_trait::async_trait;
use mockito::{Matcher, Server};
use recipe_box::{FoodCandidate, NutrientLookup, RecipeError, RecipeImporter};
use std::collections::HashMap;
use std::env;
use std::error::Error;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, LazyLock};
use std::time::Duration;
use tokio::sync::Mutex;

// Serializes tests that read or write RECIPE_BOX__* variables
static ENV_LOCK: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

/// Every food is 100 kcal and 10 g protein per 100 g
struct FlatLookup {
    calls: AtomicUsize,
}

#[async_trait]
impl NutrientLookup for FlatLookup {
    fn source_name(&self) -> &str {
        "flat"
    }

    async fn lookup(
        &self,
        food_query: &str,
    ) -> Result<Vec<FoodCandidate>, Box<dyn Error + Send + Sync>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut nutrients = HashMap::new();
        nutrients.insert("Energy".to_string(), 100.0);
        nutrients.insert("Protein".to_string(), 10.0);
        Ok(vec![FoodCandidate {
            description: food_query.to_string(),
            data_type: "Foundation".to_string(),
            nutrients,
        }])
    }
}

/// Test markdown input with the builder API
#[tokio::test]
async fn test_builder_markdown() {
    let recipe = RecipeImporter::builder()
        .markdown("# Tea\n## Ingredients\n- water\n- tea leaves\n## Steps\n1. Boil water\n2. Add leaves\n")
        .build()
        .await
        .unwrap();

    assert_eq!(recipe.title, "Tea");
    assert_eq!(recipe.ingredients, vec!["water", "tea leaves"]);
    assert_eq!(recipe.steps, vec!["Boil water", "Add leaves"]);
    assert!(recipe.nutrition.is_empty());
}

/// Test plain text input with the builder API
#[tokio::test]
async fn test_builder_text() {
    let recipe = RecipeImporter::builder()
        .text("Porridge\nIngredients:\n1 cup oats\n2 cups water\nMethod\nSimmer 5 minutes\n")
        .build()
        .await
        .unwrap();

    assert_eq!(recipe.title, "Porridge");
    assert_eq!(recipe.ingredients, vec!["1 cup oats", "2 cups water"]);
    assert_eq!(recipe.steps, vec!["Simmer 5 minutes"]);
}

/// Test nutrition estimate with an injected lookup
#[tokio::test]
async fn test_builder_with_custom_lookup() {
    let lookup = Arc::new(FlatLookup {
        calls: AtomicUsize::new(0),
    });

    let recipe = RecipeImporter::builder()
        .text("Porridge\nIngredients:\n1 cup oats\n1/2 cup milk\n")
        .lookup(lookup.clone())
        .build()
        .await
        .unwrap();

    // 240 g + 120 g
    assert_eq!(recipe.nutrition.calories, "360");
    assert_eq!(recipe.nutrition.protein, "36g");
    assert_eq!(recipe.nutrition.carbs, "0g");
    assert_eq!(lookup.calls.load(Ordering::SeqCst), 2);
}

/// Test that a recipe without ingredients never reaches the lookup
#[tokio::test]
async fn test_builder_nutrition_without_ingredients() {
    let lookup = Arc::new(FlatLookup {
        calls: AtomicUsize::new(0),
    });

    let recipe = RecipeImporter::builder()
        .text("Bowl of air\nNutrition\nCalories: 0\n")
        .lookup(lookup.clone())
        .build()
        .await
        .unwrap();

    assert_eq!(recipe.nutrition.calories, "0");
    assert_eq!(lookup.calls.load(Ordering::SeqCst), 0);
}

/// Test nutrition estimate against a mocked USDA server
#[tokio::test]
async fn test_builder_with_usda_server() {
    let _env = ENV_LOCK.lock().await;
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/foods/search")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("api_key".into(), "builder_key".into()),
            Matcher::UrlEncoded("query".into(), "butter".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"foods": [{
                "description": "Butter, salted",
                "dataType": "SR Legacy",
                "foodNutrients": [
                    {"nutrientName": "Energy", "unitName": "KCAL", "value": 717.0},
                    {"nutrientName": "Total lipid (fat)", "unitName": "G", "value": 81.1}
                ]
            }]}"#,
        )
        .create_async()
        .await;

    let recipe = RecipeImporter::builder()
        .markdown("# Butter\n## Ingredients\n- 2 tbsp butter\n")
        .with_nutrition()
        .api_key("builder_key")
        .base_url(server.url())
        .timeout(Duration::from_secs(5))
        .build()
        .await
        .unwrap();

    // 30 g butter
    assert_eq!(recipe.nutrition.calories, "215");
    assert_eq!(recipe.nutrition.fat, "24g");
    assert_eq!(recipe.nutrition.protein, "0g");
    mock.assert_async().await;
}

/// Test builder without source
#[tokio::test]
async fn test_builder_no_source() {
    let result = RecipeImporter::builder().build().await;

    assert!(result.is_err());
    match result.unwrap_err() {
        RecipeError::BuilderError(msg) => {
            assert!(msg.contains("No input source specified"));
        }
        other => panic!("Expected BuilderError, got {:?}", other),
    }
}

/// Test builder with empty text
#[tokio::test]
async fn test_builder_empty_text() {
    let result = RecipeImporter::builder().text("   \n\n").build().await;
    assert!(matches!(result, Err(RecipeError::EmptyInput)));

    let result = RecipeImporter::builder().markdown("").build().await;
    assert!(matches!(result, Err(RecipeError::EmptyInput)));
}

/// Test that a timeout override keeps the key and URL from the environment
#[tokio::test]
async fn test_builder_timeout_keeps_env_config() {
    let _env = ENV_LOCK.lock().await;
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/foods/search")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("api_key".into(), "env_key".into()),
            Matcher::UrlEncoded("query".into(), "bread".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"foods": [{
                "description": "Bread, white",
                "dataType": "SR Legacy",
                "foodNutrients": [
                    {"nutrientName": "Energy", "unitName": "KCAL", "value": 250.0},
                    {"nutrientName": "Protein", "unitName": "G", "value": 8.0}
                ]
            }]}"#,
        )
        .create_async()
        .await;

    env::set_var("RECIPE_BOX__API_KEY", "env_key");
    env::set_var("RECIPE_BOX__BASE_URL", server.url());
    let result = RecipeImporter::builder()
        .text("Toast\nIngredients\n2 slices bread")
        .with_nutrition()
        .timeout(Duration::from_secs(10))
        .build()
        .await;
    env::remove_var("RECIPE_BOX__API_KEY");
    env::remove_var("RECIPE_BOX__BASE_URL");

    // 50 g bread
    let recipe = result.unwrap();
    assert_eq!(recipe.nutrition.calories, "125");
    assert_eq!(recipe.nutrition.protein, "4g");
    mock.assert_async().await;
}

/// Test that the last input source set wins
#[tokio::test]
async fn test_builder_last_source_wins() {
    let recipe = RecipeImporter::builder()
        .markdown("# Ignored\n## Ingredients\n- nothing\n")
        .text("Toast\nIngredients\nbread")
        .build()
        .await
        .unwrap();

    assert_eq!(recipe.title, "Toast");
    assert_eq!(recipe.ingredients, vec!["bread"]);
}
