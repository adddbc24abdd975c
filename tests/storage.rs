use larder::storage::{load_recipes, load_snapshot, INGREDIENTS_FILE, RECIPES_FILE};
use larder::AppError;
use larder_recipe::match_recipe;
use larder_shared::Difficulty;
use temp_dir::TempDir;
use time::macros::date;

const INGREDIENTS: &str = r#"[
  {"name": "Milk", "quantity": 200, "unit": "ml", "category": "dairy", "expiration_date": "2026-03-01"},
  {"name": "flour", "quantity": 1, "unit": "kg"},
  {"name": "Eggs", "quantity": 6, "unit": ""}
]"#;

const RECIPES: &str = r#"[
  {
    "name": "Pancakes",
    "ingredients": [
      {"name": "milk", "quantity": 1, "unit": "cup"},
      {"name": "flour", "quantity": 200, "unit": "g"},
      {"name": "eggs", "quantity": 2, "unit": ""}
    ],
    "servings": 4,
    "prep_time": 10,
    "cook_time": 15,
    "difficulty": "easy",
    "instructions": ["Mix", "Fry"]
  }
]"#;

#[test]
fn test_load_snapshot() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    std::fs::write(dir.child(INGREDIENTS_FILE), INGREDIENTS)?;
    std::fs::write(dir.child(RECIPES_FILE), RECIPES)?;

    let snapshot = load_snapshot(dir.path())?;

    assert_eq!(snapshot.ingredients.len(), 3);
    assert_eq!(snapshot.ingredients[0].category(), "dairy");
    assert_eq!(snapshot.ingredients[0].expiration_date, Some(date!(2026 - 03 - 01)));
    assert_eq!(snapshot.ingredients[1].category(), "uncategorized");

    let recipe = snapshot.find_recipe("pancakes")?;
    assert_eq!(recipe.requirements.len(), 3);
    assert_eq!(recipe.difficulty, Difficulty::Easy);
    assert_eq!(recipe.total_time(), 25);

    // 1 cup of milk needs more than 200 ml
    let report = match_recipe(recipe, &snapshot.ingredients)?;
    assert_eq!(report.percentage, 67);
    assert_eq!(report.missing.len(), 1);
    assert_eq!(report.missing[0].name, "milk");

    Ok(())
}

#[test]
fn test_missing_files_are_empty_collections() -> anyhow::Result<()> {
    let dir = TempDir::new()?;

    let snapshot = load_snapshot(dir.path())?;

    assert!(snapshot.ingredients.is_empty());
    assert!(snapshot.recipes.is_empty());
    assert!(matches!(
        snapshot.find_recipe("Pancakes"),
        Err(AppError::RecipeNotFound(_))
    ));

    Ok(())
}

#[test]
fn test_recipe_without_ingredients_is_rejected() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    std::fs::write(
        dir.child(RECIPES_FILE),
        r#"[{"name": "Air", "ingredients": []}]"#,
    )?;

    let result = load_recipes(dir.path());

    assert!(matches!(result, Err(AppError::ValidationError { ref name, .. }) if name == "Air"));

    Ok(())
}

#[test]
fn test_negative_quantity_is_rejected() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    std::fs::write(
        dir.child(INGREDIENTS_FILE),
        r#"[{"name": "salt", "quantity": -1, "unit": "g"}]"#,
    )?;

    let result = load_snapshot(dir.path());

    assert!(matches!(result, Err(AppError::ValidationError { .. })));

    Ok(())
}

#[test]
fn test_malformed_json_reports_path() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    std::fs::write(dir.child(RECIPES_FILE), "not json")?;

    let error = load_recipes(dir.path()).unwrap_err();

    assert!(matches!(error, AppError::ParseError { .. }));
    assert!(error.to_string().contains(RECIPES_FILE));

    Ok(())
}

#[test]
fn test_snapshot_summary() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    std::fs::write(dir.child(INGREDIENTS_FILE), INGREDIENTS)?;
    std::fs::write(
        dir.child(RECIPES_FILE),
        r#"[
          {"name": "Toast", "ingredients": [{"name": "bread", "quantity": 2, "unit": ""}], "cook_time": 5},
          {"name": "Stew", "ingredients": [{"name": "beef", "quantity": 1, "unit": "kg"}], "prep_time": 20, "cook_time": 100}
        ]"#,
    )?;

    let summary = load_snapshot(dir.path())?.summary();

    assert_eq!(summary.total_ingredients, 3);
    assert_eq!(summary.total_recipes, 2);
    assert_eq!(summary.average_total_time, Some(62.5));
    assert_eq!(summary.by_category["dairy"], 1);
    assert_eq!(summary.by_category["uncategorized"], 2);

    Ok(())
}

#[test]
fn test_empty_snapshot_summary() -> anyhow::Result<()> {
    let dir = TempDir::new()?;

    let summary = load_snapshot(dir.path())?.summary();

    assert_eq!(summary.total_ingredients, 0);
    assert_eq!(summary.total_recipes, 0);
    assert_eq!(summary.average_total_time, None);
    assert!(summary.by_category.is_empty());

    Ok(())
}

#[test]
fn test_ingredients_sorted_by_name() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    std::fs::write(dir.child(INGREDIENTS_FILE), INGREDIENTS)?;

    let snapshot = load_snapshot(dir.path())?;

    let names: Vec<_> = snapshot
        .sorted_ingredients()
        .iter()
        .map(|i| i.name.as_str())
        .collect();
    assert_eq!(names, vec!["Eggs", "flour", "Milk"]);

    Ok(())
}
