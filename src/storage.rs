//! Inventory and recipe snapshots stored as JSON files in a data directory

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use larder_shared::{normalize_name, Ingredient, Recipe};
use serde::Serialize;
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::{AppError, AppResult};

pub const INGREDIENTS_FILE: &str = "ingredients.json";
pub const RECIPES_FILE: &str = "recipes.json";

/// Everything the matching commands read, loaded once per invocation
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub ingredients: Vec<Ingredient>,
    pub recipes: Vec<Recipe>,
}

impl Snapshot {
    /// Find a recipe by case-insensitive name
    pub fn find_recipe(&self, name: &str) -> AppResult<&Recipe> {
        let key = normalize_name(name);
        self.recipes
            .iter()
            .find(|r| normalize_name(&r.name) == key)
            .ok_or_else(|| AppError::RecipeNotFound(name.to_string()))
    }

    /// Owned ingredients ordered by case-insensitive name
    pub fn sorted_ingredients(&self) -> Vec<&Ingredient> {
        let mut ingredients: Vec<&Ingredient> = self.ingredients.iter().collect();
        ingredients.sort_by_cached_key(|i| i.key());
        ingredients
    }

    pub fn summary(&self) -> DataSummary {
        let mut by_category: BTreeMap<String, usize> = BTreeMap::new();
        for ingredient in &self.ingredients {
            *by_category
                .entry(ingredient.category().to_string())
                .or_default() += 1;
        }

        let average_total_time = (!self.recipes.is_empty()).then(|| {
            let total: f64 = self.recipes.iter().map(|r| f64::from(r.total_time())).sum();
            total / self.recipes.len() as f64
        });

        DataSummary {
            total_ingredients: self.ingredients.len(),
            total_recipes: self.recipes.len(),
            average_total_time,
            by_category,
        }
    }
}

/// Counts over a snapshot
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DataSummary {
    pub total_ingredients: usize,
    pub total_recipes: usize,
    /// Mean prep plus cook minutes, `None` without recipes
    pub average_total_time: Option<f64>,
    /// Owned ingredient records per category
    pub by_category: BTreeMap<String, usize>,
}

fn read_collection<T: DeserializeOwned>(path: &Path) -> AppResult<Vec<T>> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "Data file not found, using empty collection");
        return Ok(Vec::new());
    }

    let content = fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|source| AppError::ParseError {
        path: path.to_path_buf(),
        source,
    })
}

pub fn load_ingredients(dir: &Path) -> AppResult<Vec<Ingredient>> {
    let ingredients: Vec<Ingredient> = read_collection(&dir.join(INGREDIENTS_FILE))?;

    for ingredient in &ingredients {
        ingredient
            .validate()
            .map_err(|source| AppError::ValidationError {
                name: ingredient.name.clone(),
                source,
            })?;
    }

    Ok(ingredients)
}

pub fn load_recipes(dir: &Path) -> AppResult<Vec<Recipe>> {
    let recipes: Vec<Recipe> = read_collection(&dir.join(RECIPES_FILE))?;

    for recipe in &recipes {
        recipe.validate().map_err(|source| AppError::ValidationError {
            name: recipe.name.clone(),
            source,
        })?;
    }

    Ok(recipes)
}

pub fn load_snapshot(dir: &Path) -> AppResult<Snapshot> {
    let snapshot = Snapshot {
        ingredients: load_ingredients(dir)?,
        recipes: load_recipes(dir)?,
    };

    tracing::info!(
        dir = %dir.display(),
        ingredients = snapshot.ingredients.len(),
        recipes = snapshot.recipes.len(),
        "Snapshot loaded"
    );

    Ok(snapshot)
}
