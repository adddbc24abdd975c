//! Recipe matching against an inventory snapshot
//!
//! For every requirement of a recipe the engine gathers the owned
//! ingredients that can satisfy it (the ingredient itself plus its
//! substitutes), converts their quantities into the requirement's unit and
//! reports either "satisfied" or the exact shortfall. Owned quantities whose
//! units cannot be compared are left out of the sum and reported as
//! warnings; they never abort the match.

use std::collections::HashMap;
use std::fmt;

use larder_shared::{
    compare, normalize_name, Comparison, Ingredient, Quantity, Recipe, Requirement, UnitError,
};
use serde::{Serialize, Serializer};

use crate::error::{MatchError, MatchResult};
use crate::substitution::substitutes_for;

/// Owned ingredients indexed by their case-insensitive name
#[derive(Debug, Default)]
pub struct InventoryIndex<'a> {
    by_name: HashMap<String, Vec<&'a Ingredient>>,
}

impl<'a> InventoryIndex<'a> {
    pub fn new(ingredients: &'a [Ingredient]) -> Self {
        let mut by_name: HashMap<String, Vec<&'a Ingredient>> = HashMap::new();
        for ingredient in ingredients {
            by_name.entry(ingredient.key()).or_default().push(ingredient);
        }

        Self { by_name }
    }

    /// Every owned record stored under `name`
    pub fn get(&self, name: &str) -> &[&'a Ingredient] {
        self.by_name
            .get(&normalize_name(name))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Category of the first owned record named `name`
    pub fn category_of(&self, name: &str) -> Option<&'a str> {
        self.get(name).first().copied().map(Ingredient::category)
    }
}

/// A requirement that is not fully covered by the inventory
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MissingItem {
    pub name: String,
    /// Amount still needed, in `unit`
    pub shortfall: f64,
    pub unit: String,
}

/// An owned ingredient that was ignored because its unit can't be compared
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct UnitWarning {
    pub requirement: String,
    pub ingredient: String,
    pub owned_unit: String,
    pub required_unit: String,
    pub error: UnitError,
}

impl fmt::Display for UnitWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "'{}' ({}) was not counted towards '{}' ({}): {}",
            self.ingredient, self.owned_unit, self.requirement, self.required_unit, self.error
        )
    }
}

fn serialize_recipe_name<S: Serializer>(
    recipe: &&Recipe,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&recipe.name)
}

/// Result of matching one recipe against one inventory snapshot.
///
/// Reports are never updated in place: when the inventory changes, match
/// again.
#[derive(Clone, Debug, Serialize)]
pub struct MatchReport<'a> {
    #[serde(serialize_with = "serialize_recipe_name")]
    pub recipe: &'a Recipe,
    /// Share of fully satisfied requirements, 0 to 100
    pub percentage: u8,
    /// Satisfied requirement names, in recipe order
    pub satisfied: Vec<String>,
    /// Unmet requirements with their shortfall, in recipe order
    pub missing: Vec<MissingItem>,
    pub warnings: Vec<UnitWarning>,
}

impl MatchReport<'_> {
    pub fn can_make(&self) -> bool {
        self.percentage == 100
    }
}

enum Outcome {
    Satisfied,
    Missing(f64),
}

/// Round-half-up percentage of `part` over `total` using integer arithmetic
fn percentage(part: usize, total: usize) -> u8 {
    ((200 * part + total) / (2 * total)) as u8
}

/// Match a recipe against owned ingredients.
pub fn match_recipe<'a>(
    recipe: &'a Recipe,
    owned: &[Ingredient],
) -> MatchResult<MatchReport<'a>> {
    match_indexed(recipe, &InventoryIndex::new(owned))
}

/// Match a recipe against an already indexed inventory snapshot.
pub fn match_indexed<'a>(
    recipe: &'a Recipe,
    inventory: &InventoryIndex<'_>,
) -> MatchResult<MatchReport<'a>> {
    if recipe.requirements.is_empty() {
        return Err(MatchError::InvalidRecipe(recipe.name.clone()));
    }

    let mut satisfied = Vec::new();
    let mut missing = Vec::new();
    let mut warnings = Vec::new();

    for requirement in &recipe.requirements {
        match evaluate(requirement, inventory, &mut warnings) {
            Outcome::Satisfied => satisfied.push(requirement.name.trim().to_string()),
            Outcome::Missing(amount) => missing.push(MissingItem {
                name: requirement.name.trim().to_string(),
                shortfall: amount,
                unit: requirement.unit.clone(),
            }),
        }
    }

    let percentage = percentage(satisfied.len(), recipe.requirements.len());

    tracing::debug!(
        recipe = %recipe.name,
        percentage,
        satisfied = satisfied.len(),
        missing = missing.len(),
        warnings = warnings.len(),
        "Recipe matched"
    );

    Ok(MatchReport {
        recipe,
        percentage,
        satisfied,
        missing,
        warnings,
    })
}

fn evaluate(
    requirement: &Requirement,
    inventory: &InventoryIndex<'_>,
    warnings: &mut Vec<UnitWarning>,
) -> Outcome {
    let candidates: Vec<&Ingredient> = substitutes_for(&requirement.name)
        .iter()
        .flat_map(|name| inventory.get(name))
        .copied()
        .collect();

    if candidates.is_empty() {
        return Outcome::Missing(requirement.quantity);
    }

    let mut owned_total = 0.0;
    let mut comparable = false;

    for candidate in candidates {
        match candidate.quantity().express_in(&requirement.unit) {
            Ok(amount) => {
                owned_total += amount;
                comparable = true;
            }
            Err(error) => {
                tracing::warn!(
                    requirement = %requirement.name,
                    ingredient = %candidate.name,
                    owned_unit = %candidate.unit,
                    required_unit = %requirement.unit,
                    "Skipping owned ingredient with incomparable unit: {}",
                    error
                );
                warnings.push(UnitWarning {
                    requirement: requirement.name.trim().to_string(),
                    ingredient: candidate.name.trim().to_string(),
                    owned_unit: candidate.unit.clone(),
                    required_unit: requirement.unit.clone(),
                    error,
                });
            }
        }
    }

    if !comparable {
        return Outcome::Missing(requirement.quantity);
    }

    let owned = Quantity::new(owned_total, requirement.unit.clone());
    let comparison = compare(&owned, &requirement.quantity());
    if comparison.is_satisfied() {
        return Outcome::Satisfied;
    }

    match comparison {
        Comparison::Shortfall(missing) => Outcome::Missing(missing.amount),
        Comparison::Incomparable(_) => Outcome::Missing(requirement.quantity),
    }
}

/// Match every recipe and keep those at or above `min_match_percent`,
/// best matches first (ties by recipe name).
pub fn find_matches<'a, I>(
    recipes: I,
    owned: &[Ingredient],
    min_match_percent: u8,
) -> MatchResult<Vec<MatchReport<'a>>>
where
    I: IntoIterator<Item = &'a Recipe>,
{
    let inventory = InventoryIndex::new(owned);
    let mut reports = Vec::new();

    for recipe in recipes {
        let report = match_indexed(recipe, &inventory)?;
        if report.percentage >= min_match_percent {
            reports.push(report);
        }
    }

    reports.sort_by(|a, b| {
        b.percentage
            .cmp(&a.percentage)
            .then_with(|| a.recipe.name.cmp(&b.recipe.name))
    });

    Ok(reports)
}
