use std::borrow::Cow;
use std::collections::BTreeMap;
use std::num::NonZeroU32;

use larder_recipe::{match_indexed, scale_recipe, InventoryIndex, MatchReport, MatchResult};
use larder_shared::{normalize_name, Ingredient, Quantity, Recipe, DEFAULT_CATEGORY};
use serde::Serialize;

use crate::categorization::CategorizationService;

/// One line of the shopping list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShoppingItem {
    pub name: String,
    pub quantity: f64,
    pub unit: String,
}

/// Items to buy grouped by category, categories in alphabetical order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ShoppingList {
    categories: BTreeMap<String, Vec<ShoppingItem>>,
}

/// Item counts of a shopping list
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ShoppingSummary {
    pub total_items: usize,
    pub by_category: BTreeMap<String, usize>,
}

impl ShoppingList {
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[ShoppingItem])> {
        self.categories
            .iter()
            .map(|(category, items)| (category.as_str(), items.as_slice()))
    }

    pub fn category(&self, name: &str) -> Option<&[ShoppingItem]> {
        self.categories.get(name).map(Vec::as_slice)
    }

    /// Total number of items across all categories
    pub fn len(&self) -> usize {
        self.categories.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn summary(&self) -> ShoppingSummary {
        ShoppingSummary {
            total_items: self.len(),
            by_category: self
                .categories
                .iter()
                .map(|(category, items)| (category.clone(), items.len()))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AggregateOptions {
    /// Guess a category from the ingredient name when the inventory has no record
    pub guess_categories: bool,
    /// Target servings per recipe, keyed by normalized recipe name
    pub servings: BTreeMap<String, NonZeroU32>,
}

impl AggregateOptions {
    /// Cook `recipe` for `servings` instead of its own serving count
    pub fn with_servings(mut self, recipe: &str, servings: NonZeroU32) -> Self {
        self.servings.insert(normalize_name(recipe), servings);
        self
    }

    fn scaled<'a>(&self, recipe: &'a Recipe) -> Cow<'a, Recipe> {
        match self.servings.get(&normalize_name(&recipe.name)) {
            Some(&servings) if servings.get() != recipe.servings => {
                tracing::debug!(recipe = %recipe.name, servings = servings.get(), "Scaling recipe");
                Cow::Owned(scale_recipe(recipe, servings))
            }
            _ => Cow::Borrowed(recipe),
        }
    }
}

struct Line {
    key: String,
    item: ShoppingItem,
}

/// Build the shopping list needed to cook every recipe from current stock.
///
/// Each recipe is matched against the same snapshot, so stock is never
/// depleted between recipes; shortfalls of the same ingredient are summed.
pub fn aggregate<'a, I>(recipes: I, owned: &[Ingredient]) -> MatchResult<ShoppingList>
where
    I: IntoIterator<Item = &'a Recipe>,
{
    aggregate_with(recipes, owned, &AggregateOptions::default())
}

/// Like [`aggregate`]; recipes listed in [`AggregateOptions::servings`] are
/// scaled before matching.
pub fn aggregate_with<'a, I>(
    recipes: I,
    owned: &[Ingredient],
    options: &AggregateOptions,
) -> MatchResult<ShoppingList>
where
    I: IntoIterator<Item = &'a Recipe>,
{
    let inventory = InventoryIndex::new(owned);
    let recipes: Vec<Cow<'a, Recipe>> = recipes
        .into_iter()
        .map(|recipe| options.scaled(recipe))
        .collect();
    let reports = recipes
        .iter()
        .map(|recipe| match_indexed(recipe, &inventory))
        .collect::<MatchResult<Vec<_>>>()?;

    Ok(from_reports(&reports, &inventory, options))
}

/// Consolidate the missing items of several match reports.
///
/// The first occurrence of an ingredient fixes the unit of its line; later
/// shortfalls are converted into it. A shortfall that can't be converted
/// opens a separate line in its own unit instead of failing the list.
/// Lines that sum to nothing are left out.
pub fn from_reports(
    reports: &[MatchReport<'_>],
    inventory: &InventoryIndex<'_>,
    options: &AggregateOptions,
) -> ShoppingList {
    let mut lines: Vec<Line> = Vec::new();

    for missing in reports.iter().flat_map(|r| &r.missing) {
        let key = normalize_name(&missing.name);
        let shortfall = Quantity::new(missing.shortfall, missing.unit.clone());

        let existing = lines
            .iter_mut()
            .filter(|l| l.key == key)
            .find_map(|l| shortfall.express_in(&l.item.unit).ok().map(|amount| (l, amount)));

        match existing {
            Some((line, amount)) => line.item.quantity += amount,
            None => {
                if lines.iter().any(|l| l.key == key) {
                    tracing::debug!(
                        ingredient = %missing.name,
                        unit = %missing.unit,
                        "Shortfall unit incompatible with existing line, listing separately"
                    );
                }
                lines.push(Line {
                    key,
                    item: ShoppingItem {
                        name: missing.name.clone(),
                        quantity: missing.shortfall,
                        unit: missing.unit.clone(),
                    },
                });
            }
        }
    }

    let mut categories: BTreeMap<String, Vec<ShoppingItem>> = BTreeMap::new();
    for line in lines {
        if line.item.quantity <= 0.0 {
            tracing::debug!(ingredient = %line.item.name, "Nothing to buy, dropping line");
            continue;
        }

        let category = match inventory.category_of(&line.key) {
            Some(category) => category.to_string(),
            None if options.guess_categories => CategorizationService::categorize(&line.key)
                .as_str()
                .to_string(),
            None => DEFAULT_CATEGORY.to_string(),
        };
        categories.entry(category).or_default().push(line.item);
    }

    for items in categories.values_mut() {
        items.sort_by(|a, b| {
            b.quantity
                .total_cmp(&a.quantity)
                .then_with(|| a.name.cmp(&b.name))
        });
    }

    tracing::debug!(
        reports = reports.len(),
        categories = categories.len(),
        "Shopping list aggregated"
    );

    ShoppingList { categories }
}
