use larder_shared::normalize_name;
use serde::Serialize;
use strum::{AsRefStr, Display, VariantArray};

/// Grocery store aisle used when the inventory doesn't know an ingredient
#[derive(Display, AsRefStr, VariantArray, Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Vegetables,
    Fruits,
    Dairy,
    Meat,
    Grains,
    Spices,
    Uncategorized,
}

impl Category {
    pub fn as_str(&self) -> &str {
        self.as_ref()
    }
}

const SPICES: &[&str] = &[
    "salt",
    "black pepper",
    "white pepper",
    "cinnamon",
    "paprika",
    "cumin",
    "oregano",
    "thyme",
    "vanilla",
    "garlic powder",
    "onion powder",
    "chili powder",
    "nutmeg",
];

const VEGETABLES: &[&str] = &[
    "lettuce", "tomato", "onion", "garlic", "potato", "carrot", "pepper", "broccoli", "spinach",
    "cucumber", "celery", "zucchini", "mushroom", "cabbage", "eggplant",
];

const FRUITS: &[&str] = &[
    "apple", "banana", "orange", "lemon", "lime", "berry", "berries", "grape", "melon", "peach",
];

const DAIRY: &[&str] = &["milk", "cheese", "butter", "yogurt", "cream", "egg"];

const MEAT: &[&str] = &[
    "chicken", "beef", "pork", "turkey", "fish", "salmon", "tuna", "shrimp", "bacon", "ham",
];

const GRAINS: &[&str] = &["flour", "bread", "rice", "pasta", "oats", "cereal", "tortilla", "noodle"];

/// Categorization Service
///
/// Stateless domain service that guesses a grocery category from an
/// ingredient name by keyword. Spice names are checked first and must match
/// exactly, so "garlic powder" lands in spices while "garlic" is a vegetable.
pub struct CategorizationService;

impl CategorizationService {
    pub fn categorize(ingredient_name: &str) -> Category {
        let name = normalize_name(ingredient_name);

        if SPICES.contains(&name.as_str()) {
            return Category::Spices;
        }

        let groups = [
            (VEGETABLES, Category::Vegetables),
            (FRUITS, Category::Fruits),
            (DAIRY, Category::Dairy),
            (MEAT, Category::Meat),
            (GRAINS, Category::Grains),
        ];

        groups
            .into_iter()
            .find(|(keywords, _)| keywords.iter().any(|k| name.contains(k)))
            .map(|(_, category)| category)
            .unwrap_or(Category::Uncategorized)
    }
}
