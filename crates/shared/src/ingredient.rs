use serde::{Deserialize, Serialize};
use time::Date;
use validator::Validate;

use crate::quantity::Quantity;

pub const DEFAULT_CATEGORY: &str = "uncategorized";

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

/// Normalize an ingredient name into its lookup key (lowercase, trim whitespace)
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

/// An ingredient in the user's kitchen
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
pub struct Ingredient {
    pub name: String,
    #[validate(range(min = 0.0, message = "Quantity cannot be negative"))]
    pub quantity: f64,
    #[serde(default)]
    pub unit: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(
        default,
        with = "iso_date::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub expiration_date: Option<Date>,
}

impl Ingredient {
    pub fn new(name: impl Into<String>, quantity: f64, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quantity,
            unit: unit.into(),
            category: default_category(),
            expiration_date: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_expiration(mut self, date: Date) -> Self {
        self.expiration_date = Some(date);
        self
    }

    /// Case-insensitive identity of the ingredient
    pub fn key(&self) -> String {
        normalize_name(&self.name)
    }

    pub fn quantity(&self) -> Quantity {
        Quantity::new(self.quantity, self.unit.clone())
    }

    /// Category with blank values mapped to the default
    pub fn category(&self) -> &str {
        let category = self.category.trim();
        if category.is_empty() {
            DEFAULT_CATEGORY
        } else {
            category
        }
    }
}
