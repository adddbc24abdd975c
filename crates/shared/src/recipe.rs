use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};
use validator::Validate;

use crate::ingredient::normalize_name;
use crate::quantity::Quantity;

#[derive(
    EnumString,
    Display,
    VariantArray,
    Default,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    AsRefStr,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

/// One ingredient line of a recipe
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
pub struct Requirement {
    pub name: String,
    #[validate(range(min = 0.0, message = "Required quantity cannot be negative"))]
    pub quantity: f64,
    #[serde(default)]
    pub unit: String,
}

impl Requirement {
    pub fn new(name: impl Into<String>, quantity: f64, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quantity,
            unit: unit.into(),
        }
    }

    pub fn key(&self) -> String {
        normalize_name(&self.name)
    }

    pub fn quantity(&self) -> Quantity {
        Quantity::new(self.quantity, self.unit.clone())
    }
}

fn default_servings() -> u32 {
    1
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
pub struct Recipe {
    pub name: String,
    #[serde(alias = "ingredients")]
    #[validate(
        length(min = 1, message = "Recipe needs at least one ingredient"),
        nested
    )]
    pub requirements: Vec<Requirement>,
    #[serde(default = "default_servings")]
    #[validate(range(min = 1, message = "Servings must be at least 1"))]
    pub servings: u32,
    /// Minutes
    #[serde(default)]
    pub prep_time: u32,
    /// Minutes
    #[serde(default)]
    pub cook_time: u32,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub instructions: Vec<String>,
}

impl Recipe {
    pub fn new(name: impl Into<String>, requirements: Vec<Requirement>) -> Self {
        Self {
            name: name.into(),
            requirements,
            servings: default_servings(),
            prep_time: 0,
            cook_time: 0,
            difficulty: Difficulty::default(),
            instructions: Vec::new(),
        }
    }

    /// Prep plus cook time in minutes, saturating at `u32::MAX`
    pub fn total_time(&self) -> u32 {
        self.prep_time.saturating_add(self.cook_time)
    }
}
