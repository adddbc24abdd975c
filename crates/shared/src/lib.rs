//! Data model and unit handling shared by the matching and shopping crates.

pub mod expiry;
pub mod ingredient;
pub mod quantity;
pub mod recipe;
pub mod unit;

pub use expiry::{expired, expiring_within};
pub use ingredient::{normalize_name, Ingredient, DEFAULT_CATEGORY};
pub use quantity::{compare, Comparison, Quantity};
pub use recipe::{Difficulty, Recipe, Requirement};
pub use unit::{convert, Dimension, Unit, UnitError, UnitResult};
