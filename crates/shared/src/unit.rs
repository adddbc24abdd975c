use std::collections::HashMap;
use std::sync::LazyLock;

use serde::Serialize;
use strum::{AsRefStr, Display};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitError {
    #[error("Unknown unit: '{0}'")]
    Unknown(String),

    #[error("Incompatible units: cannot convert '{from}' to '{to}'")]
    Incompatible { from: String, to: String },
}

pub type UnitResult<T> = Result<T, UnitError>;

/// Dimension group of a unit. Units only convert within their own group.
#[derive(Display, AsRefStr, Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Volume,
    Mass,
    Count,
}

/// A resolved entry of the conversion table
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Unit {
    pub name: &'static str,
    pub dimension: Dimension,
    /// Multiplier to the dimension's base unit
    pub factor: f64,
}

const UNITS: &[(&str, Dimension, f64)] = &[
    // Volume -> ml
    ("ml", Dimension::Volume, 1.0),
    ("milliliter", Dimension::Volume, 1.0),
    ("milliliters", Dimension::Volume, 1.0),
    ("millilitre", Dimension::Volume, 1.0),
    ("millilitres", Dimension::Volume, 1.0),
    ("l", Dimension::Volume, 1000.0),
    ("liter", Dimension::Volume, 1000.0),
    ("liters", Dimension::Volume, 1000.0),
    ("litre", Dimension::Volume, 1000.0),
    ("litres", Dimension::Volume, 1000.0),
    ("cup", Dimension::Volume, 236.588),
    ("cups", Dimension::Volume, 236.588),
    ("tbsp", Dimension::Volume, 14.787),
    ("tablespoon", Dimension::Volume, 14.787),
    ("tablespoons", Dimension::Volume, 14.787),
    ("tsp", Dimension::Volume, 4.929),
    ("teaspoon", Dimension::Volume, 4.929),
    ("teaspoons", Dimension::Volume, 4.929),
    ("fl oz", Dimension::Volume, 29.574),
    ("fluid ounce", Dimension::Volume, 29.574),
    ("fluid ounces", Dimension::Volume, 29.574),
    ("pint", Dimension::Volume, 473.176),
    ("pints", Dimension::Volume, 473.176),
    ("quart", Dimension::Volume, 946.353),
    ("quarts", Dimension::Volume, 946.353),
    ("gallon", Dimension::Volume, 3785.41),
    ("gallons", Dimension::Volume, 3785.41),
    // Mass -> g
    ("g", Dimension::Mass, 1.0),
    ("gram", Dimension::Mass, 1.0),
    ("grams", Dimension::Mass, 1.0),
    ("kg", Dimension::Mass, 1000.0),
    ("kilogram", Dimension::Mass, 1000.0),
    ("kilograms", Dimension::Mass, 1000.0),
    ("mg", Dimension::Mass, 0.001),
    ("milligram", Dimension::Mass, 0.001),
    ("milligrams", Dimension::Mass, 0.001),
    ("lb", Dimension::Mass, 453.592),
    ("lbs", Dimension::Mass, 453.592),
    ("pound", Dimension::Mass, 453.592),
    ("pounds", Dimension::Mass, 453.592),
    ("oz", Dimension::Mass, 28.3495),
    ("ounce", Dimension::Mass, 28.3495),
    ("ounces", Dimension::Mass, 28.3495),
    // Count (unit-less)
    ("", Dimension::Count, 1.0),
    ("unit", Dimension::Count, 1.0),
    ("units", Dimension::Count, 1.0),
    ("item", Dimension::Count, 1.0),
    ("items", Dimension::Count, 1.0),
    ("piece", Dimension::Count, 1.0),
    ("pieces", Dimension::Count, 1.0),
    ("pc", Dimension::Count, 1.0),
    ("pcs", Dimension::Count, 1.0),
    ("whole", Dimension::Count, 1.0),
    ("count", Dimension::Count, 1.0),
];

static UNIT_TABLE: LazyLock<HashMap<&'static str, Unit>> = LazyLock::new(|| {
    UNITS
        .iter()
        .map(|&(name, dimension, factor)| {
            (
                name,
                Unit {
                    name,
                    dimension,
                    factor,
                },
            )
        })
        .collect()
});

/// Normalize a unit string (lowercase, trim whitespace)
pub fn normalize_unit(unit: &str) -> String {
    unit.trim().to_lowercase()
}

/// Resolve a unit string against the conversion table
pub fn lookup(unit: &str) -> Option<Unit> {
    UNIT_TABLE.get(normalize_unit(unit).as_str()).copied()
}

pub fn dimension_of(unit: &str) -> Option<Dimension> {
    lookup(unit).map(|u| u.dimension)
}

/// Check if two units are both known and share a dimension group
pub fn are_compatible(a: &str, b: &str) -> bool {
    match (dimension_of(a), dimension_of(b)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

/// All unit spellings convertible with `unit`, sorted alphabetically.
///
/// Returns an empty list for unknown units.
pub fn compatible_units(unit: &str) -> Vec<&'static str> {
    let Some(dimension) = dimension_of(unit) else {
        return Vec::new();
    };

    let mut units: Vec<&'static str> = UNITS
        .iter()
        .filter(|(_, d, _)| *d == dimension)
        .map(|(name, _, _)| *name)
        .collect();
    units.sort_unstable();
    units
}

/// Convert `amount` from one unit to another.
///
/// The result is `amount * factor(from) / factor(to)` with no rounding.
/// Unknown unit strings fail with [`UnitError::Unknown`] even when both
/// sides are spelled the same; callers that want an exact-string fallback
/// for opaque units do it themselves (see [`crate::Quantity::express_in`]).
pub fn convert(amount: f64, from: &str, to: &str) -> UnitResult<f64> {
    let from_unit = lookup(from).ok_or_else(|| UnitError::Unknown(from.trim().to_string()))?;
    let to_unit = lookup(to).ok_or_else(|| UnitError::Unknown(to.trim().to_string()))?;

    if from_unit.dimension != to_unit.dimension {
        return Err(UnitError::Incompatible {
            from: from.trim().to_string(),
            to: to.trim().to_string(),
        });
    }

    Ok(amount * (from_unit.factor / to_unit.factor))
}
