use serde::{Deserialize, Serialize};

use crate::unit::{self, normalize_unit, UnitError, UnitResult};

/// Residue below this is float noise from conversion, not a real shortfall
const SHORTFALL_EPSILON: f64 = 1e-9;

/// An amount paired with the unit it is expressed in
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Quantity {
    pub amount: f64,
    pub unit: String,
}

impl Quantity {
    pub fn new(amount: f64, unit: impl Into<String>) -> Self {
        Self {
            amount,
            unit: unit.into(),
        }
    }

    /// Whether both quantities use the same unit string (trimmed, case-insensitive)
    pub fn same_unit(&self, unit: &str) -> bool {
        normalize_unit(&self.unit) == normalize_unit(unit)
    }

    /// Express this quantity's amount in `unit`.
    ///
    /// Identical unit strings short-circuit without consulting the table, so
    /// opaque units ("clove", "sprig") still compare against themselves.
    pub fn express_in(&self, unit: &str) -> UnitResult<f64> {
        if self.same_unit(unit) {
            return Ok(self.amount);
        }

        unit::convert(self.amount, &self.unit, unit)
    }
}

/// Outcome of comparing an owned quantity against a required one
#[derive(Clone, Debug, PartialEq)]
pub enum Comparison {
    /// Missing amount in the required unit; zero when fully covered
    Shortfall(Quantity),
    /// Units cannot be brought into a common unit
    Incomparable(UnitError),
}

impl Comparison {
    pub fn is_satisfied(&self) -> bool {
        matches!(self, Comparison::Shortfall(q) if q.amount == 0.0)
    }
}

/// Shortfall of `required` given `owned`, floored at zero.
fn shortfall(owned_amount: f64, required_amount: f64) -> f64 {
    let delta = required_amount - owned_amount;
    if delta <= SHORTFALL_EPSILON {
        0.0
    } else {
        delta
    }
}

/// Compare an owned quantity with a required one in the required unit.
pub fn compare(owned: &Quantity, required: &Quantity) -> Comparison {
    match owned.express_in(&required.unit) {
        Ok(owned_amount) => Comparison::Shortfall(Quantity::new(
            shortfall(owned_amount, required.amount),
            required.unit.clone(),
        )),
        Err(e) => Comparison::Incomparable(e),
    }
}
