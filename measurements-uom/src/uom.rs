//! Unit of measure and unit category types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The physical quantity a unit measures.
///
/// Every category has a reference unit with factor `1.0`; all other units
/// in the category are expressed relative to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UomCategory {
    /// Reference unit: meter.
    Length,
    /// Reference unit: kilogram.
    Weight,
    /// Reference unit: liter.
    Volume,
}

impl UomCategory {
    /// Returns the id of the category's reference unit.
    #[must_use]
    pub fn reference_id(&self) -> &'static str {
        match self {
            Self::Length => "meter",
            Self::Weight => "kilogram",
            Self::Volume => "liter",
        }
    }

    /// Returns the lowercase category name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Length => "length",
            Self::Weight => "weight",
            Self::Volume => "volume",
        }
    }
}

impl fmt::Display for UomCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A unit of measure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Uom {
    /// Stable key used by host records (e.g. "meter").
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Short symbol shown next to values (e.g. "m").
    pub symbol: String,
    pub category: UomCategory,
    /// Multiplier from this unit to the category's reference unit.
    pub factor: f64,
    /// Smallest representable step of a quantity in this unit.
    pub rounding: f64,
    /// Display precision (decimal places).
    pub digits: u32,
}

impl Uom {
    /// Creates a unit with the default rounding (0.01) and precision (2).
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        symbol: impl Into<String>,
        category: UomCategory,
        factor: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            symbol: symbol.into(),
            category,
            factor,
            rounding: 0.01,
            digits: 2,
        }
    }

    /// Overrides the display precision, keeping `rounding` consistent with it.
    #[must_use]
    pub fn with_digits(mut self, digits: u32) -> Self {
        self.digits = digits;
        self.rounding = 10f64.powi(-i32::try_from(digits).unwrap_or(i32::MAX));
        self
    }

    /// Returns true if this is its category's reference unit.
    #[must_use]
    pub fn is_reference(&self) -> bool {
        self.factor == 1.0
    }

    /// Converts a quantity in this unit to the reference unit.
    #[must_use]
    pub fn to_reference(&self, value: f64) -> f64 {
        value * self.factor
    }

    /// Converts a quantity in the reference unit to this unit.
    #[must_use]
    pub fn from_reference(&self, value: f64) -> f64 {
        value / self.factor
    }
}

impl fmt::Display for Uom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
