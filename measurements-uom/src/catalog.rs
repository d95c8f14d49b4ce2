//! Keyed unit lookup with the standard unit set.

use crate::{Result, Uom, UomCategory, UomError};
use std::collections::BTreeMap;

/// Standard units: (id, name, symbol, category, factor).
const STANDARD_UNITS: &[(&str, &str, &str, UomCategory, f64)] = &[
    ("meter", "Meter", "m", UomCategory::Length, 1.0),
    ("kilometer", "Kilometer", "km", UomCategory::Length, 1000.0),
    ("centimeter", "Centimeter", "cm", UomCategory::Length, 0.01),
    ("millimeter", "Millimeter", "mm", UomCategory::Length, 0.001),
    ("foot", "Foot", "ft", UomCategory::Length, 0.3048),
    ("inch", "Inch", "in", UomCategory::Length, 0.0254),
    ("yard", "Yard", "yd", UomCategory::Length, 0.9144),
    ("mile", "Mile", "mi", UomCategory::Length, 1609.344),
    ("kilogram", "Kilogram", "kg", UomCategory::Weight, 1.0),
    ("gram", "Gram", "g", UomCategory::Weight, 0.001),
    ("tonne", "Tonne", "t", UomCategory::Weight, 1000.0),
    ("carat", "Carat", "c", UomCategory::Weight, 0.0002),
    ("pound", "Pound", "lb", UomCategory::Weight, 0.45359237),
    ("ounce", "Ounce", "oz", UomCategory::Weight, 0.028349523125),
    ("liter", "Liter", "l", UomCategory::Volume, 1.0),
    ("cubic_meter", "Cubic meter", "m³", UomCategory::Volume, 1000.0),
    ("cubic_centimeter", "Cubic centimeter", "cm³", UomCategory::Volume, 0.001),
    ("cubic_foot", "Cubic foot", "ft³", UomCategory::Volume, 28.316846592),
    ("cubic_inch", "Cubic inch", "in³", UomCategory::Volume, 0.016387064),
    ("gallon", "Gallon", "gal", UomCategory::Volume, 3.785411784),
];

/// A set of units keyed by id.
///
/// Iteration order is by id, so listings are stable.
#[derive(Debug, Clone, Default)]
pub struct UomCatalog {
    units: BTreeMap<String, Uom>,
}

impl UomCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a catalog preloaded with the standard length, weight and
    /// volume units.
    #[must_use]
    pub fn standard() -> Self {
        let units = STANDARD_UNITS
            .iter()
            .map(|&(id, name, symbol, category, factor)| {
                (id.to_string(), Uom::new(id, name, symbol, category, factor))
            })
            .collect();
        Self { units }
    }

    /// Registers a unit. Ids must be unique.
    pub fn insert(&mut self, uom: Uom) -> Result<()> {
        if self.units.contains_key(&uom.id) {
            return Err(UomError::Duplicate(uom.id));
        }
        self.units.insert(uom.id.clone(), uom);
        Ok(())
    }

    /// Looks up a unit by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Uom> {
        self.units.get(id)
    }

    /// Looks up a unit by id and checks that it belongs to `expected`.
    pub fn resolve(&self, id: &str, expected: UomCategory) -> Result<Uom> {
        let uom = self
            .get(id)
            .ok_or_else(|| UomError::Unknown(id.to_string()))?;
        if uom.category != expected {
            return Err(UomError::WrongCategory {
                id: id.to_string(),
                expected,
                actual: uom.category,
            });
        }
        Ok(uom.clone())
    }

    /// Resolves an optional id; `None` stays `None`.
    pub fn resolve_opt(&self, id: Option<&str>, expected: UomCategory) -> Result<Option<Uom>> {
        id.map(|id| self.resolve(id, expected)).transpose()
    }

    /// Returns the units of one category, ordered by id.
    pub fn in_category(&self, category: UomCategory) -> impl Iterator<Item = &Uom> {
        self.units.values().filter(move |u| u.category == category)
    }

    /// Returns the reference unit of a category, if registered.
    #[must_use]
    pub fn reference(&self, category: UomCategory) -> Option<&Uom> {
        self.get(category.reference_id())
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}
