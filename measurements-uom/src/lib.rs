//! Units of measure for product measurements.
//!
//! This crate defines the unit types the rest of the workspace converts
//! through:
//! - [`UomCategory`]: length, weight or volume, each with a reference unit
//!   (meter, kilogram, liter)
//! - [`Uom`]: a single unit with its conversion factor and display precision
//! - [`UomCatalog`]: keyed lookup of units, with the standard set preloaded
//!
//! Hosts reference units by their string id (e.g. `"meter"`), so record
//! formats stay independent of how a catalog is stored.

mod catalog;
mod rounding;
mod uom;

pub use catalog::UomCatalog;
pub use rounding::round_to_digits;
pub use uom::{Uom, UomCategory};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, UomError>;

/// Errors raised while resolving or registering units.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum UomError {
    #[error("unknown unit of measure: {0}")]
    Unknown(String),

    #[error("unit '{id}' is a {actual} unit, expected {expected}")]
    WrongCategory {
        id: String,
        expected: UomCategory,
        actual: UomCategory,
    },

    #[error("unit of measure already registered: {0}")]
    Duplicate(String),
}
