//! Measurement model for product templates.
//!
//! - [`Template`]: a snapshot of a template's shape, dimensions, weight and
//!   density, with resolved units
//! - [`derive_weight`] / [`derive_density`]: solve the weight, density and
//!   volume relation for whichever side is missing
//! - [`Configuration`]: default units and shape for new templates, and the
//!   measurement code formula with its save-time check
//! - [`Entity`]: the host store record product templates travel in
//!
//! Nothing here holds state between calls: every value is read from the
//! snapshot it is given.

mod configuration;
mod context;
mod derive;
mod entity;
mod error;
mod template;

pub use configuration::{CodeFailurePolicy, Configuration, ConfigurationRecord};
pub use context::measurement_context;
pub use derive::{
    density_digits, derive_density, derive_weight, diameter_digits, volume_m3, weight_digits,
    DEFAULT_DENSITY_DIGITS, DEFAULT_DIGITS, LITERS_PER_CUBIC_METER,
};
pub use entity::Entity;
pub use error::{ConfigError, ModelError, ModelResult};
pub use template::{
    display_name, MeasurementField, ProductType, Shape, Template, TemplateRecord, PRODUCT_TEMPLATE,
};
