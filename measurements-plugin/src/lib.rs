//! Product template hooks for the measurements engine.
//!
//! [`MeasurementsPlugin`] owns the unit catalog and the configuration, and
//! computes the derived fields of a template: weight, density, display
//! precisions, the measurement code and the display name. It implements
//! [`TemplateHandler`] so a host can run it on `product.template` entities,
//! writing the derived fields back into the entity's JSON payload.
//!
//! [`ConfigStore`] reads and writes the configuration as TOML.

mod config_store;
mod error;
mod handler;
mod plugin;

pub use config_store::ConfigStore;
pub use error::{PluginError, Result};
pub use handler::TemplateHandler;
pub use plugin::{DerivedField, DerivedFields, MeasurementsPlugin, REC_NAME};

pub use measurements_model::{measurement_context, MeasurementField};
