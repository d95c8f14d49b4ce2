//! Error types for the measurement model.

use measurements_formula::EvaluationError;
use measurements_uom::UomError;
use thiserror::Error;

/// Errors raised while building or checking a product template.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error(transparent)]
    Uom(#[from] UomError),

    /// A value is set without the unit it is measured in.
    #[error("'{field}' is set but its unit of measure is missing")]
    MissingUom { field: &'static str },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors raised while validating the measurement configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The measurement code formula failed on a canned geometry.
    #[error("invalid formula\n{formula}\n\n{error}")]
    InvalidFormula {
        formula: String,
        #[source]
        error: EvaluationError,
    },

    #[error(transparent)]
    Uom(#[from] UomError),
}

/// Result type for model operations.
pub type ModelResult<T> = Result<T, ModelError>;
