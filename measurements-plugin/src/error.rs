//! Error types for the measurements plugin.

use measurements_formula::EvaluationError;
use measurements_model::{ConfigError, ModelError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PluginError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("measurement code formula failed: {0}")]
    Evaluation(#[from] EvaluationError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid configuration file: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("configuration serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("expected a '{expected}' entity, got '{actual}'")]
    EntityType {
        expected: &'static str,
        actual: String,
    },
}

pub type Result<T> = std::result::Result<T, PluginError>;
