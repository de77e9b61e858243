//! Error types for the mortgage calculator

use thiserror::Error;

/// Errors raised by the engine, the config layer and the exporters
#[derive(Debug, Error)]
pub enum MortgageError {
    /// A frequency label arriving as text did not match any known cadence
    #[error("Invalid frequency: {0}")]
    InvalidFrequency(String),

    /// A user-supplied value could not be converted to the expected type
    #[error("Invalid value for {field}: {value:?}")]
    InvalidInput {
        field: &'static str,
        value: String,
    },

    /// Configuration could not be assembled
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result alias used throughout the library
pub type Result<T> = std::result::Result<T, MortgageError>;
