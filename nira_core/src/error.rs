//! Error types for the nira_core library.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// A rejected field value.
///
/// `field` is the schema field name (`date_of_birth`, `neck_circumference`, ...)
/// and `message` the human-readable rule that was violated. Callers matching on
/// message text can rely on the wording staying stable.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Core error type for nira_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A schema constraint was violated during construction or mutation
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A unit outside the family's conversion table reached a conversion
    #[error("Unsupported unit for {quantity} conversion: {unit}")]
    UnsupportedUnit {
        quantity: &'static str,
        unit: String,
    },

    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// The validation failure behind this error, if that is what it is
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            Error::Validation(err) => Some(err),
            _ => None,
        }
    }
}
