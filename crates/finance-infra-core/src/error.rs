//! Error types for configuration loading.

use std::path::PathBuf;

/// Errors raised while loading or validating the configuration document.
///
/// Every variant is fatal: synthesis never starts when one is returned.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read configuration file {path}: {source}")]
    Read {
        /// Path that was read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid JSON or does not match the expected shape.
    #[error("malformed configuration document: {0}")]
    Parse(#[from] serde_json::Error),

    /// A required field is absent or empty.
    #[error("missing required configuration field: {0}")]
    MissingField(&'static str),

    /// A field is present but its value is not acceptable.
    #[error("invalid value for {field}: {reason}")]
    Invalid {
        /// Dotted path of the offending field.
        field: &'static str,
        /// Human-readable reason.
        reason: String,
    },

    /// Invalid AWS account ID format.
    #[error("invalid AWS account ID: {0} (must be 12-digit numeric string)")]
    InvalidAccountId(String),
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

/// Convenience result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
