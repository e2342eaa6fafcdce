//! Custom error types with exit codes

use thiserror::Error;

/// Run-level error type for values-checker operations
///
/// Findings are never reported through this type: they are part of a
/// normal [`crate::model::ValidationResult`]. A `CheckError` aborts the
/// validation of the current values file.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum CheckError {
    /// Configuration Error - invalid CLI arguments or checker config file
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Chart Error - the chart could not be located or loaded
    #[error("Chart error: {message}")]
    Chart { message: String },

    /// Document Error - a YAML document could not be read or parsed
    #[error("Document error: {message}")]
    Document { message: String },

    /// Schema Error - the schema is malformed or cannot be compiled
    #[error("Schema error: {message}")]
    Schema { message: String },

    /// Conversion Error - a document tree could not be bridged to JSON
    #[error("Conversion error: {message}")]
    Conversion { message: String },
}

impl CheckError {
    /// Get the process exit code for this error type
    ///
    /// Exit codes 1 and 2 are reserved for findings, so every tool error
    /// maps to 3.
    #[must_use]
    #[inline]
    pub const fn exit_code(&self) -> i32 {
        match *self {
            Self::Configuration { .. }
            | Self::Chart { .. }
            | Self::Document { .. }
            | Self::Schema { .. }
            | Self::Conversion { .. } => 3,
        }
    }

    /// The error message without its category prefix
    #[must_use]
    #[inline]
    pub fn message(&self) -> &str {
        match *self {
            Self::Configuration { ref message }
            | Self::Chart { ref message }
            | Self::Document { ref message }
            | Self::Schema { ref message }
            | Self::Conversion { ref message } => message,
        }
    }

    /// Create a configuration error
    #[inline]
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a chart error
    #[inline]
    pub fn chart<S: Into<String>>(message: S) -> Self {
        Self::Chart {
            message: message.into(),
        }
    }

    /// Create a document error
    #[inline]
    pub fn document<S: Into<String>>(message: S) -> Self {
        Self::Document {
            message: message.into(),
        }
    }

    /// Create a schema error
    #[inline]
    pub fn schema<S: Into<String>>(message: S) -> Self {
        Self::Schema {
            message: message.into(),
        }
    }

    /// Create a conversion error
    #[inline]
    pub fn conversion<S: Into<String>>(message: S) -> Self {
        Self::Conversion {
            message: message.into(),
        }
    }
}
