//! Error types for result persistence.
//!
//! Every fallible operation in this workspace reports one of the variants
//! below. Validation and encoding failures are per-result and leave all
//! sinks untouched; I/O failures are fatal for the affected result kind
//! only; read failures abort reconstruction of a single file.

use thiserror::Error;

/// Main error type for profdump operations.
#[derive(Debug, Error)]
pub enum ProfdumpError {
    /// A result references an identifier outside the run's accepted scope
    #[error("Result rejected: {message}")]
    Validation { message: String },

    /// A result could not be converted to its textual representation
    #[error("Could not encode result: {context}")]
    Encoding {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// A result sink could not be opened, written to, or closed
    #[error("Result file operation failed: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// A persisted result file is malformed or inconsistent with its header
    #[error("Could not read result file: {context}")]
    Read { context: String },

    /// Setup error outside the write/read paths (e.g. logging init)
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Convenience type alias for Results with ProfdumpError
pub type Result<T> = std::result::Result<T, ProfdumpError>;

impl ProfdumpError {
    /// Creates a validation error for a rejected result
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Creates an encoding error with context
    pub fn encoding(context: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Encoding {
            context: context.into(),
            source,
        }
    }

    /// Creates an I/O error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Creates a read error for a malformed result file
    pub fn read(context: impl Into<String>) -> Self {
        Self::Read {
            context: context.into(),
        }
    }

    /// Creates a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}
