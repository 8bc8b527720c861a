//! Error types for Vitrina core operations.
//!
//! Nothing in the page behavior itself fails: missing markup is modelled as
//! `None` from the bind step. The errors below cover the parts that can go
//! wrong around it, namely configuration and host (DOM) calls.

use thiserror::Error;

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in Vitrina core operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// An autoplay interval that would fire continuously.
    #[error("Invalid autoplay interval for carousel '{carousel}': {millis} ms")]
    InvalidInterval {
        /// Container id of the offending carousel.
        carousel: String,
        /// The configured interval.
        millis: u64,
    },

    /// A host (DOM) call failed.
    #[error("DOM operation '{operation}' failed: {reason}")]
    Dom {
        /// The operation that was attempted.
        operation: String,
        /// Reason reported by the host.
        reason: String,
    },

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Build a [`Error::Dom`] from an operation name and a host message.
    pub fn dom(operation: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Dom {
            operation: operation.into(),
            reason: reason.into(),
        }
    }
}
