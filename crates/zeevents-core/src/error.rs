//! Error types for the Ze Events core
//!
//! Validation problems are not errors: they are ordinary data in a
//! [`crate::validate::ValidationResult`] and stay inline with the form.
//! This module covers everything else: schema construction mistakes,
//! collaborator failures, and the sign-in guard.

use thiserror::Error;

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, CoreError>;

/// Main error type for core operations
#[derive(Error, Debug)]
pub enum CoreError {
    /// A field name that does not exist in the active schema.
    /// Always a programming error, never user input.
    #[error("Unknown field: {0}")]
    UnknownField(String),

    /// A schema declaration that violates its own invariants
    /// (duplicate field name, dangling equals-field target, bad pattern).
    #[error("Invalid schema: {0}")]
    InvalidSchema(String),

    /// An authenticated write was attempted with no current user.
    /// The view layer turns this into navigation to the sign-in screen.
    #[error("Sign-in required")]
    AuthRequired,

    /// A collaborator call failed or rejected the request
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Failure reported by an external collaborator (auth service, record
/// store, or object storage). Carries a human-readable message and
/// whether a manual resubmit is worth attempting.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct BackendError {
    pub message: String,
    pub retryable: bool,
}

impl BackendError {
    /// A rejection the collaborator will repeat (bad credentials,
    /// duplicate account, missing record).
    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            retryable: false,
        }
    }

    /// A transient failure (network, server-side) worth resubmitting.
    pub fn transient(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            retryable: true,
        }
    }
}
