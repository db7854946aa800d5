//! Error types for tagsync
//!
//! This module defines the error handling strategy for tagsync. There are two
//! error types: `TagsyncError` (main error enum) and `ConfigError` (configuration-specific).
//!
//! ## Error Handling Philosophy
//!
//! All library code uses `crate::error::Result<T>` which returns `TagsyncError`.
//! The merge/diff core in `src/tags.rs` is total over its input domain and
//! raises no errors at all; errors originate at the boundaries (configuration
//! parsing, input validation, remote tag store calls).
//!
//! ## Retry Awareness
//!
//! Errors implement `IsRetryable` to indicate whether an operation should be
//! retried. The `RetryPolicy` in `src/retry.rs` uses this to determine retry
//! behavior. Only `Transport` and `Io` variants are retryable by default.
//!
//! Non-retryable errors fail immediately:
//! - `ResourceNotFound`: the remote object no longer exists. The reconcile
//!   driver treats this as "deleted", never as a transient failure.
//! - `Permission`: surfaced to the user; retrying cannot succeed.
//! - `Validation`/`Config`: invalid input won't become valid on retry.
//!
//! ## When to Use Which Error
//!
//! - `ConfigError`: configuration parsing and validation issues
//!   - Automatically converted to `TagsyncError::Config` via `#[from]`
//!
//! - `Transport`: remote tagging API failures (throttling, timeouts, 5xx)
//!   - Retryable by default; carries the service name for debugging
//!
//! - `ResourceNotFound`: lookup targets that don't exist remotely
//!   - Not retryable (the object is gone, not flaky)
//!
//! - `Permission`: authorization failures from the remote API
//!   - Not retryable; fatal for the current operation
//!
//! - `Validation`: input validation failures (tag keys, resource IDs)
//!   - Not retryable

use thiserror::Error;

/// Main error type for tagsync
#[derive(Error, Debug)]
pub enum TagsyncError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Transport error: {service} - {message}")]
    Transport {
        service: String,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Resource not found: {resource_type} - {resource_id}")]
    ResourceNotFound {
        resource_type: String,
        resource_id: String,
    },

    #[error("Permission denied: {service} - {message}")]
    Permission { service: String, message: String },

    #[error("Validation error: {field} - {reason}")]
    Validation { field: String, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Config file not found: {0}")]
    NotFound(String),

    #[error("Failed to parse config: {0}")]
    ParseError(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, TagsyncError>;

impl TagsyncError {
    /// True if this error means the remote object does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, TagsyncError::ResourceNotFound { .. })
    }
}

/// Trait for determining if an error is retryable
///
/// Used by `RetryPolicy` implementations to determine whether an error
/// should trigger a retry attempt.
pub trait IsRetryable {
    fn is_retryable(&self) -> bool;
}

impl IsRetryable for TagsyncError {
    fn is_retryable(&self) -> bool {
        matches!(self, TagsyncError::Transport { .. } | TagsyncError::Io(_))
    }
}
