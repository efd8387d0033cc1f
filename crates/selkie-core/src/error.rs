//! Error types for Selkie
//!
//! TigerStyle: Explicit error types with context, using thiserror.

use thiserror::Error;

/// Result type alias for Selkie operations
pub type Result<T> = std::result::Result<T, Error>;

/// Selkie error types
#[derive(Error, Debug)]
pub enum Error {
    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("invalid actor key: {key}, reason: {reason}")]
    InvalidActorKey { key: String, reason: String },

    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid duration {value:?}: {reason}")]
    InvalidDuration { value: String, reason: String },

    #[error("schedule for {name} must set dueTime or period")]
    EmptySchedule { name: String },

    #[error("actor type {actor_type} not hosted on this sidecar")]
    ActorTypeNotHosted { actor_type: String },

    // The exact message shape is part of the transactional API contract.
    #[error("operation type {operation} not supported")]
    OperationNotSupported { operation: String },

    #[error("malformed {operation} operation body: {reason}")]
    MalformedOperation { operation: String, reason: String },

    // =========================================================================
    // Runtime Errors
    // =========================================================================
    #[error("actor {actor_key} not active")]
    ActorNotActive { actor_key: String },

    #[error("app channel call failed: {reason}")]
    AppChannel { reason: String },

    // =========================================================================
    // Persistence Errors
    // =========================================================================
    #[error("storage read failed: {key}, reason: {reason}")]
    StorageReadFailed { key: String, reason: String },

    #[error("storage write failed: {key}, reason: {reason}")]
    StorageWriteFailed { key: String, reason: String },

    #[error("serialization failed: {reason}")]
    SerializationFailed { reason: String },

    #[error("deserialization failed: {reason}")]
    DeserializationFailed { reason: String },

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    #[error("invalid configuration: {field}, reason: {reason}")]
    InvalidConfiguration { field: String, reason: String },

    // =========================================================================
    // Internal Errors
    // =========================================================================
    #[error("internal error: {reason}")]
    Internal { reason: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    /// Create an actor-not-active error
    pub fn actor_not_active(actor_key: impl Into<String>) -> Self {
        Self::ActorNotActive {
            actor_key: actor_key.into(),
        }
    }

    /// Create an app channel error
    pub fn app_channel(reason: impl Into<String>) -> Self {
        Self::AppChannel {
            reason: reason.into(),
        }
    }

    /// Create a storage read failure
    pub fn storage_read_failed(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::StorageReadFailed {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Create a storage write failure
    pub fn storage_write_failed(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::StorageWriteFailed {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Create an internal error
    pub fn internal(reason: impl Into<String>) -> Self {
        Self::Internal {
            reason: reason.into(),
        }
    }

    /// Check if this error is a validation failure (no side effects occurred)
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidActorKey { .. }
                | Self::MissingField { .. }
                | Self::InvalidDuration { .. }
                | Self::EmptySchedule { .. }
                | Self::ActorTypeNotHosted { .. }
                | Self::OperationNotSupported { .. }
                | Self::MalformedOperation { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_not_supported_message() {
        let err = Error::OperationNotSupported {
            operation: "Wrong".into(),
        };
        assert_eq!(err.to_string(), "operation type Wrong not supported");
    }

    #[test]
    fn test_is_validation() {
        assert!(Error::MissingField { field: "name" }.is_validation());
        assert!(!Error::internal("boom").is_validation());
    }
}
