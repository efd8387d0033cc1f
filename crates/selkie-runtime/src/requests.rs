//! Request types for the runtime's public operations
//!
//! Wire-facing shapes use camelCase field names; `data` and `value`
//! payloads are free-form JSON.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// =============================================================================
// Reminders
// =============================================================================

/// Create (or overwrite) a named reminder for one actor
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReminderRequest {
    pub actor_type: String,
    pub actor_id: String,
    pub name: String,
    /// Offset from creation to the first fire; empty means immediately
    #[serde(default)]
    pub due_time: String,
    /// Interval between fires; empty means one-shot
    #[serde(default)]
    pub period: String,
    /// Opaque payload handed back on every fire
    #[serde(default)]
    pub data: Value,
}

/// Look up a reminder by name
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetReminderRequest {
    pub actor_type: String,
    pub actor_id: String,
    pub name: String,
}

/// Delete a reminder by name; idempotent
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteReminderRequest {
    pub actor_type: String,
    pub actor_id: String,
    pub name: String,
}

// =============================================================================
// Timers
// =============================================================================

/// Create (or overwrite) a named timer on a live actor instance
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTimerRequest {
    pub actor_type: String,
    pub actor_id: String,
    pub name: String,
    /// Offset to the first fire; empty means immediately
    #[serde(default)]
    pub due_time: String,
    /// Interval between fires; empty means one-shot
    #[serde(default)]
    pub period: String,
    /// Application callback name handed back on every fire
    #[serde(default)]
    pub callback: String,
    #[serde(default)]
    pub data: Value,
}

/// Delete a timer by name; idempotent
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteTimerRequest {
    pub actor_type: String,
    pub actor_id: String,
    pub name: String,
}

// =============================================================================
// State
// =============================================================================

/// Persist one value under an actor-scoped key
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveStateRequest {
    pub actor_type: String,
    pub actor_id: String,
    pub key: String,
    pub value: Value,
}

/// Read one actor-scoped key
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetStateRequest {
    pub actor_type: String,
    pub actor_id: String,
    pub key: String,
}

/// Delete one actor-scoped key; idempotent
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteStateRequest {
    pub actor_type: String,
    pub actor_id: String,
    pub key: String,
}

// =============================================================================
// Transactions
// =============================================================================

/// Tag for an upsert operation
pub const OPERATION_UPSERT: &str = "upsert";

/// Tag for a delete operation
pub const OPERATION_DELETE: &str = "delete";

/// Atomic multi-operation request against one actor's state
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionalRequest {
    pub actor_type: String,
    pub actor_id: String,
    pub operations: Vec<TransactionalOperation>,
}

/// One operation in a transactional request
///
/// The tag decides the expected body shape; unknown tags and bodies that
/// do not decode are rejected before anything executes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionalOperation {
    /// Operation tag: [`OPERATION_UPSERT`] or [`OPERATION_DELETE`]
    pub operation: String,
    /// Body, decoded per the tag
    pub request: Value,
}

impl TransactionalOperation {
    /// An upsert of `value` under `key`
    pub fn upsert(key: impl Into<String>, value: Value) -> Self {
        Self {
            operation: OPERATION_UPSERT.to_string(),
            request: serde_json::json!({ "key": key.into(), "value": value }),
        }
    }

    /// A delete of `key`
    pub fn delete(key: impl Into<String>) -> Self {
        Self {
            operation: OPERATION_DELETE.to_string(),
            request: serde_json::json!({ "key": key.into() }),
        }
    }
}

/// Typed body of an upsert operation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionalUpsert {
    pub key: String,
    pub value: Value,
}

/// Typed body of a delete operation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionalDelete {
    pub key: String,
}
