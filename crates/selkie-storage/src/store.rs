//! State store trait and operations
//!
//! TigerStyle: Explicit operations, atomic batches.

use async_trait::async_trait;
use bytes::Bytes;
use selkie_core::Result;

/// One operation in an atomic batch
///
/// The tagged-variant boundary lives in the runtime's state facade; by
/// the time a batch reaches the store it is fully typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateOperation {
    /// Insert or overwrite a key
    Upsert { key: String, value: Vec<u8> },
    /// Remove a key
    Delete { key: String },
}

impl StateOperation {
    /// The key this operation touches
    pub fn key(&self) -> &str {
        match self {
            StateOperation::Upsert { key, .. } => key,
            StateOperation::Delete { key } => key,
        }
    }
}

/// State store collaborator
///
/// All keys are strings and all values are byte sequences. `multi`
/// commits its batch atomically: either every operation applies or none
/// does.
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Get a value by key
    ///
    /// Returns None if the key does not exist.
    async fn get(&self, key: &str) -> Result<Option<Bytes>>;

    /// Set a key-value pair
    ///
    /// Overwrites any existing value for the key.
    async fn set(&self, key: &str, value: &[u8]) -> Result<()>;

    /// Delete a key
    ///
    /// No-op if the key does not exist.
    async fn delete(&self, key: &str) -> Result<()>;

    /// Apply a batch of operations atomically
    async fn multi(&self, operations: Vec<StateOperation>) -> Result<()>;

    /// Check if a key exists
    async fn exists(&self, key: &str) -> Result<bool> {
        Ok(self.get(key).await?.is_some())
    }
}
