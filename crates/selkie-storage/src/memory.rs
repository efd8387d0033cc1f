//! In-memory state store
//!
//! For testing and embedded use.

use crate::store::{StateOperation, StateStore};
use async_trait::async_trait;
use bytes::Bytes;
use selkie_core::Result;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory state store
///
/// `multi` holds the write guard for the whole batch, which makes the
/// batch atomic with respect to every other accessor.
#[derive(Clone)]
pub struct MemoryStore {
    items: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl MemoryStore {
    /// Create a new in-memory store
    pub fn new() -> Self {
        Self {
            items: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Number of stored keys
    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    /// Whether the store holds no keys
    pub async fn is_empty(&self) -> bool {
        self.items.read().await.is_empty()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StateStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Bytes>> {
        let items = self.items.read().await;
        Ok(items.get(key).map(|v| Bytes::copy_from_slice(v)))
    }

    async fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        let mut items = self.items.write().await;
        items.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let mut items = self.items.write().await;
        items.remove(key);
        Ok(())
    }

    async fn multi(&self, operations: Vec<StateOperation>) -> Result<()> {
        let mut items = self.items.write().await;
        for op in operations {
            match op {
                StateOperation::Upsert { key, value } => {
                    items.insert(key, value);
                }
                StateOperation::Delete { key } => {
                    items.remove(&key);
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_store_basic() {
        let store = MemoryStore::new();

        store.set("key1", b"value1").await.unwrap();
        let value = store.get("key1").await.unwrap();
        assert_eq!(value, Some(Bytes::from("value1")));

        store.delete("key1").await.unwrap();
        let value = store.get("key1").await.unwrap();
        assert!(value.is_none());
    }

    #[tokio::test]
    async fn test_memory_store_delete_is_idempotent() {
        let store = MemoryStore::new();
        store.set("key1", b"value1").await.unwrap();

        store.delete("key1").await.unwrap();
        store.delete("key1").await.unwrap();
        assert!(store.get("key1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_memory_store_multi() {
        let store = MemoryStore::new();
        store.set("old", b"x").await.unwrap();

        store
            .multi(vec![
                StateOperation::Upsert {
                    key: "a".into(),
                    value: b"1".to_vec(),
                },
                StateOperation::Upsert {
                    key: "b".into(),
                    value: b"2".to_vec(),
                },
                StateOperation::Delete { key: "old".into() },
            ])
            .await
            .unwrap();

        assert_eq!(store.get("a").await.unwrap(), Some(Bytes::from("1")));
        assert_eq!(store.get("b").await.unwrap(), Some(Bytes::from("2")));
        assert!(store.get("old").await.unwrap().is_none());
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn test_memory_store_upsert_then_delete_same_key() {
        let store = MemoryStore::new();

        store
            .multi(vec![
                StateOperation::Upsert {
                    key: "k".into(),
                    value: b"v".to_vec(),
                },
                StateOperation::Delete { key: "k".into() },
            ])
            .await
            .unwrap();

        // Batch applies in order.
        assert!(store.get("k").await.unwrap().is_none());
    }
}
