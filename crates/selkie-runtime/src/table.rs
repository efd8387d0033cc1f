//! Actor table
//!
//! TigerStyle: The table is the sole source of truth for local activation.

use crate::instance::ActorInstance;
use dashmap::DashMap;
use selkie_core::ActorKey;
use std::sync::Arc;

/// Registry of live actor instances keyed by the combined actor key
///
/// Map accesses are lock-free for the structure itself; per-entry
/// mutation goes through each instance's own lock. An actor is "active"
/// on this host exactly when its key is present here.
pub struct ActorTable {
    actors: DashMap<String, Arc<ActorInstance>>,
}

impl ActorTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self {
            actors: DashMap::new(),
        }
    }

    /// Return the existing instance or atomically insert a fresh one
    ///
    /// A fresh instance starts idle (`busy = false`) with its idle clock
    /// set to now.
    pub fn get_or_create(&self, key: &ActorKey) -> Arc<ActorInstance> {
        self.actors
            .entry(key.combined())
            .or_insert_with(|| Arc::new(ActorInstance::new(key.clone())))
            .value()
            .clone()
    }

    /// Return the instance for `combined_key` if present
    pub fn load(&self, combined_key: &str) -> Option<Arc<ActorInstance>> {
        self.actors.get(combined_key).map(|entry| entry.value().clone())
    }

    /// Remove the entry for `combined_key`
    ///
    /// The caller must have arranged that no future dispatch targets the
    /// key, or accept that the next dispatch re-activates it.
    pub fn remove(&self, combined_key: &str) -> Option<Arc<ActorInstance>> {
        self.actors.remove(combined_key).map(|(_, instance)| instance)
    }

    /// Whether `combined_key` is active
    pub fn contains(&self, combined_key: &str) -> bool {
        self.actors.contains_key(combined_key)
    }

    /// Snapshot of every live instance, in unspecified order
    ///
    /// Entries inserted or removed during the walk may or may not appear.
    pub fn snapshot(&self) -> Vec<Arc<ActorInstance>> {
        self.actors.iter().map(|entry| entry.value().clone()).collect()
    }

    /// Number of live instances
    pub fn len(&self) -> usize {
        self.actors.len()
    }

    /// Whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }
}

impl Default for ActorTable {
    fn default() -> Self {
        Self::new()
    }
}
