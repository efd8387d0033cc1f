//! Selkie Storage
//!
//! State store abstraction for the Selkie actor runtime.
//!
//! # Overview
//!
//! The runtime persists reminders, reminder tracks and user actor state
//! through one pluggable collaborator. No schema is imposed: all keys are
//! strings, all values are byte sequences, and multi-operation batches
//! commit atomically.
//!
//! The in-memory backend exists for tests and embedded use; production
//! drivers live outside this workspace.

pub mod memory;
pub mod store;

pub use memory::MemoryStore;
pub use store::{StateOperation, StateStore};
