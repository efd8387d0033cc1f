//! Placement collaborator
//!
//! The distributed placement service decides which sidecar owns a given
//! `(type, id)` pair. The runtime only ever asks one question: is this
//! actor mine, and if not, where does it live. Rebalance events are
//! delivered out of band by the host process, which reacts by calling the
//! reminder scheduler's per-type stop entry point.

use crate::error::Result;
use async_trait::async_trait;

/// Result of a placement lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupTarget {
    /// The actor is owned by this sidecar
    Local,
    /// The actor is owned by another host; calls must be forwarded there
    Remote(String),
}

impl LookupTarget {
    /// Whether the actor is owned by this sidecar
    pub fn is_local(&self) -> bool {
        matches!(self, LookupTarget::Local)
    }
}

/// Placement collaborator
#[async_trait]
pub trait Placement: Send + Sync {
    /// Resolve which host owns `(actor_type, actor_id)`
    async fn lookup(&self, actor_type: &str, actor_id: &str) -> Result<LookupTarget>;
}

/// Placement that owns everything
///
/// For single-host deployments and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalPlacement;

#[async_trait]
impl Placement for LocalPlacement {
    async fn lookup(&self, _actor_type: &str, _actor_id: &str) -> Result<LookupTarget> {
        Ok(LookupTarget::Local)
    }
}
