//! Configuration for the Selkie runtime
//!
//! TigerStyle: Explicit defaults, validation, reasonable limits.

use crate::constants::*;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Duration;

/// Runtime configuration
///
/// `sidecar_id` namespaces every persistence key written by this sidecar;
/// two applications sharing one state store never collide as long as their
/// ids differ.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Namespacing prefix for all state keys
    pub sidecar_id: String,

    /// Idle time before an actor is deactivated (milliseconds)
    #[serde(default = "default_idle_timeout_ms")]
    pub actor_idle_timeout_ms: u64,

    /// Interval between deactivation scans (milliseconds)
    #[serde(default = "default_scan_interval_ms")]
    pub actor_scan_interval_ms: u64,

    /// Drain timeout for ongoing calls during rebalance (milliseconds);
    /// reserved for the rebalance drain path
    #[serde(default = "default_drain_timeout_ms")]
    pub drain_ongoing_call_timeout_ms: u64,

    /// Whether rebalanced actors are drained before handoff; reserved
    #[serde(default)]
    pub drain_rebalanced_actors: bool,

    /// Actor types accepted for create/invoke operations.
    /// Empty means every type is accepted.
    #[serde(default)]
    pub hosted_actor_types: HashSet<String>,
}

fn default_idle_timeout_ms() -> u64 {
    ACTOR_IDLE_TIMEOUT_MS_DEFAULT
}

fn default_scan_interval_ms() -> u64 {
    ACTOR_SCAN_INTERVAL_MS_DEFAULT
}

fn default_drain_timeout_ms() -> u64 {
    DRAIN_ONGOING_CALL_TIMEOUT_MS_DEFAULT
}

impl RuntimeConfig {
    /// Create a configuration with defaults for everything but the id
    pub fn new(sidecar_id: impl Into<String>) -> Self {
        Self {
            sidecar_id: sidecar_id.into(),
            actor_idle_timeout_ms: default_idle_timeout_ms(),
            actor_scan_interval_ms: default_scan_interval_ms(),
            drain_ongoing_call_timeout_ms: default_drain_timeout_ms(),
            drain_rebalanced_actors: false,
            hosted_actor_types: HashSet::new(),
        }
    }

    /// Set the idle timeout
    pub fn with_idle_timeout(mut self, timeout: Duration) -> Self {
        self.actor_idle_timeout_ms = timeout.as_millis() as u64;
        self
    }

    /// Set the deactivation scan interval
    pub fn with_scan_interval(mut self, interval: Duration) -> Self {
        self.actor_scan_interval_ms = interval.as_millis() as u64;
        self
    }

    /// Set the hosted actor types
    pub fn with_hosted_actor_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.hosted_actor_types = types.into_iter().map(Into::into).collect();
        self
    }

    /// Whether `actor_type` is accepted for create/invoke operations
    pub fn hosts_actor_type(&self, actor_type: &str) -> bool {
        self.hosted_actor_types.is_empty() || self.hosted_actor_types.contains(actor_type)
    }

    /// Idle timeout as a Duration
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_millis(self.actor_idle_timeout_ms)
    }

    /// Scan interval as a Duration
    pub fn scan_interval(&self) -> Duration {
        Duration::from_millis(self.actor_scan_interval_ms)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.sidecar_id.is_empty() {
            return Err(Error::InvalidConfiguration {
                field: "sidecar_id".into(),
                reason: "must not be empty".into(),
            });
        }

        if self.sidecar_id.contains(KEY_SEPARATOR) {
            return Err(Error::InvalidConfiguration {
                field: "sidecar_id".into(),
                reason: format!("must not contain {:?}", KEY_SEPARATOR),
            });
        }

        if self.actor_idle_timeout_ms == 0 {
            return Err(Error::InvalidConfiguration {
                field: "actor_idle_timeout_ms".into(),
                reason: "must be greater than zero".into(),
            });
        }

        if self.actor_scan_interval_ms == 0 {
            return Err(Error::InvalidConfiguration {
                field: "actor_scan_interval_ms".into(),
                reason: "must be greater than zero".into(),
            });
        }

        Ok(())
    }
}
