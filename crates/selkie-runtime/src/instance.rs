//! Live actor instances
//!
//! TigerStyle: Per-instance mutual exclusion, monotonic idle clock.

use selkie_core::ActorKey;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::Instant;
use tokio::sync::{Mutex, MutexGuard};

/// Monotonic milliseconds since the first call in this process
///
/// Idle accounting only ever compares two readings, so the origin is
/// arbitrary. Uses `Instant` rather than wall time: the idle clock must
/// not jump with NTP adjustments.
pub(crate) fn monotonic_ms() -> u64 {
    static ORIGIN: OnceLock<Instant> = OnceLock::new();
    ORIGIN.get_or_init(Instant::now).elapsed().as_millis() as u64
}

/// One live actor instance in the actor table
///
/// At most one instance exists per [`ActorKey`] in this process, and at
/// most one dispatch holds its lock at any time. Method invocations,
/// reminder fires and timer fires all pass through [`begin_dispatch`],
/// which is what serializes them.
///
/// [`begin_dispatch`]: ActorInstance::begin_dispatch
pub struct ActorInstance {
    key: ActorKey,
    dispatch_lock: Mutex<()>,
    busy: AtomicBool,
    last_used_ms: AtomicU64,
}

impl ActorInstance {
    /// Create a fresh instance with `last_used` set to now
    pub(crate) fn new(key: ActorKey) -> Self {
        Self {
            key,
            dispatch_lock: Mutex::new(()),
            busy: AtomicBool::new(false),
            last_used_ms: AtomicU64::new(monotonic_ms()),
        }
    }

    /// The actor identity this instance serves
    pub fn key(&self) -> &ActorKey {
        &self.key
    }

    /// Whether a dispatch currently holds the instance lock
    ///
    /// The deactivation ticker skips busy instances; it never cancels an
    /// in-flight invocation.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Milliseconds since the last dispatch began or ended
    pub fn idle_time_ms(&self) -> u64 {
        monotonic_ms().saturating_sub(self.last_used_ms.load(Ordering::Acquire))
    }

    /// Reset the idle clock
    pub fn touch(&self) {
        self.last_used_ms.store(monotonic_ms(), Ordering::Release);
    }

    /// Acquire the instance for one dispatch
    ///
    /// Blocks while another dispatch holds the lock. Acquisition order
    /// follows the lock's queue; strict FIFO is not guaranteed. The
    /// returned guard marks the instance busy and releases on drop, so an
    /// unwinding dispatch cannot leave the instance locked or busy.
    pub async fn begin_dispatch(&self) -> DispatchGuard<'_> {
        let lock = self.dispatch_lock.lock().await;
        self.busy.store(true, Ordering::Release);
        self.touch();
        DispatchGuard {
            instance: self,
            _lock: lock,
        }
    }

    /// Acquire the instance only if no dispatch holds it
    ///
    /// Returns None when the lock is contended. The deactivation path
    /// uses this so its app-channel notice stays mutually exclusive with
    /// invocations without ever waiting on one.
    pub fn try_begin_dispatch(&self) -> Option<DispatchGuard<'_>> {
        let lock = self.dispatch_lock.try_lock().ok()?;
        self.busy.store(true, Ordering::Release);
        self.touch();
        Some(DispatchGuard {
            instance: self,
            _lock: lock,
        })
    }
}

/// RAII guard for one dispatch
///
/// Holds the instance lock; clears `busy` and resets the idle clock when
/// dropped.
pub struct DispatchGuard<'a> {
    instance: &'a ActorInstance,
    _lock: MutexGuard<'a, ()>,
}

impl Drop for DispatchGuard<'_> {
    fn drop(&mut self) {
        self.instance.busy.store(false, Ordering::Release);
        self.instance.touch();
    }
}
