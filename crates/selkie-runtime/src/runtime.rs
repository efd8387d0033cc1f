//! Runtime coordinator: activation gate, dispatcher, deactivation ticker
//!
//! TigerStyle: Explicit init/shutdown pair, every wait boundary observes
//! cancellation.

use crate::reminders::Reminder;
use crate::table::ActorTable;
use bytes::Bytes;
use dashmap::DashMap;
use selkie_core::{
    ActorKey, AppChannel, Error, InvokeRequest, InvokeResponse, LookupTarget, Placement, Result,
    RuntimeConfig, METHOD_DEACTIVATE,
};
use selkie_storage::StateStore;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::{debug, info, instrument, warn};

/// Outcome of one invocation
///
/// Remote ownership is a forward directive for the ingress, not an error.
#[derive(Debug)]
pub enum InvokeOutcome {
    /// The actor ran locally; the application's response, unchanged
    Response(InvokeResponse),
    /// The actor is owned by another host; forward the call there
    Forward { address: String },
}

/// A running fire loop for one named reminder or timer
///
/// The generation disambiguates a loop from its same-name replacement, so
/// a finished loop never removes an entry it no longer owns.
pub(crate) struct ScheduleEntry {
    pub(crate) token: CancellationToken,
    pub(crate) generation: u64,
}

pub(crate) struct RuntimeInner {
    pub(crate) config: RuntimeConfig,
    pub(crate) store: Arc<dyn StateStore>,
    pub(crate) channel: Arc<dyn AppChannel>,
    pub(crate) placement: Arc<dyn Placement>,
    pub(crate) table: ActorTable,
    /// In-memory reminder lists, one per actor type. Coarse mutex:
    /// mutations are rare.
    pub(crate) reminders: Mutex<HashMap<String, Vec<Reminder>>>,
    /// Running reminder fire loops keyed by `"<actorKey>||<name>"`
    pub(crate) active_reminders: DashMap<String, ScheduleEntry>,
    /// Running timer fire loops keyed by `"<actorKey>||<name>"`
    pub(crate) active_timers: DashMap<String, ScheduleEntry>,
    pub(crate) generations: AtomicU64,
    pub(crate) started: AtomicBool,
    pub(crate) tracker: TaskTracker,
    pub(crate) shutdown: CancellationToken,
}

impl RuntimeInner {
    pub(crate) fn next_generation(&self) -> u64 {
        self.generations.fetch_add(1, Ordering::Relaxed)
    }
}

/// The actor runtime for one sidecar process
///
/// Cloning is cheap; every clone shares the same state. Call
/// [`init`](ActorRuntime::init) once after construction and
/// [`shutdown`](ActorRuntime::shutdown) before process exit.
#[derive(Clone)]
pub struct ActorRuntime {
    pub(crate) inner: Arc<RuntimeInner>,
}

impl ActorRuntime {
    /// Create a runtime from its configuration and collaborators
    ///
    /// # Errors
    /// Returns an error if the configuration fails validation.
    pub fn new(
        config: RuntimeConfig,
        store: Arc<dyn StateStore>,
        channel: Arc<dyn AppChannel>,
        placement: Arc<dyn Placement>,
    ) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            inner: Arc::new(RuntimeInner {
                config,
                store,
                channel,
                placement,
                table: ActorTable::new(),
                reminders: Mutex::new(HashMap::new()),
                active_reminders: DashMap::new(),
                active_timers: DashMap::new(),
                generations: AtomicU64::new(0),
                started: AtomicBool::new(false),
                tracker: TaskTracker::new(),
                shutdown: CancellationToken::new(),
            }),
        })
    }

    /// Start the runtime
    ///
    /// Spawns the deactivation ticker and restores persisted reminders
    /// for every hosted actor type this sidecar owns.
    pub async fn init(&self) -> Result<()> {
        if self.inner.started.swap(true, Ordering::SeqCst) {
            return Err(Error::internal("runtime already started"));
        }

        self.start_deactivation_ticker();
        self.restore_reminders().await?;

        info!(
            sidecar_id = %self.inner.config.sidecar_id,
            idle_timeout_ms = self.inner.config.actor_idle_timeout_ms,
            scan_interval_ms = self.inner.config.actor_scan_interval_ms,
            "Actor runtime started"
        );
        Ok(())
    }

    /// Stop the runtime
    ///
    /// Cancels the ticker and every fire loop, waits for them to exit,
    /// then notifies the application for each remaining instance
    /// (best-effort) and clears the table.
    pub async fn shutdown(&self) {
        info!("Stopping actor runtime");

        self.inner.shutdown.cancel();
        self.inner.tracker.close();
        self.inner.tracker.wait().await;

        let instances = self.inner.table.snapshot();
        let notices = instances
            .iter()
            .map(|instance| self.drain_and_deactivate(instance.key()));
        for result in futures::future::join_all(notices).await {
            if let Err(e) = result {
                warn!(error = %e, "Deactivation notice failed during shutdown");
            }
        }

        self.inner.active_reminders.clear();
        self.inner.active_timers.clear();
        info!("Actor runtime stopped");
    }

    // =========================================================================
    // Activation gate + invocation dispatcher
    // =========================================================================

    /// Invoke a method on an actor
    ///
    /// Resolves ownership through the placement collaborator first: a
    /// remotely owned actor yields [`InvokeOutcome::Forward`] and the
    /// local table is left untouched. A locally owned actor is activated
    /// on demand and the call is serialized through its instance lock.
    ///
    /// The application's response is returned unchanged, whatever its
    /// status code.
    #[instrument(skip(self, req), fields(actor_type = %req.actor_type, actor_id = %req.actor_id, method = %req.method), level = "debug")]
    pub async fn invoke(&self, req: InvokeRequest) -> Result<InvokeOutcome> {
        let key = ActorKey::new(&req.actor_type, &req.actor_id)?;
        self.ensure_hosted(key.actor_type())?;

        match self
            .inner
            .placement
            .lookup(key.actor_type(), key.actor_id())
            .await?
        {
            LookupTarget::Remote(address) => {
                debug!(actor = %key, %address, "Actor owned remotely, forwarding");
                return Ok(InvokeOutcome::Forward { address });
            }
            LookupTarget::Local => {}
        }

        let response = self.call_local_actor(&key, req).await?;
        Ok(InvokeOutcome::Response(response))
    }

    /// Dispatch one call to a local actor under its instance lock
    ///
    /// Activates the instance if absent. Reminder and timer fires route
    /// through here too, which is what makes them mutually exclusive with
    /// method invocations.
    pub(crate) async fn call_local_actor(
        &self,
        key: &ActorKey,
        req: InvokeRequest,
    ) -> Result<InvokeResponse> {
        let instance = self.inner.table.get_or_create(key);

        let _guard = instance.begin_dispatch().await;
        self.inner.channel.invoke_method(&req).await
    }

    pub(crate) fn ensure_hosted(&self, actor_type: &str) -> Result<()> {
        if !self.inner.config.hosts_actor_type(actor_type) {
            return Err(Error::ActorTypeNotHosted {
                actor_type: actor_type.to_string(),
            });
        }
        Ok(())
    }

    // =========================================================================
    // Deactivation
    // =========================================================================

    fn start_deactivation_ticker(&self) {
        let runtime = self.clone();
        let scan_interval = self.inner.config.scan_interval();
        let idle_timeout = self.inner.config.idle_timeout();

        self.inner.tracker.spawn(async move {
            debug!(
                scan_interval_ms = scan_interval.as_millis() as u64,
                idle_timeout_ms = idle_timeout.as_millis() as u64,
                "Deactivation ticker started"
            );

            loop {
                tokio::select! {
                    _ = runtime.inner.shutdown.cancelled() => break,
                    _ = tokio::time::sleep(scan_interval) => {}
                }
                runtime.scan_for_idle_actors(idle_timeout).await;
            }

            debug!("Deactivation ticker stopped");
        });
    }

    async fn scan_for_idle_actors(&self, idle_timeout: Duration) {
        for instance in self.inner.table.snapshot() {
            // Busy instances are skipped this cycle; an in-flight
            // invocation is never cancelled.
            if instance.is_busy() {
                continue;
            }
            if Duration::from_millis(instance.idle_time_ms()) < idle_timeout {
                continue;
            }
            if let Err(e) = self.deactivate_actor(instance.key()).await {
                warn!(actor = %instance.key(), error = %e, "Deactivation notice failed");
            }
        }
    }

    /// Deactivate one actor
    ///
    /// Acquires the instance lock without waiting: a contended lock means
    /// an invocation raced past the busy check, so the actor is left for
    /// the next scan. With the lock held, the application is notified and
    /// the table entry removed. The removal happens even when the notice
    /// fails; the error is returned for logging only.
    #[instrument(skip(self, key), fields(actor = %key), level = "debug")]
    pub async fn deactivate_actor(&self, key: &ActorKey) -> Result<()> {
        let Some(instance) = self.inner.table.load(&key.combined()) else {
            return Ok(());
        };
        let Some(_guard) = instance.try_begin_dispatch() else {
            debug!(actor = %key, "Dispatch in flight, deactivation skipped");
            return Ok(());
        };

        let notice = self.notify_deactivate(key).await;
        self.inner.table.remove(&key.combined());
        debug!(actor = %key, "Actor deactivated");
        notice
    }

    /// Wait out any in-flight dispatch, then deactivate
    ///
    /// Shutdown path: the notice must go out even for a busy actor, so
    /// this variant drains the current call instead of skipping.
    async fn drain_and_deactivate(&self, key: &ActorKey) -> Result<()> {
        let Some(instance) = self.inner.table.load(&key.combined()) else {
            return Ok(());
        };
        let _guard = instance.begin_dispatch().await;

        let notice = self.notify_deactivate(key).await;
        self.inner.table.remove(&key.combined());
        debug!(actor = %key, "Actor deactivated");
        notice
    }

    /// Send the deactivation notice; non-2xx surfaces as an error
    async fn notify_deactivate(&self, key: &ActorKey) -> Result<()> {
        let req = InvokeRequest::new(
            key.actor_type(),
            key.actor_id(),
            METHOD_DEACTIVATE,
            Bytes::new(),
        );
        match self.inner.channel.invoke_method(&req).await {
            Ok(resp) if !resp.is_success() => Err(Error::app_channel(format!(
                "deactivation of {} returned status {}",
                key, resp.status
            ))),
            Ok(_) => Ok(()),
            Err(e) => Err(e),
        }
    }

    // =========================================================================
    // Introspection
    // =========================================================================

    /// Whether `(actor_type, actor_id)` currently has a live instance
    pub fn is_active(&self, actor_type: &str, actor_id: &str) -> bool {
        match ActorKey::new(actor_type, actor_id) {
            Ok(key) => self.inner.table.contains(&key.combined()),
            Err(_) => false,
        }
    }

    /// Number of live actor instances
    pub fn active_actor_count(&self) -> usize {
        self.inner.table.len()
    }

    /// The runtime configuration
    pub fn config(&self) -> &RuntimeConfig {
        &self.inner.config
    }
}
