//! Durable reminder scheduler
//!
//! Reminders are named, per-actor fire schedules that survive process
//! restarts. The full list for one actor type is persisted as one JSON
//! document; each periodic reminder additionally persists a track row
//! with its last fire time so a restart resumes the cadence instead of
//! starting over.
//!
//! Delivery is at-least-once: a track write that fails after a fire is
//! logged and swallowed, and the next fire may duplicate.

use crate::requests::{CreateReminderRequest, DeleteReminderRequest, GetReminderRequest};
use crate::runtime::{ActorRuntime, ScheduleEntry};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use selkie_core::actor::reminder_list_key;
use selkie_core::{
    parse_duration, reminder_method, ActorKey, Error, InvokeRequest, Result, KEY_SEPARATOR,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

/// A durable reminder record
///
/// Unique per `(actorType, actorId, name)`; creating an existing tuple
/// overwrites the prior record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    pub actor_type: String,
    pub actor_id: String,
    pub name: String,
    #[serde(default)]
    pub due_time: String,
    #[serde(default)]
    pub period: String,
    #[serde(default)]
    pub data: Value,
}

/// Last-fire record for one periodic reminder
///
/// Persisted as `{"lastFiredTime": "<RFC3339>"}`. An absent row reads as
/// a track with an empty `last_fired_time`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReminderTrack {
    #[serde(rename = "lastFiredTime", default)]
    pub last_fired_time: String,
}

/// Payload delivered to the application's reminder endpoint
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReminderPayload<'a> {
    name: &'a str,
    data: &'a Value,
    due_time: &'a str,
    period: &'a str,
}

/// In-memory key for a running fire loop: `"<actorKey>||<name>"`
pub(crate) fn schedule_key(combined_actor_key: &str, name: &str) -> String {
    format!("{}{}{}", combined_actor_key, KEY_SEPARATOR, name)
}

/// Parse a schedule's `due_time`/`period` pair
///
/// Empty `due_time` means fire immediately; empty `period` means
/// one-shot. Both empty is a validation error.
pub(crate) fn parse_schedule(
    name: &str,
    due_time: &str,
    period: &str,
) -> Result<(Duration, Option<Duration>)> {
    if due_time.is_empty() && period.is_empty() {
        return Err(Error::EmptySchedule {
            name: name.to_string(),
        });
    }
    let due = if due_time.is_empty() {
        Duration::ZERO
    } else {
        parse_duration(due_time)?
    };
    let period = if period.is_empty() {
        None
    } else {
        Some(parse_duration(period)?)
    };
    Ok((due, period))
}

impl ActorRuntime {
    /// Create or overwrite a reminder
    ///
    /// Validates the request, replaces any prior reminder with the same
    /// name, persists the updated per-type list, and starts the fire
    /// loop. On a persistence failure nothing changes in memory and no
    /// loop starts.
    #[instrument(skip(self, req), fields(actor_type = %req.actor_type, actor_id = %req.actor_id, name = %req.name), level = "debug")]
    pub async fn create_reminder(&self, req: &CreateReminderRequest) -> Result<()> {
        let key = ActorKey::new(&req.actor_type, &req.actor_id)?;
        self.ensure_hosted(key.actor_type())?;
        if req.name.is_empty() {
            return Err(Error::MissingField { field: "name" });
        }
        let (initial_delay, period) = parse_schedule(&req.name, &req.due_time, &req.period)?;

        let reminder = Reminder {
            actor_type: req.actor_type.clone(),
            actor_id: req.actor_id.clone(),
            name: req.name.clone(),
            due_time: req.due_time.clone(),
            period: req.period.clone(),
            data: req.data.clone(),
        };

        let mut reminders = self.inner.reminders.lock().await;
        let mut list = match reminders.get(&req.actor_type) {
            Some(list) => list.clone(),
            None => self.load_reminder_list(&req.actor_type).await?,
        };

        list.retain(|r| !(r.actor_id == req.actor_id && r.name == req.name));
        list.push(reminder.clone());

        // Persist before touching anything visible: a failed write must
        // leave the prior record, its fire loop, and the in-memory list
        // exactly as they were.
        self.persist_reminder_list(&req.actor_type, &list).await?;

        let loop_key = schedule_key(&key.combined(), &req.name);
        if let Some((_, entry)) = self.inner.active_reminders.remove(&loop_key) {
            entry.token.cancel();
        }
        reminders.insert(req.actor_type.clone(), list);
        drop(reminders);

        self.start_reminder_fire_loop(reminder, initial_delay, period);
        debug!(reminder = %loop_key, "Reminder created");
        Ok(())
    }

    /// Look up a reminder by `(type, id, name)`
    pub async fn get_reminder(&self, req: &GetReminderRequest) -> Result<Option<Reminder>> {
        let list = self.list_reminders(&req.actor_type).await?;
        Ok(list
            .into_iter()
            .find(|r| r.actor_id == req.actor_id && r.name == req.name))
    }

    /// Delete a reminder; idempotent
    ///
    /// Cancels the fire loop, removes the record from the persisted list,
    /// and drops the track row.
    #[instrument(skip(self, req), fields(actor_type = %req.actor_type, actor_id = %req.actor_id, name = %req.name), level = "debug")]
    pub async fn delete_reminder(&self, req: &DeleteReminderRequest) -> Result<()> {
        let key = ActorKey::new(&req.actor_type, &req.actor_id)?;
        if req.name.is_empty() {
            return Err(Error::MissingField { field: "name" });
        }

        let mut reminders = self.inner.reminders.lock().await;
        let mut list = match reminders.get(&req.actor_type) {
            Some(list) => list.clone(),
            None => self.load_reminder_list(&req.actor_type).await?,
        };

        list.retain(|r| !(r.actor_id == req.actor_id && r.name == req.name));

        // Same ordering as create: persist first, so a failed write does
        // not cancel a loop for a record that is still durable.
        self.persist_reminder_list(&req.actor_type, &list).await?;

        let loop_key = schedule_key(&key.combined(), &req.name);
        if let Some((_, entry)) = self.inner.active_reminders.remove(&loop_key) {
            entry.token.cancel();
        }
        reminders.insert(req.actor_type.clone(), list);
        drop(reminders);

        let track_key = key.reminder_track_key(&self.inner.config.sidecar_id, &req.name);
        self.inner.store.delete(&track_key).await?;

        debug!(reminder = %loop_key, "Reminder deleted");
        Ok(())
    }

    /// The reminders known for one actor type
    ///
    /// Reads through to the store when the type has not been touched in
    /// this process yet.
    pub async fn list_reminders(&self, actor_type: &str) -> Result<Vec<Reminder>> {
        let mut reminders = self.inner.reminders.lock().await;
        if let Some(list) = reminders.get(actor_type) {
            return Ok(list.clone());
        }
        let list = self.load_reminder_list(actor_type).await?;
        reminders.insert(actor_type.to_string(), list.clone());
        Ok(list)
    }

    /// Stop every reminder fire loop for one actor type
    ///
    /// Entry point for rebalance signals: when ownership of a type moves
    /// away from this host, its loops stop and its in-memory list is
    /// dropped. The persisted rows remain for the new owner.
    pub async fn stop_reminders_for_actor_type(&self, actor_type: &str) {
        let removed = self.inner.reminders.lock().await.remove(actor_type);
        let Some(list) = removed else { return };

        for reminder in &list {
            let combined = format!(
                "{}{}{}",
                reminder.actor_type, KEY_SEPARATOR, reminder.actor_id
            );
            let loop_key = schedule_key(&combined, &reminder.name);
            if let Some((_, entry)) = self.inner.active_reminders.remove(&loop_key) {
                entry.token.cancel();
            }
        }

        info!(
            actor_type,
            count = list.len(),
            "Stopped reminders for rebalanced actor type"
        );
    }

    /// Read the track row for one reminder
    ///
    /// An absent row reads as a default track with an empty
    /// `last_fired_time`.
    pub async fn get_reminder_track(&self, key: &ActorKey, name: &str) -> Result<ReminderTrack> {
        let track_key = key.reminder_track_key(&self.inner.config.sidecar_id, name);
        match self.inner.store.get(&track_key).await? {
            Some(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
                Error::DeserializationFailed {
                    reason: format!("reminder track {}: {}", track_key, e),
                }
            }),
            None => Ok(ReminderTrack::default()),
        }
    }

    /// Record `now` as the last fire time for one reminder
    pub(crate) async fn update_reminder_track(&self, key: &ActorKey, name: &str) -> Result<()> {
        let track = ReminderTrack {
            last_fired_time: Utc::now().to_rfc3339(),
        };
        let bytes = serde_json::to_vec(&track).map_err(|e| Error::SerializationFailed {
            reason: format!("reminder track: {}", e),
        })?;
        let track_key = key.reminder_track_key(&self.inner.config.sidecar_id, name);
        self.inner.store.set(&track_key, &bytes).await
    }

    /// Restore persisted reminders on startup
    ///
    /// Loads each hosted type's list and starts loops for the actors this
    /// host owns. A periodic reminder with a track resumes at
    /// `last_fired + period`; otherwise the first fire is `now +
    /// due_time` (creation time is not persisted).
    pub(crate) async fn restore_reminders(&self) -> Result<()> {
        let hosted: Vec<String> = self
            .inner
            .config
            .hosted_actor_types
            .iter()
            .cloned()
            .collect();

        for actor_type in hosted {
            let list = self.load_reminder_list(&actor_type).await?;
            if list.is_empty() {
                continue;
            }
            self.inner
                .reminders
                .lock()
                .await
                .insert(actor_type.clone(), list.clone());

            let mut started = 0usize;
            for reminder in list {
                let key = ActorKey::new(&reminder.actor_type, &reminder.actor_id)?;
                let target = self
                    .inner
                    .placement
                    .lookup(key.actor_type(), key.actor_id())
                    .await?;
                if !target.is_local() {
                    continue;
                }

                let (due, period) = parse_schedule(
                    &reminder.name,
                    &reminder.due_time,
                    &reminder.period,
                )?;
                let initial_delay = self.restored_initial_delay(&key, &reminder, due, period).await;
                self.start_reminder_fire_loop(reminder, initial_delay, period);
                started += 1;
            }
            info!(actor_type = %actor_type, count = started, "Restored reminders");
        }
        Ok(())
    }

    /// Compute the first wait for a restored reminder
    async fn restored_initial_delay(
        &self,
        key: &ActorKey,
        reminder: &Reminder,
        due: Duration,
        period: Option<Duration>,
    ) -> Duration {
        let Some(period) = period else { return due };

        let track = match self.get_reminder_track(key, &reminder.name).await {
            Ok(track) => track,
            Err(e) => {
                warn!(reminder = %reminder.name, error = %e, "Failed to read reminder track");
                return due;
            }
        };
        if track.last_fired_time.is_empty() {
            return due;
        }

        let last_fired = match DateTime::parse_from_rfc3339(&track.last_fired_time) {
            Ok(t) => t.with_timezone(&Utc),
            Err(e) => {
                warn!(reminder = %reminder.name, error = %e, "Malformed reminder track timestamp");
                return due;
            }
        };
        let period = chrono::Duration::from_std(period).unwrap_or(chrono::Duration::zero());
        let next_fire = last_fired + period;
        // An overdue reminder fires immediately.
        (next_fire - Utc::now()).to_std().unwrap_or(Duration::ZERO)
    }

    fn start_reminder_fire_loop(
        &self,
        reminder: Reminder,
        initial_delay: Duration,
        period: Option<Duration>,
    ) {
        let runtime = self.clone();
        let combined = format!(
            "{}{}{}",
            reminder.actor_type, KEY_SEPARATOR, reminder.actor_id
        );
        let loop_key = schedule_key(&combined, &reminder.name);
        let token = CancellationToken::new();
        let generation = self.inner.next_generation();
        self.inner.active_reminders.insert(
            loop_key.clone(),
            ScheduleEntry {
                token: token.clone(),
                generation,
            },
        );

        self.inner.tracker.spawn(async move {
            tokio::select! {
                _ = token.cancelled() => return,
                _ = runtime.inner.shutdown.cancelled() => return,
                _ = tokio::time::sleep(initial_delay) => {}
            }

            loop {
                // A deleted or replaced reminder must not fire again. A
                // fire already past this check may still complete after a
                // delete; delivery is at-least-once.
                if !runtime.reminder_exists(&reminder).await {
                    break;
                }
                if let Err(e) = runtime.execute_reminder(&reminder, period.is_some()).await {
                    warn!(reminder = %loop_key, error = %e, "Reminder fire failed");
                }

                let Some(period) = period else { break };
                tokio::select! {
                    _ = token.cancelled() => return,
                    _ = runtime.inner.shutdown.cancelled() => return,
                    _ = tokio::time::sleep(period) => {}
                }
            }

            // Natural exit; leave a same-name replacement's entry alone.
            runtime
                .inner
                .active_reminders
                .remove_if(&loop_key, |_, entry| entry.generation == generation);
        });
    }

    async fn reminder_exists(&self, reminder: &Reminder) -> bool {
        let reminders = self.inner.reminders.lock().await;
        reminders
            .get(&reminder.actor_type)
            .map(|list| list.iter().any(|r| r == reminder))
            .unwrap_or(false)
    }

    /// Fire one reminder through the dispatcher
    ///
    /// Routing through the dispatcher serializes the fire with method
    /// invocations and timer fires on the same actor, and activates the
    /// instance if it is not resident. Periodic fires persist the track
    /// after a successful delivery; one-shot fires record nothing.
    async fn execute_reminder(&self, reminder: &Reminder, periodic: bool) -> Result<()> {
        let key = ActorKey::new(&reminder.actor_type, &reminder.actor_id)?;
        let payload = ReminderPayload {
            name: &reminder.name,
            data: &reminder.data,
            due_time: &reminder.due_time,
            period: &reminder.period,
        };
        let body = serde_json::to_vec(&payload).map_err(|e| Error::SerializationFailed {
            reason: format!("reminder payload: {}", e),
        })?;

        let req = InvokeRequest::new(
            key.actor_type(),
            key.actor_id(),
            reminder_method(&reminder.name),
            Bytes::from(body),
        );
        let resp = self.call_local_actor(&key, req).await?;
        if !resp.is_success() {
            return Err(Error::app_channel(format!(
                "reminder {} returned status {}",
                reminder.name, resp.status
            )));
        }

        if periodic {
            // Track persistence is best-effort; a lost write means the
            // next restart may re-fire (at-least-once).
            if let Err(e) = self.update_reminder_track(&key, &reminder.name).await {
                warn!(reminder = %reminder.name, error = %e, "Failed to persist reminder track");
            }
        }
        Ok(())
    }

    async fn load_reminder_list(&self, actor_type: &str) -> Result<Vec<Reminder>> {
        let list_key = reminder_list_key(&self.inner.config.sidecar_id, actor_type);
        match self.inner.store.get(&list_key).await? {
            Some(bytes) => {
                serde_json::from_slice(&bytes).map_err(|e| Error::DeserializationFailed {
                    reason: format!("reminder list for {}: {}", actor_type, e),
                })
            }
            None => Ok(Vec::new()),
        }
    }

    async fn persist_reminder_list(&self, actor_type: &str, list: &[Reminder]) -> Result<()> {
        let list_key = reminder_list_key(&self.inner.config.sidecar_id, actor_type);
        let bytes = serde_json::to_vec(list).map_err(|e| Error::SerializationFailed {
            reason: format!("reminder list for {}: {}", actor_type, e),
        })?;
        self.inner.store.set(&list_key, &bytes).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use selkie_core::{AppChannel, InvokeResponse, LocalPlacement, RuntimeConfig};
    use selkie_storage::{MemoryStore, StateStore};
    use std::sync::Arc;

    struct OkChannel;

    #[async_trait]
    impl AppChannel for OkChannel {
        async fn invoke_method(&self, _req: &InvokeRequest) -> Result<InvokeResponse> {
            Ok(InvokeResponse::ok(Bytes::new()))
        }
    }

    fn test_runtime(store: Arc<MemoryStore>) -> ActorRuntime {
        ActorRuntime::new(
            RuntimeConfig::new("test-sidecar"),
            store,
            Arc::new(OkChannel),
            Arc::new(LocalPlacement),
        )
        .unwrap()
    }

    fn reminder_request(name: &str, period: &str, due_time: &str, data: Value) -> CreateReminderRequest {
        CreateReminderRequest {
            actor_type: "cat".into(),
            actor_id: "hobbit".into(),
            name: name.into(),
            due_time: due_time.into(),
            period: period.into(),
            data,
        }
    }

    #[test]
    fn test_parse_schedule_rejects_both_empty() {
        assert!(matches!(
            parse_schedule("reminder1", "", ""),
            Err(Error::EmptySchedule { .. })
        ));
    }

    #[test]
    fn test_parse_schedule_one_shot() {
        let (due, period) = parse_schedule("reminder1", "100ms", "").unwrap();
        assert_eq!(due, Duration::from_millis(100));
        assert!(period.is_none());
    }

    #[tokio::test]
    async fn test_create_reminder_persists_list() {
        let store = Arc::new(MemoryStore::new());
        let runtime = test_runtime(store.clone());

        runtime
            .create_reminder(&reminder_request("reminder1", "1s", "1s", Value::Null))
            .await
            .unwrap();

        let raw = store
            .get("test-sidecar||cat||reminders")
            .await
            .unwrap()
            .expect("list persisted");
        let list: Vec<Reminder> = serde_json::from_slice(&raw).unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].name, "reminder1");
    }

    #[tokio::test]
    async fn test_create_reminder_rejects_empty_schedule() {
        let runtime = test_runtime(Arc::new(MemoryStore::new()));
        let result = runtime
            .create_reminder(&reminder_request("reminder1", "", "", Value::Null))
            .await;
        assert!(matches!(result, Err(Error::EmptySchedule { .. })));
    }

    #[tokio::test]
    async fn test_create_reminder_rejects_malformed_duration() {
        let runtime = test_runtime(Arc::new(MemoryStore::new()));
        let result = runtime
            .create_reminder(&reminder_request("reminder1", "soon", "1s", Value::Null))
            .await;
        assert!(matches!(result, Err(Error::InvalidDuration { .. })));
    }

    #[tokio::test]
    async fn test_override_reminder_replaces_entry() {
        let runtime = test_runtime(Arc::new(MemoryStore::new()));

        runtime
            .create_reminder(&reminder_request("reminder1", "1s", "1s", Value::from("a")))
            .await
            .unwrap();
        runtime
            .create_reminder(&reminder_request("reminder1", "1s", "1s", Value::from("b")))
            .await
            .unwrap();

        let list = runtime.list_reminders("cat").await.unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].data, Value::from("b"));
    }

    #[tokio::test]
    async fn test_override_reminder_replaces_due_time() {
        let runtime = test_runtime(Arc::new(MemoryStore::new()));

        runtime
            .create_reminder(&reminder_request("reminder1", "1s", "1s", Value::Null))
            .await
            .unwrap();
        runtime
            .create_reminder(&reminder_request("reminder1", "1s", "2s", Value::Null))
            .await
            .unwrap();

        let list = runtime.list_reminders("cat").await.unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].due_time, "2s");
    }

    #[tokio::test]
    async fn test_override_reminder_replaces_period() {
        let runtime = test_runtime(Arc::new(MemoryStore::new()));

        runtime
            .create_reminder(&reminder_request("reminder1", "1s", "1s", Value::Null))
            .await
            .unwrap();
        runtime
            .create_reminder(&reminder_request("reminder1", "2s", "1s", Value::Null))
            .await
            .unwrap();

        let list = runtime.list_reminders("cat").await.unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].period, "2s");
    }

    #[tokio::test]
    async fn test_failed_create_leaves_prior_reminder_running() {
        use selkie_storage::{StateOperation, StateStore};
        use std::sync::atomic::{AtomicBool, Ordering};

        /// Store whose writes can be made to fail on demand
        struct FlakyStore {
            inner: MemoryStore,
            fail_writes: AtomicBool,
        }

        #[async_trait]
        impl StateStore for FlakyStore {
            async fn get(&self, key: &str) -> Result<Option<Bytes>> {
                self.inner.get(key).await
            }

            async fn set(&self, key: &str, value: &[u8]) -> Result<()> {
                if self.fail_writes.load(Ordering::SeqCst) {
                    return Err(Error::storage_write_failed(key, "injected write failure"));
                }
                self.inner.set(key, value).await
            }

            async fn delete(&self, key: &str) -> Result<()> {
                self.inner.delete(key).await
            }

            async fn multi(&self, operations: Vec<StateOperation>) -> Result<()> {
                self.inner.multi(operations).await
            }
        }

        let store = Arc::new(FlakyStore {
            inner: MemoryStore::new(),
            fail_writes: AtomicBool::new(false),
        });
        let runtime = ActorRuntime::new(
            RuntimeConfig::new("test-sidecar"),
            store.clone(),
            Arc::new(OkChannel),
            Arc::new(LocalPlacement),
        )
        .unwrap();

        runtime
            .create_reminder(&reminder_request("reminder1", "1s", "1s", Value::from("a")))
            .await
            .unwrap();

        store.fail_writes.store(true, Ordering::SeqCst);
        let result = runtime
            .create_reminder(&reminder_request("reminder1", "1s", "1s", Value::from("b")))
            .await;
        assert!(matches!(result, Err(Error::StorageWriteFailed { .. })));

        // The prior record is untouched and its fire loop is still
        // scheduled.
        let list = runtime.list_reminders("cat").await.unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].data, Value::from("a"));
        assert!(runtime
            .inner
            .active_reminders
            .contains_key("cat||hobbit||reminder1"));

        runtime.shutdown().await;
    }

    #[tokio::test]
    async fn test_delete_reminder_is_idempotent() {
        let runtime = test_runtime(Arc::new(MemoryStore::new()));

        runtime
            .create_reminder(&reminder_request("reminder1", "1s", "1s", Value::Null))
            .await
            .unwrap();

        let delete = DeleteReminderRequest {
            actor_type: "cat".into(),
            actor_id: "hobbit".into(),
            name: "reminder1".into(),
        };
        runtime.delete_reminder(&delete).await.unwrap();
        assert!(runtime.list_reminders("cat").await.unwrap().is_empty());

        // Second delete succeeds with no effect.
        runtime.delete_reminder(&delete).await.unwrap();
        assert!(runtime.list_reminders("cat").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_reminder_returns_stored_fields() {
        let runtime = test_runtime(Arc::new(MemoryStore::new()));

        runtime
            .create_reminder(&reminder_request("reminder1", "1s", "2s", Value::from("a")))
            .await
            .unwrap();

        let found = runtime
            .get_reminder(&GetReminderRequest {
                actor_type: "cat".into(),
                actor_id: "hobbit".into(),
                name: "reminder1".into(),
            })
            .await
            .unwrap()
            .expect("reminder exists");

        assert_eq!(found.data, Value::from("a"));
        assert_eq!(found.period, "1s");
        assert_eq!(found.due_time, "2s");
    }

    #[tokio::test]
    async fn test_get_reminder_absent() {
        let runtime = test_runtime(Arc::new(MemoryStore::new()));
        let found = runtime
            .get_reminder(&GetReminderRequest {
                actor_type: "cat".into(),
                actor_id: "hobbit".into(),
                name: "nope".into(),
            })
            .await
            .unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_reminder_track_roundtrip() {
        let runtime = test_runtime(Arc::new(MemoryStore::new()));
        let key = ActorKey::new("cat", "hobbit").unwrap();

        let track = runtime.get_reminder_track(&key, "reminder1").await.unwrap();
        assert!(track.last_fired_time.is_empty());

        runtime.update_reminder_track(&key, "reminder1").await.unwrap();
        let track = runtime.get_reminder_track(&key, "reminder1").await.unwrap();
        assert!(!track.last_fired_time.is_empty());
        assert!(DateTime::parse_from_rfc3339(&track.last_fired_time).is_ok());
    }

    #[tokio::test]
    async fn test_stop_reminders_for_actor_type() {
        let runtime = test_runtime(Arc::new(MemoryStore::new()));

        runtime
            .create_reminder(&reminder_request("reminder1", "1s", "1s", Value::Null))
            .await
            .unwrap();
        assert!(!runtime.inner.active_reminders.is_empty());

        runtime.stop_reminders_for_actor_type("cat").await;
        assert!(runtime.inner.active_reminders.is_empty());
        assert!(runtime.inner.reminders.lock().await.get("cat").is_none());
    }

    #[tokio::test]
    async fn test_restore_reminders_starts_hosted_types() {
        let store = Arc::new(MemoryStore::new());

        // First runtime writes a reminder, then goes away.
        {
            let runtime = test_runtime(store.clone());
            runtime
                .create_reminder(&reminder_request("reminder1", "1s", "1s", Value::Null))
                .await
                .unwrap();
            runtime.shutdown().await;
        }

        // Second runtime restores it from the store on init.
        let config = RuntimeConfig::new("test-sidecar").with_hosted_actor_types(["cat"]);
        let runtime = ActorRuntime::new(
            config,
            store,
            Arc::new(OkChannel),
            Arc::new(LocalPlacement),
        )
        .unwrap();
        runtime.init().await.unwrap();

        let list = runtime.list_reminders("cat").await.unwrap();
        assert_eq!(list.len(), 1);
        assert!(runtime
            .inner
            .active_reminders
            .contains_key("cat||hobbit||reminder1"));

        runtime.shutdown().await;
    }
}
