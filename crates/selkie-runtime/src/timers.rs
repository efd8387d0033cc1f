//! Volatile timer scheduler
//!
//! Timers are the in-memory analog of reminders: named, per-actor fire
//! schedules attached to a live instance. Nothing is persisted; a process
//! exit loses every timer, and a timer stops on its own once its actor is
//! deactivated.

use crate::reminders::{parse_schedule, schedule_key};
use crate::requests::{CreateTimerRequest, DeleteTimerRequest};
use crate::runtime::{ActorRuntime, ScheduleEntry};
use bytes::Bytes;
use selkie_core::{timer_method, ActorKey, Error, InvokeRequest, Result, KEY_SEPARATOR};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument, warn};

/// A volatile timer record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timer {
    pub actor_type: String,
    pub actor_id: String,
    pub name: String,
    #[serde(default)]
    pub due_time: String,
    #[serde(default)]
    pub period: String,
    #[serde(default)]
    pub callback: String,
    #[serde(default)]
    pub data: Value,
}

/// Payload delivered to the application's timer endpoint
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TimerPayload<'a> {
    callback: &'a str,
    data: &'a Value,
    due_time: &'a str,
    period: &'a str,
}

impl ActorRuntime {
    /// Create or overwrite a timer on a live actor instance
    ///
    /// Fails with `ActorNotActive` when the target has no instance in the
    /// actor table. A timer with the same `(actorKey, name)` is replaced.
    #[instrument(skip(self, req), fields(actor_type = %req.actor_type, actor_id = %req.actor_id, name = %req.name), level = "debug")]
    pub async fn create_timer(&self, req: &CreateTimerRequest) -> Result<()> {
        let key = ActorKey::new(&req.actor_type, &req.actor_id)?;
        self.ensure_hosted(key.actor_type())?;
        if req.name.is_empty() {
            return Err(Error::MissingField { field: "name" });
        }
        let (initial_delay, period) = parse_schedule(&req.name, &req.due_time, &req.period)?;

        let combined = key.combined();
        if !self.inner.table.contains(&combined) {
            return Err(Error::actor_not_active(combined));
        }

        let timer = Timer {
            actor_type: req.actor_type.clone(),
            actor_id: req.actor_id.clone(),
            name: req.name.clone(),
            due_time: req.due_time.clone(),
            period: req.period.clone(),
            callback: req.callback.clone(),
            data: req.data.clone(),
        };

        self.start_timer_fire_loop(timer, initial_delay, period);
        debug!(timer = %schedule_key(&combined, &req.name), "Timer created");
        Ok(())
    }

    /// Delete a timer; idempotent
    pub async fn delete_timer(&self, req: &DeleteTimerRequest) -> Result<()> {
        let key = ActorKey::new(&req.actor_type, &req.actor_id)?;
        if req.name.is_empty() {
            return Err(Error::MissingField { field: "name" });
        }

        let loop_key = schedule_key(&key.combined(), &req.name);
        if let Some((_, entry)) = self.inner.active_timers.remove(&loop_key) {
            entry.token.cancel();
            debug!(timer = %loop_key, "Timer deleted");
        }
        Ok(())
    }

    /// Whether a timer is currently scheduled
    pub fn timer_exists(&self, actor_type: &str, actor_id: &str, name: &str) -> bool {
        match ActorKey::new(actor_type, actor_id) {
            Ok(key) => self
                .inner
                .active_timers
                .contains_key(&schedule_key(&key.combined(), name)),
            Err(_) => false,
        }
    }

    fn start_timer_fire_loop(&self, timer: Timer, initial_delay: Duration, period: Option<Duration>) {
        let runtime = self.clone();
        let combined = format!("{}{}{}", timer.actor_type, KEY_SEPARATOR, timer.actor_id);
        let loop_key = schedule_key(&combined, &timer.name);
        let token = CancellationToken::new();
        let generation = self.inner.next_generation();

        // Replace a same-name timer: cancel its loop, then own the slot.
        if let Some(prior) = self.inner.active_timers.insert(
            loop_key.clone(),
            ScheduleEntry {
                token: token.clone(),
                generation,
            },
        ) {
            prior.token.cancel();
        }

        self.inner.tracker.spawn(async move {
            tokio::select! {
                _ = token.cancelled() => return,
                _ = runtime.inner.shutdown.cancelled() => return,
                _ = tokio::time::sleep(initial_delay) => {}
            }

            loop {
                // A deactivated actor takes its timers with it.
                if runtime.inner.table.load(&combined).is_none() {
                    debug!(timer = %loop_key, "Actor deactivated, stopping timer");
                    break;
                }
                if let Err(e) = runtime.execute_timer(&timer).await {
                    warn!(timer = %loop_key, error = %e, "Timer fire failed");
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
                .active_timers
                .remove_if(&loop_key, |_, entry| entry.generation == generation);
        });
    }

    /// Fire one timer through the dispatcher
    ///
    /// Shares the dispatch path with method invocations and reminder
    /// fires, so all three are mutually exclusive on one actor.
    async fn execute_timer(&self, timer: &Timer) -> Result<()> {
        let key = ActorKey::new(&timer.actor_type, &timer.actor_id)?;
        let payload = TimerPayload {
            callback: &timer.callback,
            data: &timer.data,
            due_time: &timer.due_time,
            period: &timer.period,
        };
        let body = serde_json::to_vec(&payload).map_err(|e| Error::SerializationFailed {
            reason: format!("timer payload: {}", e),
        })?;

        let req = InvokeRequest::new(
            key.actor_type(),
            key.actor_id(),
            timer_method(&timer.name),
            Bytes::from(body),
        );
        let resp = self.call_local_actor(&key, req).await?;
        if !resp.is_success() {
            return Err(Error::app_channel(format!(
                "timer {} returned status {}",
                timer.name, resp.status
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use selkie_core::{AppChannel, InvokeResponse, LocalPlacement, RuntimeConfig};
    use selkie_storage::MemoryStore;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct CountingChannel {
        fires: AtomicUsize,
    }

    #[async_trait]
    impl AppChannel for CountingChannel {
        async fn invoke_method(&self, req: &InvokeRequest) -> Result<InvokeResponse> {
            if req.method.starts_with("timer/") {
                self.fires.fetch_add(1, Ordering::SeqCst);
            }
            Ok(InvokeResponse::ok(Bytes::new()))
        }
    }

    fn test_runtime() -> (ActorRuntime, Arc<CountingChannel>) {
        let channel = Arc::new(CountingChannel {
            fires: AtomicUsize::new(0),
        });
        let runtime = ActorRuntime::new(
            RuntimeConfig::new("test-sidecar"),
            Arc::new(MemoryStore::new()),
            channel.clone(),
            Arc::new(LocalPlacement),
        )
        .unwrap();
        (runtime, channel)
    }

    fn activate(runtime: &ActorRuntime) -> ActorKey {
        let key = ActorKey::new("cat", "hobbit").unwrap();
        runtime.inner.table.get_or_create(&key);
        key
    }

    fn timer_request(name: &str, period: &str, due_time: &str) -> CreateTimerRequest {
        CreateTimerRequest {
            actor_type: "cat".into(),
            actor_id: "hobbit".into(),
            name: name.into(),
            due_time: due_time.into(),
            period: period.into(),
            callback: "callback".into(),
            data: Value::Null,
        }
    }

    #[tokio::test]
    async fn test_create_timer_requires_active_actor() {
        let (runtime, _) = test_runtime();
        let result = runtime.create_timer(&timer_request("timer1", "1s", "1s")).await;
        assert!(matches!(result, Err(Error::ActorNotActive { .. })));
    }

    #[tokio::test]
    async fn test_create_and_delete_timer() {
        let (runtime, _) = test_runtime();
        activate(&runtime);

        runtime
            .create_timer(&timer_request("timer1", "100ms", "100ms"))
            .await
            .unwrap();
        assert!(runtime.timer_exists("cat", "hobbit", "timer1"));

        let delete = DeleteTimerRequest {
            actor_type: "cat".into(),
            actor_id: "hobbit".into(),
            name: "timer1".into(),
        };
        runtime.delete_timer(&delete).await.unwrap();
        assert!(!runtime.timer_exists("cat", "hobbit", "timer1"));

        // Second delete succeeds with no effect.
        runtime.delete_timer(&delete).await.unwrap();
    }

    #[tokio::test]
    async fn test_timer_fires_periodically() {
        let (runtime, channel) = test_runtime();
        activate(&runtime);

        runtime
            .create_timer(&timer_request("timer1", "50ms", "50ms"))
            .await
            .unwrap();

        tokio::time::sleep(Duration::from_millis(180)).await;
        assert!(channel.fires.load(Ordering::SeqCst) >= 2);

        runtime.shutdown().await;
    }

    #[tokio::test]
    async fn test_timer_stops_when_actor_deactivated() {
        let (runtime, channel) = test_runtime();
        let key = activate(&runtime);

        runtime
            .create_timer(&timer_request("timer1", "50ms", "50ms"))
            .await
            .unwrap();

        // Drop the instance before the first fire.
        runtime.inner.table.remove(&key.combined());
        tokio::time::sleep(Duration::from_millis(120)).await;

        assert_eq!(channel.fires.load(Ordering::SeqCst), 0);
        assert!(!runtime.timer_exists("cat", "hobbit", "timer1"));

        runtime.shutdown().await;
    }

    #[tokio::test]
    async fn test_timer_replacement_keeps_one_entry() {
        let (runtime, _) = test_runtime();
        activate(&runtime);

        runtime
            .create_timer(&timer_request("timer1", "1s", "1s"))
            .await
            .unwrap();
        runtime
            .create_timer(&timer_request("timer1", "2s", "2s"))
            .await
            .unwrap();

        assert_eq!(runtime.inner.active_timers.len(), 1);
        runtime.shutdown().await;
    }
}
