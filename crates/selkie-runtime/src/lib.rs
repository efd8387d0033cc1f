//! Selkie Runtime
//!
//! The in-process core of the Selkie virtual-actor sidecar: activation,
//! serialized dispatch, idle deactivation, durable reminders, volatile
//! timers, and namespaced transactional state.
//!
//! # Overview
//!
//! - One [`ActorRuntime`] per sidecar process, built from a
//!   [`RuntimeConfig`](selkie_core::RuntimeConfig) and three
//!   collaborators: the state store, the application channel, and the
//!   placement service.
//! - `init()` starts the deactivation ticker and restores persisted
//!   reminders; `shutdown()` stops every loop and notifies the
//!   application for each remaining instance.
//! - Method invocations, reminder fires and timer fires for one actor are
//!   mutually exclusive; different actors run in full parallelism.
//!
//! # TigerStyle
//! - Single activation guarantee (one instance per actor key)
//! - Explicit lifecycle (`init` / `shutdown`, no program-start hooks)
//! - Every wait boundary observes cancellation

pub mod instance;
pub mod reminders;
pub mod requests;
pub mod runtime;
pub mod state;
pub mod table;
pub mod timers;

pub use instance::{ActorInstance, DispatchGuard};
pub use reminders::{Reminder, ReminderTrack};
pub use requests::{
    CreateReminderRequest, CreateTimerRequest, DeleteReminderRequest, DeleteStateRequest,
    DeleteTimerRequest, GetReminderRequest, GetStateRequest, SaveStateRequest,
    TransactionalDelete, TransactionalOperation, TransactionalRequest, TransactionalUpsert,
    OPERATION_DELETE, OPERATION_UPSERT,
};
pub use runtime::{ActorRuntime, InvokeOutcome};
pub use table::ActorTable;
pub use timers::Timer;
