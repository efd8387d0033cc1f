//! Selkie Core
//!
//! Core types, errors, and collaborator traits for the Selkie virtual
//! actor sidecar runtime.
//!
//! # Overview
//!
//! Selkie hosts single-threaded virtual actors inside one sidecar process
//! of a larger cluster. This crate carries everything the runtime and its
//! collaborators agree on:
//!
//! - Actor identity and persistence key composition
//! - The application channel and placement collaborator traits
//! - Runtime configuration with validation
//! - Error types shared across the workspace
//!
//! # TigerStyle
//!
//! - Explicit limits with big-endian naming (e.g. `ACTOR_TYPE_LENGTH_BYTES_MAX`)
//! - Explicit validation on construction
//! - Safety > Performance > Developer Experience

pub mod actor;
pub mod channel;
pub mod config;
pub mod constants;
pub mod duration;
pub mod error;
pub mod placement;
pub mod telemetry;

pub use actor::{reminder_list_key, ActorKey};
pub use channel::{
    reminder_method, timer_method, AppChannel, InvokeRequest, InvokeResponse, METHOD_DEACTIVATE,
};
pub use config::RuntimeConfig;
pub use constants::*;
pub use duration::parse_duration;
pub use error::{Error, Result};
pub use placement::{LocalPlacement, LookupTarget, Placement};
pub use telemetry::{init_telemetry, TelemetryConfig};
