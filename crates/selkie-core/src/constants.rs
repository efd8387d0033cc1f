//! TigerStyle constants for Selkie
//!
//! All limits are explicit, use big-endian naming (most significant first),
//! and include units in the name.

// =============================================================================
// Actor Limits
// =============================================================================

/// Maximum length of an actor type in bytes
pub const ACTOR_TYPE_LENGTH_BYTES_MAX: usize = 128;

/// Maximum length of an actor ID in bytes
pub const ACTOR_ID_LENGTH_BYTES_MAX: usize = 256;

/// Default idle timeout before actor deactivation in milliseconds (60 min)
pub const ACTOR_IDLE_TIMEOUT_MS_DEFAULT: u64 = 60 * 60 * 1000;

/// Default deactivation scan interval in milliseconds (30 sec)
pub const ACTOR_SCAN_INTERVAL_MS_DEFAULT: u64 = 30 * 1000;

/// Default drain timeout for ongoing calls during rebalance in milliseconds (60 sec)
pub const DRAIN_ONGOING_CALL_TIMEOUT_MS_DEFAULT: u64 = 60 * 1000;

// =============================================================================
// Scheduling Limits
// =============================================================================

/// Maximum length of a reminder or timer name in bytes
pub const SCHEDULE_NAME_LENGTH_BYTES_MAX: usize = 256;

// =============================================================================
// Key Composition
// =============================================================================

/// Separator used in combined actor keys and persistence keys
pub const KEY_SEPARATOR: &str = "||";

/// Suffix of the per-type persisted reminder list key
pub const REMINDER_LIST_KEY_SUFFIX: &str = "reminders";

// Compile-time assertions for constant validity
const _: () = {
    assert!(ACTOR_TYPE_LENGTH_BYTES_MAX >= 64);
    assert!(ACTOR_ID_LENGTH_BYTES_MAX >= ACTOR_TYPE_LENGTH_BYTES_MAX);
    assert!(ACTOR_IDLE_TIMEOUT_MS_DEFAULT > ACTOR_SCAN_INTERVAL_MS_DEFAULT);
    assert!(ACTOR_SCAN_INTERVAL_MS_DEFAULT >= 1000);
};
