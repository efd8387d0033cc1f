//! Actor identity and persistence key composition
//!
//! TigerStyle: Explicit validation on construction, immutable after creation.

use crate::constants::*;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical identity of a virtual actor: `(type, id)`
///
/// The combined string form `"<type>||<id>"` is used as the actor table
/// key and as a namespace component in every persistence key. At most one
/// live instance exists per key in a sidecar process.
#[derive(Debug, Clone, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct ActorKey {
    actor_type: String,
    actor_id: String,
}

impl ActorKey {
    /// Create a new ActorKey with validation
    ///
    /// # Errors
    /// Returns an error if either part is empty, exceeds its length limit,
    /// or contains the key separator.
    pub fn new(actor_type: impl Into<String>, actor_id: impl Into<String>) -> Result<Self> {
        let actor_type = actor_type.into();
        let actor_id = actor_id.into();

        if actor_type.is_empty() {
            return Err(Error::MissingField {
                field: "actorType",
            });
        }
        if actor_id.is_empty() {
            return Err(Error::MissingField { field: "actorID" });
        }

        if actor_type.len() > ACTOR_TYPE_LENGTH_BYTES_MAX {
            return Err(Error::InvalidActorKey {
                key: format!("{}{}{}", actor_type, KEY_SEPARATOR, actor_id),
                reason: format!(
                    "type length {} exceeds limit {}",
                    actor_type.len(),
                    ACTOR_TYPE_LENGTH_BYTES_MAX
                ),
            });
        }
        if actor_id.len() > ACTOR_ID_LENGTH_BYTES_MAX {
            return Err(Error::InvalidActorKey {
                key: format!("{}{}{}", actor_type, KEY_SEPARATOR, actor_id),
                reason: format!(
                    "id length {} exceeds limit {}",
                    actor_id.len(),
                    ACTOR_ID_LENGTH_BYTES_MAX
                ),
            });
        }

        // The separator would make persisted keys ambiguous.
        if actor_type.contains(KEY_SEPARATOR) || actor_id.contains(KEY_SEPARATOR) {
            return Err(Error::InvalidActorKey {
                key: format!("{}{}{}", actor_type, KEY_SEPARATOR, actor_id),
                reason: format!("must not contain {:?}", KEY_SEPARATOR),
            });
        }

        Ok(Self {
            actor_type,
            actor_id,
        })
    }

    /// Get the actor type
    pub fn actor_type(&self) -> &str {
        &self.actor_type
    }

    /// Get the actor id
    pub fn actor_id(&self) -> &str {
        &self.actor_id
    }

    /// The combined table/persistence key form `"<type>||<id>"`
    pub fn combined(&self) -> String {
        format!("{}{}{}", self.actor_type, KEY_SEPARATOR, self.actor_id)
    }

    /// Compose the persistence key for one user state entry:
    /// `"<sidecar_id>||<type>||<id>||<userKey>"`
    pub fn state_key(&self, sidecar_id: &str, user_key: &str) -> String {
        format!(
            "{sid}{sep}{typ}{sep}{id}{sep}{key}",
            sid = sidecar_id,
            sep = KEY_SEPARATOR,
            typ = self.actor_type,
            id = self.actor_id,
            key = user_key
        )
    }

    /// Compose the persistence key for the reminder track of one named
    /// reminder: `"<sidecar_id>||<actorKey>||<name>"`
    pub fn reminder_track_key(&self, sidecar_id: &str, name: &str) -> String {
        format!(
            "{sid}{sep}{key}{sep}{name}",
            sid = sidecar_id,
            sep = KEY_SEPARATOR,
            key = self.combined(),
            name = name
        )
    }
}

/// Compose the persistence key for the full reminder list of one actor
/// type: `"<sidecar_id>||<actorType>||reminders"`
pub fn reminder_list_key(sidecar_id: &str, actor_type: &str) -> String {
    format!(
        "{sid}{sep}{typ}{sep}{suffix}",
        sid = sidecar_id,
        sep = KEY_SEPARATOR,
        typ = actor_type,
        suffix = REMINDER_LIST_KEY_SUFFIX
    )
}

impl fmt::Display for ActorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}",
            self.actor_type, KEY_SEPARATOR, self.actor_id
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_actor_key_valid() {
        let key = ActorKey::new("cat", "hobbit").unwrap();
        assert_eq!(key.actor_type(), "cat");
        assert_eq!(key.actor_id(), "hobbit");
        assert_eq!(key.combined(), "cat||hobbit");
    }

    #[test]
    fn test_actor_key_rejects_empty_parts() {
        assert!(ActorKey::new("", "hobbit").is_err());
        assert!(ActorKey::new("cat", "").is_err());
    }

    #[test]
    fn test_actor_key_rejects_separator() {
        let result = ActorKey::new("cat", "hob||bit");
        assert!(matches!(result, Err(Error::InvalidActorKey { .. })));
    }

    #[test]
    fn test_actor_key_too_long() {
        let long_id = "a".repeat(ACTOR_ID_LENGTH_BYTES_MAX + 1);
        assert!(ActorKey::new("cat", long_id).is_err());
    }

    #[test]
    fn test_state_key_composition() {
        let key = ActorKey::new("cat", "hobbit").unwrap();
        assert_eq!(
            key.state_key("sidecar-1", "key0"),
            "sidecar-1||cat||hobbit||key0"
        );
    }

    #[test]
    fn test_reminder_keys() {
        let key = ActorKey::new("cat", "hobbit").unwrap();
        assert_eq!(
            reminder_list_key("sidecar-1", "cat"),
            "sidecar-1||cat||reminders"
        );
        assert_eq!(
            key.reminder_track_key("sidecar-1", "reminder1"),
            "sidecar-1||cat||hobbit||reminder1"
        );
    }

    #[test]
    fn test_actor_key_display() {
        let key = ActorKey::new("cat", "hobbit").unwrap();
        assert_eq!(format!("{}", key), "cat||hobbit");
    }
}
