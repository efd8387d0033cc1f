//! Application channel collaborator
//!
//! The runtime forwards every actor-bound call (method invocations,
//! deactivation notices, reminder and timer fires) to the application
//! through one polymorphic collaborator. The core inspects the response
//! status only to distinguish 2xx success from non-2xx failure.

use crate::error::Result;
use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;

/// Reserved method name for deactivation notices
pub const METHOD_DEACTIVATE: &str = "deactivate";

/// Reserved method name for a reminder fire: `remind/<name>`
pub fn reminder_method(name: &str) -> String {
    format!("remind/{}", name)
}

/// Reserved method name for a timer fire: `timer/<name>`
pub fn timer_method(name: &str) -> String {
    format!("timer/{}", name)
}

/// A method call bound for one actor
#[derive(Debug, Clone)]
pub struct InvokeRequest {
    /// Target actor type
    pub actor_type: String,
    /// Target actor id
    pub actor_id: String,
    /// Method name; `deactivate`, `remind/<name>` and `timer/<name>` are
    /// reserved for runtime-originated calls
    pub method: String,
    /// Opaque request payload
    pub data: Bytes,
    /// Transport metadata, passed through untouched
    pub metadata: HashMap<String, String>,
}

impl InvokeRequest {
    /// Create a request with empty metadata
    pub fn new(
        actor_type: impl Into<String>,
        actor_id: impl Into<String>,
        method: impl Into<String>,
        data: Bytes,
    ) -> Self {
        Self {
            actor_type: actor_type.into(),
            actor_id: actor_id.into(),
            method: method.into(),
            data,
            metadata: HashMap::new(),
        }
    }
}

/// The application's response to one invocation
#[derive(Debug, Clone)]
pub struct InvokeResponse {
    /// HTTP-style status code
    pub status: u16,
    /// Opaque response payload
    pub data: Bytes,
    /// Transport metadata, passed through untouched
    pub metadata: HashMap<String, String>,
}

impl InvokeResponse {
    /// A 200 response carrying the given payload
    pub fn ok(data: Bytes) -> Self {
        Self {
            status: 200,
            data,
            metadata: HashMap::new(),
        }
    }

    /// Whether the status code is in the 2xx success range
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Application channel collaborator
///
/// Implemented by the ingress layer that owns the connection to the
/// user's business logic. Transport failures surface as errors; an
/// application-level failure is a non-2xx response, returned unchanged.
#[async_trait]
pub trait AppChannel: Send + Sync {
    /// Forward one method call to the application
    async fn invoke_method(&self, req: &InvokeRequest) -> Result<InvokeResponse>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserved_method_names() {
        assert_eq!(METHOD_DEACTIVATE, "deactivate");
        assert_eq!(reminder_method("reminder1"), "remind/reminder1");
        assert_eq!(timer_method("timer1"), "timer/timer1");
    }

    #[test]
    fn test_response_success_range() {
        assert!(InvokeResponse::ok(Bytes::new()).is_success());

        let mut resp = InvokeResponse::ok(Bytes::new());
        resp.status = 204;
        assert!(resp.is_success());
        resp.status = 500;
        assert!(!resp.is_success());
        resp.status = 199;
        assert!(!resp.is_success());
    }
}
