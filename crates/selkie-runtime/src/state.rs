//! State facade
//!
//! Namespaced key-value access bound to an actor identity. Values arrive
//! as free-form JSON and are persisted in their canonical JSON encoding,
//! so a round-trip through the facade is byte-stable. Transactional
//! batches are decoded in full before anything reaches the store: an
//! unknown tag or a malformed body commits nothing.

use crate::requests::{
    DeleteStateRequest, GetStateRequest, SaveStateRequest, TransactionalRequest,
    TransactionalDelete, TransactionalUpsert, OPERATION_DELETE, OPERATION_UPSERT,
};
use crate::runtime::ActorRuntime;
use bytes::Bytes;
use selkie_core::{ActorKey, Error, Result};
use selkie_storage::StateOperation;
use tracing::{debug, instrument};

impl ActorRuntime {
    /// Persist one value under an actor-scoped key
    pub async fn save_state(&self, req: &SaveStateRequest) -> Result<()> {
        let key = ActorKey::new(&req.actor_type, &req.actor_id)?;
        let state_key = key.state_key(&self.inner.config.sidecar_id, &req.key);

        let bytes = serde_json::to_vec(&req.value).map_err(|e| Error::SerializationFailed {
            reason: format!("state value for {}: {}", state_key, e),
        })?;
        self.inner.store.set(&state_key, &bytes).await
    }

    /// Read one actor-scoped key
    ///
    /// Returns the canonical JSON bytes written by `save_state`, or None.
    pub async fn get_state(&self, req: &GetStateRequest) -> Result<Option<Bytes>> {
        let key = ActorKey::new(&req.actor_type, &req.actor_id)?;
        let state_key = key.state_key(&self.inner.config.sidecar_id, &req.key);
        self.inner.store.get(&state_key).await
    }

    /// Delete one actor-scoped key; idempotent
    pub async fn delete_state(&self, req: &DeleteStateRequest) -> Result<()> {
        let key = ActorKey::new(&req.actor_type, &req.actor_id)?;
        let state_key = key.state_key(&self.inner.config.sidecar_id, &req.key);
        self.inner.store.delete(&state_key).await
    }

    /// Apply an ordered batch of upserts and deletes atomically
    ///
    /// Every operation is validated and converted to the store's typed
    /// batch first; the store sees nothing unless the whole request
    /// decodes.
    #[instrument(skip(self, req), fields(actor_type = %req.actor_type, actor_id = %req.actor_id, operations = req.operations.len()), level = "debug")]
    pub async fn transactional_state_operation(&self, req: &TransactionalRequest) -> Result<()> {
        let key = ActorKey::new(&req.actor_type, &req.actor_id)?;
        let sidecar_id = &self.inner.config.sidecar_id;

        let mut operations = Vec::with_capacity(req.operations.len());
        for op in &req.operations {
            match op.operation.as_str() {
                OPERATION_UPSERT => {
                    let upsert: TransactionalUpsert = serde_json::from_value(op.request.clone())
                        .map_err(|e| Error::MalformedOperation {
                            operation: OPERATION_UPSERT.to_string(),
                            reason: e.to_string(),
                        })?;
                    let value =
                        serde_json::to_vec(&upsert.value).map_err(|e| Error::SerializationFailed {
                            reason: format!("upsert value for {}: {}", upsert.key, e),
                        })?;
                    operations.push(StateOperation::Upsert {
                        key: key.state_key(sidecar_id, &upsert.key),
                        value,
                    });
                }
                OPERATION_DELETE => {
                    let delete: TransactionalDelete = serde_json::from_value(op.request.clone())
                        .map_err(|e| Error::MalformedOperation {
                            operation: OPERATION_DELETE.to_string(),
                            reason: e.to_string(),
                        })?;
                    operations.push(StateOperation::Delete {
                        key: key.state_key(sidecar_id, &delete.key),
                    });
                }
                unknown => {
                    return Err(Error::OperationNotSupported {
                        operation: unknown.to_string(),
                    });
                }
            }
        }

        debug!(actor = %key, count = operations.len(), "Committing state transaction");
        self.inner.store.multi(operations).await
    }
}
