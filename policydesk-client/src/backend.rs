//! Backend abstraction trait.

use crate::error::ClientResult;
use crate::payload::Payload;
use async_trait::async_trait;
use policydesk_model::{Record, RecordId};

/// A store of entity collections addressed by endpoint name.
#[async_trait]
pub trait EntityBackend: Send + Sync {
    /// Lists every record of a collection. A JSON response body that is not
    /// an array yields an empty list, whatever the status.
    async fn list(&self, endpoint: &str) -> ClientResult<Vec<Record>>;

    /// Creates a record. Returns the stored record when the backend echoes
    /// one back.
    async fn create(&self, endpoint: &str, payload: &Payload) -> ClientResult<Option<Record>>;

    /// Replaces the record `id`.
    async fn update(&self, endpoint: &str, id: &RecordId, payload: &Payload) -> ClientResult<()>;

    /// Deletes the record `id`. Irreversible.
    async fn remove(&self, endpoint: &str, id: &RecordId) -> ClientResult<()>;
}
