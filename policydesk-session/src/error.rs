//! Session error types.

use policydesk_model::{EntityKey, RecordId};
use thiserror::Error;

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Misuse of the session by its caller. Backend failures are never
/// reported this way; they become a [`Notice`](crate::Notice).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("{entity} has no field '{field}'")]
    UnknownField { entity: EntityKey, field: String },

    #[error("no {entity} record with id {id} in the current list")]
    RecordNotFound { entity: EntityKey, id: RecordId },
}
