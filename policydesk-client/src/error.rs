//! Client error types.

use crate::payload::PayloadError;
use thiserror::Error;

/// Result type for backend operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur talking to the backend.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never got a response (refused, reset, timed out).
    #[error("connection failed: {0}")]
    Connection(String),

    /// A response arrived but its body could not be read as expected.
    #[error("unreadable response: {0}")]
    Decode(String),

    /// The backend rejected the request; carries its message verbatim.
    #[error("{0}")]
    Api(String),

    /// Form values could not be converted to the wire format.
    #[error(transparent)]
    Payload(#[from] PayloadError),

    /// The HTTP client could not be built from the configuration.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl ClientError {
    /// True for failures that say nothing about the request itself.
    pub fn is_connectivity(&self) -> bool {
        matches!(self, ClientError::Connection(_) | ClientError::Decode(_))
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ClientError::Decode(e.to_string())
        } else {
            ClientError::Connection(e.to_string())
        }
    }
}
