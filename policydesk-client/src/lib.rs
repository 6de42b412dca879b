//! REST collection client for PolicyDesk.
//!
//! Every managed entity lives in a backend collection `E` exposing
//! `GET /E`, `POST /E`, `PUT /E/{id}` and `DELETE /E/{id}` with JSON
//! bodies. This crate provides:
//! - [`EntityBackend`]: the async seam the session talks to
//! - [`HttpBackend`]: the `reqwest` implementation of it
//! - [`build_payload`]: form values coerced to their wire types
//! - [`ClientConfig`]: base URL and timeout, overridable from the environment

mod backend;
mod config;
mod error;
mod http;
mod payload;

pub use backend::EntityBackend;
pub use config::{ClientConfig, API_BASE_ENV, TIMEOUT_ENV};
pub use error::{ClientError, ClientResult};
pub use http::HttpBackend;
pub use payload::{build_payload, Payload, PayloadError};
