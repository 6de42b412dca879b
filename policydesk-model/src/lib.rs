//! Core entity model for PolicyDesk.
//!
//! Defines the declarative types the form engine is driven by:
//! - [`FieldDescriptor`] / [`FieldType`]: one form field and its constraints
//! - [`EntitySchema`]: an entity's ordered fields, endpoint and cross-field rules
//! - [`SchemaRegistry`]: the fixed set of managed entities, keyed by [`EntityKey`]
//! - [`Record`]: a backend row, cached read-only by the session
//! - [`FormState`]: the editable values and error messages of one form
//!
//! Nothing in here performs I/O. Validation lives in `policydesk-validate`,
//! transport in `policydesk-client`.

mod error;
mod form;
mod record;
mod registry;
mod schema;

pub use error::{SchemaError, SchemaResult};
pub use form::FormState;
pub use record::{Record, RecordId};
pub use registry::{EntityKey, SchemaRegistry};
pub use schema::{CrossFieldRule, EntitySchema, FieldDescriptor, FieldType, SelectOption};
