//! Validation for PolicyDesk entity forms.
//!
//! - [`validate_field`] checks one raw value against its [`FieldDescriptor`]
//!   and yields at most one message (the first rule that fails).
//! - [`validate_form`] checks every field of a schema, then applies the
//!   schema's cross-field rules, and reports all failures at once.
//!
//! Validation is pure: no I/O and no state beyond the inputs.
//!
//! [`FieldDescriptor`]: policydesk_model::FieldDescriptor

mod field;
mod form;

pub use field::{parse_date, parse_number, validate_field};
pub use form::{validate_form, FormValidation};
