use policydesk_model::{EntitySchema, FormState};
use policydesk_validate::parse_number;
use serde_json::{Map, Number, Value};
use thiserror::Error;

/// JSON object sent as the body of a create or update.
pub type Payload = Map<String, Value>;

/// Integers beyond this magnitude lose precision as f64 and are sent as floats.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// A form value that cannot take its declared wire type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PayloadError {
    #[error("field '{field}' must be numeric, got '{value}'")]
    NotNumeric { field: String, value: String },
}

/// Builds the request body for `form`.
///
/// Number and selectRef fields become JSON numbers (integral values as
/// integers, so reference ids arrive as numeric foreign keys); a blank
/// numeric value becomes `null`. Every other field, dates included, is
/// sent as the string the user entered.
pub fn build_payload(schema: &EntitySchema, form: &FormState) -> Result<Payload, PayloadError> {
    let mut payload = Map::with_capacity(schema.fields.len());
    for field in &schema.fields {
        let raw = form.value(&field.name).unwrap_or_default();
        let value = if field.is_numeric() {
            coerce_number(&field.name, raw)?
        } else {
            Value::String(raw.to_string())
        };
        payload.insert(field.name.clone(), value);
    }
    Ok(payload)
}

fn coerce_number(field: &str, raw: &str) -> Result<Value, PayloadError> {
    if raw.trim().is_empty() {
        return Ok(Value::Null);
    }

    let not_numeric = || PayloadError::NotNumeric {
        field: field.to_string(),
        value: raw.to_string(),
    };
    let n = parse_number(raw).ok_or_else(not_numeric)?;

    if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER {
        Ok(Value::from(n as i64))
    } else {
        Number::from_f64(n).map(Value::Number).ok_or_else(not_numeric)
    }
}
