use chrono::NaiveDate;
use policydesk_model::{FieldDescriptor, FieldType};
use regex_lite::Regex;
use std::sync::LazyLock;
use tracing::warn;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles")
});

/// Checks `value` against `field`, returning the first failing rule's
/// message or `None` when the value is acceptable.
///
/// Rules run in this order:
/// 1. required: a blank value on a required field
/// 2. email shape (`local@domain.tld`)
/// 3. the field's pattern, matched against the whole value
/// 4. minimum length in characters
/// 5. numbers: must parse as a finite number, then respect `min`
/// 6. dates: must be an ISO `YYYY-MM-DD` calendar date
/// 7. selects: must be one of the declared option values; selectRef
///    values must be a numeric record id
///
/// A blank value on an optional field passes every rule.
pub fn validate_field(field: &FieldDescriptor, value: &str) -> Option<String> {
    if value.trim().is_empty() {
        return field
            .required
            .then(|| format!("{} is required", field.label));
    }

    if matches!(field.field_type, FieldType::Email) && !EMAIL.is_match(value) {
        return Some("Invalid email".to_string());
    }

    if let Some(pattern) = &field.pattern {
        if !matches_fully(&field.name, pattern, value) {
            return Some(
                field
                    .pattern_message
                    .clone()
                    .unwrap_or_else(|| "Invalid format".to_string()),
            );
        }
    }

    if let Some(min_length) = field.min_length {
        if value.chars().count() < min_length {
            return Some(format!("Minimum {min_length} characters"));
        }
    }

    match &field.field_type {
        FieldType::Number { min } => {
            let Some(number) = parse_number(value) else {
                return Some("Must be a valid number".to_string());
            };
            match min {
                Some(min) if number < *min => Some(format!("Minimum value is {min}")),
                _ => None,
            }
        }
        FieldType::Date => parse_date(value)
            .is_none()
            .then(|| "Invalid date".to_string()),
        FieldType::Select { options } => (!options.iter().any(|o| o.value == value))
            .then(|| "Invalid option".to_string()),
        FieldType::SelectRef { .. } => parse_number(value)
            .is_none()
            .then(|| "Invalid option".to_string()),
        FieldType::Text | FieldType::Email => None,
    }
}

/// Parses a form value as a finite number.
pub fn parse_number(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
}

/// Parses a form value as an ISO calendar date.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

fn matches_fully(field: &str, pattern: &str, value: &str) -> bool {
    match Regex::new(&format!("^(?:{pattern})$")) {
        Ok(re) => re.is_match(value),
        Err(e) => {
            // Only schemas that bypassed `EntitySchema::check` get here.
            warn!("skipping invalid pattern on field {}: {}", field, e);
            true
        }
    }
}
