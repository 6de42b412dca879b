use crate::field::{parse_date, validate_field};
use policydesk_model::{CrossFieldRule, EntitySchema, FormState};
use std::collections::HashMap;

/// Outcome of validating a whole form.
///
/// Holds one entry per schema field; an empty string means the field is
/// valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValidation {
    errors: HashMap<String, String>,
}

impl FormValidation {
    /// False if any field carries a message.
    pub fn is_valid(&self) -> bool {
        self.errors.values().all(String::is_empty)
    }

    /// The message for `name`, if it failed.
    pub fn error(&self, name: &str) -> Option<&str> {
        self.errors
            .get(name)
            .map(String::as_str)
            .filter(|e| !e.is_empty())
    }

    pub fn errors(&self) -> &HashMap<String, String> {
        &self.errors
    }

    /// Names of failing fields.
    pub fn failed_fields(&self) -> impl Iterator<Item = &str> {
        self.errors
            .iter()
            .filter(|(_, e)| !e.is_empty())
            .map(|(name, _)| name.as_str())
    }

    pub fn into_errors(self) -> HashMap<String, String> {
        self.errors
    }
}

/// Validates every field of `schema` against `form` without stopping at
/// the first failure, then applies the schema's cross-field rules.
pub fn validate_form(schema: &EntitySchema, form: &FormState) -> FormValidation {
    let mut errors: HashMap<String, String> = schema
        .fields
        .iter()
        .map(|field| {
            let value = form.value(&field.name).unwrap_or_default();
            let error = validate_field(field, value).unwrap_or_default();
            (field.name.clone(), error)
        })
        .collect();

    for rule in &schema.rules {
        apply_rule(rule, form, &mut errors);
    }

    FormValidation { errors }
}

fn apply_rule(rule: &CrossFieldRule, form: &FormState, errors: &mut HashMap<String, String>) {
    match rule {
        CrossFieldRule::DateOrder {
            start,
            end,
            message,
        } => {
            let start_date = form.value(start).and_then(parse_date);
            let end_date = form.value(end).and_then(parse_date);
            if let (Some(start_date), Some(end_date)) = (start_date, end_date) {
                if end_date <= start_date {
                    errors.insert(end.clone(), message.clone());
                }
            }
        }
    }
}
