use policydesk_model::{FieldDescriptor, FieldType, Record, SelectOption};
use serde_json::Value;
use std::collections::HashMap;

/// Locally held copies of other entities' records, keyed by endpoint.
///
/// Used only to offer choices for selectRef fields and to show a readable
/// label instead of a bare foreign key.
#[derive(Debug, Clone, Default)]
pub struct ReferenceCache {
    collections: HashMap<String, Vec<Record>>,
}

impl ReferenceCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the cached records of one collection.
    pub fn replace(&mut self, endpoint: &str, records: Vec<Record>) {
        self.collections.insert(endpoint.to_string(), records);
    }

    /// Cached records of `endpoint`; empty if never loaded.
    pub fn records(&self, endpoint: &str) -> &[Record] {
        self.collections
            .get(endpoint)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn is_loaded(&self, endpoint: &str) -> bool {
        self.collections.contains_key(endpoint)
    }

    /// Choices offered for `field`: the declared options of a select, one
    /// `"<id> - <label>"` entry per cached record for a selectRef, nothing
    /// for free-form fields.
    pub fn options_for(&self, field: &FieldDescriptor) -> Vec<SelectOption> {
        match &field.field_type {
            FieldType::Select { options } => options.clone(),
            FieldType::SelectRef {
                ref_endpoint,
                ref_label,
            } => self
                .records(ref_endpoint)
                .iter()
                .map(|record| SelectOption {
                    value: record.id.to_string(),
                    label: format!(
                        "{} - {}",
                        record.id,
                        record.text(ref_label).unwrap_or_default()
                    ),
                })
                .collect(),
            FieldType::Text | FieldType::Email | FieldType::Number { .. } | FieldType::Date => {
                Vec::new()
            }
        }
    }

    /// Human-readable label for a stored foreign key.
    ///
    /// Falls back to the raw value when the field is not a reference, the
    /// collection is not cached, or no record has that id (a deleted or
    /// stale target). Never fails.
    pub fn resolve_label(&self, field: &FieldDescriptor, value: &Value) -> String {
        let raw = value_text(value);
        let Some((endpoint, label_field)) = field.reference() else {
            return raw;
        };
        self.records(endpoint)
            .iter()
            .find(|record| record.id.matches(value))
            .and_then(|record| record.text(label_field))
            .unwrap_or(raw)
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
