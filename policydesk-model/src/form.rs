use crate::record::Record;
use crate::schema::EntitySchema;
use std::collections::HashMap;

/// Editable values and error messages for one entity form.
///
/// Always holds exactly the fields of the schema it was built from. Values
/// are kept as the text the user typed; coercion to wire types happens when
/// the payload is built. An empty error string means the field is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    values: HashMap<String, String>,
    errors: HashMap<String, String>,
}

impl FormState {
    /// Every field of `schema` set to the empty string, no errors.
    pub fn empty(schema: &EntitySchema) -> Self {
        let values: HashMap<String, String> = schema
            .field_names()
            .map(|name| (name.to_string(), String::new()))
            .collect();
        let errors = values.clone();
        Self { values, errors }
    }

    /// Pre-populated from a record; missing or null fields become empty.
    pub fn from_record(schema: &EntitySchema, record: &Record) -> Self {
        let mut form = Self::empty(schema);
        for (name, value) in form.values.iter_mut() {
            *value = record.text(name).unwrap_or_default();
        }
        form
    }

    pub fn value(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// The current error for `name`, if it has a non-empty one.
    pub fn error(&self, name: &str) -> Option<&str> {
        self.errors
            .get(name)
            .map(String::as_str)
            .filter(|e| !e.is_empty())
    }

    /// Sets a field's value and clears its error.
    /// Returns `false` (and changes nothing) for a name outside the schema.
    pub fn set_value(&mut self, name: &str, value: impl Into<String>) -> bool {
        match self.values.get_mut(name) {
            Some(slot) => {
                *slot = value.into();
                if let Some(error) = self.errors.get_mut(name) {
                    error.clear();
                }
                true
            }
            None => false,
        }
    }

    /// Replaces the error map. Names outside the schema are ignored and
    /// fields absent from `errors` become valid.
    pub fn set_errors(&mut self, errors: &HashMap<String, String>) {
        for (name, slot) in self.errors.iter_mut() {
            *slot = errors.get(name).cloned().unwrap_or_default();
        }
    }

    pub fn clear_errors(&mut self) {
        self.errors.values_mut().for_each(String::clear);
    }

    pub fn has_errors(&self) -> bool {
        self.errors.values().any(|e| !e.is_empty())
    }

    pub fn values(&self) -> &HashMap<String, String> {
        &self.values
    }

    pub fn errors(&self) -> &HashMap<String, String> {
        &self.errors
    }

    /// Whether every value is the empty string.
    pub fn is_blank(&self) -> bool {
        self.values.values().all(String::is_empty)
    }

    /// Whether the form holds exactly the fields of `schema`.
    pub fn matches_schema(&self, schema: &EntitySchema) -> bool {
        self.values.len() == schema.fields.len()
            && schema.field_names().all(|name| self.values.contains_key(name))
    }
}
