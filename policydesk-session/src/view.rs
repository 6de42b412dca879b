//! Render-ready snapshots of a session.
//!
//! Views are plain data built on demand; a front-end draws them and feeds
//! user actions back through [`Session`] methods.

use crate::references::ReferenceCache;
use crate::session::Session;
use policydesk_model::{EntitySchema, FieldDescriptor, FieldType, FormState, Record, SelectOption};
use serde_json::Value;

/// Step offered by numeric inputs.
const NUMBER_STEP: f64 = 0.01;

/// Placeholder for a null or missing table cell.
const EMPTY_CELL: &str = "-";

/// How a field should be captured.
#[derive(Debug, Clone, PartialEq)]
pub enum InputKind {
    Text,
    Email,
    Number { min: Option<f64>, step: f64 },
    Date,
    /// A closed list: select options or resolved reference records.
    Choice { options: Vec<SelectOption> },
}

impl InputKind {
    fn for_field(field: &FieldDescriptor, references: &ReferenceCache) -> Self {
        match &field.field_type {
            FieldType::Text => InputKind::Text,
            FieldType::Email => InputKind::Email,
            FieldType::Number { min } => InputKind::Number {
                min: *min,
                step: NUMBER_STEP,
            },
            FieldType::Date => InputKind::Date,
            FieldType::Select { .. } | FieldType::SelectRef { .. } => InputKind::Choice {
                options: references.options_for(field),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldView {
    pub name: String,
    pub label: String,
    pub required: bool,
    pub kind: InputKind,
    pub value: String,
    /// Current message, `None` when the field is valid.
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormView {
    pub heading: String,
    pub submit_label: &'static str,
    /// Only offered while an existing record is being edited.
    pub show_cancel: bool,
    pub fields: Vec<FieldView>,
}

impl FormView {
    pub fn build(
        schema: &EntitySchema,
        form: &FormState,
        references: &ReferenceCache,
        editing: bool,
    ) -> Self {
        let (verb, submit_label) = if editing {
            ("Edit", "Update")
        } else {
            ("New", "Save")
        };

        let fields = schema
            .fields
            .iter()
            .map(|field| FieldView {
                name: field.name.clone(),
                label: field.label.clone(),
                required: field.required,
                kind: InputKind::for_field(field, references),
                value: form.value(&field.name).unwrap_or_default().to_string(),
                error: form.error(&field.name).map(str::to_string),
            })
            .collect();

        Self {
            heading: format!("{verb} {}", schema.title),
            submit_label,
            show_cancel: editing,
            fields,
        }
    }

    pub fn field(&self, name: &str) -> Option<&FieldView> {
        self.fields.iter().find(|f| f.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub id: String,
    pub cells: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    pub title: String,
    /// `ID` followed by each field label.
    pub headers: Vec<String>,
    pub rows: Vec<TableRow>,
}

impl TableView {
    pub fn build(schema: &EntitySchema, records: &[Record], references: &ReferenceCache) -> Self {
        let headers = std::iter::once("ID".to_string())
            .chain(schema.fields.iter().map(|f| f.label.clone()))
            .collect();

        let rows = records
            .iter()
            .map(|record| TableRow {
                id: record.id.to_string(),
                cells: schema
                    .fields
                    .iter()
                    .map(|field| cell_text(field, record.get(&field.name), references))
                    .collect(),
            })
            .collect();

        Self {
            title: format!("{} list", schema.title),
            headers,
            rows,
        }
    }

    /// True when there is nothing to list.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn cell_text(field: &FieldDescriptor, value: Option<&Value>, references: &ReferenceCache) -> String {
    match value {
        None | Some(Value::Null) => EMPTY_CELL.to_string(),
        Some(value) => references.resolve_label(field, value),
    }
}

impl Session {
    pub fn form_view(&self) -> FormView {
        FormView::build(
            self.schema(),
            self.form(),
            self.references(),
            self.editing_id().is_some(),
        )
    }

    pub fn table_view(&self) -> TableView {
        TableView::build(self.schema(), self.records(), self.references())
    }
}
