use crate::error::{SchemaError, SchemaResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Describes one manageable entity: its fields in form order, the backend
/// collection it lives in, and any rules spanning several fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitySchema {
    pub title: String,
    /// Backend collection name (e.g. `clientes` for `GET /clientes`).
    pub endpoint: String,
    pub fields: Vec<FieldDescriptor>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<CrossFieldRule>,
}

impl EntitySchema {
    pub fn new(title: &str, endpoint: &str, fields: Vec<FieldDescriptor>) -> Self {
        Self {
            title: title.into(),
            endpoint: endpoint.into(),
            fields,
            rules: Vec::new(),
        }
    }

    /// Attaches a cross-field rule.
    pub fn with_rule(mut self, rule: CrossFieldRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Looks up a field by name.
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Field names in form order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Endpoints of every selectRef field, deduplicated, in form order.
    pub fn reference_endpoints(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.fields
            .iter()
            .filter_map(|f| f.reference().map(|(endpoint, _)| endpoint))
            .filter(|endpoint| seen.insert(*endpoint))
            .collect()
    }

    /// Verifies the structural invariants the engine relies on.
    pub fn check(&self) -> SchemaResult<()> {
        let mut names = HashSet::new();
        for field in &self.fields {
            if !names.insert(field.name.as_str()) {
                return Err(SchemaError::DuplicateField {
                    schema: self.endpoint.clone(),
                    field: field.name.clone(),
                });
            }
            field.check()?;
        }

        for rule in &self.rules {
            for name in rule.fields() {
                if !names.contains(name) {
                    return Err(SchemaError::UnknownRuleField {
                        schema: self.endpoint.clone(),
                        field: name.to_string(),
                    });
                }
            }
        }
        Ok(())
    }
}

/// Metadata for one form field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
    /// Unique within its schema; also the JSON key on the wire.
    pub name: String,
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    /// Shown instead of the generic message when `pattern` does not match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern_message: Option<String>,
}

impl FieldDescriptor {
    fn simple(name: &str, label: &str, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            field_type,
            required: false,
            min_length: None,
            pattern: None,
            pattern_message: None,
        }
    }

    /// Shorthand for a free text field.
    pub fn text(name: &str, label: &str) -> Self {
        Self::simple(name, label, FieldType::Text)
    }

    /// Shorthand for an email field.
    pub fn email(name: &str, label: &str) -> Self {
        Self::simple(name, label, FieldType::Email)
    }

    /// Shorthand for a numeric field with an optional lower bound.
    pub fn number(name: &str, label: &str, min: Option<f64>) -> Self {
        Self::simple(name, label, FieldType::Number { min })
    }

    /// Shorthand for an ISO date field.
    pub fn date(name: &str, label: &str) -> Self {
        Self::simple(name, label, FieldType::Date)
    }

    /// Shorthand for a fixed-choice field. Options are `(value, label)` pairs.
    pub fn select(name: &str, label: &str, options: &[(&str, &str)]) -> Self {
        let options = options
            .iter()
            .map(|(value, label)| SelectOption::new(value, label))
            .collect();
        Self::simple(name, label, FieldType::Select { options })
    }

    /// Shorthand for a foreign key into another entity's collection.
    pub fn select_ref(name: &str, label: &str, ref_endpoint: &str, ref_label: &str) -> Self {
        Self::simple(
            name,
            label,
            FieldType::SelectRef {
                ref_endpoint: ref_endpoint.into(),
                ref_label: ref_label.into(),
            },
        )
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_min_length(mut self, min_length: usize) -> Self {
        self.min_length = Some(min_length);
        self
    }

    pub fn with_pattern(mut self, pattern: &str, message: &str) -> Self {
        self.pattern = Some(pattern.into());
        self.pattern_message = Some(message.into());
        self
    }

    /// Whether the value is sent to the backend as a JSON number.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self.field_type,
            FieldType::Number { .. } | FieldType::SelectRef { .. }
        )
    }

    /// `(endpoint, label field)` for selectRef fields.
    pub fn reference(&self) -> Option<(&str, &str)> {
        match &self.field_type {
            FieldType::SelectRef {
                ref_endpoint,
                ref_label,
            } => Some((ref_endpoint.as_str(), ref_label.as_str())),
            _ => None,
        }
    }

    fn check(&self) -> SchemaResult<()> {
        match &self.field_type {
            FieldType::Select { options } if options.is_empty() => {
                return Err(SchemaError::EmptyOptions {
                    field: self.name.clone(),
                });
            }
            FieldType::SelectRef {
                ref_endpoint,
                ref_label,
            } if ref_endpoint.is_empty() || ref_label.is_empty() => {
                return Err(SchemaError::IncompleteReference {
                    field: self.name.clone(),
                });
            }
            _ => {}
        }

        if let Some(pattern) = &self.pattern {
            regex_lite::Regex::new(pattern).map_err(|e| SchemaError::InvalidPattern {
                field: self.name.clone(),
                reason: e.to_string(),
            })?;
        }
        Ok(())
    }
}

/// The closed set of field kinds the engine knows how to render,
/// validate and coerce.
///
/// Choice options and reference targets live inside their variants, so a
/// select without options or a reference without a target cannot be
/// expressed at all; [`EntitySchema::check`] rejects the empty cases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum FieldType {
    Text,
    Email,
    Number {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<f64>,
    },
    Date,
    Select {
        options: Vec<SelectOption>,
    },
    #[serde(rename_all = "camelCase")]
    SelectRef {
        ref_endpoint: String,
        /// Field of the referenced record shown to the user.
        ref_label: String,
    },
}

/// One entry of a fixed-choice field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: &str, label: &str) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// A constraint evaluated across several fields after per-field validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "camelCase")]
pub enum CrossFieldRule {
    /// When both dates are present, `end` must be strictly after `start`.
    /// A violation is reported on `end`.
    DateOrder {
        start: String,
        end: String,
        message: String,
    },
}

impl CrossFieldRule {
    pub fn date_order(start: &str, end: &str, message: &str) -> Self {
        CrossFieldRule::DateOrder {
            start: start.into(),
            end: end.into(),
            message: message.into(),
        }
    }

    /// Names of the fields the rule reads.
    pub fn fields(&self) -> Vec<&str> {
        match self {
            CrossFieldRule::DateOrder { start, end, .. } => vec![start.as_str(), end.as_str()],
        }
    }
}
