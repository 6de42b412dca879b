//! Error types for schema construction.

use thiserror::Error;

/// Result type for schema operations.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// A schema that violates the engine's structural invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// Two fields in the same schema share a name.
    #[error("duplicate field '{field}' in schema '{schema}'")]
    DuplicateField { schema: String, field: String },

    /// A select field declares no options.
    #[error("select field '{field}' has no options")]
    EmptyOptions { field: String },

    /// A selectRef field is missing its endpoint or label field.
    #[error("reference field '{field}' needs both an endpoint and a label field")]
    IncompleteReference { field: String },

    /// The field's pattern is not a valid regular expression.
    #[error("invalid pattern on field '{field}': {reason}")]
    InvalidPattern { field: String, reason: String },

    /// A cross-field rule names a field the schema does not have.
    #[error("rule in schema '{schema}' refers to unknown field '{field}'")]
    UnknownRuleField { schema: String, field: String },

    /// The entity key string is not one of the managed entities.
    #[error("unknown entity: {0}")]
    UnknownEntity(String),

    /// A registry was built without a schema for this entity.
    #[error("missing schema for entity: {0}")]
    MissingSchema(String),
}
