//! Property-based tests for field and form validation.

use policydesk_model::{EntityKey, FieldDescriptor, FormState, SchemaRegistry};
use policydesk_validate::{validate_field, validate_form};
use proptest::prelude::*;

// =============================================================================
// HELPER STRATEGIES
// =============================================================================

fn blank_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[ \t]{0,8}").unwrap()
}

fn word_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z][a-zA-Z ]{2,30}").unwrap()
}

fn non_numeric_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z_#]{1,12}")
        .unwrap()
        .prop_filter("not a float literal", |s| {
            let lower = s.to_ascii_lowercase();
            !["inf", "infinity", "nan"].contains(&lower.as_str())
        })
}

fn date_strategy() -> impl Strategy<Value = chrono::NaiveDate> {
    (2000i32..2100, 1u32..=12, 1u32..=28)
        .prop_map(|(y, m, d)| chrono::NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

// =============================================================================
// REQUIRED FIELDS
// =============================================================================

proptest! {
    /// Every required builtin field rejects a blank value.
    #[test]
    fn required_blank_always_fails(blank in blank_strategy()) {
        let registry = SchemaRegistry::builtin();
        for (_, schema) in registry.iter() {
            for field in schema.fields.iter().filter(|f| f.required) {
                prop_assert!(validate_field(field, &blank).is_some());
            }
        }
    }

    /// A non-blank value satisfying the other constraints passes.
    #[test]
    fn required_text_with_valid_value_passes(value in word_strategy()) {
        let field = FieldDescriptor::text("nombre", "Name").required().with_min_length(3);
        prop_assert_eq!(validate_field(&field, &value), None);
    }
}

// =============================================================================
// NUMERIC FIELDS
// =============================================================================

proptest! {
    /// A numeric value is valid iff it is at least `min`.
    #[test]
    fn number_valid_iff_at_least_min(value in -1.0e6f64..1.0e6, min in -1.0e3f64..1.0e3) {
        let field = FieldDescriptor::number("n", "N", Some(min)).required();
        let text = value.to_string();
        prop_assert_eq!(validate_field(&field, &text).is_none(), value >= min);
    }

    /// Text that is not a number never passes a numeric field.
    #[test]
    fn non_numeric_text_always_invalid(text in non_numeric_strategy()) {
        let field = FieldDescriptor::number("n", "N", None);
        prop_assert_eq!(validate_field(&field, &text), Some("Must be a valid number".to_string()));
    }
}

// =============================================================================
// POLICY DATE ORDER
// =============================================================================

proptest! {
    /// The end date is flagged exactly when it does not come after the start.
    #[test]
    fn end_date_flagged_iff_not_after_start(start in date_strategy(), end in date_strategy()) {
        let registry = SchemaRegistry::builtin();
        let schema = registry.get(EntityKey::Policies);
        let mut form = FormState::empty(schema);
        form.set_value("numeroPoliza", "POL-9");
        form.set_value("fechaInicio", start.format("%Y-%m-%d").to_string());
        form.set_value("fechaFin", end.format("%Y-%m-%d").to_string());
        form.set_value("primaMensual", "10");
        form.set_value("estado", "ACTIVA");
        form.set_value("clienteId", "1");
        form.set_value("planSeguroId", "1");

        let result = validate_form(schema, &form);
        prop_assert_eq!(result.is_valid(), end > start);
        prop_assert_eq!(result.error("fechaFin").is_some(), end <= start);
    }
}
