//! Schema-driven validation
//!
//! [`validate`] is a pure function from a schema and the current raw
//! values to a [`ValidationResult`]. It performs no network or storage
//! access and the same inputs always produce the same result; sessions
//! recompute it on every value change.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::schema::{FieldKind, FieldSpec, FormSchema, Rule, RuleKind};

/// Raw field values of one in-progress form
pub type FieldValues = HashMap<String, String>;

/// Derived verdict over a full form. Never mutated; recomputed instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Per-field error messages, at most one per field (rules
    /// short-circuit), keyed by field name
    pub field_errors: BTreeMap<String, Vec<String>>,

    /// True iff no field produced an error
    pub is_valid: bool,
}

impl ValidationResult {
    /// A result with no errors
    pub fn valid() -> Self {
        Self {
            field_errors: BTreeMap::new(),
            is_valid: true,
        }
    }

    /// First error message for a field, if any
    pub fn error_for(&self, name: &str) -> Option<&str> {
        self.field_errors
            .get(name)
            .and_then(|msgs| msgs.first())
            .map(String::as_str)
    }
}

/// Validate `values` against `schema`.
///
/// Fields are evaluated in schema order, rules in declaration order,
/// and the first failing rule determines the field's single error
/// message. Length, pattern, numeric, and membership rules only fire
/// on non-empty values so they never double-report with `Required`.
pub fn validate(schema: &FormSchema, values: &FieldValues) -> ValidationResult {
    let mut field_errors: BTreeMap<String, Vec<String>> = BTreeMap::new();

    for field in schema.fields() {
        let raw = values.get(&field.name).map(String::as_str).unwrap_or("");
        if let Some(message) = first_failure(field, raw, values) {
            field_errors.insert(field.name.clone(), vec![message]);
        }
    }

    ValidationResult {
        is_valid: field_errors.is_empty(),
        field_errors,
    }
}

fn first_failure(field: &FieldSpec, raw: &str, values: &FieldValues) -> Option<String> {
    for rule in &field.rules {
        if check_rule(field, rule, raw, values).is_err() {
            return Some(message_for(field, rule));
        }
    }
    None
}

/// Evaluate one rule; `Err(())` marks a failure.
fn check_rule(field: &FieldSpec, rule: &Rule, raw: &str, values: &FieldValues) -> Result<(), ()> {
    let trimmed = raw.trim();
    match &rule.kind {
        RuleKind::Required => {
            if trimmed.is_empty() {
                return Err(());
            }
            // A select is only satisfied by one of its own options.
            if field.kind == FieldKind::Select {
                if let Some(allowed) = field.allowed_options() {
                    if !allowed.iter().any(|a| a == raw) {
                        return Err(());
                    }
                }
            }
            Ok(())
        }
        RuleKind::MinLength(n) => {
            if raw.is_empty() || raw.chars().count() >= *n {
                Ok(())
            } else {
                Err(())
            }
        }
        RuleKind::MaxLength(n) => {
            if raw.is_empty() || raw.chars().count() <= *n {
                Ok(())
            } else {
                Err(())
            }
        }
        RuleKind::Pattern(source) => {
            if trimmed.is_empty() {
                return Ok(());
            }
            match Regex::new(&format!("^(?:{})$", source)) {
                Ok(re) if re.is_match(trimmed) => Ok(()),
                Ok(_) => Err(()),
                Err(e) => {
                    // Unreachable for schemas built through the builder.
                    tracing::error!("pattern '{}' failed to compile: {}", source, e);
                    Ok(())
                }
            }
        }
        RuleKind::Numeric => {
            if trimmed.is_empty() {
                return Ok(());
            }
            trimmed.parse::<u64>().map(|_| ()).map_err(|_| ())
        }
        RuleKind::OneOf(allowed) => {
            if raw.is_empty() || allowed.iter().any(|a| a == raw) {
                Ok(())
            } else {
                Err(())
            }
        }
        RuleKind::EqualsField(other) => {
            let other_raw = values.get(other).map(String::as_str).unwrap_or("");
            if raw == other_raw {
                Ok(())
            } else {
                Err(())
            }
        }
    }
}

/// Message for a failed rule: the declared override, or one derived
/// from the field label.
fn message_for(field: &FieldSpec, rule: &Rule) -> String {
    if let Some(message) = &rule.message {
        return message.clone();
    }
    match &rule.kind {
        RuleKind::Required => format!("{} is required.", field.label),
        RuleKind::MinLength(n) => {
            format!("{} must be at least {} characters.", field.label, n)
        }
        RuleKind::MaxLength(n) => {
            format!("{} must be at most {} characters.", field.label, n)
        }
        RuleKind::Pattern(_) => format!("Please enter a valid {}.", field.label),
        RuleKind::Numeric => format!("{} must be a non-negative number.", field.label),
        RuleKind::OneOf(_) => format!("Please select a valid {}.", field.label),
        RuleKind::EqualsField(_) => format!("{} does not match.", field.label),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldKind;

    fn values(pairs: &[(&str, &str)]) -> FieldValues {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn sample_schema() -> FormSchema {
        FormSchema::builder("sample")
            .field(
                FieldSpec::new("fullName", FieldKind::Text)
                    .with_label("Full Name")
                    .with_rule(Rule::required())
                    .with_rule(Rule::min_length(2)),
            )
            .field(
                FieldSpec::new("mobileNumber", FieldKind::Text)
                    .with_label("Mobile Number")
                    .with_rule(Rule::required())
                    .with_rule(
                        Rule::pattern(r"\d{7,15}")
                            .with_message("Please enter a valid mobile number (7-15 digits)."),
                    ),
            )
            .field(
                FieldSpec::new("guestCount", FieldKind::Number)
                    .with_label("Guest Count")
                    .with_rule(Rule::numeric()),
            )
            .build()
            .unwrap()
    }

    #[test]
    fn test_required_empty_fails() {
        let schema = sample_schema();
        let result = validate(&schema, &values(&[]));
        assert!(!result.is_valid);
        assert_eq!(result.error_for("fullName"), Some("Full Name is required."));
    }

    #[test]
    fn test_first_failing_rule_wins() {
        let schema = sample_schema();
        // Empty value: required fires, min_length must not double-report.
        let result = validate(&schema, &values(&[("fullName", "")]));
        let errors = result.field_errors.get("fullName").unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0], "Full Name is required.");
    }

    #[test]
    fn test_min_length_only_on_non_empty() {
        let schema = sample_schema();
        let result = validate(&schema, &values(&[("fullName", "J")]));
        assert_eq!(
            result.error_for("fullName"),
            Some("Full Name must be at least 2 characters.")
        );
    }

    #[test]
    fn test_phone_pattern_boundaries() {
        let schema = sample_schema();

        // 5 digits: below the 7-digit floor.
        let short = validate(
            &schema,
            &values(&[("fullName", "Jane Doe"), ("mobileNumber", "12345")]),
        );
        assert_eq!(
            short.error_for("mobileNumber"),
            Some("Please enter a valid mobile number (7-15 digits).")
        );

        // 7 digits: passes.
        let ok = validate(
            &schema,
            &values(&[("fullName", "Jane Doe"), ("mobileNumber", "1234567")]),
        );
        assert!(ok.error_for("mobileNumber").is_none());
    }

    #[test]
    fn test_numeric_rejects_words() {
        let schema = sample_schema();
        let result = validate(
            &schema,
            &values(&[
                ("fullName", "Jane Doe"),
                ("mobileNumber", "5551234567"),
                ("guestCount", "abc"),
            ]),
        );
        assert!(!result.is_valid);
        assert_eq!(
            result.error_for("guestCount"),
            Some("Guest Count must be a non-negative number.")
        );

        let negative = validate(
            &schema,
            &values(&[
                ("fullName", "Jane Doe"),
                ("mobileNumber", "5551234567"),
                ("guestCount", "-3"),
            ]),
        );
        assert!(!negative.is_valid);
    }

    #[test]
    fn test_select_required_checks_membership() {
        let schema = FormSchema::builder("select")
            .field(
                FieldSpec::new("code", FieldKind::Select)
                    .with_label("Country Code")
                    .with_rule(Rule::required())
                    .with_rule(Rule::one_of(["+1", "+44"])),
            )
            .build()
            .unwrap();

        let absent = validate(&schema, &values(&[("code", "+99")]));
        assert_eq!(absent.error_for("code"), Some("Country Code is required."));

        let present = validate(&schema, &values(&[("code", "+44")]));
        assert!(present.is_valid);
    }

    #[test]
    fn test_equals_field_attaches_to_declaring_field() {
        let schema = FormSchema::builder("pw")
            .field(FieldSpec::new("newPassword", FieldKind::Password).with_rule(Rule::required()))
            .field(
                FieldSpec::new("confirmNewPassword", FieldKind::Password)
                    .with_rule(Rule::required())
                    .with_rule(
                        Rule::equals_field("newPassword")
                            .with_message("New passwords do not match."),
                    ),
            )
            .build()
            .unwrap();

        let result = validate(
            &schema,
            &values(&[
                ("newPassword", "abcdefgh"),
                ("confirmNewPassword", "abcdefg1"),
            ]),
        );
        assert!(!result.is_valid);
        assert!(result.error_for("newPassword").is_none());
        assert_eq!(
            result.error_for("confirmNewPassword"),
            Some("New passwords do not match.")
        );

        let matching = validate(
            &schema,
            &values(&[
                ("newPassword", "abcdefgh"),
                ("confirmNewPassword", "abcdefgh"),
            ]),
        );
        assert!(matching.is_valid);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn validate_is_deterministic(
                name in "[a-zA-Z ]{0,20}",
                phone in "[0-9a-z]{0,20}",
                count in "[0-9a-z]{0,10}",
            ) {
                let schema = sample_schema();
                let vals = values(&[
                    ("fullName", name.as_str()),
                    ("mobileNumber", phone.as_str()),
                    ("guestCount", count.as_str()),
                ]);
                let first = validate(&schema, &vals);
                let second = validate(&schema, &vals);
                prop_assert_eq!(first, second);
            }

            #[test]
            fn required_empty_is_always_invalid(phone in "[0-9]{7,15}") {
                let schema = sample_schema();
                let vals = values(&[("fullName", ""), ("mobileNumber", phone.as_str())]);
                let result = validate(&schema, &vals);
                prop_assert!(!result.is_valid);
                prop_assert!(result.error_for("fullName").is_some());
            }
        }
    }
}
