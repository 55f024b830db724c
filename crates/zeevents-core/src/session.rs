//! Per-view form state
//!
//! A [`FormSession`] holds the current raw values, touched state, and
//! the last validation result for one in-progress form. It is owned
//! exclusively by the view that created it, lives only while that view
//! is shown, and never shares mutable state with other sessions.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use crate::schema::FormSchema;
use crate::validate::{validate, FieldValues, ValidationResult};
use crate::{CoreError, Result};

/// Verdict of a submit attempt
#[derive(Debug, Clone)]
pub enum SubmitGate {
    /// The session is valid; values are snapshotted and the session is
    /// marked submitting until [`FormSession::finish`] is called.
    Ready(ValidatedForm),

    /// Validation failed; all fields are now touched so every error
    /// surfaces inline. No adapter may be invoked.
    Rejected,

    /// A submission is already in flight. The attempt is ignored, not
    /// queued.
    InFlight,
}

/// Immutable snapshot of a session's values taken at the moment a
/// submit attempt passed validation. This is the only input a
/// submission adapter ever sees.
#[derive(Debug, Clone)]
pub struct ValidatedForm {
    form: String,
    values: FieldValues,
}

impl ValidatedForm {
    pub fn form_name(&self) -> &str {
        &self.form
    }

    /// Raw value of a field, empty string when unset
    pub fn get(&self, name: &str) -> &str {
        self.values.get(name).map(String::as_str).unwrap_or("")
    }

    /// Trimmed value of a field
    pub fn get_trimmed(&self, name: &str) -> &str {
        self.get(name).trim()
    }

    pub fn values(&self) -> &FieldValues {
        &self.values
    }
}

/// Mutable state of one in-progress form
#[derive(Debug, Clone)]
pub struct FormSession {
    schema: Arc<FormSchema>,
    values: FieldValues,
    touched: HashSet<String>,
    last_result: ValidationResult,
    submitting: bool,
}

impl FormSession {
    /// Create a session seeded with the schema's declared defaults
    pub fn new(schema: Arc<FormSchema>) -> Self {
        let values = schema.defaults();
        let last_result = validate(&schema, &values);
        Self {
            schema,
            values,
            touched: HashSet::new(),
            last_result,
            submitting: false,
        }
    }

    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    /// Seed a value from an upstream step (e.g. the email carried over
    /// from the sign-in screen) without marking the field touched.
    pub fn prefill(&mut self, name: &str, raw: impl Into<String>) -> Result<()> {
        if !self.schema.has_field(name) {
            return Err(CoreError::UnknownField(name.to_string()));
        }
        self.values.insert(name.to_string(), raw.into());
        self.last_result = validate(&self.schema, &self.values);
        Ok(())
    }

    /// Store a field edit, mark the field touched, and revalidate.
    ///
    /// A name missing from the schema is a programming error and fails
    /// fast instead of being silently ignored.
    pub fn set_field(&mut self, name: &str, raw: impl Into<String>) -> Result<()> {
        if !self.schema.has_field(name) {
            return Err(CoreError::UnknownField(name.to_string()));
        }
        self.values.insert(name.to_string(), raw.into());
        self.touched.insert(name.to_string());
        self.last_result = validate(&self.schema, &self.values);
        Ok(())
    }

    /// Current raw value of a field
    pub fn value(&self, name: &str) -> &str {
        self.values.get(name).map(String::as_str).unwrap_or("")
    }

    pub fn values(&self) -> &FieldValues {
        &self.values
    }

    /// Last computed validation result, touched or not. Used to decide
    /// whether the submit action is enabled.
    pub fn last_result(&self) -> &ValidationResult {
        &self.last_result
    }

    pub fn is_valid(&self) -> bool {
        self.last_result.is_valid
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Error messages to render inline: only fields the user has
    /// touched surface their messages.
    pub fn visible_errors(&self) -> BTreeMap<&str, &str> {
        self.last_result
            .field_errors
            .iter()
            .filter(|(name, _)| self.touched.contains(name.as_str()))
            .filter_map(|(name, msgs)| msgs.first().map(|m| (name.as_str(), m.as_str())))
            .collect()
    }

    /// Attempt to submit the session.
    ///
    /// Marks every field touched so previously hidden errors surface,
    /// then revalidates. A second attempt while a submission is in
    /// flight is a no-op.
    pub fn submit_attempt(&mut self) -> SubmitGate {
        if self.submitting {
            tracing::debug!(form = self.schema.name(), "submit ignored, already in flight");
            return SubmitGate::InFlight;
        }

        for field in self.schema.fields() {
            self.touched.insert(field.name.clone());
        }
        self.last_result = validate(&self.schema, &self.values);

        if !self.last_result.is_valid {
            tracing::debug!(
                form = self.schema.name(),
                errors = self.last_result.field_errors.len(),
                "submit rejected by validation"
            );
            return SubmitGate::Rejected;
        }

        self.submitting = true;
        SubmitGate::Ready(ValidatedForm {
            form: self.schema.name().to_string(),
            values: self.values.clone(),
        })
    }

    /// Mark the in-flight submission finished, whatever its outcome
    pub fn finish(&mut self) {
        self.submitting = false;
    }

    /// Restore the schema's declared defaults and clear touched state
    /// and errors.
    pub fn reset(&mut self) {
        self.values = self.schema.defaults();
        self.touched.clear();
        self.last_result = validate(&self.schema, &self.values);
        self.submitting = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FieldKind, FieldSpec, Rule};

    fn schema() -> Arc<FormSchema> {
        Arc::new(
            FormSchema::builder("contact")
                .field(
                    FieldSpec::new("name", FieldKind::Text)
                        .with_label("Name")
                        .with_rule(Rule::required())
                        .with_rule(Rule::min_length(2)),
                )
                .field(
                    FieldSpec::new("email", FieldKind::Email)
                        .with_label("Email Address")
                        .with_default("user@example.com")
                        .with_rule(Rule::required()),
                )
                .build()
                .unwrap(),
        )
    }

    #[test]
    fn test_unknown_field_fails_fast() {
        let mut session = FormSession::new(schema());
        let err = session.set_field("nickname", "JD").unwrap_err();
        assert!(matches!(err, CoreError::UnknownField(_)));
    }

    #[test]
    fn test_errors_only_visible_once_touched() {
        let mut session = FormSession::new(schema());
        // Empty untouched form: invalid, but nothing surfaces inline.
        assert!(!session.is_valid());
        assert!(session.visible_errors().is_empty());

        session.set_field("name", "").unwrap();
        assert_eq!(
            session.visible_errors().get("name").copied(),
            Some("Name is required.")
        );
    }

    #[test]
    fn test_submit_attempt_touches_everything() {
        let mut session = FormSession::new(schema());
        assert!(matches!(session.submit_attempt(), SubmitGate::Rejected));
        // The never-edited field now shows its error.
        assert!(session.visible_errors().contains_key("name"));
    }

    #[test]
    fn test_double_submit_is_ignored() {
        let mut session = FormSession::new(schema());
        session.set_field("name", "Jane Doe").unwrap();

        assert!(matches!(session.submit_attempt(), SubmitGate::Ready(_)));
        assert!(session.is_submitting());
        // Second attempt while in flight: no-op, not queued.
        assert!(matches!(session.submit_attempt(), SubmitGate::InFlight));

        session.finish();
        assert!(matches!(session.submit_attempt(), SubmitGate::Ready(_)));
    }

    #[test]
    fn test_snapshot_is_taken_at_submit() {
        let mut session = FormSession::new(schema());
        session.set_field("name", "Jane Doe").unwrap();
        let snapshot = match session.submit_attempt() {
            SubmitGate::Ready(form) => form,
            other => panic!("expected Ready, got {:?}", other),
        };
        session.finish();
        session.set_field("name", "Someone Else").unwrap();
        assert_eq!(snapshot.get("name"), "Jane Doe");
        assert_eq!(snapshot.form_name(), "contact");
    }

    #[test]
    fn test_reset_restores_declared_defaults() {
        let mut session = FormSession::new(schema());
        session.set_field("name", "Jane Doe").unwrap();
        session.set_field("email", "jane@x.com").unwrap();

        session.reset();
        assert_eq!(session.value("name"), "");
        assert_eq!(session.value("email"), "user@example.com");
        assert!(session.visible_errors().is_empty());
    }

    #[test]
    fn test_prefill_does_not_touch() {
        let mut session = FormSession::new(schema());
        session.prefill("email", "jane@x.com").unwrap();
        assert_eq!(session.value("email"), "jane@x.com");
        assert!(session.visible_errors().is_empty());
    }
}
