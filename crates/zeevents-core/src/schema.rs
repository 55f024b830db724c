//! Declarative form schemas
//!
//! A [`FormSchema`] is an immutable description of one form: its fields,
//! every field's constraints, and cross-field rules. Schemas are defined
//! once per form type and shared read-only (as `Arc<FormSchema>`) by all
//! sessions of that form.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::{CoreError, Result};

/// Input kind a field renders as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    Email,
    Password,
    Number,
    Date,
    Select,
    LongText,
}

/// Validation constraint kinds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    /// Value must be non-empty; for selects it must also be one of the
    /// allowed options.
    Required,
    /// Minimum character count, only checked on non-empty values
    MinLength(usize),
    /// Maximum character count, only checked on non-empty values
    MaxLength(usize),
    /// Anchored full match of the trimmed value against a regex
    Pattern(String),
    /// Value must parse as a non-negative integer
    Numeric,
    /// Value must be one of the allowed options
    OneOf(Vec<String>),
    /// Value must equal another field's value; the error attaches to
    /// the declaring field, not the referenced one
    EqualsField(String),
}

/// One validation rule with an optional custom message.
///
/// When no message is set the validator derives one from the field label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub kind: RuleKind,
    pub message: Option<String>,
}

impl Rule {
    pub fn new(kind: RuleKind) -> Self {
        Self {
            kind,
            message: None,
        }
    }

    pub fn required() -> Self {
        Self::new(RuleKind::Required)
    }

    pub fn min_length(n: usize) -> Self {
        Self::new(RuleKind::MinLength(n))
    }

    pub fn max_length(n: usize) -> Self {
        Self::new(RuleKind::MaxLength(n))
    }

    pub fn pattern(source: impl Into<String>) -> Self {
        Self::new(RuleKind::Pattern(source.into()))
    }

    pub fn numeric() -> Self {
        Self::new(RuleKind::Numeric)
    }

    pub fn one_of<I, S>(allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(RuleKind::OneOf(allowed.into_iter().map(Into::into).collect()))
    }

    pub fn equals_field(other: impl Into<String>) -> Self {
        Self::new(RuleKind::EqualsField(other.into()))
    }

    /// Override the derived error message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// One field of a form schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Field name, unique within the schema
    pub name: String,

    /// Input kind
    pub kind: FieldKind,

    /// Human-readable label used in derived error messages
    pub label: String,

    /// Declared default value
    pub default: String,

    /// Rules evaluated in declaration order; the first failing rule
    /// determines the field's error
    pub rules: Vec<Rule>,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        let name = name.into();
        Self {
            label: name.clone(),
            name,
            kind,
            default: String::new(),
            rules: Vec::new(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = default.into();
        self
    }

    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Allowed options, when the field carries a `OneOf` rule
    pub fn allowed_options(&self) -> Option<&[String]> {
        self.rules.iter().find_map(|r| match &r.kind {
            RuleKind::OneOf(allowed) => Some(allowed.as_slice()),
            _ => None,
        })
    }
}

/// Immutable description of one form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormSchema {
    name: String,
    fields: Vec<FieldSpec>,
}

impl FormSchema {
    /// Start building a schema
    pub fn builder(name: impl Into<String>) -> FormSchemaBuilder {
        FormSchemaBuilder {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fields in declaration order
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Look up a field by name
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    /// Declared default value for every field
    pub fn defaults(&self) -> HashMap<String, String> {
        self.fields
            .iter()
            .map(|f| (f.name.clone(), f.default.clone()))
            .collect()
    }
}

/// Builder enforcing schema invariants at construction time
pub struct FormSchemaBuilder {
    name: String,
    fields: Vec<FieldSpec>,
}

impl FormSchemaBuilder {
    pub fn field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    /// Validate invariants and produce the immutable schema.
    ///
    /// Rejected declarations are programming errors: duplicate field
    /// names, `EqualsField` targets missing from the schema, and
    /// pattern sources that do not compile.
    pub fn build(self) -> Result<FormSchema> {
        let mut seen: HashSet<&str> = HashSet::new();
        for field in &self.fields {
            if !seen.insert(field.name.as_str()) {
                return Err(CoreError::InvalidSchema(format!(
                    "duplicate field name '{}' in form '{}'",
                    field.name, self.name
                )));
            }
        }

        for field in &self.fields {
            for rule in &field.rules {
                match &rule.kind {
                    RuleKind::EqualsField(other) => {
                        if !self.fields.iter().any(|f| &f.name == other) {
                            return Err(CoreError::InvalidSchema(format!(
                                "field '{}' references missing field '{}' in form '{}'",
                                field.name, other, self.name
                            )));
                        }
                    }
                    RuleKind::Pattern(source) => {
                        if Regex::new(source).is_err() {
                            return Err(CoreError::InvalidSchema(format!(
                                "field '{}' carries an invalid pattern '{}' in form '{}'",
                                field.name, source, self.name
                            )));
                        }
                    }
                    _ => {}
                }
            }
        }

        Ok(FormSchema {
            name: self.name,
            fields: self.fields,
        })
    }
}
