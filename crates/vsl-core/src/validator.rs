//! Field and form validation.
//!
//! Rules run in a fixed order and the first failure wins: required, empty
//! optional short-circuit, built-in format by kind, then declared
//! constraints (`minLength`, `maxLength`, `pattern`, numeric `min`/`max`).

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use once_cell::sync::Lazy;
use regex::Regex;
use vsl_domain::{
    Constraints, ErrorMap, FieldKind, FieldSpec, FormSchema, SubmittedValues, DEFAULT_LOCALE,
};

use crate::messages::{message_table, MessageKey};

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex is valid"));

static TEL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9\s\-+()]{7,}$").expect("phone regex is valid"));

/// Anchored `pattern` constraints by source text. `None` marks a pattern that
/// does not compile.
static PATTERNS: Lazy<Mutex<HashMap<String, Option<Regex>>>> = Lazy::new(Default::default);

/// Locale-independent description of a failed rule.
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    pub key: MessageKey,
    pub params: Vec<(&'static str, String)>,
}

impl Violation {
    fn new(key: MessageKey) -> Self {
        Self {
            key,
            params: Vec::new(),
        }
    }

    fn with_param(mut self, name: &'static str, value: impl ToString) -> Self {
        self.params.push((name, value.to_string()));
        self
    }
}

/// Validator bound to a default locale used for label and template fallback.
#[derive(Debug, Clone)]
pub struct FormValidator {
    default_locale: String,
}

impl Default for FormValidator {
    fn default() -> Self {
        Self::new(DEFAULT_LOCALE)
    }
}

impl FormValidator {
    pub fn new(default_locale: impl Into<String>) -> Self {
        Self {
            default_locale: default_locale.into(),
        }
    }

    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }

    /// Returns the first rule `value` breaks, if any.
    pub fn check(&self, value: &str, field: &FieldSpec) -> Option<Violation> {
        if field.required && is_blank(value, &field.kind) {
            return Some(Violation::new(MessageKey::Required));
        }
        if value.is_empty() {
            return None;
        }

        match &field.kind {
            FieldKind::Email if !EMAIL_RE.is_match(value) => {
                return Some(Violation::new(MessageKey::Email));
            }
            FieldKind::Tel if !TEL_RE.is_match(value) => {
                return Some(Violation::new(MessageKey::Tel));
            }
            FieldKind::Text
            | FieldKind::Email
            | FieldKind::Tel
            | FieldKind::Number
            | FieldKind::Select { .. }
            | FieldKind::Checkbox => {}
        }

        let constraints = field.constraints.as_ref()?;
        check_constraints(value, field, constraints)
    }

    /// Localized error for `value`, or `None` when it is valid.
    pub fn validate_field(&self, value: &str, field: &FieldSpec, locale: &str) -> Option<String> {
        let violation = self.check(value, field)?;
        tracing::debug!(field = %field.name, rule = %violation.key, locale, "field failed validation");
        let label = field.label_for(locale, &self.default_locale);
        let messages = message_table(locale, &self.default_locale);
        Some(messages.render(violation.key, label, &violation.params))
    }

    /// Validates every schema field independently. Missing values count as
    /// empty strings.
    pub fn validate_form(
        &self,
        values: &SubmittedValues,
        schema: &FormSchema,
        locale: &str,
    ) -> ErrorMap {
        let errors: ErrorMap = schema
            .fields()
            .iter()
            .filter_map(|field| {
                let value = values.get(&field.name).map(String::as_str).unwrap_or("");
                self.validate_field(value, field, locale)
                    .map(|message| (field.name.clone(), message))
            })
            .collect();
        tracing::debug!(
            fields = schema.fields().len(),
            invalid = errors.len(),
            locale,
            "form validated"
        );
        errors
    }
}

/// Validates one field against the English default locale.
pub fn validate_field(value: &str, field: &FieldSpec, locale: &str) -> Option<String> {
    FormValidator::default().validate_field(value, field, locale)
}

/// Validates a whole form against the English default locale.
pub fn validate_form(values: &SubmittedValues, schema: &FormSchema, locale: &str) -> ErrorMap {
    FormValidator::default().validate_form(values, schema, locale)
}

fn is_blank(value: &str, kind: &FieldKind) -> bool {
    match kind {
        FieldKind::Checkbox => value != "true",
        FieldKind::Text
        | FieldKind::Email
        | FieldKind::Tel
        | FieldKind::Number
        | FieldKind::Select { .. } => value.trim().is_empty(),
    }
}

fn check_constraints(value: &str, field: &FieldSpec, constraints: &Constraints) -> Option<Violation> {
    let length = value.chars().count();

    if let Some(min_length) = constraints.min_length {
        if length < min_length {
            return Some(Violation::new(MessageKey::MinLength).with_param("min", min_length));
        }
    }

    if let Some(max_length) = constraints.max_length {
        if length > max_length {
            return Some(Violation::new(MessageKey::MaxLength).with_param("max", max_length));
        }
    }

    if let Some(pattern) = &constraints.pattern {
        if !matches_fully(pattern, value, &field.name) {
            return Some(Violation::new(MessageKey::Pattern));
        }
    }

    if matches!(field.kind, FieldKind::Number) {
        return check_range(value, constraints);
    }

    None
}

fn matches_fully(pattern: &str, value: &str, field: &str) -> bool {
    anchored(pattern, field).map_or(false, |re| re.is_match(value))
}

fn anchored(pattern: &str, field: &str) -> Option<Regex> {
    let mut cache = PATTERNS.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(compiled) = cache.get(pattern) {
        return compiled.clone();
    }
    let compiled = match Regex::new(&format!("^(?:{pattern})$")) {
        Ok(re) => Some(re),
        Err(err) => {
            tracing::warn!(field, error = %err, "pattern constraint does not compile");
            None
        }
    };
    cache.insert(pattern.to_string(), compiled.clone());
    compiled
}

// Unparseable input fails whichever bound is declared, `min` first.
fn check_range(value: &str, constraints: &Constraints) -> Option<Violation> {
    let parsed = value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|number| number.is_finite());

    if let Some(min) = constraints.min {
        if parsed.map_or(true, |number| number < min) {
            return Some(Violation::new(MessageKey::Min).with_param("min", min));
        }
    }

    if let Some(max) = constraints.max {
        if parsed.map_or(true, |number| number > max) {
            return Some(Violation::new(MessageKey::Max).with_param("max", max));
        }
    }

    None
}
