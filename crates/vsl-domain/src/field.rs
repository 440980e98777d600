use serde::{Deserialize, Serialize};

use crate::locale::{resolve_optional, LocalizedText};

/// Supported input kinds. Select options travel with the variant so a select
/// field can never be declared without its choices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Email,
    Tel,
    Number,
    Select { options: Vec<SelectOption> },
    Checkbox,
}

impl FieldKind {
    /// Wire name of the kind, as used in schema documents.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Email => "email",
            FieldKind::Tel => "tel",
            FieldKind::Number => "number",
            FieldKind::Select { .. } => "select",
            FieldKind::Checkbox => "checkbox",
        }
    }
}

/// One entry of a select field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub label: LocalizedText,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: LocalizedText) -> Self {
        Self {
            value: value.into(),
            label,
        }
    }

    pub fn label_for<'a>(&'a self, locale: &str, default_locale: &str) -> &'a str {
        self.label.resolve(locale, default_locale, &self.value)
    }
}

/// Declared limits checked after the built-in format check.
///
/// Length bounds are inclusive and count characters. `min`/`max` only apply
/// to [`FieldKind::Number`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Constraints {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl Constraints {
    pub fn length(min_length: Option<usize>, max_length: Option<usize>) -> Self {
        Self {
            min_length,
            max_length,
            ..Self::default()
        }
    }

    pub fn range(min: Option<f64>, max: Option<f64>) -> Self {
        Self {
            min,
            max,
            ..Self::default()
        }
    }

    pub fn pattern(pattern: impl Into<String>) -> Self {
        Self {
            pattern: Some(pattern.into()),
            ..Self::default()
        }
    }
}

/// Declarative description of a single form field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    #[serde(flatten)]
    pub kind: FieldKind,
    pub label: LocalizedText,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<LocalizedText>,
    #[serde(default)]
    pub required: bool,
    #[serde(default, rename = "validation", skip_serializing_if = "Option::is_none")]
    pub constraints: Option<Constraints>,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, kind: FieldKind, label: LocalizedText) -> Self {
        Self {
            name: name.into(),
            kind,
            label,
            placeholder: None,
            required: false,
            constraints: None,
        }
    }

    pub fn text(name: impl Into<String>, label: LocalizedText) -> Self {
        Self::new(name, FieldKind::Text, label)
    }

    pub fn email(name: impl Into<String>, label: LocalizedText) -> Self {
        Self::new(name, FieldKind::Email, label)
    }

    pub fn tel(name: impl Into<String>, label: LocalizedText) -> Self {
        Self::new(name, FieldKind::Tel, label)
    }

    pub fn number(name: impl Into<String>, label: LocalizedText) -> Self {
        Self::new(name, FieldKind::Number, label)
    }

    pub fn select(
        name: impl Into<String>,
        label: LocalizedText,
        options: Vec<SelectOption>,
    ) -> Self {
        Self::new(name, FieldKind::Select { options }, label)
    }

    pub fn checkbox(name: impl Into<String>, label: LocalizedText) -> Self {
        Self::new(name, FieldKind::Checkbox, label)
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_placeholder(mut self, placeholder: LocalizedText) -> Self {
        self.placeholder = Some(placeholder);
        self
    }

    pub fn with_constraints(mut self, constraints: Constraints) -> Self {
        self.constraints = Some(constraints);
        self
    }

    /// Display label, falling back to the field name.
    pub fn label_for<'a>(&'a self, locale: &str, default_locale: &str) -> &'a str {
        self.label.resolve(locale, default_locale, &self.name)
    }

    /// Placeholder text, or an empty string when none is declared.
    pub fn placeholder_for<'a>(&'a self, locale: &str, default_locale: &str) -> &'a str {
        resolve_optional(self.placeholder.as_ref(), locale, default_locale, "")
    }

    pub fn options(&self) -> &[SelectOption] {
        match &self.kind {
            FieldKind::Select { options } => options,
            _ => &[],
        }
    }
}
