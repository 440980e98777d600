use std::collections::{BTreeMap, HashSet};

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::field::{Constraints, FieldKind, FieldSpec};
use crate::locale::{resolve_optional, LocalizedText, DEFAULT_LOCALE};

/// Raw submitted values keyed by field name.
pub type SubmittedValues = BTreeMap<String, String>;

/// Localized error message per invalid field. Empty means the form is valid.
pub type ErrorMap = BTreeMap<String, String>;

/// Literal used when no submit label resolves at all.
const SUBMIT_KEY: &str = "submit";

/// Programming errors in a schema definition, reported at construction time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("field names must not be empty")]
    EmptyFieldName,
    #[error("duplicate field name `{0}`")]
    DuplicateField(String),
    #[error("select field `{0}` declares no options")]
    MissingOptions(String),
    #[error("submit label needs a non-empty `en` entry")]
    MissingSubmitLabel,
    #[error("field `{field}` has an invalid pattern: {message}")]
    InvalidPattern { field: String, message: String },
    #[error("field `{0}` declares minLength greater than maxLength")]
    InvalidLength(String),
    #[error("field `{0}` declares min greater than max")]
    InvalidRange(String),
}

/// Immutable, validated lead-capture form definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawFormSchema", rename_all = "camelCase")]
pub struct FormSchema {
    fields: Vec<FieldSpec>,
    submit_label: LocalizedText,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    title: Option<LocalizedText>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<LocalizedText>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawFormSchema {
    fields: Vec<FieldSpec>,
    submit_label: LocalizedText,
    #[serde(default)]
    title: Option<LocalizedText>,
    #[serde(default)]
    description: Option<LocalizedText>,
}

impl TryFrom<RawFormSchema> for FormSchema {
    type Error = SchemaError;

    fn try_from(raw: RawFormSchema) -> Result<Self, Self::Error> {
        let mut schema = FormSchema::new(raw.fields, raw.submit_label)?;
        schema.title = raw.title;
        schema.description = raw.description;
        Ok(schema)
    }
}

impl FormSchema {
    pub fn new(fields: Vec<FieldSpec>, submit_label: LocalizedText) -> Result<Self, SchemaError> {
        if submit_label.get(DEFAULT_LOCALE).is_none() {
            return Err(SchemaError::MissingSubmitLabel);
        }
        let mut seen = HashSet::new();
        for field in &fields {
            check_field(field)?;
            if !seen.insert(field.name.as_str()) {
                return Err(SchemaError::DuplicateField(field.name.clone()));
            }
        }
        Ok(Self {
            fields,
            submit_label,
            title: None,
            description: None,
        })
    }

    pub fn with_title(mut self, title: LocalizedText) -> Self {
        self.title = Some(title);
        self
    }

    pub fn with_description(mut self, description: LocalizedText) -> Self {
        self.description = Some(description);
        self
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn submit_label(&self) -> &LocalizedText {
        &self.submit_label
    }

    pub fn title(&self) -> Option<&LocalizedText> {
        self.title.as_ref()
    }

    pub fn description(&self) -> Option<&LocalizedText> {
        self.description.as_ref()
    }

    pub fn submit_label_for<'a>(&'a self, locale: &str, default_locale: &str) -> &'a str {
        self.submit_label.resolve(locale, default_locale, SUBMIT_KEY)
    }

    pub fn title_for<'a>(&'a self, locale: &str, default_locale: &str) -> &'a str {
        resolve_optional(self.title.as_ref(), locale, default_locale, "")
    }

    pub fn description_for<'a>(&'a self, locale: &str, default_locale: &str) -> &'a str {
        resolve_optional(self.description.as_ref(), locale, default_locale, "")
    }
}

fn check_field(field: &FieldSpec) -> Result<(), SchemaError> {
    if field.name.trim().is_empty() {
        return Err(SchemaError::EmptyFieldName);
    }
    if let FieldKind::Select { options } = &field.kind {
        if options.is_empty() {
            return Err(SchemaError::MissingOptions(field.name.clone()));
        }
    }
    if let Some(constraints) = &field.constraints {
        check_constraints(&field.name, constraints)?;
    }
    Ok(())
}

fn check_constraints(name: &str, constraints: &Constraints) -> Result<(), SchemaError> {
    if let (Some(min), Some(max)) = (constraints.min_length, constraints.max_length) {
        if min > max {
            return Err(SchemaError::InvalidLength(name.to_string()));
        }
    }
    if let (Some(min), Some(max)) = (constraints.min, constraints.max) {
        if min > max {
            return Err(SchemaError::InvalidRange(name.to_string()));
        }
    }
    if let Some(pattern) = &constraints.pattern {
        Regex::new(pattern).map_err(|err| SchemaError::InvalidPattern {
            field: name.to_string(),
            message: err.to_string(),
        })?;
    }
    Ok(())
}

/// Stock lead form: full name and email, in five locales.
pub fn default_lead_schema() -> FormSchema {
    let name = FieldSpec::text(
        "name",
        LocalizedText::from_iter([
            ("en", "Full Name"),
            ("es", "Nombre Completo"),
            ("fr", "Nom Complet"),
            ("de", "Vollständiger Name"),
            ("pt", "Nome Completo"),
        ]),
    )
    .with_placeholder(LocalizedText::from_iter([
        ("en", "John Doe"),
        ("es", "Juan Pérez"),
        ("fr", "Jean Dupont"),
        ("de", "Max Mustermann"),
        ("pt", "João Silva"),
    ]))
    .required()
    .with_constraints(Constraints::length(Some(2), Some(100)));

    let email = FieldSpec::email(
        "email",
        LocalizedText::from_iter([
            ("en", "Email Address"),
            ("es", "Correo Electrónico"),
            ("fr", "Adresse Email"),
            ("de", "E-Mail-Adresse"),
            ("pt", "Endereço de Email"),
        ]),
    )
    .with_placeholder(LocalizedText::from_iter([
        ("en", "you@example.com"),
        ("es", "tu@ejemplo.com"),
        ("fr", "vous@exemple.com"),
        ("de", "du@beispiel.de"),
        ("pt", "voce@exemplo.com"),
    ]))
    .required();

    let submit_label = LocalizedText::from_iter([
        ("en", "Watch Now"),
        ("es", "Ver Ahora"),
        ("fr", "Regarder Maintenant"),
        ("de", "Jetzt Ansehen"),
        ("pt", "Assistir Agora"),
    ]);

    FormSchema {
        fields: vec![name, email],
        submit_label,
        title: Some(LocalizedText::from_iter([
            ("en", "Get Instant Access"),
            ("es", "Obtén Acceso Instantáneo"),
            ("fr", "Accès Instantané"),
            ("de", "Sofortiger Zugang"),
            ("pt", "Acesso Instantâneo"),
        ])),
        description: Some(LocalizedText::from_iter([
            ("en", "Enter your details to watch the free training"),
            ("es", "Ingresa tus datos para ver el entrenamiento gratuito"),
            ("fr", "Entrez vos coordonnées pour voir la formation gratuite"),
            (
                "de",
                "Geben Sie Ihre Daten ein, um das kostenlose Training anzusehen",
            ),
            ("pt", "Digite seus dados para assistir ao treinamento gratuito"),
        ])),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::SelectOption;

    fn label(text: &str) -> LocalizedText {
        LocalizedText::new().with("en", text)
    }

    #[test]
    fn rejects_duplicate_field_names() {
        let err = FormSchema::new(
            vec![
                FieldSpec::text("name", label("Name")),
                FieldSpec::email("name", label("Email")),
            ],
            label("Send"),
        )
        .unwrap_err();
        assert_eq!(err, SchemaError::DuplicateField("name".into()));
    }

    #[test]
    fn rejects_select_without_options() {
        let err = FormSchema::new(
            vec![FieldSpec::select("plan", label("Plan"), Vec::new())],
            label("Send"),
        )
        .unwrap_err();
        assert_eq!(err, SchemaError::MissingOptions("plan".into()));
    }

    #[test]
    fn rejects_empty_submit_label() {
        let err = FormSchema::new(Vec::new(), LocalizedText::new().with("en", "")).unwrap_err();
        assert_eq!(err, SchemaError::MissingSubmitLabel);
    }

    #[test]
    fn rejects_invalid_pattern() {
        let field = FieldSpec::text("code", label("Code"))
            .with_constraints(Constraints::pattern("([a-z]"));
        let err = FormSchema::new(vec![field], label("Send")).unwrap_err();
        assert!(matches!(err, SchemaError::InvalidPattern { ref field, .. } if field == "code"));
    }

    #[test]
    fn rejects_inverted_bounds() {
        let field = FieldSpec::number("age", label("Age"))
            .with_constraints(Constraints::range(Some(30.0), Some(18.0)));
        assert_eq!(
            FormSchema::new(vec![field], label("Send")).unwrap_err(),
            SchemaError::InvalidRange("age".into())
        );

        let field = FieldSpec::text("bio", label("Bio"))
            .with_constraints(Constraints::length(Some(10), Some(2)));
        assert_eq!(
            FormSchema::new(vec![field], label("Send")).unwrap_err(),
            SchemaError::InvalidLength("bio".into())
        );
    }

    #[test]
    fn accepts_select_with_options() {
        let schema = FormSchema::new(
            vec![FieldSpec::select(
                "plan",
                label("Plan"),
                vec![SelectOption::new("basic", label("Basic"))],
            )],
            label("Send"),
        )
        .unwrap();
        assert_eq!(schema.field("plan").unwrap().options().len(), 1);
    }

    #[test]
    fn default_schema_resolves_all_shipped_locales() {
        let schema = default_lead_schema();
        for locale in ["en", "es", "fr", "de", "pt"] {
            assert_ne!(schema.submit_label_for(locale, "en"), SUBMIT_KEY);
            assert!(!schema.title_for(locale, "en").is_empty());
        }
        assert_eq!(schema.submit_label_for("it", "en"), "Watch Now");
        assert_eq!(schema.fields().len(), 2);
    }

    #[test]
    fn rejects_submit_label_without_english_entry() {
        let err = FormSchema::new(Vec::new(), LocalizedText::new().with("fr", "Envoyer")).unwrap_err();
        assert_eq!(err, SchemaError::MissingSubmitLabel);
    }

    #[test]
    fn submit_label_falls_back_to_raw_key() {
        let schema = FormSchema::new(Vec::new(), label("Send")).unwrap();
        assert_eq!(schema.submit_label_for("de", "es"), "submit");
    }
}
