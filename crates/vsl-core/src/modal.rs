//! Lead-capture modal controller.
//!
//! Owns the transient session (`values`, `errors`, `touched`) and moves
//! between [`ModalState`]s only through the transition methods below. Values
//! never outlive the session: they are dropped on close and after a
//! successful submission.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use vsl_domain::{ErrorMap, FieldSpec, FormSchema, Lead, LeadInput, SubmittedValues};

use crate::error::{ModalError, SinkError};
use crate::sink::LeadSink;
use crate::validator::FormValidator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalState {
    /// Collecting input.
    Idle,
    /// A submit attempt is running the form validator.
    Validating,
    /// Values passed validation and were handed to the lead sink.
    Submitting,
    /// The lead was stored; gated content may play.
    Unlocked,
    /// The lead sink failed; values are kept for a retry.
    Failed,
}

impl fmt::Display for ModalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ModalState::Idle => "idle",
            ModalState::Validating => "validating",
            ModalState::Submitting => "submitting",
            ModalState::Unlocked => "unlocked",
            ModalState::Failed => "failed",
        };
        f.write_str(label)
    }
}

/// Result of [`FormModal::begin_submit`].
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitAttempt {
    Invalid(ErrorMap),
    Ready(SubmittedValues),
}

/// Result of a full [`FormModal::submit`] round trip.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Invalid(ErrorMap),
    Submitted(Lead),
    Failed(SinkError),
}

/// Resolved, render-ready view of one field.
#[derive(Debug)]
pub struct FieldView<'a> {
    pub spec: &'a FieldSpec,
    pub label: &'a str,
    pub placeholder: &'a str,
    pub value: &'a str,
    pub error: Option<&'a str>,
}

pub struct FormModal {
    schema: Arc<FormSchema>,
    validator: FormValidator,
    locale: String,
    values: SubmittedValues,
    errors: ErrorMap,
    touched: BTreeSet<String>,
    state: ModalState,
    last_failure: Option<SinkError>,
}

impl FormModal {
    pub fn new(schema: Arc<FormSchema>, validator: FormValidator, locale: impl Into<String>) -> Self {
        Self {
            schema,
            validator,
            locale: locale.into(),
            values: SubmittedValues::new(),
            errors: ErrorMap::new(),
            touched: BTreeSet::new(),
            state: ModalState::Idle,
            last_failure: None,
        }
    }

    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    pub fn state(&self) -> ModalState {
        self.state
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn values(&self) -> &SubmittedValues {
        &self.values
    }

    pub fn value(&self, name: &str) -> &str {
        self.values.get(name).map(String::as_str).unwrap_or("")
    }

    pub fn errors(&self) -> &ErrorMap {
        &self.errors
    }

    pub fn is_touched(&self, name: &str) -> bool {
        self.touched.contains(name)
    }

    pub fn last_failure(&self) -> Option<&SinkError> {
        self.last_failure.as_ref()
    }

    /// Error shown next to a field; untouched fields stay quiet.
    pub fn visible_error(&self, name: &str) -> Option<&str> {
        if self.is_touched(name) {
            self.errors.get(name).map(String::as_str)
        } else {
            None
        }
    }

    /// Switches locale and re-renders any recorded errors in it.
    pub fn set_locale(&mut self, locale: impl Into<String>) {
        self.locale = locale.into();
        let names: Vec<String> = self.errors.keys().cloned().collect();
        for name in names {
            let Some(field) = self.schema.field(&name) else {
                continue;
            };
            match self
                .validator
                .validate_field(self.value(&name), field, &self.locale)
            {
                Some(message) => {
                    self.errors.insert(name, message);
                }
                None => {
                    self.errors.remove(&name);
                }
            }
        }
    }

    /// On-change: stores the value and clears the field's error.
    pub fn change(&mut self, name: &str, value: impl Into<String>) -> Result<(), ModalError> {
        self.ensure_editable()?;
        self.ensure_field(name)?;
        self.values.insert(name.to_string(), value.into());
        self.errors.remove(name);
        if self.state == ModalState::Failed {
            self.state = ModalState::Idle;
        }
        Ok(())
    }

    /// On-blur: marks the field touched and validates it alone.
    pub fn blur(&mut self, name: &str) -> Result<Option<&str>, ModalError> {
        self.ensure_editable()?;
        let field = self.ensure_field(name)?;
        let error = self
            .validator
            .validate_field(self.value(name), field, &self.locale);
        self.touched.insert(name.to_string());
        match error {
            Some(message) => {
                self.errors.insert(name.to_string(), message);
            }
            None => {
                self.errors.remove(name);
            }
        }
        Ok(self.errors.get(name).map(String::as_str))
    }

    /// On-submit-attempt: validates the whole form.
    ///
    /// Invalid forms return to [`ModalState::Idle`] with every field touched so
    /// all errors show. Valid forms enter [`ModalState::Submitting`] and yield
    /// the values to hand to the sink.
    pub fn begin_submit(&mut self) -> Result<SubmitAttempt, ModalError> {
        self.ensure_editable()?;
        self.state = ModalState::Validating;
        let errors = self
            .validator
            .validate_form(&self.values, &self.schema, &self.locale);

        if !errors.is_empty() {
            self.touched = self
                .schema
                .fields()
                .iter()
                .map(|field| field.name.clone())
                .collect();
            self.errors = errors.clone();
            self.state = ModalState::Idle;
            tracing::debug!(invalid = errors.len(), "submit blocked by validation");
            return Ok(SubmitAttempt::Invalid(errors));
        }

        self.errors.clear();
        self.state = ModalState::Submitting;
        tracing::debug!("submit validated, awaiting lead sink");
        Ok(SubmitAttempt::Ready(self.values.clone()))
    }

    /// On-submit-success: unlocks and discards the session values.
    pub fn submit_succeeded(&mut self, lead: &Lead) -> Result<(), ModalError> {
        self.ensure_submitting()?;
        self.values.clear();
        self.errors.clear();
        self.touched.clear();
        self.last_failure = None;
        self.state = ModalState::Unlocked;
        tracing::info!(lead_id = %lead.id, "lead submitted, content unlocked");
        Ok(())
    }

    /// On-submit-failure: keeps values so the visitor can retry.
    pub fn submit_failed(&mut self, error: SinkError) -> Result<(), ModalError> {
        self.ensure_submitting()?;
        tracing::warn!(error = %error, "lead submission failed");
        self.last_failure = Some(error);
        self.state = ModalState::Failed;
        Ok(())
    }

    /// Runs a submit attempt against `sink` end to end.
    pub fn submit<S: LeadSink + ?Sized>(&mut self, sink: &S) -> Result<SubmitOutcome, ModalError> {
        let values = match self.begin_submit()? {
            SubmitAttempt::Invalid(errors) => return Ok(SubmitOutcome::Invalid(errors)),
            SubmitAttempt::Ready(values) => values,
        };

        match sink.submit_lead(&LeadInput::from_values(&values)) {
            Ok(lead) => {
                self.submit_succeeded(&lead)?;
                Ok(SubmitOutcome::Submitted(lead))
            }
            Err(err) => {
                self.submit_failed(err.clone())?;
                Ok(SubmitOutcome::Failed(err))
            }
        }
    }

    /// Drops the session. An unlocked modal stays unlocked.
    pub fn close(&mut self) -> Result<(), ModalError> {
        if matches!(self.state, ModalState::Submitting | ModalState::Validating) {
            return Err(ModalError::SubmissionInProgress);
        }
        self.values.clear();
        self.errors.clear();
        self.touched.clear();
        self.last_failure = None;
        if self.state != ModalState::Unlocked {
            self.state = ModalState::Idle;
        }
        Ok(())
    }

    /// Swaps in a new schema and validator, dropping the session the way
    /// [`close`](Self::close) does. An unlocked modal stays unlocked.
    pub fn replace_schema(
        &mut self,
        schema: Arc<FormSchema>,
        validator: FormValidator,
    ) -> Result<(), ModalError> {
        self.close()?;
        self.schema = schema;
        self.validator = validator;
        tracing::debug!(fields = self.schema.fields().len(), "form schema replaced");
        Ok(())
    }

    pub fn title(&self) -> &str {
        self.schema
            .title_for(&self.locale, self.validator.default_locale())
    }

    pub fn description(&self) -> &str {
        self.schema
            .description_for(&self.locale, self.validator.default_locale())
    }

    pub fn submit_label(&self) -> &str {
        self.schema
            .submit_label_for(&self.locale, self.validator.default_locale())
    }

    /// Fields in schema order, resolved for the active locale.
    pub fn field_views(&self) -> Vec<FieldView<'_>> {
        let default_locale = self.validator.default_locale();
        self.schema
            .fields()
            .iter()
            .map(|spec| FieldView {
                spec,
                label: spec.label_for(&self.locale, default_locale),
                placeholder: spec.placeholder_for(&self.locale, default_locale),
                value: self.value(&spec.name),
                error: self.visible_error(&spec.name),
            })
            .collect()
    }

    /// Resolves a select value to its localized option label.
    pub fn option_label<'a>(&'a self, field: &'a FieldSpec, value: &'a str) -> &'a str {
        field
            .options()
            .iter()
            .find(|option| option.value == value)
            .map(|option| option.label_for(&self.locale, self.validator.default_locale()))
            .unwrap_or(value)
    }

    fn ensure_field(&self, name: &str) -> Result<&FieldSpec, ModalError> {
        self.schema
            .field(name)
            .ok_or_else(|| ModalError::UnknownField(name.to_string()))
    }

    fn ensure_editable(&self) -> Result<(), ModalError> {
        match self.state {
            ModalState::Submitting | ModalState::Validating => {
                Err(ModalError::SubmissionInProgress)
            }
            ModalState::Unlocked => Err(ModalError::AlreadyUnlocked),
            ModalState::Idle | ModalState::Failed => Ok(()),
        }
    }

    fn ensure_submitting(&self) -> Result<(), ModalError> {
        if self.state == ModalState::Submitting {
            Ok(())
        } else {
            Err(ModalError::NotSubmitting)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::MemoryLeadSink;
    use vsl_domain::default_lead_schema;

    fn modal(locale: &str) -> FormModal {
        FormModal::new(
            Arc::new(default_lead_schema()),
            FormValidator::default(),
            locale,
        )
    }

    fn fill_valid(modal: &mut FormModal) {
        modal.change("name", "Ana Souza").unwrap();
        modal.change("email", "ana@example.com").unwrap();
    }

    #[test]
    fn blur_records_error_and_change_clears_it() {
        let mut modal = modal("en");
        modal.change("email", "ana@").unwrap();
        assert_eq!(
            modal.blur("email").unwrap(),
            Some("Please enter a valid email address")
        );
        assert!(modal.visible_error("email").is_some());

        modal.change("email", "ana@example.com").unwrap();
        assert_eq!(modal.visible_error("email"), None);
        assert_eq!(modal.blur("email").unwrap(), None);
    }

    #[test]
    fn errors_stay_hidden_until_touched() {
        let mut modal = modal("en");
        modal.change("name", "A").unwrap();
        assert_eq!(modal.visible_error("name"), None);
        modal.blur("name").unwrap();
        assert_eq!(
            modal.visible_error("name"),
            Some("Full Name must be at least 2 characters")
        );
    }

    #[test]
    fn invalid_submit_touches_every_field() {
        let mut modal = modal("pt");
        let attempt = modal.begin_submit().unwrap();
        let SubmitAttempt::Invalid(errors) = attempt else {
            panic!("expected validation errors");
        };
        assert_eq!(errors.len(), 2);
        assert_eq!(modal.state(), ModalState::Idle);
        assert_eq!(
            modal.visible_error("email"),
            Some("Endereço de Email é obrigatório")
        );
    }

    #[test]
    fn successful_submit_unlocks_and_discards_values() {
        let sink = MemoryLeadSink::new();
        let mut modal = modal("en");
        fill_valid(&mut modal);

        let outcome = modal.submit(&sink).unwrap();
        assert!(matches!(outcome, SubmitOutcome::Submitted(_)));
        assert_eq!(modal.state(), ModalState::Unlocked);
        assert!(modal.values().is_empty());
        assert_eq!(sink.leads()[0].name.as_deref(), Some("Ana Souza"));
        assert_eq!(
            modal.change("name", "again"),
            Err(ModalError::AlreadyUnlocked)
        );
    }

    #[test]
    fn failed_submit_keeps_values_for_retry() {
        let sink = MemoryLeadSink::new();
        sink.fail_next(1);
        let mut modal = modal("en");
        fill_valid(&mut modal);

        let outcome = modal.submit(&sink).unwrap();
        assert!(matches!(outcome, SubmitOutcome::Failed(SinkError::Unavailable(_))));
        assert_eq!(modal.state(), ModalState::Failed);
        assert_eq!(modal.value("email"), "ana@example.com");
        assert!(modal.last_failure().is_some());

        let retry = modal.submit(&sink).unwrap();
        assert!(matches!(retry, SubmitOutcome::Submitted(_)));
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn transitions_are_guarded_while_submitting() {
        let mut modal = modal("en");
        fill_valid(&mut modal);
        assert!(matches!(
            modal.begin_submit().unwrap(),
            SubmitAttempt::Ready(_)
        ));
        assert_eq!(modal.state(), ModalState::Submitting);
        assert_eq!(
            modal.change("name", "x"),
            Err(ModalError::SubmissionInProgress)
        );
        assert_eq!(modal.close(), Err(ModalError::SubmissionInProgress));

        modal
            .submit_failed(SinkError::Rejected("duplicate".into()))
            .unwrap();
        assert_eq!(
            modal.submit_failed(SinkError::Rejected("again".into())),
            Err(ModalError::NotSubmitting)
        );
    }

    #[test]
    fn close_discards_session() {
        let mut modal = modal("en");
        fill_valid(&mut modal);
        modal.blur("name").unwrap();
        modal.close().unwrap();
        assert!(modal.values().is_empty());
        assert!(!modal.is_touched("name"));
        assert_eq!(modal.state(), ModalState::Idle);
    }

    #[test]
    fn replacing_schema_keeps_unlocked_modal_unlocked() {
        let sink = MemoryLeadSink::new();
        let mut modal = modal("en");
        fill_valid(&mut modal);
        modal.submit(&sink).unwrap();

        modal
            .replace_schema(Arc::new(default_lead_schema()), FormValidator::new("es"))
            .unwrap();

        assert_eq!(modal.state(), ModalState::Unlocked);
        assert_eq!(modal.begin_submit(), Err(ModalError::AlreadyUnlocked));
    }

    #[test]
    fn replacing_schema_resets_a_failed_session() {
        let sink = MemoryLeadSink::new();
        sink.fail_next(1);
        let mut modal = modal("en");
        fill_valid(&mut modal);
        modal.submit(&sink).unwrap();
        assert_eq!(modal.state(), ModalState::Failed);

        modal
            .replace_schema(Arc::new(default_lead_schema()), FormValidator::default())
            .unwrap();

        assert_eq!(modal.state(), ModalState::Idle);
        assert!(modal.values().is_empty());
        assert!(modal.last_failure().is_none());
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let mut modal = modal("en");
        assert_eq!(
            modal.change("age", "12"),
            Err(ModalError::UnknownField("age".into()))
        );
    }

    #[test]
    fn locale_switch_rerenders_errors() {
        let mut modal = modal("en");
        modal.blur("name").unwrap();
        assert_eq!(modal.visible_error("name"), Some("Full Name is required"));
        modal.set_locale("es");
        assert_eq!(
            modal.visible_error("name"),
            Some("Nombre Completo es obligatorio")
        );
    }

    #[test]
    fn views_resolve_localized_copy() {
        let modal = modal("de");
        assert_eq!(modal.title(), "Sofortiger Zugang");
        assert_eq!(modal.submit_label(), "Jetzt Ansehen");
        let views = modal.field_views();
        assert_eq!(views[0].label, "Vollständiger Name");
        assert_eq!(views[1].placeholder, "du@beispiel.de");
    }
}
