//! Field-by-field form entry.
//!
//! [`fill_form`] walks the schema in order and re-asks a field until it
//! passes validation. Terminal access sits behind [`FieldPrompter`] so the
//! walk can be driven by scripted answers in tests.

use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};
use vsl_core::FormModal;
use vsl_domain::{FieldKind, FieldSpec};

use crate::cli::context::CommandError;
use crate::cli::output;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptResponse {
    Value(String),
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillOutcome {
    Completed,
    Cancelled,
}

/// Everything a prompter needs to ask for one field in the active locale.
pub struct PromptContext<'a> {
    pub spec: &'a FieldSpec,
    pub label: &'a str,
    pub placeholder: &'a str,
    pub current: &'a str,
    pub error: Option<&'a str>,
    /// `(value, localized label)` pairs for select fields.
    pub options: Vec<(&'a str, &'a str)>,
}

pub trait FieldPrompter {
    fn prompt_field(&mut self, context: &PromptContext<'_>)
        -> Result<PromptResponse, CommandError>;
}

pub struct DialoguerPrompter {
    theme: ColorfulTheme,
}

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Default for DialoguerPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldPrompter for DialoguerPrompter {
    fn prompt_field(
        &mut self,
        context: &PromptContext<'_>,
    ) -> Result<PromptResponse, CommandError> {
        if let Some(error) = context.error {
            output::error(error);
        }

        match &context.spec.kind {
            FieldKind::Checkbox => {
                let answer = Confirm::with_theme(&self.theme)
                    .with_prompt(context.label)
                    .default(context.current == "true")
                    .interact_opt()?;
                Ok(match answer {
                    Some(checked) => PromptResponse::Value(checkbox_value(checked).into()),
                    None => PromptResponse::Cancel,
                })
            }
            FieldKind::Select { .. } => {
                let labels: Vec<&str> = context.options.iter().map(|(_, label)| *label).collect();
                let current = context
                    .options
                    .iter()
                    .position(|(value, _)| *value == context.current)
                    .unwrap_or(0);
                let choice = Select::with_theme(&self.theme)
                    .with_prompt(context.label)
                    .items(&labels)
                    .default(current)
                    .interact_opt()?;
                Ok(match choice.and_then(|index| context.options.get(index)) {
                    Some((value, _)) => PromptResponse::Value((*value).to_string()),
                    None => PromptResponse::Cancel,
                })
            }
            FieldKind::Text | FieldKind::Email | FieldKind::Tel | FieldKind::Number => {
                let prompt = if context.placeholder.is_empty() {
                    context.label.to_string()
                } else {
                    format!("{} ({})", context.label, context.placeholder)
                };
                let value = Input::<String>::with_theme(&self.theme)
                    .with_prompt(prompt)
                    .with_initial_text(context.current)
                    .allow_empty(true)
                    .interact_text()?;
                Ok(PromptResponse::Value(value))
            }
        }
    }
}

/// An unchecked box submits nothing, so it reads as an empty value.
fn checkbox_value(checked: bool) -> &'static str {
    if checked {
        "true"
    } else {
        ""
    }
}

/// Prompts every field in schema order, blurring each answer so errors
/// surface right away. Stops early when the prompter cancels.
pub fn fill_form<P>(modal: &mut FormModal, prompter: &mut P) -> Result<FillOutcome, CommandError>
where
    P: FieldPrompter + ?Sized,
{
    let count = modal.schema().fields().len();
    for index in 0..count {
        loop {
            let (name, response) = {
                let views = modal.field_views();
                let Some(view) = views.get(index) else {
                    break;
                };
                let options = view
                    .spec
                    .options()
                    .iter()
                    .map(|option| {
                        (
                            option.value.as_str(),
                            modal.option_label(view.spec, &option.value),
                        )
                    })
                    .collect();
                let context = PromptContext {
                    spec: view.spec,
                    label: view.label,
                    placeholder: view.placeholder,
                    current: view.value,
                    error: view.error,
                    options,
                };
                (view.spec.name.clone(), prompter.prompt_field(&context)?)
            };

            match response {
                PromptResponse::Cancel => return Ok(FillOutcome::Cancelled),
                PromptResponse::Value(value) => {
                    modal.change(&name, value)?;
                    if modal.blur(&name)?.is_none() {
                        break;
                    }
                }
            }
        }
    }
    Ok(FillOutcome::Completed)
}
