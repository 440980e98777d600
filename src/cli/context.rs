use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use rustyline::error::ReadlineError;
use vsl_config::{Config, ConfigError, ConfigManager};
use vsl_core::{FormModal, FormValidator, GatedMedia, LeadSink, ModalError};
use vsl_domain::{default_lead_schema, FieldKind, FormSchema};
use vsl_storage_json::{load_schema, JsonLeadSink, StorageError};

use crate::cli::commands;
use crate::cli::output;
use crate::cli::registry::CommandRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<LoopControl, CommandError>;

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
    #[error(transparent)]
    Modal(#[from] ModalError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Command(#[from] CommandError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Readline(#[from] ReadlineError),
}

/// Everything one shell session works on: settings, the form schema, the
/// modal session, the playback gate and the lead sink.
pub struct ShellContext {
    pub mode: CliMode,
    pub running: bool,
    pub(crate) registry: CommandRegistry,
    pub(crate) config_manager: ConfigManager,
    pub(crate) config: Config,
    pub(crate) modal: FormModal,
    pub(crate) gate: GatedMedia,
    pub(crate) sink: Box<dyn LeadSink>,
    lead_store: PathBuf,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let manager = ConfigManager::from_env()?;
        Self::with_manager(mode, manager)
    }

    pub fn with_manager(mode: CliMode, config_manager: ConfigManager) -> Result<Self, CliError> {
        let config = config_manager.load()?;
        let schema = Arc::new(resolve_schema(&config)?);
        let lead_store = config.resolve_lead_store(config_manager.base_dir());
        let sink = JsonLeadSink::new(lead_store.clone())?;

        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);

        tracing::debug!(
            locale = %config.locale,
            fields = schema.fields().len(),
            store = %lead_store.display(),
            "shell session ready"
        );

        Ok(Self {
            mode,
            running: true,
            registry,
            modal: new_modal(schema, &config),
            gate: GatedMedia::new(config.require_form),
            sink: Box::new(sink),
            config_manager,
            config,
            lead_store,
        })
    }

    /// Swaps the lead sink, e.g. for an in-memory one in tests.
    pub fn with_sink(mut self, sink: Box<dyn LeadSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn modal(&self) -> &FormModal {
        &self.modal
    }

    pub fn gate(&self) -> &GatedMedia {
        &self.gate
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn lead_store(&self) -> &PathBuf {
        &self.lead_store
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub fn prompt(&self) -> String {
        let gate = if self.gate.is_unlocked() {
            "unlocked"
        } else {
            "locked"
        };
        format!("vsl[{}|{}]> ", self.modal.locale(), gate)
    }

    pub fn dispatch(&mut self, command: &str, args: &[&str]) -> CommandResult {
        let Some(entry) = self.registry.get(command) else {
            self.suggest_command(command);
            return Ok(LoopControl::Continue);
        };
        let handler = entry.handler;
        handler(self, args)
    }

    pub fn report_error(&self, err: CommandError) {
        tracing::debug!(error = %err, "command failed");
        output::error(err);
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        output::warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));
        if let Some(best) = self.registry.suggest(input) {
            output::info(format!("Suggestion: `{}`?", best));
        }
    }

    /// Reloads the schema and default locale into the modal after those
    /// settings change. In-progress values are discarded; a form that was
    /// already submitted stays unlocked.
    pub(crate) fn reload_form(&mut self) -> Result<(), CommandError> {
        let schema = Arc::new(resolve_schema(&self.config)?);
        let validator = FormValidator::new(self.config.default_locale.clone());
        self.modal.replace_schema(schema, validator)?;
        Ok(())
    }

    /// Points the JSON lead sink at the configured store.
    pub(crate) fn reload_sink(&mut self) -> Result<(), CommandError> {
        let lead_store = self
            .config
            .resolve_lead_store(self.config_manager.base_dir());
        self.sink = Box::new(JsonLeadSink::new(lead_store.clone())?);
        self.lead_store = lead_store;
        Ok(())
    }

    /// Re-applies `require_form` unless the gate already opened.
    pub(crate) fn reload_gate(&mut self) {
        if !self.gate.is_unlocked() {
            self.gate = GatedMedia::new(self.config.require_form);
        }
    }

    pub(crate) fn can_prompt(&self) -> bool {
        self.mode == CliMode::Interactive
    }

    pub(crate) fn persist_config(&self) -> Result<(), CommandError> {
        self.config_manager
            .save(&self.config)
            .map_err(CommandError::from)
    }
}

fn new_modal(schema: Arc<FormSchema>, config: &Config) -> FormModal {
    FormModal::new(
        schema,
        FormValidator::new(config.default_locale.clone()),
        config.locale.clone(),
    )
}

fn resolve_schema(config: &Config) -> Result<FormSchema, StorageError> {
    match &config.schema_path {
        Some(path) => load_schema(path),
        None => Ok(default_lead_schema()),
    }
}

/// Plain-text rendering of the modal for the active locale.
pub fn render_modal(modal: &FormModal) -> Vec<String> {
    let mut lines = Vec::new();
    if !modal.title().is_empty() {
        lines.push(modal.title().to_string());
    }
    if !modal.description().is_empty() {
        lines.push(modal.description().to_string());
    }
    for view in modal.field_views() {
        let marker = if view.spec.required { " *" } else { "" };
        let value = match &view.spec.kind {
            FieldKind::Checkbox => {
                let mark = if view.value == "true" { "x" } else { " " };
                format!("[{mark}]")
            }
            FieldKind::Select { .. } => {
                if view.value.is_empty() {
                    format!("<{}>", view.placeholder)
                } else {
                    modal.option_label(view.spec, view.value).to_string()
                }
            }
            FieldKind::Text | FieldKind::Email | FieldKind::Tel | FieldKind::Number => {
                if view.value.is_empty() {
                    format!("<{}>", view.placeholder)
                } else {
                    view.value.to_string()
                }
            }
        };
        lines.push(format!("  {}{}: {}", view.label, marker, value));
        if let Some(error) = view.error {
            lines.push(format!("    ! {}", error));
        }
    }
    lines.push(format!("  [ {} ]", modal.submit_label()));
    lines
}
