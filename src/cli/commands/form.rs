use std::fs;
use std::path::Path;

use vsl_core::{get_error_messages, FormValidator, SubmitOutcome};
use vsl_domain::SubmittedValues;

use crate::cli::context::{render_modal, CommandError, CommandResult, LoopControl, ShellContext};
use crate::cli::output;
use crate::cli::prompts::{fill_form, DialoguerPrompter, FillOutcome};
use crate::cli::registry::CommandEntry;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("show", "Render the lead form", "show", cmd_show),
        CommandEntry::new(
            "set",
            "Change a field value",
            "set <field> <value>",
            cmd_set,
        ),
        CommandEntry::new(
            "blur",
            "Leave a field and show its error, if any",
            "blur <field>",
            cmd_blur,
        ),
        CommandEntry::new(
            "fill",
            "Fill in the form field by field",
            "fill",
            cmd_fill,
        ),
        CommandEntry::new(
            "submit",
            "Validate the form and send the lead",
            "submit",
            cmd_submit,
        ),
        CommandEntry::new(
            "close",
            "Close the form and discard its values",
            "close",
            cmd_close,
        ),
        CommandEntry::new(
            "messages",
            "Print the error message table as JSON",
            "messages [locale]",
            cmd_messages,
        ),
        CommandEntry::new(
            "validate",
            "Validate a JSON object of field values against the form",
            "validate <values.json> [locale]",
            cmd_validate,
        ),
    ]
}

fn cmd_show(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    print_form(context);
    Ok(LoopControl::Continue)
}

fn cmd_set(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [name, value @ ..] = args else {
        return Err(CommandError::InvalidArguments(
            "usage: set <field> <value>".into(),
        ));
    };
    context.modal.change(name, value.join(" "))?;
    Ok(LoopControl::Continue)
}

fn cmd_blur(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(name) = args.first() else {
        return Err(CommandError::InvalidArguments("usage: blur <field>".into()));
    };
    match context.modal.blur(name)? {
        Some(message) => output::error(format!("{}: {}", name, message)),
        None => output::success(format!("{} ok", name)),
    }
    Ok(LoopControl::Continue)
}

fn cmd_fill(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    if !context.can_prompt() {
        return Err(CommandError::Message(
            "fill needs an interactive terminal; use `set` and `blur` in scripts".into(),
        ));
    }
    let mut prompter = DialoguerPrompter::new();
    match fill_form(&mut context.modal, &mut prompter)? {
        FillOutcome::Completed => cmd_submit(context, &[]),
        FillOutcome::Cancelled => {
            output::info("Form entry cancelled. Values so far are kept.");
            Ok(LoopControl::Continue)
        }
    }
}

fn cmd_submit(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    match context.modal.submit(&*context.sink)? {
        SubmitOutcome::Invalid(_) => {
            output::warning("Please fix the highlighted fields.");
            print_errors(context);
        }
        SubmitOutcome::Submitted(lead) => {
            context.gate.unlock();
            output::success(format!("Thanks! Lead {} saved.", lead.id));
            output::success(format!("Playing {}", context.config.video_url));
        }
        SubmitOutcome::Failed(err) => {
            output::error(format!("Could not save your details: {}", err));
            output::info("Your answers are kept; run `submit` again to retry.");
        }
    }
    Ok(LoopControl::Continue)
}

fn cmd_close(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.modal.close()?;
    context.gate.close_form();
    output::info("Form closed.");
    Ok(LoopControl::Continue)
}

fn cmd_messages(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let locale = args
        .first()
        .copied()
        .unwrap_or_else(|| context.modal.locale());
    let table = get_error_messages(locale);
    output::line(serde_json::to_string_pretty(&table.to_map())?);
    Ok(LoopControl::Continue)
}

fn cmd_validate(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(path) = args.first() else {
        return Err(CommandError::InvalidArguments(
            "usage: validate <values.json> [locale]".into(),
        ));
    };
    let values = read_values(Path::new(path))?;
    let locale = args.get(1).copied().unwrap_or_else(|| context.modal.locale());
    let validator = FormValidator::new(context.config.default_locale.clone());
    let errors = validator.validate_form(&values, context.modal.schema(), locale);

    if errors.is_empty() {
        output::success("All fields are valid.");
    } else {
        output::warning(format!("{} field(s) failed validation.", errors.len()));
    }
    output::line(serde_json::to_string_pretty(&errors)?);
    Ok(LoopControl::Continue)
}

fn read_values(path: &Path) -> Result<SubmittedValues, CommandError> {
    let data = fs::read_to_string(path)?;
    serde_json::from_str(&data).map_err(|err| {
        CommandError::Message(format!(
            "{} must be a JSON object of string values: {}",
            path.display(),
            err
        ))
    })
}

fn print_form(context: &ShellContext) {
    for line in render_modal(context.modal()) {
        output::line(line);
    }
}

fn print_errors(context: &ShellContext) {
    for view in context.modal().field_views() {
        if let Some(error) = view.error {
            output::error(format!("{}: {}", view.spec.name, error));
        }
    }
}
