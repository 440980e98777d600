use vsl_config::Config;
use vsl_core::supported_locales;

use crate::cli::context::{CommandError, CommandResult, LoopControl, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "status",
            "Show locale, form state and playback gate",
            "status",
            cmd_status,
        ),
        CommandEntry::new(
            "locale",
            "Show or switch the visitor locale",
            "locale [code]",
            cmd_locale,
        ),
        CommandEntry::new(
            "config",
            "View and change saved settings",
            "config [key [value]]",
            cmd_config,
        ),
    ]
}

fn cmd_status(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let modal = context.modal();
    let gate = context.gate();
    output::section("Status");
    output::line(format!("  Locale      : {}", modal.locale()));
    output::line(format!("  Default     : {}", context.config.default_locale));
    output::line(format!("  Form        : {}", modal.state()));
    output::line(format!(
        "  Gate        : {}",
        if gate.is_unlocked() { "unlocked" } else { "locked" }
    ));
    output::line(format!(
        "  Playback    : {}{}",
        if gate.is_playing() { "playing" } else { "stopped" },
        if gate.is_muted() { " (muted)" } else { "" }
    ));
    output::line(format!("  Lead store  : {}", context.lead_store().display()));
    if let Some(failure) = modal.last_failure() {
        output::warning(format!("Last submission failed: {}", failure));
    }
    Ok(LoopControl::Continue)
}

fn cmd_locale(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(code) = args.first() else {
        output::info(format!("Current locale: {}", context.modal().locale()));
        let known: Vec<&str> = supported_locales().collect();
        output::info(format!("Bundled message locales: {}", known.join(", ")));
        return Ok(LoopControl::Continue);
    };

    update_setting(context, "locale", code)?;
    output::success(format!("Locale set to {}.", context.config.locale));
    Ok(LoopControl::Continue)
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] => {
            output::section("Settings");
            for key in Config::KEYS {
                let value = context.config.get(key)?;
                output::line(format!(
                    "  {:<15} {}",
                    key,
                    value.as_deref().unwrap_or("(unset)")
                ));
            }
            output::info(format!(
                "Stored at {}",
                context.config_manager.config_path().display()
            ));
            Ok(LoopControl::Continue)
        }
        [key] => {
            let value = context.config.get(key)?;
            output::line(value.as_deref().unwrap_or("(unset)"));
            Ok(LoopControl::Continue)
        }
        [key, value @ ..] => {
            update_setting(context, key, &value.join(" "))?;
            output::success(format!("Updated `{}`.", key));
            Ok(LoopControl::Continue)
        }
    }
}

/// Changes one setting, applies it to the live session, then saves. A
/// failure at either step restores the previous settings.
fn update_setting(context: &mut ShellContext, key: &str, value: &str) -> Result<(), CommandError> {
    let previous = context.config.clone();
    context.config.set(key, value)?;
    if let Err(err) = apply_setting(context, key) {
        context.config = previous;
        return Err(err);
    }
    if let Err(err) = context.persist_config() {
        context.config = previous;
        if let Err(restore) = apply_setting(context, key) {
            tracing::warn!(key, error = %restore, "previous setting could not be re-applied");
        }
        return Err(err);
    }
    Ok(())
}

fn apply_setting(context: &mut ShellContext, key: &str) -> Result<(), CommandError> {
    match key {
        "locale" => {
            let locale = context.config.locale.clone();
            context.modal.set_locale(locale);
        }
        "default_locale" | "schema_path" => {
            if let Err(err) = context.reload_form() {
                return Err(CommandError::Message(format!(
                    "form could not be reloaded, setting left unchanged: {}",
                    err
                )));
            }
        }
        "require_form" => context.reload_gate(),
        "lead_store" => context.reload_sink()?,
        _ => {}
    }
    Ok(())
}
