use vsl_core::PlayOutcome;

use crate::cli::context::{render_modal, CommandResult, LoopControl, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "play",
            "Play or pause the video; opens the lead form while locked",
            "play",
            cmd_play,
        ),
        CommandEntry::new("mute", "Toggle video sound", "mute", cmd_mute),
        CommandEntry::new(
            "cta",
            "Open the booking link shown under the video",
            "cta",
            cmd_cta,
        ),
    ]
}

fn cmd_play(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    match context.gate.press_play() {
        PlayOutcome::FormRequired => {
            output::warning("Fill in the form to watch the video.");
            for line in render_modal(context.modal()) {
                output::line(line);
            }
        }
        PlayOutcome::Playing => {
            let muted = if context.gate.is_muted() {
                " (muted)"
            } else {
                ""
            };
            output::success(format!("Playing {}{}", context.config.video_url, muted));
        }
        PlayOutcome::Paused => output::info("Paused."),
    }
    Ok(LoopControl::Continue)
}

fn cmd_mute(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    if context.gate.toggle_mute() {
        output::info("Sound off.");
    } else {
        output::info("Sound on.");
    }
    Ok(LoopControl::Continue)
}

fn cmd_cta(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    match &context.config.scheduling_url {
        Some(url) => {
            tracing::info!(url = %url, "call to action opened");
            output::success(format!("Opening {}", url));
        }
        None => output::warning(
            "No booking link configured. Use `config scheduling_url <url>` to add one.",
        ),
    }
    Ok(LoopControl::Continue)
}
