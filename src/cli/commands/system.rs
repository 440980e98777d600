use crate::cli::context::{CommandResult, LoopControl, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::utils::build_info;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "help",
            "Show available commands",
            "help [command]",
            cmd_help,
        ),
        CommandEntry::new("version", "Show build metadata", "version", cmd_version),
        CommandEntry::new("exit", "Exit the shell", "exit", cmd_exit),
    ]
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if let Some(name) = args.first().map(|name| name.to_lowercase()) {
        match context.registry.get(&name) {
            Some(entry) => {
                output::section(format!("Help: {}", entry.name));
                output::info(format!("  Description: {}", entry.description));
                output::info(format!("  Usage: {}", entry.usage));
            }
            None => context.suggest_command(&name),
        }
        return Ok(LoopControl::Continue);
    }

    output::section("Available commands");
    for entry in context.registry.list() {
        output::line(format!("  {:<10} {}", entry.name, entry.description));
    }
    output::info("Use `help <command>` for details.");
    Ok(LoopControl::Continue)
}

fn cmd_version(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    for line in build_info::current().lines() {
        output::line(line);
    }
    Ok(LoopControl::Continue)
}

fn cmd_exit(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.running = false;
    Ok(LoopControl::Exit)
}
