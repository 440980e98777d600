pub mod commands;
pub mod context;
pub mod output;
pub mod prompts;
pub mod registry;
pub mod shell;

pub use context::{render_modal, CliError, CliMode, CommandError, ShellContext};
pub use shell::run_cli;
