pub mod commands;
pub mod context;
pub mod errors;
pub mod help;
pub mod output;
pub mod registry;
pub mod render;
mod shell;

pub use context::{CliMode, ShellContext};
pub use errors::{CliError, CommandError};
pub use shell::run_cli;
