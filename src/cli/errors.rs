use std::io;

use gagyebu_config::ConfigError;
use gagyebu_core::CoreError;
use rustyline::error::ReadlineError;
use thiserror::Error;

/// Failures that stop the shell itself.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Line editor failed: {0}")]
    Readline(#[from] ReadlineError),
    #[error("Invalid input: {0}")]
    Input(String),
    #[error("Command failed: {0}")]
    Command(String),
}

/// Failures scoped to a single command; the shell reports them and keeps going.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

impl From<CommandError> for CliError {
    fn from(err: CommandError) -> Self {
        match err {
            CommandError::Core(inner) => CliError::Core(inner),
            CommandError::InvalidArguments(message) => CliError::Input(message),
            other => CliError::Command(other.to_string()),
        }
    }
}

impl From<io::Error> for CliError {
    fn from(err: io::Error) -> Self {
        CliError::Command(err.to_string())
    }
}
