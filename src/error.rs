//! Unified error types for hello-cli
//!
//! This module defines all error types used throughout the application.
//! Uses thiserror for ergonomic error definitions.

use crate::cli::ExitStatus;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from turning tokens into an invocation
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Error from acquiring or writing an output sink
    #[error(transparent)]
    Output(#[from] OutputError),

    /// Leaf command declared without a leaf handler
    #[error("Command '{0}' has nothing to run")]
    MissingHandler(String),
}

impl AppError {
    /// Process exit status for this error
    pub fn exit_status(&self) -> ExitStatus {
        match self {
            AppError::Parse(ParseError::HelpRequested(_)) => ExitStatus::SUCCESS,
            AppError::Parse(_) => ExitStatus::USAGE,
            _ => ExitStatus::FAILURE,
        }
    }
}

/// Errors from argument parsing
///
/// All of these are raised before any handler runs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Option name not declared by any command on the chain
    #[error("No such option '{option}' for command '{command}'")]
    UnknownOption { option: String, command: String },

    /// Option value failed its type's coercion rule
    #[error("Invalid value '{value}' for '{option}': expected {expected}")]
    InvalidOptionValue {
        option: String,
        value: String,
        expected: &'static str,
        command: String,
    },

    /// Required positional argument not supplied
    #[error("Missing argument '{argument}' for command '{command}'")]
    MissingArgument { argument: String, command: String },

    /// Valued option given as the last token
    #[error("Option '{option}' requires a value")]
    MissingValue { option: String, command: String },

    /// Positional beyond the declared arguments
    #[error("Unexpected argument '{token}' for command '{command}'")]
    UnexpectedArgument { token: String, command: String },

    /// Group invoked without naming a subcommand
    #[error("Missing command for '{command}'")]
    MissingCommand { command: String },

    /// `--help` seen; carries the rendered help text
    #[error("{0}")]
    HelpRequested(String),
}

impl ParseError {
    /// Command path the error was raised in, e.g. `hello greet`
    pub fn command(&self) -> Option<&str> {
        match self {
            ParseError::UnknownOption { command, .. }
            | ParseError::InvalidOptionValue { command, .. }
            | ParseError::MissingArgument { command, .. }
            | ParseError::MissingValue { command, .. }
            | ParseError::UnexpectedArgument { command, .. }
            | ParseError::MissingCommand { command } => Some(command),
            ParseError::HelpRequested(_) => None,
        }
    }
}

/// Errors from output sinks
#[derive(Error, Debug)]
pub enum OutputError {
    /// Destination file could not be opened
    #[error("Could not open '{}': {source}", path.display())]
    Unavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Write or flush failed on an open sink
    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from running an external pager
///
/// Never fatal: the console falls back to plain output.
#[derive(Error, Debug)]
pub enum PagerError {
    /// Pager command is empty
    #[error("No pager command configured")]
    NotConfigured,

    /// Pager program could not be started
    #[error("Failed to start pager '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// Feeding the pager failed for a reason other than the user quitting
    #[error("Failed to write to pager: {0}")]
    Feed(#[source] std::io::Error),

    /// Pager exited unsuccessfully
    #[error("Pager exited with {0}")]
    Exit(std::process::ExitStatus),
}

/// Errors from settings file loading
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Settings file not found
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;
