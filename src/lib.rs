//! hello-cli - declarative CLI parsing and styled terminal output
//!
//! This library provides a small command tree parser with typed options and
//! a console that styles, pages and clears only on interactive terminals.
//!
//! # Modules
//!
//! - [`cli`]: Command declarations, parsing and dispatch
//! - [`commands`]: The `hello` demo commands
//! - [`config`]: Invocation context and settings file
//! - [`error`]: Error types
//! - [`output`]: Styled output writer

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;

pub use error::{AppError, Result};
