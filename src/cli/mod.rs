//! Declarative command-line parsing
//!
//! Commands are declared as a tree of [`Command`] nodes with static option
//! and argument tables. [`parse`] resolves a token list into an
//! [`Invocation`], which [`Invocation::dispatch`] runs root to leaf.

pub mod command;
pub mod help;
pub mod invocation;
pub mod matches;
pub mod parser;

pub use command::{ArgDecl, Command, Handler, OptionDecl, StreamTarget, Value, ValueKind};
pub use invocation::{ExitStatus, Invocation, Resolved};
pub use matches::Matches;
pub use parser::parse;
