//! Resolved invocations and dispatch

use crate::cli::command::{Command, Handler};
use crate::cli::matches::Matches;
use crate::error::{AppError, Result};
use crate::output::Console;
use std::fmt;

/// Process exit status returned by a leaf handler
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ExitStatus(u8);

impl ExitStatus {
    pub const SUCCESS: ExitStatus = ExitStatus(0);
    pub const FAILURE: ExitStatus = ExitStatus(1);
    /// Command line could not be parsed
    pub const USAGE: ExitStatus = ExitStatus(2);

    pub const fn new(code: u8) -> Self {
        Self(code)
    }

    #[inline]
    pub const fn code(&self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn is_success(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for ExitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<ExitStatus> for i32 {
    fn from(status: ExitStatus) -> Self {
        status.0 as i32
    }
}

/// One command on the chain, with its bound values
#[derive(Debug)]
pub struct Resolved<'a, C> {
    command: &'a Command<C>,
    matches: Matches,
}

impl<'a, C> Resolved<'a, C> {
    pub(crate) fn new(command: &'a Command<C>, matches: Matches) -> Self {
        Self { command, matches }
    }

    pub fn command(&self) -> &'a Command<C> {
        self.command
    }

    pub fn matches(&self) -> &Matches {
        &self.matches
    }
}

/// The parsed command chain, root first, leaf last
#[derive(Debug)]
pub struct Invocation<'a, C> {
    nodes: Vec<Resolved<'a, C>>,
}

impl<'a, C> Invocation<'a, C> {
    /// Build from a non-empty chain
    pub(crate) fn new(nodes: Vec<Resolved<'a, C>>) -> Self {
        debug_assert!(!nodes.is_empty());
        Self { nodes }
    }

    pub fn root(&self) -> &Resolved<'a, C> {
        &self.nodes[0]
    }

    pub fn leaf(&self) -> &Resolved<'a, C> {
        &self.nodes[self.nodes.len() - 1]
    }

    /// Space-separated command names, e.g. `hello greet`
    pub fn path(&self) -> String {
        self.nodes
            .iter()
            .map(|n| n.command.name())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Run the chain against a fresh context
    pub fn dispatch(&self, console: &mut Console) -> Result<ExitStatus>
    where
        C: Default,
    {
        let mut ctx = C::default();
        self.dispatch_with(&mut ctx, console)
    }

    /// Run group handlers root to leaf, then the leaf handler
    ///
    /// Group handlers only see the context and their own values. The leaf
    /// gets the context read-only plus the console.
    pub fn dispatch_with(&self, ctx: &mut C, console: &mut Console) -> Result<ExitStatus> {
        let (leaf, groups) = self
            .nodes
            .split_last()
            .ok_or_else(|| AppError::MissingHandler(String::new()))?;

        for node in groups {
            if let Handler::Group(handler) = node.command.handler() {
                log::debug!("Resolving group '{}'", node.command.name());
                handler(ctx, &node.matches)?;
            }
        }

        match leaf.command.handler() {
            Handler::Leaf(handler) => {
                log::debug!("Running command '{}'", self.path());
                handler(ctx, &leaf.matches, console)
            }
            _ => Err(AppError::MissingHandler(self.path())),
        }
    }
}
