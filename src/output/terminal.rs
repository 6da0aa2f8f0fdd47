//! Terminal capability checks
//!
//! Whether a stream is an interactive terminal decides if styling, paging
//! and screen clearing happen at all. The check sits behind a trait so it
//! can be replaced in tests and unusual environments.

use std::io::IsTerminal;

/// Standard process streams
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StdStream {
    Stdin,
    Stdout,
    Stderr,
}

/// Trait for terminal capability detection
pub trait TerminalProbe {
    /// Whether `stream` is attached to an interactive terminal
    fn is_interactive(&self, stream: StdStream) -> bool;

    /// Visible rows on the terminal, if known
    fn screen_rows(&self) -> Option<usize>;
}

/// Probe backed by the real process streams
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTerminal;

impl TerminalProbe for SystemTerminal {
    fn is_interactive(&self, stream: StdStream) -> bool {
        match stream {
            StdStream::Stdin => std::io::stdin().is_terminal(),
            StdStream::Stdout => std::io::stdout().is_terminal(),
            StdStream::Stderr => std::io::stderr().is_terminal(),
        }
    }

    fn screen_rows(&self) -> Option<usize> {
        crossterm::terminal::size()
            .ok()
            .map(|(_, rows)| rows as usize)
            .filter(|rows| *rows > 0)
    }
}

/// Probe with preset answers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedTerminal {
    interactive: bool,
    stdin: bool,
    rows: Option<usize>,
}

impl FixedTerminal {
    /// Every stream answers `interactive`
    pub fn new(interactive: bool, rows: Option<usize>) -> Self {
        Self {
            interactive,
            stdin: interactive,
            rows,
        }
    }

    /// Override the answer for stdin alone
    pub fn stdin(mut self, interactive: bool) -> Self {
        self.stdin = interactive;
        self
    }
}

impl TerminalProbe for FixedTerminal {
    fn is_interactive(&self, stream: StdStream) -> bool {
        match stream {
            StdStream::Stdin => self.stdin,
            _ => self.interactive,
        }
    }

    fn screen_rows(&self) -> Option<usize> {
        self.rows
    }
}
