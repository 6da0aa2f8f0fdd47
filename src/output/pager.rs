//! External pager
//!
//! Feeds text to a pager program over a pipe and waits for it to exit.

use crate::error::PagerError;
use std::io::{ErrorKind, Write};
use std::process::{Command, Stdio};

/// A pager command line, e.g. `less -R`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pager {
    program: String,
    args: Vec<String>,
}

impl Pager {
    /// Split a whitespace-separated command line
    ///
    /// # Errors
    /// Returns `PagerError::NotConfigured` for an empty command.
    pub fn from_command(command: &str) -> Result<Self, PagerError> {
        let mut parts = command.split_whitespace().map(str::to_string);
        let program = parts.next().ok_or(PagerError::NotConfigured)?;
        Ok(Self {
            program,
            args: parts.collect(),
        })
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Show `text` in the pager, blocking until the user closes it
    ///
    /// The pager inherits stdout and stderr. A broken pipe while feeding
    /// means the pager quit early and is not an error.
    pub fn page(&self, text: &str) -> Result<(), PagerError> {
        log::debug!("Spawning pager {} {:?}", self.program, self.args);
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .spawn()
            .map_err(|source| PagerError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            if let Err(e) = stdin.write_all(text.as_bytes()) {
                if e.kind() != ErrorKind::BrokenPipe {
                    let _ = child.wait();
                    return Err(PagerError::Feed(e));
                }
                log::debug!("Pager closed its input early");
            }
            // stdin drops here, sending EOF
        }

        let status = child.wait().map_err(PagerError::Feed)?;
        if !status.success() {
            return Err(PagerError::Exit(status));
        }
        Ok(())
    }
}
