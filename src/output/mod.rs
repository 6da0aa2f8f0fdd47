//! Styled terminal output
//!
//! [`Console`] writes plain, styled and paged text and clears the screen.
//! Anything terminal-specific only happens when the target stream is an
//! interactive terminal, as reported by the [`TerminalProbe`].

pub mod pager;
pub mod sink;
pub mod style;
pub mod terminal;

pub use crate::config::OutputSettings;
pub use pager::Pager;
pub use sink::{Destination, FileSink};
pub use style::{Color, Style};
pub use terminal::{FixedTerminal, StdStream, SystemTerminal, TerminalProbe};

use crate::error::OutputError;
use crossterm::cursor::MoveTo;
use crossterm::terminal::{Clear, ClearType};
use std::io::{self, Write};

/// A standard stream, or an in-memory stand-in for one
enum Channel {
    Stdout(io::Stdout),
    Stderr(io::Stderr),
    Captured(Vec<u8>),
}

impl Channel {
    fn captured(&self) -> &[u8] {
        match self {
            Channel::Captured(buf) => buf,
            _ => &[],
        }
    }
}

impl Write for Channel {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Channel::Stdout(s) => s.write(buf),
            Channel::Stderr(s) => s.write(buf),
            Channel::Captured(v) => v.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Channel::Stdout(s) => s.flush(),
            Channel::Stderr(s) => s.flush(),
            Channel::Captured(_) => Ok(()),
        }
    }
}

/// Output facade handed to leaf handlers
pub struct Console {
    stdout: Channel,
    stderr: Channel,
    probe: Box<dyn TerminalProbe>,
    settings: OutputSettings,
}

impl Console {
    /// Console on the process streams with real terminal detection
    pub fn system(settings: OutputSettings) -> Self {
        Self::with_probe(SystemTerminal, settings)
    }

    /// Console on the process streams with a custom probe
    pub fn with_probe<P: TerminalProbe + 'static>(probe: P, settings: OutputSettings) -> Self {
        Self {
            stdout: Channel::Stdout(io::stdout()),
            stderr: Channel::Stderr(io::stderr()),
            probe: Box::new(probe),
            settings,
        }
    }

    /// Console writing into memory, for inspecting output
    pub fn captured<P: TerminalProbe + 'static>(probe: P, settings: OutputSettings) -> Self {
        Self {
            stdout: Channel::Captured(Vec::new()),
            stderr: Channel::Captured(Vec::new()),
            probe: Box::new(probe),
            settings,
        }
    }

    /// Bytes written to stdout of a captured console
    pub fn captured_stdout(&self) -> &[u8] {
        self.stdout.captured()
    }

    /// Bytes written to stderr of a captured console
    pub fn captured_stderr(&self) -> &[u8] {
        self.stderr.captured()
    }

    /// Whether writes to `dest` land on an interactive terminal
    pub fn is_interactive(&self, dest: &Destination) -> bool {
        match dest {
            Destination::Stdout => self.probe.is_interactive(StdStream::Stdout),
            Destination::Stderr => self.probe.is_interactive(StdStream::Stderr),
            Destination::File(_) => false,
        }
    }

    fn styling(&self, dest: &Destination) -> bool {
        self.settings.color && self.is_interactive(dest)
    }

    /// Write `text` verbatim
    pub fn write(&mut self, text: &str, dest: &mut Destination) -> Result<(), OutputError> {
        match dest {
            Destination::Stdout => {
                self.stdout.write_all(text.as_bytes())?;
                self.stdout.flush()?;
            }
            Destination::Stderr => {
                self.stderr.write_all(text.as_bytes())?;
                self.stderr.flush()?;
            }
            Destination::File(sink) => sink.write_all(text.as_bytes())?,
        }
        Ok(())
    }

    /// Write `text` and a newline to stdout
    pub fn echo(&mut self, text: &str) -> Result<(), OutputError> {
        self.write_styled(text, &Style::new())
    }

    /// Write `text` and a newline to stderr
    pub fn echo_err(&mut self, text: &str) -> Result<(), OutputError> {
        self.write_styled_to(text, &Style::new(), &mut Destination::Stderr)
    }

    /// Write styled `text` to stdout
    pub fn write_styled(&mut self, text: &str, style: &Style) -> Result<(), OutputError> {
        self.write_styled_to(text, style, &mut Destination::Stdout)
    }

    /// Write styled `text` to `dest`
    ///
    /// Escape sequences are emitted only for an interactive terminal with
    /// color enabled; otherwise the plain text is written.
    pub fn write_styled_to(
        &mut self,
        text: &str,
        style: &Style,
        dest: &mut Destination,
    ) -> Result<(), OutputError> {
        let rendered = style.render(text, self.styling(dest));
        self.write(&rendered, dest)
    }

    /// Show `text` through the pager when it does not fit on one screen
    ///
    /// Falls back to writing on stdout when stdin or stdout is not
    /// interactive, the text fits, or the pager fails.
    pub fn write_paged(&mut self, text: &str) -> Result<(), OutputError> {
        let mut paged = text.to_string();
        if !paged.ends_with('\n') {
            paged.push('\n');
        }

        if !self.probe.is_interactive(StdStream::Stdin)
            || !self.is_interactive(&Destination::Stdout)
        {
            return self.write(&paged, &mut Destination::Stdout);
        }

        let rows = self
            .probe
            .screen_rows()
            .unwrap_or(self.settings.fallback_rows);
        if paged.lines().count() <= rows {
            return self.write(&paged, &mut Destination::Stdout);
        }

        self.stdout.flush()?;
        let result = Pager::from_command(&self.settings.pager).and_then(|p| p.page(&paged));
        if let Err(e) = result {
            log::warn!("{}; writing directly", e);
            return self.write(&paged, &mut Destination::Stdout);
        }
        Ok(())
    }

    /// Clear the terminal and home the cursor; no-op when not interactive
    pub fn clear_screen(&mut self) -> Result<(), OutputError> {
        if !self.is_interactive(&Destination::Stdout) {
            return Ok(());
        }
        crossterm::queue!(self.stdout, Clear(ClearType::All), MoveTo(0, 0))?;
        self.stdout.flush()?;
        Ok(())
    }

    /// Flush both standard channels
    pub fn flush(&mut self) -> Result<(), OutputError> {
        self.stdout.flush()?;
        self.stderr.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain() -> Console {
        Console::captured(FixedTerminal::new(false, None), OutputSettings::default())
    }

    fn tty(rows: usize, pager: &str) -> Console {
        let settings = OutputSettings {
            pager: pager.to_string(),
            ..OutputSettings::default()
        };
        Console::captured(FixedTerminal::new(true, Some(rows)), settings)
    }

    #[test]
    fn test_styled_on_non_terminal_is_plain() {
        let mut console = plain();
        let style = Style::new().bold().underline().fg(Color::Red).no_newline();
        console.write_styled("Red fish", &style).unwrap();
        console.write_styled(" done", &Style::new().fg(Color::Blue)).unwrap();

        assert_eq!(console.captured_stdout(), b"Red fish done\n");
    }

    #[test]
    fn test_styled_on_terminal_has_escapes() {
        let mut console = tty(24, "less");
        console
            .write_styled("One fish", &Style::new().bold().no_newline())
            .unwrap();
        assert_eq!(console.captured_stdout(), b"\x1b[1mOne fish\x1b[0m");
    }

    #[test]
    fn test_color_disabled_in_settings() {
        let settings = OutputSettings {
            color: false,
            ..OutputSettings::default()
        };
        let mut console = Console::captured(FixedTerminal::new(true, Some(24)), settings);
        console
            .write_styled("x", &Style::new().fg(Color::Green))
            .unwrap();
        assert_eq!(console.captured_stdout(), b"x\n");
    }

    #[test]
    fn test_clear_screen_non_terminal_is_noop() {
        let mut console = plain();
        console.echo("before").unwrap();
        let before = console.captured_stdout().to_vec();
        console.clear_screen().unwrap();
        assert_eq!(console.captured_stdout(), before.as_slice());
    }

    #[test]
    fn test_clear_screen_terminal_emits_sequence() {
        let mut console = tty(24, "less");
        console.clear_screen().unwrap();
        let out = console.captured_stdout();
        assert!(out.starts_with(b"\x1b[2J"));
        assert!(out.ends_with(b"\x1b[1;1H"));
    }

    #[test]
    fn test_paged_non_terminal_writes_directly() {
        let mut console = plain();
        console.write_paged("Line 0\nLine 1").unwrap();
        assert_eq!(console.captured_stdout(), b"Line 0\nLine 1\n");
    }

    #[test]
    fn test_paged_short_text_skips_pager() {
        let mut console = tty(10, "hello-cli-no-such-pager");
        console.write_paged("a\nb\nc\n").unwrap();
        assert_eq!(console.captured_stdout(), b"a\nb\nc\n");
    }

    #[test]
    fn test_paged_falls_back_when_pager_missing() {
        let mut console = tty(5, "hello-cli-no-such-pager");
        let text = (0..20).map(|i| format!("Line {}", i)).collect::<Vec<_>>().join("\n");
        console.write_paged(&text).unwrap();
        assert_eq!(console.captured_stdout(), format!("{}\n", text).as_bytes());
    }

    #[cfg(unix)]
    #[test]
    fn test_paged_falls_back_when_pager_fails() {
        let mut console = tty(5, "false");
        let text = "x\n".repeat(20);
        console.write_paged(&text).unwrap();
        assert_eq!(console.captured_stdout(), text.as_bytes());
    }

    #[cfg(unix)]
    #[test]
    fn test_paged_needs_interactive_stdin() {
        let text = "x\n".repeat(20);
        let settings = OutputSettings {
            pager: "true".to_string(),
            ..OutputSettings::default()
        };

        // The pager swallows the text
        let mut console = Console::captured(FixedTerminal::new(true, Some(5)), settings.clone());
        console.write_paged(&text).unwrap();
        assert!(console.captured_stdout().is_empty());

        let probe = FixedTerminal::new(true, Some(5)).stdin(false);
        let mut console = Console::captured(probe, settings);
        console.write_paged(&text).unwrap();
        assert_eq!(console.captured_stdout(), text.as_bytes());
    }

    #[test]
    fn test_write_to_file_destination() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("out.txt");
        let mut dest = Destination::File(FileSink::create(&path).unwrap());
        let mut console = tty(24, "less");

        assert!(!console.is_interactive(&dest));
        console
            .write_styled_to("Hello", &Style::new().bold(), &mut dest)
            .unwrap();
        dest.close().unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "Hello\n");
        assert!(console.captured_stdout().is_empty());
    }

    #[test]
    fn test_echo_err() {
        let mut console = plain();
        console.echo_err("oops").unwrap();
        assert_eq!(console.captured_stderr(), b"oops\n");
        assert!(console.captured_stdout().is_empty());
    }
}
