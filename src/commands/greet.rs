//! Greet command implementation
//!
//! Shows off every console feature, then writes the greeting to OUT.

use crate::cli::{ExitStatus, Matches, StreamTarget};
use crate::config::Config;
use crate::error::Result;
use crate::output::{Color, Console, Destination, Style};

pub const STRING_TO_PRINT: &str = "string-to-print";
pub const REPEAT: &str = "repeat";
pub const OUT: &str = "out";

/// Lines fed to the pager
const PAGED_LINES: usize = 60;

/// Execute the greet command
pub fn run_greet(config: &Config, matches: &Matches, console: &mut Console) -> Result<ExitStatus> {
    let subject = matches.string(STRING_TO_PRINT).unwrap_or("world");
    let repeat = matches.integer(REPEAT).unwrap_or(1);
    let target = matches.stream(OUT).cloned().unwrap_or(StreamTarget::Std);

    let mut out = Destination::open(&target)?;

    console.echo(&format!(
        "Home directory is {}",
        config.home_directory.display()
    ))?;
    if config.verbose {
        console.echo("We are in verbose mode")?;
    }

    let paged = (0..PAGED_LINES)
        .map(|idx| format!("Line {}", idx))
        .collect::<Vec<_>>()
        .join("\n");
    console.write_paged(&paged)?;
    console.clear_screen()?;

    console.write_styled("\nOne fish ", &Style::new().bold().no_newline())?;
    console.write_styled("Two fish", &Style::new().underline().no_newline())?;
    console.write_styled(" Red fish ", &Style::new().fg(Color::Red).no_newline())?;
    console.write_styled("Blue fish\n", &Style::new().fg(Color::Blue).no_newline())?;

    for _ in 0..repeat.max(0) {
        console.write(&format!("Hello {}!\n", subject), &mut out)?;
    }
    out.close()?;

    Ok(ExitStatus::SUCCESS)
}
