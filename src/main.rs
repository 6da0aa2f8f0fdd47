//! hello - greeter demo
//!
//! Parses the command line into the `hello` command tree and runs it.

use hello_cli::cli::{help, parse, Command, ExitStatus};
use hello_cli::commands::{app, root};
use hello_cli::config::Config;
use hello_cli::config::SettingsFile;
use hello_cli::error::{AppError, OutputError, ParseError};
use hello_cli::output::Console;

fn main() {
    let tokens: Vec<String> = std::env::args().skip(1).collect();
    let app = app();

    match run(&app, &tokens) {
        Ok(status) => std::process::exit(status.into()),
        Err(AppError::Parse(ParseError::HelpRequested(text))) => {
            println!("{}", text);
        }
        Err(e) => {
            log::debug!("{:?}", e);
            print_error(&app, &e);
            std::process::exit(e.exit_status().into());
        }
    }
}

fn run(app: &Command<Config>, tokens: &[String]) -> Result<ExitStatus, AppError> {
    let invocation = parse(tokens, app)?;

    // Initialize logging; verbose raises the default level
    let default_level = if invocation.root().matches().flag(root::VERBOSE) {
        "debug"
    } else {
        "warn"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();

    let settings = SettingsFile::load_default().unwrap_or_default();
    let mut console = Console::system(settings.output);
    let status = invocation.dispatch(&mut console)?;
    console.flush()?;
    Ok(status)
}

fn print_error(app: &Command<Config>, err: &AppError) {
    // Usage of the failing command goes first, as click does
    if let AppError::Parse(parse_err) = err {
        if let Some(usage) = help::error_usage(app, parse_err) {
            eprintln!("{}", usage);
        }
    }

    eprintln!("Error: {}", err);

    // Print helpful hints for common errors
    match err {
        AppError::Output(OutputError::Unavailable { .. }) => {
            eprintln!();
            eprintln!("Hint: Check that the directory exists and is writable,");
            eprintln!("      or pass '-' to write to standard output.");
        }
        _ => {}
    }
}
