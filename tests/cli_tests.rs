//! End-to-end tests for the hello command tree
//!
//! These run parse and dispatch against a captured console, so nothing
//! touches the real terminal.

use hello_cli::cli::{help, parse, ExitStatus};
use hello_cli::commands::app;
use hello_cli::config::{Config, OutputSettings};
use hello_cli::error::{AppError, OutputError, ParseError};
use hello_cli::output::{Console, FixedTerminal};
use std::path::PathBuf;
use tempfile::TempDir;

fn plain_console() -> Console {
    Console::captured(FixedTerminal::new(false, None), OutputSettings::default())
}

fn run(tokens: &[&str], console: &mut Console) -> Result<(Config, ExitStatus), AppError> {
    let app = app();
    let invocation = parse(tokens, &app)?;
    let mut config = Config::default();
    let status = invocation.dispatch_with(&mut config, console)?;
    Ok((config, status))
}

#[test]
fn greet_writes_repeated_lines_to_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("greeting.txt");
    let path_str = path.to_str().unwrap();
    let mut console = plain_console();

    let (_, status) = run(
        &["greet", "--repeat", "3", "--string-to-print", "X", path_str],
        &mut console,
    )
    .unwrap();

    assert_eq!(status, ExitStatus::SUCCESS);
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "Hello X!\nHello X!\nHello X!\n"
    );
    let stdout = String::from_utf8(console.captured_stdout().to_vec()).unwrap();
    assert!(!stdout.contains("Hello X!"));
    assert!(stdout.starts_with("Home directory is .\n"));
}

#[test]
fn greet_truncates_existing_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("greeting.txt");
    std::fs::write(&path, "stale\nstale\nstale\nstale\n").unwrap();
    let mut console = plain_console();

    run(&["greet", path.to_str().unwrap()], &mut console).unwrap();

    assert_eq!(std::fs::read_to_string(&path).unwrap(), "Hello world!\n");
}

#[test]
fn greet_dash_writes_to_stdout() {
    let mut console = plain_console();
    run(&["greet", "--repeat", "2", "-"], &mut console).unwrap();

    let stdout = String::from_utf8(console.captured_stdout().to_vec()).unwrap();
    assert!(stdout.ends_with("Hello world!\nHello world!\n"));
}

#[test]
fn unopenable_output_fails_before_writing() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("no-such-dir").join("greeting.txt");
    let mut console = plain_console();

    let err = run(&["greet", path.to_str().unwrap()], &mut console).unwrap_err();

    assert!(matches!(
        err,
        AppError::Output(OutputError::Unavailable { .. })
    ));
    assert_eq!(err.exit_status(), ExitStatus::FAILURE);
    assert!(console.captured_stdout().is_empty());
}

#[test]
fn group_options_fill_config_in_any_order() {
    let a = run(
        &["--verbose", "--home-directory", "/srv/demo", "greet"],
        &mut plain_console(),
    )
    .unwrap();
    let b = run(
        &["--home-directory", "/srv/demo", "--verbose", "greet"],
        &mut plain_console(),
    )
    .unwrap();

    assert_eq!(a.0, b.0);
    assert_eq!(
        a.0,
        Config {
            verbose: true,
            home_directory: PathBuf::from("/srv/demo"),
        }
    );
}

#[test]
fn verbose_notice_is_printed() {
    let mut console = plain_console();
    run(&["--verbose", "greet"], &mut console).unwrap();

    let stdout = String::from_utf8(console.captured_stdout().to_vec()).unwrap();
    assert!(stdout.starts_with("Home directory is .\nWe are in verbose mode\n"));
}

#[test]
fn parse_errors_run_no_handler() {
    let mut console = plain_console();

    let err = run(&["--repeat", "abc", "greet"], &mut console).unwrap_err();
    assert!(matches!(
        err,
        AppError::Parse(ParseError::InvalidOptionValue { .. })
    ));
    assert_eq!(err.exit_status(), ExitStatus::USAGE);

    let err = run(&["greet", "--nope"], &mut console).unwrap_err();
    assert!(matches!(err, AppError::Parse(ParseError::UnknownOption { .. })));

    assert!(console.captured_stdout().is_empty());
    assert!(console.captured_stderr().is_empty());
}

#[test]
fn plain_console_output_has_no_control_sequences() {
    let mut console = plain_console();
    run(&["greet"], &mut console).unwrap();

    let stdout = console.captured_stdout();
    assert!(!stdout.contains(&0x1b));
    let text = String::from_utf8(stdout.to_vec()).unwrap();
    assert!(text.contains("\nOne fish Two fish Red fish Blue fish\n"));
}

#[test]
fn interactive_console_styles_and_clears() {
    // Tall enough that the sixty numbered lines fit without a pager
    let mut console =
        Console::captured(FixedTerminal::new(true, Some(100)), OutputSettings::default());
    run(&["greet"], &mut console).unwrap();

    let text = String::from_utf8(console.captured_stdout().to_vec()).unwrap();
    assert!(text.contains("\x1b[2J"));
    assert!(text.contains("\x1b[1m\nOne fish \x1b[0m"));
    assert!(text.contains("\x1b[4mTwo fish\x1b[0m"));
    assert!(text.contains("\x1b[31m Red fish \x1b[0m"));
    assert!(text.contains("\x1b[34mBlue fish\n\x1b[0m"));
    assert!(text.ends_with("Hello world!\n"));
}

#[test]
fn help_is_not_an_error_status() {
    let err = run(&["greet", "--help"], &mut plain_console()).unwrap_err();
    match &err {
        AppError::Parse(ParseError::HelpRequested(text)) => {
            assert!(text.starts_with("Usage: hello greet [OPTIONS] [OUT]"));
            assert!(text.contains("[default: world]"));
        }
        other => panic!("Expected help, got {:?}", other),
    }
    assert!(err.exit_status().is_success());
}

#[test]
fn parse_errors_show_usage_of_failing_command() {
    let app = app();
    let greet_usage = "Usage: hello greet [OPTIONS] [OUT]\nTry 'hello greet --help' for help.\n";

    let err = parse(&["greet", "--nope"], &app).unwrap_err();
    assert_eq!(help::error_usage(&app, &err).as_deref(), Some(greet_usage));

    // Options deferred to greet, and missing values, report against greet too
    for tokens in [&["--repeat", "abc", "greet"][..], &["greet", "--repeat"][..]] {
        let err = parse(tokens, &app).unwrap_err();
        assert_eq!(err.command(), Some("hello greet"));
        assert_eq!(help::error_usage(&app, &err).as_deref(), Some(greet_usage));
    }

    let err = parse::<_, &str>(&[], &app).unwrap_err();
    assert!(help::error_usage(&app, &err)
        .unwrap()
        .starts_with("Usage: hello [OPTIONS] COMMAND [ARGS]...\n"));
}
