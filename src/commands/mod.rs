//! Command handlers
//!
//! [`app`] declares the `hello` command tree; each submodule holds the
//! handler for one command.

pub mod greet;
pub mod root;

pub use greet::run_greet;
pub use root::resolve_root;

use crate::cli::{ArgDecl, Command, OptionDecl, StreamTarget, Value, ValueKind};
use crate::config::Config;

/// Program name used in usage lines
pub const PROGRAM: &str = "hello";

/// Build the `hello` command tree
pub fn app() -> Command<Config> {
    Command::new(PROGRAM)
        .about("Greeter demo: options, subcommands, paging and styled output.")
        .option(OptionDecl::flag(root::VERBOSE).help("Enable verbose output."))
        .option(OptionDecl::path(root::HOME_DIRECTORY).help("Directory to report as home."))
        .on_invoke(resolve_root)
        .subcommand(
            Command::new("greet")
                .about("This script is the Greeter.")
                .option(
                    OptionDecl::string(greet::STRING_TO_PRINT)
                        .default_value(Value::String("world".to_string()))
                        .help("The subject of the greeting."),
                )
                .option(
                    OptionDecl::integer(greet::REPEAT)
                        .default_value(Value::Integer(1))
                        .help("How many times you should be greeted."),
                )
                .arg(
                    ArgDecl::new(greet::OUT, ValueKind::Stream)
                        .default_value(Value::Stream(StreamTarget::Std))
                        .help("The file to write the greeting into."),
                )
                .run(run_greet),
        )
}
