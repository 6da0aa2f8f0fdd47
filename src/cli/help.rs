//! Help text rendering

use crate::cli::command::{Command, OptionDecl, ValueKind, HELP_LONG, HELP_SHORT};
use crate::error::ParseError;

/// Render the help page of `command`, reached through `path`
pub fn render<C>(path: &[&str], command: &Command<C>) -> String {
    let mut output = format!("Usage: {}", usage(path, command));

    if let Some(about) = command.about_text() {
        output.push_str("\n\n");
        for line in about.lines() {
            if line.trim().is_empty() {
                output.push('\n');
            } else {
                output.push_str(&format!("  {}\n", line.trim()));
            }
        }
        output.pop();
    }

    let mut rows: Vec<(String, String)> = command
        .options()
        .iter()
        .map(|o| (option_label(o), option_help(o)))
        .collect();
    rows.push((
        format!("-{}, --{}", HELP_SHORT, HELP_LONG),
        "Show this message and exit.".to_string(),
    ));
    output.push_str("\n\nOptions:\n");
    output.push_str(&table(&rows));

    if command.is_group() {
        let rows: Vec<(String, String)> = command
            .children()
            .iter()
            .map(|c| {
                let summary = c
                    .about_text()
                    .and_then(|a| a.lines().map(str::trim).find(|l| !l.is_empty()))
                    .unwrap_or_default();
                (c.name().to_string(), summary.to_string())
            })
            .collect();
        output.push_str("\nCommands:\n");
        output.push_str(&table(&rows));
    }

    output
}

/// One-line usage, e.g. `hello greet [OPTIONS] [OUT]`
pub fn usage<C>(path: &[&str], command: &Command<C>) -> String {
    let mut parts: Vec<String> = path.iter().map(|p| p.to_string()).collect();
    parts.push("[OPTIONS]".to_string());

    for arg in command.args() {
        let name = arg.name().to_uppercase();
        if arg.is_required() {
            parts.push(name);
        } else {
            parts.push(format!("[{}]", name));
        }
    }

    if command.is_group() {
        parts.push("COMMAND [ARGS]...".to_string());
    }

    parts.join(" ")
}

/// Usage line of the command a parse error was raised in, plus a pointer
/// to its `--help`
///
/// Returns `None` for help requests and for paths not under `root`.
pub fn error_usage<C>(root: &Command<C>, err: &ParseError) -> Option<String> {
    let path = err.command()?;
    let names: Vec<&str> = path.split(' ').collect();
    let (first, rest) = names.split_first()?;
    if *first != root.name() {
        return None;
    }

    let mut command = root;
    for name in rest {
        command = command.find_child(name)?;
    }

    Some(format!(
        "Usage: {}\nTry '{} --{}' for help.\n",
        usage(&names, command),
        path,
        HELP_LONG
    ))
}

fn option_label(decl: &OptionDecl) -> String {
    let mut label = match decl.short_alias() {
        Some(short) => format!("-{}, {}", short, decl.display_name()),
        None => decl.display_name(),
    };
    if decl.kind().takes_value() {
        label.push(' ');
        label.push_str(decl.kind().metavar());
    }
    label
}

fn option_help(decl: &OptionDecl) -> String {
    let mut help = decl.help_text().unwrap_or_default().to_string();
    // Flags always default to off
    if let Some(default) = decl.default().filter(|_| decl.kind() != ValueKind::Flag) {
        if !help.is_empty() {
            help.push_str("  ");
        }
        help.push_str(&format!("[default: {}]", default));
    }
    help
}

fn table(rows: &[(String, String)]) -> String {
    let width = rows.iter().map(|(l, _)| l.len()).max().unwrap_or(0);
    let mut output = String::new();
    for (label, help) in rows {
        if help.is_empty() {
            output.push_str(&format!("  {}\n", label));
        } else {
            output.push_str(&format!("  {:<width$}  {}\n", label, help, width = width));
        }
    }
    output
}
