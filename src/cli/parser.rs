//! Token walker
//!
//! Turns a flat token list into an [`Invocation`]: the chain of commands
//! from the root to the leaf being executed, each with its values bound.

use crate::cli::command::{Command, OptionDecl, Value, HELP_LONG, HELP_SHORT};
use crate::cli::help;
use crate::cli::invocation::{Invocation, Resolved};
use crate::cli::matches::Matches;
use crate::error::ParseError;

/// Token that ends option processing
const END_OF_OPTIONS: &str = "--";

/// Parse `tokens` (without the program name) against `root`
///
/// # Errors
/// Any [`ParseError`]; `HelpRequested` carries the help text of the
/// command being parsed when `--help` was seen.
pub fn parse<'a, C, S: AsRef<str>>(
    tokens: &[S],
    root: &'a Command<C>,
) -> Result<Invocation<'a, C>, ParseError> {
    let mut walk = Walk::new(root);
    let mut only_positional = false;
    let mut i = 0;

    while i < tokens.len() {
        let token = tokens[i].as_ref();
        i += 1;

        if only_positional {
            walk.positional(token);
            continue;
        }

        if token == END_OF_OPTIONS {
            only_positional = true;
        } else if let Some(body) = token.strip_prefix("--") {
            let (long, inline) = match body.split_once('=') {
                Some((long, value)) => (long, Some(value)),
                None => (body, None),
            };
            if long == HELP_LONG {
                return Err(walk.help());
            }
            walk.long_option(token, long, inline, tokens, &mut i)?;
        } else if token.len() > 1 && token.starts_with('-') {
            walk.short_option(token, tokens, &mut i)?;
        } else if !walk.descend(token)? {
            walk.positional(token);
        }
    }

    walk.finish()
}

/// Option seen before the command that declares it
#[derive(Debug)]
struct Pending {
    long: String,
    raw: Option<String>,
}

#[derive(Debug)]
struct Frame<'a, C> {
    command: &'a Command<C>,
    /// Names from the root down to this command
    path: String,
    matches: Matches,
    positionals: Vec<String>,
}

impl<'a, C> Frame<'a, C> {
    fn new(command: &'a Command<C>, path: String) -> Self {
        Self {
            command,
            path,
            matches: Matches::new(),
            positionals: Vec::new(),
        }
    }

    fn bind(&mut self, decl: &OptionDecl, raw: Option<&str>) -> Result<(), ParseError> {
        let value = match raw {
            None => Value::Flag(true),
            Some(raw) => decl.kind().coerce(&self.path, &decl.display_name(), raw)?,
        };
        self.matches.insert(decl.long(), value);
        Ok(())
    }
}

struct Walk<'a, C> {
    chain: Vec<Frame<'a, C>>,
    pending: Vec<Pending>,
}

impl<'a, C> Walk<'a, C> {
    fn new(root: &'a Command<C>) -> Self {
        Self {
            chain: vec![Frame::new(root, root.name().to_string())],
            pending: Vec::new(),
        }
    }

    fn current(&mut self) -> &mut Frame<'a, C> {
        let last = self.chain.len() - 1;
        &mut self.chain[last]
    }

    fn command_path(&self) -> String {
        self.chain[self.chain.len() - 1].path.clone()
    }

    fn names(&self) -> Vec<&'static str> {
        self.chain.iter().map(|f| f.command.name()).collect()
    }

    fn help(&self) -> ParseError {
        let command = self.chain[self.chain.len() - 1].command;
        ParseError::HelpRequested(help::render(&self.names(), command))
    }

    fn unknown(&self, option: &str) -> ParseError {
        ParseError::UnknownOption {
            option: option.to_string(),
            command: self.command_path(),
        }
    }

    fn long_option<S: AsRef<str>>(
        &mut self,
        token: &str,
        long: &str,
        inline: Option<&str>,
        tokens: &[S],
        i: &mut usize,
    ) -> Result<(), ParseError> {
        let command = self.current().command;

        if let Some(decl) = command.find_long(long) {
            let path = self.command_path();
            let raw = take_value(decl.kind().takes_value(), &path, token, inline, tokens, i)?;
            return self.current().bind(decl, raw.as_deref().or(inline));
        }

        let mut declared = Vec::new();
        command.descendant_options(long, &mut declared);
        let takes_value = match declared.split_first() {
            Some((first, rest))
                if rest
                    .iter()
                    .all(|d| d.kind().takes_value() == first.kind().takes_value()) =>
            {
                first.kind().takes_value()
            }
            _ => return Err(self.unknown(&format!("--{}", long))),
        };

        let raw = take_value(takes_value, &self.command_path(), token, inline, tokens, i)?;
        log::debug!("Deferring option '--{}' to a subcommand", long);
        self.pending.push(Pending {
            long: long.to_string(),
            raw: raw.or_else(|| inline.map(str::to_string)),
        });
        Ok(())
    }

    fn short_option<S: AsRef<str>>(
        &mut self,
        token: &str,
        tokens: &[S],
        i: &mut usize,
    ) -> Result<(), ParseError> {
        let mut chars = token.chars().skip(1);
        let short = match (chars.next(), chars.next()) {
            (Some(c), None) => c,
            _ => return Err(self.unknown(token)),
        };
        if short == HELP_SHORT {
            return Err(self.help());
        }

        let command = self.current().command;
        let decl = command.find_short(short).ok_or_else(|| self.unknown(token))?;
        let path = self.command_path();
        let raw = take_value(decl.kind().takes_value(), &path, token, None, tokens, i)?;
        self.current().bind(decl, raw.as_deref())
    }

    /// Enter the child named `token`, if there is one
    fn descend(&mut self, token: &str) -> Result<bool, ParseError> {
        let frame = self.current();
        let command = frame.command;
        if frame.positionals.len() < command.args().len() {
            return Ok(false);
        }
        let Some(child) = command.find_child(token) else {
            return Ok(false);
        };

        log::debug!("Entering subcommand '{}'", child.name());
        let path = format!("{} {}", frame.path, child.name());
        let mut entered = Frame::new(child, path);
        let mut remaining = Vec::with_capacity(self.pending.len());
        for pending in self.pending.drain(..) {
            match child.find_long(&pending.long) {
                Some(decl) => entered.bind(decl, pending.raw.as_deref())?,
                None => remaining.push(pending),
            }
        }
        self.pending = remaining;
        self.chain.push(entered);
        Ok(true)
    }

    fn positional(&mut self, token: &str) {
        self.current().positionals.push(token.to_string());
    }

    fn finish(self) -> Result<Invocation<'a, C>, ParseError> {
        if let Some(pending) = self.pending.first() {
            return Err(self.unknown(&format!("--{}", pending.long)));
        }

        let full_path = self.command_path();
        let leaf_is_group = self.chain[self.chain.len() - 1].command.is_group();

        let mut nodes = Vec::with_capacity(self.chain.len());

        for frame in self.chain {
            let Frame {
                command,
                path,
                mut matches,
                positionals,
            } = frame;

            let declared = command.args();
            if let Some(extra) = positionals.get(declared.len()) {
                return Err(ParseError::UnexpectedArgument {
                    token: extra.clone(),
                    command: path,
                });
            }

            for (index, arg) in declared.iter().enumerate() {
                match positionals.get(index) {
                    Some(raw) => {
                        let value = arg.kind().coerce(&path, arg.name(), raw)?;
                        matches.insert(arg.name(), value);
                    }
                    None if arg.is_required() => {
                        return Err(ParseError::MissingArgument {
                            argument: arg.name().to_uppercase(),
                            command: path,
                        });
                    }
                    None => {
                        if let Some(default) = arg.default() {
                            matches.insert(arg.name(), default.clone());
                        }
                    }
                }
            }

            for decl in command.options() {
                if !matches.contains(decl.long()) {
                    if let Some(default) = decl.default() {
                        matches.insert(decl.long(), default.clone());
                    }
                }
            }

            nodes.push(Resolved::new(command, matches));
        }

        // Extra tokens on a group read as "no such command" above
        if leaf_is_group {
            return Err(ParseError::MissingCommand { command: full_path });
        }

        Ok(Invocation::new(nodes))
    }
}

/// Pull the value for an option, either inline or from the next token
fn take_value<S: AsRef<str>>(
    takes_value: bool,
    command: &str,
    token: &str,
    inline: Option<&str>,
    tokens: &[S],
    i: &mut usize,
) -> Result<Option<String>, ParseError> {
    if !takes_value || inline.is_some() {
        return Ok(None);
    }
    let name = token.split('=').next().unwrap_or(token);
    let value = tokens
        .get(*i)
        .map(|t| t.as_ref().to_string())
        .ok_or_else(|| ParseError::MissingValue {
            option: name.to_string(),
            command: command.to_string(),
        })?;
    *i += 1;
    Ok(Some(value))
}
