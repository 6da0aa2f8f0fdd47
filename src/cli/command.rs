//! Command tree declarations
//!
//! A [`Command`] is built once at startup from static option and argument
//! tables and is never modified afterwards.

use crate::cli::invocation::ExitStatus;
use crate::cli::matches::Matches;
use crate::error::{ParseError, Result};
use crate::output::Console;
use std::fmt;
use std::path::PathBuf;

/// Long name of the implicit help option
pub const HELP_LONG: &str = "help";
/// Short alias of the implicit help option
pub const HELP_SHORT: char = 'h';

/// Value kinds an option or argument can declare
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Boolean switch, true when present
    Flag,
    /// Free-form text
    String,
    /// Signed 64-bit integer
    Integer,
    /// Filesystem path, not checked for existence
    Path,
    /// Output stream: `-` for the standard stream, otherwise a file path
    Stream,
}

impl ValueKind {
    /// Whether this kind consumes a value token
    pub fn takes_value(self) -> bool {
        !matches!(self, ValueKind::Flag)
    }

    /// Placeholder shown in help text
    pub fn metavar(self) -> &'static str {
        match self {
            ValueKind::Flag => "",
            ValueKind::String => "TEXT",
            ValueKind::Integer => "INTEGER",
            ValueKind::Path => "PATH",
            ValueKind::Stream => "FILENAME",
        }
    }

    fn expected(self) -> &'static str {
        match self {
            ValueKind::Flag => "no value",
            ValueKind::String => "text",
            ValueKind::Integer => "an integer",
            ValueKind::Path => "a path",
            ValueKind::Stream => "a file name or '-'",
        }
    }

    /// Coerce a raw token for `name`, declared on the command at `command`
    ///
    /// # Errors
    /// Returns `ParseError::InvalidOptionValue` if the token does not fit
    /// this kind.
    pub fn coerce(
        self,
        command: &str,
        name: &str,
        raw: &str,
    ) -> std::result::Result<Value, ParseError> {
        let invalid = || ParseError::InvalidOptionValue {
            option: name.to_string(),
            value: raw.to_string(),
            expected: self.expected(),
            command: command.to_string(),
        };

        match self {
            ValueKind::Flag => Err(invalid()),
            ValueKind::String => Ok(Value::String(raw.to_string())),
            ValueKind::Integer => raw
                .trim()
                .parse::<i64>()
                .map(Value::Integer)
                .map_err(|_| invalid()),
            ValueKind::Path if raw.is_empty() => Err(invalid()),
            ValueKind::Path => Ok(Value::Path(PathBuf::from(raw))),
            ValueKind::Stream if raw.is_empty() => Err(invalid()),
            ValueKind::Stream => Ok(Value::Stream(StreamTarget::parse(raw))),
        }
    }
}

/// Where a stream value points
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamTarget {
    /// Standard output (or input) of the process
    Std,
    /// A file to be opened by the handler
    Path(PathBuf),
}

impl StreamTarget {
    /// The token meaning "use the standard stream"
    pub const STD_TOKEN: &'static str = "-";

    /// Interpret a raw token
    pub fn parse(raw: &str) -> Self {
        if raw == Self::STD_TOKEN {
            StreamTarget::Std
        } else {
            StreamTarget::Path(PathBuf::from(raw))
        }
    }
}

impl fmt::Display for StreamTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamTarget::Std => f.write_str(Self::STD_TOKEN),
            StreamTarget::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

/// A resolved option or argument value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Flag(bool),
    String(String),
    Integer(i64),
    Path(PathBuf),
    Stream(StreamTarget),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Flag(b) => write!(f, "{}", b),
            Value::String(s) => f.write_str(s),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Path(p) => write!(f, "{}", p.display()),
            Value::Stream(t) => write!(f, "{}", t),
        }
    }
}

/// Declaration of a named option
#[derive(Debug, Clone)]
pub struct OptionDecl {
    long: &'static str,
    short: Option<char>,
    kind: ValueKind,
    default: Option<Value>,
    help: Option<&'static str>,
}

impl OptionDecl {
    /// Declare an option of the given kind
    ///
    /// Flags default to `false`; other kinds have no default until one is set.
    pub fn new(long: &'static str, kind: ValueKind) -> Self {
        let default = match kind {
            ValueKind::Flag => Some(Value::Flag(false)),
            _ => None,
        };
        Self {
            long,
            short: None,
            kind,
            default,
            help: None,
        }
    }

    pub fn flag(long: &'static str) -> Self {
        Self::new(long, ValueKind::Flag)
    }

    pub fn string(long: &'static str) -> Self {
        Self::new(long, ValueKind::String)
    }

    pub fn integer(long: &'static str) -> Self {
        Self::new(long, ValueKind::Integer)
    }

    pub fn path(long: &'static str) -> Self {
        Self::new(long, ValueKind::Path)
    }

    pub fn stream(long: &'static str) -> Self {
        Self::new(long, ValueKind::Stream)
    }

    /// Add a single-character alias
    pub fn short(mut self, short: char) -> Self {
        self.short = Some(short);
        self
    }

    /// Set the value used when the option is omitted
    pub fn default_value(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }

    /// Set the help text
    pub fn help(mut self, help: &'static str) -> Self {
        self.help = Some(help);
        self
    }

    pub fn long(&self) -> &'static str {
        self.long
    }

    pub fn short_alias(&self) -> Option<char> {
        self.short
    }

    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    pub fn default(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    pub fn help_text(&self) -> Option<&'static str> {
        self.help
    }

    /// The option as typed on the command line, e.g. `--repeat`
    pub fn display_name(&self) -> String {
        format!("--{}", self.long)
    }
}

/// Declaration of a positional argument
#[derive(Debug, Clone)]
pub struct ArgDecl {
    name: &'static str,
    kind: ValueKind,
    required: bool,
    default: Option<Value>,
    help: Option<&'static str>,
}

impl ArgDecl {
    /// Declare a required positional argument
    pub fn new(name: &'static str, kind: ValueKind) -> Self {
        Self {
            name,
            kind,
            required: true,
            default: None,
            help: None,
        }
    }

    /// Make the argument optional, falling back to `value`
    pub fn default_value(mut self, value: Value) -> Self {
        self.required = false;
        self.default = Some(value);
        self
    }

    pub fn help(mut self, help: &'static str) -> Self {
        self.help = Some(help);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn default(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    pub fn help_text(&self) -> Option<&'static str> {
        self.help
    }
}

/// Handler of a group node: fills the context, produces no output
pub type GroupFn<C> = fn(&mut C, &Matches) -> Result<()>;

/// Handler of a leaf node: does the work and writes output
pub type LeafFn<C> = fn(&C, &Matches, &mut Console) -> Result<ExitStatus>;

/// What runs when a command is part of an invocation
pub enum Handler<C> {
    None,
    Group(GroupFn<C>),
    Leaf(LeafFn<C>),
}

impl<C> fmt::Debug for Handler<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Handler::None => f.write_str("None"),
            Handler::Group(_) => f.write_str("Group"),
            Handler::Leaf(_) => f.write_str("Leaf"),
        }
    }
}

/// A named node of the command grammar
///
/// A node with children is a group; a node without is a leaf.
#[derive(Debug)]
pub struct Command<C> {
    name: &'static str,
    about: Option<&'static str>,
    options: Vec<OptionDecl>,
    args: Vec<ArgDecl>,
    children: Vec<Command<C>>,
    handler: Handler<C>,
}

impl<C> Command<C> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            about: None,
            options: Vec::new(),
            args: Vec::new(),
            children: Vec::new(),
            handler: Handler::None,
        }
    }

    pub fn about(mut self, about: &'static str) -> Self {
        self.about = Some(about);
        self
    }

    /// Declare an option
    ///
    /// # Panics
    /// Panics if the long name or short alias is already taken in this
    /// command, including by the implicit `--help`/`-h`.
    pub fn option(mut self, decl: OptionDecl) -> Self {
        assert!(
            decl.long != HELP_LONG && self.find_long(decl.long).is_none(),
            "duplicate option '--{}' in command '{}'",
            decl.long,
            self.name
        );
        if let Some(short) = decl.short {
            assert!(
                short != HELP_SHORT && self.find_short(short).is_none(),
                "duplicate option '-{}' in command '{}'",
                short,
                self.name
            );
        }
        self.options.push(decl);
        self
    }

    /// Declare the next positional argument
    ///
    /// # Panics
    /// Panics on a duplicate argument name, or a required argument after an
    /// optional one.
    pub fn arg(mut self, decl: ArgDecl) -> Self {
        assert!(
            self.args.iter().all(|a| a.name != decl.name),
            "duplicate argument '{}' in command '{}'",
            decl.name,
            self.name
        );
        assert!(
            !decl.required || self.args.iter().all(|a| a.required),
            "required argument '{}' follows an optional one in command '{}'",
            decl.name,
            self.name
        );
        self.args.push(decl);
        self
    }

    /// Attach a child command
    ///
    /// # Panics
    /// Panics if a child with the same name exists.
    pub fn subcommand(mut self, child: Command<C>) -> Self {
        assert!(
            self.find_child(child.name).is_none(),
            "duplicate subcommand '{}' in command '{}'",
            child.name,
            self.name
        );
        self.children.push(child);
        self
    }

    /// Run `handler` when this group is on the invocation chain
    pub fn on_invoke(mut self, handler: GroupFn<C>) -> Self {
        self.handler = Handler::Group(handler);
        self
    }

    /// Run `handler` when this command is the invoked leaf
    pub fn run(mut self, handler: LeafFn<C>) -> Self {
        self.handler = Handler::Leaf(handler);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn about_text(&self) -> Option<&'static str> {
        self.about
    }

    pub fn options(&self) -> &[OptionDecl] {
        &self.options
    }

    pub fn args(&self) -> &[ArgDecl] {
        &self.args
    }

    pub fn children(&self) -> &[Command<C>] {
        &self.children
    }

    pub fn handler(&self) -> &Handler<C> {
        &self.handler
    }

    pub fn is_group(&self) -> bool {
        !self.children.is_empty()
    }

    pub fn find_child(&self, name: &str) -> Option<&Command<C>> {
        self.children.iter().find(|c| c.name == name)
    }

    pub fn find_long(&self, long: &str) -> Option<&OptionDecl> {
        self.options.iter().find(|o| o.long == long)
    }

    pub fn find_short(&self, short: char) -> Option<&OptionDecl> {
        self.options.iter().find(|o| o.short == Some(short))
    }

    /// All declarations of `long` among this command's descendants
    pub(crate) fn descendant_options<'a>(&'a self, long: &str, out: &mut Vec<&'a OptionDecl>) {
        for child in &self.children {
            if let Some(decl) = child.find_long(long) {
                out.push(decl);
            }
            child.descendant_options(long, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_coercion() {
        assert_eq!(
            ValueKind::Integer.coerce("greet", "--repeat", "3"),
            Ok(Value::Integer(3))
        );
        assert_eq!(
            ValueKind::Integer.coerce("greet", "--repeat", "-2"),
            Ok(Value::Integer(-2))
        );
        assert!(matches!(
            ValueKind::Integer.coerce("greet", "--repeat", "abc"),
            Err(ParseError::InvalidOptionValue { .. })
        ));
    }

    #[test]
    fn test_stream_coercion() {
        assert_eq!(
            ValueKind::Stream.coerce("greet", "out", "-"),
            Ok(Value::Stream(StreamTarget::Std))
        );
        assert_eq!(
            ValueKind::Stream.coerce("greet", "out", "greeting.txt"),
            Ok(Value::Stream(StreamTarget::Path(PathBuf::from(
                "greeting.txt"
            ))))
        );
    }

    #[test]
    fn test_path_is_not_checked() {
        let value = ValueKind::Path.coerce("hello", "--home-directory", "/does/not/exist");
        assert_eq!(value, Ok(Value::Path(PathBuf::from("/does/not/exist"))));
    }

    #[test]
    fn test_flag_defaults_to_false() {
        let decl = OptionDecl::flag("verbose");
        assert_eq!(decl.default(), Some(&Value::Flag(false)));
        assert!(OptionDecl::integer("repeat").default().is_none());
    }

    #[test]
    #[should_panic(expected = "duplicate option")]
    fn test_duplicate_option_panics() {
        let _ = Command::<()>::new("greet")
            .option(OptionDecl::integer("repeat"))
            .option(OptionDecl::string("repeat"));
    }

    #[test]
    #[should_panic(expected = "duplicate option")]
    fn test_help_is_reserved() {
        let _ = Command::<()>::new("greet").option(OptionDecl::flag("help"));
    }

    #[test]
    #[should_panic(expected = "follows an optional one")]
    fn test_required_after_optional_panics() {
        let _ = Command::<()>::new("copy")
            .arg(ArgDecl::new("src", ValueKind::Path).default_value(Value::Path(".".into())))
            .arg(ArgDecl::new("dst", ValueKind::Path));
    }

    #[test]
    fn test_descendant_lookup() {
        let root = Command::<()>::new("root")
            .subcommand(Command::new("a").option(OptionDecl::integer("n")))
            .subcommand(
                Command::new("b").subcommand(Command::new("c").option(OptionDecl::flag("n"))),
            );

        let mut found = Vec::new();
        root.descendant_options("n", &mut found);
        assert_eq!(found.len(), 2);
        assert!(root.find_long("n").is_none());
    }
}
