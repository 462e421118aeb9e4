use im::{HashMap, Vector};

use crate::arg::{Arg, ArgSpec, Builtin, OptionalArg, PositionalArg};
use crate::dispatch::{self, Resolved};
use crate::error::{Error, Result};
use crate::help;
use crate::matches::{Matches, ParseOutcome};
use crate::name::{self, NameShape};

pub const DEFAULT_PROGRAM: &str = "prog";

const HELP_NAME: &str = "help";
const HELP_FLAG: char = 'h';
const VERSION_NAME: &str = "version";
const VERSION_FLAG: char = 'V';

/// An immutable argument registry.
///
/// Every builder call returns a new `Parser` that shares untouched structure
/// with the one it came from, so a parser can be reused for any number of
/// parses, from any number of threads.
#[derive(Debug, Clone, PartialEq)]
pub struct Parser {
    program: String,
    description: String,
    version: String,
    positionals: Vector<PositionalArg>,
    optionals: Vector<OptionalArg>,
    by_name: HashMap<String, usize>,
    aliases: HashMap<char, String>,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRAM)
    }
}

impl Parser {
    /// Create a parser with the implicit `--help`/`-h` switch registered.
    pub fn new(program: impl Into<String>) -> Self {
        let parser = Self {
            program: program.into(),
            description: String::new(),
            version: String::new(),
            positionals: Vector::new(),
            optionals: Vector::new(),
            by_name: HashMap::new(),
            aliases: HashMap::new(),
        };
        parser.with_optional(OptionalArg::builtin(
            Builtin::Help,
            HELP_NAME,
            HELP_FLAG,
            "Show help information",
        ))
    }

    pub fn description(&self, text: impl Into<String>) -> Self {
        Self {
            description: text.into(),
            ..self.clone()
        }
    }

    /// Set the program version and register `--version`/`-V`, unless the
    /// caller already claimed that name or letter.
    pub fn version(&self, version: impl Into<String>) -> Self {
        let next = Self {
            version: version.into(),
            ..self.clone()
        };
        if next.by_name.contains_key(VERSION_NAME) {
            return next;
        }
        let mut spec = OptionalArg::builtin(
            Builtin::Version,
            VERSION_NAME,
            VERSION_FLAG,
            "Show version information",
        );
        if next.aliases.contains_key(&VERSION_FLAG) {
            spec = spec.without_flag();
        }
        next.with_optional(spec)
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn description_text(&self) -> &str {
        &self.description
    }

    pub fn version_string(&self) -> &str {
        &self.version
    }

    /// Register one argument, returning the extended parser.
    ///
    /// Re-registering an optional name replaces the earlier spec in place
    /// (last registration wins). A short flag already bound to another
    /// optional argument moves to the new one.
    pub fn add_arg(&self, arg: Arg) -> Result<Self> {
        let Arg {
            name,
            flag,
            default_value,
            choices,
            description,
        } = arg;

        match name::classify_name(&name) {
            NameShape::Positional(_) => {
                if !flag.is_empty() {
                    return Err(Error::MalformedFlag {
                        name: format!("<{name}>"),
                        flag,
                    });
                }
                let spec = PositionalArg::new(
                    self.positionals.len(),
                    &name,
                    default_value,
                    choices,
                    description,
                )?;
                tracing::trace!(name = %spec.name(), index = spec.index(), "registered positional");
                let mut next = self.clone();
                next.positionals.push_back(spec);
                Ok(next)
            }
            NameShape::Long(_) => {
                let spec = OptionalArg::new(&name, &flag, default_value, choices, description)?;
                tracing::trace!(name = %spec.name(), flag = ?spec.flag(), "registered optional");
                Ok(self.with_optional(spec))
            }
            NameShape::Malformed => Err(Error::MalformedName { name }),
        }
    }

    /// Shorthand for `add_arg(Arg::new(name))`.
    pub fn add(&self, name: impl Into<String>) -> Result<Self> {
        self.add_arg(Arg::new(name))
    }

    fn with_optional(&self, spec: OptionalArg) -> Self {
        let mut next = self.clone();
        let name = spec.name().to_string();

        let existing = next.by_name.get(&name).copied();
        let idx = match existing {
            Some(idx) => {
                next.aliases.retain(|_, target| *target != name);
                next.optionals.set(idx, spec.clone());
                idx
            }
            None => {
                let idx = next.optionals.len();
                next.optionals.push_back(spec.clone());
                next.by_name.insert(name.clone(), idx);
                idx
            }
        };

        if let Some(flag) = spec.flag() {
            if let Some(previous) = next.aliases.insert(flag, name) {
                if let Some(&prev_idx) = next.by_name.get(&previous) {
                    if prev_idx != idx {
                        let stripped = next.optionals[prev_idx].without_flag();
                        next.optionals.set(prev_idx, stripped);
                    }
                }
            }
        }
        next
    }

    pub fn positionals(&self) -> impl Iterator<Item = &PositionalArg> {
        self.positionals.iter()
    }

    /// Optional arguments in registration order.
    pub fn optionals(&self) -> impl Iterator<Item = &OptionalArg> {
        self.optionals.iter()
    }

    pub fn positional_count(&self) -> usize {
        self.positionals.len()
    }

    /// Look up an optional argument by long name, with or without `--`.
    pub fn get_optional(&self, name: &str) -> Option<&OptionalArg> {
        let bare = name.strip_prefix("--").unwrap_or(name);
        self.optional_index(bare).map(|idx| &self.optionals[idx])
    }

    /// Look up the optional argument a short flag is an alias for.
    pub fn resolve_flag(&self, flag: char) -> Option<&OptionalArg> {
        self.alias_index(flag).map(|idx| &self.optionals[idx])
    }

    pub(crate) fn optional_index(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }

    pub(crate) fn alias_index(&self, flag: char) -> Option<usize> {
        self.aliases
            .get(&flag)
            .and_then(|long| self.optional_index(long))
    }

    pub(crate) fn positional_at(&self, index: usize) -> Option<&PositionalArg> {
        self.positionals.get(index)
    }

    pub(crate) fn optional_at(&self, index: usize) -> Option<&OptionalArg> {
        self.optionals.get(index)
    }

    pub(crate) fn set_positional(&self, index: usize, spec: PositionalArg) -> Self {
        let mut next = self.clone();
        next.positionals.set(index, spec);
        next
    }

    pub(crate) fn set_optional(&self, index: usize, spec: OptionalArg) -> Self {
        let mut next = self.clone();
        next.optionals.set(index, spec);
        next
    }

    /// Render the help text for this parser.
    pub fn help(&self) -> String {
        help::render(self)
    }

    /// `"<program> <version>\n"`, or just the program name when no version is set.
    pub fn version_text(&self) -> String {
        if self.version.trim().is_empty() {
            format!("{}\n", self.program)
        } else {
            format!("{} {}\n", self.program, self.version.trim())
        }
    }

    /// Parse `tokens` against this parser.
    ///
    /// The parser itself is never modified; values are resolved on a derived
    /// copy that is folded into the returned [`Matches`].
    pub fn parse<S: AsRef<str>>(&self, tokens: &[S]) -> Result<ParseOutcome> {
        tracing::debug!(program = %self.program, tokens = tokens.len(), "parsing arguments");
        let outcome = match dispatch::run(self, tokens) {
            Ok(Resolved::Complete(resolved)) => ParseOutcome::Matches(Matches::fold(&resolved)),
            Ok(Resolved::Help) => ParseOutcome::Help(self.help()),
            Ok(Resolved::Version) => ParseOutcome::Version(self.version_text()),
            Err(err) => {
                tracing::debug!(error = %err, "argument parsing failed");
                return Err(err);
            }
        };
        Ok(outcome)
    }

    /// Like [`Parser::parse`], but reports help and version requests as errors.
    pub fn parse_matches<S: AsRef<str>>(&self, tokens: &[S]) -> Result<Matches> {
        match self.parse(tokens)? {
            ParseOutcome::Matches(m) => Ok(m),
            ParseOutcome::Help(text) => Err(Error::HelpRequested(text)),
            ParseOutcome::Version(text) => Err(Error::VersionRequested(text)),
        }
    }
}
