use thiserror::Error;

/// Everything that can go wrong while declaring a parser or parsing tokens.
///
/// `MalformedName`, `MalformedFlag` and `InvalidChoice` raised from
/// [`Parser::add_arg`](crate::Parser::add_arg) describe a broken declaration;
/// the rest describe bad input. `InvalidChoice` can be either, see
/// [`Error::is_spec_error`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("malformed argument name '{name}' (expected `name` or `--name` using letters, digits and '-')")]
    MalformedName { name: String },

    #[error("malformed flag '{flag}' for '{name}' (expected a single letter)")]
    MalformedFlag { name: String, flag: String },

    #[error("invalid value '{value}' for '{name}'. possible values: {}", .choices.join(", "))]
    InvalidChoice {
        name: String,
        choices: Vec<String>,
        value: String,
        during_parse: bool,
    },

    #[error("too many arguments: unexpected '{token}' (expected {expected} positional argument{})", plural(.expected))]
    TooManyArgs { token: String, expected: usize },

    #[error("too few arguments: missing {}", .missing.iter().map(|m| format!("<{m}>")).collect::<Vec<_>>().join(", "))]
    TooFewArgs { missing: Vec<String> },

    #[error("missing value for {flag}")]
    MissingValue { flag: String },

    #[error("unknown argument: {token}")]
    UnknownArg { token: String },

    /// `--help` was seen by [`Parser::parse_matches`](crate::Parser::parse_matches).
    #[error("{0}")]
    HelpRequested(String),

    /// `--version` was seen by [`Parser::parse_matches`](crate::Parser::parse_matches).
    #[error("{0}")]
    VersionRequested(String),
}

fn plural(n: &usize) -> &'static str {
    if *n == 1 { "" } else { "s" }
}

impl Error {
    /// Whether this error describes a broken declaration rather than bad input.
    pub fn is_spec_error(&self) -> bool {
        match self {
            Self::MalformedName { .. } | Self::MalformedFlag { .. } => true,
            Self::InvalidChoice { during_parse, .. } => !during_parse,
            _ => false,
        }
    }

    pub(crate) fn in_parse(self) -> Self {
        match self {
            Self::InvalidChoice {
                name,
                choices,
                value,
                ..
            } => Self::InvalidChoice {
                name,
                choices,
                value,
                during_parse: true,
            },
            other => other,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Lookup of a name that was never registered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no such argument: {name}")]
pub struct LookupError {
    pub name: String,
}

/// A resolved value could not be converted to the requested type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot convert '{value}' to {target}: {reason}")]
pub struct ConvertError {
    pub value: String,
    pub target: &'static str,
    pub reason: String,
}
