use indexmap::IndexMap;
use serde::Serialize;

use crate::arg::ArgSpec;
use crate::error::LookupError;
use crate::name;
use crate::parser::Parser;

/// Resolved values keyed by normalized (camel-cased) argument name.
///
/// Keys appear in fold order: positional arguments by index, then optional
/// arguments by registration order. It serializes as a flat JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Matches {
    values: IndexMap<String, String>,
}

impl Matches {
    pub(crate) fn fold(parser: &Parser) -> Self {
        let mut values = IndexMap::new();
        let positionals = parser.positionals().map(|p| (p.key(), p.value()));
        let optionals = parser.optionals().map(|o| (o.key(), o.value()));
        for (key, value) in positionals.chain(optionals) {
            values.insert(key, value.to_string());
        }
        Self { values }
    }

    /// Value for `name`.
    ///
    /// `name` may be the normalized key (`camelCase`) or anything that
    /// normalizes to it (`--camel-case`, `camel_case`).
    pub fn get(&self, name: &str) -> Result<&str, LookupError> {
        if let Some(value) = self.values.get(name) {
            return Ok(value.as_str());
        }
        self.values
            .get(&name::normalize(name))
            .map(String::as_str)
            .ok_or_else(|| LookupError {
                name: name.to_string(),
            })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_ok()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn into_map(self) -> IndexMap<String, String> {
        self.values
    }
}

/// What a successful call to [`Parser::parse`](crate::Parser::parse) produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    Matches(Matches),
    /// `--help` was given; carries the rendered help text.
    Help(String),
    /// `--version` was given; carries the version line.
    Version(String),
}
