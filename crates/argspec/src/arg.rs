use std::borrow::Cow;

use im::OrdSet;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::name::{self, NameShape};

/// Declaration of one argument, as handed to [`Parser::add_arg`](crate::Parser::add_arg).
///
/// The name decides the kind: `input` declares a positional argument,
/// `--verbose` an optional one. Every other field may stay empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Arg {
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub flag: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub default_value: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
}

impl Arg {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Short alias, with or without its leading `-`.
    pub fn flag(mut self, flag: impl Into<String>) -> Self {
        self.flag = flag.into();
        self
    }

    /// Initial value. `"true"`/`"false"` turns an optional argument into a switch.
    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default_value = value.into();
        self
    }

    pub fn choices<I, S>(mut self, choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.choices = choices.into_iter().map(Into::into).collect();
        self
    }

    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.description = text.into();
        self
    }
}

/// Read access shared by positional and optional argument specs.
pub trait ArgSpec {
    /// Registered name without any `--` prefix.
    fn name(&self) -> &str;

    /// Current value; empty means unset.
    fn value(&self) -> &str;

    /// Permitted values; empty means unconstrained.
    fn choices(&self) -> &OrdSet<String>;

    fn description(&self) -> &str;

    /// Short alias (optional arguments only).
    fn flag(&self) -> Option<char> {
        None
    }

    fn is_positional(&self) -> bool;

    fn is_switch(&self) -> bool {
        false
    }

    /// How the argument is named in messages: `<input>` or `--verbose`.
    fn display_name(&self) -> String {
        if self.is_positional() {
            format!("<{}>", self.name())
        } else {
            format!("--{}", self.name())
        }
    }

    /// Result-container key.
    fn key(&self) -> String {
        name::normalize(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Common {
    name: String,
    value: String,
    choices: OrdSet<String>,
    description: String,
}

impl Common {
    fn check(&self, display: &str, value: &str) -> Result<()> {
        if self.choices.is_empty() || value.is_empty() || self.choices.contains(value) {
            return Ok(());
        }
        Err(Error::InvalidChoice {
            name: display.to_string(),
            choices: self.choices.iter().cloned().collect(),
            value: value.to_string(),
            during_parse: false,
        })
    }
}

fn choice_set<I, S>(choices: I) -> OrdSet<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    choices.into_iter().map(Into::into).collect()
}

fn is_bool_literal(value: &str) -> bool {
    value.eq_ignore_ascii_case("true") || value.eq_ignore_ascii_case("false")
}

/// A mandatory argument identified by its position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionalArg {
    index: usize,
    common: Common,
}

impl PositionalArg {
    pub fn new<I, S>(
        index: usize,
        name: &str,
        value: impl Into<String>,
        choices: I,
        description: impl Into<String>,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let NameShape::Positional(bare) = name::classify_name(name) else {
            return Err(Error::MalformedName {
                name: name.to_string(),
            });
        };
        let spec = Self {
            index,
            common: Common {
                name: bare.to_string(),
                value: String::new(),
                choices: choice_set(choices),
                description: description.into(),
            },
        };
        Ok(spec.with_value(value)?.into_owned())
    }

    /// Zero-based position, fixed at registration.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Return a spec carrying `value`.
    ///
    /// When `value` equals the current value the very same spec comes back
    /// borrowed; otherwise a new one is built and checked against the choices.
    pub fn with_value(&self, value: impl Into<String>) -> Result<Cow<'_, Self>> {
        let value = value.into();
        if value == self.common.value {
            return Ok(Cow::Borrowed(self));
        }
        self.common.check(&self.display_name(), &value)?;
        let mut next = self.clone();
        next.common.value = value;
        Ok(Cow::Owned(next))
    }
}

impl ArgSpec for PositionalArg {
    fn name(&self) -> &str {
        &self.common.name
    }

    fn value(&self) -> &str {
        &self.common.value
    }

    fn choices(&self) -> &OrdSet<String> {
        &self.common.choices
    }

    fn description(&self) -> &str {
        &self.common.description
    }

    fn is_positional(&self) -> bool {
        true
    }
}

/// Built-in switches the dispatcher treats as outcome requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Builtin {
    Help,
    Version,
}

/// An argument selected by `--long` or `-s`, falling back to its default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionalArg {
    flag: Option<char>,
    builtin: Option<Builtin>,
    common: Common,
}

impl OptionalArg {
    pub fn new<I, S>(
        name: &str,
        flag: &str,
        value: impl Into<String>,
        choices: I,
        description: impl Into<String>,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let NameShape::Long(bare) = name::classify_name(name) else {
            return Err(Error::MalformedName {
                name: name.to_string(),
            });
        };
        let spec = Self {
            flag: None,
            builtin: None,
            common: Common {
                name: bare.to_string(),
                value: String::new(),
                choices: choice_set(choices),
                description: description.into(),
            },
        };
        let spec = spec.with_flag(flag)?.into_owned();
        Ok(spec.with_value(value)?.into_owned())
    }

    pub(crate) fn builtin(kind: Builtin, name: &str, flag: char, description: &str) -> Self {
        Self {
            flag: Some(flag),
            builtin: Some(kind),
            common: Common {
                name: name.to_string(),
                value: "false".to_string(),
                choices: OrdSet::new(),
                description: description.to_string(),
            },
        }
    }

    pub(crate) fn builtin_kind(&self) -> Option<Builtin> {
        self.builtin
    }

    /// See [`PositionalArg::with_value`].
    pub fn with_value(&self, value: impl Into<String>) -> Result<Cow<'_, Self>> {
        let value = value.into();
        if value == self.common.value {
            return Ok(Cow::Borrowed(self));
        }
        self.common.check(&self.display_name(), &value)?;
        let mut next = self.clone();
        next.common.value = value;
        Ok(Cow::Owned(next))
    }

    /// Attach a short alias. Empty text leaves the spec untouched; anything
    /// else must be one ASCII letter, optionally written as `-x`.
    pub fn with_flag(&self, flag: &str) -> Result<Cow<'_, Self>> {
        if flag.is_empty() {
            return Ok(Cow::Borrowed(self));
        }
        let Some(c) = name::parse_short_flag(flag) else {
            return Err(Error::MalformedFlag {
                name: self.display_name(),
                flag: flag.to_string(),
            });
        };
        if self.flag == Some(c) {
            return Ok(Cow::Borrowed(self));
        }
        let mut next = self.clone();
        next.flag = Some(c);
        Ok(Cow::Owned(next))
    }

    pub(crate) fn without_flag(&self) -> Self {
        Self {
            flag: None,
            ..self.clone()
        }
    }

    /// The switch with its boolean value flipped.
    pub fn toggled(&self) -> Result<Cow<'_, Self>> {
        let next = if self.common.value.eq_ignore_ascii_case("true") {
            "false"
        } else {
            "true"
        };
        self.with_value(next)
    }
}

impl ArgSpec for OptionalArg {
    fn name(&self) -> &str {
        &self.common.name
    }

    fn value(&self) -> &str {
        &self.common.value
    }

    fn choices(&self) -> &OrdSet<String> {
        &self.common.choices
    }

    fn description(&self) -> &str {
        &self.common.description
    }

    fn flag(&self) -> Option<char> {
        self.flag
    }

    fn is_positional(&self) -> bool {
        false
    }

    fn is_switch(&self) -> bool {
        is_bool_literal(&self.common.value)
    }
}

impl From<&PositionalArg> for Arg {
    fn from(spec: &PositionalArg) -> Self {
        Arg::new(spec.name())
            .default_value(spec.value())
            .choices(spec.choices().iter().cloned())
            .description(spec.description())
    }
}

impl From<&OptionalArg> for Arg {
    fn from(spec: &OptionalArg) -> Self {
        Arg::new(format!("--{}", spec.name()))
            .flag(spec.flag().map(String::from).unwrap_or_default())
            .default_value(spec.value())
            .choices(spec.choices().iter().cloned())
            .description(spec.description())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NONE: [&str; 0] = [];

    #[test]
    fn default_outside_choices_is_rejected() {
        let err = OptionalArg::new("--format", "", "xml", ["plain", "json"], "").unwrap_err();
        match err {
            Error::InvalidChoice {
                name,
                choices,
                value,
                ..
            } => {
                assert_eq!(name, "--format");
                assert_eq!(choices, vec!["json".to_string(), "plain".to_string()]);
                assert_eq!(value, "xml");
            }
            other => panic!("expected InvalidChoice, got: {other:?}"),
        }

        assert!(PositionalArg::new(0, "mode", "c", ["a", "b"], "").is_err());
        assert!(PositionalArg::new(0, "mode", "", ["a", "b"], "").is_ok());
        assert!(PositionalArg::new(0, "mode", "a", ["a", "b"], "").is_ok());
    }

    #[test]
    fn with_value_returns_same_spec_when_unchanged() {
        let spec = PositionalArg::new(0, "input", "a.txt", NONE, "").unwrap();
        let same = spec.with_value("a.txt").unwrap();
        assert!(matches!(same, Cow::Borrowed(_)));
        assert!(std::ptr::eq(same.as_ref(), &spec));

        let changed = spec.with_value("b.txt").unwrap();
        assert!(matches!(changed, Cow::Owned(_)));
        assert_eq!(changed.value(), "b.txt");
        assert_eq!(spec.value(), "a.txt");
    }

    #[test]
    fn with_value_is_idempotent() {
        let spec = OptionalArg::new("--level", "l", "", ["low", "high"], "").unwrap();
        let once = spec.with_value("high").unwrap().into_owned();
        let twice = once.with_value("high").unwrap().into_owned();
        assert_eq!(once, twice);
        assert!(spec.with_value("medium").is_err());
        assert!(spec.with_value("").is_ok());
    }

    #[test]
    fn flags_must_be_single_letters() {
        let spec = OptionalArg::new("--verbose", "", "false", NONE, "").unwrap();
        assert!(matches!(spec.with_flag("").unwrap(), Cow::Borrowed(_)));
        assert_eq!(spec.with_flag("-v").unwrap().flag(), Some('v'));
        assert_eq!(spec.with_flag("v").unwrap().flag(), Some('v'));
        for bad in ["vv", "--v", "7", "-"] {
            match spec.with_flag(bad) {
                Err(Error::MalformedFlag { flag, .. }) => assert_eq!(flag, bad),
                other => panic!("expected MalformedFlag for {bad:?}, got: {other:?}"),
            }
        }
    }

    #[test]
    fn names_are_checked_per_variant() {
        assert!(matches!(
            PositionalArg::new(0, "--opt", "", NONE, ""),
            Err(Error::MalformedName { .. })
        ));
        assert!(matches!(
            OptionalArg::new("opt", "", "", NONE, ""),
            Err(Error::MalformedName { .. })
        ));
        assert!(matches!(
            OptionalArg::new("-o", "", "", NONE, ""),
            Err(Error::MalformedName { .. })
        ));
    }

    #[test]
    fn switches_follow_boolean_values() {
        let switch = OptionalArg::new("--flag", "f", "false", NONE, "").unwrap();
        assert!(switch.is_switch());
        let on = switch.toggled().unwrap();
        assert_eq!(on.value(), "true");
        assert_eq!(on.toggled().unwrap().value(), "false");

        let loud = OptionalArg::new("--loud", "", "TRUE", NONE, "").unwrap();
        assert!(loud.is_switch());
        assert_eq!(loud.toggled().unwrap().value(), "false");

        let opt = OptionalArg::new("--out", "o", "a.txt", NONE, "").unwrap();
        assert!(!opt.is_switch());
    }

    #[test]
    fn display_and_key() {
        let opt = OptionalArg::new("--camel-case", "", "", NONE, "").unwrap();
        assert_eq!(opt.display_name(), "--camel-case");
        assert_eq!(opt.key(), "camelCase");
        let pos = PositionalArg::new(3, "out-dir", "", NONE, "").unwrap();
        assert_eq!(pos.display_name(), "<out-dir>");
        assert_eq!(pos.index(), 3);
    }

    #[test]
    fn declaration_round_trips_through_spec() {
        let spec = OptionalArg::new("--format", "-f", "plain", ["plain", "json"], "Output format")
            .unwrap();
        let arg = Arg::from(&spec);
        assert_eq!(
            arg,
            Arg::new("--format")
                .flag("f")
                .default_value("plain")
                .choices(["json", "plain"])
                .description("Output format")
        );
    }
}
