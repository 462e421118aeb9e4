//! Token dispatch: one left-to-right pass over the raw tokens.
//!
//! Each transition consumes one token (two for an option that takes a value)
//! and yields a new [`State`] whose registry carries the value just set.
//! Nothing is written back to the caller's parser; a failure simply drops
//! the partially resolved copy.

use crate::arg::{ArgSpec, Builtin};
use crate::error::{Error, Result};
use crate::name::{self, Token};
use crate::parser::Parser;

pub(crate) enum Resolved {
    Complete(Parser),
    Help,
    Version,
}

struct State<'t, S> {
    remaining: &'t [S],
    /// Number of positional values taken so far.
    filled: usize,
    /// Set once a positional value was taken; options are rejected afterwards.
    cutoff: bool,
    registry: Parser,
}

enum Step<'t, S> {
    Next(State<'t, S>),
    Halt(Resolved),
}

pub(crate) fn run<S: AsRef<str>>(parser: &Parser, tokens: &[S]) -> Result<Resolved> {
    let mut state = State {
        remaining: tokens,
        filled: 0,
        cutoff: false,
        registry: parser.clone(),
    };
    loop {
        state = match state.step()? {
            Step::Next(next) => next,
            Step::Halt(resolved) => return Ok(resolved),
        };
    }
}

impl<'t, S: AsRef<str>> State<'t, S> {
    fn step(self) -> Result<Step<'t, S>> {
        let remaining = self.remaining;
        let Some((head, rest)) = remaining.split_first() else {
            return self.finish();
        };
        let head = head.as_ref();

        let target = match name::classify_token(head) {
            Token::Positional(value) => return self.take_positional(value, rest),
            Token::LongOption(long) => self.registry.optional_index(long),
            Token::ShortOption(short) => self.registry.alias_index(short),
            Token::Malformed(token) => {
                return Err(Error::UnknownArg {
                    token: token.to_string(),
                });
            }
        };

        let Some(index) = target else {
            return Err(Error::UnknownArg {
                token: head.to_string(),
            });
        };
        let Some(spec) = self.registry.optional_at(index) else {
            return Err(Error::UnknownArg {
                token: head.to_string(),
            });
        };

        match spec.builtin_kind() {
            Some(Builtin::Help) => return Ok(Step::Halt(Resolved::Help)),
            Some(Builtin::Version) => return Ok(Step::Halt(Resolved::Version)),
            None => {}
        }

        if self.cutoff {
            return Err(Error::UnknownArg {
                token: head.to_string(),
            });
        }

        if spec.is_switch() {
            let toggled = spec.toggled().map_err(Error::in_parse)?.into_owned();
            tracing::trace!(flag = head, value = toggled.value(), "toggled switch");
            let registry = self.registry.set_optional(index, toggled);
            return Ok(Step::Next(State {
                remaining: rest,
                registry,
                ..self
            }));
        }

        let (value, rest) = match rest.split_first() {
            Some((value, rest)) if name::is_value_token(value.as_ref()) => (value.as_ref(), rest),
            _ => {
                return Err(Error::MissingValue {
                    flag: head.to_string(),
                });
            }
        };
        let updated = spec.with_value(value).map_err(Error::in_parse)?.into_owned();
        tracing::trace!(flag = head, value, "set option");
        let registry = self.registry.set_optional(index, updated);
        Ok(Step::Next(State {
            remaining: rest,
            registry,
            ..self
        }))
    }

    fn take_positional(self, value: &str, rest: &'t [S]) -> Result<Step<'t, S>> {
        let expected = self.registry.positional_count();
        let Some(spec) = self.registry.positional_at(self.filled) else {
            return Err(Error::TooManyArgs {
                token: value.to_string(),
                expected,
            });
        };
        let updated = spec.with_value(value).map_err(Error::in_parse)?.into_owned();
        tracing::trace!(index = self.filled, value, "set positional");
        let registry = self.registry.set_positional(self.filled, updated);
        Ok(Step::Next(State {
            remaining: rest,
            filled: self.filled + 1,
            cutoff: true,
            registry,
        }))
    }

    fn finish(self) -> Result<Step<'t, S>> {
        if self.filled == self.registry.positional_count() {
            return Ok(Step::Halt(Resolved::Complete(self.registry)));
        }
        let missing = self
            .registry
            .positionals()
            .skip(self.filled)
            .map(|spec| spec.name().to_string())
            .collect();
        Err(Error::TooFewArgs { missing })
    }
}
