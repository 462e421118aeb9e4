//! Declarative command-line argument parsing.
//!
//! Register positional (`input`) and optional (`--output`, `-o`) arguments
//! on an immutable [`Parser`], then hand it a token list:
//!
//! ```
//! use argspec::{Arg, ParseOutcome, Parser};
//!
//! let parser = Parser::new("copy")
//!     .add("src")?
//!     .add("dst")?
//!     .add_arg(Arg::new("--force").flag("f").default_value("false"))?
//!     .add_arg(Arg::new("--mode").default_value("fast").choices(["fast", "safe"]))?;
//!
//! let ParseOutcome::Matches(m) = parser.parse(&["-f", "a.txt", "b.txt"])? else {
//!     unreachable!("no --help given");
//! };
//! assert_eq!(m.get("src")?, "a.txt");
//! assert_eq!(m.get("force")?, "true");
//! assert_eq!(m.get("mode")?, "fast");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Parsing rules, in short:
//! - options come first; once a positional value is taken, any further
//!   flag-shaped token is rejected;
//! - every positional argument must receive a value;
//! - an optional argument whose value is `"true"`/`"false"` is a switch: each
//!   occurrence flips it and it never takes a value token;
//! - `-h`/`--help` (and `-V`/`--version` once a version is set) stop parsing
//!   and yield [`ParseOutcome::Help`]/[`ParseOutcome::Version`].

mod arg;
pub mod convert;
mod dispatch;
mod error;
mod help;
mod matches;
pub mod name;
mod parser;
mod schema;

pub use arg::{Arg, ArgSpec, OptionalArg, PositionalArg};
pub use error::{ConvertError, Error, LookupError, Result};
pub use matches::{Matches, ParseOutcome};
pub use parser::{DEFAULT_PROGRAM, Parser};
pub use schema::ParserSchema;
