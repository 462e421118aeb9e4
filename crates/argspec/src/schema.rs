//! Parser declarations as data.
//!
//! A [`ParserSchema`] is the serializable form of a whole parser: program
//! name, description, version and the argument declarations in registration
//! order. It lets a parser be kept in a JSON (or any serde format) document
//! and rebuilt with the same validation as the builder calls.

use serde::{Deserialize, Serialize};

use crate::arg::Arg;
use crate::error::Result;
use crate::parser::{DEFAULT_PROGRAM, Parser};

fn default_program() -> String {
    DEFAULT_PROGRAM.to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ParserSchema {
    #[serde(default = "default_program")]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub version: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<Arg>,
}

impl Default for ParserSchema {
    fn default() -> Self {
        Self {
            name: default_program(),
            description: String::new(),
            version: String::new(),
            args: Vec::new(),
        }
    }
}

impl Parser {
    /// Build a parser from its declaration, registering args in order.
    pub fn from_schema(schema: &ParserSchema) -> Result<Self> {
        let mut parser = Parser::new(schema.name.as_str()).description(schema.description.as_str());
        for arg in &schema.args {
            parser = parser.add_arg(arg.clone())?;
        }
        if !schema.version.is_empty() {
            parser = parser.version(schema.version.as_str());
        }
        Ok(parser)
    }

    /// Export the current declarations. The implicit `--help`/`--version`
    /// switches are left out; `from_schema` adds them back.
    pub fn to_schema(&self) -> ParserSchema {
        let positionals = self.positionals().map(Arg::from);
        let optionals = self
            .optionals()
            .filter(|o| o.builtin_kind().is_none())
            .map(Arg::from);
        ParserSchema {
            name: self.program().to_string(),
            description: self.description_text().to_string(),
            version: self.version_string().to_string(),
            args: positionals.chain(optionals).collect(),
        }
    }
}

impl TryFrom<&ParserSchema> for Parser {
    type Error = crate::Error;

    fn try_from(schema: &ParserSchema) -> Result<Self> {
        Parser::from_schema(schema)
    }
}
