//! Conversions from resolved string values to richer types.
//!
//! These are plain functions over `&str`; apply them to values taken out of
//! [`Matches`](crate::Matches):
//!
//! ```
//! use argspec::{Arg, Parser, convert};
//!
//! let parser = Parser::default()
//!     .add_arg(Arg::new("--jobs").flag("j").default_value("4"))
//!     .unwrap();
//! let m = parser.parse_matches(&["-j", "8"]).unwrap();
//! let jobs: u32 = convert::to_number(m.get("jobs").unwrap()).unwrap();
//! assert_eq!(jobs, 8);
//! ```

use std::fmt::Display;
use std::str::FromStr;

use indexmap::{IndexMap, IndexSet};
use url::Url;

use crate::error::ConvertError;

fn fail(value: &str, target: &'static str, reason: impl Display) -> ConvertError {
    ConvertError {
        value: value.to_string(),
        target,
        reason: reason.to_string(),
    }
}

/// `true`/`yes`/`on`/`1` and `false`/`no`/`off`/`0`, ignoring ASCII case.
pub fn to_bool(value: &str) -> Result<bool, ConvertError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(fail(value, "bool", "expected true or false")),
    }
}

/// Any [`FromStr`] number (or other type with a displayable parse error).
pub fn to_number<T>(value: &str) -> Result<T, ConvertError>
where
    T: FromStr,
    T::Err: Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| fail(value, std::any::type_name::<T>(), e))
}

pub fn to_url(value: &str) -> Result<Url, ConvertError> {
    Url::parse(value).map_err(|e| fail(value, "url", e))
}

/// Comma-separated items; blanks are dropped and duplicates collapse.
pub fn to_set(value: &str) -> Result<IndexSet<String>, ConvertError> {
    Ok(value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect())
}

/// Comma-separated `key=value` pairs. A repeated key keeps its last value.
pub fn to_map(value: &str) -> Result<IndexMap<String, String>, ConvertError> {
    let mut out = IndexMap::new();
    for item in value.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let Some((k, v)) = item.split_once('=') else {
            return Err(fail(value, "map", format!("entry '{item}' is not key=value")));
        };
        let k = k.trim();
        if k.is_empty() {
            return Err(fail(value, "map", format!("entry '{item}' has an empty key")));
        }
        out.insert(k.to_string(), v.trim().to_string());
    }
    Ok(out)
}
