//! Shape tests for registered names, short flags and raw tokens.

/// What a registered name turned out to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameShape<'a> {
    /// `input`, `out-dir`
    Positional(&'a str),
    /// `--verbose`; carries the name without its prefix.
    Long(&'a str),
    /// Anything else (`-v`, `--`, `in file`, ...).
    Malformed,
}

/// How the dispatch loop sees one raw token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// A value: non-empty, does not start with `-`.
    Positional(&'a str),
    /// `--name`, without the prefix.
    LongOption(&'a str),
    /// `-x`, without the prefix.
    ShortOption(char),
    /// Empty, lone `-`, bare `--`, `-abc`, `--bad=shape`, ...
    Malformed(&'a str),
}

fn is_word(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphanumeric() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '-')
}

/// Classify a name passed at registration time.
pub fn classify_name(name: &str) -> NameShape<'_> {
    if let Some(long) = name.strip_prefix("--") {
        if is_word(long) {
            return NameShape::Long(long);
        }
        return NameShape::Malformed;
    }
    if is_word(name) {
        NameShape::Positional(name)
    } else {
        NameShape::Malformed
    }
}

/// Parse a short flag as supplied by a caller (`"v"` or `"-v"`).
///
/// Returns `None` when the text is not exactly one ASCII letter after
/// stripping a single leading `-`.
pub fn parse_short_flag(flag: &str) -> Option<char> {
    let bare = flag.strip_prefix('-').unwrap_or(flag);
    let mut chars = bare.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphabetic() => Some(c),
        _ => None,
    }
}

/// Whether a token can be consumed as a value (rule 1 of dispatch).
pub fn is_value_token(token: &str) -> bool {
    !token.is_empty() && !token.starts_with('-')
}

pub fn classify_token(token: &str) -> Token<'_> {
    if is_value_token(token) {
        return Token::Positional(token);
    }
    if let Some(long) = token.strip_prefix("--") {
        return if is_word(long) {
            Token::LongOption(long)
        } else {
            Token::Malformed(token)
        };
    }
    if let Some(short) = token.strip_prefix('-') {
        let mut chars = short.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Token::ShortOption(c);
        }
    }
    Token::Malformed(token)
}

/// Normalize an argument name into its result-container key.
///
/// Leading hyphens are stripped, the rest is split on `-` and `_`, the first
/// segment is lower-cased and every following segment gets an upper-cased
/// first letter: `--camel-case` becomes `camelCase`.
pub fn normalize(name: &str) -> String {
    let trimmed = name.trim_start_matches('-');
    let mut out = String::with_capacity(trimmed.len());
    for (i, segment) in trimmed
        .split(['-', '_'])
        .filter(|s| !s.is_empty())
        .enumerate()
    {
        if i == 0 {
            out.push_str(&segment.to_lowercase());
            continue;
        }
        let mut chars = segment.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }
    out
}
