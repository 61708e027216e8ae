use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

// Each pattern matches a single character that is NOT allowed.
static NICKNAME_DISALLOWED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_\-]").expect("nickname pattern"));
static CONTENT_DISALLOWED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"[^A-Za-z0-9\s.,!?;:'"()\-@#&]"#).expect("content pattern")
});

/// Character allow-lists for submitted fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Charset {
    /// Letters, digits, hyphen and underscore
    Nickname,
    /// Letters, digits, whitespace and `. , ! ? ; : ' " ( ) - @ # &`
    Content,
}

impl Charset {
    fn disallowed(&self) -> &'static Regex {
        match self {
            Charset::Nickname => &NICKNAME_DISALLOWED,
            Charset::Content => &CONTENT_DISALLOWED,
        }
    }

    /// Human readable description, used in warnings
    pub fn describe(&self) -> &'static str {
        match self {
            Charset::Nickname => "letters, numbers, hyphens and underscores",
            Charset::Content => "letters, numbers, spaces and basic punctuation",
        }
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Charset::Nickname => write!(f, "nickname"),
            Charset::Content => write!(f, "content"),
        }
    }
}

/// True when every character of `text` is in the allow-list.
pub fn validate_charset(text: &str, charset: Charset) -> bool {
    !charset.disallowed().is_match(text)
}

/// Result of stripping disallowed characters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sanitized {
    pub text: String,
    /// Characters that were dropped, in order of appearance
    pub removed: Vec<char>,
}

impl Sanitized {
    pub fn changed(&self) -> bool {
        !self.removed.is_empty()
    }
}

/// Strip every character outside the allow-list.
pub fn sanitize(text: &str, charset: Charset) -> Sanitized {
    let pattern = charset.disallowed();
    let removed = pattern
        .find_iter(text)
        .flat_map(|m| m.as_str().chars())
        .collect();
    let text = pattern.replace_all(text, "").into_owned();
    Sanitized { text, removed }
}
