//! Shell-style glob patterns over facet values and file names.
//!
//! Supports `*` (any run, including `/`), `?` (any one character), and
//! bracket classes `[abc]`, `[a-z]`, `[!abc]`. An unterminated `[` matches
//! itself and a reversed range such as `[z-a]` is empty. Matching is
//! case-sensitive and anchored at both ends.

use regex::Regex;

use crate::error::SearchError;

/// A compiled glob pattern.
#[derive(Debug, Clone)]
pub struct GlobPattern {
    source: String,
    regex: Regex,
}

impl GlobPattern {
    pub fn new(pattern: &str) -> Result<Self, SearchError> {
        let translated = translate(pattern);
        let regex = Regex::new(&translated).map_err(|e| SearchError::InvalidPattern {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })?;
        Ok(Self {
            source: pattern.to_string(),
            regex,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn matches(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    /// Whether the pattern has no wildcard and only matches itself.
    pub fn is_literal(&self) -> bool {
        !has_magic(&self.source)
    }
}

/// Whether `pattern` contains any glob metacharacter.
pub fn has_magic(pattern: &str) -> bool {
    pattern.contains(['*', '?', '['])
}

fn translate(pattern: &str) -> String {
    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::from(r"(?s)\A");
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        i += 1;
        match c {
            '*' => {
                while i < chars.len() && chars[i] == '*' {
                    i += 1;
                }
                out.push_str(".*");
            }
            '?' => out.push('.'),
            '[' => match class_end(&chars, i) {
                Some(end) => {
                    out.push_str(&translate_class(&chars[i..end]));
                    i = end + 1;
                }
                None => out.push_str(r"\["),
            },
            other => out.push_str(&regex::escape(other.encode_utf8(&mut [0; 4]))),
        }
    }
    out.push_str(r"\z");
    out
}

/// Index of the `]` closing a class whose body starts at `start`.
fn class_end(chars: &[char], start: usize) -> Option<usize> {
    let mut j = start;
    if j < chars.len() && chars[j] == '!' {
        j += 1;
    }
    if j < chars.len() && chars[j] == ']' {
        j += 1;
    }
    while j < chars.len() && chars[j] != ']' {
        j += 1;
    }
    (j < chars.len()).then_some(j)
}

/// Reversed ranges such as `z-a` are empty and dropped. A class left with no
/// members matches nothing, or any character when negated.
fn translate_class(body: &[char]) -> String {
    let (negated, rest) = match body.split_first() {
        Some(('!', tail)) => (true, tail),
        _ => (false, body),
    };

    let mut members = String::new();
    let mut i = 0;
    while i < rest.len() {
        if i + 2 < rest.len() && rest[i + 1] == '-' {
            let (lo, hi) = (rest[i], rest[i + 2]);
            if lo <= hi {
                push_class_char(&mut members, lo);
                members.push('-');
                push_class_char(&mut members, hi);
            }
            i += 3;
        } else {
            push_class_char(&mut members, rest[i]);
            i += 1;
        }
    }

    match (members.is_empty(), negated) {
        (true, false) => r"[^\s\S]".to_string(),
        (true, true) => ".".to_string(),
        (false, false) => format!("[{members}]"),
        (false, true) => format!("[^{members}]"),
    }
}

fn push_class_char(out: &mut String, c: char) {
    if matches!(c, '\\' | '[' | ']' | '^' | '&' | '~' | '-') {
        out.push('\\');
    }
    out.push(c);
}
