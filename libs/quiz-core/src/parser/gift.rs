//! Delimited-block (GIFT-style) quiz parser.
//!
//! # Format
//! ```text
//! ::Q1:: What is 2+2? {
//! =4
//! ~3
//! ~5
//! }
//! ```
//!
//! `=` marks the correct option, `~` an incorrect one. Other lines inside
//! the braces are ignored. A backslash escapes `: = { } ~ # " ' \`, and
//! `\n` / `\t` stand for newline and tab.
//!
//! This parser is lenient: questions that are missing a correct marker or
//! have fewer than two usable options are dropped rather than reported.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::Question;

static QUESTION_SPAN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)::((?:\\.|[^:\\])+)::\s*((?:\\.|[^{\\])+?)\s*\{((?:\\.|[^}\\])+)\}")
        .expect("question span pattern is valid")
});

/// Parse GIFT-style content into questions, silently skipping malformed ones.
pub fn parse(content: &str) -> Vec<Question> {
    QUESTION_SPAN
        .captures_iter(content)
        .filter_map(|caps| {
            let body = caps.get(2).map_or("", |m| m.as_str());
            let block = caps.get(3).map_or("", |m| m.as_str());
            parse_question(body, block)
        })
        .collect()
}

fn parse_question(body: &str, block: &str) -> Option<Question> {
    let text = unescape(body.trim());

    let mut options = Vec::new();
    let mut correct = None;

    // Unescape per line, after splitting, so `\=` and `\~` never act as markers.
    for line in block.lines().map(str::trim).filter(|l| !l.is_empty()) {
        let (is_correct, rest) = match Marker::classify(line) {
            Some((Marker::Correct, rest)) => (true, rest),
            Some((Marker::Incorrect, rest)) => (false, rest),
            None => continue,
        };

        let option = unescape(rest);
        if option.is_empty() {
            continue;
        }
        if is_correct {
            correct = Some(options.len());
        }
        options.push(option);
    }

    let correct = correct?;
    if text.is_empty() || options.len() < 2 {
        return None;
    }

    Some(Question {
        text,
        options,
        correct,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Marker {
    Correct,
    Incorrect,
}

impl Marker {
    fn classify(line: &str) -> Option<(Self, &str)> {
        if let Some(rest) = line.strip_prefix('=') {
            Some((Self::Correct, rest))
        } else {
            line.strip_prefix('~').map(|rest| (Self::Incorrect, rest))
        }
    }
}

/// Resolve escape sequences in a single pass and trim the result.
///
/// Unknown escapes are kept verbatim, backslash included.
pub fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some(e @ ('\\' | ':' | '=' | '{' | '}' | '~' | '#' | '"' | '\'')) => out.push(e),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }

    out.trim().to_string()
}
