//! Structured-list (YAML) quiz parser.
//!
//! # Format
//! ```yaml
//! - question: "What is 2+2?"
//!   options: ["3", "4", "5"]
//!   correct: 1
//! ```
//!
//! Unlike the GIFT parser this one is strict: the first bad item aborts
//! the whole document with an item-numbered error.

use serde_yml::{Mapping, Value};

use crate::error::{ParseError, Result};
use crate::types::Question;

/// Parse a YAML document into questions.
pub fn parse(content: &str) -> Result<Vec<Question>> {
    let document: Value =
        serde_yml::from_str(content).map_err(|e| ParseError::InvalidDocument(e.to_string()))?;

    let items = match document {
        Value::Sequence(items) => items,
        _ => return Err(ParseError::NotAList),
    };

    let mut questions = Vec::with_capacity(items.len());
    for (idx, item) in items.iter().enumerate() {
        // Non-mapping entries carry no question and are skipped.
        if let Value::Mapping(map) = item {
            questions.push(parse_item(map, idx + 1)?);
        }
    }

    if questions.is_empty() {
        return Err(ParseError::NoQuestions);
    }
    Ok(questions)
}

fn parse_item(map: &Mapping, item: usize) -> Result<Question> {
    let field = |name: &'static str| {
        map.get(name)
            .ok_or(ParseError::MissingField { item, field: name })
    };

    let question = field("question")?;
    let raw_options = field("options")?;
    let raw_correct = field("correct")?;

    let raw_options = match raw_options {
        Value::Sequence(opts) if opts.len() >= 2 => opts,
        _ => return Err(ParseError::TooFewOptions { item }),
    };

    let correct = raw_correct
        .as_i64()
        .and_then(|c| usize::try_from(c).ok())
        .filter(|&c| c < raw_options.len())
        .ok_or(ParseError::InvalidCorrect { item })?;

    // Drop blank options, tracking where the marked one lands afterwards.
    let mut options = Vec::with_capacity(raw_options.len());
    let mut remapped = None;
    for (idx, raw) in raw_options.iter().enumerate() {
        let option = scalar_to_string(raw).trim().to_string();
        if option.is_empty() {
            continue;
        }
        if idx == correct {
            remapped = Some(options.len());
        }
        options.push(option);
    }

    if options.len() < 2 {
        return Err(ParseError::TooFewNonEmptyOptions { item });
    }
    let correct = remapped.ok_or(ParseError::InvalidCorrect { item })?;

    Ok(Question {
        text: scalar_to_string(question),
        options,
        correct,
    })
}

/// Render any YAML value as the text an author would expect to see.
fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Tagged(tagged) => scalar_to_string(&tagged.value),
        other => serde_yml::to_string(other)
            .map(|s| s.trim().to_string())
            .unwrap_or_default(),
    }
}
