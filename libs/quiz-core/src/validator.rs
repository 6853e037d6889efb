//! Dialect-agnostic structural checks run before a quiz is stored.

use crate::error::ValidationError;
use crate::types::Question;

/// Check every question, stopping at the first problem.
pub fn validate(questions: &[Question]) -> Result<(), ValidationError> {
    if questions.is_empty() {
        return Err(ValidationError::Empty);
    }

    for (idx, q) in questions.iter().enumerate() {
        validate_question(q, idx + 1)?;
    }
    Ok(())
}

fn validate_question(q: &Question, number: usize) -> Result<(), ValidationError> {
    if q.text.trim().is_empty() {
        return Err(ValidationError::MissingText { question: number });
    }

    let count = q.options.len();
    if count == 0 {
        return Err(ValidationError::MissingOptions { question: number });
    }
    if count < 2 {
        return Err(ValidationError::TooFewOptions {
            question: number,
            count,
        });
    }

    if let Some(blank) = q.options.iter().position(|o| o.trim().is_empty()) {
        return Err(ValidationError::EmptyOption {
            question: number,
            option: blank + 1,
        });
    }

    if q.correct >= count {
        return Err(ValidationError::CorrectOutOfRange {
            question: number,
            correct: q.correct,
            count,
        });
    }

    Ok(())
}
