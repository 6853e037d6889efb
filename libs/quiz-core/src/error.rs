//! Error types for quiz-core.

use thiserror::Error;

/// Result type alias using ParseError.
pub type Result<T> = std::result::Result<T, ParseError>;

/// Hard failures raised while parsing a structured-list (YAML) quiz.
///
/// Item numbers are 1-based, matching what an author sees in their file.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid YAML format: {0}")]
    InvalidDocument(String),

    #[error("YAML must contain a list of questions")]
    NotAList,

    #[error("Question {item} missing '{field}' field")]
    MissingField { item: usize, field: &'static str },

    #[error("Question {item} must have at least 2 options")]
    TooFewOptions { item: usize },

    #[error("Question {item} has invalid 'correct' index")]
    InvalidCorrect { item: usize },

    #[error("Question {item} must have at least 2 non-empty options")]
    TooFewNonEmptyOptions { item: usize },

    #[error("No valid questions found in YAML")]
    NoQuestions,

    #[error("Unknown quiz format: {0}")]
    UnknownFormat(String),
}

/// First structural problem found in a normalized question list.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("No questions found")]
    Empty,

    #[error("Question {question} has no text")]
    MissingText { question: usize },

    #[error("Question {question} has no options")]
    MissingOptions { question: usize },

    #[error("Question {question} has only {count} option(s), need at least 2")]
    TooFewOptions { question: usize, count: usize },

    #[error("Question {question}, option {option} is empty")]
    EmptyOption { question: usize, option: usize },

    #[error("Question {question} has invalid correct answer index {correct} (only {count} options)")]
    CorrectOutOfRange {
        question: usize,
        correct: usize,
        count: usize,
    },
}

impl ValidationError {
    /// 1-based number of the offending question, if any.
    pub fn question_number(&self) -> Option<usize> {
        match self {
            Self::Empty => None,
            Self::MissingText { question }
            | Self::MissingOptions { question }
            | Self::TooFewOptions { question, .. }
            | Self::EmptyOption { question, .. }
            | Self::CorrectOutOfRange { question, .. } => Some(*question),
        }
    }
}

/// Illegal quiz-session transitions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("quiz {quiz_id} has no completed attempt in this session")]
    NotCompleted { quiz_id: i64 },
}
