//! Core types for the quiz application.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Answer value recorded for a question the student never answered.
pub const UNANSWERED: i64 = -1;

/// A single multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub text: String,
    pub options: Vec<String>,
    /// Zero-based index into `options`.
    pub correct: usize,
}

impl Question {
    pub fn new(text: impl Into<String>, options: Vec<String>, correct: usize) -> Self {
        Self {
            text: text.into(),
            options,
            correct,
        }
    }

    /// Whether `answer` selects the correct option. `UNANSWERED` never matches.
    pub fn is_correct(&self, answer: i64) -> bool {
        usize::try_from(answer).map_or(false, |a| a == self.correct)
    }
}

/// A stored quiz. Immutable after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quiz {
    pub id: i64,
    pub title: String,
    pub questions: Vec<Question>,
    pub timer_minutes: u32,
    pub created_at: DateTime<Utc>,
}

impl Quiz {
    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }
}

/// Outcome of scoring one attempt.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub score: u32,
    pub total: u32,
    /// Rounded to one decimal place.
    pub percentage: f64,
}

impl Score {
    pub fn passed(&self, passing_percentage: f64) -> bool {
        self.percentage >= passing_percentage
    }
}

/// A persisted quiz attempt.
///
/// `quiz_title` is a snapshot so history stays readable after the quiz
/// itself has been deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizResult {
    pub id: i64,
    pub quiz_id: i64,
    pub quiz_title: String,
    pub score: u32,
    pub total: u32,
    pub percentage: f64,
    /// One entry per question, `UNANSWERED` for skipped ones.
    pub answers: Vec<i64>,
    pub taken_at: DateTime<Utc>,
}

/// One row of the post-quiz review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewItem {
    /// 1-based question number.
    pub number: usize,
    pub question: Question,
    pub user_answer: i64,
    pub correct_answer: usize,
    pub is_correct: bool,
}
