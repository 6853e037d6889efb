//! Core quiz library used by the QuizFlow backend.
//!
//! Provides:
//! - Parsers for the two quiz authoring formats (GIFT blocks, YAML lists)
//! - Structural validation of parsed questions
//! - Scoring
//! - The per-student quiz progress state machine
//! - Shared types (Question, Quiz, QuizResult, etc.)

pub mod error;
pub mod parser;
pub mod scoring;
pub mod session;
pub mod types;
pub mod validator;

pub use error::{ParseError, Result, SessionError, ValidationError};
pub use parser::{parse, Format};
pub use scoring::score;
pub use session::{Action, Attempt, CompletedAttempt, Navigation, QuizProgress, QuizSessions};
pub use types::{Question, Quiz, QuizResult, ReviewItem, Score, UNANSWERED};
pub use validator::validate;
