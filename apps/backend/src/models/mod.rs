//! Database models and API types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

// Re-export shared types from quiz-core
pub use quiz_core::{Question, Quiz, QuizResult, ReviewItem, Score};

// === Database Entity Types ===

/// Quiz row in SQLite
#[derive(Debug, Clone, FromRow)]
pub struct DbQuiz {
    pub id: i64,
    pub title: String,
    pub questions: Json<Vec<Question>>,
    pub timer_minutes: i64,
    pub created_at: DateTime<Utc>,
}

impl DbQuiz {
    /// Convert to the core quiz type
    pub fn into_quiz(self) -> Quiz {
        Quiz {
            id: self.id,
            title: self.title,
            questions: self.questions.0,
            timer_minutes: self.timer_minutes.max(0) as u32,
            created_at: self.created_at,
        }
    }
}

/// Result row in SQLite
#[derive(Debug, Clone, FromRow)]
pub struct DbResult {
    pub id: i64,
    pub quiz_id: i64,
    pub quiz_title: String,
    pub score: i64,
    pub total: i64,
    pub percentage: f64,
    pub answers: Json<Vec<i64>>,
    pub taken_at: DateTime<Utc>,
}

impl DbResult {
    /// Convert to the core result type
    pub fn into_result(self) -> QuizResult {
        QuizResult {
            id: self.id,
            quiz_id: self.quiz_id,
            quiz_title: self.quiz_title,
            score: self.score.max(0) as u32,
            total: self.total.max(0) as u32,
            percentage: self.percentage,
            answers: self.answers.0,
            taken_at: self.taken_at,
        }
    }
}

/// Result about to be written
#[derive(Debug, Clone)]
pub struct NewResult<'a> {
    pub quiz_id: i64,
    pub quiz_title: &'a str,
    pub score: Score,
    pub answers: &'a [i64],
}

/// Message left through the contact form
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ContactMessage {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

// === API Request/Response Types ===

/// Quiz entry on the home listing
#[derive(Debug, Serialize, Deserialize)]
pub struct QuizSummary {
    pub id: i64,
    pub title: String,
    pub question_count: usize,
    pub timer_minutes: u32,
    pub created_at: DateTime<Utc>,
}

impl From<&Quiz> for QuizSummary {
    fn from(quiz: &Quiz) -> Self {
        Self {
            id: quiz.id,
            title: quiz.title.clone(),
            question_count: quiz.questions.len(),
            timer_minutes: quiz.timer_minutes,
            created_at: quiz.created_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct QuizListResponse {
    pub quizzes: Vec<QuizSummary>,
}

// Quiz-taking types

/// A question as shown to a student, without the correct index
#[derive(Debug, Serialize, Deserialize)]
pub struct QuestionView {
    pub text: String,
    pub options: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct QuestionResponse {
    pub quiz_id: i64,
    pub quiz_title: String,
    pub timer_minutes: u32,
    pub question_index: usize,
    pub total_questions: usize,
    pub question: QuestionView,
    pub current_answer: Option<i64>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct SubmitAnswerForm {
    #[serde(default)]
    pub question_index: i64,
    pub answer: Option<String>,
    pub action: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CompleteResponse {
    pub quiz_id: i64,
    pub quiz_title: String,
    pub result_id: i64,
    pub score: u32,
    pub total: u32,
    pub percentage: f64,
    pub passed: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReviewResponse {
    pub quiz_id: i64,
    pub quiz_title: String,
    pub score: Score,
    pub items: Vec<ReviewItem>,
}

// Admin types

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UploadForm {
    #[serde(default)]
    pub title: String,
    pub format: Option<String>,
    #[serde(default)]
    pub content: String,
    pub timer_minutes: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UploadResponse {
    pub quiz_id: i64,
    pub title: String,
    pub question_count: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DashboardResponse {
    pub quizzes: Vec<QuizSummary>,
    pub results: Vec<QuizResult>,
    pub unread_count: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub deleted: bool,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct MessagesQuery {
    #[serde(default)]
    pub unread: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessagesResponse {
    pub messages: Vec<ContactMessage>,
}

// Support types

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ContactResponse {
    pub message_id: i64,
}
