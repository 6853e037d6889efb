//! Quiz listing

use axum::{extract::State, Json};

use crate::error::Result;
use crate::models::{QuizListResponse, QuizSummary};
use crate::AppState;

/// GET /
pub async fn list(State(state): State<AppState>) -> Result<Json<QuizListResponse>> {
    let quizzes = state.db.get_all_quizzes().await?;
    Ok(Json(QuizListResponse {
        quizzes: quizzes.iter().map(QuizSummary::from).collect(),
    }))
}
