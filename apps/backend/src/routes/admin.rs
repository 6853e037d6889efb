//! Admin endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Redirect,
    Extension, Form, Json,
};

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::services::upload::{prepare_questions, UploadRequest};
use crate::session::SessionHandle;
use crate::AppState;

const MESSAGE_LIMIT: i64 = 100;

/// POST /admin/login
pub async fn login(
    State(state): State<AppState>,
    Extension(session): Extension<SessionHandle>,
    Form(form): Form<LoginForm>,
) -> Result<Redirect> {
    if form.password != state.config.admin_password {
        tracing::warn!(session = %session.id, "failed admin login");
        return Err(ApiError::Unauthorized("Invalid password".to_string()));
    }

    session.with(|s| s.is_admin = true).await;
    tracing::info!(session = %session.id, "admin logged in");
    Ok(Redirect::to("/admin"))
}

/// POST /admin/logout
pub async fn logout(Extension(session): Extension<SessionHandle>) -> Redirect {
    session.with(|s| s.is_admin = false).await;
    Redirect::to("/")
}

/// GET /admin
pub async fn dashboard(State(state): State<AppState>) -> Result<Json<DashboardResponse>> {
    let quizzes = state.db.get_all_quizzes().await?;
    let results = state.db.get_results(state.config.dashboard_results).await?;
    let unread_count = state.db.count_unread_messages().await?;

    Ok(Json(DashboardResponse {
        quizzes: quizzes.iter().map(QuizSummary::from).collect(),
        results,
        unread_count,
    }))
}

/// POST /admin/upload
pub async fn upload(
    State(state): State<AppState>,
    Form(form): Form<UploadForm>,
) -> Result<(StatusCode, Json<UploadResponse>)> {
    let request = UploadRequest::from_form(
        &form.title,
        form.format.as_deref(),
        &form.content,
        form.timer_minutes.as_deref(),
        state.config.default_quiz_timer,
    )?;

    let questions = prepare_questions(request.format, &request.content).map_err(|e| {
        tracing::warn!(title = %request.title, format = %request.format, error = %e, "quiz upload rejected");
        e
    })?;

    let quiz_id = state
        .db
        .create_quiz(&request.title, &questions, request.timer_minutes)
        .await?;

    tracing::info!(
        quiz_id,
        title = %request.title,
        questions = questions.len(),
        "quiz uploaded"
    );

    Ok((
        StatusCode::CREATED,
        Json(UploadResponse {
            quiz_id,
            title: request.title,
            question_count: questions.len(),
        }),
    ))
}

/// POST /admin/delete/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(quiz_id): Path<i64>,
) -> Result<Json<DeleteResponse>> {
    let deleted = state.db.delete_quiz(quiz_id).await?;
    if deleted {
        tracing::info!(quiz_id, "quiz deleted");
    }
    Ok(Json(DeleteResponse { deleted }))
}

/// GET /admin/messages
pub async fn messages(
    State(state): State<AppState>,
    Query(query): Query<MessagesQuery>,
) -> Result<Json<MessagesResponse>> {
    let messages = state
        .db
        .get_contact_messages(MESSAGE_LIMIT, query.unread)
        .await?;
    Ok(Json(MessagesResponse { messages }))
}

/// POST /admin/messages/{id}/read
pub async fn mark_read(
    State(state): State<AppState>,
    Path(message_id): Path<i64>,
) -> Result<StatusCode> {
    if !state.db.mark_message_read(message_id).await? {
        return Err(ApiError::NotFound(format!("Message {message_id}")));
    }
    Ok(StatusCode::NO_CONTENT)
}
