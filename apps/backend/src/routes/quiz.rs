//! Quiz-taking endpoints

use axum::{
    extract::{Path, State},
    response::Redirect,
    Extension, Form, Json,
};
use quiz_core::{Action, Navigation};

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::services::quiz_session::{self, load_quiz};
use crate::session::SessionHandle;
use crate::AppState;

fn question_path(quiz_id: i64, index: usize) -> String {
    format!("/quiz/{quiz_id}/question/{index}")
}

/// GET|POST /quiz/{id}/start
pub async fn start(
    State(state): State<AppState>,
    Extension(session): Extension<SessionHandle>,
    Path(quiz_id): Path<i64>,
) -> Result<Redirect> {
    let quiz = load_quiz(&state.db, quiz_id).await?;
    session.with(|s| s.quizzes.start(quiz.id)).await;
    tracing::debug!(quiz_id, session = %session.id, "quiz started");
    Ok(Redirect::to(&question_path(quiz.id, 0)))
}

/// GET /quiz/{id}/question/{q}
pub async fn question(
    State(state): State<AppState>,
    Extension(session): Extension<SessionHandle>,
    Path((quiz_id, index)): Path<(i64, i64)>,
) -> Result<Json<QuestionResponse>> {
    let quiz = load_quiz(&state.db, quiz_id).await?;
    let total = quiz.total_questions();

    let Some(position) = usize::try_from(index).ok().filter(|&i| i < total) else {
        return Err(ApiError::Redirect(question_path(quiz.id, 0)));
    };

    let current_answer = session
        .with(|s| {
            s.quizzes.goto(quiz.id, index, total);
            s.quizzes.answer_for(quiz.id, position)
        })
        .await;

    let question = &quiz.questions[position];
    Ok(Json(QuestionResponse {
        quiz_id: quiz.id,
        quiz_title: quiz.title.clone(),
        timer_minutes: quiz.timer_minutes,
        question_index: position,
        total_questions: total,
        question: QuestionView {
            text: question.text.clone(),
            options: question.options.clone(),
        },
        current_answer,
    }))
}

/// POST /quiz/{id}/submit
pub async fn submit(
    State(state): State<AppState>,
    Extension(session): Extension<SessionHandle>,
    Path(quiz_id): Path<i64>,
    Form(form): Form<SubmitAnswerForm>,
) -> Result<Redirect> {
    let quiz = load_quiz(&state.db, quiz_id).await?;

    let answer = match form.answer.as_deref().map(str::trim).filter(|a| !a.is_empty()) {
        Some(raw) => Some(
            raw.parse::<i64>()
                .map_err(|_| ApiError::BadRequest(format!("Invalid answer '{raw}'")))?,
        ),
        None => None,
    };

    let action = match form.action.as_deref().map(str::trim).filter(|a| !a.is_empty()) {
        Some(raw) => raw
            .parse::<Action>()
            .map_err(|_| ApiError::BadRequest(format!("Unknown action '{raw}'")))?,
        None => Action::default(),
    };

    let total = quiz.total_questions();
    let next = session
        .with(|s| {
            s.quizzes
                .submit_answer(quiz.id, total, form.question_index, answer, action)
        })
        .await;

    Ok(match next {
        Navigation::Question(index) => Redirect::to(&question_path(quiz.id, index)),
        Navigation::Complete => Redirect::to(&format!("/quiz/{}/complete", quiz.id)),
    })
}

/// GET /quiz/{id}/complete
pub async fn complete(
    State(state): State<AppState>,
    Extension(session): Extension<SessionHandle>,
    Path(quiz_id): Path<i64>,
) -> Result<Json<CompleteResponse>> {
    let quiz = load_quiz(&state.db, quiz_id).await?;
    let done = quiz_session::complete(&state.db, &session, &quiz).await?;

    Ok(Json(CompleteResponse {
        quiz_id: quiz.id,
        quiz_title: quiz.title,
        result_id: done.result_id,
        score: done.score.score,
        total: done.score.total,
        percentage: done.score.percentage,
        passed: done.score.passed(state.config.passing_score),
    }))
}

/// GET /quiz/{id}/review
pub async fn review(
    State(state): State<AppState>,
    Extension(session): Extension<SessionHandle>,
    Path(quiz_id): Path<i64>,
) -> Result<Json<ReviewResponse>> {
    let quiz = load_quiz(&state.db, quiz_id).await?;

    let reviewed = session
        .with(|s| {
            let score = s.quizzes.completed(quiz.id)?.score;
            let items = s.quizzes.review(quiz.id, &quiz.questions).ok()?;
            Some((score, items))
        })
        .await;

    let Some((score, items)) = reviewed else {
        tracing::debug!(quiz_id, "review requested without a completed attempt");
        return Err(ApiError::home());
    };

    Ok(Json(ReviewResponse {
        quiz_id: quiz.id,
        quiz_title: quiz.title,
        score,
        items,
    }))
}
