//! Glue between the quiz progress state machine, the session store and the database.

use quiz_core::{CompletedAttempt, Quiz};

use crate::db::Database;
use crate::error::{ApiError, Result};
use crate::models::NewResult;
use crate::session::SessionHandle;

/// Fetch a quiz, turning a missing id into a redirect to the listing.
pub async fn load_quiz(db: &Database, quiz_id: i64) -> Result<Quiz> {
    db.get_quiz(quiz_id).await?.ok_or_else(|| {
        tracing::debug!(quiz_id, "quiz not found, redirecting home");
        ApiError::home()
    })
}

/// Finish the caller's attempt at `quiz`.
///
/// Scores the recorded answers, persists a result, then caches the
/// snapshot in the session. Every call stores a new result, including
/// repeat completions of the same attempt.
pub async fn complete(db: &Database, session: &SessionHandle, quiz: &Quiz) -> Result<CompletedAttempt> {
    let attempt = session
        .with(|s| s.quizzes.pending_attempt(quiz.id, &quiz.questions))
        .await;

    let result_id = db
        .save_result(&NewResult {
            quiz_id: quiz.id,
            quiz_title: &quiz.title,
            score: attempt.score,
            answers: &attempt.answers,
        })
        .await?;

    tracing::info!(
        quiz_id = quiz.id,
        result_id,
        score = attempt.score.score,
        total = attempt.score.total,
        "quiz completed"
    );

    Ok(session
        .with(|s| s.quizzes.complete(quiz.id, attempt, result_id).clone())
        .await)
}
