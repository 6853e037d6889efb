//! SQLite database operations

use chrono::Utc;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    types::Json,
    SqlitePool,
};
use std::str::FromStr;
use std::time::Duration;

use crate::error::{ApiError, Result};
use crate::models::*;

/// Database wrapper with connection pool
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Connect to SQLite and create connection pool
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(true);

        // Every connection to `:memory:` opens its own database, and closing
        // the last one drops it.
        let pool_options = if database_url.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>)
        } else {
            SqlitePoolOptions::new().max_connections(max_connections.max(1))
        };

        let pool = pool_options.connect_with(options).await?;

        Ok(Self { pool })
    }

    /// Run database migrations
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| ApiError::Migration(e.to_string()))?;
        Ok(())
    }

    // === Quiz Repository ===

    /// Store a new quiz and return its id
    pub async fn create_quiz(
        &self,
        title: &str,
        questions: &[Question],
        timer_minutes: u32,
    ) -> Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO quizzes (title, questions, timer_minutes, created_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(title)
        .bind(Json(questions))
        .bind(i64::from(timer_minutes))
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Get quiz by ID
    pub async fn get_quiz(&self, quiz_id: i64) -> Result<Option<Quiz>> {
        let quiz = sqlx::query_as::<_, DbQuiz>(
            r#"
            SELECT id, title, questions, timer_minutes, created_at
            FROM quizzes
            WHERE id = ?
            "#,
        )
        .bind(quiz_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(quiz.map(DbQuiz::into_quiz))
    }

    /// Get all quizzes, newest first
    pub async fn get_all_quizzes(&self) -> Result<Vec<Quiz>> {
        let quizzes = sqlx::query_as::<_, DbQuiz>(
            r#"
            SELECT id, title, questions, timer_minutes, created_at
            FROM quizzes
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(quizzes.into_iter().map(DbQuiz::into_quiz).collect())
    }

    /// Delete a quiz together with every result that references it.
    ///
    /// Returns whether the quiz existed.
    pub async fn delete_quiz(&self, quiz_id: i64) -> Result<bool> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM results WHERE quiz_id = ?")
            .bind(quiz_id)
            .execute(&mut *tx)
            .await?;

        let deleted = sqlx::query("DELETE FROM quizzes WHERE id = ?")
            .bind(quiz_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(deleted.rows_affected() > 0)
    }

    // === Result Repository ===

    /// Record a finished attempt and return its id
    pub async fn save_result(&self, result: &NewResult<'_>) -> Result<i64> {
        let inserted = sqlx::query(
            r#"
            INSERT INTO results (quiz_id, quiz_title, score, total, percentage, answers, taken_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(result.quiz_id)
        .bind(result.quiz_title)
        .bind(i64::from(result.score.score))
        .bind(i64::from(result.score.total))
        .bind(result.score.percentage)
        .bind(Json(result.answers))
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(inserted.last_insert_rowid())
    }

    /// Get the most recent results, newest first
    pub async fn get_results(&self, limit: i64) -> Result<Vec<QuizResult>> {
        let results = sqlx::query_as::<_, DbResult>(
            r#"
            SELECT id, quiz_id, quiz_title, score, total, percentage, answers, taken_at
            FROM results
            ORDER BY taken_at DESC, id DESC
            LIMIT ?
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(results.into_iter().map(DbResult::into_result).collect())
    }

    // === Contact Message Repository ===

    /// Store a contact form submission
    pub async fn save_contact_message(&self, form: &ContactForm) -> Result<i64> {
        let inserted = sqlx::query(
            r#"
            INSERT INTO contact_messages (name, email, subject, message, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&form.name)
        .bind(&form.email)
        .bind(&form.subject)
        .bind(&form.message)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(inserted.last_insert_rowid())
    }

    /// Get contact messages, newest first
    pub async fn get_contact_messages(
        &self,
        limit: i64,
        unread_only: bool,
    ) -> Result<Vec<ContactMessage>> {
        let messages = sqlx::query_as::<_, ContactMessage>(
            r#"
            SELECT id, name, email, subject, message, is_read, created_at
            FROM contact_messages
            WHERE (? = 0 OR is_read = 0)
            ORDER BY created_at DESC, id DESC
            LIMIT ?
            "#,
        )
        .bind(unread_only)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(messages)
    }

    /// Count messages not yet marked read
    pub async fn count_unread_messages(&self) -> Result<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM contact_messages WHERE is_read = 0")
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }

    /// Mark a message as read. Returns whether the message exists.
    pub async fn mark_message_read(&self, message_id: i64) -> Result<bool> {
        let updated = sqlx::query("UPDATE contact_messages SET is_read = 1 WHERE id = ?")
            .bind(message_id)
            .execute(&self.pool)
            .await?;

        Ok(updated.rows_affected() > 0)
    }
}
