//! Common test utilities and fixtures for integration tests.
//!
//! Every `TestContext` runs the real router against its own in-memory
//! SQLite database, so tests need no external services.

#![allow(dead_code)]

pub mod fixtures;

use std::sync::Arc;

use axum::http::StatusCode;
use axum::Router;
use axum_test::TestServer;
use quiz_core::Question;

use quizflow_backend::config::Config;
use quizflow_backend::db::Database;
use quizflow_backend::{build_router, AppState};

pub const ADMIN_PASSWORD: &str = "letmein";

/// Test context containing the database and router.
pub struct TestContext {
    pub db: Arc<Database>,
    pub config: Arc<Config>,
    app: Router,
}

impl TestContext {
    /// Create a new test context backed by `sqlite::memory:`.
    pub async fn new() -> Self {
        let config = Config {
            database_url: "sqlite::memory:".to_string(),
            admin_password: ADMIN_PASSWORD.to_string(),
            ..Config::default()
        };

        let db = Database::connect(&config.database_url, config.db_max_connections)
            .await
            .expect("Failed to open in-memory database");

        db.run_migrations()
            .await
            .expect("Failed to run migrations");

        let state = AppState::new(db, config);
        let db = state.db.clone();
        let config = state.config.clone();

        Self {
            db,
            config,
            app: build_router(state),
        }
    }

    /// Get the router for use with axum-test.
    pub fn router(&self) -> Router {
        self.app.clone()
    }

    /// A test server that keeps the session cookie between requests,
    /// the way a browser would.
    pub fn server(&self) -> TestServer {
        TestServer::builder()
            .save_cookies()
            .build(self.router())
            .expect("Failed to build test server")
    }

    /// A server whose session has already logged in as admin.
    pub async fn admin_server(&self) -> TestServer {
        let server = self.server();
        let response = server
            .post("/admin/login")
            .form(&fixtures::login_form(ADMIN_PASSWORD))
            .await;
        response.assert_status(StatusCode::SEE_OTHER);
        server
    }

    /// Store a quiz directly and return its id.
    pub async fn create_quiz(&self, title: &str, questions: &[Question]) -> i64 {
        self.db
            .create_quiz(title, questions, self.config.default_quiz_timer)
            .await
            .expect("Failed to create test quiz")
    }
}

/// Location header of a redirect response.
pub fn location(response: &axum_test::TestResponse) -> String {
    response.assert_status(StatusCode::SEE_OTHER);
    response
        .header("location")
        .to_str()
        .expect("Location header is not valid UTF-8")
        .to_string()
}
