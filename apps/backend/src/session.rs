//! Server-side session storage.
//!
//! Each browser gets a random id in the `quizflow_session` cookie; the data
//! behind it (admin flag and per-quiz progress) never leaves the server.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use quiz_core::QuizSessions;
use tokio::sync::Mutex;
use uuid::Uuid;

/// Cookie carrying the session id
pub const SESSION_COOKIE: &str = "quizflow_session";

/// Data held for one browser session
#[derive(Debug)]
pub struct StudentSession {
    pub is_admin: bool,
    pub quizzes: QuizSessions,
    last_seen: DateTime<Utc>,
}

impl StudentSession {
    fn new(now: DateTime<Utc>) -> Self {
        Self {
            is_admin: false,
            quizzes: QuizSessions::new(),
            last_seen: now,
        }
    }
}

/// In-memory session store shared by all request handlers
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<Mutex<HashMap<Uuid, StudentSession>>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            ttl,
        }
    }

    /// Resolve the session for a request.
    ///
    /// Returns the id to use and whether a new session had to be created
    /// (unknown, missing or expired id).
    pub async fn resolve(&self, requested: Option<Uuid>) -> (Uuid, bool) {
        self.resolve_at(requested, Utc::now()).await
    }

    async fn resolve_at(&self, requested: Option<Uuid>, now: DateTime<Utc>) -> (Uuid, bool) {
        let mut sessions = self.sessions.lock().await;

        if let Some(id) = requested {
            if let Some(session) = sessions.get_mut(&id) {
                if now - session.last_seen < self.ttl {
                    session.last_seen = now;
                    return (id, false);
                }
                tracing::debug!(session = %id, "session expired");
            }
        }

        let ttl = self.ttl;
        sessions.retain(|_, s| now - s.last_seen < ttl);

        let id = Uuid::new_v4();
        sessions.insert(id, StudentSession::new(now));
        (id, true)
    }

    /// Run `f` against the session's data.
    ///
    /// A session that vanished between resolution and use is recreated empty.
    pub async fn with<R>(&self, id: Uuid, f: impl FnOnce(&mut StudentSession) -> R) -> R {
        let mut sessions = self.sessions.lock().await;
        let session = sessions
            .entry(id)
            .or_insert_with(|| StudentSession::new(Utc::now()));
        f(session)
    }
}

/// Per-request handle to the caller's session, inserted by the session middleware
#[derive(Clone)]
pub struct SessionHandle {
    pub id: Uuid,
    store: SessionStore,
}

impl SessionHandle {
    pub fn new(id: Uuid, store: SessionStore) -> Self {
        Self { id, store }
    }

    pub async fn with<R>(&self, f: impl FnOnce(&mut StudentSession) -> R) -> R {
        self.store.with(self.id, f).await
    }

    pub async fn is_admin(&self) -> bool {
        self.with(|s| s.is_admin).await
    }
}
