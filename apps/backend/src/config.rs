//! Runtime configuration loaded from the environment.

use std::str::FromStr;

use crate::error::{ApiError, Result};

const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

/// Server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub db_max_connections: u32,
    pub host: String,
    pub port: u16,
    pub admin_password: String,
    /// Timer applied to uploads that don't specify one, in minutes.
    pub default_quiz_timer: u32,
    /// Minimum percentage that counts as a pass.
    pub passing_score: f64,
    pub session_ttl_minutes: i64,
    /// Number of results shown on the admin dashboard.
    pub dashboard_results: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite://quizflow.db?mode=rwc".to_string(),
            db_max_connections: 8,
            host: "0.0.0.0".to_string(),
            port: 5000,
            admin_password: DEFAULT_ADMIN_PASSWORD.to_string(),
            default_quiz_timer: 30,
            passing_score: 70.0,
            session_ttl_minutes: 24 * 60,
            dashboard_results: 20,
        }
    }
}

impl Config {
    /// Read configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let admin_password = match lookup("ADMIN_PASSWORD").filter(|p| !p.is_empty()) {
            Some(password) => password,
            None => {
                tracing::warn!("ADMIN_PASSWORD not set, using the built-in default");
                defaults.admin_password
            }
        };

        let default_quiz_timer = parse_or(&lookup, "DEFAULT_QUIZ_TIMER", defaults.default_quiz_timer)?;
        if default_quiz_timer == 0 {
            return Err(ApiError::Config(
                "DEFAULT_QUIZ_TIMER must be positive".to_string(),
            ));
        }

        Ok(Self {
            database_url: lookup("DATABASE_URL").unwrap_or(defaults.database_url),
            db_max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", defaults.db_max_connections)?,
            host: lookup("HOST").unwrap_or(defaults.host),
            port: parse_or(&lookup, "PORT", defaults.port)?,
            admin_password,
            default_quiz_timer,
            passing_score: parse_or(&lookup, "PASSING_SCORE", defaults.passing_score)?,
            session_ttl_minutes: parse_or(&lookup, "SESSION_TTL_MINUTES", defaults.session_ttl_minutes)?,
            dashboard_results: defaults.dashboard_results,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ApiError::Config(format!("{key} has an invalid value: {raw}"))),
        None => Ok(default),
    }
}
