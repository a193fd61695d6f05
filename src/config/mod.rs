//! Configuration management for snipbin
//!
//! This module handles loading and validating configuration from environment
//! variables. The resulting `Config` is constructed once at startup and passed
//! into the components that need it; nothing reads the environment after boot.

use std::env;
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid port number: {0}")]
    InvalidPort(String),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Database connection URL
    pub database_url: String,

    /// Port the HTTP server listens on
    pub port: u16,

    /// Secret key for the session cookie. Must be at least 64 bytes; used to
    /// sign and encrypt the per-client session cookie.
    pub session_secret: String,

    /// Session lifetime in hours. All session keys become inaccessible once
    /// the lifetime has elapsed.
    pub session_lifetime_hours: i64,

    /// Default tracing filter when RUST_LOG is unset
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = env::var("DATABASE_URL")
            .map_err(|_| ConfigError::MissingEnvVar("DATABASE_URL".to_string()))?;

        let port = env::var("PORT")
            .unwrap_or_else(|_| "4000".to_string())
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidPort(e.to_string()))?;

        let session_secret = env::var("SESSION_SECRET")
            .map_err(|_| ConfigError::MissingEnvVar("SESSION_SECRET".to_string()))?;
        if session_secret.len() < 64 {
            return Err(ConfigError::InvalidValue(
                "SESSION_SECRET",
                "must be at least 64 bytes".to_string(),
            ));
        }

        let session_lifetime_hours = env::var("SESSION_LIFETIME_HOURS")
            .unwrap_or_else(|_| "12".to_string())
            .parse::<i64>()
            .map_err(|e| ConfigError::InvalidValue("SESSION_LIFETIME_HOURS", e.to_string()))?;

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Config {
            database_url,
            port,
            session_secret,
            session_lifetime_hours,
            log_level,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_database_url_is_an_error() {
        let prev_db = env::var("DATABASE_URL").ok();
        env::remove_var("DATABASE_URL");

        let result = Config::from_env();
        assert!(matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "DATABASE_URL"));

        if let Some(v) = prev_db {
            env::set_var("DATABASE_URL", v);
        }
    }
}
