//! # Configuration Module
//!
//! Startup settings read from the environment (and `.env`, when present).

use std::env;

use thiserror::Error;

pub const DEFAULT_DATABASE_URL: &str = "sqlite:recipes.db";
pub const DEFAULT_LIVENESS_PORT: u16 = 8000;
pub const DEFAULT_LANGUAGE: &str = "ru";

/// Errors raised while reading configuration
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Bot token not provided.
    #[error("Telegram bot token not set. Set TELEGRAM_BOT_TOKEN environment variable.")]
    MissingToken,

    /// Port is not a valid u16.
    #[error("Invalid LIVENESS_PORT value: {0}")]
    InvalidPort(String),

    /// Unknown log output format.
    #[error("Invalid LOG_FORMAT value: {0} (expected 'text' or 'json')")]
    InvalidLogFormat(String),
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl LogFormat {
    fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.to_lowercase().as_str() {
            "text" | "" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(ConfigError::InvalidLogFormat(value.to_string())),
        }
    }
}

/// Configuration for the recipe bot process
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Telegram bot credential
    pub bot_token: String,
    /// SQLite URL or file path of the recipe datastore
    pub database_url: String,
    /// Port of the liveness HTTP endpoint
    pub liveness_port: u16,
    /// Reply language for users whose Telegram language is unsupported
    pub default_language: String,
    /// Log output format
    pub log_format: LogFormat,
}

impl BotConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bot_token = lookup("TELEGRAM_BOT_TOKEN")
            .filter(|token| !token.trim().is_empty())
            .ok_or(ConfigError::MissingToken)?;

        let database_url =
            lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        let liveness_port = match lookup("LIVENESS_PORT") {
            Some(value) => value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(value.clone()))?,
            None => DEFAULT_LIVENESS_PORT,
        };

        let default_language =
            lookup("BOT_DEFAULT_LANGUAGE").unwrap_or_else(|| DEFAULT_LANGUAGE.to_string());

        let log_format = match lookup("LOG_FORMAT") {
            Some(value) => LogFormat::parse(&value)?,
            None => LogFormat::default(),
        };

        Ok(Self {
            bot_token,
            database_url,
            liveness_port,
            default_language,
            log_format,
        })
    }
}
