//! Process configuration.
//!
//! Built once at startup from the environment and passed by reference to
//! every component. Credentials are required; everything else defaults to
//! the production values.

use std::time::Duration;

use crate::error::ConfigError;

pub const PRACTICUM_TOKEN_VAR: &str = "PRACTICUM_TOKEN";
pub const TELEGRAM_TOKEN_VAR: &str = "TELEGRAM_TOKEN";
pub const TELEGRAM_CHAT_ID_VAR: &str = "TELEGRAM_CHAT_ID";

pub const DEFAULT_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";
pub const DEFAULT_TELEGRAM_API: &str = "https://api.telegram.org";
pub const RETRY_PERIOD: Duration = Duration::from_secs(600);

/// Immutable runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub practicum_token: String,
    pub telegram_token: String,
    pub telegram_chat_id: String,
    /// Homework statuses endpoint.
    pub endpoint: String,
    /// Base URL of the Telegram Bot API, without the `/bot<token>` part.
    pub telegram_api: String,
    pub retry_period: Duration,
}

impl Config {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary key lookup.
    ///
    /// Every missing (or empty) credential is reported, not just the first.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut missing = Vec::new();
        let mut required = |key: &str| match lookup(key) {
            Some(value) if !value.trim().is_empty() => value,
            _ => {
                missing.push(key.to_string());
                String::new()
            }
        };

        let practicum_token = required(PRACTICUM_TOKEN_VAR);
        let telegram_token = required(TELEGRAM_TOKEN_VAR);
        let telegram_chat_id = required(TELEGRAM_CHAT_ID_VAR);

        if !missing.is_empty() {
            return Err(ConfigError::MissingVariables(missing));
        }

        Ok(Self {
            practicum_token,
            telegram_token,
            telegram_chat_id,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            telegram_api: DEFAULT_TELEGRAM_API.to_string(),
            retry_period: RETRY_PERIOD,
        })
    }
}
