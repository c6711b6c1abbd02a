//! Telegram integration -- deliver text messages through the Bot API.

use reqwest::Client;
use serde_json::{json, Value};

use crate::config::Config;
use crate::error::MessagingError;
use crate::notifier::Messenger;

/// Bot API client bound to a single chat.
pub struct TelegramBot {
    api_base: String,
    token: String,
    chat_id: String,
    http_client: Client,
}

impl TelegramBot {
    pub fn new(config: &Config) -> Self {
        Self {
            api_base: config.telegram_api.trim_end_matches('/').to_string(),
            token: config.telegram_token.clone(),
            chat_id: config.telegram_chat_id.clone(),
            http_client: Client::new(),
        }
    }

    /// Post a message to the configured chat.
    pub async fn post_message(&self, text: &str) -> Result<(), MessagingError> {
        let url = format!("{}/bot{}/sendMessage", self.api_base, self.token);
        let body = json!({ "chat_id": &self.chat_id, "text": text });

        // The URL holds the bot token and must not reach logs.
        let resp = self
            .http_client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| MessagingError::Transport(e.without_url()))?;
        let status = resp.status();
        let payload: Value = resp.json().await.unwrap_or(Value::Null);

        // The Bot API reports failures in the body as well as the status.
        if status.is_success() && payload.get("ok").and_then(Value::as_bool) == Some(true) {
            return Ok(());
        }

        let description = payload
            .get("description")
            .and_then(Value::as_str)
            .unwrap_or("unknown error")
            .to_string();
        Err(MessagingError::Api {
            status: status.as_u16(),
            description,
        })
    }
}

impl Messenger for TelegramBot {
    async fn send_message(&self, text: &str) -> Result<(), MessagingError> {
        self.post_message(text).await
    }
}
