//! Telegram Bot API client

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use crate::io::HttpClient;
use crate::notifier::Notifier;

/// Error payload returned by the Bot API
#[derive(Debug, Deserialize)]
struct TelegramErrorResponse {
    #[serde(default)]
    description: Option<String>,
}

/// Telegram bot that sends plain text messages
pub struct TelegramBot {
    api_url: String,
    token: String,
    http: Arc<dyn HttpClient>,
}

impl std::fmt::Debug for TelegramBot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramBot")
            .field("api_url", &self.api_url)
            .finish()
    }
}

impl TelegramBot {
    pub fn new(api_url: &str, token: &str, http: Arc<dyn HttpClient>) -> Self {
        tracing::debug!("Created TelegramBot for {}", api_url);

        Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
            http,
        }
    }

    fn send_message_url(&self) -> String {
        format!("{}/bot{}/sendMessage", self.api_url, self.token)
    }
}

#[async_trait]
impl Notifier for TelegramBot {
    async fn send_message(&self, chat_id: &str, text: &str) -> crate::Result<()> {
        let body = serde_json::json!({
            "chat_id": chat_id,
            "text": text,
        });

        tracing::debug!("Sending Telegram message to chat {}", chat_id);

        let response = self.http.post_json(&self.send_message_url(), &body).await?;

        if response.status != 200 {
            let description = serde_json::from_str::<TelegramErrorResponse>(&response.body)
                .ok()
                .and_then(|r| r.description)
                .unwrap_or(response.body);
            return Err(crate::ReviewNotifierError::Telegram(format!(
                "Bot API returned status {}: {}",
                response.status, description
            )));
        }

        tracing::debug!("Telegram message sent to chat {}", chat_id);
        Ok(())
    }
}
