//! Notifier trait for sending chat messages

use async_trait::async_trait;

/// Trait for sending a text message to a chat
#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait Notifier: Send + Sync + std::fmt::Debug {
    /// Send `text` to the chat identified by `chat_id`
    async fn send_message(&self, chat_id: &str, text: &str) -> crate::Result<()>;
}
