//! Engine: polls the status API, renders changes, and notifies the chat

use std::collections::HashSet;
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use tokio_util::sync::CancellationToken;

use crate::notifier::Notifier;
use crate::practicum::PracticumClient;
use crate::response::extract_first_homework;
use crate::status::parse_status;

/// Prefix of every error message sent to the chat
pub const FAILURE_PREFIX: &str = "Сбой в работе программы";

/// What a single poll iteration ended with
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    /// A new status message was sent
    Notified(String),
    /// The rendered message was already sent earlier
    Unchanged,
    /// Fetching, validating, or rendering failed; holds the reported text
    Failed(String),
}

/// The polling loop and the state it owns.
///
/// Both caches grow for the lifetime of the engine and are never pruned.
#[derive(Debug)]
pub struct Engine {
    api: PracticumClient,
    notifier: Arc<dyn Notifier>,
    chat_id: String,
    from_date: i64,
    retry_period: Duration,
    seen_messages: HashSet<String>,
    reported_errors: HashSet<String>,
    cancel: CancellationToken,
}

impl Engine {
    pub fn new(
        api: PracticumClient,
        notifier: Arc<dyn Notifier>,
        chat_id: &str,
        from_date: i64,
        retry_period: Duration,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            api,
            notifier,
            chat_id: chat_id.to_string(),
            from_date,
            retry_period,
            seen_messages: HashSet::new(),
            reported_errors: HashSet::new(),
            cancel,
        }
    }

    /// The poll cursor. Fixed at construction.
    pub fn from_date(&self) -> i64 {
        self.from_date
    }

    pub fn retry_period(&self) -> Duration {
        self.retry_period
    }

    pub fn seen_messages(&self) -> &HashSet<String> {
        &self.seen_messages
    }

    pub fn reported_errors(&self) -> &HashSet<String> {
        &self.reported_errors
    }

    /// Send `text` to the chat once. Failures are logged and swallowed.
    pub async fn notify(&self, text: &str) {
        match self.notifier.send_message(&self.chat_id, text).await {
            Ok(()) => tracing::debug!("Message sent to chat: {}", text),
            Err(e) => tracing::error!("Message not sent: {}", e),
        }
    }

    /// Log `text` as an error and push it to the chat the first time it is seen
    pub async fn report_error(&mut self, text: &str) {
        tracing::error!("{}", text);
        if self.reported_errors.contains(text) {
            return;
        }
        self.notify(text).await;
        self.reported_errors.insert(text.to_string());
    }

    async fn current_message(&self) -> crate::Result<String> {
        let response = self.api.fetch(self.from_date).await?;
        let homework = extract_first_homework(&response)?;
        parse_status(homework)
    }

    /// Run one fetch, validate, notify iteration without sleeping
    pub async fn poll_once(&mut self) -> PollOutcome {
        match self.current_message().await {
            Ok(message) if self.seen_messages.contains(&message) => {
                tracing::debug!("No new homework status");
                PollOutcome::Unchanged
            }
            Ok(message) => {
                self.seen_messages.insert(message.clone());
                self.notify(&message).await;
                PollOutcome::Notified(message)
            }
            Err(e) => {
                tracing::debug!("Poll failed ({:?}): {}", e.kind(), e);
                let text = format!("{}: {}", FAILURE_PREFIX, e);
                self.report_error(&text).await;
                PollOutcome::Failed(text)
            }
        }
    }

    /// Poll forever, sleeping the retry period after every iteration.
    /// Returns only when the cancellation token is triggered.
    pub async fn run(&mut self) {
        tracing::info!(
            "Polling homework statuses every {} (from_date={})",
            humantime::format_duration(self.retry_period),
            self.from_date
        );

        loop {
            let outcome = self.poll_once().await;
            tracing::debug!("Poll finished: {:?}", outcome);

            tokio::select! {
                _ = tokio::time::sleep(self.retry_period) => {}
                _ = self.cancel.cancelled() => {
                    tracing::debug!("Polling loop cancelled");
                    break;
                }
            }
        }
    }
}

/// Unix timestamp `lookback` before `now`, used as the poll cursor.
/// Saturates instead of overflowing for absurd lookbacks.
pub fn initial_cursor(now: SystemTime, lookback: Duration) -> i64 {
    let now = now.duration_since(UNIX_EPOCH).unwrap_or_default().as_secs();
    let now = i64::try_from(now).unwrap_or(i64::MAX);
    let lookback = i64::try_from(lookback.as_secs()).unwrap_or(i64::MAX);
    now.saturating_sub(lookback)
}
