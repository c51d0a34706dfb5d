//! Review notifier - homework review status bot
//!
//! Polls the homework status API, detects status changes of the most recent
//! submission, and forwards them to a Telegram chat.

pub mod config;
pub mod engine;
pub mod error;
pub mod io;
pub mod logging;
pub mod notifier;
pub mod practicum;
pub mod response;
pub mod status;
pub mod telegram;

pub use config::{load_settings, Config, Secrets, Settings};
pub use engine::{Engine, PollOutcome};
pub use error::{ErrorKind, Result, ReviewNotifierError};

use std::sync::Arc;
use std::time::SystemTime;

use tokio_util::sync::CancellationToken;

use crate::io::{HttpClient, ReqwestHttpClient};
use crate::notifier::Notifier;
use crate::practicum::PracticumClient;
use crate::telegram::TelegramBot;

/// Assembles an [`Engine`] from configuration, with optional test doubles
pub struct ReviewNotifierBuilder {
    config: Config,
    http: Option<Arc<dyn HttpClient>>,
    notifier: Option<Arc<dyn Notifier>>,
    cancel: Option<CancellationToken>,
    now: Option<SystemTime>,
}

impl ReviewNotifierBuilder {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            http: None,
            notifier: None,
            cancel: None,
            now: None,
        }
    }

    /// Use this HTTP client for the status API (and Telegram, unless a notifier is given)
    pub fn with_http_client(mut self, http: Arc<dyn HttpClient>) -> Self {
        self.http = Some(http);
        self
    }

    /// Replace the Telegram bot with another notifier
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = Some(cancel);
        self
    }

    /// Pin the startup time the poll cursor is derived from
    pub fn with_start_time(mut self, now: SystemTime) -> Self {
        self.now = Some(now);
        self
    }

    pub fn build(self) -> Engine {
        let Config { secrets, settings } = self.config;
        let http: Arc<dyn HttpClient> = match self.http {
            Some(http) => http,
            None => Arc::new(ReqwestHttpClient::new()),
        };

        let notifier: Arc<dyn Notifier> = match self.notifier {
            Some(notifier) => notifier,
            None => Arc::new(TelegramBot::new(
                &settings.telegram_api_url,
                &secrets.telegram_token,
                Arc::clone(&http),
            )),
        };

        let api = PracticumClient::new(&settings.endpoint, &secrets.practicum_token, http);
        let from_date = engine::initial_cursor(
            self.now.unwrap_or_else(SystemTime::now),
            settings.lookback,
        );

        Engine::new(
            api,
            notifier,
            &secrets.telegram_chat_id,
            from_date,
            settings.retry_period,
            self.cancel.unwrap_or_default(),
        )
    }
}

/// Run the notifier until ctrl-c
pub async fn run(config: Config) -> Result<()> {
    let cancel = CancellationToken::new();

    let cancel_for_signal = cancel.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                tracing::info!("Shutdown signal received");
                cancel_for_signal.cancel();
            }
            Err(e) => tracing::error!("Failed to listen for ctrl-c: {}", e),
        }
    });

    let mut engine = ReviewNotifierBuilder::new(config)
        .with_cancellation(cancel)
        .build();

    tracing::info!("Review notifier started");
    engine.run().await;
    tracing::info!("Review notifier stopped");

    Ok(())
}
