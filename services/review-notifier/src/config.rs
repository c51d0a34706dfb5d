//! Configuration for the review notifier
//!
//! Secrets come from the process environment. Everything else lives in an
//! optional JSON settings file and falls back to defaults.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const PRACTICUM_TOKEN_VAR: &str = "PRACTICUM_TOKEN";
pub const TELEGRAM_TOKEN_VAR: &str = "TELEGRAM_TOKEN";
pub const TELEGRAM_CHAT_ID_VAR: &str = "TELEGRAM_CHAT_ID";

const REQUIRED_VARS: [&str; 3] = [PRACTICUM_TOKEN_VAR, TELEGRAM_TOKEN_VAR, TELEGRAM_CHAT_ID_VAR];

/// The three secrets the service cannot run without
#[derive(Clone, PartialEq, Eq)]
pub struct Secrets {
    pub practicum_token: String,
    pub telegram_token: String,
    pub telegram_chat_id: String,
}

impl std::fmt::Debug for Secrets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Secrets")
            .field("practicum_token", &"<redacted>")
            .field("telegram_token", &"<redacted>")
            .field("telegram_chat_id", &self.telegram_chat_id)
            .finish()
    }
}

impl Secrets {
    /// Read the secrets from the process environment
    pub fn from_env() -> crate::Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read the secrets through an arbitrary lookup. Empty values count as missing.
    pub fn from_lookup<F>(lookup: F) -> crate::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let missing = missing_secrets(&lookup);
        if !missing.is_empty() {
            return Err(crate::ReviewNotifierError::Config(format!(
                "Missing required environment variables: {}",
                missing.join(", ")
            )));
        }

        let get = |name: &str| lookup(name).unwrap_or_default();
        Ok(Self {
            practicum_token: get(PRACTICUM_TOKEN_VAR),
            telegram_token: get(TELEGRAM_TOKEN_VAR),
            telegram_chat_id: get(TELEGRAM_CHAT_ID_VAR),
        })
    }
}

/// Names of required variables that are absent or empty
pub fn missing_secrets<F>(lookup: F) -> Vec<&'static str>
where
    F: Fn(&str) -> Option<String>,
{
    REQUIRED_VARS
        .iter()
        .copied()
        .filter(|name| lookup(*name).map_or(true, |value| value.is_empty()))
        .collect()
}

/// True when every required secret is present
pub fn check_tokens<F>(lookup: F) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    missing_secrets(lookup).is_empty()
}

/// Non-secret settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_telegram_api_url")]
    pub telegram_api_url: String,
    /// Pause between two polls, e.g. "10m"
    #[serde(default = "default_retry_period", with = "humantime_serde")]
    pub retry_period: Duration,
    /// How far back from startup the poll cursor is placed
    #[serde(default, with = "humantime_serde")]
    pub lookback: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            telegram_api_url: default_telegram_api_url(),
            retry_period: default_retry_period(),
            lookback: Duration::ZERO,
        }
    }
}

fn default_endpoint() -> String {
    "https://practicum.yandex.ru/api/user_api/homework_statuses/".to_string()
}

fn default_telegram_api_url() -> String {
    "https://api.telegram.org".to_string()
}

fn default_retry_period() -> Duration {
    Duration::from_secs(600)
}

/// Everything the service needs to start
#[derive(Debug, Clone)]
pub struct Config {
    pub secrets: Secrets,
    pub settings: Settings,
}

/// Load settings from a JSON file
pub fn load_settings(path: &Path) -> crate::Result<Settings> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        crate::ReviewNotifierError::Config(format!("Failed to read config file {:?}: {}", path, e))
    })?;
    let settings: Settings = serde_json::from_str(&content)?;
    Ok(settings)
}
