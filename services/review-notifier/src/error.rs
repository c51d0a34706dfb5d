//! Error types for the review notifier

/// Errors that can occur while polling the review API or notifying the chat
#[derive(Debug, thiserror::Error)]
pub enum ReviewNotifierError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("API answer error: {0}")]
    ApiAnswer(String),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unexpected response type: {0}")]
    ResponseType(String),

    #[error("Missing key '{key}' in {context}")]
    MissingKey { key: String, context: String },

    #[error("No homeworks in the API response")]
    EmptyHomeworks,

    #[error("Unexpected homework status '{0}'")]
    UnknownStatus(String),

    #[error("Telegram error: {0}")]
    Telegram(String),
}

/// Broad classification of [`ReviewNotifierError`] values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing secrets or an unreadable settings file; fatal at startup
    Configuration,
    /// The status API could not be reached or answered with a non-200 status
    Fetch,
    /// The API answered, but the payload does not have the expected shape
    Shape,
    /// A homework record could not be turned into a message
    Interpretation,
    /// Sending to the chat failed
    Notification,
}

impl ReviewNotifierError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Config(_) => ErrorKind::Configuration,
            Self::Http(_) | Self::ApiAnswer(_) => ErrorKind::Fetch,
            Self::Json(_) | Self::ResponseType(_) | Self::EmptyHomeworks => ErrorKind::Shape,
            Self::MissingKey { context, .. } if context == RESPONSE_CONTEXT => ErrorKind::Shape,
            Self::MissingKey { .. } | Self::UnknownStatus(_) => ErrorKind::Interpretation,
            Self::Telegram(_) => ErrorKind::Notification,
        }
    }

    pub(crate) fn missing_key(key: &str, context: &str) -> Self {
        Self::MissingKey {
            key: key.to_string(),
            context: context.to_string(),
        }
    }
}

pub(crate) const RESPONSE_CONTEXT: &str = "API response";
pub(crate) const HOMEWORK_CONTEXT: &str = "homework record";

/// Result type alias for review notifier operations
pub type Result<T> = std::result::Result<T, ReviewNotifierError>;
