//! BDD test world for the review notifier

use std::sync::Arc;

use cucumber::World;
use review_notifier::{Engine, PollOutcome};

use crate::steps::polling_steps::RecordingHttpClient;

#[derive(Debug, Default, World)]
pub struct ReviewNotifierWorld {
    // Response and status interpretation
    pub response: Option<serde_json::Value>,
    pub rendered: Option<review_notifier::Result<String>>,

    // Configuration
    pub env: Vec<(String, String)>,
    pub secrets_result: Option<review_notifier::Result<review_notifier::Secrets>>,

    // Polling loop
    pub http: Option<Arc<RecordingHttpClient>>,
    pub engine: Option<Engine>,
    pub outcomes: Vec<PollOutcome>,
}
