//! BDD step definitions for the polling loop

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use cucumber::{given, then, when};
use tokio::sync::RwLock;

use review_notifier::io::{HttpClient, HttpResponse};
use review_notifier::{
    Config, PollOutcome, ReviewNotifierBuilder, ReviewNotifierError, Secrets, Settings,
};

use crate::world::ReviewNotifierWorld;

// --- Test doubles ---

/// Replays scripted status API answers and records chat messages
#[derive(Debug, Default)]
pub struct RecordingHttpClient {
    pub answers: RwLock<VecDeque<review_notifier::Result<HttpResponse>>>,
    pub messages: RwLock<Vec<(String, String)>>,
    pub chat_status: RwLock<Option<u16>>,
}

#[async_trait::async_trait]
impl HttpClient for RecordingHttpClient {
    async fn get(
        &self,
        _url: &str,
        _headers: &[(&str, &str)],
        _query: &[(&str, &str)],
    ) -> review_notifier::Result<HttpResponse> {
        self.answers
            .write()
            .await
            .pop_front()
            .unwrap_or_else(|| Err(ReviewNotifierError::Http("no scripted answer".to_string())))
    }

    async fn post_json(
        &self,
        _url: &str,
        body: &serde_json::Value,
    ) -> review_notifier::Result<HttpResponse> {
        let status = self.chat_status.read().await.unwrap_or(200);
        if status == 200 {
            self.messages.write().await.push((
                body["chat_id"].as_str().unwrap_or_default().to_string(),
                body["text"].as_str().unwrap_or_default().to_string(),
            ));
        }
        Ok(HttpResponse {
            status,
            body: r#"{"ok":false,"description":"Forbidden: bot was blocked by the user"}"#
                .to_string(),
        })
    }
}

fn http(world: &mut ReviewNotifierWorld) -> Arc<RecordingHttpClient> {
    Arc::clone(world.http.get_or_insert_with(Default::default))
}

fn homework_answer(name: &str, status: &str) -> review_notifier::Result<HttpResponse> {
    Ok(HttpResponse {
        status: 200,
        body: serde_json::json!({
            "homeworks": [{"homework_name": name, "status": status}],
            "current_date": 1_700_000_000
        })
        .to_string(),
    })
}

// --- Steps ---

#[given(expr = "the status API answers with homework {string} in status {string}")]
async fn answers_homework(world: &mut ReviewNotifierWorld, name: String, status: String) {
    http(world)
        .answers
        .write()
        .await
        .push_back(homework_answer(&name, &status));
}

#[given(expr = "the status API answers with homework {string} in status {string} {int} times")]
async fn answers_homework_repeatedly(
    world: &mut ReviewNotifierWorld,
    name: String,
    status: String,
    times: usize,
) {
    let http = http(world);
    let mut answers = http.answers.write().await;
    for _ in 0..times {
        answers.push_back(homework_answer(&name, &status));
    }
}

#[given("the status API answers with an empty homework list")]
async fn answers_empty(world: &mut ReviewNotifierWorld) {
    http(world).answers.write().await.push_back(Ok(HttpResponse {
        status: 200,
        body: r#"{"homeworks": []}"#.to_string(),
    }));
}

#[given(expr = "the status API answers with HTTP status {int}")]
async fn answers_status(world: &mut ReviewNotifierWorld, status: u16) {
    http(world).answers.write().await.push_back(Ok(HttpResponse {
        status,
        body: "{}".to_string(),
    }));
}

#[given("the status API is unreachable")]
async fn api_unreachable(world: &mut ReviewNotifierWorld) {
    http(world)
        .answers
        .write()
        .await
        .push_back(Err(ReviewNotifierError::Http("connection refused".to_string())));
}

#[given(expr = "the chat endpoint answers with HTTP status {int}")]
async fn chat_rejects(world: &mut ReviewNotifierWorld, status: u16) {
    *http(world).chat_status.write().await = Some(status);
}

#[when(expr = "the notifier polls {int} time(s)")]
async fn poll_times(world: &mut ReviewNotifierWorld, times: usize) {
    let http = http(world);
    let engine = world.engine.get_or_insert_with(|| {
        let config = Config {
            secrets: Secrets {
                practicum_token: "p-token".to_string(),
                telegram_token: "t-token".to_string(),
                telegram_chat_id: "42".to_string(),
            },
            settings: Settings {
                retry_period: Duration::from_secs(1),
                ..Settings::default()
            },
        };
        ReviewNotifierBuilder::new(config)
            .with_http_client(http)
            .build()
    });

    for _ in 0..times {
        let outcome = engine.poll_once().await;
        world.outcomes.push(outcome);
    }
}

#[then(expr = "{int} message(s) should have been sent to chat {string}")]
async fn messages_sent(world: &mut ReviewNotifierWorld, count: usize, chat_id: String) {
    let messages = http(world).messages.read().await.clone();
    assert_eq!(messages.len(), count, "{messages:?}");
    assert!(messages.iter().all(|(chat, _)| *chat == chat_id));
}

#[then(expr = "message {int} should start with {string}")]
async fn message_starts_with(world: &mut ReviewNotifierWorld, index: usize, prefix: String) {
    let messages = http(world).messages.read().await.clone();
    let (_, text) = messages.get(index - 1).expect("no such message");
    assert!(text.starts_with(&prefix), "{text}");
}

#[then(expr = "message {int} should mention {string}")]
async fn message_mentions(world: &mut ReviewNotifierWorld, index: usize, needle: String) {
    let messages = http(world).messages.read().await.clone();
    let (_, text) = messages.get(index - 1).expect("no such message");
    assert!(text.contains(&needle), "{text}");
}

#[then(expr = "poll {int} should report no new status")]
fn poll_unchanged(world: &mut ReviewNotifierWorld, index: usize) {
    assert_eq!(world.outcomes[index - 1], PollOutcome::Unchanged);
}

#[then(expr = "poll {int} should have failed")]
fn poll_failed(world: &mut ReviewNotifierWorld, index: usize) {
    assert!(
        matches!(world.outcomes[index - 1], PollOutcome::Failed(_)),
        "{:?}",
        world.outcomes[index - 1]
    );
}

#[then(expr = "poll {int} should have sent a new status")]
fn poll_notified(world: &mut ReviewNotifierWorld, index: usize) {
    assert!(
        matches!(world.outcomes[index - 1], PollOutcome::Notified(_)),
        "{:?}",
        world.outcomes[index - 1]
    );
}
