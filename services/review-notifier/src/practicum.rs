//! Client for the homework status API

use std::sync::Arc;

use crate::io::HttpClient;
use crate::ReviewNotifierError;

/// Authenticated client for the single homework status endpoint
pub struct PracticumClient {
    endpoint: String,
    authorization: String,
    http: Arc<dyn HttpClient>,
}

impl std::fmt::Debug for PracticumClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PracticumClient")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl PracticumClient {
    pub fn new(endpoint: &str, token: &str, http: Arc<dyn HttpClient>) -> Self {
        tracing::debug!("Created PracticumClient for {}", endpoint);

        Self {
            endpoint: endpoint.to_string(),
            authorization: format!("OAuth {}", token),
            http,
        }
    }

    /// Fetch homework statuses changed since `from_date` (Unix seconds).
    ///
    /// Anything other than HTTP 200, including transport failures, is an
    /// [`ReviewNotifierError::ApiAnswer`]. The body is returned as parsed JSON
    /// without any schema checks.
    pub async fn fetch(&self, from_date: i64) -> crate::Result<serde_json::Value> {
        let from_date = from_date.to_string();
        let response = self
            .http
            .get(
                &self.endpoint,
                &[("Authorization", self.authorization.as_str())],
                &[("from_date", from_date.as_str())],
            )
            .await
            .map_err(|e| ReviewNotifierError::ApiAnswer(format!("endpoint unreachable: {}", e)))?;

        if response.status != 200 {
            return Err(ReviewNotifierError::ApiAnswer(format!(
                "endpoint {} returned status {}",
                self.endpoint, response.status
            )));
        }

        let value = serde_json::from_str(&response.body)?;
        tracing::debug!("Fetched homework statuses from_date={}", from_date);
        Ok(value)
    }
}
