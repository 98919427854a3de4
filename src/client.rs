use reqwest::header::{ACCEPT, HeaderValue};
use serde::Serialize;
use serde_json::Value;
use tokio::time::{Duration, timeout};

use crate::config::CohereSettings;
use crate::error::RelayError;
use crate::extract;

#[derive(Debug, Serialize)]
struct ChatPayload<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

/// Handle to the Cohere chat endpoint. Cloning shares the underlying connection pool.
#[derive(Debug, Clone)]
pub struct CohereClient {
    http: reqwest::Client,
    api_key: String,
    chat_url: String,
    model: String,
    timeout_ms: u64,
}

impl CohereClient {
    pub fn new(settings: &CohereSettings) -> Result<Self, RelayError> {
        let api_key = settings
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or(RelayError::MissingApiKey {
                var: settings.api_key_var,
            })?;

        Ok(Self {
            http: reqwest::Client::new(),
            api_key: api_key.to_string(),
            chat_url: settings.chat_url.clone(),
            model: settings.model.clone(),
            timeout_ms: settings.timeout_ms,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Sends one user turn and returns the raw reply body.
    ///
    /// The timeout bounds the whole exchange, body included.
    pub async fn chat(&self, prompt: &str) -> Result<Value, RelayError> {
        let body = timeout(Duration::from_millis(self.timeout_ms), self.exchange(prompt))
            .await
            .map_err(|_| RelayError::Timeout(self.timeout_ms))??;

        tracing::debug!(model = %self.model, "received chat reply");
        Ok(body)
    }

    async fn exchange(&self, prompt: &str) -> Result<Value, RelayError> {
        let payload = ChatPayload {
            model: &self.model,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .http
            .post(&self.chat_url)
            .bearer_auth(&self.api_key)
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unable to read response body>".to_string());
            return Err(RelayError::UpstreamStatus { status, body });
        }

        Ok(response.json::<Value>().await?)
    }

    /// [`chat`](Self::chat) followed by the server extraction policy.
    pub async fn reply(&self, prompt: &str) -> Result<String, RelayError> {
        let response = self.chat(prompt).await?;
        extract::extract_reply(&response)
    }
}
