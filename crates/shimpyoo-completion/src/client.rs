use async_trait::async_trait;
use reqwest::{Client, StatusCode, header};
use tracing::{debug, warn};

use crate::CompletionClient;
use crate::error::{CompletionError, Result};
use crate::types::{ChatRequest, extract_answer};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// OpenAI chat-completion client. One blocking round-trip per prompt, no
/// retries, no streaming.
#[derive(Clone)]
pub struct OpenAiClient {
    http_client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAiClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(CompletionError::Config("API key is empty".into()));
        }

        Ok(Self {
            http_client: Client::new(),
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
        })
    }

    /// Point at a different OpenAI-compatible server (proxies, tests).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let start = std::time::Instant::now();
        let request = ChatRequest::single(&self.model, prompt);

        let response = self
            .http_client
            .post(format!("{}/chat/completions", self.base_url))
            .header(header::AUTHORIZATION, format!("Bearer {}", self.api_key))
            .header(header::CONTENT_TYPE, "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Completion request failed");
                CompletionError::Network(e.to_string())
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = %status, error = %error_text, "Completion API error");
            return Err(CompletionError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| CompletionError::Network(e.to_string()))?;

        let answer = extract_answer(&body)?;

        debug!(
            model = %self.model,
            duration_ms = start.elapsed().as_millis(),
            answer_chars = answer.chars().count(),
            "Chat completion"
        );

        Ok(answer)
    }
}
