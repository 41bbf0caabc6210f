// ============================================================================
// File: src/llm_client.rs
// Groq chat completions client
// ============================================================================

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use crate::config::FinderSettings;
use crate::error::{FinderError, Result};
use crate::models::{ChatRequest, ChatResponse};

/// Prompt in, text out. The returned text is whatever the model produced;
/// callers must not assume it is well formed.
#[async_trait]
pub trait ChatModel: Send + Sync {
    async fn complete(&self, request: &ChatRequest) -> Result<String>;
}

pub struct GroqClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl GroqClient {
    pub fn new(api_key: String, settings: &FinderSettings) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .build()
            .map_err(|e| FinderError::Config(format!("failed to build model client: {}", e)))?;

        Ok(Self {
            client,
            base_url: settings.groq_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }
}

#[async_trait]
impl ChatModel for GroqClient {
    async fn complete(&self, request: &ChatRequest) -> Result<String> {
        debug!(
            model = %request.model,
            temperature = request.temperature,
            messages = request.messages.len(),
            "calling chat completions"
        );

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| FinderError::Model(format!("model '{}': {}", request.model, e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(FinderError::Model(format!(
                "model '{}': HTTP {}: {}",
                request.model, status, error_text
            )));
        }

        let response_text = response
            .text()
            .await
            .map_err(|e| FinderError::Model(format!("failed to read response body: {}", e)))?;

        first_choice_text(&response_text, &request.model)
    }
}

/// Primary text of a completion envelope. A missing `content` is the empty
/// string; an undecodable envelope or one without choices is an error.
pub fn first_choice_text(response_text: &str, model: &str) -> Result<String> {
    let response_data: ChatResponse = serde_json::from_str(response_text).map_err(|e| {
        FinderError::Model(format!(
            "failed to parse response from model '{}': {}\nRaw response: {}",
            model,
            e,
            response_text.chars().take(500).collect::<String>()
        ))
    })?;

    let choice = response_data
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| FinderError::Model(format!("model '{}' returned no choices", model)))?;

    Ok(choice.message.content.unwrap_or_default())
}
