use crate::error::CompletionError;
use crate::models::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};
use reqwest::{
    header::{AUTHORIZATION, CONTENT_TYPE},
    Client,
};
use tracing::{debug, error};

/// Thin client for an OpenAI-compatible chat completions endpoint.
pub struct GroqClient {
    client: Client,
    endpoint: String,
    model: String,
    api_key: String,
}

impl GroqClient {
    pub fn new(endpoint: &str, model: &str, api_key: &str) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.to_string(),
            model: model.to_string(),
            api_key: api_key.to_string(),
        }
    }

    /// Sends one completion request and returns the first choice's text.
    ///
    /// Never retries. Non-2xx bodies are logged so the operator can see what
    /// the upstream complained about.
    pub async fn complete(&self, messages: &[ChatMessage]) -> Result<String, CompletionError> {
        let request = ChatCompletionRequest {
            model: &self.model,
            messages,
        };

        let res = self
            .client
            .post(&self.endpoint)
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
            .header(CONTENT_TYPE, "application/json")
            .json(&request)
            .send()
            .await
            .inspect_err(|e| error!("Completion request failed: {}", e))?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            error!("Completion API error ({}): {}", status, body);
            return Err(CompletionError::Status { status, body });
        }

        let raw = res.text().await?;
        let body: ChatCompletionResponse = serde_json::from_str(&raw)
            .inspect_err(|e| error!("Could not parse completion body: {}", e))?;
        debug!("Completion response: {}", raw);

        let first = body.choices.into_iter().next().ok_or(CompletionError::NoChoices)?;
        match first.message.and_then(|m| m.content) {
            Some(content) if !content.is_empty() => Ok(content),
            _ => Err(CompletionError::EmptyContent),
        }
    }
}
