//! OpenRouter chat-completions client.

use crate::config::ProducerConfig;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use slidegen_core::{Error, PromptTemplate, Result, TextProducer};
use std::time::Duration;

/// Text producer backed by the OpenRouter API.
pub struct OpenRouterProducer {
    client: Client,
    config: ProducerConfig,
}

impl OpenRouterProducer {
    /// Create a producer. Fails when the API key or model is missing.
    pub fn new(config: ProducerConfig) -> Result<Self> {
        config.validate()?;
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::Producer(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client, config })
    }

    /// The chat-completions URL.
    pub fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }

    /// Request body for a prompt.
    pub fn request_body(&self, prompt: &PromptTemplate) -> ChatRequest {
        ChatRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: prompt.system_message(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: prompt.user_message(),
                },
            ],
        }
    }
}

impl TextProducer for OpenRouterProducer {
    fn produce(&self, prompt: &PromptTemplate) -> Result<String> {
        let body = self.request_body(prompt);
        log::debug!("Sending request to OpenRouter (model {})", body.model);

        let mut request = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.config.api_key)
            .json(&body);
        if !self.config.site_url.is_empty() {
            request = request.header("HTTP-Referer", &self.config.site_url);
        }
        if !self.config.app_name.is_empty() {
            request = request.header("X-Title", &self.config.app_name);
        }

        let response = request
            .send()
            .map_err(|e| Error::Producer(format!("OpenRouter request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().unwrap_or_default();
            log::warn!("OpenRouter returned {}", status);
            return Err(Error::Producer(format!("{}, {}", status.as_u16(), error_body)));
        }

        let chat_response: ChatResponse = response
            .json()
            .map_err(|e| Error::Producer(format!("Failed to parse OpenRouter response: {}", e)))?;

        extract_content(chat_response)
    }
}

/// Chat-completions request.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

/// Chat-completions response (only the fields we read).
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    pub message: ChatMessage,
}

/// Content of the first choice.
fn extract_content(response: ChatResponse) -> Result<String> {
    response
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content)
        .ok_or_else(|| Error::Producer("OpenRouter response contained no choices".to_string()))
}
