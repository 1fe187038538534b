//! Live adapter for an Ollama-compatible chat endpoint.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{compose_prompt, GenerateError, GenerateFuture, TextGenerator};
use crate::config::Config;

/// Client for the `/api/chat` endpoint of a local Ollama server.
pub struct OllamaClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
}

/// Request body for the chat endpoint.
#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    stream: bool,
}

/// A single chat message.
#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Response body for a non-streaming chat call.
#[derive(Deserialize)]
struct ChatResponse {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: String,
}

impl OllamaClient {
    /// Create a client from the run configuration.
    pub fn new(config: &Config) -> Self {
        let http = reqwest::Client::builder()
            .user_agent("readmint/0.1.0")
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("failed to create HTTP client");

        Self {
            http,
            base_url: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        }
    }

    async fn chat(&self, content: String) -> Result<String, GenerateError> {
        let url = format!("{}/api/chat", self.base_url);
        let body = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: &content,
            }],
            stream: false,
        };

        let response = self.http.post(&url).json(&body).send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(GenerateError::Endpoint(format!(
                "status {}: {}",
                status.as_u16(),
                text
            )));
        }

        let parsed: ChatResponse = serde_json::from_str(&text)
            .map_err(|e| GenerateError::Malformed(e.to_string()))?;
        Ok(parsed.message.content)
    }
}

impl TextGenerator for OllamaClient {
    fn generate(&self, prompt: &str, context: &[String]) -> GenerateFuture<'_> {
        let content = compose_prompt(prompt, context);
        Box::pin(async move { self.chat(content).await })
    }
}
