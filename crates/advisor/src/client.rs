use crate::config::AdvisorConfig;
use crate::digest::ShopDigest;
use crate::error::{AdvisorError, AdvisorResult};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

/// Client for the chat-completion endpoint. Requests carry the configured
/// timeout, so a hung network call can never block the shop indefinitely.
#[derive(Debug, Clone)]
pub struct AdvisorClient {
    config: AdvisorConfig,
    client: Client,
}

impl AdvisorClient {
    pub fn new(config: AdvisorConfig) -> AdvisorResult<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self { config, client })
    }

    /// Ask the assistant a question with the current shop digest as
    /// context. Returns the completion text verbatim (trimmed).
    pub async fn ask(&self, question: &str, digest: &ShopDigest) -> AdvisorResult<String> {
        let request = ChatRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: digest.system_prompt(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: question.to_string(),
                },
            ],
        };

        debug!("sending advisory request (model: {})", self.config.model);

        let response = self
            .client
            .post(format!("{}/chat/completions", self.config.endpoint))
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            error!("advisory service error: HTTP {}", status);
            return Err(AdvisorError::Api { status, body });
        }

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|_| AdvisorError::MalformedResponse)?;

        let content = chat
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or(AdvisorError::MalformedResponse)?;

        Ok(content.trim().to_string())
    }
}

// Wire types for the chat-completion API
#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: String,
}
