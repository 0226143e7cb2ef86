//! Chat-completion gateway client.
//!
//! Talks to an OpenAI-compatible `/chat/completions` endpoint with a
//! system message and a multi-part user message (text and image URLs).

mod config;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::error::{TruthguardError, TruthguardResult};

pub use config::{
    GatewayConfig, API_KEY_ENV, DEFAULT_GATEWAY_URL, DEFAULT_MODEL, DEFAULT_TEMPERATURE,
};

/// One part of a multi-part user message.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum ContentPart {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(rename = "image_url")]
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageUrl {
    pub url: String,
}

impl ContentPart {
    pub fn text(text: impl Into<String>) -> Self {
        ContentPart::Text { text: text.into() }
    }

    pub fn image_url(url: impl Into<String>) -> Self {
        ContentPart::ImageUrl {
            image_url: ImageUrl { url: url.into() },
        }
    }
}

/// What to ask the completion collaborator.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub system: String,
    pub content: Vec<ContentPart>,
}

/// A service that turns a prompt into free text.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> TruthguardResult<String>;
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: MessageContent<'a>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum MessageContent<'a> {
    Text(&'a str),
    Parts(&'a [ContentPart]),
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// HTTP client for the hosted completion gateway.
#[derive(Clone)]
pub struct GatewayClient {
    config: GatewayConfig,
    client: reqwest::Client,
}

impl GatewayClient {
    pub fn new(config: GatewayConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl CompletionClient for GatewayClient {
    async fn complete(&self, request: &CompletionRequest) -> TruthguardResult<String> {
        let api_key = self
            .config
            .api_key()
            .ok_or_else(|| TruthguardError::config(format!("{} is not configured", API_KEY_ENV)))?;

        let body = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: MessageContent::Text(&request.system),
                },
                ChatMessage {
                    role: "user",
                    content: MessageContent::Parts(&request.content),
                },
            ],
            temperature: self.config.temperature,
        };

        let url = self.config.completions_url();
        debug!(
            url = %url,
            model = %self.config.model,
            parts = request.content.len(),
            "Calling AI gateway"
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!(status = status.as_u16(), body = %error_text, "AI gateway error");
            return Err(match status.as_u16() {
                429 => TruthguardError::RateLimited,
                402 => TruthguardError::CreditsExhausted,
                code => TruthguardError::Gateway {
                    status: code,
                    body: error_text,
                },
            });
        }

        let chat: ChatResponse = response.json().await?;
        let reply = chat
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message)
            .and_then(|m| m.content)
            .unwrap_or_default();

        debug!(chars = reply.len(), "AI response received");
        Ok(reply)
    }
}
