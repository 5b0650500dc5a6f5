//! The language-model collaborator.
//!
//! Translation only needs one operation from a model: send a prompt, get text back. The
//! `ModelClient` trait is that operation; `HttpModelClient` implements it against a Messages-style
//! HTTP endpoint.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use url::Url;

/// The API version header value sent with every request.
pub const ANTHROPIC_VERSION: &str = "2023-06-01";

/// The author of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One block of message content. Only text is ever produced or consumed here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Text {
        text: String,
    },
    #[serde(other)]
    Unsupported,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: Vec<ContentBlock>,
}

impl Message {
    pub fn user_text(text: impl Into<String>) -> Self {
        Message {
            role: Role::User,
            content: vec![ContentBlock::Text { text: text.into() }],
        }
    }
}

/// A single model invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelRequest {
    pub model_id: String,
    /// Sent only when non-empty.
    pub system_prompt: String,
    pub messages: Vec<Message>,
    pub max_tokens: u32,
}

/// The part of a model response we read.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ModelResponse {
    pub content: Vec<ContentBlock>,
    #[serde(default)]
    pub stop_reason: Option<String>,
}

impl ModelResponse {
    /// The text of the first content block, if that block is text.
    pub fn first_text(&self) -> Option<&str> {
        match self.content.first() {
            Some(ContentBlock::Text { text }) => Some(text),
            _ => None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("unable to reach the model endpoint: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("the model endpoint answered with status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("unable to parse the model response: {0}")]
    InvalidResponse(#[from] serde_json::Error),
    #[error("the model response contains no text")]
    MissingText,
}

/// Anything that can answer a prompt.
#[async_trait]
pub trait ModelClient: Send + Sync {
    async fn invoke(&self, request: ModelRequest) -> Result<ModelResponse, ModelError>;
}

/// Request body of a Messages-style endpoint.
#[derive(Serialize)]
struct MessagesBody<'a> {
    model: &'a str,
    max_tokens: u32,
    #[serde(skip_serializing_if = "str::is_empty")]
    system: &'a str,
    messages: &'a [Message],
}

/// A `ModelClient` speaking JSON over HTTP.
#[derive(Debug, Clone)]
pub struct HttpModelClient {
    client: reqwest::Client,
    endpoint: Url,
    api_key: Option<String>,
}

impl HttpModelClient {
    pub fn new(endpoint: Url, api_key: Option<String>) -> Result<Self, ModelError> {
        let client = reqwest::Client::builder().build()?;
        Ok(HttpModelClient {
            client,
            endpoint,
            api_key,
        })
    }
}

#[async_trait]
impl ModelClient for HttpModelClient {
    async fn invoke(&self, request: ModelRequest) -> Result<ModelResponse, ModelError> {
        let body = MessagesBody {
            model: &request.model_id,
            max_tokens: request.max_tokens,
            system: &request.system_prompt,
            messages: &request.messages,
        };

        let mut builder = self
            .client
            .post(self.endpoint.clone())
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body);
        if let Some(api_key) = &self.api_key {
            builder = builder.header("x-api-key", api_key);
        }

        let response = builder.send().await?;
        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(ModelError::Status {
                status: status.as_u16(),
                body: text,
            });
        }
        Ok(serde_json::from_str(&text)?)
    }
}
