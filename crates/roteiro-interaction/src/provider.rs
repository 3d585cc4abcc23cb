//! The generation provider boundary.
//!
//! The pipeline treats the provider as opaque text-in/text-out: an ordered
//! list of role-tagged messages plus sampling parameters goes in, a single
//! raw text blob comes out. Implementations are constructed explicitly and
//! injected into the services that need them; there is no process-wide
//! client.

use async_trait::async_trait;
use roteiro_core::model_config::ModelConfiguration;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Role tag on a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

impl MessageRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageRole::System => "system",
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
        }
    }
}

/// One role-tagged message in a completion request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }
}

/// Sampling parameters forwarded verbatim to the provider.
#[derive(Debug, Clone, PartialEq)]
pub struct SamplingParams {
    pub temperature: f32,
    pub max_tokens: u32,
    pub top_p: f32,
    pub frequency_penalty: f32,
    pub presence_penalty: f32,
}

impl From<&ModelConfiguration> for SamplingParams {
    fn from(configuration: &ModelConfiguration) -> Self {
        Self {
            temperature: configuration.temperature,
            max_tokens: configuration.max_tokens,
            top_p: configuration.top_p,
            frequency_penalty: configuration.frequency_penalty,
            presence_penalty: configuration.presence_penalty,
        }
    }
}

/// One completion invocation.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub sampling: SamplingParams,
}

impl CompletionRequest {
    /// Builds a request from a resolved configuration and an ordered message
    /// list.
    pub fn new(configuration: &ModelConfiguration, messages: Vec<ChatMessage>) -> Self {
        Self {
            model: configuration.model_name.clone(),
            messages,
            sampling: SamplingParams::from(configuration),
        }
    }
}

/// Errors raised by a provider implementation.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The request never got a usable HTTP response (network, timeout).
    #[error("provider request failed: {message}")]
    Request { message: String, is_retryable: bool },

    /// The provider answered with a non-success HTTP status.
    #[error("provider returned HTTP {status}: {message}")]
    Http {
        status: u16,
        message: String,
        is_retryable: bool,
        retry_after: Option<Duration>,
    },

    /// The response decoded but carried no usable text payload.
    #[error("provider response was malformed: {0}")]
    MalformedResponse(String),

    /// The client could not be configured (missing credentials).
    #[error("provider configuration error: {0}")]
    Configuration(String),
}

impl ProviderError {
    /// Whether retrying the same request could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            ProviderError::Request { is_retryable, .. } => *is_retryable,
            ProviderError::Http { is_retryable, .. } => *is_retryable,
            ProviderError::MalformedResponse(_) | ProviderError::Configuration(_) => false,
        }
    }
}

/// A text-generation provider.
///
/// One `complete` call corresponds to one invocation for one platform;
/// fan-out over platforms is the caller's concern.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(&self, request: CompletionRequest) -> Result<String, ProviderError>;
}
