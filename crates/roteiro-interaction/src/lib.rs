pub mod openai_api;
pub mod provider;

pub use openai_api::OpenAiClient;
pub use provider::{
    ChatMessage, CompletionProvider, CompletionRequest, MessageRole, ProviderError, SamplingParams,
};
