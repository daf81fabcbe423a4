pub mod models;
pub mod openai;

use async_trait::async_trait;
use thiserror::Error;

use self::models::ChatCompletion;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum LlmError {
    #[error("LLM provider unreachable: {0}")]
    Transport(String),

    #[error("LLM provider error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Unexpected LLM response: {0}")]
    Parse(String),

    #[error("LLM provider misconfigured: {0}")]
    Configuration(String),
}

/// A chat-completion capable model provider.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Human readable vendor name, e.g. `OpenAI`.
    fn vendor(&self) -> &str;

    fn model_name(&self) -> &str;

    async fn chat(&self, prompt: &str) -> Result<ChatCompletion, LlmError>;
}
