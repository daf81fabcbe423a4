use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::error;

use super::models::{ChatCompletion, ChatCompletionMessage, ChatCompletionRequest};
use super::{ChatModel, LlmError};

pub const OPENAI_API_BASE: &str = "https://api.openai.com";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

pub struct OpenAIChat {
    http_client: Client,
    api_key: String,
    api_base: String,
    model: String,
    timeout: Duration,
}

impl OpenAIChat {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            api_key: api_key.into(),
            api_base: OPENAI_API_BASE.to_string(),
            model: model.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn from_env(model: impl Into<String>) -> Result<Self, LlmError> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| LlmError::Configuration("OPENAI_API_KEY not set".to_string()))?;
        Ok(Self::new(api_key, model))
    }
}

#[async_trait]
impl ChatModel for OpenAIChat {
    fn vendor(&self) -> &str {
        "OpenAI"
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    async fn chat(&self, prompt: &str) -> Result<ChatCompletion, LlmError> {
        let payload = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![ChatCompletionMessage::user(prompt)],
            temperature: None,
            max_tokens: None,
            user: None,
        };

        let response = self
            .http_client
            .post(format!(
                "{}/v1/chat/completions",
                self.api_base.trim_end_matches('/')
            ))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .timeout(self.timeout)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                error!("OpenAI API request error: {}", e);
                LlmError::Transport(e.to_string())
            })?;

        let status = response.status();
        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| LlmError::Parse(e.to_string()))
        } else {
            let body = response.text().await.map_err(|e| {
                error!("Failed to read OpenAI error body: {}", e);
                LlmError::Transport(e.to_string())
            })?;
            Err(LlmError::Api {
                status: status.as_u16(),
                body,
            })
        }
    }
}
