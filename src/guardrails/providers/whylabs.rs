use async_trait::async_trait;
use tracing::debug;

use super::GuardrailClient;
use crate::guardrails::response_parser::decode_decision;
use crate::guardrails::types::{EvaluationDecision, EvaluationRequest, GuardrailError};

/// HTTP client for the WhyLabs guardrails container API.
/// Calls `POST {guardrails_endpoint}/evaluate`.
pub struct WhyLabsClient {
    http_client: reqwest::Client,
}

impl WhyLabsClient {
    pub fn new() -> Self {
        Self {
            http_client: reqwest::Client::new(),
        }
    }

    pub fn with_http_client(http_client: reqwest::Client) -> Self {
        Self { http_client }
    }
}

impl Default for WhyLabsClient {
    fn default() -> Self {
        Self::new()
    }
}

pub fn evaluate_url(endpoint: &str) -> String {
    format!("{}/evaluate", endpoint.trim_end_matches('/'))
}

#[async_trait]
impl GuardrailClient for WhyLabsClient {
    async fn evaluate(
        &self,
        request: &EvaluationRequest<'_>,
    ) -> Result<EvaluationDecision, GuardrailError> {
        let config = request.config();
        config.validate()?;
        request.validate()?;

        let url = evaluate_url(&config.guardrails_endpoint);
        debug!(
            url = %url,
            id = request.id(),
            dataset_id = request.dataset_id(),
            "Sending guardrail evaluation"
        );

        let response = self
            .http_client
            .post(&url)
            .header("X-API-Key", &config.guardrails_api_key)
            .header("Content-Type", "application/json")
            .timeout(config.timeout())
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let response_body = response.text().await?;

        decode_decision(status, &response_body)
    }
}
