pub mod whylabs;

use async_trait::async_trait;

use self::whylabs::WhyLabsClient;
use super::types::{EvaluationDecision, EvaluationRequest, GuardrailError};

/// Performs one evaluation round trip against a guardrail service.
#[async_trait]
pub trait GuardrailClient: Send + Sync {
    async fn evaluate(
        &self,
        request: &EvaluationRequest<'_>,
    ) -> Result<EvaluationDecision, GuardrailError>;
}

/// Evaluate a request with a freshly built default client.
pub async fn call_guardrail_api(
    request: &EvaluationRequest<'_>,
) -> Result<EvaluationDecision, GuardrailError> {
    WhyLabsClient::new().evaluate(request).await
}
