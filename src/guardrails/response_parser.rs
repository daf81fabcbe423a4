use reqwest::StatusCode;
use tracing::debug;

use super::types::{EvaluationDecision, GuardrailError};

/// Turn a reply from the guardrail service into a decision.
///
/// A non-2xx reply keeps its raw body in [`GuardrailError::Api`]; a 2xx body
/// that is not a well formed decision is a [`GuardrailError::Serialization`].
pub fn decode_decision(status: StatusCode, body: &str) -> Result<EvaluationDecision, GuardrailError> {
    if !status.is_success() {
        return Err(GuardrailError::Api {
            status: status.as_u16(),
            body: body.to_owned(),
        });
    }

    match serde_json::from_str::<EvaluationDecision>(body) {
        Ok(decision) => {
            debug!(
                %status,
                action_type = decision.action_type().as_str(),
                blocked = decision.is_block(),
                findings = decision.validation_results.len(),
                "Decoded guardrail decision"
            );
            Ok(decision)
        }
        Err(e) => {
            debug!(%status, error = %e, body_len = body.len(), "Guardrail body is not a decision");
            Err(GuardrailError::Serialization(e.to_string()))
        }
    }
}
