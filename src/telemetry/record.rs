use opentelemetry::KeyValue;
use opentelemetry::trace::{Span, Status};

use crate::guardrails::span_attributes::*;
use crate::guardrails::types::{EvaluationDecision, EvaluationRequest, GuardrailError};
use crate::llm::models::{ChatCompletion, Usage};

pub trait RecordSpan {
    fn record_span<S: Span>(&self, span: &mut S);
}

impl RecordSpan for EvaluationRequest<'_> {
    fn record_span<S: Span>(&self, span: &mut S) {
        span.set_attribute(KeyValue::new(SPAN_TYPE, SPAN_TYPE_GUARDRAILS));
        span.set_attribute(KeyValue::new(GUARDRAIL_EVALUATION_ID, self.id().to_string()));
        span.set_attribute(KeyValue::new(
            GUARDRAIL_DATASET_ID,
            self.dataset_id().to_string(),
        ));

        if self.config().trace_content {
            if let Some(prompt) = self.prompt() {
                span.set_attribute(KeyValue::new(GUARDRAIL_PROMPT, prompt.to_string()));
            }
            if let Some(response) = self.response() {
                span.set_attribute(KeyValue::new(GUARDRAIL_RESPONSE, response.to_string()));
            }
        }
    }
}

impl RecordSpan for EvaluationDecision {
    fn record_span<S: Span>(&self, span: &mut S) {
        span.set_attribute(KeyValue::new(
            GUARDRAIL_ACTION_TYPE,
            self.action_type().as_str(),
        ));
        span.set_attribute(KeyValue::new(GUARDRAIL_IS_ACTION_BLOCK, self.is_block()));
        span.set_attribute(KeyValue::new(
            GUARDRAIL_FINDINGS,
            self.validation_results.len() as i64,
        ));
        span.set_attribute(KeyValue::new(
            GEN_AI_GUARDRAIL_STATUS,
            if self.is_block() {
                GUARDRAIL_FAILED
            } else {
                GUARDRAIL_PASSED
            },
        ));
        span.set_attribute(KeyValue::new(ERROR, false));
        span.set_status(Status::Ok);
    }
}

impl RecordSpan for GuardrailError {
    fn record_span<S: Span>(&self, span: &mut S) {
        span.set_attribute(KeyValue::new(GEN_AI_GUARDRAIL_STATUS, GUARDRAIL_ERROR));
        span.set_attribute(KeyValue::new(ERROR, true));
        span.set_attribute(KeyValue::new(GEN_AI_GUARDRAIL_ERROR_TYPE, self.error_type()));
        span.set_attribute(KeyValue::new(
            GEN_AI_GUARDRAIL_ERROR_MESSAGE,
            self.to_string(),
        ));
        span.set_status(Status::error(self.to_string()));
    }
}

impl RecordSpan for Usage {
    fn record_span<S: Span>(&self, span: &mut S) {
        span.set_attribute(KeyValue::new(
            "llm.usage.prompt_tokens",
            self.prompt_tokens as i64,
        ));
        span.set_attribute(KeyValue::new(
            "llm.usage.completion_tokens",
            self.completion_tokens as i64,
        ));
        span.set_attribute(KeyValue::new(
            "llm.usage.total_tokens",
            self.total_tokens as i64,
        ));
    }
}

impl RecordSpan for ChatCompletion {
    fn record_span<S: Span>(&self, span: &mut S) {
        span.set_attribute(KeyValue::new("llm.response.id", self.id.clone()));
        span.set_attribute(KeyValue::new("llm.response.model", self.model.clone()));
        if let Some(usage) = &self.usage {
            usage.record_span(span);
        }
    }
}
