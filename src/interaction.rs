//! Guarded chat interaction: check the prompt, call the model, check the
//! answer, all under a single `interaction` trace.
//!
//! Guardrail failures are never treated as a pass. Any error aborts the
//! interaction and is returned to the caller (fail closed).

use opentelemetry::trace::{Span, SpanKind, Status, TraceContextExt, Tracer};
use opentelemetry::{Context, KeyValue};
use thiserror::Error;
use tracing::{error, info};
use uuid::Uuid;

use crate::config::models::Config;
use crate::guardrails::executor::guard_traced;
use crate::guardrails::providers::GuardrailClient;
use crate::guardrails::span_attributes::{ERROR, SPAN_TYPE};
use crate::guardrails::types::{EvaluationDecision, EvaluationRequest, GuardrailError};
use crate::llm::models::ChatCompletion;
use crate::llm::{ChatModel, LlmError};
use crate::telemetry::RecordSpan;

pub const INTERACTION_SPAN_NAME: &str = "interaction";
pub const NO_LLM_RESPONSE: &str = "no response from llm";
pub const DEFAULT_BLOCK_MESSAGE: &str = "This content was blocked by a guardrail policy.";

#[derive(Debug, Error)]
pub enum InteractionError {
    #[error(transparent)]
    Guardrail(#[from] GuardrailError),

    #[error(transparent)]
    Llm(#[from] LlmError),
}

pub struct Interaction<'a, T> {
    pub guard_client: &'a dyn GuardrailClient,
    pub model: &'a dyn ChatModel,
    pub tracer: &'a T,
    pub config: &'a Config,
}

impl<'a, T> Interaction<'a, T>
where
    T: Tracer + Sync,
    T::Span: Send + Sync + 'static,
{
    pub fn new(
        guard_client: &'a dyn GuardrailClient,
        model: &'a dyn ChatModel,
        tracer: &'a T,
        config: &'a Config,
    ) -> Self {
        Self {
            guard_client,
            model,
            tracer,
            config,
        }
    }

    /// Run one guarded prompt/answer exchange and return the text to show the
    /// user: either the model output or a guardrail block message.
    pub async fn process_prompt(
        &self,
        user_prompt: &str,
        dataset_id: &str,
    ) -> Result<String, InteractionError> {
        let span = self
            .tracer
            .span_builder(INTERACTION_SPAN_NAME)
            .with_kind(SpanKind::Internal)
            .start_with_context(self.tracer, &Context::new());
        let cx = Context::new().with_span(span);
        cx.span()
            .set_attribute(KeyValue::new("llm.request.type", "chat"));
        cx.span()
            .set_attribute(KeyValue::new(SPAN_TYPE, INTERACTION_SPAN_NAME));

        let result = self.run(user_prompt, dataset_id, &cx).await;

        match &result {
            Ok(_) => cx.span().set_status(Status::Ok),
            Err(err) => {
                error!(error = %err, "Error in guarded interaction");
                cx.span().set_attribute(KeyValue::new(ERROR, true));
                cx.span().set_status(Status::error(err.to_string()));
            }
        }
        cx.span().end();

        result
    }

    async fn run(
        &self,
        user_prompt: &str,
        dataset_id: &str,
        cx: &Context,
    ) -> Result<String, InteractionError> {
        let interaction_id = Uuid::new_v4().to_string();
        cx.span().set_attribute(KeyValue::new(
            "interaction.id",
            interaction_id.clone(),
        ));

        let before = EvaluationRequest::new(self.config, interaction_id.as_str(), dataset_id)
            .with_prompt(user_prompt);
        let decision = guard_traced(self.guard_client, &before, self.tracer, Some(cx)).await?;
        if decision.is_block() {
            info!(id = %interaction_id, "Prompt was blocked by guardrail");
            return Ok(blocked_text(&decision));
        }

        let completion = self.complete(user_prompt, cx).await?;
        let llm_response = completion
            .first_content()
            .unwrap_or(NO_LLM_RESPONSE)
            .to_string();

        let response_id = if completion.id.is_empty() {
            interaction_id
        } else {
            completion.id.clone()
        };
        let after = EvaluationRequest::new(self.config, response_id, dataset_id)
            .with_prompt(user_prompt)
            .with_response(llm_response.as_str());
        let decision = guard_traced(self.guard_client, &after, self.tracer, Some(cx)).await?;
        if decision.is_block() {
            info!(id = after.id(), "Response was blocked by guardrail");
            return Ok(blocked_text(&decision));
        }

        Ok(llm_response)
    }

    async fn complete(&self, user_prompt: &str, cx: &Context) -> Result<ChatCompletion, LlmError> {
        let mut span = self
            .tracer
            .span_builder(format!("{}.chat", self.model.vendor().to_lowercase()))
            .with_kind(SpanKind::Client)
            .start_with_context(self.tracer, cx);
        span.set_attribute(KeyValue::new(SPAN_TYPE, "completion"));
        span.set_attribute(KeyValue::new("llm.vendor", self.model.vendor().to_string()));
        span.set_attribute(KeyValue::new(
            "llm.request.model",
            self.model.model_name().to_string(),
        ));

        let result = self.model.chat(user_prompt).await;

        match &result {
            Ok(completion) => {
                completion.record_span(&mut span);
                span.set_status(Status::Ok);
            }
            Err(err) => {
                span.set_attribute(KeyValue::new(ERROR, true));
                span.set_status(Status::error(err.to_string()));
            }
        }
        span.end();

        result
    }
}

fn blocked_text(decision: &EvaluationDecision) -> String {
    decision
        .block_message()
        .filter(|message| !message.is_empty())
        .unwrap_or(DEFAULT_BLOCK_MESSAGE)
        .to_string()
}
