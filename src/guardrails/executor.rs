use std::time::{Duration, Instant};

use futures::future::join_all;
use opentelemetry::trace::{Span, SpanKind, Tracer};
use opentelemetry::{Context, KeyValue};
use tracing::{debug, warn};

use super::providers::GuardrailClient;
use super::span_attributes::{GEN_AI_GUARDRAIL_DURATION, GUARDRAIL_SPAN_NAME};
use super::types::{EvaluationDecision, EvaluationRequest, GuardrailError};
use crate::telemetry::RecordSpan;

/// Evaluate a request without tracing. Same result as calling the client directly.
pub async fn guard(
    client: &dyn GuardrailClient,
    request: &EvaluationRequest<'_>,
) -> Result<EvaluationDecision, GuardrailError> {
    let (result, _elapsed) = run_guard(client, request).await;
    result
}

/// Evaluate a request inside a `guardrails.request` span.
///
/// The span is a child of `parent` when one is given, otherwise the root of a
/// new trace. It is ended exactly once whatever the outcome, and the decision
/// or error is returned untouched.
pub async fn guard_traced<T>(
    client: &dyn GuardrailClient,
    request: &EvaluationRequest<'_>,
    tracer: &T,
    parent: Option<&Context>,
) -> Result<EvaluationDecision, GuardrailError>
where
    T: Tracer + Sync,
    T::Span: Send + Sync,
{
    let root = Context::new();
    let parent_cx = parent.unwrap_or(&root);
    let mut span = tracer
        .span_builder(GUARDRAIL_SPAN_NAME)
        .with_kind(SpanKind::Client)
        .start_with_context(tracer, parent_cx);
    request.record_span(&mut span);

    // A dropped future still ends the span through the SDK's Drop impl.
    let (result, elapsed) = run_guard(client, request).await;

    span.set_attribute(KeyValue::new(
        GEN_AI_GUARDRAIL_DURATION,
        elapsed.as_millis() as i64,
    ));
    match &result {
        Ok(decision) => decision.record_span(&mut span),
        Err(err) => err.record_span(&mut span),
    }
    span.end();

    result
}

/// Evaluate several requests concurrently, one span each, results in input order.
pub async fn guard_all_traced<T>(
    client: &dyn GuardrailClient,
    requests: &[EvaluationRequest<'_>],
    tracer: &T,
    parent: Option<&Context>,
) -> Vec<Result<EvaluationDecision, GuardrailError>>
where
    T: Tracer + Sync,
    T::Span: Send + Sync,
{
    debug!(count = requests.len(), "Executing guardrail evaluations");
    let futures: Vec<_> = requests
        .iter()
        .map(|request| guard_traced(client, request, tracer, parent))
        .collect();
    join_all(futures).await
}

async fn run_guard(
    client: &dyn GuardrailClient,
    request: &EvaluationRequest<'_>,
) -> (Result<EvaluationDecision, GuardrailError>, Duration) {
    let start = Instant::now();
    let result = client.evaluate(request).await;
    let elapsed = start.elapsed();
    match &result {
        Ok(decision) => debug!(
            id = request.id(),
            dataset_id = request.dataset_id(),
            action_type = decision.action_type().as_str(),
            elapsed_ms = elapsed.as_millis(),
            "Guardrail evaluation complete"
        ),
        Err(err) => warn!(
            id = request.id(),
            dataset_id = request.dataset_id(),
            error = %err,
            error_type = err.error_type(),
            elapsed_ms = elapsed.as_millis(),
            "Guardrail evaluation failed"
        ),
    }
    (result, elapsed)
}
