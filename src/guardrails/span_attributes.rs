pub const GUARDRAIL_SPAN_NAME: &str = "guardrails.request";

pub const SPAN_TYPE: &str = "span.type";
pub const SPAN_TYPE_GUARDRAILS: &str = "guardrails";
pub const ERROR: &str = "error";

pub const GUARDRAIL_EVALUATION_ID: &str = "guardrails.evaluation.id";
pub const GUARDRAIL_DATASET_ID: &str = "guardrails.dataset_id";
pub const GUARDRAIL_PROMPT: &str = "guardrails.prompt";
pub const GUARDRAIL_RESPONSE: &str = "guardrails.response";
pub const GUARDRAIL_ACTION_TYPE: &str = "guardrails.action.type";
pub const GUARDRAIL_IS_ACTION_BLOCK: &str = "guardrails.action.is_block";
pub const GUARDRAIL_FINDINGS: &str = "guardrails.validation_results.count";

pub const GEN_AI_GUARDRAIL_STATUS: &str = "gen_ai.guardrail.status";
pub const GEN_AI_GUARDRAIL_DURATION: &str = "gen_ai.guardrail.duration";
pub const GEN_AI_GUARDRAIL_ERROR_TYPE: &str = "gen_ai.guardrail.error.type";
pub const GEN_AI_GUARDRAIL_ERROR_MESSAGE: &str = "gen_ai.guardrail.error.message";

pub const GUARDRAIL_PASSED: &str = "PASSED";
pub const GUARDRAIL_FAILED: &str = "FAILED";
pub const GUARDRAIL_ERROR: &str = "ERROR";
