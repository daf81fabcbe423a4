pub mod executor;
pub mod providers;
pub mod response_parser;
pub mod span_attributes;
pub mod types;

pub use executor::{guard, guard_all_traced, guard_traced};
pub use providers::{GuardrailClient, call_guardrail_api};
pub use types::{
    Action, ActionType, EvaluationDecision, EvaluationRequest, GuardrailError, ValidationFinding,
};
