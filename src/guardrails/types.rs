use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::config::models::Config;

/// Outcome selected by the guardrail policy.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    Block,
    Pass,
    Flag,
}

impl ActionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionType::Block => "block",
            ActionType::Pass => "pass",
            ActionType::Flag => "flag",
        }
    }
}

#[derive(Deserialize)]
struct RawAction {
    action_type: ActionType,
    #[serde(default)]
    is_action_block: Option<bool>,
    #[serde(default)]
    block_message: Option<String>,
}

/// The verdict part of a guardrail response.
///
/// Only constructed through deserialization or [`Action::new`], both of which
/// keep `is_action_block` in agreement with `action_type`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(try_from = "RawAction")]
pub struct Action {
    action_type: ActionType,
    is_action_block: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    block_message: Option<String>,
}

impl Action {
    pub fn new(action_type: ActionType, block_message: Option<String>) -> Self {
        Self {
            action_type,
            is_action_block: action_type == ActionType::Block,
            block_message,
        }
    }

    pub fn action_type(&self) -> ActionType {
        self.action_type
    }

    pub fn is_action_block(&self) -> bool {
        self.is_action_block
    }

    /// Message to show the end user, only when the action blocks.
    pub fn block_message(&self) -> Option<&str> {
        if self.is_action_block {
            self.block_message.as_deref()
        } else {
            None
        }
    }
}

impl TryFrom<RawAction> for Action {
    type Error = String;

    fn try_from(raw: RawAction) -> Result<Self, Self::Error> {
        let blocks = raw.action_type == ActionType::Block;
        match raw.is_action_block {
            Some(flag) if flag != blocks => Err(format!(
                "is_action_block={flag} contradicts action_type '{}'",
                raw.action_type.as_str()
            )),
            _ => Ok(Action {
                action_type: raw.action_type,
                is_action_block: blocks,
                block_message: raw.block_message,
            }),
        }
    }
}

/// A single policy rule that fired (or was checked) during evaluation.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ValidationFinding {
    pub metric: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upper_threshold: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lower_threshold: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_level: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FindingsWire {
    List(Vec<ValidationFinding>),
    Report { report: Vec<ValidationFinding> },
}

fn deserialize_findings<'de, D>(deserializer: D) -> Result<Vec<ValidationFinding>, D::Error>
where
    D: Deserializer<'de>,
{
    let wire: Option<FindingsWire> = Option::deserialize(deserializer)?;
    Ok(match wire {
        Some(FindingsWire::List(findings)) | Some(FindingsWire::Report { report: findings }) => {
            findings
        }
        None => Vec::new(),
    })
}

/// The guardrail service's verdict for one evaluation.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct EvaluationDecision {
    pub action: Action,
    #[serde(default, deserialize_with = "deserialize_findings")]
    pub validation_results: Vec<ValidationFinding>,
}

impl EvaluationDecision {
    pub fn is_block(&self) -> bool {
        self.action.is_action_block()
    }

    pub fn action_type(&self) -> ActionType {
        self.action.action_type()
    }

    pub fn block_message(&self) -> Option<&str> {
        self.action.block_message()
    }
}

/// Input to a single guardrail evaluation. Immutable once built.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    prompt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response: Option<String>,
    id: String,
    #[serde(rename = "datasetId")]
    dataset_id: String,
    #[serde(skip)]
    config: &'a Config,
}

impl<'a> EvaluationRequest<'a> {
    pub fn new(config: &'a Config, id: impl Into<String>, dataset_id: impl Into<String>) -> Self {
        Self {
            prompt: None,
            response: None,
            id: id.into(),
            dataset_id: dataset_id.into(),
            config,
        }
    }

    /// Build a request against the config's default dataset.
    pub fn for_default_dataset(config: &'a Config, id: impl Into<String>) -> Self {
        let dataset_id = config.default_dataset_id.clone();
        Self::new(config, id, dataset_id)
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    pub fn with_response(mut self, response: impl Into<String>) -> Self {
        self.response = Some(response.into());
        self
    }

    pub fn prompt(&self) -> Option<&str> {
        self.prompt.as_deref()
    }

    pub fn response(&self) -> Option<&str> {
        self.response.as_deref()
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn dataset_id(&self) -> &str {
        &self.dataset_id
    }

    pub fn config(&self) -> &'a Config {
        self.config
    }

    /// Checks the request shape without touching the network.
    pub fn validate(&self) -> Result<(), GuardrailError> {
        let has_text = |text: &Option<String>| text.as_deref().is_some_and(|t| !t.trim().is_empty());
        if !has_text(&self.prompt) && !has_text(&self.response) {
            return Err(GuardrailError::InvalidRequest(
                "either prompt or response text is required".to_string(),
            ));
        }
        if self.id.trim().is_empty() {
            return Err(GuardrailError::InvalidRequest("id is required".to_string()));
        }
        if self.dataset_id.trim().is_empty() {
            return Err(GuardrailError::InvalidRequest(
                "dataset id is required".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum GuardrailError {
    #[error("Guardrail endpoint unreachable: {message}")]
    Transport { message: String, timed_out: bool },

    #[error("Guardrail API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Unexpected guardrail response: {0}")]
    Serialization(String),

    #[error("Invalid configuration: {0}")]
    Configuration(String),

    #[error("Invalid evaluation request: {0}")]
    InvalidRequest(String),
}

impl GuardrailError {
    /// Stable name used for span and log attributes.
    pub fn error_type(&self) -> &'static str {
        match self {
            GuardrailError::Transport { timed_out: true, .. } => "Timeout",
            GuardrailError::Transport { .. } => "Transport",
            GuardrailError::Api { .. } => "Api",
            GuardrailError::Serialization(_) => "Serialization",
            GuardrailError::Configuration(_) => "Configuration",
            GuardrailError::InvalidRequest(_) => "InvalidRequest",
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, GuardrailError::Transport { timed_out: true, .. })
    }
}

impl From<reqwest::Error> for GuardrailError {
    fn from(e: reqwest::Error) -> Self {
        GuardrailError::Transport {
            timed_out: e.is_timeout(),
            message: e.to_string(),
        }
    }
}
