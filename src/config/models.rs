use std::fmt;
use std::time::Duration;

use serde::Deserialize;

use super::validation::validate_config;
use crate::guardrails::types::GuardrailError;

pub const DEFAULT_DATASET_ID: &str = "model-1";
pub const DEFAULT_TRACE_ENDPOINT: &str = "https://api.whylabsapp.com/v1/traces";
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

fn default_dataset_id() -> String {
    DEFAULT_DATASET_ID.to_string()
}

fn default_trace_endpoint() -> String {
    DEFAULT_TRACE_ENDPOINT.to_string()
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

/// Immutable snapshot of the guardrail and telemetry settings.
///
/// Read once from the environment or a YAML file; a re-read produces a new
/// value rather than mutating an existing one.
#[derive(Deserialize, Clone, PartialEq)]
pub struct Config {
    pub guardrails_endpoint: String,
    pub guardrails_api_key: String,
    #[serde(default = "default_dataset_id")]
    pub default_dataset_id: String,
    #[serde(default)]
    pub whylabs_api_key: Option<String>,
    #[serde(default = "default_trace_endpoint")]
    pub trace_endpoint: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default)]
    pub trace_content: bool,
}

impl Config {
    pub fn new(guardrails_endpoint: impl Into<String>, guardrails_api_key: impl Into<String>) -> Self {
        Self {
            guardrails_endpoint: guardrails_endpoint.into(),
            guardrails_api_key: guardrails_api_key.into(),
            default_dataset_id: default_dataset_id(),
            whylabs_api_key: None,
            trace_endpoint: default_trace_endpoint(),
            timeout_ms: default_timeout_ms(),
            trace_content: false,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn validate(&self) -> Result<(), GuardrailError> {
        validate_config(self).map_err(|errors| GuardrailError::Configuration(errors.join("; ")))
    }
}

fn redact(secret: &str) -> &'static str {
    if secret.is_empty() { "<empty>" } else { "<redacted>" }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("guardrails_endpoint", &self.guardrails_endpoint)
            .field("guardrails_api_key", &redact(&self.guardrails_api_key))
            .field("default_dataset_id", &self.default_dataset_id)
            .field(
                "whylabs_api_key",
                &self.whylabs_api_key.as_deref().map(redact),
            )
            .field("trace_endpoint", &self.trace_endpoint)
            .field("timeout_ms", &self.timeout_ms)
            .field("trace_content", &self.trace_content)
            .finish()
    }
}
