use std::env;

use super::models::{
    Config, DEFAULT_DATASET_ID, DEFAULT_TIMEOUT_MS, DEFAULT_TRACE_ENDPOINT,
};
use crate::guardrails::types::GuardrailError;

pub const GUARDRAILS_ENDPOINT: &str = "GUARDRAILS_ENDPOINT";
pub const GUARDRAILS_API_KEY: &str = "GUARDRAILS_API_KEY";
pub const GUARDRAILS_TIMEOUT_MS: &str = "GUARDRAILS_TIMEOUT_MS";
pub const WHYLABS_API_KEY: &str = "WHYLABS_API_KEY";
pub const WHYLABS_DEFAULT_DATASET_ID: &str = "WHYLABS_DEFAULT_DATASET_ID";
pub const WHYLABS_TRACE_ENDPOINT: &str = "WHYLABS_TRACE_ENDPOINT";
pub const TRACE_CONTENT_ENABLED: &str = "TRACE_CONTENT_ENABLED";

fn env_non_empty(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

pub fn get_trace_content_enabled() -> bool {
    env::var(TRACE_CONTENT_ENABLED)
        .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

fn timeout_ms_from_env() -> Result<u64, GuardrailError> {
    match env_non_empty(GUARDRAILS_TIMEOUT_MS) {
        Some(raw) => raw.trim().parse().map_err(|_| {
            GuardrailError::Configuration(format!(
                "{GUARDRAILS_TIMEOUT_MS} must be a whole number of milliseconds, got '{raw}'"
            ))
        }),
        None => Ok(DEFAULT_TIMEOUT_MS),
    }
}

/// Read a fresh Config snapshot from the process environment.
pub fn read_config() -> Result<Config, GuardrailError> {
    let config = Config {
        guardrails_endpoint: env_non_empty(GUARDRAILS_ENDPOINT).unwrap_or_default(),
        guardrails_api_key: env_non_empty(GUARDRAILS_API_KEY).unwrap_or_default(),
        default_dataset_id: env_non_empty(WHYLABS_DEFAULT_DATASET_ID)
            .unwrap_or_else(|| DEFAULT_DATASET_ID.to_string()),
        whylabs_api_key: env_non_empty(WHYLABS_API_KEY),
        trace_endpoint: env_non_empty(WHYLABS_TRACE_ENDPOINT)
            .unwrap_or_else(|| DEFAULT_TRACE_ENDPOINT.to_string()),
        timeout_ms: timeout_ms_from_env()?,
        trace_content: get_trace_content_enabled(),
    };
    config.validate()?;
    Ok(config)
}

/// Load and validate a Config from a YAML file.
pub fn load_config(path: &str) -> Result<Config, GuardrailError> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        GuardrailError::Configuration(format!("failed to read config file {path}: {e}"))
    })?;
    let config: Config = serde_yaml::from_str(&contents).map_err(|e| {
        GuardrailError::Configuration(format!("failed to parse config file {path}: {e}"))
    })?;
    config.validate()?;
    Ok(config)
}

impl Config {
    pub fn from_env() -> Result<Self, GuardrailError> {
        read_config()
    }
}
