use reqwest::Url;

use super::models::Config;

fn check_url(field: &str, value: &str, errors: &mut Vec<String>) {
    match Url::parse(value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {}
        Ok(url) => errors.push(format!(
            "{field} must use http or https, got '{}'.",
            url.scheme()
        )),
        Err(e) => errors.push(format!("{field} '{value}' is not a valid URL: {e}.")),
    }
}

/// Validates a Config before any call is attempted.
/// Returns Ok(()) if valid, or Err(Vec<String>) with every problem found.
pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if config.guardrails_endpoint.trim().is_empty() {
        errors.push("guardrails_endpoint is required.".to_string());
    } else {
        check_url("guardrails_endpoint", &config.guardrails_endpoint, &mut errors);
    }

    if config.guardrails_api_key.trim().is_empty() {
        errors.push("guardrails_api_key is required.".to_string());
    }

    if config.default_dataset_id.trim().is_empty() {
        errors.push("default_dataset_id must not be empty.".to_string());
    }

    check_url("trace_endpoint", &config.trace_endpoint, &mut errors);

    if config.timeout_ms == 0 {
        errors.push("timeout_ms must be greater than zero.".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
