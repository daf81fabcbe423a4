use std::time::{Duration, Instant};

use guardrails_lib::guardrails::providers::whylabs::WhyLabsClient;
use guardrails_lib::guardrails::providers::{GuardrailClient, call_guardrail_api};
use guardrails_lib::guardrails::types::*;
use serde_json::json;
use wiremock::matchers;
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::helpers::*;

#[tokio::test]
async fn test_client_posts_to_evaluate_path() {
    let mock_server = MockServer::start().await;
    Mock::given(matchers::method("POST"))
        .and(matchers::path("/evaluate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(pass_body()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = test_config(&format!("{}/", mock_server.uri()));
    let request = EvaluationRequest::new(&config, "turn-1", "model-1").with_prompt("hello");
    let result = WhyLabsClient::new().evaluate(&request).await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_client_sends_correct_headers() {
    let mock_server = MockServer::start().await;
    Mock::given(matchers::method("POST"))
        .and(matchers::header("X-API-Key", TEST_API_KEY))
        .and(matchers::header("Content-Type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(pass_body()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = test_config(&mock_server.uri());
    let request = EvaluationRequest::new(&config, "turn-1", "model-1").with_prompt("hello");
    let result = WhyLabsClient::new().evaluate(&request).await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_client_sends_correct_body() {
    let mock_server = MockServer::start().await;
    Mock::given(matchers::method("POST"))
        .and(matchers::body_json(json!({
            "prompt": HAL_PROMPT,
            "response": HAL_PROMPT,
            "id": "HAL-9000",
            "datasetId": "model-34"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(pass_body()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = test_config(&mock_server.uri());
    let request = EvaluationRequest::new(&config, "HAL-9000", "model-34")
        .with_prompt(HAL_PROMPT)
        .with_response(HAL_PROMPT);
    let result = WhyLabsClient::new().evaluate(&request).await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_client_returns_block_decision() {
    let mock_server = MockServer::start().await;
    Mock::given(matchers::any())
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(block_body("Message has been blocked because of a policy violation")),
        )
        .mount(&mock_server)
        .await;

    let config = test_config(&mock_server.uri());
    let request = EvaluationRequest::new(&config, "HAL-9000", "model-34").with_prompt(HAL_PROMPT);
    let decision = WhyLabsClient::new().evaluate(&request).await.unwrap();
    assert!(decision.is_block());
    assert_eq!(decision.action_type(), ActionType::Block);
    assert!(!decision.block_message().unwrap().is_empty());
    assert_eq!(decision.validation_results.len(), 1);
}

#[tokio::test]
async fn test_client_handles_error_response() {
    let mock_server = MockServer::start().await;
    Mock::given(matchers::any())
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&mock_server)
        .await;

    let config = test_config(&mock_server.uri());
    let request = EvaluationRequest::new(&config, "turn-1", "model-1").with_prompt("hello");
    let result = WhyLabsClient::new().evaluate(&request).await;
    assert_eq!(
        result,
        Err(GuardrailError::Api {
            status: 500,
            body: "Internal Server Error".to_string()
        })
    );
}

#[tokio::test]
async fn test_client_handles_malformed_body() {
    let mock_server = MockServer::start().await;
    Mock::given(matchers::any())
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"verdict": "ok"})))
        .mount(&mock_server)
        .await;

    let config = test_config(&mock_server.uri());
    let request = EvaluationRequest::new(&config, "turn-1", "model-1").with_prompt("hello");
    let result = WhyLabsClient::new().evaluate(&request).await;
    assert!(matches!(result, Err(GuardrailError::Serialization(_))));
}

#[tokio::test]
async fn test_client_handles_timeout() {
    let mock_server = MockServer::start().await;
    Mock::given(matchers::any())
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(pass_body())
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&mock_server)
        .await;

    let mut config = test_config(&mock_server.uri());
    config.timeout_ms = 200;
    let request = EvaluationRequest::new(&config, "turn-1", "model-1").with_prompt("hello");

    let start = Instant::now();
    let result = WhyLabsClient::new().evaluate(&request).await;
    assert!(start.elapsed() < Duration::from_secs(4));
    match result {
        Err(err @ GuardrailError::Transport { .. }) => assert!(err.is_timeout()),
        other => panic!("Expected Transport timeout, got {other:?}"),
    }
}

#[tokio::test]
async fn test_client_handles_unreachable_endpoint() {
    let config = test_config("http://127.0.0.1:1");
    let request = EvaluationRequest::new(&config, "turn-1", "model-1").with_prompt("hello");
    let result = WhyLabsClient::new().evaluate(&request).await;
    match result {
        Err(GuardrailError::Transport { timed_out, .. }) => assert!(!timed_out),
        other => panic!("Expected Transport error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_invalid_request_sends_nothing() {
    let mock_server = MockServer::start().await;
    Mock::given(matchers::any())
        .respond_with(ResponseTemplate::new(200).set_body_json(pass_body()))
        .expect(0)
        .mount(&mock_server)
        .await;

    let config = test_config(&mock_server.uri());
    let request = EvaluationRequest::new(&config, "turn-1", "model-1");
    let result = WhyLabsClient::new().evaluate(&request).await;
    assert!(matches!(result, Err(GuardrailError::InvalidRequest(_))));
}

#[tokio::test]
async fn test_invalid_config_sends_nothing() {
    let mock_server = MockServer::start().await;
    Mock::given(matchers::any())
        .respond_with(ResponseTemplate::new(200).set_body_json(pass_body()))
        .expect(0)
        .mount(&mock_server)
        .await;

    let mut config = test_config(&mock_server.uri());
    config.guardrails_api_key = String::new();
    let request = EvaluationRequest::new(&config, "turn-1", "model-1").with_prompt("hello");
    let result = WhyLabsClient::new().evaluate(&request).await;
    assert!(matches!(result, Err(GuardrailError::Configuration(_))));
}

#[tokio::test]
async fn test_call_guardrail_api_uses_default_client() {
    let mock_server = MockServer::start().await;
    Mock::given(matchers::method("POST"))
        .and(matchers::path("/evaluate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(block_body("denied")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = test_config(&mock_server.uri());
    let request = EvaluationRequest::new(&config, "HAL-9000", "model-34").with_prompt(HAL_PROMPT);
    let decision = call_guardrail_api(&request).await.unwrap();
    assert_eq!(decision.block_message(), Some("denied"));
}

#[tokio::test]
async fn test_concurrent_calls_are_independent() {
    let mock_server = MockServer::start().await;
    Mock::given(matchers::any())
        .respond_with(ResponseTemplate::new(200).set_body_json(pass_body()))
        .expect(3)
        .mount(&mock_server)
        .await;

    let config = test_config(&mock_server.uri());
    let client = WhyLabsClient::new();
    let requests: Vec<_> = (0..3)
        .map(|i| EvaluationRequest::new(&config, format!("turn-{i}"), "model-1").with_prompt("hi"))
        .collect();
    let results =
        futures::future::join_all(requests.iter().map(|r| client.evaluate(r))).await;
    assert!(results.iter().all(|r| r.is_ok()));
}
