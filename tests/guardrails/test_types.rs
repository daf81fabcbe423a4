use guardrails_lib::guardrails::types::*;
use serde_json::json;

use super::helpers::*;

// ---------------------------------------------------------------------------
// Decision typing
// ---------------------------------------------------------------------------

#[test]
fn test_block_decision_fields_match_literals() {
    let body = json!({
        "action": {
            "action_type": "block",
            "is_action_block": true,
            "block_message": "denied"
        }
    });
    let decision: EvaluationDecision = serde_json::from_value(body).unwrap();
    assert_eq!(decision.action.action_type(), ActionType::Block);
    assert!(decision.action.is_action_block());
    assert_eq!(decision.block_message(), Some("denied"));
    assert!(decision.validation_results.is_empty());
}

#[test]
fn test_pass_decision_is_not_block() {
    let decision = pass_decision();
    assert_eq!(decision.action_type(), ActionType::Pass);
    assert!(!decision.is_block());
    assert_eq!(decision.block_message(), None);
}

#[test]
fn test_built_decision_survives_serialization() {
    let decision = EvaluationDecision {
        action: Action::new(ActionType::Block, Some("denied".to_string())),
        validation_results: Vec::new(),
    };
    let json = serde_json::to_value(&decision).unwrap();
    assert_eq!(json["action"]["is_action_block"], true);

    let parsed: EvaluationDecision = serde_json::from_value(json).unwrap();
    assert_eq!(parsed, decision);
    assert_eq!(parsed.block_message(), Some("denied"));
}

#[test]
fn test_flag_decision_is_not_block() {
    let decision: EvaluationDecision = serde_json::from_value(json!({
        "action": {"action_type": "flag", "is_action_block": false}
    }))
    .unwrap();
    assert_eq!(decision.action_type(), ActionType::Flag);
    assert!(!decision.is_block());
}

#[test]
fn test_missing_block_flag_is_derived_from_action_type() {
    let decision: EvaluationDecision = serde_json::from_value(json!({
        "action": {"action_type": "block", "block_message": "nope"}
    }))
    .unwrap();
    assert!(decision.is_block());
}

#[test]
fn test_contradicting_block_flag_rejected() {
    let result = serde_json::from_value::<EvaluationDecision>(json!({
        "action": {"action_type": "pass", "is_action_block": true}
    }));
    assert!(result.is_err());
}

#[test]
fn test_unknown_action_type_rejected() {
    let result = serde_json::from_value::<EvaluationDecision>(json!({
        "action": {"action_type": "quarantine", "is_action_block": false}
    }));
    assert!(result.is_err());
}

#[test]
fn test_missing_action_rejected() {
    let result = serde_json::from_value::<EvaluationDecision>(json!({
        "validation_results": []
    }));
    assert!(result.is_err());
}

// ---------------------------------------------------------------------------
// Validation findings
// ---------------------------------------------------------------------------

#[test]
fn test_findings_from_report_object() {
    let decision = block_decision("blocked");
    assert_eq!(decision.validation_results.len(), 1);
    let finding = &decision.validation_results[0];
    assert_eq!(finding.metric, "prompt.score.bad_actors");
    assert_eq!(finding.upper_threshold, Some(0.7));
    assert_eq!(finding.failure_level.as_deref(), Some("block"));
    assert_eq!(finding.extra.get("id"), Some(&json!(0)));
}

#[test]
fn test_findings_from_bare_list_keep_order() {
    let decision: EvaluationDecision = serde_json::from_value(json!({
        "action": {"action_type": "pass", "is_action_block": false},
        "validation_results": [
            {"metric": "prompt.pii.phone_number", "value": 0},
            {"metric": "response.toxicity", "value": 0.01}
        ]
    }))
    .unwrap();
    let metrics: Vec<&str> = decision
        .validation_results
        .iter()
        .map(|f| f.metric.as_str())
        .collect();
    assert_eq!(metrics, vec!["prompt.pii.phone_number", "response.toxicity"]);
}

#[test]
fn test_null_findings_are_empty() {
    let decision: EvaluationDecision = serde_json::from_value(json!({
        "action": {"action_type": "pass", "is_action_block": false},
        "validation_results": null
    }))
    .unwrap();
    assert!(decision.validation_results.is_empty());
}

// ---------------------------------------------------------------------------
// Request wire shape
// ---------------------------------------------------------------------------

#[test]
fn test_request_serializes_to_wire_shape() {
    let config = offline_config();
    let request = EvaluationRequest::new(&config, "HAL-9000", "model-34")
        .with_prompt(HAL_PROMPT)
        .with_response("I'm sorry, Dave.");
    let body = serde_json::to_value(&request).unwrap();
    assert_eq!(
        body,
        json!({
            "prompt": HAL_PROMPT,
            "response": "I'm sorry, Dave.",
            "id": "HAL-9000",
            "datasetId": "model-34"
        })
    );
}

#[test]
fn test_request_omits_absent_text() {
    let config = offline_config();
    let request = EvaluationRequest::new(&config, "turn-1", "model-1").with_prompt("hi");
    let body = serde_json::to_value(&request).unwrap();
    assert!(body.get("response").is_none());
    assert!(body.get("config").is_none());
    assert_eq!(body["prompt"], "hi");
}
