// gitgov-workflow/tests/state_machine_scenarios.rs
// ============================================================================
// Module: State Machine Scenario Tests
// Description: End-to-end authorization scenarios against the default
//              methodology, mirroring the concrete scenarios in §8.
// ============================================================================

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    reason = "Test-only assertions are permitted."
)]

use gitgov_core::TaskStatus;
use gitgov_workflow::CustomRuleDef;
use gitgov_workflow::SignerInfo;
use gitgov_workflow::TransitionContext;
use gitgov_workflow::TransitionRequest;
use gitgov_workflow::authorize_transition;
use gitgov_workflow::default_methodology;

struct ScriptedContext {
    events: Vec<String>,
    custom_rules: Vec<String>,
}

impl ScriptedContext {
    fn new() -> Self {
        Self {
            events: Vec::new(),
            custom_rules: Vec::new(),
        }
    }

    fn with_event(mut self, event: &str) -> Self {
        self.events.push(event.to_string());
        self
    }

    fn with_custom_rule(mut self, rule: &str) -> Self {
        self.custom_rules.push(rule.to_string());
        self
    }
}

impl TransitionContext for ScriptedContext {
    fn event_occurred(&self, event: &str) -> bool {
        self.events.iter().any(|e| e == event)
    }

    fn custom_rule_satisfied(&self, rule: &CustomRuleDef) -> bool {
        self.custom_rules.iter().any(|name| name == &rule.name)
    }
}

#[test]
fn draft_to_review_then_review_to_ready_then_active_to_done() {
    let methodology = default_methodology();
    let no_events = ScriptedContext::new();

    let submit = TransitionRequest {
        from: TaskStatus::Draft,
        to: TaskStatus::Review,
        command: Some("submit"),
        signers: &[SignerInfo::new("human:alice", vec!["author".to_string()])],
    };
    authorize_transition(&methodology, &submit, &no_events).expect("submit should be authorized");

    let approve = TransitionRequest {
        from: TaskStatus::Review,
        to: TaskStatus::Ready,
        command: Some("approve"),
        signers: &[SignerInfo::new("human:bob", vec!["approver:design".to_string()])],
    };
    authorize_transition(&methodology, &approve, &no_events).expect("approve should be authorized");

    let activate_context = ScriptedContext::new()
        .with_event("first execution created")
        .with_custom_rule("assignment_required");
    let activate = TransitionRequest {
        from: TaskStatus::Ready,
        to: TaskStatus::Active,
        command: Some("activate"),
        signers: &[],
    };
    authorize_transition(&methodology, &activate, &activate_context).expect("activate should be authorized");

    let complete = TransitionRequest {
        from: TaskStatus::Active,
        to: TaskStatus::Done,
        command: Some("complete"),
        signers: &[SignerInfo::new("human:carol", vec!["approver:quality".to_string()])],
    };
    authorize_transition(&methodology, &complete, &no_events).expect("complete should be authorized");
}

#[test]
fn review_to_ready_without_approver_signature_is_a_protocol_violation() {
    let methodology = default_methodology();
    let context = ScriptedContext::new();
    let request = TransitionRequest {
        from: TaskStatus::Review,
        to: TaskStatus::Ready,
        command: Some("approve"),
        signers: &[],
    };
    let err = authorize_transition(&methodology, &request, &context).unwrap_err();
    let gitgov_err: gitgov_core::GitGovError = err.into();
    assert!(matches!(gitgov_err, gitgov_core::GitGovError::ProtocolViolation { .. }));
}

#[test]
fn draft_to_discarded_requires_creator_only_custom_rule() {
    let methodology = default_methodology();
    let request = TransitionRequest {
        from: TaskStatus::Draft,
        to: TaskStatus::Discarded,
        command: Some("delete"),
        signers: &[],
    };

    let denied = ScriptedContext::new();
    assert!(authorize_transition(&methodology, &request, &denied).is_err());

    let granted = ScriptedContext::new().with_custom_rule("creator_only");
    assert!(authorize_transition(&methodology, &request, &granted).is_ok());
}

#[test]
fn active_pauses_on_blocking_feedback_event_without_any_signature() {
    let methodology = default_methodology();
    let request = TransitionRequest {
        from: TaskStatus::Active,
        to: TaskStatus::Paused,
        command: None,
        signers: &[],
    };
    let without_event = ScriptedContext::new();
    assert!(authorize_transition(&methodology, &request, &without_event).is_err());

    let with_event = ScriptedContext::new().with_event("blocking feedback created");
    assert!(authorize_transition(&methodology, &request, &with_event).is_ok());
}
