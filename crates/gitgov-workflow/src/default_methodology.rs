// gitgov-workflow/src/default_methodology.rs
// ============================================================================
// Module: Default Methodology
// Description: The canonical task state machine (§3.3) as a `Methodology`.
// Purpose: Give callers a ready-to-use methodology without requiring every
//          project to author its own document.
// Dependencies: gitgov-core, crate::methodology
// ============================================================================

//! ## Overview
//! §3.3's transition table, expressed as data: `draft -> review -> ready ->
//! active -> done -> archived`, plus the `paused` and `discarded` side
//! branches. Approval buckets are collapsed to a single `__default__` bucket
//! whose capability roles list every approver role the spec names
//! (`approver:default`, `approver:design`, `approver:quality`) — a project
//! that wants genuinely separate design/quality sign-off authors its own
//! methodology document with three named buckets instead.

// ============================================================================
// SECTION: Imports
// ============================================================================

use gitgov_core::TaskStatus;

use crate::methodology::CustomRuleDef;
use crate::methodology::CustomRuleKind;
use crate::methodology::DEFAULT_BUCKET;
use crate::methodology::Methodology;
use crate::methodology::SignatureBucket;
use crate::methodology::TransitionRequirements;
use crate::methodology::TransitionRule;

// ============================================================================
// SECTION: Capability Role Names
// ============================================================================

/// Capability role required to submit a task for review.
pub const ROLE_AUTHOR: &str = "author";
/// Any of the approver capability roles that satisfy `review -> ready`.
pub const ROLES_APPROVER: &[&str] = &["approver:default", "approver:design", "approver:quality"];
/// Capability role required to complete an active task.
pub const ROLE_APPROVER_QUALITY: &str = "approver:quality";

/// Name of the custom rule checked on `ready -> active`.
pub const RULE_ASSIGNMENT_REQUIRED: &str = "assignment_required";
/// Name of the custom rule checked on `draft -> discarded`.
pub const RULE_CREATOR_ONLY: &str = "creator_only";

/// Event name the engine confirms before `ready -> active`.
pub const EVENT_FIRST_EXECUTION_CREATED: &str = "first execution created";
/// Event name the engine confirms before `done -> archived`.
pub const EVENT_CHANGELOG_CREATED: &str = "changelog created";
/// Event name the engine confirms before a task pauses.
pub const EVENT_BLOCKING_FEEDBACK_CREATED: &str = "blocking feedback created";

// ============================================================================
// SECTION: Builder
// ============================================================================

/// Builds the default methodology described by §3.3's transition table.
#[must_use]
pub fn default_methodology() -> Methodology {
    Methodology {
        state_transitions: vec![
            TransitionRule {
                from: TaskStatus::Draft,
                to: TaskStatus::Review,
                trigger: Some("submit".to_string()),
                requirements: TransitionRequirements {
                    signature_buckets: vec![SignatureBucket {
                        name: DEFAULT_BUCKET.to_string(),
                        min_approvals: 1,
                        capability_roles: vec![ROLE_AUTHOR.to_string()],
                    }],
                    command: Some("submit".to_string()),
                    event: None,
                    custom_rules: Vec::new(),
                },
            },
            TransitionRule {
                from: TaskStatus::Review,
                to: TaskStatus::Ready,
                trigger: Some("approve".to_string()),
                requirements: TransitionRequirements {
                    signature_buckets: vec![SignatureBucket {
                        name: DEFAULT_BUCKET.to_string(),
                        min_approvals: 1,
                        capability_roles: ROLES_APPROVER.iter().map(ToString::to_string).collect(),
                    }],
                    command: Some("approve".to_string()),
                    event: None,
                    custom_rules: Vec::new(),
                },
            },
            TransitionRule {
                from: TaskStatus::Ready,
                to: TaskStatus::Active,
                trigger: Some("activate".to_string()),
                requirements: TransitionRequirements {
                    signature_buckets: Vec::new(),
                    command: Some("activate".to_string()),
                    event: Some(EVENT_FIRST_EXECUTION_CREATED.to_string()),
                    custom_rules: vec![RULE_ASSIGNMENT_REQUIRED.to_string()],
                },
            },
            TransitionRule {
                from: TaskStatus::Active,
                to: TaskStatus::Done,
                trigger: Some("complete".to_string()),
                requirements: TransitionRequirements {
                    signature_buckets: vec![SignatureBucket {
                        name: DEFAULT_BUCKET.to_string(),
                        min_approvals: 1,
                        capability_roles: vec![ROLE_APPROVER_QUALITY.to_string()],
                    }],
                    command: Some("complete".to_string()),
                    event: None,
                    custom_rules: Vec::new(),
                },
            },
            TransitionRule {
                from: TaskStatus::Done,
                to: TaskStatus::Archived,
                trigger: None,
                requirements: TransitionRequirements {
                    signature_buckets: Vec::new(),
                    command: None,
                    event: Some(EVENT_CHANGELOG_CREATED.to_string()),
                    custom_rules: Vec::new(),
                },
            },
            TransitionRule {
                from: TaskStatus::Active,
                to: TaskStatus::Paused,
                trigger: None,
                requirements: TransitionRequirements {
                    signature_buckets: Vec::new(),
                    command: None,
                    event: Some(EVENT_BLOCKING_FEEDBACK_CREATED.to_string()),
                    custom_rules: Vec::new(),
                },
            },
            TransitionRule {
                from: TaskStatus::Review,
                to: TaskStatus::Paused,
                trigger: None,
                requirements: TransitionRequirements {
                    signature_buckets: Vec::new(),
                    command: None,
                    event: Some(EVENT_BLOCKING_FEEDBACK_CREATED.to_string()),
                    custom_rules: Vec::new(),
                },
            },
            TransitionRule {
                from: TaskStatus::Draft,
                to: TaskStatus::Discarded,
                trigger: Some("delete".to_string()),
                requirements: TransitionRequirements {
                    signature_buckets: Vec::new(),
                    command: Some("delete".to_string()),
                    event: None,
                    custom_rules: vec![RULE_CREATOR_ONLY.to_string()],
                },
            },
        ],
        custom_rules: vec![
            CustomRuleDef {
                name: RULE_ASSIGNMENT_REQUIRED.to_string(),
                kind: CustomRuleKind::AssignmentRequired,
                params: serde_json::Value::Null,
            },
            CustomRuleDef {
                name: RULE_CREATOR_ONLY.to_string(),
                kind: CustomRuleKind::Custom,
                params: serde_json::Value::Null,
            },
        ],
        view_configs: Vec::new(),
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    reason = "Test-only assertions are permitted."
)]
mod tests {
    use gitgov_core::TaskStatus;

    use super::default_methodology;

    #[test]
    fn default_methodology_validates() {
        assert!(default_methodology().validate().is_ok());
    }

    #[test]
    fn every_spec_table_transition_is_present() {
        let methodology = default_methodology();
        let pairs = [
            (TaskStatus::Draft, TaskStatus::Review),
            (TaskStatus::Review, TaskStatus::Ready),
            (TaskStatus::Ready, TaskStatus::Active),
            (TaskStatus::Active, TaskStatus::Done),
            (TaskStatus::Done, TaskStatus::Archived),
            (TaskStatus::Active, TaskStatus::Paused),
            (TaskStatus::Review, TaskStatus::Paused),
            (TaskStatus::Draft, TaskStatus::Discarded),
        ];
        for (from, to) in pairs {
            assert!(methodology.transition(from, to).is_some(), "missing {from} -> {to}");
        }
    }

    #[test]
    fn unenumerated_transition_is_absent() {
        let methodology = default_methodology();
        assert!(methodology.transition(TaskStatus::Draft, TaskStatus::Active).is_none());
    }
}
