// gitgov-workflow/src/authorize.rs
// ============================================================================
// Module: Transition Authorization
// Description: `allowed(from, to)` and `satisfies(requirements, ...)` (§4.8).
// Purpose: Decide whether a requested task transition is permitted by a
//          methodology, given the candidate signatures, triggering command,
//          and engine-confirmed events/custom rules.
// Dependencies: gitgov-core, crate::{error, methodology}
// ============================================================================

//! ## Overview
//! Authorization is table-driven and has no I/O of its own: the engine
//! resolves signers' capability roles and confirms events/custom rules
//! ahead of time, then hands this module plain data to check against the
//! methodology's requirements. This keeps the workflow crate deterministic
//! and independent of any store.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashSet;

use gitgov_core::TaskStatus;

use crate::error::WorkflowError;
use crate::methodology::CustomRuleDef;
use crate::methodology::Methodology;
use crate::methodology::SignatureBucket;
use crate::methodology::TransitionRequirements;
use crate::methodology::TransitionRule;

// ============================================================================
// SECTION: Signer Info
// ============================================================================

/// A candidate signature's signer, resolved to the actor's id and capability
/// roles. The engine builds one of these per signature by resolving its
/// `keyId` to an actor record (following succession, per §4.7) before
/// calling [`authorize_transition`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignerInfo {
    /// The signing actor's id.
    pub actor_id: String,
    /// The signing actor's capability roles.
    pub roles: Vec<String>,
}

impl SignerInfo {
    /// Builds a signer info from an actor id and its roles.
    #[must_use]
    pub fn new(actor_id: impl Into<String>, roles: Vec<String>) -> Self {
        Self {
            actor_id: actor_id.into(),
            roles,
        }
    }

    /// Whether this signer holds at least one of `roles`.
    fn has_any_role(&self, roles: &[String]) -> bool {
        self.roles.iter().any(|role| roles.contains(role))
    }
}

// ============================================================================
// SECTION: Transition Context
// ============================================================================

/// Engine-supplied facts a transition's non-signature requirements are
/// checked against: which command triggered the request, and per §4.8,
/// whether a required event has occurred or a required custom rule holds.
pub trait TransitionContext {
    /// Whether `event` has occurred in the context of this transition
    /// request (e.g. "first execution created").
    fn event_occurred(&self, event: &str) -> bool;

    /// Evaluates whether `rule` holds in the context of this transition
    /// request. The engine is the only party with the store access needed
    /// to answer this (e.g. "does an assignment feedback record exist").
    fn custom_rule_satisfied(&self, rule: &CustomRuleDef) -> bool;
}

/// A request to authorize a specific transition.
#[derive(Debug, Clone)]
pub struct TransitionRequest<'a> {
    /// The task's current state.
    pub from: TaskStatus,
    /// The state being requested.
    pub to: TaskStatus,
    /// The command that triggered this request, if any (`"submit"`, ...).
    pub command: Option<&'a str>,
    /// Resolved signer info for every signature offered in support of this
    /// transition.
    pub signers: &'a [SignerInfo],
}

// ============================================================================
// SECTION: Authorization
// ============================================================================

/// Looks up the transition rule covering `(from, to)` in `methodology`.
#[must_use]
pub fn allowed(methodology: &Methodology, from: TaskStatus, to: TaskStatus) -> Option<&TransitionRule> {
    methodology.transition(from, to)
}

/// Authorizes `request` against `methodology`, consulting `context` for any
/// event or custom-rule requirement.
///
/// # Errors
///
/// Returns [`WorkflowError::UnknownTransition`] when no rule covers
/// `(request.from, request.to)`; otherwise returns whichever requirement
/// [`satisfies`] reports as unmet.
pub fn authorize_transition<'m>(
    methodology: &'m Methodology,
    request: &TransitionRequest<'_>,
    context: &dyn TransitionContext,
) -> Result<&'m TransitionRule, WorkflowError> {
    let rule = allowed(methodology, request.from, request.to).ok_or_else(|| WorkflowError::UnknownTransition {
        from: request.from.to_string(),
        to: request.to.to_string(),
    })?;
    satisfies(methodology, &rule.requirements, request, context)?;
    Ok(rule)
}

/// Checks every requirement in `requirements` against `request` and
/// `context`, failing with the first unmet requirement. Custom-rule names
/// are resolved against `methodology` to recover each rule's declared
/// `kind`/`params` before asking `context` to evaluate it.
///
/// # Errors
///
/// Returns the [`WorkflowError`] variant matching whichever requirement
/// (signature bucket, command, event, or custom rule) was not met, or
/// [`WorkflowError::CustomRuleFailed`] when a referenced rule name does not
/// resolve in `methodology` (a methodology that passed
/// [`Methodology::validate`] cannot reach this).
pub fn satisfies(
    methodology: &Methodology,
    requirements: &TransitionRequirements,
    request: &TransitionRequest<'_>,
    context: &dyn TransitionContext,
) -> Result<(), WorkflowError> {
    for bucket in &requirements.signature_buckets {
        check_bucket(bucket, request.signers)?;
    }

    if let Some(expected) = requirements.command.as_deref() {
        if request.command != Some(expected) {
            return Err(WorkflowError::CommandMismatch {
                expected: expected.to_string(),
                actual: request.command.map(ToString::to_string),
            });
        }
    }

    if let Some(event) = requirements.event.as_deref() {
        if !context.event_occurred(event) {
            return Err(WorkflowError::EventNotConfirmed {
                event: event.to_string(),
            });
        }
    }

    for rule_name in &requirements.custom_rules {
        let rule = methodology.custom_rule(rule_name).ok_or_else(|| WorkflowError::CustomRuleFailed {
            rule_name: rule_name.clone(),
        })?;
        if !context.custom_rule_satisfied(rule) {
            return Err(WorkflowError::CustomRuleFailed {
                rule_name: rule_name.clone(),
            });
        }
    }

    Ok(())
}

/// Checks that `bucket` collects at least `min_approvals` distinct-actor
/// signers holding one of its capability roles (invariant ii, §3.3).
fn check_bucket(bucket: &SignatureBucket, signers: &[SignerInfo]) -> Result<(), WorkflowError> {
    let qualifying: HashSet<&str> = signers
        .iter()
        .filter(|signer| signer.has_any_role(&bucket.capability_roles))
        .map(|signer| signer.actor_id.as_str())
        .collect();
    let found = u32::try_from(qualifying.len()).unwrap_or(u32::MAX);
    if found < bucket.min_approvals {
        return Err(WorkflowError::InsufficientSignatures {
            bucket: bucket.name.clone(),
            required: bucket.min_approvals,
            roles: bucket.capability_roles.clone(),
            found,
        });
    }
    Ok(())
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

    use super::SignerInfo;
    use super::TransitionRequest;
    use super::authorize_transition;
    use crate::default_methodology::default_methodology;
    use crate::methodology::CustomRuleDef;

    struct AlwaysTrueContext;

    impl super::TransitionContext for AlwaysTrueContext {
        fn event_occurred(&self, _event: &str) -> bool {
            true
        }

        fn custom_rule_satisfied(&self, _rule: &CustomRuleDef) -> bool {
            true
        }
    }

    struct AlwaysFalseContext;

    impl super::TransitionContext for AlwaysFalseContext {
        fn event_occurred(&self, _event: &str) -> bool {
            false
        }

        fn custom_rule_satisfied(&self, _rule: &CustomRuleDef) -> bool {
            false
        }
    }

    #[test]
    fn submit_succeeds_with_one_author_signature() {
        let methodology = default_methodology();
        let signers = vec![SignerInfo::new("human:alice", vec!["author".to_string()])];
        let request = TransitionRequest {
            from: TaskStatus::Draft,
            to: TaskStatus::Review,
            command: Some("submit"),
            signers: &signers,
        };
        assert!(authorize_transition(&methodology, &request, &AlwaysTrueContext).is_ok());
    }

    #[test]
    fn submit_fails_without_any_signature() {
        let methodology = default_methodology();
        let request = TransitionRequest {
            from: TaskStatus::Draft,
            to: TaskStatus::Review,
            command: Some("submit"),
            signers: &[],
        };
        assert!(authorize_transition(&methodology, &request, &AlwaysTrueContext).is_err());
    }

    #[test]
    fn approve_requires_approver_capability_role_not_author() {
        let methodology = default_methodology();
        let signers = vec![SignerInfo::new("human:alice", vec!["author".to_string()])];
        let request = TransitionRequest {
            from: TaskStatus::Review,
            to: TaskStatus::Ready,
            command: Some("approve"),
            signers: &signers,
        };
        assert!(authorize_transition(&methodology, &request, &AlwaysTrueContext).is_err());
    }

    #[test]
    fn approve_succeeds_with_distinct_approver_signature() {
        let methodology = default_methodology();
        let signers = vec![SignerInfo::new("human:bob", vec!["approver:quality".to_string()])];
        let request = TransitionRequest {
            from: TaskStatus::Review,
            to: TaskStatus::Ready,
            command: Some("approve"),
            signers: &signers,
        };
        assert!(authorize_transition(&methodology, &request, &AlwaysTrueContext).is_ok());
    }

    #[test]
    fn unknown_transition_is_rejected() {
        let methodology = default_methodology();
        let request = TransitionRequest {
            from: TaskStatus::Draft,
            to: TaskStatus::Active,
            command: None,
            signers: &[],
        };
        assert!(authorize_transition(&methodology, &request, &AlwaysTrueContext).is_err());
    }

    #[test]
    fn activate_requires_event_and_custom_rule() {
        let methodology = default_methodology();
        let request = TransitionRequest {
            from: TaskStatus::Ready,
            to: TaskStatus::Active,
            command: Some("activate"),
            signers: &[],
        };
        assert!(authorize_transition(&methodology, &request, &AlwaysTrueContext).is_ok());
        assert!(authorize_transition(&methodology, &request, &AlwaysFalseContext).is_err());
    }

    #[test]
    fn command_mismatch_is_rejected() {
        let methodology = default_methodology();
        let signers = vec![SignerInfo::new("human:alice", vec!["author".to_string()])];
        let request = TransitionRequest {
            from: TaskStatus::Draft,
            to: TaskStatus::Review,
            command: Some("wrong-command"),
            signers: &signers,
        };
        assert!(authorize_transition(&methodology, &request, &AlwaysTrueContext).is_err());
    }
}
