// gitgov-workflow/src/error.rs
// ============================================================================
// Module: Workflow Errors
// Description: Methodology-document and transition-authorization failures.
// Purpose: Give the state machine precise error shapes before composing them
//          into the shared `GitGovError` taxonomy.
// Dependencies: gitgov-core, thiserror
// ============================================================================

//! ## Overview
//! A malformed methodology document (a dangling `custom_rules` reference, an
//! unknown signature bucket) is a [`MethodologyError`] discovered at load
//! time. A transition the methodology does not authorize — whether because
//! no rule covers `(from, to)` or because the candidate signatures, event,
//! or custom rules don't satisfy the rule that does — is a
//! [`WorkflowError`] discovered at call time. Both compose into
//! [`gitgov_core::GitGovError::ProtocolViolation`] with a stable,
//! educational `violation_type`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use gitgov_core::GitGovError;
use thiserror::Error;

// ============================================================================
// SECTION: Methodology Errors
// ============================================================================

/// Errors raised while validating a parsed methodology document (§4.4).
#[derive(Debug, Error)]
pub enum MethodologyError {
    /// A transition's `custom_rules` entry names a rule absent from
    /// `custom_rules`.
    #[error("transition {from} -> {to} references unknown custom rule {rule_name:?}")]
    UnknownCustomRule {
        /// The transition's source state.
        from: String,
        /// The transition's target state.
        to: String,
        /// The dangling custom rule name.
        rule_name: String,
    },
    /// The methodology declares no transitions at all.
    #[error("methodology declares no state transitions")]
    EmptyTransitions,
    /// Two transitions share the same `(from, to)` pair, making lookup
    /// ambiguous.
    #[error("duplicate transition {from} -> {to}")]
    DuplicateTransition {
        /// The transition's source state.
        from: String,
        /// The transition's target state.
        to: String,
    },
}

impl From<MethodologyError> for GitGovError {
    fn from(err: MethodologyError) -> Self {
        Self::ProtocolViolation {
            violation_type: "invalid_methodology".to_string(),
            message: err.to_string(),
        }
    }
}

// ============================================================================
// SECTION: Workflow Errors
// ============================================================================

/// Errors raised while authorizing a requested transition (§4.8).
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// No transition rule covers `(from, to)` in the loaded methodology.
    #[error("no transition from {from} to {to} is defined")]
    UnknownTransition {
        /// The requested source state.
        from: String,
        /// The requested target state.
        to: String,
    },
    /// A signature bucket did not collect enough distinct-actor signatures
    /// carrying one of its capability roles.
    #[error("bucket {bucket:?} requires {required} distinct signer(s) with one of {roles:?}, found {found}")]
    InsufficientSignatures {
        /// The bucket name (`__default__` or a configured name).
        bucket: String,
        /// The bucket's configured `min_approvals`.
        required: u32,
        /// The capability roles the bucket accepts.
        roles: Vec<String>,
        /// How many distinct qualifying signers were actually found.
        found: u32,
    },
    /// The transition requires a specific triggering command that was not
    /// the one supplied.
    #[error("transition requires command {expected:?}, got {actual:?}")]
    CommandMismatch {
        /// The command the methodology requires.
        expected: String,
        /// The command the caller actually supplied, if any.
        actual: Option<String>,
    },
    /// The transition requires an event the caller did not confirm occurred.
    #[error("transition requires event {event:?}, which has not occurred")]
    EventNotConfirmed {
        /// The event name the methodology requires.
        event: String,
    },
    /// A named custom rule's engine-provided evaluation returned false.
    #[error("custom rule {rule_name:?} was not satisfied")]
    CustomRuleFailed {
        /// The custom rule that failed.
        rule_name: String,
    },
}

impl From<WorkflowError> for GitGovError {
    fn from(err: WorkflowError) -> Self {
        let violation_type = match &err {
            WorkflowError::UnknownTransition { .. } => "unknown_transition",
            WorkflowError::InsufficientSignatures { .. } => "insufficient_signatures",
            WorkflowError::CommandMismatch { .. } => "command_mismatch",
            WorkflowError::EventNotConfirmed { .. } => "event_not_confirmed",
            WorkflowError::CustomRuleFailed { .. } => "custom_rule_failed",
        };
        Self::ProtocolViolation {
            violation_type: violation_type.to_string(),
            message: err.to_string(),
        }
    }
}
