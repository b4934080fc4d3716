// gitgov-workflow/src/methodology.rs
// ============================================================================
// Module: Methodology Document
// Description: Parsed state-transition rules, signature-bucket
//              requirements, and custom-rule declarations (§4.8).
// Purpose: Give the engine a single, validated, table-driven description of
//          which task transitions are allowed and what each requires.
// Dependencies: gitgov-core, serde, serde_json
// ============================================================================

//! ## Overview
//! A methodology document is data, not code: `state_transitions` enumerates
//! `(from, to)` pairs with their signature, command, event, and custom-rule
//! requirements; `custom_rules` names the engine-evaluated rules those
//! transitions may reference; `view_configs` carries presentation hints this
//! crate treats as opaque JSON, since rendering is a front-end concern.
//!
//! Reusing [`gitgov_core::TaskStatus`] as the `from`/`to` type means an
//! out-of-range state name simply fails to deserialize — the "enumerated
//! states must belong to the canonical state set" invariant (§4.4) falls out
//! of the type system rather than needing a separate runtime check.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashSet;

use gitgov_core::TaskStatus;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::error::MethodologyError;

// ============================================================================
// SECTION: Signature Buckets
// ============================================================================

/// A named bucket of signatures a transition requires, e.g. "at least one
/// signature from an actor with an `approver:quality` capability role."
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignatureBucket {
    /// Bucket name. `"__default__"` when the methodology does not subdivide
    /// approvals into named buckets.
    pub name: String,
    /// Minimum number of distinct-actor signatures required from this
    /// bucket.
    #[serde(rename = "minApprovals", default = "default_min_approvals")]
    pub min_approvals: u32,
    /// Capability roles that satisfy this bucket; a signer needs only one.
    #[serde(rename = "capabilityRoles")]
    pub capability_roles: Vec<String>,
}

/// `"__default__"`, the bucket name used when a methodology does not
/// subdivide approvals.
pub const DEFAULT_BUCKET: &str = "__default__";

const fn default_min_approvals() -> u32 {
    1
}

// ============================================================================
// SECTION: Custom Rules
// ============================================================================

/// The closed set of custom-rule kinds a methodology may declare (§4.4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CustomRuleKind {
    /// Requires an assignment feedback record to exist for the task.
    AssignmentRequired,
    /// Requires the owning cycle to have remaining sprint capacity.
    SprintCapacity,
    /// Requires the task's estimated complexity to fit the owning epic.
    EpicComplexity,
    /// An integration-defined rule the engine evaluates by name alone.
    Custom,
}

/// A named custom rule a transition may reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomRuleDef {
    /// The rule's name, referenced by transitions' `custom_rules` lists.
    pub name: String,
    /// Which closed-set evaluator kind this rule uses.
    pub kind: CustomRuleKind,
    /// Opaque, kind-specific parameters (e.g. a sprint capacity limit).
    #[serde(default)]
    pub params: Value,
}

// ============================================================================
// SECTION: Transition Requirements
// ============================================================================

/// What a transition requires to be authorized (§4.8).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransitionRequirements {
    /// Signature buckets that must each be satisfied. Empty when the
    /// transition requires no signature (event-only transitions).
    #[serde(rename = "signatureBuckets", default)]
    pub signature_buckets: Vec<SignatureBucket>,
    /// The triggering command the caller must supply, if any.
    #[serde(default)]
    pub command: Option<String>,
    /// The event name the engine must confirm occurred, if any.
    #[serde(default)]
    pub event: Option<String>,
    /// Names of custom rules (from `custom_rules`) that must all be
    /// satisfied.
    #[serde(rename = "customRules", default)]
    pub custom_rules: Vec<String>,
}

// ============================================================================
// SECTION: Transition Rule
// ============================================================================

/// One allowed `(from, to)` transition and its requirements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionRule {
    /// The state a task must be in for this rule to apply.
    pub from: TaskStatus,
    /// The state the transition moves the task to.
    pub to: TaskStatus,
    /// Human-readable trigger name (`"submit"`, `"approve"`, ...), purely
    /// documentary unless `requirements.command` also names it.
    #[serde(default)]
    pub trigger: Option<String>,
    /// What must hold for this transition to be authorized.
    pub requirements: TransitionRequirements,
}

// ============================================================================
// SECTION: View Config
// ============================================================================

/// An opaque presentation hint. Rendering is a front-end concern; this crate
/// only carries the configuration through.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewConfig {
    /// The view's name.
    pub name: String,
    /// Opaque, view-specific configuration.
    #[serde(default)]
    pub config: Value,
}

// ============================================================================
// SECTION: Methodology
// ============================================================================

/// A parsed, validated methodology document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Methodology {
    /// Every allowed `(from, to)` transition and its requirements.
    #[serde(rename = "stateTransitions")]
    pub state_transitions: Vec<TransitionRule>,
    /// Named custom rules transitions may reference.
    #[serde(rename = "customRules", default)]
    pub custom_rules: Vec<CustomRuleDef>,
    /// Presentation configuration, carried through opaquely.
    #[serde(rename = "viewConfigs", default)]
    pub view_configs: Vec<ViewConfig>,
}

impl Methodology {
    /// Parses a methodology document from its JSON text form.
    ///
    /// # Errors
    ///
    /// Returns a JSON error when the document does not parse, or
    /// [`MethodologyError`] when it parses but fails structural validation.
    pub fn from_json(json: &str) -> Result<Self, MethodologyLoadError> {
        let methodology: Self = serde_json::from_str(json).map_err(MethodologyLoadError::Parse)?;
        methodology.validate()?;
        Ok(methodology)
    }

    /// Looks up the transition rule covering `(from, to)`, if any.
    #[must_use]
    pub fn transition(&self, from: TaskStatus, to: TaskStatus) -> Option<&TransitionRule> {
        self.state_transitions.iter().find(|rule| rule.from == from && rule.to == to)
    }

    /// Looks up a custom rule definition by name.
    #[must_use]
    pub fn custom_rule(&self, name: &str) -> Option<&CustomRuleDef> {
        self.custom_rules.iter().find(|rule| rule.name == name)
    }

    /// Validates the structural invariants of §4.4 that the type system
    /// does not already enforce: at least one transition exists, no two
    /// transitions share a `(from, to)` pair, and every `custom_rules`
    /// reference resolves to a declared [`CustomRuleDef`].
    ///
    /// # Errors
    ///
    /// Returns [`MethodologyError`] describing the first structural
    /// violation found.
    pub fn validate(&self) -> Result<(), MethodologyError> {
        if self.state_transitions.is_empty() {
            return Err(MethodologyError::EmptyTransitions);
        }

        let mut seen_pairs = HashSet::new();
        for rule in &self.state_transitions {
            if !seen_pairs.insert((rule.from, rule.to)) {
                return Err(MethodologyError::DuplicateTransition {
                    from: rule.from.to_string(),
                    to: rule.to.to_string(),
                });
            }
            for rule_name in &rule.requirements.custom_rules {
                if self.custom_rule(rule_name).is_none() {
                    return Err(MethodologyError::UnknownCustomRule {
                        from: rule.from.to_string(),
                        to: rule.to.to_string(),
                        rule_name: rule_name.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

/// Errors raised while loading a methodology document from text.
#[derive(Debug, thiserror::Error)]
pub enum MethodologyLoadError {
    /// The document was not valid JSON, or not shaped like a [`Methodology`].
    #[error("methodology document is malformed: {0}")]
    Parse(serde_json::Error),
    /// The document parsed but failed structural validation.
    #[error(transparent)]
    Invalid(#[from] MethodologyError),
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

    use super::CustomRuleDef;
    use super::CustomRuleKind;
    use super::Methodology;
    use super::SignatureBucket;
    use super::TransitionRequirements;
    use super::TransitionRule;

    fn minimal_methodology() -> Methodology {
        Methodology {
            state_transitions: vec![TransitionRule {
                from: TaskStatus::Draft,
                to: TaskStatus::Review,
                trigger: Some("submit".to_string()),
                requirements: TransitionRequirements {
                    signature_buckets: vec![SignatureBucket {
                        name: "__default__".to_string(),
                        min_approvals: 1,
                        capability_roles: vec!["author".to_string()],
                    }],
                    command: Some("submit".to_string()),
                    event: None,
                    custom_rules: Vec::new(),
                },
            }],
            custom_rules: Vec::new(),
            view_configs: Vec::new(),
        }
    }

    #[test]
    fn empty_transitions_fail_validation() {
        let methodology = Methodology {
            state_transitions: Vec::new(),
            custom_rules: Vec::new(),
            view_configs: Vec::new(),
        };
        assert!(methodology.validate().is_err());
    }

    #[test]
    fn duplicate_transition_pair_fails_validation() {
        let mut methodology = minimal_methodology();
        let duplicate = methodology.state_transitions[0].clone();
        methodology.state_transitions.push(duplicate);
        assert!(methodology.validate().is_err());
    }

    #[test]
    fn dangling_custom_rule_reference_fails_validation() {
        let mut methodology = minimal_methodology();
        methodology.state_transitions[0].requirements.custom_rules.push("ghost_rule".to_string());
        assert!(methodology.validate().is_err());
    }

    #[test]
    fn declared_custom_rule_reference_passes_validation() {
        let mut methodology = minimal_methodology();
        methodology.state_transitions[0].requirements.custom_rules.push("assignment_required".to_string());
        methodology.custom_rules.push(CustomRuleDef {
            name: "assignment_required".to_string(),
            kind: CustomRuleKind::AssignmentRequired,
            params: serde_json::Value::Null,
        });
        assert!(methodology.validate().is_ok());
    }

    #[test]
    fn transition_lookup_finds_declared_pair() {
        let methodology = minimal_methodology();
        assert!(methodology.transition(TaskStatus::Draft, TaskStatus::Review).is_some());
        assert!(methodology.transition(TaskStatus::Review, TaskStatus::Ready).is_none());
    }

    #[test]
    fn from_json_round_trips_through_serialization() {
        let methodology = minimal_methodology();
        let json = serde_json::to_string(&methodology).unwrap();
        let restored = Methodology::from_json(&json).unwrap();
        assert_eq!(restored, methodology);
    }

    #[test]
    fn from_json_rejects_out_of_range_state_name() {
        let json = r#"{"stateTransitions":[{"from":"not_a_state","to":"review","requirements":{}}]}"#;
        assert!(Methodology::from_json(json).is_err());
    }
}
