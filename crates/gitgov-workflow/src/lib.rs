// gitgov-workflow/src/lib.rs
// ============================================================================
// Module: GitGovernance Workflow Library
// Description: Public API surface for the methodology-driven task state
//              machine.
// Purpose: Expose methodology document parsing, the default methodology,
//          and transition authorization (C9).
// Dependencies: crate::{authorize, default_methodology, error, methodology}
// ============================================================================

//! ## Overview
//! `gitgov-workflow` implements §4.8: a methodology document enumerates
//! `state_transitions`, `custom_rules`, and `view_configs`; authorization is
//! table-driven (`allowed(from, to)` then `satisfies(requirements, ...)`).
//! This crate has no I/O and no store dependency — the backlog engine
//! (`gitgov-engine`) resolves signer roles and confirms events/custom rules,
//! then calls [`authorize_transition`] with plain data.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod authorize;
pub mod default_methodology;
pub mod error;
pub mod methodology;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use authorize::SignerInfo;
pub use authorize::TransitionContext;
pub use authorize::TransitionRequest;
pub use authorize::allowed;
pub use authorize::authorize_transition;
pub use authorize::satisfies;
pub use default_methodology::EVENT_BLOCKING_FEEDBACK_CREATED;
pub use default_methodology::EVENT_CHANGELOG_CREATED;
pub use default_methodology::EVENT_FIRST_EXECUTION_CREATED;
pub use default_methodology::ROLE_APPROVER_QUALITY;
pub use default_methodology::ROLE_AUTHOR;
pub use default_methodology::ROLES_APPROVER;
pub use default_methodology::RULE_ASSIGNMENT_REQUIRED;
pub use default_methodology::RULE_CREATOR_ONLY;
pub use default_methodology::default_methodology;
pub use error::MethodologyError;
pub use error::WorkflowError;
pub use methodology::CustomRuleDef;
pub use methodology::CustomRuleKind;
pub use methodology::DEFAULT_BUCKET;
pub use methodology::Methodology;
pub use methodology::MethodologyLoadError;
pub use methodology::SignatureBucket;
pub use methodology::TransitionRequirements;
pub use methodology::TransitionRule;
pub use methodology::ViewConfig;
