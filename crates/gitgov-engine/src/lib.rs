// gitgov-engine/src/lib.rs
// ============================================================================
// Module: GitGovernance Engine Library
// Description: Public API surface for the backlog engine and projector.
// Purpose: Expose the create/transition/linkage operations over tasks,
//          cycles, feedback, executions, changelogs, and identity records,
//          plus the read-only derived view.
// Dependencies: crate::{changelog, config, context, cycle, error, execution,
//               feedback, mutate, projector, registration, stores, task}
// ============================================================================

//! ## Overview
//! `gitgov-engine` is the only crate in this workspace that touches a
//! store *and* the workflow methodology at once (§4.9, §4.10). Every
//! mutating operation follows the same shape: resolve the current actor,
//! load the prior record, consult the methodology or linkage invariant,
//! produce a new signed envelope, persist it, and return it. The projector
//! (C11) is the one read-only exception — it never signs or persists
//! anything.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod changelog;
pub mod config;
pub mod context;
pub mod cycle;
pub mod error;
pub mod execution;
pub mod feedback;
pub mod mutate;
pub mod projector;
pub mod registration;
pub mod stores;
pub mod task;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use changelog::create_changelog;
pub use config::ProjectorConfig;
pub use context::TaskTransitionContext;
pub use cycle::add_child_cycle;
pub use cycle::add_task_to_cycle;
pub use cycle::create_cycle;
pub use cycle::move_task_between_cycles;
pub use cycle::remove_task_from_cycle;
pub use error::EngineError;
pub use execution::create_execution;
pub use feedback::create_feedback;
pub use feedback::resolve_feedback;
pub use mutate::apply_task_transition;
pub use mutate::collect_signers;
pub use mutate::signer_info_for;
pub use projector::CycleRollup;
pub use projector::HealthMetrics;
pub use projector::ProjectedView;
pub use projector::TaskEnrichment;
pub use projector::project;
pub use registration::register_actor;
pub use registration::register_agent;
pub use stores::Signer;
pub use stores::Stores;
pub use task::activate_task;
pub use task::approve_task;
pub use task::complete_task;
pub use task::create_task;
pub use task::delete_task;
pub use task::submit_task;
