// gitgov-engine/src/error.rs
// ============================================================================
// Module: Engine Errors
// Description: Errors specific to the backlog engine's cross-record
//              integrity checks, composed into the shared error taxonomy.
// Purpose: Give linkage and ownership failures precise shapes before they
//          surface as `GitGovError::ProtocolViolation`.
// Dependencies: gitgov-core, thiserror
// ============================================================================

//! ## Overview
//! Most engine failures already have a home in [`gitgov_core::GitGovError`]
//! (a missing record is `RecordNotFound`, an unauthorized transition is
//! `ProtocolViolation` via `gitgov-workflow`). `EngineError` exists only for
//! the handful of checks that are the engine's own responsibility per §3.4
//! and §4.9: cross-record linkage consistency and deletion eligibility.

// ============================================================================
// SECTION: Imports
// ============================================================================

use gitgov_core::GitGovError;
use thiserror::Error;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised by backlog engine operations that are not already covered
/// by a shared [`GitGovError`] variant.
#[derive(Debug, Error)]
pub enum EngineError {
    /// `deleteTask` was called on a task whose status is not `draft` (§4.9).
    #[error("task {task_id} cannot be deleted from status {status}; use the matching rejection transition instead")]
    TaskNotDraft {
        /// The task that was asked to be deleted.
        task_id: String,
        /// The task's actual current status.
        status: String,
    },
    /// A linkage operation (`addTaskToCycle`, ...) referenced a task or
    /// cycle id already linked, or not linked, in a way that would make the
    /// requested mutation a no-op or an inconsistency.
    #[error("{message}")]
    LinkageViolation {
        /// Description of the inconsistency.
        message: String,
    },
    /// A `moveTaskBetweenCycles` call failed partway through and the
    /// engine rolled back the first half of the move.
    #[error("move of task {task_id} from {from_cycle} to {to_cycle} failed and was rolled back: {reason}")]
    MoveRolledBack {
        /// The task being moved.
        task_id: String,
        /// The cycle the task was being removed from.
        from_cycle: String,
        /// The cycle the task was being added to.
        to_cycle: String,
        /// Why the second half of the move failed.
        reason: String,
    },
}

impl From<EngineError> for GitGovError {
    fn from(err: EngineError) -> Self {
        let violation_type = match &err {
            EngineError::TaskNotDraft { .. } => "task_not_draft",
            EngineError::LinkageViolation { .. } => "linkage_violation",
            EngineError::MoveRolledBack { .. } => "move_rolled_back",
        };
        Self::ProtocolViolation {
            violation_type: violation_type.to_string(),
            message: err.to_string(),
        }
    }
}
