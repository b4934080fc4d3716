// gitgov-core/src/record/task.rs
// ============================================================================
// Module: Task Payload
// Description: The unit of work tracked through the workflow state machine.
// Purpose: Carry task metadata and the fields the workflow and backlog
//          engine operate on.
// Dependencies: crate::record::{cycle, envelope, id, metadata}, serde
// ============================================================================

//! ## Overview
//! Task records are append-only: a new envelope with an additional
//! signature (or, for linkage changes, updated `cycleIds`) is written for
//! each transition. The allowed `status` transitions themselves are not
//! enforced by this type — that is the workflow methodology's job (see
//! `gitgov-workflow`).

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::record::envelope::RecordPayload;
use crate::record::envelope::RecordType;
use crate::record::id::CycleId;
use crate::record::id::TaskId;
use crate::record::metadata::OpenMetadata;

// ============================================================================
// SECTION: Status / Priority
// ============================================================================

/// Lifecycle status of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    /// Newly created, not yet submitted for review.
    Draft,
    /// Submitted and awaiting approval.
    Review,
    /// Approved and ready to be picked up.
    Ready,
    /// Actively being worked (has at least one execution).
    Active,
    /// Completed.
    Done,
    /// Archived after its changelog was recorded.
    Archived,
    /// Paused due to blocking feedback.
    Paused,
    /// Discarded before any work began.
    Discarded,
}

impl TaskStatus {
    /// Returns the canonical lowercase string for this status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Review => "review",
            Self::Ready => "ready",
            Self::Active => "active",
            Self::Done => "done",
            Self::Archived => "archived",
            Self::Paused => "paused",
            Self::Discarded => "discarded",
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Task priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Low priority.
    Low,
    /// The default priority for newly created tasks.
    #[default]
    Medium,
    /// High priority.
    High,
    /// Critical priority.
    Critical,
}

// ============================================================================
// SECTION: Payload
// ============================================================================

/// The `task` record payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskPayload {
    /// Task identifier, `{unix-seconds}-task-{slug}`.
    pub id: TaskId,
    /// Short title, 3-150 characters.
    pub title: String,
    /// Full description, at least 10 characters.
    pub description: String,
    /// Current lifecycle status.
    pub status: TaskStatus,
    /// Priority.
    pub priority: Priority,
    /// Free-form tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Cycles this task is linked to.
    #[serde(rename = "cycleIds", default)]
    pub cycle_ids: Vec<CycleId>,
    /// External references (URLs, ticket ids, ...).
    #[serde(default)]
    pub references: Vec<String>,
    /// Free-text notes.
    #[serde(default)]
    pub notes: Vec<String>,
    /// Open, caller-defined metadata.
    #[serde(default, skip_serializing_if = "OpenMetadata::is_empty")]
    pub metadata: OpenMetadata,
}

impl TaskPayload {
    /// Minimum allowed `title` length.
    pub const TITLE_MIN_LEN: usize = 3;
    /// Maximum allowed `title` length.
    pub const TITLE_MAX_LEN: usize = 150;
    /// Minimum allowed `description` length.
    pub const DESCRIPTION_MIN_LEN: usize = 10;
}

impl RecordPayload for TaskPayload {
    const RECORD_TYPE: RecordType = RecordType::Task;

    fn id(&self) -> &str {
        self.id.as_str()
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
    use super::Priority;
    use super::TaskStatus;

    #[test]
    fn priority_defaults_to_medium() {
        assert_eq!(Priority::default(), Priority::Medium);
    }

    #[test]
    fn task_status_display_matches_serde_rename() {
        for status in [
            TaskStatus::Draft,
            TaskStatus::Review,
            TaskStatus::Ready,
            TaskStatus::Active,
            TaskStatus::Done,
            TaskStatus::Archived,
            TaskStatus::Paused,
            TaskStatus::Discarded,
        ] {
            let json = serde_json::to_value(status).unwrap();
            assert_eq!(json.as_str().unwrap(), status.as_str());
        }
    }
}
