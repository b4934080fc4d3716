// gitgov-core/src/record/cycle.rs
// ============================================================================
// Module: Cycle Payload
// Description: Sprint/epic groupings of tasks, with optional child cycles.
// Purpose: Carry cycle metadata and linkage the backlog engine maintains.
// Dependencies: crate::record::{envelope, id, task}, serde
// ============================================================================

//! ## Overview
//! Cycles progress `planning -> active -> completed -> archived`. Linkage to
//! tasks (`taskIds`) and to child cycles (`childCycleIds`) is logical: the
//! store does not enforce referential integrity, the backlog engine does,
//! at operation time (`addTaskToCycle`, `addChildCycle`, ...).

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::record::envelope::RecordPayload;
use crate::record::envelope::RecordType;
use crate::record::id::CycleId;
use crate::record::id::TaskId;

// ============================================================================
// SECTION: Status
// ============================================================================

/// Lifecycle status of a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CycleStatus {
    /// Being planned; tasks may still be added or removed freely.
    Planning,
    /// Actively underway.
    Active,
    /// All work finished.
    Completed,
    /// Retained for history but no longer actionable.
    Archived,
}

impl CycleStatus {
    /// Returns the canonical lowercase string for this status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Planning => "planning",
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Archived => "archived",
        }
    }
}

// ============================================================================
// SECTION: Payload
// ============================================================================

/// The `cycle` record payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CyclePayload {
    /// Cycle identifier, `{unix-seconds}-cycle-{slug}`.
    pub id: CycleId,
    /// Short title.
    pub title: String,
    /// Lifecycle status.
    pub status: CycleStatus,
    /// Tasks linked to this cycle.
    #[serde(rename = "taskIds", default)]
    pub task_ids: Vec<TaskId>,
    /// Child cycles nested under this one.
    #[serde(rename = "childCycleIds", default)]
    pub child_cycle_ids: Vec<CycleId>,
    /// Free-form tags.
    #[serde(default)]
    pub tags: Vec<String>,
}

impl RecordPayload for CyclePayload {
    const RECORD_TYPE: RecordType = RecordType::Cycle;

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
    use super::CyclePayload;
    use super::CycleStatus;

    #[test]
    fn empty_task_and_child_lists_round_trip() {
        let payload = CyclePayload {
            id: "1752274500-cycle-q3".into(),
            title: "Q3".to_string(),
            status: CycleStatus::Planning,
            task_ids: Vec::new(),
            child_cycle_ids: Vec::new(),
            tags: Vec::new(),
        };
        let json = serde_json::to_string(&payload).unwrap();
        let restored: CyclePayload = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, payload);
    }
}
