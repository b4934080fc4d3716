// gitgov-core/src/record/execution.rs
// ============================================================================
// Module: Execution Payload
// Description: Immutable proof-of-work attached to a task.
// Purpose: Record what an actor or agent actually did toward a task.
// Dependencies: crate::record::{envelope, id}, serde
// ============================================================================

//! ## Overview
//! Executions are never amended. The first execution created against a task
//! is what the default workflow methodology's `ready -> active` custom rule
//! looks for ("assignment exists" is evaluated alongside this event).

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::record::envelope::RecordPayload;
use crate::record::envelope::RecordType;
use crate::record::id::ExecutionId;
use crate::record::id::TaskId;

// ============================================================================
// SECTION: Payload
// ============================================================================

/// The `execution` record payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionPayload {
    /// Execution identifier, `{unix-seconds}-execution-{slug}`.
    pub id: ExecutionId,
    /// The task this execution was performed against.
    #[serde(rename = "taskId")]
    pub task_id: TaskId,
    /// Execution kind. Open string: `progress`, `completion`, and others an
    /// integration may define.
    #[serde(rename = "type")]
    pub kind: String,
    /// Short title.
    pub title: String,
    /// The work performed or produced, at least 10 characters.
    pub result: String,
}

impl ExecutionPayload {
    /// The `progress` execution kind.
    pub const KIND_PROGRESS: &'static str = "progress";
    /// The `completion` execution kind.
    pub const KIND_COMPLETION: &'static str = "completion";
    /// Minimum allowed `result` length.
    pub const RESULT_MIN_LEN: usize = 10;
}

impl RecordPayload for ExecutionPayload {
    const RECORD_TYPE: RecordType = RecordType::Execution;

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
    use super::ExecutionPayload;

    #[test]
    fn kind_field_serializes_as_type() {
        let payload = ExecutionPayload {
            id: "1752274500-execution-e1".into(),
            task_id: "1752274500-task-t".into(),
            kind: ExecutionPayload::KIND_PROGRESS.to_string(),
            title: "Initial progress".to_string(),
            result: "Implemented the first pass.".to_string(),
        };
        let json = serde_json::to_value(payload).unwrap();
        assert_eq!(json["type"], "progress");
    }
}
