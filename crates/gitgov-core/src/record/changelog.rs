// gitgov-core/src/record/changelog.rs
// ============================================================================
// Module: Changelog Payload
// Description: Immutable record of a completed workflow transition.
// Purpose: Give the backlog engine an audit trail independent of the
//          envelope signature history.
// Dependencies: crate::record::{entity, envelope, id}, serde
// ============================================================================

//! ## Overview
//! A changelog entry is written once a transition has actually happened
//! (e.g. `done -> archived`); it is never amended or resolved by a later
//! record, unlike feedback.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::record::entity::EntityType;
use crate::record::envelope::RecordPayload;
use crate::record::envelope::RecordType;
use crate::record::id::ActorId;
use crate::record::id::ChangelogId;

// ============================================================================
// SECTION: Payload
// ============================================================================

/// The `changelog` record payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangelogPayload {
    /// Changelog identifier, `{unix-seconds}-changelog-{slug}`.
    pub id: ChangelogId,
    /// The kind of record this entry describes.
    #[serde(rename = "entityType")]
    pub entity_type: EntityType,
    /// The id of the record this entry describes.
    #[serde(rename = "entityId")]
    pub entity_id: String,
    /// Open string naming the kind of change (`status_transition`,
    /// `linkage_updated`, ...).
    #[serde(rename = "changeType")]
    pub change_type: String,
    /// Short title.
    pub title: String,
    /// Full description of what changed.
    pub description: String,
    /// The actor or agent that triggered the change.
    #[serde(rename = "triggeredBy")]
    pub triggered_by: ActorId,
    /// Why the change happened.
    pub reason: String,
}

impl RecordPayload for ChangelogPayload {
    const RECORD_TYPE: RecordType = RecordType::Changelog;

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
    use super::ChangelogPayload;
    use crate::record::entity::EntityType;

    #[test]
    fn entity_type_serializes_lowercase() {
        let payload = ChangelogPayload {
            id: "1752274500-changelog-c1".into(),
            entity_type: EntityType::Task,
            entity_id: "1752274500-task-t".to_string(),
            change_type: "status_transition".to_string(),
            title: "Task archived".to_string(),
            description: "Task moved from done to archived.".to_string(),
            triggered_by: "human:alice".into(),
            reason: "Completed and closed out.".to_string(),
        };
        let json = serde_json::to_value(payload).unwrap();
        assert_eq!(json["entityType"], "task");
    }
}
