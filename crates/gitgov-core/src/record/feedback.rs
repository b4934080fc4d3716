// gitgov-core/src/record/feedback.rs
// ============================================================================
// Module: Feedback Payload
// Description: Comments, blockers, questions, and approvals attached to
//              another record.
// Purpose: Model feedback resolution as a new record rather than a mutation.
// Dependencies: crate::record::{entity, envelope, id}, serde
// ============================================================================

//! ## Overview
//! Resolving a feedback item is modeled as a *new* feedback record pointing
//! back at the original via `resolvesFeedbackId`; the original is never
//! edited. An `assignment` feedback record is always created already
//! `resolved` (see the factory defaults), since an assignment has no
//! separate "open" phase to resolve.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::record::entity::EntityType;
use crate::record::envelope::RecordPayload;
use crate::record::envelope::RecordType;
use crate::record::id::ActorId;
use crate::record::id::FeedbackId;

// ============================================================================
// SECTION: Type / Status
// ============================================================================

/// The kind of feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackType {
    /// Blocks the entity from progressing until resolved.
    Blocking,
    /// A non-blocking suggestion.
    Suggestion,
    /// The default feedback type for newly created records.
    #[default]
    Question,
    /// A request for clarification.
    Clarification,
    /// An approval signal.
    Approval,
    /// An assignment of the entity to an actor.
    Assignment,
}

/// Resolution status of a feedback record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackStatus {
    /// The default status for newly created feedback.
    #[default]
    Open,
    /// Seen but not yet resolved.
    Acknowledged,
    /// Resolved, normally by a follow-up feedback record.
    Resolved,
    /// Explicitly will not be addressed.
    WontFix,
}

// ============================================================================
// SECTION: Payload
// ============================================================================

/// The `feedback` record payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackPayload {
    /// Feedback identifier, `{unix-seconds}-feedback-{slug}`.
    pub id: FeedbackId,
    /// The kind of record this feedback is about.
    #[serde(rename = "entityType")]
    pub entity_type: EntityType,
    /// The id of the record this feedback is about.
    #[serde(rename = "entityId")]
    pub entity_id: String,
    /// The kind of feedback.
    #[serde(rename = "type")]
    pub kind: FeedbackType,
    /// Resolution status.
    pub status: FeedbackStatus,
    /// The feedback content.
    pub content: String,
    /// The actor assigned, for `assignment` feedback.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<ActorId>,
    /// The prior feedback record this one resolves, if any.
    #[serde(rename = "resolvesFeedbackId", default, skip_serializing_if = "Option::is_none")]
    pub resolves_feedback_id: Option<FeedbackId>,
}

impl RecordPayload for FeedbackPayload {
    const RECORD_TYPE: RecordType = RecordType::Feedback;

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
    use super::FeedbackPayload;
    use super::FeedbackStatus;
    use super::FeedbackType;
    use crate::record::entity::EntityType;

    #[test]
    fn resolution_feedback_points_at_original_without_mutating_it() {
        let original = FeedbackPayload {
            id: "1752274500-feedback-f1".into(),
            entity_type: EntityType::Task,
            entity_id: "1752274500-task-t".to_string(),
            kind: FeedbackType::Blocking,
            status: FeedbackStatus::Open,
            content: "Missing migration.".to_string(),
            assignee: None,
            resolves_feedback_id: None,
        };
        let resolution = FeedbackPayload {
            id: "1752274600-feedback-f2".into(),
            entity_type: original.entity_type,
            entity_id: original.entity_id.clone(),
            kind: FeedbackType::Blocking,
            status: FeedbackStatus::Resolved,
            content: "Migration added.".to_string(),
            assignee: None,
            resolves_feedback_id: Some(original.id.clone()),
        };
        assert_eq!(resolution.resolves_feedback_id, Some(original.id));
        assert_eq!(original.status, FeedbackStatus::Open);
    }
}
