// gitgov-factory/src/feedback.rs
// ============================================================================
// Module: Feedback Factory
// Description: Defaulting, id generation, and validation for feedback
//              records.
// Purpose: Turn a partial feedback input into a fully-formed, validated
//          `FeedbackPayload`, or a signed `FeedbackRecord` envelope.
// Dependencies: gitgov-core, gitgov-schema, crate::{envelope, slug, validate}
// ============================================================================

//! ## Overview
//! Per §4.5, `type` defaults to `question` and `status` to `open` — except
//! that an `assignment` feedback record is always forced to `resolved`,
//! since an assignment has no separate "open" phase to resolve.

// ============================================================================
// SECTION: Imports
// ============================================================================

use gitgov_core::ActorId;
use gitgov_core::EntityType;
use gitgov_core::FeedbackId;
use gitgov_core::FeedbackPayload;
use gitgov_core::FeedbackRecord;
use gitgov_core::FeedbackStatus;
use gitgov_core::FeedbackType;
use gitgov_core::GitGovResult;
use gitgov_core::Keypair;
use gitgov_schema::SchemaRegistry;

use crate::envelope::sign_new_envelope;
use crate::slug::timestamped_id;
use crate::validate::require_non_empty;
use crate::validate::validate_payload;

// ============================================================================
// SECTION: Input
// ============================================================================

/// Partial input accepted by [`build_feedback_payload`].
#[derive(Debug, Clone)]
pub struct NewFeedbackInput {
    /// Explicit id; generated from `content` when absent.
    pub id: Option<FeedbackId>,
    /// The kind of record this feedback is about. Required.
    pub entity_type: EntityType,
    /// The id of the record this feedback is about. Required.
    pub entity_id: String,
    /// The kind of feedback. Defaults to `question`.
    pub kind: Option<FeedbackType>,
    /// Resolution status. Defaults to `open` (forced to `resolved` when
    /// `kind` is `assignment`).
    pub status: Option<FeedbackStatus>,
    /// The feedback content. Required.
    pub content: String,
    /// The actor assigned, for `assignment` feedback.
    pub assignee: Option<ActorId>,
    /// The prior feedback record this one resolves, if any.
    pub resolves_feedback_id: Option<FeedbackId>,
}

impl NewFeedbackInput {
    /// Builds a bare input with the given entity reference and content,
    /// leaving every defaultable field unset.
    #[must_use]
    pub fn new(entity_type: EntityType, entity_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: None,
            entity_type,
            entity_id: entity_id.into(),
            kind: None,
            status: None,
            content: content.into(),
            assignee: None,
            resolves_feedback_id: None,
        }
    }
}

// ============================================================================
// SECTION: Payload Factory
// ============================================================================

/// Builds and validates a [`FeedbackPayload`] from partial input, applying
/// the `assignment -> resolved` status override.
///
/// # Errors
///
/// Returns [`gitgov_core::GitGovError::RequiredField`] when `entity_id` or
/// `content` is empty, or
/// [`gitgov_core::GitGovError::DetailedValidation`] when the resulting
/// payload fails schema validation.
pub fn build_feedback_payload(registry: &SchemaRegistry, input: NewFeedbackInput) -> GitGovResult<FeedbackPayload> {
    require_non_empty("feedback", "entityId", &input.entity_id)?;
    require_non_empty("feedback", "content", &input.content)?;

    let kind = input.kind.unwrap_or_default();
    let status = if kind == FeedbackType::Assignment {
        FeedbackStatus::Resolved
    } else {
        input.status.unwrap_or_default()
    };

    let id = input.id.unwrap_or_else(|| timestamped_id("feedback", &input.content).into());
    let payload = FeedbackPayload {
        id,
        entity_type: input.entity_type,
        entity_id: input.entity_id,
        kind,
        status,
        content: input.content,
        assignee: input.assignee,
        resolves_feedback_id: input.resolves_feedback_id,
    };
    validate_payload(registry, &payload)?;
    Ok(payload)
}

// ============================================================================
// SECTION: Envelope Factory
// ============================================================================

/// Builds a validated [`FeedbackPayload`] and signs it into a
/// [`FeedbackRecord`] envelope with exactly one signature.
///
/// # Errors
///
/// See [`build_feedback_payload`]; also propagates signing failures from
/// [`crate::envelope::sign_new_envelope`].
pub fn build_feedback_envelope(
    registry: &SchemaRegistry,
    input: NewFeedbackInput,
    keypair: &Keypair,
    key_id: &str,
    role: &str,
    notes: &str,
) -> GitGovResult<FeedbackRecord> {
    let payload = build_feedback_payload(registry, input)?;
    sign_new_envelope(payload, keypair, key_id, role, notes)
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
    use gitgov_core::EntityType;
    use gitgov_core::FeedbackStatus;
    use gitgov_core::FeedbackType;
    use gitgov_schema::SchemaRegistry;

    use super::NewFeedbackInput;
    use super::build_feedback_payload;

    #[test]
    fn defaults_to_question_and_open() {
        let registry = SchemaRegistry::new();
        let input = NewFeedbackInput::new(EntityType::Task, "1752274500-task-t", "What about X?");
        let payload = build_feedback_payload(&registry, input).unwrap();
        assert_eq!(payload.kind, FeedbackType::Question);
        assert_eq!(payload.status, FeedbackStatus::Open);
    }

    #[test]
    fn assignment_forces_resolved_status() {
        let registry = SchemaRegistry::new();
        let mut input = NewFeedbackInput::new(EntityType::Task, "1752274500-task-t", "Assigned to Alice");
        input.kind = Some(FeedbackType::Assignment);
        input.assignee = Some("human:alice".into());
        let payload = build_feedback_payload(&registry, input).unwrap();
        assert_eq!(payload.status, FeedbackStatus::Resolved);
    }

    #[test]
    fn rejects_empty_content() {
        let registry = SchemaRegistry::new();
        let input = NewFeedbackInput::new(EntityType::Task, "1752274500-task-t", "");
        assert!(build_feedback_payload(&registry, input).is_err());
    }
}
