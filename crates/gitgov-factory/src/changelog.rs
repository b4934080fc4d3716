// gitgov-factory/src/changelog.rs
// ============================================================================
// Module: Changelog Factory
// Description: Id generation and validation for changelog records.
// Purpose: Turn a partial changelog input into a fully-formed, validated
//          `ChangelogPayload`, or a signed `ChangelogRecord` envelope.
// Dependencies: gitgov-core, gitgov-schema, crate::{envelope, slug, validate}
// ============================================================================

//! ## Overview
//! Changelog entries carry no optional fields to default; `id` defaults to
//! `{unix-seconds}-changelog-{slug(title)}`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use gitgov_core::ActorId;
use gitgov_core::ChangelogId;
use gitgov_core::ChangelogPayload;
use gitgov_core::ChangelogRecord;
use gitgov_core::EntityType;
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

/// Partial input accepted by [`build_changelog_payload`].
#[derive(Debug, Clone)]
pub struct NewChangelogInput {
    /// Explicit id; generated from `title` when absent.
    pub id: Option<ChangelogId>,
    /// The kind of record this entry describes. Required.
    pub entity_type: EntityType,
    /// The id of the record this entry describes. Required.
    pub entity_id: String,
    /// The kind of change (`status_transition`, ...). Required.
    pub change_type: String,
    /// Short title. Required.
    pub title: String,
    /// Full description of what changed. Required.
    pub description: String,
    /// The actor or agent that triggered the change. Required.
    pub triggered_by: ActorId,
    /// Why the change happened. Required.
    pub reason: String,
}

// ============================================================================
// SECTION: Payload Factory
// ============================================================================

/// Builds and validates a [`ChangelogPayload`] from partial input.
///
/// # Errors
///
/// Returns [`gitgov_core::GitGovError::RequiredField`] when `entity_id`,
/// `change_type`, `title`, `description`, or `reason` is empty, or
/// [`gitgov_core::GitGovError::DetailedValidation`] when the resulting
/// payload fails schema validation.
pub fn build_changelog_payload(
    registry: &SchemaRegistry,
    input: NewChangelogInput,
) -> GitGovResult<ChangelogPayload> {
    require_non_empty("changelog", "entityId", &input.entity_id)?;
    require_non_empty("changelog", "changeType", &input.change_type)?;
    require_non_empty("changelog", "title", &input.title)?;
    require_non_empty("changelog", "description", &input.description)?;
    require_non_empty("changelog", "reason", &input.reason)?;

    let id = input.id.unwrap_or_else(|| timestamped_id("changelog", &input.title).into());
    let payload = ChangelogPayload {
        id,
        entity_type: input.entity_type,
        entity_id: input.entity_id,
        change_type: input.change_type,
        title: input.title,
        description: input.description,
        triggered_by: input.triggered_by,
        reason: input.reason,
    };
    validate_payload(registry, &payload)?;
    Ok(payload)
}

// ============================================================================
// SECTION: Envelope Factory
// ============================================================================

/// Builds a validated [`ChangelogPayload`] and signs it into a
/// [`ChangelogRecord`] envelope with exactly one signature.
///
/// # Errors
///
/// See [`build_changelog_payload`]; also propagates signing failures from
/// [`crate::envelope::sign_new_envelope`].
pub fn build_changelog_envelope(
    registry: &SchemaRegistry,
    input: NewChangelogInput,
    keypair: &Keypair,
    key_id: &str,
    role: &str,
    notes: &str,
) -> GitGovResult<ChangelogRecord> {
    let payload = build_changelog_payload(registry, input)?;
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
    use gitgov_schema::SchemaRegistry;

    use super::NewChangelogInput;
    use super::build_changelog_payload;

    fn input() -> NewChangelogInput {
        NewChangelogInput {
            id: None,
            entity_type: EntityType::Task,
            entity_id: "1752274500-task-t".to_string(),
            change_type: "status_transition".to_string(),
            title: "Task archived".to_string(),
            description: "Task moved from done to archived.".to_string(),
            triggered_by: "human:alice".into(),
            reason: "Completed and closed out.".to_string(),
        }
    }

    #[test]
    fn generates_id_from_title() {
        let registry = SchemaRegistry::new();
        let payload = build_changelog_payload(&registry, input()).unwrap();
        assert!(payload.id.as_str().contains("-changelog-task-archived"));
    }

    #[test]
    fn rejects_empty_reason() {
        let registry = SchemaRegistry::new();
        let mut bad = input();
        bad.reason = String::new();
        assert!(build_changelog_payload(&registry, bad).is_err());
    }
}
