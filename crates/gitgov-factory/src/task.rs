// gitgov-factory/src/task.rs
// ============================================================================
// Module: Task Factory
// Description: Defaulting, id generation, and validation for task records.
// Purpose: Turn a partial task input into a fully-formed, validated
//          `TaskPayload`, or a signed `TaskRecord` envelope.
// Dependencies: gitgov-core, gitgov-schema, crate::{envelope, slug, validate}
// ============================================================================

//! ## Overview
//! A task's `id` defaults to `{unix-seconds}-task-{slug(title)}` when not
//! supplied. `status` defaults to `draft`, `priority` to `medium`, and
//! `tags` to empty, per §4.5. Every new task starts in `draft`: the
//! workflow methodology (`gitgov-workflow`), not this factory, governs how
//! it moves from there.

// ============================================================================
// SECTION: Imports
// ============================================================================

use gitgov_core::CycleId;
use gitgov_core::GitGovResult;
use gitgov_core::Keypair;
use gitgov_core::OpenMetadata;
use gitgov_core::Priority;
use gitgov_core::TaskId;
use gitgov_core::TaskPayload;
use gitgov_core::TaskRecord;
use gitgov_core::TaskStatus;
use gitgov_schema::SchemaRegistry;

use crate::envelope::sign_new_envelope;
use crate::slug::timestamped_id;
use crate::validate::require_non_empty;
use crate::validate::validate_payload;

// ============================================================================
// SECTION: Input
// ============================================================================

/// Partial input accepted by [`build_task_payload`].
#[derive(Debug, Clone)]
pub struct NewTaskInput {
    /// Explicit id; generated from `title` when absent.
    pub id: Option<TaskId>,
    /// Short title, 3-150 characters. Required; cannot be defaulted.
    pub title: String,
    /// Full description, at least 10 characters. Required.
    pub description: String,
    /// Lifecycle status. Defaults to `draft`.
    pub status: Option<TaskStatus>,
    /// Priority. Defaults to `medium`.
    pub priority: Option<Priority>,
    /// Free-form tags. Defaults to empty.
    pub tags: Vec<String>,
    /// Cycles this task is linked to. Defaults to empty.
    pub cycle_ids: Vec<CycleId>,
    /// External references. Defaults to empty.
    pub references: Vec<String>,
    /// Free-text notes. Defaults to empty.
    pub notes: Vec<String>,
    /// Open, caller-defined metadata.
    pub metadata: OpenMetadata,
}

impl NewTaskInput {
    /// Builds a bare input with the given title and description, leaving
    /// every defaultable field unset.
    #[must_use]
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            description: description.into(),
            status: None,
            priority: None,
            tags: Vec::new(),
            cycle_ids: Vec::new(),
            references: Vec::new(),
            notes: Vec::new(),
            metadata: OpenMetadata::new(),
        }
    }
}

// ============================================================================
// SECTION: Payload Factory
// ============================================================================

/// Builds and validates a [`TaskPayload`] from partial input, filling
/// defaults (`status: draft`, `priority: medium`, `tags: []`) and
/// generating an id when absent.
///
/// # Errors
///
/// Returns [`gitgov_core::GitGovError::RequiredField`] when `title` or
/// `description` is empty, or
/// [`gitgov_core::GitGovError::DetailedValidation`] when the resulting
/// payload fails schema validation (e.g. a title outside 3-150 characters).
pub fn build_task_payload(registry: &SchemaRegistry, input: NewTaskInput) -> GitGovResult<TaskPayload> {
    require_non_empty("task", "title", &input.title)?;
    require_non_empty("task", "description", &input.description)?;

    let id = input.id.unwrap_or_else(|| timestamped_id("task", &input.title).into());
    let payload = TaskPayload {
        id,
        title: input.title,
        description: input.description,
        status: input.status.unwrap_or(TaskStatus::Draft),
        priority: input.priority.unwrap_or_default(),
        tags: input.tags,
        cycle_ids: input.cycle_ids,
        references: input.references,
        notes: input.notes,
        metadata: input.metadata,
    };
    validate_payload(registry, &payload)?;
    Ok(payload)
}

// ============================================================================
// SECTION: Envelope Factory
// ============================================================================

/// Builds a validated [`TaskPayload`] and signs it into a [`TaskRecord`]
/// envelope with exactly one signature.
///
/// # Errors
///
/// See [`build_task_payload`]; also propagates signing failures from
/// [`crate::envelope::sign_new_envelope`].
pub fn build_task_envelope(
    registry: &SchemaRegistry,
    input: NewTaskInput,
    keypair: &Keypair,
    key_id: &str,
    role: &str,
    notes: &str,
) -> GitGovResult<TaskRecord> {
    let payload = build_task_payload(registry, input)?;
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
    use gitgov_core::Priority;
    use gitgov_core::TaskStatus;
    use gitgov_schema::SchemaRegistry;

    use super::NewTaskInput;
    use super::build_task_payload;

    #[test]
    fn defaults_status_priority_and_tags() {
        let registry = SchemaRegistry::new();
        let payload =
            build_task_payload(&registry, NewTaskInput::new("Fix the login bug", "A clear repro and fix.")).unwrap();
        assert_eq!(payload.status, TaskStatus::Draft);
        assert_eq!(payload.priority, Priority::Medium);
        assert!(payload.tags.is_empty());
        assert!(payload.id.as_str().contains("-task-fix-the-login-bug"));
    }

    #[test]
    fn rejects_title_too_short_to_pass_schema() {
        let registry = SchemaRegistry::new();
        let result = build_task_payload(&registry, NewTaskInput::new("ab", "A clear repro and fix."));
        assert!(result.is_err());
    }

    #[test]
    fn rejects_empty_description() {
        let registry = SchemaRegistry::new();
        let result = build_task_payload(&registry, NewTaskInput::new("Fix the login bug", ""));
        assert!(result.is_err());
    }
}
