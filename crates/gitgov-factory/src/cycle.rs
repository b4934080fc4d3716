// gitgov-factory/src/cycle.rs
// ============================================================================
// Module: Cycle Factory
// Description: Defaulting, id generation, and validation for cycle records.
// Purpose: Turn a partial cycle input into a fully-formed, validated
//          `CyclePayload`, or a signed `CycleRecord` envelope.
// Dependencies: gitgov-core, gitgov-schema, crate::{envelope, slug, validate}
// ============================================================================

//! ## Overview
//! A cycle's `id` defaults to `{unix-seconds}-cycle-{slug(title)}`. §4.5
//! does not enumerate cycle defaults explicitly, but §3.3's lifecycle
//! (`planning -> active -> completed -> archived`) makes `planning` the only
//! sensible default for a freshly created cycle, so this factory applies it.

// ============================================================================
// SECTION: Imports
// ============================================================================

use gitgov_core::CycleId;
use gitgov_core::CyclePayload;
use gitgov_core::CycleRecord;
use gitgov_core::CycleStatus;
use gitgov_core::GitGovResult;
use gitgov_core::Keypair;
use gitgov_core::TaskId;
use gitgov_schema::SchemaRegistry;

use crate::envelope::sign_new_envelope;
use crate::slug::timestamped_id;
use crate::validate::require_non_empty;
use crate::validate::validate_payload;

// ============================================================================
// SECTION: Input
// ============================================================================

/// Partial input accepted by [`build_cycle_payload`].
#[derive(Debug, Clone)]
pub struct NewCycleInput {
    /// Explicit id; generated from `title` when absent.
    pub id: Option<CycleId>,
    /// Short title. Required; cannot be defaulted.
    pub title: String,
    /// Lifecycle status. Defaults to `planning`.
    pub status: Option<CycleStatus>,
    /// Tasks linked to this cycle. Defaults to empty.
    pub task_ids: Vec<TaskId>,
    /// Child cycles nested under this one. Defaults to empty.
    pub child_cycle_ids: Vec<CycleId>,
    /// Free-form tags. Defaults to empty.
    pub tags: Vec<String>,
}

impl NewCycleInput {
    /// Builds a bare input with the given title, leaving every defaultable
    /// field unset.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            status: None,
            task_ids: Vec::new(),
            child_cycle_ids: Vec::new(),
            tags: Vec::new(),
        }
    }
}

// ============================================================================
// SECTION: Payload Factory
// ============================================================================

/// Builds and validates a [`CyclePayload`] from partial input.
///
/// # Errors
///
/// Returns [`gitgov_core::GitGovError::RequiredField`] when `title` is
/// empty, or [`gitgov_core::GitGovError::DetailedValidation`] when the
/// resulting payload fails schema validation.
pub fn build_cycle_payload(registry: &SchemaRegistry, input: NewCycleInput) -> GitGovResult<CyclePayload> {
    require_non_empty("cycle", "title", &input.title)?;

    let id = input.id.unwrap_or_else(|| timestamped_id("cycle", &input.title).into());
    let payload = CyclePayload {
        id,
        title: input.title,
        status: input.status.unwrap_or(CycleStatus::Planning),
        task_ids: input.task_ids,
        child_cycle_ids: input.child_cycle_ids,
        tags: input.tags,
    };
    validate_payload(registry, &payload)?;
    Ok(payload)
}

// ============================================================================
// SECTION: Envelope Factory
// ============================================================================

/// Builds a validated [`CyclePayload`] and signs it into a [`CycleRecord`]
/// envelope with exactly one signature.
///
/// # Errors
///
/// See [`build_cycle_payload`]; also propagates signing failures from
/// [`crate::envelope::sign_new_envelope`].
pub fn build_cycle_envelope(
    registry: &SchemaRegistry,
    input: NewCycleInput,
    keypair: &Keypair,
    key_id: &str,
    role: &str,
    notes: &str,
) -> GitGovResult<CycleRecord> {
    let payload = build_cycle_payload(registry, input)?;
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
    use gitgov_core::CycleStatus;
    use gitgov_schema::SchemaRegistry;

    use super::NewCycleInput;
    use super::build_cycle_payload;

    #[test]
    fn defaults_status_to_planning() {
        let registry = SchemaRegistry::new();
        let payload = build_cycle_payload(&registry, NewCycleInput::new("Q3 roadmap")).unwrap();
        assert_eq!(payload.status, CycleStatus::Planning);
        assert!(payload.id.as_str().contains("-cycle-q3-roadmap"));
    }

    #[test]
    fn rejects_empty_title() {
        let registry = SchemaRegistry::new();
        assert!(build_cycle_payload(&registry, NewCycleInput::new("")).is_err());
    }
}
