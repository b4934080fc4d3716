// gitgov-factory/src/execution.rs
// ============================================================================
// Module: Execution Factory
// Description: Id generation and validation for execution records.
// Purpose: Turn a partial execution input into a fully-formed, validated
//          `ExecutionPayload`, or a signed `ExecutionRecord` envelope.
// Dependencies: gitgov-core, gitgov-schema, crate::{envelope, slug, validate}
// ============================================================================

//! ## Overview
//! Executions carry no optional fields to default: every field but `id` is
//! required, and `id` defaults to `{unix-seconds}-execution-{slug(title)}`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use gitgov_core::ExecutionId;
use gitgov_core::ExecutionPayload;
use gitgov_core::ExecutionRecord;
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

/// Partial input accepted by [`build_execution_payload`].
#[derive(Debug, Clone)]
pub struct NewExecutionInput {
    /// Explicit id; generated from `title` when absent.
    pub id: Option<ExecutionId>,
    /// The task this execution was performed against. Required.
    pub task_id: TaskId,
    /// Execution kind (`progress`, `completion`, ...). Required.
    pub kind: String,
    /// Short title. Required.
    pub title: String,
    /// The work performed or produced, at least 10 characters. Required.
    pub result: String,
}

impl NewExecutionInput {
    /// Builds a bare input with every required field set.
    #[must_use]
    pub fn new(
        task_id: TaskId,
        kind: impl Into<String>,
        title: impl Into<String>,
        result: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            task_id,
            kind: kind.into(),
            title: title.into(),
            result: result.into(),
        }
    }
}

// ============================================================================
// SECTION: Payload Factory
// ============================================================================

/// Builds and validates an [`ExecutionPayload`] from partial input.
///
/// # Errors
///
/// Returns [`gitgov_core::GitGovError::RequiredField`] when `kind`, `title`,
/// or `result` is empty, or
/// [`gitgov_core::GitGovError::DetailedValidation`] when the resulting
/// payload fails schema validation.
pub fn build_execution_payload(
    registry: &SchemaRegistry,
    input: NewExecutionInput,
) -> GitGovResult<ExecutionPayload> {
    require_non_empty("execution", "type", &input.kind)?;
    require_non_empty("execution", "title", &input.title)?;
    require_non_empty("execution", "result", &input.result)?;

    let id = input.id.unwrap_or_else(|| timestamped_id("execution", &input.title).into());
    let payload = ExecutionPayload {
        id,
        task_id: input.task_id,
        kind: input.kind,
        title: input.title,
        result: input.result,
    };
    validate_payload(registry, &payload)?;
    Ok(payload)
}

// ============================================================================
// SECTION: Envelope Factory
// ============================================================================

/// Builds a validated [`ExecutionPayload`] and signs it into an
/// [`ExecutionRecord`] envelope with exactly one signature.
///
/// # Errors
///
/// See [`build_execution_payload`]; also propagates signing failures from
/// [`crate::envelope::sign_new_envelope`].
pub fn build_execution_envelope(
    registry: &SchemaRegistry,
    input: NewExecutionInput,
    keypair: &Keypair,
    key_id: &str,
    role: &str,
    notes: &str,
) -> GitGovResult<ExecutionRecord> {
    let payload = build_execution_payload(registry, input)?;
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
    use gitgov_core::ExecutionPayload;
    use gitgov_schema::SchemaRegistry;

    use super::NewExecutionInput;
    use super::build_execution_payload;

    #[test]
    fn generates_id_from_title() {
        let registry = SchemaRegistry::new();
        let input = NewExecutionInput::new(
            "1752274500-task-t".into(),
            ExecutionPayload::KIND_PROGRESS,
            "Initial progress",
            "Implemented the first pass.",
        );
        let payload = build_execution_payload(&registry, input).unwrap();
        assert!(payload.id.as_str().contains("-execution-initial-progress"));
    }

    #[test]
    fn rejects_short_result() {
        let registry = SchemaRegistry::new();
        let input = NewExecutionInput::new(
            "1752274500-task-t".into(),
            ExecutionPayload::KIND_PROGRESS,
            "Initial progress",
            "too short",
        );
        assert!(build_execution_payload(&registry, input).is_err());
    }
}
