// gitgov-engine/src/task.rs
// ============================================================================
// Module: Task Operations
// Description: Backlog engine operations over task records (§4.9).
// Purpose: Implement `createTask`, `submitTask`, `approveTask`,
//          `activateTask`, `completeTask`, and `deleteTask`.
// Dependencies: gitgov-core, gitgov-factory, gitgov-schema, gitgov-workflow,
//               crate::{error, mutate, stores}
// ============================================================================

//! ## Overview
//! Every transition here is the same shape: resolve the current actor,
//! consult the workflow methodology (C9), and call
//! [`crate::mutate::apply_task_transition`] to authorize and append the new
//! signature. `createTask` is the exception — it goes through the task
//! factory (C6) instead, since there is no prior envelope to transition.
//! `deleteTask` drives the methodology's own `draft -> discarded` transition
//! rather than physically removing the record, so a deleted task remains
//! part of the audit trail; a pre-check gives the caller the educational
//! message §4.9 asks for when the task is not in `draft`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use gitgov_core::GitGovError;
use gitgov_core::GitGovResult;
use gitgov_core::TaskId;
use gitgov_core::TaskRecord;
use gitgov_core::TaskStatus;
use gitgov_factory::NewTaskInput;
use gitgov_factory::build_task_envelope;
use gitgov_schema::SchemaRegistry;
use gitgov_workflow::Methodology;

use crate::error::EngineError;
use crate::mutate::apply_task_transition;
use crate::stores::Signer;
use crate::stores::Stores;

// ============================================================================
// SECTION: Create
// ============================================================================

/// Builds, validates, signs, and persists a new task (always starting in
/// `draft`; see [`gitgov_factory::build_task_payload`]).
///
/// # Errors
///
/// Returns [`GitGovError::RequiredField`] or
/// [`GitGovError::DetailedValidation`] when `input` fails factory
/// validation, or a store-specific I/O error.
pub fn create_task(
    stores: &Stores,
    registry: &SchemaRegistry,
    signer: &Signer,
    input: NewTaskInput,
    role: &str,
    notes: &str,
) -> GitGovResult<TaskRecord> {
    let envelope = build_task_envelope(registry, input, &signer.keypair, signer.actor_id.as_str(), role, notes)?;
    stores.tasks.put(envelope.payload.id.as_str(), &envelope)?;
    Ok(envelope)
}

// ============================================================================
// SECTION: Transitions
// ============================================================================

/// `draft -> review`: submits a task for approval.
///
/// # Errors
///
/// Returns [`GitGovError::RecordNotFound`] when `task_id` does not resolve,
/// or [`GitGovError::ProtocolViolation`] when the submission is not
/// authorized (missing author signature, wrong starting state, ...).
pub fn submit_task(
    stores: &Stores,
    methodology: &Methodology,
    signer: &Signer,
    task_id: &TaskId,
    notes: &str,
) -> GitGovResult<TaskRecord> {
    apply_task_transition(
        stores,
        methodology,
        signer,
        task_id,
        TaskStatus::Review,
        Some("submit"),
        gitgov_workflow::ROLE_AUTHOR,
        notes,
    )
}

/// `review -> ready`: approves a submitted task. `role` must be one of the
/// methodology's approver capability roles (e.g. `approver:quality`).
///
/// # Errors
///
/// Returns [`GitGovError::RecordNotFound`] when `task_id` does not resolve,
/// or [`GitGovError::ProtocolViolation`] when no distinct approver
/// signature is present.
pub fn approve_task(
    stores: &Stores,
    methodology: &Methodology,
    signer: &Signer,
    task_id: &TaskId,
    role: &str,
    notes: &str,
) -> GitGovResult<TaskRecord> {
    apply_task_transition(stores, methodology, signer, task_id, TaskStatus::Ready, Some("approve"), role, notes)
}

/// `ready -> active`: activates an approved task. Requires the engine to
/// have already confirmed a first execution and an assignment feedback
/// record exist (checked via [`crate::context::TaskTransitionContext`]).
///
/// # Errors
///
/// Returns [`GitGovError::ProtocolViolation`] when no execution or
/// assignment exists yet for this task.
pub fn activate_task(
    stores: &Stores,
    methodology: &Methodology,
    signer: &Signer,
    task_id: &TaskId,
    role: &str,
    notes: &str,
) -> GitGovResult<TaskRecord> {
    apply_task_transition(stores, methodology, signer, task_id, TaskStatus::Active, Some("activate"), role, notes)
}

/// `active -> done`: completes an active task. `role` must hold the
/// quality-approver capability the default methodology requires.
///
/// # Errors
///
/// Returns [`GitGovError::ProtocolViolation`] when no qualifying signature
/// is present.
pub fn complete_task(
    stores: &Stores,
    methodology: &Methodology,
    signer: &Signer,
    task_id: &TaskId,
    role: &str,
    notes: &str,
) -> GitGovResult<TaskRecord> {
    apply_task_transition(stores, methodology, signer, task_id, TaskStatus::Done, Some("complete"), role, notes)
}

/// `draft -> discarded`: deletes a task. Permitted only while the task is
/// in `draft` (§4.9); otherwise fails with an educational
/// [`EngineError::TaskNotDraft`] naming the task's actual status rather than
/// falling through to the methodology's generic "unknown transition" error.
///
/// # Errors
///
/// Returns [`GitGovError::RecordNotFound`] when `task_id` does not resolve,
/// [`EngineError::TaskNotDraft`] (via [`GitGovError::ProtocolViolation`])
/// when the task is not in `draft`, or
/// [`GitGovError::ProtocolViolation`] when the requesting actor is not the
/// task's creator.
pub fn delete_task(
    stores: &Stores,
    methodology: &Methodology,
    signer: &Signer,
    task_id: &TaskId,
) -> GitGovResult<TaskRecord> {
    let current = stores
        .tasks
        .get(task_id.as_str())?
        .ok_or_else(|| GitGovError::RecordNotFound {
            record_type: "task".to_string(),
            id: task_id.as_str().to_string(),
        })?;
    if current.payload.status != TaskStatus::Draft {
        return Err(EngineError::TaskNotDraft {
            task_id: task_id.as_str().to_string(),
            status: current.payload.status.to_string(),
        }
        .into());
    }
    apply_task_transition(
        stores,
        methodology,
        signer,
        task_id,
        TaskStatus::Discarded,
        Some("delete"),
        gitgov_workflow::ROLE_AUTHOR,
        "",
    )
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
    use std::sync::Arc;

    use gitgov_core::ActorKind;
    use gitgov_core::ActorPayload;
    use gitgov_core::ActorStatus;
    use gitgov_core::Envelope;
    use gitgov_core::GitGovError;
    use gitgov_core::Header;
    use gitgov_core::RecordType;
    use gitgov_core::generate_keypair;
    use gitgov_core::payload_checksum;
    use gitgov_core::sign;
    use gitgov_schema::SchemaRegistry;
    use gitgov_store::InMemoryStore;
    use gitgov_workflow::default_methodology;

    use super::NewTaskInput;
    use super::Signer;
    use super::Stores;
    use super::create_task;
    use super::delete_task;
    use super::submit_task;

    fn stores() -> Stores {
        Stores::new(
            Arc::new(InMemoryStore::new()),
            Arc::new(InMemoryStore::new()),
            Arc::new(InMemoryStore::new()),
            Arc::new(InMemoryStore::new()),
            Arc::new(InMemoryStore::new()),
            Arc::new(InMemoryStore::new()),
            Arc::new(InMemoryStore::new()),
        )
    }

    fn author(stores: &Stores) -> Signer {
        let keypair = generate_keypair();
        let payload = ActorPayload {
            id: "human:alice".into(),
            kind: ActorKind::Human,
            display_name: "Alice".to_string(),
            public_key: keypair.public_key.clone(),
            roles: vec!["author".to_string()],
            status: ActorStatus::Active,
            supersedes_id: None,
            superseded_by: None,
        };
        let checksum = payload_checksum(&payload).unwrap();
        let signature = sign(&keypair, &checksum, "human:alice", "author", "").unwrap();
        let envelope = Envelope::new(Header::new(RecordType::Actor, checksum, signature), payload);
        stores.actors.put("human:alice", &envelope).unwrap();
        Signer::new("human:alice".into(), keypair)
    }

    #[test]
    fn create_task_starts_in_draft() {
        let stores = stores();
        let registry = SchemaRegistry::new();
        let signer = author(&stores);
        let input = NewTaskInput::new("Fix the login bug", "A clear repro and a fix.");
        let task = create_task(&stores, &registry, &signer, input, "author", "initial").unwrap();
        assert_eq!(task.payload.status, gitgov_core::TaskStatus::Draft);
        assert_eq!(task.header.signatures.len(), 1);
    }

    #[test]
    fn submit_task_moves_to_review_with_author_signature() {
        let stores = stores();
        let registry = SchemaRegistry::new();
        let signer = author(&stores);
        let methodology = default_methodology();
        let input = NewTaskInput::new("Fix the login bug", "A clear repro and a fix.");
        let task = create_task(&stores, &registry, &signer, input, "author", "initial").unwrap();
        let submitted = submit_task(&stores, &methodology, &signer, &task.payload.id, "ready for review").unwrap();
        assert_eq!(submitted.payload.status, gitgov_core::TaskStatus::Review);
        assert_eq!(submitted.header.signatures.len(), 2);
    }

    #[test]
    fn delete_task_rejects_non_draft_task_with_educational_error() {
        let stores = stores();
        let registry = SchemaRegistry::new();
        let signer = author(&stores);
        let methodology = default_methodology();
        let input = NewTaskInput::new("Fix the login bug", "A clear repro and a fix.");
        let task = create_task(&stores, &registry, &signer, input, "author", "initial").unwrap();
        submit_task(&stores, &methodology, &signer, &task.payload.id, "ready for review").unwrap();

        let result = delete_task(&stores, &methodology, &signer, &task.payload.id);
        assert!(matches!(
            result,
            Err(GitGovError::ProtocolViolation { violation_type, .. }) if violation_type == "task_not_draft"
        ));
    }

    #[test]
    fn delete_task_discards_a_draft_task() {
        let stores = stores();
        let registry = SchemaRegistry::new();
        let signer = author(&stores);
        let methodology = default_methodology();
        let input = NewTaskInput::new("Fix the login bug", "A clear repro and a fix.");
        let task = create_task(&stores, &registry, &signer, input, "author", "initial").unwrap();

        let discarded = delete_task(&stores, &methodology, &signer, &task.payload.id).unwrap();
        assert_eq!(discarded.payload.status, gitgov_core::TaskStatus::Discarded);
    }
}
