// gitgov-engine/src/cycle.rs
// ============================================================================
// Module: Cycle Operations
// Description: Backlog engine operations over cycle records and the
//              bidirectional task/cycle linkage (§4.9).
// Purpose: Implement `createCycle`, `addTaskToCycle`, `removeTaskFromCycle`,
//          `moveTaskBetweenCycles`, and `addChildCycle`.
// Dependencies: gitgov-core, gitgov-factory, gitgov-schema, crate::stores
// ============================================================================

//! ## Overview
//! Linkage operations are not workflow transitions — they don't change a
//! record's `status`, so they bypass `gitgov-workflow` entirely and instead
//! append a signature directly, the same way [`crate::mutate`] does for
//! tasks. The one invariant this module owns is bidirectionality:
//! `cycle.taskIds` and `task.cycleIds` must always agree on which cycles a
//! task belongs to (§4.9, "cross-record integrity"). `moveTaskBetweenCycles`
//! is the one place that invariant is at risk mid-operation — it removes
//! from the source cycle, then adds to the destination, and rolls the
//! removal back if the add fails, so a reader never observes the task
//! missing from both.

// ============================================================================
// SECTION: Imports
// ============================================================================

use gitgov_core::CycleId;
use gitgov_core::CycleRecord;
use gitgov_core::GitGovError;
use gitgov_core::GitGovResult;
use gitgov_core::TaskId;
use gitgov_core::TaskRecord;
use gitgov_core::ValidationFieldError;
use gitgov_core::payload_checksum;
use gitgov_core::sign;
use gitgov_factory::NewCycleInput;
use gitgov_factory::build_cycle_envelope;
use gitgov_schema::SchemaRegistry;

use crate::error::EngineError;
use crate::stores::Signer;
use crate::stores::Stores;

// ============================================================================
// SECTION: Create
// ============================================================================

/// Builds, validates, signs, and persists a new cycle (starting in
/// `planning`).
///
/// # Errors
///
/// Returns [`GitGovError::RequiredField`] or
/// [`GitGovError::DetailedValidation`] when `input` fails factory
/// validation, or a store-specific I/O error.
pub fn create_cycle(
    stores: &Stores,
    registry: &SchemaRegistry,
    signer: &Signer,
    input: NewCycleInput,
    role: &str,
    notes: &str,
) -> GitGovResult<CycleRecord> {
    let envelope = build_cycle_envelope(registry, input, &signer.keypair, signer.actor_id.as_str(), role, notes)?;
    stores.cycles.put(envelope.payload.id.as_str(), &envelope)?;
    Ok(envelope)
}

/// Nests `child_id` under `parent_id` by appending to the parent's
/// `childCycleIds`.
///
/// # Errors
///
/// Returns [`GitGovError::RecordNotFound`] when `parent_id` does not
/// resolve, or [`EngineError::LinkageViolation`] when `child_id` is already
/// listed.
pub fn add_child_cycle(
    stores: &Stores,
    signer: &Signer,
    parent_id: &CycleId,
    child_id: &CycleId,
    role: &str,
    notes: &str,
) -> GitGovResult<CycleRecord> {
    let mut parent = load_cycle(stores, parent_id)?;
    if parent.payload.child_cycle_ids.iter().any(|id| id == child_id) {
        return Err(EngineError::LinkageViolation {
            message: format!("cycle {child_id} is already a child of cycle {parent_id}"),
        }
        .into());
    }
    parent.payload.child_cycle_ids.push(child_id.clone());
    sign_and_put_cycle(stores, signer, &mut parent, role, notes)?;
    Ok(parent)
}

// ============================================================================
// SECTION: Linkage
// ============================================================================

/// Links `task_id` into `cycle_id`, appending to both `cycle.taskIds` and
/// `task.cycleIds` (§4.9, §313).
///
/// # Errors
///
/// Returns [`GitGovError::RecordNotFound`] when either record does not
/// resolve, or [`EngineError::LinkageViolation`] when the task is already
/// linked to the cycle.
pub fn add_task_to_cycle(
    stores: &Stores,
    signer: &Signer,
    cycle_id: &CycleId,
    task_id: &TaskId,
    role: &str,
    notes: &str,
) -> GitGovResult<()> {
    let mut cycle = load_cycle(stores, cycle_id)?;
    let mut task = load_task(stores, task_id)?;
    if cycle.payload.task_ids.iter().any(|id| id == task_id) || task.payload.cycle_ids.iter().any(|id| id == cycle_id)
    {
        return Err(EngineError::LinkageViolation {
            message: format!("task {task_id} is already linked to cycle {cycle_id}"),
        }
        .into());
    }
    cycle.payload.task_ids.push(task_id.clone());
    task.payload.cycle_ids.push(cycle_id.clone());
    sign_and_put_cycle(stores, signer, &mut cycle, role, notes)?;
    sign_and_put_task(stores, signer, &mut task, role, notes)?;
    Ok(())
}

/// Unlinks `task_id` from `cycle_id`, removing it from both `cycle.taskIds`
/// and `task.cycleIds`.
///
/// # Errors
///
/// Returns [`GitGovError::RecordNotFound`] when either record does not
/// resolve, or [`EngineError::LinkageViolation`] when the task is not
/// currently linked to the cycle.
pub fn remove_task_from_cycle(
    stores: &Stores,
    signer: &Signer,
    cycle_id: &CycleId,
    task_id: &TaskId,
    role: &str,
    notes: &str,
) -> GitGovResult<()> {
    let mut cycle = load_cycle(stores, cycle_id)?;
    let mut task = load_task(stores, task_id)?;
    if !cycle.payload.task_ids.iter().any(|id| id == task_id) || !task.payload.cycle_ids.iter().any(|id| id == cycle_id)
    {
        return Err(EngineError::LinkageViolation {
            message: format!("task {task_id} is not linked to cycle {cycle_id}"),
        }
        .into());
    }
    cycle.payload.task_ids.retain(|id| id != task_id);
    task.payload.cycle_ids.retain(|id| id != cycle_id);
    sign_and_put_cycle(stores, signer, &mut cycle, role, notes)?;
    sign_and_put_task(stores, signer, &mut task, role, notes)?;
    Ok(())
}

/// Moves `task_id` from `from_cycle` to `to_cycle` as a single logical
/// operation (§313): removes the link to `from_cycle`, then adds the link
/// to `to_cycle`. If the add half fails, the removal is rolled back before
/// the error is surfaced, so a concurrent reader never observes the task
/// missing from both cycles.
///
/// # Errors
///
/// Returns [`GitGovError::RecordNotFound`] when any record does not
/// resolve, [`EngineError::LinkageViolation`] when the task is not
/// currently linked to `from_cycle` or is already linked to `to_cycle`, or
/// [`EngineError::MoveRolledBack`] when the add half fails after the
/// removal succeeded.
pub fn move_task_between_cycles(
    stores: &Stores,
    signer: &Signer,
    from_cycle: &CycleId,
    to_cycle: &CycleId,
    task_id: &TaskId,
    role: &str,
    notes: &str,
) -> GitGovResult<()> {
    remove_task_from_cycle(stores, signer, from_cycle, task_id, role, notes)?;
    if let Err(add_err) = add_task_to_cycle(stores, signer, to_cycle, task_id, role, notes) {
        let reason = add_err.to_string();
        add_task_to_cycle(stores, signer, from_cycle, task_id, role, notes).map_err(|restore_err| {
            GitGovError::from(EngineError::LinkageViolation {
                message: format!(
                    "move of task {task_id} from {from_cycle} to {to_cycle} failed ({reason}) and rollback also \
                     failed: {restore_err}"
                ),
            })
        })?;
        return Err(EngineError::MoveRolledBack {
            task_id: task_id.as_str().to_string(),
            from_cycle: from_cycle.as_str().to_string(),
            to_cycle: to_cycle.as_str().to_string(),
            reason,
        }
        .into());
    }
    Ok(())
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Loads a cycle envelope by id, translating a missing record into
/// [`GitGovError::RecordNotFound`].
fn load_cycle(stores: &Stores, cycle_id: &CycleId) -> GitGovResult<CycleRecord> {
    stores.cycles.get(cycle_id.as_str())?.ok_or_else(|| GitGovError::RecordNotFound {
        record_type: "cycle".to_string(),
        id: cycle_id.as_str().to_string(),
    })
}

/// Loads a task envelope by id, translating a missing record into
/// [`GitGovError::RecordNotFound`].
fn load_task(stores: &Stores, task_id: &TaskId) -> GitGovResult<TaskRecord> {
    stores.tasks.get(task_id.as_str())?.ok_or_else(|| GitGovError::RecordNotFound {
        record_type: "task".to_string(),
        id: task_id.as_str().to_string(),
    })
}

/// Recomputes the checksum, appends a new signature, and persists `cycle`.
fn sign_and_put_cycle(
    stores: &Stores,
    signer: &Signer,
    cycle: &mut CycleRecord,
    role: &str,
    notes: &str,
) -> GitGovResult<()> {
    let checksum = payload_checksum(&cycle.payload).map_err(|err| GitGovError::DetailedValidation {
        record_type: "cycle".to_string(),
        errors: vec![ValidationFieldError::new("", err.to_string())],
    })?;
    let signature = sign(&signer.keypair, &checksum, signer.actor_id.as_str(), role, notes).map_err(|err| {
        GitGovError::DetailedValidation {
            record_type: "cycle".to_string(),
            errors: vec![ValidationFieldError::new("", err.to_string())],
        }
    })?;
    cycle.header.payload_checksum = checksum;
    cycle.header.append_signature(signature);
    stores.cycles.put(cycle.payload.id.as_str(), cycle)
}

/// Recomputes the checksum, appends a new signature, and persists `task`.
fn sign_and_put_task(
    stores: &Stores,
    signer: &Signer,
    task: &mut TaskRecord,
    role: &str,
    notes: &str,
) -> GitGovResult<()> {
    let checksum = payload_checksum(&task.payload).map_err(|err| GitGovError::DetailedValidation {
        record_type: "task".to_string(),
        errors: vec![ValidationFieldError::new("", err.to_string())],
    })?;
    let signature = sign(&signer.keypair, &checksum, signer.actor_id.as_str(), role, notes).map_err(|err| {
        GitGovError::DetailedValidation {
            record_type: "task".to_string(),
            errors: vec![ValidationFieldError::new("", err.to_string())],
        }
    })?;
    task.header.payload_checksum = checksum;
    task.header.append_signature(signature);
    stores.tasks.put(task.payload.id.as_str(), task)
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
    use gitgov_core::Header;
    use gitgov_core::RecordType;
    use gitgov_core::generate_keypair;
    use gitgov_store::InMemoryStore;

    use super::Stores;
    use super::add_task_to_cycle;
    use super::create_cycle;
    use super::move_task_between_cycles;
    use super::remove_task_from_cycle;
    use crate::stores::Signer;
    use crate::task::create_task;

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
        let checksum = gitgov_core::payload_checksum(&payload).unwrap();
        let signature = gitgov_core::sign(&keypair, &checksum, "human:alice", "author", "").unwrap();
        let envelope = Envelope::new(Header::new(RecordType::Actor, checksum, signature), payload);
        stores.actors.put("human:alice", &envelope).unwrap();
        Signer::new("human:alice".into(), keypair)
    }

    #[test]
    fn add_task_to_cycle_links_both_sides() {
        let stores = stores();
        let registry = gitgov_schema::SchemaRegistry::new();
        let signer = author(&stores);
        let cycle = create_cycle(
            &stores,
            &registry,
            &signer,
            gitgov_factory::NewCycleInput::new("Sprint 1"),
            "author",
            "",
        )
        .unwrap();
        let task = create_task(
            &stores,
            &registry,
            &signer,
            gitgov_factory::NewTaskInput::new("Fix the login bug", "A clear repro and a fix."),
            "author",
            "",
        )
        .unwrap();

        add_task_to_cycle(&stores, &signer, &cycle.payload.id, &task.payload.id, "author", "").unwrap();

        let cycle = stores.cycles.get(cycle.payload.id.as_str()).unwrap().unwrap();
        let task = stores.tasks.get(task.payload.id.as_str()).unwrap().unwrap();
        assert!(cycle.payload.task_ids.contains(&task.payload.id));
        assert!(task.payload.cycle_ids.contains(&cycle.payload.id));
    }

    #[test]
    fn remove_task_from_cycle_unlinks_both_sides() {
        let stores = stores();
        let registry = gitgov_schema::SchemaRegistry::new();
        let signer = author(&stores);
        let cycle = create_cycle(
            &stores,
            &registry,
            &signer,
            gitgov_factory::NewCycleInput::new("Sprint 1"),
            "author",
            "",
        )
        .unwrap();
        let task = create_task(
            &stores,
            &registry,
            &signer,
            gitgov_factory::NewTaskInput::new("Fix the login bug", "A clear repro and a fix."),
            "author",
            "",
        )
        .unwrap();
        add_task_to_cycle(&stores, &signer, &cycle.payload.id, &task.payload.id, "author", "").unwrap();

        remove_task_from_cycle(&stores, &signer, &cycle.payload.id, &task.payload.id, "author", "").unwrap();

        let cycle = stores.cycles.get(cycle.payload.id.as_str()).unwrap().unwrap();
        let task = stores.tasks.get(task.payload.id.as_str()).unwrap().unwrap();
        assert!(!cycle.payload.task_ids.contains(&task.payload.id));
        assert!(!task.payload.cycle_ids.contains(&cycle.payload.id));
    }

    #[test]
    fn move_task_between_cycles_is_atomic() {
        let stores = stores();
        let registry = gitgov_schema::SchemaRegistry::new();
        let signer = author(&stores);
        let from_cycle = create_cycle(
            &stores,
            &registry,
            &signer,
            gitgov_factory::NewCycleInput::new("Sprint 1"),
            "author",
            "",
        )
        .unwrap();
        let to_cycle = create_cycle(
            &stores,
            &registry,
            &signer,
            gitgov_factory::NewCycleInput::new("Sprint 2"),
            "author",
            "",
        )
        .unwrap();
        let task = create_task(
            &stores,
            &registry,
            &signer,
            gitgov_factory::NewTaskInput::new("Fix the login bug", "A clear repro and a fix."),
            "author",
            "",
        )
        .unwrap();
        add_task_to_cycle(&stores, &signer, &from_cycle.payload.id, &task.payload.id, "author", "").unwrap();

        move_task_between_cycles(
            &stores,
            &signer,
            &from_cycle.payload.id,
            &to_cycle.payload.id,
            &task.payload.id,
            "author",
            "",
        )
        .unwrap();

        let from_cycle = stores.cycles.get(from_cycle.payload.id.as_str()).unwrap().unwrap();
        let to_cycle = stores.cycles.get(to_cycle.payload.id.as_str()).unwrap().unwrap();
        let task = stores.tasks.get(task.payload.id.as_str()).unwrap().unwrap();
        assert!(!from_cycle.payload.task_ids.contains(&task.payload.id));
        assert!(to_cycle.payload.task_ids.contains(&task.payload.id));
        assert_eq!(task.payload.cycle_ids, vec![to_cycle.payload.id.clone()]);
    }
}
