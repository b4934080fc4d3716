// gitgov-engine/src/projector.rs
// ============================================================================
// Module: Projector
// Description: Pure, read-only transformation from the raw record set to
//              derived views (§4.10).
// Purpose: Enrich cycles with task rollups, enrich tasks with age and
//          staleness, and compute global health metrics and derived sets.
// Dependencies: gitgov-core, crate::{config, stores}
// ============================================================================

//! ## Overview
//! [`project`] never writes to a store and never reads the clock itself —
//! `now_unix` is a parameter, so the same store state and the same instant
//! always produce the same [`ProjectedView`] (§4.10: "deterministic given
//! the same input"). A task's age is measured from the unix-seconds prefix
//! embedded in its id (`{unix}-task-{slug}`, per
//! [`gitgov_factory::slug::timestamped_id`]), not a separate `createdAt`
//! field the protocol does not carry. Only tasks in an open status (not
//! `done`, `archived`, or `discarded`) are eligible for the stalled/at-risk
//! sets; a closed task's age is not a signal of neglect.

// ============================================================================
// SECTION: Imports
// ============================================================================

use gitgov_core::CycleId;
use gitgov_core::CycleStatus;
use gitgov_core::GitGovResult;
use gitgov_core::TaskId;
use gitgov_core::TaskStatus;

use crate::config::ProjectorConfig;
use crate::stores::Stores;

// ============================================================================
// SECTION: Views
// ============================================================================

/// Per-task derived facts: age, staleness, and cycle membership.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskEnrichment {
    /// The enriched task's id.
    pub task_id: TaskId,
    /// The task's current status.
    pub status: TaskStatus,
    /// Age in whole days since creation, or `None` when the id carries no
    /// parseable timestamp prefix.
    pub age_days: Option<i64>,
    /// The cycles this task currently belongs to.
    pub cycle_ids: Vec<CycleId>,
    /// Whether this task is open and has crossed the stalled threshold.
    pub stalled: bool,
    /// Whether this task is open and has crossed the at-risk threshold but
    /// not the stalled one.
    pub at_risk: bool,
}

/// A cycle enriched with a rollup of the tasks linked to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleRollup {
    /// The enriched cycle's id.
    pub cycle_id: CycleId,
    /// The cycle's current status.
    pub status: CycleStatus,
    /// Total tasks linked to this cycle.
    pub total_tasks: usize,
    /// Tasks linked to this cycle in status `done`.
    pub done_tasks: usize,
    /// Tasks linked to this cycle that are open and stalled.
    pub stalled_tasks: usize,
}

/// Global counts across the full task set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealthMetrics {
    /// Total tasks in the store.
    pub total_tasks: usize,
    /// Tasks in an open (non-terminal) status.
    pub open_tasks: usize,
    /// Open tasks past the stalled threshold.
    pub stalled_tasks: usize,
    /// Open tasks past the at-risk threshold but not yet stalled.
    pub at_risk_tasks: usize,
}

/// The full derived view over one snapshot of the record set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectedView {
    /// Per-task enrichment, one entry per task in the store.
    pub tasks: Vec<TaskEnrichment>,
    /// Per-cycle rollup, one entry per cycle in the store.
    pub cycles: Vec<CycleRollup>,
    /// Global health metrics.
    pub health: HealthMetrics,
    /// Ids of tasks currently classified as stalled.
    pub stalled_task_ids: Vec<TaskId>,
    /// Ids of tasks currently classified as at-risk.
    pub at_risk_task_ids: Vec<TaskId>,
}

// ============================================================================
// SECTION: Projection
// ============================================================================

/// Whether `status` counts toward staleness at all. Terminal statuses carry
/// no useful "age" signal.
const fn is_open(status: TaskStatus) -> bool {
    !matches!(status, TaskStatus::Done | TaskStatus::Archived | TaskStatus::Discarded)
}

/// Parses the unix-seconds prefix out of a `{unix}-task-{slug}`-shaped id,
/// returning `None` when the prefix is absent or not a valid integer.
fn created_at_unix(task_id: &str) -> Option<i64> {
    task_id.split('-').next()?.parse().ok()
}

/// Builds the derived view over every task and cycle currently in the
/// stores, as of `now_unix`.
///
/// # Errors
///
/// Returns a store-specific I/O error if listing or loading any record
/// fails.
pub fn project(stores: &Stores, config: &ProjectorConfig, now_unix: i64) -> GitGovResult<ProjectedView> {
    let stalled_after = i64::from(config.stalled_after_days) * 86_400;
    let at_risk_after = i64::from(config.at_risk_after_days) * 86_400;

    let mut tasks = Vec::new();
    for id in stores.tasks.list()? {
        let Some(envelope) = stores.tasks.get(&id)? else {
            continue;
        };
        let payload = envelope.payload;
        let age_seconds = created_at_unix(payload.id.as_str()).map(|created| now_unix - created);
        let open = is_open(payload.status);
        let stalled = open && age_seconds.is_some_and(|age| age >= stalled_after);
        let at_risk = open && !stalled && age_seconds.is_some_and(|age| age >= at_risk_after);
        tasks.push(TaskEnrichment {
            task_id: payload.id,
            status: payload.status,
            age_days: age_seconds.map(|age| age / 86_400),
            cycle_ids: payload.cycle_ids,
            stalled,
            at_risk,
        });
    }

    let mut cycles = Vec::new();
    for id in stores.cycles.list()? {
        let Some(envelope) = stores.cycles.get(&id)? else {
            continue;
        };
        let payload = envelope.payload;
        let linked: Vec<&TaskEnrichment> =
            tasks.iter().filter(|task| payload.task_ids.iter().any(|id| *id == task.task_id)).collect();
        cycles.push(CycleRollup {
            cycle_id: payload.id,
            status: payload.status,
            total_tasks: linked.len(),
            done_tasks: linked.iter().filter(|task| task.status == TaskStatus::Done).count(),
            stalled_tasks: linked.iter().filter(|task| task.stalled).count(),
        });
    }

    let open_tasks = tasks.iter().filter(|task| is_open(task.status)).count();
    let stalled_task_ids: Vec<TaskId> = tasks.iter().filter(|task| task.stalled).map(|task| task.task_id.clone()).collect();
    let at_risk_task_ids: Vec<TaskId> = tasks.iter().filter(|task| task.at_risk).map(|task| task.task_id.clone()).collect();
    let health = HealthMetrics {
        total_tasks: tasks.len(),
        open_tasks,
        stalled_tasks: stalled_task_ids.len(),
        at_risk_tasks: at_risk_task_ids.len(),
    };

    Ok(ProjectedView {
        tasks,
        cycles,
        health,
        stalled_task_ids,
        at_risk_task_ids,
    })
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
    use gitgov_core::TaskId;
    use gitgov_core::TaskPayload;
    use gitgov_core::TaskStatus;
    use gitgov_core::generate_keypair;
    use gitgov_core::payload_checksum;
    use gitgov_core::sign;
    use gitgov_store::InMemoryStore;

    use super::Stores;
    use super::project;
    use crate::config::ProjectorConfig;

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

    fn put_task(stores: &Stores, id: &str, status: TaskStatus) {
        let keypair = generate_keypair();
        let payload = TaskPayload {
            id: TaskId::new(id.to_string()),
            title: "A task with a sufficiently long title".to_string(),
            description: "A description long enough to pass validation.".to_string(),
            status,
            priority: gitgov_core::Priority::Medium,
            tags: Vec::new(),
            cycle_ids: Vec::new(),
            references: Vec::new(),
            notes: Vec::new(),
            metadata: gitgov_core::OpenMetadata::new(),
        };
        let checksum = payload_checksum(&payload).unwrap();
        let signature = sign(&keypair, &checksum, "human:alice", "author", "").unwrap();
        let envelope = Envelope::new(Header::new(RecordType::Task, checksum, signature), payload);
        stores.tasks.put(id, &envelope).unwrap();
    }

    fn actor(stores: &Stores) {
        let keypair = generate_keypair();
        let payload = ActorPayload {
            id: "human:alice".into(),
            kind: ActorKind::Human,
            display_name: "Alice".to_string(),
            public_key: keypair.public_key,
            roles: vec!["author".to_string()],
            status: ActorStatus::Active,
            supersedes_id: None,
            superseded_by: None,
        };
        let checksum = payload_checksum(&payload).unwrap();
        let signature = sign(&generate_keypair(), &checksum, "human:alice", "author", "").unwrap();
        let envelope = Envelope::new(Header::new(RecordType::Actor, checksum, signature), payload);
        stores.actors.put("human:alice", &envelope).unwrap();
    }

    #[test]
    fn classifies_old_open_task_as_stalled() {
        let stores = stores();
        actor(&stores);
        let now = 2_000_000;
        let old_task_id = format!("{}-task-fix-the-bug", now - 20 * 86_400);
        put_task(&stores, &old_task_id, TaskStatus::Active);

        let config = ProjectorConfig::default();
        let view = project(&stores, &config, now).unwrap();

        assert_eq!(view.health.stalled_tasks, 1);
        assert_eq!(view.health.at_risk_tasks, 0);
        assert!(view.stalled_task_ids.iter().any(|id| id.as_str() == old_task_id));
    }

    #[test]
    fn classifies_moderately_old_open_task_as_at_risk() {
        let stores = stores();
        actor(&stores);
        let now = 2_000_000;
        let task_id = format!("{}-task-fix-the-bug", now - 10 * 86_400);
        put_task(&stores, &task_id, TaskStatus::Review);

        let config = ProjectorConfig::default();
        let view = project(&stores, &config, now).unwrap();

        assert_eq!(view.health.at_risk_tasks, 1);
        assert_eq!(view.health.stalled_tasks, 0);
    }

    #[test]
    fn done_tasks_are_never_stalled_regardless_of_age() {
        let stores = stores();
        actor(&stores);
        let now = 2_000_000;
        let task_id = format!("{}-task-fix-the-bug", now - 365 * 86_400);
        put_task(&stores, &task_id, TaskStatus::Done);

        let config = ProjectorConfig::default();
        let view = project(&stores, &config, now).unwrap();

        assert_eq!(view.health.stalled_tasks, 0);
        assert_eq!(view.health.at_risk_tasks, 0);
    }
}
