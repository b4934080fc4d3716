// gitgov-engine/tests/cycle_linkage.rs
// ============================================================================
// Module: Cycle Linkage Scenario Tests
// Description: End-to-end cycle/task linkage operations against a
//              filesystem-backed store bundle (§4.9, §313).
// ============================================================================

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    reason = "Test-only assertions are permitted."
)]

use gitgov_core::ActorKind;
use gitgov_core::ActorPayload;
use gitgov_core::ActorStatus;
use gitgov_core::Envelope;
use gitgov_core::Header;
use gitgov_core::RecordType;
use gitgov_core::generate_keypair;
use gitgov_core::payload_checksum;
use gitgov_core::sign;
use gitgov_engine::Signer;
use gitgov_engine::Stores;
use gitgov_engine::add_child_cycle;
use gitgov_engine::add_task_to_cycle;
use gitgov_engine::create_cycle;
use gitgov_engine::create_task;
use gitgov_engine::move_task_between_cycles;
use gitgov_engine::remove_task_from_cycle;
use gitgov_factory::NewCycleInput;
use gitgov_factory::NewTaskInput;
use gitgov_schema::SchemaRegistry;

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
fn linkage_round_trips_and_move_is_atomic() {
    let temp = tempfile::tempdir().unwrap();
    let stores = Stores::filesystem(temp.path());
    let registry = SchemaRegistry::new();
    let signer = author(&stores);

    let sprint_one = create_cycle(&stores, &registry, &signer, NewCycleInput::new("Sprint 1"), "author", "").unwrap();
    let sprint_two = create_cycle(&stores, &registry, &signer, NewCycleInput::new("Sprint 2"), "author", "").unwrap();
    let epic = create_cycle(&stores, &registry, &signer, NewCycleInput::new("Login Epic"), "author", "").unwrap();
    let task = create_task(
        &stores,
        &registry,
        &signer,
        NewTaskInput::new("Fix the login bug", "A clear repro and a fix."),
        "author",
        "",
    )
    .unwrap();

    add_child_cycle(&stores, &signer, &epic.payload.id, &sprint_one.payload.id, "author", "").unwrap();
    let epic = stores.cycles.get(epic.payload.id.as_str()).unwrap().unwrap();
    assert!(epic.payload.child_cycle_ids.contains(&sprint_one.payload.id));

    add_task_to_cycle(&stores, &signer, &sprint_one.payload.id, &task.payload.id, "author", "").unwrap();
    move_task_between_cycles(
        &stores,
        &signer,
        &sprint_one.payload.id,
        &sprint_two.payload.id,
        &task.payload.id,
        "author",
        "",
    )
    .unwrap();

    let sprint_one = stores.cycles.get(sprint_one.payload.id.as_str()).unwrap().unwrap();
    let sprint_two = stores.cycles.get(sprint_two.payload.id.as_str()).unwrap().unwrap();
    let task = stores.tasks.get(task.payload.id.as_str()).unwrap().unwrap();
    assert!(!sprint_one.payload.task_ids.contains(&task.payload.id));
    assert!(sprint_two.payload.task_ids.contains(&task.payload.id));
    assert_eq!(task.payload.cycle_ids, vec![sprint_two.payload.id.clone()]);

    remove_task_from_cycle(&stores, &signer, &sprint_two.payload.id, &task.payload.id, "author", "").unwrap();
    let sprint_two = stores.cycles.get(sprint_two.payload.id.as_str()).unwrap().unwrap();
    let task = stores.tasks.get(task.payload.id.as_str()).unwrap().unwrap();
    assert!(sprint_two.payload.task_ids.is_empty());
    assert!(task.payload.cycle_ids.is_empty());
}

#[test]
fn adding_an_already_linked_task_is_a_linkage_violation() {
    let temp = tempfile::tempdir().unwrap();
    let stores = Stores::filesystem(temp.path());
    let registry = SchemaRegistry::new();
    let signer = author(&stores);

    let cycle = create_cycle(&stores, &registry, &signer, NewCycleInput::new("Sprint 1"), "author", "").unwrap();
    let task = create_task(
        &stores,
        &registry,
        &signer,
        NewTaskInput::new("Fix the login bug", "A clear repro and a fix."),
        "author",
        "",
    )
    .unwrap();
    add_task_to_cycle(&stores, &signer, &cycle.payload.id, &task.payload.id, "author", "").unwrap();

    let result = add_task_to_cycle(&stores, &signer, &cycle.payload.id, &task.payload.id, "author", "");
    assert!(matches!(result, Err(gitgov_core::GitGovError::ProtocolViolation { .. })));
}
