// gitgov-engine/tests/projector.rs
// ============================================================================
// Module: Projector Scenario Tests
// Description: End-to-end derived-view computation over a filesystem-backed
//              store bundle (§4.10).
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
use gitgov_engine::ProjectorConfig;
use gitgov_engine::Signer;
use gitgov_engine::Stores;
use gitgov_engine::add_task_to_cycle;
use gitgov_engine::create_cycle;
use gitgov_engine::create_task;
use gitgov_engine::project;
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
fn cycle_rollup_counts_linked_tasks() {
    let temp = tempfile::tempdir().unwrap();
    let stores = Stores::filesystem(temp.path());
    let registry = SchemaRegistry::new();
    let signer = author(&stores);

    let cycle = create_cycle(&stores, &registry, &signer, NewCycleInput::new("Sprint 1"), "author", "").unwrap();
    let task_one = create_task(
        &stores,
        &registry,
        &signer,
        NewTaskInput::new("Fix the login bug", "A clear repro and a fix."),
        "author",
        "",
    )
    .unwrap();
    let task_two = create_task(
        &stores,
        &registry,
        &signer,
        NewTaskInput::new("Write the changelog", "Summarize the release notes."),
        "author",
        "",
    )
    .unwrap();
    add_task_to_cycle(&stores, &signer, &cycle.payload.id, &task_one.payload.id, "author", "").unwrap();
    add_task_to_cycle(&stores, &signer, &cycle.payload.id, &task_two.payload.id, "author", "").unwrap();

    let config = ProjectorConfig::default();
    let view = project(&stores, &config, 2_000_000_000).unwrap();

    let rollup = view.cycles.iter().find(|rollup| rollup.cycle_id == cycle.payload.id).unwrap();
    assert_eq!(rollup.total_tasks, 2);
    assert_eq!(view.health.total_tasks, 2);
}
