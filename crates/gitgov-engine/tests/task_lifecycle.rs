// gitgov-engine/tests/task_lifecycle.rs
// ============================================================================
// Module: Task Lifecycle Scenario Tests
// Description: End-to-end task operations against a filesystem-backed
//              store bundle, mirroring the concrete scenarios in §8.
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
use gitgov_core::GitGovError;
use gitgov_core::Header;
use gitgov_core::RecordType;
use gitgov_core::TaskStatus;
use gitgov_core::generate_keypair;
use gitgov_core::payload_checksum;
use gitgov_core::sign;
use gitgov_engine::Signer;
use gitgov_engine::Stores;
use gitgov_engine::activate_task;
use gitgov_engine::approve_task;
use gitgov_engine::complete_task;
use gitgov_engine::create_task;
use gitgov_engine::delete_task;
use gitgov_engine::submit_task;
use gitgov_factory::NewTaskInput;
use gitgov_schema::SchemaRegistry;
use gitgov_workflow::default_methodology;

fn register(stores: &Stores, display_name: &str, roles: &[&str]) -> Signer {
    let keypair = generate_keypair();
    let id = format!("human:{}", display_name.to_lowercase().replace(' ', "-"));
    let payload = ActorPayload {
        id: id.clone().into(),
        kind: ActorKind::Human,
        display_name: display_name.to_string(),
        public_key: keypair.public_key.clone(),
        roles: roles.iter().map(|role| (*role).to_string()).collect(),
        status: ActorStatus::Active,
        supersedes_id: None,
        superseded_by: None,
    };
    let checksum = payload_checksum(&payload).unwrap();
    let signature = sign(&keypair, &checksum, &id, "author", "").unwrap();
    let envelope = Envelope::new(Header::new(RecordType::Actor, checksum, signature), payload);
    stores.actors.put(&id, &envelope).unwrap();
    Signer::new(id.into(), keypair)
}

#[test]
fn task_moves_from_draft_to_done_with_the_required_signatures() {
    let temp = tempfile::tempdir().unwrap();
    let stores = Stores::filesystem(temp.path());
    let registry = SchemaRegistry::new();
    let methodology = default_methodology();

    let author = register(&stores, "Alice", &["author"]);
    let approver = register(&stores, "Bob", &["approver:design"]);
    let quality = register(&stores, "Carol", &["approver:quality"]);

    let task = create_task(
        &stores,
        &registry,
        &author,
        NewTaskInput::new("Fix the login bug", "A clear repro and a fix."),
        "author",
        "initial draft",
    )
    .unwrap();
    assert_eq!(task.payload.status, TaskStatus::Draft);

    let submitted = submit_task(&stores, &methodology, &author, &task.payload.id, "ready for review").unwrap();
    assert_eq!(submitted.payload.status, TaskStatus::Review);

    let approved =
        approve_task(&stores, &methodology, &approver, &task.payload.id, "approver:design", "looks good").unwrap();
    assert_eq!(approved.payload.status, TaskStatus::Ready);

    // Not yet eligible for activation: no execution or assignment recorded yet.
    let blocked = activate_task(&stores, &methodology, &author, &task.payload.id, "author", "");
    assert!(matches!(blocked, Err(GitGovError::ProtocolViolation { .. })));

    gitgov_engine::create_execution(
        &stores,
        &registry,
        &author,
        gitgov_factory::NewExecutionInput::new(
            task.payload.id.clone(),
            gitgov_core::ExecutionPayload::KIND_PROGRESS,
            "Started work",
            "Reproduced the bug locally.",
        ),
        "author",
        "",
    )
    .unwrap();
    let mut assignment =
        gitgov_factory::NewFeedbackInput::new(gitgov_core::EntityType::Task, task.payload.id.as_str(), "Assigned to Alice.");
    assignment.kind = Some(gitgov_core::FeedbackType::Assignment);
    assignment.assignee = Some(author.actor_id.clone());
    gitgov_engine::create_feedback(&stores, &registry, &author, assignment, "author", "").unwrap();

    let activated = activate_task(&stores, &methodology, &author, &task.payload.id, "author", "").unwrap();
    assert_eq!(activated.payload.status, TaskStatus::Active);

    let completed =
        complete_task(&stores, &methodology, &quality, &task.payload.id, "approver:quality", "shipped").unwrap();
    assert_eq!(completed.payload.status, TaskStatus::Done);
}

#[test]
fn delete_task_is_restricted_to_draft_and_its_own_creator() {
    let temp = tempfile::tempdir().unwrap();
    let stores = Stores::filesystem(temp.path());
    let registry = SchemaRegistry::new();
    let methodology = default_methodology();

    let author = register(&stores, "Alice", &["author"]);
    let stranger = register(&stores, "Eve", &["author"]);

    let task = create_task(
        &stores,
        &registry,
        &author,
        NewTaskInput::new("Fix the login bug", "A clear repro and a fix."),
        "author",
        "",
    )
    .unwrap();

    let denied = delete_task(&stores, &methodology, &stranger, &task.payload.id);
    assert!(matches!(denied, Err(GitGovError::ProtocolViolation { .. })));

    let discarded = delete_task(&stores, &methodology, &author, &task.payload.id).unwrap();
    assert_eq!(discarded.payload.status, TaskStatus::Discarded);
}
