// gitgov-engine/src/execution.rs
// ============================================================================
// Module: Execution Operations
// Description: Backlog engine operation over execution records (§4.9).
// Purpose: Implement `createExecution`.
// Dependencies: gitgov-core, gitgov-factory, gitgov-schema, crate::stores
// ============================================================================

//! ## Overview
//! An execution record is a leaf: it references a task but nothing
//! references it back, so creating one is a single-store write, no linkage
//! to maintain. The `EVENT_FIRST_EXECUTION_CREATED` event the default
//! methodology checks before `activateTask` is derived by
//! [`crate::context::TaskTransitionContext`] scanning the execution store,
//! not tracked here.

// ============================================================================
// SECTION: Imports
// ============================================================================

use gitgov_core::ExecutionRecord;
use gitgov_core::GitGovResult;
use gitgov_factory::NewExecutionInput;
use gitgov_factory::build_execution_envelope;
use gitgov_schema::SchemaRegistry;

use crate::stores::Signer;
use crate::stores::Stores;

// ============================================================================
// SECTION: Create
// ============================================================================

/// Builds, validates, signs, and persists a new execution record.
///
/// # Errors
///
/// Returns [`gitgov_core::GitGovError::RequiredField`] or
/// [`gitgov_core::GitGovError::DetailedValidation`] when `input` fails
/// factory validation, or a store-specific I/O error.
pub fn create_execution(
    stores: &Stores,
    registry: &SchemaRegistry,
    signer: &Signer,
    input: NewExecutionInput,
    role: &str,
    notes: &str,
) -> GitGovResult<ExecutionRecord> {
    let envelope = build_execution_envelope(registry, input, &signer.keypair, signer.actor_id.as_str(), role, notes)?;
    stores.executions.put(envelope.payload.id.as_str(), &envelope)?;
    Ok(envelope)
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
    use gitgov_core::ExecutionPayload;
    use gitgov_core::Header;
    use gitgov_core::RecordType;
    use gitgov_core::generate_keypair;
    use gitgov_store::InMemoryStore;

    use super::Stores;
    use super::create_execution;
    use crate::stores::Signer;

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
    fn create_execution_persists_record() {
        let stores = stores();
        let registry = gitgov_schema::SchemaRegistry::new();
        let signer = author(&stores);
        let input = gitgov_factory::NewExecutionInput::new(
            "1752274500-task-t".into(),
            ExecutionPayload::KIND_PROGRESS,
            "Initial progress",
            "Implemented the first pass.",
        );
        let execution = create_execution(&stores, &registry, &signer, input, "author", "").unwrap();
        assert!(stores.executions.get(execution.payload.id.as_str()).unwrap().is_some());
    }
}
