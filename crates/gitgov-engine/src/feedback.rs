// gitgov-engine/src/feedback.rs
// ============================================================================
// Module: Feedback Operations
// Description: Backlog engine operations over feedback records (§4.9).
// Purpose: Implement `createFeedback` and feedback resolution.
// Dependencies: gitgov-core, gitgov-factory, gitgov-schema, crate::stores
// ============================================================================

//! ## Overview
//! Feedback is append-only: resolving a feedback record never mutates the
//! original, it creates a new record whose `resolvesFeedbackId` points back
//! at it (§4.5). [`resolve_feedback`] is a thin convenience over
//! [`create_feedback`] that fills in that pointer and forces
//! `status = resolved`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use gitgov_core::FeedbackId;
use gitgov_core::FeedbackRecord;
use gitgov_core::FeedbackStatus;
use gitgov_core::GitGovResult;
use gitgov_factory::NewFeedbackInput;
use gitgov_factory::build_feedback_envelope;
use gitgov_schema::SchemaRegistry;

use crate::stores::Signer;
use crate::stores::Stores;

// ============================================================================
// SECTION: Create
// ============================================================================

/// Builds, validates, signs, and persists a new feedback record.
///
/// # Errors
///
/// Returns [`gitgov_core::GitGovError::RequiredField`] or
/// [`gitgov_core::GitGovError::DetailedValidation`] when `input` fails
/// factory validation, or a store-specific I/O error.
pub fn create_feedback(
    stores: &Stores,
    registry: &SchemaRegistry,
    signer: &Signer,
    input: NewFeedbackInput,
    role: &str,
    notes: &str,
) -> GitGovResult<FeedbackRecord> {
    let envelope = build_feedback_envelope(registry, input, &signer.keypair, signer.actor_id.as_str(), role, notes)?;
    stores.feedback.put(envelope.payload.id.as_str(), &envelope)?;
    Ok(envelope)
}

/// Resolves `resolved_id` by creating a new feedback record against the
/// same entity, pointing back at it via `resolvesFeedbackId`, leaving the
/// original untouched.
///
/// # Errors
///
/// See [`create_feedback`].
pub fn resolve_feedback(
    stores: &Stores,
    registry: &SchemaRegistry,
    signer: &Signer,
    resolved_id: &FeedbackId,
    mut input: NewFeedbackInput,
    role: &str,
    notes: &str,
) -> GitGovResult<FeedbackRecord> {
    input.status = Some(FeedbackStatus::Resolved);
    input.resolves_feedback_id = Some(resolved_id.clone());
    create_feedback(stores, registry, signer, input, role, notes)
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
    use gitgov_core::EntityType;
    use gitgov_core::Envelope;
    use gitgov_core::Header;
    use gitgov_core::RecordType;
    use gitgov_core::generate_keypair;
    use gitgov_store::InMemoryStore;

    use super::Stores;
    use super::create_feedback;
    use super::resolve_feedback;
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
    fn resolve_feedback_creates_new_record_pointing_back() {
        let stores = stores();
        let registry = gitgov_schema::SchemaRegistry::new();
        let signer = author(&stores);
        let original = create_feedback(
            &stores,
            &registry,
            &signer,
            gitgov_factory::NewFeedbackInput::new(EntityType::Task, "1752274500-task-t", "What about X?"),
            "author",
            "",
        )
        .unwrap();

        let resolution = resolve_feedback(
            &stores,
            &registry,
            &signer,
            &original.payload.id,
            gitgov_factory::NewFeedbackInput::new(EntityType::Task, "1752274500-task-t", "Resolved: we do Y."),
            "author",
            "",
        )
        .unwrap();

        assert_eq!(resolution.payload.resolves_feedback_id, Some(original.payload.id.clone()));
        assert_eq!(resolution.payload.status, gitgov_core::FeedbackStatus::Resolved);
        assert!(stores.feedback.get(original.payload.id.as_str()).unwrap().is_some());
    }
}
