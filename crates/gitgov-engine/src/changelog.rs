// gitgov-engine/src/changelog.rs
// ============================================================================
// Module: Changelog Operations
// Description: Backlog engine operation over changelog records (§4.9).
// Purpose: Implement `createChangelog`.
// Dependencies: gitgov-core, gitgov-factory, gitgov-schema, crate::stores
// ============================================================================

//! ## Overview
//! Changelog entries are the audit trail other operations (status
//! transitions, linkage changes) may choose to append alongside their own
//! record mutation; this module only provides the single-store write
//! itself. `EVENT_CHANGELOG_CREATED`, which `pause -> active` checks for in
//! the default methodology, is derived by
//! [`crate::context::TaskTransitionContext`] scanning this store, not
//! tracked here.

// ============================================================================
// SECTION: Imports
// ============================================================================

use gitgov_core::ChangelogRecord;
use gitgov_core::GitGovResult;
use gitgov_factory::NewChangelogInput;
use gitgov_factory::build_changelog_envelope;
use gitgov_schema::SchemaRegistry;

use crate::stores::Signer;
use crate::stores::Stores;

// ============================================================================
// SECTION: Create
// ============================================================================

/// Builds, validates, signs, and persists a new changelog record.
///
/// # Errors
///
/// Returns [`gitgov_core::GitGovError::RequiredField`] or
/// [`gitgov_core::GitGovError::DetailedValidation`] when `input` fails
/// factory validation, or a store-specific I/O error.
pub fn create_changelog(
    stores: &Stores,
    registry: &SchemaRegistry,
    signer: &Signer,
    input: NewChangelogInput,
    role: &str,
    notes: &str,
) -> GitGovResult<ChangelogRecord> {
    let envelope = build_changelog_envelope(registry, input, &signer.keypair, signer.actor_id.as_str(), role, notes)?;
    stores.changelogs.put(envelope.payload.id.as_str(), &envelope)?;
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
    use gitgov_core::EntityType;
    use gitgov_core::Envelope;
    use gitgov_core::Header;
    use gitgov_core::RecordType;
    use gitgov_core::generate_keypair;
    use gitgov_factory::NewChangelogInput;
    use gitgov_store::InMemoryStore;

    use super::Stores;
    use super::create_changelog;
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
    fn create_changelog_persists_record() {
        let stores = stores();
        let registry = gitgov_schema::SchemaRegistry::new();
        let signer = author(&stores);
        let input = NewChangelogInput {
            id: None,
            entity_type: EntityType::Task,
            entity_id: "1752274500-task-t".to_string(),
            change_type: "status_transition".to_string(),
            title: "Task archived".to_string(),
            description: "Task moved from done to archived.".to_string(),
            triggered_by: "human:alice".into(),
            reason: "Completed and closed out.".to_string(),
        };
        let changelog = create_changelog(&stores, &registry, &signer, input, "author", "").unwrap();
        assert!(stores.changelogs.get(changelog.payload.id.as_str()).unwrap().is_some());
    }
}
