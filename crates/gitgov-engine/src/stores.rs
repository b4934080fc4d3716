// gitgov-engine/src/stores.rs
// ============================================================================
// Module: Store Bundle
// Description: The seven record stores the backlog engine reads and writes,
//              plus the signing identity behind every mutation.
// Purpose: Give every engine operation one struct to borrow instead of
//          threading seven individual stores through each function.
// Dependencies: gitgov-core, gitgov-store, gitgov-identity
// ============================================================================

//! ## Overview
//! The engine is generic over nothing: it always operates on the seven
//! record types the protocol defines, each behind the same [`Store`] seam.
//! [`Stores::filesystem`] wires up the on-disk `.gitgov/<kind>/` layout
//! directly (plural directory names: `actors/`, `agents/`, `tasks/`,
//! `cycles/`, `executions/`, `changelogs/`, `feedback/`); front-ends that
//! want an in-memory engine (tests, a dry-run mode) build a [`Stores`] from
//! [`gitgov_store::InMemoryStore`] instead.
//!
//! [`Signer::from_current_actor`] is the engine's C8 wiring point: it
//! resolves a loaded session against this bundle's actor store and checks
//! the caller's keypair actually belongs to that actor before handing back
//! a [`Signer`] any mutating operation can use.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::Path;
use std::sync::Arc;

use gitgov_core::ActorId;
use gitgov_core::ActorRecord;
use gitgov_core::AgentRecord;
use gitgov_core::ChangelogRecord;
use gitgov_core::CycleRecord;
use gitgov_core::ExecutionRecord;
use gitgov_core::FeedbackRecord;
use gitgov_core::Keypair;
use gitgov_core::TaskRecord;
use gitgov_store::FilesystemStore;
use gitgov_store::Store;

// ============================================================================
// SECTION: Store Bundle
// ============================================================================

/// The seven record stores a backlog engine operates over.
pub struct Stores {
    /// Actor identity records.
    pub actors: Arc<dyn Store<ActorRecord> + Send + Sync>,
    /// Agent operational configuration records.
    pub agents: Arc<dyn Store<AgentRecord> + Send + Sync>,
    /// Task records.
    pub tasks: Arc<dyn Store<TaskRecord> + Send + Sync>,
    /// Cycle records.
    pub cycles: Arc<dyn Store<CycleRecord> + Send + Sync>,
    /// Execution records.
    pub executions: Arc<dyn Store<ExecutionRecord> + Send + Sync>,
    /// Changelog records.
    pub changelogs: Arc<dyn Store<ChangelogRecord> + Send + Sync>,
    /// Feedback records.
    pub feedback: Arc<dyn Store<FeedbackRecord> + Send + Sync>,
}

impl Stores {
    /// Builds a store bundle from seven already-constructed backends. Used
    /// by callers wiring in-memory stores (tests) or a mix of backends.
    #[must_use]
    pub fn new(
        actors: Arc<dyn Store<ActorRecord> + Send + Sync>,
        agents: Arc<dyn Store<AgentRecord> + Send + Sync>,
        tasks: Arc<dyn Store<TaskRecord> + Send + Sync>,
        cycles: Arc<dyn Store<CycleRecord> + Send + Sync>,
        executions: Arc<dyn Store<ExecutionRecord> + Send + Sync>,
        changelogs: Arc<dyn Store<ChangelogRecord> + Send + Sync>,
        feedback: Arc<dyn Store<FeedbackRecord> + Send + Sync>,
    ) -> Self {
        Self {
            actors,
            agents,
            tasks,
            cycles,
            executions,
            changelogs,
            feedback,
        }
    }

    /// Builds a store bundle rooted at `base_path`, one `FilesystemStore`
    /// subdirectory per record kind (`base_path/actors`, `base_path/tasks`,
    /// ...), matching the `.gitgov/actors/<actorId>.json`-style layout.
    #[must_use]
    pub fn filesystem(base_path: &Path) -> Self {
        Self {
            actors: Arc::new(FilesystemStore::new(base_path.join("actors"))),
            agents: Arc::new(FilesystemStore::new(base_path.join("agents"))),
            tasks: Arc::new(FilesystemStore::new(base_path.join("tasks"))),
            cycles: Arc::new(FilesystemStore::new(base_path.join("cycles"))),
            executions: Arc::new(FilesystemStore::new(base_path.join("executions"))),
            changelogs: Arc::new(FilesystemStore::new(base_path.join("changelogs"))),
            feedback: Arc::new(FilesystemStore::new(base_path.join("feedback"))),
        }
    }
}

// ============================================================================
// SECTION: Signer
// ============================================================================

/// The identity behind a mutating engine call: which actor is acting, and
/// the keypair used to sign the resulting envelope.
pub struct Signer {
    /// The id of the actor performing the operation.
    pub actor_id: ActorId,
    /// The keypair backing that actor's signature.
    pub keypair: Keypair,
}

impl Signer {
    /// Pairs an actor id with the keypair it signs under.
    #[must_use]
    pub const fn new(actor_id: ActorId, keypair: Keypair) -> Self {
        Self {
            actor_id,
            keypair,
        }
    }

    /// Resolves the current actor named by `session` against `stores.actors`
    /// and pairs it with `keypair`, the wiring between C8 (current-actor
    /// resolution) and every C10 operation's signer argument.
    ///
    /// This inlines [`gitgov_identity::session::get_current_actor`]'s
    /// lookup rather than calling it directly: that function is generic
    /// over `S: Store<ActorRecord>`, and `stores.actors` is a trait object
    /// (`Arc<dyn Store<ActorRecord> + Send + Sync>`) with no blanket `Store`
    /// impl to satisfy that bound.
    ///
    /// # Errors
    ///
    /// Returns [`GitGovError::RecordNotFound`] when the session's actor id
    /// has no corresponding record, or
    /// [`GitGovError::SignatureVerification`] when `keypair`'s public half
    /// does not match the resolved actor's recorded public key.
    pub fn from_current_actor(
        stores: &Stores,
        session: &gitgov_identity::SessionState,
        keypair: Keypair,
    ) -> gitgov_core::GitGovResult<Self> {
        let actor_id = session.current_actor_id.clone();
        let actor = stores
            .actors
            .get(actor_id.as_str())?
            .ok_or_else(|| gitgov_core::GitGovError::RecordNotFound {
                record_type: "actor".to_string(),
                id: actor_id.as_str().to_string(),
            })?
            .payload;
        if actor.public_key != keypair.public_key {
            return Err(gitgov_core::GitGovError::SignatureVerification {
                key_id: actor_id.as_str().to_string(),
                reason: "supplied keypair does not match the resolved actor's recorded public key".to_string(),
            });
        }
        Ok(Self::new(actor_id, keypair))
    }
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
    use gitgov_identity::SessionState;
    use gitgov_store::InMemoryStore;

    use super::Signer;
    use super::Stores;

    fn stores() -> Stores {
        Stores::new(
            std::sync::Arc::new(InMemoryStore::new()),
            std::sync::Arc::new(InMemoryStore::new()),
            std::sync::Arc::new(InMemoryStore::new()),
            std::sync::Arc::new(InMemoryStore::new()),
            std::sync::Arc::new(InMemoryStore::new()),
            std::sync::Arc::new(InMemoryStore::new()),
            std::sync::Arc::new(InMemoryStore::new()),
        )
    }

    fn put_actor(stores: &Stores, keypair: &gitgov_core::Keypair) {
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
        let signature = sign(keypair, &checksum, "human:alice", "author", "").unwrap();
        let envelope = Envelope::new(Header::new(RecordType::Actor, checksum, signature), payload);
        stores.actors.put("human:alice", &envelope).unwrap();
    }

    #[test]
    fn from_current_actor_resolves_a_matching_keypair() {
        let stores = stores();
        let keypair = generate_keypair();
        put_actor(&stores, &keypair);
        let session = SessionState::new("human:alice".into());

        let signer = Signer::from_current_actor(&stores, &session, keypair).unwrap();
        assert_eq!(signer.actor_id.as_str(), "human:alice");
    }

    #[test]
    fn from_current_actor_rejects_an_unresolvable_session() {
        let stores = stores();
        let session = SessionState::new("human:ghost".into());

        let result = Signer::from_current_actor(&stores, &session, generate_keypair());
        assert!(matches!(result, Err(GitGovError::RecordNotFound { .. })));
    }

    #[test]
    fn from_current_actor_rejects_a_mismatched_keypair() {
        let stores = stores();
        put_actor(&stores, &generate_keypair());
        let session = SessionState::new("human:alice".into());

        let result = Signer::from_current_actor(&stores, &session, generate_keypair());
        assert!(matches!(result, Err(GitGovError::SignatureVerification { .. })));
    }
}
