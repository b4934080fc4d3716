// gitgov-identity/src/succession.rs
// ============================================================================
// Module: Succession Resolution
// Description: Walks `supersededBy` chains to the terminal actor.
// Purpose: Give every signature-verification path a single, tested way to
//          turn a possibly-stale actor id into the effective identity.
// Dependencies: gitgov-core, gitgov-store
// ============================================================================

//! ## Overview
//! Key rotation is modeled as a linked list of actor records
//! (`supersedesId` / `supersededBy`, §9 "Succession chains"). A caller
//! holding a signature's `keyId` cannot assume that actor is still the
//! authoritative identity; it must follow `supersededBy` until it reaches an
//! actor whose `status` is `active`, or runs out of chain. This module
//! promotes that walk to a single tested operation rather than leaving it as
//! an exercise at each call site.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashSet;

use gitgov_core::ActorId;
use gitgov_core::ActorKind;
use gitgov_core::ActorPayload;
use gitgov_core::ActorStatus;
use gitgov_core::GitGovError;
use gitgov_core::GitGovResult;
use gitgov_store::Store;

// ============================================================================
// SECTION: Terminal Actor Resolution
// ============================================================================

/// Follows `supersededBy` from `id` until it reaches an actor with
/// `status = active`, or the chain ends — whichever comes first. Returns
/// whichever actor the walk ends on, active or not; callers that require an
/// active result check `status` themselves (see [`require_active_agent`]).
///
/// A chain that cycles back on itself (a data-corruption case the core
/// record layer does not prevent) is detected by tracking visited ids and
/// stops at the first repeat rather than looping forever.
///
/// # Errors
///
/// Returns [`GitGovError::RecordNotFound`] when `id` itself does not resolve
/// to an actor record, or a store-specific I/O error.
pub fn resolve_terminal_actor<S>(store: &S, id: &ActorId) -> GitGovResult<ActorPayload>
where
    S: Store<gitgov_core::ActorRecord>,
{
    let mut visited = HashSet::new();
    let mut current = load_actor(store, id)?;
    while current.status != ActorStatus::Active {
        let Some(next_id) = current.superseded_by.clone() else {
            break;
        };
        if !visited.insert(next_id.clone()) {
            break;
        }
        current = load_actor(store, &next_id)?;
    }
    Ok(current)
}

/// Loads a single actor payload by id, translating a missing record into
/// [`GitGovError::RecordNotFound`].
fn load_actor<S>(store: &S, id: &ActorId) -> GitGovResult<ActorPayload>
where
    S: Store<gitgov_core::ActorRecord>,
{
    store
        .get(id.as_str())?
        .map(|envelope| envelope.payload)
        .ok_or_else(|| GitGovError::RecordNotFound {
            record_type: "actor".to_string(),
            id: id.as_str().to_string(),
        })
}

/// Confirms `actor` is a terminal actor usable as an agent's effective
/// identity: `type = agent` and `status = active` (§4.7). Returns
/// [`GitGovError::ProtocolViolation`] otherwise, naming which requirement
/// failed.
///
/// # Errors
///
/// Returns [`GitGovError::ProtocolViolation`] when `actor` is not an active
/// agent.
pub fn require_active_agent(actor: &ActorPayload) -> GitGovResult<()> {
    if actor.kind != ActorKind::Agent {
        return Err(GitGovError::ProtocolViolation {
            violation_type: "not_an_agent".to_string(),
            message: format!("actor {} is not an agent identity", actor.id),
        });
    }
    if actor.status != ActorStatus::Active {
        return Err(GitGovError::ProtocolViolation {
            violation_type: "agent_not_active".to_string(),
            message: format!("agent actor {} is not active", actor.id),
        });
    }
    Ok(())
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
    use gitgov_core::Envelope;
    use gitgov_core::Header;
    use gitgov_core::RecordType;
    use gitgov_core::generate_keypair;
    use gitgov_core::payload_checksum;
    use gitgov_core::sign;
    use gitgov_store::InMemoryStore;

    use super::ActorPayload;
    use super::ActorStatus;
    use super::require_active_agent;
    use super::resolve_terminal_actor;

    fn actor(id: &str, status: ActorStatus, superseded_by: Option<&str>) -> ActorPayload {
        ActorPayload {
            id: id.into(),
            kind: ActorKind::Human,
            display_name: id.to_string(),
            public_key: "A".repeat(44),
            roles: vec!["author".to_string()],
            status,
            supersedes_id: None,
            superseded_by: superseded_by.map(Into::into),
        }
    }

    fn store_with(store: &InMemoryStore<gitgov_core::ActorRecord>, payload: ActorPayload) {
        let checksum = payload_checksum(&payload).unwrap();
        let keypair = generate_keypair();
        let signature = sign(&keypair, &checksum, payload.id.as_str(), "author", "").unwrap();
        let id = payload.id.as_str().to_string();
        let envelope = Envelope::new(Header::new(RecordType::Actor, checksum, signature), payload);
        store.put(&id, &envelope).unwrap();
    }

    #[test]
    fn active_actor_resolves_to_itself() {
        let store: InMemoryStore<gitgov_core::ActorRecord> = InMemoryStore::new();
        store_with(&store, actor("human:alice", ActorStatus::Active, None));
        let resolved = resolve_terminal_actor(&store, &"human:alice".into()).unwrap();
        assert_eq!(resolved.id.as_str(), "human:alice");
    }

    #[test]
    fn revoked_actor_follows_to_active_successor() {
        let store: InMemoryStore<gitgov_core::ActorRecord> = InMemoryStore::new();
        store_with(
            &store,
            actor("human:alice-old", ActorStatus::Revoked, Some("human:alice-new")),
        );
        store_with(&store, actor("human:alice-new", ActorStatus::Active, None));
        let resolved = resolve_terminal_actor(&store, &"human:alice-old".into()).unwrap();
        assert_eq!(resolved.id.as_str(), "human:alice-new");
        assert_eq!(resolved.status, ActorStatus::Active);
    }

    #[test]
    fn chain_that_runs_out_returns_last_revoked_actor() {
        let store: InMemoryStore<gitgov_core::ActorRecord> = InMemoryStore::new();
        store_with(&store, actor("human:alice-old", ActorStatus::Revoked, None));
        let resolved = resolve_terminal_actor(&store, &"human:alice-old".into()).unwrap();
        assert_eq!(resolved.status, ActorStatus::Revoked);
    }

    #[test]
    fn unknown_starting_id_is_an_error() {
        let store: InMemoryStore<gitgov_core::ActorRecord> = InMemoryStore::new();
        assert!(resolve_terminal_actor(&store, &"human:ghost".into()).is_err());
    }

    #[test]
    fn require_active_agent_rejects_human_actor() {
        let human = actor("human:alice", ActorStatus::Active, None);
        assert!(require_active_agent(&human).is_err());
    }
}
