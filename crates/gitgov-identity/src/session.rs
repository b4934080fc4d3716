// gitgov-identity/src/session.rs
// ============================================================================
// Module: Session State
// Description: Loads `.session.json` and resolves the actor it names.
// Purpose: Implement `getCurrentActor()` — the current-actor side of the
//          identity & key provider component (C8).
// Dependencies: gitgov-core, gitgov-store, serde_json, std::fs
// ============================================================================

//! ## Overview
//! GitGovernance has no ambient notion of "who is running this" the way a
//! Unix process has a uid; `.session.json` at the project root is the only
//! source of truth, written by whichever front-end last authenticated an
//! actor. Failure to resolve a current actor is an error condition, not a
//! silent anonymous fallback (§4.7).

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;

use gitgov_core::ActorId;
use gitgov_core::ActorPayload;
use gitgov_core::GitGovError;
use gitgov_core::GitGovResult;
use gitgov_store::Store;
use serde::Deserialize;
use serde::Serialize;

use crate::error::IdentityError;

// ============================================================================
// SECTION: Session State
// ============================================================================

/// The contents of `.session.json`: which actor is currently acting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    /// The id of the actor this session is authenticated as.
    #[serde(rename = "currentActorId")]
    pub current_actor_id: ActorId,
}

impl SessionState {
    /// Builds a session pinned to `actor_id`.
    #[must_use]
    pub const fn new(actor_id: ActorId) -> Self {
        Self {
            current_actor_id: actor_id,
        }
    }
}

// ============================================================================
// SECTION: Loading
// ============================================================================

/// Reads and parses `.session.json` from `path`.
///
/// # Errors
///
/// Returns [`GitGovError::ProjectRoot`] when `path` does not exist or its
/// contents do not parse as [`SessionState`].
pub fn load_session(path: &Path) -> GitGovResult<SessionState> {
    let content = fs::read_to_string(path).map_err(|_| IdentityError::SessionNotFound {
        path: path.display().to_string(),
    })?;
    serde_json::from_str(&content)
        .map_err(|err| IdentityError::SessionMalformed {
            path: path.display().to_string(),
            reason: err.to_string(),
        })
        .map_err(GitGovError::from)
}

// ============================================================================
// SECTION: Current Actor
// ============================================================================

/// Resolves the actor named by `session` from `store`.
///
/// This returns exactly the actor the session names; it does not follow
/// succession chains. Callers that need the effective (possibly rotated)
/// identity should pass the result through
/// [`crate::succession::resolve_terminal_actor`].
///
/// # Errors
///
/// Returns [`GitGovError::RecordNotFound`] when the session's actor id has
/// no corresponding record in `store`, or a store-specific I/O error.
pub fn get_current_actor<S>(store: &S, session: &SessionState) -> GitGovResult<ActorPayload>
where
    S: Store<gitgov_core::ActorRecord>,
{
    let id = session.current_actor_id.as_str();
    store
        .get(id)?
        .map(|envelope| envelope.payload)
        .ok_or_else(|| GitGovError::RecordNotFound {
            record_type: "actor".to_string(),
            id: id.to_string(),
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
    use gitgov_core::ActorKind;
    use gitgov_core::ActorStatus;
    use gitgov_core::Envelope;
    use gitgov_core::Header;
    use gitgov_core::RecordType;
    use gitgov_core::generate_keypair;
    use gitgov_core::payload_checksum;
    use gitgov_core::sign;
    use gitgov_store::InMemoryStore;
    use tempfile::tempdir;

    use super::SessionState;
    use super::get_current_actor;
    use super::load_session;

    fn sample_envelope() -> gitgov_core::ActorRecord {
        let payload = gitgov_core::ActorPayload {
            id: "human:alice".into(),
            kind: ActorKind::Human,
            display_name: "Alice".to_string(),
            public_key: "A".repeat(44),
            roles: vec!["author".to_string()],
            status: ActorStatus::Active,
            supersedes_id: None,
            superseded_by: None,
        };
        let checksum = payload_checksum(&payload).unwrap();
        let keypair = generate_keypair();
        let signature = sign(&keypair, &checksum, "human:alice", "author", "").unwrap();
        Envelope::new(Header::new(RecordType::Actor, checksum, signature), payload)
    }

    #[test]
    fn load_session_round_trips_through_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".session.json");
        std::fs::write(&path, r#"{"currentActorId":"human:alice"}"#).unwrap();
        let session = load_session(&path).unwrap();
        assert_eq!(session.current_actor_id, "human:alice".into());
    }

    #[test]
    fn load_session_missing_file_is_an_error() {
        let dir = tempdir().unwrap();
        assert!(load_session(&dir.path().join(".session.json")).is_err());
    }

    #[test]
    fn get_current_actor_resolves_from_store() {
        let store: InMemoryStore<gitgov_core::ActorRecord> = InMemoryStore::new();
        store.put("human:alice", &sample_envelope()).unwrap();
        let session = SessionState::new("human:alice".into());
        let actor = get_current_actor(&store, &session).unwrap();
        assert_eq!(actor.display_name, "Alice");
    }

    #[test]
    fn get_current_actor_errors_when_unresolved() {
        let store: InMemoryStore<gitgov_core::ActorRecord> = InMemoryStore::new();
        let session = SessionState::new("human:ghost".into());
        assert!(get_current_actor(&store, &session).is_err());
    }
}
