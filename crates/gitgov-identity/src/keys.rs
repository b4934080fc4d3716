// gitgov-identity/src/keys.rs
// ============================================================================
// Module: Key Provider
// Description: Resolves a signer's public key by `keyId` for signature
//              verification.
// Purpose: Implement `getPublicKey(keyId)` (§4.7) and adapt it to
//          `gitgov_core::PublicKeyResolver` so `gitgov-schema`'s validators
//          can use it directly.
// Dependencies: gitgov-core, gitgov-store
// ============================================================================

//! ## Overview
//! A `keyId` is exactly an [`gitgov_core::ActorId`] string; looking up a
//! public key is looking up the actor record and reading its `publicKey`
//! field. This does not consult succession or actor status — verifying a
//! historical signature must resolve the key that produced it, regardless of
//! whether that actor has since been revoked or superseded. Whether a
//! revoked signer's authorization still *counts* is a workflow-layer
//! decision (C9), not a key-resolution one.

// ============================================================================
// SECTION: Imports
// ============================================================================

use gitgov_core::GitGovResult;
use gitgov_core::PublicKeyResolver;
use gitgov_store::Store;

// ============================================================================
// SECTION: Standalone Lookup
// ============================================================================

/// Looks up the base64 public key for `key_id` directly in `store`.
///
/// # Errors
///
/// Returns a store-specific I/O error. A missing actor is not an error; it
/// surfaces as `Ok(None)`, matching §4.7's "base64 | null" return shape.
pub fn get_public_key<S>(store: &S, key_id: &str) -> GitGovResult<Option<String>>
where
    S: Store<gitgov_core::ActorRecord>,
{
    Ok(store.get(key_id)?.map(|envelope| envelope.payload.public_key))
}

// ============================================================================
// SECTION: Resolver Adapter
// ============================================================================

/// Adapts a `Store<ActorRecord>` into a [`PublicKeyResolver`], so
/// `gitgov-schema`'s signature verification can resolve keys without
/// depending on this crate's store-specific lookup function directly.
pub struct ActorKeyResolver<'store, S> {
    /// The actor store backing key resolution.
    store: &'store S,
}

impl<'store, S> ActorKeyResolver<'store, S>
where
    S: Store<gitgov_core::ActorRecord>,
{
    /// Wraps `store` as a key resolver.
    #[must_use]
    pub const fn new(store: &'store S) -> Self {
        Self { store }
    }
}

impl<S> PublicKeyResolver for ActorKeyResolver<'_, S>
where
    S: Store<gitgov_core::ActorRecord>,
{
    fn resolve_public_key(&self, key_id: &str) -> Option<String> {
        get_public_key(self.store, key_id).ok().flatten()
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
    use gitgov_core::Header;
    use gitgov_core::PublicKeyResolver;
    use gitgov_core::RecordType;
    use gitgov_core::generate_keypair;
    use gitgov_core::payload_checksum;
    use gitgov_core::sign;
    use gitgov_store::InMemoryStore;

    use super::ActorKeyResolver;
    use super::get_public_key;

    fn store_with_alice() -> InMemoryStore<gitgov_core::ActorRecord> {
        let store = InMemoryStore::new();
        let payload = ActorPayload {
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
        let envelope = Envelope::new(Header::new(RecordType::Actor, checksum, signature), payload);
        store.put("human:alice", &envelope).unwrap();
        store
    }

    #[test]
    fn get_public_key_resolves_known_actor() {
        let store = store_with_alice();
        let key = get_public_key(&store, "human:alice").unwrap();
        assert_eq!(key, Some("A".repeat(44)));
    }

    #[test]
    fn get_public_key_returns_none_for_unknown_actor() {
        let store = store_with_alice();
        assert_eq!(get_public_key(&store, "human:ghost").unwrap(), None);
    }

    #[test]
    fn resolver_adapter_matches_standalone_lookup() {
        let store = store_with_alice();
        let resolver = ActorKeyResolver::new(&store);
        assert_eq!(resolver.resolve_public_key("human:alice"), Some("A".repeat(44)));
        assert_eq!(resolver.resolve_public_key("human:ghost"), None);
    }
}
