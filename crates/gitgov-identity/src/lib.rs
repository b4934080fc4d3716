// gitgov-identity/src/lib.rs
// ============================================================================
// Module: GitGovernance Identity Library
// Description: Current-actor resolution, succession-chain walking, and
//              public-key lookup.
// Purpose: Implement the identity & key provider component (C8): "who is
//          acting" and "whose key is this".
// Dependencies: gitgov-core, gitgov-store
// ============================================================================

//! ## Overview
//! Three concerns live here, each grounded in §4.7:
//!
//! - [`session`] resolves `getCurrentActor()` from `.session.json`.
//! - [`succession`] resolves the terminal actor at the end of a
//!   `supersededBy` chain, and checks an agent's effective identity is both
//!   `type = agent` and `status = active`.
//! - [`keys`] resolves `getPublicKey(keyId)` and adapts it to
//!   [`gitgov_core::PublicKeyResolver`] for `gitgov-schema`'s signature
//!   verification.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod error;
pub mod keys;
pub mod session;
pub mod succession;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use error::IdentityError;
pub use keys::ActorKeyResolver;
pub use keys::get_public_key;
pub use session::SessionState;
pub use session::get_current_actor;
pub use session::load_session;
pub use succession::require_active_agent;
pub use succession::resolve_terminal_actor;
