// gitgov-identity/src/error.rs
// ============================================================================
// Module: Identity Errors
// Description: Session-loading failures specific to this crate.
// Purpose: Give session lookup a precise error before composing it into the
//          shared `GitGovError` taxonomy.
// Dependencies: gitgov-core, thiserror
// ============================================================================

//! ## Overview
//! Most of this crate's public operations return
//! [`gitgov_core::GitGovResult`] directly, reusing the shared taxonomy's
//! `RecordNotFound` and `ProjectRoot` variants. `IdentityError` exists only
//! for the one failure mode the shared taxonomy has no dedicated shape for:
//! a missing or malformed `.session.json`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use gitgov_core::GitGovError;
use thiserror::Error;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while loading or interpreting session state.
#[derive(Debug, Error)]
pub enum IdentityError {
    /// No `.session.json` was found at the expected path.
    #[error("no session file at {path}")]
    SessionNotFound {
        /// The path that was checked.
        path: String,
    },
    /// `.session.json` existed but did not parse as valid session state.
    #[error("session file at {path} is malformed: {reason}")]
    SessionMalformed {
        /// The path that was checked.
        path: String,
        /// The underlying parse failure.
        reason: String,
    },
}

impl From<IdentityError> for GitGovError {
    fn from(err: IdentityError) -> Self {
        Self::ProjectRoot {
            message: err.to_string(),
        }
    }
}
