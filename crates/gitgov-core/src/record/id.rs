// gitgov-core/src/record/id.rs
// ============================================================================
// Module: Record Identifiers
// Description: Canonical opaque identifiers for GitGovernance records.
// Purpose: Provide strongly typed, serializable IDs with stable string forms.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Identifiers are opaque, serialize as plain strings, and carry no
//! validation of their own — a timestamped id looks like
//! `{unix-seconds}-{type}-{slug}` and an actor id looks like
//! `{human|agent}:{slug}`, but enforcing that shape is a factory concern
//! (see `gitgov-factory`), not a concern of the wrapper type itself.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Macro
// ============================================================================

/// Declares a transparent, string-backed identifier newtype.
macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier from any string-like value.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Returns the identifier as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consumes the identifier, returning the inner `String`.
            #[must_use]
            pub fn into_string(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::new(value)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self::new(value)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

// ============================================================================
// SECTION: Identifier Types
// ============================================================================

record_id!(
    /// Identifier of an actor record (`{human|agent}:{slug}`).
    ActorId
);
record_id!(
    /// Identifier of an agent record; must match an [`ActorId`] of type agent.
    AgentId
);
record_id!(
    /// Identifier of a task record (`{unix-seconds}-task-{slug}`).
    TaskId
);
record_id!(
    /// Identifier of a cycle record (`{unix-seconds}-cycle-{slug}`).
    CycleId
);
record_id!(
    /// Identifier of an execution record (`{unix-seconds}-execution-{slug}`).
    ExecutionId
);
record_id!(
    /// Identifier of a changelog record (`{unix-seconds}-changelog-{slug}`).
    ChangelogId
);
record_id!(
    /// Identifier of a feedback record (`{unix-seconds}-feedback-{slug}`).
    FeedbackId
);

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
    use super::ActorId;
    use super::TaskId;

    #[test]
    fn ids_round_trip_through_string_conversions() {
        let id = TaskId::new("1752274500-task-fix-bug");
        assert_eq!(id.as_str(), "1752274500-task-fix-bug");
        assert_eq!(id.to_string(), "1752274500-task-fix-bug".to_string());
    }

    #[test]
    fn actor_ids_carry_the_human_or_agent_prefix_verbatim() {
        let id = ActorId::from("human:alice");
        assert_eq!(id.as_str(), "human:alice");
    }
}
