// gitgov-core/src/record/entity.rs
// ============================================================================
// Module: Entity Reference
// Description: The record-type discriminant used by changelog and feedback
//              payloads to point at the record they describe.
// Purpose: Share one enum between changelog and feedback rather than
//          duplicating the same tag in both modules.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Changelog and feedback records both carry an `entityType` / `entityId`
//! pair pointing at the record they are about. The store does not enforce
//! that `entityId` resolves to a record of the stated `entityType`; the
//! backlog engine does, at operation time.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Entity Type
// ============================================================================

/// The kind of record a changelog or feedback entry is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    /// Refers to a task record.
    Task,
    /// Refers to a cycle record.
    Cycle,
    /// Refers to an execution record.
    Execution,
    /// Refers to an actor record.
    Actor,
    /// Refers to an agent record.
    Agent,
    /// Refers to another feedback record (used by resolution feedback).
    Feedback,
}
