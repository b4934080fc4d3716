// gitgov-core/src/lib.rs
// ============================================================================
// Module: GitGovernance Core Library
// Description: Public API surface for the GitGovernance record protocol.
// Purpose: Expose canonical serialization, crypto, record types, and the
//          shared error taxonomy.
// Dependencies: crate::{canonical, crypto, error, record}
// ============================================================================

//! ## Overview
//! GitGovernance core provides the record protocol every other
//! GitGovernance crate builds on: canonical JSON serialization, Ed25519
//! signing and verification, the eight record payload shapes, and the
//! envelope format shared by all of them. It holds no opinions about
//! storage, schema validation, or workflow — those are layered on top by
//! `gitgov-schema`, `gitgov-store`, `gitgov-identity`, `gitgov-workflow`,
//! and `gitgov-engine`.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod canonical;
pub mod crypto;
pub mod error;
pub mod record;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use canonical::CanonicalizeError;
pub use canonical::canonicalize;
pub use canonical::payload_checksum;
pub use canonical::sha256_hex;
pub use crypto::CryptoError;
pub use crypto::Keypair;
pub use crypto::PublicKeyResolver;
pub use crypto::Signature;
pub use crypto::generate_keypair;
pub use crypto::sign;
pub use crypto::verify_all_signatures;
pub use crypto::verify_signature;
pub use error::GitGovError;
pub use error::GitGovResult;
pub use error::ValidationFieldError;
pub use record::ActorId;
pub use record::ActorKind;
pub use record::ActorPayload;
pub use record::ActorRecord;
pub use record::ActorStatus;
pub use record::AgentEngine;
pub use record::AgentId;
pub use record::AgentPayload;
pub use record::AgentRecord;
pub use record::AgentTrigger;
pub use record::ChangelogId;
pub use record::ChangelogPayload;
pub use record::ChangelogRecord;
pub use record::CycleId;
pub use record::CyclePayload;
pub use record::CycleRecord;
pub use record::CycleStatus;
pub use record::Envelope;
pub use record::EntityType;
pub use record::ExecutionId;
pub use record::ExecutionPayload;
pub use record::ExecutionRecord;
pub use record::FeedbackId;
pub use record::FeedbackPayload;
pub use record::FeedbackRecord;
pub use record::FeedbackStatus;
pub use record::FeedbackType;
pub use record::Header;
pub use record::OpenMetadata;
pub use record::PROTOCOL_VERSION;
pub use record::Priority;
pub use record::RecordPayload;
pub use record::RecordType;
pub use record::TaskId;
pub use record::TaskPayload;
pub use record::TaskRecord;
pub use record::TaskStatus;
