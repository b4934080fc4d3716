// gitgov-engine/src/mutate.rs
// ============================================================================
// Module: Transition Mutation
// Description: The shared "authorize, recompute checksum, sign, append"
//              step every task status transition performs.
// Purpose: Avoid re-deriving the same append-only mutation in `submitTask`,
//          `approveTask`, `activateTask`, `completeTask`, and `deleteTask`.
// Dependencies: gitgov-core, gitgov-identity, gitgov-store, gitgov-workflow
// ============================================================================

//! ## Overview
//! Per §3.2/§9, signatures are additive: a transition never replaces
//! `header.signatures`, it appends to it. The signer set offered to
//! [`gitgov_workflow::authorize_transition`] is built from every actor who
//! has already signed the envelope plus the actor signing now — deduplicated
//! by actor id — so a multi-approval bucket can accumulate qualifying
//! signers across separate calls while an author's signature never counts
//! toward an approver bucket it does not hold the role for.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashSet;

use gitgov_core::ActorId;
use gitgov_core::GitGovError;
use gitgov_core::GitGovResult;
use gitgov_core::Signature;
use gitgov_core::TaskId;
use gitgov_core::TaskRecord;
use gitgov_core::TaskStatus;
use gitgov_core::ValidationFieldError;
use gitgov_core::payload_checksum;
use gitgov_core::sign;
use gitgov_workflow::Methodology;
use gitgov_workflow::SignerInfo;
use gitgov_workflow::TransitionRequest;
use gitgov_workflow::authorize_transition;

use crate::context::TaskTransitionContext;
use crate::stores::Signer;
use crate::stores::Stores;

// ============================================================================
// SECTION: Signer Resolution
// ============================================================================

/// Resolves `actor_id`'s current capability roles into a [`SignerInfo`].
///
/// # Errors
///
/// Returns [`GitGovError::RecordNotFound`] when `actor_id` does not resolve
/// to an actor record.
pub fn signer_info_for(stores: &Stores, actor_id: &str) -> GitGovResult<SignerInfo> {
    let actor = stores
        .actors
        .get(actor_id)?
        .ok_or_else(|| GitGovError::RecordNotFound {
            record_type: "actor".to_string(),
            id: actor_id.to_string(),
        })?;
    Ok(SignerInfo::new(actor_id, actor.payload.roles))
}

/// Builds the deduplicated signer list [`authorize_transition`] checks
/// signature buckets against: every distinct actor who already signed
/// `existing_signatures`, plus `new_signer`. An existing signature whose
/// actor can no longer be resolved is skipped rather than failing the whole
/// call — a stale signer should not block new authorization.
///
/// # Errors
///
/// Returns [`GitGovError::RecordNotFound`] when `new_signer` itself does not
/// resolve to an actor record.
pub fn collect_signers(
    stores: &Stores,
    existing_signatures: &[Signature],
    new_signer: &ActorId,
) -> GitGovResult<Vec<SignerInfo>> {
    let mut seen = HashSet::new();
    let mut signers = Vec::new();
    for signature in existing_signatures {
        if seen.insert(signature.key_id.clone()) {
            if let Ok(info) = signer_info_for(stores, &signature.key_id) {
                signers.push(info);
            }
        }
    }
    if seen.insert(new_signer.as_str().to_string()) {
        signers.push(signer_info_for(stores, new_signer.as_str())?);
    }
    Ok(signers)
}

// ============================================================================
// SECTION: Task Transition
// ============================================================================

/// Authorizes and applies a task status transition: checks
/// `(from, to)` against `methodology` (consulting the store for any event
/// or custom-rule requirement), then appends a new signature recomputed
/// over the mutated payload, and persists the result.
///
/// # Errors
///
/// Returns [`GitGovError::RecordNotFound`] when `task_id` does not resolve,
/// [`GitGovError::ProtocolViolation`] when the transition is not authorized
/// (propagated from `gitgov-workflow`), or a store-specific I/O error.
pub fn apply_task_transition(
    stores: &Stores,
    methodology: &Methodology,
    signer: &Signer,
    task_id: &TaskId,
    to: TaskStatus,
    command: Option<&str>,
    role: &str,
    notes: &str,
) -> GitGovResult<TaskRecord> {
    let mut envelope = stores
        .tasks
        .get(task_id.as_str())?
        .ok_or_else(|| GitGovError::RecordNotFound {
            record_type: "task".to_string(),
            id: task_id.as_str().to_string(),
        })?;
    let from = envelope.payload.status;

    let signers = collect_signers(stores, &envelope.header.signatures, &signer.actor_id)?;
    let context = TaskTransitionContext::new(stores, task_id, &signer.actor_id);
    let request = TransitionRequest {
        from,
        to,
        command,
        signers: &signers,
    };
    authorize_transition(methodology, &request, &context)?;

    envelope.payload.status = to;
    let checksum = payload_checksum(&envelope.payload).map_err(|err| GitGovError::DetailedValidation {
        record_type: "task".to_string(),
        errors: vec![ValidationFieldError::new("", err.to_string())],
    })?;
    let signature = sign(&signer.keypair, &checksum, signer.actor_id.as_str(), role, notes).map_err(|err| {
        GitGovError::DetailedValidation {
            record_type: "task".to_string(),
            errors: vec![ValidationFieldError::new("", err.to_string())],
        }
    })?;
    envelope.header.payload_checksum = checksum;
    envelope.header.append_signature(signature);

    stores.tasks.put(task_id.as_str(), &envelope)?;
    Ok(envelope)
}
