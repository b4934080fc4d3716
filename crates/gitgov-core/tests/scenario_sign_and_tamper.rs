// gitgov-core/tests/scenario_sign_and_tamper.rs
// ============================================================================
// Scenario: sign/verify round trip and tamper detection, using only the
// primitives gitgov-core exposes (canonical + crypto). Full envelope
// validation (checksum + signature + schema) lives in gitgov-schema.
// ============================================================================

use gitgov_core::generate_keypair;
use gitgov_core::payload_checksum;
use gitgov_core::sign;
use gitgov_core::verify_signature;
use serde_json::json;

#[test]
fn sign_verify_round_trip_then_detect_tamper() {
    let keypair = generate_keypair();
    let payload = json!({
        "id": "1752274500-task-t",
        "title": "T",
        "status": "draft",
        "priority": "medium",
        "description": "abcdefghij",
        "tags": [],
    });

    let checksum = payload_checksum(&payload).unwrap();
    let signature = sign(&keypair, &checksum, "human:alice", "author", "initial").unwrap();
    assert!(verify_signature(&signature, &checksum, &keypair.public_key));

    // Tamper the payload without recomputing the checksum: a checksum
    // comparison (owned by gitgov-schema) would now fail, but the signature
    // over the *stale* checksum still verifies, since checksum and
    // signature verification are independent steps.
    let tampered = json!({
        "id": "1752274500-task-t",
        "title": "TAMPERED",
        "status": "draft",
        "priority": "medium",
        "description": "abcdefghij",
        "tags": [],
    });
    let recomputed = payload_checksum(&tampered).unwrap();
    assert_ne!(checksum, recomputed);
    assert!(verify_signature(&signature, &checksum, &keypair.public_key));

    // Tampering the signature's role, leaving the checksum intact, breaks
    // verification.
    let mut rotated_role = signature.clone();
    rotated_role.role = "approver".to_string();
    assert!(!verify_signature(&rotated_role, &checksum, &keypair.public_key));
}

#[test]
fn unknown_signer_key_fails_verification() {
    let signer = generate_keypair();
    let impostor_key = generate_keypair().public_key;
    let checksum = payload_checksum(&json!({"a": 1})).unwrap();
    let signature = sign(&signer, &checksum, "human:bob", "author", "").unwrap();
    assert!(!verify_signature(&signature, &checksum, &impostor_key));
}
