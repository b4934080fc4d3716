// gitgov-schema/tests/full_validation_pipeline.rs
// ============================================================================
// Scenario: the three validation layers (schema, checksum, signature) catch
// their respective class of failure and nothing else.
// ============================================================================

use gitgov_core::CycleId;
use gitgov_core::GitGovError;
use gitgov_core::Header;
use gitgov_core::Priority;
use gitgov_core::PublicKeyResolver;
use gitgov_core::RecordType;
use gitgov_core::TaskPayload;
use gitgov_core::TaskStatus;
use gitgov_core::generate_keypair;
use gitgov_core::payload_checksum;
use gitgov_core::sign;
use gitgov_schema::SchemaRegistry;
use gitgov_schema::validate_full_embedded_metadata_record;
use gitgov_schema::validate_schema;

struct FixedKeyResolver(String);

impl PublicKeyResolver for FixedKeyResolver {
    fn resolve_public_key(&self, _key_id: &str) -> Option<String> {
        Some(self.0.clone())
    }
}

fn sample_task() -> TaskPayload {
    TaskPayload {
        id: "1752274500-task-fix-bug".into(),
        title: "Fix the bug".to_string(),
        description: "A sufficiently long description.".to_string(),
        status: TaskStatus::Draft,
        priority: Priority::Medium,
        tags: Vec::new(),
        cycle_ids: Vec::<CycleId>::new(),
        references: Vec::new(),
        notes: Vec::new(),
        metadata: gitgov_core::OpenMetadata::new(),
    }
}

#[test]
fn schema_rejects_unknown_status_value() {
    let registry = SchemaRegistry::new();
    let payload = sample_task();
    let checksum = payload_checksum(&payload).unwrap();
    let keypair = generate_keypair();
    let signature = sign(&keypair, &checksum, "human:alice", "author", "").unwrap();
    let header = Header::new(RecordType::Task, checksum, signature);
    let mut envelope_value = serde_json::to_value(gitgov_core::Envelope::new(header, payload)).unwrap();
    envelope_value["payload"]["status"] = serde_json::json!("not_a_status");

    let result = validate_schema(&registry, RecordType::Task, &envelope_value).unwrap();
    assert!(!result.is_valid);
    assert!(result.errors.iter().any(|e| e.field.contains("status")));
}

#[test]
fn schema_rejects_title_below_minimum_length() {
    let registry = SchemaRegistry::new();
    let mut payload = sample_task();
    payload.title = "ab".to_string();
    let checksum = payload_checksum(&payload).unwrap();
    let keypair = generate_keypair();
    let signature = sign(&keypair, &checksum, "human:alice", "author", "").unwrap();
    let header = Header::new(RecordType::Task, checksum, signature);
    let envelope_value = serde_json::to_value(gitgov_core::Envelope::new(header, payload)).unwrap();

    let result = validate_schema(&registry, RecordType::Task, &envelope_value).unwrap();
    assert!(!result.is_valid);
}

#[test]
fn full_pipeline_rejects_unknown_signer() {
    let registry = SchemaRegistry::new();
    let payload = sample_task();
    let checksum = payload_checksum(&payload).unwrap();
    let keypair = generate_keypair();
    let signature = sign(&keypair, &checksum, "human:alice", "author", "").unwrap();
    let header = Header::new(RecordType::Task, checksum, signature);
    let envelope = gitgov_core::Envelope::new(header, payload);

    let impostor_resolver = FixedKeyResolver(generate_keypair().public_key);
    let result = validate_full_embedded_metadata_record(&registry, &envelope, &impostor_resolver);
    assert!(matches!(result, Err(GitGovError::SignatureVerification { .. })));
}

#[test]
fn full_pipeline_accepts_well_formed_task() {
    let registry = SchemaRegistry::new();
    let payload = sample_task();
    let checksum = payload_checksum(&payload).unwrap();
    let keypair = generate_keypair();
    let signature = sign(&keypair, &checksum, "human:alice", "author", "initial draft").unwrap();
    let header = Header::new(RecordType::Task, checksum, signature);
    let envelope = gitgov_core::Envelope::new(header, payload);

    let resolver = FixedKeyResolver(keypair.public_key);
    let result = validate_full_embedded_metadata_record(&registry, &envelope, &resolver);
    assert!(result.is_ok(), "{result:?}");
}
