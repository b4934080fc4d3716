// gitgov-core/tests/canonical_proptest.rs
// ============================================================================
// Property: canonicalization is invariant under key permutation.
// ============================================================================

use gitgov_core::payload_checksum;
use proptest::prelude::*;
use serde_json::Map;
use serde_json::Value;

fn shuffle_object(map: &Map<String, Value>, seed: usize) -> Map<String, Value> {
    let mut entries: Vec<(String, Value)> = map.clone().into_iter().collect();
    entries.rotate_left(seed % entries.len().max(1));
    entries.into_iter().collect()
}

proptest! {
    #[test]
    fn checksum_is_stable_under_key_permutation(
        id in "[a-z0-9-]{5,30}",
        title in "[A-Za-z ]{3,60}",
        priority in prop_oneof!["low", "medium", "high", "critical"],
        seed in 0usize..8,
    ) {
        let mut map = Map::new();
        map.insert("id".to_string(), Value::String(id));
        map.insert("title".to_string(), Value::String(title));
        map.insert("priority".to_string(), Value::String(priority.to_string()));
        map.insert("tags".to_string(), Value::Array(vec![]));

        let shuffled = shuffle_object(&map, seed);
        let original = payload_checksum(&Value::Object(map)).unwrap();
        let permuted = payload_checksum(&Value::Object(shuffled)).unwrap();
        prop_assert_eq!(original, permuted);
    }
}
