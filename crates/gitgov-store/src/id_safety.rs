// gitgov-store/src/id_safety.rs
// ============================================================================
// Module: Id Safety
// Description: Path-traversal guard applied to every store id.
// Purpose: Reject ids that could escape `basePath` before any filesystem
//          operation is attempted, including reads.
// Dependencies: gitgov-core
// ============================================================================

use gitgov_core::GitGovError;

/// Validates that `id` is safe to use as a filesystem path component: it
/// must be non-empty, must not contain `/` or `\`, and must not contain the
/// substring `..`. A single `.` is permitted (e.g. `human.alice`).
///
/// # Errors
///
/// Returns [`GitGovError::InvalidId`] on any violation. Every store
/// operation — including reads — runs this check first.
pub fn validate_id(id: &str) -> Result<(), GitGovError> {
    if id.is_empty() {
        return Err(GitGovError::InvalidId {
            id: id.to_string(),
            reason: "id must not be empty".to_string(),
        });
    }
    if id.contains('/') || id.contains('\\') {
        return Err(GitGovError::InvalidId {
            id: id.to_string(),
            reason: "id must not contain a path separator".to_string(),
        });
    }
    if id.contains("..") {
        return Err(GitGovError::InvalidId {
            id: id.to_string(),
            reason: "id must not contain '..'".to_string(),
        });
    }
    Ok(())
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
    use super::validate_id;

    #[test]
    fn accepts_ordinary_id() {
        assert!(validate_id("1752274500-task-fix-bug").is_ok());
    }

    #[test]
    fn accepts_single_dot() {
        assert!(validate_id("human.alice").is_ok());
    }

    #[test]
    fn rejects_empty_id() {
        assert!(validate_id("").is_err());
    }

    #[test]
    fn rejects_forward_slash() {
        assert!(validate_id("human/alice").is_err());
    }

    #[test]
    fn rejects_backslash() {
        assert!(validate_id("human\\alice").is_err());
    }

    #[test]
    fn rejects_parent_traversal() {
        assert!(validate_id("../../etc/passwd").is_err());
        assert!(validate_id("human:alice..").is_err());
    }
}
