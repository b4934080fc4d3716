// gitgov-factory/src/slug.rs
// ============================================================================
// Module: Slug & Timestamped Id Generation
// Description: Deterministic slugification and the `{unix-seconds}-{type}-
//              {slug}` id shape shared by every timestamped record.
// Purpose: Give every factory the same id-generation rule rather than each
//          re-deriving its own.
// Dependencies: std::time
// ============================================================================

//! ## Overview
//! A slug is the lowercase, hyphen-separated form of a title or content
//! string: non-alphanumeric runs collapse to a single `-`, and the result is
//! trimmed of leading/trailing hyphens and capped at a reasonable length so
//! ids stay usable as filesystem path components.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::SystemTime;
use std::time::UNIX_EPOCH;

// ============================================================================
// SECTION: Slugify
// ============================================================================

/// Maximum number of characters kept from the slugified source text.
const SLUG_MAX_LEN: usize = 40;

/// Lowercases `source`, replaces runs of non-alphanumeric characters with a
/// single `-`, and trims leading/trailing hyphens, capping the result at
/// [`SLUG_MAX_LEN`] characters.
///
/// Returns `"untitled"` when `source` contains no alphanumeric characters.
#[must_use]
pub fn slugify(source: &str) -> String {
    let mut slug = String::with_capacity(source.len());
    let mut last_was_hyphen = true; // swallow leading hyphens
    for ch in source.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
            last_was_hyphen = false;
        } else if !last_was_hyphen {
            slug.push('-');
            last_was_hyphen = true;
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug.truncate(SLUG_MAX_LEN);
    while slug.ends_with('-') {
        slug.pop();
    }
    if slug.is_empty() { "untitled".to_string() } else { slug }
}

// ============================================================================
// SECTION: Timestamped Id
// ============================================================================

/// Returns the current unix-seconds timestamp.
#[must_use]
pub fn unix_now() -> i64 {
    #[expect(clippy::cast_possible_wrap, reason = "unix seconds fit in i64 until year 292277026596")]
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default() as i64;
    secs
}

/// Builds a timestamped id of the shape `{unix-seconds}-{type}-{slug}`.
#[must_use]
pub fn timestamped_id(record_type: &str, source_text: &str) -> String {
    format!("{}-{record_type}-{}", unix_now(), slugify(source_text))
}

/// Builds an actor or agent id of the shape `{human|agent}:{slug}`.
#[must_use]
pub fn prefixed_id(prefix: &str, source_text: &str) -> String {
    format!("{prefix}:{}", slugify(source_text))
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
    use super::prefixed_id;
    use super::slugify;
    use super::timestamped_id;

    #[test]
    fn slugify_lowercases_and_hyphenates() {
        assert_eq!(slugify("Fix the Login Bug!"), "fix-the-login-bug");
    }

    #[test]
    fn slugify_collapses_repeated_separators() {
        assert_eq!(slugify("a---b___c"), "a-b-c");
    }

    #[test]
    fn slugify_trims_leading_and_trailing_punctuation() {
        assert_eq!(slugify("  --hello--  "), "hello");
    }

    #[test]
    fn slugify_falls_back_to_untitled() {
        assert_eq!(slugify("!!!"), "untitled");
    }

    #[test]
    fn timestamped_id_has_expected_shape() {
        let id = timestamped_id("task", "Fix the bug");
        assert!(id.contains("-task-fix-the-bug"));
        let prefix = id.split("-task-").next().unwrap();
        assert!(prefix.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn prefixed_id_has_expected_shape() {
        assert_eq!(prefixed_id("human", "Alice Liddell"), "human:alice-liddell");
    }
}
