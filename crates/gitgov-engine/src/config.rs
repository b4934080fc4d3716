// gitgov-engine/src/config.rs
// ============================================================================
// Module: Projector Configuration
// Description: Tunable thresholds for the stalled/at-risk derived views.
// Purpose: Keep "how long until a task looks stalled" a caller-supplied
//          number instead of a hardcoded constant.
// Dependencies: none
// ============================================================================

//! ## Overview
//! §4.10 deliberately leaves "stalled" and "at-risk" undefined beyond "a
//! thin derived view with configurable thresholds". This crate pins them to
//! a task's age in days since creation, measured against
//! [`ProjectorConfig::stalled_after_days`] and
//! [`ProjectorConfig::at_risk_after_days`].

// ============================================================================
// SECTION: Config
// ============================================================================

/// Thresholds the projector (C11) uses to classify tasks as stalled or
/// at-risk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectorConfig {
    /// A task still open after this many days is stalled.
    pub stalled_after_days: u32,
    /// A task still open after this many days, but not yet stalled, is
    /// at-risk.
    pub at_risk_after_days: u32,
}

impl Default for ProjectorConfig {
    fn default() -> Self {
        Self {
            stalled_after_days: 14,
            at_risk_after_days: 7,
        }
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, reason = "Test-only assertions are permitted.")]
mod tests {
    use super::ProjectorConfig;

    #[test]
    fn defaults_match_documented_thresholds() {
        let config = ProjectorConfig::default();
        assert_eq!(config.stalled_after_days, 14);
        assert_eq!(config.at_risk_after_days, 7);
    }
}
