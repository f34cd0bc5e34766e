//! Review scheduling strategies.
//!
//! A strategy names the set of elapsed-day counts at which a word comes up
//! for review. Due-ness is exact membership: a word last studied `d` days
//! ago is due only when `d` is an element of the active set, not when it
//! has merely reached or passed one. A word that goes unstudied past the
//! largest interval therefore never comes due again under that strategy
//! until it is re-studied. This matches the behavior the engine's existing
//! data was produced under and is kept for compatibility.

use serde::{Deserialize, Serialize};

/// Ebbinghaus forgetting-curve review days.
pub const EBBINGHAUS_INTERVALS: [u32; 5] = [1, 2, 4, 7, 15];

/// Fixed spaced-repetition-system review days.
pub const SRS_INTERVALS: [u32; 5] = [1, 3, 6, 10, 20];

/// Review strategy options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    Ebbinghaus,
    Srs,
    Custom,
}

impl Default for Strategy {
    fn default() -> Self {
        Self::Ebbinghaus
    }
}

impl Strategy {
    /// Get the strategy name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ebbinghaus => "ebbinghaus",
            Self::Srs => "srs",
            Self::Custom => "custom",
        }
    }

    /// Parse from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "ebbinghaus" => Some(Self::Ebbinghaus),
            "srs" => Some(Self::Srs),
            "custom" => Some(Self::Custom),
            _ => None,
        }
    }

    /// The interval set active under this strategy. The fixed strategies
    /// ignore the configured custom intervals entirely.
    pub fn intervals<'a>(&self, custom_intervals: &'a [u32]) -> &'a [u32] {
        match self {
            Self::Ebbinghaus => &EBBINGHAUS_INTERVALS,
            Self::Srs => &SRS_INTERVALS,
            Self::Custom => custom_intervals,
        }
    }

    /// Whether a word last studied `days_since_last_study` days ago is due
    /// for review today.
    pub fn is_due(&self, days_since_last_study: u32, custom_intervals: &[u32]) -> bool {
        self.intervals(custom_intervals)
            .contains(&days_since_last_study)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn ebbinghaus_due_exactly_on_interval_days() {
        for days in [0u32, 1, 2, 3, 4, 5, 6, 7, 8, 14, 15, 16] {
            let due = Strategy::Ebbinghaus.is_due(days, &[]);
            let expected = EBBINGHAUS_INTERVALS.contains(&days);
            assert_eq!(due, expected, "day {}", days);
        }
    }

    #[test]
    fn srs_uses_its_own_fixed_set() {
        assert!(Strategy::Srs.is_due(3, &[]));
        assert!(Strategy::Srs.is_due(20, &[]));
        assert!(!Strategy::Srs.is_due(2, &[]));
        assert!(!Strategy::Srs.is_due(15, &[]));
    }

    #[test]
    fn fixed_strategies_ignore_custom_intervals() {
        // Day 5 is in the custom set but neither fixed set.
        assert!(!Strategy::Ebbinghaus.is_due(5, &[5]));
        assert!(!Strategy::Srs.is_due(5, &[5]));
        assert!(Strategy::Custom.is_due(5, &[5]));
    }

    #[test]
    fn custom_with_empty_set_is_never_due() {
        for days in 0..30 {
            assert!(!Strategy::Custom.is_due(days, &[]));
        }
    }

    #[test]
    fn past_last_interval_never_due_again() {
        for days in 16..100 {
            assert!(!Strategy::Ebbinghaus.is_due(days, &[]));
        }
    }

    #[test]
    fn strategy_string_round_trip() {
        for strategy in [Strategy::Ebbinghaus, Strategy::Srs, Strategy::Custom] {
            assert_eq!(Strategy::from_str(strategy.as_str()), Some(strategy));
        }
        assert_eq!(Strategy::from_str("sm2"), None);
    }
}
