//! UV severity bands and the rule deciding when a new reading is worth reporting.

use std::fmt;

use crate::constants::{HIGH_THRESHOLD, MODERATE_THRESHOLD};

/// Severity band of a UV index. Intervals are lower-inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// [0, 3)
    Low,
    /// [3, 8)
    Moderate,
    /// [8, ∞)
    High,
}

impl Severity {
    /// Band an index falls into
    pub fn classify(index: f64) -> Self {
        if index < MODERATE_THRESHOLD {
            Severity::Low
        } else if index < HIGH_THRESHOLD {
            Severity::Moderate
        } else {
            Severity::High
        }
    }

    /// Lowercase band name, as used in logs and alerts
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Moderate => "moderate",
            Severity::High => "high",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether `current` falls in a different band than `previous`.
///
/// A `previous` of exactly zero means "never reported" and always counts as a change.
pub fn changed(previous: f64, current: f64) -> bool {
    previous == 0.0 || Severity::classify(previous) != Severity::classify(current)
}

/// Like [`changed`], but with an explicit marker for "never reported".
///
/// A previously reported reading of 0.0 is compared by band like any other value.
pub fn transition(previous: Option<f64>, current: f64) -> bool {
    match previous {
        None => true,
        Some(previous) => Severity::classify(previous) != Severity::classify(current),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_boundaries() {
        assert_eq!(Severity::classify(0.0), Severity::Low);
        assert_eq!(Severity::classify(2.99), Severity::Low);
        assert_eq!(Severity::classify(3.0), Severity::Moderate);
        assert_eq!(Severity::classify(7.99), Severity::Moderate);
        assert_eq!(Severity::classify(8.0), Severity::High);
        assert_eq!(Severity::classify(11.3), Severity::High);
    }

    #[test]
    fn test_zero_previous_is_always_a_change() {
        for current in [0.0, 0.5, 2.9, 3.0, 5.0, 8.0, 14.2] {
            assert!(changed(0.0, current), "changed(0, {current}) should be true");
        }
    }

    #[test]
    fn test_band_transitions() {
        assert!(changed(5.0, 2.0));
        assert!(changed(5.0, 9.0));
        assert!(changed(2.0, 5.0));
        assert!(changed(9.0, 1.0));
        assert!(!changed(5.0, 3.0));
        assert!(!changed(3.1, 4.2));
        assert!(!changed(8.0, 12.0));
        assert!(!changed(1.0, 2.5));
    }

    #[test]
    fn test_exact_threshold_belongs_to_upper_band() {
        assert!(changed(3.0, 2.9));
        assert!(!changed(3.0, 7.9));
        assert!(changed(8.0, 7.9));
        assert!(!changed(7.0, 3.0));
    }

    #[test]
    fn test_transition_uses_explicit_absence() {
        assert!(transition(None, 0.0));
        assert!(transition(None, 4.0));
        assert!(!transition(Some(0.0), 1.5));
        assert!(transition(Some(0.0), 3.0));
        assert!(!transition(Some(3.1), 4.2));
        assert!(transition(Some(2.4), 11.3));
    }

    #[test]
    fn test_display() {
        assert_eq!(Severity::Moderate.to_string(), "moderate");
    }
}
