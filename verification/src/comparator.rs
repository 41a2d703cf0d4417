//! Marker comparison policies.
//!
//! The policy decides how many marker positions count as matching, which in turn
//! fixes the confidence arithmetic. [`PositionalComparator`] is the default.

use genevault_types::{MatchPolicy, Marker};

/// A pluggable marker comparison policy.
pub trait MarkerComparator: Send + Sync {
    /// Human-readable name of this policy.
    fn name(&self) -> &str;

    /// Number of matching positions between submitted and stored markers.
    fn count_matches(&self, provided: &[Marker], stored: &[Marker]) -> usize;
}

/// Compares every position up to the shorter of the two sets.
#[derive(Clone, Copy, Debug, Default)]
pub struct PositionalComparator;

impl MarkerComparator for PositionalComparator {
    fn name(&self) -> &str {
        "positional"
    }

    fn count_matches(&self, provided: &[Marker], stored: &[Marker]) -> usize {
        provided
            .iter()
            .zip(stored)
            .filter(|(p, s)| p == s)
            .count()
    }
}

/// Compares only the first position, treating it as representative of the set.
#[derive(Clone, Copy, Debug, Default)]
pub struct FirstPositionComparator;

impl MarkerComparator for FirstPositionComparator {
    fn name(&self) -> &str {
        "first-position"
    }

    fn count_matches(&self, provided: &[Marker], stored: &[Marker]) -> usize {
        match (provided.first(), stored.first()) {
            (Some(p), Some(s)) if p == s => 1,
            _ => 0,
        }
    }
}

impl<T: MarkerComparator + ?Sized> MarkerComparator for &T {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn count_matches(&self, provided: &[Marker], stored: &[Marker]) -> usize {
        (**self).count_matches(provided, stored)
    }
}

impl<T: MarkerComparator + ?Sized> MarkerComparator for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn count_matches(&self, provided: &[Marker], stored: &[Marker]) -> usize {
        (**self).count_matches(provided, stored)
    }
}

/// The comparator a deployment's [`MatchPolicy`] selects.
pub fn comparator_for(policy: MatchPolicy) -> Box<dyn MarkerComparator> {
    match policy {
        MatchPolicy::Positional => Box::new(PositionalComparator),
        MatchPolicy::FirstPosition => Box::new(FirstPositionComparator),
    }
}

/// `floor(matches * 100 / total)`, or 0 when nothing is stored.
pub fn confidence(matches: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    (matches.min(total) * 100 / total) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(b: u8) -> Marker {
        Marker::new([b; 32])
    }

    #[test]
    fn positional_counts_every_aligned_match() {
        let stored = [m(1), m(2), m(3), m(4), m(5)];
        let provided = [m(1), m(9), m(3), m(4), m(0)];
        assert_eq!(PositionalComparator.count_matches(&provided, &stored), 3);
    }

    #[test]
    fn positional_stops_at_shorter_set() {
        let stored = [m(1), m(2), m(3), m(4), m(5)];
        let provided = [m(1), m(2), m(3)];
        assert_eq!(PositionalComparator.count_matches(&provided, &stored), 3);
        assert_eq!(PositionalComparator.count_matches(&stored, &provided), 3);
    }

    #[test]
    fn positional_ignores_shifted_markers() {
        let stored = [m(1), m(2), m(3)];
        let provided = [m(0), m(1), m(2)];
        assert_eq!(PositionalComparator.count_matches(&provided, &stored), 0);
    }

    #[test]
    fn first_position_only_looks_at_head() {
        let stored = [m(1), m(2), m(3)];
        assert_eq!(FirstPositionComparator.count_matches(&stored, &stored), 1);
        assert_eq!(
            FirstPositionComparator.count_matches(&[m(7), m(2), m(3)], &stored),
            0
        );
        assert_eq!(FirstPositionComparator.count_matches(&[], &stored), 0);
    }

    #[test]
    fn policy_selects_comparator() {
        assert_eq!(comparator_for(MatchPolicy::Positional).name(), "positional");
        let first = comparator_for(MatchPolicy::FirstPosition);
        assert_eq!(first.name(), "first-position");
        assert_eq!(first.count_matches(&[m(1), m(2)], &[m(1), m(2)]), 1);
    }

    #[test]
    fn confidence_floors() {
        assert_eq!(confidence(1, 5), 20);
        assert_eq!(confidence(2, 3), 66);
        assert_eq!(confidence(7, 10), 70);
        assert_eq!(confidence(5, 5), 100);
        assert_eq!(confidence(3, 0), 0);
    }
}
