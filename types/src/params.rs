//! Registry parameters: bounds, thresholds and the attestation expiry window.
//!
//! Every field is fixed at deployment and read by the registry and verification
//! crates. Defaults match the reference deployment.

use serde::{Deserialize, Serialize};

use crate::VaultError;

/// Hard ceiling for every percentage-style score.
const SCORE_CEILING: u8 = 100;
/// Hard ceiling for the number of parents of one child.
const PARENTS_CEILING: usize = 10;
/// Certification levels outside this range are never accepted.
const CERTIFICATION_LEVELS: std::ops::RangeInclusive<u8> = 1..=5;

/// How a verifier's success rate is updated after each attempt.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReputationMode {
    /// `success_rate = successes * 100 / attempts` over the verifier's whole history.
    #[default]
    Cumulative,
    /// Overwrite with 100 on a passing attempt and 50 on a failing one.
    Coarse,
}

/// How submitted markers are matched against the stored reference set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchPolicy {
    /// Compare every aligned position up to the shorter set.
    #[default]
    Positional,
    /// Compare only the first position.
    FirstPosition,
}

/// All parameters of a registry deployment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VaultParams {
    // ── Entries ──────────────────────────────────────────────────────────
    /// Quality score assigned to a freshly registered entry.
    pub default_quality_score: u8,

    /// Upper bound for quality, stability and authenticity scores.
    pub max_score: u8,

    // ── Lineage ──────────────────────────────────────────────────────────
    /// Maximum number of parents recorded for a single child.
    pub max_parents: usize,

    // ── Markers ──────────────────────────────────────────────────────────
    /// Minimum number of markers stored for, or supplied to verify, an entry.
    pub min_markers: usize,

    /// Maximum number of markers stored for an entry.
    pub max_markers: usize,

    // ── Verification ─────────────────────────────────────────────────────
    /// Confidence (percent) at or above which an attestation is a pass.
    pub quality_threshold: u8,

    /// Heights an attestation stays valid (~one year at the reference cadence).
    pub attestation_validity: u64,

    /// Inclusive certification level range for verifiers.
    pub min_certification_level: u8,
    pub max_certification_level: u8,

    /// Marker comparison policy; fixes the confidence arithmetic.
    pub match_policy: MatchPolicy,

    /// Success-rate update policy.
    pub reputation_mode: ReputationMode,
}

impl Default for VaultParams {
    fn default() -> Self {
        Self {
            default_quality_score: 50,
            max_score: 100,
            max_parents: 10,
            min_markers: 3,
            max_markers: 20,
            quality_threshold: 70,
            attestation_validity: 52_560,
            min_certification_level: 1,
            max_certification_level: 5,
            match_policy: MatchPolicy::Positional,
            reputation_mode: ReputationMode::Cumulative,
        }
    }
}

impl VaultParams {
    /// Reject parameter sets that would let stored records leave their fixed bounds.
    pub fn validate(&self) -> Result<(), VaultError> {
        let invalid = |msg: String| Err(VaultError::InvalidParams(msg));
        if self.max_score > SCORE_CEILING {
            return invalid(format!("max_score {} exceeds {SCORE_CEILING}", self.max_score));
        }
        if self.default_quality_score > self.max_score {
            return invalid(format!(
                "default_quality_score {} exceeds max_score {}",
                self.default_quality_score, self.max_score
            ));
        }
        if !(1..=PARENTS_CEILING).contains(&self.max_parents) {
            return invalid(format!(
                "max_parents {} outside 1..={PARENTS_CEILING}",
                self.max_parents
            ));
        }
        if self.min_markers > self.max_markers {
            return invalid(format!(
                "min_markers {} exceeds max_markers {}",
                self.min_markers, self.max_markers
            ));
        }
        // Marker quality indices are a u8.
        if self.max_markers > u8::MAX as usize + 1 {
            return invalid(format!("max_markers {} not indexable", self.max_markers));
        }
        if self.quality_threshold > SCORE_CEILING {
            return invalid(format!(
                "quality_threshold {} exceeds {SCORE_CEILING}",
                self.quality_threshold
            ));
        }
        if self.min_certification_level > self.max_certification_level
            || !CERTIFICATION_LEVELS.contains(&self.min_certification_level)
            || !CERTIFICATION_LEVELS.contains(&self.max_certification_level)
        {
            return invalid(format!(
                "certification levels {}..={} outside {}..={}",
                self.min_certification_level,
                self.max_certification_level,
                CERTIFICATION_LEVELS.start(),
                CERTIFICATION_LEVELS.end()
            ));
        }
        Ok(())
    }

    /// Whether `level` is an accepted certification level.
    pub fn certification_in_range(&self, level: u8) -> bool {
        (self.min_certification_level..=self.max_certification_level).contains(&level)
    }

    /// Whether `count` markers may be stored for one entry.
    pub fn marker_count_in_range(&self, count: usize) -> bool {
        (self.min_markers..=self.max_markers).contains(&count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(VaultParams::default().validate(), Ok(()));
    }

    #[test]
    fn out_of_bound_parameters_rejected() {
        let base = VaultParams::default();
        let cases = [
            VaultParams { max_score: 250, ..base.clone() },
            VaultParams { default_quality_score: 90, max_score: 80, ..base.clone() },
            VaultParams { max_parents: 0, ..base.clone() },
            VaultParams { max_parents: 40, ..base.clone() },
            VaultParams { min_markers: 21, ..base.clone() },
            VaultParams { max_markers: 300, ..base.clone() },
            VaultParams { quality_threshold: 101, ..base.clone() },
            VaultParams { min_certification_level: 0, ..base.clone() },
            VaultParams { max_certification_level: 6, ..base.clone() },
            VaultParams { min_certification_level: 4, max_certification_level: 2, ..base.clone() },
        ];
        for params in cases {
            assert!(
                matches!(params.validate(), Err(VaultError::InvalidParams(_))),
                "{params:?}"
            );
        }
    }

    #[test]
    fn tighter_bounds_accepted() {
        let params = VaultParams {
            max_score: 80,
            default_quality_score: 40,
            max_parents: 4,
            max_markers: 256,
            min_certification_level: 2,
            max_certification_level: 4,
            ..VaultParams::default()
        };
        assert_eq!(params.validate(), Ok(()));
    }
}
