//! Genetic verification.
//!
//! Authorized verifiers compare submitted marker fragments against the reference
//! markers stored for an entry. Each attempt:
//! 1. **Scores**: confidence is the share of matching marker positions.
//! 2. **Attests**: an immutable, hash-chained log entry records the outcome.
//! 3. **Updates status**: the entry's authenticity signal is overwritten and given an
//!    expiry height. Validity is always computed at read time.
//! 4. **Updates reputation**: the verifier's attempt counter and success rate move.
//!
//! The comparison policy is pluggable through [`MarkerComparator`].

pub mod chain;
pub mod comparator;
pub mod engine;
pub mod ledger;
pub mod markers;
pub mod quality;

pub use chain::{attestation_digest, find_chain_break};
pub use comparator::{
    comparator_for, confidence, FirstPositionComparator, MarkerComparator, PositionalComparator,
};
pub use engine::{VerificationEngine, VerificationOutcome};
pub use ledger::VerifierLedger;
pub use markers::MarkerBook;
pub use quality::MarkerQualityAudit;

use genevault_types::{Marker, VaultError};

/// Parse raw marker fragments, failing `InvalidHash` on the first wrong-width one.
pub(crate) fn parse_markers(raw: &[Vec<u8>]) -> Result<Vec<Marker>, VaultError> {
    raw.iter()
        .map(|m| Marker::from_slice(m).ok_or(VaultError::InvalidHash(m.len())))
        .collect()
}
