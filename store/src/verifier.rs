//! Verifier authorization storage trait.

use crate::StoreError;
use genevault_types::{ActorId, Height};
use serde::{Deserialize, Serialize};

/// Credential and reputation state of an identity permitted to verify.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifierRecord {
    pub identity: ActorId,
    pub registered_at: Height,
    /// Verification attempts made, passing or not.
    pub verification_count: u64,
    /// Attempts that produced a passing attestation.
    pub success_count: u64,
    /// Percentage in `0..=100`; starts at 100.
    pub success_rate: u8,
    pub specialization: String,
    /// 1 (trainee) to 5 (senior).
    pub certification_level: u8,
    /// Cleared by revocation, never set again.
    pub authorized: bool,
}

pub trait VerifierStore {
    fn get_verifier(&self, identity: &ActorId) -> Result<Option<VerifierRecord>, StoreError>;
    fn put_verifier(&self, record: &VerifierRecord) -> Result<(), StoreError>;
    fn iter_verifiers(&self) -> Result<Vec<VerifierRecord>, StoreError>;
}
