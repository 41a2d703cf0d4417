//! Per-entry verification status storage trait.

use crate::StoreError;
use genevault_types::{AttestationId, EntryId, Height};
use serde::{Deserialize, Serialize};

/// The current, overwritable authenticity signal for one entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationStatus {
    pub entry: EntryId,
    /// Outcome of the latest attestation. Never cleared on expiry.
    pub is_verified: bool,
    pub last_attestation: AttestationId,
    pub last_height: Height,
    pub attempt_count: u64,
    pub authenticity_score: u8,
    pub expiry: Height,
}

impl VerificationStatus {
    /// Validity is computed, not stored: the latest attestation passed and has not
    /// expired at `now`.
    pub fn is_valid_at(&self, now: Height) -> bool {
        self.is_verified && self.expiry > now
    }
}

pub trait StatusStore {
    fn get_status(&self, entry: EntryId) -> Result<Option<VerificationStatus>, StoreError>;
    fn put_status(&self, status: &VerificationStatus) -> Result<(), StoreError>;
}
