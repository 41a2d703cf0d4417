//! Append-only verification log.

use crate::StoreError;
use genevault_types::{ActorId, AttestationId, EntryId, Fingerprint, Height};
use serde::{Deserialize, Serialize};

/// One immutable outcome of a verification attempt.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attestation {
    pub id: AttestationId,
    pub entry: EntryId,
    pub verifier: ActorId,
    pub height: Height,
    pub provided_hash: Fingerprint,
    pub verified: bool,
    /// `floor(matched * 100 / total)`.
    pub confidence: u8,
    pub matched: u32,
    pub total: u32,
    pub verification_type: String,
    /// Digest of the previous attestation (zero for the first one).
    pub prev_digest: [u8; 32],
    /// Digest over `prev_digest` and every field above.
    pub digest: [u8; 32],
}

pub trait AttestationStore {
    fn get_attestation(&self, id: AttestationId) -> Result<Option<Attestation>, StoreError>;

    /// Append to the log. Fails with [`StoreError::Duplicate`] if the id is taken.
    fn append_attestation(&self, attestation: &Attestation) -> Result<(), StoreError>;

    /// The most recently appended attestation.
    fn last_attestation(&self) -> Result<Option<Attestation>, StoreError>;

    /// Every attestation, ordered by id.
    fn iter_attestations(&self) -> Result<Vec<Attestation>, StoreError>;

    fn attestation_count(&self) -> Result<u64, StoreError> {
        self.iter_attestations().map(|v| v.len() as u64)
    }
}
