//! Store snapshots: capture every table and counter at a point in time.
//!
//! A snapshot carries a Blake2b digest over its serialized contents so a restored
//! store can be checked for tampering or truncation before it is trusted.

use genevault_store::{
    ActorRecord, Attestation, EntryRecord, LineageRecord, MarkerQuality, MarkerSet,
    StoreError, VerificationStatus, VerifierRecord,
};
use genevault_types::blake2b_256;
use serde::{Deserialize, Serialize};

/// Current on-disk snapshot format.
pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct StoreSnapshot {
    pub version: u32,
    pub actors: Vec<ActorRecord>,
    pub entries: Vec<EntryRecord>,
    pub lineage: Vec<LineageRecord>,
    pub verifiers: Vec<VerifierRecord>,
    pub markers: Vec<MarkerSet>,
    pub attestations: Vec<Attestation>,
    pub statuses: Vec<VerificationStatus>,
    pub qualities: Vec<MarkerQuality>,
    pub last_entry_id: u64,
    pub last_attestation_id: u64,
    pub successful_verifications: u64,
    /// Blake2b-256 of the snapshot serialized with this field zeroed.
    pub digest: [u8; 32],
}

impl StoreSnapshot {
    /// Stamp the format version and compute the integrity digest.
    pub fn seal(mut self) -> Result<Self, StoreError> {
        self.version = SNAPSHOT_VERSION;
        self.digest = self.compute_digest()?;
        Ok(self)
    }

    fn compute_digest(&self) -> Result<[u8; 32], StoreError> {
        let mut unsealed = self.clone();
        unsealed.digest = [0u8; 32];
        let bytes = bincode::serialize(&unsealed)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        Ok(blake2b_256(&bytes))
    }

    /// Whether the digest matches the contents and the version is understood.
    pub fn verify(&self) -> bool {
        self.version == SNAPSHOT_VERSION
            && self.compute_digest().is_ok_and(|d| d == self.digest)
    }

    /// Serialize the snapshot to bytes (bincode).
    pub fn to_bytes(&self) -> Result<Vec<u8>, StoreError> {
        bincode::serialize(self).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    /// Deserialize a snapshot from bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, StoreError> {
        bincode::deserialize(bytes).map_err(|e| StoreError::Serialization(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sealed_empty_snapshot_verifies() {
        let snap = StoreSnapshot::default().seal().unwrap();
        assert!(snap.verify());
        assert_ne!(snap.digest, [0u8; 32]);
    }

    #[test]
    fn counter_change_breaks_digest() {
        let mut snap = StoreSnapshot::default().seal().unwrap();
        snap.last_entry_id = 7;
        assert!(!snap.verify());
    }

    #[test]
    fn bytes_round_trip_keeps_digest_valid() {
        let snap = StoreSnapshot {
            last_attestation_id: 3,
            ..Default::default()
        }
        .seal()
        .unwrap();
        let decoded = StoreSnapshot::from_bytes(&snap.to_bytes().unwrap()).unwrap();
        assert!(decoded.verify());
        assert_eq!(decoded.last_attestation_id, 3);
    }

    #[test]
    fn garbage_bytes_rejected() {
        assert!(matches!(
            StoreSnapshot::from_bytes(&[1, 2, 3]),
            Err(StoreError::Serialization(_))
        ));
    }
}
