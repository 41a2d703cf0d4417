//! Sequence generators and global counters.

use crate::StoreError;
use genevault_types::{AttestationId, EntryId};

/// Process-wide sequences. Each `next_*` call is an exclusive increment-and-read;
/// identifiers are handed out once and never reused.
pub trait MetaStore {
    fn next_entry_id(&self) -> Result<EntryId, StoreError>;
    fn next_attestation_id(&self) -> Result<AttestationId, StoreError>;

    fn record_successful_verification(&self) -> Result<u64, StoreError>;
    fn successful_verifications(&self) -> Result<u64, StoreError>;
}
