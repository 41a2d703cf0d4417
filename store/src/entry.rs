//! Entry storage trait.

use crate::StoreError;
use genevault_types::{ActorId, EntryId, Fingerprint, Height};
use serde::{Deserialize, Serialize};

/// A registered unit of genetic material.
///
/// Entries are never deleted, so every id ever handed out keeps resolving.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryRecord {
    pub id: EntryId,
    pub fingerprint: Fingerprint,
    pub owner: ActorId,
    /// While set, owner mutations other than unlocking are refused.
    pub locked: bool,
    /// Always within `0..=100`.
    pub quality_score: u8,
    pub entry_type: String,
    pub location: String,
    pub registered_at: Height,
}

pub trait EntryStore {
    fn get_entry(&self, id: EntryId) -> Result<Option<EntryRecord>, StoreError>;
    fn put_entry(&self, record: &EntryRecord) -> Result<(), StoreError>;
    fn entry_count(&self) -> Result<u64, StoreError>;

    fn entry_exists(&self, id: EntryId) -> Result<bool, StoreError> {
        self.get_entry(id).map(|e| e.is_some())
    }
}
