//! Lineage storage trait.

use crate::StoreError;
use genevault_types::{ActorId, EntryId, Height};
use serde::{Deserialize, Serialize};

/// The recorded parents of one child entry. Replaced wholesale on every write.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineageRecord {
    pub child: EntryId,
    /// Ordered, duplicate-free, 1..=10 ids.
    pub parents: Vec<EntryId>,
    pub recorded_by: ActorId,
    pub recorded_at: Height,
}

pub trait LineageStore {
    fn get_lineage(&self, child: EntryId) -> Result<Option<LineageRecord>, StoreError>;
    fn put_lineage(&self, record: &LineageRecord) -> Result<(), StoreError>;
}
