//! Marker storage trait.

use crate::StoreError;
use genevault_types::{EntryId, Height, Marker};
use serde::{Deserialize, Serialize};

/// The reference marker fragments of one entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerSet {
    pub entry: EntryId,
    pub markers: Vec<Marker>,
    pub updated_at: Height,
}

pub trait MarkerStore {
    fn get_markers(&self, entry: EntryId) -> Result<Option<MarkerSet>, StoreError>;
    fn put_markers(&self, set: &MarkerSet) -> Result<(), StoreError>;
}
