//! Marker quality audit storage trait.

use crate::StoreError;
use genevault_types::{ActorId, EntryId, Height};
use serde::{Deserialize, Serialize};

/// Descriptive quality annotation for one marker position of one entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerQuality {
    pub entry: EntryId,
    pub index: u8,
    pub quality: u8,
    pub stability: u8,
    pub updated_at: Height,
    pub updated_by: ActorId,
}

pub trait MarkerQualityStore {
    fn get_marker_quality(
        &self,
        entry: EntryId,
        index: u8,
    ) -> Result<Option<MarkerQuality>, StoreError>;

    fn put_marker_quality(&self, annotation: &MarkerQuality) -> Result<(), StoreError>;

    /// All annotations for an entry, ordered by marker index.
    fn marker_qualities(&self, entry: EntryId) -> Result<Vec<MarkerQuality>, StoreError>;
}
