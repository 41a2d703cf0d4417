//! Actor directory storage trait.

use crate::StoreError;
use genevault_types::{ActorId, Height};
use serde::{Deserialize, Serialize};

/// A registered actor (breeder, farmer, seed bank) that may own entries.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorRecord {
    pub id: ActorId,
    pub name: String,
    pub location: String,
    pub registered_at: Height,
    /// Number of entries this actor has registered.
    pub entry_count: u64,
}

pub trait ActorStore {
    fn get_actor(&self, id: &ActorId) -> Result<Option<ActorRecord>, StoreError>;
    fn put_actor(&self, record: &ActorRecord) -> Result<(), StoreError>;

    fn actor_exists(&self, id: &ActorId) -> Result<bool, StoreError> {
        self.get_actor(id).map(|a| a.is_some())
    }
}
