//! Entry registry: registration, locking, and quality scoring.

use crate::{owned_entry, unlocked_owned_entry, ActorDirectory};
use genevault_store::{ActorStore, EntryRecord, EntryStore, MetaStore};
use genevault_types::{EntryId, Fingerprint, RequestContext, VaultError, VaultParams};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Free-form descriptive fields supplied at registration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryMetadata {
    /// e.g. "seed", "cutting", "tissue culture".
    pub entry_type: String,
    pub location: String,
}

impl EntryMetadata {
    pub fn new(entry_type: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            entry_type: entry_type.into(),
            location: location.into(),
        }
    }
}

pub struct EntryRegistry<'a, S> {
    store: &'a S,
    params: &'a VaultParams,
}

impl<'a, S> EntryRegistry<'a, S>
where
    S: EntryStore + ActorStore + MetaStore,
{
    pub fn new(store: &'a S, params: &'a VaultParams) -> Self {
        Self { store, params }
    }

    /// Register a new entry owned by the caller.
    ///
    /// The caller must be a registered actor. The fingerprint must be exactly 32 bytes
    /// and both metadata fields non-empty. Ids are assigned only after every check has
    /// passed, so a rejected call never consumes one.
    pub fn register(
        &self,
        ctx: &RequestContext,
        fingerprint: &[u8],
        metadata: &EntryMetadata,
    ) -> Result<EntryId, VaultError> {
        let fingerprint = Fingerprint::from_slice(fingerprint).ok_or_else(|| {
            VaultError::InvalidParams(format!(
                "fingerprint must be 32 bytes, got {}",
                fingerprint.len()
            ))
        })?;
        if metadata.entry_type.trim().is_empty() || metadata.location.trim().is_empty() {
            return Err(VaultError::InvalidParams(
                "entry type and location are required".into(),
            ));
        }
        let mut actor = ActorDirectory::new(self.store).require(ctx)?;

        let id = self.store.next_entry_id()?;
        let record = EntryRecord {
            id,
            fingerprint,
            owner: ctx.caller.clone(),
            locked: false,
            quality_score: self.params.default_quality_score,
            entry_type: metadata.entry_type.clone(),
            location: metadata.location.clone(),
            registered_at: ctx.height,
        };
        self.store.put_entry(&record)?;
        actor.entry_count += 1;
        self.store.put_actor(&actor)?;

        debug!(%id, owner = %ctx.caller, %fingerprint, "entry registered");
        Ok(id)
    }

    /// Lock an entry against owner mutations. Idempotent.
    pub fn lock(&self, ctx: &RequestContext, id: EntryId) -> Result<(), VaultError> {
        self.set_locked(ctx, id, true)
    }

    /// Unlock a previously locked entry. Idempotent.
    pub fn unlock(&self, ctx: &RequestContext, id: EntryId) -> Result<(), VaultError> {
        self.set_locked(ctx, id, false)
    }

    fn set_locked(&self, ctx: &RequestContext, id: EntryId, locked: bool) -> Result<(), VaultError> {
        let mut entry = owned_entry(self.store, ctx, id)?;
        entry.locked = locked;
        self.store.put_entry(&entry)?;
        debug!(%id, locked, "entry lock changed");
        Ok(())
    }

    /// Overwrite the quality score of an unlocked entry the caller owns.
    pub fn update_quality_score(
        &self,
        ctx: &RequestContext,
        id: EntryId,
        score: u8,
    ) -> Result<(), VaultError> {
        let mut entry = unlocked_owned_entry(self.store, ctx, id)?;
        if score > self.params.max_score {
            return Err(VaultError::InvalidParams(format!(
                "quality score {score} exceeds {}",
                self.params.max_score
            )));
        }
        entry.quality_score = score;
        self.store.put_entry(&entry)?;
        debug!(%id, score, "entry quality updated");
        Ok(())
    }

    pub fn get(&self, id: EntryId) -> Result<Option<EntryRecord>, VaultError> {
        Ok(self.store.get_entry(id)?)
    }

    pub fn is_locked(&self, id: EntryId) -> Result<Option<bool>, VaultError> {
        Ok(self.store.get_entry(id)?.map(|e| e.locked))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use genevault_nullables::NullStore;
    use genevault_types::ActorId;

    fn setup(store: &NullStore, who: &str) -> RequestContext {
        let ctx = RequestContext::new(who, 10);
        ActorDirectory::new(store)
            .register(&ctx, who, "north field")
            .unwrap();
        ctx
    }

    fn meta() -> EntryMetadata {
        EntryMetadata::new("seed", "cold store 2")
    }

    #[test]
    fn register_assigns_increasing_ids_and_defaults() {
        let store = NullStore::new();
        let params = VaultParams::default();
        let reg = EntryRegistry::new(&store, &params);
        let ctx = setup(&store, "farm_a");

        let a = reg.register(&ctx, &[1u8; 32], &meta()).unwrap();
        let b = reg.register(&ctx, &[2u8; 32], &meta()).unwrap();
        assert_eq!(a, EntryId::new(1));
        assert_eq!(b, EntryId::new(2));

        let entry = reg.get(a).unwrap().unwrap();
        assert_eq!(entry.owner, ActorId::new("farm_a"));
        assert_eq!(entry.quality_score, 50);
        assert!(!entry.locked);
        assert_eq!(store.get_actor(&ctx.caller).unwrap().unwrap().entry_count, 2);
    }

    #[test]
    fn short_fingerprint_rejected_without_consuming_id() {
        let store = NullStore::new();
        let params = VaultParams::default();
        let reg = EntryRegistry::new(&store, &params);
        let ctx = setup(&store, "farm_a");

        let err = reg.register(&ctx, &[1u8; 31], &meta()).unwrap_err();
        assert_eq!(err.code(), VaultError::INVALID_PARAMS);
        assert_eq!(reg.register(&ctx, &[1u8; 32], &meta()).unwrap(), EntryId::new(1));
    }

    #[test]
    fn empty_metadata_rejected() {
        let store = NullStore::new();
        let params = VaultParams::default();
        let reg = EntryRegistry::new(&store, &params);
        let ctx = setup(&store, "farm_a");
        let result = reg.register(&ctx, &[1u8; 32], &EntryMetadata::new("", "here"));
        assert!(matches!(result, Err(VaultError::InvalidParams(_))));
        assert_eq!(store.entry_count().unwrap(), 0);
    }

    #[test]
    fn unregistered_actor_cannot_register_entries() {
        let store = NullStore::new();
        let params = VaultParams::default();
        let reg = EntryRegistry::new(&store, &params);
        let result = reg.register(&RequestContext::new("ghost", 1), &[1u8; 32], &meta());
        assert!(matches!(result, Err(VaultError::Unauthorized(_))));
    }

    #[test]
    fn only_owner_can_lock() {
        let store = NullStore::new();
        let params = VaultParams::default();
        let reg = EntryRegistry::new(&store, &params);
        let owner = setup(&store, "farm_a");
        let id = reg.register(&owner, &[1u8; 32], &meta()).unwrap();

        let other = RequestContext::new("farm_b", 11);
        assert!(matches!(reg.lock(&other, id), Err(VaultError::Unauthorized(_))));
        assert_eq!(reg.is_locked(id).unwrap(), Some(false));

        reg.lock(&owner, id).unwrap();
        reg.lock(&owner, id).unwrap();
        assert_eq!(reg.is_locked(id).unwrap(), Some(true));
        reg.unlock(&owner, id).unwrap();
        assert_eq!(reg.is_locked(id).unwrap(), Some(false));
    }

    #[test]
    fn lock_unknown_entry_not_found() {
        let store = NullStore::new();
        let params = VaultParams::default();
        let reg = EntryRegistry::new(&store, &params);
        let owner = setup(&store, "farm_a");
        assert!(matches!(
            reg.lock(&owner, EntryId::new(42)),
            Err(VaultError::NotFound(_))
        ));
        assert_eq!(reg.is_locked(EntryId::new(42)).unwrap(), None);
    }

    #[test]
    fn quality_score_bounds_and_lock() {
        let store = NullStore::new();
        let params = VaultParams::default();
        let reg = EntryRegistry::new(&store, &params);
        let owner = setup(&store, "farm_a");
        let id = reg.register(&owner, &[1u8; 32], &meta()).unwrap();

        reg.update_quality_score(&owner, id, 100).unwrap();
        assert!(matches!(
            reg.update_quality_score(&owner, id, 101),
            Err(VaultError::InvalidParams(_))
        ));
        assert_eq!(reg.get(id).unwrap().unwrap().quality_score, 100);

        reg.lock(&owner, id).unwrap();
        assert!(matches!(
            reg.update_quality_score(&owner, id, 10),
            Err(VaultError::VaultLocked(_))
        ));
        assert_eq!(reg.get(id).unwrap().unwrap().quality_score, 100);
    }

    #[test]
    fn non_owner_cannot_rescore() {
        let store = NullStore::new();
        let params = VaultParams::default();
        let reg = EntryRegistry::new(&store, &params);
        let owner = setup(&store, "farm_a");
        let id = reg.register(&owner, &[1u8; 32], &meta()).unwrap();
        let result = reg.update_quality_score(&RequestContext::new("farm_b", 12), id, 70);
        assert!(matches!(result, Err(VaultError::Unauthorized(_))));
    }
}
