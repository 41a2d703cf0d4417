//! Reference marker sets attached to entries.

use crate::parse_markers;
use genevault_registry::unlocked_owned_entry;
use genevault_store::{EntryStore, MarkerQuality, MarkerQualityStore, MarkerSet, MarkerStore};
use genevault_types::{EntryId, RequestContext, VaultError, VaultParams};
use tracing::debug;

/// Quality and stability given to marker 0 when a set is stored.
const SEEDED_SCORE: u8 = 100;

pub struct MarkerBook<'a, S> {
    store: &'a S,
    params: &'a VaultParams,
}

impl<'a, S> MarkerBook<'a, S>
where
    S: EntryStore + MarkerStore + MarkerQualityStore,
{
    pub fn new(store: &'a S, params: &'a VaultParams) -> Self {
        Self { store, params }
    }

    /// Replace the reference markers of an entry the caller owns.
    ///
    /// Between `min_markers` and `max_markers` fragments, each exactly 32 bytes.
    /// Also seeds a quality annotation for marker 0.
    pub fn add(
        &self,
        ctx: &RequestContext,
        entry: EntryId,
        markers: &[Vec<u8>],
    ) -> Result<(), VaultError> {
        if !self.params.marker_count_in_range(markers.len()) {
            return Err(VaultError::InsufficientMarkers {
                got: markers.len(),
                min: self.params.min_markers,
                max: self.params.max_markers,
            });
        }
        let markers = parse_markers(markers)?;
        unlocked_owned_entry(self.store, ctx, entry)?;

        self.store.put_markers(&MarkerSet {
            entry,
            markers,
            updated_at: ctx.height,
        })?;
        self.store.put_marker_quality(&MarkerQuality {
            entry,
            index: 0,
            quality: SEEDED_SCORE,
            stability: SEEDED_SCORE,
            updated_at: ctx.height,
            updated_by: ctx.caller.clone(),
        })?;
        debug!(%entry, "reference markers stored");
        Ok(())
    }

    pub fn get(&self, entry: EntryId) -> Result<Option<MarkerSet>, VaultError> {
        Ok(self.store.get_markers(entry)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use genevault_nullables::NullStore;
    use genevault_registry::{ActorDirectory, EntryMetadata, EntryRegistry};

    fn setup(store: &NullStore, params: &VaultParams) -> (RequestContext, EntryId) {
        let ctx = RequestContext::new("breeder", 2);
        ActorDirectory::new(store).register(&ctx, "breeder", "plot").unwrap();
        let id = EntryRegistry::new(store, params)
            .register(&ctx, &[3u8; 32], &EntryMetadata::new("seed", "plot"))
            .unwrap();
        (ctx, id)
    }

    fn markers(n: usize) -> Vec<Vec<u8>> {
        (0..n).map(|i| vec![i as u8; 32]).collect()
    }

    #[test]
    fn add_overwrites_and_seeds_quality() {
        let store = NullStore::new();
        let params = VaultParams::default();
        let (ctx, id) = setup(&store, &params);
        let book = MarkerBook::new(&store, &params);

        book.add(&ctx, id, &markers(5)).unwrap();
        book.add(&ctx, id, &markers(3)).unwrap();
        assert_eq!(book.get(id).unwrap().unwrap().markers.len(), 3);

        let seeded = store.get_marker_quality(id, 0).unwrap().unwrap();
        assert_eq!((seeded.quality, seeded.stability), (100, 100));
        assert_eq!(seeded.updated_by, ctx.caller);
    }

    #[test]
    fn count_bounds() {
        let store = NullStore::new();
        let params = VaultParams::default();
        let (ctx, id) = setup(&store, &params);
        let book = MarkerBook::new(&store, &params);

        for n in [0, 2, 21] {
            assert!(matches!(
                book.add(&ctx, id, &markers(n)),
                Err(VaultError::InsufficientMarkers { .. })
            ));
        }
        book.add(&ctx, id, &markers(20)).unwrap();
    }

    #[test]
    fn wrong_width_fragment_rejected() {
        let store = NullStore::new();
        let params = VaultParams::default();
        let (ctx, id) = setup(&store, &params);
        let book = MarkerBook::new(&store, &params);

        let mut bad = markers(4);
        bad[2] = vec![1u8; 16];
        assert_eq!(book.add(&ctx, id, &bad), Err(VaultError::InvalidHash(16)));
        assert!(book.get(id).unwrap().is_none());
        assert!(store.get_marker_quality(id, 0).unwrap().is_none());
    }

    #[test]
    fn only_unlocked_owner_may_attach() {
        let store = NullStore::new();
        let params = VaultParams::default();
        let (ctx, id) = setup(&store, &params);
        let book = MarkerBook::new(&store, &params);

        assert!(matches!(
            book.add(&RequestContext::new("rival", 3), id, &markers(3)),
            Err(VaultError::Unauthorized(_))
        ));
        assert!(matches!(
            book.add(&ctx, EntryId::new(50), &markers(3)),
            Err(VaultError::NotFound(_))
        ));
        EntryRegistry::new(&store, &params).lock(&ctx, id).unwrap();
        assert!(matches!(
            book.add(&ctx, id, &markers(3)),
            Err(VaultError::VaultLocked(_))
        ));
    }
}
