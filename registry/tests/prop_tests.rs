use proptest::prelude::*;

use genevault_nullables::NullStore;
use genevault_registry::{ActorDirectory, EntryMetadata, EntryRegistry};
use genevault_store::EntryStore;
use genevault_types::{RequestContext, VaultError, VaultParams};

proptest! {
    /// Ids are strictly increasing across any mix of valid and invalid registrations.
    #[test]
    fn entry_ids_strictly_increase(lengths in prop::collection::vec(28usize..36, 1..40)) {
        let store = NullStore::new();
        let params = VaultParams::default();
        let ctx = RequestContext::new("breeder", 1);
        ActorDirectory::new(&store).register(&ctx, "breeder", "plot").unwrap();
        let registry = EntryRegistry::new(&store, &params);

        let mut last = 0u64;
        for len in lengths {
            match registry.register(&ctx, &vec![9u8; len], &EntryMetadata::new("seed", "plot")) {
                Ok(id) => {
                    prop_assert_eq!(len, 32);
                    prop_assert!(id.as_u64() > last);
                    last = id.as_u64();
                }
                Err(err) => {
                    prop_assert_ne!(len, 32);
                    prop_assert_eq!(err.code(), VaultError::INVALID_PARAMS);
                }
            }
        }
        prop_assert_eq!(store.entry_count().unwrap(), last);
    }

    /// Quality score stays within 0..=100 after any sequence of updates.
    #[test]
    fn quality_score_stays_bounded(scores in prop::collection::vec(any::<u8>(), 1..30)) {
        let store = NullStore::new();
        let params = VaultParams::default();
        let ctx = RequestContext::new("breeder", 1);
        ActorDirectory::new(&store).register(&ctx, "breeder", "plot").unwrap();
        let registry = EntryRegistry::new(&store, &params);
        let id = registry
            .register(&ctx, &[4u8; 32], &EntryMetadata::new("seed", "plot"))
            .unwrap();

        for score in scores {
            let result = registry.update_quality_score(&ctx, id, score);
            prop_assert_eq!(result.is_ok(), score <= 100);
            let entry = registry.get(id).unwrap().unwrap();
            prop_assert!(entry.quality_score <= 100);
            prop_assert_eq!(entry.fingerprint.as_bytes().len(), 32);
        }
    }
}
