//! Nullable store: thread-safe in-memory storage for every registry map.

use genevault_store::{
    ActorRecord, ActorStore, Attestation, AttestationStore, EntryRecord, EntryStore,
    LineageRecord, LineageStore, MarkerQuality, MarkerQualityStore, MarkerSet, MarkerStore,
    MetaStore, StatusStore, StoreError, VerificationStatus, VerifierRecord, VerifierStore,
};
use genevault_types::{ActorId, AttestationId, EntryId};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

use crate::StoreSnapshot;

/// An in-memory implementation of every store trait.
pub struct NullStore {
    actors: Mutex<BTreeMap<ActorId, ActorRecord>>,
    entries: Mutex<BTreeMap<EntryId, EntryRecord>>,
    lineage: Mutex<BTreeMap<EntryId, LineageRecord>>,
    verifiers: Mutex<BTreeMap<ActorId, VerifierRecord>>,
    markers: Mutex<BTreeMap<EntryId, MarkerSet>>,
    attestations: Mutex<BTreeMap<AttestationId, Attestation>>,
    statuses: Mutex<BTreeMap<EntryId, VerificationStatus>>,
    qualities: Mutex<BTreeMap<(EntryId, u8), MarkerQuality>>,
    last_entry_id: AtomicU64,
    last_attestation_id: AtomicU64,
    successful_verifications: AtomicU64,
}

fn guard<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, StoreError> {
    mutex
        .lock()
        .map_err(|_| StoreError::Backend("in-memory table lock poisoned".into()))
}

impl NullStore {
    pub fn new() -> Self {
        Self {
            actors: Mutex::new(BTreeMap::new()),
            entries: Mutex::new(BTreeMap::new()),
            lineage: Mutex::new(BTreeMap::new()),
            verifiers: Mutex::new(BTreeMap::new()),
            markers: Mutex::new(BTreeMap::new()),
            attestations: Mutex::new(BTreeMap::new()),
            statuses: Mutex::new(BTreeMap::new()),
            qualities: Mutex::new(BTreeMap::new()),
            last_entry_id: AtomicU64::new(0),
            last_attestation_id: AtomicU64::new(0),
            successful_verifications: AtomicU64::new(0),
        }
    }

    /// Capture every table and counter.
    pub fn snapshot(&self) -> Result<StoreSnapshot, StoreError> {
        StoreSnapshot {
            actors: guard(&self.actors)?.values().cloned().collect(),
            entries: guard(&self.entries)?.values().cloned().collect(),
            lineage: guard(&self.lineage)?.values().cloned().collect(),
            verifiers: guard(&self.verifiers)?.values().cloned().collect(),
            markers: guard(&self.markers)?.values().cloned().collect(),
            attestations: guard(&self.attestations)?.values().cloned().collect(),
            statuses: guard(&self.statuses)?.values().cloned().collect(),
            qualities: guard(&self.qualities)?.values().cloned().collect(),
            last_entry_id: self.last_entry_id.load(Ordering::SeqCst),
            last_attestation_id: self.last_attestation_id.load(Ordering::SeqCst),
            successful_verifications: self.successful_verifications.load(Ordering::SeqCst),
            ..Default::default()
        }
        .seal()
    }

    /// Rebuild a store from a snapshot, rejecting it if its digest does not match.
    pub fn restore(snapshot: StoreSnapshot) -> Result<Self, StoreError> {
        if !snapshot.verify() {
            return Err(StoreError::Corruption(
                "snapshot digest does not match its contents".into(),
            ));
        }
        let store = Self::new();
        store.last_entry_id.store(snapshot.last_entry_id, Ordering::SeqCst);
        store
            .last_attestation_id
            .store(snapshot.last_attestation_id, Ordering::SeqCst);
        store
            .successful_verifications
            .store(snapshot.successful_verifications, Ordering::SeqCst);
        {
            let mut actors = guard(&store.actors)?;
            actors.extend(snapshot.actors.into_iter().map(|a| (a.id.clone(), a)));
        }
        guard(&store.entries)?.extend(snapshot.entries.into_iter().map(|e| (e.id, e)));
        guard(&store.lineage)?.extend(snapshot.lineage.into_iter().map(|l| (l.child, l)));
        {
            let mut verifiers = guard(&store.verifiers)?;
            verifiers.extend(
                snapshot
                    .verifiers
                    .into_iter()
                    .map(|v| (v.identity.clone(), v)),
            );
        }
        guard(&store.markers)?.extend(snapshot.markers.into_iter().map(|m| (m.entry, m)));
        guard(&store.attestations)?
            .extend(snapshot.attestations.into_iter().map(|a| (a.id, a)));
        guard(&store.statuses)?.extend(snapshot.statuses.into_iter().map(|s| (s.entry, s)));
        guard(&store.qualities)?.extend(
            snapshot
                .qualities
                .into_iter()
                .map(|q| ((q.entry, q.index), q)),
        );
        Ok(store)
    }
}

impl Default for NullStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ActorStore for NullStore {
    fn get_actor(&self, id: &ActorId) -> Result<Option<ActorRecord>, StoreError> {
        Ok(guard(&self.actors)?.get(id).cloned())
    }

    fn put_actor(&self, record: &ActorRecord) -> Result<(), StoreError> {
        guard(&self.actors)?.insert(record.id.clone(), record.clone());
        Ok(())
    }
}

impl EntryStore for NullStore {
    fn get_entry(&self, id: EntryId) -> Result<Option<EntryRecord>, StoreError> {
        Ok(guard(&self.entries)?.get(&id).cloned())
    }

    fn put_entry(&self, record: &EntryRecord) -> Result<(), StoreError> {
        guard(&self.entries)?.insert(record.id, record.clone());
        Ok(())
    }

    fn entry_count(&self) -> Result<u64, StoreError> {
        Ok(guard(&self.entries)?.len() as u64)
    }
}

impl LineageStore for NullStore {
    fn get_lineage(&self, child: EntryId) -> Result<Option<LineageRecord>, StoreError> {
        Ok(guard(&self.lineage)?.get(&child).cloned())
    }

    fn put_lineage(&self, record: &LineageRecord) -> Result<(), StoreError> {
        guard(&self.lineage)?.insert(record.child, record.clone());
        Ok(())
    }
}

impl VerifierStore for NullStore {
    fn get_verifier(&self, identity: &ActorId) -> Result<Option<VerifierRecord>, StoreError> {
        Ok(guard(&self.verifiers)?.get(identity).cloned())
    }

    fn put_verifier(&self, record: &VerifierRecord) -> Result<(), StoreError> {
        guard(&self.verifiers)?.insert(record.identity.clone(), record.clone());
        Ok(())
    }

    fn iter_verifiers(&self) -> Result<Vec<VerifierRecord>, StoreError> {
        Ok(guard(&self.verifiers)?.values().cloned().collect())
    }
}

impl MarkerStore for NullStore {
    fn get_markers(&self, entry: EntryId) -> Result<Option<MarkerSet>, StoreError> {
        Ok(guard(&self.markers)?.get(&entry).cloned())
    }

    fn put_markers(&self, set: &MarkerSet) -> Result<(), StoreError> {
        guard(&self.markers)?.insert(set.entry, set.clone());
        Ok(())
    }
}

impl AttestationStore for NullStore {
    fn get_attestation(&self, id: AttestationId) -> Result<Option<Attestation>, StoreError> {
        Ok(guard(&self.attestations)?.get(&id).cloned())
    }

    fn append_attestation(&self, attestation: &Attestation) -> Result<(), StoreError> {
        let mut log = guard(&self.attestations)?;
        if log.contains_key(&attestation.id) {
            return Err(StoreError::Duplicate(attestation.id.to_string()));
        }
        log.insert(attestation.id, attestation.clone());
        Ok(())
    }

    fn last_attestation(&self) -> Result<Option<Attestation>, StoreError> {
        Ok(guard(&self.attestations)?
            .last_key_value()
            .map(|(_, a)| a.clone()))
    }

    fn iter_attestations(&self) -> Result<Vec<Attestation>, StoreError> {
        Ok(guard(&self.attestations)?.values().cloned().collect())
    }

    fn attestation_count(&self) -> Result<u64, StoreError> {
        Ok(guard(&self.attestations)?.len() as u64)
    }
}

impl StatusStore for NullStore {
    fn get_status(&self, entry: EntryId) -> Result<Option<VerificationStatus>, StoreError> {
        Ok(guard(&self.statuses)?.get(&entry).cloned())
    }

    fn put_status(&self, status: &VerificationStatus) -> Result<(), StoreError> {
        guard(&self.statuses)?.insert(status.entry, status.clone());
        Ok(())
    }
}

impl MarkerQualityStore for NullStore {
    fn get_marker_quality(
        &self,
        entry: EntryId,
        index: u8,
    ) -> Result<Option<MarkerQuality>, StoreError> {
        Ok(guard(&self.qualities)?.get(&(entry, index)).cloned())
    }

    fn put_marker_quality(&self, annotation: &MarkerQuality) -> Result<(), StoreError> {
        guard(&self.qualities)?.insert((annotation.entry, annotation.index), annotation.clone());
        Ok(())
    }

    fn marker_qualities(&self, entry: EntryId) -> Result<Vec<MarkerQuality>, StoreError> {
        Ok(guard(&self.qualities)?
            .range((entry, 0)..=(entry, u8::MAX))
            .map(|(_, q)| q.clone())
            .collect())
    }
}

impl MetaStore for NullStore {
    fn next_entry_id(&self) -> Result<EntryId, StoreError> {
        Ok(EntryId::new(
            self.last_entry_id.fetch_add(1, Ordering::SeqCst) + 1,
        ))
    }

    fn next_attestation_id(&self) -> Result<AttestationId, StoreError> {
        Ok(AttestationId::new(
            self.last_attestation_id.fetch_add(1, Ordering::SeqCst) + 1,
        ))
    }

    fn record_successful_verification(&self) -> Result<u64, StoreError> {
        Ok(self.successful_verifications.fetch_add(1, Ordering::SeqCst) + 1)
    }

    fn successful_verifications(&self) -> Result<u64, StoreError> {
        Ok(self.successful_verifications.load(Ordering::SeqCst))
    }
}
