//! The vault facade: every boundary operation, serialized.

use std::sync::Mutex;

use genevault_nullables::NullStore;
use genevault_registry::{ActorDirectory, EntryMetadata, EntryRegistry, LineageGraph};
use genevault_store::{
    ActorRecord, Attestation, EntryRecord, LineageRecord, MarkerQuality, MarkerSet, VaultStore,
    VerificationStatus, VerifierRecord,
};
use genevault_types::{
    ActorId, AttestationId, EntryId, Height, RequestContext, VaultError, VaultParams,
};
use genevault_utils::StatsCounter;
use genevault_verification::{
    comparator_for, MarkerBook, MarkerComparator, MarkerQualityAudit, VerificationEngine,
    VerificationOutcome, VerifierLedger,
};
use tracing::debug;

use crate::persistence::{load_snapshot, save_snapshot};
use crate::{NodeError, VaultConfig};

const ACCEPTED: &str = "operations_accepted";
const REJECTED: &str = "operations_rejected";
const VERIFICATIONS: &str = "verification_attempts";

/// A registry deployment: one store, fixed parameters and administrative identity.
pub struct Vault<S = NullStore> {
    store: S,
    params: VaultParams,
    admin: ActorId,
    comparator: Box<dyn MarkerComparator>,
    /// Held for the whole of each mutating operation.
    op_lock: Mutex<()>,
    stats: StatsCounter,
}

impl Vault<NullStore> {
    /// Open the vault described by `config`, restoring its snapshot if present.
    pub fn open(config: &VaultConfig) -> Result<Self, NodeError> {
        let store = load_snapshot(&config.snapshot_path())?;
        Self::with_store(store, config.params.clone(), config.admin.clone())
            .map_err(NodeError::from)
    }

    /// Persist the current state to `config`'s snapshot path.
    pub fn persist(&self, config: &VaultConfig) -> Result<(), NodeError> {
        let _guard = self.serialize()?;
        save_snapshot(&self.store, &config.snapshot_path())
    }
}

impl<S: VaultStore> Vault<S> {
    /// Build a vault over `store`. Fails `InvalidParams` if `params` are out of bounds.
    pub fn with_store(
        store: S,
        params: VaultParams,
        admin: ActorId,
    ) -> Result<Self, VaultError> {
        params.validate()?;
        let comparator = comparator_for(params.match_policy);
        Ok(Self {
            store,
            params,
            admin,
            comparator,
            op_lock: Mutex::new(()),
            stats: StatsCounter::new(&[ACCEPTED, REJECTED, VERIFICATIONS]),
        })
    }

    pub fn admin(&self) -> &ActorId {
        &self.admin
    }

    pub fn params(&self) -> &VaultParams {
        &self.params
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn serialize(&self) -> Result<std::sync::MutexGuard<'_, ()>, VaultError> {
        self.op_lock
            .lock()
            .map_err(|_| VaultError::Storage("operation lock poisoned".into()))
    }

    /// Run one mutating operation under the operation lock and count its outcome.
    fn run<T>(
        &self,
        op: &'static str,
        ctx: &RequestContext,
        f: impl FnOnce() -> Result<T, VaultError>,
    ) -> Result<T, VaultError> {
        let _guard = self.serialize()?;
        let result = f();
        match &result {
            Ok(_) => self.stats.increment(ACCEPTED),
            Err(err) => {
                self.stats.increment(REJECTED);
                debug!(op, caller = %ctx.caller, height = %ctx.height, code = err.code(), %err, "operation rejected");
            }
        }
        result
    }

    fn engine(&self) -> VerificationEngine<'_, S, &dyn MarkerComparator> {
        VerificationEngine::with_comparator(
            &self.store,
            &self.params,
            &self.admin,
            self.comparator.as_ref(),
        )
    }

    // ── Mutating operations ────────────────────────────────────────────

    pub fn register_actor(
        &self,
        ctx: &RequestContext,
        name: &str,
        location: &str,
    ) -> Result<ActorRecord, VaultError> {
        self.run("register_actor", ctx, || {
            ActorDirectory::new(&self.store).register(ctx, name, location)
        })
    }

    pub fn register_entry(
        &self,
        ctx: &RequestContext,
        fingerprint: &[u8],
        metadata: &EntryMetadata,
    ) -> Result<EntryId, VaultError> {
        self.run("register_entry", ctx, || {
            EntryRegistry::new(&self.store, &self.params).register(ctx, fingerprint, metadata)
        })
    }

    pub fn lock_entry(&self, ctx: &RequestContext, id: EntryId) -> Result<(), VaultError> {
        self.run("lock_entry", ctx, || {
            EntryRegistry::new(&self.store, &self.params).lock(ctx, id)
        })
    }

    pub fn unlock_entry(&self, ctx: &RequestContext, id: EntryId) -> Result<(), VaultError> {
        self.run("unlock_entry", ctx, || {
            EntryRegistry::new(&self.store, &self.params).unlock(ctx, id)
        })
    }

    pub fn update_score(
        &self,
        ctx: &RequestContext,
        id: EntryId,
        score: u8,
    ) -> Result<(), VaultError> {
        self.run("update_score", ctx, || {
            EntryRegistry::new(&self.store, &self.params).update_quality_score(ctx, id, score)
        })
    }

    pub fn record_lineage(
        &self,
        ctx: &RequestContext,
        child: EntryId,
        parents: &[EntryId],
    ) -> Result<(), VaultError> {
        self.run("record_lineage", ctx, || {
            LineageGraph::new(&self.store, &self.params).record(ctx, child, parents)
        })
    }

    pub fn register_verifier(
        &self,
        ctx: &RequestContext,
        specialization: &str,
        certification_level: u8,
    ) -> Result<VerifierRecord, VaultError> {
        self.run("register_verifier", ctx, || {
            VerifierLedger::new(&self.store, &self.params, &self.admin).register(
                ctx,
                specialization,
                certification_level,
            )
        })
    }

    pub fn revoke_verifier(
        &self,
        ctx: &RequestContext,
        identity: &ActorId,
    ) -> Result<(), VaultError> {
        self.run("revoke_verifier", ctx, || {
            VerifierLedger::new(&self.store, &self.params, &self.admin).revoke(ctx, identity)
        })
    }

    pub fn add_markers(
        &self,
        ctx: &RequestContext,
        entry: EntryId,
        markers: &[Vec<u8>],
    ) -> Result<(), VaultError> {
        self.run("add_markers", ctx, || {
            MarkerBook::new(&self.store, &self.params).add(ctx, entry, markers)
        })
    }

    pub fn verify(
        &self,
        ctx: &RequestContext,
        entry: EntryId,
        hash: &[u8],
        markers: &[Vec<u8>],
        verification_type: &str,
    ) -> Result<VerificationOutcome, VaultError> {
        self.stats.increment(VERIFICATIONS);
        self.run("verify", ctx, || {
            self.engine()
                .verify(ctx, entry, hash, markers, verification_type)
        })
    }

    pub fn update_marker_quality(
        &self,
        ctx: &RequestContext,
        entry: EntryId,
        index: u8,
        quality: u8,
        stability: u8,
    ) -> Result<(), VaultError> {
        self.run("update_marker_quality", ctx, || {
            MarkerQualityAudit::new(&self.store, &self.params, &self.admin)
                .update(ctx, entry, index, quality, stability)
        })
    }

    // ── Read accessors (absent, not an error, for unknown keys) ─────────
    //
    // Reads spanning several records take the operation lock so they never observe
    // an attestation whose status update is still pending.

    pub fn actor(&self, id: &ActorId) -> Result<Option<ActorRecord>, VaultError> {
        ActorDirectory::new(&self.store).get(id)
    }

    pub fn entry(&self, id: EntryId) -> Result<Option<EntryRecord>, VaultError> {
        EntryRegistry::new(&self.store, &self.params).get(id)
    }

    pub fn lineage(&self, id: EntryId) -> Result<Option<LineageRecord>, VaultError> {
        LineageGraph::new(&self.store, &self.params).get(id)
    }

    pub fn ancestors(&self, id: EntryId, max_depth: usize) -> Result<Vec<EntryId>, VaultError> {
        let _guard = self.serialize()?;
        LineageGraph::new(&self.store, &self.params).ancestors(id, max_depth)
    }

    pub fn verifier(&self, identity: &ActorId) -> Result<Option<VerifierRecord>, VaultError> {
        VerifierLedger::new(&self.store, &self.params, &self.admin).get(identity)
    }

    pub fn is_authorized(&self, identity: &ActorId) -> Result<bool, VaultError> {
        VerifierLedger::new(&self.store, &self.params, &self.admin).is_authorized(identity)
    }

    pub fn markers(&self, entry: EntryId) -> Result<Option<MarkerSet>, VaultError> {
        MarkerBook::new(&self.store, &self.params).get(entry)
    }

    pub fn marker_quality(
        &self,
        entry: EntryId,
        index: u8,
    ) -> Result<Option<MarkerQuality>, VaultError> {
        MarkerQualityAudit::new(&self.store, &self.params, &self.admin).get(entry, index)
    }

    pub fn marker_quality_report(&self, entry: EntryId) -> Result<Vec<MarkerQuality>, VaultError> {
        let _guard = self.serialize()?;
        MarkerQualityAudit::new(&self.store, &self.params, &self.admin).report(entry)
    }

    pub fn status(&self, entry: EntryId) -> Result<Option<VerificationStatus>, VaultError> {
        let _guard = self.serialize()?;
        self.engine().status(entry)
    }

    pub fn is_currently_verified(&self, entry: EntryId, now: Height) -> Result<bool, VaultError> {
        let _guard = self.serialize()?;
        self.engine().is_currently_verified(entry, now)
    }

    pub fn require_authentic(
        &self,
        entry: EntryId,
        now: Height,
    ) -> Result<VerificationStatus, VaultError> {
        let _guard = self.serialize()?;
        self.engine().require_authentic(entry, now)
    }

    pub fn attestation(&self, id: AttestationId) -> Result<Option<Attestation>, VaultError> {
        let _guard = self.serialize()?;
        self.engine().attestation(id)
    }

    pub fn history(&self, entry: EntryId) -> Result<Vec<Attestation>, VaultError> {
        let _guard = self.serialize()?;
        self.engine().history(entry)
    }

    pub fn verify_attestation_chain(&self) -> Result<Option<AttestationId>, VaultError> {
        let _guard = self.serialize()?;
        self.engine().verify_attestation_chain()
    }

    pub fn successful_verifications(&self) -> Result<u64, VaultError> {
        let _guard = self.serialize()?;
        self.engine().successful_verifications()
    }

    /// Operation counters since this vault was opened.
    pub fn stats(&self) -> std::collections::BTreeMap<&'static str, u64> {
        self.stats.snapshot()
    }
}
