//! Verification engine: the end-to-end attestation workflow.
//!
//! Every precondition is checked before the first write, so a rejected attempt
//! leaves the log, the status table, the verifier's reputation and the global
//! counter untouched.

use crate::chain::{attestation_digest, find_chain_break};
use crate::comparator::{confidence, MarkerComparator, PositionalComparator};
use crate::ledger::VerifierLedger;
use crate::parse_markers;
use genevault_store::{Attestation, VaultStore, VerificationStatus};
use genevault_types::{
    ActorId, AttestationId, EntryId, Fingerprint, Height, RequestContext, VaultError,
    VaultParams,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// What a caller learns from one verification attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationOutcome {
    pub attestation_id: AttestationId,
    pub verified: bool,
    pub confidence: u8,
    pub matched: u32,
    pub total: u32,
}

pub struct VerificationEngine<'a, S, C = PositionalComparator> {
    store: &'a S,
    params: &'a VaultParams,
    admin: &'a ActorId,
    comparator: C,
}

impl<'a, S: VaultStore> VerificationEngine<'a, S> {
    pub fn new(store: &'a S, params: &'a VaultParams, admin: &'a ActorId) -> Self {
        Self::with_comparator(store, params, admin, PositionalComparator)
    }
}

impl<'a, S: VaultStore, C: MarkerComparator> VerificationEngine<'a, S, C> {
    pub fn with_comparator(
        store: &'a S,
        params: &'a VaultParams,
        admin: &'a ActorId,
        comparator: C,
    ) -> Self {
        Self {
            store,
            params,
            admin,
            comparator,
        }
    }

    fn ledger(&self) -> VerifierLedger<'a, S> {
        VerifierLedger::new(self.store, self.params, self.admin)
    }

    /// Compare submitted markers against the entry's reference set and attest.
    ///
    /// Checks run in a fixed order: hash width (`InvalidHash`), caller authorization
    /// (`Unauthorized`), marker count (`InsufficientMarkers`), marker width
    /// (`InvalidHash`), reference markers present (`NotFound`).
    pub fn verify(
        &self,
        ctx: &RequestContext,
        entry: EntryId,
        provided_hash: &[u8],
        provided_markers: &[Vec<u8>],
        verification_type: &str,
    ) -> Result<VerificationOutcome, VaultError> {
        let provided_hash = Fingerprint::from_slice(provided_hash)
            .ok_or(VaultError::InvalidHash(provided_hash.len()))?;
        let verifier = self.ledger().require_authorized(ctx).inspect_err(|_| {
            warn!(caller = %ctx.caller, %entry, "verification refused: caller not authorized");
        })?;
        if provided_markers.len() < self.params.min_markers {
            return Err(VaultError::InsufficientMarkers {
                got: provided_markers.len(),
                min: self.params.min_markers,
                max: self.params.max_markers,
            });
        }
        let provided = parse_markers(provided_markers)?;
        let stored = self
            .store
            .get_markers(entry)?
            .filter(|set| !set.markers.is_empty())
            .ok_or_else(|| VaultError::NotFound(format!("markers for {entry}")))?;

        let matched = self.comparator.count_matches(&provided, &stored.markers);
        let total = stored.markers.len();
        let confidence = confidence(matched, total);
        let verified = confidence >= self.params.quality_threshold;

        // All checks passed; from here on every step writes.
        let prev_digest = self
            .store
            .last_attestation()?
            .map_or([0u8; 32], |a| a.digest);
        let mut attestation = Attestation {
            id: self.store.next_attestation_id()?,
            entry,
            verifier: ctx.caller.clone(),
            height: ctx.height,
            provided_hash,
            verified,
            confidence,
            matched: matched as u32,
            total: total as u32,
            verification_type: verification_type.to_string(),
            prev_digest,
            digest: [0u8; 32],
        };
        attestation.digest = attestation_digest(&prev_digest, &attestation);
        self.store.append_attestation(&attestation)?;

        let attempt_count = self
            .store
            .get_status(entry)?
            .map_or(0, |s| s.attempt_count)
            + 1;
        self.store.put_status(&VerificationStatus {
            entry,
            is_verified: verified,
            last_attestation: attestation.id,
            last_height: ctx.height,
            attempt_count,
            authenticity_score: confidence,
            expiry: ctx.height.plus(self.params.attestation_validity),
        })?;

        self.ledger().record_attempt(verifier, verified)?;
        if verified {
            self.store.record_successful_verification()?;
        }

        info!(
            attestation = %attestation.id,
            %entry,
            verifier = %ctx.caller,
            comparator = self.comparator.name(),
            matched,
            total,
            confidence,
            verified,
            "attestation recorded"
        );
        Ok(VerificationOutcome {
            attestation_id: attestation.id,
            verified,
            confidence,
            matched: matched as u32,
            total: total as u32,
        })
    }

    pub fn status(&self, entry: EntryId) -> Result<Option<VerificationStatus>, VaultError> {
        Ok(self.store.get_status(entry)?)
    }

    /// Whether the entry's latest attestation passed and has not expired at `now`.
    pub fn is_currently_verified(&self, entry: EntryId, now: Height) -> Result<bool, VaultError> {
        Ok(self
            .store
            .get_status(entry)?
            .is_some_and(|s| s.is_valid_at(now)))
    }

    /// Gate for consumers: the status if currently valid, else `VerificationFailed`.
    ///
    /// Entries that were never attested fail with `NotFound`.
    pub fn require_authentic(
        &self,
        entry: EntryId,
        now: Height,
    ) -> Result<VerificationStatus, VaultError> {
        let status = self
            .store
            .get_status(entry)?
            .ok_or_else(|| VaultError::NotFound(format!("verification status for {entry}")))?;
        if !status.is_verified {
            return Err(VaultError::VerificationFailed(format!(
                "{entry} failed its latest verification"
            )));
        }
        if !status.is_valid_at(now) {
            return Err(VaultError::VerificationFailed(format!(
                "{entry} attestation expired at {}",
                status.expiry
            )));
        }
        Ok(status)
    }

    pub fn attestation(&self, id: AttestationId) -> Result<Option<Attestation>, VaultError> {
        Ok(self.store.get_attestation(id)?)
    }

    /// Attestations for one entry, oldest first.
    pub fn history(&self, entry: EntryId) -> Result<Vec<Attestation>, VaultError> {
        Ok(self
            .store
            .iter_attestations()?
            .into_iter()
            .filter(|a| a.entry == entry)
            .collect())
    }

    /// The first attestation whose chain link is broken, or `None` for an intact log.
    pub fn verify_attestation_chain(&self) -> Result<Option<AttestationId>, VaultError> {
        Ok(find_chain_break(&self.store.iter_attestations()?))
    }

    pub fn successful_verifications(&self) -> Result<u64, VaultError> {
        Ok(self.store.successful_verifications()?)
    }
}
