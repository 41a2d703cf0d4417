//! Marker quality audit: descriptive annotations written by verifiers.

use crate::VerifierLedger;
use genevault_store::{EntryStore, MarkerQuality, MarkerQualityStore, VerifierStore};
use genevault_types::{ActorId, EntryId, RequestContext, VaultError, VaultParams};
use tracing::debug;

pub struct MarkerQualityAudit<'a, S> {
    store: &'a S,
    params: &'a VaultParams,
    admin: &'a ActorId,
}

impl<'a, S> MarkerQualityAudit<'a, S>
where
    S: EntryStore + VerifierStore + MarkerQualityStore,
{
    pub fn new(store: &'a S, params: &'a VaultParams, admin: &'a ActorId) -> Self {
        Self {
            store,
            params,
            admin,
        }
    }

    /// Upsert the annotation for one marker position of an entry.
    pub fn update(
        &self,
        ctx: &RequestContext,
        entry: EntryId,
        index: u8,
        quality: u8,
        stability: u8,
    ) -> Result<(), VaultError> {
        VerifierLedger::new(self.store, self.params, self.admin).require_authorized(ctx)?;
        if quality > self.params.max_score || stability > self.params.max_score {
            return Err(VaultError::InvalidParams(format!(
                "quality {quality} / stability {stability} exceed {}",
                self.params.max_score
            )));
        }
        if usize::from(index) >= self.params.max_markers {
            return Err(VaultError::InvalidParams(format!(
                "marker index {index} out of range"
            )));
        }
        if !self.store.entry_exists(entry)? {
            return Err(VaultError::NotFound(entry.to_string()));
        }

        self.store.put_marker_quality(&MarkerQuality {
            entry,
            index,
            quality,
            stability,
            updated_at: ctx.height,
            updated_by: ctx.caller.clone(),
        })?;
        debug!(%entry, index, quality, stability, verifier = %ctx.caller, "marker quality updated");
        Ok(())
    }

    pub fn get(&self, entry: EntryId, index: u8) -> Result<Option<MarkerQuality>, VaultError> {
        Ok(self.store.get_marker_quality(entry, index)?)
    }

    /// Every annotation for `entry`, ordered by marker index.
    pub fn report(&self, entry: EntryId) -> Result<Vec<MarkerQuality>, VaultError> {
        Ok(self.store.marker_qualities(entry)?)
    }
}
