//! Lineage graph: multi-parent ancestry per child entry.
//!
//! The stored relation is a directed reference set, not a validated DAG: a write
//! checks that every parent exists, that the child does not list itself, and that
//! no parent appears twice. Cycles through longer chains are not rejected, so
//! traversal ([`LineageGraph::ancestors`]) de-duplicates and is depth-bounded.

use crate::unlocked_owned_entry;
use genevault_store::{EntryStore, LineageRecord, LineageStore};
use genevault_types::{EntryId, RequestContext, VaultError, VaultParams};
use std::collections::{HashSet, VecDeque};
use tracing::debug;

pub struct LineageGraph<'a, S> {
    store: &'a S,
    params: &'a VaultParams,
}

impl<'a, S> LineageGraph<'a, S>
where
    S: EntryStore + LineageStore,
{
    pub fn new(store: &'a S, params: &'a VaultParams) -> Self {
        Self { store, params }
    }

    /// Replace the recorded parents of `child`.
    ///
    /// Only the child's owner may record lineage, and only while the child is
    /// unlocked. A later call overwrites the earlier set; nothing accumulates.
    pub fn record(
        &self,
        ctx: &RequestContext,
        child: EntryId,
        parents: &[EntryId],
    ) -> Result<(), VaultError> {
        unlocked_owned_entry(self.store, ctx, child)?;

        if parents.is_empty() || parents.len() > self.params.max_parents {
            return Err(VaultError::InvalidParams(format!(
                "lineage needs 1 to {} parents, got {}",
                self.params.max_parents,
                parents.len()
            )));
        }
        if parents.contains(&child) {
            return Err(VaultError::InvalidParams(format!(
                "{child} cannot be its own parent"
            )));
        }
        let mut seen = HashSet::with_capacity(parents.len());
        if !parents.iter().all(|p| seen.insert(*p)) {
            return Err(VaultError::InvalidParams("duplicate parent id".into()));
        }

        let all_present = parents.iter().try_fold(true, |acc, parent| {
            self.store.entry_exists(*parent).map(|exists| acc && exists)
        })?;
        if !all_present {
            return Err(VaultError::NotFound("one or more parent entries".into()));
        }

        self.store.put_lineage(&LineageRecord {
            child,
            parents: parents.to_vec(),
            recorded_by: ctx.caller.clone(),
            recorded_at: ctx.height,
        })?;
        debug!(%child, parents = parents.len(), "lineage recorded");
        Ok(())
    }

    /// The recorded parents of `entry`, if any.
    pub fn parents(&self, entry: EntryId) -> Result<Option<Vec<EntryId>>, VaultError> {
        Ok(self.store.get_lineage(entry)?.map(|l| l.parents))
    }

    pub fn get(&self, entry: EntryId) -> Result<Option<LineageRecord>, VaultError> {
        Ok(self.store.get_lineage(entry)?)
    }

    /// Every ancestor reachable within `max_depth` generations, nearest first.
    ///
    /// Each ancestor is listed once, and `entry` itself is never included.
    pub fn ancestors(&self, entry: EntryId, max_depth: usize) -> Result<Vec<EntryId>, VaultError> {
        let mut seen = HashSet::from([entry]);
        let mut out = Vec::new();
        let mut queue = VecDeque::from([(entry, 0usize)]);

        while let Some((current, depth)) = queue.pop_front() {
            if depth == max_depth {
                continue;
            }
            let Some(record) = self.store.get_lineage(current)? else {
                continue;
            };
            for parent in record.parents {
                if seen.insert(parent) {
                    out.push(parent);
                    queue.push_back((parent, depth + 1));
                }
            }
        }
        Ok(out)
    }
}
