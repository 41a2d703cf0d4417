//! Provenance side of the registry.
//!
//! - **Actors**: the directory of identities allowed to own entries.
//! - **Entries**: fingerprinted units of genetic material, owned, lockable, scored.
//! - **Lineage**: the recorded parents of each child entry.
//!
//! The entry registry is the single source of truth for ownership. Every other map
//! references entries by id and checks referential validity at write time only.

pub mod actors;
pub mod entries;
pub mod lineage;

pub use actors::ActorDirectory;
pub use entries::{EntryMetadata, EntryRegistry};
pub use lineage::LineageGraph;

use genevault_store::{EntryRecord, EntryStore};
use genevault_types::{EntryId, RequestContext, VaultError};

/// Load an entry and require the caller to own it.
///
/// `NotFound` for unknown ids, `Unauthorized` for anyone but the owner.
pub fn owned_entry<S: EntryStore>(
    store: &S,
    ctx: &RequestContext,
    id: EntryId,
) -> Result<EntryRecord, VaultError> {
    let entry = store
        .get_entry(id)?
        .ok_or_else(|| VaultError::NotFound(id.to_string()))?;
    if entry.owner != ctx.caller {
        return Err(VaultError::Unauthorized(ctx.caller.to_string()));
    }
    Ok(entry)
}

/// Like [`owned_entry`], additionally refusing locked entries with `VaultLocked`.
pub fn unlocked_owned_entry<S: EntryStore>(
    store: &S,
    ctx: &RequestContext,
    id: EntryId,
) -> Result<EntryRecord, VaultError> {
    let entry = owned_entry(store, ctx, id)?;
    if entry.locked {
        return Err(VaultError::VaultLocked(id.to_string()));
    }
    Ok(entry)
}
