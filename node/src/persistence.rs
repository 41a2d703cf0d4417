//! Snapshot persistence for the in-memory store.
//!
//! Writes go to a sibling temporary file that is then renamed over the target, so
//! a crash mid-write never leaves a truncated snapshot behind.

use genevault_nullables::{NullStore, StoreSnapshot};
use std::path::Path;
use tracing::info;

use crate::NodeError;

/// Write the full store to `path`.
pub fn save_snapshot(store: &NullStore, path: &Path) -> Result<(), NodeError> {
    let snapshot = store.snapshot()?;
    let bytes = snapshot.to_bytes()?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let tmp = path.with_extension("tmp");
    std::fs::write(&tmp, &bytes)?;
    std::fs::rename(&tmp, path)?;
    info!(
        path = %path.display(),
        entries = snapshot.entries.len(),
        attestations = snapshot.attestations.len(),
        "snapshot saved"
    );
    Ok(())
}

/// Load a store from `path`, or an empty one if the file does not exist.
///
/// A snapshot whose digest does not match its contents is rejected.
pub fn load_snapshot(path: &Path) -> Result<NullStore, NodeError> {
    if !path.exists() {
        return Ok(NullStore::new());
    }
    let bytes = std::fs::read(path)?;
    let snapshot = StoreSnapshot::from_bytes(&bytes)?;
    let store = NullStore::restore(snapshot)?;
    info!(path = %path.display(), "snapshot loaded");
    Ok(store)
}
