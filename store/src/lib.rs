//! Abstract storage traits for the GeneVault registry.
//!
//! Every storage backend (in-memory for testing and the reference daemon, or a
//! host-provided durable store) implements these traits. The registry and
//! verification crates depend only on the traits.
//!
//! Each trait covers one keyed map. Records are plain values: an update reads the
//! record, applies a field-level change, and writes the whole replacement back.

pub mod actor;
pub mod attestation;
pub mod entry;
pub mod error;
pub mod lineage;
pub mod marker;
pub mod meta;
pub mod quality;
pub mod status;
pub mod verifier;

pub use actor::{ActorRecord, ActorStore};
pub use attestation::{Attestation, AttestationStore};
pub use entry::{EntryRecord, EntryStore};
pub use error::StoreError;
pub use lineage::{LineageRecord, LineageStore};
pub use marker::{MarkerSet, MarkerStore};
pub use meta::MetaStore;
pub use quality::{MarkerQuality, MarkerQualityStore};
pub use status::{StatusStore, VerificationStatus};
pub use verifier::{VerifierRecord, VerifierStore};

/// Every map the registry needs, behind one bound.
pub trait VaultStore:
    ActorStore
    + EntryStore
    + LineageStore
    + VerifierStore
    + MarkerStore
    + AttestationStore
    + StatusStore
    + MarkerQualityStore
    + MetaStore
{
}

impl<T> VaultStore for T where
    T: ActorStore
        + EntryStore
        + LineageStore
        + VerifierStore
        + MarkerStore
        + AttestationStore
        + StatusStore
        + MarkerQualityStore
        + MetaStore
{
}
