//! Fundamental types for the GeneVault registry.
//!
//! This crate defines the core types shared across every other crate in the workspace:
//! identifiers, fingerprints, heights, the per-call request context, registry
//! parameters, and the caller-visible error categories.

pub mod context;
pub mod error;
pub mod fingerprint;
pub mod hash;
pub mod height;
pub mod id;
pub mod identity;
pub mod params;

pub use context::RequestContext;
pub use error::{ErrorCode, VaultError};
pub use fingerprint::{Fingerprint, Marker, FINGERPRINT_LEN};
pub use hash::{blake2b_256, blake2b_256_multi};
pub use height::Height;
pub use id::{AttestationId, EntryId};
pub use identity::ActorId;
pub use params::{MatchPolicy, ReputationMode, VaultParams};
