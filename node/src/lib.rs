//! GeneVault node: the boundary every caller goes through.
//!
//! [`Vault`] wires the registry and verification crates onto one store and runs
//! each exposed operation under a single lock, so concurrent hosts observe the same
//! one-operation-at-a-time total order the core assumes.

pub mod config;
pub mod error;
pub mod persistence;
pub mod vault;

pub use config::VaultConfig;
pub use error::NodeError;
pub use vault::Vault;
