//! Nullable infrastructure for deterministic testing.
//!
//! Storage is abstracted behind the `genevault-store` traits. This crate provides a
//! test-friendly implementation that:
//! - Keeps everything in memory
//! - Is deterministic (ordered maps, sequential ids)
//! - Never touches the filesystem or network
//!
//! The reference daemon also runs on [`NullStore`], persisting it through
//! [`StoreSnapshot`] between runs.

pub mod snapshot;
pub mod store;

pub use snapshot::StoreSnapshot;
pub use store::NullStore;
