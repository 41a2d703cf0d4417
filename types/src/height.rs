//! Height type used for ordering and expiry.
//!
//! The hosting environment supplies a monotonically increasing height with every
//! call. The registry never reads a wall clock.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An environment-supplied, monotonically increasing counter.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Height(u64);

impl Height {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }

    /// The height `blocks` after this one, saturating at `u64::MAX`.
    pub fn plus(&self, blocks: u64) -> Self {
        Self(self.0.saturating_add(blocks))
    }
}

impl fmt::Display for Height {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u64> for Height {
    fn from(value: u64) -> Self {
        Self(value)
    }
}
