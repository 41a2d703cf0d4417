//! Fixed-length fingerprints and marker fragments.
//!
//! The registry never stores raw genetic sequences. Callers submit a 32-byte hash
//! (or derive one with [`Fingerprint::digest`]) and every marker fragment uses the
//! same width.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Width in bytes of every fingerprint and marker fragment.
pub const FINGERPRINT_LEN: usize = 32;

/// A 32-byte fingerprint of a unit of genetic material.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Fingerprint([u8; FINGERPRINT_LEN]);

/// One fragment of a marker set. Same width as an entry fingerprint.
pub type Marker = Fingerprint;

impl Fingerprint {
    pub fn new(bytes: [u8; FINGERPRINT_LEN]) -> Self {
        Self(bytes)
    }

    /// Parse a byte slice, returning `None` unless it is exactly 32 bytes long.
    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        <[u8; FINGERPRINT_LEN]>::try_from(bytes).ok().map(Self)
    }

    /// Blake2b-256 of arbitrary material.
    pub fn digest(material: &[u8]) -> Self {
        Self(crate::blake2b_256(material))
    }

    /// Parse a 64-character hex string.
    pub fn from_hex(s: &str) -> Option<Self> {
        hex::decode(s).ok().and_then(|bytes| Self::from_slice(&bytes))
    }

    pub fn as_bytes(&self) -> &[u8; FINGERPRINT_LEN] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fingerprint({}\u{2026})", hex::encode(&self.0[..4]))
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl TryFrom<&[u8]> for Fingerprint {
    type Error = usize;

    /// Fails with the offending length.
    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Self::from_slice(bytes).ok_or(bytes.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_slice_requires_exact_width() {
        assert!(Fingerprint::from_slice(&[7u8; 32]).is_some());
        assert!(Fingerprint::from_slice(&[7u8; 31]).is_none());
        assert!(Fingerprint::from_slice(&[7u8; 33]).is_none());
        assert!(Fingerprint::from_slice(&[]).is_none());
    }

    #[test]
    fn try_from_reports_length() {
        let err = Fingerprint::try_from(&[1u8; 20][..]).unwrap_err();
        assert_eq!(err, 20);
    }

    #[test]
    fn hex_round_trip() {
        let fp = Fingerprint::digest(b"heirloom tomato");
        assert_eq!(Fingerprint::from_hex(&fp.to_hex()), Some(fp));
        assert_eq!(Fingerprint::from_hex("abcd"), None);
        assert_eq!(Fingerprint::from_hex("zz"), None);
    }
}
