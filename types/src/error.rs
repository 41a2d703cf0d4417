//! Caller-visible error categories shared across crates.

use thiserror::Error;

/// Stable integral codes surfaced to callers.
pub type ErrorCode = u32;

/// Common error type for every registry operation.
///
/// A failed operation leaves all stored state unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VaultError {
    #[error("caller {0} is not authorized for this operation")]
    Unauthorized(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("already exists: {0}")]
    AlreadyExists(String),

    #[error("entry {0} is locked")]
    VaultLocked(String),

    #[error("invalid parameters: {0}")]
    InvalidParams(String),

    #[error("invalid hash: expected 32 bytes, got {0}")]
    InvalidHash(usize),

    #[error("insufficient markers: need between {min} and {max}, got {got}")]
    InsufficientMarkers { got: usize, min: usize, max: usize },

    #[error("verification failed: {0}")]
    VerificationFailed(String),

    #[error("storage error: {0}")]
    Storage(String),
}

impl VaultError {
    pub const UNAUTHORIZED: ErrorCode = 100;
    pub const NOT_FOUND: ErrorCode = 101;
    pub const ALREADY_EXISTS: ErrorCode = 102;
    pub const VAULT_LOCKED: ErrorCode = 103;
    pub const INVALID_PARAMS: ErrorCode = 104;
    pub const INVALID_HASH: ErrorCode = 105;
    pub const INSUFFICIENT_MARKERS: ErrorCode = 106;
    pub const VERIFICATION_FAILED: ErrorCode = 107;
    pub const STORAGE: ErrorCode = 500;

    /// The integral category surfaced to callers.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Unauthorized(_) => Self::UNAUTHORIZED,
            Self::NotFound(_) => Self::NOT_FOUND,
            Self::AlreadyExists(_) => Self::ALREADY_EXISTS,
            Self::VaultLocked(_) => Self::VAULT_LOCKED,
            Self::InvalidParams(_) => Self::INVALID_PARAMS,
            Self::InvalidHash(_) => Self::INVALID_HASH,
            Self::InsufficientMarkers { .. } => Self::INSUFFICIENT_MARKERS,
            Self::VerificationFailed(_) => Self::VERIFICATION_FAILED,
            Self::Storage(_) => Self::STORAGE,
        }
    }
}
