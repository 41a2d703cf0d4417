use genevault_store::StoreError;
use genevault_types::VaultError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NodeError {
    #[error("vault error: {0}")]
    Vault(#[from] VaultError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
