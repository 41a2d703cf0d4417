//! Vault configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use genevault_types::{ActorId, VaultParams};
use genevault_utils::LogFormat;

use crate::NodeError;

/// Configuration for a vault deployment.
///
/// Can be loaded from a TOML file via [`VaultConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VaultConfig {
    /// Administrative identity; the only caller allowed to revoke verifiers.
    /// Fixed for the lifetime of the deployment.
    #[serde(default = "default_admin")]
    pub admin: ActorId,

    /// Directory holding the state snapshot.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Snapshot file name inside `data_dir`.
    #[serde(default = "default_snapshot_file")]
    pub snapshot_file: String,

    /// Log format: "human" or "json".
    #[serde(default)]
    pub log_format: LogFormat,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Registry parameters.
    #[serde(default)]
    pub params: VaultParams,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_admin() -> ActorId {
    ActorId::new("deployer")
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./genevault_data")
}

fn default_snapshot_file() -> String {
    "vault.snapshot".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl VaultConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, NodeError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| NodeError::Config(format!("{}: {e}", path.as_ref().display())))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string, rejecting out-of-bound parameters.
    pub fn from_toml_str(s: &str) -> Result<Self, NodeError> {
        let config: Self = toml::from_str(s).map_err(|e| NodeError::Config(e.to_string()))?;
        config.params.validate()?;
        Ok(config)
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, NodeError> {
        toml::to_string_pretty(self).map_err(|e| NodeError::Config(e.to_string()))
    }

    /// Full path of the state snapshot.
    pub fn snapshot_path(&self) -> PathBuf {
        self.data_dir.join(&self.snapshot_file)
    }
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            admin: default_admin(),
            data_dir: default_data_dir(),
            snapshot_file: default_snapshot_file(),
            log_format: LogFormat::default(),
            log_level: default_log_level(),
            params: VaultParams::default(),
        }
    }
}
