//! Operation scripts: a JSON array of tagged steps replayed against a vault.
//!
//! ```json
//! [
//!   {"op": "register_actor", "caller": "alice", "height": 1, "name": "Alice", "location": "North"},
//!   {"op": "register_entry", "caller": "alice", "height": 2,
//!    "fingerprint": "f1f1...", "entry_type": "seed", "location": "bank"},
//!   {"op": "status", "entry": 1}
//! ]
//! ```
//!
//! Fingerprints, hashes and markers are hex strings. Each step produces one
//! [`StepResult`] line.

use genevault_node::Vault;
use genevault_registry::EntryMetadata;
use genevault_types::{
    ActorId, EntryId, ErrorCode, Height, RequestContext, VaultError,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One scripted call: who makes it, at which height, and what it does.
#[derive(Debug, Deserialize)]
pub struct Step {
    #[serde(default)]
    pub caller: String,
    #[serde(default)]
    pub height: u64,
    #[serde(flatten)]
    pub op: Operation,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Operation {
    RegisterActor {
        name: String,
        location: String,
    },
    RegisterEntry {
        fingerprint: String,
        entry_type: String,
        location: String,
    },
    LockEntry {
        entry: u64,
    },
    UnlockEntry {
        entry: u64,
    },
    UpdateScore {
        entry: u64,
        score: u8,
    },
    RecordLineage {
        child: u64,
        parents: Vec<u64>,
    },
    RegisterVerifier {
        specialization: String,
        certification_level: u8,
    },
    RevokeVerifier {
        identity: String,
    },
    AddMarkers {
        entry: u64,
        markers: Vec<String>,
    },
    Verify {
        entry: u64,
        hash: String,
        markers: Vec<String>,
        verification_type: String,
    },
    UpdateMarkerQuality {
        entry: u64,
        index: u8,
        quality: u8,
        stability: u8,
    },
    Entry {
        entry: u64,
    },
    Lineage {
        entry: u64,
    },
    Ancestors {
        entry: u64,
        max_depth: usize,
    },
    Verifier {
        identity: String,
    },
    Markers {
        entry: u64,
    },
    MarkerQualityReport {
        entry: u64,
    },
    Status {
        entry: u64,
    },
    RequireAuthentic {
        entry: u64,
    },
    History {
        entry: u64,
    },
    VerifyChain,
    Stats,
}

impl Operation {
    fn name(&self) -> &'static str {
        match self {
            Operation::RegisterActor { .. } => "register_actor",
            Operation::RegisterEntry { .. } => "register_entry",
            Operation::LockEntry { .. } => "lock_entry",
            Operation::UnlockEntry { .. } => "unlock_entry",
            Operation::UpdateScore { .. } => "update_score",
            Operation::RecordLineage { .. } => "record_lineage",
            Operation::RegisterVerifier { .. } => "register_verifier",
            Operation::RevokeVerifier { .. } => "revoke_verifier",
            Operation::AddMarkers { .. } => "add_markers",
            Operation::Verify { .. } => "verify",
            Operation::UpdateMarkerQuality { .. } => "update_marker_quality",
            Operation::Entry { .. } => "entry",
            Operation::Lineage { .. } => "lineage",
            Operation::Ancestors { .. } => "ancestors",
            Operation::Verifier { .. } => "verifier",
            Operation::Markers { .. } => "markers",
            Operation::MarkerQualityReport { .. } => "marker_quality_report",
            Operation::Status { .. } => "status",
            Operation::RequireAuthentic { .. } => "require_authentic",
            Operation::History { .. } => "history",
            Operation::VerifyChain => "verify_chain",
            Operation::Stats => "stats",
        }
    }
}

/// Outcome of one step, printed as a single JSON line.
#[derive(Debug, Serialize)]
pub struct StepResult {
    pub index: usize,
    pub op: &'static str,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<ErrorCode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub fn parse(source: &str) -> serde_json::Result<Vec<Step>> {
    serde_json::from_str(source)
}

/// Run one step against `vault`. Failures are reported in the result, never raised.
pub fn execute(vault: &Vault, index: usize, step: &Step) -> StepResult {
    let op = step.op.name();
    match dispatch(vault, step) {
        Ok(result) => StepResult {
            index,
            op,
            ok: true,
            result: Some(result),
            code: None,
            error: None,
        },
        Err(err) => StepResult {
            index,
            op,
            ok: false,
            result: None,
            code: Some(err.code()),
            error: Some(err.to_string()),
        },
    }
}

fn decode_hex(field: &str, value: &str) -> Result<Vec<u8>, VaultError> {
    hex::decode(value).map_err(|e| VaultError::InvalidParams(format!("{field}: {e}")))
}

fn decode_all(field: &str, values: &[String]) -> Result<Vec<Vec<u8>>, VaultError> {
    values.iter().map(|v| decode_hex(field, v)).collect()
}

fn to_value<T: Serialize>(value: T) -> Result<Value, VaultError> {
    serde_json::to_value(value).map_err(|e| VaultError::Storage(e.to_string()))
}

fn dispatch(vault: &Vault, step: &Step) -> Result<Value, VaultError> {
    let ctx = RequestContext::new(step.caller.as_str(), step.height);
    let now = Height::new(step.height);

    match &step.op {
        Operation::RegisterActor { name, location } => {
            to_value(vault.register_actor(&ctx, name, location)?)
        }
        Operation::RegisterEntry {
            fingerprint,
            entry_type,
            location,
        } => {
            let fingerprint = decode_hex("fingerprint", fingerprint)?;
            let metadata = EntryMetadata::new(entry_type.as_str(), location.as_str());
            to_value(vault.register_entry(&ctx, &fingerprint, &metadata)?)
        }
        Operation::LockEntry { entry } => to_value(vault.lock_entry(&ctx, EntryId::new(*entry))?),
        Operation::UnlockEntry { entry } => {
            to_value(vault.unlock_entry(&ctx, EntryId::new(*entry))?)
        }
        Operation::UpdateScore { entry, score } => {
            to_value(vault.update_score(&ctx, EntryId::new(*entry), *score)?)
        }
        Operation::RecordLineage { child, parents } => {
            let parents: Vec<EntryId> = parents.iter().copied().map(EntryId::new).collect();
            to_value(vault.record_lineage(&ctx, EntryId::new(*child), &parents)?)
        }
        Operation::RegisterVerifier {
            specialization,
            certification_level,
        } => to_value(vault.register_verifier(&ctx, specialization, *certification_level)?),
        Operation::RevokeVerifier { identity } => {
            to_value(vault.revoke_verifier(&ctx, &ActorId::new(identity.as_str()))?)
        }
        Operation::AddMarkers { entry, markers } => {
            let markers = decode_all("markers", markers)?;
            to_value(vault.add_markers(&ctx, EntryId::new(*entry), &markers)?)
        }
        Operation::Verify {
            entry,
            hash,
            markers,
            verification_type,
        } => {
            let hash = decode_hex("hash", hash)?;
            let markers = decode_all("markers", markers)?;
            to_value(vault.verify(&ctx, EntryId::new(*entry), &hash, &markers, verification_type)?)
        }
        Operation::UpdateMarkerQuality {
            entry,
            index,
            quality,
            stability,
        } => to_value(vault.update_marker_quality(
            &ctx,
            EntryId::new(*entry),
            *index,
            *quality,
            *stability,
        )?),
        Operation::Entry { entry } => to_value(vault.entry(EntryId::new(*entry))?),
        Operation::Lineage { entry } => to_value(vault.lineage(EntryId::new(*entry))?),
        Operation::Ancestors { entry, max_depth } => {
            to_value(vault.ancestors(EntryId::new(*entry), *max_depth)?)
        }
        Operation::Verifier { identity } => {
            to_value(vault.verifier(&ActorId::new(identity.as_str()))?)
        }
        Operation::Markers { entry } => {
            let set = vault.markers(EntryId::new(*entry))?;
            let hexed = set.map(|s| s.markers.iter().map(|m| m.to_hex()).collect::<Vec<_>>());
            to_value(hexed)
        }
        Operation::MarkerQualityReport { entry } => {
            to_value(vault.marker_quality_report(EntryId::new(*entry))?)
        }
        Operation::Status { entry } => to_value(vault.status(EntryId::new(*entry))?),
        Operation::RequireAuthentic { entry } => {
            to_value(vault.require_authentic(EntryId::new(*entry), now)?)
        }
        Operation::History { entry } => to_value(vault.history(EntryId::new(*entry))?),
        Operation::VerifyChain => to_value(vault.verify_attestation_chain()?),
        Operation::Stats => to_value(vault.stats()),
    }
}
