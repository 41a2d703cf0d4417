//! Identity & authorization ledger for verifiers.
//!
//! The administrative identity is fixed when the ledger is constructed and is the
//! only caller that may revoke. Revocation is permanent: a revoked identity keeps its
//! record, so re-registration fails with `AlreadyExists`.

use genevault_store::{VerifierRecord, VerifierStore};
use genevault_types::{ActorId, RequestContext, ReputationMode, VaultError, VaultParams};
use tracing::{debug, info};

pub struct VerifierLedger<'a, S> {
    store: &'a S,
    params: &'a VaultParams,
    admin: &'a ActorId,
}

impl<'a, S: VerifierStore> VerifierLedger<'a, S> {
    pub fn new(store: &'a S, params: &'a VaultParams, admin: &'a ActorId) -> Self {
        Self {
            store,
            params,
            admin,
        }
    }

    /// Register the caller as an authorized verifier.
    pub fn register(
        &self,
        ctx: &RequestContext,
        specialization: &str,
        certification_level: u8,
    ) -> Result<VerifierRecord, VaultError> {
        if !self.params.certification_in_range(certification_level) {
            return Err(VaultError::InvalidParams(format!(
                "certification level {certification_level} outside {}..={}",
                self.params.min_certification_level, self.params.max_certification_level
            )));
        }
        if self.store.get_verifier(&ctx.caller)?.is_some() {
            return Err(VaultError::AlreadyExists(ctx.caller.to_string()));
        }
        let record = VerifierRecord {
            identity: ctx.caller.clone(),
            registered_at: ctx.height,
            verification_count: 0,
            success_count: 0,
            success_rate: 100,
            specialization: specialization.to_string(),
            certification_level,
            authorized: true,
        };
        self.store.put_verifier(&record)?;
        debug!(verifier = %record.identity, level = certification_level, "verifier registered");
        Ok(record)
    }

    /// Clear a verifier's authorization. Administrative identity only.
    pub fn revoke(&self, ctx: &RequestContext, identity: &ActorId) -> Result<(), VaultError> {
        if &ctx.caller != self.admin {
            return Err(VaultError::Unauthorized(ctx.caller.to_string()));
        }
        let mut record = self
            .store
            .get_verifier(identity)?
            .ok_or_else(|| VaultError::NotFound(identity.to_string()))?;
        record.authorized = false;
        self.store.put_verifier(&record)?;
        info!(verifier = %identity, height = %ctx.height, "verifier authorization revoked");
        Ok(())
    }

    /// Whether `identity` is registered and currently authorized.
    pub fn is_authorized(&self, identity: &ActorId) -> Result<bool, VaultError> {
        Ok(self
            .store
            .get_verifier(identity)?
            .is_some_and(|v| v.authorized))
    }

    /// Load the caller's record, failing `Unauthorized` unless it is authorized.
    pub fn require_authorized(&self, ctx: &RequestContext) -> Result<VerifierRecord, VaultError> {
        self.store
            .get_verifier(&ctx.caller)?
            .filter(|v| v.authorized)
            .ok_or_else(|| VaultError::Unauthorized(ctx.caller.to_string()))
    }

    /// Count one attempt against `record` and update its success rate.
    pub fn record_attempt(
        &self,
        mut record: VerifierRecord,
        passed: bool,
    ) -> Result<VerifierRecord, VaultError> {
        record.verification_count += 1;
        if passed {
            record.success_count += 1;
        }
        record.success_rate = match self.params.reputation_mode {
            ReputationMode::Cumulative => {
                (record.success_count * 100 / record.verification_count) as u8
            }
            ReputationMode::Coarse => {
                if passed {
                    100
                } else {
                    50
                }
            }
        };
        self.store.put_verifier(&record)?;
        Ok(record)
    }

    pub fn get(&self, identity: &ActorId) -> Result<Option<VerifierRecord>, VaultError> {
        Ok(self.store.get_verifier(identity)?)
    }

    /// Authorized verifiers, ordered by identity.
    pub fn active(&self) -> Result<Vec<VerifierRecord>, VaultError> {
        Ok(self
            .store
            .iter_verifiers()?
            .into_iter()
            .filter(|v| v.authorized)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use genevault_nullables::NullStore;

    fn admin() -> ActorId {
        ActorId::new("deployer")
    }

    #[test]
    fn register_presets_reputation() {
        let store = NullStore::new();
        let params = VaultParams::default();
        let admin = admin();
        let ledger = VerifierLedger::new(&store, &params, &admin);
        let record = ledger
            .register(&RequestContext::new("lab", 4), "maize", 3)
            .unwrap();
        assert!(record.authorized);
        assert_eq!(record.success_rate, 100);
        assert_eq!(record.verification_count, 0);
        assert!(ledger.is_authorized(&ActorId::new("lab")).unwrap());
    }

    #[test]
    fn certification_level_bounds() {
        let store = NullStore::new();
        let params = VaultParams::default();
        let admin = admin();
        let ledger = VerifierLedger::new(&store, &params, &admin);
        for level in [0, 6, 255] {
            let result = ledger.register(&RequestContext::new("lab", 1), "rice", level);
            assert!(matches!(result, Err(VaultError::InvalidParams(_))));
        }
        ledger.register(&RequestContext::new("lab", 1), "rice", 1).unwrap();
        ledger.register(&RequestContext::new("lab2", 1), "rice", 5).unwrap();
    }

    #[test]
    fn duplicate_registration_rejected() {
        let store = NullStore::new();
        let params = VaultParams::default();
        let admin = admin();
        let ledger = VerifierLedger::new(&store, &params, &admin);
        let ctx = RequestContext::new("lab", 1);
        ledger.register(&ctx, "wheat", 2).unwrap();
        assert!(matches!(
            ledger.register(&ctx, "barley", 4),
            Err(VaultError::AlreadyExists(_))
        ));
        assert_eq!(
            ledger.get(&ctx.caller).unwrap().unwrap().specialization,
            "wheat"
        );
    }

    #[test]
    fn revoke_is_admin_only_and_permanent() {
        let store = NullStore::new();
        let params = VaultParams::default();
        let admin = admin();
        let ledger = VerifierLedger::new(&store, &params, &admin);
        let lab = RequestContext::new("lab", 1);
        ledger.register(&lab, "wheat", 2).unwrap();

        let intruder = RequestContext::new("lab", 2);
        assert!(matches!(
            ledger.revoke(&intruder, &lab.caller),
            Err(VaultError::Unauthorized(_))
        ));
        assert!(ledger.is_authorized(&lab.caller).unwrap());

        let root = RequestContext::new("deployer", 3);
        ledger.revoke(&root, &lab.caller).unwrap();
        assert!(!ledger.is_authorized(&lab.caller).unwrap());
        assert!(matches!(
            ledger.require_authorized(&lab),
            Err(VaultError::Unauthorized(_))
        ));
        assert!(matches!(
            ledger.register(&lab, "wheat", 2),
            Err(VaultError::AlreadyExists(_))
        ));
        assert!(ledger.active().unwrap().is_empty());
    }

    #[test]
    fn revoke_unknown_not_found() {
        let store = NullStore::new();
        let params = VaultParams::default();
        let admin = admin();
        let ledger = VerifierLedger::new(&store, &params, &admin);
        let root = RequestContext::new("deployer", 3);
        assert!(matches!(
            ledger.revoke(&root, &ActorId::new("nobody")),
            Err(VaultError::NotFound(_))
        ));
    }

    #[test]
    fn cumulative_reputation_keeps_history() {
        let store = NullStore::new();
        let params = VaultParams::default();
        let admin = admin();
        let ledger = VerifierLedger::new(&store, &params, &admin);
        let mut record = ledger.register(&RequestContext::new("lab", 1), "soy", 3).unwrap();
        for passed in [true, false, true, true] {
            record = ledger.record_attempt(record, passed).unwrap();
        }
        assert_eq!(record.verification_count, 4);
        assert_eq!(record.success_count, 3);
        assert_eq!(record.success_rate, 75);
        assert_eq!(ledger.get(&record.identity).unwrap(), Some(record));
    }

    #[test]
    fn coarse_reputation_overwrites() {
        let store = NullStore::new();
        let params = VaultParams {
            reputation_mode: ReputationMode::Coarse,
            ..VaultParams::default()
        };
        let admin = admin();
        let ledger = VerifierLedger::new(&store, &params, &admin);
        let record = ledger.register(&RequestContext::new("lab", 1), "soy", 3).unwrap();
        let record = ledger.record_attempt(record, false).unwrap();
        assert_eq!(record.success_rate, 50);
        let record = ledger.record_attempt(record, true).unwrap();
        assert_eq!(record.success_rate, 100);
        assert_eq!(record.verification_count, 2);
    }
}
