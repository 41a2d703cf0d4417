//! Actor directory: who may register entries.

use genevault_store::{ActorRecord, ActorStore};
use genevault_types::{ActorId, RequestContext, VaultError};
use tracing::debug;

pub struct ActorDirectory<'a, S> {
    store: &'a S,
}

impl<'a, S: ActorStore> ActorDirectory<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Register the caller as an actor. Each identity registers once.
    pub fn register(
        &self,
        ctx: &RequestContext,
        name: &str,
        location: &str,
    ) -> Result<ActorRecord, VaultError> {
        if name.trim().is_empty() {
            return Err(VaultError::InvalidParams("actor name is empty".into()));
        }
        if self.store.actor_exists(&ctx.caller)? {
            return Err(VaultError::AlreadyExists(ctx.caller.to_string()));
        }
        let record = ActorRecord {
            id: ctx.caller.clone(),
            name: name.to_string(),
            location: location.to_string(),
            registered_at: ctx.height,
            entry_count: 0,
        };
        self.store.put_actor(&record)?;
        debug!(actor = %record.id, height = %ctx.height, "actor registered");
        Ok(record)
    }

    pub fn get(&self, id: &ActorId) -> Result<Option<ActorRecord>, VaultError> {
        Ok(self.store.get_actor(id)?)
    }

    /// Load the caller's record, failing `Unauthorized` if they never registered.
    pub fn require(&self, ctx: &RequestContext) -> Result<ActorRecord, VaultError> {
        self.store
            .get_actor(&ctx.caller)?
            .ok_or_else(|| VaultError::Unauthorized(ctx.caller.to_string()))
    }
}
