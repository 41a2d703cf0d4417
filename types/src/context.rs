//! Per-call ambient values threaded explicitly through every operation.

use crate::{ActorId, Height};
use serde::{Deserialize, Serialize};

/// Who is calling, and at which height.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestContext {
    pub caller: ActorId,
    pub height: Height,
}

impl RequestContext {
    pub fn new(caller: impl Into<ActorId>, height: impl Into<Height>) -> Self {
        Self {
            caller: caller.into(),
            height: height.into(),
        }
    }
}
