//! Caller identity seam.
//!
//! Resolving who is making a call belongs to an external identity service;
//! the backends only need an owner id to stamp onto freshly created
//! resources. The trait keeps that collaborator swappable, the way the
//! stores themselves stay swappable behind their own traits elsewhere.

use async_trait::async_trait;

use crate::registry::Scope;

#[async_trait]
pub trait IdentityResolver: Send + Sync {
    /// Owner id for resources created by the current caller in `scope`.
    async fn caller_id(&self, scope: &Scope) -> String;
}

/// Fixed caller identity for emulator deployments with no identity service.
pub struct StaticIdentity {
    user_id: String,
}

impl StaticIdentity {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self { user_id: user_id.into() }
    }
}

impl Default for StaticIdentity {
    fn default() -> Self {
        Self::new("AIDACKCEVSQ6C2EXAMPLE")
    }
}

#[async_trait]
impl IdentityResolver for StaticIdentity {
    async fn caller_id(&self, _scope: &Scope) -> String {
        self.user_id.clone()
    }
}
