//! Account/region-scoped backend registry.
//!
//! One registry instance is built at startup and passed by reference to
//! request handlers; backends are created on first access to a scope.
//! There is deliberately no process-wide singleton.

use std::sync::Arc;

use dashmap::DashMap;

use crate::identity::IdentityResolver;
use crate::mesh::MeshBackend;
use crate::transfer::TransferBackend;

/// The (account, region) pair that owns a set of backend instances.
/// Resources never cross scopes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Scope {
    pub account_id: String,
    pub region: String,
}

impl Scope {
    pub fn new(account_id: impl Into<String>, region: impl Into<String>) -> Self {
        Self { account_id: account_id.into(), region: region.into() }
    }
}

pub struct BackendRegistry {
    identity: Arc<dyn IdentityResolver>,
    default_page_size: usize,
    mesh: DashMap<Scope, Arc<MeshBackend>>,
    transfer: DashMap<Scope, Arc<TransferBackend>>,
}

impl BackendRegistry {
    pub fn new(identity: Arc<dyn IdentityResolver>, default_page_size: usize) -> Self {
        Self {
            identity,
            default_page_size,
            mesh: DashMap::new(),
            transfer: DashMap::new(),
        }
    }

    /// Mesh backend for `scope`, created on first access.
    pub fn mesh(&self, scope: &Scope) -> Arc<MeshBackend> {
        self.mesh
            .entry(scope.clone())
            .or_insert_with(|| {
                Arc::new(MeshBackend::new(
                    scope.clone(),
                    Arc::clone(&self.identity),
                    self.default_page_size,
                ))
            })
            .clone()
    }

    /// Transfer backend for `scope`, created on first access.
    pub fn transfer(&self, scope: &Scope) -> Arc<TransferBackend> {
        self.transfer
            .entry(scope.clone())
            .or_insert_with(|| {
                Arc::new(TransferBackend::new(scope.clone(), self.default_page_size))
            })
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::StaticIdentity;
    use models::mesh::CreateMeshRequest;

    fn registry() -> BackendRegistry {
        BackendRegistry::new(Arc::new(StaticIdentity::default()), 100)
    }

    #[tokio::test]
    async fn same_scope_returns_same_backend() {
        let reg = registry();
        let scope = Scope::new("123456789012", "us-east-1");
        let a = reg.mesh(&scope);
        let b = reg.mesh(&scope);
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[tokio::test]
    async fn scopes_are_isolated() {
        let reg = registry();
        let us = Scope::new("123456789012", "us-east-1");
        let eu = Scope::new("123456789012", "eu-west-1");

        reg.mesh(&us)
            .create_mesh(CreateMeshRequest {
                client_token: None,
                mesh_name: "only-in-us".into(),
                spec: None,
                tags: None,
            })
            .await
            .expect("create");

        let (eu_meshes, _) = reg
            .mesh(&eu)
            .list_meshes(models::mesh::ListMeshesRequest { limit: None, next_token: None })
            .await
            .expect("list");
        assert!(eu_meshes.is_empty());
    }
}
