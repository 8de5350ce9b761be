//! Mesh configuration backend: the scoped store for mesh resources.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use models::mesh::{
    CreateMeshRequest, DeleteMeshRequest, DescribeMeshRequest, ListMeshesRequest,
    ListTagsForResourceRequest, Mesh, MeshStatusCode, MeshTag, ResourceMetadata,
    TagResourceRequest, UpdateMeshRequest,
};

use crate::errors::ServiceError;
use crate::identity::IdentityResolver;
use crate::pagination::paginate;
use crate::registry::Scope;

/// Tag cap enforced by the real service.
const MAX_TAGS_PER_RESOURCE: usize = 50;

pub struct MeshBackend {
    scope: Scope,
    identity: Arc<dyn IdentityResolver>,
    default_page_size: usize,
    meshes: RwLock<BTreeMap<String, Mesh>>,
}

impl MeshBackend {
    pub fn new(
        scope: Scope,
        identity: Arc<dyn IdentityResolver>,
        default_page_size: usize,
    ) -> Self {
        Self {
            scope,
            identity,
            default_page_size,
            meshes: RwLock::new(BTreeMap::new()),
        }
    }

    fn mesh_arn(&self, mesh_name: &str) -> String {
        format!(
            "arn:aws:appmesh:{}:{}:{}",
            self.scope.region, self.scope.account_id, mesh_name
        )
    }

    pub async fn create_mesh(&self, req: CreateMeshRequest) -> Result<Mesh, ServiceError> {
        req.validate()?;
        let owner = self.identity.caller_id(&self.scope).await;

        let mut meshes = self.meshes.write().await;
        if meshes.contains_key(&req.mesh_name) {
            return Err(ServiceError::already_exists("mesh", &req.mesh_name));
        }
        let now = Utc::now();
        let mesh = Mesh {
            mesh_name: req.mesh_name.clone(),
            metadata: ResourceMetadata {
                arn: self.mesh_arn(&req.mesh_name),
                created_at: now,
                last_updated_at: now,
                mesh_owner: owner.clone(),
                resource_owner: owner,
                uid: Uuid::new_v4(),
                version: 1,
            },
            spec: req.spec,
            status: MeshStatusCode::Active,
            tags: req.tags.unwrap_or_default(),
        };
        meshes.insert(req.mesh_name.clone(), mesh.clone());
        info!(mesh = %mesh.mesh_name, region = %self.scope.region, "created mesh");
        Ok(mesh)
    }

    /// Replace the spec block and bump version/timestamp. A request without
    /// a spec changes nothing and returns the record as-is.
    pub async fn update_mesh(&self, req: UpdateMeshRequest) -> Result<Mesh, ServiceError> {
        let mut meshes = self.meshes.write().await;
        let mesh = meshes
            .get_mut(&req.mesh_name)
            .ok_or_else(|| ServiceError::not_found("mesh", &req.mesh_name))?;
        if let Some(spec) = req.spec {
            mesh.spec = Some(spec);
            mesh.metadata.last_updated_at = Utc::now();
            mesh.metadata.version += 1;
            info!(mesh = %mesh.mesh_name, version = mesh.metadata.version, "updated mesh");
        }
        Ok(mesh.clone())
    }

    pub async fn describe_mesh(&self, req: DescribeMeshRequest) -> Result<Mesh, ServiceError> {
        let meshes = self.meshes.read().await;
        meshes
            .get(&req.mesh_name)
            .cloned()
            .ok_or_else(|| ServiceError::not_found("mesh", &req.mesh_name))
    }

    /// Remove the record; the returned snapshot carries the terminal
    /// DELETED status.
    pub async fn delete_mesh(&self, req: DeleteMeshRequest) -> Result<Mesh, ServiceError> {
        let mut meshes = self.meshes.write().await;
        let mut mesh = meshes
            .remove(&req.mesh_name)
            .ok_or_else(|| ServiceError::not_found("mesh", &req.mesh_name))?;
        mesh.status = MeshStatusCode::Deleted;
        info!(mesh = %mesh.mesh_name, region = %self.scope.region, "deleted mesh");
        Ok(mesh)
    }

    pub async fn list_meshes(
        &self,
        req: ListMeshesRequest,
    ) -> Result<(Vec<Mesh>, Option<String>), ServiceError> {
        let meshes = self.meshes.read().await;
        let items: Vec<Mesh> = meshes.values().cloned().collect();
        paginate(
            &items,
            req.next_token.as_deref(),
            req.limit,
            self.default_page_size,
            |mesh| mesh.mesh_name.as_str(),
        )
    }

    /// Attach tags to the resource named by ARN; an existing key has its
    /// value replaced.
    pub async fn tag_resource(&self, req: TagResourceRequest) -> Result<(), ServiceError> {
        let mut meshes = self.meshes.write().await;
        let mesh = meshes
            .values_mut()
            .find(|mesh| mesh.metadata.arn == req.resource_arn)
            .ok_or_else(|| ServiceError::not_found("resource", &req.resource_arn))?;
        let mut merged = mesh.tags.clone();
        for tag in req.tags {
            match merged.iter_mut().find(|t| t.key == tag.key) {
                Some(existing) => existing.value = tag.value,
                None => merged.push(tag),
            }
        }
        if merged.len() > MAX_TAGS_PER_RESOURCE {
            return Err(ServiceError::Validation(format!(
                "resource {} cannot carry more than {MAX_TAGS_PER_RESOURCE} tags",
                req.resource_arn
            )));
        }
        mesh.tags = merged;
        Ok(())
    }

    pub async fn list_tags_for_resource(
        &self,
        req: ListTagsForResourceRequest,
    ) -> Result<(Vec<MeshTag>, Option<String>), ServiceError> {
        let meshes = self.meshes.read().await;
        let mesh = meshes
            .values()
            .find(|mesh| mesh.metadata.arn == req.resource_arn)
            .ok_or_else(|| ServiceError::not_found("resource", &req.resource_arn))?;
        paginate(
            &mesh.tags,
            req.next_token.as_deref(),
            req.limit,
            self.default_page_size,
            |tag| tag.key.as_str(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::StaticIdentity;
    use models::mesh::{EgressFilter, EgressFilterType, MeshSpec};

    fn backend() -> MeshBackend {
        MeshBackend::new(
            Scope::new("123456789012", "us-east-1"),
            Arc::new(StaticIdentity::default()),
            100,
        )
    }

    fn create_req(name: &str) -> CreateMeshRequest {
        CreateMeshRequest {
            client_token: None,
            mesh_name: name.into(),
            spec: None,
            tags: None,
        }
    }

    fn spec(filter: EgressFilterType) -> MeshSpec {
        MeshSpec {
            egress_filter: Some(EgressFilter { filter_type: filter }),
            service_discovery: None,
        }
    }

    #[tokio::test]
    async fn create_then_describe_has_version_one() {
        let backend = backend();
        backend.create_mesh(create_req("m1")).await.expect("create");
        let mesh = backend
            .describe_mesh(DescribeMeshRequest { mesh_name: "m1".into(), mesh_owner: None })
            .await
            .expect("describe");
        assert_eq!(mesh.metadata.version, 1);
        assert_eq!(mesh.status, MeshStatusCode::Active);
        assert_eq!(mesh.metadata.arn, "arn:aws:appmesh:us-east-1:123456789012:m1");
        assert_eq!(mesh.metadata.mesh_owner, mesh.metadata.resource_owner);
    }

    #[tokio::test]
    async fn duplicate_create_is_a_conflict() {
        let backend = backend();
        backend.create_mesh(create_req("m1")).await.expect("create");
        let err = backend.create_mesh(create_req("m1")).await.unwrap_err();
        assert!(matches!(err, ServiceError::AlreadyExists(_)));
    }

    #[tokio::test]
    async fn invalid_name_is_rejected() {
        let backend = backend();
        let err = backend.create_mesh(create_req("bad name")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Model(_)));
    }

    #[tokio::test]
    async fn update_bumps_version_and_timestamp() {
        let backend = backend();
        let created = backend.create_mesh(create_req("m1")).await.expect("create");
        let updated = backend
            .update_mesh(UpdateMeshRequest {
                client_token: None,
                mesh_name: "m1".into(),
                spec: Some(spec(EgressFilterType::DropAll)),
            })
            .await
            .expect("update");
        assert_eq!(updated.metadata.version, 2);
        assert!(updated.metadata.last_updated_at >= created.metadata.last_updated_at);
        assert_eq!(
            updated.spec.expect("spec").egress_filter.expect("filter").filter_type,
            EgressFilterType::DropAll
        );
    }

    #[tokio::test]
    async fn update_without_spec_changes_nothing() {
        let backend = backend();
        backend.create_mesh(create_req("m1")).await.expect("create");
        let untouched = backend
            .update_mesh(UpdateMeshRequest {
                client_token: None,
                mesh_name: "m1".into(),
                spec: None,
            })
            .await
            .expect("update");
        assert_eq!(untouched.metadata.version, 1);
    }

    #[tokio::test]
    async fn lifecycle_create_update_delete() {
        let backend = backend();
        let created = backend
            .create_mesh(CreateMeshRequest {
                client_token: None,
                mesh_name: "m1".into(),
                spec: Some(spec(EgressFilterType::AllowAll)),
                tags: None,
            })
            .await
            .expect("create");
        assert_eq!(created.metadata.version, 1);
        assert_eq!(created.status, MeshStatusCode::Active);

        let updated = backend
            .update_mesh(UpdateMeshRequest {
                client_token: None,
                mesh_name: "m1".into(),
                spec: Some(spec(EgressFilterType::DropAll)),
            })
            .await
            .expect("update");
        assert_eq!(updated.metadata.version, 2);

        let deleted = backend
            .delete_mesh(DeleteMeshRequest { mesh_name: "m1".into() })
            .await
            .expect("delete");
        assert_eq!(deleted.status, MeshStatusCode::Deleted);

        let err = backend
            .describe_mesh(DescribeMeshRequest { mesh_name: "m1".into(), mesh_owner: None })
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn list_meshes_pages_chain_to_full_collection() {
        let backend = backend();
        for i in 0..5 {
            backend.create_mesh(create_req(&format!("m{i}"))).await.expect("create");
        }
        let mut names = Vec::new();
        let mut token: Option<String> = None;
        let mut pages = Vec::new();
        loop {
            let (page, next) = backend
                .list_meshes(ListMeshesRequest { limit: Some(2), next_token: token.clone() })
                .await
                .expect("list");
            pages.push(page.len());
            names.extend(page.into_iter().map(|m| m.mesh_name));
            match next {
                Some(t) => token = Some(t),
                None => break,
            }
        }
        assert_eq!(pages, vec![2, 2, 1]);
        assert_eq!(names, vec!["m0", "m1", "m2", "m3", "m4"]);
    }

    #[tokio::test]
    async fn tagging_round_trip_and_upsert() {
        let backend = backend();
        let mesh = backend.create_mesh(create_req("m1")).await.expect("create");
        let arn = mesh.metadata.arn.clone();

        backend
            .tag_resource(TagResourceRequest {
                resource_arn: arn.clone(),
                tags: vec![
                    MeshTag { key: "env".into(), value: "dev".into() },
                    MeshTag { key: "team".into(), value: "mesh".into() },
                ],
            })
            .await
            .expect("tag");
        backend
            .tag_resource(TagResourceRequest {
                resource_arn: arn.clone(),
                tags: vec![MeshTag { key: "env".into(), value: "prod".into() }],
            })
            .await
            .expect("retag");

        let (tags, next) = backend
            .list_tags_for_resource(ListTagsForResourceRequest {
                limit: None,
                next_token: None,
                resource_arn: arn,
            })
            .await
            .expect("list tags");
        assert!(next.is_none());
        assert_eq!(tags.len(), 2);
        assert_eq!(
            tags.iter().find(|t| t.key == "env").map(|t| t.value.as_str()),
            Some("prod")
        );
    }

    #[tokio::test]
    async fn tagging_unknown_arn_is_not_found() {
        let backend = backend();
        let err = backend
            .tag_resource(TagResourceRequest {
                resource_arn: "arn:aws:appmesh:us-east-1:123456789012:ghost".into(),
                tags: vec![],
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn stale_list_token_is_invalid_after_removal() {
        let backend = backend();
        for i in 0..4 {
            backend.create_mesh(create_req(&format!("m{i}"))).await.expect("create");
        }
        let (_, token) = backend
            .list_meshes(ListMeshesRequest { limit: Some(2), next_token: None })
            .await
            .expect("list");
        backend
            .delete_mesh(DeleteMeshRequest { mesh_name: "m1".into() })
            .await
            .expect("delete cursor row");
        let err = backend
            .list_meshes(ListMeshesRequest { limit: Some(2), next_token: token })
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::InvalidToken(_)));
    }
}
