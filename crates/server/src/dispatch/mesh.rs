use serde_json::Value;

use models::mesh::{
    CreateMeshRequest, DeleteMeshRequest, DescribeMeshRequest, ListMeshesRequest,
    ListTagsForResourceRequest, ListTagsForResourceResponse, ListMeshesResponse, Mesh,
    MeshResponse, TagResourceRequest, UpdateMeshRequest,
};
use service::mesh::MeshBackend;

use super::{decode, empty, encode};
use crate::errors::WireError;

pub async fn dispatch(
    backend: &MeshBackend,
    operation: &str,
    body: Value,
) -> Result<Value, WireError> {
    match operation {
        "CreateMesh" => {
            let req: CreateMeshRequest = decode(operation, body)?;
            let mesh = backend.create_mesh(req).await?;
            encode(&MeshResponse { mesh: mesh.to_data() })
        }
        "UpdateMesh" => {
            let req: UpdateMeshRequest = decode(operation, body)?;
            let mesh = backend.update_mesh(req).await?;
            encode(&MeshResponse { mesh: mesh.to_data() })
        }
        // describe returns the bare resource object, unwrapped
        "DescribeMesh" => {
            let req: DescribeMeshRequest = decode(operation, body)?;
            let mesh = backend.describe_mesh(req).await?;
            encode(&mesh.to_data())
        }
        "DeleteMesh" => {
            let req: DeleteMeshRequest = decode(operation, body)?;
            let mesh = backend.delete_mesh(req).await?;
            encode(&MeshResponse { mesh: mesh.to_data() })
        }
        "ListMeshes" => {
            let req: ListMeshesRequest = decode(operation, body)?;
            let (meshes, next_token) = backend.list_meshes(req).await?;
            encode(&ListMeshesResponse {
                meshes: meshes.iter().map(Mesh::to_data).collect(),
                next_token,
            })
        }
        "TagResource" => {
            let req: TagResourceRequest = decode(operation, body)?;
            backend.tag_resource(req).await?;
            Ok(empty())
        }
        "ListTagsForResource" => {
            let req: ListTagsForResourceRequest = decode(operation, body)?;
            let (tags, next_token) = backend.list_tags_for_resource(req).await?;
            encode(&ListTagsForResourceResponse { next_token, tags })
        }
        _ => Err(WireError::unknown_operation(operation)),
    }
}
