use serde_json::Value;

use models::transfer::{
    CreateServerRequest, CreateServerResponse, CreateUserRequest, CreateUserResponse,
    DeleteServerRequest, DeleteSshPublicKeyRequest, DeleteUserRequest, DescribeServerRequest,
    DescribeServerResponse, DescribeUserRequest, DescribeUserResponse, ImportSshPublicKeyRequest,
    ImportSshPublicKeyResponse, ListServersRequest, ListServersResponse, ListUsersRequest,
    ListUsersResponse, Server, UpdateServerRequest, UpdateServerResponse, User,
};
use service::transfer::TransferBackend;

use super::{decode, empty, encode};
use crate::errors::WireError;

pub async fn dispatch(
    backend: &TransferBackend,
    operation: &str,
    body: Value,
) -> Result<Value, WireError> {
    match operation {
        "CreateServer" => {
            let req: CreateServerRequest = decode(operation, body)?;
            let server_id = backend.create_server(req).await?;
            encode(&CreateServerResponse { server_id })
        }
        "DescribeServer" => {
            let req: DescribeServerRequest = decode(operation, body)?;
            let server = backend.describe_server(req).await?;
            encode(&DescribeServerResponse { server: server.to_described() })
        }
        "UpdateServer" => {
            let req: UpdateServerRequest = decode(operation, body)?;
            let server_id = backend.update_server(req).await?;
            encode(&UpdateServerResponse { server_id })
        }
        "DeleteServer" => {
            let req: DeleteServerRequest = decode(operation, body)?;
            backend.delete_server(req).await?;
            Ok(empty())
        }
        "ListServers" => {
            let req: ListServersRequest = decode(operation, body)?;
            let (servers, next_token) = backend.list_servers(req).await?;
            encode(&ListServersResponse {
                next_token,
                servers: servers.iter().map(Server::to_listed).collect(),
            })
        }
        "CreateUser" => {
            let req: CreateUserRequest = decode(operation, body)?;
            let (server_id, user_name) = backend.create_user(req).await?;
            encode(&CreateUserResponse { server_id, user_name })
        }
        "DescribeUser" => {
            let req: DescribeUserRequest = decode(operation, body)?;
            let (server_id, user) = backend.describe_user(req).await?;
            encode(&DescribeUserResponse { server_id, user: user.to_described() })
        }
        "DeleteUser" => {
            let req: DeleteUserRequest = decode(operation, body)?;
            backend.delete_user(req).await?;
            Ok(empty())
        }
        "ListUsers" => {
            let req: ListUsersRequest = decode(operation, body)?;
            let server_id = req.server_id.clone();
            let (users, next_token) = backend.list_users(req).await?;
            encode(&ListUsersResponse {
                next_token,
                server_id,
                users: users.iter().map(User::to_listed).collect(),
            })
        }
        "ImportSshPublicKey" => {
            let req: ImportSshPublicKeyRequest = decode(operation, body)?;
            let server_id = req.server_id.clone();
            let user_name = req.user_name.clone();
            let key = backend.import_ssh_public_key(req).await?;
            encode(&ImportSshPublicKeyResponse {
                server_id,
                ssh_public_key_id: key.ssh_public_key_id,
                user_name,
            })
        }
        "DeleteSshPublicKey" => {
            let req: DeleteSshPublicKeyRequest = decode(operation, body)?;
            backend.delete_ssh_public_key(req).await?;
            Ok(empty())
        }
        _ => Err(WireError::unknown_operation(operation)),
    }
}
