//! File-transfer backend: scoped store for servers, their users and the
//! users' ssh public keys.

use std::collections::BTreeMap;

use chrono::Utc;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use models::patch;
use models::transfer::{
    validate_ssh_public_key_body, CreateServerRequest, CreateUserRequest, DeleteServerRequest,
    DeleteSshPublicKeyRequest, DeleteUserRequest, DescribeServerRequest, DescribeUserRequest,
    ImportSshPublicKeyRequest, ListServersRequest, ListUsersRequest, Server, ServerState,
    SshPublicKey, UpdateServerRequest, User,
};

use crate::errors::ServiceError;
use crate::pagination::paginate;
use crate::registry::Scope;

pub struct TransferBackend {
    scope: Scope,
    default_page_size: usize,
    servers: RwLock<BTreeMap<String, Server>>,
}

impl TransferBackend {
    pub fn new(scope: Scope, default_page_size: usize) -> Self {
        Self {
            scope,
            default_page_size,
            servers: RwLock::new(BTreeMap::new()),
        }
    }

    fn server_arn(&self, server_id: &str) -> String {
        format!(
            "arn:aws:transfer:{}:{}:server/{server_id}",
            self.scope.region, self.scope.account_id
        )
    }

    fn user_arn(&self, server_id: &str, user_name: &str) -> String {
        format!(
            "arn:aws:transfer:{}:{}:user/{server_id}/{user_name}",
            self.scope.region, self.scope.account_id
        )
    }

    fn generate_server_id() -> String {
        format!("s-{}", &Uuid::new_v4().simple().to_string()[..17])
    }

    fn generate_ssh_public_key_id() -> String {
        format!("key-{}", &Uuid::new_v4().simple().to_string()[..17])
    }

    pub async fn create_server(&self, req: CreateServerRequest) -> Result<String, ServiceError> {
        req.validate()?;
        let server_id = Self::generate_server_id();
        let server = Server {
            arn: self.server_arn(&server_id),
            server_id: server_id.clone(),
            state: ServerState::Online,
            certificate: req.certificate,
            domain: req.domain,
            endpoint_details: req.endpoint_details,
            endpoint_type: req.endpoint_type,
            // the emulator does not hash host keys; the supplied key body
            // stands in for its fingerprint
            host_key_fingerprint: req.host_key,
            identity_provider_details: req.identity_provider_details,
            identity_provider_type: req.identity_provider_type,
            logging_role: req.logging_role,
            post_authentication_login_banner: req.post_authentication_login_banner,
            pre_authentication_login_banner: req.pre_authentication_login_banner,
            protocols: req.protocols,
            protocol_details: req.protocol_details,
            security_policy_name: req.security_policy_name,
            structured_log_destinations: req.structured_log_destinations,
            s3_storage_options: req.s3_storage_options,
            workflow_details: req.workflow_details,
            tags: req.tags.unwrap_or_default(),
            users: BTreeMap::new(),
        };
        let mut servers = self.servers.write().await;
        servers.insert(server_id.clone(), server);
        info!(server = %server_id, region = %self.scope.region, "created transfer server");
        Ok(server_id)
    }

    pub async fn describe_server(
        &self,
        req: DescribeServerRequest,
    ) -> Result<Server, ServiceError> {
        let servers = self.servers.read().await;
        servers
            .get(&req.server_id)
            .cloned()
            .ok_or_else(|| ServiceError::not_found("server", &req.server_id))
    }

    /// Presence-aware partial update: omitted fields are kept, null fields
    /// cleared, supplied fields replaced.
    pub async fn update_server(&self, req: UpdateServerRequest) -> Result<String, ServiceError> {
        if let Some(Some(protocols)) = &req.protocols {
            if protocols.is_empty() {
                return Err(ServiceError::Validation(
                    "Protocols must contain at least one entry when supplied".into(),
                ));
            }
        }
        let mut servers = self.servers.write().await;
        let server = servers
            .get_mut(&req.server_id)
            .ok_or_else(|| ServiceError::not_found("server", &req.server_id))?;
        patch::apply(&mut server.certificate, req.certificate);
        patch::apply(&mut server.endpoint_details, req.endpoint_details);
        patch::apply(&mut server.endpoint_type, req.endpoint_type);
        patch::apply(&mut server.host_key_fingerprint, req.host_key);
        patch::apply(&mut server.identity_provider_details, req.identity_provider_details);
        patch::apply(&mut server.logging_role, req.logging_role);
        patch::apply(
            &mut server.post_authentication_login_banner,
            req.post_authentication_login_banner,
        );
        patch::apply(
            &mut server.pre_authentication_login_banner,
            req.pre_authentication_login_banner,
        );
        patch::apply(&mut server.protocols, req.protocols);
        patch::apply(&mut server.protocol_details, req.protocol_details);
        patch::apply(&mut server.security_policy_name, req.security_policy_name);
        patch::apply(
            &mut server.structured_log_destinations,
            req.structured_log_destinations,
        );
        patch::apply(&mut server.s3_storage_options, req.s3_storage_options);
        patch::apply(&mut server.workflow_details, req.workflow_details);
        info!(server = %server.server_id, "updated transfer server");
        Ok(server.server_id.clone())
    }

    pub async fn delete_server(&self, req: DeleteServerRequest) -> Result<Server, ServiceError> {
        let mut servers = self.servers.write().await;
        let server = servers
            .remove(&req.server_id)
            .ok_or_else(|| ServiceError::not_found("server", &req.server_id))?;
        info!(server = %server.server_id, region = %self.scope.region, "deleted transfer server");
        Ok(server)
    }

    pub async fn list_servers(
        &self,
        req: ListServersRequest,
    ) -> Result<(Vec<Server>, Option<String>), ServiceError> {
        let servers = self.servers.read().await;
        let items: Vec<Server> = servers.values().cloned().collect();
        paginate(
            &items,
            req.next_token.as_deref(),
            req.max_results,
            self.default_page_size,
            |server| server.server_id.as_str(),
        )
    }

    pub async fn create_user(
        &self,
        req: CreateUserRequest,
    ) -> Result<(String, String), ServiceError> {
        req.validate()?;
        let mut servers = self.servers.write().await;
        let server = servers
            .get_mut(&req.server_id)
            .ok_or_else(|| ServiceError::not_found("server", &req.server_id))?;
        if server.users.contains_key(&req.user_name) {
            return Err(ServiceError::already_exists("user", &req.user_name));
        }
        let mut ssh_public_keys = Vec::new();
        if let Some(body) = req.ssh_public_key_body {
            validate_ssh_public_key_body(&body)?;
            ssh_public_keys.push(SshPublicKey {
                date_imported: Utc::now(),
                ssh_public_key_body: body,
                ssh_public_key_id: Self::generate_ssh_public_key_id(),
            });
        }
        let user = User {
            arn: self.user_arn(&req.server_id, &req.user_name),
            user_name: req.user_name.clone(),
            home_directory: req.home_directory,
            home_directory_type: req.home_directory_type,
            home_directory_mappings: req.home_directory_mappings,
            policy: req.policy,
            posix_profile: req.posix_profile,
            role: req.role,
            ssh_public_keys,
            tags: req.tags.unwrap_or_default(),
        };
        server.users.insert(req.user_name.clone(), user);
        info!(server = %req.server_id, user = %req.user_name, "created transfer user");
        Ok((req.server_id, req.user_name))
    }

    pub async fn describe_user(
        &self,
        req: DescribeUserRequest,
    ) -> Result<(String, User), ServiceError> {
        let servers = self.servers.read().await;
        let server = servers
            .get(&req.server_id)
            .ok_or_else(|| ServiceError::not_found("server", &req.server_id))?;
        let user = server
            .users
            .get(&req.user_name)
            .cloned()
            .ok_or_else(|| ServiceError::not_found("user", &req.user_name))?;
        Ok((req.server_id, user))
    }

    pub async fn delete_user(&self, req: DeleteUserRequest) -> Result<User, ServiceError> {
        let mut servers = self.servers.write().await;
        let server = servers
            .get_mut(&req.server_id)
            .ok_or_else(|| ServiceError::not_found("server", &req.server_id))?;
        let user = server
            .users
            .remove(&req.user_name)
            .ok_or_else(|| ServiceError::not_found("user", &req.user_name))?;
        info!(server = %req.server_id, user = %req.user_name, "deleted transfer user");
        Ok(user)
    }

    pub async fn list_users(
        &self,
        req: ListUsersRequest,
    ) -> Result<(Vec<User>, Option<String>), ServiceError> {
        let servers = self.servers.read().await;
        let server = servers
            .get(&req.server_id)
            .ok_or_else(|| ServiceError::not_found("server", &req.server_id))?;
        let items: Vec<User> = server.users.values().cloned().collect();
        paginate(
            &items,
            req.next_token.as_deref(),
            req.max_results,
            self.default_page_size,
            |user| user.user_name.as_str(),
        )
    }

    pub async fn import_ssh_public_key(
        &self,
        req: ImportSshPublicKeyRequest,
    ) -> Result<SshPublicKey, ServiceError> {
        validate_ssh_public_key_body(&req.ssh_public_key_body)?;
        let mut servers = self.servers.write().await;
        let server = servers
            .get_mut(&req.server_id)
            .ok_or_else(|| ServiceError::not_found("server", &req.server_id))?;
        let user = server
            .users
            .get_mut(&req.user_name)
            .ok_or_else(|| ServiceError::not_found("user", &req.user_name))?;
        let key = SshPublicKey {
            date_imported: Utc::now(),
            ssh_public_key_body: req.ssh_public_key_body,
            ssh_public_key_id: Self::generate_ssh_public_key_id(),
        };
        user.ssh_public_keys.push(key.clone());
        info!(server = %req.server_id, user = %req.user_name, key = %key.ssh_public_key_id, "imported ssh public key");
        Ok(key)
    }

    pub async fn delete_ssh_public_key(
        &self,
        req: DeleteSshPublicKeyRequest,
    ) -> Result<(), ServiceError> {
        let mut servers = self.servers.write().await;
        let server = servers
            .get_mut(&req.server_id)
            .ok_or_else(|| ServiceError::not_found("server", &req.server_id))?;
        let user = server
            .users
            .get_mut(&req.user_name)
            .ok_or_else(|| ServiceError::not_found("user", &req.user_name))?;
        let pos = user
            .ssh_public_keys
            .iter()
            .position(|key| key.ssh_public_key_id == req.ssh_public_key_id)
            .ok_or_else(|| ServiceError::not_found("ssh public key", &req.ssh_public_key_id))?;
        user.ssh_public_keys.remove(pos);
        Ok(())
    }
}
