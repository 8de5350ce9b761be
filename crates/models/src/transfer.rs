//! Managed file-transfer API: records and PascalCase wire types.
//!
//! Server configuration blocks are preserved exactly as supplied; a block
//! the caller never sent stays absent on every later read.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::patch::Patch;

pub const MAX_USER_NAME_LEN: usize = 100;
pub const MIN_USER_NAME_LEN: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Domain {
    S3,
    Efs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EndpointType {
    Public,
    Vpc,
    VpcEndpoint,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IdentityProviderType {
    ServiceManaged,
    ApiGateway,
    AwsDirectoryService,
    AwsLambda,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Protocol {
    Sftp,
    Ftp,
    Ftps,
    As2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServerState {
    Offline,
    Online,
    Starting,
    Stopping,
    StartFailed,
    StopFailed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HomeDirectoryType {
    Path,
    Logical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SftpAuthenticationMethods {
    Password,
    PublicKey,
    PublicKeyOrPassword,
    PublicKeyAndPassword,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TlsSessionResumptionMode {
    Disabled,
    Enabled,
    Enforced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SetStatOption {
    Default,
    EnableNoOp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum As2Transport {
    Http,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DirectoryListingOptimization {
    Enabled,
    Disabled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MapType {
    File,
    Directory,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EndpointDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_allocation_ids: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subnet_ids: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vpc_endpoint_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vpc_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security_group_ids: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct IdentityProviderDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invocation_role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sftp_authentication_methods: Option<SftpAuthenticationMethods>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProtocolDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passive_ip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tls_session_resumption_mode: Option<TlsSessionResumptionMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub set_stat_option: Option<SetStatOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub as2_transports: Option<Vec<As2Transport>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct S3StorageOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory_listing_optimization: Option<DirectoryListingOptimization>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WorkflowDetail {
    pub workflow_id: String,
    pub execution_role: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WorkflowDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_upload: Option<Vec<WorkflowDetail>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_partial_upload: Option<Vec<WorkflowDetail>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct HomeDirectoryMapping {
    pub entry: String,
    pub target: String,
    #[serde(default, rename = "Type", skip_serializing_if = "Option::is_none")]
    pub map_type: Option<MapType>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PosixProfile {
    pub uid: i64,
    pub gid: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_gids: Option<Vec<i64>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Tag {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SshPublicKey {
    pub date_imported: DateTime<Utc>,
    pub ssh_public_key_body: String,
    pub ssh_public_key_id: String,
}

/// Internal record for a transfer server and its user sub-resources.
#[derive(Debug, Clone, PartialEq)]
pub struct Server {
    pub server_id: String,
    pub arn: String,
    pub state: ServerState,
    pub certificate: Option<String>,
    pub domain: Option<Domain>,
    pub endpoint_details: Option<EndpointDetails>,
    pub endpoint_type: Option<EndpointType>,
    pub host_key_fingerprint: Option<String>,
    pub identity_provider_details: Option<IdentityProviderDetails>,
    pub identity_provider_type: Option<IdentityProviderType>,
    pub logging_role: Option<String>,
    pub post_authentication_login_banner: Option<String>,
    pub pre_authentication_login_banner: Option<String>,
    pub protocols: Option<Vec<Protocol>>,
    pub protocol_details: Option<ProtocolDetails>,
    pub security_policy_name: Option<String>,
    pub structured_log_destinations: Option<Vec<String>>,
    pub s3_storage_options: Option<S3StorageOptions>,
    pub workflow_details: Option<WorkflowDetails>,
    pub tags: Vec<Tag>,
    pub users: BTreeMap<String, User>,
}

impl Server {
    pub fn to_described(&self) -> DescribedServer {
        DescribedServer {
            arn: self.arn.clone(),
            certificate: self.certificate.clone(),
            domain: self.domain,
            endpoint_details: self.endpoint_details.clone(),
            endpoint_type: self.endpoint_type,
            host_key_fingerprint: self.host_key_fingerprint.clone(),
            identity_provider_details: self.identity_provider_details.clone(),
            identity_provider_type: self.identity_provider_type,
            logging_role: self.logging_role.clone(),
            post_authentication_login_banner: self.post_authentication_login_banner.clone(),
            pre_authentication_login_banner: self.pre_authentication_login_banner.clone(),
            protocols: self.protocols.clone(),
            protocol_details: self.protocol_details.clone(),
            security_policy_name: self.security_policy_name.clone(),
            server_id: self.server_id.clone(),
            state: self.state,
            structured_log_destinations: self.structured_log_destinations.clone(),
            s3_storage_options: self.s3_storage_options.clone(),
            tags: self.tags.clone(),
            user_count: self.users.len() as i64,
            workflow_details: self.workflow_details.clone(),
        }
    }

    pub fn to_listed(&self) -> ListedServer {
        ListedServer {
            arn: self.arn.clone(),
            domain: self.domain,
            identity_provider_type: self.identity_provider_type,
            endpoint_type: self.endpoint_type,
            logging_role: self.logging_role.clone(),
            server_id: self.server_id.clone(),
            state: self.state,
            user_count: self.users.len() as i64,
        }
    }
}

/// Internal record for a user within a server.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub user_name: String,
    pub arn: String,
    pub home_directory: Option<String>,
    pub home_directory_type: Option<HomeDirectoryType>,
    pub home_directory_mappings: Option<Vec<HomeDirectoryMapping>>,
    pub policy: Option<String>,
    pub posix_profile: Option<PosixProfile>,
    pub role: Option<String>,
    pub ssh_public_keys: Vec<SshPublicKey>,
    pub tags: Vec<Tag>,
}

impl User {
    pub fn to_described(&self) -> DescribedUser {
        DescribedUser {
            arn: self.arn.clone(),
            home_directory: self.home_directory.clone(),
            home_directory_mappings: self.home_directory_mappings.clone(),
            home_directory_type: self.home_directory_type,
            policy: self.policy.clone(),
            posix_profile: self.posix_profile.clone(),
            role: self.role.clone(),
            ssh_public_keys: self.ssh_public_keys.clone(),
            tags: self.tags.clone(),
            user_name: self.user_name.clone(),
        }
    }

    pub fn to_listed(&self) -> ListedUser {
        ListedUser {
            arn: self.arn.clone(),
            home_directory: self.home_directory.clone(),
            home_directory_type: self.home_directory_type,
            role: self.role.clone(),
            ssh_public_key_count: self.ssh_public_keys.len() as i64,
            user_name: self.user_name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribedServer {
    pub arn: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certificate: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<Domain>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint_details: Option<EndpointDetails>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint_type: Option<EndpointType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_key_fingerprint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identity_provider_details: Option<IdentityProviderDetails>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identity_provider_type: Option<IdentityProviderType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logging_role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_authentication_login_banner: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pre_authentication_login_banner: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocols: Option<Vec<Protocol>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol_details: Option<ProtocolDetails>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security_policy_name: Option<String>,
    pub server_id: String,
    pub state: ServerState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structured_log_destinations: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub s3_storage_options: Option<S3StorageOptions>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Tag>,
    pub user_count: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workflow_details: Option<WorkflowDetails>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListedServer {
    pub arn: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<Domain>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identity_provider_type: Option<IdentityProviderType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint_type: Option<EndpointType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logging_role: Option<String>,
    pub server_id: String,
    pub state: ServerState,
    pub user_count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribedUser {
    pub arn: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home_directory: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home_directory_mappings: Option<Vec<HomeDirectoryMapping>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home_directory_type: Option<HomeDirectoryType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub posix_profile: Option<PosixProfile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ssh_public_keys: Vec<SshPublicKey>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Tag>,
    pub user_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListedUser {
    pub arn: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home_directory: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home_directory_type: Option<HomeDirectoryType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    pub ssh_public_key_count: i64,
    pub user_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "PascalCase")]
pub struct CreateServerRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certificate: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<Domain>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint_details: Option<EndpointDetails>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint_type: Option<EndpointType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identity_provider_details: Option<IdentityProviderDetails>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identity_provider_type: Option<IdentityProviderType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logging_role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_authentication_login_banner: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pre_authentication_login_banner: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocols: Option<Vec<Protocol>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol_details: Option<ProtocolDetails>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security_policy_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structured_log_destinations: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub s3_storage_options: Option<S3StorageOptions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<Tag>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workflow_details: Option<WorkflowDetails>,
}

impl CreateServerRequest {
    pub fn validate(&self) -> Result<(), ModelError> {
        if let Some(protocols) = &self.protocols {
            if protocols.is_empty() {
                return Err(ModelError::Validation(
                    "Protocols must contain at least one entry when supplied".into(),
                ));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeServerRequest {
    pub server_id: String,
}

/// Partial server update; every field is three-state (see [`crate::patch`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateServerRequest {
    pub server_id: String,
    #[serde(default, deserialize_with = "crate::patch::patch", skip_serializing_if = "Option::is_none")]
    pub certificate: Patch<String>,
    #[serde(default, deserialize_with = "crate::patch::patch", skip_serializing_if = "Option::is_none")]
    pub endpoint_details: Patch<EndpointDetails>,
    #[serde(default, deserialize_with = "crate::patch::patch", skip_serializing_if = "Option::is_none")]
    pub endpoint_type: Patch<EndpointType>,
    #[serde(default, deserialize_with = "crate::patch::patch", skip_serializing_if = "Option::is_none")]
    pub host_key: Patch<String>,
    #[serde(default, deserialize_with = "crate::patch::patch", skip_serializing_if = "Option::is_none")]
    pub identity_provider_details: Patch<IdentityProviderDetails>,
    #[serde(default, deserialize_with = "crate::patch::patch", skip_serializing_if = "Option::is_none")]
    pub logging_role: Patch<String>,
    #[serde(default, deserialize_with = "crate::patch::patch", skip_serializing_if = "Option::is_none")]
    pub post_authentication_login_banner: Patch<String>,
    #[serde(default, deserialize_with = "crate::patch::patch", skip_serializing_if = "Option::is_none")]
    pub pre_authentication_login_banner: Patch<String>,
    #[serde(default, deserialize_with = "crate::patch::patch", skip_serializing_if = "Option::is_none")]
    pub protocols: Patch<Vec<Protocol>>,
    #[serde(default, deserialize_with = "crate::patch::patch", skip_serializing_if = "Option::is_none")]
    pub protocol_details: Patch<ProtocolDetails>,
    #[serde(default, deserialize_with = "crate::patch::patch", skip_serializing_if = "Option::is_none")]
    pub security_policy_name: Patch<String>,
    #[serde(default, deserialize_with = "crate::patch::patch", skip_serializing_if = "Option::is_none")]
    pub structured_log_destinations: Patch<Vec<String>>,
    #[serde(default, deserialize_with = "crate::patch::patch", skip_serializing_if = "Option::is_none")]
    pub s3_storage_options: Patch<S3StorageOptions>,
    #[serde(default, deserialize_with = "crate::patch::patch", skip_serializing_if = "Option::is_none")]
    pub workflow_details: Patch<WorkflowDetails>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteServerRequest {
    pub server_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "PascalCase")]
pub struct ListServersRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_results: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateUserRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home_directory: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home_directory_type: Option<HomeDirectoryType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home_directory_mappings: Option<Vec<HomeDirectoryMapping>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub posix_profile: Option<PosixProfile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    pub server_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssh_public_key_body: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<Tag>>,
    pub user_name: String,
}

impl CreateUserRequest {
    pub fn validate(&self) -> Result<(), ModelError> {
        validate_user_name(&self.user_name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeUserRequest {
    pub server_id: String,
    pub user_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteUserRequest {
    pub server_id: String,
    pub user_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListUsersRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_results: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
    pub server_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ImportSshPublicKeyRequest {
    pub server_id: String,
    pub ssh_public_key_body: String,
    pub user_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteSshPublicKeyRequest {
    pub server_id: String,
    pub ssh_public_key_id: String,
    pub user_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateServerResponse {
    pub server_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeServerResponse {
    pub server: DescribedServer,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateServerResponse {
    pub server_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListServersResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
    pub servers: Vec<ListedServer>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateUserResponse {
    pub server_id: String,
    pub user_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeUserResponse {
    pub server_id: String,
    pub user: DescribedUser,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListUsersResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
    pub server_id: String,
    pub users: Vec<ListedUser>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ImportSshPublicKeyResponse {
    pub server_id: String,
    pub ssh_public_key_id: String,
    pub user_name: String,
}

pub fn validate_user_name(name: &str) -> Result<(), ModelError> {
    if name.len() < MIN_USER_NAME_LEN || name.len() > MAX_USER_NAME_LEN {
        return Err(ModelError::Validation(format!(
            "UserName must be {MIN_USER_NAME_LEN}-{MAX_USER_NAME_LEN} characters"
        )));
    }
    let mut chars = name.chars();
    // first char: word character; rest may also be @ . -
    let first = chars.next().unwrap_or(' ');
    if !(first.is_ascii_alphanumeric() || first == '_') {
        return Err(ModelError::Validation(format!(
            "UserName {name} must start with a letter, digit or underscore"
        )));
    }
    if !chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '@' | '.' | '-')) {
        return Err(ModelError::Validation(format!(
            "UserName {name} contains characters outside [a-zA-Z0-9_@.-]"
        )));
    }
    Ok(())
}

pub fn validate_ssh_public_key_body(body: &str) -> Result<(), ModelError> {
    if body.trim().is_empty() {
        return Err(ModelError::Validation("SshPublicKeyBody must not be empty".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn create_server_request_parses_nested_blocks() {
        let req: CreateServerRequest = serde_json::from_value(json!({
            "Domain": "S3",
            "EndpointType": "VPC_ENDPOINT",
            "Protocols": ["SFTP", "FTPS"],
            "IdentityProviderDetails": {
                "Url": "https://idp.example.com",
                "SftpAuthenticationMethods": "PUBLIC_KEY_OR_PASSWORD"
            },
            "WorkflowDetails": {
                "OnUpload": [{"WorkflowId": "w-1", "ExecutionRole": "arn:aws:iam::1:role/wf"}]
            }
        }))
        .expect("parse");
        assert_eq!(req.domain, Some(Domain::S3));
        assert_eq!(req.endpoint_type, Some(EndpointType::VpcEndpoint));
        assert_eq!(req.protocols.as_deref(), Some(&[Protocol::Sftp, Protocol::Ftps][..]));
        let idp = req.identity_provider_details.expect("idp block");
        assert_eq!(
            idp.sftp_authentication_methods,
            Some(SftpAuthenticationMethods::PublicKeyOrPassword)
        );
        assert!(idp.directory_id.is_none());
        let wf = req.workflow_details.expect("workflow block");
        assert_eq!(wf.on_upload.expect("on upload").len(), 1);
        assert!(wf.on_partial_upload.is_none());
    }

    #[test]
    fn described_server_round_trips_pascal_case() {
        let server = Server {
            server_id: "s-0123456789abcdef0".into(),
            arn: "arn:aws:transfer:us-east-1:123456789012:server/s-0123456789abcdef0".into(),
            state: ServerState::Online,
            certificate: None,
            domain: Some(Domain::Efs),
            endpoint_details: None,
            endpoint_type: None,
            host_key_fingerprint: None,
            identity_provider_details: None,
            identity_provider_type: Some(IdentityProviderType::ServiceManaged),
            logging_role: None,
            post_authentication_login_banner: None,
            pre_authentication_login_banner: None,
            protocols: Some(vec![Protocol::Sftp]),
            protocol_details: None,
            security_policy_name: None,
            structured_log_destinations: None,
            s3_storage_options: None,
            workflow_details: None,
            tags: vec![],
            users: BTreeMap::new(),
        };
        let v = serde_json::to_value(server.to_described()).expect("serialize");
        assert_eq!(v["ServerId"], "s-0123456789abcdef0");
        assert_eq!(v["State"], "ONLINE");
        assert_eq!(v["Domain"], "EFS");
        assert_eq!(v["IdentityProviderType"], "SERVICE_MANAGED");
        assert_eq!(v["UserCount"], 0);
        // unsupplied blocks and empty tag lists stay absent
        assert!(v.get("EndpointDetails").is_none());
        assert!(v.get("Certificate").is_none());
        assert!(v.get("Tags").is_none());
    }

    #[test]
    fn home_directory_mapping_uses_type_key() {
        let mapping = HomeDirectoryMapping {
            entry: "/".into(),
            target: "/bucket/home".into(),
            map_type: Some(MapType::Directory),
        };
        let v = serde_json::to_value(&mapping).expect("serialize");
        assert_eq!(v["Entry"], "/");
        assert_eq!(v["Type"], "DIRECTORY");
        let back: HomeDirectoryMapping = serde_json::from_value(v).expect("deserialize");
        assert_eq!(back, mapping);
    }

    #[test]
    fn update_server_request_patch_states() {
        let req: UpdateServerRequest = serde_json::from_value(json!({
            "ServerId": "s-1",
            "LoggingRole": null,
            "SecurityPolicyName": "TransferSecurityPolicy-2024-01"
        }))
        .expect("parse");
        assert_eq!(req.logging_role, Some(None));
        assert_eq!(
            req.security_policy_name,
            Some(Some("TransferSecurityPolicy-2024-01".to_string()))
        );
        assert_eq!(req.certificate, None);
    }

    #[test]
    fn user_name_rules() {
        assert!(validate_user_name("alice").is_ok());
        assert!(validate_user_name("a.b-c@d_e").is_ok());
        assert!(validate_user_name("ab").is_err());
        assert!(validate_user_name("-leading").is_err());
        assert!(validate_user_name("has space").is_err());
    }
}
