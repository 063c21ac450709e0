//! The Secrets Manager V1 client.
//!
//! Each operation validates its options, builds the request, sends it through
//! the shared [`BaseService`] and decodes the body. Every operation has a
//! `*_with_context` twin taking a [`Context`] for cancellation and deadlines;
//! the plain form uses [`Context::background`].

use crate::codec::{JsonResource, decode, encode, encode_envelope};
use crate::envelope::{CollectionEnvelope, collection_type};
use crate::error::{SecretsManagerError, SecretsManagerResult};
use crate::models::{
    ConfigElementDef, GetConfigElementsResourcesItem, GetConfigResourcesItem, GetSecretPolicies,
    SecretGroupResource, SecretMetadata, SecretResource, SecretVersion, SecretVersionInfo,
    SecretVersionMetadata,
};
use crate::options::{
    CreateConfigElementOptions, CreateSecretGroupOptions, CreateSecretOptions,
    DeleteConfigElementOptions, DeleteSecretGroupOptions, DeleteSecretOptions,
    GetConfigElementOptions, GetConfigElementsOptions, GetConfigOptions, GetPolicyOptions,
    GetSecretGroupOptions, GetSecretMetadataOptions, GetSecretOptions,
    GetSecretVersionMetadataOptions, GetSecretVersionOptions, ListAllSecretsOptions,
    ListSecretGroupsOptions, ListSecretVersionsOptions, ListSecretsOptions, PutConfigOptions,
    PutPolicyOptions, UpdateConfigElementOptions, UpdateSecretGroupMetadataOptions,
    UpdateSecretMetadataOptions, UpdateSecretOptions, policy,
};
use reqwest::Method;
use reqwest::header::HeaderMap;
use sdk_core::{
    ApiRequest, Authenticator, BaseService, Context, DetailedResponse, HttpConfig, ServiceConfig,
    ServiceOptions,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Base URL used when none is configured.
pub const DEFAULT_SERVICE_URL: &str = "https://secrets-manager.cloud.ibm.com";

/// Name under which configuration is read from the environment.
pub const DEFAULT_SERVICE_NAME: &str = "secrets_manager";

const SERVICE_NAME: &str = "secrets_manager";
const SERVICE_VERSION: &str = "V1";

const SECRET_GROUPS: &str = "/api/v1/secret_groups";
const SECRET_GROUP: &str = "/api/v1/secret_groups/{id}";
const ALL_SECRETS: &str = "/api/v1/secrets";
const SECRETS: &str = "/api/v1/secrets/{secret_type}";
const SECRET: &str = "/api/v1/secrets/{secret_type}/{id}";
const SECRET_VERSIONS: &str = "/api/v1/secrets/{secret_type}/{id}/versions";
const SECRET_VERSION: &str = "/api/v1/secrets/{secret_type}/{id}/versions/{version_id}";
const SECRET_VERSION_METADATA: &str =
    "/api/v1/secrets/{secret_type}/{id}/versions/{version_id}/metadata";
const SECRET_METADATA: &str = "/api/v1/secrets/{secret_type}/{id}/metadata";
const SECRET_POLICIES: &str = "/api/v1/secrets/{secret_type}/{id}/policies";
const CONFIG: &str = "/api/v1/config/{secret_type}";
const CONFIG_ELEMENTS: &str = "/api/v1/config/{secret_type}/{config_element}";
const CONFIG_ELEMENT: &str = "/api/v1/config/{secret_type}/{config_element}/{config_name}";

/// Construction options for [`SecretsManagerV1`].
#[derive(Debug, Clone)]
pub struct SecretsManagerV1Options {
    /// Base URL; [`DEFAULT_SERVICE_URL`] when unset
    pub url: Option<String>,
    /// Scheme used to authenticate every request
    pub authenticator: Arc<dyn Authenticator>,
    /// Transport configuration
    pub http: HttpConfig,
}

impl SecretsManagerV1Options {
    /// Options with the default URL and transport.
    #[must_use]
    pub fn new(authenticator: Arc<dyn Authenticator>) -> Self {
        Self {
            url: None,
            authenticator,
            http: HttpConfig::default(),
        }
    }

    /// Use `url` instead of the default.
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Use `http` as the transport configuration.
    #[must_use]
    pub fn with_http_config(mut self, http: HttpConfig) -> Self {
        self.http = http;
        self
    }
}

/// Client for the Secrets Manager V1 API.
///
/// `Clone` is cheap and shares the connection pool. Configuration setters
/// take `&mut self`; configure the handle before sharing it.
#[derive(Debug, Clone)]
pub struct SecretsManagerV1 {
    service: BaseService,
}

impl SecretsManagerV1 {
    /// Create a client from `options`.
    ///
    /// # Errors
    ///
    /// Returns [`SecretsManagerError::InvalidArgument`] for an invalid URL or
    /// authenticator.
    pub fn new(options: SecretsManagerV1Options) -> SecretsManagerResult<Self> {
        let service = BaseService::new(ServiceOptions {
            url: options.url.unwrap_or_else(|| DEFAULT_SERVICE_URL.to_string()),
            authenticator: options.authenticator,
            http: options.http,
        })?;
        Ok(Self { service })
    }

    /// Create a client configured from `SECRETS_MANAGER_*` variables.
    ///
    /// # Errors
    ///
    /// Returns [`SecretsManagerError::InvalidArgument`] for malformed or
    /// incomplete configuration.
    pub fn new_from_env() -> SecretsManagerResult<Self> {
        Self::from_config(&ServiceConfig::from_env(DEFAULT_SERVICE_NAME)?)
    }

    /// Create a client from an already loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SecretsManagerError::InvalidArgument`] for malformed or
    /// incomplete configuration.
    pub fn from_config(config: &ServiceConfig) -> SecretsManagerResult<Self> {
        let mut options = SecretsManagerV1Options::new(config.authenticator()?)
            .with_http_config(
                HttpConfig::default()
                    .with_gzip(config.enable_gzip)
                    .with_disable_ssl_verification(config.disable_ssl),
            );
        options.url.clone_from(&config.url);
        let mut client = Self::new(options)?;
        if config.enable_retries {
            client.enable_retries(config.max_retries, config.retry_interval);
        }
        info!(
            url = client.service_url(),
            auth = client.service.authenticator().authentication_type(),
            "Secrets Manager client configured"
        );
        Ok(client)
    }

    /// Regional endpoints are not published for this service.
    ///
    /// # Errors
    ///
    /// Always returns [`SecretsManagerError::InvalidArgument`].
    pub fn service_url_for_region(region: &str) -> SecretsManagerResult<String> {
        debug!(region, "Regional URL requested");
        Err(SecretsManagerError::invalid_argument(
            "service does not support regional URLs",
        ))
    }

    /// The configured base URL.
    #[must_use]
    pub fn service_url(&self) -> &str {
        self.service.service_url()
    }

    /// Replace the base URL.
    ///
    /// # Errors
    ///
    /// Returns [`SecretsManagerError::InvalidArgument`] if `url` is empty or
    /// not absolute.
    pub fn set_service_url(&mut self, url: &str) -> SecretsManagerResult<()> {
        Ok(self.service.set_service_url(url)?)
    }

    /// Headers sent with every request.
    pub fn set_default_headers(&mut self, headers: HeaderMap) {
        self.service.set_default_headers(headers);
    }

    /// Retry transient failures up to `max_retries` times, waiting at most
    /// `max_interval` between attempts. Zero keeps the default for either.
    pub fn enable_retries(&mut self, max_retries: u32, max_interval: Duration) {
        self.service.enable_retries(max_retries, max_interval);
    }

    /// Stop retrying.
    pub fn disable_retries(&mut self) {
        self.service.disable_retries();
    }

    /// Toggle gzip negotiation.
    ///
    /// # Errors
    ///
    /// Returns [`SecretsManagerError::Transport`] if the transport cannot be
    /// rebuilt.
    pub fn set_enable_gzip_compression(&mut self, enable: bool) -> SecretsManagerResult<()> {
        Ok(self.service.set_enable_gzip_compression(enable)?)
    }

    /// Whether gzip negotiation is on.
    #[must_use]
    pub const fn enable_gzip_compression(&self) -> bool {
        self.service.enable_gzip_compression()
    }

    /// The underlying service handle.
    #[must_use]
    pub const fn base_service(&self) -> &BaseService {
        &self.service
    }

    fn prepare(
        method: Method,
        template: &str,
        params: &[(&str, &str)],
        operation: &str,
    ) -> SecretsManagerResult<ApiRequest> {
        Ok(ApiRequest::new(method, template, params)?.sdk_headers(
            SERVICE_NAME,
            SERVICE_VERSION,
            operation,
        ))
    }

    async fn send(
        &self,
        request: &ApiRequest,
        ctx: &Context,
    ) -> SecretsManagerResult<DetailedResponse> {
        Ok(self.service.request(request, ctx).await?)
    }

    /// Create a secret group.
    ///
    /// # Errors
    ///
    /// See [`SecretsManagerV1::create_secret_group_with_context`].
    pub async fn create_secret_group(
        &self,
        options: &CreateSecretGroupOptions,
    ) -> SecretsManagerResult<(CollectionEnvelope<SecretGroupResource>, DetailedResponse)> {
        self.create_secret_group_with_context(options, &Context::background())
            .await
    }

    /// Create a secret group, honouring `ctx`.
    ///
    /// # Errors
    ///
    /// Returns [`SecretsManagerError::InvalidArgument`] for invalid options,
    /// [`SecretsManagerError::Transport`] for failed exchanges (409 when the
    /// name is taken) and [`SecretsManagerError::SchemaMismatch`] when the
    /// response cannot be decoded.
    #[instrument(skip_all)]
    pub async fn create_secret_group_with_context(
        &self,
        options: &CreateSecretGroupOptions,
        ctx: &Context,
    ) -> SecretsManagerResult<(CollectionEnvelope<SecretGroupResource>, DetailedResponse)> {
        options.validate()?;
        let request = Self::prepare(Method::POST, SECRET_GROUPS, &[], "CreateSecretGroup")?
            .accept_json()
            .json_body(encode_envelope(
                collection_type::SECRET_GROUP,
                options.resources.clone(),
            )?)
            .headers(&options.headers)?;
        let response = self.send(&request, ctx).await?;
        decode_response(response, None)
    }

    /// List secret groups.
    ///
    /// # Errors
    ///
    /// See [`SecretsManagerV1::create_secret_group_with_context`].
    pub async fn list_secret_groups(
        &self,
        options: &ListSecretGroupsOptions,
    ) -> SecretsManagerResult<(CollectionEnvelope<SecretGroupResource>, DetailedResponse)> {
        self.list_secret_groups_with_context(options, &Context::background())
            .await
    }

    /// List secret groups, honouring `ctx`.
    ///
    /// # Errors
    ///
    /// See [`SecretsManagerV1::create_secret_group_with_context`].
    #[instrument(skip_all)]
    pub async fn list_secret_groups_with_context(
        &self,
        options: &ListSecretGroupsOptions,
        ctx: &Context,
    ) -> SecretsManagerResult<(CollectionEnvelope<SecretGroupResource>, DetailedResponse)> {
        let request = Self::prepare(Method::GET, SECRET_GROUPS, &[], "ListSecretGroups")?
            .accept_json()
            .headers(&options.headers)?;
        let response = self.send(&request, ctx).await?;
        decode_response(response, None)
    }

    /// Get a secret group.
    ///
    /// # Errors
    ///
    /// See [`SecretsManagerV1::create_secret_group_with_context`].
    pub async fn get_secret_group(
        &self,
        options: &GetSecretGroupOptions,
    ) -> SecretsManagerResult<(CollectionEnvelope<SecretGroupResource>, DetailedResponse)> {
        self.get_secret_group_with_context(options, &Context::background())
            .await
    }

    /// Get a secret group, honouring `ctx`.
    ///
    /// # Errors
    ///
    /// See [`SecretsManagerV1::create_secret_group_with_context`].
    #[instrument(skip_all, fields(id = %options.id))]
    pub async fn get_secret_group_with_context(
        &self,
        options: &GetSecretGroupOptions,
        ctx: &Context,
    ) -> SecretsManagerResult<(CollectionEnvelope<SecretGroupResource>, DetailedResponse)> {
        options.validate()?;
        let request =
            Self::prepare(Method::GET, SECRET_GROUP, &[("id", &options.id)], "GetSecretGroup")?
                .accept_json()
                .headers(&options.headers)?;
        let response = self.send(&request, ctx).await?;
        decode_response(response, None)
    }

    /// Rename or redescribe a secret group.
    ///
    /// # Errors
    ///
    /// See [`SecretsManagerV1::create_secret_group_with_context`].
    pub async fn update_secret_group_metadata(
        &self,
        options: &UpdateSecretGroupMetadataOptions,
    ) -> SecretsManagerResult<(CollectionEnvelope<SecretGroupResource>, DetailedResponse)> {
        self.update_secret_group_metadata_with_context(options, &Context::background())
            .await
    }

    /// Rename or redescribe a secret group, honouring `ctx`.
    ///
    /// # Errors
    ///
    /// See [`SecretsManagerV1::create_secret_group_with_context`].
    #[instrument(skip_all, fields(id = %options.id))]
    pub async fn update_secret_group_metadata_with_context(
        &self,
        options: &UpdateSecretGroupMetadataOptions,
        ctx: &Context,
    ) -> SecretsManagerResult<(CollectionEnvelope<SecretGroupResource>, DetailedResponse)> {
        options.validate()?;
        let request = Self::prepare(
            Method::PUT,
            SECRET_GROUP,
            &[("id", &options.id)],
            "UpdateSecretGroupMetadata",
        )?
        .accept_json()
        .json_body(encode_envelope(
            collection_type::SECRET_GROUP,
            options.resources.clone(),
        )?)
        .headers(&options.headers)?;
        let response = self.send(&request, ctx).await?;
        decode_response(response, None)
    }

    /// Delete an empty secret group.
    ///
    /// # Errors
    ///
    /// See [`SecretsManagerV1::create_secret_group_with_context`].
    pub async fn delete_secret_group(
        &self,
        options: &DeleteSecretGroupOptions,
    ) -> SecretsManagerResult<DetailedResponse> {
        self.delete_secret_group_with_context(options, &Context::background())
            .await
    }

    /// Delete an empty secret group, honouring `ctx`.
    ///
    /// # Errors
    ///
    /// See [`SecretsManagerV1::create_secret_group_with_context`].
    #[instrument(skip_all, fields(id = %options.id))]
    pub async fn delete_secret_group_with_context(
        &self,
        options: &DeleteSecretGroupOptions,
        ctx: &Context,
    ) -> SecretsManagerResult<DetailedResponse> {
        options.validate()?;
        let request = Self::prepare(
            Method::DELETE,
            SECRET_GROUP,
            &[("id", &options.id)],
            "DeleteSecretGroup",
        )?
        .headers(&options.headers)?;
        self.send(&request, ctx).await
    }

    /// Create a secret.
    ///
    /// # Errors
    ///
    /// See [`SecretsManagerV1::create_secret_group_with_context`].
    pub async fn create_secret(
        &self,
        options: &CreateSecretOptions,
    ) -> SecretsManagerResult<(CollectionEnvelope<SecretResource>, DetailedResponse)> {
        self.create_secret_with_context(options, &Context::background())
            .await
    }

    /// Create a secret, honouring `ctx`.
    ///
    /// # Errors
    ///
    /// See [`SecretsManagerV1::create_secret_group_with_context`]. A secret
    /// whose type differs from `options.secret_type` is rejected before
    /// sending.
    #[instrument(skip_all, fields(secret_type = %options.secret_type))]
    pub async fn create_secret_with_context(
        &self,
        options: &CreateSecretOptions,
        ctx: &Context,
    ) -> SecretsManagerResult<(CollectionEnvelope<SecretResource>, DetailedResponse)> {
        options.validate()?;
        let request = Self::prepare(
            Method::POST,
            SECRETS,
            &[("secret_type", &options.secret_type)],
            "CreateSecret",
        )?
        .accept_json()
        .json_body(encode_envelope(
            collection_type::SECRET,
            options.resources.clone(),
        )?)
        .headers(&options.headers)?;
        let response = self.send(&request, ctx).await?;
        decode_response(response, None)
    }

    /// List secrets of one type.
    ///
    /// # Errors
    ///
    /// See [`SecretsManagerV1::create_secret_group_with_context`].
    pub async fn list_secrets(
        &self,
        options: &ListSecretsOptions,
    ) -> SecretsManagerResult<(CollectionEnvelope<SecretResource>, DetailedResponse)> {
        self.list_secrets_with_context(options, &Context::background())
            .await
    }

    /// List secrets of one type, honouring `ctx`.
    ///
    /// # Errors
    ///
    /// See [`SecretsManagerV1::create_secret_group_with_context`].
    #[instrument(skip_all, fields(secret_type = %options.secret_type))]
    pub async fn list_secrets_with_context(
        &self,
        options: &ListSecretsOptions,
        ctx: &Context,
    ) -> SecretsManagerResult<(CollectionEnvelope<SecretResource>, DetailedResponse)> {
        options.validate()?;
        let request = Self::prepare(
            Method::GET,
            SECRETS,
            &[("secret_type", &options.secret_type)],
            "ListSecrets",
        )?
        .query_opt("limit", options.limit)
        .query_opt("offset", options.offset)
        .accept_json()
        .headers(&options.headers)?;
        let response = self.send(&request, ctx).await?;
        decode_response(response, None)
    }

    /// List secrets of every type.
    ///
    /// # Errors
    ///
    /// See [`SecretsManagerV1::create_secret_group_with_context`].
    pub async fn list_all_secrets(
        &self,
        options: &ListAllSecretsOptions,
    ) -> SecretsManagerResult<(CollectionEnvelope<SecretResource>, DetailedResponse)> {
        self.list_all_secrets_with_context(options, &Context::background())
            .await
    }

    /// List secrets of every type, honouring `ctx`.
    ///
    /// # Errors
    ///
    /// See [`SecretsManagerV1::create_secret_group_with_context`].
    #[instrument(skip_all)]
    pub async fn list_all_secrets_with_context(
        &self,
        options: &ListAllSecretsOptions,
        ctx: &Context,
    ) -> SecretsManagerResult<(CollectionEnvelope<SecretResource>, DetailedResponse)> {
        let request = Self::prepare(Method::GET, ALL_SECRETS, &[], "ListAllSecrets")?
            .query_opt("limit", options.limit)
            .query_opt("offset", options.offset)
            .query_opt("search", options.search.as_deref())
            .query_opt("sort_by", options.sort_by.as_deref())
            .query_list("groups", options.groups.as_deref().unwrap_or_default())
            .accept_json()
            .headers(&options.headers)?;
        let response = self.send(&request, ctx).await?;
        decode_response(response, None)
    }

    /// Get a secret with its payload.
    ///
    /// # Errors
    ///
    /// See [`SecretsManagerV1::create_secret_group_with_context`].
    pub async fn get_secret(
        &self,
        options: &GetSecretOptions,
    ) -> SecretsManagerResult<(CollectionEnvelope<SecretResource>, DetailedResponse)> {
        self.get_secret_with_context(options, &Context::background())
            .await
    }

    /// Get a secret with its payload, honouring `ctx`.
    ///
    /// # Errors
    ///
    /// See [`SecretsManagerV1::create_secret_group_with_context`].
    #[instrument(skip_all, fields(secret_type = %options.secret_type, id = %options.id))]
    pub async fn get_secret_with_context(
        &self,
        options: &GetSecretOptions,
        ctx: &Context,
    ) -> SecretsManagerResult<(CollectionEnvelope<SecretResource>, DetailedResponse)> {
        options.validate()?;
        let request = Self::prepare(
            Method::GET,
            SECRET,
            &[("secret_type", &options.secret_type), ("id", &options.id)],
            "GetSecret",
        )?
        .accept_json()
        .headers(&options.headers)?;
        let response = self.send(&request, ctx).await?;
        decode_response(response, None)
    }

    /// Rotate, restore or revoke the credentials of a secret.
    ///
    /// # Errors
    ///
    /// See [`SecretsManagerV1::create_secret_group_with_context`].
    pub async fn update_secret(
        &self,
        options: &UpdateSecretOptions,
    ) -> SecretsManagerResult<(CollectionEnvelope<SecretResource>, DetailedResponse)> {
        self.update_secret_with_context(options, &Context::background())
            .await
    }

    /// Rotate, restore or revoke the credentials of a secret, honouring
    /// `ctx`.
    ///
    /// The action body is sent bare.
    ///
    /// # Errors
    ///
    /// See [`SecretsManagerV1::create_secret_group_with_context`]. A body
    /// that does not fit the action is rejected before sending.
    #[instrument(
        skip_all,
        fields(secret_type = %options.secret_type, id = %options.id, action = %options.action)
    )]
    pub async fn update_secret_with_context(
        &self,
        options: &UpdateSecretOptions,
        ctx: &Context,
    ) -> SecretsManagerResult<(CollectionEnvelope<SecretResource>, DetailedResponse)> {
        options.validate()?;
        let request = Self::prepare(
            Method::POST,
            SECRET,
            &[("secret_type", &options.secret_type), ("id", &options.id)],
            "UpdateSecret",
        )?
        .query("action", &options.action)
        .accept_json()
        .json_body(encode(&options.secret_action)?)
        .headers(&options.headers)?;
        let response = self.send(&request, ctx).await?;
        decode_response(response, None)
    }

    /// Delete a secret.
    ///
    /// # Errors
    ///
    /// See [`SecretsManagerV1::create_secret_group_with_context`].
    pub async fn delete_secret(
        &self,
        options: &DeleteSecretOptions,
    ) -> SecretsManagerResult<DetailedResponse> {
        self.delete_secret_with_context(options, &Context::background())
            .await
    }

    /// Delete a secret, honouring `ctx`.
    ///
    /// # Errors
    ///
    /// See [`SecretsManagerV1::create_secret_group_with_context`].
    #[instrument(skip_all, fields(secret_type = %options.secret_type, id = %options.id))]
    pub async fn delete_secret_with_context(
        &self,
        options: &DeleteSecretOptions,
        ctx: &Context,
    ) -> SecretsManagerResult<DetailedResponse> {
        options.validate()?;
        let request = Self::prepare(
            Method::DELETE,
            SECRET,
            &[("secret_type", &options.secret_type), ("id", &options.id)],
            "DeleteSecret",
        )?
        .headers(&options.headers)?;
        self.send(&request, ctx).await
    }

    /// List the versions of a secret.
    ///
    /// # Errors
    ///
    /// See [`SecretsManagerV1::create_secret_group_with_context`].
    pub async fn list_secret_versions(
        &self,
        options: &ListSecretVersionsOptions,
    ) -> SecretsManagerResult<(CollectionEnvelope<SecretVersionInfo>, DetailedResponse)> {
        self.list_secret_versions_with_context(options, &Context::background())
            .await
    }

    /// List the versions of a secret, honouring `ctx`.
    ///
    /// # Errors
    ///
    /// See [`SecretsManagerV1::create_secret_group_with_context`].
    #[instrument(skip_all, fields(secret_type = %options.secret_type, id = %options.id))]
    pub async fn list_secret_versions_with_context(
        &self,
        options: &ListSecretVersionsOptions,
        ctx: &Context,
    ) -> SecretsManagerResult<(CollectionEnvelope<SecretVersionInfo>, DetailedResponse)> {
        options.validate()?;
        let request = Self::prepare(
            Method::GET,
            SECRET_VERSIONS,
            &[("secret_type", &options.secret_type), ("id", &options.id)],
            "ListSecretVersions",
        )?
        .accept_json()
        .headers(&options.headers)?;
        let response = self.send(&request, ctx).await?;
        decode_response(response, Some(&options.secret_type))
    }

    /// Get one version of a secret with its payload.
    ///
    /// # Errors
    ///
    /// See [`SecretsManagerV1::create_secret_group_with_context`].
    pub async fn get_secret_version(
        &self,
        options: &GetSecretVersionOptions,
    ) -> SecretsManagerResult<(CollectionEnvelope<SecretVersion>, DetailedResponse)> {
        self.get_secret_version_with_context(options, &Context::background())
            .await
    }

    /// Get one version of a secret with its payload, honouring `ctx`.
    ///
    /// # Errors
    ///
    /// See [`SecretsManagerV1::create_secret_group_with_context`].
    #[instrument(
        skip_all,
        fields(secret_type = %options.secret_type, id = %options.id, version_id = %options.version_id)
    )]
    pub async fn get_secret_version_with_context(
        &self,
        options: &GetSecretVersionOptions,
        ctx: &Context,
    ) -> SecretsManagerResult<(CollectionEnvelope<SecretVersion>, DetailedResponse)> {
        options.validate()?;
        let request = Self::prepare(
            Method::GET,
            SECRET_VERSION,
            &[
                ("secret_type", &options.secret_type),
                ("id", &options.id),
                ("version_id", &options.version_id),
            ],
            "GetSecretVersion",
        )?
        .accept_json()
        .headers(&options.headers)?;
        let response = self.send(&request, ctx).await?;
        decode_response(response, Some(&options.secret_type))
    }

    /// Get the metadata of one version of a secret.
    ///
    /// # Errors
    ///
    /// See [`SecretsManagerV1::create_secret_group_with_context`].
    pub async fn get_secret_version_metadata(
        &self,
        options: &GetSecretVersionMetadataOptions,
    ) -> SecretsManagerResult<(CollectionEnvelope<SecretVersionMetadata>, DetailedResponse)> {
        self.get_secret_version_metadata_with_context(options, &Context::background())
            .await
    }

    /// Get the metadata of one version of a secret, honouring `ctx`.
    ///
    /// # Errors
    ///
    /// See [`SecretsManagerV1::create_secret_group_with_context`].
    #[instrument(
        skip_all,
        fields(secret_type = %options.secret_type, id = %options.id, version_id = %options.version_id)
    )]
    pub async fn get_secret_version_metadata_with_context(
        &self,
        options: &GetSecretVersionMetadataOptions,
        ctx: &Context,
    ) -> SecretsManagerResult<(CollectionEnvelope<SecretVersionMetadata>, DetailedResponse)> {
        options.validate()?;
        let request = Self::prepare(
            Method::GET,
            SECRET_VERSION_METADATA,
            &[
                ("secret_type", &options.secret_type),
                ("id", &options.id),
                ("version_id", &options.version_id),
            ],
            "GetSecretVersionMetadata",
        )?
        .accept_json()
        .headers(&options.headers)?;
        let response = self.send(&request, ctx).await?;
        decode_response(response, Some(&options.secret_type))
    }

    /// Get the metadata of a secret.
    ///
    /// # Errors
    ///
    /// See [`SecretsManagerV1::create_secret_group_with_context`].
    pub async fn get_secret_metadata(
        &self,
        options: &GetSecretMetadataOptions,
    ) -> SecretsManagerResult<(CollectionEnvelope<SecretMetadata>, DetailedResponse)> {
        self.get_secret_metadata_with_context(options, &Context::background())
            .await
    }

    /// Get the metadata of a secret, honouring `ctx`.
    ///
    /// # Errors
    ///
    /// See [`SecretsManagerV1::create_secret_group_with_context`].
    #[instrument(skip_all, fields(secret_type = %options.secret_type, id = %options.id))]
    pub async fn get_secret_metadata_with_context(
        &self,
        options: &GetSecretMetadataOptions,
        ctx: &Context,
    ) -> SecretsManagerResult<(CollectionEnvelope<SecretMetadata>, DetailedResponse)> {
        options.validate()?;
        let request = Self::prepare(
            Method::GET,
            SECRET_METADATA,
            &[("secret_type", &options.secret_type), ("id", &options.id)],
            "GetSecretMetadata",
        )?
        .accept_json()
        .headers(&options.headers)?;
        let response = self.send(&request, ctx).await?;
        decode_response(response, None)
    }

    /// Replace the metadata of a secret.
    ///
    /// # Errors
    ///
    /// See [`SecretsManagerV1::create_secret_group_with_context`].
    pub async fn update_secret_metadata(
        &self,
        options: &UpdateSecretMetadataOptions,
    ) -> SecretsManagerResult<(CollectionEnvelope<SecretMetadata>, DetailedResponse)> {
        self.update_secret_metadata_with_context(options, &Context::background())
            .await
    }

    /// Replace the metadata of a secret, honouring `ctx`.
    ///
    /// # Errors
    ///
    /// See [`SecretsManagerV1::create_secret_group_with_context`].
    #[instrument(skip_all, fields(secret_type = %options.secret_type, id = %options.id))]
    pub async fn update_secret_metadata_with_context(
        &self,
        options: &UpdateSecretMetadataOptions,
        ctx: &Context,
    ) -> SecretsManagerResult<(CollectionEnvelope<SecretMetadata>, DetailedResponse)> {
        options.validate()?;
        let request = Self::prepare(
            Method::PUT,
            SECRET_METADATA,
            &[("secret_type", &options.secret_type), ("id", &options.id)],
            "UpdateSecretMetadata",
        )?
        .accept_json()
        .json_body(encode_envelope(
            collection_type::SECRET,
            options.resources.clone(),
        )?)
        .headers(&options.headers)?;
        let response = self.send(&request, ctx).await?;
        decode_response(response, None)
    }

    /// Set the policies of a secret.
    ///
    /// # Errors
    ///
    /// See [`SecretsManagerV1::create_secret_group_with_context`].
    pub async fn put_policy(
        &self,
        options: &PutPolicyOptions,
    ) -> SecretsManagerResult<(GetSecretPolicies, DetailedResponse)> {
        self.put_policy_with_context(options, &Context::background())
            .await
    }

    /// Set the policies of a secret, honouring `ctx`.
    ///
    /// # Errors
    ///
    /// See [`SecretsManagerV1::create_secret_group_with_context`].
    #[instrument(skip_all, fields(secret_type = %options.secret_type, id = %options.id))]
    pub async fn put_policy_with_context(
        &self,
        options: &PutPolicyOptions,
        ctx: &Context,
    ) -> SecretsManagerResult<(GetSecretPolicies, DetailedResponse)> {
        options.validate()?;
        let request = Self::prepare(
            Method::PUT,
            SECRET_POLICIES,
            &[("secret_type", &options.secret_type), ("id", &options.id)],
            "PutPolicy",
        )?
        .query_opt("policy", options.policy.as_deref())
        .accept_json()
        .json_body(encode_envelope(
            collection_type::SECRET_POLICY,
            options.resources.clone(),
        )?)
        .headers(&options.headers)?;
        let response = self.send(&request, ctx).await?;
        decode_response(
            response,
            Some(options.policy.as_deref().unwrap_or(policy::ROTATION)),
        )
    }

    /// Get the policies of a secret.
    ///
    /// # Errors
    ///
    /// See [`SecretsManagerV1::create_secret_group_with_context`].
    pub async fn get_policy(
        &self,
        options: &GetPolicyOptions,
    ) -> SecretsManagerResult<(GetSecretPolicies, DetailedResponse)> {
        self.get_policy_with_context(options, &Context::background())
            .await
    }

    /// Get the policies of a secret, honouring `ctx`.
    ///
    /// # Errors
    ///
    /// See [`SecretsManagerV1::create_secret_group_with_context`].
    #[instrument(skip_all, fields(secret_type = %options.secret_type, id = %options.id))]
    pub async fn get_policy_with_context(
        &self,
        options: &GetPolicyOptions,
        ctx: &Context,
    ) -> SecretsManagerResult<(GetSecretPolicies, DetailedResponse)> {
        options.validate()?;
        let request = Self::prepare(
            Method::GET,
            SECRET_POLICIES,
            &[("secret_type", &options.secret_type), ("id", &options.id)],
            "GetPolicy",
        )?
        .query_opt("policy", options.policy.as_deref())
        .accept_json()
        .headers(&options.headers)?;
        let response = self.send(&request, ctx).await?;
        decode_response(
            response,
            Some(options.policy.as_deref().unwrap_or(policy::ROTATION)),
        )
    }

    /// Configure a secrets engine.
    ///
    /// # Errors
    ///
    /// See [`SecretsManagerV1::create_secret_group_with_context`].
    pub async fn put_config(
        &self,
        options: &PutConfigOptions,
    ) -> SecretsManagerResult<DetailedResponse> {
        self.put_config_with_context(options, &Context::background())
            .await
    }

    /// Configure a secrets engine, honouring `ctx`.
    ///
    /// The configuration is sent bare.
    ///
    /// # Errors
    ///
    /// See [`SecretsManagerV1::create_secret_group_with_context`].
    #[instrument(skip_all, fields(secret_type = %options.secret_type))]
    pub async fn put_config_with_context(
        &self,
        options: &PutConfigOptions,
        ctx: &Context,
    ) -> SecretsManagerResult<DetailedResponse> {
        options.validate()?;
        let request = Self::prepare(
            Method::PUT,
            CONFIG,
            &[("secret_type", &options.secret_type)],
            "PutConfig",
        )?
        .json_body(encode(&options.engine_config)?)
        .headers(&options.headers)?;
        self.send(&request, ctx).await
    }

    /// Get the configuration of a secrets engine.
    ///
    /// # Errors
    ///
    /// See [`SecretsManagerV1::create_secret_group_with_context`].
    pub async fn get_config(
        &self,
        options: &GetConfigOptions,
    ) -> SecretsManagerResult<(CollectionEnvelope<GetConfigResourcesItem>, DetailedResponse)> {
        self.get_config_with_context(options, &Context::background())
            .await
    }

    /// Get the configuration of a secrets engine, honouring `ctx`.
    ///
    /// # Errors
    ///
    /// See [`SecretsManagerV1::create_secret_group_with_context`].
    #[instrument(skip_all, fields(secret_type = %options.secret_type))]
    pub async fn get_config_with_context(
        &self,
        options: &GetConfigOptions,
        ctx: &Context,
    ) -> SecretsManagerResult<(CollectionEnvelope<GetConfigResourcesItem>, DetailedResponse)> {
        options.validate()?;
        let request = Self::prepare(
            Method::GET,
            CONFIG,
            &[("secret_type", &options.secret_type)],
            "GetConfig",
        )?
        .accept_json()
        .headers(&options.headers)?;
        let response = self.send(&request, ctx).await?;
        decode_response(response, Some(&options.secret_type))
    }

    /// Add a certificate authority or DNS provider.
    ///
    /// # Errors
    ///
    /// See [`SecretsManagerV1::create_secret_group_with_context`].
    pub async fn create_config_element(
        &self,
        options: &CreateConfigElementOptions,
    ) -> SecretsManagerResult<(CollectionEnvelope<ConfigElementDef>, DetailedResponse)> {
        self.create_config_element_with_context(options, &Context::background())
            .await
    }

    /// Add a certificate authority or DNS provider, honouring `ctx`.
    ///
    /// The element is sent bare.
    ///
    /// # Errors
    ///
    /// See [`SecretsManagerV1::create_secret_group_with_context`].
    #[instrument(
        skip_all,
        fields(secret_type = %options.secret_type, config_element = %options.config_element)
    )]
    pub async fn create_config_element_with_context(
        &self,
        options: &CreateConfigElementOptions,
        ctx: &Context,
    ) -> SecretsManagerResult<(CollectionEnvelope<ConfigElementDef>, DetailedResponse)> {
        options.validate()?;
        let request = Self::prepare(
            Method::POST,
            CONFIG_ELEMENTS,
            &[
                ("secret_type", &options.secret_type),
                ("config_element", &options.config_element),
            ],
            "CreateConfigElement",
        )?
        .accept_json()
        .json_body(encode(&options.element)?)
        .headers(&options.headers)?;
        let response = self.send(&request, ctx).await?;
        decode_response(response, None)
    }

    /// List the certificate authorities or DNS providers.
    ///
    /// # Errors
    ///
    /// See [`SecretsManagerV1::create_secret_group_with_context`].
    pub async fn get_config_elements(
        &self,
        options: &GetConfigElementsOptions,
    ) -> SecretsManagerResult<(
        CollectionEnvelope<GetConfigElementsResourcesItem>,
        DetailedResponse,
    )> {
        self.get_config_elements_with_context(options, &Context::background())
            .await
    }

    /// List the certificate authorities or DNS providers, honouring `ctx`.
    ///
    /// # Errors
    ///
    /// See [`SecretsManagerV1::create_secret_group_with_context`].
    #[instrument(
        skip_all,
        fields(secret_type = %options.secret_type, config_element = %options.config_element)
    )]
    pub async fn get_config_elements_with_context(
        &self,
        options: &GetConfigElementsOptions,
        ctx: &Context,
    ) -> SecretsManagerResult<(
        CollectionEnvelope<GetConfigElementsResourcesItem>,
        DetailedResponse,
    )> {
        options.validate()?;
        let request = Self::prepare(
            Method::GET,
            CONFIG_ELEMENTS,
            &[
                ("secret_type", &options.secret_type),
                ("config_element", &options.config_element),
            ],
            "GetConfigElements",
        )?
        .accept_json()
        .headers(&options.headers)?;
        let response = self.send(&request, ctx).await?;
        decode_response(response, Some(&options.config_element))
    }

    /// Get one certificate authority or DNS provider.
    ///
    /// # Errors
    ///
    /// See [`SecretsManagerV1::create_secret_group_with_context`].
    pub async fn get_config_element(
        &self,
        options: &GetConfigElementOptions,
    ) -> SecretsManagerResult<(CollectionEnvelope<ConfigElementDef>, DetailedResponse)> {
        self.get_config_element_with_context(options, &Context::background())
            .await
    }

    /// Get one certificate authority or DNS provider, honouring `ctx`.
    ///
    /// # Errors
    ///
    /// See [`SecretsManagerV1::create_secret_group_with_context`].
    #[instrument(
        skip_all,
        fields(
            secret_type = %options.secret_type,
            config_element = %options.config_element,
            config_name = %options.config_name
        )
    )]
    pub async fn get_config_element_with_context(
        &self,
        options: &GetConfigElementOptions,
        ctx: &Context,
    ) -> SecretsManagerResult<(CollectionEnvelope<ConfigElementDef>, DetailedResponse)> {
        options.validate()?;
        let request = Self::prepare(
            Method::GET,
            CONFIG_ELEMENT,
            &[
                ("secret_type", &options.secret_type),
                ("config_element", &options.config_element),
                ("config_name", &options.config_name),
            ],
            "GetConfigElement",
        )?
        .accept_json()
        .headers(&options.headers)?;
        let response = self.send(&request, ctx).await?;
        decode_response(response, None)
    }

    /// Replace the settings of a certificate authority or DNS provider.
    ///
    /// # Errors
    ///
    /// See [`SecretsManagerV1::create_secret_group_with_context`].
    pub async fn update_config_element(
        &self,
        options: &UpdateConfigElementOptions,
    ) -> SecretsManagerResult<(CollectionEnvelope<ConfigElementDef>, DetailedResponse)> {
        self.update_config_element_with_context(options, &Context::background())
            .await
    }

    /// Replace the settings of a certificate authority or DNS provider,
    /// honouring `ctx`.
    ///
    /// The update is sent bare.
    ///
    /// # Errors
    ///
    /// See [`SecretsManagerV1::create_secret_group_with_context`].
    #[instrument(
        skip_all,
        fields(
            secret_type = %options.secret_type,
            config_element = %options.config_element,
            config_name = %options.config_name
        )
    )]
    pub async fn update_config_element_with_context(
        &self,
        options: &UpdateConfigElementOptions,
        ctx: &Context,
    ) -> SecretsManagerResult<(CollectionEnvelope<ConfigElementDef>, DetailedResponse)> {
        options.validate()?;
        let request = Self::prepare(
            Method::PUT,
            CONFIG_ELEMENT,
            &[
                ("secret_type", &options.secret_type),
                ("config_element", &options.config_element),
                ("config_name", &options.config_name),
            ],
            "UpdateConfigElement",
        )?
        .accept_json()
        .json_body(encode(&options.update)?)
        .headers(&options.headers)?;
        let response = self.send(&request, ctx).await?;
        decode_response(response, None)
    }

    /// Delete a certificate authority or DNS provider.
    ///
    /// # Errors
    ///
    /// See [`SecretsManagerV1::create_secret_group_with_context`].
    pub async fn delete_config_element(
        &self,
        options: &DeleteConfigElementOptions,
    ) -> SecretsManagerResult<DetailedResponse> {
        self.delete_config_element_with_context(options, &Context::background())
            .await
    }

    /// Delete a certificate authority or DNS provider, honouring `ctx`.
    ///
    /// # Errors
    ///
    /// See [`SecretsManagerV1::create_secret_group_with_context`].
    #[instrument(
        skip_all,
        fields(
            secret_type = %options.secret_type,
            config_element = %options.config_element,
            config_name = %options.config_name
        )
    )]
    pub async fn delete_config_element_with_context(
        &self,
        options: &DeleteConfigElementOptions,
        ctx: &Context,
    ) -> SecretsManagerResult<DetailedResponse> {
        options.validate()?;
        let request = Self::prepare(
            Method::DELETE,
            CONFIG_ELEMENT,
            &[
                ("secret_type", &options.secret_type),
                ("config_element", &options.config_element),
                ("config_name", &options.config_name),
            ],
            "DeleteConfigElement",
        )?
        .headers(&options.headers)?;
        self.send(&request, ctx).await
    }
}

/// Decode `response` into `T`, keeping the response on failure.
fn decode_response<T: JsonResource>(
    response: DetailedResponse,
    discriminator: Option<&str>,
) -> SecretsManagerResult<(T, DetailedResponse)> {
    match decode(&response.body, discriminator) {
        Ok(result) => Ok((result, response)),
        Err(e) => {
            debug!(error = %e, status = response.status_code, "Response did not decode");
            Err(e.with_response(response))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sdk_core::NoAuthAuthenticator;
    use std::collections::HashMap;

    fn client() -> SecretsManagerV1 {
        SecretsManagerV1::new(SecretsManagerV1Options::new(Arc::new(NoAuthAuthenticator))).unwrap()
    }

    #[test]
    fn test_default_url() {
        assert_eq!(client().service_url(), DEFAULT_SERVICE_URL);
    }

    #[test]
    fn test_regional_urls_unsupported() {
        let err = SecretsManagerV1::service_url_for_region("us-south").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid argument: service does not support regional URLs"
        );
    }

    #[test]
    fn test_invalid_url_rejected() {
        let mut client = client();
        assert!(matches!(
            client.set_service_url(""),
            Err(SecretsManagerError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_from_config() {
        let vars: HashMap<&str, &str> = [
            ("SECRETS_MANAGER_AUTH_TYPE", "bearertoken"),
            ("SECRETS_MANAGER_BEARER_TOKEN", "token"),
            ("SECRETS_MANAGER_URL", "https://sm.example.com/"),
            ("SECRETS_MANAGER_ENABLE_GZIP", "true"),
            ("SECRETS_MANAGER_ENABLE_RETRIES", "true"),
            ("SECRETS_MANAGER_MAX_RETRIES", "3"),
        ]
        .into_iter()
        .collect();
        let config = ServiceConfig::from_lookup(DEFAULT_SERVICE_NAME, |key| {
            vars.get(key).map(ToString::to_string)
        })
        .unwrap();

        let client = SecretsManagerV1::from_config(&config).unwrap();
        assert_eq!(client.service_url(), "https://sm.example.com");
        assert!(client.enable_gzip_compression());
        assert_eq!(
            client.base_service().retry_policy().map(sdk_core::RetryPolicy::max_retries),
            Some(3)
        );
    }
}
