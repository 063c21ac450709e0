//! Parameters of each operation.
//!
//! Every record takes its required fields in `new` and offers a `with_*`
//! setter per optional field. The enumerated values of the API are exposed
//! as string constants; they are recommendations and any string is sent
//! through unchanged.

use crate::error::{SecretsManagerError, SecretsManagerResult};
use crate::models::{
    ConfigElementDef, ConfigElementUpdate, EngineConfig, SecretAction, SecretGroupMetadataUpdatable,
    SecretGroupResource, SecretMetadata, SecretPolicyRotation, SecretResource,
};
use crate::registry::{Discriminated, Family, action_discriminator, resolve_variant};
use std::collections::HashMap;

pub use crate::registry::{
    action, config_element, config_type, key_algorithm, policy, rotation_unit, secret_type,
    sort_by,
};

/// Alias accepted in place of a version ID for the previous version.
pub const VERSION_ID_PREVIOUS: &str = "previous";

/// Extra request headers, sent with one call only.
pub type Headers = HashMap<String, String>;

fn require(fields: &[(&str, &str)]) -> SecretsManagerResult<()> {
    match fields.iter().find(|(_, value)| value.is_empty()) {
        Some((name, _)) => Err(SecretsManagerError::invalid_argument(format!(
            "{name} must not be empty"
        ))),
        None => Ok(()),
    }
}

fn require_resources<T>(resources: &[T]) -> SecretsManagerResult<()> {
    if resources.is_empty() {
        return Err(SecretsManagerError::invalid_argument("resources must not be empty"));
    }
    Ok(())
}

macro_rules! with_headers {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $ty {
                /// Send `value` as header `name` with this call.
                #[must_use]
                pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
                    self.headers.insert(name.into(), value.into());
                    self
                }

                /// Replace the extra headers of this call.
                #[must_use]
                pub fn with_headers(mut self, headers: Headers) -> Self {
                    self.headers = headers;
                    self
                }
            }
        )+
    };
}

/// Parameters of `CreateSecretGroup`.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateSecretGroupOptions {
    /// Groups to create
    pub resources: Vec<SecretGroupResource>,
    /// Extra request headers
    pub headers: Headers,
}

impl CreateSecretGroupOptions {
    /// Create `group`.
    #[must_use]
    pub fn new(group: SecretGroupResource) -> Self {
        Self {
            resources: vec![group],
            headers: Headers::new(),
        }
    }

    /// Check the required fields.
    ///
    /// # Errors
    ///
    /// Returns [`SecretsManagerError::InvalidArgument`] if no group is given.
    pub fn validate(&self) -> SecretsManagerResult<()> {
        require_resources(&self.resources)
    }
}

/// Parameters of `ListSecretGroups`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListSecretGroupsOptions {
    /// Extra request headers
    pub headers: Headers,
}

impl ListSecretGroupsOptions {
    /// No parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Parameters of `GetSecretGroup`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetSecretGroupOptions {
    /// Group ID
    pub id: String,
    /// Extra request headers
    pub headers: Headers,
}

impl GetSecretGroupOptions {
    /// Get group `id`.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            headers: Headers::new(),
        }
    }

    /// Check the required fields.
    ///
    /// # Errors
    ///
    /// Returns [`SecretsManagerError::InvalidArgument`] if `id` is empty.
    pub fn validate(&self) -> SecretsManagerResult<()> {
        require(&[("id", &self.id)])
    }
}

/// Parameters of `UpdateSecretGroupMetadata`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateSecretGroupMetadataOptions {
    /// Group ID
    pub id: String,
    /// New name and description
    pub resources: Vec<SecretGroupMetadataUpdatable>,
    /// Extra request headers
    pub headers: Headers,
}

impl UpdateSecretGroupMetadataOptions {
    /// Apply `update` to group `id`.
    #[must_use]
    pub fn new(id: impl Into<String>, update: SecretGroupMetadataUpdatable) -> Self {
        Self {
            id: id.into(),
            resources: vec![update],
            headers: Headers::new(),
        }
    }

    /// Check the required fields.
    ///
    /// # Errors
    ///
    /// Returns [`SecretsManagerError::InvalidArgument`] if `id` or the
    /// update is missing.
    pub fn validate(&self) -> SecretsManagerResult<()> {
        require(&[("id", &self.id)])?;
        require_resources(&self.resources)
    }
}

/// Parameters of `DeleteSecretGroup`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteSecretGroupOptions {
    /// Group ID
    pub id: String,
    /// Extra request headers
    pub headers: Headers,
}

impl DeleteSecretGroupOptions {
    /// Delete group `id`.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            headers: Headers::new(),
        }
    }

    /// Check the required fields.
    ///
    /// # Errors
    ///
    /// Returns [`SecretsManagerError::InvalidArgument`] if `id` is empty.
    pub fn validate(&self) -> SecretsManagerResult<()> {
        require(&[("id", &self.id)])
    }
}

/// Parameters of `CreateSecret`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateSecretOptions {
    /// Secret type path segment
    pub secret_type: String,
    /// Secrets to create; each must be of `secret_type`
    pub resources: Vec<SecretResource>,
    /// Extra request headers
    pub headers: Headers,
}

impl CreateSecretOptions {
    /// Create `secret`; the path segment follows its type.
    #[must_use]
    pub fn new(secret: impl Into<SecretResource>) -> Self {
        let secret = secret.into();
        Self {
            secret_type: secret.secret_type().to_string(),
            resources: vec![secret],
            headers: Headers::new(),
        }
    }

    /// Check the required fields and that every secret is of `secret_type`.
    ///
    /// # Errors
    ///
    /// Returns [`SecretsManagerError::InvalidArgument`] on an empty field or
    /// a secret of another type.
    pub fn validate(&self) -> SecretsManagerResult<()> {
        require(&[("secret_type", &self.secret_type)])?;
        require_resources(&self.resources)?;
        if let Some(other) = self
            .resources
            .iter()
            .find(|secret| secret.secret_type() != self.secret_type)
        {
            return Err(SecretsManagerError::invalid_argument(format!(
                "{} cannot be created as '{}'",
                other.variant_name(),
                self.secret_type
            )));
        }
        Ok(())
    }
}

/// Parameters of `ListSecrets`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListSecretsOptions {
    /// Secret type path segment
    pub secret_type: String,
    /// Page size
    pub limit: Option<i64>,
    /// Index of the first secret to return
    pub offset: Option<i64>,
    /// Extra request headers
    pub headers: Headers,
}

impl ListSecretsOptions {
    /// List secrets of `secret_type`.
    #[must_use]
    pub fn new(secret_type: impl Into<String>) -> Self {
        Self {
            secret_type: secret_type.into(),
            limit: None,
            offset: None,
            headers: Headers::new(),
        }
    }

    /// Set the page size.
    #[must_use]
    pub const fn with_limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Set the offset.
    #[must_use]
    pub const fn with_offset(mut self, offset: i64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Check the required fields.
    ///
    /// # Errors
    ///
    /// Returns [`SecretsManagerError::InvalidArgument`] if `secret_type` is
    /// empty.
    pub fn validate(&self) -> SecretsManagerResult<()> {
        require(&[("secret_type", &self.secret_type)])
    }
}

/// Parameters of `ListAllSecrets`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListAllSecretsOptions {
    /// Page size
    pub limit: Option<i64>,
    /// Index of the first secret to return
    pub offset: Option<i64>,
    /// Text to match against names and labels
    pub search: Option<String>,
    /// Sort field, one of the `sort_by` values
    pub sort_by: Option<String>,
    /// Group IDs to include; `default` selects the default group
    pub groups: Option<Vec<String>>,
    /// Extra request headers
    pub headers: Headers,
}

impl ListAllSecretsOptions {
    /// List every secret.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page size.
    #[must_use]
    pub const fn with_limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Set the offset.
    #[must_use]
    pub const fn with_offset(mut self, offset: i64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Filter by `search`.
    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Sort by `field`.
    #[must_use]
    pub fn with_sort_by(mut self, field: impl Into<String>) -> Self {
        self.sort_by = Some(field.into());
        self
    }

    /// Only return secrets in `groups`, in the order given.
    #[must_use]
    pub fn with_groups<I, S>(mut self, groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.groups = Some(groups.into_iter().map(Into::into).collect());
        self
    }
}

/// Parameters of `GetSecret`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetSecretOptions {
    /// Secret type path segment
    pub secret_type: String,
    /// Secret ID
    pub id: String,
    /// Extra request headers
    pub headers: Headers,
}

impl GetSecretOptions {
    /// Get secret `id` of `secret_type`.
    #[must_use]
    pub fn new(secret_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            secret_type: secret_type.into(),
            id: id.into(),
            headers: Headers::new(),
        }
    }

    /// Check the required fields.
    ///
    /// # Errors
    ///
    /// Returns [`SecretsManagerError::InvalidArgument`] on an empty field.
    pub fn validate(&self) -> SecretsManagerResult<()> {
        require(&[("secret_type", &self.secret_type), ("id", &self.id)])
    }
}

/// Parameters of `UpdateSecret`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateSecretOptions {
    /// Secret type path segment
    pub secret_type: String,
    /// Secret ID
    pub id: String,
    /// One of the `action` values
    pub action: String,
    /// Body of the action
    pub secret_action: SecretAction,
    /// Extra request headers
    pub headers: Headers,
}

impl UpdateSecretOptions {
    /// Perform `action` with `secret_action` on secret `id`.
    #[must_use]
    pub fn new(
        secret_type: impl Into<String>,
        id: impl Into<String>,
        action: impl Into<String>,
        secret_action: SecretAction,
    ) -> Self {
        Self {
            secret_type: secret_type.into(),
            id: id.into(),
            action: action.into(),
            secret_action,
            headers: Headers::new(),
        }
    }

    /// Check the required fields, and that the body fits the action when
    /// the action and secret type are a known pair.
    ///
    /// # Errors
    ///
    /// Returns [`SecretsManagerError::InvalidArgument`] on an empty field or
    /// a mismatched body.
    pub fn validate(&self) -> SecretsManagerResult<()> {
        require(&[
            ("secret_type", &self.secret_type),
            ("id", &self.id),
            ("action", &self.action),
        ])?;
        let key = action_discriminator(&self.action, &self.secret_type);
        if let Ok(expected) = resolve_variant(Family::SecretAction, &key) {
            let actual = self.secret_action.descriptor();
            if expected.name != actual.name {
                return Err(SecretsManagerError::invalid_argument(format!(
                    "'{}' on '{}' takes {}, got {}",
                    self.action, self.secret_type, expected.name, actual.name
                )));
            }
        }
        Ok(())
    }
}

/// Parameters of `DeleteSecret`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteSecretOptions {
    /// Secret type path segment
    pub secret_type: String,
    /// Secret ID
    pub id: String,
    /// Extra request headers
    pub headers: Headers,
}

impl DeleteSecretOptions {
    /// Delete secret `id` of `secret_type`.
    #[must_use]
    pub fn new(secret_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            secret_type: secret_type.into(),
            id: id.into(),
            headers: Headers::new(),
        }
    }

    /// Check the required fields.
    ///
    /// # Errors
    ///
    /// Returns [`SecretsManagerError::InvalidArgument`] on an empty field.
    pub fn validate(&self) -> SecretsManagerResult<()> {
        require(&[("secret_type", &self.secret_type), ("id", &self.id)])
    }
}

/// Parameters of `ListSecretVersions`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListSecretVersionsOptions {
    /// Secret type path segment
    pub secret_type: String,
    /// Secret ID
    pub id: String,
    /// Extra request headers
    pub headers: Headers,
}

impl ListSecretVersionsOptions {
    /// List the versions of secret `id`.
    #[must_use]
    pub fn new(secret_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            secret_type: secret_type.into(),
            id: id.into(),
            headers: Headers::new(),
        }
    }

    /// Check the required fields.
    ///
    /// # Errors
    ///
    /// Returns [`SecretsManagerError::InvalidArgument`] on an empty field.
    pub fn validate(&self) -> SecretsManagerResult<()> {
        require(&[("secret_type", &self.secret_type), ("id", &self.id)])
    }
}

/// Parameters of `GetSecretVersion`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetSecretVersionOptions {
    /// Secret type path segment
    pub secret_type: String,
    /// Secret ID
    pub id: String,
    /// Version ID, or [`VERSION_ID_PREVIOUS`]
    pub version_id: String,
    /// Extra request headers
    pub headers: Headers,
}

impl GetSecretVersionOptions {
    /// Get version `version_id` of secret `id`.
    #[must_use]
    pub fn new(
        secret_type: impl Into<String>,
        id: impl Into<String>,
        version_id: impl Into<String>,
    ) -> Self {
        Self {
            secret_type: secret_type.into(),
            id: id.into(),
            version_id: version_id.into(),
            headers: Headers::new(),
        }
    }

    /// Check the required fields.
    ///
    /// # Errors
    ///
    /// Returns [`SecretsManagerError::InvalidArgument`] on an empty field.
    pub fn validate(&self) -> SecretsManagerResult<()> {
        require(&[
            ("secret_type", &self.secret_type),
            ("id", &self.id),
            ("version_id", &self.version_id),
        ])
    }
}

/// Parameters of `GetSecretVersionMetadata`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetSecretVersionMetadataOptions {
    /// Secret type path segment
    pub secret_type: String,
    /// Secret ID
    pub id: String,
    /// Version ID, or [`VERSION_ID_PREVIOUS`]
    pub version_id: String,
    /// Extra request headers
    pub headers: Headers,
}

impl GetSecretVersionMetadataOptions {
    /// Get the metadata of version `version_id` of secret `id`.
    #[must_use]
    pub fn new(
        secret_type: impl Into<String>,
        id: impl Into<String>,
        version_id: impl Into<String>,
    ) -> Self {
        Self {
            secret_type: secret_type.into(),
            id: id.into(),
            version_id: version_id.into(),
            headers: Headers::new(),
        }
    }

    /// Check the required fields.
    ///
    /// # Errors
    ///
    /// Returns [`SecretsManagerError::InvalidArgument`] on an empty field.
    pub fn validate(&self) -> SecretsManagerResult<()> {
        require(&[
            ("secret_type", &self.secret_type),
            ("id", &self.id),
            ("version_id", &self.version_id),
        ])
    }
}

/// Parameters of `GetSecretMetadata`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetSecretMetadataOptions {
    /// Secret type path segment
    pub secret_type: String,
    /// Secret ID
    pub id: String,
    /// Extra request headers
    pub headers: Headers,
}

impl GetSecretMetadataOptions {
    /// Get the metadata of secret `id`.
    #[must_use]
    pub fn new(secret_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            secret_type: secret_type.into(),
            id: id.into(),
            headers: Headers::new(),
        }
    }

    /// Check the required fields.
    ///
    /// # Errors
    ///
    /// Returns [`SecretsManagerError::InvalidArgument`] on an empty field.
    pub fn validate(&self) -> SecretsManagerResult<()> {
        require(&[("secret_type", &self.secret_type), ("id", &self.id)])
    }
}

/// Parameters of `UpdateSecretMetadata`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateSecretMetadataOptions {
    /// Secret type path segment
    pub secret_type: String,
    /// Secret ID
    pub id: String,
    /// New metadata
    pub resources: Vec<SecretMetadata>,
    /// Extra request headers
    pub headers: Headers,
}

impl UpdateSecretMetadataOptions {
    /// Replace the metadata of secret `id` with `metadata`.
    #[must_use]
    pub fn new(id: impl Into<String>, metadata: impl Into<SecretMetadata>) -> Self {
        let metadata = metadata.into();
        Self {
            secret_type: metadata.secret_type().to_string(),
            id: id.into(),
            resources: vec![metadata],
            headers: Headers::new(),
        }
    }

    /// Check the required fields.
    ///
    /// # Errors
    ///
    /// Returns [`SecretsManagerError::InvalidArgument`] on an empty field.
    pub fn validate(&self) -> SecretsManagerResult<()> {
        require(&[("secret_type", &self.secret_type), ("id", &self.id)])?;
        require_resources(&self.resources)
    }
}

/// Parameters of `PutPolicy`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PutPolicyOptions {
    /// Secret type path segment
    pub secret_type: String,
    /// Secret ID
    pub id: String,
    /// Policies to set
    pub resources: Vec<SecretPolicyRotation>,
    /// One of the `policy` values; `rotation` when unset
    pub policy: Option<String>,
    /// Extra request headers
    pub headers: Headers,
}

impl PutPolicyOptions {
    /// Set `rotation` on secret `id`.
    #[must_use]
    pub fn new(
        secret_type: impl Into<String>,
        id: impl Into<String>,
        rotation: SecretPolicyRotation,
    ) -> Self {
        Self {
            secret_type: secret_type.into(),
            id: id.into(),
            resources: vec![rotation],
            policy: None,
            headers: Headers::new(),
        }
    }

    /// Set the `policy` query value.
    #[must_use]
    pub fn with_policy(mut self, policy: impl Into<String>) -> Self {
        self.policy = Some(policy.into());
        self
    }

    /// Check the required fields.
    ///
    /// # Errors
    ///
    /// Returns [`SecretsManagerError::InvalidArgument`] on an empty field.
    pub fn validate(&self) -> SecretsManagerResult<()> {
        require(&[("secret_type", &self.secret_type), ("id", &self.id)])?;
        require_resources(&self.resources)
    }
}

/// Parameters of `GetPolicy`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetPolicyOptions {
    /// Secret type path segment
    pub secret_type: String,
    /// Secret ID
    pub id: String,
    /// One of the `policy` values; `rotation` when unset
    pub policy: Option<String>,
    /// Extra request headers
    pub headers: Headers,
}

impl GetPolicyOptions {
    /// Get the policies of secret `id`.
    #[must_use]
    pub fn new(secret_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            secret_type: secret_type.into(),
            id: id.into(),
            policy: None,
            headers: Headers::new(),
        }
    }

    /// Set the `policy` query value.
    #[must_use]
    pub fn with_policy(mut self, policy: impl Into<String>) -> Self {
        self.policy = Some(policy.into());
        self
    }

    /// Check the required fields.
    ///
    /// # Errors
    ///
    /// Returns [`SecretsManagerError::InvalidArgument`] on an empty field.
    pub fn validate(&self) -> SecretsManagerResult<()> {
        require(&[("secret_type", &self.secret_type), ("id", &self.id)])
    }
}

/// Parameters of `PutConfig`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PutConfigOptions {
    /// Secret type path segment
    pub secret_type: String,
    /// Engine configuration to write
    pub engine_config: EngineConfig,
    /// Extra request headers
    pub headers: Headers,
}

impl PutConfigOptions {
    /// Write `engine_config` for `secret_type`.
    #[must_use]
    pub fn new(secret_type: impl Into<String>, engine_config: EngineConfig) -> Self {
        Self {
            secret_type: secret_type.into(),
            engine_config,
            headers: Headers::new(),
        }
    }

    /// Check the required fields, and that the configuration fits the type
    /// when the type has a known engine.
    ///
    /// # Errors
    ///
    /// Returns [`SecretsManagerError::InvalidArgument`] on an empty field or
    /// a configuration for another engine.
    pub fn validate(&self) -> SecretsManagerResult<()> {
        require(&[("secret_type", &self.secret_type)])?;
        let Ok(expected) = resolve_variant(Family::EngineConfig, &self.secret_type) else {
            return Ok(());
        };
        if expected.name != self.engine_config.descriptor().name {
            return Err(SecretsManagerError::invalid_argument(format!(
                "'{}' takes {}",
                self.secret_type, expected.name
            )));
        }
        Ok(())
    }
}

/// Parameters of `GetConfig`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetConfigOptions {
    /// Secret type path segment
    pub secret_type: String,
    /// Extra request headers
    pub headers: Headers,
}

impl GetConfigOptions {
    /// Get the engine configuration of `secret_type`.
    #[must_use]
    pub fn new(secret_type: impl Into<String>) -> Self {
        Self {
            secret_type: secret_type.into(),
            headers: Headers::new(),
        }
    }

    /// Check the required fields.
    ///
    /// # Errors
    ///
    /// Returns [`SecretsManagerError::InvalidArgument`] on an empty field.
    pub fn validate(&self) -> SecretsManagerResult<()> {
        require(&[("secret_type", &self.secret_type)])
    }
}

/// Parameters of `CreateConfigElement`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateConfigElementOptions {
    /// Secret type path segment
    pub secret_type: String,
    /// One of the `config_element` values
    pub config_element: String,
    /// The element to create
    pub element: ConfigElementDef,
    /// Extra request headers
    pub headers: Headers,
}

impl CreateConfigElementOptions {
    /// Create `element` under `config_element` of `secret_type`.
    #[must_use]
    pub fn new(
        secret_type: impl Into<String>,
        config_element: impl Into<String>,
        element: ConfigElementDef,
    ) -> Self {
        Self {
            secret_type: secret_type.into(),
            config_element: config_element.into(),
            element,
            headers: Headers::new(),
        }
    }

    /// Check the required fields.
    ///
    /// # Errors
    ///
    /// Returns [`SecretsManagerError::InvalidArgument`] on an empty field.
    pub fn validate(&self) -> SecretsManagerResult<()> {
        require(&[
            ("secret_type", &self.secret_type),
            ("config_element", &self.config_element),
            ("name", self.element.name()),
        ])
    }
}

/// Parameters of `GetConfigElements`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetConfigElementsOptions {
    /// Secret type path segment
    pub secret_type: String,
    /// One of the `config_element` values
    pub config_element: String,
    /// Extra request headers
    pub headers: Headers,
}

impl GetConfigElementsOptions {
    /// List the elements of `config_element`.
    #[must_use]
    pub fn new(secret_type: impl Into<String>, config_element: impl Into<String>) -> Self {
        Self {
            secret_type: secret_type.into(),
            config_element: config_element.into(),
            headers: Headers::new(),
        }
    }

    /// Check the required fields.
    ///
    /// # Errors
    ///
    /// Returns [`SecretsManagerError::InvalidArgument`] on an empty field.
    pub fn validate(&self) -> SecretsManagerResult<()> {
        require(&[
            ("secret_type", &self.secret_type),
            ("config_element", &self.config_element),
        ])
    }
}

/// Parameters of `GetConfigElement`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetConfigElementOptions {
    /// Secret type path segment
    pub secret_type: String,
    /// One of the `config_element` values
    pub config_element: String,
    /// Element name
    pub config_name: String,
    /// Extra request headers
    pub headers: Headers,
}

impl GetConfigElementOptions {
    /// Get element `config_name`.
    #[must_use]
    pub fn new(
        secret_type: impl Into<String>,
        config_element: impl Into<String>,
        config_name: impl Into<String>,
    ) -> Self {
        Self {
            secret_type: secret_type.into(),
            config_element: config_element.into(),
            config_name: config_name.into(),
            headers: Headers::new(),
        }
    }

    /// Check the required fields.
    ///
    /// # Errors
    ///
    /// Returns [`SecretsManagerError::InvalidArgument`] on an empty field.
    pub fn validate(&self) -> SecretsManagerResult<()> {
        require(&[
            ("secret_type", &self.secret_type),
            ("config_element", &self.config_element),
            ("config_name", &self.config_name),
        ])
    }
}

/// Parameters of `UpdateConfigElement`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateConfigElementOptions {
    /// Secret type path segment
    pub secret_type: String,
    /// One of the `config_element` values
    pub config_element: String,
    /// Element name
    pub config_name: String,
    /// New type and settings
    pub update: ConfigElementUpdate,
    /// Extra request headers
    pub headers: Headers,
}

impl UpdateConfigElementOptions {
    /// Replace the settings of element `config_name`.
    #[must_use]
    pub fn new(
        secret_type: impl Into<String>,
        config_element: impl Into<String>,
        config_name: impl Into<String>,
        update: ConfigElementUpdate,
    ) -> Self {
        Self {
            secret_type: secret_type.into(),
            config_element: config_element.into(),
            config_name: config_name.into(),
            update,
            headers: Headers::new(),
        }
    }

    /// Check the required fields.
    ///
    /// # Errors
    ///
    /// Returns [`SecretsManagerError::InvalidArgument`] on an empty field.
    pub fn validate(&self) -> SecretsManagerResult<()> {
        require(&[
            ("secret_type", &self.secret_type),
            ("config_element", &self.config_element),
            ("config_name", &self.config_name),
        ])
    }
}

/// Parameters of `DeleteConfigElement`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteConfigElementOptions {
    /// Secret type path segment
    pub secret_type: String,
    /// One of the `config_element` values
    pub config_element: String,
    /// Element name
    pub config_name: String,
    /// Extra request headers
    pub headers: Headers,
}

impl DeleteConfigElementOptions {
    /// Delete element `config_name`.
    #[must_use]
    pub fn new(
        secret_type: impl Into<String>,
        config_element: impl Into<String>,
        config_name: impl Into<String>,
    ) -> Self {
        Self {
            secret_type: secret_type.into(),
            config_element: config_element.into(),
            config_name: config_name.into(),
            headers: Headers::new(),
        }
    }

    /// Check the required fields.
    ///
    /// # Errors
    ///
    /// Returns [`SecretsManagerError::InvalidArgument`] on an empty field.
    pub fn validate(&self) -> SecretsManagerResult<()> {
        require(&[
            ("secret_type", &self.secret_type),
            ("config_element", &self.config_element),
            ("config_name", &self.config_name),
        ])
    }
}

with_headers!(
    CreateSecretGroupOptions,
    ListSecretGroupsOptions,
    GetSecretGroupOptions,
    UpdateSecretGroupMetadataOptions,
    DeleteSecretGroupOptions,
    CreateSecretOptions,
    ListSecretsOptions,
    ListAllSecretsOptions,
    GetSecretOptions,
    UpdateSecretOptions,
    DeleteSecretOptions,
    ListSecretVersionsOptions,
    GetSecretVersionOptions,
    GetSecretVersionMetadataOptions,
    GetSecretMetadataOptions,
    UpdateSecretMetadataOptions,
    PutPolicyOptions,
    GetPolicyOptions,
    PutConfigOptions,
    GetConfigOptions,
    CreateConfigElementOptions,
    GetConfigElementsOptions,
    GetConfigElementOptions,
    UpdateConfigElementOptions,
    DeleteConfigElementOptions,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        ArbitrarySecretResource, CloudInternetServicesConfig, ConfigElementDefConfig,
        KvSecretResource,
    };
    use serde_json::Map;

    #[test]
    fn test_empty_path_fields_rejected() {
        let err = GetSecretOptions::new(secret_type::ARBITRARY, "").validate().unwrap_err();
        assert_eq!(err.to_string(), "Invalid argument: id must not be empty");
        assert!(DeleteConfigElementOptions::new("public_cert", "dns_providers", "")
            .validate()
            .is_err());
    }

    #[test]
    fn test_create_secret_type_follows_resource() {
        let options = CreateSecretOptions::new(ArbitrarySecretResource::new("n", "p"));
        assert_eq!(options.secret_type, secret_type::ARBITRARY);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_create_secret_rejects_foreign_type() {
        let mut options = CreateSecretOptions::new(ArbitrarySecretResource::new("n", "p"));
        options.resources.push(KvSecretResource::new("kv", Map::new()).into());
        assert!(matches!(
            options.validate(),
            Err(SecretsManagerError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_update_secret_body_must_fit_action() {
        let ok = UpdateSecretOptions::new(
            secret_type::PUBLIC_CERT,
            "id",
            action::ROTATE,
            SecretAction::rotate_public_cert(true),
        );
        assert!(ok.validate().is_ok());

        let wrong = UpdateSecretOptions::new(
            secret_type::PUBLIC_CERT,
            "id",
            action::ROTATE,
            SecretAction::rotate_arbitrary("x"),
        );
        assert!(wrong.validate().is_err());

        let unknown_pair = UpdateSecretOptions::new(
            secret_type::KV,
            "id",
            action::RESTORE,
            SecretAction::restore_iam_credentials("v"),
        );
        assert!(unknown_pair.validate().is_ok());
    }

    #[test]
    fn test_put_config_forwards_any_type() {
        let options =
            PutConfigOptions::new(secret_type::PUBLIC_CERT, EngineConfig::iam_credentials("k"));
        assert!(options.validate().is_ok());
        let options = PutConfigOptions::new(secret_type::KV, EngineConfig::iam_credentials("k"));
        assert!(options.validate().is_ok());
        let options =
            PutConfigOptions::new(secret_type::IAM_CREDENTIALS, EngineConfig::iam_credentials("k"));
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_with_headers() {
        let options = ListAllSecretsOptions::new()
            .with_groups(["g1", "g2", "default"])
            .with_header("X-Correlation-Id", "abc");
        assert_eq!(options.headers.get("X-Correlation-Id").map(String::as_str), Some("abc"));
        assert_eq!(options.groups.as_deref().map(<[String]>::len), Some(3));
    }

    #[test]
    fn test_config_element_name_required() {
        let element = ConfigElementDef::new(
            "",
            config_type::CIS,
            ConfigElementDefConfig::CloudInternetServices(CloudInternetServicesConfig {
                cis_crn: "crn".into(),
                cis_apikey: None,
            }),
        )
        .unwrap();
        let options = CreateConfigElementOptions::new(
            secret_type::PUBLIC_CERT,
            config_element::DNS_PROVIDERS,
            element,
        );
        assert!(options.validate().is_err());
    }
}
