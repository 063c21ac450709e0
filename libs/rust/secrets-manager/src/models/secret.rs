//! Secrets, one variant per `secret_type`.

use super::common::{CertificateValidity, IssuanceInfo, Rotation, SecretState, Ttl};
use crate::codec::family_resource;
use crate::registry::{Discriminated, discriminator_of};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Fields every secret carries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretCommon {
    /// Secret ID (UUID)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Human-readable name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Extended description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Group the secret belongs to; the default group when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_group_id: Option<String>,
    /// Labels for searching
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
    /// Lifecycle state
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<SecretState>,
    /// Lifecycle state, human readable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_description: Option<String>,
    /// Cloud resource name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crn: Option<String>,
    /// Creation time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creation_date: Option<DateTime<Utc>>,
    /// Creator
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    /// Last modification time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_update_date: Option<DateTime<Utc>>,
    /// Number of versions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub versions_total: Option<i64>,
    /// Summaries of the versions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub versions: Option<Vec<Map<String, Value>>>,
}

macro_rules! common_setters {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $ty {
                /// Set the description.
                #[must_use]
                pub fn with_description(mut self, description: impl Into<String>) -> Self {
                    self.common.description = Some(description.into());
                    self
                }

                /// Put the secret in group `group_id`.
                #[must_use]
                pub fn with_secret_group_id(mut self, group_id: impl Into<String>) -> Self {
                    self.common.secret_group_id = Some(group_id.into());
                    self
                }

                /// Set the labels.
                #[must_use]
                pub fn with_labels<I, S>(mut self, labels: I) -> Self
                where
                    I: IntoIterator<Item = S>,
                    S: Into<String>,
                {
                    self.common.labels = Some(labels.into_iter().map(Into::into).collect());
                    self
                }
            }
        )+
    };
}

pub(crate) use common_setters;

pub(crate) fn named(name: impl Into<String>) -> SecretCommon {
    SecretCommon {
        name: Some(name.into()),
        ..SecretCommon::default()
    }
}

/// A secret whose payload is opaque to the service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArbitrarySecretResource {
    /// Fields shared by every secret
    #[serde(flatten)]
    pub common: SecretCommon,
    /// When the secret expires
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<DateTime<Utc>>,
    /// Payload to store; write only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<String>,
    /// Stored payload, as returned by the service
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_data: Option<Map<String, Value>>,
}

impl ArbitrarySecretResource {
    /// An arbitrary secret named `name` holding `payload`.
    #[must_use]
    pub fn new(name: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            common: named(name),
            payload: Some(payload.into()),
            ..Self::default()
        }
    }

    /// Set the expiration date.
    #[must_use]
    pub const fn with_expiration_date(mut self, date: DateTime<Utc>) -> Self {
        self.expiration_date = Some(date);
        self
    }
}

/// A username and password pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsernamePasswordSecretResource {
    /// Fields shared by every secret
    #[serde(flatten)]
    pub common: SecretCommon,
    /// Username
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Password; generated by the service when omitted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// When the secret expires
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<DateTime<Utc>>,
    /// Next scheduled rotation, set by a rotation policy
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_rotation_date: Option<DateTime<Utc>>,
    /// Stored credentials, as returned by the service
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_data: Option<Map<String, Value>>,
}

impl UsernamePasswordSecretResource {
    /// Credentials for `username` stored under `name`.
    #[must_use]
    pub fn new(name: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            common: named(name),
            username: Some(username.into()),
            ..Self::default()
        }
    }

    /// Set the password.
    #[must_use]
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Set the expiration date.
    #[must_use]
    pub const fn with_expiration_date(mut self, date: DateTime<Utc>) -> Self {
        self.expiration_date = Some(date);
        self
    }
}

/// Service ID and API key generated on demand.
///
/// `service_id` and `access_groups` are mutually exclusive; the service
/// rejects requests that set both.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IamCredentialsSecretResource {
    /// Fields shared by every secret
    #[serde(flatten)]
    pub common: SecretCommon,
    /// How long generated credentials live
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<Ttl>,
    /// Access groups the generated service ID joins
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_groups: Option<Vec<String>>,
    /// Generated API key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// ID of the generated API key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key_id: Option<String>,
    /// Service ID the key belongs to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_id: Option<String>,
    /// Whether `service_id` was supplied by the caller
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_id_is_static: Option<bool>,
    /// Hand out the same key until the TTL expires
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reuse_api_key: Option<bool>,
    /// Generated credentials, as returned by the service
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_data: Option<Map<String, Value>>,
}

impl IamCredentialsSecretResource {
    /// IAM credentials named `name` living for `ttl`.
    #[must_use]
    pub fn new(name: impl Into<String>, ttl: impl Into<Ttl>) -> Self {
        Self {
            common: named(name),
            ttl: Some(ttl.into()),
            ..Self::default()
        }
    }

    /// Generate a service ID that joins `groups`.
    #[must_use]
    pub fn with_access_groups<I, S>(mut self, groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.access_groups = Some(groups.into_iter().map(Into::into).collect());
        self
    }

    /// Use an existing service ID.
    #[must_use]
    pub fn with_service_id(mut self, service_id: impl Into<String>) -> Self {
        self.service_id = Some(service_id.into());
        self
    }

    /// Reuse the API key across reads.
    #[must_use]
    pub const fn with_reuse_api_key(mut self, reuse: bool) -> Self {
        self.reuse_api_key = Some(reuse);
        self
    }
}

/// An imported X.509 certificate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateSecretResource {
    /// Fields shared by every secret
    #[serde(flatten)]
    pub common: SecretCommon,
    /// PEM certificate; write only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificate: Option<String>,
    /// PEM private key; write only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private_key: Option<String>,
    /// PEM intermediate certificate; write only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intermediate: Option<String>,
    /// Certificate serial number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,
    /// Signature algorithm
    #[serde(skip_serializing_if = "Option::is_none")]
    pub algorithm: Option<String>,
    /// Key algorithm
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_algorithm: Option<String>,
    /// Issuer distinguished name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issuer: Option<String>,
    /// Validity window
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validity: Option<CertificateValidity>,
    /// Subject common name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub common_name: Option<String>,
    /// An intermediate was imported
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intermediate_included: Option<bool>,
    /// A private key was imported
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private_key_included: Option<bool>,
    /// Subject alternative names
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt_names: Option<Vec<String>>,
    /// Certificate expiry
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<DateTime<Utc>>,
    /// Certificate material, as returned by the service
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_data: Option<Map<String, Value>>,
}

impl CertificateSecretResource {
    /// Import `certificate` under `name`.
    #[must_use]
    pub fn new(name: impl Into<String>, certificate: impl Into<String>) -> Self {
        Self {
            common: named(name),
            certificate: Some(certificate.into()),
            ..Self::default()
        }
    }

    /// Import the private key too.
    #[must_use]
    pub fn with_private_key(mut self, key: impl Into<String>) -> Self {
        self.private_key = Some(key.into());
        self
    }

    /// Import the intermediate too.
    #[must_use]
    pub fn with_intermediate(mut self, intermediate: impl Into<String>) -> Self {
        self.intermediate = Some(intermediate.into());
        self
    }
}

/// A certificate ordered from a certificate authority.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicCertificateSecretResource {
    /// Fields shared by every secret
    #[serde(flatten)]
    pub common: SecretCommon,
    /// Issuer distinguished name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issuer: Option<String>,
    /// Bundle intermediates with the certificate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bundle_certs: Option<bool>,
    /// Certificate authority configuration to order from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ca: Option<String>,
    /// DNS provider configuration for the challenge
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dns: Option<String>,
    /// Signature algorithm
    #[serde(skip_serializing_if = "Option::is_none")]
    pub algorithm: Option<String>,
    /// Key algorithm, one of the `key_algorithm` values
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_algorithm: Option<String>,
    /// Subject alternative names
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt_names: Option<Vec<String>>,
    /// Subject common name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub common_name: Option<String>,
    /// The certificate has a private key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private_key_included: Option<bool>,
    /// The certificate has an intermediate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intermediate_included: Option<bool>,
    /// Automatic rotation settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<Rotation>,
    /// Order progress
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issuance_info: Option<IssuanceInfo>,
    /// Validity window
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validity: Option<CertificateValidity>,
    /// Certificate serial number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,
    /// Certificate expiry
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<DateTime<Utc>>,
    /// Certificate material, as returned by the service
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_data: Option<Map<String, Value>>,
}

impl PublicCertificateSecretResource {
    /// Order a certificate for `common_name`, stored under `name`.
    #[must_use]
    pub fn new(name: impl Into<String>, common_name: impl Into<String>) -> Self {
        Self {
            common: named(name),
            common_name: Some(common_name.into()),
            ..Self::default()
        }
    }

    /// Order from certificate authority configuration `ca`, validated
    /// through DNS provider configuration `dns`.
    #[must_use]
    pub fn with_issuer_configs(mut self, ca: impl Into<String>, dns: impl Into<String>) -> Self {
        self.ca = Some(ca.into());
        self.dns = Some(dns.into());
        self
    }

    /// Set the key algorithm.
    #[must_use]
    pub fn with_key_algorithm(mut self, algorithm: impl Into<String>) -> Self {
        self.key_algorithm = Some(algorithm.into());
        self
    }

    /// Set the rotation settings.
    #[must_use]
    pub const fn with_rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = Some(rotation);
        self
    }
}

/// A key-value secret.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KvSecretResource {
    /// Fields shared by every secret
    #[serde(flatten)]
    pub common: SecretCommon,
    /// Map to store; write only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<Map<String, Value>>,
    /// Stored map, as returned by the service
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_data: Option<Map<String, Value>>,
}

impl KvSecretResource {
    /// A key-value secret named `name` holding `payload`.
    #[must_use]
    pub fn new(name: impl Into<String>, payload: Map<String, Value>) -> Self {
        Self {
            common: named(name),
            payload: Some(payload),
            ..Self::default()
        }
    }
}

common_setters!(
    ArbitrarySecretResource,
    UsernamePasswordSecretResource,
    IamCredentialsSecretResource,
    CertificateSecretResource,
    PublicCertificateSecretResource,
    KvSecretResource,
);

/// A secret of any type, tagged by `secret_type` on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecretResource {
    /// `arbitrary`
    Arbitrary(ArbitrarySecretResource),
    /// `username_password`
    UsernamePassword(UsernamePasswordSecretResource),
    /// `iam_credentials`
    IamCredentials(IamCredentialsSecretResource),
    /// `imported_cert`
    ImportedCert(CertificateSecretResource),
    /// `public_cert`
    PublicCert(PublicCertificateSecretResource),
    /// `kv`
    Kv(KvSecretResource),
}

family_resource!(SecretResource, Secret, {
    Arbitrary => ARBITRARY_SECRET_RESOURCE,
    UsernamePassword => USERNAME_PASSWORD_SECRET_RESOURCE,
    IamCredentials => IAM_CREDENTIALS_SECRET_RESOURCE,
    ImportedCert => CERTIFICATE_SECRET_RESOURCE,
    PublicCert => PUBLIC_CERTIFICATE_SECRET_RESOURCE,
    Kv => KV_SECRET_RESOURCE,
});

impl SecretResource {
    /// Fields shared by all secret types.
    #[must_use]
    pub const fn common(&self) -> &SecretCommon {
        match self {
            Self::Arbitrary(s) => &s.common,
            Self::UsernamePassword(s) => &s.common,
            Self::IamCredentials(s) => &s.common,
            Self::ImportedCert(s) => &s.common,
            Self::PublicCert(s) => &s.common,
            Self::Kv(s) => &s.common,
        }
    }

    /// The secret's `secret_type`.
    #[must_use]
    pub fn secret_type(&self) -> &'static str {
        discriminator_of(self)
    }

    /// Secret ID, once assigned by the service.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.common().id.as_deref()
    }

    /// Stored secret material, when the service returned it.
    #[must_use]
    pub const fn secret_data(&self) -> Option<&Map<String, Value>> {
        match self {
            Self::Arbitrary(s) => s.secret_data.as_ref(),
            Self::UsernamePassword(s) => s.secret_data.as_ref(),
            Self::IamCredentials(s) => s.secret_data.as_ref(),
            Self::ImportedCert(s) => s.secret_data.as_ref(),
            Self::PublicCert(s) => s.secret_data.as_ref(),
            Self::Kv(s) => s.secret_data.as_ref(),
        }
    }

    /// Variant name, for messages.
    #[must_use]
    pub fn variant_name(&self) -> &'static str {
        self.descriptor().name
    }
}

impl From<ArbitrarySecretResource> for SecretResource {
    fn from(secret: ArbitrarySecretResource) -> Self {
        Self::Arbitrary(secret)
    }
}

impl From<UsernamePasswordSecretResource> for SecretResource {
    fn from(secret: UsernamePasswordSecretResource) -> Self {
        Self::UsernamePassword(secret)
    }
}

impl From<IamCredentialsSecretResource> for SecretResource {
    fn from(secret: IamCredentialsSecretResource) -> Self {
        Self::IamCredentials(secret)
    }
}

impl From<CertificateSecretResource> for SecretResource {
    fn from(secret: CertificateSecretResource) -> Self {
        Self::ImportedCert(secret)
    }
}

impl From<PublicCertificateSecretResource> for SecretResource {
    fn from(secret: PublicCertificateSecretResource) -> Self {
        Self::PublicCert(secret)
    }
}

impl From<KvSecretResource> for SecretResource {
    fn from(secret: KvSecretResource) -> Self {
        Self::Kv(secret)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{JsonPath, JsonResource};
    use crate::error::SecretsManagerError;
    use crate::registry::secret_type;
    use serde_json::json;

    #[test]
    fn test_encode_embeds_secret_type() {
        let secret: SecretResource = ArbitrarySecretResource::new("s1", "secret-data")
            .with_labels(["label1", "label2"])
            .into();
        assert_eq!(
            secret.to_json().unwrap(),
            json!({
                "name": "s1",
                "labels": ["label1", "label2"],
                "payload": "secret-data",
                "secret_type": "arbitrary"
            })
        );
    }

    #[test]
    fn test_decode_selects_variant() {
        let value = json!({
            "id": "7f4b5c36-4b1c-4b7e-9d1a-2b8c1d4e5f60",
            "name": "db",
            "secret_type": "username_password",
            "state": 1,
            "creation_date": "2024-03-01T10:00:00.123Z",
            "secret_data": {"username": "test_user", "password": "test_password"}
        });
        let secret = SecretResource::from_json(value, None, &JsonPath::root()).unwrap();
        assert_eq!(secret.secret_type(), secret_type::USERNAME_PASSWORD);
        assert_eq!(secret.common().state, Some(SecretState::ACTIVE));
        assert_eq!(secret.secret_data().unwrap()["username"], json!("test_user"));
    }

    #[test]
    fn test_encode_rejects_bypassed_required_field() {
        let secret = SecretResource::UsernamePassword(UsernamePasswordSecretResource {
            common: named("db"),
            ..UsernamePasswordSecretResource::default()
        });
        match secret.to_json() {
            Err(SecretsManagerError::InvalidArgument(message)) => {
                assert!(message.contains("'username'"), "{message}");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_decode_accepts_username_only_in_secret_data() {
        let value = json!({
            "name": "db",
            "secret_type": "username_password",
            "secret_data": {"username": "u", "password": "p"}
        });
        let secret = SecretResource::from_json(value, None, &JsonPath::root()).unwrap();
        let SecretResource::UsernamePassword(secret) = secret else {
            panic!("wrong variant");
        };
        assert!(secret.username.is_none());
    }

    #[test]
    fn test_decode_rejects_bad_state() {
        let value = json!({"name": "n", "secret_type": "kv", "state": 4});
        let err = SecretResource::from_json(value, None, &JsonPath::root()).unwrap_err();
        match err {
            SecretsManagerError::SchemaMismatch { path, message, .. } => {
                assert_eq!(path, "/state");
                assert!(message.contains('4'), "{message}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_decode_ignores_unknown_fields() {
        let value = json!({"name": "n", "secret_type": "kv", "future_field": true});
        let secret = SecretResource::from_json(value, None, &JsonPath::root()).unwrap();
        let encoded = secret.to_json().unwrap();
        assert!(encoded.get("future_field").is_none());
    }

    #[test]
    fn test_ttl_forms_survive() {
        for ttl in [json!(86400), json!("24h")] {
            let value = json!({"name": "n", "secret_type": "iam_credentials", "ttl": ttl});
            let secret = SecretResource::from_json(value, None, &JsonPath::root()).unwrap();
            assert_eq!(secret.to_json().unwrap()["ttl"], ttl);
        }
    }
}
