//! Secret metadata: a secret without its payload.

use super::common::{CertificateValidity, IssuanceInfo, Rotation, Ttl};
use super::secret::{SecretCommon, common_setters, named};
use crate::codec::family_resource;
use crate::registry::discriminator_of;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metadata of an arbitrary secret.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArbitrarySecretMetadata {
    /// Fields shared by every secret
    #[serde(flatten)]
    pub common: SecretCommon,
    /// When the secret expires
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<DateTime<Utc>>,
}

/// Metadata of a username/password secret.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsernamePasswordSecretMetadata {
    /// Fields shared by every secret
    #[serde(flatten)]
    pub common: SecretCommon,
    /// When the secret expires
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<DateTime<Utc>>,
    /// Next scheduled rotation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_rotation_date: Option<DateTime<Utc>>,
}

/// Metadata of an IAM credentials secret.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IamCredentialsSecretMetadata {
    /// Fields shared by every secret
    #[serde(flatten)]
    pub common: SecretCommon,
    /// How long generated credentials live
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<Ttl>,
    /// Hand out the same key until the TTL expires
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reuse_api_key: Option<bool>,
}

/// Metadata of an imported certificate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateSecretMetadata {
    /// Fields shared by every secret
    #[serde(flatten)]
    pub common: SecretCommon,
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
}

/// Metadata of a public certificate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicCertSecretMetadata {
    /// Fields shared by every secret
    #[serde(flatten)]
    pub common: SecretCommon,
    /// Issuer distinguished name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issuer: Option<String>,
    /// Bundle intermediates with the certificate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bundle_certs: Option<bool>,
    /// Certificate authority configuration
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ca: Option<String>,
    /// DNS provider configuration
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dns: Option<String>,
    /// Signature algorithm
    #[serde(skip_serializing_if = "Option::is_none")]
    pub algorithm: Option<String>,
    /// Key algorithm
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_algorithm: Option<String>,
    /// Subject alternative names
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt_names: Option<Vec<String>>,
    /// Subject common name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub common_name: Option<String>,
    /// Automatic rotation settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<Rotation>,
    /// Order progress
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issuance_info: Option<IssuanceInfo>,
    /// Validity window
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validity: Option<CertificateValidity>,
    /// Certificate expiry
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<DateTime<Utc>>,
}

/// Metadata of a key-value secret.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KvSecretMetadata {
    /// Fields shared by every secret
    #[serde(flatten)]
    pub common: SecretCommon,
}

macro_rules! named_metadata {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $ty {
                /// Metadata naming the secret `name`.
                #[must_use]
                pub fn new(name: impl Into<String>) -> Self {
                    Self {
                        common: named(name),
                        ..Self::default()
                    }
                }
            }
        )+
    };
}

named_metadata!(
    ArbitrarySecretMetadata,
    UsernamePasswordSecretMetadata,
    IamCredentialsSecretMetadata,
    CertificateSecretMetadata,
    PublicCertSecretMetadata,
    KvSecretMetadata,
);

common_setters!(
    ArbitrarySecretMetadata,
    UsernamePasswordSecretMetadata,
    IamCredentialsSecretMetadata,
    CertificateSecretMetadata,
    PublicCertSecretMetadata,
    KvSecretMetadata,
);

impl ArbitrarySecretMetadata {
    /// Set the expiration date.
    #[must_use]
    pub const fn with_expiration_date(mut self, date: DateTime<Utc>) -> Self {
        self.expiration_date = Some(date);
        self
    }
}

impl UsernamePasswordSecretMetadata {
    /// Set the expiration date.
    #[must_use]
    pub const fn with_expiration_date(mut self, date: DateTime<Utc>) -> Self {
        self.expiration_date = Some(date);
        self
    }
}

impl IamCredentialsSecretMetadata {
    /// Set the TTL.
    #[must_use]
    pub fn with_ttl(mut self, ttl: impl Into<Ttl>) -> Self {
        self.ttl = Some(ttl.into());
        self
    }
}

/// Secret metadata of any type, tagged by `secret_type` on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecretMetadata {
    /// `arbitrary`
    Arbitrary(ArbitrarySecretMetadata),
    /// `username_password`
    UsernamePassword(UsernamePasswordSecretMetadata),
    /// `iam_credentials`
    IamCredentials(IamCredentialsSecretMetadata),
    /// `imported_cert`
    ImportedCert(CertificateSecretMetadata),
    /// `public_cert`
    PublicCert(PublicCertSecretMetadata),
    /// `kv`
    Kv(KvSecretMetadata),
}

family_resource!(SecretMetadata, SecretMetadata, {
    Arbitrary => ARBITRARY_SECRET_METADATA,
    UsernamePassword => USERNAME_PASSWORD_SECRET_METADATA,
    IamCredentials => IAM_CREDENTIALS_SECRET_METADATA,
    ImportedCert => CERTIFICATE_SECRET_METADATA,
    PublicCert => PUBLIC_CERT_SECRET_METADATA,
    Kv => KV_SECRET_METADATA,
});

impl SecretMetadata {
    /// Fields shared by all secret types.
    #[must_use]
    pub const fn common(&self) -> &SecretCommon {
        match self {
            Self::Arbitrary(m) => &m.common,
            Self::UsernamePassword(m) => &m.common,
            Self::IamCredentials(m) => &m.common,
            Self::ImportedCert(m) => &m.common,
            Self::PublicCert(m) => &m.common,
            Self::Kv(m) => &m.common,
        }
    }

    /// The secret's `secret_type`.
    #[must_use]
    pub fn secret_type(&self) -> &'static str {
        discriminator_of(self)
    }
}

impl From<ArbitrarySecretMetadata> for SecretMetadata {
    fn from(metadata: ArbitrarySecretMetadata) -> Self {
        Self::Arbitrary(metadata)
    }
}

impl From<UsernamePasswordSecretMetadata> for SecretMetadata {
    fn from(metadata: UsernamePasswordSecretMetadata) -> Self {
        Self::UsernamePassword(metadata)
    }
}

impl From<IamCredentialsSecretMetadata> for SecretMetadata {
    fn from(metadata: IamCredentialsSecretMetadata) -> Self {
        Self::IamCredentials(metadata)
    }
}

impl From<CertificateSecretMetadata> for SecretMetadata {
    fn from(metadata: CertificateSecretMetadata) -> Self {
        Self::ImportedCert(metadata)
    }
}

impl From<PublicCertSecretMetadata> for SecretMetadata {
    fn from(metadata: PublicCertSecretMetadata) -> Self {
        Self::PublicCert(metadata)
    }
}

impl From<KvSecretMetadata> for SecretMetadata {
    fn from(metadata: KvSecretMetadata) -> Self {
        Self::Kv(metadata)
    }
}
