//! Secret versions.
//!
//! Version bodies never carry `secret_type`; the variant follows from the
//! `secret_type` segment of the request path. Imported and public
//! certificates share one certificate variant.

use super::common::CertificateValidity;
use crate::codec::family_resource;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Fields every version carries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionCommon {
    /// Version ID (UUID)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Version ID, as some responses name it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_id: Option<String>,
    /// Creation time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creation_date: Option<DateTime<Utc>>,
    /// Creator
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    /// Created by automatic rotation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_rotated: Option<bool>,
}

impl VersionCommon {
    /// Common fields for version `id`.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }
}

/// A version of an arbitrary or username/password secret, with its payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretVersionPayload {
    /// Fields shared by every version
    #[serde(flatten)]
    pub common: VersionCommon,
    /// The payload of this version
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_data: Option<Map<String, Value>>,
}

/// A version of an IAM credentials secret.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IamCredentialsSecretVersion {
    /// Fields shared by every version
    #[serde(flatten)]
    pub common: VersionCommon,
    /// ID of the API key of this version
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key_id: Option<String>,
    /// Service ID of this version
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_id: Option<String>,
    /// Whether the service ID was supplied by the caller
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_id_is_static: Option<bool>,
    /// The credentials of this version
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_data: Option<Map<String, Value>>,
}

/// A version of an imported or public certificate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateSecretVersion {
    /// Fields shared by every version
    #[serde(flatten)]
    pub common: VersionCommon,
    /// Certificate serial number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,
    /// Certificate expiry
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<DateTime<Utc>>,
    /// Validity window
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validity: Option<CertificateValidity>,
    /// Certificate material of this version
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_data: Option<Map<String, Value>>,
}

/// A single version with its payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecretVersion {
    /// `arbitrary`
    Arbitrary(SecretVersionPayload),
    /// `username_password`
    UsernamePassword(SecretVersionPayload),
    /// `iam_credentials`
    IamCredentials(IamCredentialsSecretVersion),
    /// `imported_cert` and `public_cert`
    Certificate(CertificateSecretVersion),
}

family_resource!(SecretVersion, SecretVersion, {
    Arbitrary => ARBITRARY_SECRET_VERSION,
    UsernamePassword => USERNAME_PASSWORD_SECRET_VERSION,
    IamCredentials => IAM_CREDENTIALS_SECRET_VERSION,
    Certificate => CERTIFICATE_SECRET_VERSION,
});

impl SecretVersion {
    /// Fields shared by all versions.
    #[must_use]
    pub const fn common(&self) -> &VersionCommon {
        match self {
            Self::Arbitrary(v) | Self::UsernamePassword(v) => &v.common,
            Self::IamCredentials(v) => &v.common,
            Self::Certificate(v) => &v.common,
        }
    }

    /// Payload of the version, when returned.
    #[must_use]
    pub const fn secret_data(&self) -> Option<&Map<String, Value>> {
        match self {
            Self::Arbitrary(v) | Self::UsernamePassword(v) => v.secret_data.as_ref(),
            Self::IamCredentials(v) => v.secret_data.as_ref(),
            Self::Certificate(v) => v.secret_data.as_ref(),
        }
    }
}

/// Summary of a non-certificate version.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretVersionDetails {
    /// Fields shared by every version
    #[serde(flatten)]
    pub common: VersionCommon,
    /// The payload can still be read
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload_available: Option<bool>,
    /// The payload was read at least once
    #[serde(skip_serializing_if = "Option::is_none")]
    pub downloaded: Option<bool>,
}

/// Summary of a certificate version.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateVersionDetails {
    /// Fields shared by every version
    #[serde(flatten)]
    pub common: VersionCommon,
    /// Certificate serial number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,
    /// Certificate expiry
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<DateTime<Utc>>,
    /// Validity window
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validity: Option<CertificateValidity>,
}

/// An entry of a version listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecretVersionInfo {
    /// `arbitrary`
    Arbitrary(SecretVersionDetails),
    /// `username_password`
    UsernamePassword(SecretVersionDetails),
    /// `iam_credentials`
    IamCredentials(SecretVersionDetails),
    /// `imported_cert` and `public_cert`
    Certificate(CertificateVersionDetails),
}

family_resource!(SecretVersionInfo, SecretVersionInfo, {
    Arbitrary => ARBITRARY_SECRET_VERSION_INFO,
    UsernamePassword => USERNAME_PASSWORD_SECRET_VERSION_INFO,
    IamCredentials => IAM_CREDENTIALS_SECRET_VERSION_INFO,
    Certificate => CERTIFICATE_SECRET_VERSION_INFO,
});

/// Metadata of a single version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecretVersionMetadata {
    /// `arbitrary`
    Arbitrary(SecretVersionDetails),
    /// `username_password`
    UsernamePassword(SecretVersionDetails),
    /// `iam_credentials`
    IamCredentials(SecretVersionDetails),
    /// `imported_cert` and `public_cert`
    Certificate(CertificateVersionDetails),
}

family_resource!(SecretVersionMetadata, SecretVersionMetadata, {
    Arbitrary => ARBITRARY_SECRET_VERSION_METADATA,
    UsernamePassword => USERNAME_PASSWORD_SECRET_VERSION_METADATA,
    IamCredentials => IAM_CREDENTIALS_SECRET_VERSION_METADATA,
    Certificate => CERTIFICATE_SECRET_VERSION_METADATA,
});

macro_rules! version_common {
    ($($ty:ident),+) => {
        $(
            impl $ty {
                /// Fields shared by all versions.
                #[must_use]
                pub const fn common(&self) -> &VersionCommon {
                    match self {
                        Self::Arbitrary(v) | Self::UsernamePassword(v) | Self::IamCredentials(v) => {
                            &v.common
                        }
                        Self::Certificate(v) => &v.common,
                    }
                }
            }
        )+
    };
}

version_common!(SecretVersionInfo, SecretVersionMetadata);
