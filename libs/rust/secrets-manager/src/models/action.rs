//! Bodies of `UpdateSecret`: rotate, restore and delete-credentials.
//!
//! Which body applies depends on the `action` query value and the
//! `secret_type` path segment. Bodies are sent bare, without an envelope.

use crate::codec::family_resource;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// New payload for an arbitrary secret.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotateArbitrarySecretBody {
    /// Payload of the new version
    pub payload: String,
}

/// Reorder a public certificate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotatePublicCertBody {
    /// Generate a new private key as well
    pub rotate_keys: bool,
}

/// New password for a username/password secret.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotateUsernamePasswordSecretBody {
    /// Password of the new version
    pub password: String,
}

/// New material for an imported certificate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotateCertificateBody {
    /// PEM certificate
    pub certificate: String,
    /// PEM private key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private_key: Option<String>,
    /// PEM intermediate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intermediate: Option<String>,
}

impl RotateCertificateBody {
    /// Rotate to `certificate`.
    #[must_use]
    pub fn new(certificate: impl Into<String>) -> Self {
        Self {
            certificate: certificate.into(),
            private_key: None,
            intermediate: None,
        }
    }

    /// Include the private key.
    #[must_use]
    pub fn with_private_key(mut self, key: impl Into<String>) -> Self {
        self.private_key = Some(key.into());
        self
    }

    /// Include the intermediate.
    #[must_use]
    pub fn with_intermediate(mut self, intermediate: impl Into<String>) -> Self {
        self.intermediate = Some(intermediate.into());
        self
    }
}

/// New map for a key-value secret.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotateKvSecretBody {
    /// Map of the new version
    pub payload: Map<String, Value>,
}

/// Restore a previous version of an IAM credentials secret.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestoreIamCredentialsSecretBody {
    /// Version to restore
    pub version_id: String,
}

/// Revoke the API key of an IAM credentials secret.
///
/// `service_id` is deprecated in favour of `api_key_id`. Both are optional
/// and sent exactly as set; the service does not document which wins when
/// both are present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteCredentialsForIamCredentialsSecret {
    /// API key to revoke
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key_id: Option<String>,
    /// Service ID whose key to revoke. Deprecated: use `api_key_id`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_id: Option<String>,
}

impl DeleteCredentialsForIamCredentialsSecret {
    /// Revoke API key `api_key_id`.
    #[must_use]
    pub fn for_api_key(api_key_id: impl Into<String>) -> Self {
        Self {
            api_key_id: Some(api_key_id.into()),
            service_id: None,
        }
    }

    /// Revoke the key of `service_id`.
    #[deprecated(note = "use `for_api_key`")]
    #[must_use]
    pub fn for_service_id(service_id: impl Into<String>) -> Self {
        Self {
            api_key_id: None,
            service_id: Some(service_id.into()),
        }
    }
}

/// The body of an `UpdateSecret` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecretAction {
    /// `rotate` on `arbitrary`
    RotateArbitrary(RotateArbitrarySecretBody),
    /// `rotate` on `public_cert`
    RotatePublicCert(RotatePublicCertBody),
    /// `rotate` on `username_password`
    RotateUsernamePassword(RotateUsernamePasswordSecretBody),
    /// `rotate` on `imported_cert`
    RotateCertificate(RotateCertificateBody),
    /// `rotate` on `kv`
    RotateKv(RotateKvSecretBody),
    /// `restore` on `iam_credentials`
    RestoreIamCredentials(RestoreIamCredentialsSecretBody),
    /// `delete_credentials` on `iam_credentials`
    DeleteCredentials(DeleteCredentialsForIamCredentialsSecret),
}

family_resource!(SecretAction, SecretAction, {
    RotateArbitrary => ROTATE_ARBITRARY_SECRET_BODY,
    RotatePublicCert => ROTATE_PUBLIC_CERT_BODY,
    RotateUsernamePassword => ROTATE_USERNAME_PASSWORD_SECRET_BODY,
    RotateCertificate => ROTATE_CERTIFICATE_BODY,
    RotateKv => ROTATE_KV_SECRET_BODY,
    RestoreIamCredentials => RESTORE_IAM_CREDENTIALS_SECRET_BODY,
    DeleteCredentials => DELETE_CREDENTIALS_FOR_IAM_CREDENTIALS_SECRET,
});

impl SecretAction {
    /// Rotate an arbitrary secret to `payload`.
    #[must_use]
    pub fn rotate_arbitrary(payload: impl Into<String>) -> Self {
        Self::RotateArbitrary(RotateArbitrarySecretBody {
            payload: payload.into(),
        })
    }

    /// Reorder a public certificate.
    #[must_use]
    pub const fn rotate_public_cert(rotate_keys: bool) -> Self {
        Self::RotatePublicCert(RotatePublicCertBody { rotate_keys })
    }

    /// Rotate a username/password secret to `password`.
    #[must_use]
    pub fn rotate_username_password(password: impl Into<String>) -> Self {
        Self::RotateUsernamePassword(RotateUsernamePasswordSecretBody {
            password: password.into(),
        })
    }

    /// Rotate a key-value secret to `payload`.
    #[must_use]
    pub const fn rotate_kv(payload: Map<String, Value>) -> Self {
        Self::RotateKv(RotateKvSecretBody { payload })
    }

    /// Restore version `version_id` of an IAM credentials secret.
    #[must_use]
    pub fn restore_iam_credentials(version_id: impl Into<String>) -> Self {
        Self::RestoreIamCredentials(RestoreIamCredentialsSecretBody {
            version_id: version_id.into(),
        })
    }
}

impl From<RotateCertificateBody> for SecretAction {
    fn from(body: RotateCertificateBody) -> Self {
        Self::RotateCertificate(body)
    }
}

impl From<DeleteCredentialsForIamCredentialsSecret> for SecretAction {
    fn from(body: DeleteCredentialsForIamCredentialsSecret) -> Self {
        Self::DeleteCredentials(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{JsonPath, JsonResource, encode};
    use crate::registry::{action, action_discriminator, secret_type};
    use serde_json::json;

    #[test]
    fn test_bodies_are_bare() {
        assert_eq!(
            encode(&SecretAction::rotate_public_cert(true)).unwrap(),
            br#"{"rotate_keys":true}"#
        );
        assert_eq!(
            encode(&SecretAction::restore_iam_credentials("v")).unwrap(),
            br#"{"version_id":"v"}"#
        );
    }

    #[test]
    fn test_decode_by_action_and_type() {
        let key = action_discriminator(action::ROTATE, secret_type::USERNAME_PASSWORD);
        let body = SecretAction::from_json(
            json!({"password": "p"}),
            Some(&key),
            &JsonPath::root(),
        )
        .unwrap();
        assert_eq!(body, SecretAction::rotate_username_password("p"));
    }

    #[test]
    fn test_missing_required_body_field() {
        let key = action_discriminator(action::RESTORE, secret_type::IAM_CREDENTIALS);
        let err = SecretAction::from_json(json!({}), Some(&key), &JsonPath::root()).unwrap_err();
        assert!(err.to_string().contains("/version_id"));
    }

    #[test]
    fn test_delete_credentials_sends_what_is_set() {
        let both = DeleteCredentialsForIamCredentialsSecret {
            api_key_id: Some("k".into()),
            service_id: Some("s".into()),
        };
        assert_eq!(
            SecretAction::from(both).to_json().unwrap(),
            json!({"api_key_id": "k", "service_id": "s"})
        );
        let empty = SecretAction::from(DeleteCredentialsForIamCredentialsSecret::default());
        assert_eq!(empty.to_json().unwrap(), json!({}));
    }
}
