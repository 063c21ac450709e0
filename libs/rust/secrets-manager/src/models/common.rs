//! Value types shared across the secret families.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of a secret, following NIST SP 800-57.
///
/// Only 0, 1, 2, 3 and 5 are valid; other numbers fail to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct SecretState(u8);

impl SecretState {
    /// Pre-activation
    pub const PRE_ACTIVATION: Self = Self(0);
    /// Active
    pub const ACTIVE: Self = Self(1);
    /// Suspended
    pub const SUSPENDED: Self = Self(2);
    /// Deactivated
    pub const DEACTIVATED: Self = Self(3);
    /// Destroyed
    pub const DESTROYED: Self = Self(5);

    /// Numeric value on the wire.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// The `state_description` the service pairs with this state.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self.0 {
            0 => "Pre-activation",
            1 => "Active",
            2 => "Suspended",
            3 => "Deactivated",
            _ => "Destroyed",
        }
    }
}

impl TryFrom<i64> for SecretState {
    type Error = String;

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0..=3 | 5 => Ok(Self(value as u8)),
            other => Err(format!("invalid secret state {other}, expected 0, 1, 2, 3 or 5")),
        }
    }
}

impl From<SecretState> for i64 {
    fn from(state: SecretState) -> Self {
        Self::from(state.0)
    }
}

impl fmt::Display for SecretState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Lifetime of generated IAM credentials: seconds, or a duration such as
/// `"24h"`. Whichever form was received is sent back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Ttl {
    /// Number of seconds
    Seconds(i64),
    /// Duration string, e.g. `"120m"`
    Duration(String),
}

impl From<i64> for Ttl {
    fn from(seconds: i64) -> Self {
        Self::Seconds(seconds)
    }
}

impl From<&str> for Ttl {
    fn from(duration: &str) -> Self {
        Self::Duration(duration.to_string())
    }
}

impl From<String> for Ttl {
    fn from(duration: String) -> Self {
        Self::Duration(duration)
    }
}

/// Validity window of a certificate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateValidity {
    /// Start of validity
    #[serde(skip_serializing_if = "Option::is_none")]
    pub not_before: Option<DateTime<Utc>>,
    /// End of validity
    #[serde(skip_serializing_if = "Option::is_none")]
    pub not_after: Option<DateTime<Utc>>,
}

/// Progress of a public certificate order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuanceInfo {
    /// When the certificate was ordered
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ordered_on: Option<DateTime<Utc>>,
    /// Code of the last issuance failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    /// Message of the last issuance failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    /// Whether intermediates are bundled with the certificate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bundle_certs: Option<bool>,
    /// Order state
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<SecretState>,
    /// Order state, human readable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_description: Option<String>,
    /// Whether the order came from automatic rotation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_rotated: Option<bool>,
    /// Certificate authority configuration used
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ca: Option<String>,
    /// DNS provider configuration used
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dns: Option<String>,
}

/// Rotation settings embedded in a public certificate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rotation {
    /// Rotate automatically before expiry
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_rotate: Option<bool>,
    /// Generate a new private key on rotation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotate_keys: Option<bool>,
}

/// Name and type of a configuration element, as listed in a root config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigElementMetadata {
    /// Element name
    pub name: String,
    /// Element type, one of the `config_type` values
    #[serde(rename = "type")]
    pub config_type: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_state_accepts_valid_values() {
        for (value, description) in [
            (0, "Pre-activation"),
            (1, "Active"),
            (2, "Suspended"),
            (3, "Deactivated"),
            (5, "Destroyed"),
        ] {
            let state: SecretState = serde_json::from_value(json!(value)).unwrap();
            assert_eq!(state.description(), description);
            assert_eq!(serde_json::to_value(state).unwrap(), json!(value));
        }
    }

    #[test]
    fn test_state_rejects_gaps() {
        for value in [4, 6, -1] {
            assert!(serde_json::from_value::<SecretState>(json!(value)).is_err());
        }
    }

    #[test]
    fn test_ttl_keeps_its_form() {
        let seconds: Ttl = serde_json::from_value(json!(3600)).unwrap();
        assert_eq!(seconds, Ttl::Seconds(3600));
        let duration: Ttl = serde_json::from_value(json!("24h")).unwrap();
        assert_eq!(serde_json::to_value(&duration).unwrap(), json!("24h"));
    }

    #[test]
    fn test_issuance_info_omits_absent_fields() {
        let info = IssuanceInfo {
            state: Some(SecretState::ACTIVE),
            ..IssuanceInfo::default()
        };
        assert_eq!(serde_json::to_value(&info).unwrap(), json!({"state": 1}));
    }
}
