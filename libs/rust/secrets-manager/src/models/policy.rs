//! Rotation policies.

use crate::codec::{JsonPath, JsonResource, family_resource, from_object, into_object, to_value};
use crate::envelope::{CollectionEnvelope, collection_type};
use crate::error::{SecretsManagerError, SecretsManagerResult};
use crate::registry::{Discriminated, Family, GET_SECRET_POLICY_ROTATION, VariantDescriptor};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Rotate every `interval` `unit`s.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntervalRotation {
    /// Number of units between rotations
    pub interval: i64,
    /// `day` or `month`
    pub unit: String,
}

/// Rotation flags of a public certificate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicCertRotation {
    /// Reorder automatically before expiry
    pub auto_rotate: bool,
    /// Generate a new private key on each order
    pub rotate_keys: bool,
}

/// The `rotation` member of a policy; the variant follows from which
/// fields are present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicyRotation {
    /// `interval` and `unit`
    Interval(IntervalRotation),
    /// `auto_rotate` and `rotate_keys`
    PublicCert(PublicCertRotation),
}

family_resource!(PolicyRotation, PolicyRotation, {
    Interval => INTERVAL_ROTATION,
    PublicCert => PUBLIC_CERT_ROTATION,
});

impl PolicyRotation {
    /// Rotate every `interval` `unit`s.
    #[must_use]
    pub fn every(interval: i64, unit: impl Into<String>) -> Self {
        Self::Interval(IntervalRotation {
            interval,
            unit: unit.into(),
        })
    }

    /// Public certificate rotation flags.
    #[must_use]
    pub const fn public_cert(auto_rotate: bool, rotate_keys: bool) -> Self {
        Self::PublicCert(PublicCertRotation {
            auto_rotate,
            rotate_keys,
        })
    }
}

fn take_rotation(
    object: &mut Map<String, Value>,
    path: &JsonPath,
) -> SecretsManagerResult<Option<PolicyRotation>> {
    match object.remove("rotation") {
        None | Some(Value::Null) => Ok(None),
        Some(value) => PolicyRotation::from_json(value, None, &path.key("rotation")).map(Some),
    }
}

/// A rotation policy as written by `PutPolicy`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretPolicyRotation {
    /// Media type of the policy
    pub policy_type: String,
    /// The schedule
    pub rotation: PolicyRotation,
}

impl SecretPolicyRotation {
    /// A policy with `rotation`.
    #[must_use]
    pub fn new(rotation: PolicyRotation) -> Self {
        Self {
            policy_type: collection_type::SECRET_POLICY.to_string(),
            rotation,
        }
    }
}

impl JsonResource for SecretPolicyRotation {
    fn to_json(&self) -> SecretsManagerResult<Value> {
        let mut object = Map::new();
        object.insert("type".to_string(), Value::String(self.policy_type.clone()));
        object.insert("rotation".to_string(), self.rotation.to_json()?);
        Ok(Value::Object(object))
    }

    fn from_json(
        value: Value,
        _discriminator: Option<&str>,
        path: &JsonPath,
    ) -> SecretsManagerResult<Self> {
        let mut object = into_object(value, path)?;
        let Some(rotation) = take_rotation(&mut object, path)? else {
            return Err(SecretsManagerError::schema(
                path.key("rotation").to_string(),
                "missing required field",
            ));
        };
        let policy_type = match object.remove("type") {
            Some(Value::String(t)) => t,
            _ => {
                return Err(SecretsManagerError::schema(
                    path.key("type").to_string(),
                    "missing required field",
                ));
            }
        };
        Ok(Self {
            policy_type,
            rotation,
        })
    }
}

/// Plain fields of a stored policy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
struct PolicyFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    crn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    creation_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    created_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_update_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    updated_by: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    policy_type: Option<String>,
}

/// A rotation policy as stored by the service.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SecretPolicyRotationResource {
    /// Policy ID
    pub id: Option<String>,
    /// Cloud resource name of the secret
    pub crn: Option<String>,
    /// Creation time
    pub creation_date: Option<DateTime<Utc>>,
    /// Creator
    pub created_by: Option<String>,
    /// Last modification time
    pub last_update_date: Option<DateTime<Utc>>,
    /// Last modifier
    pub updated_by: Option<String>,
    /// Media type of the policy
    pub policy_type: Option<String>,
    /// The schedule
    pub rotation: Option<PolicyRotation>,
}

impl JsonResource for SecretPolicyRotationResource {
    fn to_json(&self) -> SecretsManagerResult<Value> {
        let fields = PolicyFields {
            id: self.id.clone(),
            crn: self.crn.clone(),
            creation_date: self.creation_date,
            created_by: self.created_by.clone(),
            last_update_date: self.last_update_date,
            updated_by: self.updated_by.clone(),
            policy_type: self.policy_type.clone(),
        };
        let mut object = into_object(to_value(&fields)?, &JsonPath::root())?;
        if let Some(rotation) = &self.rotation {
            object.insert("rotation".to_string(), rotation.to_json()?);
        }
        Ok(Value::Object(object))
    }

    fn from_json(
        value: Value,
        _discriminator: Option<&str>,
        path: &JsonPath,
    ) -> SecretsManagerResult<Self> {
        let mut object = into_object(value, path)?;
        let rotation = take_rotation(&mut object, path)?;
        let fields: PolicyFields = from_object(object, path)?;
        Ok(Self {
            id: fields.id,
            crn: fields.crn,
            creation_date: fields.creation_date,
            created_by: fields.created_by,
            last_update_date: fields.last_update_date,
            updated_by: fields.updated_by,
            policy_type: fields.policy_type,
            rotation,
        })
    }
}

/// The rotation policies of a secret.
pub type GetSecretPolicyRotation = CollectionEnvelope<SecretPolicyRotationResource>;

/// Policies returned by `GetPolicy` and `PutPolicy`, selected by the
/// `policy` query value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GetSecretPolicies {
    /// `rotation`
    Rotation(GetSecretPolicyRotation),
}

impl GetSecretPolicies {
    /// The rotation policies, if that is what was requested.
    #[must_use]
    pub fn rotation_policies(&self) -> &[SecretPolicyRotationResource] {
        match self {
            Self::Rotation(envelope) => &envelope.resources,
        }
    }
}

impl Discriminated for GetSecretPolicies {
    const FAMILY: Family = Family::GetSecretPolicies;

    fn descriptor(&self) -> &'static VariantDescriptor {
        match self {
            Self::Rotation(_) => &GET_SECRET_POLICY_ROTATION,
        }
    }
}

impl JsonResource for GetSecretPolicies {
    fn to_json(&self) -> SecretsManagerResult<Value> {
        match self {
            Self::Rotation(envelope) => envelope.to_json(),
        }
    }

    fn from_json(
        value: Value,
        discriminator: Option<&str>,
        path: &JsonPath,
    ) -> SecretsManagerResult<Self> {
        let (descriptor, object) =
            crate::codec::select_variant(Family::GetSecretPolicies, value, discriminator, path)?;
        if descriptor.name == GET_SECRET_POLICY_ROTATION.name {
            return CollectionEnvelope::from_json(Value::Object(object), None, path)
                .map(Self::Rotation);
        }
        Err(crate::codec::unhandled(descriptor, path))
    }
}
