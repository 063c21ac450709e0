//! The `{metadata, resources}` wrapper around collections.

use crate::codec::{JsonPath, JsonResource, from_value, into_object};
use crate::error::{SecretsManagerError, SecretsManagerResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Media types carried in `metadata.collection_type`.
pub mod collection_type {
    /// Engine configuration
    pub const CONFIG: &str = "application/vnd.ibm.secrets-manager.config+json";
    /// Error documents
    pub const ERROR: &str = "application/vnd.ibm.secrets-manager.error+json";
    /// Secrets and secret metadata
    pub const SECRET: &str = "application/vnd.ibm.secrets-manager.secret+json";
    /// Secret groups
    pub const SECRET_GROUP: &str = "application/vnd.ibm.secrets-manager.secret.group+json";
    /// Secret policies
    pub const SECRET_POLICY: &str = "application/vnd.ibm.secrets-manager.secret.policy+json";
    /// Secret versions
    pub const SECRET_VERSION: &str = "application/vnd.ibm.secrets-manager.secret.version+json";
}

/// Describes the resources of an envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionMetadata {
    /// Media type of the resources
    pub collection_type: String,
    /// Number of resources in the envelope
    pub collection_total: u64,
}

impl CollectionMetadata {
    /// Metadata for `total` resources of `collection_type`.
    #[must_use]
    pub fn new(collection_type: impl Into<String>, total: u64) -> Self {
        Self {
            collection_type: collection_type.into(),
            collection_total: total,
        }
    }
}

/// A collection of resources with its metadata.
///
/// Every request and response body of the API except four bare bodies is
/// wrapped this way, including single-resource requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionEnvelope<T> {
    /// Collection description
    pub metadata: CollectionMetadata,
    /// The resources, in order
    pub resources: Vec<T>,
}

impl<T> CollectionEnvelope<T> {
    /// Wrap `resources`; the total is their count.
    #[must_use]
    pub fn new(collection_type: &str, resources: Vec<T>) -> Self {
        Self {
            metadata: CollectionMetadata::new(collection_type, resources.len() as u64),
            resources,
        }
    }

    /// Number of resources.
    #[must_use]
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// Whether the envelope holds no resources.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// First resource, the usual case for single-resource responses.
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.resources.first()
    }

    /// Take the resources out of the envelope.
    #[must_use]
    pub fn into_resources(self) -> Vec<T> {
        self.resources
    }
}

fn take_member(
    object: &mut Map<String, Value>,
    key: &str,
    path: &JsonPath,
) -> SecretsManagerResult<Value> {
    match object.remove(key) {
        None | Some(Value::Null) => Err(SecretsManagerError::schema(
            path.key(key).to_string(),
            "missing required field",
        )),
        Some(value) => Ok(value),
    }
}

impl<T: JsonResource> JsonResource for CollectionEnvelope<T> {
    fn to_json(&self) -> SecretsManagerResult<Value> {
        let metadata = CollectionMetadata::new(
            self.metadata.collection_type.clone(),
            self.resources.len() as u64,
        );
        let mut object = Map::new();
        object.insert("metadata".to_string(), crate::codec::to_value(&metadata)?);
        object.insert("resources".to_string(), self.resources.to_json()?);
        Ok(Value::Object(object))
    }

    fn from_json(
        value: Value,
        discriminator: Option<&str>,
        path: &JsonPath,
    ) -> SecretsManagerResult<Self> {
        let mut object = into_object(value, path)?;
        let metadata_path = path.key("metadata");
        let metadata = take_member(&mut object, "metadata", path)?;
        let metadata = into_object(metadata, &metadata_path)?;
        for field in ["collection_type", "collection_total"] {
            if metadata.get(field).is_none_or(Value::is_null) {
                return Err(SecretsManagerError::schema(
                    metadata_path.key(field).to_string(),
                    "missing required field",
                ));
            }
        }
        let metadata: CollectionMetadata = from_value(Value::Object(metadata), &metadata_path)?;

        let resources = take_member(&mut object, "resources", path)?;
        let resources = Vec::<T>::from_json(resources, discriminator, &path.key("resources"))?;
        Ok(Self {
            metadata,
            resources,
        })
    }
}
