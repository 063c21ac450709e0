//! Secret groups.

use crate::codec::plain_resource;
use chrono::{DateTime, Utc};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

const KNOWN_FIELDS: &[&str] = &[
    "id",
    "name",
    "description",
    "creation_date",
    "last_update_date",
    "type",
];

/// A secret group.
///
/// Members the SDK does not know are kept in an extension map and written
/// back on encode. A known member always wins over an extension of the
/// same name.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SecretGroupResource {
    /// Group ID (UUID)
    pub id: Option<String>,
    /// Human-readable name
    pub name: Option<String>,
    /// Extended description
    pub description: Option<String>,
    /// Creation time
    pub creation_date: Option<DateTime<Utc>>,
    /// Last modification time
    pub last_update_date: Option<DateTime<Utc>>,
    /// Media type of the resource
    #[serde(rename = "type")]
    pub resource_type: Option<String>,
    #[serde(flatten)]
    extensions: Map<String, Value>,
}

impl SecretGroupResource {
    /// A group named `name`, ready for `CreateSecretGroup`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set an extension member.
    pub fn set_property(&mut self, key: impl Into<String>, value: Value) {
        self.extensions.insert(key.into(), value);
    }

    /// An extension member, if present.
    #[must_use]
    pub fn property(&self, key: &str) -> Option<&Value> {
        self.extensions.get(key)
    }

    /// Every extension member.
    #[must_use]
    pub const fn properties(&self) -> &Map<String, Value> {
        &self.extensions
    }
}

fn is_known(key: &str) -> bool {
    KNOWN_FIELDS.iter().any(|known| *known == key)
}

impl Serialize for SecretGroupResource {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        if let Some(id) = &self.id {
            map.serialize_entry("id", id)?;
        }
        if let Some(name) = &self.name {
            map.serialize_entry("name", name)?;
        }
        if let Some(description) = &self.description {
            map.serialize_entry("description", description)?;
        }
        if let Some(created) = &self.creation_date {
            map.serialize_entry("creation_date", created)?;
        }
        if let Some(updated) = &self.last_update_date {
            map.serialize_entry("last_update_date", updated)?;
        }
        if let Some(resource_type) = &self.resource_type {
            map.serialize_entry("type", resource_type)?;
        }
        for (key, value) in &self.extensions {
            if !is_known(key) {
                map.serialize_entry(key, value)?;
            }
        }
        map.end()
    }
}

/// Fields of a secret group that can be changed after creation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretGroupMetadataUpdatable {
    /// New name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl SecretGroupMetadataUpdatable {
    /// Empty update.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rename the group.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Replace the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

plain_resource!(SecretGroupResource, SecretGroupMetadataUpdatable);
