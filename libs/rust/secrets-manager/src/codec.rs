//! JSON encoding and decoding of polymorphic resources.
//!
//! Plain records go through serde directly. Family types implement
//! [`JsonResource`] on top of the helpers here: the variant is selected from
//! the registry, required fields are checked against the raw object, and only
//! then does serde map the object onto the concrete record. Failures carry a
//! JSON pointer to the offending value.

use crate::envelope::{CollectionEnvelope, CollectionMetadata};
use crate::error::{SecretsManagerError, SecretsManagerResult};
use crate::registry::{DiscriminatorSource, Family, VariantDescriptor, resolve_variant};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use serde_path_to_error::Segment;
use std::fmt;

/// A JSON pointer (RFC 6901) into the document being decoded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JsonPath(String);

impl JsonPath {
    /// The whole document.
    #[must_use]
    pub const fn root() -> Self {
        Self(String::new())
    }

    /// Pointer to member `key` of the current object.
    #[must_use]
    pub fn key(&self, key: &str) -> Self {
        let escaped = key.replace('~', "~0").replace('/', "~1");
        Self(format!("{}/{escaped}", self.0))
    }

    /// Pointer to element `index` of the current array.
    #[must_use]
    pub fn index(&self, index: usize) -> Self {
        Self(format!("{}/{index}", self.0))
    }

    /// The pointer text; empty for the root.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            f.write_str("/")
        } else {
            f.write_str(&self.0)
        }
    }
}

/// A value that can be written to and read from a JSON document.
///
/// `discriminator` carries the variant selector for families whose variant
/// is not recorded in the body, such as the `secret_type` path segment of a
/// version request. Plain records ignore it.
pub trait JsonResource: Sized {
    /// Produce the JSON value for this resource.
    ///
    /// # Errors
    ///
    /// Returns [`SecretsManagerError::InvalidArgument`] if a required field
    /// is absent.
    fn to_json(&self) -> SecretsManagerResult<Value>;

    /// Build the resource from `value`, found at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`SecretsManagerError::SchemaMismatch`] if the value does not
    /// fit the resource.
    fn from_json(
        value: Value,
        discriminator: Option<&str>,
        path: &JsonPath,
    ) -> SecretsManagerResult<Self>;
}

/// Encode `value` as a JSON document.
///
/// # Errors
///
/// Returns [`SecretsManagerError::InvalidArgument`] if a required field is
/// absent.
pub fn encode<T: JsonResource>(value: &T) -> SecretsManagerResult<Vec<u8>> {
    let json = value.to_json()?;
    serde_json::to_vec(&json).map_err(|e| SecretsManagerError::invalid_argument(e.to_string()))
}

/// Decode a JSON document into `T`.
///
/// # Errors
///
/// Returns [`SecretsManagerError::SchemaMismatch`] if the bytes are not JSON
/// or do not fit `T`.
pub fn decode<T: JsonResource>(bytes: &[u8], discriminator: Option<&str>) -> SecretsManagerResult<T> {
    let value: Value = serde_json::from_slice(bytes)
        .map_err(|e| SecretsManagerError::schema(JsonPath::root().to_string(), e.to_string()))?;
    T::from_json(value, discriminator, &JsonPath::root())
}

/// Encode a collection envelope around `resources`.
///
/// `collection_total` is always the number of resources sent.
///
/// # Errors
///
/// Returns [`SecretsManagerError::InvalidArgument`] if a resource is missing
/// a required field.
pub fn encode_envelope<T: JsonResource>(
    collection_type: &str,
    resources: Vec<T>,
) -> SecretsManagerResult<Vec<u8>> {
    encode(&CollectionEnvelope::new(collection_type, resources))
}

/// Decode a collection envelope, passing `discriminator` to every resource.
///
/// # Errors
///
/// Returns [`SecretsManagerError::SchemaMismatch`] naming the first resource
/// that fails.
pub fn decode_envelope<T: JsonResource>(
    bytes: &[u8],
    discriminator: Option<&str>,
) -> SecretsManagerResult<(CollectionMetadata, Vec<T>)> {
    let envelope: CollectionEnvelope<T> = decode(bytes, discriminator)?;
    Ok((envelope.metadata, envelope.resources))
}

impl<T: JsonResource> JsonResource for Vec<T> {
    fn to_json(&self) -> SecretsManagerResult<Value> {
        self.iter().map(JsonResource::to_json).collect::<Result<Vec<_>, _>>().map(Value::Array)
    }

    fn from_json(
        value: Value,
        discriminator: Option<&str>,
        path: &JsonPath,
    ) -> SecretsManagerResult<Self> {
        let Value::Array(items) = value else {
            return Err(SecretsManagerError::schema(path.to_string(), "expected an array"));
        };
        items
            .into_iter()
            .enumerate()
            .map(|(i, item)| T::from_json(item, discriminator, &path.index(i)))
            .collect()
    }
}

/// Require `value` to be a JSON object.
pub(crate) fn into_object(value: Value, path: &JsonPath) -> SecretsManagerResult<Map<String, Value>> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(SecretsManagerError::schema(
            path.to_string(),
            format!("expected an object, found {}", kind_of(&other)),
        )),
    }
}

const fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn is_present(object: &Map<String, Value>, field: &str) -> bool {
    object.get(field).is_some_and(|v| !v.is_null())
}

/// First required field of `descriptor` that is missing or null.
fn missing_required(
    object: &Map<String, Value>,
    descriptor: &VariantDescriptor,
) -> Option<&'static str> {
    descriptor.required.iter().copied().find(|field| !is_present(object, field))
}

/// Fields that belong to a sibling variant but not to `descriptor`.
fn foreign_field<'a>(
    object: &'a Map<String, Value>,
    descriptor: &VariantDescriptor,
) -> Option<&'a str> {
    let owns = |variant: &VariantDescriptor, key: &str| variant.fields.iter().any(|f| *f == key);
    object.keys().map(String::as_str).find(|key| {
        !owns(descriptor, key)
            && descriptor.family.variants().iter().any(|sibling| owns(sibling, key))
    })
}

/// Map a plain serde record from a JSON value.
///
/// Errors point at the field serde rejected, below `path`.
pub(crate) fn from_value<T: DeserializeOwned>(
    value: Value,
    path: &JsonPath,
) -> SecretsManagerResult<T> {
    let err = match serde_path_to_error::deserialize(&value) {
        Ok(record) => return Ok(record),
        Err(err) => err,
    };
    let mut at = err.path().iter().fold(path.clone(), |at, segment| match segment {
        Segment::Map { key } => at.key(key),
        Segment::Seq { index } => at.index(*index),
        Segment::Enum { .. } | Segment::Unknown => at,
    });
    if at == *path {
        if let Some(key) = flattened_member::<T>(&value) {
            at = path.key(key);
        }
    }
    Err(SecretsManagerError::schema(at.to_string(), err.into_inner().to_string()))
}

/// Serde reports errors inside `#[serde(flatten)]` members at the enclosing
/// object. Find the member whose removal lets the record decode, or failing
/// that, the member serde then reports as missing.
fn flattened_member<T: DeserializeOwned>(value: &Value) -> Option<&str> {
    let object = value.as_object()?;
    let without = |key: &str| {
        let mut rest = object.clone();
        rest.remove(key);
        serde_json::from_value::<T>(Value::Object(rest))
    };
    object
        .keys()
        .find(|key| without(key).is_ok())
        .or_else(|| {
            object.keys().find(|key| {
                without(key).is_err_and(|e| e.to_string().contains(&format!("`{key}`")))
            })
        })
        .map(String::as_str)
}

/// Map a checked object onto its concrete record.
pub(crate) fn from_object<T: DeserializeOwned>(
    object: Map<String, Value>,
    path: &JsonPath,
) -> SecretsManagerResult<T> {
    from_value(Value::Object(object), path)
}

/// Serialize a plain serde record.
pub(crate) fn to_value<T: Serialize>(value: &T) -> SecretsManagerResult<Value> {
    serde_json::to_value(value).map_err(|e| SecretsManagerError::invalid_argument(e.to_string()))
}

/// Serialize a variant record, embedding its discriminator when the family
/// records it in the body, and check its required fields.
pub(crate) fn encode_variant<T: Serialize>(
    value: &T,
    descriptor: &'static VariantDescriptor,
) -> SecretsManagerResult<Value> {
    let mut object = match to_value(value)? {
        Value::Object(map) => map,
        _ => {
            return Err(SecretsManagerError::invalid_argument(format!(
                "{} must serialize to an object",
                descriptor.name
            )));
        }
    };
    if let DiscriminatorSource::Field(tag) = descriptor.family.discriminator_source() {
        object.insert(tag.to_string(), Value::String(descriptor.canonical().to_string()));
    }
    let missing = missing_required(&object, descriptor).or_else(|| {
        descriptor
            .encode_required
            .iter()
            .copied()
            .find(|field| !is_present(&object, field))
    });
    if let Some(field) = missing {
        return Err(SecretsManagerError::invalid_argument(format!(
            "{}: required field '{field}' is missing",
            descriptor.name
        )));
    }
    Ok(Value::Object(object))
}

fn lookup(
    family: Family,
    discriminator: &str,
    path: &JsonPath,
) -> SecretsManagerResult<&'static VariantDescriptor> {
    resolve_variant(family, discriminator)
        .map_err(|e| SecretsManagerError::schema(path.to_string(), e.to_string()))
}

/// Pick the variant of `family` that `value` holds and validate it.
///
/// Returns the descriptor and the object, ready for [`from_object`].
pub(crate) fn select_variant(
    family: Family,
    value: Value,
    discriminator: Option<&str>,
    path: &JsonPath,
) -> SecretsManagerResult<(&'static VariantDescriptor, Map<String, Value>)> {
    let object = into_object(value, path)?;
    let descriptor = match family.discriminator_source() {
        DiscriminatorSource::Field(tag) => {
            let tag_path = path.key(tag);
            let found = match object.get(tag) {
                None | Some(Value::Null) => {
                    return Err(SecretsManagerError::schema(
                        tag_path.to_string(),
                        "missing discriminator",
                    ));
                }
                Some(Value::String(found)) => found.as_str(),
                Some(other) => {
                    return Err(SecretsManagerError::schema(
                        tag_path.to_string(),
                        format!("discriminator must be a string, found {}", kind_of(other)),
                    ));
                }
            };
            let descriptor = lookup(family, found, &tag_path)?;
            if let Some(expected) = discriminator {
                let expected_variant = lookup(family, expected, &tag_path)?;
                if expected_variant.name != descriptor.name {
                    return Err(SecretsManagerError::schema(
                        tag_path.to_string(),
                        format!("'{found}' does not match the requested '{expected}'"),
                    ));
                }
            }
            descriptor
        }
        DiscriminatorSource::Context(name) => {
            let Some(selector) = discriminator else {
                return Err(SecretsManagerError::schema(
                    path.to_string(),
                    format!("{family} needs the '{name}' of the request to pick a variant"),
                ));
            };
            lookup(family, selector, path)?
        }
        DiscriminatorSource::Presence => family
            .variants()
            .iter()
            .find(|v| v.fields.iter().any(|field| object.contains_key(*field)))
            .ok_or_else(|| {
                SecretsManagerError::schema(
                    path.to_string(),
                    format!("no {family} variant matches the fields present"),
                )
            })?,
    };

    if let Some(field) = missing_required(&object, descriptor) {
        return Err(SecretsManagerError::schema(
            path.key(field).to_string(),
            format!("required field of {} is missing", descriptor.name),
        ));
    }
    if family.rejects_foreign_fields() {
        if let Some(field) = foreign_field(&object, descriptor) {
            return Err(SecretsManagerError::schema(
                path.key(field).to_string(),
                format!("field is not part of {}", descriptor.name),
            ));
        }
    }
    Ok((descriptor, object))
}

/// Error for a descriptor the family type has no arm for.
pub(crate) fn unhandled(descriptor: &VariantDescriptor, path: &JsonPath) -> SecretsManagerError {
    SecretsManagerError::schema(
        path.to_string(),
        format!("{} is not handled by {}", descriptor.name, descriptor.family),
    )
}

/// Implements [`Discriminated`](crate::registry::Discriminated) and
/// [`JsonResource`] for a family enum whose arms each wrap a serde record.
macro_rules! family_resource {
    ($ty:ident, $family:ident, { $($arm:ident => $descriptor:ident),+ $(,)? }) => {
        impl $crate::registry::Discriminated for $ty {
            const FAMILY: $crate::registry::Family = $crate::registry::Family::$family;

            fn descriptor(&self) -> &'static $crate::registry::VariantDescriptor {
                match self {
                    $(Self::$arm(_) => &$crate::registry::$descriptor,)+
                }
            }
        }

        impl $crate::codec::JsonResource for $ty {
            fn to_json(&self) -> $crate::error::SecretsManagerResult<serde_json::Value> {
                let descriptor = $crate::registry::Discriminated::descriptor(self);
                match self {
                    $(Self::$arm(inner) => $crate::codec::encode_variant(inner, descriptor),)+
                }
            }

            fn from_json(
                value: serde_json::Value,
                discriminator: Option<&str>,
                path: &$crate::codec::JsonPath,
            ) -> $crate::error::SecretsManagerResult<Self> {
                let (descriptor, object) = $crate::codec::select_variant(
                    $crate::registry::Family::$family,
                    value,
                    discriminator,
                    path,
                )?;
                $(
                    if descriptor.name == $crate::registry::$descriptor.name {
                        return $crate::codec::from_object(object, path).map(Self::$arm);
                    }
                )+
                Err($crate::codec::unhandled(descriptor, path))
            }
        }
    };
}

/// Implements [`JsonResource`] for a plain serde record.
macro_rules! plain_resource {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::codec::JsonResource for $ty {
                fn to_json(&self) -> $crate::error::SecretsManagerResult<serde_json::Value> {
                    $crate::codec::to_value(self)
                }

                fn from_json(
                    value: serde_json::Value,
                    _discriminator: Option<&str>,
                    path: &$crate::codec::JsonPath,
                ) -> $crate::error::SecretsManagerResult<Self> {
                    let object = $crate::codec::into_object(value, path)?;
                    $crate::codec::from_object(object, path)
                }
            }
        )+
    };
}

pub(crate) use family_resource;
pub(crate) use plain_resource;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_path() {
        let path = JsonPath::root().key("resources").index(0).key("a/b~c");
        assert_eq!(path.as_str(), "/resources/0/a~1b~0c");
        assert_eq!(JsonPath::root().to_string(), "/");
    }

    #[test]
    fn test_serde_errors_point_at_the_field() {
        #[derive(Debug, serde::Deserialize)]
        #[allow(dead_code)]
        struct Record {
            tags: Vec<u32>,
        }

        let err = from_value::<Record>(
            json!({"tags": [1, "two"]}),
            &JsonPath::root().key("resources").index(3),
        )
        .unwrap_err();
        match err {
            SecretsManagerError::SchemaMismatch { path, .. } => {
                assert_eq!(path, "/resources/3/tags/1");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_field_discriminator() {
        let err = select_variant(
            Family::Secret,
            json!({"name": "n"}),
            None,
            &JsonPath::root().key("resources").index(0),
        )
        .unwrap_err();
        match err {
            SecretsManagerError::SchemaMismatch { path, .. } => {
                assert_eq!(path, "/resources/0/secret_type");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_body_disagrees_with_context() {
        let err = select_variant(
            Family::Secret,
            json!({"name": "n", "secret_type": "kv"}),
            Some("arbitrary"),
            &JsonPath::root(),
        )
        .unwrap_err();
        assert!(matches!(err, SecretsManagerError::SchemaMismatch { .. }));
    }

    #[test]
    fn test_context_family_needs_selector() {
        let err = select_variant(Family::SecretVersion, json!({"id": "v1"}), None, &JsonPath::root())
            .unwrap_err();
        assert!(err.to_string().contains("secret_type"));

        let (descriptor, _) = select_variant(
            Family::SecretVersion,
            json!({"id": "v1"}),
            Some("public_cert"),
            &JsonPath::root(),
        )
        .unwrap();
        assert_eq!(descriptor.name, "CertificateSecretVersion");
    }

    #[test]
    fn test_required_null_counts_as_missing() {
        let err = select_variant(
            Family::SecretVersion,
            json!({"id": null}),
            Some("arbitrary"),
            &JsonPath::root(),
        )
        .unwrap_err();
        match err {
            SecretsManagerError::SchemaMismatch { path, .. } => assert_eq!(path, "/id"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_presence_selection_and_foreign_fields() {
        let (descriptor, _) = select_variant(
            Family::PolicyRotation,
            json!({"interval": 1, "unit": "month"}),
            None,
            &JsonPath::root(),
        )
        .unwrap();
        assert_eq!(descriptor.name, "IntervalRotation");

        let err = select_variant(
            Family::PolicyRotation,
            json!({"interval": 1, "unit": "month", "rotate_keys": true}),
            None,
            &JsonPath::root().key("rotation"),
        )
        .unwrap_err();
        match err {
            SecretsManagerError::SchemaMismatch { path, .. } => {
                assert_eq!(path, "/rotation/rotate_keys");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_non_object_rejected() {
        let err = into_object(json!([1]), &JsonPath::root()).unwrap_err();
        assert!(err.to_string().contains("an array"));
    }

    #[test]
    fn test_decode_rejects_invalid_json() {
        let err = decode::<Vec<crate::models::SecretGroupResource>>(b"{", None).unwrap_err();
        assert!(matches!(err, SecretsManagerError::SchemaMismatch { .. }));
    }
}
