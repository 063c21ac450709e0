//! Response bodies shaped like the ones the service returns.

use secrets_manager_sdk::envelope::collection_type;
use serde_json::{Value, json};

/// Creation timestamp used by every fixture.
pub const CREATED_AT: &str = "2024-03-01T09:30:00Z";

/// Wrap `resources` in a collection envelope of `collection_type`.
#[must_use]
pub fn envelope(collection_type: &str, resources: Vec<Value>) -> Value {
    json!({
        "metadata": {
            "collection_type": collection_type,
            "collection_total": resources.len(),
        },
        "resources": resources,
    })
}

/// Envelope of secrets.
#[must_use]
pub fn secret_envelope(resources: Vec<Value>) -> Value {
    envelope(collection_type::SECRET, resources)
}

/// Envelope of secret groups.
#[must_use]
pub fn group_envelope(resources: Vec<Value>) -> Value {
    envelope(collection_type::SECRET_GROUP, resources)
}

/// An active arbitrary secret as returned by `GetSecret`.
#[must_use]
pub fn arbitrary_secret(id: &str, name: &str, payload: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "secret_type": "arbitrary",
        "labels": ["label1", "label2"],
        "state": 1,
        "state_description": "Active",
        "crn": format!("crn:v1:bluemix:public:secrets-manager:us-south:a/1:i::secret:{id}"),
        "creation_date": CREATED_AT,
        "versions_total": 1,
        "secret_data": {"payload": payload},
    })
}

/// A username/password secret in `group_id`.
#[must_use]
pub fn username_password_secret(
    id: &str,
    group_id: &str,
    username: &str,
    password: &str,
    next_rotation_date: Option<&str>,
) -> Value {
    json!({
        "id": id,
        "name": "test-username-password",
        "secret_type": "username_password",
        "secret_group_id": group_id,
        "username": username,
        "state": 1,
        "creation_date": CREATED_AT,
        "next_rotation_date": next_rotation_date,
        "secret_data": {"username": username, "password": password},
    })
}

/// An IAM credentials secret with a fresh API key.
#[must_use]
pub fn iam_credentials_secret(id: &str, api_key: &str) -> Value {
    json!({
        "id": id,
        "name": "test-iam-credentials",
        "secret_type": "iam_credentials",
        "state": 1,
        "ttl": "24h",
        "access_groups": ["AccessGroupId-0"],
        "reuse_api_key": true,
        "api_key": api_key,
        "service_id": "ServiceId-1",
        "creation_date": CREATED_AT,
    })
}

/// A secret group.
#[must_use]
pub fn secret_group(id: &str, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "description": "Group for integration tests",
        "creation_date": CREATED_AT,
        "type": collection_type::SECRET_GROUP,
    })
}

/// The rotation policy envelope returned by `PutPolicy` and `GetPolicy`.
#[must_use]
pub fn rotation_policy_envelope(id: &str, interval: i64, unit: &str) -> Value {
    envelope(
        collection_type::SECRET_POLICY,
        vec![json!({
            "id": id,
            "type": collection_type::SECRET_POLICY,
            "rotation": {"interval": interval, "unit": unit},
            "creation_date": CREATED_AT,
        })],
    )
}

/// A configuration element envelope.
#[must_use]
pub fn config_element_envelope(name: &str, config_type: &str, config: Value) -> Value {
    envelope(
        collection_type::CONFIG,
        vec![json!({"name": name, "type": config_type, "config": config})],
    )
}

/// The DNS providers listing returned by `GetConfigElements`.
#[must_use]
pub fn dns_providers_envelope(names: &[(&str, &str)]) -> Value {
    let providers: Vec<Value> = names
        .iter()
        .map(|(name, kind)| json!({"name": name, "type": kind}))
        .collect();
    envelope(
        collection_type::CONFIG,
        vec![json!({"dns_providers": providers})],
    )
}

/// An error body as the service sends it.
#[must_use]
pub fn error_body(status: u16, message: &str) -> Value {
    envelope(
        collection_type::ERROR,
        vec![json!({"error_message": message, "status_code": status})],
    )
}
