//! End-to-end tests of the client against a mock Secrets Manager.

use sdk_core::{Context, NoAuthAuthenticator};
use secrets_manager_sdk::models::{
    ArbitrarySecretResource, CloudInternetServicesConfig, ConfigElementDef,
    ConfigElementDefConfig, ConfigElementUpdate, EngineConfig, GetConfigElementsResourcesItem,
    GetConfigResourcesItem, KvSecretMetadata, PolicyRotation, SecretAction,
    SecretGroupMetadataUpdatable, SecretGroupResource, SecretMetadata, SecretPolicyRotation,
    SecretResource, SecretVersion, UsernamePasswordSecretResource,
};
use secrets_manager_sdk::options::{
    CreateConfigElementOptions, CreateSecretGroupOptions, CreateSecretOptions,
    DeleteSecretGroupOptions, DeleteSecretOptions, GetConfigElementsOptions, GetConfigOptions,
    GetSecretOptions, GetSecretVersionOptions, ListAllSecretsOptions, ListSecretGroupsOptions,
    PutConfigOptions, PutPolicyOptions, UpdateConfigElementOptions,
    UpdateSecretGroupMetadataOptions, UpdateSecretMetadataOptions, UpdateSecretOptions,
    VERSION_ID_PREVIOUS, action, config_element, config_type, policy, rotation_unit, secret_type,
};
use secrets_manager_sdk::{SecretsManagerError, SecretsManagerV1, SecretsManagerV1Options};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use test_utils::fixtures;
use test_utils::mocks::MockSecretsManager;
use tokio_test::{assert_err, assert_ok};
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

const SECRET_ID: &str = "7f1c1a4e-5b5e-4b5e-9c1d-3f0d8e2a6b11";
const GROUP_ID: &str = "d898bb90-82f6-4d61-b5cc-b079b66cfa76";

fn client(mock: &MockSecretsManager) -> SecretsManagerV1 {
    SecretsManagerV1::new(
        SecretsManagerV1Options::new(Arc::new(NoAuthAuthenticator)).with_url(mock.uri()),
    )
    .unwrap()
}

#[tokio::test]
async fn test_arbitrary_secret_round_trip() {
    let mock = MockSecretsManager::start().await;
    let name = format!("test-integration-{}", chrono::Utc::now().timestamp());
    let body = fixtures::secret_envelope(vec![fixtures::arbitrary_secret(
        SECRET_ID,
        &name,
        "secret-data",
    )]);
    mock.respond_json("POST", "/api/v1/secrets/arbitrary", 200, body.clone())
        .await;
    mock.respond_json("GET", &format!("/api/v1/secrets/arbitrary/{SECRET_ID}"), 200, body)
        .await;
    mock.respond_empty("DELETE", &format!("/api/v1/secrets/arbitrary/{SECRET_ID}"), 204)
        .await;
    let client = client(&mock);

    let expiration = chrono::Utc::now() + chrono::Duration::days(3650);
    let secret = ArbitrarySecretResource::new(&name, "secret-data")
        .with_labels(["label1", "label2"])
        .with_expiration_date(expiration);
    let (created, response) = client
        .create_secret(&CreateSecretOptions::new(secret))
        .await
        .unwrap();
    assert_eq!(response.status_code, 200);
    let id = created.first().and_then(SecretResource::id).unwrap();
    assert_ok!(uuid::Uuid::parse_str(id));

    let sent = mock.request_body(0).await.unwrap();
    assert_eq!(
        sent["metadata"],
        json!({"collection_type": "application/vnd.ibm.secrets-manager.secret+json", "collection_total": 1})
    );
    assert_eq!(sent["resources"][0]["secret_type"], "arbitrary");
    assert_eq!(sent["resources"][0]["labels"], json!(["label1", "label2"]));
    assert_eq!(sent["resources"][0]["payload"], "secret-data");

    let (fetched, _) = client
        .get_secret(&GetSecretOptions::new(secret_type::ARBITRARY, id))
        .await
        .unwrap();
    let data = fetched.first().and_then(SecretResource::secret_data).unwrap();
    assert_eq!(data["payload"], "secret-data");

    let deleted = client
        .delete_secret(&DeleteSecretOptions::new(secret_type::ARBITRARY, id))
        .await
        .unwrap();
    assert_eq!(deleted.status_code, 204);
}

#[tokio::test]
async fn test_name_collision_surfaces_conflict() {
    let mock = MockSecretsManager::start().await;
    let name = "conflict_integration_test_secret";
    Mock::given(method("POST"))
        .and(path("/api/v1/secrets/arbitrary"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::secret_envelope(vec![
            fixtures::arbitrary_secret(SECRET_ID, name, "secret-data"),
        ])))
        .up_to_n_times(1)
        .mount(mock.server())
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/secrets/arbitrary"))
        .respond_with(
            ResponseTemplate::new(409)
                .set_body_json(fixtures::error_body(409, "A secret with the same name already exists")),
        )
        .mount(mock.server())
        .await;
    mock.respond_empty("DELETE", &format!("/api/v1/secrets/arbitrary/{SECRET_ID}"), 204)
        .await;
    let client = client(&mock);

    let options = CreateSecretOptions::new(ArbitrarySecretResource::new(name, "secret-data"));
    assert_ok!(client.create_secret(&options).await);

    let err = assert_err!(client.create_secret(&options).await);
    assert!(matches!(err, SecretsManagerError::Transport(_)));
    assert_eq!(err.status_code(), Some(409));
    assert!(err.response().unwrap().text().contains("already exists"));

    let deleted = client
        .delete_secret(&DeleteSecretOptions::new(secret_type::ARBITRARY, SECRET_ID))
        .await
        .unwrap();
    assert_eq!(deleted.status_code, 204);
}

#[tokio::test]
async fn test_secret_group_association() {
    let mock = MockSecretsManager::start().await;
    let secret_body = fixtures::secret_envelope(vec![fixtures::username_password_secret(
        SECRET_ID,
        GROUP_ID,
        "test_user",
        "test_password",
        None,
    )]);
    mock.respond_json(
        "POST",
        "/api/v1/secret_groups",
        200,
        fixtures::group_envelope(vec![fixtures::secret_group(GROUP_ID, "integration-group")]),
    )
    .await;
    mock.respond_json("POST", "/api/v1/secrets/username_password", 200, secret_body.clone())
        .await;
    mock.respond_json(
        "GET",
        &format!("/api/v1/secrets/username_password/{SECRET_ID}"),
        200,
        secret_body,
    )
    .await;
    mock.respond_empty(
        "DELETE",
        &format!("/api/v1/secrets/username_password/{SECRET_ID}"),
        204,
    )
    .await;
    mock.respond_empty("DELETE", &format!("/api/v1/secret_groups/{GROUP_ID}"), 204)
        .await;
    let client = client(&mock);

    let (groups, _) = client
        .create_secret_group(&CreateSecretGroupOptions::new(
            SecretGroupResource::new("integration-group").with_description("Group for integration tests"),
        ))
        .await
        .unwrap();
    let group_id = groups.first().and_then(|g| g.id.clone()).unwrap();
    assert_ok!(uuid::Uuid::parse_str(&group_id));

    let secret = UsernamePasswordSecretResource::new("test-username-password", "test_user")
        .with_password("test_password")
        .with_secret_group_id(&group_id);
    let (created, _) = client
        .create_secret(&CreateSecretOptions::new(secret))
        .await
        .unwrap();
    let sent = mock.request_body(1).await.unwrap();
    assert_eq!(sent["resources"][0]["secret_group_id"], GROUP_ID);
    let id = created.first().and_then(SecretResource::id).unwrap();

    let (fetched, _) = client
        .get_secret(&GetSecretOptions::new(secret_type::USERNAME_PASSWORD, id))
        .await
        .unwrap();
    let data = fetched.first().and_then(SecretResource::secret_data).unwrap();
    assert_eq!(data["username"], "test_user");
    assert_eq!(data["password"], "test_password");

    let deleted = client
        .delete_secret(&DeleteSecretOptions::new(secret_type::USERNAME_PASSWORD, id))
        .await
        .unwrap();
    assert_eq!(deleted.status_code, 204);
    let deleted = client
        .delete_secret_group(&DeleteSecretGroupOptions::new(&group_id))
        .await
        .unwrap();
    assert_eq!(deleted.status_code, 204);
}

#[tokio::test]
async fn test_rotation_policy_sets_next_rotation() {
    let mock = MockSecretsManager::start().await;
    let secret_route = format!("/api/v1/secrets/username_password/{SECRET_ID}");
    mock.respond_json_with_query(
        "PUT",
        &format!("{secret_route}/policies"),
        ("policy", "rotation"),
        200,
        fixtures::rotation_policy_envelope("policy-1", 1, rotation_unit::MONTH),
    )
    .await;
    mock.respond_json(
        "GET",
        &secret_route,
        200,
        fixtures::secret_envelope(vec![fixtures::username_password_secret(
            SECRET_ID,
            GROUP_ID,
            "test_user",
            "test_password",
            Some("2024-04-01T09:30:00Z"),
        )]),
    )
    .await;
    let client = client(&mock);

    let options = PutPolicyOptions::new(
        secret_type::USERNAME_PASSWORD,
        SECRET_ID,
        SecretPolicyRotation::new(PolicyRotation::every(1, rotation_unit::MONTH)),
    )
    .with_policy(policy::ROTATION);
    let (policies, response) = client.put_policy(&options).await.unwrap();
    assert_eq!(response.status_code, 200);
    assert_eq!(
        policies.rotation_policies()[0].rotation,
        Some(PolicyRotation::every(1, rotation_unit::MONTH))
    );
    let sent = mock.request_body(0).await.unwrap();
    assert_eq!(sent["resources"][0]["rotation"], json!({"interval": 1, "unit": "month"}));

    let (fetched, _) = client
        .get_secret(&GetSecretOptions::new(secret_type::USERNAME_PASSWORD, SECRET_ID))
        .await
        .unwrap();
    match fetched.first() {
        Some(SecretResource::UsernamePassword(secret)) => {
            assert!(secret.next_rotation_date.is_some());
        }
        other => panic!("unexpected secret: {other:?}"),
    }
}

#[tokio::test]
async fn test_action_bodies_are_sent_bare() {
    let mock = MockSecretsManager::start().await;
    let public_cert = json!({
        "id": SECRET_ID,
        "name": "cert",
        "secret_type": "public_cert",
        "common_name": "example.com",
        "rotation": {"auto_rotate": true, "rotate_keys": true},
    });
    mock.respond_json_with_query(
        "POST",
        &format!("/api/v1/secrets/public_cert/{SECRET_ID}"),
        ("action", "rotate"),
        200,
        fixtures::secret_envelope(vec![public_cert]),
    )
    .await;
    mock.respond_json_with_query(
        "POST",
        &format!("/api/v1/secrets/iam_credentials/{SECRET_ID}"),
        ("action", "restore"),
        200,
        fixtures::secret_envelope(vec![fixtures::iam_credentials_secret(SECRET_ID, "key")]),
    )
    .await;
    let client = client(&mock);

    let (rotated, _) = client
        .update_secret(&UpdateSecretOptions::new(
            secret_type::PUBLIC_CERT,
            SECRET_ID,
            action::ROTATE,
            SecretAction::rotate_public_cert(true),
        ))
        .await
        .unwrap();
    assert_eq!(rotated.first().map(SecretResource::secret_type), Some("public_cert"));

    client
        .update_secret(&UpdateSecretOptions::new(
            secret_type::IAM_CREDENTIALS,
            SECRET_ID,
            action::RESTORE,
            SecretAction::restore_iam_credentials("v"),
        ))
        .await
        .unwrap();

    let requests = mock.requests().await;
    assert_eq!(requests[0].body, br#"{"rotate_keys":true}"#);
    assert_eq!(requests[1].body, br#"{"version_id":"v"}"#);
}

#[tokio::test]
async fn test_groups_filter_is_comma_joined() {
    let mock = MockSecretsManager::start().await;
    mock.respond_json("GET", "/api/v1/secrets", 200, fixtures::secret_envelope(vec![]))
        .await;
    let client = client(&mock);

    let (secrets, _) = client
        .list_all_secrets(&ListAllSecretsOptions::new().with_groups(["g1", "g2", "default"]))
        .await
        .unwrap();
    assert!(secrets.is_empty());

    let requests = mock.requests().await;
    assert_eq!(requests[0].url.query(), Some("groups=g1,g2,default"));
}

#[tokio::test]
async fn test_search_spaces_are_percent_encoded() {
    let mock = MockSecretsManager::start().await;
    mock.respond_json("GET", "/api/v1/secrets", 200, fixtures::secret_envelope(vec![]))
        .await;
    let client = client(&mock);

    assert_ok!(
        client
            .list_all_secrets(&ListAllSecretsOptions::new().with_search("db creds"))
            .await
    );

    let requests = mock.requests().await;
    assert_eq!(requests[0].url.query(), Some("search=db%20creds"));
}

#[tokio::test]
async fn test_list_and_update_secret_groups() {
    let mock = MockSecretsManager::start().await;
    mock.respond_json(
        "GET",
        "/api/v1/secret_groups",
        200,
        fixtures::group_envelope(vec![
            fixtures::secret_group(GROUP_ID, "integration-group"),
            fixtures::secret_group("5f0b1c1e-0000-4000-8000-000000000002", "other-group"),
        ]),
    )
    .await;
    let mut renamed = fixtures::secret_group(GROUP_ID, "renamed-group");
    renamed["description"] = json!("Renamed for tests");
    mock.respond_json(
        "PUT",
        &format!("/api/v1/secret_groups/{GROUP_ID}"),
        200,
        fixtures::group_envelope(vec![renamed]),
    )
    .await;
    let client = client(&mock);

    let (groups, response) = client
        .list_secret_groups(&ListSecretGroupsOptions::new())
        .await
        .unwrap();
    assert_eq!(response.status_code, 200);
    assert_eq!(groups.metadata.collection_total, 2);
    let names: Vec<_> = groups.resources.iter().filter_map(|g| g.name.as_deref()).collect();
    assert_eq!(names, ["integration-group", "other-group"]);

    let (updated, _) = client
        .update_secret_group_metadata(&UpdateSecretGroupMetadataOptions::new(
            GROUP_ID,
            SecretGroupMetadataUpdatable::new()
                .with_name("renamed-group")
                .with_description("Renamed for tests"),
        ))
        .await
        .unwrap();
    assert_eq!(
        updated.first().and_then(|g| g.description.as_deref()),
        Some("Renamed for tests")
    );

    let requests = mock.requests().await;
    assert_eq!(requests[0].method.as_str(), "GET");
    assert!(requests[0].body.is_empty());
    assert_eq!(requests[1].method.as_str(), "PUT");
    assert_eq!(requests[1].url.path(), format!("/api/v1/secret_groups/{GROUP_ID}"));
    assert_eq!(
        mock.request_body(1).await.unwrap(),
        json!({
            "metadata": {
                "collection_type": "application/vnd.ibm.secrets-manager.secret.group+json",
                "collection_total": 1
            },
            "resources": [{"name": "renamed-group", "description": "Renamed for tests"}]
        })
    );
}

#[tokio::test]
async fn test_update_secret_metadata() {
    let mock = MockSecretsManager::start().await;
    let metadata_path = format!("/api/v1/secrets/kv/{SECRET_ID}/metadata");
    mock.respond_json(
        "PUT",
        &metadata_path,
        200,
        fixtures::secret_envelope(vec![json!({
            "id": SECRET_ID,
            "name": "kv-secret",
            "secret_type": "kv",
            "description": "Updated",
            "labels": ["team-a"],
            "state": 1,
            "creation_date": fixtures::CREATED_AT,
        })]),
    )
    .await;
    let client = client(&mock);

    let metadata = KvSecretMetadata::new("kv-secret")
        .with_description("Updated")
        .with_labels(["team-a"]);
    let (updated, _) = client
        .update_secret_metadata(&UpdateSecretMetadataOptions::new(SECRET_ID, metadata))
        .await
        .unwrap();
    let first = updated.first().unwrap();
    assert!(matches!(first, SecretMetadata::Kv(_)));
    assert_eq!(first.common().description.as_deref(), Some("Updated"));

    let requests = mock.requests().await;
    assert_eq!(requests[0].method.as_str(), "PUT");
    assert_eq!(requests[0].url.path(), metadata_path);
    let sent = mock.request_body(0).await.unwrap();
    assert_eq!(
        sent["metadata"]["collection_type"],
        "application/vnd.ibm.secrets-manager.secret+json"
    );
    assert_eq!(sent["metadata"]["collection_total"], 1);
    assert_eq!(
        sent["resources"][0],
        json!({
            "name": "kv-secret",
            "description": "Updated",
            "labels": ["team-a"],
            "secret_type": "kv"
        })
    );
}

#[tokio::test]
async fn test_username_only_in_secret_data() {
    let mock = MockSecretsManager::start().await;
    let mut secret =
        fixtures::username_password_secret(SECRET_ID, GROUP_ID, "test_user", "test_password", None);
    secret.as_object_mut().unwrap().remove("username");
    mock.respond_json(
        "GET",
        &format!("/api/v1/secrets/username_password/{SECRET_ID}"),
        200,
        fixtures::secret_envelope(vec![secret]),
    )
    .await;
    let client = client(&mock);

    let (fetched, _) = client
        .get_secret(&GetSecretOptions::new(secret_type::USERNAME_PASSWORD, SECRET_ID))
        .await
        .unwrap();
    let data = fetched.first().and_then(SecretResource::secret_data).unwrap();
    assert_eq!(data["username"], "test_user");
}

#[tokio::test]
async fn test_schema_mismatch_keeps_response() {
    let mock = MockSecretsManager::start().await;
    let mut secret = fixtures::arbitrary_secret(SECRET_ID, "n", "p");
    secret.as_object_mut().unwrap().remove("secret_type");
    mock.respond_json(
        "GET",
        &format!("/api/v1/secrets/arbitrary/{SECRET_ID}"),
        200,
        fixtures::secret_envelope(vec![secret]),
    )
    .await;
    let client = client(&mock);

    let err = client
        .get_secret(&GetSecretOptions::new(secret_type::ARBITRARY, SECRET_ID))
        .await
        .unwrap_err();
    match &err {
        SecretsManagerError::SchemaMismatch { path, .. } => {
            assert_eq!(path, "/resources/0/secret_type");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.status_code(), Some(200));
}

#[tokio::test]
async fn test_invalid_state_is_schema_mismatch() {
    let mock = MockSecretsManager::start().await;
    let mut secret = fixtures::arbitrary_secret(SECRET_ID, "n", "p");
    secret["state"] = json!(4);
    mock.respond_json(
        "GET",
        &format!("/api/v1/secrets/arbitrary/{SECRET_ID}"),
        200,
        fixtures::secret_envelope(vec![secret]),
    )
    .await;
    let client = client(&mock);

    let err = client
        .get_secret(&GetSecretOptions::new(secret_type::ARBITRARY, SECRET_ID))
        .await
        .unwrap_err();
    match err {
        SecretsManagerError::SchemaMismatch { path, .. } => assert_eq!(path, "/resources/0/state"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_empty_path_parameter_makes_no_call() {
    let mock = MockSecretsManager::start().await;
    let client = client(&mock);

    let err = client
        .get_secret(&GetSecretOptions::new(secret_type::ARBITRARY, ""))
        .await
        .unwrap_err();
    assert!(matches!(err, SecretsManagerError::InvalidArgument(_)));

    let err = client
        .delete_secret_group(&DeleteSecretGroupOptions::new(""))
        .await
        .unwrap_err();
    assert!(matches!(err, SecretsManagerError::InvalidArgument(_)));

    assert!(mock.requests().await.is_empty());
}

#[tokio::test]
async fn test_deadline_cancels_slow_call() {
    let mock = MockSecretsManager::start().await;
    mock.respond_slowly(
        "GET",
        &format!("/api/v1/secrets/arbitrary/{SECRET_ID}"),
        Duration::from_secs(5),
        fixtures::secret_envelope(vec![fixtures::arbitrary_secret(SECRET_ID, "n", "p")]),
    )
    .await;
    let client = client(&mock);

    let ctx = Context::background().with_timeout(Duration::from_millis(50));
    let err = client
        .get_secret_with_context(&GetSecretOptions::new(secret_type::ARBITRARY, SECRET_ID), &ctx)
        .await
        .unwrap_err();
    assert!(matches!(err, SecretsManagerError::Cancelled(_)));
}

#[tokio::test]
async fn test_cancelled_context_sends_nothing() {
    let mock = MockSecretsManager::start().await;
    let client = client(&mock);

    let ctx = Context::background();
    ctx.cancel();
    let err = client
        .list_all_secrets_with_context(&ListAllSecretsOptions::new(), &ctx)
        .await
        .unwrap_err();
    assert!(matches!(err, SecretsManagerError::Cancelled(_)));
    assert!(mock.requests().await.is_empty());
}

#[tokio::test]
async fn test_previous_version_by_alias() {
    let mock = MockSecretsManager::start().await;
    mock.respond_json(
        "GET",
        &format!("/api/v1/secrets/arbitrary/{SECRET_ID}/versions/previous"),
        200,
        fixtures::envelope(
            "application/vnd.ibm.secrets-manager.secret.version+json",
            vec![json!({"id": "v1", "auto_rotated": false, "secret_data": {"payload": "old"}})],
        ),
    )
    .await;
    let client = client(&mock);

    let (versions, _) = client
        .get_secret_version(&GetSecretVersionOptions::new(
            secret_type::ARBITRARY,
            SECRET_ID,
            VERSION_ID_PREVIOUS,
        ))
        .await
        .unwrap();
    match versions.first() {
        Some(version @ SecretVersion::Arbitrary(_)) => {
            assert_eq!(version.secret_data().unwrap()["payload"], "old");
        }
        other => panic!("unexpected version: {other:?}"),
    }
}

#[tokio::test]
async fn test_engine_config_is_bare_and_typed_by_path() {
    let mock = MockSecretsManager::start().await;
    mock.respond_empty("PUT", "/api/v1/config/iam_credentials", 204)
        .await;
    mock.respond_json(
        "GET",
        "/api/v1/config/iam_credentials",
        200,
        fixtures::envelope(
            "application/vnd.ibm.secrets-manager.config+json",
            vec![json!({"api_key": "key", "api_key_hash": "hash"})],
        ),
    )
    .await;
    let client = client(&mock);

    let response = client
        .put_config(&PutConfigOptions::new(
            secret_type::IAM_CREDENTIALS,
            EngineConfig::iam_credentials("key"),
        ))
        .await
        .unwrap();
    assert_eq!(response.status_code, 204);
    assert_eq!(mock.request_body(0).await, Some(json!({"api_key": "key"})));

    let (config, _) = client
        .get_config(&GetConfigOptions::new(secret_type::IAM_CREDENTIALS))
        .await
        .unwrap();
    match config.first() {
        Some(GetConfigResourcesItem::IamCredentials(root)) => {
            assert_eq!(root.api_key_hash.as_deref(), Some("hash"));
        }
        other => panic!("unexpected config: {other:?}"),
    }
}

#[tokio::test]
async fn test_config_elements() {
    let mock = MockSecretsManager::start().await;
    let route = "/api/v1/config/public_cert/dns_providers";
    let cis = json!({"cis_crn": "crn:v1:cis", "cis_apikey": "key"});
    mock.respond_json(
        "POST",
        route,
        200,
        fixtures::config_element_envelope("cis-dns", config_type::CIS, cis.clone()),
    )
    .await;
    mock.respond_json(
        "GET",
        route,
        200,
        fixtures::dns_providers_envelope(&[("cis-dns", config_type::CIS)]),
    )
    .await;
    mock.respond_json(
        "PUT",
        &format!("{route}/cis-dns"),
        200,
        fixtures::config_element_envelope(
            "cis-dns",
            config_type::LETSENCRYPT,
            json!({"private_key": "k", "cis_crn": "crn:v1:cis"}),
        ),
    )
    .await;
    let client = client(&mock);

    let config = ConfigElementDefConfig::CloudInternetServices(CloudInternetServicesConfig {
        cis_crn: "crn:v1:cis".into(),
        cis_apikey: Some("key".into()),
    });
    let element = ConfigElementDef::new("cis-dns", config_type::CIS, config.clone()).unwrap();
    let (created, _) = client
        .create_config_element(&CreateConfigElementOptions::new(
            secret_type::PUBLIC_CERT,
            config_element::DNS_PROVIDERS,
            element,
        ))
        .await
        .unwrap();
    assert_eq!(created.first().map(ConfigElementDef::config), Some(&config));
    assert_eq!(
        mock.request_body(0).await,
        Some(json!({"name": "cis-dns", "type": "cis", "config": cis}))
    );

    let (listed, _) = client
        .get_config_elements(&GetConfigElementsOptions::new(
            secret_type::PUBLIC_CERT,
            config_element::DNS_PROVIDERS,
        ))
        .await
        .unwrap();
    match listed.first() {
        Some(item @ GetConfigElementsResourcesItem::DnsProviders(_)) => {
            assert_eq!(item.elements()[0].name, "cis-dns");
        }
        other => panic!("unexpected listing: {other:?}"),
    }

    let update = ConfigElementUpdate::new(config_type::CIS, config).unwrap();
    let err = client
        .update_config_element(&UpdateConfigElementOptions::new(
            secret_type::PUBLIC_CERT,
            config_element::DNS_PROVIDERS,
            "cis-dns",
            update,
        ))
        .await
        .unwrap_err();
    match err {
        SecretsManagerError::SchemaMismatch { path, .. } => {
            assert_eq!(path, "/resources/0/config/cis_crn");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_per_call_headers_and_sdk_analytics() {
    let mock = MockSecretsManager::start().await;
    mock.respond_json(
        "GET",
        &format!("/api/v1/secrets/arbitrary/{SECRET_ID}"),
        200,
        fixtures::secret_envelope(vec![fixtures::arbitrary_secret(SECRET_ID, "n", "p")]),
    )
    .await;
    let client = client(&mock);

    client
        .get_secret(
            &GetSecretOptions::new(secret_type::ARBITRARY, SECRET_ID)
                .with_header("X-Correlation-Id", "abc-123"),
        )
        .await
        .unwrap();

    let requests = mock.requests().await;
    let header = |name: &str| {
        requests[0]
            .headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string)
    };
    assert_eq!(header("x-correlation-id").as_deref(), Some("abc-123"));
    assert_eq!(header("accept").as_deref(), Some("application/json"));
    assert!(header("x-ibmcloud-sdk-analytics").unwrap().contains("operation_id=GetSecret"));
}
