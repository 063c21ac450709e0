//! Proptest generators for the Secrets Manager resource families.
//!
//! Generated resources always carry the fields their variant requires, so
//! they encode without error.

use chrono::{DateTime, Utc};
use proptest::collection::{btree_map, vec};
use proptest::prelude::*;
use secrets_manager_sdk::models::{
    ArbitrarySecretResource, CertificateAuthoritiesConfig, CertificateSecretVersion,
    CertificateValidity, CertificateVersionDetails, ClassicInfrastructureConfig,
    CloudInternetServicesConfig, ConfigElementDef, ConfigElementDefConfig, ConfigElementMetadata,
    DeleteCredentialsForIamCredentialsSecret, DnsProvidersConfig, EngineConfig,
    GetConfigElementsResourcesItem, GetConfigResourcesItem, IamCredentialsSecretEngineRootConfig,
    IamCredentialsSecretResource, IamCredentialsSecretVersion, KvSecretMetadata,
    KvSecretResource, LetsEncryptConfig, PolicyRotation, PublicCertSecretEngineRootConfig,
    PublicCertificateSecretResource, RotateCertificateBody, RotateKvSecretBody,
    RotatePublicCertBody, SecretAction, SecretCommon, SecretGroupResource, SecretMetadata,
    SecretResource, SecretState, SecretVersion, SecretVersionDetails, SecretVersionInfo,
    SecretVersionMetadata, SecretVersionPayload, UsernamePasswordSecretMetadata,
    UsernamePasswordSecretResource, VersionCommon,
};
use secrets_manager_sdk::options::{config_type, key_algorithm, rotation_unit};
use serde_json::{Map, Value};

/// Generate resource names.
pub fn name_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9-]{2,30}"
}

/// Generate UUIDs in their text form.
pub fn uuid_strategy() -> impl Strategy<Value = String> {
    any::<u128>().prop_map(|n| uuid::Uuid::from_u128(n).to_string())
}

/// Generate label lists.
pub fn labels_strategy() -> impl Strategy<Value = Vec<String>> {
    vec("[a-z0-9_-]{1,12}", 0..4)
}

/// Generate valid secret states.
pub fn secret_state_strategy() -> impl Strategy<Value = SecretState> {
    prop_oneof![
        Just(SecretState::PRE_ACTIVATION),
        Just(SecretState::ACTIVE),
        Just(SecretState::SUSPENDED),
        Just(SecretState::DEACTIVATED),
        Just(SecretState::DESTROYED),
    ]
}

/// Generate whole-second timestamps between 1970 and 2100.
pub fn timestamp_strategy() -> impl Strategy<Value = DateTime<Utc>> {
    (0i64..4_102_444_800).prop_map(|secs| DateTime::from_timestamp(secs, 0).unwrap_or_default())
}

/// Generate JSON scalars.
pub fn scalar_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        "[ -~]{0,20}".prop_map(Value::String),
    ]
}

/// Generate maps of extension fields whose keys do not collide with known
/// secret group fields.
pub fn extension_map_strategy() -> impl Strategy<Value = Map<String, Value>> {
    btree_map("x_[a-z]{1,10}", scalar_strategy(), 0..5)
        .prop_map(|entries| entries.into_iter().collect())
}

/// Generate the fields every secret carries.
pub fn secret_common_strategy() -> impl Strategy<Value = SecretCommon> {
    (
        proptest::option::of(uuid_strategy()),
        name_strategy(),
        proptest::option::of("[ -~]{0,40}"),
        proptest::option::of(labels_strategy()),
        proptest::option::of(secret_state_strategy()),
        proptest::option::of(timestamp_strategy()),
        proptest::option::of(uuid_strategy()),
    )
        .prop_map(
            |(id, name, description, labels, state, creation_date, secret_group_id)| {
                SecretCommon {
                    id,
                    name: Some(name),
                    description,
                    labels,
                    state_description: state.map(|s| s.description().to_string()),
                    state,
                    creation_date,
                    secret_group_id,
                    ..SecretCommon::default()
                }
            },
        )
}

/// Generate secrets of every type.
pub fn secret_resource_strategy() -> impl Strategy<Value = SecretResource> {
    prop_oneof![
        (secret_common_strategy(), "[ -~]{0,64}", proptest::option::of(timestamp_strategy()))
            .prop_map(|(common, payload, expiration_date)| {
                SecretResource::Arbitrary(ArbitrarySecretResource {
                    common,
                    payload: Some(payload),
                    expiration_date,
                    ..ArbitrarySecretResource::default()
                })
            }),
        (secret_common_strategy(), "[a-z_]{1,16}", proptest::option::of("[ -~]{8,24}"))
            .prop_map(|(common, username, password)| {
                SecretResource::UsernamePassword(UsernamePasswordSecretResource {
                    common,
                    username: Some(username),
                    password,
                    ..UsernamePasswordSecretResource::default()
                })
            }),
        (secret_common_strategy(), 60i64..7_776_000, any::<bool>()).prop_map(
            |(common, ttl, reuse)| {
                SecretResource::IamCredentials(IamCredentialsSecretResource {
                    common,
                    ttl: Some(ttl.into()),
                    access_groups: Some(vec!["AccessGroupId-0".to_string()]),
                    reuse_api_key: Some(reuse),
                    ..IamCredentialsSecretResource::default()
                })
            }
        ),
        (secret_common_strategy(), "[a-z]{1,12}\\.example\\.com").prop_map(|(common, cn)| {
            SecretResource::PublicCert(PublicCertificateSecretResource {
                common,
                common_name: Some(cn),
                key_algorithm: Some(key_algorithm::RSA2048.to_string()),
                ..PublicCertificateSecretResource::default()
            })
        }),
        (secret_common_strategy(), btree_map("[a-z]{1,8}", scalar_strategy(), 1..4)).prop_map(
            |(common, payload)| {
                SecretResource::Kv(KvSecretResource {
                    common,
                    payload: Some(payload.into_iter().collect()),
                    ..KvSecretResource::default()
                })
            }
        ),
    ]
}

/// Generate secret metadata of two representative types.
pub fn secret_metadata_strategy() -> impl Strategy<Value = SecretMetadata> {
    prop_oneof![
        secret_common_strategy()
            .prop_map(|common| SecretMetadata::Kv(KvSecretMetadata { common })),
        (secret_common_strategy(), proptest::option::of(timestamp_strategy())).prop_map(
            |(common, next_rotation_date)| {
                SecretMetadata::UsernamePassword(UsernamePasswordSecretMetadata {
                    common,
                    next_rotation_date,
                    ..UsernamePasswordSecretMetadata::default()
                })
            }
        ),
    ]
}

/// Generate secret groups with extension fields.
pub fn secret_group_strategy() -> impl Strategy<Value = SecretGroupResource> {
    (
        name_strategy(),
        proptest::option::of(uuid_strategy()),
        extension_map_strategy(),
    )
        .prop_map(|(name, id, extensions)| {
            let mut group = SecretGroupResource::new(name);
            group.id = id;
            for (key, value) in extensions {
                group.set_property(key, value);
            }
            group
        })
}

/// Generate rotation schedules of both shapes.
pub fn policy_rotation_strategy() -> impl Strategy<Value = PolicyRotation> {
    prop_oneof![
        (1i64..=12, prop_oneof![Just(rotation_unit::DAY), Just(rotation_unit::MONTH)])
            .prop_map(|(interval, unit)| PolicyRotation::every(interval, unit)),
        (any::<bool>(), any::<bool>())
            .prop_map(|(auto, keys)| PolicyRotation::public_cert(auto, keys)),
    ]
}

/// Generate configuration elements of every type.
pub fn config_element_def_strategy() -> impl Strategy<Value = ConfigElementDef> {
    let config = prop_oneof![
        "[A-Za-z0-9]{16,32}".prop_map(|private_key| {
            (
                config_type::LETSENCRYPT,
                ConfigElementDefConfig::LetsEncrypt(LetsEncryptConfig { private_key }),
            )
        }),
        ("crn:v1:[a-z0-9:]{4,20}", proptest::option::of("[A-Za-z0-9]{8,16}")).prop_map(
            |(cis_crn, cis_apikey)| {
                (
                    config_type::CIS,
                    ConfigElementDefConfig::CloudInternetServices(CloudInternetServicesConfig {
                        cis_crn,
                        cis_apikey,
                    }),
                )
            }
        ),
        ("[a-z]{4,12}", "[A-Za-z0-9]{8,16}").prop_map(|(username, password)| {
            (
                config_type::CLASSIC_INFRASTRUCTURE,
                ConfigElementDefConfig::ClassicInfrastructure(ClassicInfrastructureConfig {
                    classic_infrastructure_username: username,
                    classic_infrastructure_password: password,
                }),
            )
        }),
    ];
    (name_strategy(), config).prop_filter_map("type matches config", |(name, (kind, config))| {
        ConfigElementDef::new(name, kind, config).ok()
    })
}

/// Generate the fields every version carries.
pub fn version_common_strategy() -> impl Strategy<Value = VersionCommon> {
    (
        uuid_strategy(),
        proptest::option::of(timestamp_strategy()),
        proptest::option::of("[a-z0-9-]{4,20}"),
        proptest::option::of(any::<bool>()),
    )
        .prop_map(|(id, creation_date, created_by, auto_rotated)| VersionCommon {
            creation_date,
            created_by,
            auto_rotated,
            ..VersionCommon::new(id)
        })
}

fn secret_data_strategy() -> impl Strategy<Value = Map<String, Value>> {
    btree_map("[a-z_]{1,10}", scalar_strategy(), 0..4)
        .prop_map(|entries| entries.into_iter().collect())
}

fn validity_strategy() -> impl Strategy<Value = CertificateValidity> {
    (
        proptest::option::of(timestamp_strategy()),
        proptest::option::of(timestamp_strategy()),
    )
        .prop_map(|(not_before, not_after)| CertificateValidity {
            not_before,
            not_after,
        })
}

fn serial_number_strategy() -> impl Strategy<Value = String> {
    "[0-9a-f]{2}(:[0-9a-f]{2}){3,7}"
}

fn version_payload_strategy() -> impl Strategy<Value = SecretVersionPayload> {
    (version_common_strategy(), proptest::option::of(secret_data_strategy())).prop_map(
        |(common, secret_data)| SecretVersionPayload {
            common,
            secret_data,
        },
    )
}

/// Generate versions with their payload, one per version variant.
pub fn secret_version_strategy() -> impl Strategy<Value = SecretVersion> {
    prop_oneof![
        version_payload_strategy().prop_map(SecretVersion::Arbitrary),
        version_payload_strategy().prop_map(SecretVersion::UsernamePassword),
        (
            version_common_strategy(),
            proptest::option::of("ApiKey-[a-z0-9]{8}"),
            proptest::option::of("ServiceId-[a-z0-9]{8}"),
            proptest::option::of(any::<bool>()),
        )
            .prop_map(|(common, api_key_id, service_id, service_id_is_static)| {
                SecretVersion::IamCredentials(IamCredentialsSecretVersion {
                    common,
                    api_key_id,
                    service_id,
                    service_id_is_static,
                    secret_data: None,
                })
            }),
        (
            version_common_strategy(),
            proptest::option::of(serial_number_strategy()),
            proptest::option::of(timestamp_strategy()),
            proptest::option::of(validity_strategy()),
        )
            .prop_map(|(common, serial_number, expiration_date, validity)| {
                SecretVersion::Certificate(CertificateSecretVersion {
                    common,
                    serial_number,
                    expiration_date,
                    validity,
                    secret_data: None,
                })
            }),
    ]
}

fn version_details_strategy() -> impl Strategy<Value = SecretVersionDetails> {
    (
        version_common_strategy(),
        proptest::option::of(any::<bool>()),
        proptest::option::of(any::<bool>()),
    )
        .prop_map(|(common, payload_available, downloaded)| SecretVersionDetails {
            common,
            payload_available,
            downloaded,
        })
}

fn certificate_details_strategy() -> impl Strategy<Value = CertificateVersionDetails> {
    (
        version_common_strategy(),
        proptest::option::of(serial_number_strategy()),
        proptest::option::of(timestamp_strategy()),
        proptest::option::of(validity_strategy()),
    )
        .prop_map(|(common, serial_number, expiration_date, validity)| {
            CertificateVersionDetails {
                common,
                serial_number,
                expiration_date,
                validity,
            }
        })
}

/// Generate version listing entries of every variant.
pub fn secret_version_info_strategy() -> impl Strategy<Value = SecretVersionInfo> {
    prop_oneof![
        version_details_strategy().prop_map(SecretVersionInfo::Arbitrary),
        version_details_strategy().prop_map(SecretVersionInfo::UsernamePassword),
        version_details_strategy().prop_map(SecretVersionInfo::IamCredentials),
        certificate_details_strategy().prop_map(SecretVersionInfo::Certificate),
    ]
}

/// Generate version metadata of every variant.
pub fn secret_version_metadata_strategy() -> impl Strategy<Value = SecretVersionMetadata> {
    prop_oneof![
        version_details_strategy().prop_map(SecretVersionMetadata::Arbitrary),
        version_details_strategy().prop_map(SecretVersionMetadata::UsernamePassword),
        version_details_strategy().prop_map(SecretVersionMetadata::IamCredentials),
        certificate_details_strategy().prop_map(SecretVersionMetadata::Certificate),
    ]
}

/// Generate `UpdateSecret` bodies of every action.
pub fn secret_action_strategy() -> impl Strategy<Value = SecretAction> {
    prop_oneof![
        "[ -~]{1,64}".prop_map(SecretAction::rotate_arbitrary),
        any::<bool>().prop_map(|rotate_keys| {
            SecretAction::RotatePublicCert(RotatePublicCertBody { rotate_keys })
        }),
        "[ -~]{8,24}".prop_map(SecretAction::rotate_username_password),
        ("-----BEGIN CERTIFICATE-----[A-Za-z0-9]{8,32}", proptest::option::of("[A-Za-z0-9]{8,32}"))
            .prop_map(|(certificate, private_key)| {
                let mut body = RotateCertificateBody::new(certificate);
                body.private_key = private_key;
                SecretAction::RotateCertificate(body)
            }),
        btree_map("[a-z]{1,8}", scalar_strategy(), 1..4).prop_map(|payload| {
            SecretAction::RotateKv(RotateKvSecretBody {
                payload: payload.into_iter().collect(),
            })
        }),
        uuid_strategy().prop_map(SecretAction::restore_iam_credentials),
        proptest::option::of("ApiKey-[a-z0-9]{8}").prop_map(|api_key_id| {
            SecretAction::DeleteCredentials(DeleteCredentialsForIamCredentialsSecret {
                api_key_id,
                service_id: None,
            })
        }),
    ]
}

/// Generate `PutConfig` bodies.
pub fn engine_config_strategy() -> impl Strategy<Value = EngineConfig> {
    "[A-Za-z0-9_-]{16,44}".prop_map(EngineConfig::iam_credentials)
}

fn config_element_metadata_strategy() -> impl Strategy<Value = ConfigElementMetadata> {
    (
        name_strategy(),
        prop_oneof![
            Just(config_type::LETSENCRYPT),
            Just(config_type::LETSENCRYPT_STAGE),
            Just(config_type::CIS),
            Just(config_type::CLASSIC_INFRASTRUCTURE),
        ],
    )
        .prop_map(|(name, kind)| ConfigElementMetadata {
            name,
            config_type: kind.to_string(),
        })
}

/// Generate `GetConfig` resources of both engines.
pub fn get_config_resources_item_strategy() -> impl Strategy<Value = GetConfigResourcesItem> {
    prop_oneof![
        (
            proptest::option::of(vec(config_element_metadata_strategy(), 0..3)),
            proptest::option::of(vec(config_element_metadata_strategy(), 0..3)),
        )
            .prop_map(|(certificate_authorities, dns_providers)| {
                GetConfigResourcesItem::PublicCert(PublicCertSecretEngineRootConfig {
                    certificate_authorities,
                    dns_providers,
                })
            }),
        ("[A-Za-z0-9_-]{16,44}", proptest::option::of("[0-9a-f]{64}")).prop_map(
            |(api_key, api_key_hash)| {
                GetConfigResourcesItem::IamCredentials(IamCredentialsSecretEngineRootConfig {
                    api_key,
                    api_key_hash,
                })
            }
        ),
    ]
}

/// Generate `GetConfigElements` resources of both element kinds.
pub fn get_config_elements_resources_item_strategy()
-> impl Strategy<Value = GetConfigElementsResourcesItem> {
    prop_oneof![
        vec(config_element_metadata_strategy(), 0..4).prop_map(|certificate_authorities| {
            GetConfigElementsResourcesItem::CertificateAuthorities(CertificateAuthoritiesConfig {
                certificate_authorities,
            })
        }),
        vec(config_element_metadata_strategy(), 0..4).prop_map(|dns_providers| {
            GetConfigElementsResourcesItem::DnsProviders(DnsProvidersConfig { dns_providers })
        }),
    ]
}

/// Generate query values, including characters that need escaping.
pub fn query_value_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 &=/?+%-]{1,16}"
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::strategy::ValueTree;
    use proptest::test_runner::TestRunner;

    #[test]
    fn test_generated_secrets_are_named() {
        let mut runner = TestRunner::default();
        for _ in 0..20 {
            let secret = secret_resource_strategy()
                .new_tree(&mut runner)
                .unwrap()
                .current();
            assert!(secret.common().name.is_some());
        }
    }

    #[test]
    fn test_extension_keys_are_prefixed() {
        let mut runner = TestRunner::default();
        for _ in 0..10 {
            let map = extension_map_strategy()
                .new_tree(&mut runner)
                .unwrap()
                .current();
            assert!(map.keys().all(|k| k.starts_with("x_")));
        }
    }

    #[test]
    fn test_uuid_format() {
        let mut runner = TestRunner::default();
        let value = uuid_strategy().new_tree(&mut runner).unwrap().current();
        assert_eq!(value.len(), 36);
        assert_eq!(value.matches('-').count(), 4);
    }
}
