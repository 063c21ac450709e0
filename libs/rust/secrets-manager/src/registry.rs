//! Registry of every polymorphic family and its concrete variants.
//!
//! For each family the registry records where the discriminator comes from
//! (a body field, a path segment or query value supplied by the caller, or
//! field presence), which discriminator values select which variant, and the
//! fields each variant requires.

use std::fmt;
use thiserror::Error;

/// Values of the `secret_type` discriminator and path segment.
pub mod secret_type {
    /// Opaque caller-supplied payload
    pub const ARBITRARY: &str = "arbitrary";
    /// Server-generated service ID and API key
    pub const IAM_CREDENTIALS: &str = "iam_credentials";
    /// Uploaded X.509 certificate
    pub const IMPORTED_CERT: &str = "imported_cert";
    /// Key-value map
    pub const KV: &str = "kv";
    /// Certificate ordered from a certificate authority
    pub const PUBLIC_CERT: &str = "public_cert";
    /// Username and password pair
    pub const USERNAME_PASSWORD: &str = "username_password";
}

/// Values of the `config_element` path segment.
pub mod config_element {
    /// Certificate authority configurations
    pub const CERTIFICATE_AUTHORITIES: &str = "certificate_authorities";
    /// DNS provider configurations
    pub const DNS_PROVIDERS: &str = "dns_providers";
}

/// Values of the `type` field of a configuration element.
pub mod config_type {
    /// IBM Cloud Internet Services DNS provider
    pub const CIS: &str = "cis";
    /// Classic infrastructure DNS provider
    pub const CLASSIC_INFRASTRUCTURE: &str = "classic_infrastructure";
    /// Let's Encrypt production CA
    pub const LETSENCRYPT: &str = "letsencrypt";
    /// Let's Encrypt staging CA
    pub const LETSENCRYPT_STAGE: &str = "letsencrypt-stage";
}

/// Values of the `policy` query parameter.
pub mod policy {
    /// Rotation policy
    pub const ROTATION: &str = "rotation";
}

/// Values of the `action` query parameter.
pub mod action {
    /// Remove the credentials of an IAM credentials secret
    pub const DELETE_CREDENTIALS: &str = "delete_credentials";
    /// Restore a previous version
    pub const RESTORE: &str = "restore";
    /// Create a new version
    pub const ROTATE: &str = "rotate";
}

/// Values of a rotation policy `unit`.
pub mod rotation_unit {
    /// Days
    pub const DAY: &str = "day";
    /// Months
    pub const MONTH: &str = "month";
}

/// Values of a certificate `key_algorithm`.
pub mod key_algorithm {
    /// ECDSA P-256
    pub const EC256: &str = "EC256";
    /// ECDSA P-384
    pub const EC384: &str = "EC384";
    /// RSA 2048
    pub const RSA2048: &str = "RSA2048";
    /// RSA 4096
    pub const RSA4096: &str = "RSA4096";
}

/// Values of the `sort_by` query parameter.
pub mod sort_by {
    /// Sort by creation date
    pub const CREATION_DATE: &str = "creation_date";
    /// Sort by expiration date
    pub const EXPIRATION_DATE: &str = "expiration_date";
    /// Sort by ID
    pub const ID: &str = "id";
    /// Sort by name
    pub const NAME: &str = "name";
    /// Sort by secret type
    pub const SECRET_TYPE: &str = "secret_type";
}

/// A polymorphic family of the domain model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    /// Secret resources in create/get/list/update envelopes
    Secret,
    /// Secret metadata
    SecretMetadata,
    /// A single secret version with its payload
    SecretVersion,
    /// Entries of a version listing
    SecretVersionInfo,
    /// Metadata of a single version
    SecretVersionMetadata,
    /// Bodies of rotate/restore/delete-credentials actions
    SecretAction,
    /// The `rotation` member of a rotation policy
    PolicyRotation,
    /// Engine configuration written by `PutConfig`
    EngineConfig,
    /// The `config` member of a configuration element
    ConfigElementDefConfig,
    /// Resources returned by `GetConfig`
    GetConfigResourcesItem,
    /// Resources returned by `GetConfigElements`
    GetConfigElementsResourcesItem,
    /// Documents returned by `GetPolicy`/`PutPolicy`
    GetSecretPolicies,
}

/// Where a family's discriminator comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscriminatorSource {
    /// A field of the JSON object itself
    Field(&'static str),
    /// A path segment or query value the caller must pass in
    Context(&'static str),
    /// Which fields are present in the object
    Presence,
}

/// Static description of one concrete variant.
#[derive(Debug, PartialEq, Eq)]
pub struct VariantDescriptor {
    /// Family the variant belongs to
    pub family: Family,
    /// Variant name, as used in error messages
    pub name: &'static str,
    /// Discriminator values selecting this variant; the first is canonical
    pub discriminators: &'static [&'static str],
    /// Top-level JSON fields that must be present and non-null
    pub required: &'static [&'static str],
    /// Fields the caller must set when sending the variant, on top of
    /// `required`. Responses may carry them elsewhere.
    pub encode_required: &'static [&'static str],
    /// Fields specific to this variant
    pub fields: &'static [&'static str],
}

impl VariantDescriptor {
    /// The discriminator emitted for this variant.
    #[must_use]
    pub const fn canonical(&self) -> &'static str {
        self.discriminators[0]
    }
}

/// No variant of `family` answers to `discriminator`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {family} variant '{discriminator}'")]
pub struct UnknownVariant {
    /// Family that was searched
    pub family: Family,
    /// Discriminator value that matched nothing
    pub discriminator: String,
}

/// Implemented by every family type: maps a value back to its variant.
pub trait Discriminated {
    /// Family this type realizes.
    const FAMILY: Family;

    /// Descriptor of the variant this value holds.
    fn descriptor(&self) -> &'static VariantDescriptor;
}

/// The discriminator to embed for `value`.
#[must_use]
pub fn discriminator_of<T: Discriminated>(value: &T) -> &'static str {
    value.descriptor().canonical()
}

/// Look up the variant of `family` selected by `discriminator`.
///
/// # Errors
///
/// Returns [`UnknownVariant`] if no variant answers to `discriminator`.
pub fn resolve_variant(
    family: Family,
    discriminator: &str,
) -> Result<&'static VariantDescriptor, UnknownVariant> {
    family
        .variants()
        .iter()
        .find(|v| v.discriminators.contains(&discriminator))
        .ok_or_else(|| UnknownVariant {
            family,
            discriminator: discriminator.to_string(),
        })
}

/// Look up a variant by its name.
#[must_use]
pub fn variant_named(family: Family, name: &str) -> Option<&'static VariantDescriptor> {
    family.variants().iter().find(|v| v.name == name)
}

/// Discriminator of a secret action: the action plus the secret type.
#[must_use]
pub fn action_discriminator(action: &str, secret_type: &str) -> String {
    format!("{action}:{secret_type}")
}

impl Family {
    /// Family name used in messages.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Secret => "Secret",
            Self::SecretMetadata => "SecretMetadata",
            Self::SecretVersion => "SecretVersion",
            Self::SecretVersionInfo => "SecretVersionInfo",
            Self::SecretVersionMetadata => "SecretVersionMetadata",
            Self::SecretAction => "SecretAction",
            Self::PolicyRotation => "SecretPolicyRotation.rotation",
            Self::EngineConfig => "EngineConfig",
            Self::ConfigElementDefConfig => "ConfigElementDefConfig",
            Self::GetConfigResourcesItem => "GetConfigResourcesItem",
            Self::GetConfigElementsResourcesItem => "GetConfigElementsResourcesItem",
            Self::GetSecretPolicies => "GetSecretPolicies",
        }
    }

    /// Where the discriminator of this family comes from.
    #[must_use]
    pub const fn discriminator_source(self) -> DiscriminatorSource {
        match self {
            Self::Secret | Self::SecretMetadata => DiscriminatorSource::Field("secret_type"),
            Self::SecretVersion
            | Self::SecretVersionInfo
            | Self::SecretVersionMetadata
            | Self::EngineConfig
            | Self::GetConfigResourcesItem => DiscriminatorSource::Context("secret_type"),
            Self::SecretAction => DiscriminatorSource::Context("action:secret_type"),
            Self::ConfigElementDefConfig => DiscriminatorSource::Context("type"),
            Self::GetConfigElementsResourcesItem => DiscriminatorSource::Context("config_element"),
            Self::GetSecretPolicies => DiscriminatorSource::Context("policy"),
            Self::PolicyRotation => DiscriminatorSource::Presence,
        }
    }

    /// Whether fields of sibling variants are rejected rather than ignored.
    #[must_use]
    pub const fn rejects_foreign_fields(self) -> bool {
        matches!(self, Self::ConfigElementDefConfig | Self::PolicyRotation)
    }

    /// Every variant of this family.
    #[must_use]
    pub const fn variants(self) -> &'static [VariantDescriptor] {
        match self {
            Self::Secret => SECRET_VARIANTS,
            Self::SecretMetadata => SECRET_METADATA_VARIANTS,
            Self::SecretVersion => SECRET_VERSION_VARIANTS,
            Self::SecretVersionInfo => SECRET_VERSION_INFO_VARIANTS,
            Self::SecretVersionMetadata => SECRET_VERSION_METADATA_VARIANTS,
            Self::SecretAction => SECRET_ACTION_VARIANTS,
            Self::PolicyRotation => POLICY_ROTATION_VARIANTS,
            Self::EngineConfig => ENGINE_CONFIG_VARIANTS,
            Self::ConfigElementDefConfig => CONFIG_ELEMENT_DEF_CONFIG_VARIANTS,
            Self::GetConfigResourcesItem => GET_CONFIG_RESOURCES_VARIANTS,
            Self::GetConfigElementsResourcesItem => GET_CONFIG_ELEMENTS_VARIANTS,
            Self::GetSecretPolicies => GET_SECRET_POLICIES_VARIANTS,
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

const CERT_FIELDS: &[&str] = &[
    "serial_number",
    "algorithm",
    "key_algorithm",
    "issuer",
    "validity",
    "common_name",
    "intermediate_included",
    "private_key_included",
    "alt_names",
    "expiration_date",
];

/// `ArbitrarySecretResource`
pub const ARBITRARY_SECRET_RESOURCE: VariantDescriptor = VariantDescriptor {
    family: Family::Secret,
    name: "ArbitrarySecretResource",
    discriminators: &[secret_type::ARBITRARY],
    required: &["name"],
    encode_required: &[],
    fields: &["payload", "secret_data", "expiration_date"],
};

/// `UsernamePasswordSecretResource`
pub const USERNAME_PASSWORD_SECRET_RESOURCE: VariantDescriptor = VariantDescriptor {
    family: Family::Secret,
    name: "UsernamePasswordSecretResource",
    discriminators: &[secret_type::USERNAME_PASSWORD],
    required: &["name"],
    encode_required: &["username"],
    fields: &["username", "password", "secret_data", "expiration_date", "next_rotation_date"],
};

/// `IamCredentialsSecretResource`
pub const IAM_CREDENTIALS_SECRET_RESOURCE: VariantDescriptor = VariantDescriptor {
    family: Family::Secret,
    name: "IamCredentialsSecretResource",
    discriminators: &[secret_type::IAM_CREDENTIALS],
    required: &["name"],
    encode_required: &[],
    fields: &[
        "ttl",
        "access_groups",
        "api_key",
        "api_key_id",
        "service_id",
        "service_id_is_static",
        "reuse_api_key",
    ],
};

/// `CertificateSecretResource`
pub const CERTIFICATE_SECRET_RESOURCE: VariantDescriptor = VariantDescriptor {
    family: Family::Secret,
    name: "CertificateSecretResource",
    discriminators: &[secret_type::IMPORTED_CERT],
    required: &["name"],
    encode_required: &[],
    fields: &["certificate", "private_key", "intermediate", "secret_data"],
};

/// `PublicCertificateSecretResource`
pub const PUBLIC_CERTIFICATE_SECRET_RESOURCE: VariantDescriptor = VariantDescriptor {
    family: Family::Secret,
    name: "PublicCertificateSecretResource",
    discriminators: &[secret_type::PUBLIC_CERT],
    required: &["name", "common_name"],
    encode_required: &[],
    fields: &["bundle_certs", "ca", "dns", "rotation", "issuance_info", "secret_data"],
};

/// `KvSecretResource`
pub const KV_SECRET_RESOURCE: VariantDescriptor = VariantDescriptor {
    family: Family::Secret,
    name: "KvSecretResource",
    discriminators: &[secret_type::KV],
    required: &["name"],
    encode_required: &[],
    fields: &["payload", "secret_data"],
};

const SECRET_VARIANTS: &[VariantDescriptor] = &[
    ARBITRARY_SECRET_RESOURCE,
    USERNAME_PASSWORD_SECRET_RESOURCE,
    IAM_CREDENTIALS_SECRET_RESOURCE,
    CERTIFICATE_SECRET_RESOURCE,
    PUBLIC_CERTIFICATE_SECRET_RESOURCE,
    KV_SECRET_RESOURCE,
];

/// `ArbitrarySecretMetadata`
pub const ARBITRARY_SECRET_METADATA: VariantDescriptor = VariantDescriptor {
    family: Family::SecretMetadata,
    name: "ArbitrarySecretMetadata",
    discriminators: &[secret_type::ARBITRARY],
    required: &["name"],
    encode_required: &[],
    fields: &["expiration_date"],
};

/// `UsernamePasswordSecretMetadata`
pub const USERNAME_PASSWORD_SECRET_METADATA: VariantDescriptor = VariantDescriptor {
    family: Family::SecretMetadata,
    name: "UsernamePasswordSecretMetadata",
    discriminators: &[secret_type::USERNAME_PASSWORD],
    required: &["name"],
    encode_required: &[],
    fields: &["expiration_date", "next_rotation_date"],
};

/// `IamCredentialsSecretMetadata`
pub const IAM_CREDENTIALS_SECRET_METADATA: VariantDescriptor = VariantDescriptor {
    family: Family::SecretMetadata,
    name: "IamCredentialsSecretMetadata",
    discriminators: &[secret_type::IAM_CREDENTIALS],
    required: &["name"],
    encode_required: &[],
    fields: &["ttl", "reuse_api_key"],
};

/// `CertificateSecretMetadata`
pub const CERTIFICATE_SECRET_METADATA: VariantDescriptor = VariantDescriptor {
    family: Family::SecretMetadata,
    name: "CertificateSecretMetadata",
    discriminators: &[secret_type::IMPORTED_CERT],
    required: &["name"],
    encode_required: &[],
    fields: CERT_FIELDS,
};

/// `PublicCertSecretMetadata`
pub const PUBLIC_CERT_SECRET_METADATA: VariantDescriptor = VariantDescriptor {
    family: Family::SecretMetadata,
    name: "PublicCertSecretMetadata",
    discriminators: &[secret_type::PUBLIC_CERT],
    required: &["name"],
    encode_required: &[],
    fields: &["bundle_certs", "ca", "dns", "rotation", "issuance_info"],
};

/// `KvSecretMetadata`
pub const KV_SECRET_METADATA: VariantDescriptor = VariantDescriptor {
    family: Family::SecretMetadata,
    name: "KvSecretMetadata",
    discriminators: &[secret_type::KV],
    required: &["name"],
    encode_required: &[],
    fields: &[],
};

const SECRET_METADATA_VARIANTS: &[VariantDescriptor] = &[
    ARBITRARY_SECRET_METADATA,
    USERNAME_PASSWORD_SECRET_METADATA,
    IAM_CREDENTIALS_SECRET_METADATA,
    CERTIFICATE_SECRET_METADATA,
    PUBLIC_CERT_SECRET_METADATA,
    KV_SECRET_METADATA,
];

/// `ArbitrarySecretVersion`
pub const ARBITRARY_SECRET_VERSION: VariantDescriptor = VariantDescriptor {
    family: Family::SecretVersion,
    name: "ArbitrarySecretVersion",
    discriminators: &[secret_type::ARBITRARY],
    required: &["id"],
    encode_required: &[],
    fields: &["secret_data"],
};

/// `UsernamePasswordSecretVersion`
pub const USERNAME_PASSWORD_SECRET_VERSION: VariantDescriptor = VariantDescriptor {
    family: Family::SecretVersion,
    name: "UsernamePasswordSecretVersion",
    discriminators: &[secret_type::USERNAME_PASSWORD],
    required: &["id"],
    encode_required: &[],
    fields: &["secret_data"],
};

/// `IamCredentialsSecretVersion`
pub const IAM_CREDENTIALS_SECRET_VERSION: VariantDescriptor = VariantDescriptor {
    family: Family::SecretVersion,
    name: "IamCredentialsSecretVersion",
    discriminators: &[secret_type::IAM_CREDENTIALS],
    required: &["id"],
    encode_required: &[],
    fields: &["api_key_id", "service_id", "service_id_is_static", "secret_data"],
};

/// `CertificateSecretVersion`
pub const CERTIFICATE_SECRET_VERSION: VariantDescriptor = VariantDescriptor {
    family: Family::SecretVersion,
    name: "CertificateSecretVersion",
    discriminators: &["certificate", secret_type::IMPORTED_CERT, secret_type::PUBLIC_CERT],
    required: &["id"],
    encode_required: &[],
    fields: &["serial_number", "expiration_date", "validity", "secret_data"],
};

const SECRET_VERSION_VARIANTS: &[VariantDescriptor] = &[
    ARBITRARY_SECRET_VERSION,
    USERNAME_PASSWORD_SECRET_VERSION,
    IAM_CREDENTIALS_SECRET_VERSION,
    CERTIFICATE_SECRET_VERSION,
];

/// `ArbitrarySecretVersionInfo`
pub const ARBITRARY_SECRET_VERSION_INFO: VariantDescriptor = VariantDescriptor {
    family: Family::SecretVersionInfo,
    name: "ArbitrarySecretVersionInfo",
    discriminators: &[secret_type::ARBITRARY],
    required: &["id"],
    encode_required: &[],
    fields: &["payload_available", "downloaded"],
};

/// `UsernamePasswordSecretVersionInfo`
pub const USERNAME_PASSWORD_SECRET_VERSION_INFO: VariantDescriptor = VariantDescriptor {
    family: Family::SecretVersionInfo,
    name: "UsernamePasswordSecretVersionInfo",
    discriminators: &[secret_type::USERNAME_PASSWORD],
    required: &["id"],
    encode_required: &[],
    fields: &["payload_available", "downloaded"],
};

/// `IamCredentialsSecretVersionInfo`
pub const IAM_CREDENTIALS_SECRET_VERSION_INFO: VariantDescriptor = VariantDescriptor {
    family: Family::SecretVersionInfo,
    name: "IamCredentialsSecretVersionInfo",
    discriminators: &[secret_type::IAM_CREDENTIALS],
    required: &["id"],
    encode_required: &[],
    fields: &["payload_available", "downloaded"],
};

/// `CertificateSecretVersionInfo`
pub const CERTIFICATE_SECRET_VERSION_INFO: VariantDescriptor = VariantDescriptor {
    family: Family::SecretVersionInfo,
    name: "CertificateSecretVersionInfo",
    discriminators: &["certificate", secret_type::IMPORTED_CERT, secret_type::PUBLIC_CERT],
    required: &["id"],
    encode_required: &[],
    fields: &["serial_number", "expiration_date", "validity"],
};

const SECRET_VERSION_INFO_VARIANTS: &[VariantDescriptor] = &[
    ARBITRARY_SECRET_VERSION_INFO,
    USERNAME_PASSWORD_SECRET_VERSION_INFO,
    IAM_CREDENTIALS_SECRET_VERSION_INFO,
    CERTIFICATE_SECRET_VERSION_INFO,
];

/// `ArbitrarySecretVersionMetadata`
pub const ARBITRARY_SECRET_VERSION_METADATA: VariantDescriptor = VariantDescriptor {
    family: Family::SecretVersionMetadata,
    name: "ArbitrarySecretVersionMetadata",
    discriminators: &[secret_type::ARBITRARY],
    required: &["id"],
    encode_required: &[],
    fields: &["payload_available", "downloaded"],
};

/// `UsernamePasswordSecretVersionMetadata`
pub const USERNAME_PASSWORD_SECRET_VERSION_METADATA: VariantDescriptor = VariantDescriptor {
    family: Family::SecretVersionMetadata,
    name: "UsernamePasswordSecretVersionMetadata",
    discriminators: &[secret_type::USERNAME_PASSWORD],
    required: &["id"],
    encode_required: &[],
    fields: &["payload_available", "downloaded"],
};

/// `IamCredentialsSecretVersionMetadata`
pub const IAM_CREDENTIALS_SECRET_VERSION_METADATA: VariantDescriptor = VariantDescriptor {
    family: Family::SecretVersionMetadata,
    name: "IamCredentialsSecretVersionMetadata",
    discriminators: &[secret_type::IAM_CREDENTIALS],
    required: &["id"],
    encode_required: &[],
    fields: &["payload_available", "downloaded"],
};

/// `CertificateSecretVersionMetadata`
pub const CERTIFICATE_SECRET_VERSION_METADATA: VariantDescriptor = VariantDescriptor {
    family: Family::SecretVersionMetadata,
    name: "CertificateSecretVersionMetadata",
    discriminators: &["certificate", secret_type::IMPORTED_CERT, secret_type::PUBLIC_CERT],
    required: &["id"],
    encode_required: &[],
    fields: &["serial_number", "expiration_date", "validity"],
};

const SECRET_VERSION_METADATA_VARIANTS: &[VariantDescriptor] = &[
    ARBITRARY_SECRET_VERSION_METADATA,
    USERNAME_PASSWORD_SECRET_VERSION_METADATA,
    IAM_CREDENTIALS_SECRET_VERSION_METADATA,
    CERTIFICATE_SECRET_VERSION_METADATA,
];

/// `RotateArbitrarySecretBody`
pub const ROTATE_ARBITRARY_SECRET_BODY: VariantDescriptor = VariantDescriptor {
    family: Family::SecretAction,
    name: "RotateArbitrarySecretBody",
    discriminators: &["rotate:arbitrary"],
    required: &["payload"],
    encode_required: &[],
    fields: &["payload"],
};

/// `RotatePublicCertBody`
pub const ROTATE_PUBLIC_CERT_BODY: VariantDescriptor = VariantDescriptor {
    family: Family::SecretAction,
    name: "RotatePublicCertBody",
    discriminators: &["rotate:public_cert"],
    required: &["rotate_keys"],
    encode_required: &[],
    fields: &["rotate_keys"],
};

/// `RotateUsernamePasswordSecretBody`
pub const ROTATE_USERNAME_PASSWORD_SECRET_BODY: VariantDescriptor = VariantDescriptor {
    family: Family::SecretAction,
    name: "RotateUsernamePasswordSecretBody",
    discriminators: &["rotate:username_password"],
    required: &["password"],
    encode_required: &[],
    fields: &["password"],
};

/// `RotateCertificateBody`
pub const ROTATE_CERTIFICATE_BODY: VariantDescriptor = VariantDescriptor {
    family: Family::SecretAction,
    name: "RotateCertificateBody",
    discriminators: &["rotate:imported_cert"],
    required: &["certificate"],
    encode_required: &[],
    fields: &["certificate", "private_key", "intermediate"],
};

/// `RotateKvSecretBody`
pub const ROTATE_KV_SECRET_BODY: VariantDescriptor = VariantDescriptor {
    family: Family::SecretAction,
    name: "RotateKvSecretBody",
    discriminators: &["rotate:kv"],
    required: &["payload"],
    encode_required: &[],
    fields: &["payload"],
};

/// `RestoreIamCredentialsSecretBody`
pub const RESTORE_IAM_CREDENTIALS_SECRET_BODY: VariantDescriptor = VariantDescriptor {
    family: Family::SecretAction,
    name: "RestoreIamCredentialsSecretBody",
    discriminators: &["restore:iam_credentials"],
    required: &["version_id"],
    encode_required: &[],
    fields: &["version_id"],
};

/// `DeleteCredentialsForIamCredentialsSecret`
pub const DELETE_CREDENTIALS_FOR_IAM_CREDENTIALS_SECRET: VariantDescriptor = VariantDescriptor {
    family: Family::SecretAction,
    name: "DeleteCredentialsForIamCredentialsSecret",
    discriminators: &["delete_credentials:iam_credentials"],
    required: &[],
    encode_required: &[],
    fields: &["api_key_id", "service_id"],
};

const SECRET_ACTION_VARIANTS: &[VariantDescriptor] = &[
    ROTATE_ARBITRARY_SECRET_BODY,
    ROTATE_PUBLIC_CERT_BODY,
    ROTATE_USERNAME_PASSWORD_SECRET_BODY,
    ROTATE_CERTIFICATE_BODY,
    ROTATE_KV_SECRET_BODY,
    RESTORE_IAM_CREDENTIALS_SECRET_BODY,
    DELETE_CREDENTIALS_FOR_IAM_CREDENTIALS_SECRET,
];

/// Canonical discriminator of the interval/unit rotation variant.
pub const ROTATION_INTERVAL: &str = "interval";
/// Canonical discriminator of the public certificate rotation variant.
pub const ROTATION_PUBLIC_CERT: &str = "public_cert";

/// `IntervalRotation`
pub const INTERVAL_ROTATION: VariantDescriptor = VariantDescriptor {
    family: Family::PolicyRotation,
    name: "IntervalRotation",
    discriminators: &[ROTATION_INTERVAL],
    required: &["interval", "unit"],
    encode_required: &[],
    fields: &["interval", "unit"],
};

/// `PublicCertRotation`
pub const PUBLIC_CERT_ROTATION: VariantDescriptor = VariantDescriptor {
    family: Family::PolicyRotation,
    name: "PublicCertRotation",
    discriminators: &[ROTATION_PUBLIC_CERT],
    required: &["auto_rotate", "rotate_keys"],
    encode_required: &[],
    fields: &["auto_rotate", "rotate_keys"],
};

const POLICY_ROTATION_VARIANTS: &[VariantDescriptor] = &[INTERVAL_ROTATION, PUBLIC_CERT_ROTATION];

/// `IamCredentialsEngineConfig`
pub const IAM_CREDENTIALS_ENGINE_CONFIG: VariantDescriptor = VariantDescriptor {
    family: Family::EngineConfig,
    name: "IamCredentialsEngineConfig",
    discriminators: &[secret_type::IAM_CREDENTIALS],
    required: &["api_key"],
    encode_required: &[],
    fields: &["api_key"],
};

const ENGINE_CONFIG_VARIANTS: &[VariantDescriptor] = &[IAM_CREDENTIALS_ENGINE_CONFIG];

/// `LetsEncryptConfig`
pub const LETS_ENCRYPT_CONFIG: VariantDescriptor = VariantDescriptor {
    family: Family::ConfigElementDefConfig,
    name: "LetsEncryptConfig",
    discriminators: &[config_type::LETSENCRYPT, config_type::LETSENCRYPT_STAGE],
    required: &["private_key"],
    encode_required: &[],
    fields: &["private_key"],
};

/// `CloudInternetServicesConfig`
pub const CLOUD_INTERNET_SERVICES_CONFIG: VariantDescriptor = VariantDescriptor {
    family: Family::ConfigElementDefConfig,
    name: "CloudInternetServicesConfig",
    discriminators: &[config_type::CIS],
    required: &["cis_crn"],
    encode_required: &[],
    fields: &["cis_crn", "cis_apikey"],
};

/// `ClassicInfrastructureConfig`
pub const CLASSIC_INFRASTRUCTURE_CONFIG: VariantDescriptor = VariantDescriptor {
    family: Family::ConfigElementDefConfig,
    name: "ClassicInfrastructureConfig",
    discriminators: &[config_type::CLASSIC_INFRASTRUCTURE],
    required: &["classic_infrastructure_username", "classic_infrastructure_password"],
    encode_required: &[],
    fields: &["classic_infrastructure_username", "classic_infrastructure_password"],
};

const CONFIG_ELEMENT_DEF_CONFIG_VARIANTS: &[VariantDescriptor] = &[
    LETS_ENCRYPT_CONFIG,
    CLOUD_INTERNET_SERVICES_CONFIG,
    CLASSIC_INFRASTRUCTURE_CONFIG,
];

/// `PublicCertSecretEngineRootConfig`
pub const PUBLIC_CERT_SECRET_ENGINE_ROOT_CONFIG: VariantDescriptor = VariantDescriptor {
    family: Family::GetConfigResourcesItem,
    name: "PublicCertSecretEngineRootConfig",
    discriminators: &[secret_type::PUBLIC_CERT],
    required: &[],
    encode_required: &[],
    fields: &["certificate_authorities", "dns_providers"],
};

/// `IamCredentialsSecretEngineRootConfig`
pub const IAM_CREDENTIALS_SECRET_ENGINE_ROOT_CONFIG: VariantDescriptor = VariantDescriptor {
    family: Family::GetConfigResourcesItem,
    name: "IamCredentialsSecretEngineRootConfig",
    discriminators: &[secret_type::IAM_CREDENTIALS],
    required: &["api_key"],
    encode_required: &[],
    fields: &["api_key", "api_key_hash"],
};

const GET_CONFIG_RESOURCES_VARIANTS: &[VariantDescriptor] = &[
    PUBLIC_CERT_SECRET_ENGINE_ROOT_CONFIG,
    IAM_CREDENTIALS_SECRET_ENGINE_ROOT_CONFIG,
];

/// `CertificateAuthoritiesConfig`
pub const CERTIFICATE_AUTHORITIES_CONFIG: VariantDescriptor = VariantDescriptor {
    family: Family::GetConfigElementsResourcesItem,
    name: "CertificateAuthoritiesConfig",
    discriminators: &[config_element::CERTIFICATE_AUTHORITIES],
    required: &["certificate_authorities"],
    encode_required: &[],
    fields: &["certificate_authorities"],
};

/// `DnsProvidersConfig`
pub const DNS_PROVIDERS_CONFIG: VariantDescriptor = VariantDescriptor {
    family: Family::GetConfigElementsResourcesItem,
    name: "DnsProvidersConfig",
    discriminators: &[config_element::DNS_PROVIDERS],
    required: &["dns_providers"],
    encode_required: &[],
    fields: &["dns_providers"],
};

const GET_CONFIG_ELEMENTS_VARIANTS: &[VariantDescriptor] = &[
    CERTIFICATE_AUTHORITIES_CONFIG,
    DNS_PROVIDERS_CONFIG,
];

/// `GetSecretPolicyRotation`
pub const GET_SECRET_POLICY_ROTATION: VariantDescriptor = VariantDescriptor {
    family: Family::GetSecretPolicies,
    name: "GetSecretPolicyRotation",
    discriminators: &[policy::ROTATION],
    required: &["metadata", "resources"],
    encode_required: &[],
    fields: &["metadata", "resources"],
};

const GET_SECRET_POLICIES_VARIANTS: &[VariantDescriptor] = &[GET_SECRET_POLICY_ROTATION];

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: &[Family] = &[
        Family::Secret,
        Family::SecretMetadata,
        Family::SecretVersion,
        Family::SecretVersionInfo,
        Family::SecretVersionMetadata,
        Family::SecretAction,
        Family::PolicyRotation,
        Family::EngineConfig,
        Family::ConfigElementDefConfig,
        Family::GetConfigResourcesItem,
        Family::GetConfigElementsResourcesItem,
        Family::GetSecretPolicies,
    ];

    #[test]
    fn test_tables_are_consistent() {
        for family in ALL {
            for variant in family.variants() {
                assert_eq!(variant.family, *family, "{}", variant.name);
                assert!(!variant.discriminators.is_empty(), "{}", variant.name);
                for value in variant.discriminators {
                    assert_eq!(resolve_variant(*family, value).map(|v| v.name), Ok(variant.name));
                }
            }
        }
    }

    #[test]
    fn test_secret_type_resolution() {
        for kind in [
            secret_type::ARBITRARY,
            secret_type::IAM_CREDENTIALS,
            secret_type::IMPORTED_CERT,
            secret_type::KV,
            secret_type::PUBLIC_CERT,
            secret_type::USERNAME_PASSWORD,
        ] {
            assert_eq!(resolve_variant(Family::Secret, kind).map(VariantDescriptor::canonical), Ok(kind));
        }
    }

    #[test]
    fn test_versions_collapse_certificates() {
        let imported = resolve_variant(Family::SecretVersion, secret_type::IMPORTED_CERT).unwrap();
        let public = resolve_variant(Family::SecretVersion, secret_type::PUBLIC_CERT).unwrap();
        assert_eq!(imported.name, public.name);
        assert_eq!(imported.canonical(), "certificate");
        assert!(resolve_variant(Family::SecretVersion, secret_type::KV).is_err());
    }

    #[test]
    fn test_letsencrypt_stage_shares_variant() {
        let stage = resolve_variant(Family::ConfigElementDefConfig, config_type::LETSENCRYPT_STAGE)
            .unwrap();
        assert_eq!(stage.canonical(), config_type::LETSENCRYPT);
    }

    #[test]
    fn test_unknown_variant() {
        let err = resolve_variant(Family::Secret, "ssh_key").unwrap_err();
        assert_eq!(err.to_string(), "unknown Secret variant 'ssh_key'");
    }

    #[test]
    fn test_encode_only_fields_are_not_decode_required() {
        let variant = resolve_variant(Family::Secret, secret_type::USERNAME_PASSWORD).unwrap();
        assert_eq!(variant.required, &["name"]);
        assert_eq!(variant.encode_required, &["username"]);
        for family in ALL {
            for variant in family.variants() {
                for field in variant.encode_required {
                    assert!(!variant.required.contains(field), "{}.{field}", variant.name);
                }
            }
        }
    }

    #[test]
    fn test_action_discriminator() {
        let key = action_discriminator(action::RESTORE, secret_type::IAM_CREDENTIALS);
        assert_eq!(
            resolve_variant(Family::SecretAction, &key).map(|v| v.name),
            Ok("RestoreIamCredentialsSecretBody")
        );
    }
}
