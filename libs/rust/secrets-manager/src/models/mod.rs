//! Domain model of the Secrets Manager API.

pub mod action;
pub mod common;
pub mod config;
pub mod metadata;
pub mod policy;
pub mod secret;
pub mod secret_group;
pub mod version;

pub use action::{
    DeleteCredentialsForIamCredentialsSecret, RestoreIamCredentialsSecretBody,
    RotateArbitrarySecretBody, RotateCertificateBody, RotateKvSecretBody, RotatePublicCertBody,
    RotateUsernamePasswordSecretBody, SecretAction,
};
pub use common::{
    CertificateValidity, ConfigElementMetadata, IssuanceInfo, Rotation, SecretState, Ttl,
};
pub use config::{
    CertificateAuthoritiesConfig, ClassicInfrastructureConfig, CloudInternetServicesConfig,
    ConfigElementDef, ConfigElementDefConfig, ConfigElementUpdate, DnsProvidersConfig,
    EngineConfig, GetConfigElementsResourcesItem, GetConfigResourcesItem,
    IamCredentialsEngineConfig, IamCredentialsSecretEngineRootConfig, LetsEncryptConfig,
    PublicCertSecretEngineRootConfig,
};
pub use metadata::{
    ArbitrarySecretMetadata, CertificateSecretMetadata, IamCredentialsSecretMetadata,
    KvSecretMetadata, PublicCertSecretMetadata, SecretMetadata, UsernamePasswordSecretMetadata,
};
pub use policy::{
    GetSecretPolicies, GetSecretPolicyRotation, IntervalRotation, PolicyRotation,
    PublicCertRotation, SecretPolicyRotation, SecretPolicyRotationResource,
};
pub use secret::{
    ArbitrarySecretResource, CertificateSecretResource, IamCredentialsSecretResource,
    KvSecretResource, PublicCertificateSecretResource, SecretCommon, SecretResource,
    UsernamePasswordSecretResource,
};
pub use secret_group::{SecretGroupMetadataUpdatable, SecretGroupResource};
pub use version::{
    CertificateSecretVersion, CertificateVersionDetails, IamCredentialsSecretVersion,
    SecretVersion, SecretVersionDetails, SecretVersionInfo, SecretVersionMetadata,
    SecretVersionPayload, VersionCommon,
};
