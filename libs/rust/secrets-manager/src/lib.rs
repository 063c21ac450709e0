//! Client SDK for the Secrets Manager V1 REST API.
//!
//! Most of the API is polymorphic: one endpoint creates arbitrary secrets,
//! certificates or IAM credentials depending on a path segment, and one
//! action endpoint takes a different body per action and secret type. The
//! [`registry`] names every variant and how it is selected; [`codec`]
//! encodes and decodes the [`models`] through it, wrapped in the
//! [`envelope`] the service uses for most bodies.
//!
//! ```no_run
//! use sdk_core::IamAuthenticator;
//! use secrets_manager_sdk::models::ArbitrarySecretResource;
//! use secrets_manager_sdk::options::{CreateSecretOptions, GetSecretOptions, secret_type};
//! use secrets_manager_sdk::{SecretsManagerV1, SecretsManagerV1Options};
//! use std::sync::Arc;
//!
//! # async fn run() -> secrets_manager_sdk::SecretsManagerResult<()> {
//! let client = SecretsManagerV1::new(
//!     SecretsManagerV1Options::new(Arc::new(IamAuthenticator::new("apikey")))
//!         .with_url("https://my-instance.us-south.secrets-manager.appdomain.cloud"),
//! )?;
//!
//! let secret = ArbitrarySecretResource::new("db-password", "hunter2");
//! let (created, _) = client.create_secret(&CreateSecretOptions::new(secret)).await?;
//! let id = created.first().and_then(|s| s.id()).unwrap_or_default().to_string();
//!
//! let (fetched, _) = client
//!     .get_secret(&GetSecretOptions::new(secret_type::ARBITRARY, id))
//!     .await?;
//! # let _ = fetched;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod codec;
pub mod envelope;
pub mod error;
pub mod models;
pub mod options;
pub mod registry;
pub mod service;

pub use codec::{JsonPath, JsonResource, decode, decode_envelope, encode, encode_envelope};
pub use envelope::{CollectionEnvelope, CollectionMetadata};
pub use error::{SecretsManagerError, SecretsManagerResult};
pub use registry::{Discriminated, Family, VariantDescriptor};
pub use service::{
    DEFAULT_SERVICE_NAME, DEFAULT_SERVICE_URL, SecretsManagerV1, SecretsManagerV1Options,
};
