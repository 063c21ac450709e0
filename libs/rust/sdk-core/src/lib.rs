//! Transport plumbing shared by the REST service SDKs.
//!
//! This crate provides centralized implementations for:
//! - Error types with retryability classification
//! - HTTP client configuration and building
//! - Request description with path templating and query assembly
//! - Authenticators (IAM, bearer token, basic, none)
//! - The service handle with retries, default headers and gzip negotiation
//! - Cancellation and deadlines
//! - Configuration from the environment
//! - Tracing subscriber setup

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod authenticator;
pub mod config;
pub mod context;
pub mod error;
pub mod http;
pub mod request;
pub mod response;
pub mod retry;
pub mod service;
pub mod tracing_config;

pub use authenticator::{
    Authenticator, BasicAuthenticator, BearerTokenAuthenticator, IamAuthenticator,
    NoAuthAuthenticator,
};
pub use config::{AuthType, ServiceConfig};
pub use context::Context;
pub use error::{CoreError, CoreResult};
pub use http::{HttpConfig, build_http_client};
pub use request::ApiRequest;
pub use response::DetailedResponse;
pub use retry::{RetryConfig, RetryPolicy};
pub use service::{BaseService, ServiceOptions};
pub use tracing_config::{TracingConfig, init_tracing};
