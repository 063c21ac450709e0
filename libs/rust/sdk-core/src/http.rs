//! Transport settings for service handles.
//!
//! A [`BaseService`](crate::BaseService) owns one `reqwest::Client` built by
//! [`build_http_client`]. Settings that change the client itself (gzip
//! negotiation, certificate checks, proxying) force a rebuild.

use crate::{CoreError, CoreResult};
use reqwest::{Client, ClientBuilder, Proxy};
use std::time::Duration;
use tracing::{debug, warn};

const SDK_USER_AGENT: &str = concat!("secrets-sdk-rust/", env!("CARGO_PKG_VERSION"));

/// Settings for the HTTP client behind a service handle.
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Whole-request timeout (default: 60s)
    pub timeout: Duration,
    /// Connection timeout (default: 10s)
    pub connect_timeout: Duration,
    /// How long idle connections stay pooled (default: 90s)
    pub pool_idle_timeout: Duration,
    /// Idle connections kept per host (default: 10)
    pub pool_max_idle_per_host: usize,
    /// `User-Agent` header value
    pub user_agent: String,
    /// Negotiate gzip-compressed responses
    pub gzip: bool,
    /// Accept any server certificate
    pub disable_ssl_verification: bool,
    /// Route every request through this proxy URL
    pub proxy: Option<String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(60),
            connect_timeout: Duration::from_secs(10),
            pool_idle_timeout: Duration::from_secs(90),
            pool_max_idle_per_host: 10,
            user_agent: SDK_USER_AGENT.to_string(),
            gzip: false,
            disable_ssl_verification: false,
            proxy: None,
        }
    }
}

impl HttpConfig {
    /// Set the whole-request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the connect timeout.
    #[must_use]
    pub const fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Append `product` to the SDK user agent.
    #[must_use]
    pub fn with_user_agent(mut self, product: impl AsRef<str>) -> Self {
        self.user_agent = format!("{SDK_USER_AGENT} {}", product.as_ref());
        self
    }

    /// Enable or disable gzip negotiation.
    #[must_use]
    pub const fn with_gzip(mut self, gzip: bool) -> Self {
        self.gzip = gzip;
        self
    }

    /// Skip certificate verification. Only for test endpoints.
    #[must_use]
    pub const fn with_disable_ssl_verification(mut self, disable: bool) -> Self {
        self.disable_ssl_verification = disable;
        self
    }

    /// Send requests through `proxy`.
    #[must_use]
    pub fn with_proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }
}

/// Build the client described by `config`.
///
/// # Errors
///
/// Returns [`CoreError::InvalidInput`] for a malformed proxy URL and
/// [`CoreError::Http`] if TLS initialisation fails.
///
/// # Examples
///
/// ```
/// use sdk_core::{HttpConfig, build_http_client};
///
/// let client = build_http_client(&HttpConfig::default().with_gzip(true));
/// assert!(client.is_ok());
/// ```
pub fn build_http_client(config: &HttpConfig) -> CoreResult<Client> {
    let mut builder = ClientBuilder::new()
        .timeout(config.timeout)
        .connect_timeout(config.connect_timeout)
        .pool_idle_timeout(config.pool_idle_timeout)
        .pool_max_idle_per_host(config.pool_max_idle_per_host)
        .user_agent(&config.user_agent)
        .gzip(config.gzip)
        .use_rustls_tls();

    if config.disable_ssl_verification {
        warn!("TLS certificate verification is disabled");
        builder = builder.danger_accept_invalid_certs(true);
    }
    if let Some(proxy) = &config.proxy {
        let proxy = Proxy::all(proxy.as_str())
            .map_err(|e| CoreError::invalid_input(format!("proxy '{proxy}': {e}")))?;
        builder = builder.proxy(proxy);
    }

    debug!(gzip = config.gzip, timeout = ?config.timeout, "Building HTTP client");
    Ok(builder.build()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = HttpConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(60));
        assert!(config.user_agent.starts_with("secrets-sdk-rust/"));
        assert!(!config.gzip);
        assert!(!config.disable_ssl_verification);
        assert!(config.proxy.is_none());
    }

    #[test]
    fn test_user_agent_keeps_sdk_prefix() {
        let config = HttpConfig::default().with_user_agent("my-app/2.1");
        assert!(config.user_agent.starts_with(SDK_USER_AGENT));
        assert!(config.user_agent.ends_with(" my-app/2.1"));
    }

    #[test]
    fn test_build_with_every_option() {
        let config = HttpConfig::default()
            .with_timeout(Duration::from_secs(5))
            .with_gzip(true)
            .with_disable_ssl_verification(true)
            .with_proxy("http://127.0.0.1:3128");
        assert!(build_http_client(&config).is_ok());
    }

    #[test]
    fn test_bad_proxy_rejected() {
        let err = build_http_client(&HttpConfig::default().with_proxy("http://[::1")).unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(_)));
    }
}
