//! The shared service handle every generated SDK wraps.

use crate::{
    ApiRequest, Authenticator, Context, CoreError, CoreResult, DetailedResponse, HttpConfig,
    RetryPolicy, build_http_client,
};
use reqwest::Client;
use reqwest::header::HeaderMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument};

/// Construction options for a [`BaseService`].
#[derive(Clone)]
pub struct ServiceOptions {
    /// Base URL of the service
    pub url: String,
    /// Scheme used to authenticate every request
    pub authenticator: Arc<dyn Authenticator>,
    /// Transport configuration
    pub http: HttpConfig,
}

impl fmt::Debug for ServiceOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceOptions")
            .field("url", &self.url)
            .field("authenticator", &self.authenticator.authentication_type())
            .field("http", &self.http)
            .finish()
    }
}

/// Configuration plus a shared transport.
///
/// `Clone` copies the configuration and shares the underlying connection
/// pool, so a clone can be reconfigured for one request family without
/// affecting the original. Configuration setters take `&mut self` and are
/// meant for a single-threaded setup phase.
#[derive(Clone)]
pub struct BaseService {
    url: String,
    authenticator: Arc<dyn Authenticator>,
    http_config: HttpConfig,
    http: Client,
    default_headers: HeaderMap,
    retry: Option<RetryPolicy>,
}

impl fmt::Debug for BaseService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BaseService")
            .field("url", &self.url)
            .field("authenticator", &self.authenticator.authentication_type())
            .field("gzip", &self.http_config.gzip)
            .field("retry", &self.retry)
            .finish_non_exhaustive()
    }
}

impl BaseService {
    /// Create a handle from `options`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidInput`] for an invalid URL or
    /// authenticator configuration, or [`CoreError::Http`] if the transport
    /// cannot be built.
    pub fn new(options: ServiceOptions) -> CoreResult<Self> {
        options.authenticator.validate()?;
        let url = normalize_url(&options.url)?;
        let http = build_http_client(&options.http)?;

        Ok(Self {
            url,
            authenticator: options.authenticator,
            http_config: options.http,
            http,
            default_headers: HeaderMap::new(),
            retry: None,
        })
    }

    /// The configured base URL.
    #[must_use]
    pub fn service_url(&self) -> &str {
        &self.url
    }

    /// Replace the base URL.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidInput`] if `url` is empty or not absolute.
    pub fn set_service_url(&mut self, url: &str) -> CoreResult<()> {
        self.url = normalize_url(url)?;
        Ok(())
    }

    /// The authenticator in use.
    #[must_use]
    pub fn authenticator(&self) -> &Arc<dyn Authenticator> {
        &self.authenticator
    }

    /// Headers sent with every request, before per-request headers.
    pub fn set_default_headers(&mut self, headers: HeaderMap) {
        self.default_headers = headers;
    }

    /// Current default headers.
    #[must_use]
    pub const fn default_headers(&self) -> &HeaderMap {
        &self.default_headers
    }

    /// Turn on automatic retries of transient failures.
    pub fn enable_retries(&mut self, max_retries: u32, max_interval: Duration) {
        self.retry = Some(RetryPolicy::from_limits(max_retries, max_interval));
    }

    /// Turn automatic retries off.
    pub fn disable_retries(&mut self) {
        self.retry = None;
    }

    /// The active retry policy, if retries are enabled.
    #[must_use]
    pub const fn retry_policy(&self) -> Option<&RetryPolicy> {
        self.retry.as_ref()
    }

    /// Toggle gzip negotiation. Rebuilds this handle's transport.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Http`] if the transport cannot be rebuilt.
    pub fn set_enable_gzip_compression(&mut self, enable: bool) -> CoreResult<()> {
        if self.http_config.gzip != enable {
            self.http_config.gzip = enable;
            self.http = build_http_client(&self.http_config)?;
        }
        Ok(())
    }

    /// Whether gzip negotiation is on.
    #[must_use]
    pub const fn enable_gzip_compression(&self) -> bool {
        self.http_config.gzip
    }

    /// Send `request`, honouring `ctx` and the retry policy.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Cancelled`] if `ctx` fires first,
    /// [`CoreError::Status`] for non-2xx responses, and transport errors
    /// otherwise.
    #[instrument(skip_all, fields(method = %request.method(), path = %request.path()))]
    pub async fn request(&self, request: &ApiRequest, ctx: &Context) -> CoreResult<DetailedResponse> {
        let exchange = async {
            match &self.retry {
                Some(policy) => policy.execute(|| self.send_once(request)).await,
                None => self.send_once(request).await,
            }
        };
        ctx.run(exchange).await
    }

    async fn send_once(&self, request: &ApiRequest) -> CoreResult<DetailedResponse> {
        let url = request.url(&self.url)?;
        debug!(%url, "Sending request");

        let mut builder = self
            .http
            .request(request.method().clone(), url)
            .headers(self.default_headers.clone())
            .headers(request.header_map().clone());
        if let Some(body) = request.body() {
            builder = builder.body(body.to_vec());
        }
        let builder = self.authenticator.authenticate(builder).await?;

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                CoreError::Timeout(e.to_string())
            } else {
                CoreError::unavailable(e.to_string())
            }
        })?;

        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = response
            .bytes()
            .await
            .map_err(|e| CoreError::unavailable(e.to_string()))?
            .to_vec();
        let detailed = DetailedResponse::new(status, headers, body);
        debug!(status, "Received response");

        if detailed.is_success() {
            Ok(detailed)
        } else {
            Err(CoreError::status(detailed))
        }
    }
}

fn normalize_url(url: &str) -> CoreResult<String> {
    let trimmed = url.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(CoreError::invalid_input("service URL must not be empty"));
    }
    let parsed = url::Url::parse(trimmed)
        .map_err(|e| CoreError::invalid_input(format!("invalid service URL '{trimmed}': {e}")))?;
    if parsed.cannot_be_a_base() {
        return Err(CoreError::invalid_input(format!(
            "service URL '{trimmed}' must be absolute"
        )));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NoAuthAuthenticator;
    use reqwest::Method;
    use reqwest::header::HeaderValue;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn service(url: &str) -> BaseService {
        BaseService::new(ServiceOptions {
            url: url.to_string(),
            authenticator: Arc::new(NoAuthAuthenticator),
            http: HttpConfig::default(),
        })
        .unwrap()
    }

    #[test]
    fn test_url_normalization() {
        let mut svc = service("https://example.com/");
        assert_eq!(svc.service_url(), "https://example.com");
        assert!(svc.set_service_url("").is_err());
        assert!(svc.set_service_url("not a url").is_err());
        assert!(svc.set_service_url("https://other.example.com/api/").is_ok());
        assert_eq!(svc.service_url(), "https://other.example.com/api");
    }

    #[test]
    fn test_clone_is_independent() {
        let original = service("https://example.com");
        let mut copy = original.clone();
        copy.set_service_url("https://copy.example.com").unwrap();
        copy.enable_retries(2, Duration::from_secs(1));
        copy.set_enable_gzip_compression(true).unwrap();

        assert_eq!(original.service_url(), "https://example.com");
        assert!(original.retry_policy().is_none());
        assert!(!original.enable_gzip_compression());
        assert!(copy.enable_gzip_compression());
    }

    #[tokio::test]
    async fn test_default_headers_and_status_errors() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ping"))
            .and(header("x-team", "core"))
            .respond_with(ResponseTemplate::new(409).set_body_string(r#"{"message":"taken"}"#))
            .mount(&server)
            .await;

        let mut svc = service(&server.uri());
        let mut headers = HeaderMap::new();
        headers.insert("x-team", HeaderValue::from_static("core"));
        svc.set_default_headers(headers);

        let request = ApiRequest::new(Method::GET, "/ping", &[]).unwrap();
        let err = svc.request(&request, &Context::background()).await.unwrap_err();
        assert_eq!(err.status_code(), Some(409));
        assert_eq!(err.response().map(DetailedResponse::text).as_deref(), Some(r#"{"message":"taken"}"#));
    }

    #[tokio::test]
    async fn test_retries_transient_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/flaky"))
            .respond_with(
                ResponseTemplate::new(503).insert_header("retry-after", "0"),
            )
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/flaky"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
            .mount(&server)
            .await;

        let mut svc = service(&server.uri());
        svc.enable_retries(2, Duration::from_millis(10));

        let request = ApiRequest::new(Method::GET, "/flaky", &[]).unwrap();
        let response = svc.request(&request, &Context::background()).await.unwrap();
        assert_eq!(response.status_code, 200);
    }
}
