//! Request authenticators.
//!
//! The service handle never reads credentials itself; it hands each outgoing
//! request to an [`Authenticator`] which decorates it with whatever header
//! the scheme needs.

use crate::{CoreError, CoreResult};
use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Client, RequestBuilder};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::{debug, info, instrument};

/// Default IAM token endpoint host.
pub const DEFAULT_IAM_URL: &str = "https://iam.cloud.ibm.com";

const IAM_TOKEN_PATH: &str = "/identity/token";
const IAM_GRANT_TYPE: &str = "urn:ibm:params:oauth:grant-type:apikey";

/// Authentication scheme applied to every outgoing request.
#[async_trait]
pub trait Authenticator: Send + Sync + fmt::Debug {
    /// Short name of the scheme (`iam`, `bearerToken`, `basic`, `noAuth`).
    fn authentication_type(&self) -> &'static str;

    /// Check the configuration without touching the network.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidInput`] when a required credential is missing.
    fn validate(&self) -> CoreResult<()>;

    /// Decorate `request` with credentials.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::AuthFailed`] if credentials cannot be obtained.
    async fn authenticate(&self, request: RequestBuilder) -> CoreResult<RequestBuilder>;
}

/// Sends requests without credentials.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoAuthAuthenticator;

#[async_trait]
impl Authenticator for NoAuthAuthenticator {
    fn authentication_type(&self) -> &'static str {
        "noAuth"
    }

    fn validate(&self) -> CoreResult<()> {
        Ok(())
    }

    async fn authenticate(&self, request: RequestBuilder) -> CoreResult<RequestBuilder> {
        Ok(request)
    }
}

/// Sends a caller-supplied bearer token.
#[derive(Debug, Clone)]
pub struct BearerTokenAuthenticator {
    token: SecretString,
}

impl BearerTokenAuthenticator {
    /// Create an authenticator for a fixed token.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: SecretString::from(token.into()),
        }
    }
}

#[async_trait]
impl Authenticator for BearerTokenAuthenticator {
    fn authentication_type(&self) -> &'static str {
        "bearerToken"
    }

    fn validate(&self) -> CoreResult<()> {
        if self.token.expose_secret().trim().is_empty() {
            return Err(CoreError::invalid_input("bearer token must not be empty"));
        }
        Ok(())
    }

    async fn authenticate(&self, request: RequestBuilder) -> CoreResult<RequestBuilder> {
        Ok(request.header(
            AUTHORIZATION,
            format!("Bearer {}", self.token.expose_secret()),
        ))
    }
}

/// Sends HTTP basic credentials.
#[derive(Debug, Clone)]
pub struct BasicAuthenticator {
    username: String,
    password: SecretString,
}

impl BasicAuthenticator {
    /// Create an authenticator for a username/password pair.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: SecretString::from(password.into()),
        }
    }

    fn header_value(&self) -> String {
        let raw = format!("{}:{}", self.username, self.password.expose_secret());
        format!("Basic {}", STANDARD.encode(raw))
    }
}

#[async_trait]
impl Authenticator for BasicAuthenticator {
    fn authentication_type(&self) -> &'static str {
        "basic"
    }

    fn validate(&self) -> CoreResult<()> {
        if self.username.is_empty() || self.password.expose_secret().is_empty() {
            return Err(CoreError::invalid_input(
                "basic authentication requires a username and a password",
            ));
        }
        if self.username.contains(':') {
            return Err(CoreError::invalid_input("username must not contain ':'"));
        }
        Ok(())
    }

    async fn authenticate(&self, request: RequestBuilder) -> CoreResult<RequestBuilder> {
        Ok(request.header(AUTHORIZATION, self.header_value()))
    }
}

#[derive(Debug, Deserialize)]
struct IamTokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: u64,
}

struct CachedToken {
    access_token: SecretString,
    acquired: Instant,
    ttl: Duration,
}

impl CachedToken {
    /// Refresh once 80% of the token lifetime has elapsed.
    fn should_refresh(&self) -> bool {
        let threshold = self.ttl.as_secs_f64() * 0.8;
        self.acquired.elapsed().as_secs_f64() >= threshold
    }
}

/// Exchanges an API key for IAM bearer tokens, caching them until they near expiry.
///
/// Clones share the token cache.
#[derive(Clone)]
pub struct IamAuthenticator {
    apikey: SecretString,
    url: String,
    client_id: Option<String>,
    client_secret: Option<SecretString>,
    http: Client,
    token: Arc<RwLock<Option<CachedToken>>>,
}

impl fmt::Debug for IamAuthenticator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IamAuthenticator")
            .field("apikey", &"[REDACTED]")
            .field("url", &self.url)
            .field("client_id", &self.client_id)
            .finish_non_exhaustive()
    }
}

impl IamAuthenticator {
    /// Create an authenticator for `apikey` against the default IAM endpoint.
    #[must_use]
    pub fn new(apikey: impl Into<String>) -> Self {
        Self {
            apikey: SecretString::from(apikey.into()),
            url: DEFAULT_IAM_URL.to_string(),
            client_id: None,
            client_secret: None,
            http: Client::new(),
            token: Arc::new(RwLock::new(None)),
        }
    }

    /// Point at a different IAM host.
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Authenticate the token exchange itself with a client id and secret.
    #[must_use]
    pub fn with_client_credentials(
        mut self,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        self.client_id = Some(client_id.into());
        self.client_secret = Some(SecretString::from(client_secret.into()));
        self
    }

    /// Use a specific HTTP client for token requests.
    #[must_use]
    pub fn with_http_client(mut self, http: Client) -> Self {
        self.http = http;
        self
    }

    /// Drop the cached token so the next request fetches a fresh one.
    pub async fn invalidate(&self) {
        *self.token.write().await = None;
    }

    #[instrument(skip(self), fields(url = %self.url))]
    async fn request_token(&self) -> CoreResult<CachedToken> {
        let url = format!("{}{IAM_TOKEN_PATH}", self.url);
        let form = [
            ("grant_type", IAM_GRANT_TYPE),
            ("apikey", self.apikey.expose_secret()),
            ("response_type", "cloud_iam"),
        ];

        let mut request = self
            .http
            .post(&url)
            .header(ACCEPT, "application/json")
            .form(&form);
        if let (Some(id), Some(secret)) = (&self.client_id, &self.client_secret) {
            request = request.basic_auth(id, Some(secret.expose_secret()));
        }

        let response = request
            .send()
            .await
            .map_err(|e| CoreError::unavailable(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(CoreError::auth_failed(format!("Status {status}: {text}")));
        }

        let body: IamTokenResponse = response.json().await?;
        let ttl = Duration::from_secs(body.expires_in.max(1));
        info!(ttl_secs = ttl.as_secs(), "Obtained IAM access token");

        Ok(CachedToken {
            access_token: SecretString::from(body.access_token),
            acquired: Instant::now(),
            ttl,
        })
    }

    async fn access_token(&self) -> CoreResult<String> {
        {
            let cached = self.token.read().await;
            if let Some(token) = cached.as_ref().filter(|t| !t.should_refresh()) {
                return Ok(token.access_token.expose_secret().to_string());
            }
        }

        let mut slot = self.token.write().await;
        // Another task may have refreshed while we waited for the lock.
        if let Some(token) = slot.as_ref().filter(|t| !t.should_refresh()) {
            return Ok(token.access_token.expose_secret().to_string());
        }

        debug!("Refreshing IAM access token");
        let fresh = self.request_token().await?;
        let value = fresh.access_token.expose_secret().to_string();
        *slot = Some(fresh);
        Ok(value)
    }
}

#[async_trait]
impl Authenticator for IamAuthenticator {
    fn authentication_type(&self) -> &'static str {
        "iam"
    }

    fn validate(&self) -> CoreResult<()> {
        let apikey = self.apikey.expose_secret();
        if apikey.trim().is_empty() {
            return Err(CoreError::invalid_input("IAM API key must not be empty"));
        }
        if apikey.starts_with(['{', '"']) || apikey.ends_with(['}', '"']) {
            return Err(CoreError::invalid_input(
                "IAM API key must not be wrapped in braces or quotes",
            ));
        }
        if self.client_id.is_some() != self.client_secret.is_some() {
            return Err(CoreError::invalid_input(
                "client_id and client_secret must be set together",
            ));
        }
        Ok(())
    }

    async fn authenticate(&self, request: RequestBuilder) -> CoreResult<RequestBuilder> {
        let token = self.access_token().await?;
        Ok(request.header(AUTHORIZATION, format!("Bearer {token}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_validation() {
        assert!(NoAuthAuthenticator.validate().is_ok());
        assert!(BearerTokenAuthenticator::new("").validate().is_err());
        assert!(BearerTokenAuthenticator::new("abc").validate().is_ok());
        assert!(BasicAuthenticator::new("user", "").validate().is_err());
        assert!(BasicAuthenticator::new("us:er", "pw").validate().is_err());
        assert!(IamAuthenticator::new("{key}").validate().is_err());
        assert!(IamAuthenticator::new("key").validate().is_ok());
    }

    #[test]
    fn test_basic_header() {
        let auth = BasicAuthenticator::new("user", "pass");
        assert_eq!(auth.header_value(), "Basic dXNlcjpwYXNz");
    }

    #[test]
    fn test_debug_redacts_apikey() {
        let auth = IamAuthenticator::new("very-secret-key");
        let debug = format!("{auth:?}");
        assert!(!debug.contains("very-secret-key"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_refresh_threshold() {
        let token = CachedToken {
            access_token: SecretString::from("t".to_string()),
            acquired: Instant::now(),
            ttl: Duration::from_secs(3600),
        };
        assert!(!token.should_refresh());

        let stale = CachedToken {
            access_token: SecretString::from("t".to_string()),
            acquired: Instant::now(),
            ttl: Duration::ZERO,
        };
        assert!(stale.should_refresh());
    }

    #[tokio::test]
    async fn test_iam_token_is_cached() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/identity/token"))
            .and(body_string_contains("apikey=my-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "token-1",
                "refresh_token": "unused",
                "token_type": "Bearer",
                "expires_in": 3600
            })))
            .expect(1)
            .mount(&server)
            .await;

        let auth = IamAuthenticator::new("my-key").with_url(server.uri());
        assert_eq!(auth.access_token().await.ok().as_deref(), Some("token-1"));
        assert_eq!(auth.access_token().await.ok().as_deref(), Some("token-1"));
    }

    #[tokio::test]
    async fn test_iam_rejection_is_auth_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/identity/token"))
            .respond_with(ResponseTemplate::new(400).set_body_string("bad key"))
            .mount(&server)
            .await;

        let auth = IamAuthenticator::new("wrong").with_url(server.uri());
        let err = auth.access_token().await.err();
        assert!(matches!(err, Some(CoreError::AuthFailed(_))));
    }
}
