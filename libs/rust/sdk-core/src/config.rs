//! Service configuration from the environment.
//!
//! Variables are named `<SERVICE_NAME>_<KEY>` with the service name
//! upper-cased and dashes turned into underscores, e.g.
//! `SECRETS_MANAGER_APIKEY`.

use crate::{
    Authenticator, BasicAuthenticator, BearerTokenAuthenticator, CoreError, CoreResult,
    IamAuthenticator, NoAuthAuthenticator,
};
use secrecy::{ExposeSecret, SecretString};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

/// Supported authentication schemes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthType {
    /// IAM API key exchange
    Iam,
    /// Static bearer token
    BearerToken,
    /// HTTP basic credentials
    Basic,
    /// No credentials
    NoAuth,
}

impl FromStr for AuthType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "iam" => Ok(Self::Iam),
            "bearertoken" => Ok(Self::BearerToken),
            "basic" => Ok(Self::Basic),
            "noauth" => Ok(Self::NoAuth),
            other => Err(CoreError::invalid_input(format!(
                "unsupported authentication type '{other}'"
            ))),
        }
    }
}

/// Everything needed to build a service handle, as read from the environment.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Service name used as the variable prefix
    pub service_name: String,
    /// Base URL override
    pub url: Option<String>,
    /// Authentication scheme
    pub auth_type: AuthType,
    /// IAM API key
    pub apikey: Option<SecretString>,
    /// Static bearer token
    pub bearer_token: Option<SecretString>,
    /// Basic auth username
    pub username: Option<String>,
    /// Basic auth password
    pub password: Option<SecretString>,
    /// IAM endpoint override
    pub auth_url: Option<String>,
    /// Negotiate gzip-compressed responses
    pub enable_gzip: bool,
    /// Skip TLS certificate verification
    pub disable_ssl: bool,
    /// Retry transient failures
    pub enable_retries: bool,
    /// Retry limit (0 keeps the default)
    pub max_retries: u32,
    /// Longest wait between retries (zero keeps the default)
    pub retry_interval: Duration,
}

impl ServiceConfig {
    /// Read the configuration for `service_name` from process environment.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidInput`] for malformed values.
    pub fn from_env(service_name: &str) -> CoreResult<Self> {
        Self::from_lookup(service_name, |key| std::env::var(key).ok())
    }

    /// Read the configuration through an arbitrary lookup function.
    ///
    /// The authentication type defaults to `iam` when an API key is present,
    /// `bearertoken` when a token is present and `noauth` otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidInput`] for malformed values.
    pub fn from_lookup<F>(service_name: &str, lookup: F) -> CoreResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let prefix = service_name.to_ascii_uppercase().replace('-', "_");
        let get = |key: &str| {
            lookup(&format!("{prefix}_{key}"))
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let apikey = get("APIKEY").map(SecretString::from);
        let bearer_token = get("BEARER_TOKEN").map(SecretString::from);
        let auth_type = match get("AUTH_TYPE") {
            Some(value) => value.parse()?,
            None if apikey.is_some() => AuthType::Iam,
            None if bearer_token.is_some() => AuthType::BearerToken,
            None => AuthType::NoAuth,
        };

        Ok(Self {
            service_name: service_name.to_string(),
            url: get("URL"),
            auth_type,
            apikey,
            bearer_token,
            username: get("USERNAME"),
            password: get("PASSWORD").map(SecretString::from),
            auth_url: get("AUTH_URL"),
            enable_gzip: parse_flag(get("ENABLE_GZIP"), "ENABLE_GZIP")?,
            disable_ssl: parse_flag(get("DISABLE_SSL"), "DISABLE_SSL")?,
            enable_retries: parse_flag(get("ENABLE_RETRIES"), "ENABLE_RETRIES")?,
            max_retries: get("MAX_RETRIES")
                .map(|v| {
                    v.parse()
                        .map_err(|_| CoreError::invalid_input(format!("MAX_RETRIES: '{v}' is not a number")))
                })
                .transpose()?
                .unwrap_or(0),
            retry_interval: get("RETRY_INTERVAL")
                .map(|v| {
                    v.parse()
                        .map(Duration::from_secs)
                        .map_err(|_| CoreError::invalid_input(format!("RETRY_INTERVAL: '{v}' is not a number")))
                })
                .transpose()?
                .unwrap_or(Duration::ZERO),
        })
    }

    /// Build the authenticator this configuration describes.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidInput`] when the credentials required by
    /// the scheme are absent.
    pub fn authenticator(&self) -> CoreResult<Arc<dyn Authenticator>> {
        let missing =
            |what: &str| CoreError::invalid_input(format!("{}: {what} is required", self.service_name));

        let authenticator: Arc<dyn Authenticator> = match self.auth_type {
            AuthType::Iam => {
                let apikey = self.apikey.as_ref().ok_or_else(|| missing("APIKEY"))?;
                let mut iam = IamAuthenticator::new(apikey.expose_secret());
                if let Some(url) = &self.auth_url {
                    iam = iam.with_url(url.clone());
                }
                Arc::new(iam)
            }
            AuthType::BearerToken => {
                let token = self.bearer_token.as_ref().ok_or_else(|| missing("BEARER_TOKEN"))?;
                Arc::new(BearerTokenAuthenticator::new(token.expose_secret()))
            }
            AuthType::Basic => {
                let username = self.username.as_ref().ok_or_else(|| missing("USERNAME"))?;
                let password = self.password.as_ref().ok_or_else(|| missing("PASSWORD"))?;
                Arc::new(BasicAuthenticator::new(username.clone(), password.expose_secret()))
            }
            AuthType::NoAuth => Arc::new(NoAuthAuthenticator),
        };
        authenticator.validate()?;
        Ok(authenticator)
    }
}

fn parse_flag(value: Option<String>, key: &str) -> CoreResult<bool> {
    match value.as_deref().map(str::to_ascii_lowercase).as_deref() {
        None | Some("false" | "0" | "no") => Ok(false),
        Some("true" | "1" | "yes") => Ok(true),
        Some(other) => Err(CoreError::invalid_input(format!(
            "{key}: '{other}' is not a boolean"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_to_iam_with_apikey() {
        let config = ServiceConfig::from_lookup(
            "secrets_manager",
            lookup(&[
                ("SECRETS_MANAGER_APIKEY", "abc"),
                ("SECRETS_MANAGER_URL", "https://sm.example.com"),
            ]),
        )
        .unwrap();
        assert_eq!(config.auth_type, AuthType::Iam);
        assert_eq!(config.url.as_deref(), Some("https://sm.example.com"));
        assert_eq!(config.authenticator().unwrap().authentication_type(), "iam");
    }

    #[test]
    fn test_dashes_become_underscores() {
        let config = ServiceConfig::from_lookup(
            "secrets-manager",
            lookup(&[("SECRETS_MANAGER_AUTH_TYPE", "noauth")]),
        )
        .unwrap();
        assert_eq!(config.auth_type, AuthType::NoAuth);
    }

    #[test]
    fn test_flags_and_numbers() {
        let config = ServiceConfig::from_lookup(
            "svc",
            lookup(&[
                ("SVC_ENABLE_GZIP", "true"),
                ("SVC_DISABLE_SSL", "false"),
                ("SVC_ENABLE_RETRIES", "1"),
                ("SVC_MAX_RETRIES", "5"),
                ("SVC_RETRY_INTERVAL", "20"),
            ]),
        )
        .unwrap();
        assert!(config.enable_gzip);
        assert!(!config.disable_ssl);
        assert!(config.enable_retries);
        assert_eq!(config.max_retries, 5);
        assert_eq!(config.retry_interval, Duration::from_secs(20));

        assert!(ServiceConfig::from_lookup("svc", lookup(&[("SVC_ENABLE_GZIP", "maybe")])).is_err());
        assert!(ServiceConfig::from_lookup("svc", lookup(&[("SVC_MAX_RETRIES", "many")])).is_err());
    }

    #[test]
    fn test_missing_credentials() {
        let config =
            ServiceConfig::from_lookup("svc", lookup(&[("SVC_AUTH_TYPE", "basic")])).unwrap();
        assert!(config.authenticator().is_err());

        assert!(ServiceConfig::from_lookup("svc", lookup(&[("SVC_AUTH_TYPE", "kerberos")])).is_err());
    }
}
