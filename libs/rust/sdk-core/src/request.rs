//! Request description handed to the service handle.
//!
//! An [`ApiRequest`] is transport-agnostic: it records the verb, the
//! resolved path segments, query parameters, headers and body. The service
//! handle turns it into a `reqwest` request once per attempt.

use crate::{CoreError, CoreResult};
use reqwest::Method;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use url::Url;
use url::form_urlencoded::byte_serialize;

/// Header carrying SDK identification for analytics.
pub const SDK_ANALYTICS_HEADER: &str = "X-IBMCloud-SDK-Analytics";

const JSON: &str = "application/json";

#[derive(Debug, Clone, PartialEq, Eq)]
enum QueryValue {
    Single(String),
    List(Vec<String>),
}

/// A single REST call, before it is bound to a base URL.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    method: Method,
    segments: Vec<String>,
    query: Vec<(String, QueryValue)>,
    headers: HeaderMap,
    body: Option<Vec<u8>>,
}

impl ApiRequest {
    /// Start a request for `template`, substituting `{name}` segments from `params`.
    ///
    /// ```
    /// use reqwest::Method;
    /// use sdk_core::ApiRequest;
    ///
    /// let request = ApiRequest::new(
    ///     Method::GET,
    ///     "/api/v1/secrets/{secret_type}/{id}",
    ///     &[("secret_type", "arbitrary"), ("id", "abc")],
    /// )
    /// .unwrap();
    /// assert_eq!(request.path(), "/api/v1/secrets/arbitrary/abc");
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidInput`] if a path parameter is empty or
    /// the template references a parameter that was not supplied.
    pub fn new(method: Method, template: &str, params: &[(&str, &str)]) -> CoreResult<Self> {
        let mut segments = Vec::new();
        for raw in template.split('/').filter(|s| !s.is_empty()) {
            let segment = match raw.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
                Some(name) => {
                    let value = params
                        .iter()
                        .find(|(key, _)| *key == name)
                        .map(|(_, value)| *value)
                        .ok_or_else(|| {
                            CoreError::invalid_input(format!("missing path parameter '{name}'"))
                        })?;
                    if value.is_empty() {
                        return Err(CoreError::invalid_input(format!(
                            "path parameter '{name}' must not be empty"
                        )));
                    }
                    value.to_string()
                }
                None => raw.to_string(),
            };
            segments.push(segment);
        }

        Ok(Self {
            method,
            segments,
            query: Vec::new(),
            headers: HeaderMap::new(),
            body: None,
        })
    }

    /// HTTP method.
    #[must_use]
    pub const fn method(&self) -> &Method {
        &self.method
    }

    /// Resolved path, unescaped, for logging and tests.
    #[must_use]
    pub fn path(&self) -> String {
        format!("/{}", self.segments.join("/"))
    }

    /// Add a query parameter.
    #[must_use]
    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query
            .push((key.to_string(), QueryValue::Single(value.to_string())));
        self
    }

    /// Add a query parameter when `value` is present.
    #[must_use]
    pub fn query_opt<V: ToString>(self, key: &str, value: Option<V>) -> Self {
        match value {
            Some(v) => self.query(key, v),
            None => self,
        }
    }

    /// Add a list-valued query parameter, rendered as a comma-joined value.
    ///
    /// Elements are escaped individually; the separating commas are not.
    #[must_use]
    pub fn query_list(mut self, key: &str, values: &[String]) -> Self {
        if !values.is_empty() {
            self.query
                .push((key.to_string(), QueryValue::List(values.to_vec())));
        }
        self
    }

    /// Add a header. Invalid names or values are rejected.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidInput`] for header names or values that
    /// are not valid HTTP.
    pub fn header(mut self, name: &str, value: &str) -> CoreResult<Self> {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| CoreError::invalid_input(format!("invalid header name '{name}': {e}")))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| CoreError::invalid_input(format!("invalid header value: {e}")))?;
        self.headers.insert(name, value);
        Ok(self)
    }

    /// Add every header from a caller-supplied map.
    ///
    /// # Errors
    ///
    /// See [`ApiRequest::header`].
    pub fn headers<'a, I>(self, headers: I) -> CoreResult<Self>
    where
        I: IntoIterator<Item = (&'a String, &'a String)>,
    {
        headers
            .into_iter()
            .try_fold(self, |request, (name, value)| request.header(name, value))
    }

    /// Tag the request with SDK identification for `operation`.
    #[must_use]
    pub fn sdk_headers(mut self, service_name: &str, service_version: &str, operation: &str) -> Self {
        let value = format!(
            "service_name={service_name};service_version={service_version};operation_id={operation}"
        );
        if let Ok(value) = HeaderValue::from_str(&value) {
            self.headers
                .insert(HeaderName::from_static("x-ibmcloud-sdk-analytics"), value);
        }
        self
    }

    /// Expect a JSON response.
    #[must_use]
    pub fn accept_json(mut self) -> Self {
        self.headers.insert(ACCEPT, HeaderValue::from_static(JSON));
        self
    }

    /// Attach a serialized JSON body.
    #[must_use]
    pub fn json_body(mut self, body: Vec<u8>) -> Self {
        self.headers
            .insert(CONTENT_TYPE, HeaderValue::from_static(JSON));
        self.body = Some(body);
        self
    }

    /// Request headers.
    #[must_use]
    pub const fn header_map(&self) -> &HeaderMap {
        &self.headers
    }

    /// Request body, if any.
    #[must_use]
    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }

    /// Encoded query string, without the leading `?`.
    #[must_use]
    pub fn query_string(&self) -> Option<String> {
        if self.query.is_empty() {
            return None;
        }
        let pairs: Vec<String> = self
            .query
            .iter()
            .map(|(key, value)| {
                let value = match value {
                    QueryValue::Single(v) => encode(v),
                    QueryValue::List(values) => {
                        values.iter().map(|v| encode(v)).collect::<Vec<_>>().join(",")
                    }
                };
                format!("{}={value}", encode(key))
            })
            .collect();
        Some(pairs.join("&"))
    }

    /// Bind the request to `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidInput`] if the base URL cannot carry a path.
    pub fn url(&self, base_url: &str) -> CoreResult<Url> {
        let mut url = Url::parse(base_url)
            .map_err(|e| CoreError::invalid_input(format!("invalid service URL '{base_url}': {e}")))?;
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|()| CoreError::invalid_input(format!("service URL '{base_url}' cannot be a base")))?;
            path.pop_if_empty();
            for segment in &self.segments {
                path.push(segment);
            }
        }
        url.set_query(self.query_string().as_deref());
        Ok(url)
    }
}

/// Form-encode `value`, then spell spaces as `%20` to match path escaping.
/// A literal `+` is already `%2B` at this point.
fn encode(value: &str) -> String {
    byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_substitution() {
        let request = ApiRequest::new(
            Method::GET,
            "/api/v1/secrets/{secret_type}/{id}/versions/{version_id}",
            &[("secret_type", "arbitrary"), ("id", "abc"), ("version_id", "previous")],
        )
        .unwrap();
        assert_eq!(request.path(), "/api/v1/secrets/arbitrary/abc/versions/previous");
    }

    #[test]
    fn test_empty_path_param_rejected() {
        let err = ApiRequest::new(Method::GET, "/api/v1/secret_groups/{id}", &[("id", "")]);
        assert!(matches!(err, Err(CoreError::InvalidInput(m)) if m.contains("'id'")));

        let err = ApiRequest::new(Method::GET, "/api/v1/secret_groups/{id}", &[]);
        assert!(matches!(err, Err(CoreError::InvalidInput(_))));
    }

    #[test]
    fn test_list_query_keeps_commas() {
        let request = ApiRequest::new(Method::GET, "/api/v1/secrets", &[])
            .unwrap()
            .query("limit", 10)
            .query_list(
                "groups",
                &["g1".to_string(), "g2".to_string(), "default".to_string()],
            );
        assert_eq!(
            request.query_string().as_deref(),
            Some("limit=10&groups=g1,g2,default")
        );
    }

    #[test]
    fn test_list_elements_are_escaped() {
        let request = ApiRequest::new(Method::GET, "/x", &[])
            .unwrap()
            .query_list("groups", &["a,b".to_string(), "c".to_string()]);
        assert_eq!(request.query_string().as_deref(), Some("groups=a%2Cb,c"));
    }

    #[test]
    fn test_query_spaces_are_percent_encoded() {
        let request = ApiRequest::new(Method::GET, "/api/v1/secrets", &[])
            .unwrap()
            .query("search", "a b+c");
        assert_eq!(request.query_string().as_deref(), Some("search=a%20b%2Bc"));
        let url = request.url("https://example.com").unwrap();
        assert_eq!(url.query(), Some("search=a%20b%2Bc"));
    }

    #[test]
    fn test_url_binding_escapes_segments() {
        let request =
            ApiRequest::new(Method::GET, "/api/v1/config/{name}", &[("name", "a b/c")]).unwrap();
        let url = request.url("https://example.com/prefix/").unwrap();
        assert_eq!(url.as_str(), "https://example.com/prefix/api/v1/config/a%20b%2Fc");
    }

    #[test]
    fn test_headers() {
        let request = ApiRequest::new(Method::POST, "/x", &[])
            .unwrap()
            .accept_json()
            .json_body(b"{}".to_vec())
            .sdk_headers("secrets_manager", "V1", "CreateSecret");
        let headers = request.header_map();
        assert_eq!(headers[ACCEPT], "application/json");
        assert_eq!(headers[CONTENT_TYPE], "application/json");
        assert_eq!(
            headers[SDK_ANALYTICS_HEADER],
            "service_name=secrets_manager;service_version=V1;operation_id=CreateSecret"
        );
        assert!(request.clone().header("bad header", "x").is_err());
    }
}
