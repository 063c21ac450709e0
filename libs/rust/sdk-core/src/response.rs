//! Raw HTTP exchange results handed back to callers.

use reqwest::header::HeaderMap;
use serde_json::Value;

/// Status, headers and raw body of a completed HTTP exchange.
///
/// Operations return this alongside their typed result so callers can
/// inspect transport details even when decoding succeeded.
#[derive(Debug, Clone)]
pub struct DetailedResponse {
    /// HTTP status code
    pub status_code: u16,
    /// Response headers
    pub headers: HeaderMap,
    /// Raw response body
    pub body: Vec<u8>,
}

impl DetailedResponse {
    /// Create a response from its parts.
    #[must_use]
    pub const fn new(status_code: u16, headers: HeaderMap, body: Vec<u8>) -> Self {
        Self {
            status_code,
            headers,
            body,
        }
    }

    /// Whether the status code is in the 2xx range.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status_code >= 200 && self.status_code < 300
    }

    /// Whether the server returned no body at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.iter().all(u8::is_ascii_whitespace)
    }

    /// Body as lossy UTF-8 text.
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Value of a response header, if present and valid UTF-8.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Best-effort extraction of a human readable message from an error body.
    ///
    /// Looks at `errors[0].message`, `error`, `message` and `errorMessage`,
    /// falling back to the canonical reason phrase of the status code.
    #[must_use]
    pub fn error_message(&self) -> String {
        let from_body = serde_json::from_slice::<Value>(&self.body)
            .ok()
            .and_then(|json| {
                json.pointer("/errors/0/message")
                    .or_else(|| json.get("error"))
                    .or_else(|| json.get("message"))
                    .or_else(|| json.get("errorMessage"))
                    .and_then(Value::as_str)
                    .map(str::to_string)
            });

        from_body.unwrap_or_else(|| {
            reqwest::StatusCode::from_u16(self.status_code)
                .ok()
                .and_then(|s| s.canonical_reason())
                .unwrap_or("unknown status")
                .to_string()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status_code: u16, body: &str) -> DetailedResponse {
        DetailedResponse::new(status_code, HeaderMap::new(), body.as_bytes().to_vec())
    }

    #[test]
    fn test_error_message_sources() {
        assert_eq!(
            response(400, r#"{"errors":[{"message":"bad name"}]}"#).error_message(),
            "bad name"
        );
        assert_eq!(response(401, r#"{"error":"expired"}"#).error_message(), "expired");
        assert_eq!(response(404, r#"{"message":"missing"}"#).error_message(), "missing");
        assert_eq!(response(409, "not json").error_message(), "Conflict");
    }

    #[test]
    fn test_success_and_empty() {
        assert!(response(204, "").is_success());
        assert!(response(204, "").is_empty());
        assert!(!response(500, "{}").is_success());
        assert!(!response(200, "{}").is_empty());
    }
}
