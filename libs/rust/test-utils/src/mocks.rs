//! Wiremock helpers that stand in for a Secrets Manager instance.

use serde_json::Value;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

/// A mock Secrets Manager endpoint.
#[derive(Debug)]
pub struct MockSecretsManager {
    server: MockServer,
}

impl MockSecretsManager {
    /// Start a server on a random local port.
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Base URL to point a client at.
    #[must_use]
    pub fn uri(&self) -> String {
        self.server.uri()
    }

    /// The underlying server, for custom mocks.
    #[must_use]
    pub const fn server(&self) -> &MockServer {
        &self.server
    }

    /// Answer `verb path` with `status` and a JSON body.
    pub async fn respond_json(&self, verb: &str, route: &str, status: u16, body: Value) {
        Mock::given(method(verb))
            .and(path(route))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Answer `verb path?key=value` with `status` and a JSON body.
    pub async fn respond_json_with_query(
        &self,
        verb: &str,
        route: &str,
        query: (&str, &str),
        status: u16,
        body: Value,
    ) {
        Mock::given(method(verb))
            .and(path(route))
            .and(query_param(query.0, query.1))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Answer `verb path` with `status` and a raw body.
    pub async fn respond_raw(&self, verb: &str, route: &str, status: u16, body: &str) {
        Mock::given(method(verb))
            .and(path(route))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&self.server)
            .await;
    }

    /// Answer `verb path` with `status` and no body.
    pub async fn respond_empty(&self, verb: &str, route: &str, status: u16) {
        Mock::given(method(verb))
            .and(path(route))
            .respond_with(ResponseTemplate::new(status))
            .mount(&self.server)
            .await;
    }

    /// Answer `verb path` only after `delay`.
    pub async fn respond_slowly(&self, verb: &str, route: &str, delay: Duration, body: Value) {
        Mock::given(method(verb))
            .and(path(route))
            .respond_with(ResponseTemplate::new(200).set_body_json(body).set_delay(delay))
            .mount(&self.server)
            .await;
    }

    /// Every request received so far.
    pub async fn requests(&self) -> Vec<Request> {
        self.server.received_requests().await.unwrap_or_default()
    }

    /// The JSON body of the `index`th request received.
    pub async fn request_body(&self, index: usize) -> Option<Value> {
        self.requests()
            .await
            .get(index)
            .and_then(|request| serde_json::from_slice(&request.body).ok())
    }
}
