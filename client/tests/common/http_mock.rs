//! HTTP mock server helpers for testing the client end to end.
//!
//! A thin wrapper around `wiremock` for declarative HTTP stubbing.
//!
//! ```ignore
//! let server = MockHttpServer::start().await;
//!
//! server
//!     .expect_get("/v3.1/version")
//!     .respond_with_json(json!({"response": {...}}))
//!     .mount()
//!     .await;
//! ```
//!
//! - **Success response**: `.respond_with_json(value)`
//! - **Error response**: `.respond_with_status(401).with_json_response(value)`
//! - **Timeout simulation**: `.respond_with_delay(Duration::from_secs(5))`
//! - **Request verification**: `.expect_times(1)`, then `server.verify()`

use std::time::Duration;

use serde_json::Value;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub struct MockHttpServer {
    server: MockServer,
}

impl MockHttpServer {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Base URL of the server, without a trailing slash.
    pub fn url(&self) -> String {
        self.server.uri()
    }

    pub fn inner(&self) -> &MockServer {
        &self.server
    }

    pub fn expect_get(&self, route: &str) -> StubBuilder<'_> {
        StubBuilder::new(self, "GET", route)
    }

    pub fn expect_post(&self, route: &str) -> StubBuilder<'_> {
        StubBuilder::new(self, "POST", route)
    }

    /// Panic if any stub's `expect_times` was not met.
    pub async fn verify(&self) {
        self.server.verify().await;
    }

    /// Every request the server has received, oldest first.
    pub async fn received(&self) -> Vec<wiremock::Request> {
        self.server.received_requests().await.unwrap_or_default()
    }
}

pub struct StubBuilder<'a> {
    server: &'a MockHttpServer,
    mock: wiremock::MockBuilder,
    status: u16,
    body: Option<Value>,
    delay: Option<Duration>,
    times: Option<u64>,
}

impl<'a> StubBuilder<'a> {
    fn new(server: &'a MockHttpServer, verb: &str, route: &str) -> Self {
        Self {
            server,
            mock: Mock::given(method(verb)).and(path(route)),
            status: 200,
            body: None,
            delay: None,
            times: None,
        }
    }

    pub fn with_header(mut self, name: &'static str, value: &'static str) -> Self {
        self.mock = self.mock.and(header(name, value));
        self
    }

    pub fn with_query(mut self, key: &'static str, value: &'static str) -> Self {
        self.mock = self.mock.and(query_param(key, value));
        self
    }

    pub fn respond_with_json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn respond_with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    pub fn with_json_response(self, body: Value) -> Self {
        self.respond_with_json(body)
    }

    pub fn respond_with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn expect_times(mut self, times: u64) -> Self {
        self.times = Some(times);
        self
    }

    pub async fn mount(self) {
        let mut template = ResponseTemplate::new(self.status);
        if let Some(body) = self.body {
            template = template.set_body_json(body);
        }
        if let Some(delay) = self.delay {
            template = template.set_delay(delay);
        }

        let mut mock = self.mock.respond_with(template);
        if let Some(times) = self.times {
            mock = mock.expect(times);
        }
        mock.mount(&self.server.server).await;
    }
}
