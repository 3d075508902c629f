//! HTTP transport: submit a URL, get back a status and body or a reason the
//! request never completed.
//!
//! The client only talks to the [`Transport`] trait. [`ReqwestTransport`] is
//! the production implementation; [`mock::MockTransport`] replays canned
//! responses in tests.

use std::error::Error as _;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use thiserror::Error;

use crate::config::ApiConfig;

/// Status and body of a completed HTTP exchange, successful or not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// No response could be obtained.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("{0}")]
    Other(String),
}

impl TransportError {
    /// The underlying reason reported by the HTTP stack.
    #[must_use]
    pub fn reason(&self) -> &str {
        match self {
            Self::Timeout(reason) | Self::Connect(reason) | Self::Other(reason) => reason,
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        // The URL carries the token; keep it out of error text.
        let err = err.without_url();
        let reason = describe(&err);
        if err.is_timeout() {
            Self::Timeout(reason)
        } else if err.is_connect() {
            Self::Connect(reason)
        } else {
            Self::Other(reason)
        }
    }
}

/// Flatten an error and its sources into one line.
fn describe(err: &reqwest::Error) -> String {
    let mut reason = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        reason.push_str(": ");
        reason.push_str(&cause.to_string());
        source = cause.source();
    }
    reason
}

#[async_trait]
pub trait Transport: Send + Sync {
    /// `GET` a fully composed URL.
    async fn get(&self, url: &str) -> Result<RawResponse, TransportError>;

    /// `POST` an `application/x-www-form-urlencoded` body.
    async fn post_form(&self, url: &str, form: &str) -> Result<RawResponse, TransportError>;
}

/// [`Transport`] over a shared `reqwest::Client`.
#[derive(Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    user_agent: String,
}

impl ReqwestTransport {
    /// Build a transport with the configured timeout and user agent.
    ///
    /// # Errors
    /// Returns an error if the TLS backend cannot be initialized.
    pub fn new(config: &ApiConfig) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self::with_client(client, config.user_agent.clone()))
    }

    /// Use a custom `reqwest::Client` (for tests or shared connection pools).
    #[must_use]
    pub fn with_client(client: reqwest::Client, user_agent: impl Into<String>) -> Self {
        Self {
            client,
            user_agent: user_agent.into(),
        }
    }

    async fn finish(request: reqwest::RequestBuilder) -> Result<RawResponse, TransportError> {
        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(RawResponse { status, body })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(&self, url: &str) -> Result<RawResponse, TransportError> {
        Self::finish(self.client.get(url).header(USER_AGENT, &self.user_agent)).await
    }

    async fn post_form(&self, url: &str, form: &str) -> Result<RawResponse, TransportError> {
        Self::finish(
            self.client
                .post(url)
                .header(USER_AGENT, &self.user_agent)
                .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(form.to_string()),
        )
        .await
    }
}

#[cfg(any(test, feature = "test-utils"))]
#[allow(
    clippy::unwrap_used,
    clippy::missing_panics_doc,
    clippy::missing_const_for_fn,
    clippy::must_use_candidate
)]
pub mod mock {
    //! Scripted transport for unit tests.

    use super::{RawResponse, Transport, TransportError};
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// One request seen by [`MockTransport`].
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum RecordedRequest {
        Get { url: String },
        PostForm { url: String, form: String },
    }

    impl RecordedRequest {
        pub fn url(&self) -> &str {
            match self {
                Self::Get { url } | Self::PostForm { url, .. } => url,
            }
        }
    }

    /// Mock implementation of [`Transport`].
    ///
    /// Queue outcomes with `push_*`; they are returned in order, one per
    /// request. Inspect what was sent with `requests()`.
    pub struct MockTransport {
        outcomes: Mutex<VecDeque<Result<RawResponse, TransportError>>>,
        requests: Mutex<Vec<RecordedRequest>>,
    }

    impl MockTransport {
        pub fn new() -> Self {
            Self {
                outcomes: Mutex::new(VecDeque::new()),
                requests: Mutex::new(Vec::new()),
            }
        }

        /// Queue a completed exchange.
        pub fn push_response(&self, status: u16, body: impl Into<String>) {
            self.outcomes
                .lock()
                .unwrap()
                .push_back(Ok(RawResponse::new(status, body)));
        }

        /// Queue a JSON body with the given status.
        pub fn push_json(&self, status: u16, body: &serde_json::Value) {
            self.push_response(status, body.to_string());
        }

        /// Queue a failure to get any response.
        pub fn push_error(&self, error: TransportError) {
            self.outcomes.lock().unwrap().push_back(Err(error));
        }

        /// Every request received so far, oldest first.
        pub fn requests(&self) -> Vec<RecordedRequest> {
            self.requests.lock().unwrap().clone()
        }

        fn next(&self) -> Result<RawResponse, TransportError> {
            self.outcomes
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(TransportError::Other("no response queued".into())))
        }
    }

    impl Default for MockTransport {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl Transport for MockTransport {
        async fn get(&self, url: &str) -> Result<RawResponse, TransportError> {
            self.requests
                .lock()
                .unwrap()
                .push(RecordedRequest::Get { url: url.to_string() });
            self.next()
        }

        async fn post_form(&self, url: &str, form: &str) -> Result<RawResponse, TransportError> {
            self.requests.lock().unwrap().push(RecordedRequest::PostForm {
                url: url.to_string(),
                form: form.to_string(),
            });
            self.next()
        }
    }
}
