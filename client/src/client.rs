//! Cicero API client.
//!
//! [`CiceroApi`] lists the endpoint operations; [`CiceroClient`] implements
//! them over any [`Transport`]. Each operation composes the request URL,
//! submits it, and decodes the body into a [`Root`] tree.
//!
//! # Example
//!
//! ```ignore
//! use cicero_client::{CiceroApi, CiceroClient, Config, QueryParams};
//!
//! let config = Config::load()?;
//! let client = CiceroClient::connect(&config.api, "me@example.com", "password").await?;
//! let root = client
//!     .legislative_district(QueryParams::new().param("lat", 39.95).param("lon", -75.16))
//!     .await?;
//! println!("{:?}", root.response.results.shape());
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::auth::{self, Credentials};
use crate::config::ApiConfig;
use crate::endpoints::{compose_request_url, usage_segments, Endpoint};
use crate::error::{envelope_errors, CiceroError};
use crate::query::QueryParams;
use crate::response::{DecodeError, Root};
use crate::transport::{ReqwestTransport, Transport};

/// Operations offered by the Cicero API.
///
/// Use [`CiceroClient`] for real calls, or implement the trait over canned
/// data in tests of code that consumes it.
#[async_trait]
pub trait CiceroApi: Send + Sync {
    /// Officials by location (`search_loc`, `lat`/`lon`) or by name, chamber
    /// and district filters. Geocoded queries come back as candidates.
    async fn official(&self, params: QueryParams) -> Result<Root, CiceroError>;

    /// Past and upcoming elections.
    async fn election_event(&self, params: QueryParams) -> Result<Root, CiceroError>;

    async fn legislative_district(&self, params: QueryParams) -> Result<Root, CiceroError>;

    async fn nonlegislative_district(&self, params: QueryParams) -> Result<Root, CiceroError>;

    /// Map images of a district. Pass the district id with
    /// [`QueryParams::id`].
    async fn map(&self, params: QueryParams) -> Result<Root, CiceroError>;

    async fn district_types(&self) -> Result<Root, CiceroError>;

    async fn credits_remaining(&self) -> Result<Root, CiceroError>;

    /// Usage per month. `first` and `second` are period tokens such as
    /// `2013`, `2013-05` or `2013-05-01`; with `second` the range from
    /// `first` to `second` is returned.
    async fn account_usage(&self, first: &str, second: Option<&str>)
        -> Result<Root, CiceroError>;

    /// Version of the API. Needs no credentials.
    async fn version(&self) -> Result<Root, CiceroError>;
}

/// [`CiceroApi`] over an HTTP [`Transport`].
///
/// The credential pair is read-only shared state: every call takes a snapshot
/// of it, and [`CiceroClient::reauthenticate`] swaps the whole pair at once.
/// The client can be shared across tasks behind an `Arc`.
pub struct CiceroClient<T = ReqwestTransport> {
    transport: T,
    api_root: String,
    credentials: RwLock<Arc<Credentials>>,
}

impl CiceroClient<ReqwestTransport> {
    /// Build the HTTP transport from config and authenticate.
    ///
    /// # Errors
    /// Returns [`CiceroError::Network`] if the transport cannot be built or the
    /// API cannot be reached, and [`CiceroError::Api`] if the login is rejected.
    pub async fn connect(
        config: &ApiConfig,
        username: &str,
        password: &str,
    ) -> Result<Self, CiceroError> {
        let transport = ReqwestTransport::new(config)?;
        Self::authenticate_with(transport, config, username, password).await
    }
}

impl<T: Transport> CiceroClient<T> {
    /// Authenticate over `transport` and keep the resulting credentials.
    ///
    /// # Errors
    /// Same as [`auth::authenticate`].
    pub async fn authenticate_with(
        transport: T,
        config: &ApiConfig,
        username: &str,
        password: &str,
    ) -> Result<Self, CiceroError> {
        let api_root = config.api_root();
        let credentials = auth::authenticate(&transport, &api_root, username, password).await?;
        Ok(Self::from_parts(transport, api_root, credentials))
    }

    /// Build a client from an already valid credential pair. No request is made.
    pub fn with_credentials(transport: T, config: &ApiConfig, credentials: Credentials) -> Self {
        Self::from_parts(transport, config.api_root(), credentials)
    }

    fn from_parts(transport: T, api_root: String, credentials: Credentials) -> Self {
        Self {
            transport,
            api_root,
            credentials: RwLock::new(Arc::new(credentials)),
        }
    }

    /// The credential pair calls are currently made with.
    pub async fn credentials(&self) -> Arc<Credentials> {
        Arc::clone(&*self.credentials.read().await)
    }

    /// Obtain a fresh token and use it for every call made from now on.
    ///
    /// Calls already in flight finish with the pair they started with. On
    /// failure the current pair is kept.
    ///
    /// # Errors
    /// Same as [`auth::authenticate`].
    pub async fn reauthenticate(&self, username: &str, password: &str) -> Result<(), CiceroError> {
        let fresh = auth::authenticate(&self.transport, &self.api_root, username, password).await?;
        *self.credentials.write().await = Arc::new(fresh);
        tracing::debug!("replaced API token");
        Ok(())
    }

    /// Call `endpoint` and return the parsed body without decoding it.
    ///
    /// The `id` of `params` becomes a path segment. Only non-2xx statuses are
    /// turned into errors; an `errors` list in a 2xx body is left to the caller.
    ///
    /// # Errors
    /// Returns [`CiceroError::Api`] on a non-2xx status,
    /// [`CiceroError::Network`] when no response was obtained and
    /// [`CiceroError::Decode`] when the body is not JSON.
    pub async fn fetch_raw(
        &self,
        endpoint: Endpoint,
        params: &QueryParams,
    ) -> Result<Value, CiceroError> {
        let segments: Vec<&str> = params.object_id().into_iter().collect();
        let (_, body) = self.get_json(endpoint, &segments, params).await?;
        Ok(body)
    }

    async fn get_json(
        &self,
        endpoint: Endpoint,
        segments: &[&str],
        params: &QueryParams,
    ) -> Result<(u16, Value), CiceroError> {
        let credentials = if endpoint.requires_credentials() {
            Some(self.credentials().await)
        } else {
            None
        };
        let url = compose_request_url(
            &self.api_root,
            endpoint,
            segments,
            credentials.as_deref(),
            params,
        );

        tracing::debug!(endpoint = endpoint.path(), "sending Cicero request");
        let response = self.transport.get(&url).await?;
        tracing::debug!(
            endpoint = endpoint.path(),
            status = response.status,
            "received Cicero response"
        );

        if !response.is_success() {
            let err = CiceroError::from_failure(response.status, &response.body);
            tracing::warn!(
                endpoint = endpoint.path(),
                status = response.status,
                error = %err,
                "Cicero API returned an error"
            );
            return Err(err);
        }

        let body = serde_json::from_str(&response.body)
            .map_err(|e| DecodeError::new("<body>", e))?;
        Ok((response.status, body))
    }

    async fn call(
        &self,
        endpoint: Endpoint,
        segments: &[&str],
        params: &QueryParams,
    ) -> Result<Root, CiceroError> {
        let (status, body) = self.get_json(endpoint, segments, params).await?;

        let errors = envelope_errors(&body);
        if !errors.is_empty() {
            let err = CiceroError::Api { status, errors };
            tracing::warn!(
                endpoint = endpoint.path(),
                status,
                error = %err,
                "Cicero API returned an error"
            );
            return Err(err);
        }

        Ok(Root::decode(body)?)
    }

    async fn query(&self, endpoint: Endpoint, params: &QueryParams) -> Result<Root, CiceroError> {
        let segments: Vec<&str> = params.object_id().into_iter().collect();
        self.call(endpoint, &segments, params).await
    }
}

#[async_trait]
impl<T: Transport> CiceroApi for CiceroClient<T> {
    async fn official(&self, params: QueryParams) -> Result<Root, CiceroError> {
        self.query(Endpoint::Official, &params).await
    }

    async fn election_event(&self, params: QueryParams) -> Result<Root, CiceroError> {
        self.query(Endpoint::ElectionEvent, &params).await
    }

    async fn legislative_district(&self, params: QueryParams) -> Result<Root, CiceroError> {
        self.query(Endpoint::LegislativeDistrict, &params).await
    }

    async fn nonlegislative_district(&self, params: QueryParams) -> Result<Root, CiceroError> {
        self.query(Endpoint::NonlegislativeDistrict, &params).await
    }

    async fn map(&self, params: QueryParams) -> Result<Root, CiceroError> {
        self.query(Endpoint::Map, &params).await
    }

    async fn district_types(&self) -> Result<Root, CiceroError> {
        self.call(Endpoint::DistrictType, &[], &QueryParams::new())
            .await
    }

    async fn credits_remaining(&self) -> Result<Root, CiceroError> {
        self.call(Endpoint::AccountCreditsRemaining, &[], &QueryParams::new())
            .await
    }

    async fn account_usage(
        &self,
        first: &str,
        second: Option<&str>,
    ) -> Result<Root, CiceroError> {
        let segments = usage_segments(first, second);
        self.call(Endpoint::AccountUsage, &segments, &QueryParams::new())
            .await
    }

    async fn version(&self) -> Result<Root, CiceroError> {
        self.call(Endpoint::Version, &[], &QueryParams::new()).await
    }
}
