#![deny(
    clippy::expect_used,
    clippy::panic,
    clippy::print_stdout,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used
)]

//! Typed client for the Cicero civic-data API.
//!
//! The crate is split along the path a call takes:
//!
//! - [`query`] and [`endpoints`] compose request URLs
//! - [`transport`] submits them ([`transport::ReqwestTransport`] in production)
//! - [`response`] decodes the JSON payload into a typed tree, picking the
//!   result and candidate shapes from the keys present in the payload
//! - [`client`] ties the three together behind the [`client::CiceroApi`] trait
//!
//! # Example
//!
//! ```ignore
//! use cicero_client::{CiceroApi, CiceroClient, Config, QueryParams};
//!
//! let config = Config::load()?;
//! let client = CiceroClient::connect(&config.api, "user", "pass").await?;
//! let root = client
//!     .official(QueryParams::new().param("search_loc", "340 N 12th St, Philadelphia, PA"))
//!     .await?;
//! ```

pub mod auth;
pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod query;
pub mod response;
pub mod transport;

pub use auth::Credentials;
pub use client::{CiceroApi, CiceroClient};
pub use config::Config;
pub use endpoints::Endpoint;
pub use error::CiceroError;
pub use query::QueryParams;
pub use response::{CiceroResponse, DecodeError, Results, Root};
