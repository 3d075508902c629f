//! Common test utilities for integration tests.
//!
//! - [`http_mock::MockHttpServer`] - declarative wiremock stubs for the Cicero API
//! - [`fixture`] - canned response bodies from `tests/fixtures/`

#![allow(dead_code)]

pub mod http_mock;

use serde_json::Value;

/// Load `tests/fixtures/<name>` as JSON.
pub fn fixture(name: &str) -> Value {
    let path = format!("{}/tests/fixtures/{name}", env!("CARGO_MANIFEST_DIR"));
    let body = std::fs::read_to_string(&path).expect("fixture should exist");
    serde_json::from_str(&body).expect("fixture should be JSON")
}
