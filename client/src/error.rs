//! Errors surfaced by endpoint calls.

use serde_json::Value;
use thiserror::Error;

use crate::response::DecodeError;
use crate::transport::TransportError;

/// Everything that can go wrong with one API call.
///
/// None of these are retried by the client; the caller decides whether to
/// retry ([`CiceroError::Network`]), fix the query ([`CiceroError::Api`]) or
/// give up ([`CiceroError::Decode`]).
#[derive(Debug, Error)]
pub enum CiceroError {
    /// The API answered with an error list: a non-2xx status, or a 2xx
    /// response whose `errors` list is not empty.
    #[error("Cicero API error (status {status}): {}", errors.join("; "))]
    Api { status: u16, errors: Vec<String> },

    /// No response could be obtained from the API.
    #[error("unable to communicate with the Cicero API: {0}")]
    Network(#[from] TransportError),

    /// The response did not have the structure its endpoint requires.
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

impl CiceroError {
    /// Build a [`CiceroError::Api`] from a failed exchange.
    ///
    /// The error list is taken from `response.errors` when the body has the
    /// usual envelope, else from a top-level `errors` list. A body that is not
    /// JSON is kept verbatim as the only error.
    #[must_use]
    pub fn from_failure(status: u16, body: &str) -> Self {
        let errors = match serde_json::from_str::<Value>(body) {
            Ok(value) => envelope_errors(&value),
            Err(_) if body.trim().is_empty() => Vec::new(),
            Err(_) => vec![body.trim().to_string()],
        };
        Self::Api { status, errors }
    }

    /// HTTP status of an API error.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// The error list of a parsed body: `response.errors`, else a top-level
/// `errors`, else empty.
pub(crate) fn envelope_errors(body: &Value) -> Vec<String> {
    body.pointer("/response/errors")
        .or_else(|| body.get("errors"))
        .map(error_strings)
        .unwrap_or_default()
}

fn error_strings(errors: &Value) -> Vec<String> {
    match errors {
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::String(text) => text.clone(),
                other => other.to_string(),
            })
            .collect(),
        Value::Null => Vec::new(),
        Value::String(text) => vec![text.clone()],
        other => vec![other.to_string()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api_errors(err: CiceroError) -> (u16, Vec<String>) {
        match err {
            CiceroError::Api { status, errors } => (status, errors),
            other => (0, vec![other.to_string()]),
        }
    }

    #[test]
    fn failure_body_shapes() {
        let cases = [
            (
                r#"{"response": {"errors": ["Invalid token."], "messages": [], "results": {}}}"#,
                vec!["Invalid token."],
                "full envelope",
            ),
            (r#"{"errors": ["bad token"]}"#, vec!["bad token"], "bare errors"),
            (r#"{"errors": "bad token"}"#, vec!["bad token"], "single string"),
            (r#"{"errors": [{"code": 7}]}"#, vec![r#"{"code":7}"#], "structured entry"),
            (r#"{"detail": "nope"}"#, vec![], "no error list"),
            ("Service Unavailable", vec!["Service Unavailable"], "plain text"),
            ("   ", vec![], "blank body"),
        ];

        for (body, expected, desc) in cases {
            let (status, errors) = api_errors(CiceroError::from_failure(401, body));
            assert_eq!(status, 401, "case '{desc}'");
            assert_eq!(errors, expected, "case '{desc}'");
        }
    }

    #[test]
    fn display_lists_errors() {
        let err = CiceroError::Api {
            status: 400,
            errors: vec!["missing search_loc".into(), "bad max".into()],
        };
        assert_eq!(
            err.to_string(),
            "Cicero API error (status 400): missing search_loc; bad max"
        );
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn network_error_keeps_reason() {
        let err = CiceroError::from(TransportError::Connect("dns error: no such host".into()));
        assert!(err.to_string().contains("no such host"));
        assert_eq!(err.status(), None);
    }
}
