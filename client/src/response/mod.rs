//! Decoding of Cicero API payloads into a typed tree.
//!
//! Every response has the same envelope:
//!
//! ```text
//! { "response": { "errors": [...], "messages": [...], "results": <shape> } }
//! ```
//!
//! but `results` has no single schema. Its shape depends on the endpoint and on
//! whether the query was geocoded, and carries no type tag, so the decoder looks
//! at which keys are present:
//!
//! - [`ResultShape::classify`] tags the `results` value ([`results`])
//! - [`CandidateShape::classify`] tags each geocoding candidate ([`candidates`])
//! - [`entities`] holds the records both of them build
//!
//! Shapes the classifier does not recognize are kept as raw JSON in
//! [`Results::Unknown`] or [`Candidate::Unmatched`] rather than failing.

pub mod candidates;
mod de;
pub mod entities;
pub mod results;

use serde::de::{DeserializeOwned, Error as _};
use serde::Serialize;
use serde_aux::field_attributes::deserialize_default_from_null;
use serde_json::{Map, Value};
use thiserror::Error;

pub use candidates::{
    Candidate, CandidateMetadata, CandidateShape, DistrictCandidate, ElectionEventCandidate,
    OfficialCandidate,
};
pub use entities::{
    AccountUsage, ActivityType, Address, Chamber, ChamberType, Committee, Count, Country,
    CreditBatch, District, DistrictType, ElectionEvent, Extent, Government, GovernmentType,
    Identifier, MapImage, Office, Official, OfficialSummary,
};
pub use results::{
    CreditsRemainingResults, DistrictResults, DistrictTypeResults, ElectionEventResults,
    GeocodingResults, MapsResults, OfficialResults, ResultShape, Results, VersionResult,
};

/// A payload fragment did not have the structure its record requires.
#[derive(Debug, Error)]
#[error("failed to decode `{fragment}`: {source}")]
pub struct DecodeError {
    /// Path of the failing fragment, e.g. `response.results.candidates[0].officials[2]`.
    pub fragment: String,
    #[source]
    pub source: serde_json::Error,
}

impl DecodeError {
    pub(crate) fn new(fragment: impl Into<String>, source: serde_json::Error) -> Self {
        Self {
            fragment: fragment.into(),
            source,
        }
    }

    fn missing(fragment: &str, key: &'static str) -> Self {
        Self::new(fragment, serde_json::Error::missing_field(key))
    }

    fn not_an_object(fragment: &str, found: &Value) -> Self {
        Self::new(
            fragment,
            serde_json::Error::custom(format!("expected a JSON object, found {}", kind_of(found))),
        )
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// The outermost envelope of every API response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Root {
    pub response: CiceroResponse,
}

/// Errors, messages and the endpoint-specific results of one call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CiceroResponse {
    pub errors: Vec<String>,
    pub messages: Vec<String>,
    pub results: Results,
}

impl Root {
    /// Parse a response body and decode it.
    ///
    /// # Errors
    /// Returns a [`DecodeError`] if the body is not JSON or if any fragment is
    /// missing a structurally required element.
    pub fn from_json(body: &str) -> Result<Self, DecodeError> {
        let raw: Value = serde_json::from_str(body).map_err(|e| DecodeError::new("<body>", e))?;
        Self::decode(raw)
    }

    /// Decode an already parsed response body.
    ///
    /// # Errors
    /// Returns a [`DecodeError`] naming the first fragment that failed.
    pub fn decode(raw: Value) -> Result<Self, DecodeError> {
        let mut root = into_object(raw, "<root>")?;
        let response = root
            .remove("response")
            .ok_or_else(|| DecodeError::missing("<root>", "response"))?;
        Ok(Self {
            response: CiceroResponse::decode(response, "response")?,
        })
    }
}

impl CiceroResponse {
    fn decode(raw: Value, path: &str) -> Result<Self, DecodeError> {
        let mut raw = into_object(raw, path)?;
        let errors = string_list(&mut raw, "errors", path)?;
        let messages = string_list(&mut raw, "messages", path)?;
        let results = raw
            .remove("results")
            .ok_or_else(|| DecodeError::missing(path, "results"))?;

        Ok(Self {
            errors,
            messages,
            results: Results::decode(results, &format!("{path}.results"))?,
        })
    }
}

fn into_object(raw: Value, path: &str) -> Result<Map<String, Value>, DecodeError> {
    match raw {
        Value::Object(map) => Ok(map),
        other => Err(DecodeError::not_an_object(path, &other)),
    }
}

/// Decode a whole fragment into one record.
fn decode_value<T: DeserializeOwned>(raw: Value, path: &str) -> Result<T, DecodeError> {
    serde_json::from_value(raw).map_err(|e| DecodeError::new(path, e))
}

/// Remove and decode a list that the record cannot exist without.
fn required_list<T: DeserializeOwned>(
    raw: &mut Map<String, Value>,
    key: &'static str,
    path: &str,
) -> Result<Vec<T>, DecodeError> {
    match raw.remove(key) {
        Some(value) => decode_elements(value, &format!("{path}.{key}")),
        None => Err(DecodeError::missing(path, key)),
    }
}

/// Decode a JSON list element by element so a failure names the offending index.
fn decode_elements<T: DeserializeOwned>(raw: Value, path: &str) -> Result<Vec<T>, DecodeError> {
    match raw {
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(index, item)| decode_value(item, &format!("{path}[{index}]")))
            .collect(),
        other => Err(DecodeError::new(
            path,
            serde_json::Error::invalid_type(unexpected(&other), &"a list"),
        )),
    }
}

fn unexpected(value: &Value) -> serde::de::Unexpected<'_> {
    use serde::de::Unexpected;
    match value {
        Value::Null => Unexpected::Unit,
        Value::Bool(b) => Unexpected::Bool(*b),
        Value::Number(_) => Unexpected::Other("number"),
        Value::String(s) => Unexpected::Str(s),
        Value::Array(_) => Unexpected::Seq,
        Value::Object(_) => Unexpected::Map,
    }
}

/// Remove and decode a field that may be absent.
fn optional_field<T: DeserializeOwned>(
    raw: &mut Map<String, Value>,
    key: &'static str,
    path: &str,
) -> Result<Option<T>, DecodeError> {
    raw.remove(key)
        .filter(|value| !value.is_null())
        .map(|value| decode_value(value, &format!("{path}.{key}")))
        .transpose()
}

/// Remove and decode a list that may be absent or null, element by element.
fn optional_list<T: DeserializeOwned>(
    raw: &mut Map<String, Value>,
    key: &'static str,
    path: &str,
) -> Result<Vec<T>, DecodeError> {
    match raw.remove(key) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(value) => decode_elements(value, &format!("{path}.{key}")),
    }
}

fn string_list(
    raw: &mut Map<String, Value>,
    key: &'static str,
    path: &str,
) -> Result<Vec<String>, DecodeError> {
    #[derive(serde::Deserialize)]
    struct Strings(#[serde(deserialize_with = "deserialize_default_from_null")] Vec<String>);

    let Some(value) = raw.remove(key) else {
        return Ok(Vec::new());
    };
    decode_value::<Strings>(value, &format!("{path}.{key}")).map(|list| list.0)
}
