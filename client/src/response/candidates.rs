//! Geocoding candidates.
//!
//! A location query returns one candidate per address match. Every candidate
//! carries the same geocoding metadata plus exactly one list that depends on
//! the endpoint: officials, districts or election events.

use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::{
    deserialize_default_from_null, deserialize_option_number_from_string,
};
use serde_json::{Map, Value};

use super::entities::{Count, District, ElectionEvent, Official, OfficialSummary};
use super::{decode_value, required_list, DecodeError};

/// Fields shared by every geocoding candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateMetadata {
    /// Address text the geocoder matched.
    pub match_addr: Option<String>,
    /// Well-known id of the spatial reference of `x`/`y`.
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    pub wkid: Option<i64>,
    pub locator: Option<String>,
    pub locator_type: Option<String>,
    /// Geocoder confidence, 0 to 100.
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    pub score: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    pub x: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    pub y: Option<f64>,
    pub geoservice: Option<String>,
    #[serde(default, deserialize_with = "deserialize_default_from_null")]
    pub count: Count,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OfficialCandidate {
    #[serde(flatten)]
    pub metadata: CandidateMetadata,
    pub officials: Vec<Official>,
}

impl OfficialCandidate {
    /// Quick view of the officials in this candidate, in response order:
    /// last name, chamber, district type, district id and party.
    #[must_use]
    pub fn who_are_the_officials(&self) -> Vec<OfficialSummary> {
        self.officials
            .iter()
            .map(|official| official.summary(true))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistrictCandidate {
    #[serde(flatten)]
    pub metadata: CandidateMetadata,
    pub districts: Vec<District>,
}

/// Election events matched to a geocoded location.
///
/// Geocoded election event responses may repeat the same event several times,
/// not necessarily next to each other; duplicates share the same `id`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElectionEventCandidate {
    #[serde(flatten)]
    pub metadata: CandidateMetadata,
    pub election_events: Vec<ElectionEvent>,
}

/// Which variant a raw candidate decodes into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateShape {
    Officials,
    Districts,
    ElectionEvents,
    Unmatched,
}

impl CandidateShape {
    /// Tag a raw candidate by the first variant key it contains.
    #[must_use]
    pub fn classify(raw: &Map<String, Value>) -> Self {
        if raw.contains_key("officials") {
            Self::Officials
        } else if raw.contains_key("districts") {
            Self::Districts
        } else if raw.contains_key("election_events") {
            Self::ElectionEvents
        } else {
            Self::Unmatched
        }
    }
}

/// A geocoding candidate of any shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Candidate {
    Officials(OfficialCandidate),
    Districts(DistrictCandidate),
    ElectionEvents(ElectionEventCandidate),
    /// A candidate with none of the variant lists. The API is not expected to
    /// send one; only the metadata is decoded.
    Unmatched(CandidateMetadata),
}

impl Candidate {
    pub(crate) fn decode(raw: Value, path: &str) -> Result<Self, DecodeError> {
        let mut raw = super::into_object(raw, path)?;
        let candidate = match CandidateShape::classify(&raw) {
            CandidateShape::Officials => Self::Officials(OfficialCandidate {
                officials: required_list(&mut raw, "officials", path)?,
                metadata: metadata(raw, path)?,
            }),
            CandidateShape::Districts => Self::Districts(DistrictCandidate {
                districts: required_list(&mut raw, "districts", path)?,
                metadata: metadata(raw, path)?,
            }),
            CandidateShape::ElectionEvents => Self::ElectionEvents(ElectionEventCandidate {
                election_events: required_list(&mut raw, "election_events", path)?,
                metadata: metadata(raw, path)?,
            }),
            CandidateShape::Unmatched => {
                tracing::debug!(fragment = %path, "geocoding candidate has no known result list");
                Self::Unmatched(metadata(raw, path)?)
            }
        };
        Ok(candidate)
    }

    #[must_use]
    pub const fn shape(&self) -> CandidateShape {
        match self {
            Self::Officials(_) => CandidateShape::Officials,
            Self::Districts(_) => CandidateShape::Districts,
            Self::ElectionEvents(_) => CandidateShape::ElectionEvents,
            Self::Unmatched(_) => CandidateShape::Unmatched,
        }
    }

    /// Geocoding metadata, whatever the variant.
    #[must_use]
    pub const fn metadata(&self) -> &CandidateMetadata {
        match self {
            Self::Officials(c) => &c.metadata,
            Self::Districts(c) => &c.metadata,
            Self::ElectionEvents(c) => &c.metadata,
            Self::Unmatched(metadata) => metadata,
        }
    }
}

fn metadata(rest: Map<String, Value>, path: &str) -> Result<CandidateMetadata, DecodeError> {
    decode_value(Value::Object(rest), path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn base() -> Map<String, Value> {
        json!({
            "match_addr": "340 N 12th St, Philadelphia, PA, 19107",
            "wkid": 4326,
            "locator": "mmd",
            "locator_type": "point",
            "score": 100,
            "x": -75.158,
            "y": 39.959,
            "geoservice": "Bing",
            "count": {"from": 0, "to": 0, "total": 0}
        })
        .as_object()
        .cloned()
        .unwrap()
    }

    fn with(key: &str, value: Value) -> Value {
        let mut raw = base();
        raw.insert(key.to_string(), value);
        Value::Object(raw)
    }

    #[test]
    fn classifies_each_variant_key() {
        let cases = [
            ("officials", CandidateShape::Officials),
            ("districts", CandidateShape::Districts),
            ("election_events", CandidateShape::ElectionEvents),
            ("something_else", CandidateShape::Unmatched),
        ];

        for (key, expected) in cases {
            let candidate = Candidate::decode(with(key, json!([])), "c").unwrap();
            assert_eq!(candidate.shape(), expected, "key '{key}'");
            assert_eq!(candidate.metadata().score, Some(100.0));
            assert_eq!(candidate.metadata().wkid, Some(4326));
        }
    }

    #[test]
    fn officials_take_priority_over_districts() {
        let mut raw = base();
        raw.insert("officials".into(), json!([]));
        raw.insert("districts".into(), json!([]));

        assert_eq!(CandidateShape::classify(&raw), CandidateShape::Officials);
    }

    #[test]
    fn missing_count_and_metadata_are_tolerated() {
        let candidate = Candidate::decode(json!({"districts": []}), "c").unwrap();
        let metadata = candidate.metadata();
        assert_eq!(metadata.count, Count::default());
        assert!(metadata.match_addr.is_none());
    }

    #[test]
    fn bad_district_reports_index() {
        let err = Candidate::decode(
            with("districts", json!([{"district_type": "CENSUS"}, {"sk": "not-a-number"}])),
            "response.results.candidates[0]",
        )
        .unwrap_err();

        assert_eq!(err.fragment, "response.results.candidates[0].districts[1]");
    }

    #[test]
    fn serializes_metadata_flat() {
        let candidate = Candidate::decode(with("districts", json!([])), "c").unwrap();
        let value = serde_json::to_value(&candidate).unwrap();
        assert_eq!(value["geoservice"], "Bing");
        assert_eq!(value["districts"], json!([]));
        assert_eq!(value["count"]["from"], 0);
    }
}
