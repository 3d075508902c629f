//! The `results` value of a response and the dispatcher that decodes it.

use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_option_number_from_string;
use serde_json::{Map, Value};

use super::candidates::Candidate;
use super::entities::{
    AccountUsage, Count, CreditBatch, District, DistrictType, ElectionEvent, MapImage, Official,
    OfficialSummary,
};
use super::de::option_string_from_number;
use super::{
    decode_elements, decode_value, into_object, optional_field, optional_list, required_list,
    DecodeError,
};

/// Geocoded results: one candidate per address match.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeocodingResults {
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OfficialResults {
    pub count: Option<Count>,
    pub officials: Vec<Official>,
}

impl OfficialResults {
    /// Quick view of the officials in response order: last name, chamber,
    /// district type and party. Non-geocoded results leave `district_id` empty.
    #[must_use]
    pub fn who_are_the_officials(&self) -> Vec<OfficialSummary> {
        self.officials
            .iter()
            .map(|official| official.summary(false))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistrictResults {
    pub count: Option<Count>,
    pub districts: Vec<District>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElectionEventResults {
    pub count: Option<Count>,
    pub election_events: Vec<ElectionEvent>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapsResults {
    pub count: Option<Count>,
    pub maps: Vec<MapImage>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistrictTypeResults {
    pub count: Option<Count>,
    pub district_types: Vec<DistrictType>,
}

/// Account balance from `/account/credits_remaining`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreditsRemainingResults {
    pub count: Option<Count>,
    pub credit_balance: Option<i64>,
    /// How far below zero the balance may go before calls are refused.
    pub overdraft_limit: Option<i64>,
    pub usable_batches: Vec<CreditBatch>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionResult {
    pub count: Option<Count>,
    pub version: Option<String>,
}

/// Which container a raw `results` value decodes into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultShape {
    Geocoding,
    Officials,
    Districts,
    ElectionEvents,
    Maps,
    DistrictTypes,
    CreditsRemaining,
    Version,
    AccountUsage,
    Unknown,
}

/// Discriminating keys of object-shaped results, in priority order.
const OBJECT_SHAPES: [(&str, ResultShape); 8] = [
    ("candidates", ResultShape::Geocoding),
    ("officials", ResultShape::Officials),
    ("districts", ResultShape::Districts),
    ("election_events", ResultShape::ElectionEvents),
    ("maps", ResultShape::Maps),
    ("district_types", ResultShape::DistrictTypes),
    ("credit_balance", ResultShape::CreditsRemaining),
    ("version", ResultShape::Version),
];

impl ResultShape {
    /// Tag a raw `results` value.
    ///
    /// Objects are tagged by the first discriminating key they contain. The
    /// account usage endpoint is the only one returning a list, recognized by
    /// `activity_types` on its first element. Anything else is `Unknown`.
    #[must_use]
    pub fn classify(raw: &Value) -> Self {
        match raw {
            Value::Object(map) => OBJECT_SHAPES
                .iter()
                .find(|(key, _)| map.contains_key(*key))
                .map_or(Self::Unknown, |(_, shape)| *shape),
            Value::Array(items) => match items.first() {
                Some(Value::Object(first)) if first.contains_key("activity_types") => {
                    Self::AccountUsage
                }
                _ => Self::Unknown,
            },
            _ => Self::Unknown,
        }
    }
}

/// Decoded `results` of any endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Results {
    Geocoding(GeocodingResults),
    Officials(OfficialResults),
    Districts(DistrictResults),
    ElectionEvents(ElectionEventResults),
    Maps(MapsResults),
    DistrictTypes(DistrictTypeResults),
    CreditsRemaining(CreditsRemainingResults),
    Version(VersionResult),
    /// Monthly usage, oldest first as sent by the server.
    AccountUsage(Vec<AccountUsage>),
    /// A shape this client does not know, left as raw JSON for the caller.
    Unknown(Value),
}

impl Results {
    /// Decode a raw `results` value; `path` names it in errors.
    ///
    /// # Errors
    /// Returns a [`DecodeError`] when the payload has a known shape but lacks an
    /// element that shape requires. Unknown shapes never fail.
    pub fn decode(raw: Value, path: &str) -> Result<Self, DecodeError> {
        let results = match ResultShape::classify(&raw) {
            ResultShape::Unknown => {
                tracing::debug!(fragment = %path, "unrecognized results shape kept as raw JSON");
                Self::Unknown(raw)
            }
            ResultShape::AccountUsage => Self::AccountUsage(decode_elements(raw, path)?),
            ResultShape::Geocoding => {
                let mut map = into_object(raw, path)?;
                let candidates = required_list::<Value>(&mut map, "candidates", path)?
                    .into_iter()
                    .enumerate()
                    .map(|(index, raw)| {
                        Candidate::decode(raw, &format!("{path}.candidates[{index}]"))
                    })
                    .collect::<Result<_, _>>()?;
                Self::Geocoding(GeocodingResults { candidates })
            }
            ResultShape::Officials => {
                let (mut map, count) = container(raw, path)?;
                Self::Officials(OfficialResults {
                    count,
                    officials: required_list(&mut map, "officials", path)?,
                })
            }
            ResultShape::Districts => {
                let (mut map, count) = container(raw, path)?;
                Self::Districts(DistrictResults {
                    count,
                    districts: required_list(&mut map, "districts", path)?,
                })
            }
            ResultShape::ElectionEvents => {
                let (mut map, count) = container(raw, path)?;
                Self::ElectionEvents(ElectionEventResults {
                    count,
                    election_events: required_list(&mut map, "election_events", path)?,
                })
            }
            ResultShape::Maps => {
                let (mut map, count) = container(raw, path)?;
                Self::Maps(MapsResults {
                    count,
                    maps: required_list(&mut map, "maps", path)?,
                })
            }
            ResultShape::DistrictTypes => {
                let (mut map, count) = container(raw, path)?;
                Self::DistrictTypes(DistrictTypeResults {
                    count,
                    district_types: required_list(&mut map, "district_types", path)?,
                })
            }
            ResultShape::CreditsRemaining => {
                let (mut map, count) = container(raw, path)?;
                Self::CreditsRemaining(CreditsRemainingResults {
                    count,
                    credit_balance: optional_number(&mut map, "credit_balance", path)?,
                    overdraft_limit: optional_number(&mut map, "overdraft_limit", path)?,
                    usable_batches: optional_list(&mut map, "usable_batches", path)?,
                })
            }
            ResultShape::Version => {
                let (mut map, count) = container(raw, path)?;
                Self::Version(VersionResult {
                    count,
                    version: version(&mut map, path)?,
                })
            }
        };
        Ok(results)
    }

    /// The tag this value was decoded under.
    #[must_use]
    pub const fn shape(&self) -> ResultShape {
        match self {
            Self::Geocoding(_) => ResultShape::Geocoding,
            Self::Officials(_) => ResultShape::Officials,
            Self::Districts(_) => ResultShape::Districts,
            Self::ElectionEvents(_) => ResultShape::ElectionEvents,
            Self::Maps(_) => ResultShape::Maps,
            Self::DistrictTypes(_) => ResultShape::DistrictTypes,
            Self::CreditsRemaining(_) => ResultShape::CreditsRemaining,
            Self::Version(_) => ResultShape::Version,
            Self::AccountUsage(_) => ResultShape::AccountUsage,
            Self::Unknown(_) => ResultShape::Unknown,
        }
    }
}

/// Split a non-geocoded container into its remaining fields and its optional count.
fn container(raw: Value, path: &str) -> Result<(Map<String, Value>, Option<Count>), DecodeError> {
    let mut map = into_object(raw, path)?;
    let count = optional_field(&mut map, "count", path)?;
    Ok((map, count))
}

/// A whole-number field sent as either a number or numeric text.
fn optional_number(
    map: &mut Map<String, Value>,
    key: &'static str,
    path: &str,
) -> Result<Option<i64>, DecodeError> {
    #[derive(Deserialize)]
    struct Number(#[serde(deserialize_with = "deserialize_option_number_from_string")] Option<i64>);

    let raw = map.remove(key).unwrap_or(Value::Null);
    decode_value::<Number>(raw, &format!("{path}.{key}")).map(|n| n.0)
}

fn version(map: &mut Map<String, Value>, path: &str) -> Result<Option<String>, DecodeError> {
    #[derive(Deserialize)]
    struct Version(#[serde(deserialize_with = "option_string_from_number")] Option<String>);

    let raw = map.remove("version").unwrap_or(Value::Null);
    decode_value::<Version>(raw, &format!("{path}.version")).map(|v| v.0)
}
