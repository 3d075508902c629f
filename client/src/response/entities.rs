//! Records for every leaf and near-leaf object the Cicero API returns.
//!
//! Each struct is the single place its field contract is written down. Leaf
//! scalars are optional because the API omits them inconsistently; the nested
//! objects and lists a record owns are required, since a record without them
//! is a malformed payload rather than a sparse one.

use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::{
    deserialize_default_from_null, deserialize_option_number_from_string,
};
use serde_json::Value;

use super::de::option_string_from_number;

/// An external identifier attached to an official (Facebook page, Twitter
/// handle, Project VoteSmart id, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identifier {
    pub valid_from: Option<String>,
    pub valid_to: Option<String>,
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    pub sk: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    pub id: Option<i64>,
    /// Cicero id of the official owning this identifier.
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    pub official: Option<i64>,
    pub last_update_date: Option<String>,
    /// Open set of values such as `FACEBOOK`, `TWITTER`, `VOTESMART`.
    pub identifier_type: Option<String>,
    pub identifier_value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Committee {
    pub valid_from: Option<String>,
    pub valid_to: Option<String>,
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    pub sk: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    pub id: Option<i64>,
    pub description: Option<String>,
    pub last_update_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Country {
    pub status: Option<String>,
    pub name_short: Option<String>,
    pub name_short_iso: Option<String>,
    pub name_short_local: Option<String>,
    pub name_short_un: Option<String>,
    pub name_long: Option<String>,
    pub name_long_local: Option<String>,
    pub gmi_3: Option<String>,
    pub iso_3: Option<String>,
    pub iso_2: Option<String>,
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    pub iso_3_numeric: Option<i64>,
    pub valid_from: Option<String>,
    pub valid_to: Option<String>,
    pub last_update_date: Option<String>,
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    pub sk: Option<i64>,
    pub fips: Option<String>,
}

/// Level of government a chamber belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GovernmentType {
    Local,
    State,
    National,
    Transnational,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Government {
    pub city: Option<String>,
    pub state: Option<String>,
    pub name: Option<String>,
    pub notes: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<GovernmentType>,
    pub country: Country,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChamberType {
    Lower,
    Upper,
    Exec,
    #[serde(other)]
    Other,
}

/// The legislative or executive body an official serves in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chamber {
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    pub id: Option<i64>,
    #[serde(rename = "type")]
    pub kind: Option<ChamberType>,
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    pub official_count: Option<i64>,
    /// Whether every official of this chamber is available in Cicero.
    pub is_chamber_complete: Option<bool>,
    /// Whether membership is determined by geographic districts.
    pub has_geographic_representation: Option<bool>,
    pub name_native_language: Option<String>,
    pub name_formal: Option<String>,
    pub name: Option<String>,
    pub url: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub election_rules: Option<String>,
    pub election_frequency: Option<String>,
    pub term_length: Option<String>,
    pub term_limit: Option<String>,
    pub redistricting_rules: Option<String>,
    pub inauguration_rules: Option<String>,
    pub vacancy_rules: Option<String>,
    pub last_update_date: Option<String>,
    pub legislature_update_date: Option<String>,
    pub notes: Option<String>,
    pub remarks: Option<String>,
    pub government: Government,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElectionEvent {
    pub is_approximate: Option<bool>,
    pub is_national: Option<bool>,
    pub is_state: Option<bool>,
    pub is_by_election: Option<bool>,
    pub is_referendum: Option<bool>,
    pub is_primary_election: Option<bool>,
    pub is_runoff_election: Option<bool>,
    pub is_transnational: Option<bool>,
    pub election_date_text: Option<String>,
    pub valid_from: Option<String>,
    pub valid_to: Option<String>,
    pub last_update_date: Option<String>,
    pub label: Option<String>,
    pub remarks: Option<String>,
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    pub sk: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_default_from_null")]
    pub urls: Vec<String>,
    pub chambers: Vec<Chamber>,
}

/// A legislative or nonlegislative district.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct District {
    pub district_type: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub state: Option<String>,
    #[serde(default, deserialize_with = "option_string_from_number")]
    pub district_id: Option<String>,
    pub label: Option<String>,
    pub subtype: Option<String>,
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    pub sk: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    pub id: Option<i64>,
    pub valid_from: Option<String>,
    pub valid_to: Option<String>,
    pub last_update_date: Option<String>,
    /// Extra attributes whose keys differ for every district type (census,
    /// school, watershed, ...). Kept as raw JSON.
    pub data: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Office {
    pub valid_from: Option<String>,
    pub valid_to: Option<String>,
    pub representing_state: Option<String>,
    pub representing_city: Option<String>,
    pub notes: Option<String>,
    pub title: Option<String>,
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    pub sk: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    pub id: Option<i64>,
    pub last_update_date: Option<String>,
    pub election_rules: Option<String>,
    pub district: District,
    pub representing_country: Country,
    pub chamber: Chamber,
}

/// A physical office of an official, with phone and fax numbers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub county: Option<String>,
    pub postal_code: Option<String>,
    pub phone_1: Option<String>,
    pub phone_2: Option<String>,
    pub fax_1: Option<String>,
    pub fax_2: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub address_1: Option<String>,
    pub address_2: Option<String>,
    pub address_3: Option<String>,
}

fn present(field: Option<&String>) -> Option<&str> {
    field.map(String::as_str).filter(|s| !s.is_empty())
}

impl Address {
    /// Format this address for an envelope label.
    ///
    /// Street lines come first, one per line, followed by
    /// `city, [county, ]state postal_code`. Empty components are skipped
    /// together with the punctuation that would have joined them.
    #[must_use]
    pub fn formatted_mailing_address(&self, include_county: bool) -> String {
        let mut lines: Vec<String> = [&self.address_1, &self.address_2, &self.address_3]
            .into_iter()
            .filter_map(|line| present(line.as_ref()))
            .map(str::to_string)
            .collect();

        let mut locality: Vec<String> = Vec::new();
        if let Some(city) = present(self.city.as_ref()) {
            locality.push(city.to_string());
        }
        if include_county {
            if let Some(county) = present(self.county.as_ref()) {
                locality.push(county.to_string());
            }
        }

        let region: Vec<&str> = [present(self.state.as_ref()), present(self.postal_code.as_ref())]
            .into_iter()
            .flatten()
            .collect();
        if !region.is_empty() {
            locality.push(region.join(" "));
        }

        if !locality.is_empty() {
            lines.push(locality.join(", "));
        }
        lines.join("\n")
    }
}

/// An elected official, with the office they hold and how to reach them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Official {
    pub last_name: Option<String>,
    pub first_name: Option<String>,
    pub middle_initial: Option<String>,
    pub salutation: Option<String>,
    pub name_suffix: Option<String>,
    pub initial_term_start_date: Option<String>,
    pub current_term_start_date: Option<String>,
    pub term_end_date: Option<String>,
    pub web_form_url: Option<String>,
    pub photo_origin_url: Option<String>,
    pub party: Option<String>,
    #[serde(default, deserialize_with = "deserialize_default_from_null")]
    pub urls: Vec<String>,
    #[serde(default, deserialize_with = "deserialize_default_from_null")]
    pub email_addresses: Vec<String>,
    #[serde(default, deserialize_with = "deserialize_default_from_null")]
    pub notes: Vec<String>,
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    pub sk: Option<i64>,
    pub valid_from: Option<String>,
    pub valid_to: Option<String>,
    pub last_update_date: Option<String>,
    pub addresses: Vec<Address>,
    pub office: Office,
    pub committees: Vec<Committee>,
    pub identifiers: Vec<Identifier>,
}

impl Official {
    /// Identifiers whose `identifier_type` equals `identifier_type` exactly,
    /// in server order.
    #[must_use]
    pub fn find_identifier(&self, identifier_type: &str) -> Vec<&Identifier> {
        self.identifiers
            .iter()
            .filter(|identifier| identifier.identifier_type.as_deref() == Some(identifier_type))
            .collect()
    }

    pub(crate) fn summary(&self, with_district_id: bool) -> OfficialSummary {
        OfficialSummary {
            last_name: self.last_name.clone(),
            chamber_name_formal: self.office.chamber.name_formal.clone(),
            district_type: self.office.district.district_type.clone(),
            district_id: if with_district_id {
                self.office.district.district_id.clone()
            } else {
                None
            },
            party: self.party.clone(),
        }
    }
}

/// One row of the "who are the officials" quick view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OfficialSummary {
    pub last_name: Option<String>,
    pub chamber_name_formal: Option<String>,
    pub district_type: Option<String>,
    /// Only filled in for officials found through geocoding.
    pub district_id: Option<String>,
    pub party: Option<String>,
}

/// Pagination details: which slice of the full result set this response holds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Count {
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    pub to: Option<i64>,
    #[serde(rename = "from", default, deserialize_with = "deserialize_option_number_from_string")]
    pub from_: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    pub total: Option<i64>,
}

/// Bounding box of a map image, Web Mercator by default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    pub x_min: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    pub y_min: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    pub x_max: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    pub y_max: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    pub srid: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapImage {
    /// Temporary hosted image, deleted by the server after several days.
    pub url: Option<String>,
    /// Base64 image data, only sent when `include_image_data` is requested.
    pub img_src: Option<String>,
    pub extent: Extent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistrictType {
    pub name_short: Option<String>,
    pub name_long: Option<String>,
    pub notes: Option<String>,
    pub acknowledgements: Option<String>,
    pub is_legislative: Option<bool>,
}

/// A purchased block of credits. Money amounts are kept as the server's text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditBatch {
    #[serde(default, deserialize_with = "option_string_from_number")]
    pub discount: Option<String>,
    #[serde(default, deserialize_with = "option_string_from_number")]
    pub cost: Option<String>,
    pub created: Option<String>,
    pub expiration_time: Option<String>,
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    pub credits_remaining: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    pub credits_purchased: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityType {
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    pub count: Option<i64>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    pub credits_used: Option<i64>,
}

/// Credits and calls used in one month, broken down by call type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountUsage {
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    pub year: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    pub month: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    pub credits_used: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    pub count: Option<i64>,
    pub activity_types: Vec<ActivityType>,
}
