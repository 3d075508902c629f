//! Cicero API endpoints and request URL composition.
//!
//! All data endpoints are `GET`; the token endpoint is the only `POST`.

use crate::auth::Credentials;
use crate::query::{encode_pairs, QueryParams};

/// Root of every API URL.
pub const DEFAULT_SITE_ROOT: &str = "https://cicero.azavea.com/";

/// API version baked into every endpoint path.
pub const DEFAULT_API_VERSION: &str = "v3.1";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// Exchanges a username and password for a user id and token.
    Token,
    Official,
    /// Past and upcoming elections. Free of credits unless geocoding is used.
    ElectionEvent,
    LegislativeDistrict,
    /// Watershed, census, police, school, county and judicial districts.
    NonlegislativeDistrict,
    Map,
    DistrictType,
    AccountCreditsRemaining,
    AccountUsage,
    Version,
}

impl Endpoint {
    /// Path below the versioned API root.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Token => "token/new.json",
            Self::Official => "official",
            Self::ElectionEvent => "election_event",
            Self::LegislativeDistrict => "legislative_district",
            Self::NonlegislativeDistrict => "nonlegislative_district",
            Self::Map => "map",
            Self::DistrictType => "district_type",
            Self::AccountCreditsRemaining => "account/credits_remaining",
            Self::AccountUsage => "account/usage",
            Self::Version => "version",
        }
    }

    /// Whether calls must carry the user id and token.
    #[must_use]
    pub const fn requires_credentials(self) -> bool {
        !matches!(self, Self::Token | Self::Version)
    }
}

/// Build `<api_root><endpoint>[/<segment>...]?[user=..&token=..&]f=json[&<params>]`.
///
/// `segments` are percent-encoded individually and joined with `/`.
#[must_use]
pub fn compose_request_url(
    api_root: &str,
    endpoint: Endpoint,
    segments: &[&str],
    credentials: Option<&Credentials>,
    params: &QueryParams,
) -> String {
    let mut url = format!("{api_root}{}", endpoint.path());
    for segment in segments {
        url.push('/');
        url.push_str(&urlencoding::encode(segment));
    }

    let mut fixed: Vec<(&str, &str)> = Vec::with_capacity(3);
    if let Some(credentials) = credentials {
        fixed.push(("user", credentials.user_id.as_str()));
        fixed.push(("token", credentials.token.as_str()));
    }
    fixed.push(("f", "json"));

    url.push('?');
    url.push_str(&encode_pairs(fixed));

    let query = params.encode();
    if !query.is_empty() {
        url.push('&');
        url.push_str(&query);
    }
    url
}

/// Path segments of an `/account/usage` call: one period token, or a
/// `<first>/to/<second>` range.
#[must_use]
pub fn usage_segments<'a>(first: &'a str, second: Option<&'a str>) -> Vec<&'a str> {
    match second.filter(|s| !s.is_empty()) {
        Some(second) => vec![first, "to", second],
        None => vec![first],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROOT: &str = "https://cicero.azavea.com/v3.1/";

    fn credentials() -> Credentials {
        Credentials::new("42", "abc-123")
    }

    #[test]
    fn query_endpoint_with_params() {
        let params = QueryParams::new()
            .param("search_loc", "340 N 12th St")
            .any_of("district_type", ["STATE_LOWER", "STATE_UPPER"]);

        let url = compose_request_url(
            ROOT,
            Endpoint::Official,
            &[],
            Some(&credentials()),
            &params,
        );

        assert_eq!(
            url,
            "https://cicero.azavea.com/v3.1/official?user=42&token=abc-123&f=json\
             &search_loc=340%20N%2012th%20St&district_type=STATE_LOWER&district_type=STATE_UPPER"
        );
    }

    #[test]
    fn id_becomes_path_segment() {
        let params = QueryParams::new().id(2664).param("include_image_data", 1);
        let id = params.object_id().map(str::to_string);
        let segments: Vec<&str> = id.iter().map(String::as_str).collect();

        let url = compose_request_url(ROOT, Endpoint::Map, &segments, Some(&credentials()), &params);

        assert_eq!(
            url,
            "https://cicero.azavea.com/v3.1/map/2664?user=42&token=abc-123&f=json&include_image_data=1"
        );
    }

    #[test]
    fn version_has_no_credentials() {
        let url = compose_request_url(ROOT, Endpoint::Version, &[], None, &QueryParams::new());
        assert_eq!(url, "https://cicero.azavea.com/v3.1/version?f=json");
    }

    #[test]
    fn usage_range_path() {
        let url = compose_request_url(
            ROOT,
            Endpoint::AccountUsage,
            &usage_segments("2012-11", Some("2013")),
            Some(&credentials()),
            &QueryParams::new(),
        );
        assert_eq!(
            url,
            "https://cicero.azavea.com/v3.1/account/usage/2012-11/to/2013?user=42&token=abc-123&f=json"
        );
    }

    #[test]
    fn usage_segments_boundaries() {
        let cases = [
            ("2013", None, vec!["2013"], "single year"),
            ("2013-01", Some(""), vec!["2013-01"], "empty second token"),
            ("2013-01", Some("2013-05"), vec!["2013-01", "to", "2013-05"], "month range"),
        ];

        for (first, second, expected, desc) in cases {
            assert_eq!(usage_segments(first, second), expected, "case '{desc}'");
        }
    }

    #[test]
    fn only_token_and_version_skip_credentials() {
        let open = [Endpoint::Token, Endpoint::Version];
        let guarded = [
            Endpoint::Official,
            Endpoint::ElectionEvent,
            Endpoint::LegislativeDistrict,
            Endpoint::NonlegislativeDistrict,
            Endpoint::Map,
            Endpoint::DistrictType,
            Endpoint::AccountCreditsRemaining,
            Endpoint::AccountUsage,
        ];

        assert!(open.iter().all(|e| !e.requires_credentials()));
        assert!(guarded.iter().all(|e| e.requires_credentials()));
    }
}
