//! Property tests for response decoding: lists come back in server order.

use cicero_client::{Results, Root};
use proptest::prelude::*;
use serde_json::{json, Value};

fn label() -> impl Strategy<Value = String> {
    "[A-Za-z0-9 ]{1,12}"
}

fn envelope(results: Value) -> Value {
    json!({"response": {"errors": [], "messages": [], "results": results}})
}

fn decode(results: Value) -> Results {
    Root::decode(envelope(results))
        .expect("generated payload should decode")
        .response
        .results
}

fn chamber(name_formal: &str) -> Value {
    json!({
        "name_formal": name_formal,
        "government": {"name": "Pennsylvania", "type": "STATE", "country": {"iso_2": "US"}}
    })
}

fn official(last_name: &str, streets: &[String], handles: &[String]) -> Value {
    let addresses: Vec<Value> = streets.iter().map(|s| json!({"address_1": s})).collect();
    let identifiers: Vec<Value> = handles
        .iter()
        .map(|h| json!({"identifier_type": "TWITTER", "identifier_value": h}))
        .collect();
    json!({
        "last_name": last_name,
        "addresses": addresses,
        "committees": [],
        "identifiers": identifiers,
        "office": {
            "district": {"district_type": "STATE_LOWER"},
            "representing_country": {},
            "chamber": chamber("Pennsylvania House of Representatives")
        }
    })
}

proptest! {
    #[test]
    fn districts_keep_server_order(labels in proptest::collection::vec(label(), 0..8)) {
        let districts: Vec<Value> = labels
            .iter()
            .enumerate()
            .map(|(i, l)| json!({"label": l, "district_id": i}))
            .collect();

        let Results::Districts(results) = decode(json!({"districts": districts})) else {
            panic!("expected districts");
        };
        let decoded: Vec<String> = results
            .districts
            .iter()
            .filter_map(|d| d.label.clone())
            .collect();
        prop_assert_eq!(decoded, labels);
    }

    #[test]
    fn officials_and_their_lists_keep_server_order(
        names in proptest::collection::vec(label(), 1..5),
        streets in proptest::collection::vec(label(), 0..4),
        handles in proptest::collection::vec(label(), 0..4)
    ) {
        let officials: Vec<Value> = names
            .iter()
            .map(|n| official(n, &streets, &handles))
            .collect();

        let Results::Officials(results) = decode(json!({"officials": officials})) else {
            panic!("expected officials");
        };
        let decoded: Vec<String> = results
            .officials
            .iter()
            .filter_map(|o| o.last_name.clone())
            .collect();
        prop_assert_eq!(decoded, names);

        for official in &results.officials {
            let decoded_streets: Vec<String> = official
                .addresses
                .iter()
                .filter_map(|a| a.address_1.clone())
                .collect();
            prop_assert_eq!(&decoded_streets, &streets);

            let decoded_handles: Vec<String> = official
                .find_identifier("TWITTER")
                .iter()
                .filter_map(|id| id.identifier_value.clone())
                .collect();
            prop_assert_eq!(&decoded_handles, &handles);
        }
    }

    #[test]
    fn event_chambers_keep_server_order(names in proptest::collection::vec(label(), 0..6)) {
        let chambers: Vec<Value> = names.iter().map(|n| chamber(n)).collect();

        let Results::ElectionEvents(results) =
            decode(json!({"election_events": [{"label": "General", "chambers": chambers}]}))
        else {
            panic!("expected election events");
        };
        let decoded: Vec<String> = results.election_events[0]
            .chambers
            .iter()
            .filter_map(|c| c.name_formal.clone())
            .collect();
        prop_assert_eq!(decoded, names);
    }

    #[test]
    fn usage_months_keep_server_order(months in proptest::collection::vec(1i64..=12, 1..12)) {
        let usage: Vec<Value> = months
            .iter()
            .map(|m| json!({"year": 2013, "month": m, "activity_types": []}))
            .collect();

        let Results::AccountUsage(decoded) = decode(Value::Array(usage)) else {
            panic!("expected account usage");
        };
        let decoded: Vec<i64> = decoded.iter().filter_map(|u| u.month).collect();
        prop_assert_eq!(decoded, months);
    }
}
