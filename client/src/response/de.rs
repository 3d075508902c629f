//! Field-level deserialization helpers shared by the response records.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    Text(String),
    Number(serde_json::Number),
}

impl StringOrNumber {
    fn into_string(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Number(number) => number.to_string(),
        }
    }
}

/// Accept an optional text field that the API sometimes encodes as a number.
pub fn option_string_from_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<StringOrNumber>::deserialize(deserializer)?;
    Ok(value.map(StringOrNumber::into_string))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Field {
        #[serde(default, deserialize_with = "option_string_from_number")]
        value: Option<String>,
    }

    #[test]
    fn accepts_text_number_null_and_absent() {
        let cases = [
            (r#"{"value": "7"}"#, Some("7"), "text"),
            (r#"{"value": 7}"#, Some("7"), "integer"),
            (r#"{"value": 3.1}"#, Some("3.1"), "float"),
            (r#"{"value": null}"#, None, "null"),
            ("{}", None, "absent"),
        ];

        for (json, expected, desc) in cases {
            let field: Field = serde_json::from_str(json).unwrap();
            assert_eq!(field.value.as_deref(), expected, "case '{desc}'");
        }
    }

    #[test]
    fn rejects_structured_values() {
        let result = serde_json::from_str::<Field>(r#"{"value": [1]}"#);
        assert!(result.is_err());
    }
}
