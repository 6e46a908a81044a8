//! Lenient scalar decoding for form-style JSON bodies.
//!
//! Admin clients send ids and coordinates either as JSON numbers or as
//! strings; both are accepted and normalised to text.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl Scalar {
    fn into_text(self) -> String {
        match self {
            Scalar::Text(s) => s,
            Scalar::Int(n) => n.to_string(),
            Scalar::Float(n) => n.to_string(),
            Scalar::Bool(b) => b.to_string(),
        }
    }
}

/// Decode an optional string, number or boolean as text; `null` is `None`.
pub(super) fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Scalar>::deserialize(deserializer)?.map(Scalar::into_text))
}

/// Parse an optional id in text form: blank is `None`, otherwise an integer.
pub(super) fn parse_id(raw: Option<&str>) -> Result<Option<i64>, std::num::ParseIntError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse::<i64>().map(Some),
    }
}

/// Treat a blank value as absent.
pub(super) fn non_blank(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Body {
        #[serde(default, deserialize_with = "text")]
        id: Option<String>,
    }

    fn decode(json: &str) -> Option<String> {
        serde_json::from_str::<Body>(json).expect("decode").id
    }

    #[test]
    fn text_accepts_numbers_strings_and_null() {
        assert_eq!(decode(r#"{"id": 9}"#).as_deref(), Some("9"));
        assert_eq!(decode(r#"{"id": "9"}"#).as_deref(), Some("9"));
        assert_eq!(decode(r#"{"id": 31.5}"#).as_deref(), Some("31.5"));
        assert_eq!(decode(r#"{"id": null}"#), None);
        assert_eq!(decode("{}"), None);
    }

    #[test]
    fn parse_id_treats_blank_as_absent() {
        assert_eq!(parse_id(None), Ok(None));
        assert_eq!(parse_id(Some("")), Ok(None));
        assert_eq!(parse_id(Some(" 12 ")), Ok(Some(12)));
        assert!(parse_id(Some("abc")).is_err());
    }

    #[test]
    fn non_blank_filters_whitespace() {
        assert_eq!(non_blank(Some("  ")), None);
        assert_eq!(non_blank(Some(" x ")), Some("x"));
        assert_eq!(non_blank(None), None);
    }
}
