//! Serde helpers for decimal fields on remote payloads.
//!
//! Remote systems disagree on how amounts travel: as JSON numbers, as numeric
//! strings, or as an empty string for "no value".

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serializer};

/// Accept a number, a numeric string, an empty string, or `null`.
///
/// # Errors
///
/// Fails on a non-numeric string or a non-scalar value.
pub fn deserialize_lenient<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    match value {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::Number(n)) => Decimal::from_str(&n.to_string())
            .or_else(|_| Decimal::from_scientific(&n.to_string()))
            .map(Some)
            .map_err(serde::de::Error::custom),
        Some(serde_json::Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(serde_json::Value::String(s)) => Decimal::from_str(s.trim())
            .map(Some)
            .map_err(serde::de::Error::custom),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected a decimal, got {other}"
        ))),
    }
}

/// Write an amount as a JSON number, or `null`.
///
/// # Errors
///
/// Fails if the decimal cannot be represented as a JSON number.
#[allow(clippy::ref_option)]
pub fn serialize_as_number<S>(value: &Option<Decimal>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        None => serializer.serialize_none(),
        Some(d) => {
            let number = serde_json::Number::from_str(&d.normalize().to_string())
                .map_err(serde::ser::Error::custom)?;
            serde::Serialize::serialize(&number, serializer)
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde::Serialize;

    use super::*;

    #[derive(Deserialize, Serialize)]
    struct Amount {
        #[serde(
            default,
            deserialize_with = "deserialize_lenient",
            serialize_with = "serialize_as_number"
        )]
        value: Option<Decimal>,
    }

    fn parse(json: &str) -> Option<Decimal> {
        serde_json::from_str::<Amount>(json).unwrap().value
    }

    #[test]
    fn test_lenient_accepts_every_shape() {
        assert_eq!(parse(r#"{"value":29.5}"#), Some(Decimal::new(295, 1)));
        assert_eq!(parse(r#"{"value":"29.50"}"#), Some(Decimal::new(2950, 2)));
        assert_eq!(parse(r#"{"value":600}"#), Some(Decimal::from(600)));
        assert_eq!(parse(r#"{"value":""}"#), None);
        assert_eq!(parse(r#"{"value":null}"#), None);
        assert_eq!(parse("{}"), None);
    }

    #[test]
    fn test_lenient_rejects_garbage() {
        assert!(serde_json::from_str::<Amount>(r#"{"value":"abc"}"#).is_err());
        assert!(serde_json::from_str::<Amount>(r#"{"value":true}"#).is_err());
    }

    #[test]
    fn test_serialize_as_number() {
        let json = serde_json::to_string(&Amount {
            value: Some(Decimal::new(60000, 2)),
        })
        .unwrap();
        assert_eq!(json, r#"{"value":600}"#);
        let json = serde_json::to_string(&Amount { value: None }).unwrap();
        assert_eq!(json, r#"{"value":null}"#);
    }
}
