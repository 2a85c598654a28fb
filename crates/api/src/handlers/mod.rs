//! Request handlers, one module per resource.

pub mod items;
pub mod notifications;
pub mod persons;
pub mod reports;
pub mod whatsapp;

use std::str::FromStr;

use milaap_core::error::CoreError;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Newest reports returned by the list endpoints.
pub const LIST_LIMIT: i64 = 50;

/// Deserialize an optional field sent either as a JSON string or a number,
/// keeping it as text.
pub(crate) fn text_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected a string or number, got {other}"
        ))),
    }
}

/// Parse a list filter where `all` (or an absent value) means no filter.
pub(crate) fn parse_filter<T>(raw: Option<&str>, default: Option<T>) -> Result<Option<T>, CoreError>
where
    T: FromStr<Err = CoreError>,
{
    match raw.map(str::trim) {
        None | Some("") => Ok(default),
        Some("all") => Ok(None),
        Some(value) => value.parse().map(Some),
    }
}
