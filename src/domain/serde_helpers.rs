//! Lenient readers for the persisted filter and record shapes, which were
//! written by HTML forms: empty strings stand for "unset" and numbers may be
//! stored as text.

use std::{fmt::Display, str::FromStr};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{de, Deserialize, Deserializer};

static LEADING_NUMBER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?")
        .expect("leading number pattern is valid")
});

/// Reads an optional string field through `FromStr`, treating `null`, a
/// missing value and blank text alike as `None`.
pub(crate) fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(de::Error::custom),
    }
}

/// Reads an amount stored either as a JSON number or as form text. Text is
/// read up to the first character that cannot continue a number; text with no
/// numeric prefix yields `None`.
pub(crate) fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    let raw: Option<Raw> = Option::deserialize(deserializer)?;
    Ok(match raw {
        None => None,
        Some(Raw::Number(value)) => Some(value),
        Some(Raw::Text(text)) => parse_number_prefix(&text),
    })
}

pub(crate) fn parse_number_prefix(text: &str) -> Option<f64> {
    let trimmed = text.trim_start();
    let matched = LEADING_NUMBER.find(trimmed)?;
    matched
        .as_str()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}
