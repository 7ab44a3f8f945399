//! Input normalization applied while deserializing tool parameters.
//!
//! List-like fields accept a single value, a comma-separated string, or an
//! array of strings. All three normalize to the same list: split on commas,
//! trim, drop blanks, apply case folding, deduplicate keeping first occurrence.

use std::collections::HashSet;
use std::fmt::Display;
use std::str::FromStr;

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use seats_client::{Cabin, Region};

/// Wire shape of a list-like field.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(untagged, expecting = "expected a comma-separated string or a list of strings")]
pub enum StringOrList {
    /// A single value or a comma-separated list, e.g. `"JFK,LAX"`.
    One(String),
    /// An array of values, e.g. `["JFK", "LAX"]`.
    Many(Vec<String>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Case {
    Upper,
    Lower,
}

impl Case {
    fn apply(self, value: &str) -> String {
        match self {
            Case::Upper => value.to_uppercase(),
            Case::Lower => value.to_lowercase(),
        }
    }
}

/// Split, trim, fold case and deduplicate. Order of first occurrence is kept.
pub fn normalize_list<'a, I>(items: I, case: Case) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    items
        .into_iter()
        .flat_map(|item| item.split(','))
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| case.apply(part))
        .filter(|part| seen.insert(part.clone()))
        .collect()
}

impl StringOrList {
    pub fn normalize(&self, case: Case) -> Vec<String> {
        match self {
            StringOrList::One(value) => normalize_list([value.as_str()], case),
            StringOrList::Many(values) => normalize_list(values.iter().map(String::as_str), case),
        }
    }
}

fn optional_list<'de, D: Deserializer<'de>>(
    deserializer: D,
    case: Case,
) -> Result<Option<Vec<String>>, D::Error> {
    let raw = Option::<StringOrList>::deserialize(deserializer)?;
    Ok(raw
        .map(|list| list.normalize(case))
        .filter(|list| !list.is_empty()))
}

/// Required IATA airport list, upper-cased. Empty after normalization is an error.
pub fn airports<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    let raw = StringOrList::deserialize(deserializer)?;
    let codes = raw.normalize(Case::Upper);
    if codes.is_empty() {
        return Err(D::Error::custom("At least one airport is required"));
    }
    Ok(codes)
}

/// Optional list, upper-cased (carrier codes).
pub fn upper_list<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Vec<String>>, D::Error> {
    optional_list(deserializer, Case::Upper)
}

/// Optional list, lower-cased (mileage program sources).
pub fn lower_list<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Vec<String>>, D::Error> {
    optional_list(deserializer, Case::Lower)
}

/// Optional list of cabins; every entry must be a known cabin.
pub fn cabin_list<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Vec<Cabin>>, D::Error> {
    let Some(names) = optional_list(deserializer, Case::Lower)? else {
        return Ok(None);
    };
    names
        .iter()
        .map(|name| name.parse::<Cabin>().map_err(D::Error::custom))
        .collect::<Result<Vec<_>, _>>()
        .map(Some)
}

/// Required string, trimmed, must not be blank.
pub fn required_trimmed<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let raw = String::deserialize(deserializer)?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(D::Error::custom("value must not be blank"));
    }
    Ok(trimmed.to_string())
}

/// Required mileage program identifier, trimmed and lower-cased.
pub fn required_program<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    required_trimmed(deserializer).map(|source| source.to_lowercase())
}

/// Optional mileage program identifier; blank becomes `None`.
pub fn optional_program<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw
        .map(|source| source.trim().to_lowercase())
        .filter(|source| !source.is_empty()))
}

/// Optional `YYYY-MM-DD` date. Surrounding whitespace is ignored; blank is `None`.
pub fn optional_date<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<NaiveDate>, D::Error> {
    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| D::Error::custom(format!("Invalid date '{trimmed}'. Expected YYYY-MM-DD.")))
}

/// Optional closed-enum value; blank becomes `None`, anything else must parse.
fn optional_parsed<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed.parse().map(Some).map_err(D::Error::custom)
}

pub fn optional_cabin<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Cabin>, D::Error> {
    optional_parsed(deserializer)
}

pub fn optional_region<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Region>, D::Error> {
    optional_parsed(deserializer)
}

/// Run `parse` on the raw field value and prefix any failure with `field`.
pub fn named<'de, D, T, F>(field: &str, deserializer: D, parse: F) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    F: FnOnce(Value) -> Result<T, serde_json::Error>,
{
    let value = Value::deserialize(deserializer)?;
    parse(value).map_err(|err| D::Error::custom(format!("{field}: {err}")))
}
