//! Parameter structs for all MCP tools.
//!
//! Shape checks (types, enums, dates, list coercion, unknown fields) happen
//! during deserialization, with each message prefixed by the field name.
//! Numeric ranges are checked afterwards by [`ValidateParams::validate_params`].

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::Deserialize;
use validator::{Validate, ValidationErrors};

use seats_client::{Cabin, ClientError, ClientResult, Region};

use super::normalize::StringOrList;

/// Default page size for search and bulk availability.
pub const DEFAULT_TAKE: u32 = 50;
/// Default number of routes summarized in markdown.
pub const DEFAULT_ROUTE_LIMIT: u32 = 50;

fn default_take() -> u32 {
    DEFAULT_TAKE
}

fn default_route_limit() -> u32 {
    DEFAULT_ROUTE_LIMIT
}

/// Output rendering for every tool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ResponseFormat {
    /// Summary lines plus a fixed-column table.
    #[default]
    Markdown,
    /// Upstream payload, pretty-printed with sorted keys.
    Json,
}

/// Range checks that run after deserialization.
pub trait ValidateParams {
    fn validate_params(&self) -> ClientResult<()>;
}

impl<T: Validate> ValidateParams for T {
    fn validate_params(&self) -> ClientResult<()> {
        self.validate().map_err(validation_error)
    }
}

/// Flatten validator output into one deterministic message.
fn validation_error(errors: ValidationErrors) -> ClientError {
    let mut messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                let reason = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string());
                format!("{field}: {reason}")
            })
        })
        .collect();
    messages.sort();
    ClientError::Validation(messages.join("; "))
}

/// Per-field deserializers. Every failure message starts with the field name.
mod field {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer};

    use seats_client::{Cabin, Region};

    use super::ResponseFormat;
    use crate::tools::normalize::{self, named};

    macro_rules! named_fields {
        ($($func:ident($field:literal) -> $ty:ty = $parse:expr;)*) => {$(
            pub(super) fn $func<'de, D: Deserializer<'de>>(deserializer: D) -> Result<$ty, D::Error> {
                named($field, deserializer, $parse)
            }
        )*};
    }

    named_fields! {
        origin_airports("origin_airports") -> Vec<String> = |v| normalize::airports(v);
        destination_airports("destination_airports") -> Vec<String> = |v| normalize::airports(v);
        start_date("start_date") -> Option<NaiveDate> = |v| normalize::optional_date(v);
        end_date("end_date") -> Option<NaiveDate> = |v| normalize::optional_date(v);
        carriers("carriers") -> Option<Vec<String>> = |v| normalize::upper_list(v);
        sources("sources") -> Option<Vec<String>> = |v| normalize::lower_list(v);
        cabins("cabins") -> Option<Vec<Cabin>> = |v| normalize::cabin_list(v);
        cabin("cabin") -> Option<Cabin> = |v| normalize::optional_cabin(v);
        origin_region("origin_region") -> Option<Region> = |v| normalize::optional_region(v);
        destination_region("destination_region") -> Option<Region> = |v| normalize::optional_region(v);
        source("source") -> String = |v| normalize::required_program(v);
        source_filter("source") -> Option<String> = |v| normalize::optional_program(v);
        availability_id("availability_id") -> String = |v| normalize::required_trimmed(v);
        take("take") -> u32 = |v| u32::deserialize(v);
        limit("limit") -> u32 = |v| u32::deserialize(v);
        cursor("cursor") -> Option<u64> = |v| Option::<u64>::deserialize(v);
        skip("skip") -> Option<u64> = |v| Option::<u64>::deserialize(v);
        skip_rows("skip") -> u64 = |v| u64::deserialize(v);
        include_trips("include_trips") -> bool = |v| bool::deserialize(v);
        minify_trips("minify_trips") -> bool = |v| bool::deserialize(v);
        only_direct_flights("only_direct_flights") -> bool = |v| bool::deserialize(v);
        include_filtered("include_filtered") -> bool = |v| bool::deserialize(v);
        response_format("response_format") -> ResponseFormat = |v| ResponseFormat::deserialize(v);
    }
}

// ── seats_cached_search ──

/// Parameters for the `seats_cached_search` tool.
#[derive(Debug, Clone, Deserialize, JsonSchema, Validate)]
#[serde(deny_unknown_fields)]
pub struct CachedSearchParams {
    #[serde(deserialize_with = "field::origin_airports")]
    #[schemars(
        with = "StringOrList",
        description = "IATA origin airports, e.g. ['JFK', 'LAX'] or 'JFK,LAX'"
    )]
    pub origin_airports: Vec<String>,

    #[serde(deserialize_with = "field::destination_airports")]
    #[schemars(
        with = "StringOrList",
        description = "IATA destination airports, e.g. ['LHR'] or 'LHR,CDG'"
    )]
    pub destination_airports: Vec<String>,

    #[serde(default, deserialize_with = "field::start_date")]
    #[schemars(description = "Departures on or after this date (YYYY-MM-DD)")]
    pub start_date: Option<NaiveDate>,

    #[serde(default, deserialize_with = "field::end_date")]
    #[schemars(description = "Departures on or before this date (YYYY-MM-DD)")]
    pub end_date: Option<NaiveDate>,

    #[serde(default, deserialize_with = "field::cursor")]
    #[schemars(description = "Pagination cursor returned by a previous response")]
    pub cursor: Option<u64>,

    #[serde(default = "default_take", deserialize_with = "field::take")]
    #[validate(range(min = 10, max = 1000, message = "must be between 10 and 1000"))]
    #[schemars(description = "Maximum number of results to retrieve (10-1000, default 50)")]
    pub take: u32,

    #[serde(default, deserialize_with = "field::skip")]
    #[schemars(description = "Number of records to skip")]
    pub skip: Option<u64>,

    #[serde(default, deserialize_with = "field::include_trips")]
    #[schemars(description = "Include trip-level data (increases payload size)")]
    pub include_trips: bool,

    #[serde(default, deserialize_with = "field::minify_trips")]
    #[schemars(description = "When include_trips is true, return reduced trip fields")]
    pub minify_trips: bool,

    #[serde(default, deserialize_with = "field::only_direct_flights")]
    #[schemars(description = "Return only direct itineraries")]
    pub only_direct_flights: bool,

    #[serde(default, deserialize_with = "field::carriers")]
    #[schemars(
        with = "Option<StringOrList>",
        description = "Limit to these carriers, e.g. ['AA', 'BA']"
    )]
    pub carriers: Option<Vec<String>>,

    #[serde(default, deserialize_with = "field::sources")]
    #[schemars(
        with = "Option<StringOrList>",
        description = "Limit to these mileage programs, e.g. ['aeroplan']"
    )]
    pub sources: Option<Vec<String>>,

    #[serde(default, deserialize_with = "field::cabins")]
    #[schemars(
        with = "Option<StringOrList>",
        description = "Require these cabins to be available: economy, premium, business, first"
    )]
    pub cabins: Option<Vec<Cabin>>,

    #[serde(default, deserialize_with = "field::include_filtered")]
    #[schemars(description = "Include dynamically priced results that are normally filtered out")]
    pub include_filtered: bool,

    #[serde(default, deserialize_with = "field::response_format")]
    #[schemars(description = "'markdown' for a summary table or 'json' for the full payload")]
    pub response_format: ResponseFormat,
}

// ── seats_bulk_availability ──

/// Parameters for the `seats_bulk_availability` tool.
#[derive(Debug, Clone, Deserialize, JsonSchema, Validate)]
#[serde(deny_unknown_fields)]
pub struct BulkAvailabilityParams {
    #[serde(deserialize_with = "field::source")]
    #[schemars(description = "Mileage program, e.g. 'american' or 'aeroplan'")]
    pub source: String,

    /// Blank is treated as absent.
    #[serde(default, deserialize_with = "field::cabin")]
    #[schemars(description = "Restrict to one cabin: economy, premium, business, first")]
    pub cabin: Option<Cabin>,

    #[serde(default, deserialize_with = "field::start_date")]
    #[schemars(description = "Departures on or after this date (YYYY-MM-DD)")]
    pub start_date: Option<NaiveDate>,

    #[serde(default, deserialize_with = "field::end_date")]
    #[schemars(description = "Departures on or before this date (YYYY-MM-DD)")]
    pub end_date: Option<NaiveDate>,

    #[serde(default, deserialize_with = "field::origin_region")]
    #[schemars(description = "Only results originating in this region")]
    pub origin_region: Option<Region>,

    #[serde(default, deserialize_with = "field::destination_region")]
    #[schemars(description = "Only results arriving in this region")]
    pub destination_region: Option<Region>,

    #[serde(default = "default_take", deserialize_with = "field::take")]
    #[validate(range(min = 10, max = 1000, message = "must be between 10 and 1000"))]
    #[schemars(description = "Page size for the API call (10-1000, default 50)")]
    pub take: u32,

    #[serde(default, deserialize_with = "field::cursor")]
    #[schemars(description = "Cursor from a prior response")]
    pub cursor: Option<u64>,

    #[serde(default, deserialize_with = "field::skip_rows")]
    #[schemars(description = "Number of previously retrieved rows to skip when paginating")]
    pub skip: u64,

    #[serde(default, deserialize_with = "field::include_filtered")]
    #[schemars(description = "Include dynamically priced results that are otherwise filtered")]
    pub include_filtered: bool,

    #[serde(default, deserialize_with = "field::response_format")]
    #[schemars(description = "'markdown' for a summary table or 'json' for the full payload")]
    pub response_format: ResponseFormat,
}

// ── seats_list_routes ──

/// Parameters for the `seats_list_routes` tool.
#[derive(Debug, Clone, Deserialize, JsonSchema, Validate)]
#[serde(deny_unknown_fields)]
pub struct RoutesParams {
    #[serde(default, deserialize_with = "field::source_filter")]
    #[schemars(description = "Only routes for this mileage program")]
    pub source: Option<String>,

    #[serde(default = "default_route_limit", deserialize_with = "field::limit")]
    #[validate(range(min = 1, max = 200, message = "must be between 1 and 200"))]
    #[schemars(
        description = "Maximum routes to summarize in markdown (1-200, default 50). JSON returns all."
    )]
    pub limit: u32,

    #[serde(default, deserialize_with = "field::response_format")]
    #[schemars(description = "'markdown' for a summary table or 'json' for the full payload")]
    pub response_format: ResponseFormat,
}

// ── seats_trip_details ──

/// Parameters for the `seats_trip_details` tool.
#[derive(Debug, Clone, Deserialize, JsonSchema, Validate)]
#[serde(deny_unknown_fields)]
pub struct TripDetailsParams {
    #[serde(deserialize_with = "field::availability_id")]
    #[schemars(description = "Availability ID returned by cached search or bulk availability")]
    pub availability_id: String,

    #[serde(default, deserialize_with = "field::include_filtered")]
    #[schemars(description = "Include dynamically priced trips that might be filtered out")]
    pub include_filtered: bool,

    #[serde(default, deserialize_with = "field::response_format")]
    #[schemars(description = "'markdown' for trip blocks or 'json' for the full payload")]
    pub response_format: ResponseFormat,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn search(value: serde_json::Value) -> Result<CachedSearchParams, serde_json::Error> {
        serde_json::from_value(value)
    }

    #[test]
    fn test_cached_search_defaults() {
        let p = search(json!({"origin_airports": "jfk", "destination_airports": ["lhr"]})).unwrap();
        assert_eq!(p.origin_airports, vec!["JFK"]);
        assert_eq!(p.destination_airports, vec!["LHR"]);
        assert_eq!(p.take, 50);
        assert_eq!(p.skip, None);
        assert!(!p.include_trips);
        assert_eq!(p.response_format, ResponseFormat::Markdown);
        assert!(p.validate_params().is_ok());
    }

    #[test]
    fn test_cached_search_take_bounds() {
        for take in [10, 1000] {
            let p = search(json!({
                "origin_airports": "JFK", "destination_airports": "LHR", "take": take
            }))
            .unwrap();
            assert!(p.validate_params().is_ok(), "take={take}");
        }

        for take in [9, 1001] {
            let p = search(json!({
                "origin_airports": "JFK", "destination_airports": "LHR", "take": take
            }))
            .unwrap();
            let err = p.validate_params().unwrap_err();
            assert!(matches!(err, ClientError::Validation(_)));
            assert_eq!(
                err.to_string(),
                "Invalid input: take: must be between 10 and 1000"
            );
        }
    }

    #[test]
    fn test_negative_cursor_is_rejected() {
        assert!(search(json!({
            "origin_airports": "JFK", "destination_airports": "LHR", "cursor": -1
        }))
        .is_err());
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let err = search(json!({
            "origin_airports": "JFK", "destination_airports": "LHR", "origin": "SFO"
        }))
        .unwrap_err();
        assert!(err.to_string().contains("unknown field"));
    }

    #[test]
    fn test_missing_airports_rejected() {
        assert!(search(json!({"destination_airports": "LHR"})).is_err());
        let err = search(json!({"origin_airports": ",", "destination_airports": "LHR"}))
            .unwrap_err();
        assert!(err.to_string().contains("At least one airport is required"));
    }

    #[test]
    fn test_bulk_availability_normalization() {
        let p: BulkAvailabilityParams = serde_json::from_value(json!({
            "source": "  Aeroplan ",
            "cabin": "Business",
            "origin_region": "north america",
            "destination_region": "Europe"
        }))
        .unwrap();
        assert_eq!(p.source, "aeroplan");
        assert_eq!(p.cabin, Some(Cabin::Business));
        assert_eq!(p.origin_region, Some(Region::NorthAmerica));
        assert_eq!(p.destination_region, Some(Region::Europe));
        assert_eq!(p.skip, 0);
        assert_eq!(p.take, 50);
    }

    #[test]
    fn test_shape_errors_name_the_field() {
        let cases = [
            (json!({"origin_airports": "JFK", "destination_airports": "LHR", "start_date": "2024-13-40"}),
             "start_date: Invalid date '2024-13-40'. Expected YYYY-MM-DD."),
            (json!({"origin_airports": "JFK", "destination_airports": "LHR", "end_date": "soon"}),
             "end_date: Invalid date 'soon'. Expected YYYY-MM-DD."),
            (json!({"origin_airports": "JFK", "destination_airports": " , "}),
             "destination_airports: At least one airport is required"),
            (json!({"origin_airports": "JFK", "destination_airports": "LHR", "take": -5}),
             "take: "),
            (json!({"origin_airports": "JFK", "destination_airports": "LHR", "carriers": 5}),
             "carriers: "),
            (json!({"origin_airports": "JFK", "destination_airports": "LHR", "cabins": "coach"}),
             "cabins: Invalid cabin 'coach'"),
            (json!({"origin_airports": "JFK", "destination_airports": "LHR", "include_trips": "yes"}),
             "include_trips: "),
        ];
        for (input, prefix) in cases {
            let err = search(input.clone()).unwrap_err().to_string();
            assert!(err.starts_with(prefix), "{input}: {err}");
        }

        let err = serde_json::from_value::<BulkAvailabilityParams>(json!({
            "source": "aeroplan", "skip": -1
        }))
        .unwrap_err();
        assert!(err.to_string().starts_with("skip: "), "{err}");

        let err = serde_json::from_value::<RoutesParams>(json!({"limit": "many"})).unwrap_err();
        assert!(err.to_string().starts_with("limit: "), "{err}");

        let err = serde_json::from_value::<TripDetailsParams>(json!({"availability_id": " "}))
            .unwrap_err();
        assert_eq!(err.to_string(), "availability_id: value must not be blank");
    }

    #[test]
    fn test_bulk_availability_blank_enums_are_absent() {
        for blank in ["", "  "] {
            let p: BulkAvailabilityParams = serde_json::from_value(json!({
                "source": "aeroplan",
                "cabin": blank,
                "origin_region": blank,
                "destination_region": blank
            }))
            .unwrap();
            assert_eq!(p.cabin, None);
            assert_eq!(p.origin_region, None);
            assert_eq!(p.destination_region, None);
        }

        let p: BulkAvailabilityParams = serde_json::from_value(json!({
            "source": "aeroplan", "cabin": null, "origin_region": null
        }))
        .unwrap();
        assert_eq!(p.cabin, None);
        assert_eq!(p.origin_region, None);
    }

    #[test]
    fn test_bulk_availability_invalid_region() {
        let err = serde_json::from_value::<BulkAvailabilityParams>(json!({
            "source": "aeroplan",
            "origin_region": "Antarctica"
        }))
        .unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("origin_region: Invalid region 'Antarctica'"));
        assert!(message.contains("North America, South America, Africa, Asia, Europe, Oceania"));
    }

    #[test]
    fn test_bulk_availability_blank_source() {
        assert!(serde_json::from_value::<BulkAvailabilityParams>(json!({"source": "   "})).is_err());
    }

    #[test]
    fn test_routes_limit_bounds() {
        let p: RoutesParams = serde_json::from_value(json!({})).unwrap();
        assert_eq!(p.limit, 50);
        assert_eq!(p.source, None);

        let p: RoutesParams = serde_json::from_value(json!({"limit": 0, "source": " "})).unwrap();
        assert_eq!(p.source, None);
        let err = p.validate_params().unwrap_err();
        assert!(err.to_string().contains("limit: must be between 1 and 200"));

        let p: RoutesParams = serde_json::from_value(json!({"limit": 200})).unwrap();
        assert!(p.validate_params().is_ok());
    }

    #[test]
    fn test_trip_details_requires_id() {
        let p: TripDetailsParams =
            serde_json::from_value(json!({"availability_id": " abc123 "})).unwrap();
        assert_eq!(p.availability_id, "abc123");

        assert!(serde_json::from_value::<TripDetailsParams>(json!({"availability_id": ""})).is_err());
        assert!(serde_json::from_value::<TripDetailsParams>(json!({})).is_err());
    }

    #[test]
    fn test_response_format_json() {
        let p: TripDetailsParams = serde_json::from_value(json!({
            "availability_id": "x", "response_format": "json"
        }))
        .unwrap();
        assert_eq!(p.response_format, ResponseFormat::Json);

        assert!(serde_json::from_value::<TripDetailsParams>(json!({
            "availability_id": "x", "response_format": "xml"
        }))
        .is_err());
    }

    #[test]
    fn test_schema_advertises_string_or_list() {
        let schema = schemars::schema_for!(CachedSearchParams);
        let value = serde_json::to_value(&schema).unwrap();
        let origin = &value["properties"]["origin_airports"];
        let rendered = origin.to_string();
        assert!(rendered.contains("StringOrList") || rendered.contains("anyOf"));
        let required = value["required"].as_array().unwrap();
        assert!(required.contains(&json!("origin_airports")));
        assert!(!required.contains(&json!("take")));
    }
}
