//! Upstream record types and the closed enums shared with tool parameters.
//!
//! Seats.aero returns PascalCase records inside a camelCase page envelope.
//! Numeric fields arrive as numbers or numeric strings depending on the
//! endpoint, so they are parsed leniently: anything that is not a usable
//! integer becomes `None` instead of failing the whole page.

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// ── Cabin ──

/// Cabin class. Upstream encodes cabins by a single-letter code prefix on
/// record fields (`YAvailable`, `JMileageCost`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Cabin {
    Economy,
    Premium,
    Business,
    First,
}

impl Cabin {
    pub const ALL: [Cabin; 4] = [Cabin::Economy, Cabin::Premium, Cabin::Business, Cabin::First];

    pub fn as_str(self) -> &'static str {
        match self {
            Cabin::Economy => "economy",
            Cabin::Premium => "premium",
            Cabin::Business => "business",
            Cabin::First => "first",
        }
    }

    /// Field prefix used by upstream availability records.
    pub fn code(self) -> char {
        match self {
            Cabin::Economy => 'Y',
            Cabin::Premium => 'W',
            Cabin::Business => 'J',
            Cabin::First => 'F',
        }
    }
}

impl fmt::Display for Cabin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accepts any casing: "Business", "BUSINESS", " business ".
impl FromStr for Cabin {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        Cabin::ALL
            .into_iter()
            .find(|cabin| cabin.as_str() == normalized)
            .ok_or_else(|| {
                format!(
                    "Invalid cabin '{}'. Must be one of: economy, premium, business, first.",
                    s.trim()
                )
            })
    }
}

impl<'de> Deserialize<'de> for Cabin {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(D::Error::custom)
    }
}

// ── Region ──

/// Continental region used by the bulk availability filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, JsonSchema)]
pub enum Region {
    #[serde(rename = "North America")]
    NorthAmerica,
    #[serde(rename = "South America")]
    SouthAmerica,
    Africa,
    Asia,
    Europe,
    Oceania,
}

impl Region {
    pub const ALL: [Region; 6] = [
        Region::NorthAmerica,
        Region::SouthAmerica,
        Region::Africa,
        Region::Asia,
        Region::Europe,
        Region::Oceania,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Region::NorthAmerica => "North America",
            Region::SouthAmerica => "South America",
            Region::Africa => "Africa",
            Region::Asia => "Asia",
            Region::Europe => "Europe",
            Region::Oceania => "Oceania",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Region {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Region::ALL
            .into_iter()
            .find(|region| region.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                let allowed: Vec<&str> = Region::ALL.iter().map(|r| r.as_str()).collect();
                format!(
                    "Invalid region '{}'. Must be one of: {}.",
                    wanted,
                    allowed.join(", ")
                )
            })
    }
}

impl<'de> Deserialize<'de> for Region {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(D::Error::custom)
    }
}

// ── Page envelope ──

/// Paginated response wrapper used by `/search`, `/availability` and `/trips`.
#[derive(Debug, Clone, Deserialize)]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    #[serde(default, deserialize_with = "lenient_int")]
    pub count: Option<i64>,
    #[serde(rename = "hasMore", default, deserialize_with = "lenient_bool")]
    pub has_more: bool,
    /// Opaque; must be handed back to upstream exactly as received.
    #[serde(default)]
    pub cursor: Option<Value>,
    #[serde(rename = "moreURL", default, deserialize_with = "lenient_string")]
    pub more_url: Option<String>,
}

// ── Availability ──

/// A cached or bulk availability record for one route on one date.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct AvailabilityRecord {
    #[serde(rename = "ID", deserialize_with = "lenient_string")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub date: Option<String>,
    pub route: Route,
    #[serde(deserialize_with = "lenient_string")]
    pub source: Option<String>,

    #[serde(deserialize_with = "lenient_bool")]
    pub y_available: bool,
    #[serde(deserialize_with = "lenient_bool")]
    pub w_available: bool,
    #[serde(deserialize_with = "lenient_bool")]
    pub j_available: bool,
    #[serde(deserialize_with = "lenient_bool")]
    pub f_available: bool,

    #[serde(deserialize_with = "lenient_bool")]
    pub y_direct: bool,
    #[serde(deserialize_with = "lenient_bool")]
    pub w_direct: bool,
    #[serde(deserialize_with = "lenient_bool")]
    pub j_direct: bool,
    #[serde(deserialize_with = "lenient_bool")]
    pub f_direct: bool,

    #[serde(deserialize_with = "lenient_int")]
    pub y_mileage_cost: Option<i64>,
    #[serde(deserialize_with = "lenient_int")]
    pub w_mileage_cost: Option<i64>,
    #[serde(deserialize_with = "lenient_int")]
    pub j_mileage_cost: Option<i64>,
    #[serde(deserialize_with = "lenient_int")]
    pub f_mileage_cost: Option<i64>,

    #[serde(deserialize_with = "lenient_int")]
    pub y_remaining_seats: Option<i64>,
    #[serde(deserialize_with = "lenient_int")]
    pub w_remaining_seats: Option<i64>,
    #[serde(deserialize_with = "lenient_int")]
    pub j_remaining_seats: Option<i64>,
    #[serde(deserialize_with = "lenient_int")]
    pub f_remaining_seats: Option<i64>,
}

/// Per-cabin view of the flat upstream fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CabinFare {
    pub cabin: Cabin,
    pub available: bool,
    pub direct: bool,
    pub mileage_cost: Option<i64>,
    pub remaining_seats: Option<i64>,
}

impl AvailabilityRecord {
    pub fn fare(&self, cabin: Cabin) -> CabinFare {
        let (available, direct, mileage_cost, remaining_seats) = match cabin {
            Cabin::Economy => (
                self.y_available,
                self.y_direct,
                self.y_mileage_cost,
                self.y_remaining_seats,
            ),
            Cabin::Premium => (
                self.w_available,
                self.w_direct,
                self.w_mileage_cost,
                self.w_remaining_seats,
            ),
            Cabin::Business => (
                self.j_available,
                self.j_direct,
                self.j_mileage_cost,
                self.j_remaining_seats,
            ),
            Cabin::First => (
                self.f_available,
                self.f_direct,
                self.f_mileage_cost,
                self.f_remaining_seats,
            ),
        };
        CabinFare {
            cabin,
            available,
            direct,
            mileage_cost,
            remaining_seats,
        }
    }

    pub fn fares(&self) -> impl Iterator<Item = CabinFare> + '_ {
        Cabin::ALL.into_iter().map(|cabin| self.fare(cabin))
    }

    /// Cabins whose `<code>Available` flag is set, in Y, W, J, F order.
    pub fn available_cabins(&self) -> Vec<Cabin> {
        self.fares()
            .filter(|fare| fare.available)
            .map(|fare| fare.cabin)
            .collect()
    }

    /// Lowest strictly positive mileage cost across all cabins.
    ///
    /// Independent of the availability flags: a cabin may be flagged available
    /// without a priced cost, and a priced cabin may be flagged unavailable.
    pub fn lowest_mileage(&self) -> Option<i64> {
        self.fares()
            .filter_map(|fare| fare.mileage_cost)
            .filter(|cost| *cost > 0)
            .min()
    }

    /// Direct in economy, business or first. Premium (`WDirect`) is not consulted.
    pub fn any_direct(&self) -> bool {
        self.y_direct || self.j_direct || self.f_direct
    }

    /// Record-level program, falling back to the route's program.
    pub fn program(&self) -> Option<&str> {
        self.source.as_deref().or(self.route.source.as_deref())
    }
}

/// Route metadata, either embedded in an availability record or listed by `/routes`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Route {
    #[serde(rename = "ID", deserialize_with = "lenient_string")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub origin_airport: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub origin_region: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub destination_airport: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub destination_region: Option<String>,
    #[serde(deserialize_with = "lenient_int")]
    pub num_days_out: Option<i64>,
    #[serde(deserialize_with = "lenient_int")]
    pub distance: Option<i64>,
    #[serde(deserialize_with = "lenient_string")]
    pub source: Option<String>,
}

// ── Trips ──

/// Flight-level itinerary for an availability record.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct TripRecord {
    #[serde(rename = "ID", deserialize_with = "lenient_string")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub origin_airport: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub destination_airport: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub cabin: Option<String>,
    #[serde(deserialize_with = "lenient_int")]
    pub mileage_cost: Option<i64>,
    #[serde(deserialize_with = "lenient_string")]
    pub carriers: Option<String>,
    #[serde(deserialize_with = "lenient_int")]
    pub remaining_seats: Option<i64>,
    #[serde(rename = "AvailabilitySegments")]
    pub segments: Vec<Segment>,
}

impl TripRecord {
    /// Mileage cost if strictly positive.
    pub fn priced_mileage(&self) -> Option<i64> {
        self.mileage_cost.filter(|cost| *cost > 0)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Segment {
    #[serde(deserialize_with = "lenient_string")]
    pub flight_number: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub origin_airport: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub destination_airport: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub departs_at: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub arrives_at: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub cabin: Option<String>,
}

// ── Lenient field parsing ──

/// Integer from a JSON number or numeric string; anything else is `None`.
pub fn int_from_value(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f as i64))
        }
        _ => None,
    }
}

fn lenient_int<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(int_from_value))
}

fn lenient_bool<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Bool(b)) => b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => matches!(s.trim().to_lowercase().as_str(), "true" | "1"),
        _ => false,
    })
}

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}
