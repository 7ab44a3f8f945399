//! Upstream query strings built from validated tool parameters.
//!
//! Absent values, empty lists and false flags are omitted. Lists are
//! comma-joined in their already-normalized case.

use std::fmt::Display;

use super::params::{BulkAvailabilityParams, CachedSearchParams, RoutesParams, TripDetailsParams};

/// Ordered `(key, value)` pairs for one upstream request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams(Vec<(&'static str, String)>);

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&mut self, key: &'static str, value: impl Display) -> &mut Self {
        self.0.push((key, value.to_string()));
        self
    }

    pub fn opt(&mut self, key: &'static str, value: Option<impl Display>) -> &mut Self {
        if let Some(value) = value {
            let rendered = value.to_string();
            if !rendered.is_empty() {
                self.0.push((key, rendered));
            }
        }
        self
    }

    pub fn list<T: Display>(&mut self, key: &'static str, items: Option<&[T]>) -> &mut Self {
        let joined = items
            .unwrap_or_default()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");
        if !joined.is_empty() {
            self.0.push((key, joined));
        }
        self
    }

    pub fn flag(&mut self, key: &'static str, enabled: bool) -> &mut Self {
        if enabled {
            self.0.push((key, "true".to_string()));
        }
        self
    }

    pub fn build(&mut self) -> Self {
        std::mem::take(self)
    }

    pub fn as_slice(&self) -> &[(&'static str, String)] {
        &self.0
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn keys(&self) -> Vec<&'static str> {
        self.0.iter().map(|(k, _)| *k).collect()
    }
}

/// Conversion of tool parameters into the query string of their endpoint.
pub trait ToQuery {
    fn to_query(&self) -> QueryParams;
}

impl ToQuery for CachedSearchParams {
    fn to_query(&self) -> QueryParams {
        QueryParams::new()
            .list("origin_airport", Some(self.origin_airports.as_slice()))
            .list("destination_airport", Some(self.destination_airports.as_slice()))
            .opt("start_date", self.start_date)
            .opt("end_date", self.end_date)
            .opt("cursor", self.cursor)
            .value("take", self.take)
            .opt("skip", self.skip)
            .flag("include_trips", self.include_trips)
            .flag("minify_trips", self.minify_trips)
            .flag("only_direct_flights", self.only_direct_flights)
            .list("carriers", self.carriers.as_deref())
            .list("sources", self.sources.as_deref())
            .list("cabins", self.cabins.as_deref())
            .flag("include_filtered", self.include_filtered)
            .build()
    }
}

impl ToQuery for BulkAvailabilityParams {
    fn to_query(&self) -> QueryParams {
        QueryParams::new()
            .value("source", &self.source)
            .opt("cabin", self.cabin)
            .opt("start_date", self.start_date)
            .opt("end_date", self.end_date)
            .opt("origin_region", self.origin_region)
            .opt("destination_region", self.destination_region)
            .value("take", self.take)
            .opt("cursor", self.cursor)
            .value("skip", self.skip)
            .flag("include_filtered", self.include_filtered)
            .build()
    }
}

impl ToQuery for RoutesParams {
    fn to_query(&self) -> QueryParams {
        QueryParams::new()
            .opt("source", self.source.as_deref())
            .build()
    }
}

impl ToQuery for TripDetailsParams {
    fn to_query(&self) -> QueryParams {
        QueryParams::new()
            .flag("include_filtered", self.include_filtered)
            .build()
    }
}
