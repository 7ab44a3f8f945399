//! Markdown and JSON rendering of upstream payloads.
//!
//! Every rendering is capped at [`CHARACTER_LIMIT`] characters. Markdown
//! tables show at most [`MAX_TABLE_ROWS`] rows (routes: the caller's limit).

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use seats_client::{AvailabilityRecord, ClientError, ClientResult, Page, Route, TripRecord};

use super::params::ResponseFormat;

pub const CHARACTER_LIMIT: usize = 25_000;
pub const MAX_TABLE_ROWS: usize = 50;
pub const NO_RECORDS: &str = "_No matching records were returned._";

const TRUNCATION_MARGIN: usize = 500;
const MISSING: &str = "?";
const DASH: &str = "—";

/// Cap `text` at [`CHARACTER_LIMIT`] characters, appending a notice when cut.
pub fn apply_limit(text: String) -> String {
    if text.chars().count() <= CHARACTER_LIMIT {
        return text;
    }
    let trimmed: String = text
        .chars()
        .take(CHARACTER_LIMIT - TRUNCATION_MARGIN)
        .collect();
    format!(
        "{trimmed}\n\n… Output truncated at {CHARACTER_LIMIT} characters. \
         Narrow your filters or request JSON for pagination metadata."
    )
}

/// Pretty JSON with object keys sorted at every depth.
pub fn to_json(payload: &Value) -> ClientResult<String> {
    let rendered = serde_json::to_string_pretty(&sort_keys(payload))
        .map_err(|e| ClientError::protocol(format!("Failed to render JSON: {e}")))?;
    Ok(apply_limit(rendered))
}

fn sort_keys(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let sorted: BTreeMap<&String, Value> =
                map.iter().map(|(k, v)| (k, sort_keys(v))).collect();
            Value::Object(
                sorted
                    .into_iter()
                    .map(|(k, v)| (k.clone(), v))
                    .collect::<Map<String, Value>>(),
            )
        }
        Value::Array(items) => Value::Array(items.iter().map(sort_keys).collect()),
        other => other.clone(),
    }
}

/// `| a | b |` header, `| --- | --- |` separator, one line per row.
pub fn table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let line = |cells: Vec<&str>| format!("| {} |", cells.join(" | "));
    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(line(headers.to_vec()));
    lines.push(line(vec!["---"; headers.len()]));
    lines.extend(
        rows.iter()
            .map(|row| line(row.iter().map(String::as_str).collect())),
    );
    lines.join("\n")
}

/// `12345` → `12,345`.
pub fn thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn summarize(meta: Vec<String>, headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut parts = meta;
    if rows.is_empty() {
        parts.push(format!("\n{NO_RECORDS}"));
    } else {
        parts.push(String::new());
        parts.push(table(headers, rows));
    }
    apply_limit(parts.join("\n"))
}

fn parse<T: DeserializeOwned>(endpoint: &str, payload: &Value) -> ClientResult<T> {
    serde_json::from_value(payload.clone()).map_err(|e| {
        ClientError::protocol(format!("Unexpected {endpoint} response shape: {e}"))
    })
}

fn or_missing(value: Option<&str>) -> &str {
    value.unwrap_or(MISSING)
}

fn route_label(route: &Route) -> String {
    format!(
        "{} → {}",
        or_missing(route.origin_airport.as_deref()),
        or_missing(route.destination_airport.as_deref())
    )
}

fn cabins_label(record: &AvailabilityRecord) -> String {
    let cabins = record.available_cabins();
    if cabins.is_empty() {
        return "None".to_string();
    }
    cabins
        .iter()
        .map(|c| c.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn miles_label(record: &AvailabilityRecord) -> String {
    record
        .lowest_mileage()
        .map(thousands)
        .unwrap_or_else(|| DASH.to_string())
}

fn cursor_label(cursor: Option<&Value>) -> String {
    match cursor {
        None | Some(Value::Null) => DASH.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn count_label(count: Option<i64>) -> String {
    count.map_or_else(|| MISSING.to_string(), |c| c.to_string())
}

fn page_meta<T>(page: &Page<T>, first: String) -> Vec<String> {
    let mut meta = vec![
        first,
        format!("**Has more**: {}", page.has_more),
        format!("**Next cursor**: {}", cursor_label(page.cursor.as_ref())),
    ];
    if let Some(more_url) = page.more_url.as_deref().filter(|u| !u.is_empty()) {
        meta.push(format!(
            "Use `cursor={}` or `skip` via {more_url} for the next page.",
            cursor_label(page.cursor.as_ref())
        ));
    }
    meta
}

/// Render a `/search` payload.
pub fn cached_search(payload: &Value, format: ResponseFormat) -> ClientResult<String> {
    if format == ResponseFormat::Json {
        return to_json(payload);
    }
    let page: Page<AvailabilityRecord> = parse("/search", payload)?;

    let rows: Vec<Vec<String>> = page
        .data
        .iter()
        .take(MAX_TABLE_ROWS)
        .map(|record| {
            vec![
                or_missing(record.date.as_deref()).to_string(),
                route_label(&record.route),
                cabins_label(record),
                miles_label(record),
                or_missing(record.route.source.as_deref()).to_string(),
                if record.any_direct() { "Yes" } else { "Mixed" }.to_string(),
            ]
        })
        .collect();

    let meta = page_meta(
        &page,
        format!(
            "**Returned** {} of {} records.",
            page.data.len(),
            count_label(page.count)
        ),
    );
    Ok(summarize(
        meta,
        &["Date", "Route", "Cabins", "Lowest miles", "Program", "Direct"],
        &rows,
    ))
}

/// Render an `/availability` payload.
pub fn availability(payload: &Value, format: ResponseFormat) -> ClientResult<String> {
    if format == ResponseFormat::Json {
        return to_json(payload);
    }
    let page: Page<AvailabilityRecord> = parse("/availability", payload)?;

    let rows: Vec<Vec<String>> = page
        .data
        .iter()
        .take(MAX_TABLE_ROWS)
        .map(|record| {
            vec![
                or_missing(record.date.as_deref()).to_string(),
                route_label(&record.route),
                cabins_label(record),
                miles_label(record),
                or_missing(record.program()).to_string(),
                record.y_remaining_seats.unwrap_or(0).to_string(),
            ]
        })
        .collect();

    let meta = page_meta(
        &page,
        format!(
            "**Returned** {} records from {}.",
            page.data.len(),
            count_label(page.count)
        ),
    );
    Ok(summarize(
        meta,
        &["Date", "Route", "Cabins", "Lowest miles", "Program", "Y seats"],
        &rows,
    ))
}

/// Render a `/routes` payload (a bare array). JSON mode returns every route.
pub fn routes(payload: &Value, format: ResponseFormat, limit: usize) -> ClientResult<String> {
    if format == ResponseFormat::Json {
        return to_json(payload);
    }
    let routes: Vec<Route> = parse("/routes", payload)?;

    let rows: Vec<Vec<String>> = routes
        .iter()
        .take(limit)
        .map(|route| {
            vec![
                route_label(route),
                format!(
                    "{} / {}",
                    or_missing(route.origin_region.as_deref()),
                    or_missing(route.destination_region.as_deref())
                ),
                route
                    .num_days_out
                    .map_or_else(|| MISSING.to_string(), |d| d.to_string()),
                format!("{} mi", thousands(route.distance.unwrap_or(0))),
                or_missing(route.source.as_deref()).to_string(),
            ]
        })
        .collect();

    let mut meta = vec![format!("**Total routes retrieved**: {}", routes.len())];
    if routes.len() > limit {
        meta.push(format!("Showing first {limit}."));
    }
    Ok(summarize(
        meta,
        &["Route", "Regions", "Days Out", "Distance", "Program"],
        &rows,
    ))
}

fn trip_block(index: usize, trip: &TripRecord) -> String {
    let cabin = trip.cabin.as_deref().unwrap_or(DASH);
    let mut lines = vec![
        format!(
            "**Trip {index}:** {} → {}",
            or_missing(trip.origin_airport.as_deref()),
            or_missing(trip.destination_airport.as_deref())
        ),
        match trip.priced_mileage() {
            Some(miles) => format!("Cabin: {cabin} | Mileage: {}", thousands(miles)),
            None => format!("Cabin: {cabin}"),
        },
        format!(
            "Carriers: {} | Remaining seats: {}",
            trip.carriers.as_deref().unwrap_or(DASH),
            trip.remaining_seats
                .map_or_else(|| DASH.to_string(), |s| s.to_string())
        ),
    ];
    lines.extend(trip.segments.iter().map(|seg| {
        format!(
            "• {} {}→{} ({} → {}) {}",
            or_missing(seg.flight_number.as_deref()),
            or_missing(seg.origin_airport.as_deref()),
            or_missing(seg.destination_airport.as_deref()),
            or_missing(seg.departs_at.as_deref()),
            or_missing(seg.arrives_at.as_deref()),
            seg.cabin.as_deref().unwrap_or_default()
        )
        .trim_end()
        .to_string()
    }));
    lines.join("\n")
}

/// Render a `/trips/{id}` payload as numbered trip blocks.
pub fn trips(payload: &Value, format: ResponseFormat) -> ClientResult<String> {
    if format == ResponseFormat::Json {
        return to_json(payload);
    }
    let page: Page<TripRecord> = parse("/trips", payload)?;

    let header = format!("**Trips returned**: {}", page.data.len());
    if page.data.is_empty() {
        return Ok(apply_limit(format!("{header}\n\n{NO_RECORDS}")));
    }

    let blocks = std::iter::once(header).chain(
        page.data
            .iter()
            .enumerate()
            .map(|(i, trip)| trip_block(i + 1, trip)),
    );
    Ok(apply_limit(blocks.collect::<Vec<_>>().join("\n\n")))
}
