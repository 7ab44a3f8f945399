//! HTTP client for the Seats.aero partner API.
//!
//! One request per call: `GET {base}/search`, `/availability`, `/routes`,
//! `/trips/{id}`. The partner token goes in the `Partner-Authorization`
//! header. No retries, no caching, and idle connections are not kept
//! between calls.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Method, StatusCode};
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

pub const PARTNER_AUTH_HEADER: &str = "Partner-Authorization";

/// Seats.aero partner API client.
#[derive(Debug, Clone)]
pub struct SeatsClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl SeatsClient {
    /// Build a client. The token is not required here; it is checked on each call.
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(concat!("seats-aero-mcp/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(config.connect_timeout)
            .read_timeout(config.read_timeout)
            .pool_max_idle_per_host(0)
            .build()?;

        Ok(Self { http, config })
    }

    /// Build from `SEATS_AERO_PARTNER_TOKEN` / `SEATS_AERO_BASE_URL`.
    pub fn from_env() -> ClientResult<Self> {
        Self::new(ClientConfig::from_env())
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Issue one request against `path` (relative to the base URL) and return the JSON body.
    pub async fn call(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
    ) -> ClientResult<Value> {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let url = self.endpoint(&segments)?;
        self.send(method, url, query).await
    }

    /// `GET /search`: cached search across origin/destination pairs.
    pub async fn search(&self, query: &[(&str, String)]) -> ClientResult<Value> {
        self.call(Method::GET, "/search", query).await
    }

    /// `GET /availability`: bulk availability for one mileage program.
    pub async fn availability(&self, query: &[(&str, String)]) -> ClientResult<Value> {
        self.call(Method::GET, "/availability", query).await
    }

    /// `GET /routes`: routes tracked by Seats.aero.
    pub async fn routes(&self, query: &[(&str, String)]) -> ClientResult<Value> {
        self.call(Method::GET, "/routes", query).await
    }

    /// `GET /trips/{availability_id}`. The id is sent as one percent-encoded segment.
    pub async fn trip(
        &self,
        availability_id: &str,
        query: &[(&str, String)],
    ) -> ClientResult<Value> {
        let url = self.endpoint(&["trips", availability_id])?;
        self.send(Method::GET, url, query).await
    }

    fn endpoint(&self, segments: &[&str]) -> ClientResult<Url> {
        let mut url = self.config.parsed_base_url()?;
        url.path_segments_mut()
            .map_err(|_| ClientError::config_error("Base URL cannot carry a path"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send(&self, method: Method, url: Url, query: &[(&str, String)]) -> ClientResult<Value> {
        // Checked before any I/O so a missing token never reaches the network.
        let token = self.config.partner_token()?;

        debug!(%method, path = url.path(), params = query.len(), "Calling Seats.aero");

        let response = self
            .http
            .request(method, url)
            .header(PARTNER_AUTH_HEADER, token)
            .query(query)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if status.as_u16() >= 400 {
            let message = error_message(status, &body);
            warn!(status = status.as_u16(), %message, "Seats.aero API error");
            return Err(ClientError::api_error(status.as_u16(), message));
        }

        serde_json::from_str(&body)
            .map_err(|e| ClientError::protocol(format!("Seats.aero returned invalid JSON: {e}")))
    }
}

/// Message for a failed response: the body's `error` field, then `message`,
/// then the raw body text, then the canonical status reason.
fn error_message(status: StatusCode, body: &str) -> String {
    let from_json = serde_json::from_str::<Value>(body).ok().and_then(|payload| {
        ["error", "message"]
            .iter()
            .find_map(|key| match payload.get(key) {
                Some(Value::String(s)) if !s.trim().is_empty() => Some(s.clone()),
                Some(Value::Null) | Some(Value::String(_)) | Some(Value::Bool(false)) | None => None,
                Some(other) => Some(other.to_string()),
            })
    });

    from_json.unwrap_or_else(|| {
        let text = body.trim();
        if text.is_empty() {
            status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_string()
        } else {
            text.to_string()
        }
    })
}
