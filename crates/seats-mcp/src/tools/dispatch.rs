//! Tool operations: validate, build the query, call upstream, format.
//!
//! Each function makes at most one upstream request. Range violations are
//! reported before any network I/O.

use seats_client::{ClientResult, SeatsClient};

use super::format;
use super::params::{
    BulkAvailabilityParams, CachedSearchParams, RoutesParams, TripDetailsParams, ValidateParams,
};
use super::query::ToQuery;

pub async fn cached_search(client: &SeatsClient, params: CachedSearchParams) -> ClientResult<String> {
    params.validate_params()?;
    let payload = client.search(params.to_query().as_slice()).await?;
    format::cached_search(&payload, params.response_format)
}

pub async fn bulk_availability(
    client: &SeatsClient,
    params: BulkAvailabilityParams,
) -> ClientResult<String> {
    params.validate_params()?;
    let payload = client.availability(params.to_query().as_slice()).await?;
    format::availability(&payload, params.response_format)
}

pub async fn list_routes(client: &SeatsClient, params: RoutesParams) -> ClientResult<String> {
    params.validate_params()?;
    let payload = client.routes(params.to_query().as_slice()).await?;
    format::routes(&payload, params.response_format, params.limit as usize)
}

pub async fn trip_details(client: &SeatsClient, params: TripDetailsParams) -> ClientResult<String> {
    params.validate_params()?;
    let payload = client
        .trip(&params.availability_id, params.to_query().as_slice())
        .await?;
    format::trips(&payload, params.response_format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use seats_client::{ClientConfig, ClientError};
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> SeatsClient {
        SeatsClient::new(
            ClientConfig::default()
                .with_base_url(server.uri())
                .with_token("test-token"),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_cached_search_end_to_end() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("origin_airport", "JFK"))
            .and(query_param("destination_airport", "LHR,CDG"))
            .and(query_param("cabins", "business"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [{
                    "Date": "2025-03-01",
                    "Route": {"OriginAirport": "JFK", "DestinationAirport": "LHR", "Source": "aeroplan"},
                    "JAvailable": true,
                    "JMileageCost": 60000
                }],
                "count": 1,
                "hasMore": false
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let params: CachedSearchParams = serde_json::from_value(json!({
            "origin_airports": "jfk",
            "destination_airports": "lhr, cdg",
            "cabins": ["Business"]
        }))
        .unwrap();

        let text = cached_search(&client_for(&mock_server), params).await.unwrap();
        assert!(text.contains("| 2025-03-01 | JFK → LHR | business | 60,000 | aeroplan | Mixed |"));
    }

    #[tokio::test]
    async fn test_out_of_range_take_never_calls_upstream() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
            .expect(0)
            .mount(&mock_server)
            .await;

        let params: BulkAvailabilityParams =
            serde_json::from_value(json!({"source": "aeroplan", "take": 5})).unwrap();
        let err = bulk_availability(&client_for(&mock_server), params)
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Validation(_)));

        mock_server.verify().await;
    }

    #[tokio::test]
    async fn test_routes_json_returns_all() {
        let mock_server = MockServer::start().await;

        let routes: Vec<_> = (0..5)
            .map(|i| json!({"OriginAirport": "LAX", "DestinationAirport": format!("X{i}")}))
            .collect();
        Mock::given(method("GET"))
            .and(path("/routes"))
            .and(query_param("source", "delta"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!(routes)))
            .mount(&mock_server)
            .await;

        let params: RoutesParams = serde_json::from_value(json!({
            "source": "Delta", "limit": 1, "response_format": "json"
        }))
        .unwrap();
        let text = list_routes(&client_for(&mock_server), params).await.unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed.as_array().map(Vec::len), Some(5));
    }

    #[tokio::test]
    async fn test_trip_details_upstream_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/trips/missing-id"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "not found"})))
            .mount(&mock_server)
            .await;

        let params: TripDetailsParams =
            serde_json::from_value(json!({"availability_id": "missing-id"})).unwrap();
        let err = trip_details(&client_for(&mock_server), params)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Seats.aero API error 404: not found");
    }
}
