//! MCP ServerHandler implementation for Seats.aero.
//!
//! Four read-only tools, each forwarding one request to the partner API:
//!
//! - `seats_cached_search`: cached availability between origin/destination airports
//! - `seats_bulk_availability`: bulk availability for one mileage program
//! - `seats_list_routes`: routes tracked by Seats.aero
//! - `seats_trip_details`: flight-level itineraries for one availability record
//!
//! Invalid input surfaces as an MCP `invalid_params` error. Configuration,
//! upstream, protocol and network failures surface as a tool result with
//! `isError` set and a structured JSON body.

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, ErrorData, Implementation, ProtocolVersion, ServerCapabilities,
    ServerInfo,
};
use rmcp::{tool, tool_handler, tool_router, ServerHandler};
use tracing::{debug, warn};

use seats_client::{ClientError, ClientResult, SeatsClient};

use crate::tools::helpers::client_error_json;
use crate::tools::*;

const INSTRUCTIONS: &str = "Seats.aero exposes cached award (points and miles) availability.\n\
     Start with seats_cached_search for specific origin/destination airports, or \
     seats_bulk_availability to scan one mileage program by region and date.\n\
     seats_list_routes shows which routes a program tracks.\n\
     seats_trip_details takes an availability ID from either search and returns \
     flight-level segments.\n\
     List-like inputs accept a comma-separated string or an array. \
     Results default to markdown tables (at most 50 rows); pass response_format='json' \
     for the full payload and pagination metadata, then follow up with cursor or skip.";

/// Seats.aero MCP server handler.
#[derive(Debug, Clone)]
pub struct SeatsMcpServer {
    tool_router: ToolRouter<Self>,
    client: SeatsClient,
}

impl SeatsMcpServer {
    pub fn new(client: SeatsClient) -> Self {
        Self {
            tool_router: Self::tool_router(),
            client,
        }
    }

    pub fn client(&self) -> &SeatsClient {
        &self.client
    }
}

/// Map a tool outcome onto the MCP result/error split.
fn into_tool_result(tool: &str, outcome: ClientResult<String>) -> Result<CallToolResult, ErrorData> {
    match outcome {
        Ok(text) => {
            debug!(tool, chars = text.chars().count(), "Tool call succeeded");
            Ok(CallToolResult::success(vec![Content::text(text)]))
        }
        Err(ClientError::Validation(message)) => {
            debug!(tool, %message, "Rejected tool input");
            Err(ErrorData::invalid_params(message, None))
        }
        Err(err) => {
            warn!(tool, code = err.code(), error = %err, "Tool call failed");
            Ok(CallToolResult::error(vec![Content::text(client_error_json(
                &err,
            ))]))
        }
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for SeatsMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_03_26,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "seats-aero-mcp".to_string(),
                title: Some("Seats.aero MCP Server".to_string()),
                version: env!("CARGO_PKG_VERSION").to_string(),
                description: Some(
                    "MCP server exposing Seats.aero award availability: cached search, \
                     bulk availability, route listing, and trip details"
                        .to_string(),
                ),
                icons: None,
                website_url: Some("https://seats.aero".to_string()),
            },
            instructions: Some(INSTRUCTIONS.to_string()),
        }
    }
}

#[tool_router(router = tool_router)]
impl SeatsMcpServer {
    /// Search cached award availability between origin/destination pairs.
    #[tool(
        name = "seats_cached_search",
        description = "Search cached award availability between origin and destination airports. Provide at least one origin and one destination IATA code. Narrow with dates, mileage programs (sources), carriers and cabins. Results include pagination metadata; request more with `cursor` or `skip`.",
        annotations(
            title = "Seats.aero Cached Search",
            read_only_hint = true,
            destructive_hint = false,
            idempotent_hint = true,
            open_world_hint = true
        )
    )]
    pub async fn seats_cached_search(
        &self,
        Parameters(params): Parameters<CachedSearchParams>,
    ) -> Result<CallToolResult, ErrorData> {
        into_tool_result(
            "seats_cached_search",
            dispatch::cached_search(&self.client, params).await,
        )
    }

    /// Retrieve high-volume availability for a single mileage program.
    #[tool(
        name = "seats_bulk_availability",
        description = "Retrieve high-volume availability for a single mileage program. Filter by cabin, date range and origin/destination region. Paginate with `cursor`/`skip`. The dataset is large, so prefer tight filters.",
        annotations(
            title = "Seats.aero Bulk Availability",
            read_only_hint = true,
            destructive_hint = false,
            idempotent_hint = true,
            open_world_hint = true
        )
    )]
    pub async fn seats_bulk_availability(
        &self,
        Parameters(params): Parameters<BulkAvailabilityParams>,
    ) -> Result<CallToolResult, ErrorData> {
        into_tool_result(
            "seats_bulk_availability",
            dispatch::bulk_availability(&self.client, params).await,
        )
    }

    /// List routes tracked by Seats.aero.
    #[tool(
        name = "seats_list_routes",
        description = "List routes tracked by Seats.aero, optionally filtered by mileage program. Markdown summarizes up to `limit` routes; JSON returns every route.",
        annotations(
            title = "Seats.aero Get Routes",
            read_only_hint = true,
            destructive_hint = false,
            idempotent_hint = true,
            open_world_hint = true
        )
    )]
    pub async fn seats_list_routes(
        &self,
        Parameters(params): Parameters<RoutesParams>,
    ) -> Result<CallToolResult, ErrorData> {
        into_tool_result(
            "seats_list_routes",
            dispatch::list_routes(&self.client, params).await,
        )
    }

    /// Fetch flight-level itineraries for a cached availability record.
    #[tool(
        name = "seats_trip_details",
        description = "Fetch flight-level itinerary details (segments, carriers, mileage, remaining seats) for an availability ID returned by seats_cached_search or seats_bulk_availability.",
        annotations(
            title = "Seats.aero Trip Details",
            read_only_hint = true,
            destructive_hint = false,
            idempotent_hint = true,
            open_world_hint = true
        )
    )]
    pub async fn seats_trip_details(
        &self,
        Parameters(params): Parameters<TripDetailsParams>,
    ) -> Result<CallToolResult, ErrorData> {
        into_tool_result(
            "seats_trip_details",
            dispatch::trip_details(&self.client, params).await,
        )
    }
}
