//! Seats.aero MCP Server library.
//!
//! Provides the [`server::SeatsMcpServer`] MCP server handler and tool parameter types.
//! Used by the `seats-aero-mcp` binary and available for integration testing.

pub mod server;
pub mod tools;
