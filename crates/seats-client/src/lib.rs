//! # Seats.aero Client
//!
//! Async client for the Seats.aero partner API, the shared error type used
//! by the MCP tools, and typed views of the upstream records.

pub mod client;
pub mod config;
pub mod error;
pub mod models;

pub use client::SeatsClient;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use models::{AvailabilityRecord, Cabin, Page, Region, Route, Segment, TripRecord};
