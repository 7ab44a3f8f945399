//! MCP tool parameters and the validate → query → call → format pipeline.
//!
//! All parameter structs derive `Deserialize + JsonSchema` for MCP tool registration.

pub mod dispatch;
pub mod format;
pub mod helpers;
pub mod normalize;
pub mod params;
pub mod query;

pub use params::*;
