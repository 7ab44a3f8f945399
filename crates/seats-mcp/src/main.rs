//! Seats.aero MCP Server
//!
//! Model Context Protocol server exposing Seats.aero award availability
//! (cached search, bulk availability, routes, trip details) to LLM agents
//! over stdio. Logs go to stderr; stdout carries the protocol.

use clap::{Parser, ValueEnum};
use rmcp::ServiceExt;
use tracing_subscriber::EnvFilter;

use seats_client::config::{BASE_URL_ENV, DEFAULT_BASE_URL, TOKEN_ENV};
use seats_client::{ClientConfig, SeatsClient};
use seats_mcp::server::SeatsMcpServer;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "seats-aero-mcp", version)]
#[command(about = "Seats.aero award availability MCP server (stdio)")]
struct Args {
    /// Seats.aero partner API token
    #[arg(long, env = TOKEN_ENV, hide_env_values = true)]
    token: Option<String>,

    /// Partner API base URL
    #[arg(long, env = BASE_URL_ENV, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Log output format (stderr)
    #[arg(long, value_enum, default_value = "pretty")]
    log_format: LogFormat,
}

fn init_tracing(format: LogFormat) -> anyhow::Result<()> {
    let filter = EnvFilter::from_default_env()
        .add_directive("seats_mcp=info".parse()?)
        .add_directive("seats_client=info".parse()?);
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match format {
        LogFormat::Pretty => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is normal.
    dotenvy::dotenv().ok();

    let args = Args::parse();
    init_tracing(args.log_format)?;

    let mut config = ClientConfig::default().with_base_url(args.base_url);
    if let Some(token) = args.token {
        config = config.with_token(token);
    }
    if config.partner_token().is_err() {
        tracing::warn!("{TOKEN_ENV} is not set; tool calls will fail until it is provided");
    }
    config.parsed_base_url()?;

    tracing::info!(base_url = %config.base_url, "seats-aero-mcp starting (stdio transport)");

    let server = SeatsMcpServer::new(SeatsClient::new(config)?);
    let transport = rmcp::transport::io::stdio();

    let service = server.serve(transport).await?;
    service.waiting().await?;

    Ok(())
}
