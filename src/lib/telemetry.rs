//! Structured logging setup and runtime telemetry events.

use anyhow::Result;
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::{fmt, EnvFilter};

use crate::cli::LogLevel;

/// Initialize JSON logging on stderr at the given level. Stdout carries the MCP protocol.
pub fn init_tracing(level: LogLevel) -> Result<()> {
    if tracing::dispatcher::has_been_set() {
        return Ok(());
    }

    let env_filter = EnvFilter::builder()
        .with_default_directive(level.as_filter().into())
        .parse_lossy("");
    fmt()
        .json()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_current_span(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow::anyhow!("failed to initialize tracing: {err}"))
}

/// Payload describing the server about to enter its serve loop.
#[derive(Debug, Serialize)]
pub struct RuntimeModeTelemetry<'a> {
    pub name: &'a str,
    pub version: &'a str,
    pub transport: &'a str,
    pub services: &'a [&'static str],
    pub tool_count: usize,
    pub token_present: bool,
}

/// Emit the serve-loop start event.
pub fn emit_runtime_mode(telemetry: &RuntimeModeTelemetry<'_>) {
    debug!(
        target: "mcp_digitalocean::runtime",
        name = telemetry.name,
        version = telemetry.version,
        transport = telemetry.transport,
        services = ?telemetry.services,
        tool_count = telemetry.tool_count,
        token_present = telemetry.token_present,
        "starting MCP server"
    );
}

/// Emit the graceful shutdown event.
pub fn emit_graceful_shutdown() {
    info!(
        target: "mcp_digitalocean::runtime",
        "Server shutdown gracefully"
    );
}
