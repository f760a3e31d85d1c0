//! Entry point for the DigitalOcean MCP server.
use std::{process::ExitCode, time::Duration};

use clap::Parser;
use mcp_digitalocean::{
    cli::LaunchArgs,
    lib::telemetry,
    server::{
        config::ServerIdentity,
        runtime::{self, RuntimeExit, Termination},
    },
};

/// Grace period for runtime threads once the serve loop has returned.
const RUNTIME_SHUTDOWN_GRACE: Duration = Duration::from_millis(250);

fn main() -> ExitCode {
    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => return RuntimeExit::from_error(err).report(),
    };

    let exit_code = runtime.block_on(async {
        match bootstrap().await {
            Ok(termination) => termination.exit_code(),
            Err(exit) => exit.report(),
        }
    });
    // The stdio reader can stay blocked in read(2) after a signal; do not wait on it.
    runtime.shutdown_timeout(RUNTIME_SHUTDOWN_GRACE);
    exit_code
}

async fn bootstrap() -> Result<Termination, RuntimeExit> {
    let config = LaunchArgs::parse().resolve();
    telemetry::init_tracing(config.log_level).map_err(RuntimeExit::from_error)?;

    let shutdown = runtime::shutdown_on_signal();
    runtime::run_server(config, ServerIdentity::current(), shutdown).await
}
