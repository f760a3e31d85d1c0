use std::{fmt, process::ExitCode, sync::Arc};

use anyhow::anyhow;
use rmcp::{service::QuitReason, transport::IntoTransport, RoleServer, ServiceExt};
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error};

use crate::{
    cli::ProcessConfiguration,
    lib::{digitalocean::DigitalOceanClient, telemetry},
    server::{
        config::{self, ServerIdentity},
        runtime::DigitalOceanServer,
    },
    tools::registry,
};

const CLIENT_BUILD_FAILED: &str = "Failed to create DigitalOcean client: ";
const REGISTRATION_FAILED: &str = "Failed to register tools: ";
const SERVE_FAILED: &str = "Failed to serve MCP server: ";

/// Bootstrap lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Starting,
    Resolving,
    ClientReady,
    Registering,
    Serving,
    Terminated,
}

impl Phase {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Phase::Starting => "starting",
            Phase::Resolving => "resolving",
            Phase::ClientReady => "client_ready",
            Phase::Registering => "registering",
            Phase::Serving => "serving",
            Phase::Terminated => "terminated",
        }
    }
}

/// Current lifecycle phase; every transition is logged at debug level.
#[derive(Debug)]
pub struct Lifecycle {
    phase: Phase,
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}

impl Lifecycle {
    pub fn new() -> Self {
        Self {
            phase: Phase::Starting,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn advance(&mut self, next: Phase) {
        debug!(
            target: "mcp_digitalocean::runtime",
            from = self.phase.as_str(),
            to = next.as_str(),
            "Lifecycle transition"
        );
        self.phase = next;
    }

    /// Terminate with exit code 1, remembering the phase that failed.
    fn fail(&mut self, prefix: &str, err: impl fmt::Display) -> RuntimeExit {
        let failed_in = self.phase;
        self.advance(Phase::Terminated);
        RuntimeExit::failure(failed_in, format!("{prefix}{err}"))
    }
}

/// How the serve loop ended when it did not end cleanly.
#[derive(Debug, Error)]
pub enum ServeError {
    /// Operator shutdown or termination signal.
    #[error("serve loop cancelled")]
    Cancelled,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Non-failing ways the process can end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// The transport closed on its own.
    Completed,
    /// Graceful shutdown after cancellation.
    Cancelled,
}

impl Termination {
    pub fn exit_code(&self) -> ExitCode {
        ExitCode::SUCCESS
    }
}

/// Bundles a fatal runtime error message with its exit code and the phase it happened in.
#[derive(Debug)]
pub struct RuntimeExit {
    phase: Phase,
    message: String,
    exit_code: ExitCode,
}

impl RuntimeExit {
    pub fn failure(phase: Phase, message: String) -> Self {
        Self {
            phase,
            message,
            exit_code: ExitCode::FAILURE,
        }
    }

    pub fn from_error(err: impl Into<anyhow::Error>) -> Self {
        let err = err.into();
        Self::failure(Phase::Starting, format!("{err:#}"))
    }

    /// Log the single fatal error line and hand back the exit code.
    pub fn report(self) -> ExitCode {
        if tracing::dispatcher::has_been_set() {
            error!(
                target: "mcp_digitalocean::runtime",
                phase = self.phase.as_str(),
                "{}",
                self.message
            );
        } else {
            eprintln!("{}", self.message);
        }
        self.exit_code
    }

    pub fn exit_code(&self) -> ExitCode {
        self.exit_code
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Run the whole bootstrap over stdio until the transport closes or `shutdown` fires.
pub async fn run_server(
    config: ProcessConfiguration,
    identity: ServerIdentity,
    shutdown: CancellationToken,
) -> Result<Termination, RuntimeExit> {
    run_with_transport(config, identity, rmcp::transport::stdio(), "stdio", shutdown).await
}

/// Same as [`run_server`] over any rmcp transport; `transport_label` names it in logs.
pub async fn run_with_transport<T, E, A>(
    config: ProcessConfiguration,
    identity: ServerIdentity,
    transport: T,
    transport_label: &'static str,
    shutdown: CancellationToken,
) -> Result<Termination, RuntimeExit>
where
    T: IntoTransport<RoleServer, E, A>,
    E: std::error::Error + Send + Sync + 'static,
{
    let mut lifecycle = Lifecycle::new();
    lifecycle.advance(Phase::Resolving);
    let server = prepare_server(&mut lifecycle, &config, identity)?;

    lifecycle.advance(Phase::Serving);
    telemetry::emit_runtime_mode(&runtime_mode(&server, &identity, transport_label));

    let outcome = serve(server, transport, shutdown).await;
    interpret_serve_outcome(&mut lifecycle, outcome)
}

fn runtime_mode<'a>(
    server: &'a DigitalOceanServer,
    identity: &ServerIdentity,
    transport: &'a str,
) -> telemetry::RuntimeModeTelemetry<'a> {
    telemetry::RuntimeModeTelemetry {
        name: identity.name,
        version: identity.version,
        transport,
        services: server.active_services(),
        tool_count: server.tools().len(),
        token_present: !server.api().credential().is_missing(),
    }
}

/// Build the API client and register the requested services.
///
/// A missing token only logs a warning; client construction and registration errors are fatal.
pub fn prepare_server(
    lifecycle: &mut Lifecycle,
    config: &ProcessConfiguration,
    identity: ServerIdentity,
) -> Result<DigitalOceanServer, RuntimeExit> {
    config::telemetry::log_resolved(config, &identity);
    if config.credential.is_missing() {
        config::telemetry::warn_missing_token();
    }

    let client = DigitalOceanClient::build(&config.credential, &config.endpoint, &identity)
        .map_err(|err| lifecycle.fail(CLIENT_BUILD_FAILED, err))?;
    lifecycle.advance(Phase::ClientReady);

    let mut server = DigitalOceanServer::new(identity, Arc::new(client));
    lifecycle.advance(Phase::Registering);
    registry::register(&mut server, &config.requested_services)
        .map_err(|err| lifecycle.fail(REGISTRATION_FAILED, err))?;
    Ok(server)
}

/// Serve until the transport closes or `shutdown` is cancelled.
pub async fn serve<T, E, A>(
    server: DigitalOceanServer,
    transport: T,
    shutdown: CancellationToken,
) -> Result<(), ServeError>
where
    T: IntoTransport<RoleServer, E, A>,
    E: std::error::Error + Send + Sync + 'static,
{
    let running = tokio::select! {
        biased;
        _ = shutdown.cancelled() => return Err(ServeError::Cancelled),
        started = server.serve_with_ct(transport, shutdown.child_token()) => {
            started.map_err(|err| anyhow!("MCP initialization failed: {err}"))?
        }
    };

    match running.waiting().await {
        Ok(QuitReason::Cancelled) => Err(ServeError::Cancelled),
        Ok(QuitReason::Closed) => Ok(()),
        Ok(other) => Err(anyhow!("MCP service stopped: {other:?}").into()),
        Err(err) if err.is_cancelled() => Err(ServeError::Cancelled),
        Err(err) => Err(anyhow!("MCP service task failed: {err}").into()),
    }
}

/// Map the serve loop's outcome to a termination or a fatal exit.
pub fn interpret_serve_outcome(
    lifecycle: &mut Lifecycle,
    outcome: Result<(), ServeError>,
) -> Result<Termination, RuntimeExit> {
    match outcome {
        Ok(()) => {
            lifecycle.advance(Phase::Terminated);
            Ok(Termination::Completed)
        }
        Err(ServeError::Cancelled) => {
            lifecycle.advance(Phase::Terminated);
            telemetry::emit_graceful_shutdown();
            Ok(Termination::Cancelled)
        }
        Err(ServeError::Other(err)) => Err(lifecycle.fail(SERVE_FAILED, format!("{err:#}"))),
    }
}
