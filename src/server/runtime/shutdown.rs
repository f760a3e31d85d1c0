//! Operator signals turned into a cooperative cancellation token.
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Return a token that is cancelled on SIGINT or, on Unix, SIGTERM.
///
/// Handlers are installed before this returns, so a signal delivered afterwards is never lost
/// to the default disposition. Must be called inside a tokio runtime.
pub fn shutdown_on_signal() -> CancellationToken {
    let token = CancellationToken::new();
    let trigger = token.clone();
    let signals = Signals::install();
    tokio::spawn(async move {
        let name = signals.recv().await;
        info!(
            target: "mcp_digitalocean::runtime",
            signal = name,
            "Received shutdown signal"
        );
        trigger.cancel();
    });
    token
}

#[cfg(unix)]
struct Signals {
    interrupt: Option<tokio::signal::unix::Signal>,
    terminate: Option<tokio::signal::unix::Signal>,
}

#[cfg(unix)]
impl Signals {
    fn install() -> Self {
        use tokio::signal::unix::{signal, SignalKind};

        let install = |kind: SignalKind, name: &'static str| match signal(kind) {
            Ok(stream) => Some(stream),
            Err(err) => {
                warn!(
                    target: "mcp_digitalocean::runtime",
                    signal = name,
                    error = %err,
                    "Failed to install signal handler"
                );
                None
            }
        };
        Self {
            interrupt: install(SignalKind::interrupt(), "SIGINT"),
            terminate: install(SignalKind::terminate(), "SIGTERM"),
        }
    }

    async fn recv(mut self) -> &'static str {
        tokio::select! {
            _ = recv_or_pending(self.interrupt.as_mut()) => "SIGINT",
            _ = recv_or_pending(self.terminate.as_mut()) => "SIGTERM",
        }
    }
}

#[cfg(unix)]
async fn recv_or_pending(signal: Option<&mut tokio::signal::unix::Signal>) {
    match signal {
        Some(signal) => {
            signal.recv().await;
        }
        None => std::future::pending::<()>().await,
    }
}

#[cfg(not(unix))]
struct Signals;

#[cfg(not(unix))]
impl Signals {
    fn install() -> Self {
        Signals
    }

    async fn recv(self) -> &'static str {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(
                target: "mcp_digitalocean::runtime",
                error = %err,
                "Failed to listen for Ctrl-C"
            );
            std::future::pending::<()>().await;
        }
        "ctrl_c"
    }
}
