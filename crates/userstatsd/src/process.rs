//! Daemon process supervision: connection, subscription and shutdown.

use std::future::Future;
use std::io;
use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use crate::bootstrap::{BootstrapError, ConfigLoader, Daemon, SystemConfigLoader, bootstrap_with};
use crate::dispatch::RunningFlag;
use crate::health::{HealthReporter, StructuredHealthReporter};
use crate::placeholder_store::UnconfiguredStore;
use crate::store::StatsStore;
use crate::transport::{MessageBus, NatsBus, TransportError};

const PROCESS_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::process");

/// Errors surfaced while launching or supervising the daemon process.
#[derive(Debug, Error)]
pub enum LaunchError {
    /// Bootstrapping the daemon failed.
    #[error("daemon bootstrap failed: {source}")]
    Bootstrap {
        /// Underlying bootstrap error.
        #[source]
        source: BootstrapError,
    },
    /// Connecting or subscribing failed.
    #[error("messaging transport failed: {source}")]
    Transport {
        /// Underlying transport error.
        #[source]
        source: TransportError,
    },
    /// Waiting for shutdown failed.
    #[error("failed to install signal handlers: {source}")]
    Signal {
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
}

impl From<BootstrapError> for LaunchError {
    fn from(source: BootstrapError) -> Self {
        Self::Bootstrap { source }
    }
}

impl From<TransportError> for LaunchError {
    fn from(source: TransportError) -> Self {
        Self::Transport { source }
    }
}

/// Runs the daemon without a statistics database.
///
/// Every data query is answered with an error; `system.health` still works.
///
/// # Errors
///
/// See [`run_with_store`].
pub async fn run_daemon() -> Result<(), LaunchError> {
    run_with_store(Arc::new(UnconfiguredStore)).await
}

/// Runs the daemon against `store` until SIGINT or SIGTERM.
///
/// # Errors
///
/// Returns [`LaunchError`] when bootstrap fails, when the messaging server
/// cannot be reached or the command subject cannot be subscribed, or when
/// signal handlers cannot be installed.
pub async fn run_with_store(store: Arc<dyn StatsStore>) -> Result<(), LaunchError> {
    let reporter: Arc<dyn HealthReporter> = Arc::new(StructuredHealthReporter::new());
    run_with(&SystemConfigLoader, reporter, store).await
}

async fn run_with(
    loader: &dyn ConfigLoader,
    reporter: Arc<dyn HealthReporter>,
    store: Arc<dyn StatsStore>,
) -> Result<(), LaunchError> {
    let daemon = bootstrap_with(loader, reporter)?;
    let bus = Arc::new(NatsBus::connect(daemon.config()).await?);
    let result = serve(&daemon, store, bus.clone(), shutdown_signal()).await;
    if let Err(error) = bus.close().await {
        warn!(
            target: PROCESS_TARGET,
            error = %error,
            "failed to flush messaging connection"
        );
    }
    result
}

/// Answers requests on `bus` until `shutdown` resolves.
pub(crate) async fn serve<F>(
    daemon: &Daemon,
    store: Arc<dyn StatsStore>,
    bus: Arc<dyn MessageBus>,
    shutdown: F,
) -> Result<(), LaunchError>
where
    F: Future<Output = io::Result<()>>,
{
    let running = RunningFlag::new();
    let mut dispatcher = daemon.dispatcher(store, bus, Arc::new(running.clone()));
    daemon.connect(&mut dispatcher).await?;
    running.set_running(true);
    info!(
        target: PROCESS_TARGET,
        subject = %dispatcher.subject(),
        "daemon ready"
    );

    let waited = shutdown.await;
    running.set_running(false);
    daemon.disconnect(&mut dispatcher).await;
    info!(
        target: PROCESS_TARGET,
        "shutdown sequence completed"
    );
    waited.map_err(|source| LaunchError::Signal { source })
}

#[cfg(unix)]
async fn shutdown_signal() -> io::Result<()> {
    use tokio::signal::unix::{SignalKind, signal};

    let mut terminate = signal(SignalKind::terminate())?;
    let mut interrupt = signal(SignalKind::interrupt())?;
    let name = tokio::select! {
        _ = terminate.recv() => "SIGTERM",
        _ = interrupt.recv() => "SIGINT",
    };
    info!(
        target: PROCESS_TARGET,
        signal = name,
        "shutdown signal received"
    );
    Ok(())
}

#[cfg(not(unix))]
async fn shutdown_signal() -> io::Result<()> {
    tokio::signal::ctrl_c().await?;
    info!(
        target: PROCESS_TARGET,
        signal = "ctrl_c",
        "shutdown signal received"
    );
    Ok(())
}
