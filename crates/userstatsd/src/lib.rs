//! Query-serving endpoint for chat user statistics.
//!
//! The daemon answers read-only analytics requests that arrive over NATS
//! request/reply. Every command is multiplexed through one subject,
//! `<namespace>.<service>.command`, and carries a JSON envelope naming the
//! command and its parameters. The [`Dispatcher`] validates the envelope,
//! routes it through the static [`Command`] table and normalises every
//! outcome into a response envelope, so clients always receive exactly one
//! well-formed reply.
//!
//! Statistics are not computed here. Handlers delegate to a [`StatsStore`]
//! supplied by the embedder; the bundled binary runs with
//! [`UnconfiguredStore`], which reports itself disconnected.
//!
//! Startup follows a fixed sequence: load and validate configuration,
//! initialise structured telemetry, connect to the messaging server, then
//! subscribe. [`HealthReporter`] hooks observe each stage.

mod bootstrap;
pub mod dispatch;
mod health;
mod placeholder_store;
mod process;
pub mod store;
mod telemetry;
pub mod transport;

pub use bootstrap::{
    BootstrapError, ConfigLoader, Daemon, StaticConfigLoader, SystemConfigLoader, bootstrap_with,
};
pub use dispatch::{
    Command, CommandResponse, DispatchError, Dispatcher, HandlerContext, Liveness, RunningFlag,
};
pub use health::{HealthReporter, StructuredHealthReporter};
pub use placeholder_store::UnconfiguredStore;
pub use process::{LaunchError, run_daemon, run_with_store};
pub use store::{StatsStore, StoreError, StoreResult, SystemTotals, TimeRange};
pub use telemetry::{TelemetryError, TelemetryHandle, initialise as initialise_telemetry};
#[cfg(any(test, feature = "test-support"))]
pub use transport::MemoryBus;
pub use transport::{MessageBus, NatsBus, TransportError};

#[cfg(test)]
mod tests;
