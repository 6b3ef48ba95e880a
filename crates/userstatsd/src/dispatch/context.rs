//! Capabilities handed to every handler invocation.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::store::StatsStore;
use crate::transport::MessageBus;

/// Liveness signal reported by `system.health`.
pub trait Liveness: Send + Sync {
    /// Whether the responder considers itself running.
    fn is_running(&self) -> bool;

    /// Seconds since the responder started.
    ///
    /// Uptime is not tracked yet; the default reports zero.
    fn uptime_seconds(&self) -> u64 {
        0
    }
}

/// Shared boolean liveness flag flipped by the process supervisor.
#[derive(Debug, Clone, Default)]
pub struct RunningFlag(Arc<AtomicBool>);

impl RunningFlag {
    /// Builds a flag in the not-running state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates the flag.
    pub fn set_running(&self, running: bool) {
        self.0.store(running, Ordering::SeqCst);
    }
}

impl Liveness for RunningFlag {
    fn is_running(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Immutable context threaded through the dispatcher into each handler.
#[derive(Clone)]
pub struct HandlerContext {
    service: String,
    domain: String,
    store: Arc<dyn StatsStore>,
    bus: Arc<dyn MessageBus>,
    liveness: Arc<dyn Liveness>,
}

impl HandlerContext {
    /// Assembles a context from its collaborators.
    #[must_use]
    pub fn new(
        service: impl Into<String>,
        domain: impl Into<String>,
        store: Arc<dyn StatsStore>,
        bus: Arc<dyn MessageBus>,
        liveness: Arc<dyn Liveness>,
    ) -> Self {
        Self {
            service: service.into(),
            domain: domain.into(),
            store,
            bus,
            liveness,
        }
    }

    /// Responder identity.
    #[must_use]
    pub fn service(&self) -> &str {
        &self.service
    }

    /// Chat domain for domain-scoped queries.
    #[must_use]
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Data access capability.
    #[must_use]
    pub fn store(&self) -> &dyn StatsStore {
        self.store.as_ref()
    }

    /// Messaging transport.
    #[must_use]
    pub const fn bus(&self) -> &Arc<dyn MessageBus> {
        &self.bus
    }

    /// Liveness signal.
    #[must_use]
    pub fn liveness(&self) -> &dyn Liveness {
        self.liveness.as_ref()
    }
}

impl std::fmt::Debug for HandlerContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerContext")
            .field("service", &self.service)
            .field("domain", &self.domain)
            .finish_non_exhaustive()
    }
}
