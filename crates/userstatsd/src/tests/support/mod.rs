//! Test harness utilities shared by the daemon suites.

mod config_loader;
mod reporter;
mod store;

use std::sync::Arc;
use std::time::Duration;

pub use self::config_loader::{FailingConfigLoader, test_config};
pub use self::reporter::{HealthEvent, RecordingHealthReporter};
pub use self::store::{RecordingStore, StoreCall};

use crate::dispatch::{Dispatcher, HandlerContext, Liveness, RunningFlag};
use crate::transport::MemoryBus;

/// Service identity used across the suites.
pub const SERVICE: &str = "userstats";

/// Subject used across the suites.
pub const SUBJECT: &str = "cytube.query.userstats.command";

/// Collaborators wired into one dispatcher.
pub struct Fixture {
    pub store: Arc<RecordingStore>,
    pub bus: Arc<MemoryBus>,
    pub running: RunningFlag,
}

impl Fixture {
    pub fn new() -> Self {
        let running = RunningFlag::new();
        running.set_running(true);
        Self {
            store: Arc::new(RecordingStore::default()),
            bus: Arc::new(MemoryBus::new()),
            running,
        }
    }

    pub fn context(&self) -> HandlerContext {
        let liveness: Arc<dyn Liveness> = Arc::new(self.running.clone());
        HandlerContext::new(
            SERVICE,
            "cytu.be",
            self.store.clone(),
            self.bus.clone(),
            liveness,
        )
    }

    pub fn dispatcher(&self, handler_timeout: Duration) -> Dispatcher {
        Dispatcher::new(self.context(), SUBJECT, handler_timeout)
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}
