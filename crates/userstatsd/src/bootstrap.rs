//! Daemon bootstrap orchestration.

use std::sync::Arc;

use ortho_config::{OrthoConfig, OrthoError};
use thiserror::Error;

use userstats_config::{Config, ConfigValidationError};

use crate::dispatch::{Dispatcher, HandlerContext, Liveness};
use crate::health::HealthReporter;
use crate::store::StatsStore;
use crate::telemetry::{self, TelemetryError, TelemetryHandle};
use crate::transport::{MessageBus, TransportError};

/// Trait abstracting configuration loading for testability.
pub trait ConfigLoader: Send + Sync {
    /// Loads the daemon configuration.
    fn load(&self) -> Result<Config, Arc<OrthoError>>;
}

/// Loader that delegates to [`Config::load`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemConfigLoader;

impl ConfigLoader for SystemConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        Config::load()
    }
}

/// Loader returning a configuration resolved elsewhere.
#[derive(Debug, Clone)]
pub struct StaticConfigLoader {
    config: Config,
}

impl StaticConfigLoader {
    /// Wraps an already resolved configuration.
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self { config }
    }
}

impl ConfigLoader for StaticConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        Ok(self.config.clone())
    }
}

/// Errors surfaced during bootstrap.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// Configuration failed to load.
    #[error("failed to load configuration: {source}")]
    Configuration {
        /// Underlying loader error.
        #[source]
        source: Arc<OrthoError>,
    },
    /// Configuration loaded but holds unusable values.
    #[error("invalid configuration: {source}")]
    Validation {
        /// Violated invariant.
        #[source]
        source: ConfigValidationError,
    },
    /// Telemetry initialisation failed.
    #[error("failed to initialise telemetry: {source}")]
    Telemetry {
        /// Underlying telemetry error.
        #[source]
        source: TelemetryError,
    },
}

/// Result of a successful bootstrap invocation.
pub struct Daemon {
    config: Config,
    telemetry: TelemetryHandle,
    reporter: Arc<dyn HealthReporter>,
}

impl Daemon {
    /// Accessor for the resolved configuration.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Accessor for the telemetry handle, primarily useful for testing.
    #[must_use]
    pub const fn telemetry(&self) -> TelemetryHandle {
        self.telemetry
    }

    /// Builds a dispatcher for the configured command subject.
    #[must_use]
    pub fn dispatcher(
        &self,
        store: Arc<dyn StatsStore>,
        bus: Arc<dyn MessageBus>,
        liveness: Arc<dyn Liveness>,
    ) -> Dispatcher {
        let context = HandlerContext::new(
            self.config.service_name(),
            self.config.domain(),
            store,
            bus,
            liveness,
        );
        Dispatcher::new(
            context,
            self.config.command_subject(),
            self.config.handler_timeout(),
        )
    }

    /// Connects `dispatcher`, reporting the outcome.
    ///
    /// # Errors
    ///
    /// Propagates the [`TransportError`] raised by
    /// [`Dispatcher::connect`].
    pub async fn connect(&self, dispatcher: &mut Dispatcher) -> Result<(), TransportError> {
        let subject = dispatcher.subject().to_owned();
        self.reporter.subscription_starting(&subject);
        match dispatcher.connect().await {
            Ok(()) => {
                self.reporter.subscription_ready(&subject);
                Ok(())
            }
            Err(error) => {
                self.reporter.subscription_failed(&subject, &error);
                Err(error)
            }
        }
    }

    /// Disconnects `dispatcher`, reporting the release.
    pub async fn disconnect(&self, dispatcher: &mut Dispatcher) {
        let held = dispatcher.is_connected();
        dispatcher.disconnect().await;
        if held {
            self.reporter.subscription_released(dispatcher.subject());
        }
    }
}

/// Bootstraps the daemon using the supplied collaborators.
///
/// # Errors
///
/// Returns [`BootstrapError`] when configuration fails to load or validate,
/// or when telemetry cannot be installed. The reporter observes the failure
/// before it is returned.
pub fn bootstrap_with(
    loader: &dyn ConfigLoader,
    reporter: Arc<dyn HealthReporter>,
) -> Result<Daemon, BootstrapError> {
    reporter.bootstrap_starting();

    let config = match loader.load() {
        Ok(config) => config,
        Err(source) => return Err(fail(&reporter, BootstrapError::Configuration { source })),
    };

    if let Err(source) = config.validate() {
        return Err(fail(&reporter, BootstrapError::Validation { source }));
    }

    let telemetry = match telemetry::initialise(&config) {
        Ok(handle) => handle,
        Err(source) => return Err(fail(&reporter, BootstrapError::Telemetry { source })),
    };

    reporter.bootstrap_succeeded(&config);
    Ok(Daemon {
        config,
        telemetry,
        reporter,
    })
}

fn fail(reporter: &Arc<dyn HealthReporter>, error: BootstrapError) -> BootstrapError {
    reporter.bootstrap_failed(&error);
    error
}
