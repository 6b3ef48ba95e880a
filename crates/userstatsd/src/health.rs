//! Structured health reporting for daemon lifecycle events.

use std::sync::Arc;

use crate::bootstrap::BootstrapError;
use crate::transport::TransportError;

use userstats_config::Config;

const HEALTH_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::health");

/// Observer trait used to surface lifecycle events to telemetry sinks.
pub trait HealthReporter: Send + Sync {
    /// Invoked before configuration loading begins.
    fn bootstrap_starting(&self);

    /// Invoked after bootstrap completes successfully.
    fn bootstrap_succeeded(&self, config: &Config);

    /// Invoked when bootstrap fails.
    fn bootstrap_failed(&self, error: &BootstrapError);

    /// Invoked before the command subscription is requested.
    fn subscription_starting(&self, subject: &str);

    /// Invoked once the command subscription is live.
    fn subscription_ready(&self, subject: &str);

    /// Invoked when the command subscription cannot be established.
    fn subscription_failed(&self, subject: &str, error: &TransportError);

    /// Invoked after the command subscription is released.
    fn subscription_released(&self, subject: &str);
}

impl<T> HealthReporter for Arc<T>
where
    T: HealthReporter + ?Sized,
{
    fn bootstrap_starting(&self) {
        (**self).bootstrap_starting();
    }

    fn bootstrap_succeeded(&self, config: &Config) {
        (**self).bootstrap_succeeded(config);
    }

    fn bootstrap_failed(&self, error: &BootstrapError) {
        (**self).bootstrap_failed(error);
    }

    fn subscription_starting(&self, subject: &str) {
        (**self).subscription_starting(subject);
    }

    fn subscription_ready(&self, subject: &str) {
        (**self).subscription_ready(subject);
    }

    fn subscription_failed(&self, subject: &str, error: &TransportError) {
        (**self).subscription_failed(subject, error);
    }

    fn subscription_released(&self, subject: &str) {
        (**self).subscription_released(subject);
    }
}

/// Default reporter that records lifecycle events using `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct StructuredHealthReporter;

impl StructuredHealthReporter {
    /// Builds a new reporter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl HealthReporter for StructuredHealthReporter {
    fn bootstrap_starting(&self) {
        tracing::info!(
            target: HEALTH_TARGET,
            event = "bootstrap_starting",
            "starting daemon bootstrap"
        );
    }

    fn bootstrap_succeeded(&self, config: &Config) {
        tracing::info!(
            target: HEALTH_TARGET,
            event = "bootstrap_succeeded",
            nats_server = %config.nats_server(),
            subject = %config.command_subject(),
            service = %config.service_name(),
            log_filter = %config.log_filter(),
            log_format = ?config.log_format(),
            "daemon bootstrap completed"
        );
    }

    fn bootstrap_failed(&self, error: &BootstrapError) {
        tracing::error!(
            target: HEALTH_TARGET,
            event = "bootstrap_failed",
            error = %error,
            "daemon bootstrap failed"
        );
    }

    fn subscription_starting(&self, subject: &str) {
        tracing::info!(
            target: HEALTH_TARGET,
            event = "subscription_starting",
            subject,
            "subscribing to command subject"
        );
    }

    fn subscription_ready(&self, subject: &str) {
        tracing::info!(
            target: HEALTH_TARGET,
            event = "subscription_ready",
            subject,
            "command subscription ready"
        );
    }

    fn subscription_failed(&self, subject: &str, error: &TransportError) {
        tracing::error!(
            target: HEALTH_TARGET,
            event = "subscription_failed",
            subject,
            error = %error,
            "command subscription failed"
        );
    }

    fn subscription_released(&self, subject: &str) {
        tracing::info!(
            target: HEALTH_TARGET,
            event = "subscription_released",
            subject,
            "command subscription released"
        );
    }
}
