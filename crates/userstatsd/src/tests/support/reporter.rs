//! Health reporter that records events for assertions.

use std::sync::Mutex;

use userstats_config::Config;

use crate::bootstrap::BootstrapError;
use crate::health::HealthReporter;
use crate::transport::TransportError;

/// Lifecycle events captured by [`RecordingHealthReporter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthEvent {
    BootstrapStarting,
    BootstrapSucceeded,
    BootstrapFailed(String),
    SubscriptionStarting(String),
    SubscriptionReady(String),
    SubscriptionFailed(String),
    SubscriptionReleased(String),
}

/// Records health events for assertions.
#[derive(Default)]
pub struct RecordingHealthReporter {
    events: Mutex<Vec<HealthEvent>>,
}

impl RecordingHealthReporter {
    /// Captures a copy of the recorded events.
    pub fn events(&self) -> Vec<HealthEvent> {
        self.events
            .lock()
            .expect("health reporter mutex poisoned")
            .clone()
    }

    fn record(&self, event: HealthEvent) {
        self.events
            .lock()
            .expect("health reporter mutex poisoned")
            .push(event);
    }
}

impl HealthReporter for RecordingHealthReporter {
    fn bootstrap_starting(&self) {
        self.record(HealthEvent::BootstrapStarting);
    }

    fn bootstrap_succeeded(&self, _config: &Config) {
        self.record(HealthEvent::BootstrapSucceeded);
    }

    fn bootstrap_failed(&self, error: &BootstrapError) {
        self.record(HealthEvent::BootstrapFailed(error.to_string()));
    }

    fn subscription_starting(&self, subject: &str) {
        self.record(HealthEvent::SubscriptionStarting(subject.to_owned()));
    }

    fn subscription_ready(&self, subject: &str) {
        self.record(HealthEvent::SubscriptionReady(subject.to_owned()));
    }

    fn subscription_failed(&self, _subject: &str, error: &TransportError) {
        self.record(HealthEvent::SubscriptionFailed(error.to_string()));
    }

    fn subscription_released(&self, subject: &str) {
        self.record(HealthEvent::SubscriptionReleased(subject.to_owned()));
    }
}
