//! Error types for messaging transport operations.

#[cfg(any(test, feature = "test-support"))]
use std::time::Duration;

use thiserror::Error;

/// Errors surfaced by a [`MessageBus`](super::MessageBus).
#[derive(Debug, Error)]
pub enum TransportError {
    /// The connection to the messaging server could not be established.
    #[error("failed to connect to messaging server {endpoint}: {message}")]
    Connect {
        /// Server URL that was dialled.
        endpoint: String,
        /// Client library failure description.
        message: String,
    },
    /// The server refused or failed the subscription.
    #[error("failed to subscribe to '{subject}': {message}")]
    Subscribe {
        /// Subject the subscription targeted.
        subject: String,
        /// Client library failure description.
        message: String,
    },
    /// A message could not be published.
    #[error("failed to publish to '{subject}': {message}")]
    Publish {
        /// Destination subject.
        subject: String,
        /// Client library failure description.
        message: String,
    },
    /// Nobody is subscribed to the request subject.
    #[cfg(any(test, feature = "test-support"))]
    #[error("no responders on '{subject}'")]
    NoResponders {
        /// Request subject.
        subject: String,
    },
    /// A request received no reply within its budget.
    #[cfg(any(test, feature = "test-support"))]
    #[error("request to '{subject}' timed out after {timeout:?}")]
    RequestTimeout {
        /// Request subject.
        subject: String,
        /// Budget that elapsed.
        timeout: Duration,
    },
    /// Pending messages could not be flushed to the server.
    #[error("failed to flush pending messages: {message}")]
    Flush {
        /// Client library failure description.
        message: String,
    },
    /// The bus is not connected to its server.
    #[error("messaging connection is closed")]
    Disconnected,
}
