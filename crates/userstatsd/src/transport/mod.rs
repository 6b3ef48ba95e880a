//! Messaging transport used by the dispatcher.
//!
//! The dispatcher only needs three primitives: subscribe to a subject,
//! publish a payload, and report connectivity. [`MessageBus`] captures those
//! so the dispatcher can run against NATS in production and against an
//! in-process bus in tests (enabled by the `test-support` feature).

mod errors;
#[cfg(any(test, feature = "test-support"))]
mod memory;
mod nats;
mod subscription;

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;

pub use self::errors::TransportError;
#[cfg(any(test, feature = "test-support"))]
pub use self::memory::MemoryBus;
pub use self::nats::NatsBus;
pub use self::subscription::{InboundMessage, SUBSCRIPTION_CAPACITY, Subscription};

/// Tracing target for transport operations.
pub(crate) const TRANSPORT_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::transport");

/// Publish/subscribe primitives consumed by the dispatcher.
#[async_trait]
pub trait MessageBus: Send + Sync {
    /// Subscribes to `subject`, returning a stream of inbound messages.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] when the subscription cannot be
    /// established. No subscription is retained in that case.
    async fn subscribe(&self, subject: &str) -> Result<Subscription, TransportError>;

    /// Publishes `payload` to `subject` without waiting for a reply.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] when the payload cannot be handed to the
    /// server.
    async fn publish(&self, subject: &str, payload: Bytes) -> Result<(), TransportError>;

    /// Reports whether the bus currently holds a live server connection.
    fn is_connected(&self) -> bool;
}

#[async_trait]
impl<T> MessageBus for Arc<T>
where
    T: MessageBus + ?Sized,
{
    async fn subscribe(&self, subject: &str) -> Result<Subscription, TransportError> {
        (**self).subscribe(subject).await
    }

    async fn publish(&self, subject: &str, payload: Bytes) -> Result<(), TransportError> {
        (**self).publish(subject, payload).await
    }

    fn is_connected(&self) -> bool {
        (**self).is_connected()
    }
}
