//! In-process message bus.
//!
//! Subjects match exactly; there are no wildcards and no queue groups. Every
//! live subscriber of a subject receives each message published to it.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::mpsc;
use tracing::debug;

use super::{
    InboundMessage, MessageBus, SUBSCRIPTION_CAPACITY, Subscription, TRANSPORT_TARGET,
    TransportError,
};

const INBOX_PREFIX: &str = "_INBOX";

/// Message bus that routes payloads between tasks of the current process.
#[derive(Debug)]
pub struct MemoryBus {
    routes: Mutex<Vec<Route>>,
    connected: AtomicBool,
    refuse_subscriptions: AtomicBool,
    next_inbox: AtomicU64,
}

#[derive(Debug)]
struct Route {
    subject: String,
    sender: mpsc::Sender<InboundMessage>,
}

impl Default for MemoryBus {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBus {
    /// Builds a connected bus with no subscribers.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            routes: Mutex::new(Vec::new()),
            connected: AtomicBool::new(true),
            refuse_subscriptions: AtomicBool::new(false),
            next_inbox: AtomicU64::new(1),
        }
    }

    /// Simulates losing or regaining the server connection.
    pub fn set_connected(&self, connected: bool) {
        self.connected.store(connected, Ordering::SeqCst);
    }

    /// Makes subsequent [`MessageBus::subscribe`] calls fail.
    pub fn refuse_subscriptions(&self, refuse: bool) {
        self.refuse_subscriptions.store(refuse, Ordering::SeqCst);
    }

    /// Number of live subscriptions bound to `subject`.
    #[must_use]
    pub fn subscriber_count(&self, subject: &str) -> usize {
        let mut routes = self.routes();
        prune(&mut routes);
        routes.iter().filter(|route| route.subject == subject).count()
    }

    /// Publishes `payload` with a fresh inbox as reply subject and waits for
    /// the first reply.
    ///
    /// # Errors
    ///
    /// Fails when the bus is disconnected, when nobody subscribes to
    /// `subject`, or when no reply arrives within `timeout`.
    pub async fn request(
        &self,
        subject: &str,
        payload: impl Into<Bytes>,
        timeout: Duration,
    ) -> Result<InboundMessage, TransportError> {
        self.ensure_connected()?;
        let inbox = format!(
            "{INBOX_PREFIX}.{}",
            self.next_inbox.fetch_add(1, Ordering::Relaxed)
        );
        let mut replies = self.register(&inbox);
        let message = InboundMessage::new(subject, payload).with_reply(inbox);
        if self.deliver(message).await == 0 {
            return Err(TransportError::NoResponders {
                subject: subject.to_owned(),
            });
        }

        match tokio::time::timeout(timeout, replies.next()).await {
            Ok(Some(reply)) => Ok(reply),
            Ok(None) => Err(TransportError::Disconnected),
            Err(_) => Err(TransportError::RequestTimeout {
                subject: subject.to_owned(),
                timeout,
            }),
        }
    }

    fn routes(&self) -> MutexGuard<'_, Vec<Route>> {
        self.routes.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn ensure_connected(&self) -> Result<(), TransportError> {
        if self.is_connected() {
            Ok(())
        } else {
            Err(TransportError::Disconnected)
        }
    }

    fn register(&self, subject: &str) -> Subscription {
        let (sender, receiver) = mpsc::channel(SUBSCRIPTION_CAPACITY);
        self.routes().push(Route {
            subject: subject.to_owned(),
            sender,
        });
        Subscription::from_receiver(subject, receiver)
    }

    /// Hands `message` to every live subscriber of its subject and returns
    /// how many accepted it.
    async fn deliver(&self, message: InboundMessage) -> usize {
        let senders = {
            let mut routes = self.routes();
            prune(&mut routes);
            routes
                .iter()
                .filter(|route| route.subject == message.subject)
                .map(|route| route.sender.clone())
                .collect::<Vec<_>>()
        };

        let mut delivered = 0;
        for sender in senders {
            if sender.send(message.clone()).await.is_ok() {
                delivered += 1;
            }
        }
        if delivered == 0 {
            debug!(
                target: TRANSPORT_TARGET,
                subject = %message.subject,
                "no subscribers for message"
            );
        }
        delivered
    }
}

fn prune(routes: &mut Vec<Route>) {
    routes.retain(|route| !route.sender.is_closed());
}

#[async_trait]
impl MessageBus for MemoryBus {
    async fn subscribe(&self, subject: &str) -> Result<Subscription, TransportError> {
        self.ensure_connected()?;
        if self.refuse_subscriptions.load(Ordering::SeqCst) {
            return Err(TransportError::Subscribe {
                subject: subject.to_owned(),
                message: "subscription refused".to_owned(),
            });
        }
        Ok(self.register(subject))
    }

    async fn publish(&self, subject: &str, payload: Bytes) -> Result<(), TransportError> {
        self.ensure_connected()?;
        self.deliver(InboundMessage::new(subject, payload)).await;
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }
}
