//! Transport-neutral subscription handle.

use bytes::Bytes;
use futures::{Stream, StreamExt};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Depth of the buffer between a transport and the subscription consumer.
pub const SUBSCRIPTION_CAPACITY: usize = 256;

/// Message delivered to a subscriber.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    /// Subject the message was published to.
    pub subject: String,
    /// Raw message body.
    pub payload: Bytes,
    /// Reply subject, absent for fire-and-forget deliveries.
    pub reply: Option<String>,
}

impl InboundMessage {
    /// Builds a message without a reply subject.
    #[must_use]
    pub fn new(subject: impl Into<String>, payload: impl Into<Bytes>) -> Self {
        Self {
            subject: subject.into(),
            payload: payload.into(),
            reply: None,
        }
    }

    /// Attaches a reply subject.
    #[must_use]
    pub fn with_reply(mut self, reply: impl Into<String>) -> Self {
        self.reply = Some(reply.into());
        self
    }
}

/// Live binding between a subject and its consumer.
///
/// Dropping the handle, or calling [`Subscription::close`], stops the pump
/// task and releases the transport-side subscription.
#[derive(Debug)]
pub struct Subscription {
    subject: String,
    receiver: mpsc::Receiver<InboundMessage>,
    pump: Option<JoinHandle<()>>,
}

impl Subscription {
    /// Wraps a receiver that a transport feeds directly.
    #[must_use]
    pub fn from_receiver(
        subject: impl Into<String>,
        receiver: mpsc::Receiver<InboundMessage>,
    ) -> Self {
        Self {
            subject: subject.into(),
            receiver,
            pump: None,
        }
    }

    /// Spawns a task forwarding `stream` into a bounded buffer.
    ///
    /// The stream is owned by the pump task, so aborting the task drops the
    /// underlying transport subscription.
    #[must_use]
    pub fn from_stream<S>(subject: impl Into<String>, stream: S) -> Self
    where
        S: Stream<Item = InboundMessage> + Send + 'static,
    {
        let (sender, receiver) = mpsc::channel(SUBSCRIPTION_CAPACITY);
        let pump = tokio::spawn(async move {
            let mut pinned = Box::pin(stream);
            while let Some(message) = pinned.next().await {
                if sender.send(message).await.is_err() {
                    break;
                }
            }
        });
        Self {
            subject: subject.into(),
            receiver,
            pump: Some(pump),
        }
    }

    /// Subject this subscription is bound to.
    #[must_use]
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Waits for the next message; `None` once the transport side has closed.
    pub async fn next(&mut self) -> Option<InboundMessage> {
        self.receiver.recv().await
    }

    /// Releases the subscription.
    pub fn close(self) {
        drop(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(pump) = self.pump.take() {
            pump.abort();
        }
        self.receiver.close();
    }
}
