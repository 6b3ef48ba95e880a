//! Subscription lifecycle and per-message dispatch.

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::DISPATCH_TARGET;
use super::context::HandlerContext;
use super::errors::DispatchError;
use super::registry::Command;
use super::request::CommandRequest;
use super::response::CommandResponse;
use crate::transport::{InboundMessage, Subscription, TransportError};

/// Answers every request published on the command subject.
///
/// The dispatcher owns at most one subscription. Each inbound message is
/// handled on its own task, so a slow or failing request never delays the
/// others.
#[derive(Debug)]
pub struct Dispatcher {
    core: Arc<DispatchCore>,
    subject: String,
    listener: Option<ListenerHandle>,
}

#[derive(Debug)]
struct DispatchCore {
    context: HandlerContext,
    handler_timeout: Duration,
}

#[derive(Debug)]
struct ListenerHandle {
    shutdown: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl Dispatcher {
    /// Builds a dispatcher that will listen on `subject`.
    #[must_use]
    pub fn new(context: HandlerContext, subject: impl Into<String>, handler_timeout: Duration) -> Self {
        Self {
            core: Arc::new(DispatchCore {
                context,
                handler_timeout,
            }),
            subject: subject.into(),
            listener: None,
        }
    }

    /// Subject the dispatcher listens on.
    #[must_use]
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Whether a subscription is currently held and still being read.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.listener
            .as_ref()
            .is_some_and(ListenerHandle::is_active)
    }

    /// Subscribes to the command subject and starts answering requests.
    ///
    /// Calling this while already connected keeps the existing subscription.
    ///
    /// # Errors
    ///
    /// Returns the transport's [`TransportError`] when the subscription
    /// cannot be established. The dispatcher stays disconnected in that case.
    pub async fn connect(&mut self) -> Result<(), TransportError> {
        if self.is_connected() {
            warn!(
                target: DISPATCH_TARGET,
                subject = %self.subject,
                "already subscribed; ignoring connect"
            );
            return Ok(());
        }
        // A loop ended by the transport leaves stale bookkeeping behind.
        self.listener = None;

        let subscription = self.core.context.bus().subscribe(&self.subject).await?;
        let (shutdown, stopped) = oneshot::channel();
        let task = tokio::spawn(receive_loop(Arc::clone(&self.core), subscription, stopped));
        self.listener = Some(ListenerHandle {
            shutdown: Some(shutdown),
            task: Some(task),
        });
        info!(
            target: DISPATCH_TARGET,
            subject = %self.subject,
            "subscribed to command subject"
        );
        Ok(())
    }

    /// Stops receiving and releases the subscription.
    ///
    /// Requests already being handled still run to completion. Calling this
    /// while disconnected does nothing.
    pub async fn disconnect(&mut self) {
        let Some(mut listener) = self.listener.take() else {
            return;
        };
        if let Some(shutdown) = listener.shutdown.take()
            && shutdown.send(()).is_err()
        {
            debug!(
                target: DISPATCH_TARGET,
                subject = %self.subject,
                "receive loop already stopped"
            );
        }
        if let Some(task) = listener.task.take()
            && let Err(error) = task.await
        {
            warn!(
                target: DISPATCH_TARGET,
                error = %error,
                "receive loop ended abnormally"
            );
        }
        info!(
            target: DISPATCH_TARGET,
            subject = %self.subject,
            "released command subscription"
        );
    }

    /// Decodes, routes and answers one request body.
    pub async fn dispatch(&self, payload: &[u8]) -> CommandResponse {
        self.core.dispatch(payload).await
    }

    /// As [`Dispatcher::dispatch`], returning the encoded reply.
    pub async fn handle(&self, payload: &[u8]) -> Vec<u8> {
        self.core.dispatch(payload).await.to_bytes()
    }
}

impl ListenerHandle {
    fn is_active(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }
}

impl Drop for ListenerHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

async fn receive_loop(
    core: Arc<DispatchCore>,
    mut subscription: Subscription,
    mut stopped: oneshot::Receiver<()>,
) {
    loop {
        tokio::select! {
            _ = &mut stopped => break,
            next = subscription.next() => match next {
                Some(message) => {
                    let worker = Arc::clone(&core);
                    tokio::spawn(async move { worker.respond(message).await });
                }
                None => {
                    warn!(
                        target: DISPATCH_TARGET,
                        subject = %subscription.subject(),
                        "subscription closed by transport"
                    );
                    break;
                }
            },
        }
    }
    subscription.close();
}

impl DispatchCore {
    async fn respond(&self, message: InboundMessage) {
        let reply = self.dispatch(&message.payload).await.to_bytes();
        let Some(reply_subject) = message.reply else {
            debug!(
                target: DISPATCH_TARGET,
                subject = %message.subject,
                "no reply subject; dropping response"
            );
            return;
        };
        if let Err(error) = self
            .context
            .bus()
            .publish(&reply_subject, Bytes::from(reply))
            .await
        {
            warn!(
                target: DISPATCH_TARGET,
                reply = %reply_subject,
                error = %error,
                "failed to publish reply"
            );
        }
    }

    async fn dispatch(&self, payload: &[u8]) -> CommandResponse {
        let request = match CommandRequest::parse(payload) {
            Ok(request) => request,
            Err(error) => return self.reject(None, &error),
        };
        let command = match request.command() {
            Ok(command) => command.to_owned(),
            Err(error) => return self.reject(None, &error),
        };
        if let Err(error) = request.ensure_addressed_to(self.context.service()) {
            return self.reject(None, &error);
        }
        let resolved = match Command::parse(&command) {
            Ok(resolved) => resolved,
            Err(error) => return self.reject(Some(command), &error),
        };

        debug!(
            target: DISPATCH_TARGET,
            command = %resolved,
            "dispatching command"
        );
        let outcome = tokio::time::timeout(
            self.handler_timeout,
            resolved.run(&self.context, request.params()),
        )
        .await
        .unwrap_or(Err(DispatchError::Timeout {
            timeout: self.handler_timeout,
        }));
        match outcome {
            Ok(data) => CommandResponse::success(self.context.service(), command, data),
            Err(error) => self.reject(Some(command), &error),
        }
    }

    fn reject(&self, command: Option<String>, error: &DispatchError) -> CommandResponse {
        warn!(
            target: DISPATCH_TARGET,
            command = command.as_deref().unwrap_or_default(),
            class = error.class().as_str(),
            error = %error,
            "request answered with error"
        );
        CommandResponse::failure(self.context.service(), command, error)
    }
}
