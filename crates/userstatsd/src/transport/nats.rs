//! NATS-backed message bus.

use async_nats::connection::State;
use async_nats::{Client, ConnectOptions};
use async_trait::async_trait;
use bytes::Bytes;
use futures::StreamExt;
use tracing::info;

use userstats_config::{Config, NatsCredentials};

use super::{InboundMessage, MessageBus, Subscription, TRANSPORT_TARGET, TransportError};

/// Message bus over a single `async-nats` client connection.
#[derive(Debug, Clone)]
pub struct NatsBus {
    client: Client,
    endpoint: String,
}

impl NatsBus {
    /// Connects to the configured server with the configured credentials.
    ///
    /// The connection is named after the responder identity so it can be
    /// told apart in server monitoring.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Connect`] when the server cannot be reached
    /// or rejects the credentials.
    pub async fn connect(config: &Config) -> Result<Self, TransportError> {
        let endpoint = config.nats_server().to_string();
        let client = connect_options(config)
            .connect(endpoint.as_str())
            .await
            .map_err(|error| TransportError::Connect {
                endpoint: endpoint.clone(),
                message: error.to_string(),
            })?;
        info!(
            target: TRANSPORT_TARGET,
            endpoint = %endpoint,
            "connected to messaging server"
        );
        Ok(Self { client, endpoint })
    }

    /// Server URL this bus is connected to.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Flushes pending publishes before the connection is dropped.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Flush`] when buffered messages could not be
    /// written to the server.
    pub async fn close(&self) -> Result<(), TransportError> {
        self.client
            .flush()
            .await
            .map_err(|error| TransportError::Flush {
                message: error.to_string(),
            })?;
        info!(
            target: TRANSPORT_TARGET,
            endpoint = %self.endpoint,
            "messaging connection flushed"
        );
        Ok(())
    }
}

fn connect_options(config: &Config) -> ConnectOptions {
    let options = ConnectOptions::new().name(config.service_name());
    match config.nats_credentials() {
        NatsCredentials::None => options,
        NatsCredentials::UserPassword { user, password } => {
            options.user_and_password(user, password)
        }
        NatsCredentials::Token(token) => options.token(token),
    }
}

#[async_trait]
impl MessageBus for NatsBus {
    async fn subscribe(&self, subject: &str) -> Result<Subscription, TransportError> {
        let subscriber = self
            .client
            .subscribe(subject.to_owned())
            .await
            .map_err(|error| TransportError::Subscribe {
                subject: subject.to_owned(),
                message: error.to_string(),
            })?;
        let messages = subscriber.map(|message| InboundMessage {
            subject: message.subject.to_string(),
            payload: message.payload,
            reply: message.reply.map(|reply| reply.to_string()),
        });
        Ok(Subscription::from_stream(subject, messages))
    }

    async fn publish(&self, subject: &str, payload: Bytes) -> Result<(), TransportError> {
        self.client
            .publish(subject.to_owned(), payload)
            .await
            .map_err(|error| TransportError::Publish {
                subject: subject.to_owned(),
                message: error.to_string(),
            })
    }

    fn is_connected(&self) -> bool {
        matches!(self.client.connection_state(), State::Connected)
    }
}
