//! Request/reply transport for the query tool.
//!
//! The CLI is synchronous; each request runs on a short-lived current-thread
//! runtime that owns one `async-nats` connection.

use async_nats::{ConnectOptions, RequestErrorKind};
use bytes::Bytes;
use userstats_config::{Config, NatsCredentials};

use crate::AppError;

const CLIENT_NAME: &str = "userstats-query";

/// Sends one request envelope and waits for its reply body.
pub(crate) trait Requester {
    fn request(&self, config: &Config, payload: Vec<u8>) -> Result<Vec<u8>, AppError>;
}

pub(crate) struct NatsRequester;

impl Requester for NatsRequester {
    fn request(&self, config: &Config, payload: Vec<u8>) -> Result<Vec<u8>, AppError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(AppError::Runtime)?;
        runtime.block_on(request_reply(config, payload))
    }
}

async fn request_reply(config: &Config, payload: Vec<u8>) -> Result<Vec<u8>, AppError> {
    let endpoint = config.nats_server().to_string();
    let client = connect_options(config)
        .connect(endpoint.as_str())
        .await
        .map_err(|error| AppError::Connect {
            endpoint: endpoint.clone(),
            message: error.to_string(),
        })?;

    let subject = config.command_subject();
    let timeout = config.request_timeout();
    let pending = client.request(subject.clone(), Bytes::from(payload));
    match tokio::time::timeout(timeout, pending).await {
        Ok(Ok(message)) => Ok(message.payload.to_vec()),
        Ok(Err(error)) => match error.kind() {
            RequestErrorKind::NoResponders => Err(AppError::NoResponders { subject }),
            RequestErrorKind::TimedOut => Err(AppError::Timeout { subject, timeout }),
            _ => Err(AppError::Request {
                subject,
                message: error.to_string(),
            }),
        },
        Err(_) => Err(AppError::Timeout { subject, timeout }),
    }
}

fn connect_options(config: &Config) -> ConnectOptions {
    let options = ConnectOptions::new().name(CLIENT_NAME);
    match config.nats_credentials() {
        NatsCredentials::None => options,
        NatsCredentials::UserPassword { user, password } => {
            options.user_and_password(user, password)
        }
        NatsCredentials::Token(token) => options.token(token),
    }
}
