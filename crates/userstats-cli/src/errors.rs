//! Error types for the CLI runtime.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use userstats_config::ConfigValidationError;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("failed to load configuration: {0}")]
    LoadConfiguration(Arc<ortho_config::OrthoError>),
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigValidationError),
    #[error("{0}")]
    CliUsage(clap::Error),
    #[error("failed to start the async runtime: {0}")]
    Runtime(io::Error),
    #[error("failed to connect to messaging server at {endpoint}: {message}")]
    Connect { endpoint: String, message: String },
    #[error("no responder is subscribed to {subject}")]
    NoResponders { subject: String },
    #[error("no reply on {subject} within {timeout:?}")]
    Timeout { subject: String, timeout: Duration },
    #[error("request on {subject} failed: {message}")]
    Request { subject: String, message: String },
    #[error("failed to serialise command request: {0}")]
    SerialiseRequest(serde_json::Error),
    #[error("failed to parse endpoint response: {0}")]
    ParseResponse(serde_json::Error),
    #[error("failed to write output: {0}")]
    WriteOutput(io::Error),
}
