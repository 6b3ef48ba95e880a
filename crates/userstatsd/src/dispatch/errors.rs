//! Error types for request dispatch failures.
//!
//! Every failure a request can meet between decoding and the handler's
//! return value is a [`DispatchError`]. Its display text is exactly what the
//! client reads in the response `error` field.

use std::time::Duration;

use thiserror::Error;

use crate::store::StoreError;

/// Failure classes, used for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// The envelope was rejected before any handler ran.
    Envelope,
    /// A handler rejected its parameters.
    Validation,
    /// The data store failed or the handler overran its budget.
    Collaborator,
}

impl ErrorClass {
    /// Returns the canonical string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Envelope => "envelope",
            Self::Validation => "validation",
            Self::Collaborator => "collaborator",
        }
    }
}

/// Errors surfaced during request decoding, routing and handling.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The body is not a JSON object matching the request envelope.
    #[error("malformed request")]
    MalformedRequest {
        /// Decoder failure, when one was reported.
        #[source]
        source: Option<serde_json::Error>,
    },

    /// The body exceeds the maximum accepted size.
    #[error("request too large: {size} bytes exceeds {max_size} byte limit")]
    RequestTooLarge {
        /// Received body length.
        size: usize,
        /// Accepted maximum.
        max_size: usize,
    },

    /// The envelope has no usable `command`.
    #[error("Missing 'command' field")]
    MissingCommand,

    /// The envelope names a different responder.
    #[error("Command intended for '{requested}', not '{responder}'")]
    ServiceMismatch {
        /// Service named by the request.
        requested: String,
        /// This responder's identity.
        responder: String,
    },

    /// No handler is registered for the command.
    #[error("Unknown command: {command}")]
    UnknownCommand {
        /// Command as received.
        command: String,
    },

    /// A parameter is missing or has the wrong type.
    #[error("{message}")]
    InvalidArguments {
        /// Client-facing description.
        message: String,
    },

    /// The data store failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The handler did not finish within its budget.
    #[error("request timed out after {timeout:?}")]
    Timeout {
        /// Budget that elapsed.
        timeout: Duration,
    },
}

impl DispatchError {
    /// Returns the failure class of this error.
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::MalformedRequest { .. }
            | Self::RequestTooLarge { .. }
            | Self::MissingCommand
            | Self::ServiceMismatch { .. }
            | Self::UnknownCommand { .. } => ErrorClass::Envelope,
            Self::InvalidArguments { .. } => ErrorClass::Validation,
            Self::Store(_) | Self::Timeout { .. } => ErrorClass::Collaborator,
        }
    }

    /// Creates a malformed request error from a decoder failure.
    #[must_use]
    pub const fn from_json_error(source: serde_json::Error) -> Self {
        Self::MalformedRequest {
            source: Some(source),
        }
    }

    /// Creates a request too large error.
    #[must_use]
    pub const fn request_too_large(size: usize, max_size: usize) -> Self {
        Self::RequestTooLarge { size, max_size }
    }

    /// Creates a service mismatch error.
    #[must_use]
    pub fn service_mismatch(requested: impl Into<String>, responder: impl Into<String>) -> Self {
        Self::ServiceMismatch {
            requested: requested.into(),
            responder: responder.into(),
        }
    }

    /// Creates an unknown command error.
    #[must_use]
    pub fn unknown_command(command: impl Into<String>) -> Self {
        Self::UnknownCommand {
            command: command.into(),
        }
    }

    /// Creates an invalid arguments error.
    #[must_use]
    pub fn invalid_arguments(message: impl Into<String>) -> Self {
        Self::InvalidArguments {
            message: message.into(),
        }
    }

    /// Reports a required parameter as absent.
    #[must_use]
    pub fn required(name: &str) -> Self {
        Self::invalid_arguments(format!("{name} required"))
    }
}
