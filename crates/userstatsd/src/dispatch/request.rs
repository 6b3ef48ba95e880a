//! Request envelope decoding.
//!
//! A request is one JSON object. `command` selects the handler, `service`
//! optionally names the intended responder, and every other key is a
//! command-specific parameter:
//!
//! ```json
//! {"command":"leaderboard.messages","channel":"lobby","limit":5}
//! ```

use serde::Deserialize;
use serde_json::{Map, Value};

use super::errors::DispatchError;

/// Largest request body accepted, in bytes.
pub const MAX_REQUEST_BYTES: usize = 64 * 1024;

/// Decoded request envelope.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CommandRequest {
    #[serde(default)]
    command: Option<String>,
    #[serde(default)]
    service: Option<String>,
    #[serde(flatten)]
    params: Map<String, Value>,
}

impl CommandRequest {
    /// Decodes a request body.
    ///
    /// # Errors
    ///
    /// Returns `DispatchError::RequestTooLarge` when the body exceeds
    /// [`MAX_REQUEST_BYTES`] and `DispatchError::MalformedRequest` when it is
    /// not a JSON object, or when `command` or `service` is present but not a
    /// string.
    pub fn parse(payload: &[u8]) -> Result<Self, DispatchError> {
        if payload.len() > MAX_REQUEST_BYTES {
            return Err(DispatchError::request_too_large(
                payload.len(),
                MAX_REQUEST_BYTES,
            ));
        }
        serde_json::from_slice(payload).map_err(DispatchError::from_json_error)
    }

    /// The command identifier, exactly as received.
    ///
    /// # Errors
    ///
    /// Returns `DispatchError::MissingCommand` when the field is absent,
    /// `null`, or blank.
    pub fn command(&self) -> Result<&str, DispatchError> {
        match self.command.as_deref() {
            Some(command) if !command.trim().is_empty() => Ok(command),
            _ => Err(DispatchError::MissingCommand),
        }
    }

    /// The responder named by the request, if any.
    ///
    /// A blank `service` names no responder.
    #[must_use]
    pub fn service(&self) -> Option<&str> {
        self.service
            .as_deref()
            .filter(|service| !service.trim().is_empty())
    }

    /// Rejects requests addressed to a different responder.
    ///
    /// # Errors
    ///
    /// Returns `DispatchError::ServiceMismatch` when `service` is present,
    /// non-blank, and differs from `responder`.
    pub fn ensure_addressed_to(&self, responder: &str) -> Result<(), DispatchError> {
        match self.service() {
            Some(requested) if requested != responder => {
                Err(DispatchError::service_mismatch(requested, responder))
            }
            _ => Ok(()),
        }
    }

    /// Command-specific parameters.
    #[must_use]
    pub const fn params(&self) -> Params<'_> {
        Params(&self.params)
    }
}

/// Typed view over the command-specific parameters of a request.
#[derive(Debug, Clone, Copy)]
pub struct Params<'a>(&'a Map<String, Value>);

impl<'a> Params<'a> {
    /// Wraps a parameter map.
    #[must_use]
    pub const fn new(params: &'a Map<String, Value>) -> Self {
        Self(params)
    }

    /// A string parameter that must be present and non-blank.
    ///
    /// # Errors
    ///
    /// Returns `"<name> required"` when the value is absent, `null`, blank or
    /// not a string.
    pub fn required_str(&self, name: &str) -> Result<&'a str, DispatchError> {
        match self.0.get(name) {
            Some(Value::String(value)) if !value.trim().is_empty() => Ok(value.as_str()),
            _ => Err(DispatchError::required(name)),
        }
    }

    /// A string parameter that may be omitted.
    ///
    /// `null` and blank strings read as absent.
    ///
    /// # Errors
    ///
    /// Returns `"<name> must be a string"` for any other JSON type.
    pub fn optional_str(&self, name: &str) -> Result<Option<&'a str>, DispatchError> {
        match self.0.get(name) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(value)) if value.trim().is_empty() => Ok(None),
            Some(Value::String(value)) => Ok(Some(value.as_str())),
            Some(_) => Err(DispatchError::invalid_arguments(format!(
                "{name} must be a string"
            ))),
        }
    }

    /// A count parameter that may be omitted.
    ///
    /// # Errors
    ///
    /// Returns `"<name> must be a non-negative integer"` unless the value is
    /// absent, `null`, or an integer in `0..=u32::MAX`.
    pub fn optional_count(&self, name: &str) -> Result<Option<u32>, DispatchError> {
        match self.0.get(name) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Number(number)) => number
                .as_u64()
                .and_then(|value| u32::try_from(value).ok())
                .map(Some)
                .ok_or_else(|| not_a_count(name)),
            Some(_) => Err(not_a_count(name)),
        }
    }

    /// A count parameter with a default.
    ///
    /// # Errors
    ///
    /// As [`Params::optional_count`].
    pub fn count_or(&self, name: &str, default: u32) -> Result<u32, DispatchError> {
        Ok(self.optional_count(name)?.unwrap_or(default))
    }
}

fn not_a_count(name: &str) -> DispatchError {
    DispatchError::invalid_arguments(format!("{name} must be a non-negative integer"))
}
