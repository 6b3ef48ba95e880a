//! Response envelope encoding.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::errors::DispatchError;

/// Response envelope sent on the reply subject.
///
/// Exactly one of `data` and `error` is present: `data` when `success` is
/// true, `error` otherwise. `command` is echoed once the request carried one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandResponse {
    /// Identity of the responder.
    pub service: String,
    /// Command echoed from the request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    /// Whether the command completed.
    pub success: bool,
    /// Handler payload on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    /// Failure description otherwise.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CommandResponse {
    /// Wraps a handler payload.
    #[must_use]
    pub fn success(service: impl Into<String>, command: impl Into<String>, data: Value) -> Self {
        Self {
            service: service.into(),
            command: Some(command.into()),
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Wraps a dispatch failure.
    #[must_use]
    pub fn failure(
        service: impl Into<String>,
        command: Option<String>,
        error: &DispatchError,
    ) -> Self {
        Self {
            service: service.into(),
            command,
            success: false,
            data: None,
            error: Some(error.to_string()),
        }
    }

    /// Encodes the envelope as JSON.
    ///
    /// Should serialisation of the payload fail, the client still receives a
    /// well-formed failure envelope.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        serde_json::to_vec(self).unwrap_or_else(|error| {
            json!({
                "service": self.service,
                "command": self.command,
                "success": false,
                "error": format!("failed to serialise response: {error}"),
            })
            .to_string()
            .into_bytes()
        })
    }
}
