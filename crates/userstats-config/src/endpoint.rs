use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::defaults::DEFAULT_NATS_PORT;

/// Declarative configuration for the messaging server connection.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(try_from = "String", into = "String")]
pub struct NatsEndpoint {
    scheme: NatsScheme,
    host: String,
    port: u16,
}

/// Connection schemes accepted for the messaging server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NatsScheme {
    /// Plain-text connection.
    Nats,
    /// TLS connection.
    Tls,
}

impl NatsScheme {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Nats => "nats",
            Self::Tls => "tls",
        }
    }
}

impl NatsEndpoint {
    /// Builds a plain-text endpoint.
    #[must_use]
    pub fn nats(host: impl Into<String>, port: u16) -> Self {
        Self {
            scheme: NatsScheme::Nats,
            host: host.into(),
            port,
        }
    }

    /// Builds a TLS endpoint.
    #[must_use]
    pub fn tls(host: impl Into<String>, port: u16) -> Self {
        Self {
            scheme: NatsScheme::Tls,
            host: host.into(),
            port,
        }
    }

    /// Connection scheme.
    #[must_use]
    pub const fn scheme(&self) -> NatsScheme {
        self.scheme
    }

    /// Server host name or address.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Server port.
    #[must_use]
    pub const fn port(&self) -> u16 {
        self.port
    }
}

impl fmt::Display for NatsEndpoint {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "{}://{}:{}",
            self.scheme.as_str(),
            self.host,
            self.port
        )
    }
}

impl FromStr for NatsEndpoint {
    type Err = EndpointParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let url = Url::parse(input)?;
        let scheme = match url.scheme() {
            "nats" => NatsScheme::Nats,
            "tls" => NatsScheme::Tls,
            other => return Err(EndpointParseError::UnsupportedScheme(other.to_owned())),
        };
        let host = url
            .host_str()
            .filter(|host| !host.is_empty())
            .ok_or_else(|| EndpointParseError::MissingHost(input.to_owned()))?;
        let port = url.port().unwrap_or(DEFAULT_NATS_PORT);
        Ok(Self {
            scheme,
            host: host.to_owned(),
            port,
        })
    }
}

impl TryFrom<String> for NatsEndpoint {
    type Error = EndpointParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<NatsEndpoint> for String {
    fn from(endpoint: NatsEndpoint) -> Self {
        endpoint.to_string()
    }
}

/// Errors encountered while parsing a [`NatsEndpoint`] from text.
#[derive(Debug, Error)]
pub enum EndpointParseError {
    /// Scheme was not recognised.
    #[error("unsupported messaging scheme '{0}'")]
    UnsupportedScheme(String),
    /// Host name was missing.
    #[error("missing messaging host in '{0}'")]
    MissingHost(String),
    /// URL failed to parse.
    #[error(transparent)]
    Url(#[from] url::ParseError),
}

/// Credentials presented when connecting to the messaging server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NatsCredentials {
    /// Anonymous connection.
    None,
    /// User and password pair.
    UserPassword {
        /// User name.
        user: String,
        /// Password.
        password: String,
    },
    /// Bearer token.
    Token(String),
}
