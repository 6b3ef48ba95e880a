//! Shared configuration for the statistics query endpoint and its CLI.
//!
//! Values are layered by `ortho_config`: built-in defaults, then the
//! `userstats.toml` configuration file, then `USERSTATS_*` environment
//! variables, then command-line flags. Both binaries resolve the same
//! [`Config`], so the daemon and the query tool always agree on the command
//! subject and the messaging server.

use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

mod defaults;
mod endpoint;
mod logging;

pub use defaults::{
    DEFAULT_DOMAIN, DEFAULT_HANDLER_TIMEOUT_SECS, DEFAULT_LOG_FILTER, DEFAULT_NATS_HOST,
    DEFAULT_NATS_PORT, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_SERVICE_NAME,
    DEFAULT_SUBJECT_NAMESPACE, default_log_filter, default_log_filter_string, default_log_format,
    default_nats_endpoint,
};
pub use endpoint::{EndpointParseError, NatsCredentials, NatsEndpoint, NatsScheme};
pub use logging::{LogFormat, LogFormatParseError};

/// Suffix appended to the namespace and service to form the command subject.
pub const COMMAND_SUBJECT_SUFFIX: &str = "command";

/// Resolved configuration shared by `userstatsd` and `userstats-query`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, OrthoConfig)]
#[ortho_config(
    prefix = "USERSTATS",
    discovery(
        app_name = "userstats",
        env_var = "USERSTATS_CONFIG_PATH",
        config_file_name = "userstats.toml",
        dotfile_name = ".userstats.toml",
        config_cli_long = "config-path",
        config_cli_visible = true,
    )
)]
pub struct Config {
    /// Messaging server URL.
    #[ortho_config(default = defaults::default_nats_endpoint())]
    #[serde(default = "defaults::default_nats_endpoint")]
    pub nats_server: NatsEndpoint,
    /// User name presented with `nats_password`.
    #[serde(default)]
    pub nats_user: Option<String>,
    /// Password presented with `nats_user`.
    #[serde(default)]
    pub nats_password: Option<String>,
    /// Token presented when no user/password pair is configured.
    #[serde(default)]
    pub nats_token: Option<String>,
    /// Namespace prefix of the command subject.
    #[ortho_config(default = defaults::default_subject_namespace())]
    #[serde(default = "defaults::default_subject_namespace")]
    pub subject_namespace: String,
    /// Responder identity echoed in every response.
    #[ortho_config(default = defaults::default_service_name())]
    #[serde(default = "defaults::default_service_name")]
    pub service_name: String,
    /// Chat domain passed to domain-scoped queries.
    #[ortho_config(default = defaults::default_domain())]
    #[serde(default = "defaults::default_domain")]
    pub domain: String,
    /// Per-request handler budget inside the daemon, in seconds.
    #[ortho_config(default = defaults::DEFAULT_HANDLER_TIMEOUT_SECS)]
    #[serde(default = "defaults::default_handler_timeout_secs")]
    pub handler_timeout_secs: u64,
    /// Reply wait used by the query tool, in seconds.
    #[ortho_config(default = defaults::DEFAULT_REQUEST_TIMEOUT_SECS)]
    #[serde(default = "defaults::default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Tracing filter expression.
    #[ortho_config(default = defaults::default_log_filter_string())]
    #[serde(default = "defaults::default_log_filter_string")]
    pub log_filter: String,
    /// Log output format.
    #[ortho_config(default = defaults::default_log_format())]
    #[serde(default = "defaults::default_log_format")]
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            nats_server: default_nats_endpoint(),
            nats_user: None,
            nats_password: None,
            nats_token: None,
            subject_namespace: defaults::default_subject_namespace(),
            service_name: defaults::default_service_name(),
            domain: defaults::default_domain(),
            handler_timeout_secs: DEFAULT_HANDLER_TIMEOUT_SECS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            log_filter: default_log_filter_string(),
            log_format: default_log_format(),
        }
    }
}

impl Config {
    /// Messaging server endpoint.
    #[must_use]
    pub const fn nats_server(&self) -> &NatsEndpoint {
        &self.nats_server
    }

    /// Responder identity.
    #[must_use]
    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    /// Chat domain for domain-scoped queries.
    #[must_use]
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Tracing filter expression.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }

    /// Log output format.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }

    /// Per-request handler budget.
    #[must_use]
    pub const fn handler_timeout(&self) -> Duration {
        Duration::from_secs(self.handler_timeout_secs)
    }

    /// Client reply wait.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// The single subject every command is multiplexed through.
    ///
    /// ```text
    /// <subject_namespace>.<service_name>.command
    /// ```
    #[must_use]
    pub fn command_subject(&self) -> String {
        format!(
            "{}.{}.{COMMAND_SUBJECT_SUFFIX}",
            self.subject_namespace, self.service_name
        )
    }

    /// Credentials to present to the messaging server.
    ///
    /// A complete user/password pair takes precedence over a token.
    #[must_use]
    pub fn nats_credentials(&self) -> NatsCredentials {
        match (&self.nats_user, &self.nats_password, &self.nats_token) {
            (Some(user), Some(password), _) => NatsCredentials::UserPassword {
                user: user.clone(),
                password: password.clone(),
            },
            (_, _, Some(token)) => NatsCredentials::Token(token.clone()),
            _ => NatsCredentials::None,
        }
    }

    /// Checks invariants that `serde` cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigValidationError`] when a subject token is empty or
    /// contains whitespace or wildcards, or when a timeout is zero.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        validate_subject_token("service_name", &self.service_name)?;
        for token in self.subject_namespace.split('.') {
            validate_subject_token("subject_namespace", token)?;
        }
        if self.handler_timeout_secs == 0 {
            return Err(ConfigValidationError::ZeroTimeout {
                field: "handler_timeout_secs",
            });
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigValidationError::ZeroTimeout {
                field: "request_timeout_secs",
            });
        }
        Ok(())
    }
}

fn validate_subject_token(field: &'static str, token: &str) -> Result<(), ConfigValidationError> {
    if token.is_empty() {
        return Err(ConfigValidationError::EmptySubjectToken { field });
    }
    if token
        .chars()
        .any(|ch| ch.is_whitespace() || ch == '*' || ch == '>')
    {
        return Err(ConfigValidationError::InvalidSubjectToken {
            field,
            value: token.to_owned(),
        });
    }
    Ok(())
}

/// Errors reported by [`Config::validate`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigValidationError {
    /// A subject token was empty.
    #[error("{field} must not contain empty subject tokens")]
    EmptySubjectToken {
        /// Offending configuration field.
        field: &'static str,
    },
    /// A subject token contained whitespace or a wildcard.
    #[error("{field} contains an invalid subject token '{value}'")]
    InvalidSubjectToken {
        /// Offending configuration field.
        field: &'static str,
        /// Offending token.
        value: String,
    },
    /// A timeout was configured as zero seconds.
    #[error("{field} must be greater than zero")]
    ZeroTimeout {
        /// Offending configuration field.
        field: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn default_command_subject_multiplexes_under_service() {
        let config = Config::default();
        assert_eq!(config.command_subject(), "cytube.query.userstats.command");
    }

    #[test]
    fn user_password_pair_wins_over_token() {
        let config = Config {
            nats_user: Some("stats".to_owned()),
            nats_password: Some("secret".to_owned()),
            nats_token: Some("token".to_owned()),
            ..Config::default()
        };
        assert_eq!(
            config.nats_credentials(),
            NatsCredentials::UserPassword {
                user: "stats".to_owned(),
                password: "secret".to_owned(),
            }
        );
    }

    #[test]
    fn lone_user_falls_back_to_token() {
        let config = Config {
            nats_user: Some("stats".to_owned()),
            nats_token: Some("token".to_owned()),
            ..Config::default()
        };
        assert_eq!(
            config.nats_credentials(),
            NatsCredentials::Token("token".to_owned())
        );
    }

    #[test]
    fn anonymous_without_credentials() {
        assert_eq!(Config::default().nats_credentials(), NatsCredentials::None);
    }

    #[test]
    fn defaults_validate() {
        assert!(Config::default().validate().is_ok());
    }

    #[rstest]
    #[case::wildcard_service(Config { service_name: "user*".to_owned(), ..Config::default() })]
    #[case::blank_service(Config { service_name: String::new(), ..Config::default() })]
    #[case::spaced_namespace(Config { subject_namespace: "cytube query".to_owned(), ..Config::default() })]
    #[case::empty_namespace_token(Config { subject_namespace: "cytube..query".to_owned(), ..Config::default() })]
    #[case::zero_handler_timeout(Config { handler_timeout_secs: 0, ..Config::default() })]
    #[case::zero_request_timeout(Config { request_timeout_secs: 0, ..Config::default() })]
    fn rejects_invalid_values(#[case] config: Config) {
        assert!(config.validate().is_err());
    }
}
