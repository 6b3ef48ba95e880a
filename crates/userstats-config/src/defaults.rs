use crate::endpoint::NatsEndpoint;
use crate::logging::LogFormat;

/// Default messaging server port.
pub const DEFAULT_NATS_PORT: u16 = 4222;

/// Default messaging server host.
pub const DEFAULT_NATS_HOST: &str = "localhost";

/// Default namespace prefix of the command subject.
pub const DEFAULT_SUBJECT_NAMESPACE: &str = "cytube.query";

/// Default responder identity.
pub const DEFAULT_SERVICE_NAME: &str = "userstats";

/// Default chat domain for domain-scoped queries.
pub const DEFAULT_DOMAIN: &str = "cytu.be";

/// Default per-request handler budget in seconds.
pub const DEFAULT_HANDLER_TIMEOUT_SECS: u64 = 5;

/// Default client reply wait in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 5;

/// Default log filter expression used by the binaries.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Default log filter expression used by the binaries.
#[must_use]
pub const fn default_log_filter() -> &'static str {
    DEFAULT_LOG_FILTER
}

/// Owned log filter value used where allocation is required (e.g. serde).
#[must_use]
pub fn default_log_filter_string() -> String {
    DEFAULT_LOG_FILTER.to_owned()
}

/// Default logging format for the binaries.
#[must_use]
pub const fn default_log_format() -> LogFormat {
    LogFormat::Json
}

/// Default messaging server endpoint.
#[must_use]
pub fn default_nats_endpoint() -> NatsEndpoint {
    NatsEndpoint::nats(DEFAULT_NATS_HOST, DEFAULT_NATS_PORT)
}

pub(crate) fn default_subject_namespace() -> String {
    DEFAULT_SUBJECT_NAMESPACE.to_owned()
}

pub(crate) fn default_service_name() -> String {
    DEFAULT_SERVICE_NAME.to_owned()
}

pub(crate) fn default_domain() -> String {
    DEFAULT_DOMAIN.to_owned()
}

pub(crate) const fn default_handler_timeout_secs() -> u64 {
    DEFAULT_HANDLER_TIMEOUT_SECS
}

pub(crate) const fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}
