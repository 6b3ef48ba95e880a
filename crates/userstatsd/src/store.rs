//! Read-only data access capability consumed by the command handlers.
//!
//! The daemon does not compute or persist statistics itself. Every query is
//! delegated to a [`StatsStore`] supplied at construction time, and whatever
//! the store returns is forwarded to the client unchanged. Payload shapes are
//! therefore owned by the store implementation.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Failure reported by a [`StatsStore`] query.
///
/// The display text is forwarded verbatim as the response `error`.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct StoreError {
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl StoreError {
    /// Builds an error without an underlying source.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Builds an error wrapping the driver failure that caused it.
    #[must_use]
    pub fn with_source(
        message: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Human-readable message describing the failure.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Result alias for store queries.
pub type StoreResult<T> = Result<T, StoreError>;

/// Aggregate counters reported by `system.stats`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemTotals {
    /// Distinct users ever seen.
    pub total_users: u64,
    /// Chat messages recorded.
    pub total_messages: u64,
    /// Private messages recorded.
    pub total_pms: u64,
    /// `++` kudos given.
    pub total_kudos: u64,
    /// Emote uses recorded.
    pub total_emotes: u64,
    /// Media changes recorded.
    pub total_media_changes: u64,
}

/// Read-only statistics queries.
///
/// Optional `channel` arguments widen the query to every channel when absent.
/// Implementations must be safe to call concurrently; any pooling is their
/// own concern.
#[async_trait]
pub trait StatsStore: Send + Sync {
    /// Reports whether the backing database is reachable.
    fn is_connected(&self) -> bool;

    /// Comprehensive statistics for one user.
    async fn user_stats(&self, username: &str, channel: Option<&str>) -> StoreResult<Value>;

    /// Number of chat messages sent by one user.
    async fn user_message_count(&self, username: &str, channel: Option<&str>)
    -> StoreResult<u64>;

    /// Time a user has spent present and active.
    async fn user_activity(&self, username: &str, channel: Option<&str>) -> StoreResult<Value>;

    /// Kudos received by one user.
    async fn user_kudos(&self, username: &str, channel: Option<&str>) -> StoreResult<Value>;

    /// Users ranked by message count.
    async fn top_users_by_messages(&self, channel: Option<&str>, limit: u32)
    -> StoreResult<Value>;

    /// Users ranked by kudos received.
    async fn top_users_by_kudos(&self, channel: Option<&str>, limit: u32) -> StoreResult<Value>;

    /// Emotes ranked by use.
    async fn top_emotes(&self, channel: Option<&str>, limit: u32) -> StoreResult<Value>;

    /// Latest population snapshot within the trailing window.
    async fn population_snapshot(&self, channel: Option<&str>, hours: u32) -> StoreResult<Value>;

    /// Most recent media changes, newest first.
    async fn recent_media_changes(&self, channel: Option<&str>, limit: u32)
    -> StoreResult<Value>;

    /// High and low population marks, over `days` or all time.
    async fn water_marks(
        &self,
        channel: &str,
        domain: &str,
        days: Option<u32>,
    ) -> StoreResult<Value>;

    /// Movie vote tallies, optionally for a single title.
    async fn movie_votes(
        &self,
        channel: &str,
        domain: &str,
        media_title: Option<&str>,
    ) -> StoreResult<Value>;

    /// Message counts bucketed over time.
    async fn time_series_messages(
        &self,
        channel: &str,
        domain: &str,
        range: TimeRange<'_>,
    ) -> StoreResult<Value>;

    /// Kudos counts bucketed over time.
    ///
    /// Kudos are not tracked as a time series yet, so the default reports an
    /// empty series.
    async fn time_series_kudos(
        &self,
        _channel: Option<&str>,
        _domain: &str,
        _range: TimeRange<'_>,
    ) -> StoreResult<Value> {
        Ok(Value::Array(Vec::new()))
    }

    /// Aggregate counters across all channels.
    async fn system_totals(&self) -> StoreResult<SystemTotals>;

    /// Number of live activity sessions, when an activity tracker is attached.
    async fn active_session_count(&self) -> StoreResult<Option<u64>> {
        Ok(None)
    }
}

/// Optional bounds of a time-series query, passed through as supplied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeRange<'a> {
    /// Inclusive lower bound.
    pub start: Option<&'a str>,
    /// Inclusive upper bound.
    pub end: Option<&'a str>,
}
