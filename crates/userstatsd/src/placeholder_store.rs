//! Store used when no statistics database is attached.

use async_trait::async_trait;
use serde_json::Value;
use tracing::warn;

use crate::store::{StatsStore, StoreError, StoreResult, SystemTotals, TimeRange};

const STORE_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::store");
const NOT_CONFIGURED: &str = "statistics store is not configured";

/// Store that reports itself disconnected and fails every query.
///
/// The daemon binary answers `system.health` truthfully with this store;
/// embedders supply a real store through
/// [`run_with_store`](crate::run_with_store).
#[derive(Debug, Default, Clone, Copy)]
pub struct UnconfiguredStore;

impl UnconfiguredStore {
    fn refuse<T>(query: &'static str) -> StoreResult<T> {
        warn!(
            target: STORE_TARGET,
            query,
            "statistics store unavailable"
        );
        Err(StoreError::new(NOT_CONFIGURED))
    }
}

#[async_trait]
impl StatsStore for UnconfiguredStore {
    fn is_connected(&self) -> bool {
        false
    }

    async fn user_stats(&self, _username: &str, _channel: Option<&str>) -> StoreResult<Value> {
        Self::refuse("user_stats")
    }

    async fn user_message_count(
        &self,
        _username: &str,
        _channel: Option<&str>,
    ) -> StoreResult<u64> {
        Self::refuse("user_message_count")
    }

    async fn user_activity(&self, _username: &str, _channel: Option<&str>) -> StoreResult<Value> {
        Self::refuse("user_activity")
    }

    async fn user_kudos(&self, _username: &str, _channel: Option<&str>) -> StoreResult<Value> {
        Self::refuse("user_kudos")
    }

    async fn top_users_by_messages(
        &self,
        _channel: Option<&str>,
        _limit: u32,
    ) -> StoreResult<Value> {
        Self::refuse("top_users_by_messages")
    }

    async fn top_users_by_kudos(&self, _channel: Option<&str>, _limit: u32) -> StoreResult<Value> {
        Self::refuse("top_users_by_kudos")
    }

    async fn top_emotes(&self, _channel: Option<&str>, _limit: u32) -> StoreResult<Value> {
        Self::refuse("top_emotes")
    }

    async fn population_snapshot(&self, _channel: Option<&str>, _hours: u32) -> StoreResult<Value> {
        Self::refuse("population_snapshot")
    }

    async fn recent_media_changes(
        &self,
        _channel: Option<&str>,
        _limit: u32,
    ) -> StoreResult<Value> {
        Self::refuse("recent_media_changes")
    }

    async fn water_marks(
        &self,
        _channel: &str,
        _domain: &str,
        _days: Option<u32>,
    ) -> StoreResult<Value> {
        Self::refuse("water_marks")
    }

    async fn movie_votes(
        &self,
        _channel: &str,
        _domain: &str,
        _media_title: Option<&str>,
    ) -> StoreResult<Value> {
        Self::refuse("movie_votes")
    }

    async fn time_series_messages(
        &self,
        _channel: &str,
        _domain: &str,
        _range: TimeRange<'_>,
    ) -> StoreResult<Value> {
        Self::refuse("time_series_messages")
    }

    async fn system_totals(&self) -> StoreResult<SystemTotals> {
        Self::refuse("system_totals")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn every_query_reports_missing_store() {
        let store = UnconfiguredStore;
        assert!(!store.is_connected());
        let error = store
            .user_stats("alice", None)
            .await
            .expect_err("store must refuse");
        assert_eq!(error.to_string(), NOT_CONFIGURED);
        assert!(store.system_totals().await.is_err());
    }
}
