//! Scriptable statistics store.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::store::{StatsStore, StoreError, StoreResult, SystemTotals, TimeRange};

/// One recorded store invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreCall {
    pub method: &'static str,
    pub args: Value,
}

/// Store that records calls and answers from a script.
///
/// Unscripted queries echo their method and arguments back, which lets tests
/// match replies to requests.
pub struct RecordingStore {
    calls: Mutex<Vec<StoreCall>>,
    responses: Mutex<HashMap<&'static str, Value>>,
    failure: Mutex<Option<String>>,
    delay: Mutex<Option<Duration>>,
    totals: Mutex<SystemTotals>,
    active_sessions: Mutex<Option<u64>>,
    connected: AtomicBool,
}

impl Default for RecordingStore {
    fn default() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            responses: Mutex::new(HashMap::new()),
            failure: Mutex::new(None),
            delay: Mutex::new(None),
            totals: Mutex::new(SystemTotals::default()),
            active_sessions: Mutex::new(None),
            connected: AtomicBool::new(true),
        }
    }
}

impl RecordingStore {
    pub fn respond(&self, method: &'static str, value: Value) {
        self.responses
            .lock()
            .expect("responses mutex poisoned")
            .insert(method, value);
    }

    pub fn fail_with(&self, message: &str) {
        *self.failure.lock().expect("failure mutex poisoned") = Some(message.to_owned());
    }

    pub fn delay_by(&self, delay: Duration) {
        *self.delay.lock().expect("delay mutex poisoned") = Some(delay);
    }

    pub fn set_totals(&self, totals: SystemTotals) {
        *self.totals.lock().expect("totals mutex poisoned") = totals;
    }

    pub fn set_active_sessions(&self, count: Option<u64>) {
        *self
            .active_sessions
            .lock()
            .expect("sessions mutex poisoned") = count;
    }

    pub fn set_connected(&self, connected: bool) {
        self.connected.store(connected, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<StoreCall> {
        self.calls.lock().expect("calls mutex poisoned").clone()
    }

    /// The only recorded call; panics unless exactly one was made.
    pub fn single_call(&self) -> StoreCall {
        let calls = self.calls();
        assert_eq!(calls.len(), 1, "expected one store call, got {calls:?}");
        calls[0].clone()
    }

    async fn answer(&self, method: &'static str, args: Value) -> StoreResult<Value> {
        self.calls
            .lock()
            .expect("calls mutex poisoned")
            .push(StoreCall {
                method,
                args: args.clone(),
            });
        let scripted_delay = *self.delay.lock().expect("delay mutex poisoned");
        if let Some(delay) = scripted_delay {
            tokio::time::sleep(delay).await;
        }
        let failure = self.failure.lock().expect("failure mutex poisoned").clone();
        if let Some(message) = failure {
            return Err(StoreError::new(message));
        }
        let scripted = self
            .responses
            .lock()
            .expect("responses mutex poisoned")
            .get(method)
            .cloned();
        Ok(scripted.unwrap_or_else(|| json!({ "method": method, "args": args })))
    }
}

#[async_trait]
impl StatsStore for RecordingStore {
    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    async fn user_stats(&self, username: &str, channel: Option<&str>) -> StoreResult<Value> {
        self.answer("user_stats", json!({ "username": username, "channel": channel }))
            .await
    }

    async fn user_message_count(
        &self,
        username: &str,
        channel: Option<&str>,
    ) -> StoreResult<u64> {
        let value = self
            .answer(
                "user_message_count",
                json!({ "username": username, "channel": channel }),
            )
            .await?;
        Ok(value.as_u64().unwrap_or_default())
    }

    async fn user_activity(&self, username: &str, channel: Option<&str>) -> StoreResult<Value> {
        self.answer("user_activity", json!({ "username": username, "channel": channel }))
            .await
    }

    async fn user_kudos(&self, username: &str, channel: Option<&str>) -> StoreResult<Value> {
        self.answer("user_kudos", json!({ "username": username, "channel": channel }))
            .await
    }

    async fn top_users_by_messages(
        &self,
        channel: Option<&str>,
        limit: u32,
    ) -> StoreResult<Value> {
        self.answer(
            "top_users_by_messages",
            json!({ "channel": channel, "limit": limit }),
        )
        .await
    }

    async fn top_users_by_kudos(&self, channel: Option<&str>, limit: u32) -> StoreResult<Value> {
        self.answer(
            "top_users_by_kudos",
            json!({ "channel": channel, "limit": limit }),
        )
        .await
    }

    async fn top_emotes(&self, channel: Option<&str>, limit: u32) -> StoreResult<Value> {
        self.answer("top_emotes", json!({ "channel": channel, "limit": limit }))
            .await
    }

    async fn population_snapshot(&self, channel: Option<&str>, hours: u32) -> StoreResult<Value> {
        self.answer(
            "population_snapshot",
            json!({ "channel": channel, "hours": hours }),
        )
        .await
    }

    async fn recent_media_changes(
        &self,
        channel: Option<&str>,
        limit: u32,
    ) -> StoreResult<Value> {
        self.answer(
            "recent_media_changes",
            json!({ "channel": channel, "limit": limit }),
        )
        .await
    }

    async fn water_marks(
        &self,
        channel: &str,
        domain: &str,
        days: Option<u32>,
    ) -> StoreResult<Value> {
        self.answer(
            "water_marks",
            json!({ "channel": channel, "domain": domain, "days": days }),
        )
        .await
    }

    async fn movie_votes(
        &self,
        channel: &str,
        domain: &str,
        media_title: Option<&str>,
    ) -> StoreResult<Value> {
        self.answer(
            "movie_votes",
            json!({ "channel": channel, "domain": domain, "media_title": media_title }),
        )
        .await
    }

    async fn time_series_messages(
        &self,
        channel: &str,
        domain: &str,
        range: TimeRange<'_>,
    ) -> StoreResult<Value> {
        self.answer(
            "time_series_messages",
            json!({
                "channel": channel,
                "domain": domain,
                "start": range.start,
                "end": range.end,
            }),
        )
        .await
    }

    async fn system_totals(&self) -> StoreResult<SystemTotals> {
        self.answer("system_totals", Value::Null).await?;
        Ok(*self.totals.lock().expect("totals mutex poisoned"))
    }

    async fn active_session_count(&self) -> StoreResult<Option<u64>> {
        Ok(*self
            .active_sessions
            .lock()
            .expect("sessions mutex poisoned"))
    }
}
