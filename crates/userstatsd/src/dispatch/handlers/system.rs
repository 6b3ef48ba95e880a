//! `system.*` handlers.

use serde_json::{Value, json};

use crate::dispatch::context::HandlerContext;
use crate::dispatch::errors::DispatchError;

pub(crate) fn health(context: &HandlerContext) -> Value {
    let liveness = context.liveness();
    let status = if liveness.is_running() {
        "healthy"
    } else {
        "unhealthy"
    };
    json!({
        "service": context.service(),
        "status": status,
        "uptime_seconds": liveness.uptime_seconds(),
        "database_connected": context.store().is_connected(),
        "nats_connected": context.bus().is_connected(),
    })
}

/// `active_sessions` is reported only when the store tracks sessions.
pub(crate) async fn stats(context: &HandlerContext) -> Result<Value, DispatchError> {
    let store = context.store();
    let totals = store.system_totals().await?;
    let active_sessions = store.active_session_count().await?;

    let mut payload = json!({
        "total_users": totals.total_users,
        "total_messages": totals.total_messages,
        "total_pms": totals.total_pms,
        "total_kudos": totals.total_kudos,
        "total_emotes": totals.total_emotes,
        "total_media_changes": totals.total_media_changes,
    });
    if let (Some(count), Some(fields)) = (active_sessions, payload.as_object_mut()) {
        fields.insert("active_sessions".to_owned(), Value::from(count));
    }
    Ok(payload)
}
