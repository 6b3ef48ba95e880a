//! `channel.*` handlers.

use serde_json::Value;

use super::{DEFAULT_LIMIT, DEFAULT_MEDIA_LIMIT, DEFAULT_POPULATION_HOURS};
use crate::dispatch::context::HandlerContext;
use crate::dispatch::errors::DispatchError;
use crate::dispatch::request::Params;

pub(crate) async fn top_users(
    context: &HandlerContext,
    params: Params<'_>,
) -> Result<Value, DispatchError> {
    let channel = params.optional_str("channel")?;
    let limit = params.count_or("limit", DEFAULT_LIMIT)?;
    Ok(context.store().top_users_by_messages(channel, limit).await?)
}

pub(crate) async fn population(
    context: &HandlerContext,
    params: Params<'_>,
) -> Result<Value, DispatchError> {
    let channel = params.optional_str("channel")?;
    let hours = params.count_or("hours", DEFAULT_POPULATION_HOURS)?;
    Ok(context.store().population_snapshot(channel, hours).await?)
}

pub(crate) async fn media_history(
    context: &HandlerContext,
    params: Params<'_>,
) -> Result<Value, DispatchError> {
    let channel = params.optional_str("channel")?;
    let limit = params.count_or("limit", DEFAULT_MEDIA_LIMIT)?;
    Ok(context.store().recent_media_changes(channel, limit).await?)
}

/// Omitting `days` asks for all-time marks.
pub(crate) async fn watermarks(
    context: &HandlerContext,
    params: Params<'_>,
) -> Result<Value, DispatchError> {
    let channel = params.required_str("channel")?;
    let days = params.optional_count("days")?;
    Ok(context
        .store()
        .water_marks(channel, context.domain(), days)
        .await?)
}

pub(crate) async fn movie_votes(
    context: &HandlerContext,
    params: Params<'_>,
) -> Result<Value, DispatchError> {
    let channel = params.required_str("channel")?;
    let media_title = params.optional_str("media_title")?;
    Ok(context
        .store()
        .movie_votes(channel, context.domain(), media_title)
        .await?)
}
