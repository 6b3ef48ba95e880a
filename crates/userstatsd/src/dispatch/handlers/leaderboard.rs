//! `leaderboard.*` handlers. All of them rank across every channel unless one
//! is named.

use serde_json::Value;

use super::DEFAULT_LIMIT;
use crate::dispatch::context::HandlerContext;
use crate::dispatch::errors::DispatchError;
use crate::dispatch::request::Params;

pub(crate) async fn messages(
    context: &HandlerContext,
    params: Params<'_>,
) -> Result<Value, DispatchError> {
    let channel = params.optional_str("channel")?;
    let limit = params.count_or("limit", DEFAULT_LIMIT)?;
    Ok(context.store().top_users_by_messages(channel, limit).await?)
}

pub(crate) async fn kudos(
    context: &HandlerContext,
    params: Params<'_>,
) -> Result<Value, DispatchError> {
    let channel = params.optional_str("channel")?;
    let limit = params.count_or("limit", DEFAULT_LIMIT)?;
    Ok(context.store().top_users_by_kudos(channel, limit).await?)
}

pub(crate) async fn emotes(
    context: &HandlerContext,
    params: Params<'_>,
) -> Result<Value, DispatchError> {
    let channel = params.optional_str("channel")?;
    let limit = params.count_or("limit", DEFAULT_LIMIT)?;
    Ok(context.store().top_emotes(channel, limit).await?)
}
