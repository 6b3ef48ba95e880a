//! `user.*` handlers.

use serde_json::{Value, json};

use crate::dispatch::context::HandlerContext;
use crate::dispatch::errors::DispatchError;
use crate::dispatch::request::Params;

pub(crate) async fn stats(
    context: &HandlerContext,
    params: Params<'_>,
) -> Result<Value, DispatchError> {
    let username = params.required_str("username")?;
    let channel = params.optional_str("channel")?;
    Ok(context.store().user_stats(username, channel).await?)
}

/// The store reports a bare count; the reply names the user it belongs to.
pub(crate) async fn messages(
    context: &HandlerContext,
    params: Params<'_>,
) -> Result<Value, DispatchError> {
    let username = params.required_str("username")?;
    let channel = params.optional_str("channel")?;
    let count = context.store().user_message_count(username, channel).await?;
    Ok(json!({
        "username": username,
        "message_count": count,
    }))
}

pub(crate) async fn activity(
    context: &HandlerContext,
    params: Params<'_>,
) -> Result<Value, DispatchError> {
    let username = params.required_str("username")?;
    let channel = params.optional_str("channel")?;
    Ok(context.store().user_activity(username, channel).await?)
}

pub(crate) async fn kudos(
    context: &HandlerContext,
    params: Params<'_>,
) -> Result<Value, DispatchError> {
    let username = params.required_str("username")?;
    let channel = params.optional_str("channel")?;
    Ok(context.store().user_kudos(username, channel).await?)
}
