//! `timeseries.*` handlers. Range bounds are passed through untouched.

use serde_json::Value;

use crate::dispatch::context::HandlerContext;
use crate::dispatch::errors::DispatchError;
use crate::dispatch::request::Params;
use crate::store::TimeRange;

fn time_range(params: Params<'_>) -> Result<TimeRange<'_>, DispatchError> {
    Ok(TimeRange {
        start: params.optional_str("start_time")?,
        end: params.optional_str("end_time")?,
    })
}

pub(crate) async fn messages(
    context: &HandlerContext,
    params: Params<'_>,
) -> Result<Value, DispatchError> {
    let channel = params.required_str("channel")?;
    let range = time_range(params)?;
    Ok(context
        .store()
        .time_series_messages(channel, context.domain(), range)
        .await?)
}

pub(crate) async fn kudos(
    context: &HandlerContext,
    params: Params<'_>,
) -> Result<Value, DispatchError> {
    let channel = params.optional_str("channel")?;
    let range = time_range(params)?;
    Ok(context
        .store()
        .time_series_kudos(channel, context.domain(), range)
        .await?)
}
