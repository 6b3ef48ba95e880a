//! Request envelopes built from parsed CLI arguments.
//!
//! Each subcommand maps onto exactly one endpoint command identifier.
//! Parameters the chosen query does not understand are left out of the
//! envelope rather than sent and ignored.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::AppError;
use crate::cli::{ChannelQuery, LeaderboardKind, QueryCommand, SeriesKind, SystemQuery};

/// Envelope sent to the endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct CommandRequest {
    pub(crate) command: &'static str,
    pub(crate) service: String,
    #[serde(flatten)]
    pub(crate) params: Map<String, Value>,
}

impl CommandRequest {
    /// Builds the envelope for `subcommand`, addressed to `service`.
    pub(crate) fn new(subcommand: &QueryCommand, service: &str) -> Self {
        let mut params = Params::default();
        let command = match subcommand {
            QueryCommand::User { username, channel } => {
                params.text("username", Some(username));
                params.text("channel", channel.as_deref());
                "user.stats"
            }
            QueryCommand::Leaderboard {
                kind,
                limit,
                channel,
            } => {
                params.text("channel", channel.as_deref());
                params.count("limit", *limit);
                match kind {
                    LeaderboardKind::Messages => "leaderboard.messages",
                    LeaderboardKind::Kudos => "leaderboard.kudos",
                    LeaderboardKind::Emotes => "leaderboard.emotes",
                }
            }
            QueryCommand::Channel {
                query,
                channel,
                limit,
                hours,
                days,
                title,
            } => {
                params.text("channel", Some(channel));
                match query {
                    ChannelQuery::Top => {
                        params.count("limit", *limit);
                        "channel.top_users"
                    }
                    ChannelQuery::Population => {
                        params.count("hours", *hours);
                        "channel.population"
                    }
                    ChannelQuery::Media => {
                        params.count("limit", *limit);
                        "channel.media_history"
                    }
                    ChannelQuery::Watermarks => {
                        params.count("days", *days);
                        "channel.watermarks"
                    }
                    ChannelQuery::MovieVotes => {
                        params.text("media_title", title.as_deref());
                        "channel.movie_votes"
                    }
                }
            }
            QueryCommand::System { query } => match query {
                SystemQuery::Stats => "system.stats",
                SystemQuery::Health => "system.health",
            },
            QueryCommand::Timeseries {
                kind,
                channel,
                start,
                end,
            } => {
                params.text("channel", Some(channel));
                params.text("start_time", start.as_deref());
                params.text("end_time", end.as_deref());
                match kind {
                    SeriesKind::Messages => "timeseries.messages",
                    SeriesKind::Kudos => "timeseries.kudos",
                }
            }
        };
        Self {
            command,
            service: service.to_owned(),
            params: params.0,
        }
    }

    pub(crate) fn to_bytes(&self) -> Result<Vec<u8>, AppError> {
        serde_json::to_vec(self).map_err(AppError::SerialiseRequest)
    }
}

#[derive(Default)]
struct Params(Map<String, Value>);

impl Params {
    fn text(&mut self, name: &str, value: Option<&str>) {
        if let Some(text) = value {
            self.0.insert(name.to_owned(), Value::from(text));
        }
    }

    fn count(&mut self, name: &str, value: Option<u32>) {
        if let Some(number) = value {
            self.0.insert(name.to_owned(), Value::from(number));
        }
    }
}

/// Envelope returned by the endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub(crate) struct CommandResponse {
    /// Command the endpoint answered, echoed from the request.
    #[serde(default)]
    pub(crate) command: Option<String>,
    pub(crate) success: bool,
    #[serde(default)]
    pub(crate) data: Option<Value>,
    #[serde(default)]
    pub(crate) error: Option<String>,
}

impl CommandResponse {
    pub(crate) fn parse(body: &[u8]) -> Result<(Self, Value), AppError> {
        let raw: Value = serde_json::from_slice(body).map_err(AppError::ParseResponse)?;
        let response = Self::deserialize(&raw).map_err(AppError::ParseResponse)?;
        Ok((response, raw))
    }

    /// Command used to title human output, preferring the endpoint's echo.
    pub(crate) fn heading<'a>(&'a self, requested: &'a str) -> &'a str {
        self.command.as_deref().unwrap_or(requested)
    }
}
