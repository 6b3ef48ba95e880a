//! Static command table.
//!
//! Identifiers are matched exactly and case-sensitively. Adding a command
//! means adding a variant, its identifier and its handler arm; nothing else
//! changes.

use std::fmt;

use serde_json::Value;

use super::context::HandlerContext;
use super::errors::DispatchError;
use super::handlers::{channel, leaderboard, system, timeseries, user};
use super::request::Params;

/// Every command the responder understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// `user.stats`
    UserStats,
    /// `user.messages`
    UserMessages,
    /// `user.activity`
    UserActivity,
    /// `user.kudos`
    UserKudos,
    /// `channel.top_users`
    ChannelTopUsers,
    /// `channel.population`
    ChannelPopulation,
    /// `channel.media_history`
    ChannelMediaHistory,
    /// `channel.watermarks`
    ChannelWatermarks,
    /// `channel.movie_votes`
    ChannelMovieVotes,
    /// `leaderboard.messages`
    LeaderboardMessages,
    /// `leaderboard.kudos`
    LeaderboardKudos,
    /// `leaderboard.emotes`
    LeaderboardEmotes,
    /// `timeseries.messages`
    TimeseriesMessages,
    /// `timeseries.kudos`
    TimeseriesKudos,
    /// `system.health`
    SystemHealth,
    /// `system.stats`
    SystemStats,
}

impl Command {
    /// All registered commands.
    pub const ALL: [Self; 16] = [
        Self::UserStats,
        Self::UserMessages,
        Self::UserActivity,
        Self::UserKudos,
        Self::ChannelTopUsers,
        Self::ChannelPopulation,
        Self::ChannelMediaHistory,
        Self::ChannelWatermarks,
        Self::ChannelMovieVotes,
        Self::LeaderboardMessages,
        Self::LeaderboardKudos,
        Self::LeaderboardEmotes,
        Self::TimeseriesMessages,
        Self::TimeseriesKudos,
        Self::SystemHealth,
        Self::SystemStats,
    ];

    /// Resolves an identifier.
    ///
    /// # Errors
    ///
    /// Returns `DispatchError::UnknownCommand` for unregistered identifiers.
    pub fn parse(value: &str) -> Result<Self, DispatchError> {
        match value {
            "user.stats" => Ok(Self::UserStats),
            "user.messages" => Ok(Self::UserMessages),
            "user.activity" => Ok(Self::UserActivity),
            "user.kudos" => Ok(Self::UserKudos),
            "channel.top_users" => Ok(Self::ChannelTopUsers),
            "channel.population" => Ok(Self::ChannelPopulation),
            "channel.media_history" => Ok(Self::ChannelMediaHistory),
            "channel.watermarks" => Ok(Self::ChannelWatermarks),
            "channel.movie_votes" => Ok(Self::ChannelMovieVotes),
            "leaderboard.messages" => Ok(Self::LeaderboardMessages),
            "leaderboard.kudos" => Ok(Self::LeaderboardKudos),
            "leaderboard.emotes" => Ok(Self::LeaderboardEmotes),
            "timeseries.messages" => Ok(Self::TimeseriesMessages),
            "timeseries.kudos" => Ok(Self::TimeseriesKudos),
            "system.health" => Ok(Self::SystemHealth),
            "system.stats" => Ok(Self::SystemStats),
            _ => Err(DispatchError::unknown_command(value)),
        }
    }

    /// Returns the canonical identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UserStats => "user.stats",
            Self::UserMessages => "user.messages",
            Self::UserActivity => "user.activity",
            Self::UserKudos => "user.kudos",
            Self::ChannelTopUsers => "channel.top_users",
            Self::ChannelPopulation => "channel.population",
            Self::ChannelMediaHistory => "channel.media_history",
            Self::ChannelWatermarks => "channel.watermarks",
            Self::ChannelMovieVotes => "channel.movie_votes",
            Self::LeaderboardMessages => "leaderboard.messages",
            Self::LeaderboardKudos => "leaderboard.kudos",
            Self::LeaderboardEmotes => "leaderboard.emotes",
            Self::TimeseriesMessages => "timeseries.messages",
            Self::TimeseriesKudos => "timeseries.kudos",
            Self::SystemHealth => "system.health",
            Self::SystemStats => "system.stats",
        }
    }

    /// Runs the handler bound to this command.
    ///
    /// # Errors
    ///
    /// Propagates parameter validation and data store failures.
    pub async fn run(
        self,
        context: &HandlerContext,
        params: Params<'_>,
    ) -> Result<Value, DispatchError> {
        match self {
            Self::UserStats => user::stats(context, params).await,
            Self::UserMessages => user::messages(context, params).await,
            Self::UserActivity => user::activity(context, params).await,
            Self::UserKudos => user::kudos(context, params).await,
            Self::ChannelTopUsers => channel::top_users(context, params).await,
            Self::ChannelPopulation => channel::population(context, params).await,
            Self::ChannelMediaHistory => channel::media_history(context, params).await,
            Self::ChannelWatermarks => channel::watermarks(context, params).await,
            Self::ChannelMovieVotes => channel::movie_votes(context, params).await,
            Self::LeaderboardMessages => leaderboard::messages(context, params).await,
            Self::LeaderboardKudos => leaderboard::kudos(context, params).await,
            Self::LeaderboardEmotes => leaderboard::emotes(context, params).await,
            Self::TimeseriesMessages => timeseries::messages(context, params).await,
            Self::TimeseriesKudos => timeseries::kudos(context, params).await,
            Self::SystemHealth => Ok(system::health(context)),
            Self::SystemStats => system::stats(context).await,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
