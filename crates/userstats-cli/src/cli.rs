//! CLI argument definitions for the statistics query tool.

use clap::{Parser, Subcommand, ValueEnum};

use crate::output::OutputFormat;

/// Command-line interface for querying the statistics endpoint.
#[derive(Parser, Debug)]
#[command(
    name = "userstats-query",
    about = "Query the user statistics endpoint over NATS",
    disable_help_subcommand = true
)]
pub(crate) struct Cli {
    /// Controls how responses are rendered.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Auto)]
    pub(crate) output: OutputFormat,
    /// The query to issue.
    #[command(subcommand)]
    pub(crate) command: QueryCommand,
}

/// Queries understood by the endpoint.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub(crate) enum QueryCommand {
    /// Comprehensive statistics for one user.
    User {
        /// User to look up.
        username: String,
        /// Restricts the statistics to one channel.
        #[arg(long)]
        channel: Option<String>,
    },
    /// Ranked users or emotes.
    Leaderboard {
        /// Which ranking to fetch.
        #[arg(value_enum)]
        kind: LeaderboardKind,
        /// Number of entries to return.
        #[arg(long)]
        limit: Option<u32>,
        /// Restricts the ranking to one channel.
        #[arg(long)]
        channel: Option<String>,
    },
    /// Statistics scoped to one channel.
    Channel {
        /// Which channel query to run.
        #[arg(value_enum)]
        query: ChannelQuery,
        /// Channel name.
        channel: String,
        /// Number of entries for `top` and `media`.
        #[arg(long)]
        limit: Option<u32>,
        /// Trailing window for `population`.
        #[arg(long)]
        hours: Option<u32>,
        /// Window for `watermarks`; all time when omitted.
        #[arg(long)]
        days: Option<u32>,
        /// Single title for `movie-votes`.
        #[arg(long)]
        title: Option<String>,
    },
    /// Responder health and global totals.
    System {
        /// Which system query to run.
        #[arg(value_enum)]
        query: SystemQuery,
    },
    /// Counts bucketed over time.
    Timeseries {
        /// Which series to fetch.
        #[arg(value_enum)]
        kind: SeriesKind,
        /// Channel name.
        channel: String,
        /// Inclusive lower bound.
        #[arg(long)]
        start: Option<String>,
        /// Inclusive upper bound.
        #[arg(long)]
        end: Option<String>,
    },
}

/// Leaderboard selection.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub(crate) enum LeaderboardKind {
    Messages,
    Kudos,
    Emotes,
}

/// Channel query selection.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub(crate) enum ChannelQuery {
    Top,
    Population,
    Media,
    Watermarks,
    MovieVotes,
}

/// System query selection.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub(crate) enum SystemQuery {
    Stats,
    Health,
}

/// Time series selection.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub(crate) enum SeriesKind {
    Messages,
    Kudos,
}
