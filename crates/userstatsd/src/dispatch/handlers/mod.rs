//! Command handlers.
//!
//! Handlers shape parameters, apply defaults and delegate to the store. They
//! return store payloads unmodified and leave failure wrapping to the
//! dispatcher.

pub(crate) mod channel;
pub(crate) mod leaderboard;
pub(crate) mod system;
pub(crate) mod timeseries;
pub(crate) mod user;

/// Ranking size used when `limit` is omitted.
pub const DEFAULT_LIMIT: u32 = 10;

/// Media history length used when `limit` is omitted.
pub const DEFAULT_MEDIA_LIMIT: u32 = 50;

/// Population look-back used when `hours` is omitted.
pub const DEFAULT_POPULATION_HOURS: u32 = 24;
