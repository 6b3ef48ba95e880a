//! Command dispatch over the messaging transport.
//!
//! Every command is multiplexed through one subject. The [`Dispatcher`]
//! decodes each request envelope, checks `command` and `service`, resolves
//! the [`Command`] and runs its handler against the [`HandlerContext`]. All
//! failures are normalised in one place into a `success=false` envelope, so
//! every request is answered exactly once.
//!
//! ## Protocol
//!
//! ```json
//! {"command":"user.stats","username":"alice"}
//! ```
//!
//! is answered on the request's reply subject with
//!
//! ```json
//! {"service":"userstats","command":"user.stats","success":true,"data":{"messages":42}}
//! ```

mod context;
mod dispatcher;
mod errors;
pub(crate) mod handlers;
mod registry;
mod request;
mod response;

pub use self::context::{HandlerContext, Liveness, RunningFlag};
pub use self::dispatcher::Dispatcher;
pub use self::errors::{DispatchError, ErrorClass};
pub use self::handlers::{DEFAULT_LIMIT, DEFAULT_MEDIA_LIMIT, DEFAULT_POPULATION_HOURS};
pub use self::registry::Command;
pub use self::request::{CommandRequest, MAX_REQUEST_BYTES, Params};
pub use self::response::CommandResponse;

/// Tracing target for dispatch operations.
pub(crate) const DISPATCH_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::dispatch");
