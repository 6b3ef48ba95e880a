//! Test suites for the statistics daemon.

mod dispatch_behaviour;
mod process;
pub(crate) mod support;
