//! Daemon entrypoint for the user statistics endpoint.
//!
//! Delegates to [`userstatsd::run_daemon`], which loads configuration,
//! connects to the messaging server and serves until a shutdown signal.

use std::io::{self, Write};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    match userstatsd::run_daemon().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            if writeln!(io::stderr().lock(), "userstatsd: {error}").is_err() {
                // Nowhere left to report; the exit status carries the failure.
            }
            ExitCode::FAILURE
        }
    }
}
