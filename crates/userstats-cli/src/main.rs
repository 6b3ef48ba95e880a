//! CLI entrypoint for the statistics query tool.
//!
//! The binary delegates to [`userstats_cli::run`], which loads configuration,
//! sends one request on the command subject and renders the reply.

use std::io::{self, StderrLock, StdoutLock};
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut stdout: StdoutLock<'_> = io::stdout().lock();
    let mut stderr: StderrLock<'_> = io::stderr().lock();
    userstats_cli::run(std::env::args_os(), &mut stdout, &mut stderr)
}
