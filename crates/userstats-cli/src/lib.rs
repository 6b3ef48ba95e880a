//! Command-line query tool for the user statistics endpoint.
//!
//! The runtime owns argument parsing, configuration bootstrapping, request
//! construction and response rendering. It is exercised both from the binary
//! entrypoint and from tests where configuration loading, the transport and
//! the IO streams are substituted.
//!
//! Exit status is `0` when the endpoint answers with `success: true`, `1`
//! when it answers with `success: false`, and `2` for usage, configuration
//! and transport failures.

use std::ffi::OsString;
use std::io::{self, IsTerminal, Write};
use std::process::ExitCode;

use clap::Parser;

mod cli;
mod command;
mod config;
mod errors;
pub mod output;
mod transport;

use cli::Cli;
use command::{CommandRequest, CommandResponse};
use config::{ConfigArgumentSplit, split_config_arguments};
pub(crate) use config::{ConfigLoader, OrthoConfigLoader};
pub(crate) use errors::AppError;
pub use output::{
    OutputFormat, ResolvedOutputFormat, render_human_output, render_json_output,
};
pub(crate) use transport::{NatsRequester, Requester};

/// CLI flags recognised by the configuration loader.
///
/// MAINTENANCE: This list must be kept in sync with the fields of
/// `userstats_config::Config`.
const CONFIG_CLI_FLAGS: &[&str] = &[
    "--config-path",
    "--nats-server",
    "--nats-user",
    "--nats-password",
    "--nats-token",
    "--subject-namespace",
    "--service-name",
    "--domain",
    "--handler-timeout-secs",
    "--request-timeout-secs",
    "--log-filter",
    "--log-format",
];

const EXIT_REJECTED: u8 = 1;
const EXIT_UNAVAILABLE: u8 = 2;

/// Bundles the IO streams provided to the CLI runtime.
pub(crate) struct IoStreams<'a, W: Write, E: Write> {
    pub(crate) stdout: &'a mut W,
    pub(crate) stderr: &'a mut E,
    stdout_is_terminal: bool,
}

impl<'a, W: Write, E: Write> IoStreams<'a, W, E> {
    pub(crate) fn new(stdout: &'a mut W, stderr: &'a mut E) -> Self {
        Self {
            stdout,
            stderr,
            stdout_is_terminal: io::stdout().is_terminal(),
        }
    }

    #[cfg(test)]
    pub(crate) const fn with_terminal_status(
        stdout: &'a mut W,
        stderr: &'a mut E,
        stdout_is_terminal: bool,
    ) -> Self {
        Self {
            stdout,
            stderr,
            stdout_is_terminal,
        }
    }

    pub(crate) const fn stdout_is_terminal(&self) -> bool {
        self.stdout_is_terminal
    }
}

enum Outcome {
    Answered { success: bool },
    Informational,
}

struct CliRunner<'a, 'io, W: Write, E: Write, L: ConfigLoader, R: Requester> {
    io: &'a mut IoStreams<'io, W, E>,
    loader: &'a L,
    requester: &'a R,
}

impl<W, E, L, R> CliRunner<'_, '_, W, E, L, R>
where
    W: Write,
    E: Write,
    L: ConfigLoader,
    R: Requester,
{
    fn run(&mut self, args: &[OsString]) -> ExitCode {
        match self.execute(args) {
            Ok(Outcome::Answered { success: true } | Outcome::Informational) => ExitCode::SUCCESS,
            Ok(Outcome::Answered { success: false }) => ExitCode::from(EXIT_REJECTED),
            Err(error) => {
                if writeln!(self.io.stderr, "{error}").is_err() {
                    // stderr is gone; the exit status still reports the failure.
                }
                ExitCode::from(EXIT_UNAVAILABLE)
            }
        }
    }

    fn execute(&mut self, args: &[OsString]) -> Result<Outcome, AppError> {
        let split = split_config_arguments(args);
        let cli = match Cli::try_parse_from(prepare_cli_arguments(args, &split)) {
            Ok(cli) => cli,
            Err(error) if !error.use_stderr() => {
                write!(self.io.stdout, "{}", error.render()).map_err(AppError::WriteOutput)?;
                return Ok(Outcome::Informational);
            }
            Err(error) => return Err(AppError::CliUsage(error)),
        };

        let config = self.loader.load(&split.config_arguments)?;
        let request = CommandRequest::new(&cli.command, config.service_name());
        let body = self.requester.request(&config, request.to_bytes()?)?;
        let (response, envelope) = CommandResponse::parse(&body)?;

        let format = cli.output.resolve(self.io.stdout_is_terminal());
        self.render(response.heading(request.command), &response, &envelope, format)?;
        Ok(Outcome::Answered {
            success: response.success,
        })
    }

    fn render(
        &mut self,
        command: &str,
        response: &CommandResponse,
        envelope: &serde_json::Value,
        format: ResolvedOutputFormat,
    ) -> Result<(), AppError> {
        let written = match format {
            ResolvedOutputFormat::Json => self
                .io
                .stdout
                .write_all(render_json_output(envelope).as_bytes()),
            ResolvedOutputFormat::Human if response.success => {
                let data = response.data.clone().unwrap_or_default();
                self.io
                    .stdout
                    .write_all(render_human_output(command, &data).as_bytes())
            }
            ResolvedOutputFormat::Human => {
                let reason = response.error.as_deref().unwrap_or("request failed");
                writeln!(self.io.stderr, "error: {reason}")
            }
        };
        written.map_err(AppError::WriteOutput)?;

        self.io.stdout.flush().map_err(AppError::WriteOutput)?;
        self.io.stderr.flush().map_err(AppError::WriteOutput)
    }
}

fn prepare_cli_arguments(args: &[OsString], split: &ConfigArgumentSplit) -> Vec<OsString> {
    let mut cli_arguments: Vec<OsString> = Vec::new();
    if let Some(first) = args.first() {
        cli_arguments.push(first.clone());
    }
    if let Some(rest) = args.get(split.command_start..) {
        cli_arguments.extend(rest.iter().cloned());
    }
    cli_arguments
}

/// Runs the CLI using the provided arguments and IO handles.
#[must_use]
pub fn run<I, W, E>(args: I, stdout: &mut W, stderr: &mut E) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
{
    let mut io = IoStreams::new(stdout, stderr);
    run_with(args, &mut io, &OrthoConfigLoader, &NatsRequester)
}

/// Runs the CLI with a substituted configuration loader and transport.
pub(crate) fn run_with<I, W, E, L, R>(
    args: I,
    io: &mut IoStreams<'_, W, E>,
    loader: &L,
    requester: &R,
) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
    L: ConfigLoader,
    R: Requester,
{
    let arguments: Vec<OsString> = args.into_iter().collect();
    CliRunner {
        io,
        loader,
        requester,
    }
    .run(&arguments)
}

#[cfg(test)]
mod tests;
