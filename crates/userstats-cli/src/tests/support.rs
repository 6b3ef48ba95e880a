//! Fakes and harness helpers shared by the CLI suites.

use std::cell::RefCell;
use std::ffi::OsString;
use std::process::ExitCode;

use serde_json::{Value, json};
use userstats_config::Config;

use crate::{AppError, ConfigLoader, IoStreams, Requester, run_with};

/// Loader that ignores arguments and hands out a fixed configuration.
pub(super) struct StaticConfigLoader {
    config: Config,
}

impl StaticConfigLoader {
    pub(super) const fn new(config: Config) -> Self {
        Self { config }
    }
}

impl Default for StaticConfigLoader {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl ConfigLoader for StaticConfigLoader {
    fn load(&self, _args: &[OsString]) -> Result<Config, AppError> {
        Ok(self.config.clone())
    }
}

/// What the scripted endpoint does with the next request.
#[derive(Debug, Clone)]
pub(super) enum Reply {
    Envelope(Value),
    Body(Vec<u8>),
    NoResponders,
    Timeout,
}

/// A request observed by [`ScriptedRequester`].
#[derive(Debug, Clone, PartialEq)]
pub(super) struct SentRequest {
    pub(super) subject: String,
    pub(super) envelope: Value,
}

/// Transport double that answers every request with a scripted reply.
pub(super) struct ScriptedRequester {
    reply: RefCell<Reply>,
    sent: RefCell<Vec<SentRequest>>,
}

impl Default for ScriptedRequester {
    fn default() -> Self {
        Self::answering(json!({"service": "userstats", "success": true, "data": {}}))
    }
}

impl ScriptedRequester {
    pub(super) const fn answering(envelope: Value) -> Self {
        Self::replying(Reply::Envelope(envelope))
    }

    pub(super) const fn replying(reply: Reply) -> Self {
        Self {
            reply: RefCell::new(reply),
            sent: RefCell::new(Vec::new()),
        }
    }

    pub(super) fn set_reply(&self, reply: Reply) {
        *self.reply.borrow_mut() = reply;
    }

    pub(super) fn single_request(&self) -> SentRequest {
        let sent = self.sent.borrow();
        assert_eq!(sent.len(), 1, "expected exactly one request, got {sent:?}");
        sent.first().cloned().expect("one request recorded")
    }
}

impl Requester for ScriptedRequester {
    fn request(&self, config: &Config, payload: Vec<u8>) -> Result<Vec<u8>, AppError> {
        let subject = config.command_subject();
        let envelope = serde_json::from_slice(&payload).expect("request envelope is JSON");
        self.sent.borrow_mut().push(SentRequest {
            subject: subject.clone(),
            envelope,
        });

        match self.reply.borrow().clone() {
            Reply::Envelope(envelope) => Ok(serde_json::to_vec(&envelope).expect("encode reply")),
            Reply::Body(body) => Ok(body),
            Reply::NoResponders => Err(AppError::NoResponders { subject }),
            Reply::Timeout => Err(AppError::Timeout {
                subject,
                timeout: config.request_timeout(),
            }),
        }
    }
}

/// Captured result of one CLI invocation.
#[derive(Debug)]
pub(super) struct CliRun {
    pub(super) exit: ExitCode,
    pub(super) stdout: String,
    pub(super) stderr: String,
}

/// Runs the CLI with `args` after the program name.
pub(super) fn run_cli(
    loader: &impl ConfigLoader,
    requester: &ScriptedRequester,
    args: &[&str],
    stdout_is_terminal: bool,
) -> CliRun {
    let mut stdout: Vec<u8> = Vec::new();
    let mut stderr: Vec<u8> = Vec::new();
    let argv = std::iter::once("userstats-query")
        .chain(args.iter().copied())
        .map(OsString::from);
    let exit = {
        let mut io = IoStreams::with_terminal_status(&mut stdout, &mut stderr, stdout_is_terminal);
        run_with(argv, &mut io, loader, requester)
    };
    CliRun {
        exit,
        stdout: String::from_utf8(stdout).expect("stdout is UTF-8"),
        stderr: String::from_utf8(stderr).expect("stderr is UTF-8"),
    }
}
