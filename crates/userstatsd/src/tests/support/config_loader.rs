//! Configuration loaders used by the bootstrap suites.

use std::ffi::OsString;
use std::sync::Arc;

use ortho_config::{OrthoConfig, OrthoError};

use userstats_config::Config;

use crate::bootstrap::ConfigLoader;

/// Loader that fails by passing an invalid server URL on the command line.
pub struct FailingConfigLoader;

impl ConfigLoader for FailingConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        let args = vec![
            OsString::from("userstatsd"),
            OsString::from("--nats-server"),
            OsString::from("http://localhost:4222"),
        ];
        Config::load_from_iter(args)
    }
}

/// Configuration whose handler budget is short enough for timeout tests.
pub fn test_config() -> Config {
    Config {
        handler_timeout_secs: 1,
        ..Config::default()
    }
}
