//! Shared harness for CLI runtime tests.

mod fake_daemon;

pub(in crate::tests) use fake_daemon::FakeDaemon;

use std::cell::RefCell;
use std::ffi::OsString;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use rstest::fixture;
use serde_json::Value;
use yggdrasilctl_config::{AdminEndpoint, Config};

use crate::{AppError, ConfigLoader, IoStreams, run_with_loader};

/// Loader returning a fixed configuration, bypassing files and environment.
pub(in crate::tests) struct StaticConfigLoader {
    config: Config,
}

impl StaticConfigLoader {
    pub const fn new(config: Config) -> Self {
        Self { config }
    }
}

impl ConfigLoader for StaticConfigLoader {
    fn load(&self, _args: &[OsString]) -> Result<Config, AppError> {
        Ok(self.config.clone())
    }
}

#[derive(Default)]
pub(in crate::tests) struct TestWorld {
    pub config: Config,
    pub daemon: Option<FakeDaemon>,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
    pub exit_code: Option<ExitCode>,
    pub requests: Vec<String>,
}

impl TestWorld {
    pub fn start_daemon_with_lines(&mut self, lines: Vec<String>) -> Result<()> {
        let daemon = FakeDaemon::spawn(lines)?;
        self.config.endpoint = Some(AdminEndpoint::new("127.0.0.1", daemon.port()));
        self.daemon = Some(daemon);
        Ok(())
    }

    pub fn start_daemon_with_reply(&mut self, reply: &Value) -> Result<()> {
        self.start_daemon_with_lines(vec![reply.to_string()])
    }

    /// Points the configuration at a port nothing listens on.
    pub fn configure_unreachable_endpoint(&mut self) -> Result<()> {
        let listener =
            std::net::TcpListener::bind(("127.0.0.1", 0)).context("bind free port")?;
        let port = listener.local_addr().context("free port addr")?.port();
        drop(listener);
        self.config.endpoint = Some(AdminEndpoint::new("127.0.0.1", port));
        Ok(())
    }

    pub fn run(&mut self, command: &str) -> Result<()> {
        self.run_args(Self::build_args(command))
    }

    pub fn run_args(&mut self, args: Vec<OsString>) -> Result<()> {
        self.stdout.clear();
        self.stderr.clear();
        self.requests.clear();
        let loader = StaticConfigLoader::new(self.config.clone());
        let io = IoStreams::with_terminal_status(&mut self.stdout, &mut self.stderr, false);
        let exit = run_with_loader(args, io, &loader);
        self.exit_code = Some(exit);
        if let Some(daemon) = self.daemon.as_mut() {
            self.requests = daemon.take_requests()?;
        }
        Ok(())
    }

    fn build_args(command: &str) -> Vec<OsString> {
        let mut args = vec![OsString::from("yggdrasilctl")];
        let trimmed = command.trim().trim_matches('"');
        if !trimmed.is_empty() {
            args.extend(trimmed.split_whitespace().map(OsString::from));
        }
        args
    }

    pub fn stdout_text(&self) -> Result<String> {
        String::from_utf8(self.stdout.clone()).context("stdout utf8")
    }

    pub fn stderr_text(&self) -> Result<String> {
        String::from_utf8(self.stderr.clone()).context("stderr utf8")
    }

    pub fn assert_exit_code(&self, expected: u8) {
        let exit = self.exit_code.expect("exit code recorded");
        assert_eq!(exit, ExitCode::from(expected));
    }

    /// Asserts the daemon saw exactly one request equal to the fixture's JSON.
    pub fn assert_request_matches(&self, fixture: &str) -> Result<()> {
        assert_eq!(self.requests.len(), 1, "expected single request");
        let expected: Value =
            serde_json::from_str(&read_fixture(fixture)?).context("parse request fixture")?;
        let actual: Value =
            serde_json::from_str(&self.requests[0]).context("parse recorded request")?;
        assert_eq!(actual, expected);
        assert!(
            self.requests[0].ends_with('\n'),
            "request should be newline terminated"
        );
        Ok(())
    }
}

pub(in crate::tests) fn read_fixture(name: &str) -> Result<String> {
    let normalized = name.trim().trim_matches('"');
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("golden");
    path.push(normalized);
    fs::read_to_string(&path).with_context(|| format!("read fixture at {}", path.display()))
}

pub(in crate::tests) fn read_json_fixture(name: &str) -> Result<Value> {
    serde_json::from_str(&read_fixture(name)?).with_context(|| format!("parse fixture {name}"))
}

#[fixture]
pub(super) fn world() -> RefCell<TestWorld> {
    RefCell::new(TestWorld::default())
}
