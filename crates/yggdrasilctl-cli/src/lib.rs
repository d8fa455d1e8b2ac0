//! Command-line client for the daemon's JSON admin socket.
//!
//! One invocation turns `command key=value ...` into a single JSON request,
//! sends it over a freshly dialled TCP connection, reads one JSON reply and
//! renders it. The runtime is exercised both from the binary entrypoint and
//! from tests where configuration loading and IO streams are substituted.

use std::ffi::OsString;
use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use serde_json::{Map, Value};
use tracing::debug;
use yggdrasilctl_config::{Config, default_endpoint};

mod cli;
mod command;
mod config;
mod errors;
pub mod output;
mod response;
mod telemetry;
mod transport;

use cli::Cli;
pub(crate) use command::AdminRequest;
use config::{ConfigArgumentSplit, split_config_arguments};
pub(crate) use config::{ConfigLoader, OrthoConfigLoader};
pub(crate) use errors::AppError;
pub use output::{OutputFormat, Renderer, RendererRegistry, ResolvedOutputFormat};
use response::{Classification, classify, exit_status};
use transport::{Reply, connect, exchange};

/// Exit status for argument, configuration and transport failures.
pub const FATAL_EXIT: u8 = 2;

const DEFAULT_PROGRAM_NAME: &str = "yggdrasilctl";

/// Bundles the IO streams provided to the CLI runtime.
pub(crate) struct IoStreams<'a, W: Write, E: Write> {
    pub(crate) stdout: &'a mut W,
    pub(crate) stderr: &'a mut E,
    stdout_is_terminal: bool,
}

impl<'a, W: Write, E: Write> IoStreams<'a, W, E> {
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

struct CliRunner<'a, W: Write, E: Write, L: ConfigLoader> {
    io: IoStreams<'a, W, E>,
    loader: &'a L,
    registry: RendererRegistry,
}

impl<'a, W, E, L> CliRunner<'a, W, E, L>
where
    W: Write,
    E: Write,
    L: ConfigLoader,
{
    fn new(io: IoStreams<'a, W, E>, loader: &'a L) -> Self {
        Self {
            io,
            loader,
            registry: RendererRegistry::default(),
        }
    }

    fn run<I>(&mut self, args: I) -> ExitCode
    where
        I: IntoIterator<Item = OsString>,
    {
        let arguments: Vec<OsString> = args.into_iter().collect();
        let split = split_config_arguments(&arguments);
        let cli_arguments = prepare_cli_arguments(&arguments, &split);

        let cli = match Cli::try_parse_from(cli_arguments) {
            Ok(parsed) => parsed,
            Err(error) if !error.use_stderr() => {
                let written = write!(self.io.stdout, "{error}");
                return self.finish_informational(written);
            }
            Err(error) => return self.fail(&AppError::CliUsage(error)),
        };

        let Some(command) = cli.command.as_deref() else {
            let written = write_usage(&program_name(&arguments), &mut *self.io.stdout);
            return self.finish_informational(written);
        };

        let format = cli.output.resolve(self.io.stdout_is_terminal());
        let result = AdminRequest::build(command, &cli.parameters).and_then(|request| {
            let config = self.loader.load(&split.config_arguments)?;
            if let Err(error) = telemetry::initialise(&config) {
                let _ = writeln!(self.io.stderr, "warning: {error}");
            }
            self.execute(&config, &request, format)
        });

        result.unwrap_or_else(|error| self.fail(&error))
    }

    /// Exit status for help and usage output, which never contact the daemon.
    fn finish_informational(&mut self, written: io::Result<()>) -> ExitCode {
        written.map_or_else(
            |source| self.fail(&AppError::WriteOutput(source)),
            |()| ExitCode::SUCCESS,
        )
    }

    fn execute(
        &mut self,
        config: &Config,
        request: &AdminRequest,
        format: ResolvedOutputFormat,
    ) -> Result<ExitCode, AppError> {
        debug!(
            command = request.command(),
            parameters = request.parameter_count(),
            "built admin request"
        );
        let reply = {
            let mut connection = connect(&config.endpoint())?;
            exchange(&mut connection, request)?
        };

        match reply {
            Reply::Decoded(fields) => self.emit(&fields, format),
            Reply::Undecodable(failure) => {
                debug!(%failure, "admin reply could not be decoded");
                writeln!(self.io.stderr, "{failure}").map_err(AppError::WriteOutput)?;
                Ok(ExitCode::SUCCESS)
            }
        }
    }

    fn emit(
        &mut self,
        reply: &Map<String, Value>,
        format: ResolvedOutputFormat,
    ) -> Result<ExitCode, AppError> {
        let status = reply
            .get("status")
            .and_then(Value::as_str)
            .unwrap_or_default();
        debug!(status, "received admin reply");
        let stdout = &mut *self.io.stdout;
        let written = match format {
            ResolvedOutputFormat::Json => serde_json::to_writer(&mut *stdout, reply)
                .map_err(io::Error::from)
                .and_then(|()| stdout.write_all(b"\n")),
            ResolvedOutputFormat::Human => match classify(reply) {
                Classification::ProtocolError(message) => writeln!(stdout, "{message}"),
                Classification::Malformed(reason) => writeln!(stdout, "{reason}"),
                Classification::Success { command, response } => stdout
                    .write_all(self.registry.render(command, response).as_bytes()),
            },
        };
        written
            .and_then(|()| stdout.flush())
            .map_err(AppError::WriteOutput)?;

        Ok(ExitCode::from(exit_status(reply)))
    }

    fn fail(&mut self, error: &AppError) -> ExitCode {
        let _ = writeln!(self.io.stderr, "{error}");
        let _ = self.io.stderr.flush();
        ExitCode::from(FATAL_EXIT)
    }
}

/// Runs the CLI using the provided arguments and IO handles.
#[must_use]
pub fn run<I, W, E>(args: I, stdout: &mut W, stderr: &mut E, stdout_is_terminal: bool) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
{
    let io = IoStreams::with_terminal_status(stdout, stderr, stdout_is_terminal);
    run_with_loader(args, io, &OrthoConfigLoader)
}

/// Runs the CLI with a custom configuration loader.
#[must_use]
pub(crate) fn run_with_loader<I, W, E, L>(args: I, io: IoStreams<'_, W, E>, loader: &L) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
    L: ConfigLoader,
{
    CliRunner::new(io, loader).run(args)
}

fn prepare_cli_arguments(args: &[OsString], split: &ConfigArgumentSplit) -> Vec<OsString> {
    let mut cli_arguments: Vec<OsString> = Vec::new();
    if let Some(first) = args.first() {
        cli_arguments.push(first.clone());
    }
    cli_arguments.extend(args.iter().skip(split.command_start.max(1)).cloned());
    cli_arguments
}

fn program_name(args: &[OsString]) -> String {
    args.first()
        .and_then(|program| Path::new(program).file_name())
        .map_or_else(
            || String::from(DEFAULT_PROGRAM_NAME),
            |name| name.to_string_lossy().into_owned(),
        )
}

fn write_usage<W>(program: &str, stdout: &mut W) -> io::Result<()>
where
    W: Write,
{
    let endpoint = default_endpoint();
    writeln!(
        stdout,
        "usage: {program} [-endpoint={endpoint}] command [key=value] [...]"
    )?;
    writeln!(stdout, "example: {program} getPeers")?;
    writeln!(
        stdout,
        "example: {program} setTunTap name=auto mtu=1500 tap_mode=false"
    )?;
    writeln!(stdout, "example: {program} -endpoint={endpoint} getDHT")?;
    stdout.flush()
}

#[cfg(test)]
mod tests;
