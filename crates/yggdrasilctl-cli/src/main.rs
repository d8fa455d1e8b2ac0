//! CLI entrypoint for the admin socket client.
//!
//! The binary delegates to [`yggdrasilctl_cli::run`], which loads
//! configuration, builds the request, talks to the admin socket and renders
//! the reply.

use std::io::{self, IsTerminal, StderrLock, StdoutLock};
use std::process::ExitCode;

fn main() -> ExitCode {
    let stdout_is_terminal = io::stdout().is_terminal();
    let mut stdout: StdoutLock<'_> = io::stdout().lock();
    let mut stderr: StderrLock<'_> = io::stderr().lock();
    yggdrasilctl_cli::run(
        std::env::args_os(),
        &mut stdout,
        &mut stderr,
        stdout_is_terminal,
    )
}
