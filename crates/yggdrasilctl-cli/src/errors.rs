//! Error types and diagnostics helpers for the CLI runtime.

use std::io;
use std::sync::Arc;

use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("failed to load configuration: {0}")]
    LoadConfiguration(Arc<ortho_config::OrthoError>),
    #[error("{0}")]
    CliUsage(clap::Error),
    #[error("the command name must not be empty")]
    MissingCommand,
    #[error("argument '{0}' is not of the form key=value")]
    MissingSeparator(String),
    #[error("argument '{0}' has an empty key")]
    EmptyKey(String),
    #[error("argument '{0}' would replace the command name; 'request' is reserved")]
    ReservedKey(String),
    #[error("failed to resolve admin endpoint {endpoint}: {source}")]
    Resolve { endpoint: String, source: io::Error },
    #[error("failed to connect to admin socket at {endpoint}: {source}")]
    Connect { endpoint: String, source: io::Error },
    #[error("failed to serialise admin request: {0}")]
    SerialiseRequest(serde_json::Error),
    #[error("failed to send request to admin socket: {0}")]
    SendRequest(io::Error),
    #[error("failed to write output: {0}")]
    WriteOutput(io::Error),
}

/// A reply that could not be decoded into a JSON object.
///
/// Decode failures are not fatal: the runner reports them and exits
/// normally. This includes the connection failing while the reply is read.
#[derive(Debug, Error)]
pub(crate) enum DecodeFailure {
    #[error("failed to decode admin response: {0}")]
    Malformed(serde_json::Error),
    #[error("failed to read admin response: {0}")]
    Interrupted(io::Error),
    #[error("admin socket closed the connection without replying")]
    Empty,
    #[error("admin response is not a JSON object")]
    NotAnObject,
}

impl From<serde_json::Error> for DecodeFailure {
    fn from(error: serde_json::Error) -> Self {
        if error.is_io() {
            Self::Interrupted(io::Error::from(error))
        } else {
            Self::Malformed(error)
        }
    }
}
