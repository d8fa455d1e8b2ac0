//! Shared configuration for the `yggdrasilctl` admin client.
//!
//! Values are layered by `ortho_config`: built-in defaults, then an optional
//! configuration file (`--config-path` or `YGGDRASILCTL_CONFIG_PATH`), then
//! `YGGDRASILCTL_*` environment variables, then command-line flags. Every
//! field carries a built-in default, so an invocation with no file, no
//! environment and no flags still resolves to a complete configuration.

mod defaults;
mod endpoint;
mod logging;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

pub use defaults::{
    DEFAULT_ADMIN_HOST, DEFAULT_ADMIN_PORT, DEFAULT_LOG_FILTER, default_endpoint,
    default_log_filter, default_log_format,
};
pub use endpoint::{AdminEndpoint, EndpointParseError};
pub use logging::{LogFormat, LogFormatParseError};

/// Runtime configuration for the admin client.
///
/// Every field is optional so that each layer only overrides what it names.
/// The defaults layer fills each field first; the accessors fall back to the
/// same values for configurations built by hand.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq, OrthoConfig)]
#[ortho_config(prefix = "YGGDRASILCTL")]
pub struct Config {
    /// Admin socket endpoint in `host:port` form.
    #[ortho_config(default = default_endpoint())]
    pub endpoint: Option<AdminEndpoint>,
    /// `tracing` filter directive for diagnostics written to stderr.
    #[ortho_config(default = default_log_filter())]
    pub log_filter: Option<String>,
    /// Output format for diagnostics written to stderr.
    #[ortho_config(default = default_log_format())]
    pub log_format: Option<LogFormat>,
}

impl Config {
    /// Returns the admin endpoint to dial.
    #[must_use]
    pub fn endpoint(&self) -> AdminEndpoint {
        self.endpoint.clone().unwrap_or_else(default_endpoint)
    }

    /// Returns the configured log filter expression.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        self.log_filter.as_deref().unwrap_or(DEFAULT_LOG_FILTER)
    }

    /// Returns the configured log format.
    #[must_use]
    pub fn log_format(&self) -> LogFormat {
        self.log_format.unwrap_or_else(default_log_format)
    }
}
