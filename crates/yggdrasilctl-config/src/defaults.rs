use crate::endpoint::AdminEndpoint;
use crate::logging::LogFormat;

/// Host dialled when no endpoint is configured.
pub const DEFAULT_ADMIN_HOST: &str = "localhost";

/// Port of the daemon's admin socket when no endpoint is configured.
pub const DEFAULT_ADMIN_PORT: u16 = 9001;

/// Default log filter expression.
///
/// The CLI writes its results to stdout, so only warnings and errors reach
/// stderr unless the operator asks for more.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Default log filter expression used by the binary.
#[must_use]
pub fn default_log_filter() -> String {
    String::from(DEFAULT_LOG_FILTER)
}

/// Default logging format for the binary.
#[must_use]
pub const fn default_log_format() -> LogFormat {
    LogFormat::Compact
}

/// Endpoint used when neither file, environment nor flags name one.
#[must_use]
pub fn default_endpoint() -> AdminEndpoint {
    AdminEndpoint::new(DEFAULT_ADMIN_HOST, DEFAULT_ADMIN_PORT)
}
