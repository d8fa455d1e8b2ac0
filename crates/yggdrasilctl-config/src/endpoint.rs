use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::{Host, Url};

/// TCP address of the daemon's admin socket.
///
/// Accepts the daemon's own `host:port` notation (with bracketed IPv6 hosts
/// such as `[::1]:9001`) as well as `tcp://host:port` URLs.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(try_from = "String", into = "String")]
pub struct AdminEndpoint {
    host: String,
    port: u16,
}

impl AdminEndpoint {
    /// Builds an endpoint from a host name or address and a port.
    #[must_use]
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Host name or address without IPv6 brackets.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// TCP port of the admin socket.
    #[must_use]
    pub const fn port(&self) -> u16 {
        self.port
    }
}

impl fmt::Display for AdminEndpoint {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.host.contains(':') {
            write!(formatter, "[{}]:{}", self.host, self.port)
        } else {
            write!(formatter, "{}:{}", self.host, self.port)
        }
    }
}

impl FromStr for AdminEndpoint {
    type Err = EndpointParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(EndpointParseError::Empty);
        }
        if trimmed.contains("://") {
            return parse_url(trimmed);
        }

        let (host_part, port_part) = trimmed
            .rsplit_once(':')
            .ok_or_else(|| EndpointParseError::MissingPort(trimmed.to_owned()))?;
        let host = strip_brackets(host_part, trimmed)?;
        if host.is_empty() {
            return Err(EndpointParseError::MissingHost(trimmed.to_owned()));
        }
        if port_part.is_empty() {
            return Err(EndpointParseError::MissingPort(trimmed.to_owned()));
        }
        let port = port_part
            .parse::<u16>()
            .map_err(|_| EndpointParseError::InvalidPort(trimmed.to_owned()))?;
        Ok(Self::new(host, port))
    }
}

/// Removes the brackets around an IPv6 host; bare IPv6 hosts are ambiguous.
fn strip_brackets<'a>(host: &'a str, input: &str) -> Result<&'a str, EndpointParseError> {
    if let Some(inner) = host.strip_prefix('[').and_then(|rest| rest.strip_suffix(']')) {
        return Ok(inner);
    }
    if host.contains(':') {
        return Err(EndpointParseError::UnbracketedIpv6(input.to_owned()));
    }
    Ok(host)
}

fn parse_url(input: &str) -> Result<AdminEndpoint, EndpointParseError> {
    let url = Url::parse(input)?;
    if url.scheme() != "tcp" {
        return Err(EndpointParseError::UnsupportedScheme(url.scheme().to_owned()));
    }
    let host = match url.host() {
        Some(Host::Domain(domain)) if !domain.is_empty() => domain.to_owned(),
        Some(Host::Ipv4(address)) => address.to_string(),
        Some(Host::Ipv6(address)) => address.to_string(),
        Some(Host::Domain(_)) | None => {
            return Err(EndpointParseError::MissingHost(input.to_owned()));
        }
    };
    let port = url
        .port()
        .ok_or_else(|| EndpointParseError::MissingPort(input.to_owned()))?;
    Ok(AdminEndpoint::new(host, port))
}

impl TryFrom<String> for AdminEndpoint {
    type Error = EndpointParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<AdminEndpoint> for String {
    fn from(endpoint: AdminEndpoint) -> Self {
        endpoint.to_string()
    }
}

/// Errors encountered while parsing an [`AdminEndpoint`] from text.
#[derive(Debug, Error)]
pub enum EndpointParseError {
    /// The endpoint text was blank.
    #[error("admin endpoint must not be empty")]
    Empty,
    /// The host part was missing.
    #[error("missing host in admin endpoint '{0}'")]
    MissingHost(String),
    /// The port part was missing.
    #[error("missing port in admin endpoint '{0}'")]
    MissingPort(String),
    /// The port was not a number in the range 0-65535.
    #[error("invalid port in admin endpoint '{0}'")]
    InvalidPort(String),
    /// An IPv6 address was given without surrounding brackets.
    #[error("IPv6 admin endpoint '{0}' must be written as [address]:port")]
    UnbracketedIpv6(String),
    /// A URL form used a scheme other than `tcp`.
    #[error("unsupported admin endpoint scheme '{0}'")]
    UnsupportedScheme(String),
    /// URL failed to parse.
    #[error(transparent)]
    Url(#[from] url::ParseError),
}
