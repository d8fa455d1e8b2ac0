//! Socket transport for the admin client.
//!
//! One invocation dials the admin socket exactly once, writes one request and
//! reads one JSON document back. There is no retry and no timeout beyond the
//! operating system defaults; the stream closes when [`Connection`] drops.

use std::io::{self, BufReader, Read, Write};
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};

use serde_json::{Deserializer, Map, Value};
use tracing::debug;
use yggdrasilctl_config::AdminEndpoint;

use crate::errors::DecodeFailure;
use crate::{AdminRequest, AppError};

pub(crate) struct Connection {
    stream: TcpStream,
}

impl Read for Connection {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.stream.read(buf)
    }
}

impl Write for Connection {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.stream.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.stream.flush()
    }
}

pub(crate) fn connect(endpoint: &AdminEndpoint) -> Result<Connection, AppError> {
    let endpoint_display = endpoint.to_string();
    let address =
        resolve_tcp_address(endpoint.host(), endpoint.port()).map_err(|source| {
            AppError::Resolve {
                endpoint: endpoint_display.clone(),
                source,
            }
        })?;

    debug!(endpoint = %endpoint_display, %address, "connecting to admin socket");
    TcpStream::connect(address)
        .map(|stream| Connection { stream })
        .map_err(|source| AppError::Connect {
            endpoint: endpoint_display,
            source,
        })
}

fn resolve_tcp_address(host: &str, port: u16) -> io::Result<SocketAddr> {
    let mut addrs = (host, port).to_socket_addrs()?;
    addrs
        .next()
        .ok_or_else(|| io::Error::new(io::ErrorKind::AddrNotAvailable, "no resolved addresses"))
}

/// Outcome of waiting for the daemon's reply.
#[derive(Debug)]
pub(crate) enum Reply {
    Decoded(Map<String, Value>),
    Undecodable(DecodeFailure),
}

/// Writes `request` and reads the first complete JSON document that follows.
///
/// The decoder stops at the end of the first document, so a reply does not
/// need a trailing newline and the daemon may keep the connection open.
pub(crate) fn exchange<S>(stream: &mut S, request: &AdminRequest) -> Result<Reply, AppError>
where
    S: Read + Write,
{
    request.write_jsonl(stream)?;
    Ok(read_reply(stream))
}

/// Decodes the reply. Read errors count as undecodable replies rather than
/// transport failures, since the request has already been delivered.
pub(crate) fn read_reply<R>(reader: R) -> Reply
where
    R: Read,
{
    let mut documents = Deserializer::from_reader(BufReader::new(reader)).into_iter::<Value>();
    match documents.next() {
        None => Reply::Undecodable(DecodeFailure::Empty),
        Some(Ok(Value::Object(fields))) => Reply::Decoded(fields),
        Some(Ok(_)) => Reply::Undecodable(DecodeFailure::NotAnObject),
        Some(Err(error)) => Reply::Undecodable(DecodeFailure::from(error)),
    }
}
