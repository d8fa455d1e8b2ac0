//! In-process stand-in for the daemon's admin socket.
//!
//! The admin protocol is one request line followed by one reply and a close,
//! so the stand-in serves exactly one client on a background thread and keeps
//! the request line it read for later assertions.

use std::io::{self, BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result, anyhow};

/// One-shot admin socket bound to a free loopback port.
pub(in crate::tests) struct FakeDaemon {
    port: u16,
    requests: Arc<Mutex<Vec<String>>>,
    result: Arc<Mutex<Option<Result<()>>>>,
    handle: Option<thread::JoinHandle<()>>,
}

impl FakeDaemon {
    /// Binds a loopback port and serves a single admin exchange from it.
    ///
    /// `lines` are written back verbatim after the request line arrives, then
    /// the stream is closed. When no client connects within two seconds the
    /// thread exits without recording anything.
    pub fn spawn(lines: Vec<String>) -> Result<Self> {
        let listener = TcpListener::bind(("127.0.0.1", 0)).context("bind fake daemon")?;
        listener
            .set_nonblocking(true)
            .context("fake daemon nonblocking")?;
        let port = listener.local_addr().context("local addr")?.port();
        let requests: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
        let result: Arc<Mutex<Option<Result<()>>>> = Arc::new(Mutex::new(None));
        let requests_clone = Arc::clone(&requests);
        let result_clone = Arc::clone(&result);
        let handle = thread::spawn(move || {
            let outcome = Self::serve_client(&listener, &lines, &requests_clone);
            if let Ok(mut guard) = result_clone.lock() {
                *guard = Some(outcome);
            }
        });
        Ok(Self {
            port,
            requests,
            result,
            handle: Some(handle),
        })
    }

    pub const fn port(&self) -> u16 {
        self.port
    }

    /// Joins the serving thread and returns the request line it saw, if any.
    pub fn take_requests(&mut self) -> Result<Vec<String>> {
        if let Some(handle) = self.handle.take() {
            handle
                .join()
                .map_err(|_| anyhow!("fake daemon thread panicked"))?;
        }
        if let Some(outcome) = self
            .result
            .lock()
            .map_err(|error| anyhow!("lock fake daemon result: {error}"))?
            .take()
        {
            outcome.context("fake daemon failed")?;
        }
        let requests = self
            .requests
            .lock()
            .map_err(|error| anyhow!("lock requests: {error}"))?;
        Ok(requests.clone())
    }

    fn serve_client(
        listener: &TcpListener,
        lines: &[String],
        requests: &Arc<Mutex<Vec<String>>>,
    ) -> Result<()> {
        let deadline = Instant::now() + Duration::from_secs(2);
        loop {
            match listener.accept() {
                Ok((mut stream, _)) => {
                    stream
                        .set_nonblocking(false)
                        .context("fake daemon blocking stream")?;
                    Self::record_request(&stream, requests)?;
                    return write_lines(&mut stream, lines).context("write reply lines");
                }
                Err(ref error)
                    if error.kind() == io::ErrorKind::WouldBlock && Instant::now() < deadline =>
                {
                    thread::sleep(Duration::from_millis(10));
                }
                Err(ref error) if error.kind() == io::ErrorKind::WouldBlock => {
                    // Argument errors and usage output never dial the socket.
                    return Ok(());
                }
                Err(error) => return Err(error).context("accept connection"),
            }
        }
    }

    fn record_request(stream: &TcpStream, requests: &Arc<Mutex<Vec<String>>>) -> Result<()> {
        let mut line = String::new();
        let mut reader = BufReader::new(stream.try_clone().context("clone stream")?);
        if reader
            .read_line(&mut line)
            .context("read admin request")?
            == 0
        {
            return Ok(());
        }
        let mut guard = requests
            .lock()
            .map_err(|error| anyhow!("lock requests: {error}"))?;
        guard.push(line);
        Ok(())
    }
}

impl Drop for FakeDaemon {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

/// Sends each reply line followed by `\n`, then flushes.
pub(in crate::tests) fn write_lines(stream: &mut impl Write, lines: &[String]) -> io::Result<()> {
    for line in lines {
        stream.write_all(line.as_bytes())?;
        stream.write_all(b"\n")?;
    }
    stream.flush()
}
