//! Byte streams to remote hosts.
//!
//! The network fetch only needs "a connected, optionally encrypted stream to
//! host:port". That capability is the [`Connector`] trait; [`TcpConnector`]
//! is the real implementation and tests plug in in-memory ones.

mod tls;

use std::io::{self, Read, Write};
use std::net::{Shutdown, TcpStream};
use std::sync::Arc;

use rustls::ClientConfig;

pub use tls::{client_config_with_roots, TlsStream};

/// A connected bidirectional stream owned by exactly one fetch.
pub trait Connection: Read + Write {
    /// Ends the exchange. Called once, after success or failure.
    fn close(&mut self) -> io::Result<()>;
}

/// Opens streams. `secure` selects TLS.
pub trait Connector {
    fn connect(&self, host: &str, port: u16, secure: bool) -> io::Result<Box<dyn Connection>>;
}

impl Connection for TcpStream {
    fn close(&mut self) -> io::Result<()> {
        match self.shutdown(Shutdown::Both) {
            Err(e) if e.kind() != io::ErrorKind::NotConnected => Err(e),
            _ => Ok(()),
        }
    }
}

/// Plain `TcpStream`, wrapped in rustls when `secure` is set.
///
/// No timeouts are set: an unresponsive peer blocks the caller.
#[derive(Debug, Default, Clone)]
pub struct TcpConnector {
    /// Replaces the bundled Mozilla roots when set.
    tls_config: Option<Arc<ClientConfig>>,
}

impl TcpConnector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tls_config(config: Arc<ClientConfig>) -> Self {
        Self {
            tls_config: Some(config),
        }
    }
}

impl Connector for TcpConnector {
    fn connect(&self, host: &str, port: u16, secure: bool) -> io::Result<Box<dyn Connection>> {
        let stream = TcpStream::connect((host, port))?;
        tracing::debug!(
            "connected to {}:{} ({})",
            host,
            port,
            if secure { "tls" } else { "plain" }
        );
        if !secure {
            return Ok(Box::new(stream));
        }
        let tls = match &self.tls_config {
            Some(config) => TlsStream::connect_with(Arc::clone(config), host, stream)?,
            None => TlsStream::connect(host, stream)?,
        };
        Ok(Box::new(tls))
    }
}
