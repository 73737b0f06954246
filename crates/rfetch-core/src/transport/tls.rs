//! TLS client streams (rustls, ring provider, Mozilla roots from webpki-roots).

use std::io::{self, Read, Write};
use std::net::{Shutdown, TcpStream};
use std::sync::Arc;

use rustls::pki_types::ServerName;
use rustls::{ClientConfig, ClientConnection, RootCertStore, StreamOwned};

use super::Connection;

pub struct TlsStream {
    inner: StreamOwned<ClientConnection, TcpStream>,
}

impl TlsStream {
    /// Starts a client session on `sock` with SNI set to `host`, trusting the
    /// bundled Mozilla roots. The handshake runs on the first read or write.
    pub fn connect(host: &str, sock: TcpStream) -> io::Result<Self> {
        Self::connect_with(client_config()?, host, sock)
    }

    /// Like [`TlsStream::connect`] with a caller-supplied client config.
    pub fn connect_with(
        config: Arc<ClientConfig>,
        host: &str,
        sock: TcpStream,
    ) -> io::Result<Self> {
        let server_name = ServerName::try_from(host)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?
            .to_owned();
        let conn = ClientConnection::new(config, server_name)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
        Ok(Self {
            inner: StreamOwned::new(conn, sock),
        })
    }
}

fn client_config() -> io::Result<Arc<ClientConfig>> {
    client_config_with_roots(RootCertStore {
        roots: webpki_roots::TLS_SERVER_ROOTS.to_vec(),
    })
}

/// Client config on the ring provider that trusts exactly `roots`.
pub fn client_config_with_roots(roots: RootCertStore) -> io::Result<Arc<ClientConfig>> {
    let provider = Arc::new(rustls::crypto::ring::default_provider());
    let config = ClientConfig::builder_with_provider(provider)
        .with_safe_default_protocol_versions()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?
        .with_root_certificates(roots)
        .with_no_client_auth();
    Ok(Arc::new(config))
}

impl Read for TlsStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }
}

impl Write for TlsStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

impl Connection for TlsStream {
    fn close(&mut self) -> io::Result<()> {
        self.inner.conn.send_close_notify();
        // peer has usually gone already; close_notify is best effort
        if let Err(e) = self.inner.flush() {
            tracing::debug!("close_notify not delivered: {}", e);
        }
        match self.inner.sock.shutdown(Shutdown::Both) {
            Err(e) if e.kind() != io::ErrorKind::NotConnected => Err(e),
            _ => Ok(()),
        }
    }
}
