//! https end to end against a local rustls server.
//!
//! `tests/data` holds a throwaway CA and a `localhost`/`127.0.0.1` leaf it
//! signed (P-256, PKCS#8 key). The client trusts only that CA.

use std::io::{Read, Write};
use std::net::{Shutdown, TcpListener};
use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use rfetch_core::fetch::{FetchOptions, Fetcher};
use rfetch_core::transport::{client_config_with_roots, TcpConnector};
use rfetch_core::url_model::Url;
use rfetch_core::FetchError;
use rustls::pki_types::{CertificateDer, PrivateKeyDer, PrivatePkcs8KeyDer};
use rustls::{RootCertStore, ServerConfig, ServerConnection, StreamOwned};

const CA_DER: &[u8] = include_bytes!("data/test-ca.der");
const LEAF_DER: &[u8] = include_bytes!("data/localhost.der");
const LEAF_KEY_DER: &[u8] = include_bytes!("data/localhost.key.der");

const RESPONSE: &[u8] =
    b"HTTP/1.1 200 OK\r\nContent-Type: text/html; charset=UTF-8\r\n\r\n<h1>Secure Domain</h1>";

/// What the server saw from one client.
struct Exchange {
    request: Vec<u8>,
    client_sent_close_notify: bool,
}

struct TlsServer {
    port: u16,
    exchanges: Receiver<Exchange>,
}

impl TlsServer {
    fn url(&self, path: &str) -> String {
        format!("https://127.0.0.1:{}{}", self.port, path)
    }

    fn next_exchange(&self) -> Exchange {
        self.exchanges
            .recv_timeout(Duration::from_secs(5))
            .expect("tls server finished no exchange")
    }
}

fn server_config() -> Arc<ServerConfig> {
    let provider = Arc::new(rustls::crypto::ring::default_provider());
    let key = PrivateKeyDer::Pkcs8(PrivatePkcs8KeyDer::from(LEAF_KEY_DER.to_vec()));
    let config = ServerConfig::builder_with_provider(provider)
        .with_safe_default_protocol_versions()
        .unwrap()
        .with_no_client_auth()
        .with_single_cert(vec![CertificateDer::from(LEAF_DER.to_vec())], key)
        .unwrap();
    Arc::new(config)
}

/// Serves one connection: reads the request head, answers with `response`,
/// optionally sends close_notify, then waits for the client to hang up.
fn start(response: &'static [u8], send_close_notify: bool) -> TlsServer {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let (sock, _) = listener.accept().unwrap();
        sock.set_read_timeout(Some(Duration::from_secs(5))).unwrap();
        let conn = ServerConnection::new(server_config()).unwrap();
        let mut tls = StreamOwned::new(conn, sock);

        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.ends_with(b"\r\n\r\n") {
            match tls.read(&mut buf) {
                Ok(0) | Err(_) => break,
                Ok(n) => request.extend_from_slice(&buf[..n]),
            }
        }
        let _ = tls.write_all(response);
        if send_close_notify {
            tls.conn.send_close_notify();
        }
        let _ = tls.flush();
        let _ = tls.sock.shutdown(Shutdown::Write);

        let mut rest = Vec::new();
        let client_sent_close_notify = tls.read_to_end(&mut rest).is_ok();
        let _ = tx.send(Exchange {
            request,
            client_sent_close_notify,
        });
    });
    TlsServer { port, exchanges: rx }
}

fn fetcher_trusting_test_ca() -> Fetcher<TcpConnector> {
    let mut roots = RootCertStore::empty();
    roots.add(CertificateDer::from(CA_DER.to_vec())).unwrap();
    let connector = TcpConnector::with_tls_config(client_config_with_roots(roots).unwrap());
    Fetcher::with_connector(
        connector,
        FetchOptions {
            user_agent: "rfetch-tls-test/1".to_string(),
        },
    )
}

#[test]
fn https_fetch_over_local_tls_server() {
    let server = start(RESPONSE, true);
    let url = Url::parse(&server.url("/secure/index.html")).unwrap();

    let response = fetcher_trusting_test_ca().fetch(&url).unwrap();
    assert_eq!(response.status_code, 200);
    assert_eq!(
        response.headers.get("content-type"),
        Some("text/html; charset=UTF-8")
    );
    assert_eq!(response.body, b"<h1>Secure Domain</h1>");

    let exchange = server.next_exchange();
    assert_eq!(
        String::from_utf8(exchange.request).unwrap(),
        "GET /secure/index.html HTTP/1.1\r\n\
         Host: 127.0.0.1\r\n\
         Connection: close\r\n\
         User-Agent: rfetch-tls-test/1\r\n\r\n"
    );
    assert!(exchange.client_sent_close_notify);
}

#[test]
fn missing_close_notify_from_server_still_yields_body() {
    let server = start(RESPONSE, false);
    let url = Url::parse(&server.url("/")).unwrap();

    let response = fetcher_trusting_test_ca().fetch(&url).unwrap();
    assert_eq!(response.status_code, 200);
    assert_eq!(response.body, b"<h1>Secure Domain</h1>");
    assert!(server.next_exchange().client_sent_close_notify);
}

#[test]
fn untrusted_certificate_is_transport_error() {
    let server = start(RESPONSE, true);
    let url = Url::parse(&server.url("/")).unwrap();

    let err = Fetcher::default().fetch(&url).unwrap_err();
    assert!(
        matches!(err, FetchError::Transport { port, .. } if port == server.port),
        "got {:?}",
        err
    );
}
