//! Minimal HTTP/1.1 server for integration tests.
//!
//! Each connection reads one request head, writes a canned response and
//! closes, which is what `Connection: close` promises the client. The raw
//! request bytes are handed back so tests can assert on the wire format.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

pub struct TestServer {
    pub port: u16,
    requests: Receiver<Vec<u8>>,
}

impl TestServer {
    /// `http://127.0.0.1:<port>` followed by `path` (which should start with `/`).
    pub fn url(&self, path: &str) -> String {
        format!("http://127.0.0.1:{}{}", self.port, path)
    }

    /// Next request head received, waiting up to two seconds.
    pub fn next_request(&self) -> String {
        let raw = self
            .requests
            .recv_timeout(Duration::from_secs(2))
            .expect("server saw no request");
        String::from_utf8(raw).expect("request is utf-8")
    }

    /// True if no connection delivered a request head within `wait`.
    pub fn stayed_idle(&self, wait: Duration) -> bool {
        self.requests.recv_timeout(wait).is_err()
    }
}

/// Starts a server in a background thread that answers every connection with
/// `response`. The server runs until the process exits.
pub fn start(response: Vec<u8>) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let response = response.clone();
            let tx = tx.clone();
            thread::spawn(move || handle(stream, &response, &tx));
        }
    });
    TestServer { port, requests: rx }
}

fn handle(mut stream: TcpStream, response: &[u8], tx: &Sender<Vec<u8>>) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));
    let mut head = Vec::new();
    let mut buf = [0u8; 1024];
    while !head.ends_with(b"\r\n\r\n") {
        match stream.read(&mut buf) {
            Ok(0) | Err(_) => break,
            Ok(n) => head.extend_from_slice(&buf[..n]),
        }
    }
    let _ = tx.send(head);
    let _ = stream.write_all(response);
    let _ = stream.flush();
}
