//! Parse an HTTP/1.1 response from a buffered byte stream.
//!
//! The stream is expected to end right after the body because every request
//! carries `Connection: close`; no chunked or length-delimited framing is
//! interpreted.

use std::io::{self, BufRead};

use crate::error::{FetchError, Result};

use super::{HeaderMap, Response};

/// Remote end of the stream, used to label transport errors.
#[derive(Debug, Clone, Copy)]
pub struct Peer<'a> {
    pub host: &'a str,
    pub port: u16,
}

/// Reads status line, headers up to the blank line, then everything else as body.
pub fn read_response<R: BufRead>(reader: &mut R, peer: Peer<'_>) -> Result<Response> {
    let status_line = read_line(reader, peer)?
        .ok_or_else(|| FetchError::Protocol("empty response".to_string()))?;
    let (version, status_code, status_text) = parse_status_line(&status_line)?;

    let mut headers = HeaderMap::new();
    loop {
        let line = read_line(reader, peer)?.ok_or_else(|| {
            FetchError::Protocol("connection closed before end of headers".to_string())
        })?;
        if line.is_empty() {
            break;
        }
        let (name, value) = line
            .split_once(':')
            .ok_or_else(|| FetchError::Protocol(format!("malformed header line {:?}", line)))?;
        headers.insert(name, value);
    }

    let body = read_body(reader, peer)?;
    tracing::debug!(
        status = status_code,
        headers = headers.len(),
        body_bytes = body.len(),
        "read response from {}:{}",
        peer.host,
        peer.port
    );

    Ok(Response {
        version,
        status_code,
        status_text,
        headers,
        body,
    })
}

/// `VERSION CODE REASON`, where the reason is everything after the second space.
fn parse_status_line(line: &str) -> Result<(String, u16, String)> {
    let mut parts = line.splitn(3, ' ');
    let (version, code, reason) = match (parts.next(), parts.next(), parts.next()) {
        (Some(v), Some(c), Some(r)) => (v, c, r),
        _ => {
            return Err(FetchError::Protocol(format!(
                "malformed status line {:?}",
                line
            )))
        }
    };
    if !version.starts_with("HTTP/") {
        return Err(FetchError::Protocol(format!(
            "status line {:?} does not start with an HTTP version",
            line
        )));
    }
    let code = code
        .parse::<u16>()
        .map_err(|_| FetchError::Protocol(format!("invalid status code {:?}", code)))?;
    Ok((version.to_string(), code, reason.to_string()))
}

/// One line without its terminator; `None` at end of stream.
fn read_line<R: BufRead>(reader: &mut R, peer: Peer<'_>) -> Result<Option<String>> {
    let mut buf = Vec::new();
    let n = reader
        .read_until(b'\n', &mut buf)
        .map_err(|e| FetchError::transport(peer.host, peer.port, e))?;
    if n == 0 {
        return Ok(None);
    }
    if buf.ends_with(b"\n") {
        buf.pop();
        if buf.ends_with(b"\r") {
            buf.pop();
        }
    }
    Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
}

fn read_body<R: BufRead>(reader: &mut R, peer: Peer<'_>) -> Result<Vec<u8>> {
    let mut body = Vec::new();
    match reader.read_to_end(&mut body) {
        Ok(_) => Ok(body),
        // TLS peers often close without close_notify; what arrived is the whole body.
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
            tracing::debug!("peer {}:{} closed without close_notify", peer.host, peer.port);
            Ok(body)
        }
        Err(e) => Err(FetchError::transport(peer.host, peer.port, e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Read};

    const PEER: Peer<'static> = Peer {
        host: "test",
        port: 80,
    };

    fn parse(raw: &[u8]) -> Result<Response> {
        read_response(&mut Cursor::new(raw.to_vec()), PEER)
    }

    #[test]
    fn example_domain_response() {
        let r = parse(
            b"HTTP/1.1 200 OK\r\nContent-Type: text/html; charset=UTF-8\r\n\r\n<h1>Example Domain</h1>",
        )
        .unwrap();
        assert_eq!(r.version, "HTTP/1.1");
        assert_eq!(r.status_code, 200);
        assert_eq!(r.status_text, "OK");
        assert_eq!(
            r.headers.get("content-type"),
            Some("text/html; charset=UTF-8")
        );
        assert_eq!(r.body, b"<h1>Example Domain</h1>");
    }

    #[test]
    fn reason_phrase_keeps_spaces() {
        let r = parse(b"HTTP/1.1 404 Not Found Here\r\n\r\n").unwrap();
        assert_eq!(r.status_code, 404);
        assert_eq!(r.status_text, "Not Found Here");
        assert!(r.body.is_empty());
    }

    #[test]
    fn header_value_splits_on_first_colon() {
        let r = parse(b"HTTP/1.1 200 OK\r\nLocation:  http://x:1/y \r\n\r\n").unwrap();
        assert_eq!(r.headers.get("location"), Some("http://x:1/y"));
    }

    #[test]
    fn duplicate_headers_last_wins() {
        let r = parse(b"HTTP/1.1 200 OK\r\nX-Id: 1\r\nx-id: 2\r\n\r\n").unwrap();
        assert_eq!(r.headers.get("x-id"), Some("2"));
        assert_eq!(r.headers.len(), 1);
    }

    #[test]
    fn body_is_raw_bytes_including_blank_lines() {
        let r = parse(b"HTTP/1.1 200 OK\r\n\r\na\r\n\r\nb\xff").unwrap();
        assert_eq!(r.body, b"a\r\n\r\nb\xff");
    }

    #[test]
    fn bare_lf_lines_are_accepted() {
        let r = parse(b"HTTP/1.1 200 OK\nA: b\n\nbody").unwrap();
        assert_eq!(r.headers.get("a"), Some("b"));
        assert_eq!(r.body, b"body");
    }

    #[test]
    fn status_line_field_count_is_checked() {
        for raw in [&b"HTTP/1.1 200\r\n\r\n"[..], &b"HTTP/1.1\r\n\r\n"[..]] {
            assert!(matches!(parse(raw), Err(FetchError::Protocol(_))));
        }
    }

    #[test]
    fn non_numeric_status_code_is_protocol_error() {
        assert!(matches!(
            parse(b"HTTP/1.1 abc OK\r\n\r\n"),
            Err(FetchError::Protocol(_))
        ));
    }

    #[test]
    fn non_http_status_line_is_protocol_error() {
        assert!(matches!(
            parse(b"SSH-2.0-OpenSSH_9.6 x y\r\n\r\n"),
            Err(FetchError::Protocol(_))
        ));
    }

    #[test]
    fn header_without_colon_is_protocol_error() {
        assert!(matches!(
            parse(b"HTTP/1.1 200 OK\r\nbroken\r\n\r\n"),
            Err(FetchError::Protocol(_))
        ));
    }

    #[test]
    fn empty_or_truncated_stream_is_protocol_error() {
        assert!(matches!(parse(b""), Err(FetchError::Protocol(_))));
        assert!(matches!(
            parse(b"HTTP/1.1 200 OK\r\nA: b\r\n"),
            Err(FetchError::Protocol(_))
        ));
    }

    struct FailingBody {
        head: Cursor<Vec<u8>>,
        kind: io::ErrorKind,
    }

    impl Read for FailingBody {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let n = self.head.read(buf)?;
            if n == 0 {
                Err(io::Error::from(self.kind))
            } else {
                Ok(n)
            }
        }
    }

    #[test]
    fn unexpected_eof_in_body_ends_the_body() {
        let src = FailingBody {
            head: Cursor::new(b"HTTP/1.1 200 OK\r\n\r\npartial".to_vec()),
            kind: io::ErrorKind::UnexpectedEof,
        };
        let r = read_response(&mut io::BufReader::new(src), PEER).unwrap();
        assert_eq!(r.body, b"partial");
    }

    #[test]
    fn other_read_errors_are_transport_errors() {
        let src = FailingBody {
            head: Cursor::new(b"HTTP/1.1 200 OK\r\n\r\npartial".to_vec()),
            kind: io::ErrorKind::ConnectionReset,
        };
        let err = read_response(&mut io::BufReader::new(src), PEER).unwrap_err();
        assert!(matches!(err, FetchError::Transport { port: 80, .. }));
    }
}
