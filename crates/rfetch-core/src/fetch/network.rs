//! `http:`/`https:` fetch: one GET over a stream this function owns.

use std::io::BufReader;

use crate::error::{FetchError, Result};
use crate::http::{self, Peer, Response};
use crate::transport::{Connection, Connector};
use crate::url_model::NetworkLocation;

pub(super) fn fetch(
    connector: &dyn Connector,
    location: &NetworkLocation,
    secure: bool,
    user_agent: &str,
) -> Result<Response> {
    let peer = Peer {
        host: &location.host,
        port: location.port,
    };
    let request = http::build_request(location, user_agent)?;
    let mut conn = connector
        .connect(peer.host, peer.port, secure)
        .map_err(|e| FetchError::transport(peer.host, peer.port, e))?;

    let result = exchange(conn.as_mut(), location, &request, peer);

    if let Err(e) = conn.close() {
        tracing::debug!("closing {}:{} failed: {}", peer.host, peer.port, e);
    }
    result
}

fn exchange(
    conn: &mut dyn Connection,
    location: &NetworkLocation,
    request: &str,
    peer: Peer<'_>,
) -> Result<Response> {
    tracing::debug!(
        "GET {} from {}:{}",
        location.request_target(),
        peer.host,
        peer.port
    );
    conn.write_all(request.as_bytes())
        .and_then(|()| conn.flush())
        .map_err(|e| FetchError::transport(peer.host, peer.port, e))?;

    let mut reader = BufReader::new(conn);
    http::read_response(&mut reader, peer)
}
