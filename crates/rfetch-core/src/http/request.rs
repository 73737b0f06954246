//! The one request this client sends.

use crate::error::{FetchError, Result};
use crate::url_model::NetworkLocation;

/// Serializes `GET <target> HTTP/1.1` with exactly `Host`, `Connection: close`
/// and `User-Agent`, CRLF-terminated.
///
/// A host or user agent containing CR or LF would smuggle extra header lines
/// into the request and is rejected instead.
pub fn build_request(location: &NetworkLocation, user_agent: &str) -> Result<String> {
    check_header_value("Host", &location.host)?;
    check_header_value("User-Agent", user_agent)?;
    Ok(format!(
        "GET {} HTTP/1.1\r\nHost: {}\r\nConnection: close\r\nUser-Agent: {}\r\n\r\n",
        location.request_target(),
        location.host,
        user_agent
    ))
}

/// Fails with [`FetchError::InvalidHeaderValue`] if `value` would break the header line.
pub fn check_header_value(name: &'static str, value: &str) -> Result<()> {
    if value.contains(['\r', '\n']) {
        return Err(FetchError::InvalidHeaderValue {
            name,
            value: value.to_string(),
        });
    }
    Ok(())
}
