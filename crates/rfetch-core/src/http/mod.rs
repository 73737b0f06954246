//! Response value object and HTTP/1.1 framing.
//!
//! `request` builds the single GET this client ever sends; `reader` turns
//! the bytes coming back into a [`Response`].

mod headers;
mod reader;
mod request;

pub use headers::HeaderMap;
pub use reader::{read_response, Peer};
pub use request::{build_request, check_header_value};

use serde::Serialize;

/// Uniform result of every fetch strategy.
///
/// `file` and `data` fetches produce status 200 "OK" with no headers and an
/// empty `version`; only network fetches carry protocol framing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Response {
    /// e.g. `HTTP/1.1`
    pub version: String,
    pub status_code: u16,
    pub status_text: String,
    pub headers: HeaderMap,
    #[serde(skip)]
    pub body: Vec<u8>,
}

impl Response {
    /// Frameless 200 response used by the file and data strategies.
    pub fn ok(body: Vec<u8>) -> Self {
        Self {
            version: String::new(),
            status_code: 200,
            status_text: "OK".to_string(),
            headers: HeaderMap::new(),
            body,
        }
    }

    /// `charset` parameter of `content-type`, unquoted.
    pub fn charset(&self) -> Option<&str> {
        let content_type = self.headers.get("content-type")?;
        content_type.split(';').skip(1).find_map(|param| {
            let (name, value) = param.split_once('=')?;
            if name.trim().eq_ignore_ascii_case("charset") {
                Some(value.trim().trim_matches('"'))
            } else {
                None
            }
        })
    }

    /// Body decoded with the header charset, UTF-8 when absent or unknown.
    pub fn text(&self) -> String {
        match self.charset() {
            Some(cs) if is_single_byte_charset(cs) => {
                self.body.iter().map(|&b| char::from(b)).collect()
            }
            _ => String::from_utf8_lossy(&self.body).into_owned(),
        }
    }
}

fn is_single_byte_charset(charset: &str) -> bool {
    ["iso-8859-1", "latin1", "us-ascii"]
        .iter()
        .any(|cs| charset.eq_ignore_ascii_case(cs))
}
