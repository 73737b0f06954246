//! Resource identifier parsing.
//!
//! Normalizes the four supported addressing schemes (`http`, `https`,
//! `file`, `data`) into a single closed sum type. Every other scheme is
//! rejected at parse time, so code matching on [`Url`] never sees one.
//!
//! # Examples
//!
//! - `https://example.com` → host `example.com`, port 443, no segments
//! - `http://h:8080//a/b/` → host `h`, port 8080, segments `["a", "b"]`
//! - `file:///tmp/x.html` → segments `["tmp", "x.html"]`
//! - `data:text/html,<b>hi</b>` → media type `text/html`, payload `<b>hi</b>`

mod tokenizer;

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{FetchError, Result};
use tokenizer::Tokens;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    Http,
    Https,
    File,
    Data,
}

impl Scheme {
    /// Schemes reachable through `scheme://`. Matching ignores ASCII case.
    fn from_token(token: &str) -> Option<Self> {
        if token.eq_ignore_ascii_case("http") {
            Some(Scheme::Http)
        } else if token.eq_ignore_ascii_case("https") {
            Some(Scheme::Https)
        } else if token.eq_ignore_ascii_case("file") {
            Some(Scheme::File)
        } else {
            None
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Scheme::Http => "http",
            Scheme::Https => "https",
            Scheme::File => "file",
            Scheme::Data => "data",
        }
    }

    /// Port used when the authority carries none. Only network schemes have one.
    pub fn default_port(self) -> Option<u16> {
        match self {
            Scheme::Http => Some(80),
            Scheme::Https => Some(443),
            Scheme::File | Scheme::Data => None,
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Host, port and path of an `http`/`https` identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkLocation {
    pub host: String,
    pub port: u16,
    pub path_segments: Vec<String>,
}

impl NetworkLocation {
    /// Request target for the request line: `/` followed by the segments joined with `/`.
    /// No percent-encoding is applied.
    pub fn request_target(&self) -> String {
        format!("/{}", self.path_segments.join("/"))
    }
}

/// Path of a `file` identifier. The authority is kept but has no meaning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileLocation {
    pub host: String,
    pub path_segments: Vec<String>,
}

impl FileLocation {
    /// Absolute filesystem path built from the segments.
    pub fn path(&self) -> PathBuf {
        let mut path = PathBuf::from("/");
        path.extend(&self.path_segments);
        path
    }
}

/// Both halves of a `data:` identifier, split at the first comma.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DataPayload {
    /// Everything between `data:` and the comma, e.g. `text/html;charset=utf-8`. Not validated.
    pub media_type: String,
    /// Everything after the comma, verbatim.
    pub data: String,
}

/// A parsed resource identifier. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "scheme", rename_all = "lowercase")]
pub enum Url {
    Http(NetworkLocation),
    Https(NetworkLocation),
    File(FileLocation),
    Data(DataPayload),
}

impl Url {
    pub fn parse(input: &str) -> Result<Self> {
        match tokenizer::tokenize(input)? {
            Tokens::Data {
                media_type,
                payload,
            } => Ok(Url::Data(DataPayload {
                media_type: media_type.to_string(),
                data: payload.to_string(),
            })),
            Tokens::Hierarchical {
                scheme,
                authority,
                segments,
            } => {
                let scheme = Scheme::from_token(scheme)
                    .ok_or_else(|| FetchError::InvalidScheme(input.to_string()))?;
                let path_segments: Vec<String> =
                    segments.into_iter().map(str::to_string).collect();
                let (host, port) = match authority.split_once(':') {
                    Some((host, port)) => (host, Some(port)),
                    None => (authority, None),
                };

                match scheme {
                    Scheme::Http | Scheme::Https => {
                        let location = network_location(input, scheme, host, port, path_segments)?;
                        Ok(if scheme == Scheme::Https {
                            Url::Https(location)
                        } else {
                            Url::Http(location)
                        })
                    }
                    Scheme::File => Ok(Url::File(FileLocation {
                        host: host.to_string(),
                        path_segments,
                    })),
                    Scheme::Data => Err(FetchError::InvalidScheme(input.to_string())),
                }
            }
        }
    }

    pub fn scheme(&self) -> Scheme {
        match self {
            Url::Http(_) => Scheme::Http,
            Url::Https(_) => Scheme::Https,
            Url::File(_) => Scheme::File,
            Url::Data(_) => Scheme::Data,
        }
    }

    /// Host for `http`, `https` and `file` (possibly empty for `file`); `None` for `data`.
    pub fn host(&self) -> Option<&str> {
        match self {
            Url::Http(loc) | Url::Https(loc) => Some(&loc.host),
            Url::File(loc) => Some(&loc.host),
            Url::Data(_) => None,
        }
    }

    /// Explicit or default port for network schemes; `None` otherwise.
    pub fn port(&self) -> Option<u16> {
        match self {
            Url::Http(loc) | Url::Https(loc) => Some(loc.port),
            Url::File(_) | Url::Data(_) => None,
        }
    }

    /// Non-empty path segments in order. Always empty for `data`.
    pub fn path_segments(&self) -> &[String] {
        match self {
            Url::Http(loc) | Url::Https(loc) => &loc.path_segments,
            Url::File(loc) => &loc.path_segments,
            Url::Data(_) => &[],
        }
    }

    pub fn data(&self) -> Option<&DataPayload> {
        match self {
            Url::Data(payload) => Some(payload),
            _ => None,
        }
    }
}

fn network_location(
    input: &str,
    scheme: Scheme,
    host: &str,
    port: Option<&str>,
    path_segments: Vec<String>,
) -> Result<NetworkLocation> {
    if host.is_empty() {
        return Err(FetchError::InvalidAuthority {
            input: input.to_string(),
            reason: "empty host".to_string(),
        });
    }
    let port = match port {
        Some(text) => text.parse::<u16>().map_err(|_| FetchError::InvalidAuthority {
            input: input.to_string(),
            reason: format!("invalid port {:?}", text),
        })?,
        // from_token only yields network schemes here, which always have a default
        None => scheme.default_port().unwrap_or(80),
    };
    Ok(NetworkLocation {
        host: host.to_string(),
        port,
        path_segments,
    })
}

impl FromStr for Url {
    type Err = FetchError;

    fn from_str(s: &str) -> Result<Self> {
        Url::parse(s)
    }
}

/// Normalized form: default ports spelled out, empty segments gone.
impl fmt::Display for Url {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Url::Http(loc) | Url::Https(loc) => write!(
                f,
                "{}://{}:{}{}",
                self.scheme(),
                loc.host,
                loc.port,
                loc.request_target()
            ),
            Url::File(loc) => write!(f, "file://{}{}", loc.host, loc.path().display()),
            Url::Data(payload) => write!(f, "data:{},{}", payload.media_type, payload.data),
        }
    }
}
