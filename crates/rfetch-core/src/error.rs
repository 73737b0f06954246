//! Error type shared by the identifier parser and every fetch strategy.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong between an input string and a `Response`.
///
/// A fetch either succeeds with a complete response or fails with one of
/// these; nothing is retried or downgraded inside the core.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Input has no `://` separator, or its scheme is not http, https, file or data.
    #[error("unsupported or missing scheme in {0:?}")]
    InvalidScheme(String),

    /// Authority part of a network identifier is unusable (empty host, bad port).
    #[error("invalid authority in {input:?}: {reason}")]
    InvalidAuthority { input: String, reason: String },

    /// `data:` identifier without the `,` that separates media type from payload.
    #[error("data identifier {0:?} has no ',' before its payload")]
    MalformedData(String),

    /// Connect, handshake, read or write failure on the network stream.
    #[error("transport error with {host}:{port}")]
    Transport {
        host: String,
        port: u16,
        #[source]
        source: io::Error,
    },

    #[error("{} does not exist", .0.display())]
    NotFound(PathBuf),

    #[error("{} is a directory", .0.display())]
    IsADirectory(PathBuf),

    #[error("permission denied reading {}", .0.display())]
    PermissionDenied(PathBuf),

    /// Filesystem failure that is none of the above.
    #[error("failed to read {}", .path.display())]
    File {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Host or user agent contains CR or LF and cannot go on a header line.
    #[error("{name} value {value:?} contains a line break")]
    InvalidHeaderValue { name: &'static str, value: String },

    /// Response did not look like HTTP/1.1 (bad status line, header line, or early EOF).
    #[error("protocol error: {0}")]
    Protocol(String),
}

pub type Result<T> = std::result::Result<T, FetchError>;

impl FetchError {
    pub(crate) fn transport(host: &str, port: u16, source: io::Error) -> Self {
        FetchError::Transport {
            host: host.to_string(),
            port,
            source,
        }
    }

    /// Maps a filesystem error on `path` to the matching file-scheme variant.
    pub(crate) fn from_file_io(path: PathBuf, source: io::Error) -> Self {
        match source.kind() {
            io::ErrorKind::NotFound => FetchError::NotFound(path),
            io::ErrorKind::PermissionDenied => FetchError::PermissionDenied(path),
            _ => FetchError::File { path, source },
        }
    }
}
