//! `file:` fetch: whole-file read from the local filesystem.

use std::fs;
use std::path::Path;

use crate::error::{FetchError, Result};
use crate::http::Response;

pub(super) fn fetch(path: &Path) -> Result<Response> {
    let meta =
        fs::metadata(path).map_err(|e| FetchError::from_file_io(path.to_path_buf(), e))?;
    if meta.is_dir() {
        return Err(FetchError::IsADirectory(path.to_path_buf()));
    }
    let body = fs::read(path).map_err(|e| FetchError::from_file_io(path.to_path_buf(), e))?;
    tracing::debug!("read {} bytes from {}", body.len(), path.display());
    Ok(Response::ok(body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn reads_whole_file() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(b"<p>local</p>\n").unwrap();
        f.flush().unwrap();
        let r = fetch(f.path()).unwrap();
        assert_eq!(r.status_code, 200);
        assert_eq!(r.status_text, "OK");
        assert!(r.headers.is_empty());
        assert_eq!(r.body, b"<p>local</p>\n");
    }

    #[test]
    fn missing_path_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.html");
        assert!(matches!(fetch(&missing), Err(FetchError::NotFound(p)) if p == missing));
    }

    #[test]
    fn directory_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            fetch(dir.path()),
            Err(FetchError::IsADirectory(_))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_file_is_permission_denied() {
        use std::os::unix::fs::PermissionsExt;

        let f = tempfile::NamedTempFile::new().unwrap();
        fs::set_permissions(f.path(), fs::Permissions::from_mode(0o000)).unwrap();
        // root ignores mode bits
        if fs::read(f.path()).is_ok() {
            return;
        }
        assert!(matches!(
            fetch(f.path()),
            Err(FetchError::PermissionDenied(_))
        ));
    }
}
