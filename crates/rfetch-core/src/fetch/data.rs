//! `data:` fetch: the payload is the body.

use crate::http::Response;
use crate::url_model::DataPayload;

/// Payload returned verbatim. The media type is neither decoded nor validated.
pub(super) fn fetch(payload: &DataPayload) -> Response {
    tracing::debug!(
        media_type = %payload.media_type,
        "serving {} bytes of inline data",
        payload.data.len()
    );
    Response::ok(payload.data.as_bytes().to_vec())
}
