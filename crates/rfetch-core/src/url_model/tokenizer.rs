//! Single left-to-right pass that splits an identifier into raw tokens.
//!
//! The scanner moves through named states instead of chaining `split`
//! calls, so the edge cases are explicit transitions:
//!
//! - `Scheme` ends at the first `://`; reaching end of input here means there
//!   is no scheme at all.
//! - `Authority` ends at the first `/` or at end of input (a bare host).
//! - `Path` emits a segment at every `/` and at end of input, which plays the
//!   role of the implicit trailing slash. Empty segments are never emitted,
//!   so `a//b` and `a/b/` both give `["a", "b"]`.
//!
//! `data:` identifiers never enter the scanner; they are split once at the
//! first comma.

use crate::error::FetchError;

const DATA_PREFIX: &str = "data:";
const SCHEME_SEPARATOR: &[u8] = b"://";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Scheme,
    Authority,
    Path,
}

/// Raw slices of the input, before scheme validation and port parsing.
#[derive(Debug, PartialEq, Eq)]
pub(super) enum Tokens<'a> {
    Hierarchical {
        scheme: &'a str,
        authority: &'a str,
        segments: Vec<&'a str>,
    },
    Data {
        media_type: &'a str,
        payload: &'a str,
    },
}

pub(super) fn tokenize(input: &str) -> Result<Tokens<'_>, FetchError> {
    if let Some(rest) = strip_data_prefix(input) {
        return data_payload(input, rest);
    }

    let bytes = input.as_bytes();
    let mut state = State::Scheme;
    let mut scheme = "";
    let mut authority = "";
    let mut segments = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match state {
            State::Scheme => {
                if bytes[i..].starts_with(SCHEME_SEPARATOR) {
                    scheme = &input[..i];
                    i += SCHEME_SEPARATOR.len();
                    start = i;
                    state = State::Authority;
                    continue;
                }
            }
            State::Authority => {
                if bytes[i] == b'/' {
                    authority = &input[start..i];
                    start = i + 1;
                    state = State::Path;
                }
            }
            State::Path => {
                if bytes[i] == b'/' {
                    push_segment(&mut segments, &input[start..i]);
                    start = i + 1;
                }
            }
        }
        i += 1;
    }

    match state {
        State::Scheme => return Err(FetchError::InvalidScheme(input.to_string())),
        State::Authority => authority = &input[start..],
        State::Path => push_segment(&mut segments, &input[start..]),
    }

    Ok(Tokens::Hierarchical {
        scheme,
        authority,
        segments,
    })
}

fn strip_data_prefix(input: &str) -> Option<&str> {
    let head = input.get(..DATA_PREFIX.len())?;
    if head.eq_ignore_ascii_case(DATA_PREFIX) {
        Some(&input[DATA_PREFIX.len()..])
    } else {
        None
    }
}

fn data_payload<'a>(input: &str, rest: &'a str) -> Result<Tokens<'a>, FetchError> {
    match rest.split_once(',') {
        Some((media_type, payload)) => Ok(Tokens::Data {
            media_type,
            payload,
        }),
        None => Err(FetchError::MalformedData(input.to_string())),
    }
}

fn push_segment<'a>(segments: &mut Vec<&'a str>, segment: &'a str) {
    if !segment.is_empty() {
        segments.push(segment);
    }
}
