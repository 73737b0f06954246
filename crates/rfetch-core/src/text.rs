//! Naive markup stripping.
//!
//! One left-to-right scan with an "inside a tag" flag: an opening delimiter
//! sets it, a closing delimiter clears it, and other characters are copied
//! only while it is clear. Delimiters themselves are dropped. There is no
//! nesting, no attribute or comment awareness, and no entity decoding, so
//! `<a title="x>y">` leaks `y"` into the output: the `>` inside the quotes
//! closes the tag and the final `>` is dropped as a stray delimiter.

use serde::{Deserialize, Serialize};

/// Which spellings count as tag delimiters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Delimiters {
    /// Only literal `<` and `>`.
    #[default]
    Literal,
    /// Literal `<`/`>` plus the entity spellings `&lt;`/`&gt;`.
    ///
    /// At each position an entity is tried first and consumed whole, then a
    /// literal bracket. Adjacent mixes such as `&lt;>` or `<&gt;` therefore
    /// open and close in plain reading order; nothing smarter is inferred.
    WithEntities,
}

const ENTITY_OPEN: &str = "&lt;";
const ENTITY_CLOSE: &str = "&gt;";

/// Strip literal `<...>` tags.
pub fn strip_markup(text: &str) -> String {
    strip_markup_with(text, Delimiters::Literal)
}

pub fn strip_markup_with(text: &str, delimiters: Delimiters) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_tag = false;
    let mut rest = text;

    while let Some(c) = rest.chars().next() {
        if delimiters == Delimiters::WithEntities {
            if let Some(after) = rest.strip_prefix(ENTITY_OPEN) {
                in_tag = true;
                rest = after;
                continue;
            }
            if let Some(after) = rest.strip_prefix(ENTITY_CLOSE) {
                in_tag = false;
                rest = after;
                continue;
            }
        }
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(c),
            _ => {}
        }
        rest = &rest[c.len_utf8()..];
    }
    out
}
