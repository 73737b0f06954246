//! What the user asked to see: extracted text, or the source with `view-source:`.

use crate::error::Result;
use crate::http::Response;
use crate::text::{self, Delimiters};
use crate::url_model::Url;

const VIEW_SOURCE_PREFIX: &str = "view-source:";

/// A parsed command-line target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub url: Url,
    pub view_source: bool,
}

impl Request {
    /// Parses `input`, peeling one `view-source:` prefix first.
    pub fn parse(input: &str) -> Result<Self> {
        match input.strip_prefix(VIEW_SOURCE_PREFIX) {
            Some(inner) => Ok(Self {
                url: Url::parse(inner)?,
                view_source: true,
            }),
            None => Ok(Self {
                url: Url::parse(input)?,
                view_source: false,
            }),
        }
    }

    /// Decoded body as-is for view-source, markup-stripped otherwise.
    pub fn render(&self, response: &Response, delimiters: Delimiters) -> String {
        let body = response.text();
        if self.view_source {
            body
        } else {
            text::strip_markup_with(&body, delimiters)
        }
    }
}
