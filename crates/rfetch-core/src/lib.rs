//! rfetch core: turn a resource identifier into a [`http::Response`].
//!
//! ```no_run
//! use rfetch_core::{fetch, text, url_model::Url};
//!
//! let url = Url::parse("https://example.com/")?;
//! let response = fetch::fetch(&url)?;
//! println!("{}", text::strip_markup(&response.text()));
//! # Ok::<(), rfetch_core::FetchError>(())
//! ```

pub mod config;
pub mod logging;

pub mod checksum;
pub mod error;
pub mod fetch;
pub mod http;
pub mod text;
pub mod transport;
pub mod url_model;
pub mod view;

pub use error::{FetchError, Result};
