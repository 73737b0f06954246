//! `rfetch get` – raw body, optionally with the response head.

use anyhow::{Context, Result};
use rfetch_core::config::RfetchConfig;
use rfetch_core::fetch::Fetcher;
use rfetch_core::http::Response;
use rfetch_core::url_model::Url;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

pub fn run_get(cfg: &RfetchConfig, url: &str, include: bool, output: Option<&Path>) -> Result<()> {
    let url = Url::parse(url)?;
    let response = Fetcher::new(cfg.fetch_options()).fetch(&url)?;
    tracing::info!(
        "get {} -> {} ({} bytes)",
        url,
        response.status_code,
        response.body.len()
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if include {
        out.write_all(format_head(&response).as_bytes())?;
    }
    match output {
        Some(path) => {
            fs::write(path, &response.body)
                .with_context(|| format!("write {}", path.display()))?;
            eprintln!("saved {} bytes to {}", response.body.len(), path.display());
        }
        None => out.write_all(&response.body)?,
    }
    out.flush()?;
    Ok(())
}

/// Status line and headers, one per line, ending with a blank line.
pub fn format_head(response: &Response) -> String {
    let mut head = String::new();
    if !response.version.is_empty() {
        head.push_str(&response.version);
        head.push(' ');
    }
    head.push_str(&format!(
        "{} {}\n",
        response.status_code, response.status_text
    ));
    for (name, value) in response.headers.iter() {
        head.push_str(&format!("{}: {}\n", name, value));
    }
    head.push('\n');
    head
}
