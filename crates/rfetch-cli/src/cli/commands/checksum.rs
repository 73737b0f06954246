//! `rfetch checksum` – SHA-256 of a fetched body.

use anyhow::{bail, Result};
use rfetch_core::checksum;
use rfetch_core::config::RfetchConfig;
use rfetch_core::fetch::Fetcher;
use rfetch_core::url_model::Url;

/// Compute and print SHA-256 of the body at `url`, checking it against `expect` if given.
pub fn run_checksum(cfg: &RfetchConfig, url: &str, expect: Option<&str>) -> Result<()> {
    let parsed = Url::parse(url)?;
    let response = Fetcher::new(cfg.fetch_options()).fetch(&parsed)?;
    let digest = checksum::sha256_hex(&response.body);
    if let Some(expected) = expect {
        if !checksum::matches(&response.body, expected) {
            bail!(
                "checksum mismatch for {}: expected {}, got {}",
                url,
                expected.trim(),
                digest
            );
        }
    }
    println!("{}  {}", digest, url);
    Ok(())
}
