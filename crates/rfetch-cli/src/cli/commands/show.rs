//! `rfetch show` – print the text of a resource.

use anyhow::{bail, Result};
use rfetch_core::config::{self, RfetchConfig};
use rfetch_core::fetch::Fetcher;
use rfetch_core::view::Request;

pub fn run_show(cfg: &RfetchConfig, url: Option<&str>) -> Result<()> {
    let target = match url.or(cfg.default_url.as_deref()) {
        Some(t) => t,
        None => bail!(
            "no URL given and no default_url set in {}",
            config::config_path()?.display()
        ),
    };

    let request = Request::parse(target)?;
    let response = Fetcher::new(cfg.fetch_options()).fetch(&request.url)?;
    tracing::info!(
        "show {} -> {} {}",
        request.url,
        response.status_code,
        response.status_text
    );
    println!("{}", request.render(&response, cfg.delimiters()));
    Ok(())
}
