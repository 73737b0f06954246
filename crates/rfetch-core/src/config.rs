use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::fetch::{FetchOptions, DEFAULT_USER_AGENT};
use crate::http::check_header_value;
use crate::text::Delimiters;

/// Text extraction settings (optional `[text]` section in config.toml).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextConfig {
    /// Also treat `&lt;` / `&gt;` as tag delimiters.
    #[serde(default)]
    pub entity_delimiters: bool,
}

/// Global configuration loaded from `~/.config/rfetch/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RfetchConfig {
    /// Sent as `User-Agent` on every network request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Fetched by `rfetch show` when no URL is given.
    #[serde(default)]
    pub default_url: Option<String>,
    #[serde(default)]
    pub text: TextConfig,
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

impl Default for RfetchConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            default_url: None,
            text: TextConfig::default(),
        }
    }
}

impl RfetchConfig {
    pub fn fetch_options(&self) -> FetchOptions {
        FetchOptions {
            user_agent: self.user_agent.clone(),
        }
    }

    /// Rejects values that cannot be sent as-is, such as a multi-line `user_agent`.
    pub fn validate(&self) -> Result<()> {
        check_header_value("User-Agent", &self.user_agent).context("invalid user_agent")?;
        Ok(())
    }

    pub fn delimiters(&self) -> Delimiters {
        if self.text.entity_delimiters {
            Delimiters::WithEntities
        } else {
            Delimiters::Literal
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("rfetch")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<RfetchConfig> {
    load_or_init_at(&config_path()?)
}

pub fn load_or_init_at(path: &Path) -> Result<RfetchConfig> {
    if !path.exists() {
        let default_cfg = RfetchConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml).with_context(|| format!("write {}", path.display()))?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: RfetchConfig =
        toml::from_str(&data).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()
        .with_context(|| format!("validate {}", path.display()))?;
    Ok(cfg)
}
