use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::entities::RewriteMode;
use crate::fetch::twitter_api::DEFAULT_API_BASE;
use crate::timestamp::LocalZone;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_base: String,
    pub user_agent: String,
    /// IANA zone name; when unset, dates use the host's current UTC offset.
    pub timezone: Option<String>,
    pub rewrite_mode: RewriteMode,
    /// CSS class name to extra style text.
    pub css: HashMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            user_agent: concat!("blackbird/", env!("CARGO_PKG_VERSION")).to_string(),
            timezone: None,
            rewrite_mode: RewriteMode::default(),
            css: HashMap::new(),
        }
    }
}

impl Config {
    /// Load from `path`, or from the default location if that file exists,
    /// or fall back to defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        // Surface a bad zone name at load time rather than mid-render.
        config.local_zone()?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("blackbird").join("config.toml"))
    }

    pub fn local_zone(&self) -> Result<LocalZone> {
        match &self.timezone {
            Some(name) => LocalZone::from_name(name),
            None => Ok(LocalZone::HostSkew),
        }
    }
}
