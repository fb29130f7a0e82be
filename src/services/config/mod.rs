//! Application configuration.
//!
//! Loaded from a TOML file in the platform config directory, with
//! environment overrides for the API endpoint and token. Missing file means
//! defaults, pointing the client at a local Strapi instance.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

pub const ENV_API_URL: &str = "CONTENT_CALENDAR_API_URL";
pub const ENV_API_TOKEN: &str = "CONTENT_CALENDAR_API_TOKEN";

const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Base URL of the Strapi API, including the `/api` prefix.
    pub api_base_url: String,
    /// Bearer token for authenticated requests.
    pub api_token: Option<String>,
    pub request_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:1337/api".to_string(),
            api_token: None,
            request_timeout_secs: 20,
        }
    }
}

impl AppConfig {
    /// Platform config file location, e.g.
    /// `~/.config/content-calendar/config.toml` on Linux.
    pub fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "content-calendar")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Load the config file if present, then apply environment overrides.
    pub fn load() -> Result<Self> {
        let mut config = match Self::config_path() {
            Some(path) if path.exists() => Self::from_file(&path)?,
            _ => Self::default(),
        };
        config.apply_overrides(
            std::env::var(ENV_API_URL).ok(),
            std::env::var(ENV_API_TOKEN).ok(),
        );
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml_str(&raw)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    pub fn from_toml_str(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    fn apply_overrides(&mut self, api_url: Option<String>, api_token: Option<String>) {
        if let Some(url) = api_url.filter(|u| !u.is_empty()) {
            self.api_base_url = url;
        }
        if let Some(token) = api_token.filter(|t| !t.is_empty()) {
            self.api_token = Some(token);
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.api_base_url.trim().is_empty() {
            anyhow::bail!("api_base_url must not be empty");
        }
        Ok(())
    }
}
