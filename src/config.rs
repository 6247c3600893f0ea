//! Provider settings: where the remote API lives and how to talk to it.
//!
//! Settings load from `~/.config/vigil/settings.toml` with environment
//! overrides (`VIGIL_API_URL`, `VIGIL_API_TOKEN`). The tool version is
//! threaded into the client explicitly via [`user_agent`] rather than
//! read from process-global state.

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

/// Default API base when neither file nor environment configures one.
pub const DEFAULT_API_URL: &str = "https://api.vigil.dev/api/v2";

/// Get the config directory path (~/.config/vigil)
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("vigil"))
}

/// Connection settings for the remote monitor API.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// API base URL.
    #[serde(default)]
    pub api_url: Option<String>,
    /// API token; required (file or `VIGIL_API_TOKEN`).
    #[serde(default)]
    pub api_token: Option<String>,
}

impl Settings {
    /// Load settings.toml (if present) and apply environment overrides.
    pub fn load() -> Result<ResolvedSettings> {
        let path = config_dir()?.join("settings.toml");

        let mut settings = if path.exists() {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Could not read {}", path.display()))?;
            toml::from_str(&content)
                .with_context(|| format!("Invalid settings file: {}", path.display()))?
        } else {
            log::debug!("No settings file at {}, using environment", path.display());
            Settings {
                api_url: None,
                api_token: None,
            }
        };

        if let Ok(url) = std::env::var("VIGIL_API_URL") {
            settings.api_url = Some(url);
        }
        if let Ok(token) = std::env::var("VIGIL_API_TOKEN") {
            settings.api_token = Some(token);
        }

        let Some(api_token) = settings.api_token else {
            bail!(
                "No API token configured. Set api_token in {} or export VIGIL_API_TOKEN.",
                path.display()
            );
        };

        Ok(ResolvedSettings {
            api_url: settings
                .api_url
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            api_token,
        })
    }
}

/// Settings with defaults applied and the token known to be present.
#[derive(Debug, Clone)]
pub struct ResolvedSettings {
    pub api_url: String,
    pub api_token: String,
}

impl ResolvedSettings {
    /// Build an API client from these settings.
    ///
    /// The version is compiled in and passed down here; nothing else in
    /// the tree reads it.
    pub fn client(&self) -> vigilapi::Client {
        vigilapi::Client::new(&self.api_url, &self.api_token, user_agent())
    }
}

/// User-Agent string carrying the tool version.
pub fn user_agent() -> String {
    format!("vigil/{}", env!("CARGO_PKG_VERSION"))
}
