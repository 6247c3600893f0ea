//! Persisted state: the last-known remote shape of every managed
//! monitor, keyed by declared name.
//!
//! Params payloads are stored as canonical JSON text (sorted keys, no
//! whitespace) so formatting drift never shows up as a change.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use crate::manifest::{ChannelConfig, EntityConfig, MonitorConfig, RuleConfig};

/// State file tracking all managed monitors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateFile {
    /// Last-known remote state, keyed by declared monitor name.
    #[serde(default)]
    pub monitors: BTreeMap<String, MonitorState>,

    /// Last time the state was updated.
    pub last_updated: DateTime<Utc>,
}

/// Last-known remote state of one monitor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitorState {
    /// Remote identifier, assigned at creation and stable thereafter.
    pub id: i64,
    /// The monitor as last observed, in declared-configuration shape.
    pub monitor: MonitorConfig,
    // Remote-assigned metadata, read-only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl StateFile {
    /// Get the state directory path (~/.local/state/vigil)
    pub fn state_dir() -> Result<PathBuf> {
        let home = dirs::home_dir().context("Could not determine home directory")?;
        Ok(home.join(".local").join("state").join("vigil"))
    }

    /// Get the state file path
    fn state_file() -> Result<PathBuf> {
        Ok(Self::state_dir()?.join("state.toml"))
    }

    /// Load state from disk, or return default if file doesn't exist
    pub fn load() -> Result<Self> {
        let path = Self::state_file()?;

        if !path.exists() {
            log::debug!("State file does not exist, using default state");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read state file: {}", path.display()))?;

        let state: StateFile = toml::from_str(&content)
            .with_context(|| format!("Failed to parse state file: {}", path.display()))?;

        log::debug!("Loaded state from {}", path.display());
        Ok(state)
    }

    /// Save state to disk, updating the timestamp
    pub fn save(&mut self) -> Result<()> {
        self.last_updated = Utc::now();

        let dir = Self::state_dir()?;
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create state directory: {}", dir.display()))?;

        let path = Self::state_file()?;
        let content =
            toml::to_string_pretty(&self).context("Failed to serialize state to TOML")?;

        fs::write(&path, &content)
            .with_context(|| format!("Failed to write state file: {}", path.display()))?;

        log::debug!("Saved state to {}", path.display());
        Ok(())
    }
}

impl Default for StateFile {
    fn default() -> Self {
        Self {
            monitors: BTreeMap::new(),
            last_updated: Utc::now(),
        }
    }
}

impl MonitorState {
    /// Build state from the configuration just submitted.
    ///
    /// Used when the post-write read-back fails: the server-assigned id
    /// must not be lost, so the submitted shape stands in until the next
    /// successful pass replaces it with the server's copy.
    pub fn from_config(id: i64, monitor: MonitorConfig) -> Self {
        Self {
            id,
            monitor,
            created_by: None,
            created_at: None,
            updated_at: None,
        }
    }

    /// Build state from a freshly-read remote record.
    ///
    /// Remote params arrive as decoded JSON trees; encoding them here
    /// yields canonical text directly.
    pub fn from_remote(remote: &vigilapi::Monitor) -> Self {
        let monitor = MonitorConfig {
            name: remote.name.clone(),
            monitor_id: remote.monitor_id,
            description: remote.description.clone(),
            disabled: remote.disabled,
            entities: remote
                .entities
                .iter()
                .map(|e| EntityConfig {
                    entity_type: e.entity_type,
                    params: e.params.to_string(),
                })
                .collect(),
            rules: remote
                .monitor_rules
                .iter()
                .map(|r| RuleConfig {
                    id: r.id,
                    name: r.name.clone(),
                    rule_type: r.rule_type.clone(),
                    threshold: r.threshold,
                    notification_period: r.notification_period,
                    categories: r.categories.clone(),
                    channels: r
                        .channels
                        .iter()
                        .map(|c| ChannelConfig {
                            id: c.id,
                            name: c.name.clone(),
                            params: c.params.to_string(),
                        })
                        .collect(),
                })
                .collect(),
            params: remote.params.as_ref().map(ToString::to_string),
        };

        Self {
            id: remote.id,
            monitor,
            created_by: remote.created_by.clone(),
            created_at: remote.created_at.clone(),
            updated_at: remote.updated_at.clone(),
        }
    }
}
