//! The declared configuration: monitors as the user wants them.
//!
//! Loaded from a TOML manifest. Params payloads are JSON-encoded
//! strings whose shape depends on the monitor/entity/channel type, so
//! they stay opaque here beyond a validity check.

use anyhow::{Context, Result};
use reconcile::Identified;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Thresholds the remote service accepts for notification rules.
pub const VALID_THRESHOLDS: [i64; 5] = [10, 30, 50, 70, 90];

/// Inclusive range of known monitor type identifiers.
pub const MONITOR_TYPE_RANGE: std::ops::RangeInclusive<i64> = 1..=57;

/// Inclusive range of known rule category tags.
pub const CATEGORY_RANGE: std::ops::RangeInclusive<i64> = 1..=7;

/// The only rule type the service currently supports.
pub const RULE_TYPE_NOTIFICATION: &str = "notification";

/// Top-level manifest: the full set of managed monitors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub monitors: Vec<MonitorConfig>,
}

/// A declared monitor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitorConfig {
    pub name: String,
    /// Monitor type identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monitor_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default)]
    pub entities: Vec<EntityConfig>,
    #[serde(default)]
    pub rules: Vec<RuleConfig>,
    /// JSON-encoded monitor parameters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<String>,
}

/// A declared monitoring target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityConfig {
    pub entity_type: i64,
    /// JSON-encoded entity parameters.
    pub params: String,
}

/// A declared notification rule.
///
/// `id` is never written by users; it is carried forward from state
/// during planning so the service updates the rule in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    #[serde(rename = "type", default = "default_rule_type")]
    pub rule_type: String,
    pub threshold: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification_period: Option<i64>,
    #[serde(default)]
    pub categories: Vec<i64>,
    #[serde(default)]
    pub channels: Vec<ChannelConfig>,
}

/// A declared notification destination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    /// JSON-encoded channel parameters (delivery target etc.).
    pub params: String,
}

fn default_rule_type() -> String {
    RULE_TYPE_NOTIFICATION.to_string()
}

impl Identified for RuleConfig {
    fn name(&self) -> &str {
        &self.name
    }

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn set_id(&mut self, id: Option<i64>) {
        self.id = id;
    }
}

impl Identified for ChannelConfig {
    fn name(&self) -> &str {
        &self.name
    }

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn set_id(&mut self, id: Option<i64>) {
        self.id = id;
    }
}

impl Manifest {
    /// Load a manifest from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Could not read manifest: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Invalid manifest: {}", path.display()))
    }

    /// Find a declared monitor by name.
    pub fn find_monitor(&self, name: &str) -> Option<&MonitorConfig> {
        self.monitors.iter().find(|m| m.name == name)
    }

    /// Validate the manifest against the remote schema's constraints.
    ///
    /// Returns a list of human-readable problems; empty means valid.
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        for (i, monitor) in self.monitors.iter().enumerate() {
            if self.monitors[..i].iter().any(|m| m.name == monitor.name) {
                issues.push(format!("duplicate monitor name {:?}", monitor.name));
            }
            monitor.validate(&mut issues);
        }

        issues
    }
}

impl MonitorConfig {
    fn validate(&self, issues: &mut Vec<String>) {
        let ctx = &self.name;

        if let Some(monitor_id) = self.monitor_id
            && !MONITOR_TYPE_RANGE.contains(&monitor_id)
        {
            issues.push(format!(
                "monitor {ctx:?}: monitor_id {monitor_id} outside {}..={}",
                MONITOR_TYPE_RANGE.start(),
                MONITOR_TYPE_RANGE.end()
            ));
        }

        if let Some(params) = &self.params
            && reconcile::decode(params).is_err()
        {
            issues.push(format!("monitor {ctx:?}: params is not valid JSON"));
        }

        for (i, entity) in self.entities.iter().enumerate() {
            if reconcile::decode(&entity.params).is_err() {
                issues.push(format!(
                    "monitor {ctx:?}: entity #{i} params is not valid JSON"
                ));
            }
        }

        for (i, rule) in self.rules.iter().enumerate() {
            // Identity reconciliation keys on rule names, so they must
            // be unique within one monitor.
            if self.rules[..i].iter().any(|r| r.name == rule.name) {
                issues.push(format!("monitor {ctx:?}: duplicate rule name {:?}", rule.name));
            }
            rule.validate(ctx, issues);
        }
    }
}

impl RuleConfig {
    fn validate(&self, monitor: &str, issues: &mut Vec<String>) {
        if self.rule_type != RULE_TYPE_NOTIFICATION {
            issues.push(format!(
                "monitor {monitor:?}, rule {:?}: unsupported type {:?} (expected {RULE_TYPE_NOTIFICATION:?})",
                self.name, self.rule_type
            ));
        }

        if !VALID_THRESHOLDS.contains(&self.threshold) {
            issues.push(format!(
                "monitor {monitor:?}, rule {:?}: threshold {} not one of {VALID_THRESHOLDS:?}",
                self.name, self.threshold
            ));
        }

        for category in &self.categories {
            if !CATEGORY_RANGE.contains(category) {
                issues.push(format!(
                    "monitor {monitor:?}, rule {:?}: category {category} outside {}..={}",
                    self.name,
                    CATEGORY_RANGE.start(),
                    CATEGORY_RANGE.end()
                ));
            }
        }

        for (i, channel) in self.channels.iter().enumerate() {
            if self.channels[..i].iter().any(|c| c.name == channel.name) {
                issues.push(format!(
                    "monitor {monitor:?}, rule {:?}: duplicate channel name {:?}",
                    self.name, channel.name
                ));
            }
            if reconcile::decode(&channel.params).is_err() {
                issues.push(format!(
                    "monitor {monitor:?}, rule {:?}, channel {:?}: params is not valid JSON",
                    self.name, channel.name
                ));
            }
        }
    }
}
