//! Plan construction: declared configuration vs recorded state.

use reconcile::{carry_ids, is_subset};

use crate::engine::differ::{self, FieldChange};
use crate::manifest::{Manifest, MonitorConfig};
use crate::state::{MonitorState, StateFile};

/// What the executor should do for one monitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Create,
    Update,
    NoChange,
}

/// Planned outcome for a single declared monitor.
#[derive(Debug, Clone)]
pub struct MonitorPlan {
    pub name: String,
    pub action: Action,
    /// Declared configuration with identifiers carried forward and
    /// params suppression applied.
    pub config: MonitorConfig,
    /// Remote identifier, present for anything already tracked.
    pub remote_id: Option<i64>,
    /// Field-level changes, empty unless the action is Update.
    pub changes: Vec<FieldChange>,
}

/// Full reconciliation plan.
#[derive(Debug, Clone)]
pub struct Plan {
    pub monitors: Vec<MonitorPlan>,
    /// Tracked monitors no longer declared, slated for deletion.
    pub removals: Vec<(String, MonitorState)>,
}

impl Plan {
    pub fn has_changes(&self) -> bool {
        !self.removals.is_empty()
            || self.monitors.iter().any(|m| m.action != Action::NoChange)
    }
}

/// Build the plan for a manifest against recorded state.
pub fn plan(manifest: &Manifest, state: &StateFile) -> Plan {
    let mut monitors = Vec::with_capacity(manifest.monitors.len());

    for declared in &manifest.monitors {
        match state.monitors.get(&declared.name) {
            None => monitors.push(MonitorPlan {
                name: declared.name.clone(),
                action: Action::Create,
                config: declared.clone(),
                remote_id: None,
                changes: Vec::new(),
            }),
            Some(previous) => {
                let mut adjusted = declared.clone();
                merge_identifiers(&mut adjusted, &previous.monitor);
                suppress_params(&mut adjusted, &previous.monitor);

                let changes = differ::diff_monitor(&adjusted, &previous.monitor);
                let action = if changes.is_empty() {
                    Action::NoChange
                } else {
                    Action::Update
                };

                monitors.push(MonitorPlan {
                    name: declared.name.clone(),
                    action,
                    config: adjusted,
                    remote_id: Some(previous.id),
                    changes,
                });
            }
        }
    }

    let removals = state
        .monitors
        .iter()
        .filter(|(name, _)| manifest.find_monitor(name).is_none())
        .map(|(name, entry)| (name.clone(), entry.clone()))
        .collect();

    Plan { monitors, removals }
}

/// Carry remote identifiers from the previous observation onto the
/// declared configuration, matching rules by name and, within each
/// matched rule, channels by name.
fn merge_identifiers(declared: &mut MonitorConfig, previous: &MonitorConfig) {
    carry_ids(&mut declared.rules, &previous.rules);

    for rule in &mut declared.rules {
        if let Some(prev) = previous.rules.iter().find(|r| r.name == rule.name) {
            carry_ids(&mut rule.channels, &prev.channels);
        }
    }
}

/// Replace declared params text with the recorded text wherever the
/// declared tree is a structural subset of the recorded one. The
/// server decorates params with computed fields on read-back; as long
/// as everything we asked for is still there, it is not a change.
fn suppress_params(declared: &mut MonitorConfig, previous: &MonitorConfig) {
    if let (Some(text), Some(recorded)) = (&mut declared.params, &previous.params) {
        suppress_one(text, recorded);
    }

    for rule in &mut declared.rules {
        let Some(prev_rule) = previous.rules.iter().find(|r| r.name == rule.name) else {
            continue;
        };
        for channel in &mut rule.channels {
            if let Some(prev) = prev_rule.channels.iter().find(|c| c.name == channel.name) {
                suppress_one(&mut channel.params, &prev.params);
            }
        }
    }

    for (entity, prev) in declared.entities.iter_mut().zip(&previous.entities) {
        if entity.entity_type == prev.entity_type {
            suppress_one(&mut entity.params, &prev.params);
        }
    }
}

fn suppress_one(declared: &mut String, recorded: &str) {
    if declared == recorded {
        return;
    }

    let declared_tree = match reconcile::decode(declared) {
        Ok(tree) => tree,
        Err(err) => {
            log::warn!("keeping declared params as written, not valid JSON: {err}");
            return;
        }
    };
    let recorded_tree = match reconcile::decode(recorded) {
        Ok(tree) => tree,
        Err(err) => {
            log::warn!("keeping declared params as written, recorded copy not valid JSON: {err}");
            return;
        }
    };

    if is_subset(&declared_tree, &recorded_tree) {
        *declared = recorded.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::{ChannelConfig, RuleConfig};
    use chrono::Utc;
    use std::collections::BTreeMap;

    fn declared(name: &str) -> MonitorConfig {
        MonitorConfig {
            name: name.to_string(),
            monitor_id: Some(4),
            description: None,
            disabled: false,
            entities: Vec::new(),
            rules: vec![RuleConfig {
                id: None,
                name: "page-oncall".to_string(),
                rule_type: "notification".to_string(),
                threshold: 30,
                notification_period: None,
                categories: vec![1, 3],
                channels: vec![ChannelConfig {
                    id: None,
                    name: "slack".to_string(),
                    params: r#"{"url":"https://hooks"}"#.to_string(),
                }],
            }],
            params: Some(r#"{"severity": 30}"#.to_string()),
        }
    }

    fn tracked(name: &str, id: i64) -> MonitorState {
        let mut monitor = declared(name);
        monitor.rules[0].id = Some(7);
        monitor.rules[0].channels[0].id = Some(9);
        monitor.params = Some(r#"{"computed_flag":true,"severity":30}"#.to_string());
        MonitorState {
            id,
            monitor,
            created_by: None,
            created_at: None,
            updated_at: None,
        }
    }

    fn state_with(entries: Vec<(&str, MonitorState)>) -> StateFile {
        StateFile {
            monitors: entries
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect::<BTreeMap<_, _>>(),
            last_updated: Utc::now(),
        }
    }

    #[test]
    fn test_untracked_monitor_plans_create() {
        let manifest = Manifest {
            monitors: vec![declared("mainnet-watch")],
        };
        let plan = plan(&manifest, &StateFile::default());
        assert_eq!(plan.monitors[0].action, Action::Create);
        assert_eq!(plan.monitors[0].remote_id, None);
        assert!(plan.has_changes());
    }

    #[test]
    fn test_server_decorated_params_are_not_a_change() {
        let manifest = Manifest {
            monitors: vec![declared("mainnet-watch")],
        };
        let state = state_with(vec![("mainnet-watch", tracked("mainnet-watch", 42))]);

        let plan = plan(&manifest, &state);
        let entry = &plan.monitors[0];
        assert_eq!(entry.action, Action::NoChange);
        // Declared params were substituted with the recorded text.
        assert_eq!(
            entry.config.params.as_deref(),
            Some(r#"{"computed_flag":true,"severity":30}"#)
        );
        // Identifiers carried forward by name.
        assert_eq!(entry.config.rules[0].id, Some(7));
        assert_eq!(entry.config.rules[0].channels[0].id, Some(9));
        assert!(!plan.has_changes());
    }

    #[test]
    fn test_changed_param_value_plans_update() {
        let mut config = declared("mainnet-watch");
        config.params = Some(r#"{"severity": 50}"#.to_string());
        let manifest = Manifest {
            monitors: vec![config],
        };
        let state = state_with(vec![("mainnet-watch", tracked("mainnet-watch", 42))]);

        let plan = plan(&manifest, &state);
        let entry = &plan.monitors[0];
        assert_eq!(entry.action, Action::Update);
        assert!(entry.changes.iter().any(|c| c.field == "params"));
        // A mismatching tree is sent as declared.
        assert_eq!(entry.config.params.as_deref(), Some(r#"{"severity": 50}"#));
    }

    #[test]
    fn test_unparseable_declared_params_kept_verbatim() {
        let mut config = declared("mainnet-watch");
        config.params = Some("{broken".to_string());
        let manifest = Manifest {
            monitors: vec![config],
        };
        let state = state_with(vec![("mainnet-watch", tracked("mainnet-watch", 42))]);

        let plan = plan(&manifest, &state);
        assert_eq!(plan.monitors[0].config.params.as_deref(), Some("{broken"));
        assert_eq!(plan.monitors[0].action, Action::Update);
    }

    #[test]
    fn test_undeclared_tracked_monitor_is_removed() {
        let manifest = Manifest { monitors: vec![] };
        let state = state_with(vec![("old-watch", tracked("old-watch", 13))]);

        let plan = plan(&manifest, &state);
        assert!(plan.monitors.is_empty());
        assert_eq!(plan.removals.len(), 1);
        assert_eq!(plan.removals[0].0, "old-watch");
        assert!(plan.has_changes());
    }

    #[test]
    fn test_renamed_rule_loses_identifier() {
        let mut config = declared("mainnet-watch");
        config.rules[0].name = "page-backup".to_string();
        let manifest = Manifest {
            monitors: vec![config],
        };
        let state = state_with(vec![("mainnet-watch", tracked("mainnet-watch", 42))]);

        let plan = plan(&manifest, &state);
        let entry = &plan.monitors[0];
        assert_eq!(entry.config.rules[0].id, None);
        assert_eq!(entry.action, Action::Update);
    }
}
