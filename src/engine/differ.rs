//! Field-level diff between declared and recorded monitors.

use reconcile::{OrderPolicy, is_subset, sequences_equal};

use crate::manifest::{ChannelConfig, MonitorConfig, RuleConfig};

/// One displayed change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldChange {
    pub field: String,
    pub from: String,
    pub to: String,
}

impl FieldChange {
    fn new(field: impl Into<String>, from: impl ToString, to: impl ToString) -> Self {
        Self {
            field: field.into(),
            from: from.to_string(),
            to: to.to_string(),
        }
    }
}

/// Compare a declared monitor (identifiers and params already merged)
/// against its recorded state. Empty output means nothing to do.
pub fn diff_monitor(declared: &MonitorConfig, recorded: &MonitorConfig) -> Vec<FieldChange> {
    let mut changes = Vec::new();

    if declared.monitor_id != recorded.monitor_id {
        changes.push(FieldChange::new(
            "monitor_id",
            display_opt(&recorded.monitor_id),
            display_opt(&declared.monitor_id),
        ));
    }
    if declared.description != recorded.description {
        changes.push(FieldChange::new(
            "description",
            recorded.description.as_deref().unwrap_or("(none)"),
            declared.description.as_deref().unwrap_or("(none)"),
        ));
    }
    if declared.disabled != recorded.disabled {
        changes.push(FieldChange::new(
            "disabled",
            recorded.disabled,
            declared.disabled,
        ));
    }
    if !params_equal(declared.params.as_deref(), recorded.params.as_deref()) {
        changes.push(FieldChange::new(
            "params",
            recorded.params.as_deref().unwrap_or("(none)"),
            declared.params.as_deref().unwrap_or("(none)"),
        ));
    }

    diff_entities(declared, recorded, &mut changes);
    diff_rules(declared, recorded, &mut changes);

    changes
}

fn diff_entities(declared: &MonitorConfig, recorded: &MonitorConfig, changes: &mut Vec<FieldChange>) {
    if declared.entities.len() != recorded.entities.len() {
        changes.push(FieldChange::new(
            "entities",
            format!("{} entities", recorded.entities.len()),
            format!("{} entities", declared.entities.len()),
        ));
        return;
    }

    for (index, (new, old)) in declared.entities.iter().zip(&recorded.entities).enumerate() {
        if new.entity_type != old.entity_type {
            changes.push(FieldChange::new(
                format!("entities[{index}].entity_type"),
                old.entity_type,
                new.entity_type,
            ));
        }
        if !params_equal(Some(&new.params), Some(&old.params)) {
            changes.push(FieldChange::new(
                format!("entities[{index}].params"),
                &old.params,
                &new.params,
            ));
        }
    }
}

fn diff_rules(declared: &MonitorConfig, recorded: &MonitorConfig, changes: &mut Vec<FieldChange>) {
    for rule in &declared.rules {
        match recorded.rules.iter().find(|r| r.name == rule.name) {
            None => changes.push(FieldChange::new(
                format!("rules.{}", rule.name),
                "(absent)",
                "(added)",
            )),
            Some(old) => diff_rule(rule, old, changes),
        }
    }

    for old in &recorded.rules {
        if !declared.rules.iter().any(|r| r.name == old.name) {
            changes.push(FieldChange::new(
                format!("rules.{}", old.name),
                "(present)",
                "(removed)",
            ));
        }
    }
}

fn diff_rule(declared: &RuleConfig, recorded: &RuleConfig, changes: &mut Vec<FieldChange>) {
    let prefix = format!("rules.{}", declared.name);

    if declared.rule_type != recorded.rule_type {
        changes.push(FieldChange::new(
            format!("{prefix}.type"),
            &recorded.rule_type,
            &declared.rule_type,
        ));
    }
    if declared.threshold != recorded.threshold {
        changes.push(FieldChange::new(
            format!("{prefix}.threshold"),
            recorded.threshold,
            declared.threshold,
        ));
    }
    if declared.notification_period != recorded.notification_period {
        changes.push(FieldChange::new(
            format!("{prefix}.notification_period"),
            display_opt(&recorded.notification_period),
            display_opt(&declared.notification_period),
        ));
    }
    // Category order is meaningful and compared as declared.
    if !sequences_equal(&declared.categories, &recorded.categories, OrderPolicy::Ordered) {
        changes.push(FieldChange::new(
            format!("{prefix}.categories"),
            format!("{:?}", recorded.categories),
            format!("{:?}", declared.categories),
        ));
    }

    diff_channels(&prefix, &declared.channels, &recorded.channels, changes);
}

fn diff_channels(
    prefix: &str,
    declared: &[ChannelConfig],
    recorded: &[ChannelConfig],
    changes: &mut Vec<FieldChange>,
) {
    // Channel order carries no meaning, so membership is compared by
    // name before individual channels are inspected.
    let declared_names: Vec<&str> = declared.iter().map(|c| c.name.as_str()).collect();
    let recorded_names: Vec<&str> = recorded.iter().map(|c| c.name.as_str()).collect();
    if !sequences_equal(&declared_names, &recorded_names, OrderPolicy::Unordered) {
        changes.push(FieldChange::new(
            format!("{prefix}.channels"),
            format!("{recorded_names:?}"),
            format!("{declared_names:?}"),
        ));
        return;
    }

    for channel in declared {
        let Some(old) = recorded.iter().find(|c| c.name == channel.name) else {
            continue;
        };
        if !params_equal(Some(&channel.params), Some(&old.params)) {
            changes.push(FieldChange::new(
                format!("{prefix}.channels.{}.params", channel.name),
                &old.params,
                &channel.params,
            ));
        }
    }
}

/// Compare two params texts structurally. Mutual containment rather
/// than normalized-text equality, so numeric re-encoding (30 vs 30.0)
/// does not register as a change. Falls back to raw text when either
/// side fails to decode.
fn params_equal(a: Option<&str>, b: Option<&str>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => match (reconcile::decode(a), reconcile::decode(b)) {
            (Ok(a), Ok(b)) => is_subset(&a, &b) && is_subset(&b, &a),
            _ => a == b,
        },
        _ => false,
    }
}

fn display_opt(value: &Option<i64>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "(none)".to_string(),
    }
}
