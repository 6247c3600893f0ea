//! Wire types for the monitor API.
//!
//! Params payloads stay as raw [`serde_json::Value`] trees: their shape
//! depends on the monitor/channel type and the service is free to
//! enrich them with computed fields.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A monitor as the service returns it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Monitor {
    /// Server-assigned identifier, stable for the monitor's lifetime.
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub monitor_id: Option<i64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default)]
    pub entities: Vec<Entity>,
    #[serde(default)]
    pub monitor_rules: Vec<MonitorRule>,
    #[serde(default)]
    pub params: Option<Value>,
    // Remote-assigned metadata, read-only.
    #[serde(default)]
    pub created_by: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// A monitored target: a numeric type tag plus a tag-dependent payload.
///
/// Entities carry no identifier of their own; the whole list is
/// replaced on every update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub entity_type: i64,
    pub params: Value,
}

/// A notification rule attached to a monitor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitorRule {
    /// Present after at least one successful round-trip; omitted from
    /// outbound payloads for rules the server has not seen yet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    #[serde(rename = "type")]
    pub rule_type: String,
    pub threshold: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification_period: Option<i64>,
    #[serde(default)]
    pub categories: Vec<i64>,
    #[serde(default)]
    pub channels: Vec<Channel>,
}

/// A notification destination within a rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    pub params: Value,
}

/// Outbound monitor payload for create and update calls.
///
/// The service requires the tag arrays to be present even when empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonitorPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monitor_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub disabled: bool,
    pub entities: Vec<Entity>,
    pub monitor_rules: Vec<MonitorRule>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
    pub wallets: Vec<Value>,
    pub monitor_tags: Vec<String>,
    pub entities_tags: Vec<Value>,
}

impl MonitorPayload {
    /// An empty payload for the given monitor name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            monitor_id: None,
            description: None,
            disabled: false,
            entities: Vec::new(),
            monitor_rules: Vec::new(),
            params: None,
            wallets: Vec::new(),
            monitor_tags: Vec::new(),
            entities_tags: Vec::new(),
        }
    }
}

/// Body of a successful create call.
#[derive(Debug, Deserialize)]
pub(crate) struct CreateResponse {
    pub id: i64,
}

/// Body of the collection listing.
#[derive(Debug, Deserialize)]
pub(crate) struct ListResponse {
    #[serde(default)]
    pub items: Vec<Monitor>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_monitor_deserialization() {
        let monitor: Monitor = serde_json::from_value(json!({
            "id": 42,
            "name": "mainnet-watch",
            "monitor_id": 4,
            "disabled": false,
            "entities": [{"entity_type": 2, "params": {"address": "0xabc"}}],
            "monitor_rules": [{
                "id": 7,
                "name": "page-oncall",
                "type": "notification",
                "threshold": 30,
                "categories": [1, 3],
                "channels": [{"id": 9, "name": "slack", "params": {"url": "https://hooks"}}]
            }],
            "params": {"severity": 30},
            "created_by": "ops@example.com",
            "created_at": "2024-01-15T00:00:00Z",
            "updated_at": "2024-02-01T00:00:00Z"
        }))
        .unwrap();

        assert_eq!(monitor.id, 42);
        assert_eq!(monitor.monitor_rules.len(), 1);
        assert_eq!(monitor.monitor_rules[0].rule_type, "notification");
        assert_eq!(monitor.monitor_rules[0].channels[0].id, Some(9));
    }

    #[test]
    fn test_monitor_deserialization_missing_optionals() {
        let monitor: Monitor =
            serde_json::from_value(json!({"id": 1, "name": "bare"})).unwrap();
        assert_eq!(monitor.monitor_id, None);
        assert!(monitor.entities.is_empty());
        assert!(monitor.monitor_rules.is_empty());
        assert_eq!(monitor.params, None);
    }

    #[test]
    fn test_payload_omits_absent_ids() {
        let mut payload = MonitorPayload::new("m");
        payload.monitor_rules.push(MonitorRule {
            id: None,
            name: "r".into(),
            rule_type: "notification".into(),
            threshold: 10,
            notification_period: None,
            categories: vec![1],
            channels: vec![Channel {
                id: None,
                name: "c".into(),
                params: json!({}),
            }],
        });

        let encoded = serde_json::to_value(&payload).unwrap();
        assert!(encoded.get("id").is_none());
        assert!(encoded["monitor_rules"][0].get("id").is_none());
        assert!(encoded["monitor_rules"][0].get("notification_period").is_none());
        assert!(encoded["monitor_rules"][0]["channels"][0].get("id").is_none());
    }

    #[test]
    fn test_payload_keeps_assigned_ids() {
        let mut payload = MonitorPayload::new("m");
        payload.id = Some(5);
        payload.monitor_rules.push(MonitorRule {
            id: Some(7),
            name: "r".into(),
            rule_type: "notification".into(),
            threshold: 50,
            notification_period: Some(3600),
            categories: vec![],
            channels: vec![],
        });

        let encoded = serde_json::to_value(&payload).unwrap();
        assert_eq!(encoded["id"], json!(5));
        assert_eq!(encoded["monitor_rules"][0]["id"], json!(7));
        assert_eq!(encoded["monitor_rules"][0]["type"], json!("notification"));
        assert_eq!(encoded["monitor_rules"][0]["notification_period"], json!(3600));
    }

    #[test]
    fn test_payload_always_carries_tag_arrays() {
        let encoded = serde_json::to_value(MonitorPayload::new("m")).unwrap();
        assert_eq!(encoded["wallets"], json!([]));
        assert_eq!(encoded["monitor_tags"], json!([]));
        assert_eq!(encoded["entities_tags"], json!([]));
    }
}
