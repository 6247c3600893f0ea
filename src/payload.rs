//! Translation from declared configuration to the wire payload.

use anyhow::{Context, Result};

use crate::manifest::MonitorConfig;
use vigilapi::{Channel, Entity, MonitorPayload, MonitorRule};

/// Build the create/update payload for a declared monitor.
///
/// Params fields hold JSON text in the manifest and decoded trees on
/// the wire. Validation has already checked these strings, so a decode
/// failure here means the manifest changed underneath us and is fatal.
pub fn monitor_payload(config: &MonitorConfig, id: Option<i64>) -> Result<MonitorPayload> {
    let mut payload = MonitorPayload::new(&config.name);
    payload.id = id;
    payload.monitor_id = config.monitor_id;
    payload.description = config.description.clone();
    payload.disabled = config.disabled;

    if let Some(params) = &config.params {
        payload.params = Some(
            reconcile::decode(params)
                .with_context(|| format!("monitor '{}': invalid params", config.name))?,
        );
    }

    for entity in &config.entities {
        payload.entities.push(Entity {
            entity_type: entity.entity_type,
            params: reconcile::decode(&entity.params).with_context(|| {
                format!("monitor '{}': invalid entity params", config.name)
            })?,
        });
    }

    for rule in &config.rules {
        let mut channels = Vec::with_capacity(rule.channels.len());
        for channel in &rule.channels {
            channels.push(Channel {
                id: channel.id,
                name: channel.name.clone(),
                params: reconcile::decode(&channel.params).with_context(|| {
                    format!(
                        "monitor '{}': rule '{}': channel '{}': invalid params",
                        config.name, rule.name, channel.name
                    )
                })?,
            });
        }

        payload.monitor_rules.push(MonitorRule {
            id: rule.id,
            name: rule.name.clone(),
            rule_type: rule.rule_type.clone(),
            threshold: rule.threshold,
            notification_period: rule.notification_period,
            categories: rule.categories.clone(),
            channels,
        });
    }

    Ok(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::{ChannelConfig, EntityConfig, RuleConfig};
    use serde_json::json;

    fn config_fixture() -> MonitorConfig {
        MonitorConfig {
            name: "mainnet-watch".to_string(),
            monitor_id: Some(4),
            description: Some("watch the bridge".to_string()),
            disabled: false,
            entities: vec![EntityConfig {
                entity_type: 2,
                params: r#"{"address": "0xabc"}"#.to_string(),
            }],
            rules: vec![RuleConfig {
                id: Some(7),
                name: "page-oncall".to_string(),
                rule_type: "notification".to_string(),
                threshold: 30,
                notification_period: None,
                categories: vec![1, 3],
                channels: vec![ChannelConfig {
                    id: None,
                    name: "slack".to_string(),
                    params: r#"{"url": "https://hooks"}"#.to_string(),
                }],
            }],
            params: Some(r#"{"severity": 30}"#.to_string()),
        }
    }

    #[test]
    fn test_payload_translates_config() {
        let payload = monitor_payload(&config_fixture(), Some(42)).unwrap();
        assert_eq!(payload.id, Some(42));
        assert_eq!(payload.name, "mainnet-watch");
        assert_eq!(payload.monitor_id, Some(4));
        assert_eq!(payload.params, Some(json!({"severity": 30})));
        assert_eq!(payload.entities[0].params, json!({"address": "0xabc"}));
        assert_eq!(payload.monitor_rules[0].id, Some(7));
        assert_eq!(payload.monitor_rules[0].channels[0].id, None);
        // Always present, always empty.
        assert!(payload.wallets.is_empty());
        assert!(payload.monitor_tags.is_empty());
        assert!(payload.entities_tags.is_empty());
    }

    #[test]
    fn test_payload_without_id_omits_it() {
        let payload = monitor_payload(&config_fixture(), None).unwrap();
        assert_eq!(payload.id, None);
        let encoded = serde_json::to_value(&payload).unwrap();
        assert!(encoded.get("id").is_none());
    }

    #[test]
    fn test_payload_rejects_invalid_params() {
        let mut config = config_fixture();
        config.params = Some("{not json".to_string());
        let err = monitor_payload(&config, None).unwrap_err();
        assert!(err.to_string().contains("mainnet-watch"));
    }
}
