//! Shared test utilities for core module tests
//!
//! Builders for the wire payloads the router would send, so tests read as
//! scenarios instead of JSON noise. Only compiled in test mode.

use crate::core::ruleset::{
    Action, Rule, RuleSetDetail, RuleSetMetadata, RuleSetRef, RuleWire, ZoneSnapshot,
};

/// A decoded accept rule with the given id and description.
pub fn make_rule(id: &str, description: &str) -> Rule {
    Rule {
        id: id.to_string(),
        action: Some(Action::Accept),
        protocol: String::new(),
        source: crate::core::codec::FieldValue::Any,
        source_port: crate::core::codec::FieldValue::Any,
        destination: crate::core::codec::FieldValue::Any,
        destination_port: crate::core::codec::FieldValue::Any,
        disabled: false,
        description: (!description.is_empty()).then(|| description.to_string()),
    }
}

/// A plain accept-all wire rule with the given number.
pub fn wire_rule(number: u32) -> RuleWire {
    RuleWire {
        number: serde_json::Value::from(number),
        action: Some("accept".to_string()),
        protocol: None,
        source: None,
        source_port: None,
        destination: None,
        destination_port: None,
        disabled: false,
        description: None,
    }
}

/// Detail payload containing rules with the given numbers, no metadata.
pub fn detail_with_numbers(numbers: &[u32]) -> RuleSetDetail {
    RuleSetDetail {
        metadata: RuleSetMetadata::default(),
        rules: numbers.iter().copied().map(wire_rule).collect(),
    }
}

/// Detail payload with source/destination zones set in the metadata.
pub fn detail_with_zones(source: &str, destination: &str, numbers: &[u32]) -> RuleSetDetail {
    RuleSetDetail {
        metadata: RuleSetMetadata {
            source_zone: Some(source.to_string()),
            destination_zone: Some(destination.to_string()),
            zone_label: Some(format!("{source} -> {destination}")),
            ..RuleSetMetadata::default()
        },
        rules: numbers.iter().copied().map(wire_rule).collect(),
    }
}

/// Zone snapshot from a compact (zone, members) description.
pub fn zone_snapshot(zones: &[(&str, &[(&str, &str)])]) -> ZoneSnapshot {
    let mut snapshot = ZoneSnapshot::default();
    for (zone, members) in zones {
        snapshot.zones.push((*zone).to_string());
        let refs: Vec<RuleSetRef> = members
            .iter()
            .map(|(name, destination)| RuleSetRef {
                name: (*name).to_string(),
                destination: (*destination).to_string(),
            })
            .collect();
        for r in &refs {
            snapshot.names.push(r.name.clone());
            snapshot.metadata.insert(
                r.name.clone(),
                RuleSetMetadata {
                    source_zone: Some((*zone).to_string()),
                    destination_zone: Some(r.destination.clone()),
                    ..RuleSetMetadata::default()
                },
            );
        }
        snapshot.zone_groups.insert((*zone).to_string(), refs);
    }
    snapshot
}
