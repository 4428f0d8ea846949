//! Rule-set data model and wire payload shapes
//!
//! A rule-set is a named, ordered list of rules evaluated between a source
//! and destination zone. The router is the single source of truth: every
//! mutating call returns the full rule-set detail, which wholesale-replaces
//! local state (see [`crate::core::editor`]).
//!
//! # Identity
//!
//! The displayed rule number *is* the identifier; there is no surrogate
//! key. Numbers arrive from the router as integers or strings and are
//! normalized to strings on load.

use crate::core::codec::FieldValue;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// What happens when a packet matches a rule
#[derive(
    Debug,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    PartialEq,
    Eq,
    Default,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Accept the packet (allow it through)
    #[default]
    #[strum(serialize = "accept")]
    Accept,
    /// Drop the packet silently (no response sent)
    #[strum(serialize = "drop")]
    Drop,
    /// Reject the packet and send an ICMP unreachable response
    #[strum(serialize = "reject")]
    Reject,
}

impl Action {
    pub const fn as_str(self) -> &'static str {
        match self {
            Action::Accept => "accept",
            Action::Drop => "drop",
            Action::Reject => "reject",
        }
    }

    pub const fn display_name(self) -> &'static str {
        match self {
            Action::Accept => "Accept",
            Action::Drop => "Drop",
            Action::Reject => "Reject",
        }
    }
}

/// Normalizes a zone name the way the router keys them: trimmed, uppercase.
pub fn normalize_zone(zone: &str) -> String {
    zone.trim().to_ascii_uppercase()
}

/// A single firewall rule as the editor sees it
///
/// `source`/`destination` and the two port fields are decoded into
/// [`FieldValue`] exactly once, on load; nothing downstream re-inspects raw
/// strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    /// Stringified rule number; doubles as the identifier
    pub id: String,
    /// Action, or `None` when the rule has no action set (fallback display)
    pub action: Option<Action>,
    /// Literal protocol name; empty/"any"/"all" means unrestricted
    pub protocol: String,
    pub source: FieldValue,
    pub source_port: FieldValue,
    pub destination: FieldValue,
    pub destination_port: FieldValue,
    pub disabled: bool,
    pub description: Option<String>,
}

impl Rule {
    /// Builds the domain rule from its wire form, normalizing the number to
    /// a string id and decoding each endpoint/port field.
    pub fn from_wire(wire: RuleWire) -> Self {
        let id = wire.number_string();
        Self {
            id,
            action: wire
                .action
                .as_deref()
                .and_then(|a| Action::from_str(a.trim()).ok()),
            protocol: wire.protocol.unwrap_or_default().trim().to_string(),
            source: FieldValue::decode(wire.source.as_deref().unwrap_or_default()),
            source_port: FieldValue::decode(wire.source_port.as_deref().unwrap_or_default()),
            destination: FieldValue::decode(wire.destination.as_deref().unwrap_or_default()),
            destination_port: FieldValue::decode(
                wire.destination_port.as_deref().unwrap_or_default(),
            ),
            disabled: wire.disabled,
            description: wire.description.filter(|d| !d.trim().is_empty()),
        }
    }

    /// Numeric value of the id, when it parses.
    pub fn number(&self) -> Option<u32> {
        self.id.parse().ok()
    }
}

/// Rule as serialized by the router in detail payloads
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RuleWire {
    /// Integer or string on the wire; normalized via [`RuleWire::number_string`]
    pub number: serde_json::Value,
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub protocol: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub source_port: Option<String>,
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default)]
    pub destination_port: Option<String>,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default)]
    pub description: Option<String>,
}

impl RuleWire {
    fn number_string(&self) -> String {
        match &self.number {
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Number(n) => n.to_string(),
            other => other.to_string(),
        }
    }
}

/// Descriptive, non-ordered data about one rule-set
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct RuleSetMetadata {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub default_action: Option<String>,
    #[serde(default)]
    pub source_zone: Option<String>,
    #[serde(default)]
    pub destination_zone: Option<String>,
    #[serde(default)]
    pub zone_label: Option<String>,
}

/// A rule-set name paired with its destination zone, as listed inside a
/// zone's membership
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RuleSetRef {
    pub name: String,
    #[serde(default)]
    pub destination: String,
}

/// Sorts membership entries by destination zone, tie-broken by name.
///
/// Every reconciliation reproduces this ordering; it keeps sidebar lists
/// deterministic across refreshes.
pub fn sort_rule_set_refs(refs: &mut [RuleSetRef]) {
    refs.sort_by(|a, b| {
        a.destination
            .cmp(&b.destination)
            .then_with(|| a.name.cmp(&b.name))
    });
}

/// Full rule-set detail as returned by every fetch and every mutating call
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RuleSetDetail {
    #[serde(default)]
    pub metadata: RuleSetMetadata,
    #[serde(default)]
    pub rules: Vec<RuleWire>,
}

/// Interface inventory inside a zone snapshot
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct InterfaceInventory {
    #[serde(default)]
    pub unassigned: Vec<String>,
}

/// Full zone overview snapshot, returned by zone-scoped mutations
///
/// Replaces the zone directory wholesale; nothing is patched in place.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ZoneSnapshot {
    #[serde(default)]
    pub zones: Vec<String>,
    #[serde(default, rename = "zoneGroups")]
    pub zone_groups: BTreeMap<String, Vec<RuleSetRef>>,
    #[serde(default)]
    pub metadata: BTreeMap<String, RuleSetMetadata>,
    #[serde(default)]
    pub names: Vec<String>,
    #[serde(default)]
    pub interfaces: InterfaceInventory,
    #[serde(default, rename = "selectedZone")]
    pub selected_zone: Option<String>,
    #[serde(default, rename = "selectedFirewall")]
    pub selected_firewall: Option<String>,
}

/// Rule fields sent on create and update, after codec normalization
///
/// Uses the camelCase keys the rules API expects. Group-backed fields carry
/// their `[group:<type>:<name>]` encoding in the value plus a `"group"`
/// marker so the server skips literal validation for them.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RulePayload {
    pub number: String,
    pub action: Action,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_port: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_port: Option<String>,
    pub disabled: bool,
    /// Present on update only: the number the rule had before editing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_address_type: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_port_type: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_address_type: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_port_type: Option<&'static str>,
}
