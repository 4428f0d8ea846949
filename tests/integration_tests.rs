//! Integration tests for zonewall
//!
//! These tests drive the editor end to end with the JSON payloads the
//! router actually sends: overview snapshots, rule-set details, and
//! response envelopes. No network is involved; fixtures stand in for the
//! router's side of every exchange.

#![allow(clippy::uninlined_format_args)]

use zonewall::api::{unwrap_envelope, Envelope};
use zonewall::core::codec::FieldValue;
use zonewall::core::editor::{EditorState, Selection};
use zonewall::core::ruleset::{Rule, RuleSetDetail, ZoneSnapshot};

fn overview_fixture() -> ZoneSnapshot {
    serde_json::from_value(serde_json::json!({
        "zones": ["LAN", "WAN", "DMZ"],
        "zoneGroups": {
            "LAN": [
                {"name": "LAN_TO_WAN", "destination": "WAN"},
                {"name": "LAN_TO_DMZ", "destination": "DMZ"}
            ],
            "DMZ": [
                {"name": "DMZ_TO_WAN", "destination": "WAN"}
            ],
            "WAN": []
        },
        "metadata": {
            "LAN_TO_WAN": {
                "description": "Outbound browsing",
                "default_action": "drop",
                "source_zone": "LAN",
                "destination_zone": "WAN"
            }
        },
        "names": ["LAN_TO_WAN", "LAN_TO_DMZ", "DMZ_TO_WAN"],
        "interfaces": {"unassigned": ["eth3", "eth2"]},
        "selectedZone": "LAN",
        "selectedFirewall": "LAN_TO_WAN"
    }))
    .expect("overview fixture deserializes")
}

fn detail_fixture() -> RuleSetDetail {
    serde_json::from_value(serde_json::json!({
        "metadata": {
            "description": "Outbound browsing",
            "source_zone": "LAN",
            "destination_zone": "WAN"
        },
        "rules": [
            {
                "number": 10,
                "action": "accept",
                "protocol": "tcp",
                "destination_port": "443",
                "description": "HTTPS"
            },
            {
                "number": "20",
                "action": "accept",
                "protocol": "tcp_udp",
                "source": "[group:network-group:LAN_NETS]",
                "destination_port": "53"
            },
            {
                "number": 30,
                "action": "drop",
                "source": "any",
                "disabled": true
            }
        ]
    }))
    .expect("detail fixture deserializes")
}

#[test]
fn overview_then_detail_populates_the_editor() {
    let mut editor = EditorState::new();

    let request = editor
        .apply_zone_update(overview_fixture())
        .expect("snapshot selects a rule set");
    assert_eq!(request.name, "LAN_TO_WAN");
    assert_eq!(editor.selected_zone.as_deref(), Some("LAN"));
    // Membership entries are ordered by destination zone
    let refs = editor.refs_for("LAN");
    assert_eq!(refs[0].destination, "DMZ");
    assert_eq!(refs[1].destination, "WAN");
    // Unassigned interfaces come back sorted
    assert_eq!(editor.interfaces.unassigned, vec!["eth2", "eth3"]);

    editor.apply_detail("LAN_TO_WAN", detail_fixture());
    let rules = editor.store.rules();
    assert_eq!(rules.len(), 3);
    assert_eq!(rules[0].id, "10");
    // String and integer numbers normalize the same way
    assert_eq!(rules[1].id, "20");
    assert!(rules[2].disabled);

    // The codec decoded fields exactly once
    assert!(matches!(rules[1].source, FieldValue::Group(ref g) if g.name == "LAN_NETS"));
    assert_eq!(rules[0].destination_port, FieldValue::Literal("443".into()));
    assert!(rules[2].source.is_any());
}

#[test]
fn reorder_blocks_navigation_until_committed_or_discarded() {
    let mut editor = EditorState::new();
    editor.apply_zone_update(overview_fixture());
    editor.apply_detail("LAN_TO_WAN", detail_fixture());

    assert!(editor.store.move_rule(2, 0));
    assert!(editor.store.is_dirty());
    assert_eq!(editor.store.order_ids(), vec!["30", "10", "20"]);
    // The saved order is untouched until a commit round-trips
    assert_eq!(editor.store.baseline()[0].id, "10");

    // Navigation is rejected while the order is pending
    assert!(editor.select_zone("DMZ").is_err());
    assert!(editor.select_rule_set("LAN_TO_DMZ", "LAN").is_err());

    // A successful commit returns the renumbered detail, clearing the flag
    let committed: RuleSetDetail = serde_json::from_value(serde_json::json!({
        "metadata": {"source_zone": "LAN", "destination_zone": "WAN"},
        "rules": [
            {"number": 10, "action": "drop", "source": "any", "disabled": true},
            {"number": 20, "action": "accept", "protocol": "tcp", "destination_port": "443"},
            {"number": 30, "action": "accept", "protocol": "tcp_udp", "destination_port": "53"}
        ]
    }))
    .unwrap();
    editor.apply_detail("LAN_TO_WAN", committed);
    assert!(!editor.store.is_dirty());
    assert_eq!(editor.store.rules()[0].id, "10");

    // And navigation works again
    let selection = editor.select_zone("DMZ").unwrap();
    assert!(matches!(selection, Selection::Fetch(ref r) if r.name == "DMZ_TO_WAN"));
}

#[test]
fn discard_restores_the_saved_order() {
    let mut editor = EditorState::new();
    editor.apply_zone_update(overview_fixture());
    editor.apply_detail("LAN_TO_WAN", detail_fixture());

    editor.store.move_rule(0, 2);
    assert!(editor.store.is_dirty());
    editor.store.discard();
    assert!(!editor.store.is_dirty());
    assert_eq!(editor.store.order_ids(), vec!["10", "20", "30"]);
}

#[test]
fn stale_detail_responses_are_detectable() {
    let mut editor = EditorState::new();
    editor.apply_zone_update(overview_fixture());

    let first = editor.select_rule_set("LAN_TO_WAN", "LAN").unwrap();
    let second = editor.select_rule_set("LAN_TO_DMZ", "LAN").unwrap();

    assert!(!editor.fetch_is_current(first.token));
    assert!(editor.fetch_is_current(second.token));
}

#[test]
fn zone_refresh_drops_a_deleted_selection() {
    let mut editor = EditorState::new();
    editor.apply_zone_update(overview_fixture());
    editor.apply_detail("LAN_TO_WAN", detail_fixture());

    // The router deleted LAN_TO_WAN; the refresh falls back to a survivor
    let refreshed: ZoneSnapshot = serde_json::from_value(serde_json::json!({
        "zones": ["LAN", "WAN"],
        "zoneGroups": {
            "LAN": [{"name": "LAN_TO_DMZ", "destination": "DMZ"}],
            "WAN": []
        },
        "names": ["LAN_TO_DMZ"],
        "interfaces": {"unassigned": []}
    }))
    .unwrap();
    let request = editor.apply_zone_update(refreshed).expect("fallback fetch");
    assert_eq!(request.name, "LAN_TO_DMZ");
    assert!(editor.store.is_empty());
}

#[test]
fn envelope_unwrap_matches_router_semantics() {
    let ok: Envelope<serde_json::Value> = serde_json::from_value(serde_json::json!({
        "status": "ok",
        "data": {"zones": []}
    }))
    .unwrap();
    assert!(unwrap_envelope(ok).is_ok());

    let err: Envelope<serde_json::Value> = serde_json::from_value(serde_json::json!({
        "status": "error",
        "message": "zone WAN is still referenced"
    }))
    .unwrap();
    let error = unwrap_envelope(err).unwrap_err();
    assert!(error.to_string().contains("still referenced"));

    // ok status without a payload is still an error
    let empty: Envelope<serde_json::Value> =
        serde_json::from_value(serde_json::json!({"status": "ok"})).unwrap();
    assert!(unwrap_envelope(empty).is_err());
}

#[test]
fn wire_rules_decode_without_optional_fields() {
    let detail: RuleSetDetail =
        serde_json::from_value(serde_json::json!({"rules": [{"number": 5}]})).unwrap();
    let rule = Rule::from_wire(detail.rules[0].clone());
    assert_eq!(rule.id, "5");
    assert!(rule.action.is_none());
    assert!(rule.source.is_any());
    assert!(!rule.disabled);
}
