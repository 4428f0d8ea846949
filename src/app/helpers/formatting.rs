//! Text formatting utilities for UI display

use crate::core::codec::FieldValue;
use crate::core::ruleset::{Rule, RuleSetMetadata};

/// Builds the header label for a rule set from its metadata.
///
/// Prefers the router-provided zone label, then a "source → destination"
/// pair, then the raw rule-set name.
pub fn zone_pair_label(metadata: Option<&RuleSetMetadata>, name: &str) -> String {
    if let Some(meta) = metadata {
        if let Some(label) = meta.zone_label.as_deref().filter(|l| !l.trim().is_empty()) {
            return label.to_string();
        }
        if let (Some(source), Some(destination)) =
            (meta.source_zone.as_deref(), meta.destination_zone.as_deref())
        {
            if !source.is_empty() && !destination.is_empty() {
                return format!("{source} \u{2192} {destination}");
            }
        }
    }
    name.to_string()
}

/// Combines an address field and its port field into one table cell.
///
/// "Any" addresses with a concrete port render as just the port
/// (e.g. "port 443") to match how the router console shows them.
pub fn rule_endpoint_label(address: &FieldValue, port: &FieldValue) -> String {
    match (address.is_any(), port.is_any()) {
        (true, true) => "Any".to_string(),
        (true, false) => format!("port {}", port.display()),
        (false, true) => address.display(),
        (false, false) => format!("{} : {}", address.display(), port.display()),
    }
}

/// Renders the difference between the saved rule order and the working
/// order as a unified-diff style listing for the commit confirmation.
///
/// Each rule becomes one line of "number  description"; moved rules show
/// up as a remove/insert pair.
pub fn order_diff(baseline: &[Rule], working: &[Rule]) -> String {
    let render = |rules: &[Rule]| {
        rules
            .iter()
            .map(|r| {
                format!(
                    "{}  {}\n",
                    r.id,
                    r.description.as_deref().unwrap_or_default()
                )
            })
            .collect::<String>()
    };
    let old_text = render(baseline);
    let new_text = render(working);

    let diff = similar::TextDiff::from_lines(&old_text, &new_text);
    let mut out = String::new();
    for change in diff.iter_all_changes() {
        let prefix = match change.tag() {
            similar::ChangeTag::Delete => "- ",
            similar::ChangeTag::Insert => "+ ",
            similar::ChangeTag::Equal => "  ",
        };
        out.push_str(prefix);
        out.push_str(change.value());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::test_helpers::make_rule;

    #[test]
    fn test_zone_pair_label_prefers_router_label() {
        let meta = RuleSetMetadata {
            zone_label: Some("LAN to WAN".to_string()),
            source_zone: Some("lan".to_string()),
            destination_zone: Some("wan".to_string()),
            ..Default::default()
        };
        assert_eq!(zone_pair_label(Some(&meta), "lan-wan"), "LAN to WAN");
    }

    #[test]
    fn test_zone_pair_label_builds_pair() {
        let meta = RuleSetMetadata {
            source_zone: Some("lan".to_string()),
            destination_zone: Some("wan".to_string()),
            ..Default::default()
        };
        assert_eq!(zone_pair_label(Some(&meta), "lan-wan"), "lan \u{2192} wan");
    }

    #[test]
    fn test_zone_pair_label_falls_back_to_name() {
        assert_eq!(zone_pair_label(None, "lan-wan"), "lan-wan");
        let empty = RuleSetMetadata::default();
        assert_eq!(zone_pair_label(Some(&empty), "lan-wan"), "lan-wan");
    }

    #[test]
    fn test_endpoint_label_variants() {
        let any = FieldValue::Any;
        let addr = FieldValue::Literal("10.0.0.0/8".to_string());
        let port = FieldValue::Literal("443".to_string());
        assert_eq!(rule_endpoint_label(&any, &any), "Any");
        assert_eq!(rule_endpoint_label(&any, &port), "port 443");
        assert_eq!(rule_endpoint_label(&addr, &any), "10.0.0.0/8");
        assert_eq!(rule_endpoint_label(&addr, &port), "10.0.0.0/8 : 443");
    }

    #[test]
    fn test_order_diff_identical_orders() {
        let rules = vec![make_rule("10", "ssh"), make_rule("20", "web")];
        let diff = order_diff(&rules, &rules);
        assert!(diff.lines().all(|l| l.starts_with("  ")));
    }

    #[test]
    fn test_order_diff_marks_moved_rule() {
        let baseline = vec![make_rule("10", "ssh"), make_rule("20", "web")];
        let working = vec![make_rule("20", "web"), make_rule("10", "ssh")];
        let diff = order_diff(&baseline, &working);
        assert!(diff.lines().any(|l| l.starts_with('-')));
        assert!(diff.lines().any(|l| l.starts_with('+')));
    }
}
