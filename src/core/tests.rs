#[cfg(test)]
mod cross_module {
    use crate::core::codec::{FieldValue, GroupRef, GroupType};
    use crate::core::editor::{EditorState, Selection};
    use crate::core::ruleset::RuleSetDetail;
    use crate::core::test_helpers::{detail_with_zones, wire_rule, zone_snapshot};

    #[test]
    fn test_detail_payload_decodes_group_fields_once() {
        let mut wire = wire_rule(100);
        wire.source = Some("[group:network-group:RFC1918]".to_string());
        wire.source_port = Some("[group:port-group:WEB]".to_string());
        let detail = RuleSetDetail {
            rules: vec![wire],
            ..RuleSetDetail::default()
        };

        let mut editor = EditorState::new();
        editor.apply_detail("LAN_TO_WAN", detail);

        let rule = &editor.store.rules()[0];
        assert_eq!(
            rule.source,
            FieldValue::Group(GroupRef::new(GroupType::NetworkGroup, "RFC1918"))
        );
        assert_eq!(
            rule.source_port.as_group().map(|g| g.name.as_str()),
            Some("WEB")
        );
    }

    #[test]
    fn test_commit_cycle_replaces_baseline() {
        let mut editor = EditorState::new();
        editor.apply_zone_update(zone_snapshot(&[("DMZ", &[("DMZ_TO_LAN", "LAN")])]));
        editor.apply_detail("DMZ_TO_LAN", detail_with_zones("DMZ", "LAN", &[100, 101]));

        editor.store.move_rule(1, 0);
        assert!(editor.store.is_dirty());
        assert_eq!(editor.store.order_ids(), ["101", "100"]);

        // Server confirms the reorder, renumbering back to a dense sequence
        editor.apply_detail("DMZ_TO_LAN", detail_with_zones("DMZ", "LAN", &[100, 101]));
        assert!(!editor.store.is_dirty());
        let baseline: Vec<&str> = editor.store.baseline().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(baseline, ["100", "101"]);
    }

    #[test]
    fn test_navigation_unblocked_after_discard() {
        let mut editor = EditorState::new();
        editor.apply_zone_update(zone_snapshot(&[
            ("DMZ", &[("DMZ_TO_LAN", "LAN")]),
            ("LAN", &[("LAN_TO_WAN", "WAN")]),
        ]));
        editor.apply_detail("DMZ_TO_LAN", detail_with_zones("DMZ", "LAN", &[100, 101]));

        editor.store.move_rule(0, 1);
        assert!(editor.select_zone("LAN").is_err());

        editor.store.discard();
        let selection = editor.select_zone("LAN").unwrap();
        assert!(matches!(selection, Selection::Fetch(ref f) if f.name == "LAN_TO_WAN"));
    }
}

#[cfg(test)]
mod property_tests {
    use crate::core::codec::{
        normalize_port_list, GroupRef, GroupType,
    };
    use proptest::prelude::*;

    prop_compose! {
        fn arb_group_type()(choice in 0usize..3) -> GroupType {
            match choice {
                0 => GroupType::AddressGroup,
                1 => GroupType::NetworkGroup,
                _ => GroupType::PortGroup,
            }
        }
    }

    proptest! {
        #[test]
        fn test_group_reference_round_trip(
            group_type in arb_group_type(),
            name in "[^\\]]{1,48}",
        ) {
            let group = GroupRef::new(group_type, name.clone());
            let decoded = GroupRef::decode(&group.encode());
            prop_assert_eq!(decoded, Some(group));
        }

        #[test]
        fn test_port_list_normalization_idempotent(raw in ".{0,128}") {
            let once = normalize_port_list(&raw);
            let twice = once.as_deref().and_then(normalize_port_list);
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn test_normalized_port_list_has_no_outer_whitespace(raw in ".{0,128}") {
            if let Some(cleaned) = normalize_port_list(&raw) {
                for token in cleaned.split(',') {
                    prop_assert!(!token.is_empty());
                    prop_assert_eq!(token, token.trim());
                }
            }
        }
    }
}
