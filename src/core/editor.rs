//! Selection and reconciliation over one owned editor state
//!
//! [`EditorState`] is the single place that knows which zone and rule-set
//! are active, which rule-sets belong to which zone, and what the router
//! last confirmed. It is owned by the controller (the GUI `State` or a CLI
//! command) and passed by reference; there are no module-level globals.
//!
//! Reconciliation is always full-snapshot replacement: every mutating call
//! returns the complete rule-set detail (or zone snapshot), and this module
//! replaces the derived state wholesale instead of patching rules in place.
//! That policy eliminates drift between optimistic local edits and
//! server-side validation or renumbering.
//!
//! Detail fetches are tagged with a [`Uuid`] token. A response whose token
//! no longer matches the latest request is stale (the user navigated away
//! while it was in flight) and must be dropped, not applied.

use crate::core::error::{Error, Result};
use crate::core::ruleset::{
    normalize_zone, sort_rule_set_refs, InterfaceInventory, RuleSetDetail, RuleSetMetadata,
    RuleSetRef, ZoneSnapshot,
};
use crate::core::store::RuleStore;
use std::collections::BTreeMap;
use uuid::Uuid;

/// A detail fetch the caller must now perform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub token: Uuid,
    pub name: String,
}

/// Result of a zone/rule-set selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// A rule-set resolved; fetch its detail
    Fetch(FetchRequest),
    /// Nothing to show; the rule store was cleared
    Cleared,
}

#[derive(Debug, Default)]
pub struct EditorState {
    /// Sorted, uppercase zone names
    pub zones: Vec<String>,
    /// Zone -> membership entries, each list sorted by (destination, name)
    pub zone_groups: BTreeMap<String, Vec<RuleSetRef>>,
    /// Rule-set name -> descriptive metadata
    pub metadata: BTreeMap<String, RuleSetMetadata>,
    /// All known rule-set names
    pub names: Vec<String>,
    /// Interface inventory from the last zone snapshot
    pub interfaces: InterfaceInventory,
    pub selected_zone: Option<String>,
    pub selected_name: Option<String>,
    pub store: RuleStore,
    pending_fetch: Option<FetchRequest>,
}

impl EditorState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Membership entries for a zone, empty when unknown.
    pub fn refs_for(&self, zone: &str) -> &[RuleSetRef] {
        self.zone_groups
            .get(zone)
            .map_or(&[], std::vec::Vec::as_slice)
    }

    pub fn selected_metadata(&self) -> Option<&RuleSetMetadata> {
        self.selected_name
            .as_deref()
            .and_then(|name| self.metadata.get(name))
    }

    /// Registers a new detail fetch, invalidating any earlier in-flight one.
    pub fn begin_fetch(&mut self, name: &str) -> FetchRequest {
        let request = FetchRequest {
            token: Uuid::new_v4(),
            name: name.to_string(),
        };
        self.pending_fetch = Some(request.clone());
        request
    }

    /// Whether a detail response with this token is still the one we want.
    pub fn fetch_is_current(&self, token: Uuid) -> bool {
        self.pending_fetch
            .as_ref()
            .is_some_and(|pending| pending.token == token)
    }

    /// Activates a zone.
    ///
    /// Rejected while a reorder is uncommitted. If the currently selected
    /// rule-set is not a member of the new zone, selection falls back to the
    /// zone's first rule-set, or to none (clearing the rule store).
    pub fn select_zone(&mut self, zone: &str) -> Result<Selection> {
        if self.store.is_dirty() {
            return Err(Error::PendingReorder);
        }
        let zone_key = normalize_zone(zone);
        if zone_key.is_empty() {
            return Ok(Selection::Cleared);
        }

        self.selected_zone = Some(zone_key.clone());

        let refs = self.refs_for(&zone_key);
        let target = match self.selected_name.as_deref() {
            Some(current) if refs.iter().any(|r| r.name == current) => Some(current.to_string()),
            _ => refs.first().map(|r| r.name.clone()),
        };
        self.selected_name = target.clone();

        match target {
            Some(name) => Ok(Selection::Fetch(self.begin_fetch(&name))),
            None => {
                self.store.clear();
                self.pending_fetch = None;
                Ok(Selection::Cleared)
            }
        }
    }

    /// Activates a specific rule-set within a zone. Same dirty guard as
    /// [`EditorState::select_zone`].
    pub fn select_rule_set(&mut self, name: &str, zone: &str) -> Result<FetchRequest> {
        if self.store.is_dirty() {
            return Err(Error::PendingReorder);
        }
        let zone_key = normalize_zone(zone);
        if !zone_key.is_empty() {
            self.selected_zone = Some(zone_key);
        }
        self.selected_name = Some(name.to_string());
        Ok(self.begin_fetch(name))
    }

    /// Applies a full rule-set detail payload as the new truth.
    ///
    /// Replaces the rule store, records metadata, and re-derives the
    /// rule-set's membership entry: any stale entry for `name` is removed
    /// from every zone before the fresh one is inserted under the payload's
    /// source zone, keeping the (destination, name) ordering invariant. A
    /// previously unknown source zone is appended to the zone list.
    pub fn apply_detail(&mut self, name: &str, detail: RuleSetDetail) {
        self.selected_name = Some(name.to_string());
        self.store.load(detail.rules);
        self.pending_fetch = None;

        let source_zone = detail
            .metadata
            .source_zone
            .as_deref()
            .map(normalize_zone)
            .filter(|z| !z.is_empty());
        let destination_zone = detail
            .metadata
            .destination_zone
            .as_deref()
            .map(normalize_zone)
            .unwrap_or_default();
        self.metadata.insert(name.to_string(), detail.metadata);
        if !self.names.iter().any(|n| n == name) {
            self.names.push(name.to_string());
            self.names.sort();
        }

        let Some(source_zone) = source_zone else {
            return;
        };

        for refs in self.zone_groups.values_mut() {
            refs.retain(|r| r.name != name);
        }
        let refs = self.zone_groups.entry(source_zone.clone()).or_default();
        refs.push(RuleSetRef {
            name: name.to_string(),
            destination: destination_zone,
        });
        sort_rule_set_refs(refs);

        if !self.zones.contains(&source_zone) {
            self.zones.push(source_zone.clone());
            self.zones.sort();
        }
        if self.selected_zone.as_deref() != Some(&source_zone) {
            self.selected_zone = Some(source_zone);
        }
    }

    /// Replaces the zone directory wholesale from a server snapshot and
    /// re-resolves the selection against it.
    ///
    /// Returns the detail fetch to perform when a rule-set resolved, `None`
    /// when nothing is selectable (the rule store is then cleared).
    pub fn apply_zone_update(&mut self, snapshot: ZoneSnapshot) -> Option<FetchRequest> {
        let mut zone_groups: BTreeMap<String, Vec<RuleSetRef>> = BTreeMap::new();
        for (zone, entries) in snapshot.zone_groups {
            let zone_key = normalize_zone(&zone);
            if zone_key.is_empty() {
                continue;
            }
            let mut refs: Vec<RuleSetRef> = entries
                .into_iter()
                .map(|r| RuleSetRef {
                    name: r.name,
                    destination: normalize_zone(&r.destination),
                })
                .collect();
            sort_rule_set_refs(&mut refs);
            zone_groups.insert(zone_key, refs);
        }

        let mut zones: Vec<String> = snapshot
            .zones
            .iter()
            .map(|z| normalize_zone(z))
            .filter(|z| !z.is_empty())
            .collect();
        if zones.is_empty() {
            zones = zone_groups.keys().cloned().collect();
        }
        zones.sort();
        zones.dedup();

        let mut interfaces = snapshot.interfaces;
        interfaces.unassigned.sort();

        self.zones = zones;
        self.zone_groups = zone_groups;
        self.metadata = snapshot.metadata;
        self.names = snapshot.names;
        self.interfaces = interfaces;
        self.store.clear();
        self.pending_fetch = None;

        let target_zone = snapshot
            .selected_zone
            .as_deref()
            .map(normalize_zone)
            .filter(|z| self.zones.contains(z))
            .or_else(|| {
                self.selected_zone
                    .clone()
                    .filter(|z| self.zones.contains(z))
            })
            .or_else(|| self.zones.first().cloned());
        self.selected_zone = target_zone.clone();

        let refs = target_zone
            .as_deref()
            .map(|zone| self.refs_for(zone))
            .unwrap_or_default();
        let target_name = snapshot
            .selected_firewall
            .filter(|name| refs.iter().any(|r| &r.name == name))
            .or_else(|| {
                self.selected_name
                    .clone()
                    .filter(|name| refs.iter().any(|r| &r.name == name))
            })
            .or_else(|| refs.first().map(|r| r.name.clone()));
        self.selected_name = target_name.clone();

        target_name.map(|name| self.begin_fetch(&name))
    }
}
