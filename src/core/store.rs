//! Working and baseline rule lists for the selected rule-set
//!
//! The store holds two copies of the rule list: `baseline` is the last
//! order the router confirmed, `rules` is the working copy the user may
//! have dragged around. The two diverge only through [`RuleStore::reorder`];
//! every reconciliation replaces both via [`RuleStore::load`].
//!
//! Dirtiness is decided by comparing the working order against the baseline
//! element by element, not by whether a drag happened. Dragging rules back
//! to their original order leaves the store clean.

use crate::core::ruleset::{Rule, RuleWire};

/// Rule number suggested for the first rule of an empty rule-set.
pub const FIRST_RULE_NUMBER: u32 = 100;

#[derive(Debug, Default, Clone)]
pub struct RuleStore {
    rules: Vec<Rule>,
    baseline: Vec<Rule>,
    dirty: bool,
}

impl RuleStore {
    /// Replaces both copies from a server payload and clears dirtiness.
    ///
    /// This is the only way the baseline changes; it runs on every detail
    /// fetch and after every successful mutating call.
    pub fn load(&mut self, wires: Vec<RuleWire>) {
        self.rules = wires.into_iter().map(Rule::from_wire).collect();
        self.baseline = self.rules.clone();
        self.dirty = false;
    }

    /// Empties the store, e.g. when a zone with no rule-sets is selected.
    pub fn clear(&mut self) {
        self.rules.clear();
        self.baseline.clear();
        self.dirty = false;
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn baseline(&self) -> &[Rule] {
        &self.baseline
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Applies a candidate working order.
    ///
    /// An order positionally identical to the baseline (by id) resets to a
    /// clean baseline copy: a user dragging rules back to where they
    /// started must not be left falsely dirty. Anything else becomes the
    /// working copy and marks the store dirty.
    pub fn reorder(&mut self, new_order: Vec<Rule>) {
        let identical = new_order.len() == self.baseline.len()
            && new_order
                .iter()
                .zip(self.baseline.iter())
                .all(|(a, b)| a.id == b.id);

        if identical {
            self.rules = self.baseline.clone();
            self.dirty = false;
        } else {
            self.rules = new_order;
            self.dirty = true;
        }
    }

    /// Moves the rule at `from` so it lands at the drop target's current
    /// index: single remove + single insert, not a swap. Dropping onto the
    /// source row or an out-of-range index is a no-op.
    ///
    /// Returns `true` when an order was submitted to [`RuleStore::reorder`].
    pub fn move_rule(&mut self, from: usize, to: usize) -> bool {
        if from == to || from >= self.rules.len() || to >= self.rules.len() {
            return false;
        }
        let mut new_order = self.rules.clone();
        let moved = new_order.remove(from);
        new_order.insert(to, moved);
        self.reorder(new_order);
        true
    }

    /// Reverts the working copy to the baseline. Local only, no network.
    pub fn discard(&mut self) {
        self.rules = self.baseline.clone();
        self.dirty = false;
    }

    /// Ordered ids of the working copy, the body of a commit-reorder call.
    pub fn order_ids(&self) -> Vec<String> {
        self.rules.iter().map(|rule| rule.id.clone()).collect()
    }

    /// Suggested number for a new rule: highest existing number plus one,
    /// or [`FIRST_RULE_NUMBER`] when nothing parses. Advisory only; the
    /// router validates the real number on create.
    pub fn next_rule_number(&self) -> u32 {
        self.rules
            .iter()
            .filter_map(Rule::number)
            .max()
            .map_or(FIRST_RULE_NUMBER, |max| max.saturating_add(1))
    }

    /// Looks up a rule by its id.
    pub fn find(&self, id: &str) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::test_helpers::{detail_with_numbers, wire_rule};

    fn store_with(numbers: &[u32]) -> RuleStore {
        let mut store = RuleStore::default();
        store.load(detail_with_numbers(numbers).rules);
        store
    }

    #[test]
    fn test_load_resets_dirty_and_baseline() {
        let mut store = store_with(&[100, 101]);
        store.move_rule(0, 1);
        assert!(store.is_dirty());

        store.load(detail_with_numbers(&[100, 101, 102]).rules);
        assert!(!store.is_dirty());
        assert_eq!(store.order_ids(), ["100", "101", "102"]);
        assert_eq!(store.baseline().len(), 3);
    }

    #[test]
    fn test_reorder_marks_dirty_and_back_clears() {
        let mut store = store_with(&[100, 101, 102]);

        assert!(store.move_rule(1, 0));
        assert_eq!(store.order_ids(), ["101", "100", "102"]);
        assert!(store.is_dirty());

        // Drag back to the original order: dirty must clear even though two
        // drags happened
        assert!(store.move_rule(0, 1));
        assert_eq!(store.order_ids(), ["100", "101", "102"]);
        assert!(!store.is_dirty());
    }

    #[test]
    fn test_move_rule_invalid_indices_are_noops() {
        let mut store = store_with(&[100, 101]);
        assert!(!store.move_rule(0, 0));
        assert!(!store.move_rule(5, 0));
        assert!(!store.move_rule(0, 5));
        assert!(!store.is_dirty());
    }

    #[test]
    fn test_move_rule_is_remove_then_insert() {
        let mut store = store_with(&[100, 101, 102, 103]);
        store.move_rule(3, 0);
        assert_eq!(store.order_ids(), ["103", "100", "101", "102"]);
    }

    #[test]
    fn test_discard_restores_baseline() {
        let mut store = store_with(&[100, 101]);
        store.move_rule(0, 1);
        store.discard();
        assert_eq!(store.order_ids(), ["100", "101"]);
        assert!(!store.is_dirty());
    }

    #[test]
    fn test_next_rule_number() {
        assert_eq!(RuleStore::default().next_rule_number(), 100);
        assert_eq!(store_with(&[100, 105, 103]).next_rule_number(), 106);

        // Non-numeric ids only: fall back to the floor
        let mut store = RuleStore::default();
        let mut wire = wire_rule(100);
        wire.number = serde_json::Value::String("default".into());
        store.load(vec![wire]);
        assert_eq!(store.next_rule_number(), 100);
    }

    #[test]
    fn test_next_rule_number_saturates_at_u32_max() {
        let store = store_with(&[u32::MAX]);
        assert_eq!(store.next_rule_number(), u32::MAX);
    }

    #[test]
    fn test_baseline_untouched_by_reorder() {
        let mut store = store_with(&[100, 101]);
        store.move_rule(0, 1);
        let baseline_ids: Vec<&str> = store.baseline().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(baseline_ids, ["100", "101"]);
    }
}
