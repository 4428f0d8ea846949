//! Helper utilities for the app layer
//!
//! This module contains pure functions that perform data transformations,
//! formatting, filtering, and calculations without mutating application state.

pub mod filtering;
pub mod formatting;

// Re-export commonly used functions for convenience
pub use filtering::fuzzy_filter_rule_sets;
pub use formatting::{order_diff, rule_endpoint_label, zone_pair_label};
