//! Message handlers organized by domain
//!
//! This module contains all message handlers extracted from the monolithic
//! update() method, organized by functional domain for better maintainability.

pub mod reorder;
pub mod rules;
pub mod selection;
pub mod ui_state;
pub mod zones;

#[cfg(test)]
pub mod test_utils;

// Re-export all handlers for clean imports in app/mod.rs
pub(crate) use reorder::*;
pub(crate) use rules::*;
pub(crate) use selection::*;
pub(crate) use ui_state::*;
pub(crate) use zones::*;
