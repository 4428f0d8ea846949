//! Core rule-set editing functionality
//!
//! This module contains the UI-free heart of the editor:
//!
//! - [`codec`]: Pure field codec (group references, sentinels, port lists, presets)
//! - [`ruleset`]: Rule and rule-set data model plus wire payload shapes
//! - [`store`]: Working/baseline rule lists and the reorder protocol
//! - [`editor`]: Zone/rule-set selection and snapshot reconciliation
//! - [`error`]: Error types and user-facing translations

pub mod codec;
pub mod editor;
pub mod error;
pub mod ruleset;
pub mod store;

#[cfg(test)]
pub mod test_helpers;

#[cfg(test)]
mod tests;
