//! Zonewall - zone firewall rule-set editor
//!
//! A desktop console for editing the ordered, named firewall rule-sets of a
//! zone-based router over its admin API.
//!
//! # Architecture
//!
//! - [`core`] - Field codec, rule store, selection, and reconciliation logic
//! - [`api`] - HTTP client for the router's rules and zones endpoints
//! - [`audit`] - Optional local journal of every mutation sent to the router
//! - [`validators`] - Input validation and sanitization
//! - [`config`] - Configuration persistence
//! - [`utils`] - Utility functions (XDG directories, URL encoding)
//!
//! # Editing model
//!
//! Every rule mutation round-trips through the router: the response payload
//! replaces the local rule store, so the editor never drifts from what the
//! router holds. Reordering is the one local operation; it stays pending
//! until committed in a single request or discarded.

// Allow pedantic clippy warnings that are not worth fixing for this codebase
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::needless_lifetimes)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::missing_errors_doc)]

pub mod api;
pub mod audit;
pub mod config;
pub mod core;
pub mod theme;
pub mod utils;
pub mod validators;

// Re-export commonly used types
pub use core::error::{Error, Result};
pub use core::ruleset::{Rule, RuleSetDetail, ZoneSnapshot};
