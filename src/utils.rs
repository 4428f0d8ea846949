//! Utility functions for directory management and URL assembly
//!
//! This module provides helper functions following the XDG Base Directory
//! specification for portable configuration and state storage across Linux
//! distributions.
//!
//! # Directory Structure
//!
//! - Config: `~/.config/zonewall/` - User configuration files
//! - State: `~/.local/state/zonewall/` - Runtime state (logs, event journal)
//!
//! # Example
//!
//! ```
//! use zonewall::utils::{get_config_dir, get_state_dir, ensure_dirs};
//!
//! // Ensure directories exist before use
//! ensure_dirs().expect("Failed to create directories");
//!
//! if let Some(state_path) = get_state_dir() {
//!     // Open the log file under state_path
//! }
//! ```

use directories::ProjectDirs;
use std::path::PathBuf;

pub fn get_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("com", "zonewall", "zonewall").map(|pd| pd.config_dir().to_path_buf())
}

pub fn get_state_dir() -> Option<PathBuf> {
    ProjectDirs::from("com", "zonewall", "zonewall")
        .and_then(|pd| pd.state_dir().map(std::path::Path::to_path_buf))
}

pub fn ensure_dirs() -> std::io::Result<()> {
    #[cfg(unix)]
    {
        use std::fs::DirBuilder;
        use std::os::unix::fs::DirBuilderExt;

        let mut builder = DirBuilder::new();
        builder.mode(0o700); // User read/write/execute only
        builder.recursive(true);

        if let Some(dir) = get_config_dir() {
            builder.create(dir)?;
        }
        if let Some(dir) = get_state_dir() {
            builder.create(dir)?;
        }
    }

    #[cfg(not(unix))]
    {
        if let Some(dir) = get_config_dir() {
            std::fs::create_dir_all(dir)?;
        }
        if let Some(dir) = get_state_dir() {
            std::fs::create_dir_all(dir)?;
        }
    }

    Ok(())
}

/// Percent-encodes a rule-set or zone name for use as an API path segment.
///
/// Validated names only contain unreserved characters, but the router also
/// serves legacy rule-sets whose names predate validation, so encode anyway.
pub fn encode_path_segment(name: &str) -> String {
    let mut encoded = String::with_capacity(name.len());
    for byte in name.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                encoded.push(byte as char);
            }
            _ => {
                encoded.push('%');
                encoded.push_str(&format!("{byte:02X}"));
            }
        }
    }
    encoded
}

/// Truncates a string to a maximum length and adds an ellipsis if needed
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        // Find the nearest character boundary to avoid splitting multi-byte characters
        let end = s
            .char_indices()
            .map(|(idx, _)| idx)
            .take_while(|&idx| idx <= max_len.saturating_sub(3))
            .last()
            .unwrap_or(0);
        format!("{}...", &s[..end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_path_segment_passthrough() {
        assert_eq!(encode_path_segment("wan-to-lan.v6"), "wan-to-lan.v6");
    }

    #[test]
    fn test_encode_path_segment_escapes() {
        assert_eq!(encode_path_segment("legacy name"), "legacy%20name");
        assert_eq!(encode_path_segment("a/b"), "a%2Fb");
        assert_eq!(encode_path_segment("caf\u{e9}"), "caf%C3%A9");
    }

    #[test]
    fn test_truncate_string_short_unchanged() {
        assert_eq!(truncate_string("short", 10), "short");
    }

    #[test]
    fn test_truncate_string_adds_ellipsis() {
        let out = truncate_string("a long description here", 10);
        assert!(out.ends_with("..."));
        assert!(out.len() <= 10);
    }
}
