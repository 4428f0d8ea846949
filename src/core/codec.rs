//! Field codec for rule endpoint and port values
//!
//! Rule fields coming back from the router are plain strings that may be a
//! literal address/port list, the empty/"any" sentinel, or a reference to a
//! named group in the bracketed `[group:<type>:<name>]` form. This module
//! decodes those strings once, at the model boundary, into [`FieldValue`] and
//! re-encodes them losslessly when a rule is sent back.
//!
//! Everything here is a pure function; no state, no I/O.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Protocols the router accepts on a rule that carries a port restriction.
pub const ALLOWED_PORT_PROTOCOLS: [&str; 3] = ["tcp", "udp", "tcp_udp"];

/// Protocol forced onto a rule when ports are present but the requested
/// protocol is not port-capable.
pub const DEFAULT_PORT_PROTOCOL: &str = "tcp_udp";

/// Kind of named group a rule field can reference
#[derive(
    Debug,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    PartialEq,
    Eq,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
pub enum GroupType {
    /// Set of host addresses
    #[strum(serialize = "address-group")]
    AddressGroup,
    /// Set of networks in CIDR form
    #[strum(serialize = "network-group")]
    NetworkGroup,
    /// Set of ports or port ranges
    #[strum(serialize = "port-group")]
    PortGroup,
}

impl GroupType {
    /// Returns `true` for the group kinds usable in an address field.
    pub const fn is_address_kind(self) -> bool {
        matches!(self, GroupType::AddressGroup | GroupType::NetworkGroup)
    }
}

/// Reference to a server-maintained named group
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GroupRef {
    pub group_type: GroupType,
    pub name: String,
}

impl GroupRef {
    pub fn new(group_type: GroupType, name: impl Into<String>) -> Self {
        Self {
            group_type,
            name: name.into(),
        }
    }

    /// Encodes the reference into the wire form `[group:<type>:<name>]`.
    pub fn encode(&self) -> String {
        format!("[group:{}:{}]", self.group_type, self.name)
    }

    /// Decodes the bracketed wire form. Returns `None` for anything that is
    /// not exactly `[group:<known-type>:<non-empty-name>]`; callers treat a
    /// `None` as a literal value.
    pub fn decode(value: &str) -> Option<Self> {
        let inner = value.strip_prefix("[group:")?.strip_suffix(']')?;
        let (type_str, name) = inner.split_once(':')?;
        let group_type = GroupType::from_str(type_str).ok()?;
        if name.is_empty() {
            return None;
        }
        Some(Self::new(group_type, name))
    }
}

impl fmt::Display for GroupRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.group_type, self.name)
    }
}

/// Decoded rule field: address, network, or port specification
///
/// The router sends these as untyped strings; the model decodes them exactly
/// once so the rest of the editor never re-inspects raw text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum FieldValue {
    /// Empty or "any": no restriction
    #[default]
    Any,
    /// Literal address/CIDR or comma-joined port list
    Literal(String),
    /// Reference to a named group
    Group(GroupRef),
}

impl FieldValue {
    /// Decodes a raw wire string into the tagged form.
    pub fn decode(raw: &str) -> Self {
        let trimmed = raw.trim();
        if is_any_value(trimmed) {
            return FieldValue::Any;
        }
        match GroupRef::decode(trimmed) {
            Some(group) => FieldValue::Group(group),
            None => FieldValue::Literal(trimmed.to_string()),
        }
    }

    /// Re-encodes into the wire string. `Any` becomes the empty string, which
    /// the router treats as "no restriction".
    pub fn encode(&self) -> String {
        match self {
            FieldValue::Any => String::new(),
            FieldValue::Literal(value) => value.clone(),
            FieldValue::Group(group) => group.encode(),
        }
    }

    pub const fn is_any(&self) -> bool {
        matches!(self, FieldValue::Any)
    }

    pub const fn as_group(&self) -> Option<&GroupRef> {
        match self {
            FieldValue::Group(group) => Some(group),
            _ => None,
        }
    }

    /// Human-readable form for table cells.
    pub fn display(&self) -> String {
        match self {
            FieldValue::Any => "Any".to_string(),
            FieldValue::Literal(value) => value.clone(),
            FieldValue::Group(group) => group.to_string(),
        }
    }
}

/// Returns `true` for the empty string or case-insensitive "any".
pub fn is_any_value(value: &str) -> bool {
    let normalized = value.trim();
    normalized.is_empty() || normalized.eq_ignore_ascii_case("any")
}

/// Returns `true` for the protocol sentinels meaning "unrestricted":
/// empty, "any", or "all".
pub fn is_all_protocol(value: &str) -> bool {
    let normalized = value.trim();
    normalized.is_empty()
        || normalized.eq_ignore_ascii_case("any")
        || normalized.eq_ignore_ascii_case("all")
}

/// Display label for a protocol column ("All" for the unrestricted sentinel).
pub fn format_protocol_display(value: &str) -> String {
    if is_all_protocol(value) {
        "All".to_string()
    } else {
        value.trim().to_string()
    }
}

/// Cleans up a comma-joined port list typed by the user.
///
/// Splits on commas, trims each token, strips leading/trailing quote
/// characters, drops empty tokens, and rejoins. Returns `None` when nothing
/// is left. Idempotent: normalizing an already-normalized list is a no-op.
pub fn normalize_port_list(raw: &str) -> Option<String> {
    let cleaned: Vec<&str> = raw
        .split(',')
        .map(|token| {
            // Quotes can wrap whitespace ("\" 443 \"") and vice versa, so
            // strip until the token settles. One pass must normalize fully.
            let mut token = token.trim();
            loop {
                let stripped = token.trim_matches(|c| c == '\'' || c == '"').trim();
                if stripped == token {
                    break token;
                }
                token = stripped;
            }
        })
        .filter(|token| !token.is_empty())
        .collect();
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned.join(","))
    }
}

/// Returns `true` if the protocol may be combined with a port restriction.
pub fn protocol_supports_ports(protocol: &str) -> bool {
    let lower = protocol.trim().to_ascii_lowercase();
    ALLOWED_PORT_PROTOCOLS.contains(&lower.as_str())
}

/// Resolves the protocol to send with a rule.
///
/// A rule that carries any port value must use a port-capable protocol; an
/// incompatible request is forced to [`DEFAULT_PORT_PROTOCOL`]. Protocols are
/// normalized to lower case either way.
pub fn resolve_protocol_for_ports(requested: &str, ports_present: bool) -> String {
    let lower = requested.trim().to_ascii_lowercase();
    if ports_present && !ALLOWED_PORT_PROTOCOLS.contains(&lower.as_str()) {
        DEFAULT_PORT_PROTOCOL.to_string()
    } else {
        lower
    }
}

/// Named (port, protocol) pair offered as a quick pick in the rule form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortPreset {
    pub label: &'static str,
    pub value: &'static str,
    pub protocol: &'static str,
}

impl fmt::Display for PortPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label, self.value)
    }
}

/// Fixed, ordered preset table. By construction no two entries share a
/// (value, protocol) pair, so at most one preset can match a rule.
pub const PORT_PRESETS: &[PortPreset] = &[
    PortPreset {
        label: "SSH",
        value: "22",
        protocol: "tcp",
    },
    PortPreset {
        label: "HTTP",
        value: "80",
        protocol: "tcp",
    },
    PortPreset {
        label: "HTTPS",
        value: "443",
        protocol: "tcp",
    },
    PortPreset {
        label: "DNS",
        value: "53",
        protocol: "tcp_udp",
    },
    PortPreset {
        label: "SMTP",
        value: "25",
        protocol: "tcp",
    },
    PortPreset {
        label: "IMAPS",
        value: "993",
        protocol: "tcp",
    },
    PortPreset {
        label: "OpenVPN",
        value: "1194",
        protocol: "udp",
    },
    PortPreset {
        label: "WireGuard",
        value: "51820",
        protocol: "udp",
    },
    PortPreset {
        label: "RDP",
        value: "3389",
        protocol: "tcp",
    },
];

/// Finds the preset matching a rule's port value and protocol.
///
/// `None` means "Other": the form keeps the value as manual input. Protocol
/// comparison is case-insensitive; when either side's protocol is unknown
/// (empty), the port value alone decides.
pub fn match_port_preset(port_value: &str, protocol: &str) -> Option<&'static PortPreset> {
    if is_any_value(port_value) {
        return None;
    }
    let value = port_value.trim();
    let proto = protocol.trim().to_ascii_lowercase();
    PORT_PRESETS.iter().find(|preset| {
        if preset.value != value {
            return false;
        }
        proto.is_empty() || preset.protocol.eq_ignore_ascii_case(&proto)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_ref_round_trip() {
        let group = GroupRef::new(GroupType::AddressGroup, "LAN_HOSTS");
        let encoded = group.encode();
        assert_eq!(encoded, "[group:address-group:LAN_HOSTS]");
        assert_eq!(GroupRef::decode(&encoded), Some(group));
    }

    #[test]
    fn test_group_ref_decode_rejects_malformed() {
        assert_eq!(GroupRef::decode("192.168.1.0/24"), None);
        assert_eq!(GroupRef::decode("[group:address-group:]"), None);
        assert_eq!(GroupRef::decode("[group:unknown-group:X]"), None);
        assert_eq!(GroupRef::decode("[group:port-group:WEB"), None);
        assert_eq!(GroupRef::decode("group:port-group:WEB]"), None);
    }

    #[test]
    fn test_field_value_decode() {
        assert_eq!(FieldValue::decode(""), FieldValue::Any);
        assert_eq!(FieldValue::decode(" ANY "), FieldValue::Any);
        assert_eq!(
            FieldValue::decode("10.0.0.0/8"),
            FieldValue::Literal("10.0.0.0/8".to_string())
        );
        assert_eq!(
            FieldValue::decode("[group:port-group:WEB]"),
            FieldValue::Group(GroupRef::new(GroupType::PortGroup, "WEB"))
        );
    }

    #[test]
    fn test_field_value_encode_any_is_empty() {
        assert_eq!(FieldValue::Any.encode(), "");
    }

    #[test]
    fn test_normalize_port_list() {
        assert_eq!(
            normalize_port_list(" 80, '443' , ,8080-8090 "),
            Some("80,443,8080-8090".to_string())
        );
        assert_eq!(normalize_port_list("  ,, "), None);
        assert_eq!(normalize_port_list(""), None);
    }

    #[test]
    fn test_normalize_port_list_idempotent() {
        let once = normalize_port_list("\"22\", 80 ,443").unwrap();
        assert_eq!(normalize_port_list(&once), Some(once.clone()));
    }

    #[test]
    fn test_normalize_port_list_settles_quoted_whitespace_in_one_pass() {
        // Quotes wrapping whitespace (and alternating layers of both) must
        // strip fully the first time, or idempotence breaks.
        assert_eq!(
            normalize_port_list("\" 443 \""),
            Some("443".to_string())
        );
        let once = normalize_port_list("' \" 443 \" ', 80").unwrap();
        assert_eq!(once, "443,80");
        assert_eq!(normalize_port_list(&once), Some(once.clone()));
    }

    #[test]
    fn test_match_port_preset() {
        let https = match_port_preset("443", "tcp").expect("HTTPS preset");
        assert_eq!(https.label, "HTTPS");

        // No udp/443 preset: manual entry, value preserved by the caller
        assert_eq!(match_port_preset("443", "udp"), None);

        // Unknown protocol on the rule: port value alone decides
        assert_eq!(match_port_preset("22", "").map(|p| p.label), Some("SSH"));

        // Empty port value is always "Other"
        assert_eq!(match_port_preset("", "tcp"), None);
    }

    #[test]
    fn test_resolve_protocol_for_ports() {
        assert_eq!(resolve_protocol_for_ports("TCP", true), "tcp");
        assert_eq!(resolve_protocol_for_ports("icmp", true), "tcp_udp");
        assert_eq!(resolve_protocol_for_ports("icmp", false), "icmp");
        assert_eq!(resolve_protocol_for_ports("", true), "tcp_udp");
    }

    #[test]
    fn test_protocol_sentinels() {
        assert!(is_all_protocol(""));
        assert!(is_all_protocol("any"));
        assert!(is_all_protocol("ALL"));
        assert!(!is_all_protocol("tcp"));

        assert!(is_any_value(""));
        assert!(is_any_value("Any"));
        assert!(!is_any_value("0.0.0.0/0"));
    }

    #[test]
    fn test_format_protocol_display() {
        assert_eq!(format_protocol_display("all"), "All");
        assert_eq!(format_protocol_display(" tcp "), "tcp");
    }
}
