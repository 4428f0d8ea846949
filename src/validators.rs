//! Input validation and sanitization for rule form fields.
//!
//! The router re-validates everything server-side; these checks exist so the
//! form can reject obviously bad input before a round trip.

use crate::core::codec::normalize_port_list;

/// Sanitizes a rule description for safe display and transport.
///
/// Removes control characters, quotes, and shell metacharacters.
/// Limits length to 64 bytes (ASCII characters only).
///
/// # Examples
///
/// ```
/// use zonewall::validators::sanitize_description;
///
/// let safe = sanitize_description("Allow office VPN");
/// assert_eq!(safe, "Allow office VPN");
///
/// let messy = "Test\nNewline\"Quote";
/// let safe = sanitize_description(messy);
/// assert!(!safe.contains('\n'));
/// assert!(!safe.contains('"'));
/// ```
pub fn sanitize_description(input: &str) -> String {
    input
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, ' ' | '-' | '_' | '.' | ':'))
        .take(64)
        .collect()
}

/// Validates and sanitizes a rule description.
///
/// # Errors
///
/// Returns `Err` if:
/// - Description exceeds 64 characters
/// - Description becomes empty after sanitization (all invalid chars)
pub fn validate_description(input: &str) -> Result<String, String> {
    if input.len() > 64 {
        return Err("Description too long (max 64 characters)".to_string());
    }

    let sanitized = sanitize_description(input);

    if sanitized.is_empty() && !input.is_empty() {
        return Err("Description contains only invalid characters".to_string());
    }

    Ok(sanitized)
}

/// Validates an IP address or CIDR network entered in an address field.
///
/// Empty input is allowed (the field falls back to "any"). Accepts bare
/// addresses ("203.0.113.7") and prefixed networks ("10.0.0.0/8", "fd00::/8").
///
/// # Errors
///
/// Returns `Err` if the input is neither a valid address nor a valid network.
pub fn validate_address(input: &str) -> Result<String, String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(String::new());
    }

    trimmed
        .parse::<ipnetwork::IpNetwork>()
        .map(|_| trimmed.to_string())
        .map_err(|_| format!("'{trimmed}' is not a valid IP address or network"))
}

/// Checks if an address is in a reserved range and returns an informational
/// warning. Never blocks saving.
pub fn check_reserved_address(network: ipnetwork::IpNetwork) -> Option<String> {
    use std::net::IpAddr;

    match network.ip() {
        IpAddr::V4(ipv4) => {
            let octets = ipv4.octets();

            // RFC 1918 private ranges
            if octets[0] == 10
                || (octets[0] == 172 && (16..=31).contains(&octets[1]))
                || (octets[0] == 192 && octets[1] == 168)
            {
                return Some("Private range (RFC 1918) - usually what you want on LAN".to_string());
            }

            if octets[0] == 127 {
                return Some("Loopback range (127.x) - rarely useful in zone rules".to_string());
            }

            if octets[0] == 169 && octets[1] == 254 {
                return Some("Link-local range (169.254.x.x) - APIPA addresses".to_string());
            }

            None
        }
        IpAddr::V6(ipv6) => {
            if ipv6.is_loopback() {
                return Some("IPv6 loopback (::1) - rarely useful in zone rules".to_string());
            }

            if ipv6.segments()[0] & 0xffc0 == 0xfe80 {
                return Some("IPv6 link-local (fe80::/10) - local network only".to_string());
            }

            None
        }
    }
}

/// Validates a single port token: either "443" or a range "8000-8100".
///
/// # Errors
///
/// Returns `Err` if a port is 0, out of u16 range, or a range is inverted.
pub fn validate_port_token(token: &str) -> Result<(), String> {
    let parse = |s: &str| -> Result<u16, String> {
        let port: u16 = s
            .parse()
            .map_err(|_| format!("'{s}' is not a valid port number"))?;
        if port == 0 {
            return Err("Port must be between 1 and 65535".to_string());
        }
        Ok(port)
    };

    match token.split_once('-') {
        Some((start, end)) => {
            let start = parse(start.trim())?;
            let end = parse(end.trim())?;
            if start > end {
                return Err(format!("Port range {start}-{end} is inverted"));
            }
            Ok(())
        }
        None => parse(token).map(|_| ()),
    }
}

/// Validates a comma-separated port list and returns its normalized form.
///
/// Empty input is allowed (the field falls back to "any").
///
/// # Errors
///
/// Returns `Err` if any token is not a valid port or port range.
pub fn validate_port_list(input: &str) -> Result<String, String> {
    let Some(normalized) = normalize_port_list(input) else {
        return Ok(String::new());
    };

    for token in normalized.split(',') {
        validate_port_token(token)?;
    }

    Ok(normalized)
}

/// Validates a rule number entered by hand.
///
/// # Errors
///
/// Returns `Err` if the value is not in 1..=999999.
pub fn validate_rule_number(input: &str) -> Result<u32, String> {
    let number: u32 = input
        .trim()
        .parse()
        .map_err(|_| format!("'{input}' is not a valid rule number"))?;

    if (1..=999_999).contains(&number) {
        Ok(number)
    } else {
        Err("Rule number must be between 1 and 999999".to_string())
    }
}

/// Validates a zone name.
///
/// Zone names are stored uppercase; callers should normalize first. Allowed
/// characters are ASCII alphanumerics, dash, and underscore, max 32 bytes.
///
/// # Errors
///
/// Returns `Err` if the name is empty, too long, or has invalid characters.
pub fn validate_zone_name(name: &str) -> Result<String, String> {
    if name.is_empty() {
        return Err("Zone name cannot be empty".to_string());
    }

    if name.len() > 32 {
        return Err("Zone name too long (max 32 characters)".to_string());
    }

    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_'))
    {
        return Err("Zone name contains invalid characters".to_string());
    }

    Ok(name.to_string())
}

/// Validates a rule-set name for use in API paths.
///
/// # Errors
///
/// Returns `Err` if the name is empty, over 63 bytes, or has characters
/// outside ASCII alphanumerics, dash, underscore, and dot.
pub fn validate_rule_set_name(name: &str) -> Result<String, String> {
    if name.is_empty() {
        return Err("Rule-set name cannot be empty".to_string());
    }

    if name.len() > 63 {
        return Err("Rule-set name too long (max 63 characters)".to_string());
    }

    if name == "." || name == ".." {
        return Err("Invalid rule-set name".to_string());
    }

    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
    {
        return Err("Rule-set name contains invalid characters".to_string());
    }

    Ok(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_description_strips_quotes() {
        assert_eq!(sanitize_description("a\"b'c`d"), "abcd");
    }

    #[test]
    fn test_validate_description_rejects_overlong() {
        let long = "x".repeat(65);
        assert!(validate_description(&long).is_err());
    }

    #[test]
    fn test_validate_address_accepts_bare_and_cidr() {
        assert_eq!(validate_address("203.0.113.7").unwrap(), "203.0.113.7");
        assert_eq!(validate_address(" 10.0.0.0/8 ").unwrap(), "10.0.0.0/8");
        assert_eq!(validate_address("fd00::/8").unwrap(), "fd00::/8");
    }

    #[test]
    fn test_validate_address_empty_is_ok() {
        assert_eq!(validate_address("  ").unwrap(), "");
    }

    #[test]
    fn test_validate_address_rejects_garbage() {
        assert!(validate_address("not-an-ip").is_err());
        assert!(validate_address("10.0.0.0/33").is_err());
    }

    #[test]
    fn test_check_reserved_address_private() {
        let net: ipnetwork::IpNetwork = "192.168.1.0/24".parse().unwrap();
        assert!(check_reserved_address(net).unwrap().contains("RFC 1918"));
    }

    #[test]
    fn test_check_reserved_address_public() {
        let net: ipnetwork::IpNetwork = "203.0.113.0/24".parse().unwrap();
        assert!(check_reserved_address(net).is_none());
    }

    #[test]
    fn test_validate_port_token_range() {
        assert!(validate_port_token("8000-8100").is_ok());
        assert!(validate_port_token("8100-8000").is_err());
        assert!(validate_port_token("0").is_err());
        assert!(validate_port_token("70000").is_err());
    }

    #[test]
    fn test_validate_port_list_normalizes() {
        assert_eq!(
            validate_port_list(" 80, '443' ,8000-8100 ").unwrap(),
            "80,443,8000-8100"
        );
    }

    #[test]
    fn test_validate_port_list_empty_is_ok() {
        assert_eq!(validate_port_list("  ,  ").unwrap(), "");
    }

    #[test]
    fn test_validate_port_list_rejects_bad_token() {
        assert!(validate_port_list("80,nope").is_err());
    }

    #[test]
    fn test_validate_rule_number_bounds() {
        assert_eq!(validate_rule_number("100").unwrap(), 100);
        assert!(validate_rule_number("0").is_err());
        assert!(validate_rule_number("1000000").is_err());
        assert!(validate_rule_number("abc").is_err());
    }

    #[test]
    fn test_validate_zone_name() {
        assert!(validate_zone_name("LAN").is_ok());
        assert!(validate_zone_name("DMZ-2").is_ok());
        assert!(validate_zone_name("").is_err());
        assert!(validate_zone_name("BAD ZONE").is_err());
    }

    #[test]
    fn test_validate_rule_set_name() {
        assert!(validate_rule_set_name("wan-to-lan").is_ok());
        assert!(validate_rule_set_name("WAN_IN.v6").is_ok());
        assert!(validate_rule_set_name("").is_err());
        assert!(validate_rule_set_name("..").is_err());
        assert!(validate_rule_set_name("a/b").is_err());
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_sanitize_description_never_exceeds_64_chars(input in "\\PC*") {
            let sanitized = sanitize_description(&input);
            prop_assert!(sanitized.len() <= 64);
        }

        #[test]
        fn test_sanitize_description_no_dangerous_chars(input in "\\PC*") {
            let sanitized = sanitize_description(&input);
            prop_assert!(!sanitized.contains('"'));
            prop_assert!(!sanitized.contains('\''));
            prop_assert!(!sanitized.contains('$'));
            prop_assert!(!sanitized.contains('`'));
            prop_assert!(!sanitized.contains('|'));
            prop_assert!(!sanitized.contains(';'));
        }

        #[test]
        fn test_validate_port_token_single(port in any::<u16>()) {
            let result = validate_port_token(&port.to_string());
            if port == 0 {
                prop_assert!(result.is_err());
            } else {
                prop_assert!(result.is_ok());
            }
        }

        #[test]
        fn test_validate_port_token_range_consistency(
            start in 1u16..=65535,
            end in 1u16..=65535
        ) {
            let result = validate_port_token(&format!("{start}-{end}"));
            if start <= end {
                prop_assert!(result.is_ok());
            } else {
                prop_assert!(result.is_err());
            }
        }

        #[test]
        fn test_validate_zone_name_char_constraint(
            valid_prefix in "[a-zA-Z0-9_-]{1,10}",
            invalid_char in "[^a-zA-Z0-9_-]"
        ) {
            let invalid_name = format!("{valid_prefix}{invalid_char}");
            prop_assert!(validate_zone_name(&invalid_name).is_err());
        }

        #[test]
        fn test_validate_port_list_output_is_stable(input in "[0-9, '-]{0,40}") {
            if let Ok(normalized) = validate_port_list(&input) {
                prop_assert_eq!(
                    validate_port_list(&normalized).unwrap(),
                    normalized
                );
            }
        }
    }
}
