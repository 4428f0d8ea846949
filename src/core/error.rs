use thiserror::Error;

/// Core error types for zonewall
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP transport failure (connect, timeout, TLS)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The router answered, but with a non-ok envelope or status
    #[error("API error: {message}")]
    Api { message: String },

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O operation failed (config, audit log)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Input validation failed before any request was issued
    #[error("Validation error in {field}: {message}")]
    Validation { field: String, message: String },

    /// Action rejected because an uncommitted reorder is pending
    #[error("An uncommitted rule order is pending: save or discard it first")]
    PendingReorder,

    /// Action requires a selected rule-set and none is selected
    #[error("No rule-set is selected")]
    NoSelection,
}

impl Error {
    pub fn api(message: impl Into<String>) -> Self {
        Error::Api {
            message: message.into(),
        }
    }

    /// Guard errors are rejected synchronously, never sent over the wire.
    pub const fn is_state_guard(&self) -> bool {
        matches!(self, Error::PendingReorder | Error::NoSelection)
    }
}

/// Represents a translated error with helpful context
#[derive(Debug, Clone)]
pub struct ErrorTranslation {
    pub user_message: String,
    pub suggestions: Vec<String>,
}

impl ErrorTranslation {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            user_message: message.into(),
            suggestions: Vec::new(),
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }
}

/// Database of router/transport error patterns and their translations
pub struct ApiErrorPattern;

impl ApiErrorPattern {
    /// Matches an error message against known patterns and returns a
    /// user-friendly translation.
    pub fn match_error(msg: &str) -> ErrorTranslation {
        let lower = msg.to_lowercase();

        if lower.contains("connection refused") || lower.contains("error trying to connect") {
            return ErrorTranslation::new("Cannot reach the router's management API")
                .with_suggestion("Check the server URL in Settings")
                .with_suggestion("Verify the router's web service is running")
                .with_suggestion("Check for firewalling between you and the management port");
        }

        if lower.contains("timed out") || lower.contains("timeout") {
            return ErrorTranslation::new("The router did not answer in time")
                .with_suggestion("The router may be applying a large ruleset; try again")
                .with_suggestion("Check link quality to the management interface");
        }

        if lower.contains("certificate") || lower.contains("tls") {
            return ErrorTranslation::new("TLS handshake with the router failed")
                .with_suggestion("The router may be using a self-signed certificate")
                .with_suggestion("Use the http:// form of the URL on a trusted network");
        }

        if lower.contains("unauthorized") || lower.contains("forbidden") {
            return ErrorTranslation::new("The router rejected the request as unauthorized")
                .with_suggestion("Log in to the router's web console to refresh the session");
        }

        if lower.contains("not found") && lower.contains("rule") {
            return ErrorTranslation::new("The rule no longer exists on the router")
                .with_suggestion("Another session may have deleted it")
                .with_suggestion("The list has been refreshed; re-check before retrying");
        }

        if lower.contains("duplicate") || lower.contains("already exists") {
            return ErrorTranslation::new("A rule with that number already exists")
                .with_suggestion("Pick a free number; the form pre-fills the next one");
        }

        if lower.contains("invalid")
            && (lower.contains("address") || lower.contains("network") || lower.contains("cidr"))
        {
            return ErrorTranslation::new("The router rejected an address value")
                .with_suggestion("Use host form (192.168.1.10) or CIDR form (192.168.1.0/24)")
                .with_suggestion("Address groups must exist before being referenced");
        }

        if lower.contains("invalid") && lower.contains("port") {
            return ErrorTranslation::new("The router rejected a port value")
                .with_suggestion("Ports must be 1-65535, ranges as start-end")
                .with_suggestion("Separate multiple entries with commas");
        }

        if lower.contains("order") && (lower.contains("mismatch") || lower.contains("stale")) {
            return ErrorTranslation::new("The rule order on the router changed underneath you")
                .with_suggestion("Discard the pending order and redo the drag on fresh data");
        }

        // Generic fallback
        ErrorTranslation::new(format!("Router error: {msg}"))
            .with_suggestion("Check the router's logs for details")
            .with_suggestion("The editor kept its last confirmed state; retry when ready")
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_refused_translation() {
        let translation = ApiErrorPattern::match_error("tcp connect error: Connection refused");
        assert!(translation.user_message.contains("Cannot reach"));
        assert!(translation.suggestions.iter().any(|s| s.contains("URL")));
    }

    #[test]
    fn test_duplicate_rule_translation() {
        let translation = ApiErrorPattern::match_error("rule 100 already exists");
        assert!(translation.user_message.contains("already exists"));
        assert!(!translation.suggestions.is_empty());
    }

    #[test]
    fn test_rule_not_found_translation() {
        let translation = ApiErrorPattern::match_error("rule 140 not found in LAN_TO_WAN");
        assert!(translation.user_message.contains("no longer exists"));
    }

    #[test]
    fn test_generic_fallback_keeps_message() {
        let translation = ApiErrorPattern::match_error("ruleset busy");
        assert!(translation.user_message.contains("ruleset busy"));
        assert_eq!(translation.suggestions.len(), 2);
    }

    #[test]
    fn test_state_guard_classification() {
        assert!(Error::PendingReorder.is_state_guard());
        assert!(Error::NoSelection.is_state_guard());
        assert!(!Error::api("boom").is_state_guard());
    }
}
