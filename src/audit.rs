/// Event journal for mutating operations
///
/// This module provides structured logging of every change sent to the
/// router: rule edits, order commits, and zone changes. The journal is
/// opt-in (`enable_event_log` in the config) and lives in the XDG state
/// directory alongside the application log.
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tokio::io::AsyncWriteExt;

/// Types of journaled events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    RuleCreated,
    RuleUpdated,
    RuleDeleted,
    RuleToggled,
    OrderCommitted,
    OrderDiscarded,
    ZoneCreated,
    ZoneDeleted,
}

impl EventType {
    /// Short label used by the CLI journal listing.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::RuleCreated => "rule created",
            Self::RuleUpdated => "rule updated",
            Self::RuleDeleted => "rule deleted",
            Self::RuleToggled => "rule toggled",
            Self::OrderCommitted => "order saved",
            Self::OrderDiscarded => "order discarded",
            Self::ZoneCreated => "zone created",
            Self::ZoneDeleted => "zone deleted",
        }
    }
}

/// A single journal entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEvent {
    /// When the event occurred (UTC)
    pub timestamp: chrono::DateTime<chrono::Utc>,

    /// Type of event
    pub event_type: EventType,

    /// Whether the router accepted the change
    pub success: bool,

    /// Additional structured data about the event
    pub details: serde_json::Value,

    /// Error message if the operation failed
    pub error: Option<String>,
}

impl AuditEvent {
    /// Creates a new journal event
    pub fn new(
        event_type: EventType,
        success: bool,
        details: serde_json::Value,
        error: Option<String>,
    ) -> Self {
        Self {
            timestamp: chrono::Utc::now(),
            event_type,
            success,
            details,
            error,
        }
    }
}

/// Journal writer
pub struct AuditLog {
    log_path: PathBuf,
}

impl AuditLog {
    /// Creates a new journal instance
    ///
    /// # Errors
    ///
    /// Returns `Err` if the state directory cannot be determined
    pub fn new() -> std::io::Result<Self> {
        let mut log_path = crate::utils::get_state_dir().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::NotFound, "State directory not found")
        })?;
        log_path.push("events.log");

        Ok(Self { log_path })
    }

    /// Appends an event to the journal
    ///
    /// Events are written as JSON-lines format (one JSON object per line)
    ///
    /// # Errors
    ///
    /// Returns `Err` if the file cannot be opened or written
    pub async fn log(&self, event: AuditEvent) -> std::io::Result<()> {
        let json = serde_json::to_string(&event)?;

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .await?;

        file.write_all(json.as_bytes()).await?;
        file.write_all(b"\n").await?;
        file.sync_all().await?;

        Ok(())
    }

    /// Reads the most recent events from the journal
    ///
    /// # Arguments
    ///
    /// * `count` - Maximum number of events to return
    ///
    /// # Errors
    ///
    /// Returns `Err` if the file cannot be read
    pub async fn read_recent(&self, count: usize) -> std::io::Result<Vec<AuditEvent>> {
        let content = tokio::fs::read_to_string(&self.log_path).await?;

        let events: Vec<AuditEvent> = content
            .lines()
            .rev()
            .take(count)
            .filter_map(|line| serde_json::from_str(line).ok())
            .collect();

        Ok(events)
    }

    /// Returns the path to the journal file
    pub fn path(&self) -> &PathBuf {
        &self.log_path
    }
}

/// Logs a rule mutation (create, update, delete, or toggle).
///
/// Fire-and-forget: journal failures are logged and never surfaced to the UI.
pub async fn log_rule_event(
    event_type: EventType,
    rule_set: &str,
    rule_id: &str,
    success: bool,
    error: Option<String>,
) {
    if let Ok(journal) = AuditLog::new() {
        let event = AuditEvent::new(
            event_type,
            success,
            serde_json::json!({
                "rule_set": rule_set,
                "rule": rule_id,
            }),
            error,
        );

        if let Err(e) = journal.log(event).await {
            tracing::warn!("Failed to write event journal: {}", e);
        }
    }
}

/// Logs an order commit or discard
pub async fn log_order_event(
    event_type: EventType,
    rule_set: &str,
    order: &[String],
    success: bool,
    error: Option<String>,
) {
    if let Ok(journal) = AuditLog::new() {
        let event = AuditEvent::new(
            event_type,
            success,
            serde_json::json!({
                "rule_set": rule_set,
                "order": order,
            }),
            error,
        );

        if let Err(e) = journal.log(event).await {
            tracing::warn!("Failed to write event journal: {}", e);
        }
    }
}

/// Logs a zone creation or deletion
pub async fn log_zone_event(
    event_type: EventType,
    zone: &str,
    success: bool,
    error: Option<String>,
) {
    if let Ok(journal) = AuditLog::new() {
        let event = AuditEvent::new(
            event_type,
            success,
            serde_json::json!({
                "zone": zone,
            }),
            error,
        );

        if let Err(e) = journal.log(event).await {
            tracing::warn!("Failed to write event journal: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_audit_event_creation() {
        let event = AuditEvent::new(
            EventType::RuleCreated,
            true,
            serde_json::json!({"rule_set": "wan-to-lan", "rule": "110"}),
            None,
        );

        assert!(event.success);
        assert!(event.error.is_none());
        assert_eq!(event.details["rule"], "110");
    }

    #[test]
    fn test_event_serialization() {
        let event = AuditEvent::new(
            EventType::OrderCommitted,
            false,
            serde_json::json!({"order": ["100", "120", "110"]}),
            Some("order mismatch".to_string()),
        );

        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("order_committed"));
        assert!(json.contains("order mismatch"));
    }

    #[test]
    fn test_event_deserialization() {
        let json = r#"{"timestamp":"2026-01-01T00:00:00Z","event_type":"zone_deleted","success":true,"details":{"zone":"DMZ"},"error":null}"#;
        let event: AuditEvent = serde_json::from_str(json).unwrap();

        assert!(event.success);
        assert!(matches!(event.event_type, EventType::ZoneDeleted));
    }
}
