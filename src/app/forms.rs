//! Rule form state, validation, and payload assembly
//!
//! The form mirrors one rule being created or edited. Address and port
//! fields can be entered manually or point at a server-maintained named
//! group; group-backed fields skip literal validation and are encoded as
//! `[group:<type>:<name>]` when the payload is built.

use crate::core::codec::{
    self, FieldValue, GroupRef, GroupType, PortPreset, match_port_preset, normalize_port_list,
};
use crate::core::ruleset::{Action, Rule, RulePayload};
use crate::validators;

/// Protocol choices offered in the form. Empty string means "not set",
/// which the router reads as unrestricted.
pub const PROTOCOL_CHOICES: &[&str] = &["", "all", "tcp", "udp", "tcp_udp", "icmp"];

/// Form validation errors for individual fields
#[derive(Debug, Clone, Default)]
pub struct FormErrors {
    pub number: Option<String>,
    pub description: Option<String>,
    pub source_address: Option<String>,
    pub source_port: Option<String>,
    pub destination_address: Option<String>,
    pub destination_port: Option<String>,
}

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.number.is_none()
            && self.description.is_none()
            && self.source_address.is_none()
            && self.source_port.is_none()
            && self.destination_address.is_none()
            && self.destination_port.is_none()
    }
}

/// One endpoint field: typed by hand, or a named group reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldEntry {
    Manual(String),
    Group { group_type: GroupType, name: String },
}

impl FieldEntry {
    pub fn manual() -> Self {
        FieldEntry::Manual(String::new())
    }

    pub fn is_group(&self) -> bool {
        matches!(self, FieldEntry::Group { .. })
    }

    /// Builds the form entry from a decoded rule field.
    pub fn from_field(field: &FieldValue) -> Self {
        match field {
            FieldValue::Any => FieldEntry::manual(),
            FieldValue::Literal(value) => FieldEntry::Manual(value.clone()),
            FieldValue::Group(group) => FieldEntry::Group {
                group_type: group.group_type,
                name: group.name.clone(),
            },
        }
    }

    /// Wire value and group-marker pair for the payload. Empty manual input
    /// yields `(None, None)`, which the router reads as "any".
    fn encode(&self) -> (Option<String>, Option<&'static str>) {
        match self {
            FieldEntry::Manual(value) => {
                let trimmed = value.trim();
                if codec::is_any_value(trimmed) {
                    (None, None)
                } else {
                    (Some(trimmed.to_string()), None)
                }
            }
            FieldEntry::Group { group_type, name } => {
                let group = GroupRef::new(*group_type, name.trim());
                (Some(group.encode()), Some("group"))
            }
        }
    }
}

/// Rule form state
#[derive(Debug, Clone)]
pub struct RuleForm {
    /// `Some(number)` while editing an existing rule; `None` when creating
    pub original_number: Option<String>,
    pub number: String,
    pub action: Action,
    pub protocol: String,
    pub description: String,
    pub source_address: FieldEntry,
    pub source_port: FieldEntry,
    pub destination_address: FieldEntry,
    pub destination_port: FieldEntry,
    /// Selected quick pick for the destination port, `None` meaning "Other"
    pub selected_preset: Option<&'static PortPreset>,
    pub disabled: bool,
}

impl Default for RuleForm {
    fn default() -> Self {
        Self {
            original_number: None,
            number: String::new(),
            action: Action::Accept,
            protocol: String::new(),
            description: String::new(),
            source_address: FieldEntry::manual(),
            source_port: FieldEntry::manual(),
            destination_address: FieldEntry::manual(),
            destination_port: FieldEntry::manual(),
            selected_preset: None,
            disabled: false,
        }
    }
}

impl RuleForm {
    /// Fresh form for a new rule, pre-filled with the next free number.
    pub fn for_new_rule(next_number: u32) -> Self {
        Self {
            number: next_number.to_string(),
            ..Self::default()
        }
    }

    /// Form pre-filled from an existing rule. The destination-port preset is
    /// re-derived so a rule saved from a quick pick reopens on that pick.
    pub fn for_existing_rule(rule: &Rule) -> Self {
        let protocol = if codec::is_all_protocol(&rule.protocol) {
            "all".to_string()
        } else {
            rule.protocol.to_ascii_lowercase()
        };

        let selected_preset = match &rule.destination_port {
            FieldValue::Literal(value) => match_port_preset(value, &protocol),
            _ => None,
        };

        Self {
            original_number: Some(rule.id.clone()),
            number: rule.id.clone(),
            action: rule.action.unwrap_or_default(),
            protocol,
            description: rule.description.clone().unwrap_or_default(),
            source_address: FieldEntry::from_field(&rule.source),
            source_port: FieldEntry::from_field(&rule.source_port),
            destination_address: FieldEntry::from_field(&rule.destination),
            destination_port: FieldEntry::from_field(&rule.destination_port),
            selected_preset,
            disabled: rule.disabled,
        }
    }

    /// Mutable access to the entry behind a field selector.
    pub fn field_mut(&mut self, field: crate::app::FormField) -> &mut FieldEntry {
        use crate::app::FormField;
        match field {
            FormField::SourceAddress => &mut self.source_address,
            FormField::SourcePort => &mut self.source_port,
            FormField::DestinationAddress => &mut self.destination_address,
            FormField::DestinationPort => &mut self.destination_port,
        }
    }

    /// Applies a quick pick: fills the destination port and forces a
    /// port-compatible protocol. `None` re-enables manual entry, keeping
    /// whatever was already typed.
    pub fn apply_preset(&mut self, preset: Option<&'static PortPreset>) {
        self.selected_preset = preset;
        if let Some(preset) = preset {
            self.destination_port = FieldEntry::Manual(preset.value.to_string());
            self.protocol = preset.protocol.to_string();
        }
    }

    /// Validates all form fields.
    ///
    /// Returns `None` if validation passed. Group-backed fields are not
    /// validated beyond a non-empty name; the router resolves them.
    pub fn validate(&self) -> Option<FormErrors> {
        let mut errors = FormErrors::default();

        if let Err(msg) = validators::validate_rule_number(&self.number) {
            errors.number = Some(msg);
        }

        if !self.description.is_empty()
            && let Err(msg) = validators::validate_description(&self.description)
        {
            errors.description = Some(msg);
        }

        Self::validate_address_entry(&self.source_address, &mut errors.source_address);
        Self::validate_address_entry(&self.destination_address, &mut errors.destination_address);
        Self::validate_port_entry(&self.source_port, &mut errors.source_port);
        Self::validate_port_entry(&self.destination_port, &mut errors.destination_port);

        if errors.is_empty() { None } else { Some(errors) }
    }

    fn validate_address_entry(entry: &FieldEntry, slot: &mut Option<String>) {
        match entry {
            FieldEntry::Manual(value) => {
                if let Err(msg) = validators::validate_address(value) {
                    *slot = Some(msg);
                }
            }
            FieldEntry::Group { name, .. } => {
                if name.trim().is_empty() {
                    *slot = Some("Select a group name".to_string());
                }
            }
        }
    }

    fn validate_port_entry(entry: &FieldEntry, slot: &mut Option<String>) {
        match entry {
            FieldEntry::Manual(value) => {
                if let Err(msg) = validators::validate_port_list(value) {
                    *slot = Some(msg);
                }
            }
            FieldEntry::Group { name, .. } => {
                if name.trim().is_empty() {
                    *slot = Some("Select a group name".to_string());
                }
            }
        }
    }

    /// Assembles the wire payload. Ports are normalized, and the protocol is
    /// forced to a port-capable one whenever any port value is present.
    ///
    /// Call only after [`RuleForm::validate`] returned `None`.
    pub fn to_payload(&self) -> RulePayload {
        let (source_address, source_address_type) = self.source_address.encode();
        let (destination_address, destination_address_type) = self.destination_address.encode();

        let (source_port, source_port_type) = match &self.source_port {
            FieldEntry::Manual(value) => (normalize_port_list(value), None),
            group => group.encode(),
        };
        let (destination_port, destination_port_type) = match &self.destination_port {
            FieldEntry::Manual(value) => (normalize_port_list(value), None),
            group => group.encode(),
        };

        let ports_present = source_port.is_some() || destination_port.is_some();
        let protocol = if self.protocol.trim().is_empty() && !ports_present {
            None
        } else {
            Some(codec::resolve_protocol_for_ports(
                &self.protocol,
                ports_present,
            ))
        };

        let description = {
            let trimmed = self.description.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        };

        RulePayload {
            number: self.number.trim().to_string(),
            action: self.action,
            protocol,
            description,
            source_address,
            source_port,
            destination_address,
            destination_port,
            disabled: self.disabled,
            original_number: self.original_number.clone(),
            source_address_type,
            source_port_type,
            destination_address_type,
            destination_port_type,
        }
    }
}

/// Zone creation form state
#[derive(Debug, Clone, Default)]
pub struct ZoneForm {
    pub name: String,
    pub interface: Option<String>,
    pub error: Option<String>,
}

impl ZoneForm {
    /// Validates the form, returning the normalized zone name and interface.
    pub fn validate(&self) -> Result<(String, String), String> {
        let name = crate::core::ruleset::normalize_zone(&self.name);
        validators::validate_zone_name(&name)?;
        let interface = self
            .interface
            .clone()
            .filter(|i| !i.is_empty())
            .ok_or_else(|| "Select an interface to assign".to_string())?;
        Ok((name, interface))
    }
}
