pub mod forms;
pub mod handlers;
pub mod helpers;
pub mod ui_components;
pub mod view;

use crate::api::ApiClient;
use crate::config::AppConfig;
use crate::core::codec::{GroupType, PortPreset, PORT_PRESETS};
use crate::core::editor::EditorState;
use crate::core::error::ApiErrorPattern;
use crate::core::ruleset::{Action, RuleSetDetail, ZoneSnapshot};
use forms::{FieldEntry, FormErrors, RuleForm, ZoneForm};
use iced::{Element, Task};
use std::time::Duration;
use uuid::Uuid;

pub struct State {
    pub editor: EditorState,
    /// `None` when the HTTP client could not be built; handlers no-op then
    pub api: Option<ApiClient>,
    pub config: AppConfig,
    pub current_theme: crate::theme::ThemeChoice,
    pub theme: crate::theme::AppTheme,
    pub rule_form: Option<RuleForm>,
    pub form_errors: Option<FormErrors>,
    pub zone_form: Option<ZoneForm>,
    pub rule_search: String,
    pub banner: Option<Banner>,
    pub pending: Option<PendingConfirm>,
    pub busy: BusyFlags,
    pub dragged_rule_id: Option<String>,
    pub hovered_drop_target_id: Option<String>,
}

/// One in-flight flag per async operation family, so the UI can disable
/// exactly the controls that would race.
#[derive(Debug, Clone, Copy, Default)]
#[allow(clippy::struct_excessive_bools)]
pub struct BusyFlags {
    pub overview: bool,
    pub detail: bool,
    pub saving_rule: bool,
    pub deleting_rule: bool,
    pub toggling_rule: bool,
    pub committing_order: bool,
    pub zone: bool,
}

impl BusyFlags {
    /// `true` while any rule-level mutation is outstanding.
    pub const fn any_mutation(&self) -> bool {
        self.saving_rule
            || self.deleting_rule
            || self.toggling_rule
            || self.committing_order
            || self.zone
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Error,
    Warning,
    Success,
}

/// Transient status banner shown at the top of the workspace
#[derive(Debug, Clone)]
pub struct Banner {
    pub kind: BannerKind,
    pub message: String,
    pub suggestions: Vec<String>,
    pub remaining_secs: u32,
}

impl Banner {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: BannerKind::Error,
            message: message.into(),
            suggestions: Vec::new(),
            remaining_secs: 8,
        }
    }

    /// Error banner built from a raw API error, translated into the
    /// user-facing message and recovery suggestions.
    pub fn from_api_error(raw: &str) -> Self {
        let translation = ApiErrorPattern::match_error(raw);
        Self {
            kind: BannerKind::Error,
            message: translation.user_message,
            suggestions: translation.suggestions,
            remaining_secs: 8,
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            kind: BannerKind::Warning,
            message: message.into(),
            suggestions: Vec::new(),
            remaining_secs: 6,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: BannerKind::Success,
            message: message.into(),
            suggestions: Vec::new(),
            remaining_secs: 4,
        }
    }
}

/// Action awaiting the user's confirmation in the overlay
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingConfirm {
    DeleteRule(String),
    ToggleRule { id: String, disable: bool },
    DeleteZone(String),
    CommitOrder,
}

/// Which rule mutation an async completion belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Create,
    Update,
    Delete,
    Toggle,
    Reorder,
}

/// The four free-form endpoint fields of the rule form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    SourceAddress,
    SourcePort,
    DestinationAddress,
    DestinationPort,
}

impl FormField {
    /// Default group kind when the field switches into group mode.
    pub const fn default_group_type(self) -> GroupType {
        match self {
            FormField::SourceAddress | FormField::DestinationAddress => GroupType::AddressGroup,
            FormField::SourcePort | FormField::DestinationPort => GroupType::PortGroup,
        }
    }
}

/// Entry in the destination-port quick pick list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresetChoice {
    Other,
    Preset(&'static PortPreset),
}

impl PresetChoice {
    pub fn all() -> Vec<Self> {
        std::iter::once(Self::Other)
            .chain(PORT_PRESETS.iter().map(Self::Preset))
            .collect()
    }
}

impl std::fmt::Display for PresetChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Other => write!(f, "Other"),
            Self::Preset(preset) => write!(f, "{preset}"),
        }
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    // Data loading
    OverviewLoaded(Result<ZoneSnapshot, String>),
    DetailLoaded {
        token: Uuid,
        name: String,
        result: Result<RuleSetDetail, String>,
    },
    RefreshClicked,

    // Selection
    ZoneSelected(String),
    RuleSetSelected(String),
    RuleSearchChanged(String),

    // Rule form
    AddRuleClicked,
    EditRuleClicked(String),
    CancelRuleForm,
    SaveRuleForm,
    RuleNumberChanged(String),
    RuleActionChanged(Action),
    RuleProtocolChanged(String),
    RuleDescriptionChanged(String),
    FieldTextChanged(FormField, String),
    FieldGroupToggled(FormField, bool),
    FieldGroupTypeChanged(FormField, GroupType),
    FieldGroupNameChanged(FormField, String),
    PresetSelected(PresetChoice),
    RuleDisabledToggled(bool),

    // Rule mutations
    DeleteRuleClicked(String),
    ToggleRuleClicked(String),
    MutationCompleted {
        kind: MutationKind,
        name: String,
        result: Result<RuleSetDetail, String>,
    },

    // Reordering
    RuleDragStart(String),
    RuleDropped(String),
    RuleHoverStart(String),
    RuleHoverEnd,
    DragCancelled,
    CommitOrderClicked,
    DiscardOrderClicked,

    // Zones
    AddZoneClicked,
    ZoneNameChanged(String),
    ZoneInterfaceSelected(String),
    CancelZoneForm,
    SubmitZoneForm,
    DeleteZoneClicked(String),
    ZoneMutationCompleted {
        result: Result<ZoneSnapshot, String>,
        success_message: String,
    },

    // Confirmation overlay
    ConfirmPending,
    CancelPending,

    // Settings
    ThemeSelected(crate::theme::ThemeChoice),
    ConfirmDestructiveToggled(bool),
    ConfirmReorderToggled(bool),
    EventLogToggled(bool),
    ConfigSaved(Result<(), String>),

    // Chrome
    DismissBanner,
    BannerTick,
    AuditLogWritten,
    EventOccurred(iced::Event),
}

impl State {
    pub fn new() -> (Self, Task<Message>) {
        let config = crate::config::load_config_blocking();
        let current_theme = config.theme_choice;
        let theme = current_theme.to_theme();

        let (api, banner) = match ApiClient::new(&config.server_url) {
            Ok(client) => (Some(client), None),
            Err(e) => {
                tracing::error!("Failed to build HTTP client: {}", e);
                (
                    None,
                    Some(Banner::error(format!("HTTP client unavailable: {e}"))),
                )
            }
        };

        let mut busy = BusyFlags::default();
        let task = match &api {
            Some(client) => {
                busy.overview = true;
                handlers::selection::load_overview(client.clone())
            }
            None => Task::none(),
        };

        (
            Self {
                editor: EditorState::new(),
                api,
                config,
                current_theme,
                theme,
                rule_form: None,
                form_errors: None,
                zone_form: None,
                rule_search: String::new(),
                banner,
                pending: None,
                busy,
                dragged_rule_id: None,
                hovered_drop_target_id: None,
            },
            task,
        )
    }

    pub fn title(&self) -> String {
        match &self.editor.selected_name {
            Some(name) => format!("Zonewall — {name}"),
            None => "Zonewall".to_string(),
        }
    }

    /// Clones the HTTP client, or surfaces the startup failure again.
    pub(crate) fn api_client(&mut self) -> Option<ApiClient> {
        if self.api.is_none() {
            self.banner = Some(Banner::error(
                "HTTP client unavailable; restart the application",
            ));
        }
        self.api.clone()
    }

    /// Blocks an action while the working order has unsaved changes.
    /// Returns `true` when the action must not proceed.
    pub(crate) fn guard_pending_order(&mut self) -> bool {
        if self.editor.store.is_dirty() {
            self.banner = Some(Banner::warning(
                "Save or discard the pending order before making other changes",
            ));
            return true;
        }
        false
    }

    /// Blocks rule actions until a rule set is selected.
    pub(crate) fn guard_no_selection(&mut self) -> bool {
        if self.editor.selected_name.is_none() {
            self.banner = Some(Banner::warning("Select a rule set first"));
            return true;
        }
        false
    }

    /// Closes any open form and drag state when the selection changes.
    pub(crate) fn close_forms(&mut self) {
        self.rule_form = None;
        self.form_errors = None;
        self.zone_form = None;
        self.pending = None;
        self.dragged_rule_id = None;
        self.hovered_drop_target_id = None;
    }

    pub fn view(&self) -> Element<'_, Message> {
        view::view(self)
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            // Data loading
            Message::OverviewLoaded(result) => handlers::handle_overview_loaded(self, result),
            Message::DetailLoaded {
                token,
                name,
                result,
            } => handlers::handle_detail_loaded(self, token, &name, result),
            Message::RefreshClicked => handlers::handle_refresh(self),

            // Selection
            Message::ZoneSelected(zone) => handlers::handle_zone_selected(self, zone),
            Message::RuleSetSelected(name) => handlers::handle_rule_set_selected(self, name),
            Message::RuleSearchChanged(query) => handlers::handle_search_changed(self, query),

            // Rule form
            Message::AddRuleClicked => handlers::handle_add_rule_clicked(self),
            Message::EditRuleClicked(id) => handlers::handle_edit_rule_clicked(self, &id),
            Message::CancelRuleForm => handlers::handle_cancel_rule_form(self),
            Message::SaveRuleForm => handlers::handle_save_rule_form(self),
            Message::RuleNumberChanged(number) => {
                if let Some(form) = &mut self.rule_form {
                    form.number = number;
                }
                Task::none()
            }
            Message::RuleActionChanged(action) => {
                if let Some(form) = &mut self.rule_form {
                    form.action = action;
                }
                Task::none()
            }
            Message::RuleProtocolChanged(protocol) => {
                if let Some(form) = &mut self.rule_form {
                    form.protocol = protocol;
                }
                Task::none()
            }
            Message::RuleDescriptionChanged(description) => {
                if let Some(form) = &mut self.rule_form {
                    form.description = crate::validators::sanitize_description(&description);
                }
                Task::none()
            }
            Message::FieldTextChanged(field, value) => {
                if let Some(form) = &mut self.rule_form {
                    if let FieldEntry::Manual(text) = form.field_mut(field) {
                        *text = value;
                    }
                    if field == FormField::DestinationPort {
                        form.selected_preset = None;
                    }
                }
                Task::none()
            }
            Message::FieldGroupToggled(field, grouped) => {
                if let Some(form) = &mut self.rule_form {
                    *form.field_mut(field) = if grouped {
                        FieldEntry::Group {
                            group_type: field.default_group_type(),
                            name: String::new(),
                        }
                    } else {
                        FieldEntry::manual()
                    };
                    if field == FormField::DestinationPort {
                        form.selected_preset = None;
                    }
                }
                Task::none()
            }
            Message::FieldGroupTypeChanged(field, new_type) => {
                if let Some(form) = &mut self.rule_form {
                    if let FieldEntry::Group { group_type, .. } = form.field_mut(field) {
                        *group_type = new_type;
                    }
                }
                Task::none()
            }
            Message::FieldGroupNameChanged(field, new_name) => {
                if let Some(form) = &mut self.rule_form {
                    if let FieldEntry::Group { name, .. } = form.field_mut(field) {
                        *name = new_name;
                    }
                }
                Task::none()
            }
            Message::PresetSelected(choice) => {
                if let Some(form) = &mut self.rule_form {
                    match choice {
                        PresetChoice::Other => form.apply_preset(None),
                        PresetChoice::Preset(preset) => form.apply_preset(Some(preset)),
                    }
                }
                Task::none()
            }
            Message::RuleDisabledToggled(disabled) => {
                if let Some(form) = &mut self.rule_form {
                    form.disabled = disabled;
                }
                Task::none()
            }

            // Rule mutations
            Message::DeleteRuleClicked(id) => handlers::handle_delete_rule_clicked(self, id),
            Message::ToggleRuleClicked(id) => handlers::handle_toggle_rule_clicked(self, id),
            Message::MutationCompleted { kind, name, result } => {
                handlers::handle_mutation_completed(self, kind, &name, result)
            }

            // Reordering
            Message::RuleDragStart(id) => handlers::handle_drag_start(self, id),
            Message::RuleDropped(id) => handlers::handle_dropped(self, &id),
            Message::RuleHoverStart(id) => handlers::handle_hover_start(self, id),
            Message::RuleHoverEnd => handlers::handle_hover_end(self),
            Message::DragCancelled => handlers::handle_drag_cancelled(self),
            Message::CommitOrderClicked => handlers::handle_commit_clicked(self),
            Message::DiscardOrderClicked => handlers::handle_discard(self),

            // Zones
            Message::AddZoneClicked => handlers::handle_add_zone_clicked(self),
            Message::ZoneNameChanged(name) => handlers::handle_zone_name_changed(self, name),
            Message::ZoneInterfaceSelected(interface) => {
                handlers::handle_zone_interface_selected(self, interface)
            }
            Message::CancelZoneForm => handlers::handle_cancel_zone_form(self),
            Message::SubmitZoneForm => handlers::handle_submit_zone_form(self),
            Message::DeleteZoneClicked(zone) => handlers::handle_delete_zone_clicked(self, zone),
            Message::ZoneMutationCompleted {
                result,
                success_message,
            } => handlers::handle_zone_mutation_completed(self, result, &success_message),

            // Confirmation overlay
            Message::ConfirmPending => handlers::handle_confirm_pending(self),
            Message::CancelPending => handlers::handle_cancel_pending(self),

            // Settings
            Message::ThemeSelected(choice) => handlers::handle_theme_selected(self, choice),
            Message::ConfirmDestructiveToggled(on) => {
                self.config.confirm_destructive = on;
                handlers::persist_config(self)
            }
            Message::ConfirmReorderToggled(on) => {
                self.config.confirm_reorder = on;
                handlers::persist_config(self)
            }
            Message::EventLogToggled(on) => {
                self.config.enable_event_log = on;
                handlers::persist_config(self)
            }
            Message::ConfigSaved(result) => handlers::handle_config_saved(self, result),

            // Chrome
            Message::DismissBanner => handlers::handle_dismiss_banner(self),
            Message::BannerTick => handlers::handle_banner_tick(self),
            Message::AuditLogWritten => Task::none(),
            Message::EventOccurred(event) => handlers::handle_event(self, event),
        }
    }

    pub fn subscription(&self) -> iced::Subscription<Message> {
        iced::Subscription::batch(vec![
            iced::event::listen().map(Message::EventOccurred),
            if self.banner.is_some() {
                iced::time::every(Duration::from_secs(1)).map(|_| Message::BannerTick)
            } else {
                iced::Subscription::none()
            },
        ])
    }
}
