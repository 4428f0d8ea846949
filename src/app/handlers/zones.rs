//! Zone creation and deletion
//!
//! Zone mutations return the full dashboard payload, so completions run
//! the same reconciliation as an overview refresh.

use crate::app::forms::ZoneForm;
use crate::app::handlers::selection::fetch_detail;
use crate::app::{Banner, Message, PendingConfirm, State};
use crate::audit::{self, EventType};
use crate::core::ruleset::ZoneSnapshot;
use iced::Task;

/// Opens the zone creation modal.
pub(crate) fn handle_add_zone_clicked(state: &mut State) -> Task<Message> {
    if state.guard_pending_order() {
        return Task::none();
    }
    state.zone_form = Some(ZoneForm::default());
    Task::none()
}

pub(crate) fn handle_cancel_zone_form(state: &mut State) -> Task<Message> {
    state.zone_form = None;
    Task::none()
}

pub(crate) fn handle_zone_name_changed(state: &mut State, name: String) -> Task<Message> {
    if let Some(form) = &mut state.zone_form {
        form.name = name;
        form.error = None;
    }
    Task::none()
}

pub(crate) fn handle_zone_interface_selected(
    state: &mut State,
    interface: String,
) -> Task<Message> {
    if let Some(form) = &mut state.zone_form {
        form.interface = Some(interface);
        form.error = None;
    }
    Task::none()
}

/// Validates and submits the zone creation form.
pub(crate) fn handle_submit_zone_form(state: &mut State) -> Task<Message> {
    let Some(form) = &mut state.zone_form else {
        return Task::none();
    };
    let (zone, interface) = match form.validate() {
        Ok(pair) => pair,
        Err(message) => {
            form.error = Some(message);
            return Task::none();
        }
    };
    let Some(api) = state.api_client() else {
        return Task::none();
    };
    state.busy.zone = true;
    let event_log = state.config.enable_event_log;
    let success_message = format!("Zone {zone} created");
    Task::perform(
        async move {
            let result = api.create_zone(&zone, &interface).await;
            if event_log {
                audit::log_zone_event(
                    EventType::ZoneCreated,
                    &zone,
                    result.is_ok(),
                    result.as_ref().err().map(ToString::to_string),
                )
                .await;
            }
            result.map_err(|e| e.to_string())
        },
        move |result| Message::ZoneMutationCompleted {
            result,
            success_message: success_message.clone(),
        },
    )
}

/// Handles the delete button on a zone card.
pub(crate) fn handle_delete_zone_clicked(state: &mut State, zone: String) -> Task<Message> {
    if state.guard_pending_order() {
        return Task::none();
    }
    if state.config.confirm_destructive {
        state.pending = Some(PendingConfirm::DeleteZone(zone));
        return Task::none();
    }
    start_delete_zone(state, zone)
}

pub(crate) fn start_delete_zone(state: &mut State, zone: String) -> Task<Message> {
    let Some(api) = state.api_client() else {
        return Task::none();
    };
    state.busy.zone = true;
    let event_log = state.config.enable_event_log;
    let success_message = format!("Zone {zone} deleted");
    Task::perform(
        async move {
            let result = api.delete_zone(&zone).await;
            if event_log {
                audit::log_zone_event(
                    EventType::ZoneDeleted,
                    &zone,
                    result.is_ok(),
                    result.as_ref().err().map(ToString::to_string),
                )
                .await;
            }
            result.map_err(|e| e.to_string())
        },
        move |result| Message::ZoneMutationCompleted {
            result,
            success_message: success_message.clone(),
        },
    )
}

/// Finishes a zone mutation: reconciles the returned dashboard payload
/// and follows up with a detail fetch when the selection survived.
pub(crate) fn handle_zone_mutation_completed(
    state: &mut State,
    result: Result<ZoneSnapshot, String>,
    success_message: &str,
) -> Task<Message> {
    state.busy.zone = false;
    match result {
        Ok(snapshot) => {
            state.zone_form = None;
            state.banner = Some(Banner::success(success_message));
            if let Some(request) = state.editor.apply_zone_update(snapshot) {
                if let Some(api) = state.api_client() {
                    state.busy.detail = true;
                    return fetch_detail(api, request);
                }
            }
            Task::none()
        }
        Err(msg) => {
            state.banner = Some(Banner::from_api_error(&msg));
            Task::none()
        }
    }
}
