//! UI state management
//!
//! Handles UI chrome: theme switching, banner lifecycle, the confirmation
//! overlay, search, and keyboard shortcuts.

use crate::app::{Message, PendingConfirm, State};
use iced::Task;

/// Handles theme selection and persists the choice.
pub(crate) fn handle_theme_selected(
    state: &mut State,
    choice: crate::theme::ThemeChoice,
) -> Task<Message> {
    state.current_theme = choice;
    state.theme = choice.to_theme();
    state.config.theme_choice = choice;
    persist_config(state)
}

/// Writes the current config to disk in the background.
pub(crate) fn persist_config(state: &State) -> Task<Message> {
    let config = state.config.clone();
    Task::perform(
        async move {
            crate::config::save_config(&config)
                .await
                .map_err(|e| e.to_string())
        },
        Message::ConfigSaved,
    )
}

pub(crate) fn handle_config_saved(state: &mut State, result: Result<(), String>) -> Task<Message> {
    if let Err(msg) = result {
        tracing::warn!("Failed to save config: {}", msg);
        state.banner = Some(crate::app::Banner::warning(format!(
            "Settings could not be saved: {msg}"
        )));
    }
    Task::none()
}

/// Handles the once-a-second tick that expires the active banner.
pub(crate) fn handle_banner_tick(state: &mut State) -> Task<Message> {
    if let Some(banner) = &mut state.banner {
        banner.remaining_secs = banner.remaining_secs.saturating_sub(1);
        if banner.remaining_secs == 0 {
            state.banner = None;
        }
    }
    Task::none()
}

pub(crate) fn handle_dismiss_banner(state: &mut State) -> Task<Message> {
    state.banner = None;
    Task::none()
}

pub(crate) fn handle_search_changed(state: &mut State, query: String) -> Task<Message> {
    state.rule_search = query;
    Task::none()
}

/// Runs the action behind the confirmation overlay.
pub(crate) fn handle_confirm_pending(state: &mut State) -> Task<Message> {
    let Some(pending) = state.pending.take() else {
        return Task::none();
    };
    match pending {
        PendingConfirm::DeleteRule(id) => super::rules::start_delete(state, id),
        PendingConfirm::ToggleRule { id, disable } => super::rules::start_toggle(state, id, disable),
        PendingConfirm::DeleteZone(zone) => super::zones::start_delete_zone(state, zone),
        PendingConfirm::CommitOrder => super::reorder::start_commit(state),
    }
}

pub(crate) fn handle_cancel_pending(state: &mut State) -> Task<Message> {
    state.pending = None;
    Task::none()
}

/// Handles raw window events: keyboard shortcuts only.
pub(crate) fn handle_event(state: &mut State, event: iced::Event) -> Task<Message> {
    if let iced::Event::Keyboard(iced::keyboard::Event::KeyPressed { key, modifiers, .. }) = event {
        match key.as_ref() {
            iced::keyboard::Key::Named(iced::keyboard::key::Named::Enter)
                if state.pending.is_some() =>
            {
                return Task::done(Message::ConfirmPending);
            }
            iced::keyboard::Key::Named(iced::keyboard::key::Named::Enter)
                if state.zone_form.is_some() =>
            {
                return Task::done(Message::SubmitZoneForm);
            }
            iced::keyboard::Key::Named(iced::keyboard::key::Named::Enter)
                if state.rule_form.is_some() =>
            {
                return Task::done(Message::SaveRuleForm);
            }
            iced::keyboard::Key::Named(iced::keyboard::key::Named::Escape) => {
                if state.pending.is_some() {
                    return Task::done(Message::CancelPending);
                }
                if state.zone_form.is_some() {
                    return Task::done(Message::CancelZoneForm);
                }
                if state.rule_form.is_some() {
                    return Task::done(Message::CancelRuleForm);
                }
                if state.dragged_rule_id.is_some() {
                    return Task::done(Message::DragCancelled);
                }
                if !state.rule_search.is_empty() {
                    state.rule_search.clear();
                }
            }
            iced::keyboard::Key::Character("n") if modifiers.command() || modifiers.control() => {
                if state.rule_form.is_none() && state.pending.is_none() {
                    return Task::done(Message::AddRuleClicked);
                }
            }
            iced::keyboard::Key::Character("s") if modifiers.command() || modifiers.control() => {
                if state.editor.store.is_dirty() {
                    return Task::done(Message::CommitOrderClicked);
                }
            }
            iced::keyboard::Key::Character("r") if modifiers.command() || modifiers.control() => {
                return Task::done(Message::RefreshClicked);
            }
            _ => {}
        }
    }
    Task::none()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::handlers::test_utils::create_test_state;
    use crate::app::Banner;

    #[test]
    fn test_banner_tick_expires_banner() {
        let mut state = create_test_state();
        state.banner = Some(Banner {
            remaining_secs: 1,
            ..Banner::success("done")
        });
        let _task = handle_banner_tick(&mut state);
        assert!(state.banner.is_none());
    }

    #[test]
    fn test_banner_tick_counts_down() {
        let mut state = create_test_state();
        state.banner = Some(Banner::success("done"));
        let _task = handle_banner_tick(&mut state);
        let banner = state.banner.expect("banner still shown");
        assert!(banner.remaining_secs > 0);
    }

    #[test]
    fn test_cancel_pending_clears_confirmation() {
        let mut state = create_test_state();
        state.pending = Some(PendingConfirm::CommitOrder);
        let _task = handle_cancel_pending(&mut state);
        assert!(state.pending.is_none());
    }
}
