//! Rule CRUD operations and form handling
//!
//! Handles the message variants for creating, editing, deleting, and
//! toggling individual rules. Every mutation round-trips through the
//! router and finishes in [`handle_mutation_completed`], which replaces
//! the rule store with the detail payload the router returns.

use crate::api::ApiClient;
use crate::app::forms::RuleForm;
use crate::app::{Banner, Message, MutationKind, PendingConfirm, State};
use crate::audit::{self, EventType};
use crate::core::ruleset::{RulePayload, RuleSetDetail};
use iced::Task;

/// Opens the form for a new rule, pre-filled with the next free number.
pub(crate) fn handle_add_rule_clicked(state: &mut State) -> Task<Message> {
    if state.guard_pending_order() || state.guard_no_selection() {
        return Task::none();
    }
    state.rule_form = Some(RuleForm::for_new_rule(
        state.editor.store.next_rule_number(),
    ));
    state.form_errors = None;
    Task::none()
}

/// Opens the form pre-filled from an existing rule.
pub(crate) fn handle_edit_rule_clicked(state: &mut State, id: &str) -> Task<Message> {
    if state.guard_pending_order() {
        return Task::none();
    }
    if let Some(rule) = state.editor.store.find(id) {
        state.rule_form = Some(RuleForm::for_existing_rule(rule));
        state.form_errors = None;
    }
    Task::none()
}

pub(crate) fn handle_cancel_rule_form(state: &mut State) -> Task<Message> {
    state.rule_form = None;
    state.form_errors = None;
    Task::none()
}

/// Validates the open form and submits it as a create or update.
pub(crate) fn handle_save_rule_form(state: &mut State) -> Task<Message> {
    let Some(form) = &state.rule_form else {
        return Task::none();
    };
    if let Some(errors) = form.validate() {
        state.form_errors = Some(errors);
        return Task::none();
    }
    state.form_errors = None;

    // Assemble the request before touching the rest of the state: the
    // borrow of the open form has to end before the client lookup.
    let payload = form.to_payload();
    let updating = form.original_number.is_some();

    let Some(api) = state.api_client() else {
        return Task::none();
    };
    let Some(name) = state.editor.selected_name.clone() else {
        state.banner = Some(Banner::warning("Select a rule set first"));
        return Task::none();
    };

    state.busy.saving_rule = true;
    let event_log = state.config.enable_event_log;

    if updating {
        submit_update(api, name, payload, event_log)
    } else {
        submit_create(api, name, payload, event_log)
    }
}

fn submit_create(
    api: ApiClient,
    name: String,
    payload: RulePayload,
    event_log: bool,
) -> Task<Message> {
    let task_name = name.clone();
    Task::perform(
        async move {
            let result = api.create_rule(&task_name, &payload).await;
            if event_log {
                audit::log_rule_event(
                    EventType::RuleCreated,
                    &task_name,
                    &payload.number,
                    result.is_ok(),
                    result.as_ref().err().map(ToString::to_string),
                )
                .await;
            }
            result.map_err(|e| e.to_string())
        },
        move |result| Message::MutationCompleted {
            kind: MutationKind::Create,
            name: name.clone(),
            result,
        },
    )
}

fn submit_update(
    api: ApiClient,
    name: String,
    payload: RulePayload,
    event_log: bool,
) -> Task<Message> {
    let task_name = name.clone();
    Task::perform(
        async move {
            let number = payload
                .original_number
                .clone()
                .unwrap_or_else(|| payload.number.clone());
            let result = api.update_rule(&task_name, &number, &payload).await;
            if event_log {
                audit::log_rule_event(
                    EventType::RuleUpdated,
                    &task_name,
                    &number,
                    result.is_ok(),
                    result.as_ref().err().map(ToString::to_string),
                )
                .await;
            }
            result.map_err(|e| e.to_string())
        },
        move |result| Message::MutationCompleted {
            kind: MutationKind::Update,
            name: name.clone(),
            result,
        },
    )
}

/// Handles the delete button on a rule row. Asks for confirmation when
/// the preference is on, otherwise deletes immediately.
pub(crate) fn handle_delete_rule_clicked(state: &mut State, id: String) -> Task<Message> {
    if state.guard_pending_order() {
        return Task::none();
    }
    if state.config.confirm_destructive {
        state.pending = Some(PendingConfirm::DeleteRule(id));
        return Task::none();
    }
    start_delete(state, id)
}

pub(crate) fn start_delete(state: &mut State, id: String) -> Task<Message> {
    let Some(api) = state.api_client() else {
        return Task::none();
    };
    let Some(name) = state.editor.selected_name.clone() else {
        return Task::none();
    };
    state.busy.deleting_rule = true;
    let event_log = state.config.enable_event_log;
    let task_name = name.clone();
    Task::perform(
        async move {
            let result = api.delete_rule(&task_name, &id).await;
            if event_log {
                audit::log_rule_event(
                    EventType::RuleDeleted,
                    &task_name,
                    &id,
                    result.is_ok(),
                    result.as_ref().err().map(ToString::to_string),
                )
                .await;
            }
            result.map_err(|e| e.to_string())
        },
        move |result| Message::MutationCompleted {
            kind: MutationKind::Delete,
            name: name.clone(),
            result,
        },
    )
}

/// Handles the enable/disable toggle on a rule row.
pub(crate) fn handle_toggle_rule_clicked(state: &mut State, id: String) -> Task<Message> {
    if state.guard_pending_order() {
        return Task::none();
    }
    let Some(rule) = state.editor.store.find(&id) else {
        return Task::none();
    };
    let disable = !rule.disabled;
    if disable && state.config.confirm_destructive {
        state.pending = Some(PendingConfirm::ToggleRule { id, disable });
        return Task::none();
    }
    start_toggle(state, id, disable)
}

pub(crate) fn start_toggle(state: &mut State, id: String, disable: bool) -> Task<Message> {
    let Some(api) = state.api_client() else {
        return Task::none();
    };
    let Some(name) = state.editor.selected_name.clone() else {
        return Task::none();
    };
    state.busy.toggling_rule = true;
    let event_log = state.config.enable_event_log;
    let task_name = name.clone();
    Task::perform(
        async move {
            let result = api.toggle_rule(&task_name, &id, disable).await;
            if event_log {
                audit::log_rule_event(
                    EventType::RuleToggled,
                    &task_name,
                    &id,
                    result.is_ok(),
                    result.as_ref().err().map(ToString::to_string),
                )
                .await;
            }
            result.map_err(|e| e.to_string())
        },
        move |result| Message::MutationCompleted {
            kind: MutationKind::Toggle,
            name: name.clone(),
            result,
        },
    )
}

/// Finishes any rule mutation: clears the busy flag, applies the returned
/// detail payload, and reports the outcome in a banner.
pub(crate) fn handle_mutation_completed(
    state: &mut State,
    kind: MutationKind,
    name: &str,
    result: Result<RuleSetDetail, String>,
) -> Task<Message> {
    match kind {
        MutationKind::Create | MutationKind::Update => state.busy.saving_rule = false,
        MutationKind::Delete => state.busy.deleting_rule = false,
        MutationKind::Toggle => state.busy.toggling_rule = false,
        MutationKind::Reorder => state.busy.committing_order = false,
    }

    match result {
        Ok(detail) => {
            state.editor.apply_detail(name, detail);
            if matches!(kind, MutationKind::Create | MutationKind::Update) {
                state.rule_form = None;
                state.form_errors = None;
            }
            state.banner = Some(Banner::success(match kind {
                MutationKind::Create => "Rule created",
                MutationKind::Update => "Rule updated",
                MutationKind::Delete => "Rule deleted",
                MutationKind::Toggle => "Rule toggled",
                MutationKind::Reorder => "Order saved",
            }));
        }
        Err(msg) => {
            // A failed commit leaves the working order in place so the user
            // can retry or discard.
            state.banner = Some(Banner::from_api_error(&msg));
        }
    }
    Task::none()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::handlers::test_utils::{create_test_state, state_with_rules};
    use crate::app::BannerKind;
    use crate::core::test_helpers::detail_with_numbers;

    #[test]
    fn test_add_rule_requires_a_selection() {
        let mut state = create_test_state();

        let _ = handle_add_rule_clicked(&mut state);

        assert!(state.rule_form.is_none());
        assert!(state.banner.is_some());
    }

    #[test]
    fn test_add_rule_prefills_the_next_free_number() {
        let mut state = state_with_rules(&[10, 20]);

        let _ = handle_add_rule_clicked(&mut state);

        let form = state.rule_form.expect("form should open");
        assert_eq!(form.number, "21");
        assert!(form.original_number.is_none());
    }

    #[test]
    fn test_add_rule_blocked_while_order_is_dirty() {
        let mut state = state_with_rules(&[10, 20]);
        state.editor.store.move_rule(0, 1);

        let _ = handle_add_rule_clicked(&mut state);

        assert!(state.rule_form.is_none());
        assert!(state.banner.is_some());
    }

    #[test]
    fn test_edit_rule_prefills_from_the_store() {
        let mut state = state_with_rules(&[10, 20]);

        let _ = handle_edit_rule_clicked(&mut state, "20");

        let form = state.rule_form.expect("form should open");
        assert_eq!(form.number, "20");
        assert_eq!(form.original_number.as_deref(), Some("20"));
    }

    #[test]
    fn test_save_rule_form_reports_validation_errors() {
        let mut state = state_with_rules(&[10]);
        let mut form = RuleForm::for_new_rule(20);
        form.number = "not-a-number".to_string();
        state.rule_form = Some(form);

        let _ = handle_save_rule_form(&mut state);

        assert!(state.form_errors.is_some());
        assert!(!state.busy.saving_rule);
    }

    #[test]
    fn test_save_rule_form_without_a_client_keeps_the_form() {
        let mut state = state_with_rules(&[10]);
        state.rule_form = Some(RuleForm::for_new_rule(20));

        let _ = handle_save_rule_form(&mut state);

        assert!(state.form_errors.is_none());
        assert!(state.rule_form.is_some());
        assert!(state.banner.is_some());
        assert!(!state.busy.saving_rule);
    }

    #[test]
    fn test_delete_asks_for_confirmation_when_enabled() {
        let mut state = state_with_rules(&[10]);
        state.config.confirm_destructive = true;

        let _ = handle_delete_rule_clicked(&mut state, "10".to_string());

        assert!(matches!(
            state.pending,
            Some(PendingConfirm::DeleteRule(ref id)) if id == "10"
        ));
    }

    #[test]
    fn test_enabling_a_disabled_rule_skips_confirmation() {
        let mut state = state_with_rules(&[10]);
        state.config.confirm_destructive = true;
        let mut detail = detail_with_numbers(&[10]);
        detail.rules[0].disabled = true;
        state.editor.apply_detail("lan-wan", detail);

        let _ = handle_toggle_rule_clicked(&mut state, "10".to_string());

        // Enabling is not destructive, so no confirmation is queued.
        assert!(state.pending.is_none());
    }

    #[test]
    fn test_successful_mutation_replaces_the_store_and_closes_the_form() {
        let mut state = state_with_rules(&[10, 20]);
        state.rule_form = Some(RuleForm::for_new_rule(30));
        state.busy.saving_rule = true;

        let _ = handle_mutation_completed(
            &mut state,
            MutationKind::Create,
            "lan-wan",
            Ok(detail_with_numbers(&[10, 20, 30])),
        );

        assert!(!state.busy.saving_rule);
        assert!(state.rule_form.is_none());
        assert_eq!(state.editor.store.order_ids(), ["10", "20", "30"]);
        let banner = state.banner.expect("success banner");
        assert_eq!(banner.kind, BannerKind::Success);
    }

    #[test]
    fn test_failed_commit_keeps_the_working_order() {
        let mut state = state_with_rules(&[10, 20]);
        state.editor.store.move_rule(0, 1);
        state.busy.committing_order = true;

        let _ = handle_mutation_completed(
            &mut state,
            MutationKind::Reorder,
            "lan-wan",
            Err("commit failed".to_string()),
        );

        assert!(!state.busy.committing_order);
        assert!(state.editor.store.is_dirty());
        assert_eq!(state.editor.store.order_ids(), ["20", "10"]);
        let banner = state.banner.expect("error banner");
        assert_eq!(banner.kind, BannerKind::Error);
    }
}
