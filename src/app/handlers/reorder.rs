//! Drag-and-drop reordering and order commit/discard
//!
//! Reordering is local until the user saves: drags rearrange the working
//! copy in the rule store, and the dirty store gates every other mutation
//! until the order is committed to the router or discarded.

use crate::app::{Banner, Message, MutationKind, PendingConfirm, State};
use crate::audit::{self, EventType};
use iced::Task;

pub(crate) fn handle_drag_start(state: &mut State, id: String) -> Task<Message> {
    if state.rule_form.is_some() || state.pending.is_some() {
        return Task::none();
    }
    state.dragged_rule_id = Some(id);
    state.hovered_drop_target_id = None;
    Task::none()
}

/// Handles a drop onto a target row: moves the dragged rule to the
/// target's position in the working order.
pub(crate) fn handle_dropped(state: &mut State, target_id: &str) -> Task<Message> {
    if let Some(dragged_id) = state.dragged_rule_id.take() {
        if dragged_id != target_id {
            let rules = state.editor.store.rules();
            let from = rules.iter().position(|r| r.id == dragged_id);
            let to = rules.iter().position(|r| r.id == target_id);
            if let (Some(from), Some(to)) = (from, to) {
                state.editor.store.move_rule(from, to);
            }
        }
    }
    state.hovered_drop_target_id = None;
    Task::none()
}

pub(crate) fn handle_hover_start(state: &mut State, id: String) -> Task<Message> {
    if state.dragged_rule_id.is_some() {
        state.hovered_drop_target_id = Some(id);
    }
    Task::none()
}

pub(crate) fn handle_hover_end(state: &mut State) -> Task<Message> {
    state.hovered_drop_target_id = None;
    Task::none()
}

pub(crate) fn handle_drag_cancelled(state: &mut State) -> Task<Message> {
    state.dragged_rule_id = None;
    state.hovered_drop_target_id = None;
    Task::none()
}

/// Handles the "Save Order" button: confirms first when the preference
/// is on, otherwise commits straight away.
pub(crate) fn handle_commit_clicked(state: &mut State) -> Task<Message> {
    if !state.editor.store.is_dirty() {
        return Task::none();
    }
    if state.config.confirm_reorder {
        state.pending = Some(PendingConfirm::CommitOrder);
        return Task::none();
    }
    start_commit(state)
}

/// Sends the working order to the router.
pub(crate) fn start_commit(state: &mut State) -> Task<Message> {
    let Some(api) = state.api_client() else {
        return Task::none();
    };
    let Some(name) = state.editor.selected_name.clone() else {
        return Task::none();
    };
    let order = state.editor.store.order_ids();
    state.busy.committing_order = true;
    let event_log = state.config.enable_event_log;
    let task_name = name.clone();
    Task::perform(
        async move {
            let result = api.commit_order(&task_name, &order).await;
            if event_log {
                audit::log_order_event(
                    EventType::OrderCommitted,
                    &task_name,
                    &order,
                    result.is_ok(),
                    result.as_ref().err().map(ToString::to_string),
                )
                .await;
            }
            result.map_err(|e| e.to_string())
        },
        move |result| Message::MutationCompleted {
            kind: MutationKind::Reorder,
            name: name.clone(),
            result,
        },
    )
}

/// Handles the "Discard" button: restores the saved order locally.
pub(crate) fn handle_discard(state: &mut State) -> Task<Message> {
    if !state.editor.store.is_dirty() {
        return Task::none();
    }
    let order = state.editor.store.order_ids();
    state.editor.store.discard();
    state.dragged_rule_id = None;
    state.hovered_drop_target_id = None;
    state.banner = Some(Banner::success("Order discarded"));

    if state.config.enable_event_log {
        if let Some(name) = state.editor.selected_name.clone() {
            return Task::perform(
                async move {
                    audit::log_order_event(EventType::OrderDiscarded, &name, &order, true, None)
                        .await;
                },
                |()| Message::AuditLogWritten,
            );
        }
    }
    Task::none()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::handlers::test_utils::state_with_rules;

    #[test]
    fn test_drop_moves_dragged_rule_to_target_position() {
        let mut state = state_with_rules(&[10, 20, 30]);

        let _ = handle_drag_start(&mut state, "10".to_string());
        let _ = handle_dropped(&mut state, "30");

        assert_eq!(state.editor.store.order_ids(), ["20", "30", "10"]);
        assert!(state.editor.store.is_dirty());
        assert!(state.dragged_rule_id.is_none());
    }

    #[test]
    fn test_drop_on_self_leaves_order_clean() {
        let mut state = state_with_rules(&[10, 20]);

        let _ = handle_drag_start(&mut state, "20".to_string());
        let _ = handle_dropped(&mut state, "20");

        assert!(!state.editor.store.is_dirty());
        assert_eq!(state.editor.store.order_ids(), ["10", "20"]);
    }

    #[test]
    fn test_drag_start_ignored_while_form_open() {
        let mut state = state_with_rules(&[10, 20]);
        state.rule_form = Some(crate::app::forms::RuleForm::for_new_rule(30));

        let _ = handle_drag_start(&mut state, "10".to_string());

        assert!(state.dragged_rule_id.is_none());
    }

    #[test]
    fn test_discard_restores_saved_order() {
        let mut state = state_with_rules(&[10, 20, 30]);
        let _ = handle_drag_start(&mut state, "30".to_string());
        let _ = handle_dropped(&mut state, "10");
        assert!(state.editor.store.is_dirty());

        let _ = handle_discard(&mut state);

        assert!(!state.editor.store.is_dirty());
        assert_eq!(state.editor.store.order_ids(), ["10", "20", "30"]);
    }

    #[test]
    fn test_commit_requires_a_dirty_store() {
        let mut state = state_with_rules(&[10, 20]);

        let _ = handle_commit_clicked(&mut state);

        assert!(state.pending.is_none());
        assert!(!state.busy.committing_order);
    }

    #[test]
    fn test_commit_asks_for_confirmation_when_enabled() {
        let mut state = state_with_rules(&[10, 20]);
        state.config.confirm_reorder = true;
        let _ = handle_drag_start(&mut state, "20".to_string());
        let _ = handle_dropped(&mut state, "10");

        let _ = handle_commit_clicked(&mut state);

        assert!(matches!(state.pending, Some(PendingConfirm::CommitOrder)));
    }
}
