//! Workspace area: rule-set header, pending-order bar, and the rule table

use crate::app::helpers::{rule_endpoint_label, zone_pair_label};
use crate::app::ui_components::{
    card_container, danger_button, dirty_button, drop_target_container, primary_button,
    secondary_button, warning_banner_container,
};
use crate::app::{Message, State};
use crate::core::codec::format_protocol_display;
use crate::core::ruleset::Rule;
use iced::widget::{button, column, container, mouse_area, row, scrollable, text, Id};
use iced::{Alignment, Element, Length};

pub(super) fn view_workspace(state: &State) -> Element<'_, Message> {
    let theme = &state.theme;

    let Some(name) = state.editor.selected_name.as_deref() else {
        return container(
            text("Select a zone and rule set to edit its rules")
                .size(15)
                .color(theme.fg_muted),
        )
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .into();
    };

    let metadata = state.editor.selected_metadata();
    let mut header_lines = column![
        text(zone_pair_label(metadata, name))
            .size(20)
            .color(theme.fg_primary),
    ]
    .spacing(4);
    if let Some(description) = metadata.and_then(|m| m.description.as_deref()) {
        header_lines = header_lines.push(text(description).size(13).color(theme.fg_secondary));
    }
    if let Some(default_action) = metadata.and_then(|m| m.default_action.as_deref()) {
        header_lines = header_lines.push(
            text(format!("Default action: {default_action}"))
                .size(12)
                .color(theme.fg_muted),
        );
    }

    let add_rule = button(
        row![text("+").size(16), text("Add Rule").size(13)]
            .spacing(8)
            .align_y(Alignment::Center),
    )
    .padding([8, 14])
    .style(move |_, status| primary_button(theme, status))
    .on_press_maybe((!state.busy.any_mutation()).then_some(Message::AddRuleClicked));

    let header = row![
        header_lines,
        iced::widget::Space::new().width(Length::Fill),
        add_rule,
    ]
    .align_y(Alignment::Center);

    let mut body = column![header].spacing(16).padding(20);

    if state.editor.store.is_dirty() {
        body = body.push(view_dirty_bar(state));
    }

    let content: Element<'_, Message> = if state.busy.detail {
        container(text("Loading rules...").size(14).color(theme.fg_muted))
            .width(Length::Fill)
            .padding(32)
            .center_x(Length::Fill)
            .into()
    } else if state.editor.store.is_empty() {
        container(
            text("This rule set has no rules yet")
                .size(14)
                .color(theme.fg_muted),
        )
        .width(Length::Fill)
        .padding(32)
        .center_x(Length::Fill)
        .into()
    } else {
        view_rule_table(state)
    };

    body = body.push(
        scrollable(content)
            .id(Id::new(super::WORKSPACE_SCROLLABLE_ID))
            .height(Length::Fill),
    );

    container(body)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

/// Bar shown while the working order differs from the saved one.
fn view_dirty_bar(state: &State) -> Element<'_, Message> {
    let theme = &state.theme;
    container(
        row![
            text("Rule order changed but not saved")
                .size(13)
                .color(theme.fg_primary),
            iced::widget::Space::new().width(Length::Fill),
            button(text("Save Order").size(12))
                .padding([6, 12])
                .style(move |_, status| dirty_button(theme, status))
                .on_press_maybe(
                    (!state.busy.committing_order).then_some(Message::CommitOrderClicked)
                ),
            button(text("Discard").size(12))
                .padding([6, 12])
                .style(move |_, status| secondary_button(theme, status))
                .on_press_maybe(
                    (!state.busy.committing_order).then_some(Message::DiscardOrderClicked)
                ),
        ]
        .spacing(10)
        .align_y(Alignment::Center),
    )
    .width(Length::Fill)
    .padding(12)
    .style(move |_| warning_banner_container(theme))
    .into()
}

fn view_rule_table(state: &State) -> Element<'_, Message> {
    let theme = &state.theme;
    let any_drag_active = state.dragged_rule_id.is_some();

    let mut cards: Vec<Element<'_, Message>> = Vec::with_capacity(state.editor.store.rules().len());
    for rule in state.editor.store.rules() {
        let is_being_dragged = state.dragged_rule_id.as_deref() == Some(rule.id.as_str());
        let is_hover_target = state.hovered_drop_target_id.as_deref() == Some(rule.id.as_str());

        let card = container(view_rule_row(state, rule, any_drag_active, is_being_dragged))
            .width(Length::Fill)
            .padding(10)
            .style(move |_| {
                if is_hover_target {
                    drop_target_container(theme)
                } else if is_being_dragged {
                    crate::app::ui_components::active_card_container(theme)
                } else {
                    card_container(theme)
                }
            });

        // While a drag is active every other row is a drop target
        let card_element: Element<'_, Message> = if any_drag_active && !is_being_dragged {
            mouse_area(card)
                .on_enter(Message::RuleHoverStart(rule.id.clone()))
                .on_exit(Message::RuleHoverEnd)
                .on_press(Message::RuleDropped(rule.id.clone()))
                .into()
        } else {
            card.into()
        };
        cards.push(card_element);
    }

    column(cards).spacing(8).into()
}

fn view_rule_row<'a>(
    state: &'a State,
    rule: &'a Rule,
    any_drag_active: bool,
    is_being_dragged: bool,
) -> Element<'a, Message> {
    let theme = &state.theme;
    let busy = state.busy.any_mutation();

    let handle_action = if any_drag_active {
        Message::RuleDropped(rule.id.clone())
    } else {
        Message::RuleDragStart(rule.id.clone())
    };
    let handle = button(text("\u{2630}").size(13).color(if is_being_dragged {
        theme.accent
    } else {
        theme.fg_muted
    }))
    .padding([4, 8])
    .style(move |_, status| secondary_button(theme, status))
    .on_press_maybe((!busy).then_some(handle_action));

    let action_color = match rule.action {
        Some(crate::core::ruleset::Action::Accept) => theme.success,
        Some(crate::core::ruleset::Action::Drop) => theme.danger,
        Some(crate::core::ruleset::Action::Reject) => theme.warning,
        None => theme.fg_muted,
    };
    let action_label = rule
        .action
        .map_or("\u{2014}", crate::core::ruleset::Action::display_name);

    let text_color = if rule.disabled {
        theme.fg_muted
    } else {
        theme.fg_primary
    };

    let mut detail = column![
        row![
            text(&rule.id).size(13).color(theme.fg_secondary),
            text(action_label).size(13).color(action_color),
            text(format_protocol_display(&rule.protocol))
                .size(12)
                .color(theme.fg_secondary),
        ]
        .spacing(12)
        .align_y(Alignment::Center),
        row![
            text(format!(
                "From {}",
                rule_endpoint_label(&rule.source, &rule.source_port)
            ))
            .size(12)
            .color(text_color),
            text(format!(
                "To {}",
                rule_endpoint_label(&rule.destination, &rule.destination_port)
            ))
            .size(12)
            .color(text_color),
        ]
        .spacing(16),
    ]
    .spacing(4);
    if let Some(description) = rule.description.as_deref() {
        detail = detail.push(
            text(crate::utils::truncate_string(description, 96))
                .size(12)
                .color(theme.fg_secondary),
        );
    }
    if rule.disabled {
        detail = detail.push(text("Disabled").size(11).color(theme.warning));
    }

    let toggle_label = if rule.disabled { "Enable" } else { "Disable" };
    let controls = row![
        button(text("Edit").size(11))
            .padding([4, 10])
            .style(move |_, status| secondary_button(theme, status))
            .on_press_maybe((!busy).then(|| Message::EditRuleClicked(rule.id.clone()))),
        button(text(toggle_label).size(11))
            .padding([4, 10])
            .style(move |_, status| secondary_button(theme, status))
            .on_press_maybe((!busy).then(|| Message::ToggleRuleClicked(rule.id.clone()))),
        button(text("Delete").size(11))
            .padding([4, 10])
            .style(move |_, status| danger_button(theme, status))
            .on_press_maybe((!busy).then(|| Message::DeleteRuleClicked(rule.id.clone()))),
    ]
    .spacing(6);

    row![
        handle,
        detail.width(Length::Fill),
        controls,
    ]
    .spacing(12)
    .align_y(Alignment::Center)
    .into()
}
