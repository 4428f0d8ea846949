//! Confirmation modal for destructive and order-changing actions

use crate::app::helpers::order_diff;
use crate::app::ui_components::{
    card_container, danger_button, primary_button, secondary_button,
};
use crate::app::{Message, PendingConfirm, State};
use iced::widget::{button, column, container, row, scrollable, text};
use iced::{Alignment, Element, Length};

pub(super) fn view_confirmation<'a>(
    state: &'a State,
    pending: &'a PendingConfirm,
) -> Element<'a, Message> {
    let theme = &state.theme;

    let (title, body, destructive) = match pending {
        PendingConfirm::DeleteRule(id) => (
            "Delete rule?",
            format!("Rule {id} will be removed from the router immediately."),
            true,
        ),
        PendingConfirm::ToggleRule { id, disable } => (
            if *disable { "Disable rule?" } else { "Enable rule?" },
            if *disable {
                format!("Rule {id} will stop matching traffic until re-enabled.")
            } else {
                format!("Rule {id} will start matching traffic again.")
            },
            *disable,
        ),
        PendingConfirm::DeleteZone(zone) => (
            "Delete zone?",
            format!("Zone {zone} and its rule-set assignments will be removed."),
            true,
        ),
        PendingConfirm::CommitOrder => (
            "Save rule order?",
            "The router will renumber rules to match the new order.".to_string(),
            false,
        ),
    };

    let mut content = column![
        text(title).size(18).color(theme.fg_primary),
        text(body).size(13).color(theme.fg_secondary),
    ]
    .spacing(10);

    // Show exactly what moves before an order commit
    if matches!(pending, PendingConfirm::CommitOrder) {
        let diff = order_diff(state.editor.store.baseline(), state.editor.store.rules());
        content = content.push(
            container(scrollable(
                text(diff).size(12).color(theme.fg_secondary),
            ))
            .width(Length::Fill)
            .max_height(240)
            .padding(10)
            .style(move |_| crate::app::ui_components::main_container(theme)),
        );
    }

    let confirm_style = move |_: &iced::Theme, status| {
        if destructive {
            danger_button(theme, status)
        } else {
            primary_button(theme, status)
        }
    };

    content = content.push(
        row![
            iced::widget::Space::new().width(Length::Fill),
            button(text("Cancel").size(13))
                .padding([8, 16])
                .style(move |_, status| secondary_button(theme, status))
                .on_press(Message::CancelPending),
            button(text("Confirm").size(13))
                .padding([8, 16])
                .style(confirm_style)
                .on_press(Message::ConfirmPending),
        ]
        .spacing(10)
        .align_y(Alignment::Center),
    );

    container(content)
        .width(Length::Fixed(440.0))
        .padding(24)
        .style(move |_| card_container(theme))
        .into()
}
