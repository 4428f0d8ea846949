//! Zone creation modal

use crate::app::forms::ZoneForm;
use crate::app::ui_components::{
    card_container, primary_button, secondary_button, themed_pick_list, themed_pick_list_menu,
    themed_text_input,
};
use crate::app::{Message, State};
use iced::widget::{button, column, container, pick_list, row, text, text_input};
use iced::{Alignment, Element, Length};

pub(super) fn view_zone_form<'a>(state: &'a State, form: &'a ZoneForm) -> Element<'a, Message> {
    let theme = &state.theme;
    let interfaces = &state.editor.interfaces.unassigned;

    let mut content = column![
        text("New Zone").size(18).color(theme.fg_primary),
        text("A zone groups rule sets around one network interface.")
            .size(12)
            .color(theme.fg_muted),
        column![
            text("NAME").size(11).color(theme.fg_muted),
            text_input("e.g. GUEST", &form.name)
                .on_input(Message::ZoneNameChanged)
                .padding(8)
                .style(move |_, status| themed_text_input(theme, status)),
        ]
        .spacing(4),
        column![
            text("INTERFACE").size(11).color(theme.fg_muted),
            pick_list(
                interfaces.as_slice(),
                form.interface.as_ref(),
                Message::ZoneInterfaceSelected,
            )
            .width(Length::Fill)
            .padding(8)
            .text_size(13)
            .placeholder("Select an unassigned interface")
            .style(move |_, status| themed_pick_list(theme, status))
            .menu_style(move |_| themed_pick_list_menu(theme)),
        ]
        .spacing(4),
    ]
    .spacing(12);

    if interfaces.is_empty() {
        content = content.push(
            text("No unassigned interfaces are available on the router")
                .size(12)
                .color(theme.warning),
        );
    }
    if let Some(error) = form.error.as_deref() {
        content = content.push(text(error).size(12).color(theme.danger));
    }

    let busy = state.busy.zone;
    content = content.push(
        row![
            iced::widget::Space::new().width(Length::Fill),
            button(text("Cancel").size(13))
                .padding([8, 16])
                .style(move |_, status| secondary_button(theme, status))
                .on_press(Message::CancelZoneForm),
            button(text(if busy { "Creating..." } else { "Create" }).size(13))
                .padding([8, 16])
                .style(move |_, status| primary_button(theme, status))
                .on_press_maybe((!busy).then_some(Message::SubmitZoneForm)),
        ]
        .spacing(10)
        .align_y(Alignment::Center),
    );

    container(content)
        .width(Length::Fixed(420.0))
        .padding(24)
        .style(move |_| card_container(theme))
        .into()
}
