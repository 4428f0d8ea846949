//! Sidebar with the zone directory and rule-set list

use crate::app::helpers::fuzzy_filter_rule_sets;
use crate::app::ui_components::{
    active_card_button, card_button, danger_button, primary_button, secondary_button,
    sidebar_container, themed_checkbox, themed_pick_list, themed_pick_list_menu,
    themed_text_input,
};
use crate::app::{Message, State};
use crate::theme::ThemeChoice;
use iced::widget::{
    button, checkbox, column, container, pick_list, row, scrollable, text, text_input, Id,
};
use iced::{Alignment, Element, Length};

pub(super) fn view_sidebar(state: &State) -> Element<'_, Message> {
    let theme = &state.theme;

    let header = row![
        text("Zonewall").size(20).color(theme.fg_primary),
        iced::widget::Space::new().width(Length::Fill),
        button(text("\u{21BB}").size(14))
            .padding([4, 10])
            .style(move |_, status| secondary_button(theme, status))
            .on_press_maybe((!state.busy.overview).then_some(Message::RefreshClicked)),
    ]
    .align_y(Alignment::Center);

    // Zone directory
    let mut zone_list = column![].spacing(6);
    for zone in &state.editor.zones {
        let is_active = state.editor.selected_zone.as_deref() == Some(zone.as_str());
        let zone_button = button(text(zone).size(13))
            .width(Length::Fill)
            .padding([6, 10])
            .style(move |_, status| {
                if is_active {
                    active_card_button(theme, status)
                } else {
                    card_button(theme, status)
                }
            })
            .on_press(Message::ZoneSelected(zone.clone()));
        let delete_button = button(text("\u{2715}").size(11))
            .padding([4, 8])
            .style(move |_, status| danger_button(theme, status))
            .on_press_maybe((!state.busy.zone).then(|| Message::DeleteZoneClicked(zone.clone())));
        zone_list = zone_list.push(
            row![zone_button, delete_button]
                .spacing(6)
                .align_y(Alignment::Center),
        );
    }

    let add_zone = button(
        row![text("+").size(16), text("Add Zone").size(13)]
            .spacing(8)
            .align_y(Alignment::Center),
    )
    .width(Length::Fill)
    .padding(8)
    .style(move |_, status| primary_button(theme, status))
    .on_press_maybe((!state.busy.zone).then_some(Message::AddZoneClicked));

    // Rule-set list for the selected zone, fuzzy filtered
    let search = text_input("Filter rule sets...", &state.rule_search)
        .on_input(Message::RuleSearchChanged)
        .padding(8)
        .size(13)
        .style(move |_, status| themed_text_input(theme, status));

    let refs = state
        .editor
        .selected_zone
        .as_deref()
        .map(|zone| state.editor.refs_for(zone))
        .unwrap_or_default();
    let filtered = fuzzy_filter_rule_sets(refs.iter(), &state.rule_search);

    let mut set_list = column![].spacing(6);
    if filtered.is_empty() {
        let hint = if refs.is_empty() {
            "No rule sets in this zone"
        } else {
            "No matches"
        };
        set_list = set_list.push(text(hint).size(12).color(theme.fg_muted));
    }
    for (entry, _score) in filtered {
        let is_active = state.editor.selected_name.as_deref() == Some(entry.name.as_str());
        set_list = set_list.push(
            button(
                column![
                    text(&entry.name).size(13).color(theme.fg_primary),
                    text(format!("\u{2192} {}", entry.destination))
                        .size(11)
                        .color(theme.fg_secondary),
                ]
                .spacing(2),
            )
            .width(Length::Fill)
            .padding([6, 10])
            .style(move |_, status| {
                if is_active {
                    active_card_button(theme, status)
                } else {
                    card_button(theme, status)
                }
            })
            .on_press(Message::RuleSetSelected(entry.name.clone())),
        );
    }

    // Settings footer
    let footer = column![
        pick_list(
            ThemeChoice::all(),
            Some(state.current_theme),
            Message::ThemeSelected,
        )
        .width(Length::Fill)
        .padding(6)
        .text_size(13)
        .style(move |_, status| themed_pick_list(theme, status))
        .menu_style(move |_| themed_pick_list_menu(theme)),
        checkbox(state.config.confirm_destructive)
            .label("Confirm destructive actions")
            .on_toggle(Message::ConfirmDestructiveToggled)
            .size(16)
            .text_size(12)
            .style(move |_, status| themed_checkbox(theme, status)),
        checkbox(state.config.confirm_reorder)
            .label("Confirm order changes")
            .on_toggle(Message::ConfirmReorderToggled)
            .size(16)
            .text_size(12)
            .style(move |_, status| themed_checkbox(theme, status)),
        checkbox(state.config.enable_event_log)
            .label("Record event journal")
            .on_toggle(Message::EventLogToggled)
            .size(16)
            .text_size(12)
            .style(move |_, status| themed_checkbox(theme, status)),
    ]
    .spacing(8);

    container(
        column![
            header,
            text("Zones").size(12).color(theme.fg_secondary),
            zone_list,
            add_zone,
            text("Rule sets").size(12).color(theme.fg_secondary),
            search,
            scrollable(set_list.width(Length::Fill))
                .id(Id::new(super::SIDEBAR_SCROLLABLE_ID))
                .height(Length::Fill),
            footer,
        ]
        .spacing(12)
        .padding(16),
    )
    .width(Length::Fixed(280.0))
    .height(Length::Fill)
    .style(move |_| sidebar_container(theme))
    .into()
}
