//! Rule editing form modal

use crate::app::forms::{FieldEntry, RuleForm, PROTOCOL_CHOICES};
use crate::app::ui_components::{
    card_container, primary_button, secondary_button, themed_checkbox, themed_pick_list,
    themed_pick_list_menu, themed_text_input,
};
use crate::app::{FormField, Message, PresetChoice, State};
use crate::core::codec::GroupType;
use crate::core::ruleset::Action;
use crate::theme::AppTheme;
use iced::widget::{button, checkbox, column, container, pick_list, row, text, text_input};
use iced::{Alignment, Element, Length};

const ACTION_CHOICES: &[Action] = &[Action::Accept, Action::Drop, Action::Reject];
const ADDRESS_GROUP_KINDS: &[GroupType] = &[GroupType::AddressGroup, GroupType::NetworkGroup];
const PORT_GROUP_KINDS: &[GroupType] = &[GroupType::PortGroup];

pub(super) fn view_rule_form<'a>(state: &'a State, form: &'a RuleForm) -> Element<'a, Message> {
    let theme = &state.theme;
    let errors = state.form_errors.as_ref();

    let (title, submit_label) = if form.original_number.is_some() {
        ("Edit Rule", "Update")
    } else {
        ("New Rule", "Create")
    };

    let number_error = errors.and_then(|e| e.number.as_deref());
    let description_error = errors.and_then(|e| e.description.as_deref());

    let header = column![
        text(title).size(22).color(theme.info),
        text("Rules are matched in order; lower numbers run first.")
            .size(12)
            .color(theme.fg_muted),
    ]
    .spacing(4);

    let basics = row![
        labeled(
            theme,
            "NUMBER",
            text_input("e.g. 30", &form.number)
                .on_input(Message::RuleNumberChanged)
                .padding(8)
                .style(move |_, status| themed_text_input(theme, status))
                .into(),
            number_error,
        ),
        labeled(
            theme,
            "ACTION",
            pick_list(ACTION_CHOICES, Some(form.action), Message::RuleActionChanged)
                .width(Length::Fill)
                .padding(8)
                .text_size(13)
                .style(move |_, status| themed_pick_list(theme, status))
                .menu_style(move |_| themed_pick_list_menu(theme))
                .into(),
            None,
        ),
        labeled(
            theme,
            "PROTOCOL",
            pick_list(
                PROTOCOL_CHOICES,
                PROTOCOL_CHOICES
                    .iter()
                    .copied()
                    .find(|choice| *choice == form.protocol),
                |choice: &str| Message::RuleProtocolChanged(choice.to_string()),
            )
            .width(Length::Fill)
            .padding(8)
            .text_size(13)
            .placeholder("any")
            .style(move |_, status| themed_pick_list(theme, status))
            .menu_style(move |_| themed_pick_list_menu(theme))
            .into(),
            None,
        ),
    ]
    .spacing(12);

    let description = labeled(
        theme,
        "DESCRIPTION",
        text_input("e.g. Allow web traffic", &form.description)
            .on_input(Message::RuleDescriptionChanged)
            .padding(8)
            .style(move |_, status| themed_text_input(theme, status))
            .into(),
        description_error,
    );

    let preset_choice = form
        .selected_preset
        .map_or(PresetChoice::Other, PresetChoice::Preset);
    let quick_pick = labeled(
        theme,
        "SERVICE QUICK PICK",
        pick_list(
            PresetChoice::all(),
            Some(preset_choice),
            Message::PresetSelected,
        )
        .width(Length::Fill)
        .padding(8)
        .text_size(13)
        .style(move |_, status| themed_pick_list(theme, status))
        .menu_style(move |_| themed_pick_list_menu(theme))
        .into(),
        None,
    );

    let source = row![
        field_editor(
            theme,
            "SOURCE ADDRESS",
            FormField::SourceAddress,
            &form.source_address,
            errors.and_then(|e| e.source_address.as_deref()),
        ),
        field_editor(
            theme,
            "SOURCE PORT",
            FormField::SourcePort,
            &form.source_port,
            errors.and_then(|e| e.source_port.as_deref()),
        ),
    ]
    .spacing(12);

    let destination = row![
        field_editor(
            theme,
            "DESTINATION ADDRESS",
            FormField::DestinationAddress,
            &form.destination_address,
            errors.and_then(|e| e.destination_address.as_deref()),
        ),
        field_editor(
            theme,
            "DESTINATION PORT",
            FormField::DestinationPort,
            &form.destination_port,
            errors.and_then(|e| e.destination_port.as_deref()),
        ),
    ]
    .spacing(12);

    let disabled = checkbox(form.disabled)
        .label("Create disabled")
        .on_toggle(Message::RuleDisabledToggled)
        .size(16)
        .text_size(12)
        .style(move |_, status| themed_checkbox(theme, status));

    let busy = state.busy.saving_rule;
    let actions = row![
        iced::widget::Space::new().width(Length::Fill),
        button(text("Cancel").size(13))
            .padding([8, 16])
            .style(move |_, status| secondary_button(theme, status))
            .on_press(Message::CancelRuleForm),
        button(text(if busy { "Saving..." } else { submit_label }).size(13))
            .padding([8, 16])
            .style(move |_, status| primary_button(theme, status))
            .on_press_maybe((!busy).then_some(Message::SaveRuleForm)),
    ]
    .spacing(10)
    .align_y(Alignment::Center);

    container(
        column![
            header,
            basics,
            description,
            quick_pick,
            source,
            destination,
            disabled,
            actions,
        ]
        .spacing(14),
    )
    .width(Length::Fixed(560.0))
    .padding(24)
    .style(move |_| card_container(theme))
    .into()
}

fn labeled<'a>(
    theme: &'a AppTheme,
    label: &'a str,
    input: Element<'a, Message>,
    error: Option<&'a str>,
) -> Element<'a, Message> {
    let mut section = column![text(label).size(11).color(theme.fg_muted), input].spacing(4);
    if let Some(error) = error {
        section = section.push(text(error).size(11).color(theme.danger));
    }
    section.width(Length::Fill).into()
}

/// Editor for one endpoint field: manual text entry or a group reference.
fn field_editor<'a>(
    theme: &'a AppTheme,
    label: &'a str,
    field: FormField,
    entry: &'a FieldEntry,
    error: Option<&'a str>,
) -> Element<'a, Message> {
    let group_kinds: &'static [GroupType] = match field {
        FormField::SourceAddress | FormField::DestinationAddress => ADDRESS_GROUP_KINDS,
        FormField::SourcePort | FormField::DestinationPort => PORT_GROUP_KINDS,
    };

    let mode_toggle = checkbox(entry.is_group())
        .label("Group")
        .on_toggle(move |grouped| Message::FieldGroupToggled(field, grouped))
        .size(14)
        .text_size(11)
        .style(move |_, status| themed_checkbox(theme, status));

    let input: Element<'a, Message> = match entry {
        FieldEntry::Manual(value) => text_input("any", value)
            .on_input(move |text| Message::FieldTextChanged(field, text))
            .padding(8)
            .style(move |_, status| themed_text_input(theme, status))
            .into(),
        FieldEntry::Group { group_type, name } => column![
            pick_list(group_kinds, Some(*group_type), move |kind| {
                Message::FieldGroupTypeChanged(field, kind)
            })
            .width(Length::Fill)
            .padding(6)
            .text_size(12)
            .style(move |_, status| themed_pick_list(theme, status))
            .menu_style(move |_| themed_pick_list_menu(theme)),
            text_input("group name", name)
                .on_input(move |text| Message::FieldGroupNameChanged(field, text))
                .padding(8)
                .style(move |_, status| themed_text_input(theme, status)),
        ]
        .spacing(4)
        .into(),
    };

    let mut section = column![
        row![
            text(label).size(11).color(theme.fg_muted),
            iced::widget::Space::new().width(Length::Fill),
            mode_toggle,
        ]
        .align_y(Alignment::Center),
        input,
    ]
    .spacing(4);
    if let Some(error) = error {
        section = section.push(text(error).size(11).color(theme.danger));
    } else if let Some(hint) = reserved_address_hint(field, entry) {
        section = section.push(text(hint).size(11).color(theme.fg_muted));
    }
    section.width(Length::Fill).into()
}

/// Informational note shown under address inputs that fall in a reserved
/// range. Never blocks saving.
fn reserved_address_hint(field: FormField, entry: &FieldEntry) -> Option<String> {
    if !matches!(
        field,
        FormField::SourceAddress | FormField::DestinationAddress
    ) {
        return None;
    }
    let FieldEntry::Manual(value) = entry else {
        return None;
    };
    let network = value.trim().parse::<ipnetwork::IpNetwork>().ok()?;
    crate::validators::check_reserved_address(network)
}
