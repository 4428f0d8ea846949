//! UI rendering module
//!
//! Split into logical submodules for maintainability.

// Widget IDs for state preservation
pub const SIDEBAR_SCROLLABLE_ID: &str = "sidebar-rule-sets";
pub const WORKSPACE_SCROLLABLE_ID: &str = "workspace-rules";

// Submodule declarations
mod confirmation;
mod rule_form;
mod sidebar;
mod workspace;
mod zone_modal;

use crate::app::ui_components::{
    error_banner_container, main_container, modal_backdrop, secondary_button,
    success_banner_container, warning_banner_container,
};
use crate::app::{Banner, BannerKind, Message, State};
use crate::theme::AppTheme;
use iced::widget::{button, center, column, container, opaque, row, stack, text};
use iced::{Alignment, Element, Length, alignment};

/// Main view entry point
pub fn view(state: &State) -> Element<'_, Message> {
    let theme = &state.theme;

    let content = iced::widget::row![sidebar::view_sidebar(state), workspace::view_workspace(state)];

    let base = container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .style(move |_| main_container(theme));

    // At most one modal is open at a time; confirmation wins so a pending
    // destructive action is never hidden behind a form.
    let overlay: Option<Element<'_, Message>> = if let Some(pending) = &state.pending {
        Some(confirmation::view_confirmation(state, pending))
    } else if let Some(form) = &state.zone_form {
        Some(zone_modal::view_zone_form(state, form))
    } else if let Some(form) = &state.rule_form {
        Some(rule_form::view_rule_form(state, form))
    } else {
        None
    };

    // Modal overlay layer (fades base content, blocks clicks with opaque)
    // IMPORTANT: Always use stack! to keep widget tree structure consistent (preserves scroll state)
    let with_overlay: Element<'_, Message> = if let Some(overlay) = overlay {
        stack![
            base,
            opaque(center(overlay).style(move |_| modal_backdrop(theme)))
        ]
        .into()
    } else {
        stack![base, iced::widget::Space::new()].into()
    };

    // Banner layer (top-right, above any modal backdrop)
    // IMPORTANT: Always use stack! to keep widget tree structure consistent (preserves scroll state)
    if let Some(banner) = &state.banner {
        stack![
            with_overlay,
            container(view_banner(banner, theme))
                .width(Length::Fill)
                .height(Length::Shrink)
                .align_x(alignment::Horizontal::Right)
                .align_y(alignment::Vertical::Top)
                .padding(16)
        ]
        .into()
    } else {
        stack![with_overlay, iced::widget::Space::new()].into()
    }
}

fn view_banner<'a>(banner: &'a Banner, theme: &'a AppTheme) -> Element<'a, Message> {
    let style = match banner.kind {
        BannerKind::Error => error_banner_container,
        BannerKind::Warning => warning_banner_container,
        BannerKind::Success => success_banner_container,
    };

    let mut lines = column![text(&banner.message).size(14).color(theme.fg_primary)].spacing(4);
    for suggestion in &banner.suggestions {
        lines = lines.push(
            text(format!("\u{2022} {suggestion}"))
                .size(12)
                .color(theme.fg_secondary),
        );
    }

    container(
        row![
            lines,
            button(text("\u{2715}").size(12))
                .on_press(Message::DismissBanner)
                .padding([2, 8])
                .style(move |_, status| secondary_button(theme, status)),
        ]
        .spacing(12)
        .align_y(Alignment::Center),
    )
    .padding(12)
    .max_width(440)
    .style(move |_| style(theme))
    .into()
}
