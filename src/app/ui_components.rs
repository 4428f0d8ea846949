use crate::theme::AppTheme;
use iced::widget::{button, checkbox, container, pick_list, text_input};
use iced::{Border, Color, Shadow, Vector};

pub fn main_container(theme: &AppTheme) -> container::Style {
    container::Style {
        background: Some(theme.bg_base.into()),
        text_color: Some(theme.fg_primary),
        ..Default::default()
    }
}

pub fn sidebar_container(theme: &AppTheme) -> container::Style {
    container::Style {
        background: Some(theme.bg_sidebar.into()),
        border: Border {
            color: theme.border,
            width: 1.0,
            radius: 0.0.into(),
        },
        ..Default::default()
    }
}

pub fn card_container(theme: &AppTheme) -> container::Style {
    container::Style {
        background: Some(theme.bg_surface.into()),
        border: Border {
            color: theme.border,
            width: 1.0,
            radius: 8.0.into(),
        },
        shadow: Shadow {
            color: theme.shadow_color,
            offset: Vector::new(0.0, 2.0),
            blur_radius: 3.0,
        },
        ..Default::default()
    }
}

pub fn active_card_container(theme: &AppTheme) -> container::Style {
    container::Style {
        background: Some(theme.bg_active.into()),
        border: Border {
            color: theme.accent,
            width: 1.0,
            radius: 8.0.into(),
        },
        ..Default::default()
    }
}

/// Row container for a rule being hovered as a drop target during a drag
pub fn drop_target_container(theme: &AppTheme) -> container::Style {
    container::Style {
        background: Some(theme.bg_hover.into()),
        border: Border {
            color: theme.accent,
            width: 2.0,
            radius: 8.0.into(),
        },
        ..Default::default()
    }
}

/// Banner containers for transient notifications
pub fn error_banner_container(theme: &AppTheme) -> container::Style {
    banner(theme, theme.danger)
}

pub fn warning_banner_container(theme: &AppTheme) -> container::Style {
    banner(theme, theme.warning)
}

pub fn success_banner_container(theme: &AppTheme) -> container::Style {
    banner(theme, theme.success)
}

fn banner(theme: &AppTheme, tint: Color) -> container::Style {
    container::Style {
        background: Some(Color { a: 0.12, ..tint }.into()),
        text_color: Some(theme.fg_primary),
        border: Border {
            color: tint,
            width: 1.0,
            radius: 6.0.into(),
        },
        ..Default::default()
    }
}

pub fn primary_button(theme: &AppTheme, status: button::Status) -> button::Style {
    shaded_button(theme, theme.accent, theme.fg_on_accent, status)
}

pub fn danger_button(theme: &AppTheme, status: button::Status) -> button::Style {
    shaded_button(theme, theme.danger, theme.fg_on_accent, status)
}

/// Primary button with a warning halo, used while a reorder is uncommitted
pub fn dirty_button(theme: &AppTheme, status: button::Status) -> button::Style {
    let mut style = primary_button(theme, status);
    style.shadow = Shadow {
        color: Color::from_rgba(theme.warning.r, theme.warning.g, theme.warning.b, 0.2),
        offset: Vector::new(0.0, 0.0),
        blur_radius: 8.0,
    };
    style.border.width = 2.0;
    style.border.color = theme.warning;
    style
}

pub fn secondary_button(theme: &AppTheme, status: button::Status) -> button::Style {
    let mut style = shaded_button(theme, theme.bg_surface, theme.fg_primary, status);
    style.border = Border {
        color: theme.border,
        width: 1.0,
        radius: 4.0.into(),
    };
    style
}

fn shaded_button(
    theme: &AppTheme,
    background: Color,
    text_color: Color,
    status: button::Status,
) -> button::Style {
    let base = button::Style {
        background: Some(background.into()),
        text_color,
        border: Border {
            radius: 4.0.into(),
            ..Default::default()
        },
        shadow: Shadow {
            color: theme.shadow_color,
            offset: Vector::new(0.0, 2.0),
            blur_radius: 3.0,
        },
        ..Default::default()
    };

    let scaled = |factor: f32| Color {
        r: (background.r * factor).min(1.0),
        g: (background.g * factor).min(1.0),
        b: (background.b * factor).min(1.0),
        ..background
    };

    match status {
        button::Status::Hovered => button::Style {
            background: Some(scaled(1.08).into()),
            shadow: Shadow {
                color: theme.shadow_color,
                offset: Vector::new(0.0, 2.5),
                blur_radius: 4.0,
            },
            ..base
        },
        button::Status::Pressed => button::Style {
            background: Some(scaled(0.95).into()),
            shadow: Shadow {
                color: theme.shadow_color,
                offset: Vector::new(0.0, 0.5),
                blur_radius: 1.5,
            },
            ..base
        },
        button::Status::Disabled => button::Style {
            background: Some(Color { a: 0.4, ..background }.into()),
            text_color: Color {
                a: 0.6,
                ..text_color
            },
            shadow: Shadow::default(),
            ..base
        },
        button::Status::Active => base,
    }
}

/// Flat button used for sidebar list entries
pub fn card_button(theme: &AppTheme, status: button::Status) -> button::Style {
    let base = button::Style {
        background: Some(Color::TRANSPARENT.into()),
        text_color: theme.fg_primary,
        border: Border {
            radius: 6.0.into(),
            ..Default::default()
        },
        ..Default::default()
    };

    match status {
        button::Status::Hovered | button::Status::Pressed => button::Style {
            background: Some(theme.bg_hover.into()),
            ..base
        },
        button::Status::Disabled => button::Style {
            text_color: theme.fg_muted,
            ..base
        },
        button::Status::Active => base,
    }
}

/// Sidebar list entry for the currently selected item
pub fn active_card_button(theme: &AppTheme, status: button::Status) -> button::Style {
    let base = button::Style {
        background: Some(theme.bg_active.into()),
        text_color: theme.fg_primary,
        border: Border {
            color: theme.accent,
            width: 1.0,
            radius: 6.0.into(),
        },
        ..Default::default()
    };

    match status {
        button::Status::Hovered => button::Style {
            background: Some(theme.bg_hover.into()),
            ..base
        },
        _ => base,
    }
}

/// Text input styling with theme-aware colors
pub fn themed_text_input(theme: &AppTheme, status: text_input::Status) -> text_input::Style {
    match status {
        text_input::Status::Active => text_input::Style {
            background: theme.bg_elevated.into(),
            border: Border {
                color: theme.border,
                width: 1.0,
                radius: 4.0.into(),
            },
            icon: theme.fg_muted,
            placeholder: theme.fg_muted,
            value: theme.fg_primary,
            selection: theme.accent,
        },
        text_input::Status::Hovered => text_input::Style {
            background: theme.bg_hover.into(),
            border: Border {
                color: theme.border_strong,
                width: 1.0,
                radius: 4.0.into(),
            },
            icon: theme.fg_secondary,
            placeholder: theme.fg_muted,
            value: theme.fg_primary,
            selection: theme.accent,
        },
        text_input::Status::Focused { .. } => text_input::Style {
            background: theme.bg_elevated.into(),
            border: Border {
                color: theme.accent,
                width: 2.0,
                radius: 4.0.into(),
            },
            icon: theme.accent,
            placeholder: theme.fg_muted,
            value: theme.fg_primary,
            selection: theme.accent,
        },
        text_input::Status::Disabled => text_input::Style {
            background: Color {
                a: 0.5,
                ..theme.bg_elevated
            }
            .into(),
            border: Border {
                color: Color {
                    a: 0.3,
                    ..theme.border
                },
                width: 1.0,
                radius: 4.0.into(),
            },
            icon: theme.fg_muted,
            placeholder: theme.fg_muted,
            value: theme.fg_muted,
            selection: theme.accent,
        },
    }
}

/// Pick list (dropdown) styling with theme-aware colors
pub fn themed_pick_list(theme: &AppTheme, status: pick_list::Status) -> pick_list::Style {
    match status {
        pick_list::Status::Active => pick_list::Style {
            background: theme.bg_elevated.into(),
            border: Border {
                color: theme.border,
                width: 1.0,
                radius: 4.0.into(),
            },
            handle_color: theme.fg_secondary,
            placeholder_color: theme.fg_muted,
            text_color: theme.fg_primary,
        },
        pick_list::Status::Hovered => pick_list::Style {
            background: theme.bg_hover.into(),
            border: Border {
                color: theme.border_strong,
                width: 1.0,
                radius: 4.0.into(),
            },
            handle_color: theme.fg_primary,
            placeholder_color: theme.fg_muted,
            text_color: theme.fg_primary,
        },
        pick_list::Status::Opened { .. } => pick_list::Style {
            background: theme.bg_elevated.into(),
            border: Border {
                color: theme.accent,
                width: 2.0,
                radius: 4.0.into(),
            },
            handle_color: theme.accent,
            placeholder_color: theme.fg_muted,
            text_color: theme.fg_primary,
        },
    }
}

/// Pick list menu styling (the dropdown menu itself)
pub fn themed_pick_list_menu(theme: &AppTheme) -> iced::overlay::menu::Style {
    iced::overlay::menu::Style {
        background: theme.bg_surface.into(),
        border: Border {
            color: theme.border_strong,
            width: 1.0,
            radius: 4.0.into(),
        },
        shadow: Shadow {
            color: theme.shadow_color,
            offset: Vector::new(0.0, 4.0),
            blur_radius: 8.0,
        },
        text_color: theme.fg_primary,
        selected_background: theme.bg_hover.into(),
        selected_text_color: theme.fg_primary,
    }
}

pub fn themed_checkbox(theme: &AppTheme, status: checkbox::Status) -> checkbox::Style {
    let base = checkbox::Style {
        background: theme.bg_elevated.into(),
        icon_color: theme.fg_on_accent,
        border: Border {
            color: theme.border,
            width: 1.0,
            radius: 4.0.into(),
        },
        text_color: Some(theme.fg_primary),
    };

    match status {
        checkbox::Status::Active { is_checked } | checkbox::Status::Hovered { is_checked } => {
            if is_checked {
                checkbox::Style {
                    background: theme.accent.into(),
                    border: Border {
                        color: theme.accent,
                        ..base.border
                    },
                    ..base
                }
            } else {
                base
            }
        }
        checkbox::Status::Disabled { .. } => checkbox::Style {
            background: Color {
                a: 0.4,
                ..theme.bg_elevated
            }
            .into(),
            text_color: Some(theme.fg_muted),
            ..base
        },
    }
}

pub fn modal_backdrop(theme: &AppTheme) -> container::Style {
    container::Style {
        background: Some(
            Color {
                a: 0.85,
                ..theme.bg_base
            }
            .into(),
        ),
        ..Default::default()
    }
}
