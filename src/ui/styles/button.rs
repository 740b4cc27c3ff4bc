// SPDX-License-Identifier: MPL-2.0
//! Centralized button styles.

use crate::ui::design_tokens::{
    opacity,
    palette::{self, WHITE},
    radius, shadow,
};
use iced::widget::button;
use iced::{Background, Border, Color, Theme};

fn fade(color: Color) -> Color {
    Color {
        a: opacity::OVERLAY_MEDIUM,
        ..color
    }
}

/// Primary call to action (empty-state upload button).
pub fn primary(_theme: &Theme, status: button::Status) -> button::Style {
    let (background, border_color, elevation) = match status {
        button::Status::Hovered => (palette::INDIGO_400, palette::INDIGO_500, shadow::MD),
        button::Status::Disabled => (fade(palette::INDIGO_500), palette::INDIGO_500, shadow::NONE),
        button::Status::Active | button::Status::Pressed => {
            (palette::INDIGO_500, palette::INDIGO_600, shadow::SM)
        }
    };

    button::Style {
        background: Some(Background::Color(background)),
        text_color: WHITE,
        border: Border {
            color: border_color,
            width: 1.0,
            radius: radius::MD.into(),
        },
        shadow: elevation,
        snap: true,
    }
}

/// Editor toolbar button.
///
/// Brand-colored in light mode, neutral gray in dark mode. Disabled buttons
/// keep their shape but fade out.
pub fn toolbar(theme: &Theme, status: button::Status) -> button::Style {
    let is_dark = !matches!(theme, Theme::Light);
    let (base, hover, text_color) = if is_dark {
        (palette::GRAY_700, palette::GRAY_600, palette::GRAY_100)
    } else {
        (palette::INDIGO_500, palette::INDIGO_600, WHITE)
    };

    let (background, text_color) = match status {
        button::Status::Hovered | button::Status::Pressed => (hover, text_color),
        button::Status::Disabled => (fade(base), fade(text_color)),
        button::Status::Active => (base, text_color),
    };

    button::Style {
        background: Some(Background::Color(background)),
        text_color,
        border: Border {
            radius: radius::MD.into(),
            ..Default::default()
        },
        shadow: shadow::NONE,
        snap: true,
    }
}

/// Borderless button used in the navbar.
pub fn ghost(theme: &Theme, status: button::Status) -> button::Style {
    let text_color = theme.palette().text;
    let background = match status {
        button::Status::Hovered => Some(Background::Color(Color {
            a: opacity::OVERLAY_SUBTLE,
            ..palette::GRAY_400
        })),
        button::Status::Pressed => Some(Background::Color(Color {
            a: opacity::OVERLAY_MEDIUM,
            ..palette::GRAY_400
        })),
        button::Status::Active | button::Status::Disabled => None,
    };

    button::Style {
        background,
        text_color,
        border: Border {
            radius: radius::LG.into(),
            ..Default::default()
        },
        shadow: shadow::NONE,
        snap: true,
    }
}
