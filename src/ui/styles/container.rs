// SPDX-License-Identifier: MPL-2.0
//! Container styles.

use crate::ui::design_tokens::{border, palette, radius, shadow};
use crate::ui::theming::ColorScheme;
use iced::widget::container;
use iced::{Background, Border, Color, Shadow, Theme};

fn scheme(theme: &Theme) -> ColorScheme {
    ColorScheme::for_mode(!matches!(theme, Theme::Light))
}

/// Whole-window background behind the editor card.
pub fn page(theme: &Theme) -> container::Style {
    let colors = scheme(theme);
    container::Style {
        background: Some(Background::Color(colors.surface_secondary)),
        text_color: Some(colors.text_primary),
        ..Default::default()
    }
}

/// Header bar.
pub fn navbar(theme: &Theme) -> container::Style {
    let colors = scheme(theme);
    container::Style {
        background: Some(Background::Color(colors.surface_primary)),
        text_color: Some(colors.text_primary),
        shadow: shadow::SM,
        ..Default::default()
    }
}

/// Rounded, raised card holding the editor.
pub fn card(theme: &Theme) -> container::Style {
    let colors = scheme(theme);
    container::Style {
        background: Some(Background::Color(colors.surface_primary)),
        text_color: Some(colors.text_primary),
        border: Border {
            radius: radius::LG.into(),
            ..Default::default()
        },
        shadow: Shadow {
            color: Color { a: 0.15, ..palette::BLACK },
            ..shadow::MD
        },
        ..Default::default()
    }
}

/// Upload target shown while no image is loaded.
pub fn drop_zone(theme: &Theme) -> container::Style {
    let is_dark = !matches!(theme, Theme::Light);
    container::Style {
        border: Border {
            color: if is_dark {
                palette::GRAY_600
            } else {
                palette::PRIMARY_100
            },
            width: border::WIDTH_MD,
            radius: radius::MD.into(),
        },
        ..Default::default()
    }
}

/// Pan/zoom area behind the image.
pub fn viewport(theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(scheme(theme).viewport_background)),
        border: Border {
            radius: radius::MD.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_surface_follows_theme() {
        let light = card(&Theme::Light);
        let dark = card(&Theme::Dark);
        assert_ne!(light.background, dark.background);
    }

    #[test]
    fn drop_zone_has_visible_border() {
        let style = drop_zone(&Theme::Light);
        assert_eq!(style.border.width, border::WIDTH_MD);
        assert_eq!(style.border.color, palette::PRIMARY_100);
    }
}
