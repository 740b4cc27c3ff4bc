// SPDX-License-Identifier: MPL-2.0
//! Integration tests to validate style and design token coherence.

#[cfg(test)]
mod tests {
    use iced::widget::button::Status;
    use iced::{Background, Theme};
    use zoomify::ui::design_tokens::{opacity, palette, sizing, spacing};
    use zoomify::ui::styles::{button, container};
    use zoomify::ui::theming::{ColorScheme, ThemeMode};

    #[test]
    fn all_button_styles_are_callable_in_both_themes() {
        for theme in [Theme::Light, Theme::Dark] {
            for status in [
                Status::Active,
                Status::Hovered,
                Status::Pressed,
                Status::Disabled,
            ] {
                let _ = button::primary(&theme, status);
                let _ = button::toolbar(&theme, status);
                let _ = button::ghost(&theme, status);
            }
        }
    }

    #[test]
    fn disabled_toolbar_button_is_faded() {
        let active = button::toolbar(&Theme::Light, Status::Active);
        let disabled = button::toolbar(&Theme::Light, Status::Disabled);
        match (active.background, disabled.background) {
            (Some(Background::Color(a)), Some(Background::Color(d))) => assert!(d.a < a.a),
            other => panic!("unexpected backgrounds: {other:?}"),
        }
    }

    #[test]
    fn container_styles_follow_theme() {
        for style in [
            container::page,
            container::navbar,
            container::card,
            container::viewport,
        ] {
            assert_ne!(style(&Theme::Light).background, style(&Theme::Dark).background);
        }
        assert_ne!(
            container::drop_zone(&Theme::Light).border.color,
            container::drop_zone(&Theme::Dark).border.color
        );
    }

    #[test]
    fn design_tokens_are_ordered() {
        assert!(spacing::XS < spacing::MD && spacing::MD < spacing::XL);
        assert!(opacity::OVERLAY_SUBTLE < opacity::OVERLAY_STRONG);
        assert!(sizing::VIEWPORT_HEIGHT < sizing::CONTENT_MAX_WIDTH);
        assert_ne!(palette::INDIGO_500, palette::INDIGO_600);
    }

    #[test]
    fn theming_switches_correctly() {
        let light = ColorScheme::for_mode(ThemeMode::Light.is_dark());
        let dark = ColorScheme::for_mode(ThemeMode::Dark.is_dark());

        // Surface colors should be visually opposite between light and dark
        assert!(light.surface_primary.r > dark.surface_primary.r);

        // Text colors should also be opposite between light and dark
        assert!(light.text_primary.r < dark.text_primary.r);
    }
}
