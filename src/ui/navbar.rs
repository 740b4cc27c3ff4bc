// SPDX-License-Identifier: MPL-2.0
//! Header bar with the application name and the light/dark toggle.

use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::styles;
use iced::{
    alignment::Vertical,
    widget::{button, Container, Row, Space, Text},
    Element, Length,
};

/// Contextual data needed to render the navbar.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    /// Whether the effective theme is currently dark.
    pub is_dark: bool,
}

/// Messages emitted by the navbar.
#[derive(Debug, Clone)]
pub enum Message {
    ToggleTheme,
}

/// Events propagated to the parent application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    ToggleTheme,
}

/// Process a navbar message and return the corresponding event.
pub fn update(message: Message) -> Event {
    match message {
        Message::ToggleTheme => Event::ToggleTheme,
    }
}

/// Render the navigation bar.
pub fn view<'a>(ctx: ViewContext<'a>) -> Element<'a, Message> {
    let title = Text::new(ctx.i18n.tr("app-title")).size(typography::TITLE_MD);

    // The label names the mode the button switches to.
    let toggle_label = if ctx.is_dark {
        ctx.i18n.tr("navbar-theme-light")
    } else {
        ctx.i18n.tr("navbar-theme-dark")
    };
    let theme_button = button(Text::new(toggle_label).size(typography::BODY))
        .padding([spacing::XS, spacing::SM])
        .style(styles::button::ghost)
        .on_press(Message::ToggleTheme);

    let row = Row::new()
        .spacing(spacing::SM)
        .padding([0.0, spacing::LG])
        .align_y(Vertical::Center)
        .height(Length::Fill)
        .push(title)
        .push(Space::new().width(Length::Fill))
        .push(theme_button);

    Container::new(row)
        .width(Length::Fill)
        .height(Length::Fixed(sizing::NAVBAR_HEIGHT))
        .style(styles::container::navbar)
        .into()
}
