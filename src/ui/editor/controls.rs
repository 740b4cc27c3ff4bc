// SPDX-License-Identifier: MPL-2.0
//! Toolbar below the image.

use super::component::ViewContext;
use super::messages::Message;
use super::State;
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::styles;
use iced::widget::{button, tooltip, Container, Row, Space, Text};
use iced::{alignment, Element, Length};

fn toolbar_button(label: String, message: Option<Message>) -> button::Button<'static, Message> {
    button(Text::new(label).size(typography::BODY))
        .height(Length::Fixed(sizing::BUTTON_HEIGHT))
        .padding([spacing::XS, spacing::MD])
        .style(styles::button::toolbar)
        .on_press_maybe(message)
}

fn with_tooltip<'a>(
    content: impl Into<Element<'a, Message>>,
    label: String,
) -> Element<'a, Message> {
    tooltip(
        content,
        Container::new(Text::new(label).size(typography::CAPTION)).padding(spacing::XXS),
        tooltip::Position::Top,
    )
    .into()
}

pub fn view<'a>(state: &'a State, ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let i18n = ctx.i18n;
    let scale = state.transform().scale();
    let level = state.enhancement().index();

    let zoom_out = toolbar_button(
        i18n.tr("editor-zoom-out"),
        (!scale.is_min()).then_some(Message::ZoomOut),
    );
    let zoom_in = toolbar_button(
        i18n.tr("editor-zoom-in"),
        (!scale.is_max()).then_some(Message::ZoomIn),
    );
    let reset = toolbar_button(i18n.tr("editor-reset"), Some(Message::Reset));
    let enhance = with_tooltip(
        toolbar_button(i18n.tr("editor-enhance"), Some(Message::Enhance)),
        i18n.tr_with_args("editor-enhance-tooltip", &[("level", &level.to_string())]),
    );

    let percent = format!("{:.0}", scale.value() * 100.0);
    let scale_label = Text::new(i18n.tr_with_args("editor-scale-label", &[("percent", &percent)]))
        .size(typography::CAPTION);

    let view_controls = Row::new()
        .spacing(spacing::XS)
        .align_y(alignment::Vertical::Center)
        .push(zoom_out)
        .push(zoom_in)
        .push(reset)
        .push(enhance)
        .push(scale_label);

    let idle = !state.is_busy();
    let mut session_controls = Row::new()
        .spacing(spacing::XS)
        .align_y(alignment::Vertical::Center);

    if state.is_busy() {
        session_controls =
            session_controls.push(Text::new(i18n.tr("editor-busy")).size(typography::CAPTION));
    }

    if state.is_signed_in() {
        session_controls = session_controls
            .push(toolbar_button(
                i18n.tr("editor-save"),
                state.can_save().then_some(Message::Save),
            ))
            .push(toolbar_button(
                i18n.tr("editor-logout"),
                idle.then_some(Message::Logout),
            ));
    } else {
        let login = toolbar_button(i18n.tr("editor-login"), idle.then_some(Message::Login));
        session_controls = if ctx.backend_configured {
            session_controls.push(login)
        } else {
            session_controls.push(with_tooltip(
                login,
                i18n.tr("notification-backend-unconfigured"),
            ))
        };
    }

    session_controls = session_controls.push(toolbar_button(
        i18n.tr("editor-download"),
        Some(Message::Download),
    ));

    Row::new()
        .align_y(alignment::Vertical::Center)
        .push(view_controls)
        .push(Space::new().width(Length::Fill))
        .push(session_controls)
        .into()
}
