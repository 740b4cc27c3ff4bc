// SPDX-License-Identifier: MPL-2.0
//! View rendering for the application.
//!
//! Layout: navbar on top, the editor card centred below it, toasts stacked
//! over everything in the bottom-right corner.

use super::Message;
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{sizing, spacing};
use crate::ui::editor::{self, ViewContext as EditorViewContext};
use crate::ui::navbar::{self, ViewContext as NavbarViewContext};
use crate::ui::notifications::{Manager, Toast};
use crate::ui::styles;
use iced::{
    alignment,
    widget::{scrollable, Column, Container, Stack},
    Element, Length,
};

/// Context required to render the application view.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub editor: &'a editor::State,
    pub is_dark: bool,
    pub backend_configured: bool,
    pub notifications: &'a Manager,
}

pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let header = navbar::view(NavbarViewContext {
        i18n: ctx.i18n,
        is_dark: ctx.is_dark,
    })
    .map(Message::Navbar);

    let editor_view = ctx
        .editor
        .view(EditorViewContext {
            i18n: ctx.i18n,
            backend_configured: ctx.backend_configured,
        })
        .map(Message::Editor);

    let card = Container::new(editor_view)
        .padding(spacing::LG)
        .width(Length::Fill)
        .max_width(sizing::CONTENT_MAX_WIDTH)
        .style(styles::container::card);

    let body = Container::new(card)
        .padding(spacing::XL)
        .width(Length::Fill)
        .align_x(alignment::Horizontal::Center);

    let page = Column::new()
        .push(header)
        .push(scrollable(body).height(Length::Fill));

    let base = Container::new(page)
        .width(Length::Fill)
        .height(Length::Fill)
        .style(styles::container::page);

    let toasts = Toast::view_overlay(ctx.notifications, ctx.i18n).map(Message::Notification);

    Stack::new().push(base).push(toasts).into()
}
