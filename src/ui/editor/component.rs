// SPDX-License-Identifier: MPL-2.0
//! Editor update logic and root view.

use super::messages::{Effect, Message, SessionOperation};
use super::{controls, empty_state, State};
use crate::application::port::{ExportOutcome, GatewayError};
use crate::config::DOWNLOAD_FILENAME;
use crate::error::{Error, Result};
use crate::i18n::fluent::I18n;
use crate::media::ImageAsset;
use crate::ui::design_tokens::{sizing, spacing};
use crate::ui::notifications::Notification;
use crate::ui::styles;
use crate::ui::widgets::filtered_image::{self, PointerEvent};
use iced::widget::{Column, Container};
use iced::{Element, Length};

/// Contextual data needed to render the editor.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    /// Whether the backend is configured (sign-in is offered either way).
    pub backend_configured: bool,
}

impl State {
    /// Applies a user action and returns the side effect the root must run.
    pub fn update(&mut self, message: Message) -> Effect {
        match message {
            Message::OpenFileRequested => Effect::OpenFilePicker,
            Message::ZoomIn => {
                self.transform.zoom_in();
                Effect::None
            }
            Message::ZoomOut => {
                self.transform.zoom_out();
                Effect::None
            }
            Message::Reset => {
                self.transform.reset();
                self.enhancement = Default::default();
                Effect::None
            }
            Message::Enhance => {
                self.enhancement.cycle();
                Effect::None
            }
            Message::Pointer(event) => {
                self.handle_pointer(event);
                Effect::None
            }
            Message::Login => {
                if self.busy || self.signed_in {
                    return Effect::None;
                }
                self.busy = true;
                Effect::Login
            }
            Message::Logout => {
                if self.busy || !self.signed_in {
                    return Effect::None;
                }
                self.busy = true;
                Effect::Logout
            }
            Message::Save => {
                if !self.can_save() {
                    return Effect::None;
                }
                match self.snapshot() {
                    Some(snapshot) => {
                        self.busy = true;
                        Effect::Save(snapshot)
                    }
                    None => Effect::None,
                }
            }
            Message::Download => match &self.image {
                Some(image) => Effect::Download {
                    bytes: image.bytes(),
                    filename: DOWNLOAD_FILENAME,
                },
                None => Effect::None,
            },
        }
    }

    fn handle_pointer(&mut self, event: PointerEvent) {
        if self.image.is_none() {
            return;
        }
        match event {
            PointerEvent::Pressed(position) => {
                self.drag.press(position, self.transform.offset());
            }
            PointerEvent::Moved(position) => {
                if let Some(offset) = self.drag.moved(position) {
                    self.transform.set_offset(offset.x, offset.y);
                }
            }
            PointerEvent::Released => self.drag.release(),
            PointerEvent::Exited => self.drag.exit(),
        }
    }

    /// Handles the result of a file load.
    ///
    /// A new image replaces the old one and resets the view. A cancelled
    /// dialog changes nothing. A failed load keeps the current image and
    /// yields a warning.
    pub fn image_loaded(&mut self, result: Result<Option<ImageAsset>>) -> Option<Notification> {
        match result {
            Ok(Some(image)) => {
                tracing::info!(
                    width = image.width(),
                    height = image.height(),
                    mime = image.mime(),
                    "image loaded"
                );
                self.image = Some(image);
                self.reset_view();
                None
            }
            Ok(None) => None,
            Err(err) => {
                tracing::warn!("image load failed: {err}");
                Some(Notification::warning(err.i18n_key()))
            }
        }
    }

    /// Records whether a session is active.
    ///
    /// Returns `true` when this call signed the user in.
    pub fn session_changed(&mut self, signed_in: bool) -> bool {
        let was_signed_in = std::mem::replace(&mut self.signed_in, signed_in);
        signed_in && !was_signed_in
    }

    /// Clears the busy flag and maps the outcome to a notification.
    pub fn operation_finished(
        &mut self,
        operation: SessionOperation,
        result: std::result::Result<(), GatewayError>,
    ) -> Option<Notification> {
        self.busy = false;
        match result {
            Ok(()) => {
                tracing::info!(?operation, "backend operation succeeded");
                (operation == SessionOperation::Save)
                    .then(|| Notification::success("notification-save-success"))
            }
            Err(GatewayError::Configuration) => {
                tracing::warn!(?operation, "backend is not configured");
                Some(Notification::error("notification-backend-unconfigured"))
            }
            Err(err) => {
                tracing::error!(?operation, "backend operation failed: {err}");
                Some(Notification::error(operation.error_key()))
            }
        }
    }

    /// Maps the outcome of a download to a notification.
    #[must_use]
    pub fn download_finished(
        &self,
        result: std::result::Result<ExportOutcome, Error>,
    ) -> Option<Notification> {
        match result {
            Ok(ExportOutcome::Saved(path)) => {
                tracing::info!(path = %path.display(), "image exported");
                Some(
                    Notification::info("notification-download-success")
                        .with_arg("path", path.display().to_string()),
                )
            }
            Ok(ExportOutcome::Cancelled) => None,
            Err(err) => {
                tracing::error!("export failed: {err}");
                Some(Notification::error(err.i18n_key()))
            }
        }
    }

    pub fn view<'a>(&'a self, ctx: ViewContext<'a>) -> Element<'a, Message> {
        let Some(image) = &self.image else {
            return empty_state::view(ctx.i18n);
        };

        let display = filtered_image::filtered_image(
            image,
            self.transform,
            self.enhancement.current_style(),
            sizing::VIEWPORT_HEIGHT,
            Message::Pointer,
        );

        let viewport = Container::new(display)
            .width(Length::Fill)
            .height(Length::Fixed(sizing::VIEWPORT_HEIGHT))
            .clip(true)
            .style(styles::container::viewport);

        Column::new()
            .spacing(spacing::LG)
            .push(viewport)
            .push(controls::view(self, &ctx))
            .into()
    }
}
