// SPDX-License-Identifier: MPL-2.0
//! Update logic and message handlers for the application.
//!
//! Editor effects become tasks here: the gateway and exporter futures run on
//! the iced executor and report back through [`Message`] variants.

use super::{notifications, Message};
use crate::application::port::{ByteExporter, GatewayError, SessionGateway};
use crate::config::{self, Config};
use crate::media;
use crate::ui::editor::{self, Effect, SessionOperation};
use crate::ui::navbar::{self, Event as NavbarEvent};
use crate::ui::theming::ThemeMode;
use futures_util::future::BoxFuture;
use iced::Task;
use std::path::PathBuf;
use std::sync::Arc;

/// Mutable view of the application state handed to the handlers.
pub struct UpdateContext<'a> {
    pub editor: &'a mut editor::State,
    pub theme_mode: &'a mut ThemeMode,
    pub config: &'a mut Config,
    pub gateway: &'a Arc<dyn SessionGateway>,
    pub exporter: &'a Arc<dyn ByteExporter>,
    pub notifications: &'a mut notifications::Manager,
}

pub fn update(ctx: &mut UpdateContext<'_>, message: Message) -> Task<Message> {
    match message {
        Message::Editor(editor_message) => {
            let effect = ctx.editor.update(editor_message);
            effect_task(effect, ctx.gateway, ctx.exporter)
        }
        Message::Navbar(navbar_message) => handle_navbar_message(ctx, navbar_message),
        Message::Notification(notification_message) => {
            ctx.notifications.handle_message(&notification_message);
            Task::none()
        }
        Message::OpenFileDialogResult(path) => load_image(path),
        Message::FileDropped(path) => {
            if media::is_supported_image(&path) {
                load_image(Some(path))
            } else {
                tracing::debug!(path = %path.display(), "ignoring dropped file");
                ctx.notifications
                    .push(notifications::Notification::warning(
                        "notification-drop-unsupported",
                    ));
                Task::none()
            }
        }
        Message::ImageLoaded(result) => {
            if result.as_ref().is_ok_and(Option::is_some) {
                ctx.notifications.clear_load_errors();
            }
            if let Some(notification) = ctx.editor.image_loaded(result) {
                ctx.notifications.push(notification);
            }
            Task::none()
        }
        Message::SessionChanged { signed_in } => {
            tracing::info!(signed_in, "session changed");
            if ctx.editor.session_changed(signed_in) {
                ctx.notifications
                    .push(notifications::Notification::info("notification-signed-in"));
            }
            Task::none()
        }
        Message::SessionOperationFinished { operation, result } => {
            if let Some(notification) = ctx.editor.operation_finished(operation, result) {
                ctx.notifications.push(notification);
            }
            Task::none()
        }
        Message::DownloadFinished(result) => {
            if let Some(notification) = ctx.editor.download_finished(result) {
                ctx.notifications.push(notification);
            }
            Task::none()
        }
        Message::Tick(now) => {
            ctx.notifications.tick(now);
            Task::none()
        }
    }
}

/// Turns an editor effect into a task against the injected capabilities.
pub fn effect_task(
    effect: Effect,
    gateway: &Arc<dyn SessionGateway>,
    exporter: &Arc<dyn ByteExporter>,
) -> Task<Message> {
    match effect {
        Effect::None => Task::none(),
        Effect::OpenFilePicker => Task::perform(
            async {
                rfd::AsyncFileDialog::new()
                    .add_filter("Images", media::extensions::IMAGE_EXTENSIONS)
                    .pick_file()
                    .await
                    .map(|handle| handle.path().to_path_buf())
            },
            Message::OpenFileDialogResult,
        ),
        Effect::Login => session_task(SessionOperation::Login, gateway.login()),
        Effect::Logout => session_task(SessionOperation::Logout, gateway.logout()),
        Effect::Save(snapshot) => session_task(SessionOperation::Save, gateway.save(snapshot)),
        Effect::Download { bytes, filename } => {
            Task::perform(exporter.export_bytes(bytes, filename), Message::DownloadFinished)
        }
    }
}

fn session_task(
    operation: SessionOperation,
    future: BoxFuture<'static, Result<(), GatewayError>>,
) -> Task<Message> {
    Task::perform(future, move |result| Message::SessionOperationFinished {
        operation,
        result,
    })
}

fn load_image(path: Option<PathBuf>) -> Task<Message> {
    Task::perform(media::load(path), Message::ImageLoaded)
}

fn handle_navbar_message(ctx: &mut UpdateContext<'_>, message: navbar::Message) -> Task<Message> {
    match navbar::update(message) {
        NavbarEvent::ToggleTheme => {
            let mode = ctx.theme_mode.toggled();
            *ctx.theme_mode = mode;
            ctx.config.general.theme_mode = mode;
            persist_config(ctx);
        }
    }
    Task::none()
}

fn persist_config(ctx: &mut UpdateContext<'_>) {
    if let Err(err) = config::save(ctx.config) {
        tracing::warn!("failed to save config: {err}");
        ctx.notifications
            .push(notifications::Notification::warning(
                "notification-config-save-error",
            ));
    }
}
