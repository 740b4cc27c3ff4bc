// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::application::port::{ExportOutcome, GatewayError};
use crate::error::Error;
use crate::media::ImageAsset;
use crate::ui::editor::{self, SessionOperation};
use crate::ui::navbar;
use crate::ui::notifications;
use std::path::PathBuf;
use std::time::Instant;

/// Top-level messages consumed by `App::update`. The variants forward
/// lower-level component messages while keeping a single update entrypoint.
#[derive(Debug, Clone)]
pub enum Message {
    Editor(editor::Message),
    Navbar(navbar::Message),
    Notification(notifications::NotificationMessage),
    /// Result from the open file dialog.
    OpenFileDialogResult(Option<PathBuf>),
    /// A file was dropped on the window.
    FileDropped(PathBuf),
    /// Result of reading and decoding an image.
    ImageLoaded(Result<Option<ImageAsset>, Error>),
    /// The gateway reported a session change.
    SessionChanged { signed_in: bool },
    /// A login, logout or save call completed.
    SessionOperationFinished {
        operation: SessionOperation,
        result: Result<(), GatewayError>,
    },
    /// The exporter completed a download.
    DownloadFinished(Result<ExportOutcome, Error>),
    /// Periodic tick for notification auto-dismiss.
    Tick(Instant),
}

/// Runtime flags passed in from the CLI or launcher to tweak startup behavior.
#[derive(Debug, Default)]
pub struct Flags {
    /// Optional locale override in BCP-47 form (e.g. `fr`, `en-US`).
    pub lang: Option<String>,
    /// Optional image path to preload on startup.
    pub file_path: Option<String>,
    /// Optional directory containing Fluent `.ftl` files for custom builds.
    pub i18n_dir: Option<String>,
    /// Optional config directory override (for settings.toml).
    /// Takes precedence over `ZOOMIFY_CONFIG_DIR` environment variable.
    pub config_dir: Option<String>,
}
