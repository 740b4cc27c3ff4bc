// SPDX-License-Identifier: MPL-2.0
//! Message and effect types for the editor.

use crate::domain::session::ViewerSnapshot;
use crate::ui::widgets::filtered_image::PointerEvent;
use std::sync::Arc;

/// User actions inside the editor.
#[derive(Debug, Clone)]
pub enum Message {
    OpenFileRequested,
    ZoomIn,
    ZoomOut,
    Reset,
    Enhance,
    Pointer(PointerEvent),
    Login,
    Logout,
    Save,
    Download,
}

/// Work the editor asks the application root to perform.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    OpenFilePicker,
    Login,
    Logout,
    Save(ViewerSnapshot),
    Download {
        bytes: Arc<Vec<u8>>,
        filename: &'static str,
    },
}

/// Backend call whose completion is reported through
/// [`State::operation_finished`](super::State::operation_finished).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOperation {
    Login,
    Logout,
    Save,
}

impl SessionOperation {
    /// Notification key shown when the operation fails for a reason other
    /// than missing backend credentials.
    #[must_use]
    pub fn error_key(self) -> &'static str {
        match self {
            SessionOperation::Login => "notification-login-error",
            SessionOperation::Logout => "notification-logout-error",
            SessionOperation::Save => "notification-save-error",
        }
    }
}
