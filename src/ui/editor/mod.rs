// SPDX-License-Identifier: MPL-2.0
//! The editing surface: upload, pan/zoom, enhancement presets, save and download.
//!
//! This module follows the "state down, messages up" pattern. It owns every
//! piece of viewer state but performs no I/O itself: user actions that need
//! the file system, the backend or the export capability are returned as an
//! [`Effect`] and carried out by the application root, which reports the
//! outcome back through [`State::image_loaded`], [`State::session_changed`],
//! [`State::operation_finished`] and [`State::download_finished`].

mod component;
mod controls;
mod empty_state;
mod messages;

pub use component::ViewContext;
pub use messages::{Effect, Message, SessionOperation};

use crate::domain::session::ViewerSnapshot;
use crate::media::ImageAsset;
use crate::ui::state::{DragController, EnhancementLevel, ViewportTransform};

/// Local UI state for the editor.
#[derive(Debug, Default)]
pub struct State {
    image: Option<ImageAsset>,
    transform: ViewportTransform,
    enhancement: EnhancementLevel,
    drag: DragController,
    /// Mirrors the gateway's session; only presence is observed.
    signed_in: bool,
    /// A login, logout or save is in flight.
    busy: bool,
}

impl State {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn image(&self) -> Option<&ImageAsset> {
        self.image.as_ref()
    }

    #[must_use]
    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }

    #[must_use]
    pub fn transform(&self) -> ViewportTransform {
        self.transform
    }

    #[must_use]
    pub fn enhancement(&self) -> EnhancementLevel {
        self.enhancement
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    #[must_use]
    pub fn is_signed_in(&self) -> bool {
        self.signed_in
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Saving needs an image, a session and no other backend call running.
    #[must_use]
    pub fn can_save(&self) -> bool {
        self.image.is_some() && self.signed_in && !self.busy
    }

    /// Captures the current view for persistence.
    fn snapshot(&self) -> Option<ViewerSnapshot> {
        let image = self.image.as_ref()?;
        let offset = self.transform.offset();
        Some(ViewerSnapshot {
            image_data: image.data_url(),
            scale: self.transform.scale().value(),
            position_x: offset.x,
            position_y: offset.y,
            enhancement_level: self.enhancement.index(),
        })
    }

    /// Restores the default view for a freshly loaded image.
    fn reset_view(&mut self) {
        self.transform.reset();
        self.enhancement = EnhancementLevel::default();
        self.drag.release();
    }
}
