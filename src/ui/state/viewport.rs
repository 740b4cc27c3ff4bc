// SPDX-License-Identifier: MPL-2.0
//! Viewport transform state
//!
//! Holds the zoom scale and pan offset applied to the on-screen image.
//! The transform is presentation-only: it never touches the image bytes.

pub use crate::config::{DEFAULT_SCALE, MAX_SCALE, MIN_SCALE, SCALE_STEP};
use iced::{Rectangle, Size, Vector};

/// Zoom scale, guaranteed to be within the valid range (0.5–5.0).
///
/// Every constructor clamps, so callers never have to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scale(f32);

impl Scale {
    /// Creates a new scale, clamping the value to the valid range.
    #[must_use]
    pub fn new(value: f32) -> Self {
        Self(value.clamp(MIN_SCALE, MAX_SCALE))
    }

    /// Returns the raw multiplier.
    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }

    /// Returns whether the scale is at the minimum value.
    #[must_use]
    pub fn is_min(self) -> bool {
        self.0 <= MIN_SCALE
    }

    /// Returns whether the scale is at the maximum value.
    #[must_use]
    pub fn is_max(self) -> bool {
        self.0 >= MAX_SCALE
    }

    #[must_use]
    pub fn zoom_in(self) -> Self {
        Self::new(self.0 + SCALE_STEP)
    }

    #[must_use]
    pub fn zoom_out(self) -> Self {
        Self::new(self.0 - SCALE_STEP)
    }
}

impl Default for Scale {
    fn default() -> Self {
        Self(DEFAULT_SCALE)
    }
}

/// Zoom scale plus pan offset.
///
/// The offset is in logical pixels and is deliberately unbounded: the image
/// may be panned entirely out of view.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewportTransform {
    scale: Scale,
    offset: Vector,
}

impl ViewportTransform {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn scale(&self) -> Scale {
        self.scale
    }

    #[must_use]
    pub fn offset(&self) -> Vector {
        self.offset
    }

    pub fn zoom_in(&mut self) {
        self.scale = self.scale.zoom_in();
    }

    pub fn zoom_out(&mut self) {
        self.scale = self.scale.zoom_out();
    }

    /// Restores scale 1.0 and offset (0, 0).
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Replaces the offset unconditionally.
    pub fn set_offset(&mut self, x: f32, y: f32) {
        self.offset = Vector::new(x, y);
    }

    /// Computes where an image of `image_size` is drawn inside a viewport of
    /// `bounds` size, relative to the viewport's top-left corner.
    ///
    /// The image is first fitted (contain) and centred, then scaled about the
    /// viewport centre, then translated by the offset. Returns `None` for
    /// degenerate sizes.
    #[must_use]
    pub fn display_rect(&self, image_size: Size, bounds: Size) -> Option<Rectangle> {
        if image_size.width <= 0.0
            || image_size.height <= 0.0
            || bounds.width <= 0.0
            || bounds.height <= 0.0
        {
            return None;
        }

        let fit = (bounds.width / image_size.width).min(bounds.height / image_size.height);
        let width = image_size.width * fit * self.scale.value();
        let height = image_size.height * fit * self.scale.value();
        let center_x = bounds.width / 2.0 + self.offset.x;
        let center_y = bounds.height / 2.0 + self.offset.y;

        Some(Rectangle {
            x: center_x - width / 2.0,
            y: center_y - height / 2.0,
            width,
            height,
        })
    }
}
