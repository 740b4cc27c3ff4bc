// SPDX-License-Identifier: MPL-2.0
//! UI state management modules
//!
//! Pure, synchronous state for the editor, kept apart from rendering and
//! from the application root.

pub mod drag;
pub mod enhancement;
pub mod viewport;

pub use drag::DragController;
pub use enhancement::{EnhancementLevel, EnhancementPreset, ShadowPreset};
pub use viewport::{Scale, ViewportTransform};
