// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the application. Constants are organized by category.
//!
//! # Categories
//!
//! - **Viewport**: Scale bounds and zoom step
//! - **Enhancement**: Number of display presets
//! - **Backend**: OAuth provider and loopback port
//! - **Export**: Download file name

// ==========================================================================
// Viewport Defaults
// ==========================================================================

/// Scale applied when an image is loaded or the view is reset (1.0 = fit).
pub const DEFAULT_SCALE: f32 = 1.0;

/// Minimum allowed scale.
pub const MIN_SCALE: f32 = 0.5;

/// Maximum allowed scale.
pub const MAX_SCALE: f32 = 5.0;

/// Scale change applied by a single zoom in/out action.
pub const SCALE_STEP: f32 = 0.2;

// ==========================================================================
// Enhancement Defaults
// ==========================================================================

/// Number of enhancement presets, including the identity preset.
pub const ENHANCEMENT_LEVEL_COUNT: u8 = 4;

// ==========================================================================
// Backend Defaults
// ==========================================================================

/// OAuth provider used for sign-in.
pub const DEFAULT_OAUTH_PROVIDER: &str = "google";

/// Loopback port receiving the OAuth redirect.
pub const DEFAULT_REDIRECT_PORT: u16 = 54321;

/// Table receiving saved viewer records.
pub const SAVED_IMAGES_TABLE: &str = "saved_images";

// ==========================================================================
// Export Defaults
// ==========================================================================

/// File name proposed when downloading the current image.
pub const DOWNLOAD_FILENAME: &str = "enhanced-image.png";

const _: () = {
    assert!(MIN_SCALE > 0.0);
    assert!(MIN_SCALE < DEFAULT_SCALE);
    assert!(DEFAULT_SCALE < MAX_SCALE);
    assert!(SCALE_STEP > 0.0);
    assert!(ENHANCEMENT_LEVEL_COUNT > 1);
};
