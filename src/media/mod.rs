// SPDX-License-Identifier: MPL-2.0
//! Media loading: reading user-selected files into [`ImageAsset`]s.

pub mod image;

pub use image::{load, ImageAsset};

use std::path::Path;

/// Supported image extensions, matching the enabled `image` codecs.
pub mod extensions {
    pub const IMAGE_EXTENSIONS: &[&str] = &[
        "jpg", "jpeg", "png", "gif", "tiff", "tif", "webp", "bmp", "ico",
    ];
}

/// Returns whether `path` carries a supported image extension
/// (case-insensitive). Used to filter dropped files.
#[must_use]
pub fn is_supported_image<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .is_some_and(|ext| extensions::IMAGE_EXTENSIONS.contains(&ext.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_common_image_formats() {
        assert!(is_supported_image("photo.jpg"));
        assert!(is_supported_image("photo.webp"));
        assert!(is_supported_image("/home/user/Pictures/scan.TIFF"));
    }

    #[test]
    fn rejects_unsupported_or_missing_extension() {
        assert!(!is_supported_image("clip.mp4"));
        assert!(!is_supported_image("drawing.svg"));
        assert!(!is_supported_image("README"));
    }

    #[test]
    fn extensions_are_unique_and_lowercase() {
        let mut seen = std::collections::HashSet::new();
        for ext in extensions::IMAGE_EXTENSIONS {
            assert_eq!(*ext, ext.to_ascii_lowercase());
            assert!(seen.insert(ext), "duplicate extension {ext}");
        }
    }
}
