// SPDX-License-Identifier: MPL-2.0
//! Image loading and decoding for the editor.
//!
//! The uploaded bytes are kept untouched for download and persistence; a
//! decoded RGBA copy feeds the GPU widget.

use crate::error::{Error, Result};
use base64::Engine as _;
use image_rs::{imageops::FilterType, GenericImageView};
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Largest edge kept at decode time; the renderer shrinks further if the device limit is lower.
pub const MAX_TEXTURE_DIMENSION: u32 = 8192;

static NEXT_ASSET_ID: AtomicU64 = AtomicU64::new(1);

/// A decoded upload.
///
/// Created only through [`ImageAsset::decode`] and never mutated afterwards;
/// a new upload replaces the whole value.
#[derive(Debug, Clone)]
pub struct ImageAsset {
    id: u64,
    bytes: Arc<Vec<u8>>,
    mime: &'static str,
    width: u32,
    height: u32,
    rgba: Arc<Vec<u8>>,
    texture_width: u32,
    texture_height: u32,
}

impl ImageAsset {
    /// Decodes encoded image bytes (PNG, JPEG, GIF, WebP, ...).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] if the format cannot be recognized or the
    /// data is corrupt.
    pub fn decode(bytes: Vec<u8>) -> Result<Self> {
        let format = image_rs::guess_format(&bytes)?;
        let img = image_rs::load_from_memory_with_format(&bytes, format)?;
        let (width, height) = img.dimensions();
        if width == 0 || height == 0 {
            return Err(Error::Decode("image has empty dimensions".into()));
        }

        // Oversized images are downsampled for display only.
        let display = if width > MAX_TEXTURE_DIMENSION || height > MAX_TEXTURE_DIMENSION {
            img.resize(MAX_TEXTURE_DIMENSION, MAX_TEXTURE_DIMENSION, FilterType::Triangle)
        } else {
            img
        };
        let (texture_width, texture_height) = display.dimensions();
        let rgba = display.to_rgba8().into_vec();

        Ok(Self {
            id: NEXT_ASSET_ID.fetch_add(1, Ordering::Relaxed),
            bytes: Arc::new(bytes),
            mime: format.to_mime_type(),
            width,
            height,
            rgba: Arc::new(rgba),
            texture_width,
            texture_height,
        })
    }

    /// Unique id of this upload, used to know when the GPU texture is stale.
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    /// The original upload, byte for byte.
    #[must_use]
    pub fn bytes(&self) -> Arc<Vec<u8>> {
        Arc::clone(&self.bytes)
    }

    #[must_use]
    pub fn mime(&self) -> &'static str {
        self.mime
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// RGBA8 pixels for display, `texture_size()` in dimensions.
    #[must_use]
    pub fn rgba(&self) -> &[u8] {
        &self.rgba
    }

    /// Shared handle to the display pixels, for handing to the renderer.
    #[must_use]
    pub fn rgba_shared(&self) -> Arc<Vec<u8>> {
        Arc::clone(&self.rgba)
    }

    #[must_use]
    pub fn texture_size(&self) -> (u32, u32) {
        (self.texture_width, self.texture_height)
    }

    /// Renders the original bytes as a `data:` URL.
    #[must_use]
    pub fn data_url(&self) -> String {
        let encoded = base64::engine::general_purpose::STANDARD.encode(self.bytes.as_slice());
        format!("data:{};base64,{}", self.mime, encoded)
    }
}

/// Reads and decodes the image at `path`.
///
/// A `None` path (dialog cancelled) resolves to `Ok(None)`. Decoding runs on
/// a blocking thread.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be read and [`Error::Decode`] if
/// it is not a supported image.
pub async fn load(path: Option<PathBuf>) -> Result<Option<ImageAsset>> {
    let Some(path) = path else {
        return Ok(None);
    };

    let bytes = tokio::fs::read(&path).await?;
    let asset = tokio::task::spawn_blocking(move || ImageAsset::decode(bytes))
        .await
        .map_err(|err| Error::Decode(err.to_string()))??;

    tracing::debug!(
        path = %path.display(),
        width = asset.width(),
        height = asset.height(),
        mime = asset.mime(),
        "image decoded"
    );
    Ok(Some(asset))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image_rs::{ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;
    use tempfile::tempdir;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let image = RgbaImage::from_pixel(width, height, Rgba([255, 0, 0, 255]));
        let mut buffer = Cursor::new(Vec::new());
        image
            .write_to(&mut buffer, ImageFormat::Png)
            .expect("failed to encode png");
        buffer.into_inner()
    }

    #[test]
    fn decode_png_returns_expected_dimensions() {
        let asset = ImageAsset::decode(png_bytes(4, 2)).expect("png should decode");
        assert_eq!(asset.width(), 4);
        assert_eq!(asset.height(), 2);
        assert_eq!(asset.texture_size(), (4, 2));
        assert_eq!(asset.rgba().len(), 4 * 2 * 4);
        assert_eq!(asset.mime(), "image/png");
    }

    #[test]
    fn decode_keeps_original_bytes() {
        let original = png_bytes(3, 3);
        let asset = ImageAsset::decode(original.clone()).expect("png should decode");
        assert_eq!(asset.bytes().as_slice(), original.as_slice());
    }

    #[test]
    fn decode_assigns_distinct_ids() {
        let first = ImageAsset::decode(png_bytes(1, 1)).expect("decode");
        let second = ImageAsset::decode(png_bytes(1, 1)).expect("decode");
        assert_ne!(first.id(), second.id());
    }

    #[test]
    fn decode_garbage_returns_decode_error() {
        match ImageAsset::decode(b"not an image".to_vec()) {
            Err(Error::Decode(message)) => assert!(!message.is_empty()),
            other => panic!("expected Decode error, got {other:?}"),
        }
    }

    #[test]
    fn decode_truncated_png_returns_decode_error() {
        let mut bytes = png_bytes(8, 8);
        bytes.truncate(bytes.len() / 2);
        assert!(matches!(ImageAsset::decode(bytes), Err(Error::Decode(_))));
    }

    #[test]
    fn data_url_has_mime_prefix() {
        let asset = ImageAsset::decode(png_bytes(1, 1)).expect("decode");
        let url = asset.data_url();
        assert!(url.starts_with("data:image/png;base64,"));

        let payload = url.trim_start_matches("data:image/png;base64,");
        let decoded = base64::engine::general_purpose::STANDARD
            .decode(payload)
            .expect("valid base64");
        assert_eq!(decoded, asset.bytes().as_slice());
    }

    #[tokio::test]
    async fn load_without_path_is_noop() {
        let result = load(None).await.expect("no-op load");
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn load_reads_file_from_disk() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let path = temp_dir.path().join("sample.png");
        std::fs::write(&path, png_bytes(5, 7)).expect("write png");

        let asset = load(Some(path))
            .await
            .expect("load should succeed")
            .expect("asset expected");
        assert_eq!((asset.width(), asset.height()), (5, 7));
    }

    #[tokio::test]
    async fn load_missing_file_returns_io_error() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let missing = temp_dir.path().join("does_not_exist.png");

        match load(Some(missing)).await {
            Err(Error::Io(_)) => {}
            other => panic!("expected Io error, got {other:?}"),
        }
    }
}
