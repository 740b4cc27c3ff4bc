// SPDX-License-Identifier: MPL-2.0
//! [`ByteExporter`] backed by the native save dialog.

use crate::application::port::{ByteExporter, ExportOutcome};
use crate::error::Error;
use futures_util::future::BoxFuture;
use futures_util::FutureExt as _;
use std::path::Path;
use std::sync::Arc;

/// Asks for a destination, then writes the bytes verbatim.
#[derive(Debug, Default, Clone, Copy)]
pub struct DialogExporter;

/// Writes `data` to `path` unchanged.
pub async fn write_bytes(path: &Path, data: &[u8]) -> Result<(), Error> {
    tokio::fs::write(path, data)
        .await
        .map_err(|e| Error::Export(e.to_string()))
}

impl ByteExporter for DialogExporter {
    fn export_bytes(
        &self,
        data: Arc<Vec<u8>>,
        filename: &str,
    ) -> BoxFuture<'static, Result<ExportOutcome, Error>> {
        let filename = filename.to_owned();
        async move {
            let Some(handle) = rfd::AsyncFileDialog::new()
                .set_file_name(&filename)
                .save_file()
                .await
            else {
                return Ok(ExportOutcome::Cancelled);
            };

            let path = handle.path().to_path_buf();
            write_bytes(&path, &data).await?;
            tracing::info!(path = %path.display(), bytes = data.len(), "image exported");
            Ok(ExportOutcome::Saved(path))
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn write_bytes_writes_exact_content() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("enhanced-image.png");
        let data = vec![0x89, b'P', b'N', b'G', 0, 1, 2, 3];

        write_bytes(&path, &data).await.expect("write");

        assert_eq!(std::fs::read(&path).expect("read back"), data);
    }

    #[tokio::test]
    async fn write_bytes_to_missing_directory_is_export_error() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("missing").join("out.png");

        match write_bytes(&path, b"x").await {
            Err(Error::Export(_)) => {}
            other => panic!("expected export error, got {other:?}"),
        }
    }
}
