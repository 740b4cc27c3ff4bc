// SPDX-License-Identifier: MPL-2.0
//! Byte export port definition.
//!
//! [`ByteExporter`] hands a finished byte buffer to the user under a given
//! file name. The default adapter asks where to save it.

use crate::error::Error;
use futures_util::future::BoxFuture;
use std::path::PathBuf;
use std::sync::Arc;

/// Result of an export request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// Bytes were written to this path.
    Saved(PathBuf),
    /// The user dismissed the destination prompt.
    Cancelled,
}

/// Exports raw bytes under a suggested file name.
pub trait ByteExporter: Send + Sync {
    /// Writes `data` verbatim; `filename` is the suggested name.
    fn export_bytes(
        &self,
        data: Arc<Vec<u8>>,
        filename: &str,
    ) -> BoxFuture<'static, Result<ExportOutcome, Error>>;
}
