// SPDX-License-Identifier: MPL-2.0
//! Domain layer - Core value types with no external dependencies.
//!
//! # Modules
//!
//! - [`session`]: Session identity and saved-viewer records
//!   ([`SessionIdentity`](session::SessionIdentity),
//!   [`ViewerSnapshot`](session::ViewerSnapshot),
//!   [`SavedViewerRecord`](session::SavedViewerRecord))

pub mod session;
