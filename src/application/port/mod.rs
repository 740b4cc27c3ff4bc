// SPDX-License-Identifier: MPL-2.0
//! Port definitions (traits) for dependency inversion.
//!
//! This module defines abstract interfaces that infrastructure adapters implement.
//!
//! # Available Ports
//!
//! - [`session`]: Authentication and viewer persistence
//! - [`export`]: Handing bytes to the user as a file
//!
//! # Design Notes
//!
//! - Traits are `Send + Sync` so adapters can live in an `Arc` inside the app
//! - Methods return boxed futures; callers wrap them in Iced's `Task::perform`

pub mod export;
pub mod session;

// Re-export main types for convenience
pub use export::{ByteExporter, ExportOutcome};
pub use session::{
    BackendCredentials, GatewayConfig, GatewayError, ListenerRegistry, SessionGateway,
    SessionListener, SubscriptionHandle,
};
