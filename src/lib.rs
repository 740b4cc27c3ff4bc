// SPDX-License-Identifier: MPL-2.0
//! `zoomify` is a small image viewer built with the Iced GUI framework.
//!
//! Load an image, pan and zoom it, cycle through display enhancement presets,
//! sign in to save the current view to a hosted backend, and export the
//! original file.
//!
//! # Layers
//!
//! - [`domain`] - Session identity and the persisted viewer record
//! - [`application`] - Port traits for the session gateway and byte export
//! - [`infrastructure`] - Supabase and unconfigured gateways, save-dialog export
//! - [`media`] - Reading and decoding uploads
//! - [`ui`] - Editor, widgets, styles and notifications
//! - [`app`] - The iced application root

pub mod app;
pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod i18n;
pub mod infrastructure;
pub mod media;
pub mod ui;
