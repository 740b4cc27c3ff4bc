// SPDX-License-Identifier: MPL-2.0
//! User interface components and state management.
//!
//! This module organizes all UI-related code following a component-based architecture
//! with the Elm-style "state down, messages up" pattern.
//!
//! # Screens
//!
//! - [`editor`] - Upload, pan/zoom, enhancement, save and download
//!
//! # Shared Infrastructure
//!
//! - [`state`] - Pure editor state (viewport transform, enhancement level, drag)
//! - [`widgets`] - Custom Iced widgets (GPU image display)
//! - [`styles`] - Centralized styling (buttons, containers)
//! - [`design_tokens`] - Design system constants (colors, spacing, sizing)
//! - [`theming`] - Light/Dark/System theme mode management
//! - [`navbar`] - Header with application name and theme toggle
//! - [`notifications`] - Toast notification system for user feedback

pub mod design_tokens;
pub mod editor;
pub mod navbar;
pub mod notifications;
pub mod state;
pub mod styles;
pub mod theming;
pub mod widgets;
