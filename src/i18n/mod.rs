// SPDX-License-Identifier: MPL-2.0
//! Internationalization (i18n) support for the application.
//!
//! Uses the Fluent localization system. Translations are embedded at build
//! time from `assets/i18n/` and may be replaced at runtime with `--i18n-dir`.
//!
//! # Features
//!
//! - Locale detection from CLI, config, or system settings
//! - Fallback to `en-US` when no match is available
//! - Missing keys render as `MISSING: <key>` so they are easy to spot

pub mod fluent;

pub use fluent::I18n;
