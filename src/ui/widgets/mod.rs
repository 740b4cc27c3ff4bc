// SPDX-License-Identifier: MPL-2.0
pub mod filtered_image;

pub use filtered_image::{filtered_image, PointerEvent};
