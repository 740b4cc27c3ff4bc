// SPDX-License-Identifier: MPL-2.0
//! Enhancement selector
//!
//! A fixed, cyclic list of display presets. Selecting a preset never reads or
//! writes pixel data; the values are handed to the image shader at draw time.

use crate::config::ENHANCEMENT_LEVEL_COUNT;

/// Drop shadow drawn behind the image for the stronger presets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShadowPreset {
    Large,
    ExtraLarge,
}

impl ShadowPreset {
    /// Vertical offset in logical pixels.
    #[must_use]
    pub fn offset_y(self) -> f32 {
        match self {
            ShadowPreset::Large => 10.0,
            ShadowPreset::ExtraLarge => 20.0,
        }
    }

    /// Blur radius in logical pixels.
    #[must_use]
    pub fn blur(self) -> f32 {
        match self {
            ShadowPreset::Large => 15.0,
            ShadowPreset::ExtraLarge => 25.0,
        }
    }

    /// Spread in logical pixels (negative values shrink the shadow).
    #[must_use]
    pub fn spread(self) -> f32 {
        match self {
            ShadowPreset::Large => -3.0,
            ShadowPreset::ExtraLarge => -5.0,
        }
    }

    /// Shadow opacity.
    #[must_use]
    pub fn alpha(self) -> f32 {
        0.1
    }
}

/// Filter values for one enhancement level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnhancementPreset {
    pub brightness: f32,
    pub contrast: f32,
    pub saturation: f32,
    pub shadow: Option<ShadowPreset>,
}

impl EnhancementPreset {
    pub const IDENTITY: Self = Self::uniform(1.0, None);

    const fn uniform(factor: f32, shadow: Option<ShadowPreset>) -> Self {
        Self {
            brightness: factor,
            contrast: factor,
            saturation: factor,
            shadow,
        }
    }

    #[must_use]
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }
}

const PRESETS: [EnhancementPreset; ENHANCEMENT_LEVEL_COUNT as usize] = [
    EnhancementPreset::IDENTITY,
    EnhancementPreset::uniform(1.10, None),
    EnhancementPreset::uniform(1.20, Some(ShadowPreset::Large)),
    EnhancementPreset::uniform(1.30, Some(ShadowPreset::ExtraLarge)),
];

/// Ordinal in `0..4`, wrapping from 3 back to 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct EnhancementLevel(u8);

impl EnhancementLevel {
    /// Builds a level, reducing out-of-range values modulo the preset count.
    #[must_use]
    pub fn from_index(index: u8) -> Self {
        Self(index % ENHANCEMENT_LEVEL_COUNT)
    }

    #[must_use]
    pub fn index(self) -> u8 {
        self.0
    }

    /// Advances to the next preset.
    pub fn cycle(&mut self) {
        *self = self.next();
    }

    #[must_use]
    pub fn next(self) -> Self {
        Self::from_index(self.0 + 1)
    }

    /// Maps the level to its preset descriptor.
    #[must_use]
    pub fn current_style(self) -> EnhancementPreset {
        PRESETS[usize::from(self.0)]
    }
}
