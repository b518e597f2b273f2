// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Simple data types

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// 2D vector (or point), in points
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vec2(pub f32, pub f32);

impl Vec2 {
    /// Zero
    pub const ZERO: Vec2 = Vec2(0.0, 0.0);
}

impl std::ops::Add for Vec2 {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Vec2(self.0 + rhs.0, self.1 + rhs.1)
    }
}

/// Vertical position of text relative to the baseline
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TextPosition {
    /// Set on the baseline
    #[default]
    Normal,
    /// Raised and reduced in size
    Superscript,
    /// Lowered and reduced in size
    Subscript,
}

impl TextPosition {
    /// Vertical shift, as a fraction of the font size
    pub fn shift(self) -> f32 {
        match self {
            TextPosition::Normal => 0.0,
            TextPosition::Superscript => 1.0 / 3.0,
            TextPosition::Subscript => -1.0 / 6.0,
        }
    }

    /// Height relative to the nominal font size
    pub fn size_factor(self) -> f32 {
        match self {
            TextPosition::Normal => 1.0,
            TextPosition::Superscript | TextPosition::Subscript => 583.0 / 1000.0,
        }
    }
}

/// Alternate glyph selection
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum GlyphVariant {
    /// Small capitals
    SmallCapital,
}
