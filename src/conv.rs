// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Type conversion utilities
//!
//! Node indices are represented as `u32` instead of `usize` by this library in
//! order to save space (documents are not expected to approach `u32::MAX`
//! nodes, so `u32` is always an appropriate index type).

use easy_cast::Cast;

/// Convert `usize` → `u32`
///
/// This is a "safer" wrapper around `as` ensuring (on debug builds) that the
/// input value may be represented correctly by `u32`.
#[inline]
pub fn to_u32(x: usize) -> u32 {
    x.cast()
}

/// Convert `u32` → `usize`
///
/// This is a "safer" wrapper around `as` ensuring that the operation is
/// zero-extension.
#[inline]
pub fn to_usize(x: u32) -> usize {
    x.cast()
}

/// Scale factor: points per font unit
///
/// A run of height `h` points set in a font with `units_per_em` font units
/// per em has scale `h / units_per_em`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PPU(pub f32);

impl PPU {
    /// Construct from a run height (points) and the font's scaling factor
    ///
    /// A non-positive scaling factor yields a zero scale.
    #[inline]
    pub fn new(height: f32, scaling_factor: f32) -> Self {
        if scaling_factor > 0.0 {
            PPU(height / scaling_factor)
        } else {
            PPU(0.0)
        }
    }

    #[inline]
    pub(crate) fn units_to_pt(self, x: f32) -> f32 {
        x * self.0
    }

    #[inline]
    pub(crate) fn u16_to_units(x: u16) -> f32 {
        f32::from(x)
    }

    #[inline]
    pub(crate) fn i16_to_units(x: i16) -> f32 {
        f32::from(x)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn ppu_scale() {
        assert_eq!(PPU::new(10.0, 1000.0), PPU(0.01));
        assert_eq!(PPU::new(10.0, 0.0), PPU(0.0));
        assert_eq!(PPU(2.0).units_to_pt(4.5), 9.0);
    }

    #[test]
    fn index_casts() {
        assert_eq!(to_u32(7), 7u32);
        assert_eq!(to_usize(7u32), 7usize);
    }
}
