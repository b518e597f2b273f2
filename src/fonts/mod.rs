// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Font selection and metrics
//!
//! Glyph metrics are supplied by a [`FontMetrics`] provider; fonts are located
//! by a [`FontProvider`] given a [`FontQuery`] (typeface, weight, slant and
//! width as resolved through the style cascade).
//!
//! ### Units
//!
//! Font sizes are specified in *points*. Glyph widths and kerning offsets are
//! reported by providers in *font units*; the [`FontMetrics::scaling_factor`]
//! is the number of font units per em (the nominal font size). Thus a glyph of
//! width `w` in a run of height `h` points has width
//! `w × h / scaling_factor` points (see [`crate::conv::PPU`]).

use std::fmt;
use std::sync::Arc;
use thiserror::Error;

use crate::GlyphVariant;

mod attributes;
mod face;
mod library;
mod typeface;

pub use attributes::{FontSlant, FontWeight, FontWidth};
pub use face::{FontError, OwnedFace};
pub use library::SystemFonts;
pub use typeface::{FontKey, Typeface, Typefaces};

/// Glyph identifier within a font
///
/// `GlyphId(0)` is the 'missing glyph'.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GlyphId(pub u16);

impl From<GlyphId> for ttf_parser::GlyphId {
    fn from(id: GlyphId) -> Self {
        ttf_parser::GlyphId(id.0)
    }
}

impl From<ttf_parser::GlyphId> for GlyphId {
    fn from(id: ttf_parser::GlyphId) -> Self {
        GlyphId(id.0)
    }
}

/// A glyph handle as supplied by a [`FontMetrics`] provider
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Glyph {
    /// Glyph identifier
    pub id: GlyphId,
    /// Intrinsic advance width, in font units
    pub width: f32,
}

/// Provider of glyph metrics for one font
///
/// Implementations must be deterministic and free of observable side effects
/// (internal caching is fine).
pub trait FontMetrics: fmt::Debug + Send + Sync {
    /// Map a character to a glyph, optionally selecting a glyph variant
    fn glyph(&self, c: char, variant: Option<GlyphVariant>) -> Glyph;

    /// Horizontal kerning adjustment between two adjacent glyphs (font units)
    fn kerning(&self, left: Glyph, right: Glyph) -> f32;

    /// The ligature glyph substituting for the pair, if any
    fn ligature(&self, first: Glyph, second: Glyph) -> Option<Glyph>;

    /// Font units per em
    fn scaling_factor(&self) -> f32;
}

/// Font selection criteria
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct FontQuery {
    /// Typeface (family) name
    pub typeface: String,
    pub weight: FontWeight,
    pub slant: FontSlant,
    pub width: FontWidth,
}

impl FontQuery {
    /// Construct for a typeface with default weight, slant and width
    pub fn new(typeface: impl Into<String>) -> Self {
        FontQuery {
            typeface: typeface.into(),
            ..Default::default()
        }
    }

    /// The key of this query within a typeface
    pub fn key(&self) -> FontKey {
        FontKey {
            weight: self.weight,
            slant: self.slant,
            width: self.width,
        }
    }
}

/// No matching font found
#[derive(Error, Debug, Clone, PartialEq)]
#[error("no font match for typeface '{typeface}'")]
pub struct NoFontMatch {
    pub typeface: String,
}

/// Source of fonts
pub trait FontProvider: fmt::Debug + Send + Sync {
    /// Find the font best matching `query`
    fn font(&self, query: &FontQuery) -> Result<Arc<dyn FontMetrics>, NoFontMatch>;
}
