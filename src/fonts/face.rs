// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Font face metrics via `ttf-parser`

use super::{FontMetrics, Glyph, GlyphId};
use crate::conv::PPU;
use crate::util::Cache;
use crate::GlyphVariant;
use std::fmt;
use thiserror::Error;
use ttf_parser::gsub::SubstitutionSubtable;
use ttf_parser::Face;

/// Font loading errors
#[derive(Error, Debug)]
pub enum FontError {
    #[error("font load error")]
    TtfParser(#[from] ttf_parser::FaceParsingError),
}

/// A font face owning its data
///
/// Metrics are read from the font's `cmap`, `hmtx`, `kern` and `GSUB`
/// tables. Lookups are memoized; the caches are safe for concurrent use.
pub struct OwnedFace {
    data: Vec<u8>,
    index: u32,
    units_per_em: u16,
    glyphs: Cache<(char, Option<GlyphVariant>), Glyph>,
    kerning: Cache<(GlyphId, GlyphId), f32>,
    ligatures: Cache<(GlyphId, GlyphId), Option<Glyph>>,
}

impl fmt::Debug for OwnedFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OwnedFace")
            .field("len", &self.data.len())
            .field("index", &self.index)
            .field("units_per_em", &self.units_per_em)
            .finish_non_exhaustive()
    }
}

impl OwnedFace {
    /// Construct from font data and the face index within a collection
    pub fn new(data: Vec<u8>, index: u32) -> Result<Self, FontError> {
        let units_per_em = Face::parse(&data, index)?.units_per_em();
        Ok(OwnedFace {
            data,
            index,
            units_per_em,
            glyphs: Cache::default(),
            kerning: Cache::default(),
            ligatures: Cache::default(),
        })
    }

    /// Font units per em
    pub fn units_per_em(&self) -> u16 {
        self.units_per_em
    }

    // Data was validated by `new`, so parsing does not fail in practice.
    fn with_face<T>(&self, f: impl FnOnce(&Face<'_>) -> T) -> Option<T> {
        Face::parse(&self.data, self.index).ok().map(|face| f(&face))
    }

    fn lookup_glyph(face: &Face<'_>, c: char, variant: Option<GlyphVariant>) -> Glyph {
        // Without access to `smcp` substitutions we approximate small
        // capitals with the upper-case glyph.
        let c = match variant {
            Some(GlyphVariant::SmallCapital) => c.to_uppercase().next().unwrap_or(c),
            None => c,
        };
        // GlyphId 0 is required to be a special glyph representing a missing
        // character (see cmap table / TrueType specification).
        let id = face.glyph_index(c).unwrap_or(ttf_parser::GlyphId(0));
        let width = face.glyph_hor_advance(id).unwrap_or(0);
        Glyph {
            id: id.into(),
            width: PPU::u16_to_units(width),
        }
    }

    fn lookup_kerning(face: &Face<'_>, left: GlyphId, right: GlyphId) -> f32 {
        let Some(kern) = face.tables().kern else {
            return 0.0;
        };
        for subtable in kern.subtables {
            if !subtable.horizontal || subtable.variable {
                continue;
            }
            if let Some(value) = subtable.glyphs_kerning(left.into(), right.into()) {
                return PPU::i16_to_units(value);
            }
        }
        0.0
    }

    fn lookup_ligature(face: &Face<'_>, first: GlyphId, second: GlyphId) -> Option<GlyphId> {
        let gsub = face.tables().gsub?;
        let first = ttf_parser::GlyphId::from(first);
        let second = ttf_parser::GlyphId::from(second);
        for lookup in gsub.lookups {
            for subtable in lookup.subtables.into_iter::<SubstitutionSubtable>() {
                let SubstitutionSubtable::Ligature(subst) = subtable else {
                    continue;
                };
                let Some(set) = subst
                    .coverage
                    .get(first)
                    .and_then(|index| subst.ligature_sets.get(index))
                else {
                    continue;
                };
                for ligature in set {
                    if ligature.components.len() == 1 && ligature.components.get(0) == Some(second)
                    {
                        return Some(ligature.glyph.into());
                    }
                }
            }
        }
        None
    }
}

impl FontMetrics for OwnedFace {
    fn glyph(&self, c: char, variant: Option<GlyphVariant>) -> Glyph {
        let missing = Glyph {
            id: GlyphId(0),
            width: 0.0,
        };
        self.glyphs.get_or_insert((c, variant), || {
            self.with_face(|face| Self::lookup_glyph(face, c, variant))
                .unwrap_or(missing)
        })
    }

    fn kerning(&self, left: Glyph, right: Glyph) -> f32 {
        self.kerning.get_or_insert((left.id, right.id), || {
            self.with_face(|face| Self::lookup_kerning(face, left.id, right.id))
                .unwrap_or(0.0)
        })
    }

    fn ligature(&self, first: Glyph, second: Glyph) -> Option<Glyph> {
        self.ligatures.get_or_insert((first.id, second.id), || {
            self.with_face(|face| {
                let id = Self::lookup_ligature(face, first.id, second.id)?;
                let width = face.glyph_hor_advance(id.into()).unwrap_or(0);
                Some(Glyph {
                    id,
                    width: PPU::u16_to_units(width),
                })
            })
            .flatten()
        })
    }

    fn scaling_factor(&self) -> f32 {
        f32::from(self.units_per_em)
    }
}
