// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Test doubles for fonts and dictionaries

use crate::fonts::{FontKey, FontMetrics, Glyph, GlyphId, Typeface, Typefaces};
use crate::hyphen::{dictionary_file, DictionaryProvider, HyphenationError, Hyphenator};
use crate::{Environment, GlyphVariant};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// A font with explicitly listed glyphs, ligatures and kerning pairs
#[derive(Clone, Debug, Default)]
pub struct MockFont {
    scaling: f32,
    default_width: f32,
    glyphs: HashMap<char, Glyph>,
    ligatures: HashMap<(GlyphId, GlyphId), Glyph>,
    kerning: HashMap<(GlyphId, GlyphId), f32>,
}

impl MockFont {
    pub fn new(scaling: f32) -> Self {
        MockFont {
            scaling,
            ..Default::default()
        }
    }

    /// Width of characters without a listed glyph (mapped to glyph 0)
    pub fn with_default_width(mut self, width: f32) -> Self {
        self.default_width = width;
        self
    }

    pub fn with_glyph(mut self, c: char, id: u16, width: f32) -> Self {
        self.glyphs.insert(
            c,
            Glyph {
                id: GlyphId(id),
                width,
            },
        );
        self
    }

    pub fn with_ligature(mut self, first: u16, second: u16, id: u16, width: f32) -> Self {
        let glyph = Glyph {
            id: GlyphId(id),
            width,
        };
        self.ligatures
            .insert((GlyphId(first), GlyphId(second)), glyph);
        self
    }

    pub fn with_kerning(mut self, left: u16, right: u16, value: f32) -> Self {
        self.kerning.insert((GlyphId(left), GlyphId(right)), value);
        self
    }
}

impl FontMetrics for MockFont {
    fn glyph(&self, c: char, variant: Option<GlyphVariant>) -> Glyph {
        let c = match variant {
            Some(GlyphVariant::SmallCapital) => c.to_uppercase().next().unwrap_or(c),
            None => c,
        };
        self.glyphs.get(&c).copied().unwrap_or(Glyph {
            id: GlyphId(0),
            width: self.default_width,
        })
    }

    fn kerning(&self, left: Glyph, right: Glyph) -> f32 {
        self.kerning.get(&(left.id, right.id)).copied().unwrap_or(0.0)
    }

    fn ligature(&self, first: Glyph, second: Glyph) -> Option<Glyph> {
        self.ligatures.get(&(first.id, second.id)).copied()
    }

    fn scaling_factor(&self) -> f32 {
        self.scaling
    }
}

/// An environment whose only font is `font`, as the `serif` typeface
pub fn mock_env(font: MockFont) -> Environment {
    let typeface = Typeface::new("serif").with_font(FontKey::default(), Arc::new(font));
    Environment::new(Arc::new(Typefaces::new().with_typeface(typeface)))
}

/// A dictionary provider counting lookups
#[derive(Debug, Default)]
pub struct CountingDictionaries {
    dictionaries: HashMap<String, Arc<dyn Hyphenator>>,
    lookups: AtomicUsize,
}

impl CountingDictionaries {
    pub fn with(mut self, lang: &str, hyphenator: impl Hyphenator + 'static) -> Self {
        self.dictionaries
            .insert(lang.to_string(), Arc::new(hyphenator));
        self
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::Relaxed)
    }
}

impl DictionaryProvider for CountingDictionaries {
    fn hyphenator(&self, lang: &str, _: u32) -> Result<Arc<dyn Hyphenator>, HyphenationError> {
        self.lookups.fetch_add(1, Ordering::Relaxed);
        self.dictionaries
            .get(lang)
            .cloned()
            .ok_or_else(|| HyphenationError::DictionaryNotFound {
                file: dictionary_file(lang),
                searched: Vec::new(),
            })
    }
}
