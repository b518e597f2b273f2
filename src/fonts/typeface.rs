// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! In-memory typeface registry

use super::{FontMetrics, FontProvider, FontQuery, FontSlant, FontWeight, FontWidth, NoFontMatch};
use std::collections::HashMap;
use std::sync::Arc;

/// Identifies one font within a [`Typeface`]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct FontKey {
    pub weight: FontWeight,
    pub slant: FontSlant,
    pub width: FontWidth,
}

impl FontKey {
    /// Mismatch penalty, ordered: slant first, then width, then weight
    fn distance(&self, other: &FontKey) -> (u8, u16, u16) {
        (
            self.slant.distance(other.slant),
            self.width.distance(other.width),
            self.weight.distance(other.weight),
        )
    }
}

/// A family of fonts sharing a design
#[derive(Clone, Debug)]
pub struct Typeface {
    name: String,
    fonts: Vec<(FontKey, Arc<dyn FontMetrics>)>,
}

impl Typeface {
    /// Construct an empty typeface
    pub fn new(name: impl Into<String>) -> Self {
        Typeface {
            name: name.into(),
            fonts: Vec::new(),
        }
    }

    /// Add a font
    ///
    /// A font previously registered under the same `key` is replaced.
    pub fn with_font(mut self, key: FontKey, font: Arc<dyn FontMetrics>) -> Self {
        self.fonts.retain(|(k, _)| *k != key);
        self.fonts.push((key, font));
        self
    }

    /// The typeface name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the font closest to `key`
    ///
    /// An exact match is preferred; otherwise the font with the closest slant,
    /// then width, then weight is used. Returns `None` only if the typeface is
    /// empty.
    pub fn get(&self, key: FontKey) -> Option<&Arc<dyn FontMetrics>> {
        let (found, font) = self
            .fonts
            .iter()
            .min_by_key(|(k, _)| key.distance(k))?;
        if *found != key {
            log::warn!(
                "Typeface '{}': no exact match for {key:?}, using {found:?}",
                self.name
            );
        }
        Some(font)
    }
}

/// A [`FontProvider`] over a fixed set of [`Typeface`]s
#[derive(Clone, Debug, Default)]
pub struct Typefaces {
    typefaces: HashMap<String, Typeface>,
}

impl Typefaces {
    /// Construct an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a typeface under its name
    pub fn with_typeface(mut self, typeface: Typeface) -> Self {
        self.typefaces.insert(typeface.name.clone(), typeface);
        self
    }

    /// Look up a typeface by name
    pub fn typeface(&self, name: &str) -> Option<&Typeface> {
        self.typefaces.get(name)
    }
}

impl FontProvider for Typefaces {
    fn font(&self, query: &FontQuery) -> Result<Arc<dyn FontMetrics>, NoFontMatch> {
        self.typefaces
            .get(&query.typeface)
            .and_then(|typeface| typeface.get(query.key()))
            .cloned()
            .ok_or_else(|| NoFontMatch {
                typeface: query.typeface.clone(),
            })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::testing::MockFont;

    fn font(width: f32) -> Arc<dyn FontMetrics> {
        Arc::new(MockFont::new(1000.0).with_default_width(width))
    }

    fn width_of(font: &Arc<dyn FontMetrics>) -> f32 {
        font.glyph('x', None).width
    }

    #[test]
    fn exact_and_nearest_match() {
        let bold = FontKey {
            weight: FontWeight::BOLD,
            ..Default::default()
        };
        let italic = FontKey {
            slant: FontSlant::Italic,
            ..Default::default()
        };
        let typeface = Typeface::new("Serif")
            .with_font(FontKey::default(), font(1.0))
            .with_font(bold, font(2.0))
            .with_font(italic, font(3.0));

        assert_eq!(width_of(typeface.get(bold).unwrap()), 2.0);
        assert_eq!(width_of(typeface.get(italic).unwrap()), 3.0);

        // semi-bold upright: closest is bold upright
        let semi_bold = FontKey {
            weight: FontWeight::SEMI_BOLD,
            ..Default::default()
        };
        assert_eq!(width_of(typeface.get(semi_bold).unwrap()), 2.0);

        // bold oblique: slant is matched before weight
        let bold_oblique = FontKey {
            weight: FontWeight::BOLD,
            slant: FontSlant::Oblique,
            ..Default::default()
        };
        assert_eq!(width_of(typeface.get(bold_oblique).unwrap()), 3.0);
    }

    #[test]
    fn provider_lookup() {
        let typefaces =
            Typefaces::new().with_typeface(Typeface::new("Serif").with_font(FontKey::default(), font(1.0)));
        assert!(typefaces.font(&FontQuery::new("Serif")).is_ok());
        let err = typefaces.font(&FontQuery::new("Sans")).unwrap_err();
        assert_eq!(err.typeface, "Sans");
        assert!(Typefaces::new()
            .with_typeface(Typeface::new("Empty"))
            .font(&FontQuery::new("Empty"))
            .is_err());
    }
}
