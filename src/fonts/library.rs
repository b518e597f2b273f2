// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! System font library

use super::{FontMetrics, FontProvider, FontQuery, NoFontMatch, OwnedFace};
use crate::util::Cache;
use fontdb::{Database, Family, Query, ID};
use std::fmt;
use std::sync::Arc;

/// A [`FontProvider`] over a [`fontdb::Database`]
///
/// Typeface names `serif`, `sans-serif`, `monospace`, `cursive` and `fantasy`
/// select the database's generic families; any other name is matched as a
/// family name. Faces are loaded on first use and shared afterwards.
pub struct SystemFonts {
    db: Database,
    faces: Cache<ID, Arc<OwnedFace>>,
}

impl fmt::Debug for SystemFonts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SystemFonts")
            .field("faces", &self.db.len())
            .finish_non_exhaustive()
    }
}

impl SystemFonts {
    /// Construct, loading all system fonts
    pub fn new() -> Self {
        let mut db = Database::new();
        db.load_system_fonts();
        log::info!("Found {} fonts", db.len());
        Self::with_database(db)
    }

    /// Construct over an existing database
    pub fn with_database(db: Database) -> Self {
        SystemFonts {
            db,
            faces: Cache::default(),
        }
    }

    /// Access the font database
    pub fn database(&self) -> &Database {
        &self.db
    }

    fn load(&self, id: ID) -> Option<Arc<OwnedFace>> {
        let result = self.faces.get_or_try_insert(id, || {
            match self.db.with_face_data(id, |data, index| OwnedFace::new(data.to_vec(), index)) {
                Some(Ok(face)) => Ok(Arc::new(face)),
                Some(Err(err)) => {
                    log::error!("Failed to load font: {err}");
                    Err(())
                }
                None => {
                    log::error!("Failed to load font: no data for {id:?}");
                    Err(())
                }
            }
        });
        result.ok()
    }
}

impl Default for SystemFonts {
    fn default() -> Self {
        Self::new()
    }
}

fn family(name: &str) -> Family<'_> {
    match name {
        "serif" => Family::Serif,
        "sans-serif" => Family::SansSerif,
        "monospace" => Family::Monospace,
        "cursive" => Family::Cursive,
        "fantasy" => Family::Fantasy,
        name => Family::Name(name),
    }
}

impl FontProvider for SystemFonts {
    fn font(&self, query: &FontQuery) -> Result<Arc<dyn FontMetrics>, NoFontMatch> {
        let families = [family(&query.typeface)];
        let db_query = Query {
            families: &families,
            weight: query.weight.into(),
            stretch: query.width.into(),
            style: query.slant.into(),
        };
        let no_match = || NoFontMatch {
            typeface: query.typeface.clone(),
        };

        let id = self.db.query(&db_query).ok_or_else(no_match)?;
        if let Some(info) = self.db.face(id) {
            log::debug!("match: {} for {query:?}", info.post_script_name);
        }
        let face = self.load(id).ok_or_else(no_match)?;
        Ok(face)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::fonts::GlyphId;
    use crate::shaper::measure_text;
    use crate::tree::RunFlags;

    #[test]
    fn empty_database_has_no_match() {
        let fonts = SystemFonts::with_database(Database::new());
        let err = fonts.font(&FontQuery::new("serif")).unwrap_err();
        assert_eq!(err.typeface, "serif");
    }

    #[test]
    fn generic_families() {
        assert_eq!(family("serif"), Family::Serif);
        assert_eq!(family("monospace"), Family::Monospace);
        assert_eq!(family("Times"), Family::Name("Times"));
    }

    #[test]
    fn system_font_metrics() {
        let fonts = SystemFonts::new();
        if fonts.database().is_empty() {
            return;
        }

        // Any face with a glyph for 'A'
        let found = fonts.database().faces().find_map(|info| {
            let name = info.families.first()?.0.clone();
            let face = fonts.load(info.id)?;
            (face.glyph('A', None).id != GlyphId(0)).then_some((name, info.id, face))
        });
        let Some((name, id, face)) = found else {
            return;
        };

        let again = fonts.load(id).unwrap();
        assert!(Arc::ptr_eq(&face, &again));
        assert!(fonts.font(&FontQuery::new(name)).is_ok());

        let a = face.glyph('A', None);
        assert_eq!(face.glyph('A', None), a);
        let units_per_em = fonts
            .database()
            .with_face_data(id, |data, index| {
                ttf_parser::Face::parse(data, index).map(|f| f.units_per_em())
            })
            .unwrap()
            .unwrap();
        assert_eq!(face.scaling_factor(), f32::from(units_per_em));
        assert_eq!(face.units_per_em(), units_per_em);

        let v = face.glyph('V', None);
        assert_eq!(face.kerning(a, v), face.kerning(a, v));
        let f = face.glyph('f', None);
        let i = face.glyph('i', None);
        assert_eq!(face.ligature(f, i), face.ligature(f, i));

        let joined = measure_text(face.as_ref(), "fi", None, RunFlags::LIGATURES, 10.0).unwrap();
        let plain = measure_text(face.as_ref(), "fi", None, RunFlags::empty(), 10.0).unwrap();
        assert_eq!(plain.glyphs.len(), 2);
        assert!(joined.glyphs.len() <= plain.glyphs.len());
    }
}
