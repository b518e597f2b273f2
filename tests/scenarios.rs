// End-to-end behaviour: cascade, decomposition, metrics and hyphenation

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use typeset_text::draw::Color;
use typeset_text::fonts::{
    FontKey, FontMetrics, FontWeight, Glyph, GlyphId, Typeface, Typefaces,
};
use typeset_text::hyphen::{
    dictionary_file, DictionaryProvider, ExceptionList, HyphenationError, Hyphenator,
};
use typeset_text::shaper::{glyphs, MetricsError};
use typeset_text::style::{presets, Attribute, Base, Style, StyleClass, Value};
use typeset_text::tree::{Child, Document, FragmentKind, SpanKind};
use typeset_text::{Environment, GlyphVariant};

/// A font of unit scale: `f` and `i` are 5 wide, `fi` is a ligature 9 wide
#[derive(Debug)]
struct Font {
    glyphs: HashMap<char, Glyph>,
}

impl Font {
    fn new() -> Self {
        let glyph = |id, width| Glyph {
            id: GlyphId(id),
            width,
        };
        let glyphs = [('f', glyph(1, 5.0)), ('i', glyph(2, 5.0)), (' ', glyph(3, 2.5))];
        Font {
            glyphs: glyphs.into_iter().collect(),
        }
    }
}

impl FontMetrics for Font {
    fn glyph(&self, c: char, _: Option<GlyphVariant>) -> Glyph {
        self.glyphs.get(&c).copied().unwrap_or(Glyph {
            id: GlyphId(0),
            width: 6.0,
        })
    }

    fn kerning(&self, _: Glyph, _: Glyph) -> f32 {
        0.0
    }

    fn ligature(&self, first: Glyph, second: Glyph) -> Option<Glyph> {
        (first.id == GlyphId(1) && second.id == GlyphId(2)).then_some(Glyph {
            id: GlyphId(10),
            width: 9.0,
        })
    }

    fn scaling_factor(&self) -> f32 {
        1.0
    }
}

/// English exception list, counting dictionary requests
#[derive(Debug, Default)]
struct Dictionaries {
    lookups: AtomicUsize,
}

impl DictionaryProvider for Dictionaries {
    fn hyphenator(
        &self,
        lang: &str,
        min_chars: u32,
    ) -> Result<Arc<dyn Hyphenator>, HyphenationError> {
        self.lookups.fetch_add(1, Ordering::Relaxed);
        if lang != "en_US" {
            return Err(HyphenationError::DictionaryNotFound {
                file: dictionary_file(lang),
                searched: Vec::new(),
            });
        }
        let list = ExceptionList::new(min_chars)
            .with_word("hy-phen-ation")
            .with_word("type-set-ting");
        Ok(Arc::new(list))
    }
}

fn env(dictionaries: Arc<Dictionaries>) -> Environment {
    let regular = Arc::new(Font::new());
    let typeface = Typeface::new("serif")
        .with_font(FontKey::default(), regular.clone())
        .with_font(
            FontKey {
                weight: FontWeight::BOLD,
                ..Default::default()
            },
            regular,
        );
    Environment::new(Arc::new(Typefaces::new().with_typeface(typeface)))
        .with_dictionaries(dictionaries)
}

fn root(font_size: f32) -> Arc<Style> {
    Style::builder(StyleClass::Text)
        .base(Base::Defaults)
        .set(Attribute::FontSize, font_size)
        .build()
        .unwrap()
}

#[test]
fn inherit_font_size_from_parent() {
    let mut doc = Document::new();
    let child = doc.run(presets::inherit(), "text");
    doc.composite(root(12.0), [child]).unwrap();
    assert_eq!(doc.resolve(child, Attribute::FontSize), Ok(Value::Size(12.0)));
}

#[test]
fn ligature_width() {
    let env = env(Default::default());
    let mut doc = Document::new();
    let run = doc.run(root(1.0), "fi");
    let metrics = doc.measure(&env, run, None).unwrap();
    assert_eq!(metrics.widths.as_slice(), &[9.0]);
    assert_eq!(metrics.glyphs.len(), 1);

    let plain = Style::builder(StyleClass::Text)
        .based_on(&root(1.0))
        .set(Attribute::Ligatures, false)
        .build()
        .unwrap();
    let run = doc.run(plain, "fi");
    let metrics = doc.measure(&env, run, None).unwrap();
    assert_eq!(metrics.widths.as_slice(), &[5.0, 5.0]);
}

#[test]
fn split_into_words_and_spaces() {
    let mut doc = Document::new();
    let style = root(10.0);
    let run = doc.run(style.clone(), "a b");
    let fragments: Vec<_> = doc.split(run).unwrap().collect();
    let kinds: Vec<_> = fragments.iter().map(|f| (f.kind, f.text)).collect();
    assert_eq!(
        kinds,
        [
            (FragmentKind::Word, "a"),
            (FragmentKind::Space, " "),
            (FragmentKind::Word, "b"),
        ]
    );
    for fragment in &fragments {
        assert!(Arc::ptr_eq(doc[fragment.source].style(), &style));
    }
}

#[test]
fn color_from_hex() {
    let red: Color = "#FF0000".parse().unwrap();
    assert_eq!(red.rgba(), (1.0, 0.0, 0.0, 1.0));
    assert_eq!(red.to_string(), "#ff0000ff");
}

#[test]
fn hyphenation_disabled() {
    let dictionaries = Arc::new(Dictionaries::default());
    let env = env(dictionaries.clone());
    let mut doc = Document::new();
    let style = Style::builder(StyleClass::Text)
        .based_on(&root(10.0))
        .set(Attribute::Hyphenate, false)
        .build()
        .unwrap();
    let run = doc.run(style, "hyphenation");
    let candidates: Vec<_> = doc.hyphenate(&env, run, "hyphenation").unwrap().collect();
    assert!(candidates.is_empty());
    assert_eq!(dictionaries.lookups.load(Ordering::Relaxed), 0);
}

#[test]
fn hyphenation_candidates() {
    let dictionaries = Arc::new(Dictionaries::default());
    let env = env(dictionaries.clone());
    let mut doc = Document::new();
    let run = doc.run(root(10.0), "hyphenation");
    let candidates: Vec<_> = doc
        .hyphenate(&env, run, "hyphenation")
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    let parts: Vec<_> = candidates
        .iter()
        .map(|c| (c.prefix.as_str(), c.suffix.as_str()))
        .collect();
    assert_eq!(parts, [("hyphen-", "ation"), ("hy-", "phenation")]);
    for candidate in &candidates {
        assert_eq!(candidate.source, run);
        let head = candidate.prefix.strip_suffix('-').unwrap();
        assert_eq!(format!("{head}{}", candidate.suffix), "hyphenation");
    }
    assert_eq!(dictionaries.lookups.load(Ordering::Relaxed), 1);

    let german = Style::builder(StyleClass::Text)
        .based_on(&root(10.0))
        .set(Attribute::HyphenLang, Value::Lang("de_DE".into()))
        .build()
        .unwrap();
    let run = doc.run(german, "Silbentrennung");
    let result = doc.hyphenate(&env, run, "Silbentrennung");
    assert!(matches!(
        result,
        Err(HyphenationError::DictionaryNotFound { file, .. }) if file == "hyph_de_DE.dic"
    ));
}

#[test]
fn bold_span() {
    let mut doc = Document::new();
    let bold = doc.composite(presets::bold(), ["World"]).unwrap();
    let para = doc
        .composite(root(10.0), [Child::from("Hello "), bold.into()])
        .unwrap();

    let spans: Vec<_> = doc.spans(para).collect::<Result<_, _>>().unwrap();
    assert_eq!(spans.len(), 2);
    assert_eq!(doc.text(spans[0].node), "Hello ");
    assert_eq!(doc.text(spans[1].node), "World");
    assert!(spans.iter().all(|s| s.kind == SpanKind::Text(None)));
    assert_eq!(
        doc.resolve(spans[0].node, Attribute::FontWeight),
        Ok(FontWeight::NORMAL.into())
    );
    assert_eq!(
        doc.resolve(spans[1].node, Attribute::FontWeight),
        Ok(FontWeight::BOLD.into())
    );

    let env = env(Default::default());
    let width = doc.measure_span(&env, &spans[1]).unwrap().width();
    assert_eq!(width, 5.0 * 6.0 * 10.0);
}

#[test]
fn split_concatenation() {
    let mut doc = Document::new();
    for text in ["", "word", "two words", "a\u{a0}b  c", "  lead and trail "] {
        let run = doc.run(root(10.0), text);
        let joined: String = doc.split(run).unwrap().map(|f| f.text).collect();
        assert_eq!(joined, doc.text(run));
    }
}

#[test]
fn concat_identity() {
    let mut doc = Document::new();
    let empty = doc.run(root(10.0), "");
    let a = doc.run(presets::inherit(), "a");
    let b = doc.run(presets::inherit(), "b");
    assert_eq!(doc.concat(a, empty), Ok(a));
    assert_eq!(doc.concat(empty, b), Ok(b));

    let both = doc.concat(a, b).unwrap();
    assert_eq!(doc[both].children(), &[a, b]);
    assert_eq!(doc.text(both), "ab");
}

#[test]
fn ligatures_never_lengthen() {
    let font = Font::new();
    for text in ["fi", "ffi", "fifi", "office", "xyz", ""] {
        let n = text.chars().count();
        assert!(glyphs(&font, text, None, true).count() <= n);
        assert_eq!(glyphs(&font, text, None, false).count(), n);
    }
}

#[test]
fn empty_run_not_measurable() {
    let env = env(Default::default());
    let mut doc = Document::new();
    let run = doc.run(root(10.0), "");
    assert!(matches!(
        doc.measure(&env, run, None),
        Err(MetricsError::EmptyGlyphRun)
    ));
}

#[test]
fn color_round_trip() {
    for hex in ["#000000ff", "#ffffff00", "#336699cc", "#0a0b0c0d"] {
        let color: Color = hex.parse().unwrap();
        assert_eq!(color.to_string(), hex);
    }
}
