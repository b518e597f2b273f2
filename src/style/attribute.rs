// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Style attributes and their values

use crate::draw::Color;
use crate::fonts::{FontSlant, FontWeight, FontWidth};
use crate::TextPosition;
use std::fmt;

/// A style attribute name
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Attribute {
    /// Typeface (family) name
    Typeface,
    FontWeight,
    FontSlant,
    FontWidth,
    /// Nominal font size, in points
    FontSize,
    /// Select small-capital glyphs
    SmallCaps,
    /// Superscript / subscript
    Position,
    Kerning,
    Ligatures,
    Hyphenate,
    /// Minimum number of characters kept on either side of a hyphenation break
    HyphenChars,
    /// Language tag used to select a hyphenation dictionary
    HyphenLang,
    /// Stroke width, in points
    StrokeWidth,
    StrokeColor,
    FillColor,
}

impl Attribute {
    /// The kind of value this attribute takes
    pub fn kind(self) -> ValueKind {
        match self {
            Attribute::Typeface => ValueKind::Typeface,
            Attribute::FontWeight => ValueKind::Weight,
            Attribute::FontSlant => ValueKind::Slant,
            Attribute::FontWidth => ValueKind::Width,
            Attribute::FontSize | Attribute::StrokeWidth => ValueKind::Size,
            Attribute::SmallCaps
            | Attribute::Kerning
            | Attribute::Ligatures
            | Attribute::Hyphenate => ValueKind::Flag,
            Attribute::Position => ValueKind::Position,
            Attribute::HyphenChars => ValueKind::Count,
            Attribute::HyphenLang => ValueKind::Lang,
            Attribute::StrokeColor | Attribute::FillColor => ValueKind::Color,
        }
    }

    /// The attribute's name, in `snake_case`
    pub fn name(self) -> &'static str {
        match self {
            Attribute::Typeface => "typeface",
            Attribute::FontWeight => "font_weight",
            Attribute::FontSlant => "font_slant",
            Attribute::FontWidth => "font_width",
            Attribute::FontSize => "font_size",
            Attribute::SmallCaps => "small_caps",
            Attribute::Position => "position",
            Attribute::Kerning => "kerning",
            Attribute::Ligatures => "ligatures",
            Attribute::Hyphenate => "hyphenate",
            Attribute::HyphenChars => "hyphen_chars",
            Attribute::HyphenLang => "hyphen_lang",
            Attribute::StrokeWidth => "stroke_width",
            Attribute::StrokeColor => "stroke_color",
            Attribute::FillColor => "fill_color",
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The kind of a [`Value`]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Typeface,
    Weight,
    Slant,
    Width,
    Size,
    Flag,
    Position,
    Count,
    Lang,
    Color,
}

/// A style attribute value
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Typeface(String),
    Weight(FontWeight),
    Slant(FontSlant),
    Width(FontWidth),
    /// A length in points
    Size(f32),
    Flag(bool),
    Position(TextPosition),
    Count(u32),
    Lang(String),
    /// A color, or `None` for "no paint"
    Color(Option<Color>),
}

impl Value {
    /// The kind of this value
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Typeface(_) => ValueKind::Typeface,
            Value::Weight(_) => ValueKind::Weight,
            Value::Slant(_) => ValueKind::Slant,
            Value::Width(_) => ValueKind::Width,
            Value::Size(_) => ValueKind::Size,
            Value::Flag(_) => ValueKind::Flag,
            Value::Position(_) => ValueKind::Position,
            Value::Count(_) => ValueKind::Count,
            Value::Lang(_) => ValueKind::Lang,
            Value::Color(_) => ValueKind::Color,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Typeface(s) | Value::Lang(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_size(&self) -> Option<f32> {
        match *self {
            Value::Size(x) => Some(x),
            _ => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match *self {
            Value::Flag(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_count(&self) -> Option<u32> {
        match *self {
            Value::Count(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_position(&self) -> Option<TextPosition> {
        match *self {
            Value::Position(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_weight(&self) -> Option<FontWeight> {
        match *self {
            Value::Weight(w) => Some(w),
            _ => None,
        }
    }

    pub fn as_slant(&self) -> Option<FontSlant> {
        match *self {
            Value::Slant(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_width(&self) -> Option<FontWidth> {
        match *self {
            Value::Width(w) => Some(w),
            _ => None,
        }
    }

    /// Get a color value
    ///
    /// Returns `Some(None)` for an explicit "no paint" value.
    pub fn as_color(&self) -> Option<Option<Color>> {
        match *self {
            Value::Color(c) => Some(c),
            _ => None,
        }
    }
}

impl From<f32> for Value {
    fn from(x: f32) -> Self {
        Value::Size(x)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Count(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Flag(b)
    }
}

impl From<FontWeight> for Value {
    fn from(w: FontWeight) -> Self {
        Value::Weight(w)
    }
}

impl From<FontSlant> for Value {
    fn from(s: FontSlant) -> Self {
        Value::Slant(s)
    }
}

impl From<FontWidth> for Value {
    fn from(w: FontWidth) -> Self {
        Value::Width(w)
    }
}

impl From<TextPosition> for Value {
    fn from(p: TextPosition) -> Self {
        Value::Position(p)
    }
}

impl From<Color> for Value {
    fn from(c: Color) -> Self {
        Value::Color(Some(c))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn kinds_agree() {
        assert_eq!(Attribute::FontSize.kind(), Value::Size(12.0).kind());
        assert_eq!(Attribute::Kerning.kind(), Value::from(true).kind());
        assert_eq!(Attribute::FillColor.kind(), Value::Color(None).kind());
        assert_ne!(Attribute::HyphenLang.kind(), Value::Typeface("x".into()).kind());
    }

    #[test]
    fn accessors() {
        assert_eq!(Value::Size(3.0).as_size(), Some(3.0));
        assert_eq!(Value::Size(3.0).as_flag(), None);
        assert_eq!(Value::Lang("de".into()).as_str(), Some("de"));
        assert_eq!(Value::Color(None).as_color(), Some(None));
        assert_eq!(Attribute::HyphenChars.to_string(), "hyphen_chars");
    }
}
