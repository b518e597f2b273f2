// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Properties for specifying font weight, width and slant.

use core::fmt;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Visual width of a font: a relative change from the normal aspect ratio
///
/// The default value is [`FontWidth::NORMAL`]. Values are stored as a ratio
/// times 256, thus `NORMAL` is `256`.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct FontWidth(u16);

impl FontWidth {
    /// Width that is 50% of normal.
    pub const ULTRA_CONDENSED: Self = Self(128);

    /// Width that is 62.5% of normal.
    pub const EXTRA_CONDENSED: Self = Self(160);

    /// Width that is 75% of normal.
    pub const CONDENSED: Self = Self(192);

    /// Width that is 87.5% of normal.
    pub const SEMI_CONDENSED: Self = Self(224);

    /// Width that is 100% of normal. This is the default value.
    pub const NORMAL: Self = Self(256);

    /// Width that is 112.5% of normal.
    pub const SEMI_EXPANDED: Self = Self(288);

    /// Width that is 125% of normal.
    pub const EXPANDED: Self = Self(320);

    /// Width that is 150% of normal.
    pub const EXTRA_EXPANDED: Self = Self(384);

    /// Width that is 200% of normal.
    pub const ULTRA_EXPANDED: Self = Self(512);

    /// Creates a new width attribute with the given ratio.
    ///
    /// The ratio is clamped to the representable range `0..=255.99`.
    pub fn from_ratio(ratio: f32) -> Self {
        let value = (ratio * 256.0).round().clamp(0.0, f32::from(u16::MAX));
        Self(value as u16)
    }

    /// Returns the width attribute as a ratio.
    ///
    /// This is a linear scaling factor with `1.0` being "normal" width.
    pub fn ratio(self) -> f32 {
        f32::from(self.0) / 256.0
    }

    /// Returns `true` if the width is [normal](FontWidth::NORMAL).
    pub fn is_normal(self) -> bool {
        self == Self::NORMAL
    }

    /// Absolute difference, in 1/256 units
    pub(crate) fn distance(self, other: Self) -> u16 {
        self.0.abs_diff(other.0)
    }
}

impl Default for FontWidth {
    fn default() -> Self {
        Self::NORMAL
    }
}

impl fmt::Display for FontWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keyword = match *self {
            v if v == Self::ULTRA_CONDENSED => "ultra-condensed",
            v if v == Self::EXTRA_CONDENSED => "extra-condensed",
            v if v == Self::CONDENSED => "condensed",
            v if v == Self::SEMI_CONDENSED => "semi-condensed",
            v if v == Self::NORMAL => "normal",
            v if v == Self::SEMI_EXPANDED => "semi-expanded",
            v if v == Self::EXPANDED => "expanded",
            v if v == Self::EXTRA_EXPANDED => "extra-expanded",
            v if v == Self::ULTRA_EXPANDED => "ultra-expanded",
            _ => return write!(f, "{}%", self.ratio() * 100.0),
        };
        write!(f, "{keyword}")
    }
}

impl From<FontWidth> for fontdb::Stretch {
    fn from(width: FontWidth) -> Self {
        use fontdb::Stretch;
        match width.0 {
            0..=143 => Stretch::UltraCondensed,
            144..=175 => Stretch::ExtraCondensed,
            176..=207 => Stretch::Condensed,
            208..=239 => Stretch::SemiCondensed,
            240..=271 => Stretch::Normal,
            272..=303 => Stretch::SemiExpanded,
            304..=351 => Stretch::Expanded,
            352..=447 => Stretch::ExtraExpanded,
            _ => Stretch::UltraExpanded,
        }
    }
}

/// Visual weight class of a font, on a scale from 1 to 1000
///
/// The default value is [`FontWeight::NORMAL`] or `400`.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct FontWeight(u16);

impl FontWeight {
    /// Weight value of 100.
    pub const THIN: Self = Self(100);

    /// Weight value of 300.
    pub const LIGHT: Self = Self(300);

    /// Weight value of 400. This is the default value.
    pub const NORMAL: Self = Self(400);

    /// Weight value of 500.
    pub const MEDIUM: Self = Self(500);

    /// Weight value of 600.
    pub const SEMI_BOLD: Self = Self(600);

    /// Weight value of 700.
    pub const BOLD: Self = Self(700);

    /// Weight value of 900.
    pub const BLACK: Self = Self(900);

    /// Creates a new weight attribute with the given value.
    pub const fn new(weight: u16) -> Self {
        Self(weight)
    }

    /// Returns the underlying weight value.
    pub fn value(self) -> u16 {
        self.0
    }

    /// Parses a CSS style font weight attribute.
    ///
    /// # Examples
    ///
    /// ```
    /// # use typeset_text::fonts::FontWeight;
    /// assert_eq!(FontWeight::parse("normal"), Some(FontWeight::NORMAL));
    /// assert_eq!(FontWeight::parse("bold"), Some(FontWeight::BOLD));
    /// assert_eq!(FontWeight::parse("850"), Some(FontWeight::new(850)));
    /// assert_eq!(FontWeight::parse("invalid"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Some(match s {
            "normal" => Self::NORMAL,
            "bold" => Self::BOLD,
            _ => Self(s.parse::<u16>().ok()?),
        })
    }

    pub(crate) fn distance(self, other: Self) -> u16 {
        self.0.abs_diff(other.0)
    }
}

impl Default for FontWeight {
    fn default() -> Self {
        Self::NORMAL
    }
}

impl fmt::Display for FontWeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keyword = match self.0 {
            100 => "thin",
            300 => "light",
            400 => "normal",
            500 => "medium",
            600 => "semi-bold",
            700 => "bold",
            900 => "black",
            _ => return write!(f, "{}", self.0),
        };
        write!(f, "{keyword}")
    }
}

impl From<FontWeight> for fontdb::Weight {
    fn from(weight: FontWeight) -> Self {
        fontdb::Weight(weight.0)
    }
}

/// Slant of a font
///
/// The default value is [`FontSlant::Upright`].
#[derive(Copy, Clone, PartialEq, Eq, Default, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FontSlant {
    /// An upright or "roman" style.
    #[default]
    Upright,
    /// A mechanically slanted version of the upright style.
    Oblique,
    /// A slanted style based on cursive forms.
    Italic,
}

impl FontSlant {
    /// Parses a font slant from a CSS `font-style` keyword.
    pub fn parse(s: &str) -> Option<Self> {
        Some(match s.trim() {
            "normal" | "upright" => Self::Upright,
            "oblique" => Self::Oblique,
            "italic" => Self::Italic,
            _ => return None,
        })
    }

    /// Mismatch penalty when substituting `other` for `self`
    ///
    /// Italic and oblique are considered closer to each other than to upright.
    pub(crate) fn distance(self, other: Self) -> u8 {
        match (self, other) {
            (a, b) if a == b => 0,
            (Self::Italic, Self::Oblique) | (Self::Oblique, Self::Italic) => 1,
            _ => 2,
        }
    }
}

impl fmt::Display for FontSlant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            Self::Upright => "normal",
            Self::Oblique => "oblique",
            Self::Italic => "italic",
        };
        write!(f, "{value}")
    }
}

impl From<FontSlant> for fontdb::Style {
    fn from(slant: FontSlant) -> Self {
        match slant {
            FontSlant::Upright => fontdb::Style::Normal,
            FontSlant::Oblique => fontdb::Style::Oblique,
            FontSlant::Italic => fontdb::Style::Italic,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn width_ratio() {
        assert_eq!(FontWidth::from_ratio(1.5), FontWidth::EXTRA_EXPANDED);
        assert_eq!(FontWidth::NORMAL.ratio(), 1.0);
        assert_eq!(FontWidth::CONDENSED.to_string(), "condensed");
        assert_eq!(fontdb::Stretch::from(FontWidth::NORMAL), fontdb::Stretch::Normal);
        assert_eq!(
            fontdb::Stretch::from(FontWidth::ULTRA_EXPANDED),
            fontdb::Stretch::UltraExpanded
        );
    }

    #[test]
    fn slant_distance() {
        assert_eq!(FontSlant::Italic.distance(FontSlant::Italic), 0);
        assert_eq!(FontSlant::Italic.distance(FontSlant::Oblique), 1);
        assert_eq!(FontSlant::Italic.distance(FontSlant::Upright), 2);
        assert_eq!(FontSlant::parse("italic"), Some(FontSlant::Italic));
        assert_eq!(FontSlant::parse("slanted"), None);
    }
}
