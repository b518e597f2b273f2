// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Drawing primitives: colors, shapes and resolved paint

use crate::Vec2;
use easy_cast::CastFloat;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Color errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ColorError {
    #[error("color component {0} is outside the range 0 to 1")]
    InvalidComponent(f32),
    #[error("malformed color string '{0}'")]
    MalformedString(String),
}

/// An RGBA color
///
/// Components are in the range `[0, 1]`; alpha `1` is opaque. The string form
/// is `#rrggbbaa` (lower-case hex).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct Color {
    r: f32,
    g: f32,
    b: f32,
    a: f32,
}

pub const BLACK: Color = Color::gray_unchecked(0.0);
pub const WHITE: Color = Color::gray_unchecked(1.0);
pub const GRAY10: Color = Color::gray_unchecked(0.1);
pub const GRAY25: Color = Color::gray_unchecked(0.25);
pub const GRAY50: Color = Color::gray_unchecked(0.5);
pub const GRAY75: Color = Color::gray_unchecked(0.75);
pub const GRAY90: Color = Color::gray_unchecked(0.9);
pub const RED: Color = Color::rgb_unchecked(1.0, 0.0, 0.0);
pub const GREEN: Color = Color::rgb_unchecked(0.0, 1.0, 0.0);
pub const BLUE: Color = Color::rgb_unchecked(0.0, 0.0, 1.0);

impl Color {
    const fn rgb_unchecked(r: f32, g: f32, b: f32) -> Self {
        Color { r, g, b, a: 1.0 }
    }

    const fn gray_unchecked(l: f32) -> Self {
        Color::rgb_unchecked(l, l, l)
    }

    /// Construct from components
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Result<Self, ColorError> {
        for x in [r, g, b, a] {
            if !(0.0..=1.0).contains(&x) {
                return Err(ColorError::InvalidComponent(x));
            }
        }
        Ok(Color { r, g, b, a })
    }

    /// Construct an opaque color
    pub fn rgb(r: f32, g: f32, b: f32) -> Result<Self, ColorError> {
        Color::new(r, g, b, 1.0)
    }

    /// Construct a shade of gray from its luminance
    pub fn gray(luminance: f32, alpha: f32) -> Result<Self, ColorError> {
        Color::new(luminance, luminance, luminance, alpha)
    }

    /// Parse `#RRGGBB` or `#RRGGBBAA`
    ///
    /// The leading `#` is optional; digits may be either case. Alpha defaults
    /// to opaque.
    pub fn from_hex(s: &str) -> Result<Self, ColorError> {
        let malformed = || ColorError::MalformedString(s.to_string());
        let hex = s.strip_prefix('#').unwrap_or(s);
        if !matches!(hex.len(), 6 | 8) || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(malformed());
        }

        let mut bytes = [255u8; 4];
        for (i, byte) in bytes.iter_mut().enumerate().take(hex.len() / 2) {
            *byte = u8::from_str_radix(&hex[2 * i..2 * i + 2], 16).map_err(|_| malformed())?;
        }
        let [r, g, b, a] = bytes.map(|x| f32::from(x) / 255.0);
        Ok(Color { r, g, b, a })
    }

    /// Components `(r, g, b, a)`
    pub fn rgba(&self) -> (f32, f32, f32, f32) {
        (self.r, self.g, self.b, self.a)
    }

    /// Components as bytes, rounded to the nearest step
    pub fn to_bytes(&self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a].map(|x| (x * 255.0).cast_nearest())
    }

    /// True if fully opaque
    pub fn is_opaque(&self) -> bool {
        self.a >= 1.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b, a] = self.to_bytes();
        write!(f, "#{r:02x}{g:02x}{b:02x}{a:02x}")
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::from_hex(s)
    }
}

impl TryFrom<String> for Color {
    type Error = ColorError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Color::from_hex(&s)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

/// A drawing primitive
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    /// A straight line; only ever stroked
    Line { start: Vec2, end: Vec2 },
    /// A closed polygon; stroked and/or filled
    Polygon(Vec<Vec2>),
}

impl Shape {
    /// An axis-aligned rectangle
    ///
    /// Corners are listed counter-clockwise from `bottom_left`.
    pub fn rectangle(bottom_left: Vec2, width: f32, height: f32) -> Self {
        let Vec2(x, y) = bottom_left;
        Shape::Polygon(vec![
            bottom_left,
            Vec2(x + width, y),
            Vec2(x + width, y + height),
            Vec2(x, y + height),
        ])
    }

    /// True for shapes which may be filled
    pub fn is_closed(&self) -> bool {
        matches!(self, Shape::Polygon(_))
    }
}

/// Stroke parameters
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stroke {
    /// Width, in points
    pub width: f32,
    pub color: Color,
}

/// Resolved paint for a [`Shape`]
///
/// Produced by [`crate::tree::Document::paint`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Paint {
    pub stroke: Option<Stroke>,
    pub fill: Option<Color>,
}

impl Paint {
    /// True if nothing is drawn
    pub fn is_empty(&self) -> bool {
        self.stroke.is_none() && self.fill.is_none()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn validate_components() {
        assert!(Color::new(0.0, 0.5, 1.0, 1.0).is_ok());
        assert_eq!(
            Color::new(0.0, 1.5, 0.0, 1.0),
            Err(ColorError::InvalidComponent(1.5))
        );
        assert!(Color::rgb(-0.1, 0.0, 0.0).is_err());
        assert!(Color::gray(0.5, f32::NAN).is_err());
    }

    #[test]
    fn parse_hex() {
        assert_eq!(Color::from_hex("#FF0000").unwrap().rgba(), (1.0, 0.0, 0.0, 1.0));
        assert_eq!("00ff0080".parse::<Color>().unwrap().to_bytes(), [0, 255, 0, 128]);
        for bad in ["", "#", "#ff00", "#ff00000", "#gg0000", "#+f0000", "#ff0000ff00", "#ééé"] {
            assert!(
                matches!(Color::from_hex(bad), Err(ColorError::MalformedString(_))),
                "{bad}"
            );
        }
    }

    #[test]
    fn hex_round_trip() {
        assert_eq!(Color::from_hex("#FF0000").unwrap().to_string(), "#ff0000ff");
        for s in ["#00000000", "#12345678", "#fedcba98", "#80808080"] {
            assert_eq!(Color::from_hex(s).unwrap().to_string(), s);
        }
        assert_eq!(GRAY50.to_string(), "#808080ff");
        assert_eq!(BLACK.to_string(), "#000000ff");
    }

    #[test]
    fn rectangle() {
        let rect = Shape::rectangle(Vec2(1.0, 2.0), 3.0, 4.0);
        assert_eq!(
            rect,
            Shape::Polygon(vec![
                Vec2(1.0, 2.0),
                Vec2(4.0, 2.0),
                Vec2(4.0, 6.0),
                Vec2(1.0, 6.0)
            ])
        );
        assert!(rect.is_closed());
        assert!(Paint::default().is_empty());
    }
}
