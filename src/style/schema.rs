// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Style schemas: the attributes of a style class and their defaults

use super::{Attribute, StyleError, Value};
use crate::draw::{BLACK, GRAY90};
use crate::fonts::{FontSlant, FontWeight, FontWidth};
use crate::TextPosition;
use smallvec::SmallVec;
use std::sync::{Arc, LazyLock};

/// The attributes a style class may set, each with a default
///
/// Every attribute a schema allows has a default of the right kind, and
/// every default is for an allowed attribute; this is checked when the schema
/// is defined.
#[derive(Debug, PartialEq)]
pub struct Schema {
    class: &'static str,
    allowed: SmallVec<[Attribute; 12]>,
    defaults: SmallVec<[(Attribute, Value); 12]>,
}

impl Schema {
    /// Define a schema
    ///
    /// Each attribute of `allowed` must have an entry in `defaults`
    /// ([`StyleError::MissingSchemaDefault`]), each default must be of the
    /// attribute's kind ([`StyleError::KindMismatch`]) and for an allowed
    /// attribute ([`StyleError::UnknownAttribute`]).
    pub fn new(
        class: &'static str,
        allowed: &[Attribute],
        defaults: impl IntoIterator<Item = (Attribute, Value)>,
    ) -> Result<Self, StyleError> {
        let mut schema = Schema {
            class,
            allowed: SmallVec::new(),
            defaults: SmallVec::new(),
        };
        schema.add_allowed(allowed);
        schema.add_defaults(defaults)?;
        schema.check_defaults()?;
        Ok(schema)
    }

    /// Define a schema extending `self`
    ///
    /// The result allows all attributes of `self` plus those in `allowed`,
    /// validated as in [`Self::new`]. Later defaults replace earlier ones.
    pub fn extend(
        &self,
        class: &'static str,
        allowed: &[Attribute],
        defaults: impl IntoIterator<Item = (Attribute, Value)>,
    ) -> Result<Self, StyleError> {
        let mut schema = Schema {
            class,
            allowed: self.allowed.clone(),
            defaults: self.defaults.clone(),
        };
        schema.add_allowed(allowed);
        schema.add_defaults(defaults)?;
        schema.check_defaults()?;
        Ok(schema)
    }

    fn add_allowed(&mut self, allowed: &[Attribute]) {
        for attribute in allowed {
            if !self.allowed.contains(attribute) {
                self.allowed.push(*attribute);
            }
        }
    }

    fn add_defaults(
        &mut self,
        defaults: impl IntoIterator<Item = (Attribute, Value)>,
    ) -> Result<(), StyleError> {
        for (attribute, value) in defaults {
            if value.kind() != attribute.kind() {
                return Err(StyleError::KindMismatch {
                    attribute,
                    expected: attribute.kind(),
                    found: value.kind(),
                });
            }
            if !self.allows(attribute) {
                return Err(StyleError::UnknownAttribute {
                    class: self.class,
                    attribute,
                });
            }
            match self.defaults.iter_mut().find(|(a, _)| *a == attribute) {
                Some(entry) => entry.1 = value,
                None => self.defaults.push((attribute, value)),
            }
        }
        Ok(())
    }

    fn check_defaults(&self) -> Result<(), StyleError> {
        match self.allowed.iter().find(|a| self.default_value(**a).is_none()) {
            Some(&attribute) => Err(StyleError::MissingSchemaDefault {
                class: self.class,
                attribute,
            }),
            None => Ok(()),
        }
    }

    /// The style class name
    pub fn class(&self) -> &'static str {
        self.class
    }

    /// True if styles of this class may set `attribute`
    pub fn allows(&self, attribute: Attribute) -> bool {
        self.allowed.contains(&attribute)
    }

    /// The default for `attribute`, if allowed
    pub fn default_value(&self, attribute: Attribute) -> Option<&Value> {
        self.defaults
            .iter()
            .find(|(a, _)| *a == attribute)
            .map(|(_, v)| v)
    }

    /// Iterate over attributes and their defaults
    pub fn defaults(&self) -> impl Iterator<Item = (Attribute, &Value)> {
        self.defaults.iter().map(|(a, v)| (*a, v))
    }
}

/// Built-in style classes
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum StyleClass {
    /// Text: font selection, position and hyphenation attributes
    Text,
    /// Lines: stroke attributes
    Line,
    /// Closed shapes: stroke and fill attributes
    Shape,
}

impl StyleClass {
    /// The schema of this class
    pub fn schema(self) -> Arc<Schema> {
        match self {
            StyleClass::Text => TEXT_SCHEMA.clone(),
            StyleClass::Line => LINE_SCHEMA.clone(),
            StyleClass::Shape => SHAPE_SCHEMA.clone(),
        }
    }
}

fn text_defaults() -> [(Attribute, Value); 12] {
    [
        (Attribute::Typeface, Value::Typeface("serif".to_string())),
        (Attribute::FontWeight, Value::Weight(FontWeight::NORMAL)),
        (Attribute::FontSlant, Value::Slant(FontSlant::Upright)),
        (Attribute::FontWidth, Value::Width(FontWidth::NORMAL)),
        (Attribute::FontSize, Value::Size(10.0)),
        (Attribute::SmallCaps, Value::Flag(false)),
        (Attribute::Position, Value::Position(TextPosition::Normal)),
        (Attribute::Kerning, Value::Flag(true)),
        (Attribute::Ligatures, Value::Flag(true)),
        (Attribute::Hyphenate, Value::Flag(true)),
        (Attribute::HyphenChars, Value::Count(2)),
        (Attribute::HyphenLang, Value::Lang("en_US".to_string())),
    ]
}

// The built-in tables allow exactly the attributes they list a default for,
// so they cannot fail validation.
fn builtin(class: &'static str, defaults: SmallVec<[(Attribute, Value); 12]>) -> Arc<Schema> {
    Arc::new(Schema {
        class,
        allowed: defaults.iter().map(|(a, _)| *a).collect(),
        defaults,
    })
}

static TEXT_SCHEMA: LazyLock<Arc<Schema>> =
    LazyLock::new(|| builtin("text", text_defaults().into_iter().collect()));

static LINE_SCHEMA: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    builtin(
        "line",
        [
            (Attribute::StrokeWidth, Value::Size(1.0)),
            (Attribute::StrokeColor, Value::Color(Some(BLACK))),
        ]
        .into_iter()
        .collect(),
    )
});

static SHAPE_SCHEMA: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    let mut defaults = LINE_SCHEMA.defaults.clone();
    defaults.push((Attribute::FillColor, Value::Color(Some(GRAY90))));
    builtin("shape", defaults)
});

#[cfg(test)]
mod test {
    use super::*;
    use crate::style::ValueKind;

    #[test]
    fn builtin_schemas_are_complete() {
        for class in [StyleClass::Text, StyleClass::Line, StyleClass::Shape] {
            let schema = class.schema();
            for (attribute, value) in schema.defaults() {
                assert_eq!(attribute.kind(), value.kind(), "{attribute}");
            }
        }
        let text = StyleClass::Text.schema();
        assert_eq!(text.default_value(Attribute::FontSize), Some(&Value::Size(10.0)));
        assert!(!text.allows(Attribute::FillColor));

        let shape = StyleClass::Shape.schema();
        assert!(shape.allows(Attribute::StrokeWidth));
        assert!(shape.allows(Attribute::FillColor));
        assert!(!StyleClass::Line.schema().allows(Attribute::FillColor));
    }

    #[test]
    fn missing_default_is_rejected() {
        let err = Schema::new(
            "caption",
            &[Attribute::FontSize, Attribute::Kerning],
            [(Attribute::FontSize, Value::Size(8.0))],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            StyleError::MissingSchemaDefault {
                class: "caption",
                attribute: Attribute::Kerning
            }
        ));
    }

    #[test]
    fn default_outside_allowed_is_rejected() {
        let err = Schema::new(
            "caption",
            &[Attribute::FontSize],
            [
                (Attribute::FontSize, Value::Size(8.0)),
                (Attribute::Kerning, Value::Flag(false)),
            ],
        )
        .unwrap_err();
        assert_eq!(
            err,
            StyleError::UnknownAttribute {
                class: "caption",
                attribute: Attribute::Kerning
            }
        );

        let caption = Schema::new(
            "caption",
            &[Attribute::FontSize],
            [(Attribute::FontSize, Value::Size(8.0))],
        )
        .unwrap();
        assert!(caption.allows(Attribute::FontSize));
        assert!(!caption.allows(Attribute::Kerning));
    }

    #[test]
    fn wrong_default_kind_is_rejected() {
        let err = Schema::new(
            "caption",
            &[Attribute::FontSize],
            [(Attribute::FontSize, Value::Flag(true))],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            StyleError::KindMismatch {
                expected: ValueKind::Size,
                found: ValueKind::Flag,
                ..
            }
        ));
    }

    #[test]
    fn extend_overrides_defaults() {
        let line = StyleClass::Line.schema();
        let thick = line
            .extend(
                "thick",
                &[Attribute::StrokeWidth],
                [(Attribute::StrokeWidth, Value::Size(4.0))],
            )
            .unwrap();
        assert_eq!(thick.default_value(Attribute::StrokeWidth), Some(&Value::Size(4.0)));
        assert!(thick.allows(Attribute::StrokeColor));
        assert_eq!(thick.class(), "thick");
    }
}
