// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Predefined text styles
//!
//! Each is a text style inheriting from the parent node, shared process-wide.

use super::{Attribute, Style, StyleClass, Value};
use crate::fonts::{FontSlant, FontWeight};
use crate::TextPosition;
use std::sync::{Arc, LazyLock};

fn text_style(attrs: &[(Attribute, Value)]) -> Arc<Style> {
    let builder = attrs
        .iter()
        .fold(Style::builder(StyleClass::Text), |builder, (a, v)| {
            builder.set(*a, v.clone())
        });
    Style {
        schema: builder.schema,
        attrs: builder.attrs,
        base: builder.base,
    }
    .into()
}

static INHERIT: LazyLock<Arc<Style>> = LazyLock::new(|| text_style(&[]));

static BOLD: LazyLock<Arc<Style>> =
    LazyLock::new(|| text_style(&[(Attribute::FontWeight, FontWeight::BOLD.into())]));

static ITALIC: LazyLock<Arc<Style>> =
    LazyLock::new(|| text_style(&[(Attribute::FontSlant, FontSlant::Italic.into())]));

static BOLD_ITALIC: LazyLock<Arc<Style>> = LazyLock::new(|| {
    text_style(&[
        (Attribute::FontWeight, FontWeight::BOLD.into()),
        (Attribute::FontSlant, FontSlant::Italic.into()),
    ])
});

static SMALL_CAPS: LazyLock<Arc<Style>> =
    LazyLock::new(|| text_style(&[(Attribute::SmallCaps, true.into())]));

static SUPERSCRIPT: LazyLock<Arc<Style>> = LazyLock::new(|| {
    text_style(&[(Attribute::Position, TextPosition::Superscript.into())])
});

static SUBSCRIPT: LazyLock<Arc<Style>> =
    LazyLock::new(|| text_style(&[(Attribute::Position, TextPosition::Subscript.into())]));

/// A text style setting nothing; everything is inherited from the parent
pub fn inherit() -> Arc<Style> {
    INHERIT.clone()
}

/// Bold weight
pub fn bold() -> Arc<Style> {
    BOLD.clone()
}

/// Italic slant
pub fn italic() -> Arc<Style> {
    ITALIC.clone()
}

/// Bold weight and italic slant
pub fn bold_italic() -> Arc<Style> {
    BOLD_ITALIC.clone()
}

/// Emphasized text (italic)
pub fn emphasized() -> Arc<Style> {
    ITALIC.clone()
}

/// Small capitals
pub fn small_caps() -> Arc<Style> {
    SMALL_CAPS.clone()
}

pub fn superscript() -> Arc<Style> {
    SUPERSCRIPT.clone()
}

pub fn subscript() -> Arc<Style> {
    SUBSCRIPT.clone()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::style::{Base, Lookup};

    #[test]
    fn presets_inherit_from_parent() {
        for style in [
            inherit(),
            bold(),
            italic(),
            bold_italic(),
            small_caps(),
            superscript(),
            subscript(),
        ] {
            assert!(matches!(style.base(), Base::Parent));
            assert_eq!(style.schema().class(), "text");
        }
        assert_eq!(inherit().lookup(Attribute::FontSize), Lookup::Parent);
        assert_eq!(
            bold().get(Attribute::FontWeight),
            Some(&Value::Weight(FontWeight::BOLD))
        );
        assert_eq!(
            bold_italic().get(Attribute::FontWeight),
            Some(&Value::Weight(FontWeight::BOLD))
        );
        assert_eq!(
            bold_italic().get(Attribute::FontSlant),
            Some(&Value::Slant(FontSlant::Italic))
        );
        assert!(Arc::ptr_eq(&emphasized(), &italic()));
        assert!(Arc::ptr_eq(&inherit(), &inherit()));
    }
}
