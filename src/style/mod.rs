// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Styles
//!
//! A [`Style`] is an immutable set of attribute values, validated against the
//! [`Schema`] of its class, plus a [`Base`] naming where unset attributes are
//! looked up. Styles are shared via [`Arc`].
//!
//! Lookup within a style only follows the chain of concrete base styles; see
//! [`crate::tree::Document::resolve`] for the full cascade through the
//! document tree.

use smallvec::SmallVec;
use std::sync::Arc;
use thiserror::Error;

mod attribute;
pub mod presets;
mod schema;

pub use attribute::{Attribute, Value, ValueKind};
pub use schema::{Schema, StyleClass};

/// Style definition errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StyleError {
    #[error("style class '{class}' allows attribute '{attribute}' without a default")]
    MissingSchemaDefault {
        class: &'static str,
        attribute: Attribute,
    },
    #[error("style class '{class}' does not accept attribute '{attribute}'")]
    UnknownAttribute {
        class: &'static str,
        attribute: Attribute,
    },
    #[error("attribute '{attribute}' expects a {expected:?} value, found {found:?}")]
    KindMismatch {
        attribute: Attribute,
        expected: ValueKind,
        found: ValueKind,
    },
}

/// Where a style looks up attributes it does not set
#[derive(Clone, Debug, Default)]
pub enum Base {
    /// Inherit from the style of the parent node
    #[default]
    Parent,
    /// Inherit from another style
    Style(Arc<Style>),
    /// Use the schema's defaults
    Defaults,
}

/// Result of [`Style::lookup`]
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Lookup<'a> {
    /// Set by the style or one of its base styles
    Found(&'a Value),
    /// Continue with the style of the parent node
    Parent,
    /// Not set; the chain ended at a style using the given schema's defaults
    Default(&'a Schema),
}

/// An immutable set of style attributes
#[derive(Debug)]
pub struct Style {
    schema: Arc<Schema>,
    attrs: SmallVec<[(Attribute, Value); 4]>,
    base: Base,
}

impl Style {
    /// Start building a style of the given class
    ///
    /// Text styles inherit from the parent node by default; line and shape
    /// styles use their schema defaults.
    pub fn builder(class: StyleClass) -> StyleBuilder {
        let base = match class {
            StyleClass::Text => Base::Parent,
            StyleClass::Line | StyleClass::Shape => Base::Defaults,
        };
        StyleBuilder {
            schema: class.schema(),
            attrs: SmallVec::new(),
            base,
        }
    }

    /// Start building a style using a custom schema
    ///
    /// The base defaults to [`Base::Defaults`].
    pub fn with_schema(schema: Arc<Schema>) -> StyleBuilder {
        StyleBuilder {
            schema,
            attrs: SmallVec::new(),
            base: Base::Defaults,
        }
    }

    /// The style's schema
    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    /// The style's base
    pub fn base(&self) -> &Base {
        &self.base
    }

    /// Get a value set directly by this style
    pub fn get(&self, attribute: Attribute) -> Option<&Value> {
        self.attrs
            .iter()
            .find(|(a, _)| *a == attribute)
            .map(|(_, v)| v)
    }

    /// Iterate over values set directly by this style
    pub fn attributes(&self) -> impl Iterator<Item = (Attribute, &Value)> {
        self.attrs.iter().map(|(a, v)| (*a, v))
    }

    /// Look up `attribute` through this style's chain of base styles
    pub fn lookup(&self, attribute: Attribute) -> Lookup<'_> {
        let mut style = self;
        loop {
            if let Some(value) = style.get(attribute) {
                return Lookup::Found(value);
            }
            match &style.base {
                Base::Style(base) => style = &**base,
                Base::Parent => return Lookup::Parent,
                Base::Defaults => return Lookup::Default(&*style.schema),
            }
        }
    }
}

/// Builder for a [`Style`]
///
/// Values are validated by [`StyleBuilder::build`].
#[derive(Debug)]
#[must_use]
pub struct StyleBuilder {
    schema: Arc<Schema>,
    attrs: SmallVec<[(Attribute, Value); 4]>,
    base: Base,
}

impl StyleBuilder {
    /// Set an attribute
    ///
    /// Setting an attribute twice keeps the last value.
    pub fn set(mut self, attribute: Attribute, value: impl Into<Value>) -> Self {
        let value = value.into();
        match self.attrs.iter_mut().find(|(a, _)| *a == attribute) {
            Some(entry) => entry.1 = value,
            None => self.attrs.push((attribute, value)),
        }
        self
    }

    /// Set the base
    pub fn base(mut self, base: Base) -> Self {
        self.base = base;
        self
    }

    /// Set a concrete base style
    pub fn based_on(self, style: &Arc<Style>) -> Self {
        self.base(Base::Style(style.clone()))
    }

    /// Validate and build
    pub fn build(self) -> Result<Arc<Style>, StyleError> {
        for (attribute, value) in &self.attrs {
            let attribute = *attribute;
            if !self.schema.allows(attribute) {
                return Err(StyleError::UnknownAttribute {
                    class: self.schema.class(),
                    attribute,
                });
            }
            if value.kind() != attribute.kind() {
                return Err(StyleError::KindMismatch {
                    attribute,
                    expected: attribute.kind(),
                    found: value.kind(),
                });
            }
        }
        Ok(Arc::new(Style {
            schema: self.schema,
            attrs: self.attrs,
            base: self.base,
        }))
    }
}
