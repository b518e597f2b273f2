// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Style cascade resolution

use super::{Atom, Document, NodeId, NodeKind};
use crate::draw::Color;
use crate::fonts::FontQuery;
use crate::style::{Attribute, Lookup, Value, ValueKind};
use crate::TextPosition;
use bitflags::bitflags;
use smallvec::SmallVec;
use thiserror::Error;

/// Attribute resolution errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CascadeError {
    #[error("node {node:?} inherits '{attribute}' from its parent but has none")]
    UnresolvedParentStyle { node: NodeId, attribute: Attribute },
    #[error("no default for '{attribute}' in the style classes of node {node:?}")]
    MissingSchemaDefault { node: NodeId, attribute: Attribute },
    #[error("attribute '{attribute}' resolved to a {found:?} value, expected {expected:?}")]
    KindMismatch {
        attribute: Attribute,
        expected: ValueKind,
        found: ValueKind,
    },
}

bitflags! {
    /// Boolean text options of a node
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct RunFlags: u8 {
        /// Apply kerning
        const KERNING = 1 << 0;
        /// Substitute ligatures
        const LIGATURES = 1 << 1;
        /// Offer hyphenation candidates
        const HYPHENATE = 1 << 2;
        /// Use small-capital glyphs
        const SMALL_CAPS = 1 << 3;
    }
}

impl Document {
    /// Resolve an attribute for a node
    ///
    /// The node's style and its chain of base styles are searched first. A
    /// chain ending in [`crate::style::Base::Parent`] continues with the
    /// parent node; one ending in [`crate::style::Base::Defaults`] takes the
    /// default of the style's schema, or failing that, of the schema of the
    /// style of `id`.
    ///
    /// Successful results are memoized.
    pub fn resolve(&self, id: NodeId, attribute: Attribute) -> Result<Value, CascadeError> {
        if let Some((value, _)) = self.memo.get(&(id, attribute)) {
            return Ok(value);
        }

        let mut visited = SmallVec::<[NodeId; 8]>::new();
        let mut node = id;
        let (value, shared) = loop {
            if node != id {
                if let Some((value, true)) = self.memo.get(&(node, attribute)) {
                    break (value, true);
                }
            }
            visited.push(node);

            match self[node].style.lookup(attribute) {
                Lookup::Found(value) => break (value.clone(), true),
                Lookup::Parent => match self[node].parent {
                    Some(parent) => node = parent,
                    None => {
                        return Err(CascadeError::UnresolvedParentStyle { node, attribute });
                    }
                },
                Lookup::Default(schema) => {
                    if let Some(value) = schema.default_value(attribute) {
                        break (value.clone(), true);
                    }
                    // The fallback depends on the requesting node, so it is
                    // not shared with the other visited nodes.
                    match self[id].style.schema().default_value(attribute) {
                        Some(value) => break (value.clone(), false),
                        None => {
                            return Err(CascadeError::MissingSchemaDefault { node: id, attribute });
                        }
                    }
                }
            }
        };

        if shared {
            for node in visited {
                self.memo.insert((node, attribute), (value.clone(), true));
            }
        } else {
            self.memo.insert((id, attribute), (value.clone(), false));
        }
        Ok(value)
    }

    fn resolve_as<T>(
        &self,
        id: NodeId,
        attribute: Attribute,
        f: impl FnOnce(&Value) -> Option<T>,
    ) -> Result<T, CascadeError> {
        let value = self.resolve(id, attribute)?;
        f(&value).ok_or(CascadeError::KindMismatch {
            attribute,
            expected: attribute.kind(),
            found: value.kind(),
        })
    }

    /// Resolve a size attribute
    pub fn resolve_size(&self, id: NodeId, attribute: Attribute) -> Result<f32, CascadeError> {
        self.resolve_as(id, attribute, Value::as_size)
    }

    /// Resolve a flag attribute
    pub fn resolve_flag(&self, id: NodeId, attribute: Attribute) -> Result<bool, CascadeError> {
        self.resolve_as(id, attribute, Value::as_flag)
    }

    /// Resolve a count attribute
    pub fn resolve_count(&self, id: NodeId, attribute: Attribute) -> Result<u32, CascadeError> {
        self.resolve_as(id, attribute, Value::as_count)
    }

    /// Resolve a typeface or language attribute
    pub fn resolve_str(&self, id: NodeId, attribute: Attribute) -> Result<String, CascadeError> {
        self.resolve_as(id, attribute, |v| v.as_str().map(str::to_string))
    }

    /// Resolve a color attribute; `None` means "no paint"
    pub fn resolve_color(
        &self,
        id: NodeId,
        attribute: Attribute,
    ) -> Result<Option<Color>, CascadeError> {
        self.resolve_as(id, attribute, Value::as_color)
    }

    /// The resolved font size, in points
    pub fn font_size(&self, id: NodeId) -> Result<f32, CascadeError> {
        self.resolve_size(id, Attribute::FontSize)
    }

    /// The resolved text position
    pub fn position(&self, id: NodeId) -> Result<TextPosition, CascadeError> {
        self.resolve_as(id, Attribute::Position, Value::as_position)
    }

    /// The resolved boolean text options
    pub fn run_flags(&self, id: NodeId) -> Result<RunFlags, CascadeError> {
        let mut flags = RunFlags::empty();
        for (flag, attribute) in [
            (RunFlags::KERNING, Attribute::Kerning),
            (RunFlags::LIGATURES, Attribute::Ligatures),
            (RunFlags::HYPHENATE, Attribute::Hyphenate),
            (RunFlags::SMALL_CAPS, Attribute::SmallCaps),
        ] {
            flags.set(flag, self.resolve_flag(id, attribute)?);
        }
        Ok(flags)
    }

    /// The resolved font selection
    pub fn font_query(&self, id: NodeId) -> Result<FontQuery, CascadeError> {
        Ok(FontQuery {
            typeface: self.resolve_str(id, Attribute::Typeface)?,
            weight: self.resolve_as(id, Attribute::FontWeight, Value::as_weight)?,
            slant: self.resolve_as(id, Attribute::FontSlant, Value::as_slant)?,
            width: self.resolve_as(id, Attribute::FontWidth, Value::as_width)?,
        })
    }

    /// The effective vertical offset of a node, in points
    ///
    /// This is the sum over the node and its ancestors of each node's own
    /// offset plus its position shift. The shift only applies where a
    /// position is set on the node's own style chain, so that nested nodes
    /// inheriting a position are not shifted again.
    pub fn y_offset(&self, id: NodeId) -> Result<f32, CascadeError> {
        let mut offset = 0.0;
        for node in self.ancestors(id) {
            offset += self[node].offset;
            if let Lookup::Found(Value::Position(position)) =
                self[node].style.lookup(Attribute::Position)
            {
                if *position != TextPosition::Normal {
                    offset += self.font_size(node)? * position.shift();
                }
            }
        }
        Ok(offset)
    }

    /// The height of a node, in points
    ///
    /// Boxes report their own height; anything else the font size, reduced
    /// for superscript and subscript.
    pub fn height(&self, id: NodeId) -> Result<f32, CascadeError> {
        if let NodeKind::Atom(Atom::Box { height, .. }) = self[id].kind {
            return Ok(height);
        }
        let size = self.font_size(id)?;
        Ok(size * self.position(id)?.size_factor())
    }
}
