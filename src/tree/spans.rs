// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Flattening a tree into renderable spans

use super::{Atom, CascadeError, Document, NodeId, NodeKind};
use crate::style::Attribute;
use crate::GlyphVariant;
use std::iter::FusedIterator;

/// Kind of a [`Span`]
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SpanKind {
    /// A run or a printable atom, with the glyph variant to render it with
    Text(Option<GlyphVariant>),
    /// A line-control atom
    Control(Atom),
    /// An embedded object
    Embedded,
}

/// A leaf renderable unit
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Span {
    pub node: NodeId,
    pub kind: SpanKind,
    /// Effective vertical offset, in points
    pub y_offset: f32,
}

/// Depth-first iterator over the leaves of a subtree
///
/// Constructed by [`Document::spans`]. After yielding an error the iterator
/// is exhausted.
#[derive(Clone, Debug)]
pub struct Spans<'a> {
    doc: &'a Document,
    // Pending nodes, next on top
    stack: Vec<NodeId>,
}

impl<'a> Spans<'a> {
    fn span(&self, node: NodeId) -> Result<Option<Span>, CascadeError> {
        let kind = match &self.doc[node].kind {
            NodeKind::Composite(_) | NodeKind::Shape(_) => return Ok(None),
            NodeKind::Atom(atom) if atom.is_control() => SpanKind::Control(*atom),
            NodeKind::Run(_) | NodeKind::Atom(_) => {
                let small_caps = self.doc.resolve_flag(node, Attribute::SmallCaps)?;
                SpanKind::Text(small_caps.then_some(GlyphVariant::SmallCapital))
            }
            NodeKind::Embedded(_) => SpanKind::Embedded,
        };
        let y_offset = self.doc.y_offset(node)?;
        Ok(Some(Span {
            node,
            kind,
            y_offset,
        }))
    }
}

impl<'a> Iterator for Spans<'a> {
    type Item = Result<Span, CascadeError>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            self.stack
                .extend(self.doc[node].children().iter().rev().copied());
            match self.span(node) {
                Ok(Some(span)) => return Some(Ok(span)),
                Ok(None) => (),
                Err(err) => {
                    self.stack.clear();
                    return Some(Err(err));
                }
            }
        }
        None
    }
}

impl<'a> FusedIterator for Spans<'a> {}

impl Document {
    /// Iterate over the leaves of the subtree at `id`
    ///
    /// Composites are flattened in child order. Runs and printable atoms
    /// yield text spans, using small-capital glyphs where `small_caps` is
    /// set; new lines and tabs yield control spans; embedded objects are
    /// passed through.
    pub fn spans(&self, id: NodeId) -> Spans<'_> {
        Spans {
            doc: self,
            stack: vec![id],
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::style::{presets, Base, Style, StyleClass};
    use crate::tree::{Child, Embeddable};
    use std::sync::Arc;

    #[derive(Debug)]
    struct Figure;

    impl Embeddable for Figure {
        fn width(&self) -> f32 {
            20.0
        }
        fn height(&self) -> f32 {
            10.0
        }
    }

    fn root() -> Arc<Style> {
        Style::builder(StyleClass::Text)
            .base(Base::Defaults)
            .build()
            .unwrap()
    }

    #[test]
    fn depth_first_order() {
        let mut doc = Document::new();
        let inner = doc.composite(presets::small_caps(), ["b", "c"]).unwrap();
        let figure = doc.embed(presets::inherit(), Arc::new(Figure));
        let newline = doc.atom(presets::inherit(), Atom::NewLine);
        let top = doc
            .composite(root(), [Child::from("a"), inner.into(), newline.into(), figure.into()])
            .unwrap();

        let spans: Vec<Span> = doc.spans(top).collect::<Result<_, _>>().unwrap();
        let text: Vec<String> = spans.iter().map(|s| doc.text(s.node)).collect();
        assert_eq!(text, ["a", "b", "c", "\n", ""]);
        assert_eq!(spans[0].kind, SpanKind::Text(None));
        assert_eq!(spans[1].kind, SpanKind::Text(Some(GlyphVariant::SmallCapital)));
        assert_eq!(spans[3].kind, SpanKind::Control(Atom::NewLine));
        assert_eq!(spans[4].kind, SpanKind::Embedded);
        assert_eq!(spans[4].node, figure);
    }

    #[test]
    fn fused_after_error() {
        let mut doc = Document::new();
        let top = doc.composite(presets::inherit(), ["a", "b"]).unwrap();
        let mut spans = doc.spans(top);
        assert!(matches!(
            spans.next(),
            Some(Err(CascadeError::UnresolvedParentStyle { .. }))
        ));
        assert!(spans.next().is_none());
        assert!(spans.next().is_none());
    }

    #[test]
    fn single_leaf() {
        let mut doc = Document::new();
        let run = doc.run(root(), "x");
        let spans: Vec<_> = doc.spans(run).collect();
        assert_eq!(spans.len(), 1);
        assert!(spans[0].is_ok());
    }
}
