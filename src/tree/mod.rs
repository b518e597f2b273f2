// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! The styled-text tree
//!
//! A [`Document`] owns an arena of [`Node`]s addressed by [`NodeId`]. Each
//! node carries a shared [`Style`] and a link to its parent, set once when the
//! node is attached to a composite. Attribute values are resolved through the
//! node's style chain and then its ancestors; see [`Document::resolve`].

use crate::conv::{to_u32, to_usize};
use crate::draw::{Paint, Shape, Stroke};
use crate::style::{presets, Attribute, Style, Value};
use crate::util::Cache;
use crate::Vec2;
use std::fmt;
use std::ops::Index;
use std::sync::Arc;
use thiserror::Error;

mod cascade;
mod spans;
mod split;

pub use cascade::{CascadeError, RunFlags};
pub use spans::{Span, SpanKind, Spans};
pub use split::{Fragment, FragmentKind, Split};

/// Tree construction errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TreeError {
    #[error("node {0:?} is not a composite")]
    NotComposite(NodeId),
    #[error("node {0:?} already has a parent")]
    AlreadyAttached(NodeId),
    #[error("attaching node {0:?} would create a cycle")]
    Cycle(NodeId),
    #[error("shape node {0:?} cannot be placed inline")]
    NotInline(NodeId),
    #[error("node {0:?} cannot be split")]
    NotSplittable(NodeId),
    #[error("style class '{found}' cannot be used for {expected}")]
    WrongStyleClass {
        expected: &'static str,
        found: &'static str,
    },
}

/// Identifies a node within a [`Document`]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    #[inline]
    fn index(self) -> usize {
        to_usize(self.0)
    }
}

/// A non-text inline object
///
/// Embedded objects are passed through [`Document::spans`] untouched.
pub trait Embeddable: fmt::Debug + Send + Sync {
    /// Width, in points
    fn width(&self) -> f32;
    /// Height, in points
    fn height(&self) -> f32;
}

/// Single-character text elements
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Atom {
    /// An inter-word space; a fixed-width space does not stretch
    Space { fixed_width: bool },
    /// A space which does not permit a line break
    NoBreakSpace,
    /// Fixed-width horizontal space, in points
    Spacer(f32),
    /// An opaque box, dimensions in points
    Box { width: f32, height: f32, depth: f32 },
    /// Forced line break
    NewLine,
    Tab,
}

impl Atom {
    /// Plain text representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Atom::Space { .. } | Atom::Spacer(_) => " ",
            Atom::NoBreakSpace => "\u{a0}",
            Atom::Box { .. } => "",
            Atom::NewLine => "\n",
            Atom::Tab => "\t",
        }
    }

    /// True for line-control atoms
    pub fn is_control(&self) -> bool {
        matches!(self, Atom::NewLine | Atom::Tab)
    }
}

/// Node content
#[derive(Clone, Debug)]
pub enum NodeKind {
    /// Single-style text
    Run(String),
    /// Children, in render order
    Composite(Vec<NodeId>),
    Atom(Atom),
    Embedded(Arc<dyn Embeddable>),
    /// A drawing primitive; never placed inside a composite
    Shape(Shape),
}

/// A tree node
#[derive(Clone, Debug)]
pub struct Node {
    style: Arc<Style>,
    parent: Option<NodeId>,
    offset: f32,
    kind: NodeKind,
}

impl Node {
    pub fn style(&self) -> &Arc<Style> {
        &self.style
    }

    /// The parent node, if attached
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Vertical offset relative to the parent, excluding any position shift
    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// The text of a run
    pub fn as_run(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Run(text) => Some(text),
            _ => None,
        }
    }

    /// The children of a composite (empty for other nodes)
    pub fn children(&self) -> &[NodeId] {
        match &self.kind {
            NodeKind::Composite(children) => children,
            _ => &[],
        }
    }
}

/// A child to be attached to a composite
///
/// Plain strings are wrapped in a run using the inherit style.
#[derive(Clone, Debug)]
pub enum Child {
    Node(NodeId),
    Text(String),
}

impl From<NodeId> for Child {
    fn from(id: NodeId) -> Self {
        Child::Node(id)
    }
}

impl From<&str> for Child {
    fn from(text: &str) -> Self {
        Child::Text(text.to_string())
    }
}

impl From<String> for Child {
    fn from(text: String) -> Self {
        Child::Text(text)
    }
}

/// Replace tabs and line breaks with spaces and collapse repeated spaces
fn clean_text(text: &str) -> String {
    let mut s = String::with_capacity(text.len());
    for c in text.chars() {
        let c = match c {
            '\t' | '\r' | '\n' => ' ',
            c => c,
        };
        if c == ' ' && s.ends_with(' ') {
            continue;
        }
        s.push(c);
    }
    s
}

/// An arena of styled nodes
///
/// Nodes are never removed. Construction requires `&mut Document`; reading
/// (resolution, decomposition, measurement) only needs `&Document`, and
/// resolved attribute values are memoized.
#[derive(Debug, Default)]
pub struct Document {
    nodes: Vec<Node>,
    // Resolved values, with a flag marking values valid for descendants
    memo: Cache<(NodeId, Attribute), (Value, bool)>,
}

impl Index<NodeId> for Document {
    type Output = Node;

    #[inline]
    fn index(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }
}

impl Document {
    /// Construct an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Access a node, if `id` is valid
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    fn push(&mut self, style: Arc<Style>, kind: NodeKind) -> NodeId {
        let id = NodeId(to_u32(self.nodes.len()));
        self.nodes.push(Node {
            style,
            parent: None,
            offset: 0.0,
            kind,
        });
        id
    }

    /// Add a run
    ///
    /// Tabs and line breaks become spaces; repeated spaces are collapsed.
    pub fn run(&mut self, style: Arc<Style>, text: &str) -> NodeId {
        self.push(style, NodeKind::Run(clean_text(text)))
    }

    /// Add preformatted text
    ///
    /// Spaces become no-break spaces and each `\n` a [`Atom::NewLine`]; no
    /// other cleaning is done. Returns a composite of the pieces.
    pub fn literal(&mut self, style: Arc<Style>, text: &str) -> NodeId {
        let text = text.replace(' ', "\u{a0}");
        let composite = self.push(style, NodeKind::Composite(Vec::new()));
        for (i, line) in text.split('\n').enumerate() {
            if i > 0 {
                let id = self.atom(presets::inherit(), Atom::NewLine);
                self.attach(composite, id);
            }
            let id = self.push(presets::inherit(), NodeKind::Run(line.to_string()));
            self.attach(composite, id);
        }
        composite
    }

    /// Add an atom
    pub fn atom(&mut self, style: Arc<Style>, atom: Atom) -> NodeId {
        self.push(style, NodeKind::Atom(atom))
    }

    /// Add a composite with the given children
    pub fn composite<C: Into<Child>>(
        &mut self,
        style: Arc<Style>,
        children: impl IntoIterator<Item = C>,
    ) -> Result<NodeId, TreeError> {
        let id = self.push(style, NodeKind::Composite(Vec::new()));
        for child in children {
            self.append(id, child)?;
        }
        Ok(id)
    }

    /// Add an embedded object
    pub fn embed(&mut self, style: Arc<Style>, object: Arc<dyn Embeddable>) -> NodeId {
        self.push(style, NodeKind::Embedded(object))
    }

    /// Add a shape
    ///
    /// Lines need a style allowing stroke attributes; polygons also need
    /// `fill_color`.
    pub fn shape(&mut self, style: Arc<Style>, shape: Shape) -> Result<NodeId, TreeError> {
        let schema = style.schema();
        let (expected, ok) = match shape {
            Shape::Line { .. } => (
                "line",
                schema.allows(Attribute::StrokeWidth) && schema.allows(Attribute::StrokeColor),
            ),
            Shape::Polygon(_) => (
                "shape",
                schema.allows(Attribute::StrokeWidth)
                    && schema.allows(Attribute::StrokeColor)
                    && schema.allows(Attribute::FillColor),
            ),
        };
        if !ok {
            return Err(TreeError::WrongStyleClass {
                expected,
                found: schema.class(),
            });
        }
        Ok(self.push(style, NodeKind::Shape(shape)))
    }

    /// Set a node's own vertical offset (points)
    pub fn set_offset(&mut self, id: NodeId, offset: f32) {
        self.nodes[id.index()].offset = offset;
    }

    fn attach(&mut self, composite: NodeId, child: NodeId) {
        self.nodes[child.index()].parent = Some(composite);
        if let NodeKind::Composite(children) = &mut self.nodes[composite.index()].kind {
            children.push(child);
        }
    }

    /// Iterate over `id` and its ancestors
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(Some(id), move |id| self[*id].parent)
    }

    /// Append a child to a composite
    ///
    /// Returns the id of the attached child.
    pub fn append(
        &mut self,
        composite: NodeId,
        child: impl Into<Child>,
    ) -> Result<NodeId, TreeError> {
        if !matches!(self[composite].kind, NodeKind::Composite(_)) {
            return Err(TreeError::NotComposite(composite));
        }
        let child = match child.into() {
            Child::Text(text) => self.run(presets::inherit(), &text),
            Child::Node(id) => {
                let node = &self[id];
                if matches!(node.kind, NodeKind::Shape(_)) {
                    return Err(TreeError::NotInline(id));
                }
                if node.parent.is_some() {
                    return Err(TreeError::AlreadyAttached(id));
                }
                if self.ancestors(composite).any(|a| a == id) {
                    return Err(TreeError::Cycle(id));
                }
                id
            }
        };
        self.attach(composite, child);
        Ok(child)
    }

    /// True for a run without text or a composite without children
    pub fn is_empty(&self, id: NodeId) -> bool {
        match &self[id].kind {
            NodeKind::Run(text) => text.is_empty(),
            NodeKind::Composite(children) => children.is_empty(),
            _ => false,
        }
    }

    /// Concatenate two nodes
    ///
    /// An empty operand is dropped and the other returned; otherwise the
    /// result is a new composite (inheriting its style) of exactly `[a, b]`.
    pub fn concat(&mut self, a: NodeId, b: NodeId) -> Result<NodeId, TreeError> {
        if self.is_empty(b) {
            Ok(a)
        } else if self.is_empty(a) {
            Ok(b)
        } else {
            self.composite(presets::inherit(), [a, b])
        }
    }

    /// The plain text of a subtree
    pub fn text(&self, id: NodeId) -> String {
        let mut s = String::new();
        self.write_text(id, &mut s);
        s
    }

    fn write_text(&self, id: NodeId, s: &mut String) {
        match &self[id].kind {
            NodeKind::Run(text) => s.push_str(text),
            NodeKind::Composite(children) => {
                for child in children {
                    self.write_text(*child, s);
                }
            }
            NodeKind::Atom(atom) => s.push_str(atom.as_str()),
            NodeKind::Embedded(_) | NodeKind::Shape(_) => (),
        }
    }

    /// Resolve the paint of a shape node
    ///
    /// A stroke is only produced when the width is positive and a color is
    /// set. Lines are never filled. Other nodes have no paint.
    pub fn paint(&self, id: NodeId) -> Result<Paint, CascadeError> {
        let NodeKind::Shape(shape) = &self[id].kind else {
            return Ok(Paint::default());
        };

        let width = self.resolve_size(id, Attribute::StrokeWidth)?;
        let color = self.resolve_color(id, Attribute::StrokeColor)?;
        let stroke = match color {
            Some(color) if width > 0.0 => Some(Stroke { width, color }),
            _ => None,
        };
        let fill = match shape.is_closed() {
            true => self.resolve_color(id, Attribute::FillColor)?,
            false => None,
        };
        Ok(Paint { stroke, fill })
    }

    /// Points of a shape node, translated by `origin`
    pub fn shape_points(&self, id: NodeId, origin: Vec2) -> Vec<Vec2> {
        match &self[id].kind {
            NodeKind::Shape(Shape::Line { start, end }) => vec![*start + origin, *end + origin],
            NodeKind::Shape(Shape::Polygon(points)) => {
                points.iter().map(|p| *p + origin).collect()
            }
            _ => Vec::new(),
        }
    }
}
