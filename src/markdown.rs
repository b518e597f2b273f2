// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Building styled-text trees from Markdown

use crate::style::{presets, Attribute, Base, Style, StyleClass, StyleError, Value};
use crate::tree::{Atom, Child, Document, NodeId, TreeError};
use pulldown_cmark::{Event, HeadingLevel, Tag, TagEnd};
use std::sync::Arc;
use thiserror::Error;

/// Markdown parsing errors
#[derive(Error, Debug)]
pub enum Error {
    #[error("Not supported by Markdown parser: {0}")]
    NotSupported(&'static str),
    #[error(transparent)]
    Tree(#[from] TreeError),
    #[error(transparent)]
    Style(#[from] StyleError),
}

/// Basic Markdown tree builder
///
/// Supported:
///
/// -   Text paragraphs
/// -   Code (inline and blocks), set in a monospace typeface
/// -   Explicit line breaks
/// -   Headings
/// -   Lists (numerated and bulleted)
/// -   Bold, italic (emphasis)
///
/// Not supported:
///
/// -   Block quotes
/// -   Footnotes
/// -   HTML
/// -   Horizontal rules
/// -   Images
/// -   Links
/// -   Strike-through
/// -   Tables
/// -   Task lists
#[derive(Clone, Debug, PartialEq)]
pub struct Markdown {
    font_size: f32,
    monospace: String,
}

impl Default for Markdown {
    fn default() -> Self {
        Markdown {
            font_size: 10.0,
            monospace: "monospace".to_string(),
        }
    }
}

impl Markdown {
    /// Construct with a 10pt body size and the `monospace` typeface for code
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the body font size; headings are sized relative to this
    #[must_use]
    pub fn with_font_size(mut self, size: f32) -> Self {
        self.font_size = size;
        self
    }

    /// Set the typeface used for code
    #[must_use]
    pub fn with_monospace(mut self, typeface: impl Into<String>) -> Self {
        self.monospace = typeface.into();
        self
    }

    /// Parse `input`, adding its nodes to `doc`
    ///
    /// Returns a composite holding the whole input. Its style is based on the
    /// text defaults, so the result resolves without a parent.
    pub fn parse(&self, doc: &mut Document, input: &str) -> Result<NodeId, Error> {
        let root_style = Style::builder(StyleClass::Text)
            .base(Base::Defaults)
            .set(Attribute::FontSize, self.font_size)
            .build()?;
        let code_style = self.code_style()?;
        let root = doc.composite(root_style, Vec::<Child>::new())?;

        let mut state = State::None;
        let mut stack = Vec::with_capacity(16);
        let mut item = StackItem::new(root);

        for ev in pulldown_cmark::Parser::new(input) {
            match ev {
                Event::Start(tag) => {
                    if let Some((style, code)) = self.start_tag(doc, &mut item, &mut state, tag)? {
                        let node = doc.composite(style, Vec::<Child>::new())?;
                        doc.append(item.node, node)?;
                        stack.push(item);
                        item = StackItem::new(node);
                        if code {
                            item.code = Some(String::new());
                        }
                    }
                }
                Event::End(tag) => {
                    if let Some(code) = item.code.take() {
                        let code = code.strip_suffix('\n').unwrap_or(&code);
                        let literal = doc.literal(presets::inherit(), code);
                        doc.append(item.node, literal)?;
                    }
                    if state.end_tag(tag) {
                        if let Some(parent) = stack.pop() {
                            item = parent;
                        }
                    }
                }
                Event::Text(part) => {
                    if let Some(code) = item.code.as_mut() {
                        code.push_str(&part);
                    } else {
                        state.part(doc, item.node)?;
                        doc.append(item.node, &*part)?;
                    }
                }
                Event::Code(part) => {
                    state.part(doc, item.node)?;
                    let literal = doc.literal(code_style.clone(), &part);
                    doc.append(item.node, literal)?;
                }
                Event::InlineMath(_) | Event::DisplayMath(_) => {
                    return Err(Error::NotSupported("math expressions"))
                }
                Event::Html(_) | Event::InlineHtml(_) => {
                    return Err(Error::NotSupported("embedded HTML"))
                }
                Event::FootnoteReference(_) => return Err(Error::NotSupported("footnote")),
                Event::SoftBreak => {
                    doc.append(item.node, " ")?;
                }
                Event::HardBreak => {
                    let newline = doc.atom(presets::inherit(), Atom::NewLine);
                    doc.append(item.node, newline)?;
                }
                Event::Rule => return Err(Error::NotSupported("horizontal rule")),
                Event::TaskListMarker(_) => return Err(Error::NotSupported("task list")),
            }
        }

        Ok(root)
    }

    fn code_style(&self) -> Result<Arc<Style>, StyleError> {
        Style::builder(StyleClass::Text)
            .set(Attribute::Typeface, Value::Typeface(self.monospace.clone()))
            .build()
    }

    // Process a tag; may return the style of a new composite to descend into,
    // and whether that composite is a code block
    fn start_tag(
        &self,
        doc: &mut Document,
        item: &mut StackItem,
        state: &mut State,
        tag: Tag,
    ) -> Result<Option<(Arc<Style>, bool)>, Error> {
        Ok(match tag {
            Tag::Paragraph => {
                state.start_block(doc, item.node)?;
                None
            }
            Tag::Heading { level, .. } => {
                state.start_block(doc, item.node)?;
                // CSS sizes: https://www.w3.org/TR/2018/REC-css-fonts-3-20180920/#font-size-prop
                let rel_size = match level {
                    HeadingLevel::H1 => 2.0 / 1.0,
                    HeadingLevel::H2 => 3.0 / 2.0,
                    HeadingLevel::H3 => 6.0 / 5.0,
                    HeadingLevel::H4 => 1.0,
                    HeadingLevel::H5 => 8.0 / 9.0,
                    HeadingLevel::H6 => 3.0 / 5.0,
                };
                let style = Style::builder(StyleClass::Text)
                    .set(Attribute::FontSize, self.font_size * rel_size)
                    .build()?;
                Some((style, false))
            }
            Tag::CodeBlock(_) => {
                state.start_block(doc, item.node)?;
                Some((self.code_style()?, true))
            }
            Tag::HtmlBlock => return Err(Error::NotSupported("embedded HTML")),
            Tag::List(start) => {
                state.start_block(doc, item.node)?;
                item.list = start;
                None
            }
            Tag::Item => {
                state.list_item(doc, item.node)?;
                match &mut item.list {
                    Some(x) => {
                        doc.append(item.node, format!("{x}."))?;
                        *x += 1;
                    }
                    None => {
                        doc.append(item.node, "•")?;
                    }
                }
                let tab = doc.atom(presets::inherit(), Atom::Tab);
                doc.append(item.node, tab)?;
                None
            }
            Tag::Emphasis => Some((presets::emphasized(), false)),
            Tag::Strong => Some((presets::bold(), false)),
            Tag::Strikethrough => return Err(Error::NotSupported("strike-through")),
            Tag::BlockQuote(_) => return Err(Error::NotSupported("block quote")),
            Tag::FootnoteDefinition(_) => return Err(Error::NotSupported("footnote")),
            Tag::DefinitionList | Tag::DefinitionListTitle | Tag::DefinitionListDefinition => {
                return Err(Error::NotSupported("definition"))
            }
            Tag::Table(_) | Tag::TableHead | Tag::TableRow | Tag::TableCell => {
                return Err(Error::NotSupported("table"))
            }
            Tag::Link { .. } => return Err(Error::NotSupported("link")),
            Tag::Image { .. } => return Err(Error::NotSupported("image")),
            Tag::MetadataBlock(_) => return Err(Error::NotSupported("metadata block")),
        })
    }
}

#[derive(Debug)]
struct StackItem {
    node: NodeId,
    list: Option<u64>,
    // Code block text, collected until the block ends
    code: Option<String>,
}

impl StackItem {
    fn new(node: NodeId) -> Self {
        StackItem {
            node,
            list: None,
            code: None,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
enum State {
    None,
    BlockStart,
    BlockEnd,
    ListItem,
    Part,
}

impl State {
    fn new_lines(doc: &mut Document, node: NodeId, n: usize) -> Result<(), TreeError> {
        for _ in 0..n {
            let newline = doc.atom(presets::inherit(), Atom::NewLine);
            doc.append(node, newline)?;
        }
        Ok(())
    }

    fn start_block(&mut self, doc: &mut Document, node: NodeId) -> Result<(), TreeError> {
        match *self {
            State::None | State::BlockStart => (),
            State::BlockEnd | State::ListItem | State::Part => Self::new_lines(doc, node, 2)?,
        }
        *self = State::BlockStart;
        Ok(())
    }

    fn part(&mut self, doc: &mut Document, node: NodeId) -> Result<(), TreeError> {
        match *self {
            State::None | State::BlockStart | State::Part | State::ListItem => (),
            State::BlockEnd => Self::new_lines(doc, node, 2)?,
        }
        *self = State::Part;
        Ok(())
    }

    fn list_item(&mut self, doc: &mut Document, node: NodeId) -> Result<(), TreeError> {
        match *self {
            State::None | State::BlockStart | State::BlockEnd => (),
            State::ListItem | State::Part => Self::new_lines(doc, node, 1)?,
        }
        *self = State::ListItem;
        Ok(())
    }

    // Returns true if the stack must be popped
    fn end_tag(&mut self, tag: TagEnd) -> bool {
        match tag {
            TagEnd::Paragraph | TagEnd::List(_) => {
                *self = State::BlockEnd;
                false
            }
            TagEnd::Heading(_) | TagEnd::CodeBlock => {
                *self = State::BlockEnd;
                true
            }
            TagEnd::Emphasis | TagEnd::Strong => true,
            _ => false,
        }
    }
}
