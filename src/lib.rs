// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Typesetting text library
//!
//! This crate provides the core data model of a document typesetter:
//!
//! -   [`style`]: attribute schemas, styles and the style cascade
//! -   [`tree`]: the styled-text [`Document`] arena, decomposition into
//!     fragments ([`Document::split`]) and renderable spans
//!     ([`Document::spans`])
//! -   [`shaper`]: glyph metrics with ligatures and kerning
//! -   [`hyphen`]: hyphenation candidates using external dictionaries
//! -   [`draw`]: colors, shapes and their paint
//!
//! Fonts and dictionaries are supplied through an [`Environment`].
//!
//! ```
//! use typeset_text::style::{presets, Attribute, Base, Style, StyleClass};
//! use typeset_text::tree::{Child, Document};
//!
//! let root = Style::builder(StyleClass::Text)
//!     .base(Base::Defaults)
//!     .set(Attribute::FontSize, 12.0f32)
//!     .build()
//!     .unwrap();
//! let mut doc = Document::new();
//! let bold = doc.composite(presets::bold(), ["World"]).unwrap();
//! let para = doc
//!     .composite(root, [Child::from("Hello "), bold.into()])
//!     .unwrap();
//! assert_eq!(doc.text(para), "Hello World");
//! assert_eq!(doc.font_size(bold).unwrap(), 12.0);
//! ```

#![cfg_attr(doc_cfg, feature(doc_cfg))]

mod env;
pub use env::Environment;

mod data;
pub use data::*;

pub mod conv;
pub mod draw;
pub mod fonts;
pub mod hyphen;
#[cfg(feature = "markdown")]
#[cfg_attr(doc_cfg, doc(cfg(feature = "markdown")))]
pub mod markdown;
pub mod shaper;
pub mod style;
pub mod tree;

pub(crate) mod util;

#[cfg(test)]
mod testing;

pub use draw::Color;
pub use style::{Attribute, Style, Value};
pub use tree::{Document, NodeId};
