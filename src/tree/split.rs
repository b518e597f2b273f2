// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Splitting runs into words and spaces

use super::{Atom, Document, NodeId, NodeKind, TreeError};
use std::iter::FusedIterator;

const NBSP: char = '\u{a0}';

/// Kind of a [`Fragment`]
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FragmentKind {
    /// A maximal sequence of characters other than spaces
    Word,
    /// A single space
    Space,
    /// A single no-break space
    NoBreakSpace,
    /// An atom, yielded as a whole
    Atom(Atom),
}

/// A piece of a run or atom
///
/// The fragment shares the style of its `source` node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fragment<'a> {
    pub source: NodeId,
    pub kind: FragmentKind,
    pub text: &'a str,
}

impl<'a> Fragment<'a> {
    /// True for breakable or non-breakable spaces
    pub fn is_space(&self) -> bool {
        matches!(
            self.kind,
            FragmentKind::Space
                | FragmentKind::NoBreakSpace
                | FragmentKind::Atom(Atom::Space { .. } | Atom::NoBreakSpace)
        )
    }
}

#[derive(Clone, Debug)]
enum State<'a> {
    Run(&'a str),
    Atom(Atom),
    Done,
}

/// Iterator over the [`Fragment`]s of a node
///
/// Constructed by [`Document::split`].
#[derive(Clone, Debug)]
pub struct Split<'a> {
    source: NodeId,
    state: State<'a>,
}

impl<'a> Iterator for Split<'a> {
    type Item = Fragment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let (kind, text) = match self.state {
            State::Run(rest) => {
                let c = rest.chars().next()?;
                let (kind, len) = match c {
                    ' ' => (FragmentKind::Space, 1),
                    NBSP => (FragmentKind::NoBreakSpace, NBSP.len_utf8()),
                    _ => (
                        FragmentKind::Word,
                        rest.find([' ', NBSP]).unwrap_or(rest.len()),
                    ),
                };
                let (text, rest) = rest.split_at(len);
                self.state = State::Run(rest);
                (kind, text)
            }
            State::Atom(atom) => {
                self.state = State::Done;
                (FragmentKind::Atom(atom), atom.as_str())
            }
            State::Done => return None,
        };
        Some(Fragment {
            source: self.source,
            kind,
            text,
        })
    }
}

impl<'a> FusedIterator for Split<'a> {}

impl Document {
    /// Split a run into words and spaces
    ///
    /// Each space and each no-break space is its own fragment; maximal
    /// sequences of other characters form words. An atom splits into itself.
    /// Other nodes cannot be split.
    pub fn split(&self, id: NodeId) -> Result<Split<'_>, TreeError> {
        let state = match &self[id].kind {
            NodeKind::Run(text) => State::Run(text),
            NodeKind::Atom(atom) => State::Atom(*atom),
            _ => return Err(TreeError::NotSplittable(id)),
        };
        Ok(Split { source: id, state })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::style::presets;

    fn kinds(doc: &Document, id: NodeId) -> Vec<(FragmentKind, &str)> {
        doc.split(id).unwrap().map(|f| (f.kind, f.text)).collect()
    }

    #[test]
    fn words_and_spaces() {
        let mut doc = Document::new();
        let id = doc.run(presets::inherit(), "one two\u{a0}three ");
        assert_eq!(
            kinds(&doc, id),
            vec![
                (FragmentKind::Word, "one"),
                (FragmentKind::Space, " "),
                (FragmentKind::Word, "two"),
                (FragmentKind::NoBreakSpace, "\u{a0}"),
                (FragmentKind::Word, "three"),
                (FragmentKind::Space, " "),
            ]
        );
        let text: String = doc.split(id).unwrap().map(|f| f.text).collect();
        assert_eq!(text, "one two\u{a0}three ");
        assert!(doc.split(id).unwrap().all(|f| f.source == id));
    }

    #[test]
    fn empty_and_atoms() {
        let mut doc = Document::new();
        let empty = doc.run(presets::inherit(), "");
        assert_eq!(doc.split(empty).unwrap().next(), None);

        let tab = doc.atom(presets::inherit(), Atom::Tab);
        let mut split = doc.split(tab).unwrap();
        assert_eq!(split.next().map(|f| f.kind), Some(FragmentKind::Atom(Atom::Tab)));
        assert_eq!(split.next(), None);
        assert_eq!(split.next(), None);

        let composite = doc.composite(presets::inherit(), ["a"]).unwrap();
        assert_eq!(
            doc.split(composite).unwrap_err(),
            TreeError::NotSplittable(composite)
        );
    }
}
