// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Hyphenation
//!
//! Break positions come from a [`Hyphenator`], obtained per language from the
//! [`DictionaryProvider`] of the [`Environment`]. [`Document::hyphenate`]
//! turns these into verified [`Candidate`]s for a line breaker.
//!
//! The dictionary file format is not interpreted here: [`DictionarySearch`]
//! locates `hyph_<lang>.dic` files and hands them to a [`DictionaryLoader`].

use crate::conv::to_usize;
use crate::style::Attribute;
use crate::tree::{CascadeError, Document, NodeId};
use crate::util::Cache;
use crate::Environment;
use std::collections::HashMap;
use std::fmt;
use std::io;
use std::iter::FusedIterator;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

/// Hyphenation errors
#[derive(Error, Debug, Clone)]
pub enum HyphenationError {
    #[error("hyphenation dictionary '{file}' not found (searched {searched:?})")]
    DictionaryNotFound { file: String, searched: Vec<PathBuf> },
    #[error("hyphenating '{word}' at {offset} does not reproduce the word")]
    RoundTripMismatch { word: String, offset: usize },
    #[error("failed to load hyphenation dictionary {path:?}")]
    Load {
        path: PathBuf,
        #[source]
        source: Arc<io::Error>,
    },
    #[error(transparent)]
    Cascade(#[from] CascadeError),
}

/// The file name of the dictionary for `lang`
pub fn dictionary_file(lang: &str) -> String {
    format!("hyph_{lang}.dic")
}

/// Split `word` before the char at `offset`
fn split_at_char(word: &str, offset: usize) -> Option<(&str, &str)> {
    let index = match word.char_indices().nth(offset) {
        Some((index, _)) => index,
        None if word.chars().count() == offset => word.len(),
        None => return None,
    };
    Some(word.split_at(index))
}

/// A source of hyphenation points for one language
pub trait Hyphenator: fmt::Debug + Send + Sync {
    /// Break positions within `word`, as char offsets in ascending order
    fn positions(&self, word: &str) -> Vec<usize>;

    /// Split `word` at the break at char `offset`
    ///
    /// Returns the prefix, ending with a hyphen, and the suffix. The default
    /// implementation inserts `-` before the char at `offset`.
    fn wrap(&self, word: &str, offset: usize) -> Option<(String, String)> {
        let (head, tail) = split_at_char(word, offset)?;
        Some((format!("{head}-"), tail.to_string()))
    }
}

/// Loads a [`Hyphenator`] from a dictionary file
///
/// Implemented for closures `Fn(&Path, u32) -> io::Result<Arc<dyn Hyphenator>>`
/// taking the path and the minimum number of characters to keep on each side
/// of a break.
pub trait DictionaryLoader: Send + Sync {
    fn load(&self, path: &Path, min_chars: u32) -> io::Result<Arc<dyn Hyphenator>>;
}

impl<F> DictionaryLoader for F
where
    F: Fn(&Path, u32) -> io::Result<Arc<dyn Hyphenator>> + Send + Sync,
{
    fn load(&self, path: &Path, min_chars: u32) -> io::Result<Arc<dyn Hyphenator>> {
        self(path, min_chars)
    }
}

/// Provides hyphenators by language
pub trait DictionaryProvider: fmt::Debug + Send + Sync {
    /// Get the hyphenator for `lang` keeping `min_chars` on each side of a break
    fn hyphenator(&self, lang: &str, min_chars: u32)
        -> Result<Arc<dyn Hyphenator>, HyphenationError>;
}

/// A provider without dictionaries
#[derive(Clone, Copy, Debug, Default)]
pub struct NoDictionaries;

impl DictionaryProvider for NoDictionaries {
    fn hyphenator(&self, lang: &str, _: u32) -> Result<Arc<dyn Hyphenator>, HyphenationError> {
        Err(HyphenationError::DictionaryNotFound {
            file: dictionary_file(lang),
            searched: Vec::new(),
        })
    }
}

/// Finds dictionaries in a list of directories
///
/// The first directory containing `hyph_<lang>.dic` is used. Loaded
/// hyphenators are cached per language and minimum character count.
pub struct DictionarySearch {
    dirs: Vec<PathBuf>,
    loader: Box<dyn DictionaryLoader>,
    cache: Cache<(String, u32), Arc<dyn Hyphenator>>,
}

impl fmt::Debug for DictionarySearch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DictionarySearch")
            .field("dirs", &self.dirs)
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}

impl DictionarySearch {
    /// Construct with no directories
    pub fn new(loader: impl DictionaryLoader + 'static) -> Self {
        DictionarySearch {
            dirs: Vec::new(),
            loader: Box::new(loader),
            cache: Cache::default(),
        }
    }

    /// Append a directory to search
    #[must_use]
    pub fn with_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dirs.push(dir.into());
        self
    }

    /// Append the working directory
    #[must_use]
    pub fn with_current_dir(self) -> Self {
        self.with_dir(".")
    }

    /// The directories searched, in order
    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }

    /// Find the dictionary file for `lang`
    pub fn locate(&self, lang: &str) -> Result<PathBuf, HyphenationError> {
        let file = dictionary_file(lang);
        let mut searched = Vec::with_capacity(self.dirs.len());
        for dir in &self.dirs {
            let path = dir.join(&file);
            if path.is_file() {
                log::debug!("DictionarySearch::locate: found {path:?}");
                return Ok(path);
            }
            searched.push(path);
        }
        Err(HyphenationError::DictionaryNotFound { file, searched })
    }
}

impl DictionaryProvider for DictionarySearch {
    fn hyphenator(
        &self,
        lang: &str,
        min_chars: u32,
    ) -> Result<Arc<dyn Hyphenator>, HyphenationError> {
        self.cache
            .get_or_try_insert((lang.to_string(), min_chars), || {
                let path = self.locate(lang)?;
                match self.loader.load(&path, min_chars) {
                    Ok(hyphenator) => Ok(hyphenator),
                    Err(err) => Err(HyphenationError::Load {
                        path,
                        source: Arc::new(err),
                    }),
                }
            })
    }
}

/// A hyphenator over a fixed list of hyphenated words
///
/// Words are given with hyphens at the allowed breaks, e.g. `hy-phen-ation`.
/// Lookup ignores case. Breaks leaving fewer than `min_chars` characters on
/// either side are dropped.
#[derive(Clone, Debug, Default)]
pub struct ExceptionList {
    min_chars: usize,
    words: HashMap<String, Vec<usize>>,
}

impl ExceptionList {
    /// Construct an empty list
    pub fn new(min_chars: u32) -> Self {
        ExceptionList {
            min_chars: to_usize(min_chars),
            words: HashMap::new(),
        }
    }

    /// Add a hyphenated word
    #[must_use]
    pub fn with_word(mut self, hyphenated: &str) -> Self {
        self.add(hyphenated);
        self
    }

    fn add(&mut self, hyphenated: &str) {
        let mut word = String::with_capacity(hyphenated.len());
        let mut positions = Vec::new();
        let mut len = 0;
        for c in hyphenated.chars() {
            if c == '-' {
                if len > 0 {
                    positions.push(len);
                }
            } else {
                let lower = c.to_lowercase();
                len += lower.len();
                word.extend(lower);
            }
        }
        positions.dedup();
        positions.retain(|pos| *pos < len);
        self.words.insert(word, positions);
    }

    /// Parse a list of hyphenated words, one per line
    ///
    /// Blank lines and lines starting with `%` or `#` are ignored.
    pub fn parse(text: &str, min_chars: u32) -> Self {
        let mut list = ExceptionList::new(min_chars);
        for line in text.lines().map(str::trim) {
            if line.is_empty() || line.starts_with(['%', '#']) {
                continue;
            }
            list.add(line);
        }
        list
    }

    /// A [`DictionaryLoader`] reading a word list with [`Self::parse`]
    pub fn load(path: &Path, min_chars: u32) -> io::Result<Arc<dyn Hyphenator>> {
        let text = std::fs::read_to_string(path)?;
        let list = ExceptionList::parse(&text, min_chars);
        log::debug!("ExceptionList::load: {} words from {path:?}", list.words.len());
        Ok(Arc::new(list))
    }
}

impl Hyphenator for ExceptionList {
    fn positions(&self, word: &str) -> Vec<usize> {
        // Stored offsets count chars of the lower-cased word; `starts[i]` is
        // the lower-cased offset of char `i` of `word`.
        let mut key = String::with_capacity(word.len());
        let mut starts = Vec::with_capacity(word.len());
        let mut key_len = 0;
        for c in word.chars() {
            starts.push(key_len);
            let lower = c.to_lowercase();
            key_len += lower.len();
            key.extend(lower);
        }
        let Some(positions) = self.words.get(&key) else {
            return Vec::new();
        };
        let len = starts.len();
        positions
            .iter()
            .filter_map(|pos| starts.binary_search(pos).ok())
            .filter(|pos| *pos >= self.min_chars && len.saturating_sub(*pos) >= self.min_chars)
            .collect()
    }
}

/// A hyphenation break candidate
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Candidate {
    /// Char offset of the break within the word
    pub offset: usize,
    /// Text before the break, with a trailing hyphen
    pub prefix: String,
    /// Text after the break
    pub suffix: String,
    /// The node whose style applies to both parts
    pub source: NodeId,
}

/// Iterator over hyphenation candidates, last break first
///
/// Constructed by [`Document::hyphenate`]. After yielding an error the
/// iterator is exhausted.
#[derive(Clone, Debug)]
pub struct Hyphenate<'a> {
    hyphenator: Option<Arc<dyn Hyphenator>>,
    word: &'a str,
    source: NodeId,
    // Ascending; consumed from the back
    positions: Vec<usize>,
}

impl<'a> Hyphenate<'a> {
    fn empty(word: &'a str, source: NodeId) -> Self {
        Hyphenate {
            hyphenator: None,
            word,
            source,
            positions: Vec::new(),
        }
    }
}

impl<'a> Iterator for Hyphenate<'a> {
    type Item = Result<Candidate, HyphenationError>;

    fn next(&mut self) -> Option<Self::Item> {
        let hyphenator = self.hyphenator.as_ref()?;
        let offset = self.positions.pop()?;
        let word = self.word;

        let parts = hyphenator.wrap(word, offset).filter(|(prefix, suffix)| {
            prefix.strip_suffix('-').is_some_and(|head| {
                head.chars().count() == offset
                    && head.len() + suffix.len() == word.len()
                    && word.starts_with(head)
                    && word.ends_with(suffix.as_str())
            })
        });
        match parts {
            Some((prefix, suffix)) => Some(Ok(Candidate {
                offset,
                prefix,
                suffix,
                source: self.source,
            })),
            None => {
                self.positions.clear();
                self.hyphenator = None;
                Some(Err(HyphenationError::RoundTripMismatch {
                    word: word.to_string(),
                    offset,
                }))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.hyphenator {
            Some(_) => (0, Some(self.positions.len())),
            None => (0, Some(0)),
        }
    }
}

impl<'a> FusedIterator for Hyphenate<'a> {}

impl Document {
    /// Hyphenation candidates for `word`, set in the style of `source`
    ///
    /// When `hyphenate` resolves to false nothing is yielded and no
    /// dictionary is consulted. Otherwise the hyphenator for the resolved
    /// `hyphen_lang` and `hyphen_chars` is used and candidates are yielded
    /// in strictly descending offset order. Offsets leaving fewer than
    /// `hyphen_chars` characters (and at least one) on either side are
    /// dropped, whatever the hyphenator reports.
    pub fn hyphenate<'a>(
        &self,
        env: &Environment,
        source: NodeId,
        word: &'a str,
    ) -> Result<Hyphenate<'a>, HyphenationError> {
        if !self.resolve_flag(source, Attribute::Hyphenate)? {
            return Ok(Hyphenate::empty(word, source));
        }
        let lang = self.resolve_str(source, Attribute::HyphenLang)?;
        let min_chars = self.resolve_count(source, Attribute::HyphenChars)?;
        let hyphenator = env.dictionaries().hyphenator(&lang, min_chars)?;
        let min_chars = to_usize(min_chars).max(1);
        let len = word.chars().count();
        let mut positions = hyphenator.positions(word);
        positions.retain(|pos| *pos >= min_chars && len.saturating_sub(*pos) >= min_chars);
        positions.sort_unstable();
        positions.dedup();
        Ok(Hyphenate {
            hyphenator: Some(hyphenator),
            word,
            source,
            positions,
        })
    }
}
