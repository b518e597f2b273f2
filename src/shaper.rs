// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Glyph metrics
//!
//! This module maps the text of a run to a sequence of glyphs and their
//! advance widths:
//!
//! 1.  each character is mapped to a glyph (optionally a variant such as a
//!     small capital)
//! 2.  adjacent glyphs are greedily replaced by ligatures, left to right
//! 3.  each glyph's width is its advance plus the kerning adjustment with the
//!     following glyph, scaled from font units to points
//!
//! This module *does not* perform line-breaking or positioning.

use crate::conv::PPU;
use crate::fonts::{FontMetrics, Glyph, NoFontMatch};
use crate::tree::{
    Atom, CascadeError, Document, Fragment, FragmentKind, NodeId, NodeKind, RunFlags, Span,
    SpanKind,
};
use crate::{Environment, GlyphVariant};
use smallvec::SmallVec;
use std::iter::FusedIterator;
use std::sync::Arc;
use thiserror::Error;

/// Measurement errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MetricsError {
    #[error("cannot measure an empty glyph run")]
    EmptyGlyphRun,
    #[error("node {0:?} has no horizontal extent")]
    NotMeasurable(NodeId),
    #[error(transparent)]
    Cascade(#[from] CascadeError),
    #[error(transparent)]
    NoFontMatch(#[from] NoFontMatch),
}

/// Greedy ligature substitution over a glyph sequence
///
/// Each glyph is combined with its successor while the font provides a
/// ligature for the pair; there is no backtracking. When disabled, glyphs
/// pass through unchanged.
#[derive(Clone, Debug)]
pub struct Ligatures<'a, I> {
    font: &'a dyn FontMetrics,
    iter: I,
    enabled: bool,
    pending: Option<Glyph>,
}

impl<'a, I: Iterator<Item = Glyph>> Ligatures<'a, I> {
    pub fn new(font: &'a dyn FontMetrics, iter: I, enabled: bool) -> Self {
        Ligatures {
            font,
            iter,
            enabled,
            pending: None,
        }
    }
}

impl<'a, I: Iterator<Item = Glyph>> Iterator for Ligatures<'a, I> {
    type Item = Glyph;

    fn next(&mut self) -> Option<Glyph> {
        let mut prev = self.pending.take().or_else(|| self.iter.next())?;
        if !self.enabled {
            return Some(prev);
        }
        for glyph in self.iter.by_ref() {
            match self.font.ligature(prev, glyph) {
                Some(ligature) => prev = ligature,
                None => {
                    self.pending = Some(glyph);
                    break;
                }
            }
        }
        Some(prev)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let pending = usize::from(self.pending.is_some());
        let (lower, upper) = self.iter.size_hint();
        let upper = upper.and_then(|n| n.checked_add(pending));
        match self.enabled {
            true => (usize::from(pending + lower > 0), upper),
            false => (lower + pending, upper),
        }
    }
}

impl<'a, I: FusedIterator<Item = Glyph>> FusedIterator for Ligatures<'a, I> {}

/// Map `text` to glyphs, substituting ligatures if `ligatures` is true
pub fn glyphs<'a>(
    font: &'a dyn FontMetrics,
    text: &'a str,
    variant: Option<GlyphVariant>,
    ligatures: bool,
) -> Ligatures<'a, impl Iterator<Item = Glyph> + 'a> {
    let iter = text.chars().map(move |c| font.glyph(c, variant));
    Ligatures::new(font, iter, ligatures)
}

/// Compute scaled advance widths
///
/// With `kerning`, each glyph's width includes the kerning adjustment with
/// the glyph following it.
pub fn widths(
    font: &dyn FontMetrics,
    glyphs: &[Glyph],
    kerning: bool,
    scale: PPU,
) -> SmallVec<[f32; 16]> {
    let mut widths = SmallVec::with_capacity(glyphs.len());
    let Some((first, rest)) = glyphs.split_first() else {
        return widths;
    };

    let mut prev = *first;
    let mut prev_width = prev.width;
    for glyph in rest {
        if kerning {
            prev_width += font.kerning(prev, *glyph);
        }
        widths.push(scale.units_to_pt(prev_width));
        prev_width = glyph.width;
        prev = *glyph;
    }
    widths.push(scale.units_to_pt(prev_width));
    widths
}

/// Measured glyphs of a run or fragment
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RunMetrics {
    /// Glyphs after ligature substitution (empty for atoms and embedded objects)
    pub glyphs: SmallVec<[Glyph; 16]>,
    /// Advance widths, in points
    pub widths: SmallVec<[f32; 16]>,
    /// Height, in points
    pub height: f32,
}

impl RunMetrics {
    fn fixed(width: f32, height: f32) -> Self {
        RunMetrics {
            glyphs: SmallVec::new(),
            widths: SmallVec::from_slice(&[width]),
            height,
        }
    }

    /// Total advance width, in points
    pub fn width(&self) -> f32 {
        self.widths.iter().sum()
    }
}

/// Measure `text` set in `font` at the given `height` (points)
///
/// Only [`RunFlags::KERNING`] and [`RunFlags::LIGATURES`] of `flags` are used.
pub fn measure_text(
    font: &dyn FontMetrics,
    text: &str,
    variant: Option<GlyphVariant>,
    flags: RunFlags,
    height: f32,
) -> Result<RunMetrics, MetricsError> {
    if text.is_empty() {
        return Err(MetricsError::EmptyGlyphRun);
    }

    let glyphs: SmallVec<[Glyph; 16]> =
        glyphs(font, text, variant, flags.contains(RunFlags::LIGATURES)).collect();
    let scale = PPU::new(height, font.scaling_factor());
    let widths = widths(font, &glyphs, flags.contains(RunFlags::KERNING), scale);
    Ok(RunMetrics {
        glyphs,
        widths,
        height,
    })
}

impl Document {
    /// The font selected for a node
    pub fn font(
        &self,
        env: &Environment,
        id: NodeId,
    ) -> Result<Arc<dyn FontMetrics>, MetricsError> {
        let query = self.font_query(id)?;
        Ok(env.fonts().font(&query)?)
    }

    fn measure_str(
        &self,
        env: &Environment,
        id: NodeId,
        text: &str,
        variant: Option<GlyphVariant>,
    ) -> Result<RunMetrics, MetricsError> {
        if text.is_empty() {
            return Err(MetricsError::EmptyGlyphRun);
        }
        let font = self.font(env, id)?;
        let flags = self.run_flags(id)?;
        let height = self.height(id)?;
        measure_text(font.as_ref(), text, variant, flags, height)
    }

    /// Measure a leaf node
    ///
    /// Runs are measured in the font and options resolved for the node.
    /// Spacers, boxes and embedded objects report their fixed width; a new
    /// line has no width; spaces and tabs are measured as a space character.
    pub fn measure(
        &self,
        env: &Environment,
        id: NodeId,
        variant: Option<GlyphVariant>,
    ) -> Result<RunMetrics, MetricsError> {
        match self[id].kind() {
            NodeKind::Run(text) => self.measure_str(env, id, text, variant),
            NodeKind::Atom(atom) => match *atom {
                Atom::Spacer(width) => Ok(RunMetrics::fixed(width, self.height(id)?)),
                Atom::Box { width, height, .. } => Ok(RunMetrics::fixed(width, height)),
                Atom::NewLine => Ok(RunMetrics {
                    height: self.height(id)?,
                    ..Default::default()
                }),
                Atom::Space { .. } | Atom::Tab => self.measure_str(env, id, " ", variant),
                Atom::NoBreakSpace => self.measure_str(env, id, "\u{a0}", variant),
            },
            NodeKind::Embedded(object) => Ok(RunMetrics::fixed(object.width(), object.height())),
            NodeKind::Composite(_) | NodeKind::Shape(_) => Err(MetricsError::NotMeasurable(id)),
        }
    }

    /// Measure a span yielded by [`Document::spans`]
    pub fn measure_span(
        &self,
        env: &Environment,
        span: &Span,
    ) -> Result<RunMetrics, MetricsError> {
        let variant = match span.kind {
            SpanKind::Text(variant) => variant,
            SpanKind::Control(_) | SpanKind::Embedded => None,
        };
        self.measure(env, span.node, variant)
    }

    /// Measure a fragment yielded by [`Document::split`]
    pub fn measure_fragment(
        &self,
        env: &Environment,
        fragment: &Fragment<'_>,
        variant: Option<GlyphVariant>,
    ) -> Result<RunMetrics, MetricsError> {
        match fragment.kind {
            FragmentKind::Atom(_) => self.measure(env, fragment.source, variant),
            FragmentKind::Word | FragmentKind::Space | FragmentKind::NoBreakSpace => {
                self.measure_str(env, fragment.source, fragment.text, variant)
            }
        }
    }
}
