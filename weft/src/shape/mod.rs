// Copyright 2025 the Weft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The boundary between layout and font shaping.
//!
//! Layout splits text into runs of uniform [`FontAttr`] and asks a [`Shaper`] to turn each run
//! into clusters with advances and vertical metrics. Everything after that works on the
//! shaped clusters alone.

mod fixed;
mod shaped;

use core::ops::Range;
use std::sync::Arc;

use smallvec::SmallVec;

use crate::style::FontAttr;

pub use fixed::FixedPitchShaper;
pub(crate) use shaped::{shape_text, ShapedText};

/// Turns a run of text in a single font into positioned clusters.
pub trait Shaper {
    /// Shape `text` with `font`.
    ///
    /// Cluster ranges in the returned run are relative to `text`, must be non-empty, and must
    /// cover `text` in order.
    fn shape(&mut self, text: &str, font: &FontAttr) -> Result<ShapedRun, ShapeError>;
}

impl<S: Shaper + ?Sized> Shaper for &mut S {
    fn shape(&mut self, text: &str, font: &FontAttr) -> Result<ShapedRun, ShapeError> {
        (**self).shape(text, font)
    }
}

/// Shaping failed for a run.
///
/// Layout recovers from a failure by substituting zero-width clusters for the run.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ShapeError {
    /// No font matched the requested family.
    #[error("font family `{0}` is not available")]
    FontUnavailable(Arc<str>),
    /// Any other shaper failure.
    #[error("shaping failed: {0}")]
    Other(String),
}

/// A single glyph within a cluster.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Glyph {
    /// Glyph identifier in the shaper's font.
    pub id: u32,
    /// Offset from the cluster origin along the baseline.
    pub x: f32,
    /// Offset from the baseline, positive downward.
    pub y: f32,
    /// Advance of the glyph.
    pub advance: f32,
}

/// An indivisible group of glyphs covering a range of text.
#[derive(Clone, Debug, PartialEq)]
pub struct ShapedCluster {
    /// Range of the cluster in the shaped text.
    pub text_range: Range<usize>,
    /// Total advance of the cluster.
    pub advance: f32,
    /// Glyphs of the cluster. May be empty for invisible characters.
    pub glyphs: SmallVec<[Glyph; 1]>,
}

/// Vertical metrics of a run, in logical pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RunMetrics {
    /// Distance from the baseline to the top of the tallest glyph.
    pub ascent: f32,
    /// Distance from the baseline to the bottom of the lowest glyph.
    pub descent: f32,
    /// Recommended additional spacing between lines.
    pub leading: f32,
    /// Distance from the baseline to the top of the underline, positive downward.
    pub underline_offset: f32,
    /// Thickness of the underline.
    pub underline_size: f32,
}

impl RunMetrics {
    /// Metrics proportional to `font_size`, used when a run could not be shaped.
    pub fn fallback(font_size: f32) -> Self {
        Self {
            ascent: font_size * 0.8,
            descent: font_size * 0.2,
            leading: 0.0,
            underline_offset: font_size * 0.1,
            underline_size: (font_size / 16.0).max(1.0),
        }
    }
}

/// The output of a [`Shaper`] for one run.
#[derive(Clone, Debug, PartialEq)]
pub struct ShapedRun {
    /// Clusters in logical order.
    pub clusters: Vec<ShapedCluster>,
    /// Vertical metrics of the font used.
    pub metrics: RunMetrics,
}
