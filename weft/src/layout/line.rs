// Copyright 2025 the Weft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::ops::Range;

use peniko::kurbo::Rect;
use smallvec::SmallVec;

use crate::exclusion::Segment;
use crate::shape::{Glyph, RunMetrics, ShapedText};
use crate::style::Brush;

/// Reason that a line was broken.
#[derive(Copy, Clone, Default, PartialEq, Eq, Debug)]
pub enum BreakReason {
    /// The text ended on this line.
    #[default]
    None,
    /// The line ended at a break opportunity.
    Regular,
    /// The line ended at a newline.
    Explicit,
    /// The line ended in the middle of a word that did not fit on a line of its own.
    Emergency,
}

/// Whether a run shows source text or truncation token text.
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash, Debug)]
pub enum RunKind {
    /// Clusters map to ranges of the laid out text.
    #[default]
    Text,
    /// Clusters map to ranges of the composed truncation token.
    TruncationToken,
}

/// Metrics information for a line.
#[derive(Copy, Clone, Default, PartialEq, Debug)]
pub struct LineMetrics {
    /// Typographic ascent.
    pub ascent: f32,
    /// Typographic descent.
    pub descent: f32,
    /// Typographic leading, split evenly above and below the glyphs.
    pub leading: f32,
    /// The absolute line height.
    pub line_height: f32,
    /// Vertical position of the baseline.
    pub baseline: f64,
    /// Horizontal position of the first placed cluster.
    pub offset: f64,
    /// Distance from `offset` to the end of the last placed cluster, including trailing
    /// whitespace.
    pub advance: f64,
    /// Advance of trailing whitespace.
    pub trailing_whitespace: f64,
    /// Top of the line.
    pub min_coord: f64,
    /// Bottom of the line.
    pub max_coord: f64,
}

/// A cluster placed on a line.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedCluster {
    /// Range of the cluster, see [`RunKind`] for what it indexes.
    pub text_range: Range<usize>,
    /// Horizontal position of the cluster origin.
    pub x: f64,
    /// Advance of the cluster.
    pub advance: f32,
    /// Glyphs, positioned relative to the cluster origin and the baseline.
    pub glyphs: SmallVec<[Glyph; 1]>,
    /// Whether the cluster is whitespace.
    pub whitespace: bool,
    pub(crate) index: usize,
}

impl PlacedCluster {
    /// Right edge of the cluster.
    pub fn x1(&self) -> f64 {
        self.x + f64::from(self.advance)
    }
}

/// A sequence of contiguous clusters sharing a style.
#[derive(Clone, Debug, PartialEq)]
pub struct GlyphRun {
    pub(crate) kind: RunKind,
    pub(crate) style_index: usize,
    pub(crate) metrics: RunMetrics,
    pub(crate) line_height: f32,
    pub(crate) clusters: Vec<PlacedCluster>,
    source_run: usize,
}

impl GlyphRun {
    /// Whether the run shows source text or token text.
    pub fn kind(&self) -> RunKind {
        self.kind
    }

    /// Index of the run's style in [`LayoutResult::styles`](super::LayoutResult::styles).
    pub fn style_index(&self) -> usize {
        self.style_index
    }

    /// Vertical metrics of the run's font.
    pub fn metrics(&self) -> &RunMetrics {
        &self.metrics
    }

    /// The clusters of the run, left to right.
    pub fn clusters(&self) -> &[PlacedCluster] {
        &self.clusters
    }

    /// Range covered by the run's clusters.
    pub fn text_range(&self) -> Range<usize> {
        match (self.clusters.first(), self.clusters.last()) {
            (Some(first), Some(last)) => first.text_range.start..last.text_range.end,
            _ => 0..0,
        }
    }

    /// Left edge of the run.
    pub fn x0(&self) -> f64 {
        self.clusters.first().map_or(0.0, |cluster| cluster.x)
    }

    /// Right edge of the run.
    pub fn x1(&self) -> f64 {
        self.clusters.last().map_or(0.0, PlacedCluster::x1)
    }
}

/// A single laid out line.
#[derive(Clone, Debug, PartialEq)]
pub struct LineBox {
    pub(crate) text_range: Range<usize>,
    pub(crate) cluster_range: Range<usize>,
    pub(crate) metrics: LineMetrics,
    pub(crate) segments: SmallVec<[Segment; 1]>,
    pub(crate) runs: Vec<GlyphRun>,
    pub(crate) break_reason: BreakReason,
}

impl LineBox {
    /// Returns the range of source text the line consumed.
    ///
    /// For a truncated line this covers the source clusters still shown.
    pub fn text_range(&self) -> Range<usize> {
        self.text_range.clone()
    }

    /// Returns the metrics for the line.
    pub fn metrics(&self) -> &LineMetrics {
        &self.metrics
    }

    /// The horizontal spans available to the line after exclusions.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// The runs of the line, left to right.
    pub fn runs(&self) -> &[GlyphRun] {
        &self.runs
    }

    /// Returns why the line ended.
    pub fn break_reason(&self) -> BreakReason {
        self.break_reason
    }

    /// Returns `true` if the line shows a truncation token.
    pub fn has_truncation_token(&self) -> bool {
        self.runs
            .iter()
            .any(|run| run.kind == RunKind::TruncationToken)
    }

    /// Width of the placed content without trailing whitespace.
    pub fn width(&self) -> f64 {
        self.metrics.advance - self.metrics.trailing_whitespace
    }

    /// The line band spanning the placed content.
    pub fn content_rect(&self) -> Rect {
        Rect::new(
            self.metrics.offset,
            self.metrics.min_coord,
            self.metrics.offset + self.width(),
            self.metrics.max_coord,
        )
    }

    pub(crate) fn text_clusters(&self) -> impl Iterator<Item = &PlacedCluster> + '_ {
        self.runs
            .iter()
            .filter(|run| run.kind == RunKind::Text)
            .flat_map(|run| run.clusters.iter())
    }
}

/// Vertical space a set of runs needs above and below the baseline, leading included.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub(crate) struct Extent {
    ascent: f32,
    descent: f32,
    above: f32,
    below: f32,
}

impl Extent {
    pub(crate) fn new(metrics: &RunMetrics, line_height: f32) -> Self {
        let half_leading = (line_height - (metrics.ascent + metrics.descent)) * 0.5;
        Self {
            ascent: metrics.ascent,
            descent: metrics.descent,
            above: metrics.ascent + half_leading,
            below: metrics.descent + half_leading,
        }
    }

    /// The extent of an already assembled line.
    pub(crate) fn of_line(metrics: &LineMetrics) -> Self {
        Self {
            ascent: metrics.ascent,
            descent: metrics.descent,
            above: (metrics.baseline - metrics.min_coord) as f32,
            below: (metrics.max_coord - metrics.baseline) as f32,
        }
    }

    fn union(self, other: Self) -> Self {
        Self {
            ascent: self.ascent.max(other.ascent),
            descent: self.descent.max(other.descent),
            above: self.above.max(other.above),
            below: self.below.max(other.below),
        }
    }

    pub(crate) fn of_runs(runs: &[GlyphRun], fallback: Self) -> Self {
        runs.iter()
            .map(|run| Self::new(&run.metrics, run.line_height))
            .reduce(Self::union)
            .unwrap_or(fallback)
    }

    pub(crate) fn height(&self) -> f64 {
        f64::from(self.above + self.below).max(0.0)
    }
}

/// Group placed clusters into runs of the same source run.
pub(crate) fn build_runs<B: Brush>(
    shaped: &ShapedText<B>,
    placements: &[(usize, f64)],
    kind: RunKind,
    style_offset: usize,
) -> Vec<GlyphRun> {
    let mut runs: Vec<GlyphRun> = Vec::new();
    for &(index, x) in placements {
        let cluster = &shaped.clusters[index];
        let placed = PlacedCluster {
            text_range: cluster.text_range.clone(),
            x,
            advance: cluster.advance,
            glyphs: cluster.glyphs.clone(),
            whitespace: cluster.whitespace,
            index,
        };
        match runs.last_mut() {
            Some(run) if run.source_run == cluster.run_index && (run.x1() - x).abs() < 1e-6 => {
                run.clusters.push(placed);
            }
            _ => {
                let data = &shaped.runs[cluster.run_index];
                runs.push(GlyphRun {
                    kind,
                    style_index: data.style_index + style_offset,
                    metrics: data.metrics,
                    line_height: data.line_height,
                    clusters: vec![placed],
                    source_run: cluster.run_index,
                });
            }
        }
    }
    runs
}

/// Compute line metrics for `runs` placed in a band starting at `top`.
pub(crate) fn assemble_line(
    runs: Vec<GlyphRun>,
    fallback: Extent,
    top: f64,
    segments: SmallVec<[Segment; 1]>,
    cluster_range: Range<usize>,
    text_range: Range<usize>,
    break_reason: BreakReason,
) -> LineBox {
    let extent = Extent::of_runs(&runs, fallback);
    let line_height = extent.above + extent.below;
    let offset = runs
        .first()
        .map(GlyphRun::x0)
        .or_else(|| segments.first().map(|segment| segment.x0))
        .unwrap_or(0.0);
    let end = runs.iter().map(GlyphRun::x1).fold(offset, f64::max);
    let trailing_whitespace = runs
        .iter()
        .flat_map(|run| run.clusters.iter())
        .rev()
        .take_while(|cluster| cluster.whitespace)
        .map(|cluster| f64::from(cluster.advance))
        .sum();
    LineBox {
        text_range,
        cluster_range,
        metrics: LineMetrics {
            ascent: extent.ascent,
            descent: extent.descent,
            leading: line_height - (extent.ascent + extent.descent),
            line_height,
            baseline: top + f64::from(extent.above),
            offset,
            advance: end - offset,
            trailing_whitespace,
            min_coord: top,
            max_coord: top + extent.height(),
        },
        segments,
        runs,
        break_reason,
    }
}
