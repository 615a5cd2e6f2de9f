// Copyright 2025 the Weft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geometry of laid out text.

use core::ops::Range;

use attributed_text::TextRange;
use peniko::kurbo::{Point, Rect};

use crate::highlight::HighlightStyle;
use crate::layout::{GlyphRun, LayoutResult, LineBox, RunKind, EPSILON};
use crate::style::Brush;
use crate::RangeError;

/// The cluster found under a point by [`LayoutResult::hit_test`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Hit {
    /// Index of the line.
    pub line: usize,
    /// Whether the cluster belongs to the text or to the truncation token.
    pub kind: RunKind,
    /// Range of the cluster in the text, or in the composed token for
    /// [`RunKind::TruncationToken`].
    pub text_range: Range<usize>,
    /// Index into [`LayoutResult::styles`].
    pub style_index: usize,
}

/// A horizontal stretch of contiguous matching clusters on one line.
#[derive(Clone, Copy, Debug)]
struct Span {
    line: usize,
    x0: f64,
    x1: f64,
    ascent: f32,
    descent: f32,
    underline_offset: f32,
    underline_size: f32,
}

impl Span {
    fn glyph_rect(&self, line: &LineBox) -> Rect {
        let baseline = line.metrics.baseline;
        Rect::new(
            self.x0,
            baseline - f64::from(self.ascent),
            self.x1,
            baseline + f64::from(self.descent),
        )
    }

    fn band_rect(&self, line: &LineBox) -> Rect {
        Rect::new(self.x0, line.metrics.min_coord, self.x1, line.metrics.max_coord)
    }

    fn underline_rect(&self, line: &LineBox) -> Rect {
        let top = line.metrics.baseline + f64::from(self.underline_offset);
        Rect::new(self.x0, top, self.x1, top + f64::from(self.underline_size))
    }
}

fn overlaps(a: &Range<usize>, b: &Range<usize>) -> bool {
    a.start < b.end && a.end > b.start
}

impl<B: Brush> LayoutResult<B> {
    fn validate(&self, range: Range<usize>) -> Result<Range<usize>, RangeError> {
        Ok(TextRange::new(&self.text, range)?.as_range())
    }

    /// Collect merged spans of clusters of `kind` that `matches` accepts.
    fn spans(&self, kind: RunKind, matches: impl Fn(&Range<usize>) -> bool) -> Vec<Span> {
        let mut spans = Vec::new();
        for (line_ix, line) in self.lines.iter().enumerate() {
            let mut current: Option<Span> = None;
            for run in &line.runs {
                for cluster in &run.clusters {
                    let hit = run.kind == kind
                        && cluster.advance > 0.0
                        && matches(&cluster.text_range);
                    if !hit {
                        spans.extend(current.take());
                        continue;
                    }
                    let metrics = run.metrics;
                    match &mut current {
                        Some(span) if (span.x1 - cluster.x).abs() < EPSILON => {
                            span.x1 = cluster.x1();
                            span.ascent = span.ascent.max(metrics.ascent);
                            span.descent = span.descent.max(metrics.descent);
                            span.underline_offset =
                                span.underline_offset.max(metrics.underline_offset);
                            span.underline_size = span.underline_size.max(metrics.underline_size);
                        }
                        _ => {
                            spans.extend(current.take());
                            current = Some(Span {
                                line: line_ix,
                                x0: cluster.x,
                                x1: cluster.x1(),
                                ascent: metrics.ascent,
                                descent: metrics.descent,
                                underline_offset: metrics.underline_offset,
                                underline_size: metrics.underline_size,
                            });
                        }
                    }
                }
            }
            spans.extend(current.take());
        }
        spans
    }

    fn text_spans(&self, range: Range<usize>) -> Result<Vec<Span>, RangeError> {
        let range = self.validate(range)?;
        if range.is_empty() {
            return Ok(Vec::new());
        }
        Ok(self.spans(RunKind::Text, |cluster| overlaps(cluster, &range)))
    }

    /// Rectangles covering the glyphs of `range`, one per contiguous stretch on each line.
    ///
    /// Rectangles span from the ascent to the descent of the runs involved. An empty range
    /// yields no rectangles. Text hidden by truncation yields none either.
    pub fn rects_for_range(&self, range: Range<usize>) -> Result<Vec<Rect>, RangeError> {
        Ok(self
            .text_spans(range)?
            .iter()
            .map(|span| span.glyph_rect(&self.lines[span.line]))
            .collect())
    }

    /// Rectangles to draw a highlight of `style` over `range`.
    ///
    /// [`HighlightStyle::Box`] rectangles cover the full line band, outset by the highlight
    /// padding from the [`LayoutOptions`](crate::LayoutOptions).
    pub fn highlight_rects_for_range(
        &self,
        range: Range<usize>,
        style: HighlightStyle,
    ) -> Result<Vec<Rect>, RangeError> {
        let spans = self.text_spans(range)?;
        let padding = self.highlight_padding;
        Ok(match style {
            HighlightStyle::None => Vec::new(),
            HighlightStyle::Underline => spans
                .iter()
                .map(|span| span.underline_rect(&self.lines[span.line]))
                .collect(),
            HighlightStyle::Box => spans
                .iter()
                .map(|span| span.band_rect(&self.lines[span.line]).inflate(padding, padding))
                .collect(),
        })
    }

    /// The union of the line bands covered by `range`, or [`Rect::ZERO`] if nothing visible
    /// is covered.
    pub fn frame_for_range(&self, range: Range<usize>) -> Result<Rect, RangeError> {
        Ok(self
            .text_spans(range)?
            .iter()
            .map(|span| span.band_rect(&self.lines[span.line]))
            .reduce(|frame, rect| frame.union(rect))
            .unwrap_or(Rect::ZERO))
    }

    /// Rectangles covering the truncation token, if one is shown.
    pub fn truncation_token_rects(&self) -> Vec<Rect> {
        self.spans(RunKind::TruncationToken, |_| true)
            .iter()
            .map(|span| span.glyph_rect(&self.lines[span.line]))
            .collect()
    }

    /// The free space after the end of the last line, over that line's band.
    ///
    /// Extends to the right edge of the segment the line ends in, or to the right edge of the
    /// measured size when the width is unconstrained. [`Rect::ZERO`] if there is no room.
    pub fn trailing_rect(&self) -> Rect {
        let Some(line) = self.lines.last() else {
            return Rect::ZERO;
        };
        let end = line.metrics.offset + line.width();
        let right = line
            .segments
            .iter()
            .find(|segment| end >= segment.x0 - EPSILON && end <= segment.x1 + EPSILON)
            .map_or(self.content.x1, |segment| segment.x1);
        let right = if right.is_finite() {
            right
        } else {
            self.size.width - self.paddings.x1
        };
        if right - end <= EPSILON {
            return Rect::ZERO;
        }
        Rect::new(end, line.metrics.min_coord, right, line.metrics.max_coord)
    }

    /// The cluster under `point`, if any.
    ///
    /// Only points inside a cluster's advance and its line's band hit.
    pub fn hit_test(&self, point: Point) -> Option<Hit> {
        let (line_ix, line) = self.lines.iter().enumerate().find(|(_, line)| {
            point.y >= line.metrics.min_coord && point.y < line.metrics.max_coord
        })?;
        line.runs.iter().find_map(|run: &GlyphRun| {
            run.clusters
                .iter()
                .find(|cluster| {
                    cluster.advance > 0.0 && point.x >= cluster.x && point.x < cluster.x1()
                })
                .map(|cluster| Hit {
                    line: line_ix,
                    kind: run.kind,
                    text_range: cluster.text_range.clone(),
                    style_index: run.style_index,
                })
        })
    }
}
