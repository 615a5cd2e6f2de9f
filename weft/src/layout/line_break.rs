// Copyright 2025 the Weft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Greedy line breaking around exclusion paths.

use peniko::kurbo::Rect;

use super::line::{assemble_line, build_runs, BreakReason, Extent, LineBox, RunKind};
use crate::exclusion::{ExclusionMap, Segment};
use crate::options::LineBreakMode;
use crate::shape::ShapedText;
use crate::style::Brush;

/// Slack allowed when comparing positions.
pub(crate) const EPSILON: f64 = 1e-4;

/// How many times a line band is re-measured when its content turns out taller than the
/// estimate the available segments were computed for.
const MAX_REFITS: usize = 4;

/// Lines produced by a breaking pass.
#[derive(Clone, Debug)]
pub(crate) struct BrokenLines {
    pub(crate) lines: Vec<LineBox>,
    /// The first cluster no line consumed.
    pub(crate) next_cluster: usize,
    /// Every cluster was consumed.
    pub(crate) done: bool,
}

/// The outcome of filling a single band.
struct LineFill {
    placements: Vec<(usize, f64)>,
    end: usize,
    reason: BreakReason,
    /// Extent used for lines that place nothing.
    fallback: Extent,
}

pub(crate) struct BreakLines<'a, B: Brush> {
    shaped: &'a ShapedText<B>,
    exclusions: &'a ExclusionMap,
    content: Rect,
    max_lines: usize,
    wrap_words: bool,

    /// Iteration state: the next cluster to place.
    cluster_idx: usize,
    /// The bottom of the last committed line, or else the content top.
    /// Use of f64 avoids accumulated error over many lines.
    committed_y: f64,
    lines: Vec<LineBox>,
    done: bool,
}

impl<'a, B: Brush> BreakLines<'a, B> {
    pub(crate) fn new(
        shaped: &'a ShapedText<B>,
        exclusions: &'a ExclusionMap,
        content: Rect,
        max_lines: usize,
        mode: LineBreakMode,
    ) -> Self {
        Self {
            shaped,
            exclusions,
            content,
            max_lines,
            wrap_words: mode.wraps_words(),
            cluster_idx: 0,
            committed_y: content.y0,
            lines: Vec::new(),
            done: shaped.clusters.is_empty(),
        }
    }

    /// Computes the next line in the paragraph. Returns `None` when the text is exhausted or
    /// no further line fits.
    pub(crate) fn break_next(&mut self) -> Option<&LineBox> {
        if self.done {
            return None;
        }
        if self.cluster_idx >= self.shaped.clusters.len() {
            self.done = true;
            return None;
        }
        if self.max_lines != 0 && self.lines.len() >= self.max_lines {
            return None;
        }

        let start = self.cluster_idx;
        let start_run = self.shaped.run_of(start);
        let fallback = Extent::new(&start_run.metrics, start_run.line_height);
        let mut band = fallback.height().max(1.0);
        let mut refits = 0;
        loop {
            let top = self.committed_y;
            if top + band > self.content.y1 + EPSILON {
                tracing::trace!(top, band, "no room for another line");
                return None;
            }
            let segments = self
                .exclusions
                .segments(top, top + band, self.content.x0, self.content.x1);
            if segments.is_empty() {
                tracing::trace!(top, band, "band fully excluded, moving down");
                self.committed_y += band;
                continue;
            }

            let fill = self.fill_line(start, &segments, fallback);
            let runs = build_runs(self.shaped, &fill.placements, RunKind::Text, 0);
            let height = Extent::of_runs(&runs, fill.fallback).height();
            if height > band + EPSILON && !self.exclusions.is_empty() && refits < MAX_REFITS {
                band = height;
                refits += 1;
                continue;
            }
            if top + height > self.content.y1 + EPSILON {
                tracing::trace!(top, height, "line taller than the remaining space");
                return None;
            }

            let clusters = &self.shaped.clusters;
            let text_range =
                clusters[start].text_range.start..clusters[fill.end - 1].text_range.end;
            let line = assemble_line(
                runs,
                fill.fallback,
                top,
                segments,
                start..fill.end,
                text_range,
                fill.reason,
            );
            tracing::trace!(
                index = self.lines.len(),
                text_range = ?line.text_range,
                reason = ?line.break_reason,
                "committed line"
            );
            self.committed_y = line.metrics.max_coord;
            self.cluster_idx = fill.end;
            if fill.end >= clusters.len() {
                self.done = true;
            }
            self.lines.push(line);
            return self.lines.last();
        }
    }

    /// Breaks all remaining lines.
    pub(crate) fn break_remaining(mut self) -> BrokenLines {
        while self.break_next().is_some() {}
        BrokenLines {
            lines: self.lines,
            next_cluster: self.cluster_idx,
            done: self.done,
        }
    }

    /// Place clusters from `start` into `segments`, left to right.
    fn fill_line(&self, start: usize, segments: &[Segment], fallback: Extent) -> LineFill {
        let clusters = &self.shaped.clusters;
        let mut placements: Vec<(usize, f64)> = Vec::new();
        let mut idx = start;
        let mut reason = BreakReason::None;
        let mut fallback = fallback;

        'segments: for (segment_ix, segment) in segments.iter().enumerate() {
            let last_segment = segment_ix + 1 == segments.len();
            let segment_start = idx;
            let segment_placed = placements.len();
            let mut x = segment.x0;
            // (cluster index, placement count) of the last break opportunity in this segment.
            let mut prev_boundary: Option<(usize, usize)> = None;

            while let Some(cluster) = clusters.get(idx) {
                if cluster.newline {
                    let run = &self.shaped.runs[cluster.run_index];
                    fallback = Extent::new(&run.metrics, run.line_height);
                    idx += 1;
                    reason = BreakReason::Explicit;
                    break 'segments;
                }
                if cluster.boundary && idx > segment_start {
                    prev_boundary = Some((idx, placements.len()));
                }

                let next_x = x + f64::from(cluster.advance);
                if next_x <= segment.x1 + EPSILON {
                    placements.push((idx, x));
                    x = next_x;
                    idx += 1;
                    continue;
                }

                reason = BreakReason::Regular;
                if cluster.whitespace {
                    // Whitespace hangs past the end of the segment and is not placed.
                    while clusters.get(idx).is_some_and(|c| c.whitespace) {
                        idx += 1;
                    }
                    // A newline after the hanging whitespace still belongs to this line.
                    if let Some(newline) = clusters.get(idx).filter(|c| c.newline) {
                        let run = &self.shaped.runs[newline.run_index];
                        fallback = Extent::new(&run.metrics, run.line_height);
                        idx += 1;
                        reason = BreakReason::Explicit;
                        break 'segments;
                    }
                } else if self.wrap_words {
                    if let Some((boundary_idx, placed)) = prev_boundary {
                        placements.truncate(placed);
                        idx = boundary_idx;
                    } else if !last_segment || segment_placed > 0 {
                        // The word does not fit here; retry it in the next segment, or on
                        // the next line.
                        placements.truncate(segment_placed);
                        idx = segment_start;
                    } else {
                        reason = BreakReason::Emergency;
                    }
                }
                break;
            }
            if idx >= clusters.len() {
                if reason != BreakReason::Explicit && idx > start {
                    reason = BreakReason::None;
                }
                break;
            }
        }

        if idx == start {
            // Nothing fits anywhere; place a single cluster so that layout makes progress.
            let x = segments.first().map_or(self.content.x0, |segment| segment.x0);
            placements.push((idx, x));
            idx += 1;
            reason = if idx >= clusters.len() {
                BreakReason::None
            } else {
                BreakReason::Emergency
            };
        }

        LineFill {
            placements,
            end: idx,
            reason,
            fallback,
        }
    }
}
