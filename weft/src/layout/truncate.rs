// Copyright 2025 the Weft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Replacing the end of the visible text with a truncation token.

use core::ops::Range;

use super::line::{
    assemble_line, build_runs, Extent, GlyphRun, LineBox, PlacedCluster, RunKind,
};
use super::line_break::{BrokenLines, EPSILON};
use crate::exclusion::Segment;
use crate::options::LineBreakMode;
use crate::shape::ShapedText;
use crate::style::Brush;

/// Lines after truncation.
#[derive(Clone, Debug)]
pub(crate) struct Truncated {
    pub(crate) lines: Vec<LineBox>,
    pub(crate) is_truncated: bool,
    /// The contiguous range of source text that is not shown.
    pub(crate) truncated_range: Option<Range<usize>>,
}

/// Shared inputs for placing the token on a line.
struct Placer<'a, B: Brush> {
    shaped: &'a ShapedText<B>,
    token: &'a ShapedText<B>,
    style_offset: usize,
    text_len: usize,
}

/// Apply truncation to the lines produced by a breaking pass.
///
/// `token` is `None` when the mode drops text without a token. Otherwise the token goes on
/// the last line. If it does not fit there even with every cluster removed, that line is
/// dropped and the token moves up one line. The first line always keeps the token.
pub(crate) fn truncate<B: Brush>(
    broken: BrokenLines,
    shaped: &ShapedText<B>,
    token: Option<&ShapedText<B>>,
    mode: LineBreakMode,
    style_offset: usize,
    text_len: usize,
) -> Truncated {
    let BrokenLines {
        mut lines,
        next_cluster,
        done,
    } = broken;
    if done {
        return Truncated {
            lines,
            is_truncated: false,
            truncated_range: None,
        };
    }

    let dropped_start = shaped
        .clusters
        .get(next_cluster)
        .map_or(text_len, |cluster| cluster.text_range.start);
    let Some(token) = token else {
        return Truncated {
            lines,
            is_truncated: true,
            truncated_range: Some(dropped_start..text_len),
        };
    };
    let placer = Placer {
        shaped,
        token,
        style_offset,
        text_len,
    };

    while let Some(line) = lines.last() {
        let placed = match mode {
            LineBreakMode::TruncateHead => placer.head(line),
            LineBreakMode::TruncateMiddle => placer.middle(line),
            _ => placer.tail(line, mode.wraps_words()),
        };
        let index = lines.len() - 1;
        match placed {
            Some((truncated, hidden)) => {
                tracing::debug!(line = index, hidden = ?hidden, "placed truncation token");
                lines[index] = truncated;
                return Truncated {
                    lines,
                    is_truncated: true,
                    truncated_range: Some(hidden),
                };
            }
            None if index == 0 => {
                tracing::debug!("truncation token does not fit, keeping it on the first line");
                let hidden = line.text_range.start..text_len;
                let token_line = placer.token_only(line);
                lines[0] = token_line;
                return Truncated {
                    lines,
                    is_truncated: true,
                    truncated_range: Some(hidden),
                };
            }
            None => {
                tracing::trace!(line = index, "truncation token does not fit, cascading up");
                lines.pop();
            }
        }
    }

    Truncated {
        lines,
        is_truncated: true,
        truncated_range: Some(dropped_start..text_len),
    }
}

impl<B: Brush> Placer<'_, B> {
    fn token_width(&self) -> f64 {
        f64::from(self.token.advance())
    }

    fn token_placements(&self, x: f64) -> Vec<(usize, f64)> {
        let mut x = x;
        (0..self.token.clusters.len())
            .map(|index| {
                let at = x;
                x += f64::from(self.token.clusters[index].advance);
                (index, at)
            })
            .collect()
    }

    fn token_runs(&self, x: f64) -> Vec<GlyphRun> {
        build_runs(
            self.token,
            &self.token_placements(x),
            RunKind::TruncationToken,
            self.style_offset,
        )
    }

    /// Place source clusters `indices` one after the other starting at `x`.
    fn source_placements(&self, indices: Range<usize>, x: f64) -> (Vec<(usize, f64)>, f64) {
        let mut x = x;
        let placements = indices
            .filter(|&index| !self.shaped.clusters[index].newline)
            .map(|index| {
                let at = x;
                x += f64::from(self.shaped.clusters[index].advance);
                (index, at)
            })
            .collect();
        (placements, x)
    }

    fn cluster_start(&self, index: usize) -> usize {
        self.shaped
            .clusters
            .get(index)
            .map_or(self.text_len, |cluster| cluster.text_range.start)
    }

    fn rebuild(&self, line: &LineBox, runs: Vec<GlyphRun>, text_range: Range<usize>) -> LineBox {
        assemble_line(
            runs,
            Extent::of_line(&line.metrics),
            line.metrics.min_coord,
            line.segments.clone(),
            line.cluster_range.clone(),
            text_range,
            line.break_reason,
        )
    }

    /// Keep the longest prefix of the line that leaves room for the token after it.
    fn tail(&self, line: &LineBox, wrap_words: bool) -> Option<(LineBox, Range<usize>)> {
        let kept: Vec<&PlacedCluster> = line.text_clusters().collect();
        let first_segment = *line.segments.first()?;
        let token_width = self.token_width();

        let mut boundary_cut = None;
        let mut any_cut = None;
        for cut in (0..=kept.len()).rev() {
            let mut trimmed = cut;
            while trimmed > 0 && kept[trimmed - 1].whitespace {
                trimmed -= 1;
            }
            let (x, segment) = match trimmed.checked_sub(1).map(|ix| kept[ix]) {
                Some(last) => (last.x1(), segment_at(&line.segments, last.x)),
                None => (first_segment.x0, first_segment),
            };
            let Some(token_x) = token_position(&line.segments, segment, x, token_width) else {
                continue;
            };
            if any_cut.is_none() {
                any_cut = Some((trimmed, token_x));
            }
            if !wrap_words || (cut > 0 && self.breaks_before(line, &kept, cut)) {
                boundary_cut = Some((trimmed, token_x));
                break;
            }
        }
        let (count, x) = boundary_cut.or(any_cut)?;

        let kept_placements: Vec<(usize, f64)> =
            kept[..count].iter().map(|c| (c.index, c.x)).collect();
        let mut runs = build_runs(self.shaped, &kept_placements, RunKind::Text, 0);
        runs.extend(self.token_runs(x));

        let kept_end = match count.checked_sub(1) {
            Some(last) => kept[last].text_range.end,
            None => line.text_range.start,
        };
        let truncated = self.rebuild(line, runs, line.text_range.start..kept_end);
        Some((truncated, kept_end..self.text_len))
    }

    /// Whether the line may be cut between `kept[cut - 1]` and `kept[cut]`.
    fn breaks_before(&self, line: &LineBox, kept: &[&PlacedCluster], cut: usize) -> bool {
        if kept[cut - 1].whitespace {
            return true;
        }
        let next = match kept.get(cut) {
            Some(cluster) => cluster.index,
            None => line.cluster_range.end,
        };
        self.shaped
            .clusters
            .get(next)
            .is_none_or(|cluster| cluster.boundary || cluster.newline)
    }

    /// The first cluster of the last paragraph that starts at or after `line`.
    ///
    /// A newline ending the text does not open a new paragraph.
    fn last_paragraph(&self, line: &LineBox) -> usize {
        let clusters = &self.shaped.clusters;
        let start = line.cluster_range.start;
        let end = clusters.len().saturating_sub(1).max(start);
        clusters[start..end]
            .iter()
            .rposition(|cluster| cluster.newline)
            .map_or(start, |ix| start + ix + 1)
    }

    /// Show the token followed by the longest suffix of the last paragraph.
    ///
    /// Falls back to tail placement when the whole remainder would fit.
    fn head(&self, line: &LineBox) -> Option<(LineBox, Range<usize>)> {
        let segment = widest(&line.segments)?;
        let token_width = self.token_width();
        if token_width > segment.width() + EPSILON {
            return None;
        }

        let clusters = &self.shaped.clusters;
        let start = line.cluster_range.start;
        let floor = self.last_paragraph(line);
        let mut available = segment.width() - token_width;
        let mut first = clusters.len();
        while first > floor {
            let advance = f64::from(clusters[first - 1].advance);
            if advance > available + EPSILON {
                break;
            }
            available -= advance;
            first -= 1;
        }
        if first == start {
            return self.tail(line, true);
        }

        let mut runs = self.token_runs(segment.x0);
        let (suffix, _) = self.source_placements(first..clusters.len(), segment.x0 + token_width);
        runs.extend(build_runs(self.shaped, &suffix, RunKind::Text, 0));

        let suffix_start = self.cluster_start(first);
        let truncated = self.rebuild(line, runs, suffix_start..self.text_len);
        Some((truncated, line.text_range.start..suffix_start))
    }

    /// Show a prefix of the line's paragraph and a suffix of the last paragraph, of similar
    /// width, around the token.
    fn middle(&self, line: &LineBox) -> Option<(LineBox, Range<usize>)> {
        let segment = widest(&line.segments)?;
        let token_width = self.token_width();
        if token_width > segment.width() + EPSILON {
            return None;
        }

        let clusters = &self.shaped.clusters;
        let available = segment.width() - token_width;
        let floor = self.last_paragraph(line);
        let (mut front, mut back) = (line.cluster_range.start, clusters.len());
        let (mut front_width, mut back_width) = (0.0, 0.0);
        let (mut front_open, mut back_open) = (true, true);
        while front < back && (front_open || back_open) {
            let use_front = front_open && (!back_open || front_width <= back_width);
            let index = if use_front { front } else { back - 1 };
            let advance = f64::from(clusters[index].advance);
            let stopped = if use_front {
                clusters[index].newline
            } else {
                back == floor
            };
            if stopped || front_width + back_width + advance > available + EPSILON {
                if use_front {
                    front_open = false;
                } else {
                    back_open = false;
                }
                continue;
            }
            if use_front {
                front += 1;
                front_width += advance;
            } else {
                back -= 1;
                back_width += advance;
            }
        }
        if front == back {
            return self.tail(line, true);
        }

        let (prefix, x) = self.source_placements(line.cluster_range.start..front, segment.x0);
        let (suffix, _) = self.source_placements(back..clusters.len(), x + token_width);
        let mut runs = build_runs(self.shaped, &prefix, RunKind::Text, 0);
        runs.extend(self.token_runs(x));
        runs.extend(build_runs(self.shaped, &suffix, RunKind::Text, 0));

        let hidden = self.cluster_start(front)..self.cluster_start(back);
        let truncated = self.rebuild(line, runs, line.text_range.start..self.text_len);
        Some((truncated, hidden))
    }

    /// The token alone at the start of the line, overflowing if it must.
    fn token_only(&self, line: &LineBox) -> LineBox {
        let x = line
            .segments
            .first()
            .map_or(line.metrics.offset, |segment| segment.x0);
        let start = line.text_range.start;
        self.rebuild(line, self.token_runs(x), start..start)
    }
}

fn segment_at(segments: &[Segment], x: f64) -> Segment {
    segments
        .iter()
        .copied()
        .find(|segment| x >= segment.x0 - EPSILON && x < segment.x1 + EPSILON)
        .or_else(|| segments.last().copied())
        .unwrap_or(Segment { x0: x, x1: x })
}

/// Where the token goes after content ending at `x` in `segment`: right there, or at the
/// start of a later segment wide enough to hold it.
fn token_position(segments: &[Segment], segment: Segment, x: f64, width: f64) -> Option<f64> {
    if x + width <= segment.x1 + EPSILON {
        return Some(x);
    }
    segments
        .iter()
        .find(|later| later.x0 >= segment.x1 - EPSILON && later.width() + EPSILON >= width)
        .map(|later| later.x0)
}

fn widest(segments: &[Segment]) -> Option<Segment> {
    segments
        .iter()
        .copied()
        .reduce(|widest, segment| {
            if segment.width() > widest.width() {
                segment
            } else {
                widest
            }
        })
}
