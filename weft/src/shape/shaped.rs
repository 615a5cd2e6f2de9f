// Copyright 2025 the Weft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::ops::Range;

use icu_segmenter::options::LineBreakOptions;
use icu_segmenter::LineSegmenter;
use smallvec::SmallVec;

use super::{Glyph, RunMetrics, ShapedCluster, ShapedRun, Shaper};
use crate::style::{Brush, LineHeight, Style};
use crate::StyledText;

/// A run of uniformly styled clusters.
#[derive(Clone, Debug)]
pub(crate) struct RunData {
    pub(crate) style_index: usize,
    pub(crate) metrics: RunMetrics,
    pub(crate) line_height: f32,
}

#[derive(Clone, Debug)]
pub(crate) struct ClusterData {
    pub(crate) text_range: Range<usize>,
    pub(crate) advance: f32,
    pub(crate) glyphs: SmallVec<[Glyph; 1]>,
    pub(crate) run_index: usize,
    pub(crate) whitespace: bool,
    pub(crate) newline: bool,
    /// A line may break before this cluster.
    pub(crate) boundary: bool,
}

/// Text split into styled runs of shaped clusters, ready for line breaking.
#[derive(Clone, Debug)]
pub(crate) struct ShapedText<B: Brush> {
    pub(crate) styles: Vec<Style<B>>,
    pub(crate) runs: Vec<RunData>,
    pub(crate) clusters: Vec<ClusterData>,
}

impl<B: Brush> ShapedText<B> {
    pub(crate) fn run_of(&self, cluster: usize) -> &RunData {
        &self.runs[self.clusters[cluster].run_index]
    }

    /// Sum of the advances of all clusters.
    pub(crate) fn advance(&self) -> f32 {
        self.clusters.iter().map(|cluster| cluster.advance).sum()
    }
}

fn is_newline(s: &str) -> bool {
    matches!(s, "\n" | "\r\n" | "\r" | "\u{2028}" | "\u{2029}")
}

/// Resolve styles, shape every run and annotate clusters with break opportunities.
pub(crate) fn shape_text<B: Brush, S: Shaper + ?Sized>(
    text: &StyledText<B>,
    base: &Style<B>,
    line_height: LineHeight,
    shaper: &mut S,
) -> ShapedText<B> {
    let source = text.as_str();
    let breaks: Vec<usize> = LineSegmenter::new_auto(LineBreakOptions::default())
        .segment_str(source)
        .collect();

    let mut shaped = ShapedText {
        styles: Vec::new(),
        runs: Vec::new(),
        clusters: Vec::new(),
    };

    for (range, style) in text.style_runs(base) {
        let style_index = match shaped.styles.iter().position(|s| *s == style) {
            Some(index) => index,
            None => {
                shaped.styles.push(style.clone());
                shaped.styles.len() - 1
            }
        };
        let run_index = shaped.runs.len();
        let slice = &source[range.clone()];

        let run = if let Some(attachment) = style.attachment {
            ShapedRun {
                clusters: vec![ShapedCluster {
                    text_range: 0..slice.len(),
                    advance: attachment.width,
                    glyphs: SmallVec::new(),
                }],
                metrics: RunMetrics {
                    ascent: attachment.height,
                    ..RunMetrics::default()
                },
            }
        } else {
            match shaper.shape(slice, &style.font) {
                Ok(run) => run,
                Err(err) => {
                    tracing::warn!(
                        range = ?range,
                        error = %err,
                        "shaping failed, substituting zero-width clusters"
                    );
                    placeholder_run(slice, style.font.size)
                }
            }
        };

        let mut covered = 0;
        for cluster in run.clusters {
            let local =
                cluster.text_range.start.max(covered)..cluster.text_range.end.min(slice.len());
            if local.is_empty()
                || !slice.is_char_boundary(local.start)
                || !slice.is_char_boundary(local.end)
            {
                tracing::trace!(cluster = ?cluster.text_range, "dropping malformed cluster");
                continue;
            }
            covered = local.end;
            let text_range = range.start + local.start..range.start + local.end;
            let content = &source[text_range.clone()];
            let newline = is_newline(content);
            let boundary = text_range.start != 0 && breaks.binary_search(&text_range.start).is_ok();
            shaped.clusters.push(ClusterData {
                boundary,
                whitespace: !newline && content.chars().all(char::is_whitespace),
                advance: if newline { 0.0 } else { cluster.advance },
                glyphs: if newline { SmallVec::new() } else { cluster.glyphs },
                newline,
                run_index,
                text_range,
            });
        }

        let height = match style.attachment {
            Some(attachment) => attachment.height,
            None => line_height.resolve(&run.metrics, style.font.size),
        };
        shaped.runs.push(RunData {
            style_index,
            metrics: run.metrics,
            line_height: height,
        });
    }
    shaped
}

fn placeholder_run(text: &str, font_size: f32) -> ShapedRun {
    ShapedRun {
        clusters: text
            .char_indices()
            .map(|(index, c)| ShapedCluster {
                text_range: index..index + c.len_utf8(),
                advance: 0.0,
                glyphs: SmallVec::new(),
            })
            .collect(),
        metrics: RunMetrics::fallback(font_size),
    }
}

#[cfg(test)]
mod tests {
    use super::shape_text;
    use crate::shape::FixedPitchShaper;
    use crate::style::{Attachment, Attribute, FontAttr, LineHeight, Style};
    use crate::StyledText;

    fn base() -> Style<u32> {
        Style::new(FontAttr::sized(10.0))
    }

    #[test]
    fn marks_break_opportunities_and_whitespace() {
        let text = StyledText::<u32>::new("ab cd\nef");
        let mut shaper = FixedPitchShaper::default();
        let shaped = shape_text(&text, &base(), LineHeight::Normal, &mut shaper);
        let boundaries: Vec<_> = shaped
            .clusters
            .iter()
            .filter(|c| c.boundary)
            .map(|c| c.text_range.start)
            .collect();
        assert_eq!(boundaries, [3, 6]);
        assert!(shaped.clusters[2].whitespace);
        assert!(shaped.clusters[5].newline);
        assert_eq!(shaped.clusters[5].advance, 0.0);
        assert_eq!(shaped.advance(), 35.0);
    }

    #[test]
    fn attachments_are_single_clusters() {
        let text = StyledText::<u32>::new("a\u{fffc}\u{fffc}b").with(
            1..7,
            Attribute::Attachment(Attachment {
                id: 7,
                width: 30.0,
                height: 24.0,
            }),
        );
        let mut shaper = FixedPitchShaper::default();
        let shaped = shape_text(&text, &base(), LineHeight::Normal, &mut shaper);
        assert_eq!(shaped.clusters.len(), 3);
        assert_eq!(shaped.clusters[1].text_range, 1..7);
        assert_eq!(shaped.clusters[1].advance, 30.0);
        assert_eq!(shaped.run_of(1).line_height, 24.0);
        assert_eq!(shaped.run_of(1).metrics.ascent, 24.0);
    }

    #[test]
    fn shaping_failures_become_zero_width() {
        let text = StyledText::<u32>::new("abcd")
            .with(2..4, Attribute::Font(FontAttr::new("Gone", 10.0)));
        let mut shaper = FixedPitchShaper::default().with_unavailable_family("Gone");
        let shaped = shape_text(&text, &base(), LineHeight::Normal, &mut shaper);
        let advances: Vec<_> = shaped.clusters.iter().map(|c| c.advance).collect();
        assert_eq!(advances, [5.0, 5.0, 0.0, 0.0]);
        assert_eq!(shaped.runs.len(), 2);
    }

    #[test]
    fn line_height_modes() {
        let text = StyledText::<u32>::new("a");
        let mut shaper = FixedPitchShaper::default();
        let relative =
            shape_text(&text, &base(), LineHeight::FontSizeRelative(1.5), &mut shaper);
        assert_eq!(relative.runs[0].line_height, 15.0);
        let absolute = shape_text(&text, &base(), LineHeight::Absolute(22.0), &mut shaper);
        assert_eq!(absolute.runs[0].line_height, 22.0);
    }
}
