// Copyright 2025 the Weft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout types and the layout pass.

mod cache;
mod line;
mod line_break;
mod truncate;

use core::ops::Range;
use std::sync::Arc;

use peniko::kurbo::{Insets, Rect, Size};

use crate::exclusion::ExclusionMap;
use crate::options::{Constraints, LayoutOptions, LineBreakMode, TruncationSpec};
use crate::shape::{shape_text, Shaper};
use crate::style::{Attribute, AttributeKind, Brush, Style};
use crate::StyledText;

pub use cache::LayoutKey;
pub use line::{BreakReason, GlyphRun, LineBox, LineMetrics, PlacedCluster, RunKind};

pub(crate) use cache::LayoutCache;
pub(crate) use line_break::EPSILON;

use line_break::BreakLines;
use truncate::truncate;

/// The outcome of a layout pass.
///
/// All coordinates are relative to the top left corner of the outer box, paddings included.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutResult<B: Brush> {
    pub(crate) text: Arc<str>,
    pub(crate) token_text: Option<Arc<str>>,
    pub(crate) lines: Vec<LineBox>,
    pub(crate) styles: Vec<Style<B>>,
    pub(crate) is_truncated: bool,
    pub(crate) truncated_range: Option<Range<usize>>,
    pub(crate) size: Size,
    pub(crate) content: Rect,
    pub(crate) paddings: Insets,
    pub(crate) shadow_padding: Insets,
    pub(crate) highlight_padding: f64,
    pub(crate) debug_rects: Vec<Rect>,
}

impl<B: Brush> LayoutResult<B> {
    fn empty(text: &StyledText<B>, options: &LayoutOptions, content: Rect) -> Self {
        Self {
            text: text.shared_str().clone(),
            token_text: None,
            lines: Vec::new(),
            styles: Vec::new(),
            is_truncated: false,
            truncated_range: None,
            size: Size::ZERO,
            content,
            paddings: options.paddings,
            shadow_padding: options.shadow.map_or(Insets::ZERO, |shadow| shadow.padding()),
            highlight_padding: options.highlight_padding,
            debug_rects: Vec::new(),
        }
    }

    /// The text that was laid out.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length of the laid out text, in bytes.
    pub fn text_len(&self) -> usize {
        self.text.len()
    }

    /// The composed truncation token, if the text was truncated with one.
    ///
    /// Clusters of [`RunKind::TruncationToken`] runs index into this string.
    pub fn truncation_token(&self) -> Option<&str> {
        self.token_text.as_deref()
    }

    /// The visible lines, top to bottom.
    pub fn lines(&self) -> &[LineBox] {
        &self.lines
    }

    /// Number of visible lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Resolved styles referenced by [`GlyphRun::style_index`].
    pub fn styles(&self) -> &[Style<B>] {
        &self.styles
    }

    /// Returns `true` if some of the text is not shown.
    pub fn is_truncated(&self) -> bool {
        self.is_truncated
    }

    /// The contiguous range of text that is not shown, if any.
    pub fn truncated_range(&self) -> Option<Range<usize>> {
        self.truncated_range.clone()
    }

    /// The size the text needs, paddings included.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Paddings applied around the text.
    pub fn paddings(&self) -> Insets {
        self.paddings
    }

    /// Insets by which the drop shadow extends past the text. See [`Shadow::padding`].
    ///
    /// [`Shadow::padding`]: crate::Shadow::padding
    pub fn shadow_padding(&self) -> Insets {
        self.shadow_padding
    }

    /// The rectangle text was laid out in. May be infinite.
    pub fn content_rect(&self) -> Rect {
        self.content
    }

    /// Rectangles of every line segment when [`LayoutOptions::debug`] is set.
    pub fn debug_rects(&self) -> &[Rect] {
        &self.debug_rects
    }

    /// One rectangle per line covering its content, shrunk by `insets`.
    ///
    /// Useful to draw placeholder bars while text is not rendered yet.
    pub fn placeholder_rects(&self, insets: Insets) -> Vec<Rect> {
        self.lines
            .iter()
            .map(|line| {
                let rect = line.content_rect();
                Rect::new(
                    rect.x0 + insets.x0,
                    rect.y0 + insets.y0,
                    (rect.x1 - insets.x1).max(rect.x0 + insets.x0),
                    (rect.y1 - insets.y1).max(rect.y0 + insets.y0),
                )
            })
            .collect()
    }
}

/// Lay out `text` within `constraints`.
///
/// Text that does not fit is truncated according to [`Constraints::line_break_mode`], using
/// the token described by `truncation`. Degenerate constraints (a non-positive width or
/// height, or paddings that leave no room) produce an empty layout that is not truncated.
#[tracing::instrument(level = "debug", skip_all, fields(len = text.len()))]
pub fn layout<B: Brush, S: Shaper + ?Sized>(
    text: &StyledText<B>,
    constraints: &Constraints,
    truncation: &TruncationSpec<B>,
    options: &LayoutOptions,
    shaper: &mut S,
) -> LayoutResult<B> {
    let max = constraints.max_size;
    let paddings = options.paddings;
    let content = Rect::new(
        paddings.x0,
        paddings.y0,
        max.width - paddings.x1,
        max.height - paddings.y1,
    );
    let mut result = LayoutResult::empty(text, options, content);
    if !(max.width > 0.0 && max.height > 0.0 && content.width() > 0.0 && content.height() > 0.0)
    {
        tracing::debug!(?max, ?paddings, "degenerate constraints, nothing to lay out");
        return result;
    }
    if text.is_empty() {
        return result;
    }

    let base = Style::new(options.default_font.clone());
    let shaped = shape_text(text, &base, options.line_height, shaper);
    let exclusions = ExclusionMap::new(&constraints.exclusion_paths);
    let mode = constraints.line_break_mode;
    let broken = BreakLines::new(&shaped, &exclusions, content, constraints.max_lines, mode)
        .break_remaining();

    let token = (!broken.done && mode != LineBreakMode::Clip).then(|| {
        let token = compose_token(text, truncation);
        result.token_text = Some(token.shared_str().clone());
        shape_text(&token, &base, options.line_height, shaper)
    });
    result.styles = shaped.styles.clone();
    let style_offset = result.styles.len();
    if let Some(token) = &token {
        result.styles.extend(token.styles.iter().cloned());
    }

    let truncated = truncate(
        broken,
        &shaped,
        token.as_ref(),
        mode,
        style_offset,
        text.len(),
    );
    result.lines = truncated.lines;
    result.is_truncated = truncated.is_truncated;
    result.truncated_range = truncated.truncated_range;

    if let Some(last) = result.lines.last() {
        let right = result
            .lines
            .iter()
            .map(|line| line.metrics.offset + line.width())
            .fold(content.x0, f64::max);
        result.size = Size::new(
            (right + paddings.x1).min(max.width),
            (last.metrics.max_coord + paddings.y1).min(max.height),
        );
    }
    if options.debug {
        result.debug_rects = result
            .lines
            .iter()
            .flat_map(|line| {
                let (y0, y1) = (line.metrics.min_coord, line.metrics.max_coord);
                line.segments
                    .iter()
                    .map(move |segment| Rect::new(segment.x0, y0, segment.x1, y1))
            })
            .collect();
        for (index, line) in result.lines.iter().enumerate() {
            tracing::debug!(
                index,
                text_range = ?line.text_range,
                segments = line.segments.len(),
                baseline = line.metrics.baseline,
                width = line.width(),
                "line"
            );
        }
    }

    tracing::debug!(
        lines = result.lines.len(),
        truncated = result.is_truncated,
        width = result.size.width,
        height = result.size.height,
        "layout complete"
    );
    result
}

/// Build the styled token shown in place of truncated text.
///
/// The token and the optional message are joined by a space. Characters without a font or
/// brush of their own take those of the last character of `text`.
pub(crate) fn compose_token<B: Brush>(
    text: &StyledText<B>,
    truncation: &TruncationSpec<B>,
) -> StyledText<B> {
    let joined = match &truncation.additional_message {
        Some(message) if truncation.token.is_empty() => message.clone(),
        Some(message) => truncation
            .token
            .concat(&StyledText::new(" "))
            .concat(message),
        None => truncation.token.clone(),
    };
    let mut token = StyledText::new(joined.shared_str().clone());
    let len = token.len();
    if let Some((last, _)) = text.as_str().char_indices().next_back() {
        for kind in [AttributeKind::Font, AttributeKind::Brush] {
            if let Some(attribute) = text.attribute_at(last, kind) {
                token.apply(0..len, attribute.clone());
            }
        }
    }
    for (range, attribute) in joined.attributes() {
        token.apply(range, attribute.clone());
    }
    token.apply(0..len, Attribute::TruncationToken);
    token
}
