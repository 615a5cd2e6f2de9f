// Copyright 2025 the Weft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use peniko::kurbo::{BezPath, Insets, Size, Vec2};

use crate::style::{Brush, FontAttr, LineHeight};
use crate::StyledText;

/// How text that does not fit is wrapped and truncated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LineBreakMode {
    /// Wrap at break opportunities, falling back to cluster boundaries for words that do not
    /// fit on a line of their own. Truncates at the end.
    #[default]
    WordWrap,
    /// Wrap at any cluster boundary. Truncates at the end.
    CharWrap,
    /// Wrap at break opportunities and drop whatever does not fit without a token.
    Clip,
    /// Keep the end of the last visible line, replacing its start with the token.
    TruncateHead,
    /// Keep both ends of the last visible line, replacing its middle with the token.
    TruncateMiddle,
    /// Replace the end of the last visible line with the token.
    TruncateTail,
}

impl LineBreakMode {
    /// Returns `true` if lines prefer to break at break opportunities.
    pub fn wraps_words(self) -> bool {
        !matches!(self, Self::CharWrap)
    }
}

/// Geometric limits for a layout pass.
#[derive(Clone, Debug, PartialEq)]
pub struct Constraints {
    /// Outer size available, paddings included. Either dimension may be infinite.
    pub max_size: Size,
    /// Maximum number of lines. `0` means unlimited.
    pub max_lines: usize,
    /// Regions text must flow around, in the coordinate space of the outer box.
    pub exclusion_paths: Vec<BezPath>,
    /// Wrapping and truncation behavior.
    pub line_break_mode: LineBreakMode,
}

impl Default for Constraints {
    fn default() -> Self {
        Self {
            max_size: Size::new(f64::INFINITY, f64::INFINITY),
            max_lines: 0,
            exclusion_paths: Vec::new(),
            line_break_mode: LineBreakMode::default(),
        }
    }
}

/// The token shown where text was dropped, and how taps on it are reported.
#[derive(Clone, Debug, PartialEq)]
pub struct TruncationSpec<B: Brush> {
    /// The token itself. Characters without a font or brush of their own inherit the last
    /// character of the truncated text's.
    pub token: StyledText<B>,
    /// Shown after the token, separated by a space.
    pub additional_message: Option<StyledText<B>>,
    /// Report taps on the token even when it carries no link attribute.
    pub always_handle_tap: bool,
}

impl<B: Brush> Default for TruncationSpec<B> {
    fn default() -> Self {
        Self {
            token: StyledText::ellipsis(),
            additional_message: None,
            always_handle_tap: false,
        }
    }
}

/// A drop shadow drawn behind the text.
///
/// The shadow does not affect line breaking, but enlarges the area the text needs, see
/// [`Shadow::padding`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Shadow {
    /// Offset of the shadow from the text.
    pub offset: Vec2,
    /// Blur radius.
    pub radius: f64,
    /// Opacity in `0.0..=1.0`.
    pub opacity: f32,
}

impl Shadow {
    /// Insets by which the shadow extends the text bounds.
    ///
    /// Every component is zero or negative, so `rect - padding` grows `rect` to cover the
    /// shadow while `rect + padding` would shrink it.
    pub fn padding(&self) -> Insets {
        if self.opacity == 0.0 || (self.radius == 0.0 && self.offset == Vec2::ZERO) {
            return Insets::ZERO;
        }
        let (dx, dy, r) = (self.offset.x, self.offset.y, self.radius);
        Insets::new(
            (dx - r).min(0.0),
            (dy - r).min(0.0),
            (-dx - r).min(0.0),
            (-dy - r).min(0.0),
        )
    }
}

/// Layout inputs that are not constraints: defaults, spacing and diagnostics.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutOptions {
    /// Font used for text without a font attribute.
    pub default_font: FontAttr,
    /// How line heights are derived from run metrics.
    pub line_height: LineHeight,
    /// Space between the outer box and the text, in the order left, top, right, bottom.
    pub paddings: Insets,
    /// Drop shadow, if any.
    pub shadow: Option<Shadow>,
    /// Outset applied to each box highlight rectangle.
    pub highlight_padding: f64,
    /// Record the rectangles of every line segment in [`LayoutResult::debug_rects`].
    ///
    /// [`LayoutResult::debug_rects`]: crate::LayoutResult::debug_rects
    pub debug: bool,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            default_font: FontAttr::default(),
            line_height: LineHeight::default(),
            paddings: Insets::ZERO,
            shadow: None,
            highlight_padding: 2.0,
            debug: false,
        }
    }
}
