// Copyright 2025 the Weft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::ops::Range;
use std::sync::Arc;

use peniko::kurbo::{BezPath, Insets, Point, Rect, Size};

use crate::highlight::{HighlightState, HighlightStyle};
use crate::layout::{layout, LayoutCache, LayoutKey, LayoutResult, RunKind};
use crate::links::{LinkHit, LinkIndex};
use crate::options::{Constraints, LayoutOptions, LineBreakMode, TruncationSpec};
use crate::shape::Shaper;
use crate::style::{Brush, LINK_ATTRIBUTE};
use crate::{RangeError, StyledText};

/// A block of styled text with its layout inputs and a cached layout.
///
/// Setters record new inputs; the layout is recomputed on the first query after an input
/// changed. Setting an input to a value equal to the current one keeps the cached layout.
///
/// For layout off the owning thread, take a [`LayoutRequest`] with [`request`](Self::request),
/// compute it anywhere, and hand the result back with [`publish`](Self::publish).
#[derive(Debug)]
pub struct TextBlock<B: Brush, S: Shaper> {
    text: Arc<StyledText<B>>,
    text_revision: u64,
    constraints: Constraints,
    truncation: Arc<TruncationSpec<B>>,
    truncation_revision: u64,
    options: LayoutOptions,
    options_revision: u64,
    link_names: Vec<Arc<str>>,
    links: Option<Arc<LinkIndex>>,
    highlight: HighlightState,
    shaper: S,
    cache: LayoutCache<B>,
}

impl<B: Brush, S: Shaper> TextBlock<B, S> {
    /// Create an empty block that shapes with `shaper`.
    pub fn new(shaper: S) -> Self {
        Self {
            text: Arc::new(StyledText::new("")),
            text_revision: 0,
            constraints: Constraints::default(),
            truncation: Arc::new(TruncationSpec::default()),
            truncation_revision: 0,
            options: LayoutOptions::default(),
            options_revision: 0,
            link_names: vec![Arc::from(LINK_ATTRIBUTE)],
            links: None,
            highlight: HighlightState::default(),
            shaper,
            cache: LayoutCache::default(),
        }
    }

    /// The current text.
    pub fn text(&self) -> &StyledText<B> {
        &self.text
    }

    /// Replace the text.
    ///
    /// A highlight that no longer fits the new text is cleared.
    pub fn set_text(&mut self, text: StyledText<B>) {
        if *self.text == text {
            return;
        }
        self.text = Arc::new(text);
        self.text_revision += 1;
        self.links = None;
        self.highlight.revalidate(&*self.text);
        tracing::debug!(revision = self.text_revision, "text changed, layout is stale");
    }

    /// The current constraints.
    pub fn constraints(&self) -> &Constraints {
        &self.constraints
    }

    /// Replace the constraints.
    ///
    /// Constraints are part of the cache key by value, so equal constraints keep the cached
    /// layout.
    pub fn set_constraints(&mut self, constraints: Constraints) {
        self.constraints = constraints;
    }

    /// Set the outer size available, paddings included.
    pub fn set_max_size(&mut self, max_size: Size) {
        self.constraints.max_size = max_size;
    }

    /// Set the maximum number of lines. `0` means unlimited.
    pub fn set_max_lines(&mut self, max_lines: usize) {
        self.constraints.max_lines = max_lines;
    }

    /// Set the regions text flows around.
    pub fn set_exclusion_paths(&mut self, paths: Vec<BezPath>) {
        self.constraints.exclusion_paths = paths;
    }

    /// Set the wrapping and truncation behavior.
    pub fn set_line_break_mode(&mut self, mode: LineBreakMode) {
        self.constraints.line_break_mode = mode;
    }

    /// The current truncation token and tap behavior.
    pub fn truncation(&self) -> &TruncationSpec<B> {
        &self.truncation
    }

    /// Replace the truncation token and tap behavior.
    pub fn set_truncation(&mut self, truncation: TruncationSpec<B>) {
        if *self.truncation != truncation {
            self.truncation = Arc::new(truncation);
            self.truncation_revision += 1;
        }
    }

    /// The current layout options.
    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    /// Replace the layout options.
    pub fn set_options(&mut self, options: LayoutOptions) {
        if self.options != options {
            self.options = options;
            self.options_revision += 1;
        }
    }

    /// Attribute names reported by [`link_at_point`](Self::link_at_point), highest priority
    /// first.
    pub fn link_attribute_names(&self) -> &[Arc<str>] {
        &self.link_names
    }

    /// Replace the link attribute names. Defaults to [`LINK_ATTRIBUTE`] alone.
    pub fn set_link_attribute_names(&mut self, names: Vec<Arc<str>>) {
        if self.link_names != names {
            self.link_names = names;
            self.links = None;
        }
    }

    /// The link spans of the current text, built on first use.
    pub fn links(&mut self) -> Arc<LinkIndex> {
        let (text, names) = (&self.text, &self.link_names);
        self.links
            .get_or_insert_with(|| Arc::new(LinkIndex::build(&**text, names)))
            .clone()
    }

    /// The current highlight.
    pub fn highlight(&self) -> &HighlightState {
        &self.highlight
    }

    /// Highlight `range`, or clear the highlight with an empty range.
    pub fn set_highlight_range(&mut self, range: Range<usize>) -> Result<(), RangeError> {
        self.highlight.set_range(&*self.text, range)
    }

    /// Change how the highlight is drawn.
    pub fn set_highlight_style(&mut self, style: HighlightStyle) {
        self.highlight.set_style(style);
    }

    /// Remove the highlight.
    pub fn clear_highlight(&mut self) {
        self.highlight.clear();
    }

    /// Rectangles of the current highlight.
    pub fn highlight_rects(&mut self) -> Vec<Rect> {
        let (range, style) = (self.highlight.range(), self.highlight.style());
        self.layout()
            .highlight_rects_for_range(range, style)
            .unwrap_or_default()
    }

    fn key(&self) -> LayoutKey {
        LayoutKey {
            text: self.text_revision,
            constraints: self.constraints.clone(),
            truncation: self.truncation_revision,
            options: self.options_revision,
        }
    }

    /// Returns `true` if the cached layout matches the current inputs.
    pub fn is_fresh(&self) -> bool {
        self.cache.is_fresh(&self.key())
    }

    /// The layout for the current inputs, computed if the cached one is stale.
    pub fn layout(&mut self) -> Arc<LayoutResult<B>> {
        let key = self.key();
        if let Some(result) = self.cache.get(&key) {
            return result.clone();
        }
        tracing::debug!(text = key.text, options = key.options, "recomputing layout");
        let result = Arc::new(layout(
            &*self.text,
            &self.constraints,
            &*self.truncation,
            &self.options,
            &mut self.shaper,
        ));
        self.cache.insert(key, result.clone());
        result
    }

    /// Snapshot the current inputs for layout elsewhere.
    pub fn request(&self) -> LayoutRequest<B> {
        LayoutRequest {
            key: self.key(),
            text: self.text.clone(),
            truncation: self.truncation.clone(),
            options: self.options.clone(),
        }
    }

    /// Install a layout computed from a [`LayoutRequest`].
    ///
    /// Returns `false` and discards the layout if the inputs changed since the request was
    /// taken.
    pub fn publish(&mut self, completed: CompletedLayout<B>) -> bool {
        if completed.key != self.key() {
            tracing::debug!("discarding layout computed for stale inputs");
            return false;
        }
        self.cache.insert(completed.key, Arc::new(completed.result));
        true
    }

    /// The size the text needs within the current constraints, paddings included.
    pub fn size(&mut self) -> Size {
        self.layout().size()
    }

    /// Number of visible lines.
    pub fn line_count(&mut self) -> usize {
        self.layout().line_count()
    }

    /// Returns `true` if some of the text is not shown.
    pub fn is_truncated(&mut self) -> bool {
        self.layout().is_truncated()
    }

    /// Insets by which the drop shadow extends past the text. Does not require layout.
    pub fn shadow_padding(&self) -> Insets {
        self.options
            .shadow
            .map_or(Insets::ZERO, |shadow| shadow.padding())
    }

    /// See [`LayoutResult::rects_for_range`].
    pub fn rects_for_range(&mut self, range: Range<usize>) -> Result<Vec<Rect>, RangeError> {
        self.layout().rects_for_range(range)
    }

    /// See [`LayoutResult::highlight_rects_for_range`].
    pub fn highlight_rects_for_range(
        &mut self,
        range: Range<usize>,
    ) -> Result<Vec<Rect>, RangeError> {
        let style = self.highlight.style();
        self.layout().highlight_rects_for_range(range, style)
    }

    /// See [`LayoutResult::frame_for_range`].
    pub fn frame_for_range(&mut self, range: Range<usize>) -> Result<Rect, RangeError> {
        self.layout().frame_for_range(range)
    }

    /// See [`LayoutResult::trailing_rect`].
    pub fn trailing_rect(&mut self) -> Rect {
        self.layout().trailing_rect()
    }

    /// The link or truncation token under `point`, if any.
    pub fn link_at_point(&mut self, point: Point) -> Option<LinkHit> {
        let hit = self.layout().hit_test(point)?;
        match hit.kind {
            RunKind::Text => self
                .links()
                .link_at(hit.text_range.start)
                .map(LinkHit::from),
            RunKind::TruncationToken => self
                .truncation
                .always_handle_tap
                .then_some(LinkHit::TruncationToken),
        }
    }
}

/// The inputs of a layout pass, detached from their [`TextBlock`].
#[derive(Clone, Debug)]
pub struct LayoutRequest<B: Brush> {
    key: LayoutKey,
    text: Arc<StyledText<B>>,
    truncation: Arc<TruncationSpec<B>>,
    options: LayoutOptions,
}

impl<B: Brush> LayoutRequest<B> {
    /// The key identifying the inputs.
    pub fn key(&self) -> &LayoutKey {
        &self.key
    }

    /// Run the layout pass.
    pub fn compute<S: Shaper + ?Sized>(self, shaper: &mut S) -> CompletedLayout<B> {
        let result = layout(
            &*self.text,
            &self.key.constraints,
            &*self.truncation,
            &self.options,
            shaper,
        );
        CompletedLayout {
            key: self.key,
            result,
        }
    }
}

/// A layout computed from a [`LayoutRequest`], ready to [`publish`](TextBlock::publish).
#[derive(Clone, Debug)]
pub struct CompletedLayout<B: Brush> {
    key: LayoutKey,
    result: LayoutResult<B>,
}

impl<B: Brush> CompletedLayout<B> {
    /// The key identifying the inputs.
    pub fn key(&self) -> &LayoutKey {
        &self.key
    }

    /// The computed layout.
    pub fn result(&self) -> &LayoutResult<B> {
        &self.result
    }
}
