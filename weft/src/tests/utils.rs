// Copyright 2025 the Weft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::sync::Arc;

use peniko::kurbo::{BezPath, Rect, Shape, Size};

use crate::{
    FixedPitchShaper, FontAttr, LayoutOptions, LayoutResult, LineBreakMode, RunKind, StyledText,
    TextBlock, TruncationSpec,
};

/// Font size used by every test. With [`FixedPitchShaper`] defaults, clusters are 5px wide,
/// the ascent is 8px, the descent 2px, and lines are 10px tall.
pub(crate) const FONT_SIZE: f32 = 10.0;

pub(crate) struct TestEnv {
    pub(crate) block: TextBlock<u32, FixedPitchShaper>,
}

impl TestEnv {
    pub(crate) fn new(text: impl Into<StyledText<u32>>) -> Self {
        let mut block = TextBlock::new(FixedPitchShaper::default());
        block.set_options(LayoutOptions {
            default_font: FontAttr::sized(FONT_SIZE),
            ..LayoutOptions::default()
        });
        block.set_text(text.into());
        Self { block }
    }

    pub(crate) fn width(mut self, width: f64) -> Self {
        self.block.set_max_size(Size::new(width, f64::INFINITY));
        self
    }

    pub(crate) fn size(mut self, width: f64, height: f64) -> Self {
        self.block.set_max_size(Size::new(width, height));
        self
    }

    pub(crate) fn max_lines(mut self, max_lines: usize) -> Self {
        self.block.set_max_lines(max_lines);
        self
    }

    pub(crate) fn mode(mut self, mode: LineBreakMode) -> Self {
        self.block.set_line_break_mode(mode);
        self
    }

    pub(crate) fn token(mut self, token: &str) -> Self {
        self.block.set_truncation(TruncationSpec {
            token: StyledText::new(token),
            ..TruncationSpec::default()
        });
        self
    }

    pub(crate) fn exclude(mut self, rect: Rect) -> Self {
        let mut paths = self.block.constraints().exclusion_paths.clone();
        paths.push(rect_path(rect));
        self.block.set_exclusion_paths(paths);
        self
    }

    pub(crate) fn options(mut self, f: impl FnOnce(&mut LayoutOptions)) -> Self {
        let mut options = self.block.options().clone();
        f(&mut options);
        self.block.set_options(options);
        self
    }

    pub(crate) fn layout(&mut self) -> Arc<LayoutResult<u32>> {
        self.block.layout()
    }
}

pub(crate) fn rect_path(rect: Rect) -> BezPath {
    rect.to_path(0.1)
}

/// The visible text of each line, truncation token included.
pub(crate) fn line_texts(result: &LayoutResult<u32>) -> Vec<String> {
    let token = result.truncation_token().unwrap_or_default();
    result
        .lines()
        .iter()
        .map(|line| {
            let mut text = String::new();
            for run in line.runs() {
                let source = match run.kind() {
                    RunKind::Text => result.text(),
                    RunKind::TruncationToken => token,
                };
                for cluster in run.clusters() {
                    text.push_str(&source[cluster.text_range.clone()]);
                }
            }
            text
        })
        .collect()
}
