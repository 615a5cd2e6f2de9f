// Copyright 2025 the Weft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::sync::Arc;

use icu_segmenter::GraphemeClusterSegmenter;
use smallvec::smallvec;

use super::{Glyph, RunMetrics, ShapeError, ShapedCluster, ShapedRun, Shaper};
use crate::style::FontAttr;

/// A shaper that gives every grapheme cluster the same advance.
///
/// All measurements are proportional to the font size, so a 10px font with the default
/// ratios produces 5px wide clusters on 10px tall lines.
#[derive(Clone, Debug)]
pub struct FixedPitchShaper {
    /// Cluster advance as a fraction of the font size.
    pub advance: f32,
    /// Ascent as a fraction of the font size.
    pub ascent: f32,
    /// Descent as a fraction of the font size.
    pub descent: f32,
    /// Leading as a fraction of the font size.
    pub leading: f32,
    unavailable: Vec<Arc<str>>,
}

impl Default for FixedPitchShaper {
    fn default() -> Self {
        Self {
            advance: 0.5,
            ascent: 0.8,
            descent: 0.2,
            leading: 0.0,
            unavailable: Vec::new(),
        }
    }
}

impl FixedPitchShaper {
    /// Make shaping fail for `family` with [`ShapeError::FontUnavailable`].
    #[must_use]
    pub fn with_unavailable_family(mut self, family: impl Into<Arc<str>>) -> Self {
        self.unavailable.push(family.into());
        self
    }
}

impl Shaper for FixedPitchShaper {
    fn shape(&mut self, text: &str, font: &FontAttr) -> Result<ShapedRun, ShapeError> {
        if let Some(family) = &font.family {
            if self.unavailable.contains(family) {
                return Err(ShapeError::FontUnavailable(family.clone()));
            }
        }
        let size = font.size;
        let advance = size * self.advance;
        let boundaries: Vec<usize> = GraphemeClusterSegmenter::new().segment_str(text).collect();
        let clusters = boundaries
            .windows(2)
            .map(|pair| {
                let range = pair[0]..pair[1];
                let id = text[range.clone()].chars().next().map_or(0, u32::from);
                ShapedCluster {
                    text_range: range,
                    advance,
                    glyphs: smallvec![Glyph {
                        id,
                        x: 0.0,
                        y: 0.0,
                        advance,
                    }],
                }
            })
            .collect();
        Ok(ShapedRun {
            clusters,
            metrics: RunMetrics {
                ascent: size * self.ascent,
                descent: size * self.descent,
                leading: size * self.leading,
                underline_offset: size * 0.1,
                underline_size: (size / 16.0).max(1.0),
            },
        })
    }
}
