// Copyright 2025 the Weft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::sync::Arc;

use crate::shape::RunMetrics;

/// Default font size, in logical pixels.
pub const DEFAULT_FONT_SIZE: f32 = 16.0;

/// A font request: an optional family name and a size.
///
/// `None` asks the [`Shaper`](crate::Shaper) for its default family.
#[derive(Clone, Debug, PartialEq)]
pub struct FontAttr {
    /// Family name.
    pub family: Option<Arc<str>>,
    /// Font size, in logical pixels.
    pub size: f32,
}

impl FontAttr {
    /// A font of the default family at `size`.
    pub fn sized(size: f32) -> Self {
        Self { family: None, size }
    }

    /// A font of the given family at `size`.
    pub fn new(family: impl Into<Arc<str>>, size: f32) -> Self {
        Self {
            family: Some(family.into()),
            size,
        }
    }
}

impl Default for FontAttr {
    fn default() -> Self {
        Self::sized(DEFAULT_FONT_SIZE)
    }
}

/// How the height of a line is derived from the runs placed on it.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum LineHeight {
    /// Ascent, descent and leading as reported by the shaper.
    #[default]
    Normal,
    /// A multiple of the font size.
    FontSizeRelative(f32),
    /// A fixed height, in logical pixels.
    Absolute(f32),
}

impl LineHeight {
    /// The height a run with `metrics` in a font of `font_size` contributes to its line.
    pub fn resolve(self, metrics: &RunMetrics, font_size: f32) -> f32 {
        match self {
            Self::Normal => metrics.ascent + metrics.descent + metrics.leading,
            Self::FontSizeRelative(value) => font_size * value,
            Self::Absolute(value) => value,
        }
    }
}
