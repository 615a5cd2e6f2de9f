// Copyright 2025 the Weft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::ops::Range;

use crate::style::Brush;
use crate::{RangeError, StyledText};

/// How a highlighted range is drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum HighlightStyle {
    /// Nothing is drawn.
    None,
    /// A line under the glyphs.
    Underline,
    /// A box over the line band.
    #[default]
    Box,
}

/// The highlighted range of a [`TextBlock`](crate::TextBlock), typically a tapped link.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HighlightState {
    range: Range<usize>,
    style: HighlightStyle,
}

impl HighlightState {
    /// The highlighted range. Empty when nothing is highlighted.
    pub fn range(&self) -> Range<usize> {
        self.range.clone()
    }

    /// How the highlight is drawn.
    pub fn style(&self) -> HighlightStyle {
        self.style
    }

    /// Returns `true` if a non-empty range is highlighted.
    pub fn is_active(&self) -> bool {
        !self.range.is_empty()
    }

    pub(crate) fn set_style(&mut self, style: HighlightStyle) {
        self.style = style;
    }

    /// Highlight `range` of `text`.
    pub(crate) fn set_range<B: Brush>(
        &mut self,
        text: &StyledText<B>,
        range: Range<usize>,
    ) -> Result<(), RangeError> {
        self.range = text.validate_range(range)?;
        Ok(())
    }

    pub(crate) fn clear(&mut self) {
        self.range = 0..0;
    }

    /// Drop the highlight if it no longer describes a slice of `text`.
    pub(crate) fn revalidate<B: Brush>(&mut self, text: &StyledText<B>) {
        if text.validate_range(self.range.clone()).is_err() {
            tracing::debug!(range = ?self.range, "highlight no longer fits the text, clearing");
            self.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{HighlightState, HighlightStyle};
    use crate::{RangeError, StyledText};

    #[test]
    fn invalid_ranges_are_rejected_and_stale_ones_cleared() {
        let long = StyledText::<u32>::new("hello world");
        let mut state = HighlightState::default();
        assert_eq!(state.style(), HighlightStyle::Box);

        state.set_range(&long, 6..11).unwrap();
        assert!(state.is_active());
        assert!(matches!(
            state.set_range(&long, 6..12),
            Err(RangeError::OutOfBounds { len: 11, .. })
        ));
        assert_eq!(state.range(), 6..11);

        state.revalidate(&StyledText::<u32>::new("hello world!"));
        assert_eq!(state.range(), 6..11);
        state.revalidate(&StyledText::<u32>::new("hi"));
        assert!(!state.is_active());
    }
}
