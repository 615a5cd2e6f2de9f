// Copyright 2025 the Weft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::ops::Range;
use std::sync::Arc;

use attributed_text::{AttributeSegments, AttributedText, TextRange};

use crate::style::{Attribute, AttributeKind, Brush, Style};
use crate::RangeError;

/// The default truncation token.
pub(crate) const ELLIPSIS: &str = "\u{2026}";

/// A string with [`Attribute`]s applied to ranges of it.
///
/// The text is immutable once created; attributes are appended. Cloning is cheap for the
/// text itself, which is shared.
#[derive(Clone, Debug, PartialEq)]
pub struct StyledText<B: Brush> {
    inner: AttributedText<Arc<str>, Attribute<B>>,
}

impl<B: Brush> StyledText<B> {
    /// Create styled text with no attributes.
    pub fn new(text: impl Into<Arc<str>>) -> Self {
        Self {
            inner: AttributedText::new(text.into()),
        }
    }

    /// A single horizontal ellipsis with no attributes.
    pub fn ellipsis() -> Self {
        Self::new(ELLIPSIS)
    }

    /// The underlying string.
    pub fn as_str(&self) -> &str {
        self.inner.as_str()
    }

    pub(crate) fn shared_str(&self) -> &Arc<str> {
        self.inner.text()
    }

    /// Length of the text, in bytes.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns `true` if the text is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Apply `attribute` to `range`.
    ///
    /// An out of range or misaligned `range` is clamped to the text and snapped to character
    /// boundaries. Use [`try_apply`](Self::try_apply) to reject it instead.
    pub fn apply(&mut self, range: Range<usize>, attribute: Attribute<B>) -> &mut Self {
        let clamped = TextRange::clamped(self.inner.text(), range.clone());
        if clamped.as_range() != range {
            tracing::debug!(
                requested = ?range,
                applied = ?clamped.as_range(),
                kind = ?attribute.kind(),
                "clamped attribute range"
            );
        }
        self.inner.apply_attribute(clamped, attribute);
        self
    }

    /// Builder form of [`apply`](Self::apply).
    #[must_use]
    pub fn with(mut self, range: Range<usize>, attribute: Attribute<B>) -> Self {
        self.apply(range, attribute);
        self
    }

    /// Apply `attribute` to `range`, failing if `range` is not a valid slice of the text.
    pub fn try_apply(
        &mut self,
        range: Range<usize>,
        attribute: Attribute<B>,
    ) -> Result<(), RangeError> {
        self.inner.try_apply_attribute(range, attribute)?;
        Ok(())
    }

    /// Check that `range` is a valid slice of the text.
    pub fn validate_range(&self, range: Range<usize>) -> Result<Range<usize>, RangeError> {
        Ok(TextRange::new(self.inner.text(), range)?.as_range())
    }

    /// All attributes with their ranges, in application order.
    pub fn attributes(&self) -> impl Iterator<Item = (Range<usize>, &Attribute<B>)> + '_ {
        self.inner
            .attributes_iter()
            .map(|(range, attr)| (range.as_range(), attr))
    }

    /// The attributes covering the byte at `index`, in application order.
    pub fn attributes_at(
        &self,
        index: usize,
    ) -> impl Iterator<Item = (Range<usize>, &Attribute<B>)> + '_ {
        self.inner
            .attributes_at(index)
            .map(|(range, attr)| (range.as_range(), attr))
    }

    /// The winning attribute of `kind` at `index`, if any.
    pub fn attribute_at(&self, index: usize, kind: AttributeKind) -> Option<&Attribute<B>> {
        self.inner
            .attributes_at(index)
            .filter(|(_, attr)| attr.kind() == kind)
            .last()
            .map(|(_, attr)| attr)
    }

    /// The resolved style of the character starting at `index`.
    pub fn style_at(&self, index: usize, base: &Style<B>) -> Style<B> {
        let mut style = base.clone();
        for (_, attr) in self.inner.attributes_at(index) {
            style.apply(attr);
        }
        style
    }

    /// Append `other`, keeping the attributes of both.
    #[must_use]
    pub fn concat(&self, other: &Self) -> Self {
        let offset = self.len();
        let mut text = String::with_capacity(offset + other.len());
        text.push_str(self.as_str());
        text.push_str(other.as_str());

        let mut inner = AttributedText::new(Arc::from(text));
        for (range, attr) in self.inner.attributes_iter() {
            inner.apply_attribute(range, attr.clone());
        }
        for (range, attr) in other.inner.attributes_iter() {
            let shifted = TextRange::new_unchecked(range.start() + offset, range.end() + offset);
            inner.apply_attribute(shifted, attr.clone());
        }
        Self { inner }
    }

    pub(crate) fn segments(&self) -> AttributeSegments<'_, Arc<str>, Attribute<B>> {
        self.inner.segments()
    }

    /// Split the text into maximal ranges of uniform style.
    pub(crate) fn style_runs(&self, base: &Style<B>) -> Vec<(Range<usize>, Style<B>)> {
        let mut runs: Vec<(Range<usize>, Style<B>)> = Vec::new();
        for (range, active) in self.segments() {
            let mut style = base.clone();
            for (_, attr) in active.iter() {
                style.apply(attr);
            }
            match runs.last_mut() {
                // Attachments are atomic, so two adjacent ones stay separate.
                Some((prev, prev_style))
                    if *prev_style == style && style.attachment.is_none() =>
                {
                    prev.end = range.end;
                }
                _ => runs.push((range, style)),
            }
        }
        runs
    }
}

impl<B: Brush> From<&str> for StyledText<B> {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl<B: Brush> From<String> for StyledText<B> {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::StyledText;
    use crate::style::{Attribute, AttributeKind, FontAttr, Style};
    use crate::RangeError;

    #[test]
    fn apply_clamps_and_try_apply_rejects() {
        let mut text = StyledText::<u32>::new("héllo");
        text.apply(2..40, Attribute::Brush(1));
        let (range, _) = text.attributes().next().unwrap();
        assert_eq!(range, 1..6);

        let err = text.try_apply(0..2, Attribute::Brush(2)).unwrap_err();
        assert_eq!(err, RangeError::NotOnCharBoundary { range: 0..2 });
        assert_eq!(text.attributes().count(), 1);
    }

    #[test]
    fn style_runs_merge_equal_neighbours() {
        let text = StyledText::<u32>::new("abcdef")
            .with(0..2, Attribute::Brush(1))
            .with(2..4, Attribute::Brush(1))
            .with(4..6, Attribute::Font(FontAttr::sized(20.0)));
        let runs = text.style_runs(&Style::default());
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].0, 0..4);
        assert_eq!(runs[0].1.brush, 1);
        assert_eq!(runs[1].0, 4..6);
        assert_eq!(runs[1].1.font.size, 20.0);
        assert_eq!(runs[1].1.brush, 0);
    }

    #[test]
    fn last_applied_attribute_wins() {
        let text = StyledText::<u32>::new("abc")
            .with(0..3, Attribute::Brush(1))
            .with(1..2, Attribute::Brush(2));
        assert_eq!(
            text.attribute_at(1, AttributeKind::Brush),
            Some(&Attribute::Brush(2))
        );
        assert_eq!(text.style_at(2, &Style::default()).brush, 1);
        assert_eq!(text.attribute_at(1, AttributeKind::Font), None);
    }

    #[test]
    fn concat_shifts_attributes() {
        let a = StyledText::<u32>::new("ab").with(0..2, Attribute::Brush(1));
        let b = StyledText::<u32>::new("cd").with(1..2, Attribute::Brush(2));
        let joined = a.concat(&b);
        assert_eq!(joined.as_str(), "abcd");
        let ranges: Vec<_> = joined.attributes().map(|(range, _)| range).collect();
        assert_eq!(ranges, [0..2, 3..4]);
    }
}
