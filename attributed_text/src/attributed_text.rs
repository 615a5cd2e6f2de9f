// Copyright 2025 the Weft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;
use core::fmt::Debug;
use core::ops::Range;

use crate::{AttributeSegments, Error, TextRange, TextStorage};

/// A block of text with attributes applied to ranges within the text.
///
/// Attributes are kept in application order; consumers that resolve conflicts should let
/// later spans win.
#[derive(Clone, Debug, PartialEq)]
pub struct AttributedText<T: Debug + TextStorage, Attr: Debug> {
    text: T,
    attributes: Vec<(TextRange, Attr)>,
}

impl<T: Debug + TextStorage, Attr: Debug> AttributedText<T, Attr> {
    /// Create an `AttributedText` with no attributes applied.
    pub fn new(text: T) -> Self {
        Self {
            text,
            attributes: Vec::new(),
        }
    }

    /// Borrow the underlying text storage.
    pub fn text(&self) -> &T {
        &self.text
    }

    /// Returns the length of the underlying text, in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Returns `true` if the underlying text is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Borrow the underlying text as `&str` when the storage is contiguous.
    pub fn as_str(&self) -> &str
    where
        T: AsRef<str>,
    {
        self.text.as_ref()
    }

    /// Apply an `attribute` to a validated `range` within the text.
    pub fn apply_attribute(&mut self, range: TextRange, attribute: Attr) {
        debug_assert!(
            range.end() <= self.text.len(),
            "TextRange {range:?} was validated against a different text"
        );
        self.attributes.push((range, attribute));
    }

    /// Validate `range` against the text, then apply `attribute` to it.
    pub fn try_apply_attribute(
        &mut self,
        range: Range<usize>,
        attribute: Attr,
    ) -> Result<(), Error> {
        let range = TextRange::new(&self.text, range)?;
        self.attributes.push((range, attribute));
        Ok(())
    }

    /// Iterate over all attributes and the ranges they apply to.
    ///
    /// Attributes are yielded in the order they were applied.
    pub fn attributes_iter(&self) -> impl ExactSizeIterator<Item = (TextRange, &Attr)> + Clone {
        self.attributes.iter().map(|(range, attr)| (*range, attr))
    }

    /// The attribute applied `index`-th, with its range.
    pub fn attribute(&self, index: usize) -> Option<(TextRange, &Attr)> {
        self.attributes.get(index).map(|(range, attr)| (*range, attr))
    }

    /// Get an iterator over the attributes that cover the byte at `index`, with their ranges.
    pub fn attributes_at(&self, index: usize) -> impl Iterator<Item = (TextRange, &Attr)> {
        self.attributes_iter()
            .filter(move |(range, _)| range.contains(index))
    }

    /// Get an iterator over the attributes that intersect the given `range`.
    pub fn attributes_for_range(
        &self,
        range: Range<usize>,
    ) -> impl Iterator<Item = (TextRange, &Attr)> {
        self.attributes_iter()
            .filter(move |(span, _)| span.start() < range.end && span.end() > range.start)
    }

    /// Returns the number of attribute spans applied to the text.
    pub fn attributes_len(&self) -> usize {
        self.attributes.len()
    }

    /// Remove all applied attribute spans.
    pub fn clear_attributes(&mut self) {
        self.attributes.clear();
    }

    /// Split the text into non-overlapping segments, see [`AttributeSegments`].
    pub fn segments(&self) -> AttributeSegments<'_, T, Attr> {
        AttributeSegments::new(self)
    }
}

#[cfg(test)]
mod tests {
    use crate::{AttributedText, Error, TextRange};
    use alloc::vec::Vec;

    #[derive(Debug, PartialEq)]
    enum TestAttribute {
        Keep,
        Remove,
    }

    #[test]
    fn attributes_at() {
        let t = "Hello!";
        let mut at = AttributedText::new(t);

        at.try_apply_attribute(1..3, TestAttribute::Keep).unwrap();
        at.try_apply_attribute(2..5, TestAttribute::Remove).unwrap();

        assert!(at.attributes_at(0).next().is_none());
        let at_two: Vec<_> = at.attributes_at(2).map(|(_, a)| a).collect();
        assert_eq!(at_two, [&TestAttribute::Keep, &TestAttribute::Remove]);
        let (range, _) = at.attributes_at(4).next().unwrap();
        assert_eq!(range.as_range(), 2..5);
    }

    #[test]
    fn attributes_for_range_uses_half_open_intervals() {
        let mut at = AttributedText::new("Hello!");
        at.apply_attribute(TextRange::new(at.text(), 0..2).unwrap(), TestAttribute::Keep);
        at.apply_attribute(TextRange::new(at.text(), 4..6).unwrap(), TestAttribute::Remove);

        assert_eq!(at.attributes_for_range(2..4).count(), 0);
        assert_eq!(at.attributes_for_range(1..5).count(), 2);
        assert_eq!(at.attributes_len(), 2);
        at.clear_attributes();
        assert_eq!(at.attributes_len(), 0);
    }

    #[test]
    fn bad_range_for_try_apply_attribute() {
        let mut at = AttributedText::new("Hello!");

        assert!(at.try_apply_attribute(0..6, TestAttribute::Keep).is_ok());
        assert!(matches!(
            at.try_apply_attribute(0..7, TestAttribute::Keep),
            Err(Error::InvalidBounds { len: 6, .. })
        ));
        assert!(matches!(
            at.try_apply_attribute(7..8, TestAttribute::Keep),
            Err(Error::InvalidBounds { start: 7, end: 8, len: 6 })
        ));
        assert_eq!(at.attributes_len(), 1);
    }
}
