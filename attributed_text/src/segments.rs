// Copyright 2025 the Weft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Attribute-based segmentation for [`AttributedText`].
//!
//! Given an [`AttributedText`] with overlapping attribute spans, this module produces
//! non-overlapping, contiguous segments and the spans active over each of them.

use alloc::vec::Vec;
use core::fmt::Debug;
use core::ops::Range;

use crate::{AttributedText, TextRange, TextStorage};

/// Iterator over contiguous attribute segments produced from an [`AttributedText`].
///
/// Each yielded item is a non-empty, non-overlapping byte range together with the spans that
/// cover it. Segments tile the whole text, including stretches without any attribute.
///
/// # Examples
///
/// ```
/// use attributed_text::{AttributedText, TextRange};
///
/// #[derive(Debug, PartialEq, Eq)]
/// enum Color {
///     Red,
///     Blue,
/// }
///
/// let mut text = AttributedText::new("hello");
/// text.apply_attribute(TextRange::new(text.text(), 0..2).unwrap(), Color::Red);
/// text.apply_attribute(TextRange::new(text.text(), 1..5).unwrap(), Color::Blue);
///
/// let segments: Vec<_> = text
///     .segments()
///     .map(|(range, active)| (range, active.iter().map(|(_, c)| c).collect::<Vec<_>>()))
///     .collect();
/// assert_eq!(segments[0], (0..1, vec![&Color::Red]));
/// assert_eq!(segments[1], (1..2, vec![&Color::Red, &Color::Blue]));
/// assert_eq!(segments[2], (2..5, vec![&Color::Blue]));
/// ```
///
/// Zero-length attribute ranges are never active, but their boundaries still split segments.
#[derive(Debug)]
pub struct AttributeSegments<'a, T: Debug + TextStorage, Attr: Debug> {
    attributed: &'a AttributedText<T, Attr>,
    boundaries: Vec<usize>,
    /// Attribute indices ordered by range start.
    by_start: Vec<usize>,
    next_start: usize,
    /// Indices of spans covering the current boundary, in application order.
    active: Vec<usize>,
    index: usize,
}

impl<'a, T: Debug + TextStorage, Attr: Debug> AttributeSegments<'a, T, Attr> {
    pub(crate) fn new(attributed: &'a AttributedText<T, Attr>) -> Self {
        let len = attributed.len();
        let mut boundaries = Vec::with_capacity(2 + attributed.attributes_len() * 2);
        boundaries.push(0);
        boundaries.push(len);
        for (range, _) in attributed.attributes_iter() {
            boundaries.push(range.start());
            boundaries.push(range.end());
        }
        boundaries.sort_unstable();
        boundaries.dedup();

        let mut by_start: Vec<usize> = (0..attributed.attributes_len())
            .filter(|&ix| !range_of(attributed, ix).is_empty())
            .collect();
        by_start.sort_by_key(|&ix| range_of(attributed, ix).start());

        Self {
            attributed,
            boundaries,
            by_start,
            next_start: 0,
            active: Vec::new(),
            index: 0,
        }
    }
}

fn range_of<T: Debug + TextStorage, Attr: Debug>(
    attributed: &AttributedText<T, Attr>,
    index: usize,
) -> TextRange {
    attributed
        .attribute(index)
        .map(|(range, _)| range)
        .unwrap_or(TextRange::new_unchecked(0, 0))
}

impl<'a, T: Debug + TextStorage, Attr: Debug> Iterator for AttributeSegments<'a, T, Attr> {
    type Item = (Range<usize>, ActiveSpans<'a, T, Attr>);

    fn next(&mut self) -> Option<Self::Item> {
        let start = *self.boundaries.get(self.index)?;
        let end = *self.boundaries.get(self.index + 1)?;
        self.index += 1;

        let attributed = self.attributed;
        self.active
            .retain(|&ix| range_of(attributed, ix).end() > start);
        while let Some(&ix) = self.by_start.get(self.next_start) {
            if range_of(attributed, ix).start() > start {
                break;
            }
            let at = self.active.partition_point(|&active| active < ix);
            self.active.insert(at, ix);
            self.next_start += 1;
        }

        Some((
            start..end,
            ActiveSpans {
                attributed,
                indices: self.active.clone(),
            },
        ))
    }
}

/// The spans active over one segment, in the order they were applied.
#[derive(Clone, Debug)]
pub struct ActiveSpans<'a, T: Debug + TextStorage, Attr: Debug> {
    attributed: &'a AttributedText<T, Attr>,
    indices: Vec<usize>,
}

impl<'a, T: Debug + TextStorage, Attr: Debug> ActiveSpans<'a, T, Attr> {
    /// Number of active spans.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Returns `true` if no span covers the segment.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Iterate over the active spans and their full ranges, oldest first.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (TextRange, &'a Attr)> + '_ {
        let attributed = self.attributed;
        self.indices
            .iter()
            .filter_map(move |&ix| attributed.attribute(ix))
    }
}
