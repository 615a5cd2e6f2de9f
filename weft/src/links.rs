// Copyright 2025 the Weft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lookup of link attributes by text position.

use core::ops::Range;
use std::sync::Arc;

use crate::style::Brush;
use crate::StyledText;

/// A maximal range over which a link attribute has the same value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinkSpan {
    /// Name of the attribute.
    pub name: Arc<str>,
    /// Value of the attribute.
    pub value: Arc<str>,
    /// Range the value covers.
    pub range: Range<usize>,
}

/// What a tap at a point resolved to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LinkHit {
    /// A link attribute covers the tapped cluster.
    Link {
        /// Name of the attribute.
        name: Arc<str>,
        /// Value of the attribute.
        value: Arc<str>,
        /// The full range the value covers.
        range: Range<usize>,
    },
    /// The truncation token was tapped and taps on it are reported.
    TruncationToken,
}

impl From<&LinkSpan> for LinkHit {
    fn from(span: &LinkSpan) -> Self {
        Self::Link {
            name: span.name.clone(),
            value: span.value.clone(),
            range: span.range.clone(),
        }
    }
}

/// Link spans of a text for a prioritized list of attribute names.
///
/// Where several named attributes cover a position, the one whose name comes first wins.
/// Where several values of one name overlap, the one applied last wins.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LinkIndex {
    /// Grouped by name, in priority order, then sorted by start.
    spans: Vec<LinkSpan>,
    /// The range of `spans` holding each name's spans, in priority order.
    groups: Vec<Range<usize>>,
}

impl LinkIndex {
    /// Index the attributes of `text` named in `names`.
    pub fn build<B: Brush>(text: &StyledText<B>, names: &[Arc<str>]) -> Self {
        let mut spans = Vec::new();
        let mut groups = Vec::with_capacity(names.len());
        for name in names {
            let group_start = spans.len();
            let mut current: Option<LinkSpan> = None;
            for (range, active) in text.segments() {
                let value = active
                    .iter()
                    .rev()
                    .filter(|(_, attr)| attr.name() == &**name)
                    .find_map(|(_, attr)| attr.value().cloned());
                match (value, &mut current) {
                    (Some(value), Some(span))
                        if span.value == value && span.range.end == range.start =>
                    {
                        span.range.end = range.end;
                    }
                    (Some(value), _) => {
                        spans.extend(current.take());
                        current = Some(LinkSpan {
                            name: name.clone(),
                            value,
                            range,
                        });
                    }
                    (None, _) => spans.extend(current.take()),
                }
            }
            spans.extend(current.take());
            groups.push(group_start..spans.len());
        }
        Self { spans, groups }
    }

    /// All spans, grouped by name in priority order.
    pub fn spans(&self) -> &[LinkSpan] {
        &self.spans
    }

    /// Returns `true` if no link attribute was found.
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// The highest priority span covering the byte at `index`.
    pub fn link_at(&self, index: usize) -> Option<&LinkSpan> {
        self.groups.iter().find_map(|group| {
            // Spans of one name are disjoint and sorted, so their ends are sorted too.
            let group = &self.spans[group.clone()];
            let ix = group.partition_point(|span| span.range.end <= index);
            group.get(ix).filter(|span| span.range.contains(&index))
        })
    }
}
