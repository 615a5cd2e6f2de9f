// Copyright 2025 the Weft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::ops::Range;

/// A character range argument did not describe a slice of the current text.
///
/// Query APIs never clamp their range arguments; callers are expected to validate ranges
/// against the current text length first.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RangeError {
    /// `start > end`.
    #[error("range {}..{} is reversed", .range.start, .range.end)]
    Reversed {
        /// The rejected range.
        range: Range<usize>,
    },
    /// The range extends past the end of the text.
    #[error("range {}..{} is out of bounds for text of length {len}", .range.start, .range.end)]
    OutOfBounds {
        /// The rejected range.
        range: Range<usize>,
        /// The length of the text, in bytes.
        len: usize,
    },
    /// One of the endpoints splits a UTF-8 encoded character.
    #[error("range {}..{} does not fall on character boundaries", .range.start, .range.end)]
    NotOnCharBoundary {
        /// The rejected range.
        range: Range<usize>,
    },
}

impl RangeError {
    /// The range that was rejected.
    pub fn range(&self) -> Range<usize> {
        match self {
            Self::Reversed { range }
            | Self::OutOfBounds { range, .. }
            | Self::NotOnCharBoundary { range } => range.clone(),
        }
    }
}

impl From<attributed_text::Error> for RangeError {
    fn from(err: attributed_text::Error) -> Self {
        let range = err.range();
        match err {
            attributed_text::Error::InvalidRange { .. } => Self::Reversed { range },
            attributed_text::Error::InvalidBounds { len, .. } => Self::OutOfBounds { range, len },
            _ => Self::NotOnCharBoundary { range },
        }
    }
}
