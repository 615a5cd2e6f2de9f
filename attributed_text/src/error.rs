// Copyright 2025 the Weft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Error returned when a byte range does not describe a valid slice of the text.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The provided range had `start > end`.
    #[error("invalid range {start}..{end}: start > end")]
    InvalidRange {
        /// The start byte index of the caller-provided range.
        start: usize,
        /// The end byte index (exclusive) of the caller-provided range.
        end: usize,
    },

    /// Provided range indices were out of bounds relative to the text length.
    #[error("range {start}..{end} out of bounds for len {len}")]
    InvalidBounds {
        /// The start byte index of the caller-provided range.
        start: usize,
        /// The end byte index (exclusive) of the caller-provided range.
        end: usize,
        /// The length in bytes of the underlying text.
        len: usize,
    },

    /// Either `start` or `end` was not aligned to a UTF-8 character boundary.
    #[error("range {start}..{end}: {which} index {index} not on UTF-8 boundary")]
    NotOnCharBoundary {
        /// The start byte index of the caller-provided range.
        start: usize,
        /// The end byte index (exclusive) of the caller-provided range.
        end: usize,
        /// Which endpoint failed validation.
        which: Endpoint,
        /// The offending byte index.
        index: usize,
    },
}

impl Error {
    /// The range that was rejected.
    pub fn range(&self) -> core::ops::Range<usize> {
        match *self {
            Self::InvalidRange { start, end }
            | Self::InvalidBounds { start, end, .. }
            | Self::NotOnCharBoundary { start, end, .. } => start..end,
        }
    }
}

/// Identifies which endpoint of a range failed boundary validation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Endpoint {
    /// The `start` endpoint of the range.
    Start,

    /// The `end` endpoint of the range.
    End,
}

impl core::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            Self::Start => "start",
            Self::End => "end",
        })
    }
}
