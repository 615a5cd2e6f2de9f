// Copyright 2025 the Weft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;
use alloc::sync::Arc;

/// A block of text that will be wrapped by an [`AttributedText`].
///
/// [`AttributedText`]: crate::AttributedText
pub trait TextStorage {
    /// The length of the underlying text.
    fn len(&self) -> usize;

    /// Return `true` if the underlying text is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Return whether `index` is a UTF-8 character boundary in the text.
    fn is_char_boundary(&self, index: usize) -> bool;

    /// The largest character boundary that is `<= index`, clamped to the text length.
    fn floor_char_boundary(&self, index: usize) -> usize {
        let mut index = index.min(self.len());
        // A UTF-8 scalar is at most four bytes long, and 0 is always a boundary.
        while !self.is_char_boundary(index) {
            index -= 1;
        }
        index
    }
}

impl TextStorage for String {
    fn len(&self) -> usize {
        Self::len(self)
    }

    fn is_char_boundary(&self, index: usize) -> bool {
        self.as_str().is_char_boundary(index)
    }
}

impl TextStorage for &str {
    fn len(&self) -> usize {
        str::len(self)
    }

    fn is_char_boundary(&self, index: usize) -> bool {
        str::is_char_boundary(self, index)
    }
}

impl TextStorage for Arc<str> {
    fn len(&self) -> usize {
        str::len(self)
    }

    fn is_char_boundary(&self, index: usize) -> bool {
        str::is_char_boundary(self, index)
    }
}

#[cfg(test)]
mod tests {
    use super::TextStorage;
    use alloc::sync::Arc;

    #[test]
    fn floor_char_boundary_snaps_back() {
        // "é" is 2 bytes in UTF-8.
        let s = "éclair";
        assert_eq!(s.floor_char_boundary(1), 0);
        assert_eq!(s.floor_char_boundary(2), 2);
        assert_eq!(s.floor_char_boundary(100), s.len());

        let arc: Arc<str> = Arc::from("🇯🇵");
        assert_eq!(arc.floor_char_boundary(3), 0);
        assert_eq!(arc.floor_char_boundary(6), 4);
    }
}
