// Copyright 2025 the Weft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rich text layout with exclusion regions, truncation tokens and geometry queries.
//!
//! Weft takes [`StyledText`], [`Constraints`] and a [`TruncationSpec`], breaks the text into
//! [`LineBox`]es that flow around exclusion paths, truncates the last visible line with a
//! token when the text does not fit, and answers geometric questions about the result:
//! rectangles for a text range, highlight rectangles, the trailing rectangle and which link
//! (if any) lies under a point.
//!
//! Font shaping is not part of this crate. Layout talks to a [`Shaper`], which turns a run of
//! characters in one font into clusters with advances. [`FixedPitchShaper`] is a
//! deterministic implementation suitable for size probing and tests.
//!
//! The stateful entry point is [`TextBlock`], which owns the inputs, caches the last
//! [`LayoutResult`] and recomputes it lazily on the first query after an input changed.
//! The pure entry point is [`layout()`].
//!
//! ```
//! use weft::kurbo::Size;
//! use weft::{Attribute, Constraints, FixedPitchShaper, LinkHit, StyledText, TextBlock};
//!
//! let mut text = StyledText::<[u8; 4]>::new("Hello, world!");
//! text.apply(7..12, Attribute::Link("https://example.com".into()));
//!
//! let mut block = TextBlock::new(FixedPitchShaper::default());
//! block.set_text(text);
//! block.set_constraints(Constraints {
//!     max_size: Size::new(1000.0, 1000.0),
//!     ..Constraints::default()
//! });
//!
//! assert_eq!(block.line_count(), 1);
//! assert!(!block.is_truncated());
//!
//! let rect = block.rects_for_range(9..10).unwrap()[0];
//! match block.link_at_point(rect.center()) {
//!     Some(LinkHit::Link { value, range, .. }) => {
//!         assert_eq!(&*value, "https://example.com");
//!         assert_eq!(range, 7..12);
//!     }
//!     other => panic!("expected a link, got {other:?}"),
//! }
//! ```

// LINEBENDER LINT SET - lib.rs - v3
// See https://linebender.org/wiki/canonical-lints/
// These lints shouldn't apply to examples or tests.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
// These lints shouldn't apply to examples.
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
// END LINEBENDER LINT SET
#![cfg_attr(docsrs, feature(doc_cfg))]

pub use peniko::kurbo;

mod block;
mod error;
mod exclusion;
mod highlight;
mod links;
mod options;
mod query;
mod text;

pub mod layout;
pub mod shape;
pub mod style;

#[cfg(test)]
mod tests;

pub use block::{CompletedLayout, LayoutRequest, TextBlock};
pub use error::RangeError;
pub use exclusion::Segment;
pub use highlight::{HighlightState, HighlightStyle};
pub use layout::{
    layout, BreakReason, GlyphRun, LayoutKey, LayoutResult, LineBox, LineMetrics, PlacedCluster,
    RunKind,
};
pub use links::{LinkHit, LinkIndex, LinkSpan};
pub use options::{Constraints, LayoutOptions, LineBreakMode, Shadow, TruncationSpec};
pub use query::Hit;
pub use shape::{FixedPitchShaper, Glyph, RunMetrics, ShapeError, ShapedCluster, ShapedRun, Shaper};
pub use style::{Attachment, Attribute, AttributeKind, Brush, FontAttr, LineHeight, Style};
pub use text::StyledText;
