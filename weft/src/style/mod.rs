// Copyright 2025 the Weft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Attributes that can be applied to ranges of [`StyledText`](crate::StyledText).

mod brush;
mod font;

use std::sync::Arc;

pub use brush::Brush;
pub use font::{FontAttr, LineHeight, DEFAULT_FONT_SIZE};

/// Name of the attribute carried by [`Attribute::Link`].
pub const LINK_ATTRIBUTE: &str = "link";

/// An inline object that occupies space in a line but has no glyphs.
///
/// The whole range it is applied to becomes a single unbreakable cluster, `width` wide,
/// that rises `height` above the baseline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Attachment {
    /// Caller-chosen identifier.
    pub id: u64,
    /// Advance of the attachment, in logical pixels.
    pub width: f32,
    /// Height above the baseline, in logical pixels.
    pub height: f32,
}

/// An attribute value applied to a range of text.
///
/// When several attributes of the same kind overlap, the one applied last wins.
#[derive(Clone, Debug, PartialEq)]
pub enum Attribute<B: Brush> {
    /// Font family and size.
    Font(FontAttr),
    /// Foreground color.
    Brush(B),
    /// A link target, reported by [`TextBlock::link_at_point`](crate::TextBlock::link_at_point)
    /// under the name [`LINK_ATTRIBUTE`].
    Link(Arc<str>),
    /// An inline attachment.
    Attachment(Attachment),
    /// An arbitrary named value. Can be configured as a link attribute.
    Named {
        /// Attribute name.
        name: Arc<str>,
        /// Attribute value.
        value: Arc<str>,
    },
    /// Marks text that belongs to a truncation token.
    TruncationToken,
}

/// The discriminant of an [`Attribute`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AttributeKind {
    /// [`Attribute::Font`].
    Font,
    /// [`Attribute::Brush`].
    Brush,
    /// [`Attribute::Link`].
    Link,
    /// [`Attribute::Attachment`].
    Attachment,
    /// [`Attribute::Named`].
    Named,
    /// [`Attribute::TruncationToken`].
    TruncationToken,
}

impl<B: Brush> Attribute<B> {
    /// Returns the kind of this attribute.
    pub fn kind(&self) -> AttributeKind {
        match self {
            Self::Font(_) => AttributeKind::Font,
            Self::Brush(_) => AttributeKind::Brush,
            Self::Link(_) => AttributeKind::Link,
            Self::Attachment(_) => AttributeKind::Attachment,
            Self::Named { .. } => AttributeKind::Named,
            Self::TruncationToken => AttributeKind::TruncationToken,
        }
    }

    /// Returns the name this attribute is looked up by.
    pub fn name(&self) -> &str {
        match self {
            Self::Font(_) => "font",
            Self::Brush(_) => "color",
            Self::Link(_) => LINK_ATTRIBUTE,
            Self::Attachment(_) => "attachment",
            Self::Named { name, .. } => &**name,
            Self::TruncationToken => "truncation-token",
        }
    }

    /// Returns the string value for link-like attributes.
    pub fn value(&self) -> Option<&Arc<str>> {
        match self {
            Self::Link(value) | Self::Named { value, .. } => Some(value),
            _ => None,
        }
    }
}

/// The style of a run of text after all attributes covering it have been applied.
#[derive(Clone, Debug, PartialEq)]
pub struct Style<B: Brush> {
    /// Resolved font.
    pub font: FontAttr,
    /// Resolved foreground color.
    pub brush: B,
    /// The attachment covering the run, if any.
    pub attachment: Option<Attachment>,
    /// Whether the run belongs to a truncation token.
    pub truncation_token: bool,
}

impl<B: Brush> Style<B> {
    /// A style with the given base font and the default brush.
    pub fn new(font: FontAttr) -> Self {
        Self {
            font,
            brush: B::default(),
            attachment: None,
            truncation_token: false,
        }
    }

    pub(crate) fn apply(&mut self, attribute: &Attribute<B>) {
        match attribute {
            Attribute::Font(font) => self.font = font.clone(),
            Attribute::Brush(brush) => self.brush = brush.clone(),
            Attribute::Attachment(attachment) => self.attachment = Some(*attachment),
            Attribute::TruncationToken => self.truncation_token = true,
            Attribute::Link(_) | Attribute::Named { .. } => {}
        }
    }
}

impl<B: Brush> Default for Style<B> {
    fn default() -> Self {
        Self::new(FontAttr::default())
    }
}

#[cfg(test)]
mod tests {
    use super::{Attribute, AttributeKind, FontAttr, Style};

    #[test]
    fn later_attributes_override_earlier_ones() {
        let mut style = Style::<u32>::default();
        style.apply(&Attribute::Brush(1));
        style.apply(&Attribute::Font(FontAttr::sized(12.0)));
        style.apply(&Attribute::Brush(2));
        style.apply(&Attribute::Link("https://example.com".into()));
        assert_eq!(style.brush, 2);
        assert_eq!(style.font.size, 12.0);
        assert!(!style.truncation_token);
    }

    #[test]
    fn names_and_values() {
        let named = Attribute::<u32>::Named {
            name: "mention".into(),
            value: "@weft".into(),
        };
        assert_eq!(named.kind(), AttributeKind::Named);
        assert_eq!(named.name(), "mention");
        assert_eq!(named.value().map(|v| &**v), Some("@weft"));
        assert_eq!(Attribute::<u32>::Link("x".into()).name(), "link");
        assert_eq!(Attribute::<u32>::Brush(3).value(), None);
    }
}
