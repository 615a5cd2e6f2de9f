// Copyright 2025 the Weft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use peniko::kurbo::{Insets, Size};

use super::utils::{line_texts, TestEnv, FONT_SIZE};
use crate::{
    layout, Attachment, Attribute, BreakReason, Constraints, FixedPitchShaper, FontAttr,
    LayoutOptions, LineBreakMode, LineHeight, StyledText, TruncationSpec,
};

#[test]
fn short_text_fits_on_one_line() {
    let mut env = TestEnv::new("Hello, world!").width(1000.0);
    let result = env.layout();
    assert!(!result.is_truncated());
    assert_eq!(result.line_count(), 1);
    assert_eq!(result.size(), Size::new(65.0, 10.0));
    assert_eq!(result.lines()[0].break_reason(), BreakReason::None);
}

#[test]
fn wraps_at_break_opportunities() {
    let mut env = TestEnv::new("Hello, world!").width(40.0);
    let result = env.layout();
    assert_eq!(line_texts(&result), ["Hello, ", "world!"]);

    let lines = result.lines();
    assert_eq!(lines[0].text_range(), 0..7);
    assert_eq!(lines[1].text_range(), 7..13);
    assert_eq!(lines[0].break_reason(), BreakReason::Regular);
    assert_eq!(lines[1].break_reason(), BreakReason::None);
    assert_eq!(lines[0].metrics().trailing_whitespace, 5.0);
    assert_eq!(lines[0].width(), 30.0);

    let second = lines[1].metrics();
    assert_eq!(second.min_coord, 10.0);
    assert_eq!(second.baseline, 18.0);
    assert_eq!(second.max_coord, 20.0);
    assert_eq!(result.size(), Size::new(30.0, 20.0));
}

#[test]
fn newlines_end_lines() {
    let mut env = TestEnv::new("ab\ncd").width(1000.0);
    let result = env.layout();
    assert_eq!(line_texts(&result), ["ab", "cd"]);
    assert_eq!(result.lines()[0].text_range(), 0..3);
    assert_eq!(result.lines()[0].break_reason(), BreakReason::Explicit);
    assert_eq!(result.lines()[1].text_range(), 3..5);
}

#[test]
fn hanging_whitespace_keeps_the_newline() {
    let mut env = TestEnv::new("ab   \ncd").width(15.0);
    let result = env.layout();
    assert_eq!(line_texts(&result), ["ab ", "cd"]);
    assert_eq!(result.lines()[0].text_range(), 0..6);
    assert_eq!(result.lines()[0].break_reason(), BreakReason::Explicit);
    assert_eq!(result.lines()[1].text_range(), 6..8);

    let mut env = TestEnv::new("ab   \ncd").width(15.0).max_lines(2);
    let result = env.layout();
    assert!(!result.is_truncated());
    assert_eq!(line_texts(&result), ["ab ", "cd"]);
}

#[test]
fn long_words_break_anywhere() {
    let mut env = TestEnv::new("abcdefgh").width(20.0);
    let result = env.layout();
    assert_eq!(line_texts(&result), ["abcd", "efgh"]);
    assert_eq!(result.lines()[0].break_reason(), BreakReason::Emergency);
    assert!(!result.is_truncated());
}

#[test]
fn char_wrap_ignores_word_boundaries() {
    let mut env = TestEnv::new("ab cd")
        .width(20.0)
        .mode(LineBreakMode::CharWrap);
    let result = env.layout();
    assert_eq!(line_texts(&result), ["ab c", "d"]);
}

#[test]
fn absolute_line_height_splits_leading() {
    let mut env = TestEnv::new("ab\ncd")
        .width(1000.0)
        .options(|options| options.line_height = LineHeight::Absolute(20.0));
    let result = env.layout();
    let first = result.lines()[0].metrics();
    assert_eq!(first.line_height, 20.0);
    assert_eq!(first.leading, 10.0);
    assert_eq!(first.baseline, 13.0);
    assert_eq!(result.lines()[1].metrics().min_coord, 20.0);
    assert_eq!(result.size().height, 40.0);
}

#[test]
fn largest_run_sets_line_metrics() {
    let text = StyledText::new("ab").with(1..2, Attribute::Font(FontAttr::sized(20.0)));
    let mut env = TestEnv::new(text).width(1000.0);
    let result = env.layout();
    let line = &result.lines()[0];
    assert_eq!(line.runs().len(), 2);
    assert_eq!(line.metrics().baseline, 16.0);
    assert_eq!(line.metrics().max_coord, 20.0);
    assert_eq!(line.width(), 15.0);
}

#[test]
fn attachments_take_their_own_size() {
    let text = StyledText::new("a\u{fffc}b").with(
        1..4,
        Attribute::Attachment(Attachment {
            id: 1,
            width: 30.0,
            height: 24.0,
        }),
    );
    let mut env = TestEnv::new(text).width(1000.0);
    let result = env.layout();
    let metrics = result.lines()[0].metrics();
    assert_eq!(metrics.baseline, 24.0);
    assert_eq!(metrics.max_coord, 26.0);
    assert_eq!(result.size(), Size::new(40.0, 26.0));
}

#[test]
fn paddings_offset_the_text() {
    let mut env = TestEnv::new("Hello, world!")
        .options(|options| options.paddings = Insets::new(4.0, 3.0, 4.0, 3.0));
    let result = env.layout();
    let metrics = result.lines()[0].metrics();
    assert_eq!(metrics.offset, 4.0);
    assert_eq!(metrics.min_coord, 3.0);
    assert_eq!(result.paddings(), Insets::new(4.0, 3.0, 4.0, 3.0));
    assert_eq!(result.size(), Size::new(73.0, 16.0));
}

#[test]
fn height_limits_lines() {
    let mut env = TestEnv::new("a\nb\nc").size(100.0, 25.0);
    let result = env.layout();
    assert_eq!(line_texts(&result), ["a", "b\u{2026}"]);
    assert!(result.is_truncated());
    assert_eq!(result.truncated_range(), Some(3..5));
    assert_eq!(result.size().height, 20.0);
}

#[test]
fn degenerate_constraints_give_empty_layout() {
    let mut zero = TestEnv::new("Hello").size(0.0, 100.0);
    let result = zero.layout();
    assert_eq!(result.line_count(), 0);
    assert!(!result.is_truncated());
    assert_eq!(result.size(), Size::ZERO);

    let mut padded = TestEnv::new("Hello")
        .size(10.0, 100.0)
        .options(|options| options.paddings = Insets::uniform(6.0));
    assert_eq!(padded.layout().line_count(), 0);

    let mut empty = TestEnv::new("").width(100.0);
    assert_eq!(empty.layout().line_count(), 0);
}

#[test]
fn layout_is_idempotent() {
    let text = StyledText::<u32>::new("Hello, world! Some more text to wrap.")
        .with(0..5, Attribute::Font(FontAttr::sized(14.0)))
        .with(7..12, Attribute::Brush(3));
    let constraints = Constraints {
        max_size: Size::new(60.0, 1000.0),
        max_lines: 3,
        ..Constraints::default()
    };
    let options = LayoutOptions {
        default_font: FontAttr::sized(FONT_SIZE),
        ..LayoutOptions::default()
    };
    let truncation = TruncationSpec::default();
    let mut shaper = FixedPitchShaper::default();
    let first = layout(&text, &constraints, &truncation, &options, &mut shaper);
    let second = layout(&text, &constraints, &truncation, &options, &mut shaper);
    assert!(first.is_truncated());
    assert_eq!(first, second);
}

#[test]
fn more_lines_never_truncate_more() {
    let text = "one two three four";
    let mut natural = TestEnv::new(text).width(30.0);
    let natural_lines = natural.layout().line_count();
    assert_eq!(natural_lines, 4);

    let mut previous_count = 0;
    let mut previous_truncated = true;
    for max_lines in 1..=natural_lines {
        let mut env = TestEnv::new(text).width(30.0).max_lines(max_lines);
        let result = env.layout();
        assert!(result.line_count() >= previous_count);
        assert!(previous_truncated || !result.is_truncated());
        previous_count = result.line_count();
        previous_truncated = result.is_truncated();
    }
    assert!(!previous_truncated);
    assert_eq!(previous_count, natural_lines);
}
