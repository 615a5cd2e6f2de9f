// Copyright 2025 the Weft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use peniko::kurbo::Rect;

use super::utils::{line_texts, TestEnv};
use crate::{Attribute, LineBreakMode, RunKind, StyledText, TruncationSpec};

#[test]
fn single_line_ends_with_token() {
    let mut env = TestEnv::new("one\ntwo\nthree").width(1000.0).max_lines(1);
    let result = env.layout();
    assert_eq!(result.line_count(), 1);
    assert!(result.is_truncated());
    let texts = line_texts(&result);
    assert!(texts[0].ends_with('\u{2026}'));
    assert_eq!(texts[0], "one\u{2026}");
    assert_eq!(result.truncated_range(), Some(3..13));
    assert!(result.lines()[0].has_truncation_token());
}

#[test]
fn tail_prefers_word_boundaries() {
    let mut env = TestEnv::new("one two three")
        .width(50.0)
        .max_lines(1)
        .mode(LineBreakMode::TruncateTail);
    let result = env.layout();
    assert_eq!(line_texts(&result), ["one two\u{2026}"]);
    assert_eq!(result.truncated_range(), Some(7..13));
    assert_eq!(result.lines()[0].text_range(), 0..7);
}

#[test]
fn tail_cuts_inside_a_word_without_boundary() {
    let mut env = TestEnv::new("abcdefghij").width(25.0).max_lines(1);
    let result = env.layout();
    assert_eq!(line_texts(&result), ["abcd\u{2026}"]);
    assert_eq!(result.truncated_range(), Some(4..10));
}

#[test]
fn head_keeps_the_end() {
    let mut env = TestEnv::new("abcdefghij")
        .width(25.0)
        .max_lines(1)
        .mode(LineBreakMode::TruncateHead);
    let result = env.layout();
    assert_eq!(line_texts(&result), ["\u{2026}ghij"]);
    assert_eq!(result.truncated_range(), Some(0..6));
    assert_eq!(result.lines()[0].text_range(), 6..10);
}

#[test]
fn middle_keeps_both_ends() {
    let mut env = TestEnv::new("abcdefghij")
        .width(25.0)
        .max_lines(1)
        .mode(LineBreakMode::TruncateMiddle);
    let result = env.layout();
    assert_eq!(line_texts(&result), ["ab\u{2026}ij"]);
    assert_eq!(result.truncated_range(), Some(2..8));
}

#[test]
fn head_keeps_only_the_last_paragraph() {
    let mut env = TestEnv::new("a\nb\nc")
        .width(1000.0)
        .max_lines(1)
        .mode(LineBreakMode::TruncateHead);
    let result = env.layout();
    assert!(result.is_truncated());
    assert_eq!(line_texts(&result), ["\u{2026}c"]);
    assert_eq!(result.truncated_range(), Some(0..4));
}

#[test]
fn middle_stops_at_paragraph_ends() {
    let mut env = TestEnv::new("a\nb\nc")
        .width(1000.0)
        .max_lines(1)
        .mode(LineBreakMode::TruncateMiddle);
    let result = env.layout();
    assert!(result.is_truncated());
    assert_eq!(line_texts(&result), ["a\u{2026}c"]);
    assert_eq!(result.truncated_range(), Some(1..4));
}

#[test]
fn tail_token_moves_to_the_next_segment() {
    let mut env = TestEnv::new("abcdefgh ijklmnop qrstuvwxyz")
        .width(100.0)
        .max_lines(1)
        .exclude(Rect::new(40.0, 0.0, 60.0, 10.0));
    let result = env.layout();
    assert_eq!(line_texts(&result), ["abcdefgh\u{2026}"]);
    assert_eq!(result.truncated_range(), Some(8..28));
    assert_eq!(result.truncation_token_rects()[0].x0, 60.0);
}

#[test]
fn clip_drops_text_without_token() {
    let mut env = TestEnv::new("a\nb\nc")
        .width(100.0)
        .max_lines(2)
        .mode(LineBreakMode::Clip);
    let result = env.layout();
    assert_eq!(line_texts(&result), ["a", "b"]);
    assert!(result.is_truncated());
    assert_eq!(result.truncated_range(), Some(4..5));
    assert_eq!(result.truncation_token(), None);
    assert!(result.truncation_token_rects().is_empty());
}

#[test]
fn text_that_fits_is_not_truncated() {
    let mut env = TestEnv::new("ab\ncd").width(100.0).max_lines(2);
    let result = env.layout();
    assert!(!result.is_truncated());
    assert_eq!(result.truncated_range(), None);
    assert_eq!(result.truncation_token(), None);
}

#[test]
fn message_follows_token() {
    let mut env = TestEnv::new("one\ntwo").width(1000.0).max_lines(1);
    env.block.set_truncation(TruncationSpec {
        additional_message: Some(StyledText::new("more")),
        ..TruncationSpec::default()
    });
    let result = env.layout();
    assert_eq!(result.truncation_token(), Some("\u{2026} more"));
    assert_eq!(line_texts(&result), ["one\u{2026} more"]);
}

#[test]
fn token_inherits_style_of_last_character() {
    let text = StyledText::new("one\ntwo").with(0..7, Attribute::Brush(7));
    let mut env = TestEnv::new(text).width(1000.0).max_lines(1);
    let result = env.layout();
    let run = result.lines()[0]
        .runs()
        .iter()
        .find(|run| run.kind() == RunKind::TruncationToken)
        .unwrap();
    let style = &result.styles()[run.style_index()];
    assert_eq!(style.brush, 7);
    assert!(style.truncation_token);
}

#[test]
fn token_moves_up_when_last_line_is_too_narrow() {
    // The second line only has 10px beside the exclusion.
    let mut env = TestEnv::new("ab\ncd\nef")
        .width(50.0)
        .max_lines(2)
        .token("[more]")
        .exclude(Rect::new(0.0, 10.0, 40.0, 20.0));
    let result = env.layout();
    assert_eq!(line_texts(&result), ["ab[more]"]);
    assert_eq!(result.truncated_range(), Some(2..8));
}

#[test]
fn first_line_keeps_token_that_overflows() {
    let mut env = TestEnv::new("ab\ncd")
        .width(25.0)
        .max_lines(1)
        .token("[more]");
    let result = env.layout();
    assert_eq!(line_texts(&result), ["[more]"]);
    assert_eq!(result.truncated_range(), Some(0..5));
    assert_eq!(result.lines()[0].text_range(), 0..0);
}
