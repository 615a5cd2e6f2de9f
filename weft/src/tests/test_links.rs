// Copyright 2025 the Weft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::sync::Arc;

use peniko::kurbo::Point;

use super::utils::TestEnv;
use crate::{Attribute, LinkHit, StyledText, TruncationSpec};

fn linked() -> StyledText<u32> {
    StyledText::new("Hello, world!").with(7..12, Attribute::Link("https://example.com".into()))
}

#[test]
fn tap_on_link_reports_value_and_range() {
    let mut env = TestEnv::new(linked()).width(1000.0);
    let rects = env.block.rects_for_range(9..10).unwrap();
    assert_eq!(rects.len(), 1);
    let hit = env.block.link_at_point(rects[0].center());
    assert_eq!(
        hit,
        Some(LinkHit::Link {
            name: "link".into(),
            value: "https://example.com".into(),
            range: 7..12,
        })
    );
    assert_eq!(env.block.link_at_point(Point::new(2.0, 5.0)), None);
}

#[test]
fn link_survives_wrapping() {
    let mut env = TestEnv::new(linked()).width(40.0);
    // "world" starts the second line.
    let hit = env.block.link_at_point(Point::new(12.0, 15.0));
    assert!(matches!(hit, Some(LinkHit::Link { range, .. }) if range == (7..12)));
}

#[test]
fn custom_attribute_names() {
    let text = StyledText::new("@user says hi")
        .with(
            0..5,
            Attribute::Named {
                name: "mention".into(),
                value: "user".into(),
            },
        )
        .with(11..13, Attribute::Link("greeting".into()));
    let mut env = TestEnv::new(text).width(1000.0);
    assert!(env.block.link_at_point(Point::new(2.0, 5.0)).is_none());

    env.block.set_link_attribute_names(vec![Arc::from("mention")]);
    let hit = env.block.link_at_point(Point::new(2.0, 5.0));
    assert!(matches!(hit, Some(LinkHit::Link { name, .. }) if &*name == "mention"));
    // "link" is no longer recognized.
    assert!(env.block.link_at_point(Point::new(57.0, 5.0)).is_none());
}

#[test]
fn token_taps_need_opt_in() {
    let mut env = TestEnv::new("one\ntwo").width(1000.0).max_lines(1);
    let on_token = Point::new(17.0, 5.0);
    assert_eq!(env.block.link_at_point(on_token), None);

    env.block.set_truncation(TruncationSpec {
        always_handle_tap: true,
        ..TruncationSpec::default()
    });
    assert_eq!(
        env.block.link_at_point(on_token),
        Some(LinkHit::TruncationToken)
    );
}

#[test]
fn links_follow_text_changes() {
    let mut env = TestEnv::new(linked()).width(1000.0);
    assert_eq!(env.block.links().spans().len(), 1);

    env.block
        .set_text(StyledText::new("docs").with(0..4, Attribute::Link("manual".into())));
    let hit = env.block.link_at_point(Point::new(2.0, 5.0));
    assert!(matches!(hit, Some(LinkHit::Link { value, .. }) if &*value == "manual"));
    assert_eq!(env.block.links().spans()[0].range, 0..4);
}
