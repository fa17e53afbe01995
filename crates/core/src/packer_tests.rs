// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn starts_filling_box_one() {
    let packer = BoxPacker::new(3);
    assert_eq!(packer.box_number(), 1);
    assert_eq!(packer.count(), 0);
}

#[test]
fn assigns_to_current_box() {
    let mut packer = BoxPacker::new(3);
    let (assigned, events) = packer.accept("aaa");
    assert_eq!(assigned, 1);
    assert!(events.is_empty());
    assert_eq!(packer.count(), 1);
}

#[test]
fn rolls_over_at_capacity() {
    let mut packer = BoxPacker::new(3);
    packer.accept("aaa");
    packer.accept("bbb");
    let (assigned, events) = packer.accept("ccc");

    assert_eq!(assigned, 1);
    assert_eq!(events, vec![PackEvent::BoxFull { box_number: 1 }]);
    assert_eq!(packer.box_number(), 2);
    assert_eq!(packer.count(), 0);
}

#[test]
fn ceil_assignment_over_many_boxes() {
    let capacity = 4u32;
    let mut packer = BoxPacker::new(capacity);
    for i in 1..=13u32 {
        let (assigned, _) = packer.accept(format!("code-{i}"));
        let expected = i.div_ceil(capacity);
        assert_eq!(assigned, expected, "item {i}");
    }
    assert_eq!(packer.box_number(), 4);
    assert_eq!(packer.count(), 1);
}

#[test]
fn capacity_one_rolls_every_accept() {
    let mut packer = BoxPacker::new(1);
    let (assigned, events) = packer.accept("aaa");
    assert_eq!(assigned, 1);
    assert_eq!(events.len(), 1);
    let (assigned, _) = packer.accept("bbb");
    assert_eq!(assigned, 2);
}

#[test]
fn restore_partial_box() {
    let packer = BoxPacker::restore(5, vec!["aaa".into(), "bbb".into()], 3);
    assert_eq!(packer.box_number(), 5);
    assert_eq!(packer.count(), 2);
    assert_eq!(packer.codes(), ["aaa", "bbb"]);
}

#[test]
fn restored_box_rolls_over_on_fill() {
    let mut packer = BoxPacker::restore(5, vec!["aaa".into(), "bbb".into()], 3);
    let (assigned, events) = packer.accept("ccc");
    assert_eq!(assigned, 5);
    assert_eq!(events, vec![PackEvent::BoxFull { box_number: 5 }]);
    assert_eq!(packer.box_number(), 6);
}
