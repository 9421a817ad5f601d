// fewlot-core - Printer integration tests
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Integration tests for the canonical printer.
//!
//! Tests for: datum labels over shared tails and cycles, label ordinal
//! assignment, and determinism of repeated renders.

mod common;

use common::*;

#[test]
fn test_shared_tail_labels() {
    let shared = int_list(&[2, 3]);
    let root = Value::Few(Few::new(vec![
        Value::Lot(Lot::pair(Value::Int(1), Value::Lot(shared.clone()))),
        Value::Lot(Lot::pair(Value::Int(9), Value::Lot(shared))),
    ]));
    assert_eq!(text(&root), "#((1 . #0=(2 3)) (9 . #0#))");
}

#[test]
fn test_cycle_away_from_root() {
    let inner = Lot::pair(Value::Int(2), Value::Lot(Lot::Empty));
    inner.set_tail(Value::Lot(inner.clone())).unwrap();
    let root = Value::Lot(Lot::pair(Value::Int(1), Value::Lot(inner)));

    assert_eq!(text(&root), "(1 . #0=(2 . #0#))");
    unlink_all(&root);
}

#[test]
fn test_few_holding_itself() {
    let few = Few::with_len(1);
    few.set(0, Value::Few(few.clone())).unwrap();
    let root = Value::Few(few);

    assert_eq!(text(&root), "#0=#(#0#)");
    unlink_all(&root);
}

#[test]
fn test_labels_count_up_in_first_visit_order() {
    let x = Few::new(vec![Value::Int(1)]);
    let y = Few::new(vec![Value::Int(2)]);
    let root = Value::Few(Few::new(vec![
        Value::Few(x.clone()),
        Value::Few(y.clone()),
        Value::Few(x),
        Value::Few(y),
    ]));
    assert_eq!(text(&root), "#(#0=#(1) #1=#(2) #0# #1#)");
}

#[test]
fn test_shared_node_in_head_and_tail_position() {
    // the same pair is both an element and a tail
    let shared = int_list(&[7]);
    let root = Value::Lot(Lot::pair(Value::Lot(shared.clone()), Value::Lot(shared)));
    assert_eq!(text(&root), "(#0=(7) . #0#)");
}

#[test]
fn test_repeated_renders_are_identical() {
    let v = Value::Lot(cyclic_list(&[1, 2, 3]));
    let first = text(&v);
    assert_eq!(first, "#0=(1 2 3 . #0#)");
    assert_eq!(text(&v), first);
    unlink_all(&v);
}

#[test]
fn test_unshared_text_never_labelled() {
    let t = Value::text("x");
    let v = Value::Few(Few::new(vec![t.clone(), t]));
    assert_eq!(text(&v), "#(\"x\" \"x\")");
}
