// fewlot-core - Structural equality integration tests
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Integration tests for deep structural equality.
//!
//! Tests for: sharing-pattern sensitivity, cycle periods, mixed container
//! shapes, and leaf semantics across the full value set.

mod common;

use common::*;

// =============================================================================
// Sharing-pattern sensitivity
// =============================================================================

#[test]
fn test_shared_tail_must_match() {
    // a: two chains sharing one tail node
    let tail_a = int_list(&[3]);
    let a = Value::Few(Few::new(vec![
        Value::Lot(Lot::pair(Value::Int(1), Value::Lot(tail_a.clone()))),
        Value::Lot(Lot::pair(Value::Int(2), Value::Lot(tail_a))),
    ]));

    // b: same unfolding, two distinct tail nodes
    let b = Value::Few(Few::new(vec![
        Value::Lot(int_list(&[1, 3])),
        Value::Lot(int_list(&[2, 3])),
    ]));

    assert!(!equal(&a, &b));
    assert!(!equal(&b, &a));

    // c: same unfolding with a matching shared tail
    let tail_c = int_list(&[3]);
    let c = Value::Few(Few::new(vec![
        Value::Lot(Lot::pair(Value::Int(1), Value::Lot(tail_c.clone()))),
        Value::Lot(Lot::pair(Value::Int(2), Value::Lot(tail_c))),
    ]));
    assert!(equal(&a, &c));
}

#[test]
fn test_cycle_periods_are_distinct() {
    // (1 ...) looping every pair, versus (1 1 ...) looping every two
    let short = cyclic_list(&[1]);
    let long = cyclic_list(&[1, 1]);

    let vs = Value::Lot(short);
    let vl = Value::Lot(long);
    assert!(!equal(&vs, &vl));

    unlink_all(&vs);
    unlink_all(&vl);
}

#[test]
fn test_equal_cycles_with_equal_period() {
    let a = Value::Lot(cyclic_list(&[1, 2]));
    let b = Value::Lot(cyclic_list(&[1, 2]));
    assert!(equal(&a, &b));

    unlink_all(&a);
    unlink_all(&b);
}

#[test]
fn test_cycles_through_few_slots() {
    let make = || {
        let few = Few::with_len(2);
        few.set(0, Value::Int(5)).unwrap();
        few.set(1, Value::Few(few.clone())).unwrap();
        Value::Few(few)
    };
    let a = make();
    let b = make();
    assert!(equal(&a, &b));

    unlink_all(&a);
    unlink_all(&b);
}

// =============================================================================
// Leaf and shape semantics
// =============================================================================

#[test]
fn test_text_identity_is_irrelevant() {
    // one side aliases a text allocation, the other does not
    let t = Value::text("twice");
    let a = Value::Few(Few::new(vec![t.clone(), t]));
    let b = Value::Few(Few::new(vec![Value::text("twice"), Value::text("twice")]));
    assert!(equal(&a, &b));
}

#[test]
fn test_interned_symbols() {
    assert!(equal(&Value::symbol("abc"), &Value::symbol("abc")));
    assert!(!equal(&Value::symbol("abc"), &Value::symbol("abd")));
    assert!(!equal(&Value::symbol("abc"), &Value::text("abc")));
}

#[test]
fn test_numeric_arrays_compare_by_width_and_content() {
    let a = Value::Ints(vec![1, 2, 3].into());
    assert!(equal(&a, &Value::Ints(vec![1, 2, 3].into())));
    assert!(!equal(&a, &Value::Ints(vec![1, 2].into())));
    assert!(!equal(&a, &Value::Longs(vec![1, 2, 3].into())));
}

#[test]
fn test_improper_versus_proper_chains() {
    let improper = Value::Lot(Lot::pair(Value::Int(1), Value::Int(2)));
    let proper = Value::Lot(int_list(&[1, 2]));
    assert!(!equal(&improper, &proper));
    assert!(equal(
        &improper,
        &Value::Lot(Lot::pair(Value::Int(1), Value::Int(2)))
    ));
}

#[test]
fn test_mutation_changes_the_verdict() {
    let a = int_list(&[1, 2]);
    let b = int_list(&[1, 2]);
    assert!(equal(&Value::Lot(a.clone()), &Value::Lot(b.clone())));

    b.set_head(Value::Int(9)).unwrap();
    assert!(!equal(&Value::Lot(a), &Value::Lot(b)));
}
