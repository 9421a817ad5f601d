// fewlot-core - Stack safety integration tests
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Integration tests for bounded native-stack usage.
//!
//! Every traversal is frame-driven, so chains and nestings far beyond any
//! plausible recursion limit must pass through detection, equality,
//! printing, the codec and reclamation without overflowing.

mod common;

use common::*;

const DEPTH: usize = 100_000;

fn long_chain() -> Lot {
    let mut lot = Lot::Empty;
    for i in (0..DEPTH).rev() {
        lot = Lot::pair(Value::Int(i as i32), Value::Lot(lot));
    }
    lot
}

fn deep_fews() -> Value {
    let mut v = Value::Int(0);
    for _ in 0..DEPTH {
        v = Value::Few(Few::new(vec![v]));
    }
    v
}

#[test]
fn test_long_chain_detection() {
    let v = Value::Lot(long_chain());
    assert!(shared_nodes(&v).is_empty());
}

#[test]
fn test_long_chain_equality() {
    let a = Value::Lot(long_chain());
    let b = Value::Lot(long_chain());
    assert!(equal(&a, &b));
}

#[test]
fn test_long_chain_printing() {
    let v = Value::Lot(long_chain());
    let rendered = text(&v);
    assert!(rendered.starts_with("(0 1 2"));
    assert!(rendered.ends_with(")"));
}

#[test]
fn test_long_chain_codec() {
    let v = Value::Lot(long_chain());
    let out = decode(&encode(&v).unwrap()).unwrap();
    assert!(equal(&v, &out));
}

#[test]
fn test_deep_few_nesting() {
    let a = deep_fews();
    let b = deep_fews();
    assert!(shared_nodes(&a).is_empty());
    assert!(equal(&a, &b));
    let out = decode(&encode(&a).unwrap()).unwrap();
    assert!(equal(&a, &out));
}

#[test]
fn test_long_cycle_traversals() {
    let lot = long_chain();
    last_pair(&lot).set_tail(Value::Lot(lot.clone()));
    let v = Value::Lot(lot);

    let table = shared_nodes(&v);
    assert_eq!(table.len(), 1);
    let rendered = text(&v);
    assert!(rendered.starts_with("#0=(0 1 2"));
    assert!(rendered.ends_with(". #0#)"));
    let out = decode(&encode(&v).unwrap()).unwrap();
    assert!(equal(&v, &out));

    unlink_all(&v);
    unlink_all(&out);
}
