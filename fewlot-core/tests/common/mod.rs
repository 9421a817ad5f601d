// fewlot-core - Common test utilities
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Shared test helpers for graph construction and teardown.
//!
//! # Usage
//!
//! In your test file, add:
//! ```ignore
//! mod common;
//! use common::*;
//! ```
//!
//! # Available Helpers
//!
//! - [`int_list`] - Build a proper chain of 32-bit integers
//! - [`cyclic_list`] - Build a chain whose last tail loops to the head
//! - [`last_pair`] - The final pair of a finite chain
//! - [`unlink_all`] - Break every link in a graph so cyclic tests don't leak

// Each test binary compiles its own copy; not every binary uses every helper.
#![allow(dead_code)]

// Re-export common types for convenience
#[allow(unused_imports)]
pub use fewlot_core::{
    decode, encode, equal, shared_nodes, text, Few, Lot, NodeId, Pair, Value,
};

use std::collections::HashSet;

/// Build a proper chain of the given integers.
pub fn int_list(ints: &[i32]) -> Lot {
    Lot::from_values(&ints.iter().map(|n| Value::Int(*n)).collect::<Vec<_>>())
}

/// Build a chain of the given integers whose last pair's tail points back
/// at the head, forming a true cycle.
///
/// Callers must break the cycle before the value drops, normally with
/// [`unlink_all`].
pub fn cyclic_list(ints: &[i32]) -> Lot {
    assert!(!ints.is_empty(), "a cycle needs at least one pair");
    let lot = int_list(ints);
    last_pair(&lot).set_tail(Value::Lot(lot.clone()));
    lot
}

/// The final pair of a chain, following tails until one is not a fresh
/// pair. Loops forever on an unbroken cycle; only call on finite chains.
pub fn last_pair(lot: &Lot) -> Pair {
    let Lot::Pair(mut pair) = lot.clone() else {
        panic!("empty lot has no last pair");
    };
    loop {
        match pair.tail() {
            Value::Lot(Lot::Pair(next)) => pair = next,
            _ => return pair,
        }
    }
}

/// Break every container link reachable from `value`.
///
/// Pairs get leaf head and empty tail, Few slots get the empty lot. Used
/// at the end of cyclic tests so reference counting can reclaim the nodes.
pub fn unlink_all(value: &Value) {
    let mut seen: HashSet<NodeId> = HashSet::new();
    let mut stack = vec![value.clone()];
    while let Some(v) = stack.pop() {
        match v {
            Value::Few(node) => {
                if seen.insert(node.node_id()) {
                    for i in 0..node.len() {
                        stack.push(node.element(i));
                        node.set(i, Value::Lot(Lot::Empty)).unwrap();
                    }
                }
            }
            Value::Lot(Lot::Pair(pair)) => {
                if seen.insert(pair.node_id()) {
                    stack.push(pair.head());
                    stack.push(pair.tail());
                    pair.set_head(Value::Bool(false));
                    pair.set_tail(Value::Lot(Lot::Empty));
                }
            }
            _ => {}
        }
    }
}
