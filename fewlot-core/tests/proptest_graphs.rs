// fewlot-core - Property-based tests for graph traversals
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Property-based tests over randomly generated value trees.
//!
//! Tests the following properties:
//! - encode/decode round-trips preserve structural equality
//! - two independent builds of the same shape compare equal
//! - the printer is total and deterministic
//! - the detector reports nothing for trees

mod common;

use common::*;
use proptest::prelude::*;

// =============================================================================
// Blueprints: buildable descriptions of acyclic values
// =============================================================================

/// A value description that can be instantiated any number of times.
/// Building twice yields content-equal graphs with disjoint node sets.
#[derive(Clone, Debug)]
enum Blueprint {
    Bool(bool),
    Short(i16),
    Int(i32),
    Long(i64),
    Double(f64),
    Char(char),
    Text(String),
    Ints(Vec<i32>),
    Doubles(Vec<f64>),
    Few(Vec<Blueprint>),
    Chain(Vec<Blueprint>),
}

impl Blueprint {
    fn build(&self) -> Value {
        match self {
            Blueprint::Bool(x) => Value::Bool(*x),
            Blueprint::Short(x) => Value::Short(*x),
            Blueprint::Int(x) => Value::Int(*x),
            Blueprint::Long(x) => Value::Long(*x),
            Blueprint::Double(x) => Value::Double(*x),
            Blueprint::Char(x) => Value::Char(*x),
            Blueprint::Text(x) => Value::text(x),
            Blueprint::Ints(xs) => Value::Ints(xs.clone().into()),
            Blueprint::Doubles(xs) => Value::Doubles(xs.clone().into()),
            Blueprint::Few(children) => {
                Value::Few(Few::new(children.iter().map(Blueprint::build).collect()))
            }
            Blueprint::Chain(children) => Value::Lot(Lot::from_values(
                &children.iter().map(Blueprint::build).collect::<Vec<_>>(),
            )),
        }
    }
}

fn arb_leaf() -> impl Strategy<Value = Blueprint> {
    prop_oneof![
        any::<bool>().prop_map(Blueprint::Bool),
        any::<i16>().prop_map(Blueprint::Short),
        any::<i32>().prop_map(Blueprint::Int),
        any::<i64>().prop_map(Blueprint::Long),
        any::<f64>().prop_map(Blueprint::Double),
        any::<char>().prop_map(Blueprint::Char),
        "[ -~]{0,12}".prop_map(Blueprint::Text),
        prop::collection::vec(any::<i32>(), 0..6).prop_map(Blueprint::Ints),
        prop::collection::vec(any::<f64>(), 0..6).prop_map(Blueprint::Doubles),
    ]
}

fn arb_blueprint() -> impl Strategy<Value = Blueprint> {
    arb_leaf().prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Blueprint::Few),
            prop::collection::vec(inner, 0..6).prop_map(Blueprint::Chain),
        ]
    })
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn prop_roundtrip_preserves_equality(bp in arb_blueprint()) {
        let v = bp.build();
        let out = decode(&encode(&v).unwrap()).unwrap();
        prop_assert!(equal(&v, &out));
    }

    #[test]
    fn prop_independent_builds_are_equal(bp in arb_blueprint()) {
        let a = bp.build();
        let b = bp.build();
        prop_assert!(equal(&a, &b));
        prop_assert!(equal(&b, &a));
    }

    #[test]
    fn prop_printer_is_total_and_deterministic(bp in arb_blueprint()) {
        let v = bp.build();
        let first = text(&v);
        prop_assert!(!first.is_empty());
        prop_assert_eq!(text(&v), first.clone());
        // an independent build of the same shape prints identically
        prop_assert_eq!(text(&bp.build()), first);
    }

    #[test]
    fn prop_trees_have_no_shared_nodes(bp in arb_blueprint()) {
        prop_assert!(shared_nodes(&bp.build()).is_empty());
    }
}
