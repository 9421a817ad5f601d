// fewlot-core - Structural equality engine
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Deep, sharing- and cycle-tolerant structural equality.
//!
//! Two graphs are equal iff their unfoldings match **and** each graph's own
//! internal sharing pattern corresponds consistently between the two sides:
//! shared positions in one must map to shared positions in the other. Nodes
//! need not be cross-graph identical.
//!
//! The engine runs the shared-structure detector independently on both
//! sides, then walks them in lockstep with a shared order counter. Each
//! shared node is matched at most once, so total work is bounded by the sum
//! of both graphs' node counts, cycles included. The walk uses an explicit
//! continuation stack ("resume comparing the remainder of this pair/array
//! from index i"), giving O(1) native stack depth regardless of chain
//! length.

use fewlot_model::{Few, Lot, NodeId, Pair, Value};

use crate::detect::{shared_nodes, ShareTable};

/// Pending resumption: compare the remaining children of two containers.
enum Frame {
    Few { a: Few, b: Few, next: usize },
    Pair { a: Pair, b: Pair, next: u8 },
}

/// Outcome of inspecting one lockstep position.
enum Step {
    /// Position settled equal, nothing more to compare under it
    Settled,
    /// Compare the children of this position
    Descend,
    /// The graphs differ
    Unequal,
}

/// Deep structural equality between two value graphs.
///
/// Numeric comparison requires identical concrete width: a 32-bit and a
/// 64-bit integer holding the same mathematical value are not equal.
/// Floats compare by bit pattern, which keeps `equal(v, v)` reflexive even
/// for NaN payloads.
#[must_use]
pub fn equal(a: &Value, b: &Value) -> bool {
    let mut table_a = shared_nodes(a);
    let mut table_b = shared_nodes(b);
    let mut next_order = 0usize;
    let mut frames: Vec<Frame> = Vec::new();
    let mut current = Some((a.clone(), b.clone()));

    loop {
        if let Some((va, vb)) = current.take() {
            match step(
                va,
                vb,
                &mut table_a,
                &mut table_b,
                &mut next_order,
                &mut frames,
            ) {
                Step::Unequal => return false,
                Step::Settled | Step::Descend => {}
            }
        }

        // Pull the next pending pair of children.
        loop {
            match frames.last_mut() {
                None => return true,
                Some(Frame::Few { a, b, next }) => {
                    if *next < a.len() {
                        current = Some((a.element(*next), b.element(*next)));
                        *next += 1;
                        break;
                    }
                    frames.pop();
                }
                Some(Frame::Pair { a, b, next }) => {
                    if *next == 0 {
                        current = Some((a.head(), b.head()));
                        *next = 1;
                        break;
                    }
                    // Tail position: pop first so chains hold one frame.
                    let (a, b) = (a.clone(), b.clone());
                    frames.pop();
                    current = Some((a.tail(), b.tail()));
                    break;
                }
            }
        }
    }
}

fn step(
    va: Value,
    vb: Value,
    table_a: &mut ShareTable,
    table_b: &mut ShareTable,
    next_order: &mut usize,
    frames: &mut Vec<Frame>,
) -> Step {
    // Fast path: the same host node on both sides.
    if let (Some(id_a), Some(id_b)) = (va.node_id(), vb.node_id()) {
        if id_a == id_b {
            return Step::Settled;
        }
    }

    match (va, vb) {
        (Value::Few(a), Value::Few(b)) => {
            if a.len() != b.len() {
                return Step::Unequal;
            }
            match shared_positions(table_a, table_b, a.node_id(), b.node_id(), next_order) {
                Step::Descend => {
                    frames.push(Frame::Few { a, b, next: 0 });
                    Step::Descend
                }
                other => other,
            }
        }
        (Value::Lot(Lot::Empty), Value::Lot(Lot::Empty)) => Step::Settled,
        (Value::Lot(Lot::Pair(a)), Value::Lot(Lot::Pair(b))) => {
            match shared_positions(table_a, table_b, a.node_id(), b.node_id(), next_order) {
                Step::Descend => {
                    frames.push(Frame::Pair { a, b, next: 0 });
                    Step::Descend
                }
                other => other,
            }
        }
        (va, vb) => leaf_equal(&va, &vb),
    }
}

/// The sharing protocol of the lockstep walk.
///
/// Both sides already closed: equal iff their recorded order numbers
/// match. Exactly one side closed: the sharing patterns diverge. One or
/// both sides shared but unmatched: close whichever slots exist with the
/// same fresh order number and descend. Neither shared: plain descent.
fn shared_positions(
    table_a: &mut ShareTable,
    table_b: &mut ShareTable,
    id_a: NodeId,
    id_b: NodeId,
    next_order: &mut usize,
) -> Step {
    let slot_a = table_a.slot(id_a).cloned();
    let slot_b = table_b.slot(id_b).cloned();
    let closed_a = slot_a.as_ref().is_some_and(|s| s.closed);
    let closed_b = slot_b.as_ref().is_some_and(|s| s.closed);

    if closed_a && closed_b {
        let order_a = slot_a.and_then(|s| s.order);
        let order_b = slot_b.and_then(|s| s.order);
        return if order_a == order_b {
            Step::Settled
        } else {
            Step::Unequal
        };
    }
    if closed_a != closed_b {
        return Step::Unequal;
    }
    if slot_a.is_some() || slot_b.is_some() {
        let order = *next_order;
        *next_order += 1;
        table_a.close(id_a, order);
        table_b.close(id_b, order);
    }
    Step::Descend
}

fn leaf_equal(a: &Value, b: &Value) -> Step {
    let same = match (a, b) {
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Short(x), Value::Short(y)) => x == y,
        (Value::Int(x), Value::Int(y)) => x == y,
        (Value::Long(x), Value::Long(y)) => x == y,
        (Value::Float(x), Value::Float(y)) => x.to_bits() == y.to_bits(),
        (Value::Double(x), Value::Double(y)) => x.to_bits() == y.to_bits(),
        (Value::Char(x), Value::Char(y)) => x == y,
        (Value::Text(x), Value::Text(y)) => x == y,
        (Value::Bools(x), Value::Bools(y)) => x == y,
        (Value::Shorts(x), Value::Shorts(y)) => x == y,
        (Value::Ints(x), Value::Ints(y)) => x == y,
        (Value::Longs(x), Value::Longs(y)) => x == y,
        (Value::Floats(x), Value::Floats(y)) => {
            x.len() == y.len()
                && x.iter()
                    .zip(y.iter())
                    .all(|(p, q)| p.to_bits() == q.to_bits())
        }
        (Value::Doubles(x), Value::Doubles(y)) => {
            x.len() == y.len()
                && x.iter()
                    .zip(y.iter())
                    .all(|(p, q)| p.to_bits() == q.to_bits())
        }
        (Value::Time(x), Value::Time(y)) => x == y,
        (Value::Date(x), Value::Date(y)) => x == y,
        (Value::Symbol(x), Value::Symbol(y)) => x == y,
        // Mismatched kinds, including differing numeric widths and
        // container-versus-leaf positions.
        _ => false,
    };
    if same {
        Step::Settled
    } else {
        Step::Unequal
    }
}

// ============================================================================
// Tests
// ============================================================================
