// fewlot-core - Shared-structure detector
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! One-pass detection of multiply-visited nodes.
//!
//! [`shared_nodes`] walks a value graph once and returns the set of
//! container nodes reachable along more than one path, which includes the
//! roots of cycles. Leaf values are never reported. Equality, printing and
//! the codec each run this privately and then consult the resulting
//! [`ShareTable`] to decide when to mark, close or back-reference a node.
//!
//! The walk is iterative: pair chains can be arbitrarily long, so pending
//! work lives on an explicit stack of resumption frames rather than the
//! native call stack. Revisiting a node records it as shared and stops the
//! descent, which both keeps the pass linear and bounds cycles.

use fewlot_model::{Few, Lot, NodeId, Pair, Value};

use crate::idmap::{IdentityMap, IdentitySet};

/// Per-shared-node bookkeeping slot.
///
/// Fresh slots are open with no order assigned; populating them is the
/// consumer's job. The printer assigns label ordinals in first-visit
/// order, equality assigns match numbers in lockstep, and the codec uses
/// the table's own discovery order instead.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ShareSlot {
    /// Whether the consumer has already handled the node's first visit.
    pub closed: bool,
    /// Consumer-assigned ordinal, once closed.
    pub order: Option<usize>,
}

impl ShareSlot {
    fn fresh() -> Self {
        ShareSlot {
            closed: false,
            order: None,
        }
    }
}

/// The detector's output: shared nodes with their mutable slots, in
/// discovery order.
#[derive(Clone, Debug, Default)]
pub struct ShareTable {
    slots: IdentityMap<ShareSlot>,
    entries: Vec<(NodeId, Value)>,
}

impl ShareTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        ShareTable {
            slots: IdentityMap::new(),
            entries: Vec::new(),
        }
    }

    fn add(&mut self, id: NodeId, node: Value) {
        if !self.slots.contains(id) {
            self.slots.insert(id, ShareSlot::fresh());
            self.entries.push((id, node));
        }
    }

    /// Whether the node was visited more than once.
    #[must_use]
    pub fn is_shared(&self, id: NodeId) -> bool {
        self.slots.contains(id)
    }

    /// The slot for a shared node, if it is one.
    #[must_use]
    pub fn slot(&self, id: NodeId) -> Option<&ShareSlot> {
        self.slots.get(id)
    }

    /// Close a shared node's slot with the given ordinal.
    ///
    /// Does nothing for a node that is not in the table.
    pub fn close(&mut self, id: NodeId, order: usize) {
        if let Some(slot) = self.slots.get_mut(id) {
            slot.closed = true;
            slot.order = Some(order);
        }
    }

    /// The shared nodes in discovery order, each with its handle value.
    #[must_use]
    pub fn entries(&self) -> &[(NodeId, Value)] {
        &self.entries
    }

    /// Number of shared nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no node is reachable along two distinct paths.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Pending resumption: a container and the next child to visit.
enum Frame {
    Few { node: Few, next: usize },
    Pair { node: Pair, next: u8 },
}

/// Walk the graph under `root` once and return every container node
/// visited more than once, including self-referential cycle roots.
///
/// Termination follows from the finite reachable node count plus the
/// re-entry short-circuit: each node's children are visited at most once.
#[must_use]
pub fn shared_nodes(root: &Value) -> ShareTable {
    let mut visited = IdentitySet::new();
    let mut table = ShareTable::new();
    let mut frames: Vec<Frame> = Vec::new();
    let mut current = Some(root.clone());

    loop {
        if let Some(value) = current.take() {
            match value {
                Value::Few(node) => {
                    if visited.insert(node.node_id()) {
                        if !node.is_empty() {
                            frames.push(Frame::Few { node, next: 0 });
                        }
                    } else {
                        let id = node.node_id();
                        table.add(id, Value::Few(node));
                    }
                }
                Value::Lot(Lot::Pair(node)) => {
                    if visited.insert(node.node_id()) {
                        frames.push(Frame::Pair { node, next: 0 });
                    } else {
                        let id = node.node_id();
                        table.add(id, Value::Lot(Lot::Pair(node)));
                    }
                }
                // leaves are never reported
                _ => {}
            }
        }

        // Pull the next pending child, unwinding finished frames.
        loop {
            match frames.last_mut() {
                None => return table,
                Some(Frame::Few { node, next }) => {
                    if *next < node.len() {
                        current = Some(node.element(*next));
                        *next += 1;
                        break;
                    }
                    frames.pop();
                }
                Some(Frame::Pair { node, next }) => {
                    if *next == 0 {
                        current = Some(node.head());
                        *next = 1;
                        break;
                    }
                    // Tail position: pop before descending so a chain
                    // occupies one frame at a time.
                    let node = node.clone();
                    frames.pop();
                    current = Some(node.tail());
                    break;
                }
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_has_empty_shared_set() {
        let v = Value::Few(Few::new(vec![
            Value::Int(1),
            Value::Lot(Lot::from_values(&[Value::Int(2), Value::text("x")])),
        ]));
        assert!(shared_nodes(&v).is_empty());
    }

    #[test]
    fn test_self_cycle_is_exactly_the_root() {
        let lot = Lot::pair(Value::Int(1), Value::Lot(Lot::Empty));
        lot.set_tail(Value::Lot(lot.clone())).unwrap();
        let root = Value::Lot(lot.clone());

        let table = shared_nodes(&root);
        assert_eq!(table.len(), 1);
        let id = root.node_id().unwrap();
        assert!(table.is_shared(id));
        assert_eq!(table.slot(id), Some(&ShareSlot { closed: false, order: None }));

        lot.set_tail(Value::Lot(Lot::Empty)).unwrap();
    }

    #[test]
    fn test_diamond_sharing() {
        let shared = Few::new(vec![Value::Int(7)]);
        let v = Value::Few(Few::new(vec![
            Value::Few(shared.clone()),
            Value::Few(shared.clone()),
        ]));
        let table = shared_nodes(&v);
        assert_eq!(table.len(), 1);
        assert!(table.is_shared(shared.node_id()));
    }

    #[test]
    fn test_shared_leaf_text_not_reported() {
        let text = Value::text("twice");
        let v = Value::Few(Few::new(vec![text.clone(), text]));
        assert!(shared_nodes(&v).is_empty());
    }

    #[test]
    fn test_close_populates_slot() {
        let shared = Few::new(vec![]);
        let v = Value::Few(Few::new(vec![
            Value::Few(shared.clone()),
            Value::Few(shared.clone()),
        ]));
        let mut table = shared_nodes(&v);
        table.close(shared.node_id(), 0);
        let slot = table.slot(shared.node_id()).unwrap();
        assert!(slot.closed);
        assert_eq!(slot.order, Some(0));
    }
}
