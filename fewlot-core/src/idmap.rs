// fewlot-core - Identity-keyed ordered map and set
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Ordered maps and sets keyed by node identity.
//!
//! Every traversal owns private instances of these, so calls over disjoint
//! graphs never interfere. Backed by `im`'s ordered collections; any
//! balanced-tree or hash map would satisfy the same contract.

use fewlot_model::NodeId;
use im::{OrdMap, OrdSet};

/// An ordered map keyed by [`NodeId`].
#[derive(Clone, Debug, Default)]
pub struct IdentityMap<V: Clone> {
    inner: OrdMap<NodeId, V>,
}

impl<V: Clone> IdentityMap<V> {
    /// Create an empty map.
    #[must_use]
    pub fn new() -> Self {
        IdentityMap {
            inner: OrdMap::new(),
        }
    }

    /// Insert a value for a node, returning the previous value if any.
    pub fn insert(&mut self, id: NodeId, value: V) -> Option<V> {
        self.inner.insert(id, value)
    }

    /// Look up the value for a node.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&V> {
        self.inner.get(&id)
    }

    /// Look up the value for a node, mutably.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut V> {
        self.inner.get_mut(&id)
    }

    /// Whether a node is present.
    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.inner.contains_key(&id)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Whether the map is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Traverse entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&NodeId, &V)> {
        self.inner.iter()
    }

    /// Keep only the entries satisfying the predicate.
    pub fn retain(&mut self, mut keep: impl FnMut(NodeId, &V) -> bool) {
        self.inner = self
            .inner
            .iter()
            .filter(|(id, value)| keep(**id, value))
            .map(|(id, value)| (*id, value.clone()))
            .collect();
    }
}

/// An ordered set of [`NodeId`]s.
#[derive(Clone, Debug, Default)]
pub struct IdentitySet {
    inner: OrdSet<NodeId>,
}

impl IdentitySet {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        IdentitySet {
            inner: OrdSet::new(),
        }
    }

    /// Insert a node, returning true if it was not already present.
    pub fn insert(&mut self, id: NodeId) -> bool {
        self.inner.insert(id).is_none()
    }

    /// Whether a node is present.
    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.inner.contains(&id)
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

// ============================================================================
// Tests
// ============================================================================
