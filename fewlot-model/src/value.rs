// fewlot-model - Value, Few and Lot types
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Core value type for Few/Lot graphs.
//!
//! `Value` is the central enum representing all values. Leaves (booleans,
//! fixed-width numbers, characters, text, homogeneous numeric arrays,
//! date/time records, symbols) are immutable and cheap to clone. The two
//! container kinds, [`Few`] and [`Lot`] pairs, are mutable in place through
//! shared `Rc<RefCell<...>>` cells, so a node may be reachable from several
//! places and graphs may be cyclic.
//!
//! # Identity
//!
//! Every container node carries a [`NodeId`], a stable per-process handle
//! derived from its cell address. Identity distinguishes "the same node"
//! from "an equal but distinct node"; it is the sole mechanism the
//! traversals in `fewlot-core` use to recognise repeat visits. A handle is
//! stable for as long as the node is alive, and every traversal holds its
//! root alive for the duration of the call.
//!
//! # Reclamation
//!
//! Nodes are reference counted. Dropping a uniquely-owned graph unlinks
//! iteratively, so arbitrarily long chains and deeply nested aggregates
//! drop on a bounded native stack. A cyclic graph keeps itself alive
//! until the caller breaks the cycle (for example with
//! [`Lot::set_tail`]); the traversal algorithms
//! bound cycles themselves, so no collector is involved.

use std::cell::RefCell;
use std::fmt;
use std::mem;
use std::rc::Rc;

use crate::datetime::{Date, Time};
use crate::error::{Error, Result};
use crate::symbol::Symbol;

// ============================================================================
// NodeId
// ============================================================================

/// Stable identity handle for a container node.
///
/// Two handles compare equal exactly when they name the same live node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    fn of<T>(cell: &Rc<T>) -> Self {
        NodeId(Rc::as_ptr(cell) as *const u8 as usize)
    }
}

// ============================================================================
// Value
// ============================================================================

/// The core value type.
///
/// Numeric widths are part of the type: `Int(5)` and `Long(5)` are distinct
/// values and compare unequal under structural equality.
#[derive(Clone, Debug)]
pub enum Value {
    /// Boolean true or false
    Bool(bool),
    /// 16-bit signed integer
    Short(i16),
    /// 32-bit signed integer
    Int(i32),
    /// 64-bit signed integer
    Long(i64),
    /// 32-bit IEEE float
    Float(f32),
    /// 64-bit IEEE float
    Double(f64),
    /// Unicode scalar value
    Char(char),
    /// Immutable UTF-8 text
    Text(Rc<str>),
    /// Homogeneous boolean array
    Bools(Rc<[bool]>),
    /// Homogeneous 16-bit integer array
    Shorts(Rc<[i16]>),
    /// Homogeneous 32-bit integer array
    Ints(Rc<[i32]>),
    /// Homogeneous 64-bit integer array
    Longs(Rc<[i64]>),
    /// Homogeneous 32-bit float array
    Floats(Rc<[f32]>),
    /// Homogeneous 64-bit float array
    Doubles(Rc<[f64]>),
    /// Opaque instant
    Time(Time),
    /// Opaque broken-down date
    Date(Date),
    /// Interned symbol
    Symbol(Symbol),
    /// Fixed-length mutable heterogeneous aggregate
    Few(Few),
    /// Possibly-empty mutable pair chain
    Lot(Lot),
}

impl Value {
    /// Build a text value from a string slice.
    pub fn text(s: &str) -> Self {
        Value::Text(Rc::from(s))
    }

    /// Build a symbol value, interning the spelling.
    pub fn symbol(name: &str) -> Self {
        Value::Symbol(Symbol::new(name))
    }

    /// The identity handle, for container nodes only.
    ///
    /// Leaves (including the empty lot, which is a canonical terminal
    /// rather than a node) have no identity.
    #[must_use]
    pub fn node_id(&self) -> Option<NodeId> {
        match self {
            Value::Few(few) => Some(few.node_id()),
            Value::Lot(Lot::Pair(pair)) => Some(pair.node_id()),
            _ => None,
        }
    }

    /// Whether this value is a container node (a Few or a pair).
    #[must_use]
    pub fn is_container(&self) -> bool {
        self.node_id().is_some()
    }

    /// Human-readable type name for error messages.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Bool(_) => "boolean",
            Value::Short(_) => "short",
            Value::Int(_) => "int",
            Value::Long(_) => "long",
            Value::Float(_) => "float",
            Value::Double(_) => "double",
            Value::Char(_) => "char",
            Value::Text(_) => "text",
            Value::Bools(_) => "booleans",
            Value::Shorts(_) => "shorts",
            Value::Ints(_) => "ints",
            Value::Longs(_) => "longs",
            Value::Floats(_) => "floats",
            Value::Doubles(_) => "doubles",
            Value::Time(_) => "time",
            Value::Date(_) => "date",
            Value::Symbol(_) => "symbol",
            Value::Few(_) => "few",
            Value::Lot(_) => "lot",
        }
    }
}

// ============================================================================
// Few
// ============================================================================

/// A fixed-length, index-addressable, heterogeneous aggregate.
///
/// Slots are mutable in place; the length is fixed at construction.
/// Cloning a `Few` clones the handle, not the slots: both clones name the
/// same node.
#[derive(Clone)]
pub struct Few {
    cell: Rc<RefCell<FewCell>>,
}

struct FewCell {
    slots: Vec<Value>,
}

impl Few {
    /// Create a Few holding the given values.
    pub fn new(values: Vec<Value>) -> Self {
        Few {
            cell: Rc::new(RefCell::new(FewCell { slots: values })),
        }
    }

    /// Create a Few of the given length with every slot holding the
    /// empty lot.
    pub fn with_len(len: usize) -> Self {
        Few::new(vec![Value::Lot(Lot::Empty); len])
    }

    /// The fixed length.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cell.borrow().slots.len()
    }

    /// Whether the Few has no slots.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cell.borrow().slots.is_empty()
    }

    /// Get the value in slot `index`.
    pub fn get(&self, index: usize) -> Result<Value> {
        self.cell
            .borrow()
            .slots
            .get(index)
            .cloned()
            .ok_or_else(|| Error::index(index, self.len()))
    }

    /// Replace the value in slot `index`.
    pub fn set(&self, index: usize, value: Value) -> Result<()> {
        let mut cell = self.cell.borrow_mut();
        let length = cell.slots.len();
        match cell.slots.get_mut(index) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(Error::index(index, length)),
        }
    }

    /// Get the value in slot `index` without the `Result` wrapper.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`. Intended for walkers that have already
    /// bounds-checked against [`Few::len`].
    #[must_use]
    pub fn element(&self, index: usize) -> Value {
        self.cell.borrow().slots[index].clone()
    }

    /// The identity handle of this node.
    #[must_use]
    pub fn node_id(&self) -> NodeId {
        NodeId::of(&self.cell)
    }

    /// Whether the two handles name the same node.
    #[must_use]
    pub fn same_node(&self, other: &Few) -> bool {
        Rc::ptr_eq(&self.cell, &other.cell)
    }
}

impl fmt::Debug for Few {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Shallow on purpose: slots may reach this node again
        write!(f, "#<few/{} {:?}>", self.len(), self.node_id())
    }
}

// ============================================================================
// Lot and Pair
// ============================================================================

/// A possibly-empty mutable pair chain.
///
/// `Empty` is a canonical terminal value with no identity. A `Pair` holds a
/// head value and a tail value; a tail that is itself a lot continues the
/// chain, anything else ends it as an improper chain.
#[derive(Clone)]
pub enum Lot {
    /// The canonical empty lot
    Empty,
    /// A mutable pair node
    Pair(Pair),
}

struct PairCell {
    head: Value,
    tail: Value,
}

/// A mutable pair node. Cloning clones the handle, not the fields.
#[derive(Clone)]
pub struct Pair {
    cell: Rc<RefCell<PairCell>>,
}

impl Lot {
    /// Create a single pair with the given head and tail.
    pub fn pair(head: Value, tail: Value) -> Self {
        Lot::Pair(Pair::new(head, tail))
    }

    /// Build a proper chain of the given values, ending in the empty lot.
    pub fn from_values(values: &[Value]) -> Self {
        let mut lot = Lot::Empty;
        for value in values.iter().rev() {
            lot = Lot::pair(value.clone(), Value::Lot(lot));
        }
        lot
    }

    /// Whether this is the empty lot.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Lot::Empty)
    }

    /// The head of the first pair.
    pub fn head(&self) -> Result<Value> {
        match self {
            Lot::Empty => Err(Error::empty_access("head")),
            Lot::Pair(pair) => Ok(pair.head()),
        }
    }

    /// The tail of the first pair.
    pub fn tail(&self) -> Result<Value> {
        match self {
            Lot::Empty => Err(Error::empty_access("tail")),
            Lot::Pair(pair) => Ok(pair.tail()),
        }
    }

    /// Replace the head of the first pair.
    pub fn set_head(&self, value: Value) -> Result<()> {
        match self {
            Lot::Empty => Err(Error::empty_access("head")),
            Lot::Pair(pair) => {
                pair.set_head(value);
                Ok(())
            }
        }
    }

    /// Replace the tail of the first pair.
    pub fn set_tail(&self, value: Value) -> Result<()> {
        match self {
            Lot::Empty => Err(Error::empty_access("tail")),
            Lot::Pair(pair) => {
                pair.set_tail(value);
                Ok(())
            }
        }
    }
}

impl fmt::Debug for Lot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lot::Empty => write!(f, "()"),
            Lot::Pair(pair) => write!(f, "{:?}", pair),
        }
    }
}

impl Pair {
    /// Create a fresh pair node.
    pub fn new(head: Value, tail: Value) -> Self {
        Pair {
            cell: Rc::new(RefCell::new(PairCell { head, tail })),
        }
    }

    /// The head value.
    #[must_use]
    pub fn head(&self) -> Value {
        self.cell.borrow().head.clone()
    }

    /// The tail value.
    #[must_use]
    pub fn tail(&self) -> Value {
        self.cell.borrow().tail.clone()
    }

    /// Replace the head value.
    pub fn set_head(&self, value: Value) {
        self.cell.borrow_mut().head = value;
    }

    /// Replace the tail value.
    pub fn set_tail(&self, value: Value) {
        self.cell.borrow_mut().tail = value;
    }

    /// The identity handle of this node.
    #[must_use]
    pub fn node_id(&self) -> NodeId {
        NodeId::of(&self.cell)
    }

    /// Whether the two handles name the same node.
    #[must_use]
    pub fn same_node(&self, other: &Pair) -> bool {
        Rc::ptr_eq(&self.cell, &other.cell)
    }
}

impl fmt::Debug for Pair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Shallow on purpose: the tail may reach this node again
        write!(f, "#<pair {:?}>", self.node_id())
    }
}

/// Reclaim uniquely-owned container nodes iteratively so that dropping a
/// long chain or a deeply nested aggregate does not recurse once per node.
/// Nodes still reachable elsewhere are left for their remaining owners.
fn reclaim(mut pending: Vec<Value>) {
    while let Some(value) = pending.pop() {
        match value {
            Value::Few(few) => {
                if let Ok(cell) = Rc::try_unwrap(few.cell) {
                    let mut cell = cell.into_inner();
                    pending.append(&mut cell.slots);
                    // `cell` drops here already emptied
                }
            }
            Value::Lot(Lot::Pair(pair)) => {
                if let Ok(cell) = Rc::try_unwrap(pair.cell) {
                    let mut cell = cell.into_inner();
                    pending.push(mem::replace(&mut cell.head, Value::Bool(false)));
                    pending.push(mem::replace(&mut cell.tail, Value::Lot(Lot::Empty)));
                }
            }
            _ => {}
        }
    }
}

impl Drop for PairCell {
    fn drop(&mut self) {
        reclaim(vec![
            mem::replace(&mut self.head, Value::Bool(false)),
            mem::replace(&mut self.tail, Value::Lot(Lot::Empty)),
        ]);
    }
}

impl Drop for FewCell {
    fn drop(&mut self) {
        reclaim(mem::take(&mut self.slots));
    }
}

// ============================================================================
// Tests
// ============================================================================
