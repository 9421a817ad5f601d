// fewlot-model - Few/Lot aggregate data model
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! # fewlot-model
//!
//! The Few/Lot aggregate data model: fixed-length heterogeneous arrays
//! ("Few") and mutable pair chains ("Lot") whose values may share
//! sub-structures or be cyclic, plus the leaf types they contain.
//!
//! The traversal algorithms (equality, printing, binary codec) live in
//! `fewlot-core`; this crate only defines the graph and its identity
//! handles.

pub mod datetime;
pub mod error;
pub mod symbol;
pub mod value;

pub use datetime::{Date, Time, NANOS_PER_SEC};
pub use error::{Error, Result};
pub use symbol::Symbol;
pub use value::{Few, Lot, NodeId, Pair, Value};
