// fewlot-core - Traversal algorithms for Few/Lot value graphs
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! # fewlot-core
//!
//! Graph algorithms over `fewlot-model` values: shared-structure
//! detection, deep structural equality, a canonical printer with datum
//! labels, and a binary codec that preserves sharing and cycles.
//!
//! Every traversal here is iterative with an explicit frame stack, so
//! arbitrarily long pair chains and deeply nested arrays never exhaust
//! the native stack, and every traversal bounds cycles by node identity.

pub mod codec;
pub mod detect;
pub mod equality;
pub mod error;
pub mod idmap;
pub mod printer;

pub use codec::{decode, encode};
pub use detect::{shared_nodes, ShareSlot, ShareTable};
pub use equality::equal;
pub use error::{Error, Result};
pub use idmap::{IdentityMap, IdentitySet};
pub use printer::{get_print_length, set_print_length, text};

// Re-export the data model for convenience
pub use fewlot_model::{Date, Few, Lot, NodeId, Pair, Symbol, Time, Value};
