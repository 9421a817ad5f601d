// fewlot-core - Binary codec
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Binary serialization of value graphs, sharing and cycles included.
//!
//! # Stream layout
//!
//! ```text
//! FEW varint(k) body_0 ... body_k-1 payload
//! ```
//!
//! The stream opens with a shared-node table: `k` container bodies, one
//! per node the shared-structure detector found, in discovery order. Any
//! later occurrence of such a node, inside another body or the payload,
//! is written as `SHARE_INDEX varint(i)`. Decoding rebuilds the table
//! first and resolves back-references against it, deferring forward and
//! cyclic references to a patch pass, so the decoded graph reproduces the
//! original aliasing exactly.
//!
//! Pair chains use a run-length grammar rather than nested pairs:
//! `LOT_BEGIN` opens a chain, each `NEXT_LOT` continues it with another
//! head datum, and it closes with either `LOT_END` (proper chain) or
//! `LOT_CONS` followed by one explicit tail datum (improper tail, or a
//! tail that must back-reference a shared node).
//!
//! Varints are a length byte followed by that many big-endian magnitude
//! bytes; zero is a bare zero length byte. Multi-byte scalars are
//! big-endian. Strings are leaves here: two text values that happen to
//! share a heap allocation are written out twice and decode as separate
//! allocations. Symbols are not in the supported type set and fail to
//! encode with [`Error::UnsupportedType`](crate::Error::UnsupportedType).

mod decode;
mod encode;
mod tags;

pub use decode::decode;
pub use encode::encode;

// ============================================================================
// Tests
// ============================================================================
