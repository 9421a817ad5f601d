// fewlot-core - Binary tag bytes
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Tag bytes of the binary format.
//!
//! The exact values are an implementation choice; mutual distinctness and
//! the structure each tag introduces are the contract.

pub const BOOLEAN_TRUE: u8 = 0x01;
pub const BOOLEAN_FALSE: u8 = 0x02;
pub const SHORT: u8 = 0x03;
pub const INT: u8 = 0x04;
pub const LONG: u8 = 0x05;
pub const FLOAT: u8 = 0x06;
pub const DOUBLE: u8 = 0x07;
pub const CHAR: u8 = 0x08;
pub const STRING: u8 = 0x09;

pub const BOOLEANS: u8 = 0x0a;
pub const SHORTS: u8 = 0x0b;
pub const INTS: u8 = 0x0c;
pub const LONGS: u8 = 0x0d;
pub const FLOATS: u8 = 0x0e;
pub const DOUBLES: u8 = 0x0f;

pub const FEW: u8 = 0x10;
pub const LOT_BEGIN: u8 = 0x11;
/// Continuation marker: the chain goes on with another head datum.
pub const NEXT_LOT: u8 = 0x12;
/// The chain ends with one explicit tail datum (improper or shared).
pub const LOT_CONS: u8 = 0x13;
pub const LOT_END: u8 = 0x14;

pub const TIME: u8 = 0x15;
pub const DATE: u8 = 0x16;

/// Back-reference into the shared-node header table.
pub const SHARE_INDEX: u8 = 0x17;
