// fewlot-core - Binary encoder
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Value-graph encoding.
//!
//! The encoder first runs the shared-structure detector over the top-level
//! value and assigns every shared node an index in discovery order. The
//! stream opens with the header table (`FEW`, varint(k), then the k
//! shared-node bodies) followed by the top-level datum. Inside bodies and
//! payload alike, any reference to an indexed node is written as
//! `SHARE_INDEX`, varint(i) instead of re-encoding it; only the header
//! table writes each shared node's own structure, exactly once.
//!
//! Emission is frame-driven: pending container state lives on an explicit
//! stack, so arbitrarily long chains encode with O(1) native stack.

use fewlot_model::{Few, Lot, Pair, Value};

use crate::detect::shared_nodes;
use crate::error::{Error, Result};
use crate::idmap::IdentityMap;

use super::tags;

/// Append a varint: one length byte, then that many big-endian magnitude
/// bytes. Zero encodes as a bare zero length byte.
pub(super) fn write_varint(out: &mut Vec<u8>, value: u64) {
    let bytes = value.to_be_bytes();
    let skip = bytes.iter().take_while(|b| **b == 0).count();
    let magnitude = &bytes[skip..];
    out.push(magnitude.len() as u8);
    out.extend_from_slice(magnitude);
}

/// Encode a value graph to bytes.
///
/// Symbols are outside the codec's supported type set and fail with
/// [`Error::UnsupportedType`]. Text leaves are re-encoded at each
/// occurrence; see the module documentation of [`crate::codec`].
pub fn encode(value: &Value) -> Result<Vec<u8>> {
    let table = shared_nodes(value);
    let mut index = IdentityMap::new();
    for (i, (id, _)) in table.entries().iter().enumerate() {
        index.insert(*id, i);
    }

    let mut enc = Encoder {
        out: Vec::new(),
        index,
        frames: Vec::new(),
    };

    // Header table: every shared node's body, in discovery order.
    enc.out.push(tags::FEW);
    write_varint(&mut enc.out, table.len() as u64);
    for (_, node) in table.entries() {
        enc.container(node)?;
        enc.run()?;
    }

    enc.datum(value)?;
    enc.run()?;
    Ok(enc.out)
}

enum Frame {
    Few { node: Few, next: usize },
    Chain { pair: Pair, head_done: bool },
}

enum Action {
    Datum(Value),
    Tail(Pair),
    Pop,
}

struct Encoder {
    out: Vec<u8>,
    index: IdentityMap<usize>,
    frames: Vec<Frame>,
}

impl Encoder {
    /// Emit one datum: a back-reference for indexed nodes, the opening of
    /// a container otherwise, or a complete leaf.
    fn datum(&mut self, value: &Value) -> Result<()> {
        if let Some(id) = value.node_id() {
            if let Some(i) = self.index.get(id).copied() {
                self.out.push(tags::SHARE_INDEX);
                write_varint(&mut self.out, i as u64);
                return Ok(());
            }
            return self.container(value);
        }
        self.leaf(value)
    }

    /// Open a container's own structure, bypassing the back-reference
    /// check. Used for header-table bodies and unindexed containers.
    fn container(&mut self, value: &Value) -> Result<()> {
        match value {
            Value::Few(node) => {
                self.out.push(tags::FEW);
                write_varint(&mut self.out, node.len() as u64);
                if !node.is_empty() {
                    self.frames.push(Frame::Few {
                        node: node.clone(),
                        next: 0,
                    });
                }
            }
            Value::Lot(Lot::Pair(pair)) => {
                self.out.push(tags::LOT_BEGIN);
                self.frames.push(Frame::Chain {
                    pair: pair.clone(),
                    head_done: false,
                });
            }
            Value::Lot(Lot::Empty) => {
                self.out.push(tags::LOT_BEGIN);
                self.out.push(tags::LOT_END);
            }
            other => return self.leaf(other),
        }
        Ok(())
    }

    /// Drain pending frames.
    fn run(&mut self) -> Result<()> {
        loop {
            let action = match self.frames.last_mut() {
                None => return Ok(()),
                Some(Frame::Few { node, next }) => {
                    if *next < node.len() {
                        let child = node.element(*next);
                        *next += 1;
                        Action::Datum(child)
                    } else {
                        Action::Pop
                    }
                }
                Some(Frame::Chain { pair, head_done }) => {
                    if *head_done {
                        Action::Tail(pair.clone())
                    } else {
                        *head_done = true;
                        Action::Datum(pair.head())
                    }
                }
            };
            match action {
                Action::Datum(child) => self.datum(&child)?,
                Action::Pop => {
                    self.frames.pop();
                }
                Action::Tail(pair) => match pair.tail() {
                    Value::Lot(Lot::Empty) => {
                        self.out.push(tags::LOT_END);
                        self.frames.pop();
                    }
                    Value::Lot(Lot::Pair(next_pair))
                        if !self.index.contains(next_pair.node_id()) =>
                    {
                        // The chain continues inline.
                        self.out.push(tags::NEXT_LOT);
                        if let Some(Frame::Chain { pair, head_done }) = self.frames.last_mut() {
                            *pair = next_pair;
                            *head_done = false;
                        }
                    }
                    tail => {
                        // Improper tail, or a tail that must back-reference.
                        self.out.push(tags::LOT_CONS);
                        self.frames.pop();
                        self.datum(&tail)?;
                    }
                },
            }
        }
    }

    fn leaf(&mut self, value: &Value) -> Result<()> {
        match value {
            Value::Bool(true) => self.out.push(tags::BOOLEAN_TRUE),
            Value::Bool(false) => self.out.push(tags::BOOLEAN_FALSE),
            Value::Short(n) => {
                self.out.push(tags::SHORT);
                self.out.extend_from_slice(&n.to_be_bytes());
            }
            Value::Int(n) => {
                self.out.push(tags::INT);
                self.out.extend_from_slice(&n.to_be_bytes());
            }
            Value::Long(n) => {
                self.out.push(tags::LONG);
                self.out.extend_from_slice(&n.to_be_bytes());
            }
            Value::Float(x) => {
                self.out.push(tags::FLOAT);
                self.out.extend_from_slice(&x.to_bits().to_be_bytes());
            }
            Value::Double(x) => {
                self.out.push(tags::DOUBLE);
                self.out.extend_from_slice(&x.to_bits().to_be_bytes());
            }
            Value::Char(c) => {
                self.out.push(tags::CHAR);
                let mut buf = [0u8; 4];
                self.out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
            }
            Value::Text(s) => {
                self.out.push(tags::STRING);
                write_varint(&mut self.out, s.len() as u64);
                self.out.extend_from_slice(s.as_bytes());
            }
            Value::Bools(xs) => {
                self.out.push(tags::BOOLEANS);
                write_varint(&mut self.out, xs.len() as u64);
                self.out.extend(xs.iter().map(|x| u8::from(*x)));
            }
            Value::Shorts(xs) => {
                self.out.push(tags::SHORTS);
                write_varint(&mut self.out, xs.len() as u64);
                for x in xs.iter() {
                    self.out.extend_from_slice(&x.to_be_bytes());
                }
            }
            Value::Ints(xs) => {
                self.out.push(tags::INTS);
                write_varint(&mut self.out, xs.len() as u64);
                for x in xs.iter() {
                    self.out.extend_from_slice(&x.to_be_bytes());
                }
            }
            Value::Longs(xs) => {
                self.out.push(tags::LONGS);
                write_varint(&mut self.out, xs.len() as u64);
                for x in xs.iter() {
                    self.out.extend_from_slice(&x.to_be_bytes());
                }
            }
            Value::Floats(xs) => {
                self.out.push(tags::FLOATS);
                write_varint(&mut self.out, xs.len() as u64);
                for x in xs.iter() {
                    self.out.extend_from_slice(&x.to_bits().to_be_bytes());
                }
            }
            Value::Doubles(xs) => {
                self.out.push(tags::DOUBLES);
                write_varint(&mut self.out, xs.len() as u64);
                for x in xs.iter() {
                    self.out.extend_from_slice(&x.to_bits().to_be_bytes());
                }
            }
            Value::Time(t) => {
                self.out.push(tags::TIME);
                self.out.extend_from_slice(&t.secs().to_be_bytes());
                self.out.extend_from_slice(&t.nanos().to_be_bytes());
            }
            Value::Date(d) => {
                self.out.push(tags::DATE);
                self.out.extend_from_slice(&d.year.to_be_bytes());
                self.out.extend_from_slice(&[
                    d.month, d.day, d.weekday, d.hour, d.minute, d.second,
                ]);
                self.out.extend_from_slice(&d.nanos.to_be_bytes());
                self.out.extend_from_slice(&d.offset_secs.to_be_bytes());
            }
            Value::Symbol(_) => return Err(Error::UnsupportedType("symbol")),
            Value::Lot(Lot::Empty) => {
                self.out.push(tags::LOT_BEGIN);
                self.out.push(tags::LOT_END);
            }
            // Containers are routed through datum()/container().
            Value::Few(_) | Value::Lot(Lot::Pair(_)) => return self.container(value),
        }
        Ok(())
    }
}
