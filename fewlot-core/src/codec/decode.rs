// fewlot-core - Binary decoder
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Value-graph decoding.
//!
//! Decoding runs in three phases. First a placeholder shell is allocated
//! for every shared-node slot the header announces, so back-references
//! always have a target identity. Then each header body and finally the
//! payload are decoded; a `SHARE_INDEX` that points at a slot whose body
//! has already been decoded resolves immediately, while a forward or
//! cyclic reference is recorded as a deferred patch against the position
//! it must fill. Last, the patch list replays, stitching the recorded
//! positions to the finished shells. The result reproduces the encoded
//! graph's aliasing and cycles exactly.
//!
//! The input is consumed strictly: truncation, unknown tags, malformed
//! chain grammar and trailing bytes all fail with
//! [`Error::MalformedBinary`].

use fewlot_model::{Date, Few, Lot, Pair, Time, Value};

use crate::error::{Error, Result};

use super::tags;

/// Decode a value graph from bytes produced by [`super::encode`].
pub fn decode(buf: &[u8]) -> Result<Value> {
    let mut dec = Decoder::new(buf);
    let value = dec.decode()?;
    Ok(value)
}

/// A position in the graph under construction that a back-reference must
/// eventually fill.
#[derive(Clone)]
enum Target {
    FewSlot { node: Few, index: usize },
    Head(Pair),
    Tail(Pair),
}

/// A back-reference whose shell was not yet populated when it was read.
struct Patch {
    target: Target,
    share: usize,
}

/// Cursor over the input bytes.
struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn u8(&mut self) -> Result<u8> {
        let b = *self.buf.get(self.pos).ok_or_else(Error::truncated)?;
        self.pos += 1;
        Ok(b)
    }

    fn peek(&self) -> Result<u8> {
        self.buf.get(self.pos).copied().ok_or_else(Error::truncated)
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        let end = self
            .pos
            .checked_add(n)
            .filter(|end| *end <= self.buf.len())
            .ok_or_else(Error::truncated)?;
        let slice = &self.buf[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    /// Read a varint: a length byte then that many big-endian magnitude
    /// bytes. Lengths above eight are rejected.
    fn varint(&mut self) -> Result<u64> {
        let len = self.u8()? as usize;
        if len > 8 {
            return Err(Error::malformed(format!(
                "varint length {} exceeds 8 bytes",
                len
            )));
        }
        let mut value = 0u64;
        for b in self.take(len)? {
            value = (value << 8) | u64::from(*b);
        }
        Ok(value)
    }

    /// A varint narrowed to a length or index.
    fn varint_len(&mut self) -> Result<usize> {
        let n = self.varint()?;
        usize::try_from(n)
            .map_err(|_| Error::malformed(format!("count {} exceeds address space", n)))
    }

    fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    fn is_at_end(&self) -> bool {
        self.pos == self.buf.len()
    }
}

/// Pending resumption state for one open container.
enum Frame {
    Few { node: Few, next: usize },
    /// A chain whose current pair awaits its head datum, then a chain
    /// marker deciding how the chain continues.
    Chain { pair: Pair, head_done: bool },
}

enum Action {
    Datum(Target),
    Marker,
    Done,
}

struct Decoder<'a> {
    r: Reader<'a>,
    /// Placeholder shells for the shared-node table, patched into real
    /// containers as their bodies decode.
    shells: Vec<Value>,
    done: Vec<bool>,
    patches: Vec<Patch>,
}

impl<'a> Decoder<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Decoder {
            r: Reader { buf, pos: 0 },
            shells: Vec::new(),
            done: Vec::new(),
            patches: Vec::new(),
        }
    }

    fn decode(&mut self) -> Result<Value> {
        if self.r.u8()? != tags::FEW {
            return Err(Error::malformed("stream must open with the shared-node table"));
        }
        let count = self.r.varint_len()?;
        // Every table entry needs at least a tag byte in the stream.
        if count > self.r.remaining() {
            return Err(Error::malformed(format!(
                "shared-node table claims {} entries with {} bytes left",
                count,
                self.r.remaining()
            )));
        }

        // Phase one: placeholder shells. They hold each slot until the
        // real body lands; patches replay against the finished bodies.
        self.shells = (0..count)
            .map(|_| Value::Lot(Lot::pair(Value::Bool(false), Value::Lot(Lot::Empty))))
            .collect();
        self.done = vec![false; count];

        // Phase two: bodies, then payload.
        for i in 0..count {
            let tag = self.r.peek()?;
            if tag != tags::FEW && tag != tags::LOT_BEGIN {
                return Err(Error::malformed(format!(
                    "shared-node body {} must be a container, got tag {:#04x}",
                    i, tag
                )));
            }
            let body = self.datum(None)?;
            self.shells[i] = body;
            self.done[i] = true;
        }
        let value = self.datum(None)?;
        if !self.r.is_at_end() {
            return Err(Error::malformed(format!(
                "{} trailing bytes after the top-level datum",
                self.r.remaining()
            )));
        }

        // Phase three: forward and cyclic references.
        self.apply_patches()?;
        Ok(value)
    }

    /// Decode one complete datum, draining any container frames it opens.
    fn datum(&mut self, target: Option<Target>) -> Result<Value> {
        let mut frames: Vec<Frame> = Vec::new();
        let value = self.step(&mut frames, target)?;

        loop {
            let action = match frames.last_mut() {
                None => return Ok(value),
                Some(Frame::Few { node, next }) => {
                    if *next < node.len() {
                        let t = Target::FewSlot {
                            node: node.clone(),
                            index: *next,
                        };
                        *next += 1;
                        Action::Datum(t)
                    } else {
                        Action::Done
                    }
                }
                Some(Frame::Chain { pair, head_done }) => {
                    if *head_done {
                        Action::Marker
                    } else {
                        *head_done = true;
                        Action::Datum(Target::Head(pair.clone()))
                    }
                }
            };
            match action {
                Action::Done => {
                    frames.pop();
                }
                Action::Datum(target) => {
                    let child = self.step(&mut frames, Some(target.clone()))?;
                    self.place(&target, child)?;
                }
                Action::Marker => match self.r.u8()? {
                    tags::LOT_END => {
                        frames.pop();
                    }
                    tags::NEXT_LOT => {
                        let next_pair = Pair::new(Value::Bool(false), Value::Lot(Lot::Empty));
                        if let Some(Frame::Chain { pair, head_done }) = frames.last_mut() {
                            pair.set_tail(Value::Lot(Lot::Pair(next_pair.clone())));
                            *pair = next_pair;
                            *head_done = false;
                        }
                    }
                    tags::LOT_CONS => {
                        let Some(Frame::Chain { pair, .. }) = frames.pop() else {
                            return Err(Error::malformed("LOT_CONS outside a chain"));
                        };
                        let target = Target::Tail(pair);
                        let tail = self.step(&mut frames, Some(target.clone()))?;
                        self.place(&target, tail)?;
                    }
                    other => {
                        return Err(Error::malformed(format!(
                            "expected a chain marker, got tag {:#04x}",
                            other
                        )))
                    }
                },
            }
        }
    }

    /// Write a decoded child into its container position. Placeholder
    /// values from unresolved back-references were already recorded as
    /// patches; they still occupy the position until the replay.
    fn place(&mut self, target: &Target, child: Value) -> Result<()> {
        match target {
            Target::FewSlot { node, index } => node.set(*index, child)?,
            Target::Head(pair) => pair.set_head(child),
            Target::Tail(pair) => pair.set_tail(child),
        }
        Ok(())
    }

    /// Decode the next tag. Containers push a frame and return their
    /// (still empty) node; everything else returns the finished value.
    fn step(&mut self, frames: &mut Vec<Frame>, target: Option<Target>) -> Result<Value> {
        let tag = self.r.u8()?;
        let value = match tag {
            tags::BOOLEAN_TRUE => Value::Bool(true),
            tags::BOOLEAN_FALSE => Value::Bool(false),
            tags::SHORT => Value::Short(i16::from_be_bytes(fixed(self.r.take(2)?))),
            tags::INT => Value::Int(i32::from_be_bytes(fixed(self.r.take(4)?))),
            tags::LONG => Value::Long(i64::from_be_bytes(fixed(self.r.take(8)?))),
            tags::FLOAT => Value::Float(f32::from_bits(u32::from_be_bytes(fixed(
                self.r.take(4)?,
            )))),
            tags::DOUBLE => Value::Double(f64::from_bits(u64::from_be_bytes(fixed(
                self.r.take(8)?,
            )))),
            tags::CHAR => Value::Char(self.char_datum()?),
            tags::STRING => {
                let len = self.r.varint_len()?;
                let bytes = self.r.take(len)?;
                let s = std::str::from_utf8(bytes)
                    .map_err(|_| Error::malformed("string bytes are not valid UTF-8"))?;
                Value::text(s)
            }
            tags::BOOLEANS => {
                let len = self.r.varint_len()?;
                let bytes = self.r.take(len)?;
                let mut xs = Vec::with_capacity(len);
                for b in bytes {
                    match b {
                        0 => xs.push(false),
                        1 => xs.push(true),
                        other => {
                            return Err(Error::malformed(format!(
                                "boolean array byte {:#04x}",
                                other
                            )))
                        }
                    }
                }
                Value::Bools(xs.into())
            }
            tags::SHORTS => {
                Value::Shorts(self.array(2, |c| i16::from_be_bytes(fixed(c)))?.into())
            }
            tags::INTS => Value::Ints(self.array(4, |c| i32::from_be_bytes(fixed(c)))?.into()),
            tags::LONGS => Value::Longs(self.array(8, |c| i64::from_be_bytes(fixed(c)))?.into()),
            tags::FLOATS => Value::Floats(
                self.array(4, |c| f32::from_bits(u32::from_be_bytes(fixed(c))))?
                    .into(),
            ),
            tags::DOUBLES => Value::Doubles(
                self.array(8, |c| f64::from_bits(u64::from_be_bytes(fixed(c))))?
                    .into(),
            ),
            tags::TIME => {
                let secs = i64::from_be_bytes(fixed(self.r.take(8)?));
                let nanos = u32::from_be_bytes(fixed(self.r.take(4)?));
                Value::Time(
                    Time::new(secs, nanos)
                        .map_err(|e| Error::malformed(format!("time datum: {}", e)))?,
                )
            }
            tags::DATE => {
                let year = i32::from_be_bytes(fixed(self.r.take(4)?));
                let parts = self.r.take(6)?;
                let (month, day, weekday, hour, minute, second) =
                    (parts[0], parts[1], parts[2], parts[3], parts[4], parts[5]);
                let nanos = u32::from_be_bytes(fixed(self.r.take(4)?));
                let offset_secs = i32::from_be_bytes(fixed(self.r.take(4)?));
                Value::Date(
                    Date::new(year, month, day, weekday, hour, minute, second, nanos, offset_secs)
                        .map_err(|e| Error::malformed(format!("date datum: {}", e)))?,
                )
            }
            tags::FEW => {
                let len = self.r.varint_len()?;
                // One tag byte minimum per element.
                if len > self.r.remaining() {
                    return Err(Error::malformed(format!(
                        "array of {} elements with {} bytes left",
                        len,
                        self.r.remaining()
                    )));
                }
                let node = Few::with_len(len);
                if len > 0 {
                    frames.push(Frame::Few {
                        node: node.clone(),
                        next: 0,
                    });
                }
                Value::Few(node)
            }
            tags::LOT_BEGIN => {
                if self.r.peek()? == tags::LOT_END {
                    self.r.u8()?;
                    Value::Lot(Lot::Empty)
                } else {
                    let pair = Pair::new(Value::Bool(false), Value::Lot(Lot::Empty));
                    frames.push(Frame::Chain {
                        pair: pair.clone(),
                        head_done: false,
                    });
                    Value::Lot(Lot::Pair(pair))
                }
            }
            tags::SHARE_INDEX => {
                let i = self.r.varint_len()?;
                let shell = self
                    .shells
                    .get(i)
                    .cloned()
                    .ok_or_else(|| Error::malformed(format!("back-reference {} out of range", i)))?;
                if !self.done[i] {
                    // The body is not decoded yet; remember the position.
                    let target = target.ok_or_else(|| {
                        Error::malformed("top-level datum cannot be a bare back-reference")
                    })?;
                    self.patches.push(Patch { target, share: i });
                }
                shell
            }
            tags::NEXT_LOT | tags::LOT_CONS | tags::LOT_END => {
                return Err(Error::malformed(format!(
                    "chain marker {:#04x} in datum position",
                    tag
                )))
            }
            other => return Err(Error::UnknownTag(other)),
        };
        Ok(value)
    }

    fn char_datum(&mut self) -> Result<char> {
        let first = self.r.u8()?;
        let width = match first {
            0x00..=0x7f => 1,
            0xc0..=0xdf => 2,
            0xe0..=0xef => 3,
            0xf0..=0xf7 => 4,
            _ => return Err(Error::malformed("character datum is not valid UTF-8")),
        };
        let mut bytes = [0u8; 4];
        bytes[0] = first;
        bytes[1..width].copy_from_slice(self.r.take(width - 1)?);
        std::str::from_utf8(&bytes[..width])
            .ok()
            .and_then(|s| s.chars().next())
            .ok_or_else(|| Error::malformed("character datum is not valid UTF-8"))
    }

    fn array<T>(&mut self, width: usize, read: impl Fn(&[u8]) -> T) -> Result<Vec<T>> {
        let len = self.r.varint_len()?;
        let total = len
            .checked_mul(width)
            .ok_or_else(|| Error::malformed("array byte length overflows"))?;
        let bytes = self.r.take(total)?;
        Ok(bytes.chunks_exact(width).map(read).collect())
    }

    /// Replay the deferred back-references against the finished shells.
    /// Shells decoded with phase-two placeholder contents become real once
    /// every recorded position points at them.
    fn apply_patches(&mut self) -> Result<()> {
        // done[] is all true after phase two; the check guards internal
        // consistency rather than input shape.
        for patch in &self.patches {
            let shell = self
                .shells
                .get(patch.share)
                .cloned()
                .ok_or_else(|| Error::malformed("patch references a missing shell"))?;
            match &patch.target {
                Target::FewSlot { node, index } => node.set(*index, shell)?,
                Target::Head(pair) => pair.set_head(shell),
                Target::Tail(pair) => pair.set_tail(shell),
            }
        }
        Ok(())
    }
}

fn fixed<const N: usize>(slice: &[u8]) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(slice);
    out
}
