// fewlot-core - Canonical printer with datum labels
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Canonical external representation.
//!
//! [`text`] renders any value graph, cyclic or not, as finite text.
//! Containers print as `(a b c)`, `(a b . c)` for an improper tail, and
//! `#(a b c)` for a Few. Sharing uses datum-label notation: the first
//! visit to a shared node emits `#k=` before its body, any later visit
//! emits only `#k#`, and a cyclic tail renders as `. #k#`.
//!
//! Label ordinals are assigned in first-visit order, so output is
//! canonical for a given graph shape. The walk reuses the detector's
//! iterative frame technique; chain frames are replaced in place, so
//! arbitrarily long chains print with O(1) native stack.

use std::cell::Cell;
use std::fmt::Write;

use fewlot_model::{Few, Lot, Pair, Value};

use crate::detect::{shared_nodes, ShareTable};

// Thread-local print settings (can be configured by a host runtime)
thread_local! {
    /// Maximum number of elements to print per sequence.
    /// None means unlimited. A non-empty sequence always shows its first
    /// element, even under `Some(0)`. Labels and dotted tails are never
    /// elided.
    static PRINT_LENGTH: Cell<Option<usize>> = const { Cell::new(None) };
}

/// Get the current print-length setting.
pub fn get_print_length() -> Option<usize> {
    PRINT_LENGTH.with(|pl| pl.get())
}

/// Set the print-length setting. Returns the previous value.
pub fn set_print_length(len: Option<usize>) -> Option<usize> {
    PRINT_LENGTH.with(|pl| pl.replace(len))
}

/// Pending resumption state for one open container.
enum Frame {
    Few {
        node: Few,
        next: usize,
    },
    /// An open chain whose current head has just been printed; the tail
    /// decides whether the chain continues, dots, or closes.
    Chain {
        pair: Pair,
        printed: usize,
    },
    /// Close the paren after a dotted tail datum.
    CloseParen,
}

/// Render the canonical external representation of a value graph.
///
/// Output is finite for every graph, including true cycles.
#[must_use]
pub fn text(value: &Value) -> String {
    let mut table = shared_nodes(value);
    let mut next_label = 0usize;
    let cap = get_print_length();
    let mut out = String::new();
    let mut frames: Vec<Frame> = Vec::new();
    let mut current = Some(value.clone());

    loop {
        while let Some(v) = current.take() {
            current = emit_datum(&v, &mut out, &mut table, &mut next_label, &mut frames);
        }

        // Pull the next pending child, closing finished containers.
        loop {
            match frames.last_mut() {
                None => return out,
                Some(Frame::Few { node, next }) => {
                    if *next >= node.len() {
                        out.push(')');
                        frames.pop();
                        continue;
                    }
                    // the first element always prints, like chain heads
                    if *next > 0 && cap.is_some_and(|n| *next >= n) {
                        out.push_str(" ...)");
                        frames.pop();
                        continue;
                    }
                    if *next > 0 {
                        out.push(' ');
                    }
                    current = Some(node.element(*next));
                    *next += 1;
                    break;
                }
                Some(Frame::Chain { pair, printed }) => {
                    match pair.tail() {
                        Value::Lot(Lot::Empty) => {
                            out.push(')');
                            frames.pop();
                            continue;
                        }
                        Value::Lot(Lot::Pair(next_pair))
                            if !table.is_shared(next_pair.node_id()) =>
                        {
                            if cap.is_some_and(|n| *printed >= n) {
                                out.push_str(" ...)");
                                frames.pop();
                                continue;
                            }
                            out.push(' ');
                            *printed += 1;
                            *pair = next_pair.clone();
                            current = Some(next_pair.head());
                            break;
                        }
                        // Shared pair tails and improper tails both dot.
                        tail => {
                            out.push_str(" . ");
                            frames.pop();
                            frames.push(Frame::CloseParen);
                            current = Some(tail);
                            break;
                        }
                    }
                }
                Some(Frame::CloseParen) => {
                    out.push(')');
                    frames.pop();
                }
            }
        }
    }
}

/// Emit one datum. Opens a frame for containers; returns the value to
/// descend into next, if any.
fn emit_datum(
    value: &Value,
    out: &mut String,
    table: &mut ShareTable,
    next_label: &mut usize,
    frames: &mut Vec<Frame>,
) -> Option<Value> {
    if let Some(id) = value.node_id() {
        if let Some(slot) = table.slot(id) {
            if slot.closed {
                // Later visit: back-reference only, never re-expand.
                let label = slot.order.unwrap_or(0);
                let _ = write!(out, "#{}#", label);
                return None;
            }
            let label = *next_label;
            *next_label += 1;
            table.close(id, label);
            let _ = write!(out, "#{}=", label);
        }
    }

    match value {
        Value::Bool(true) => out.push_str("#t"),
        Value::Bool(false) => out.push_str("#f"),
        Value::Short(n) => {
            let _ = write!(out, "{}", n);
        }
        Value::Int(n) => {
            let _ = write!(out, "{}", n);
        }
        Value::Long(n) => {
            let _ = write!(out, "{}", n);
        }
        Value::Float(x) => {
            let _ = write!(out, "{:?}", x);
        }
        Value::Double(x) => {
            let _ = write!(out, "{:?}", x);
        }
        Value::Char(c) => emit_char(*c, out),
        Value::Text(s) => emit_text(s, out),
        Value::Bools(xs) => {
            out.push_str("#bool(");
            for (i, x) in xs.iter().enumerate() {
                if i > 0 {
                    out.push(' ');
                }
                out.push_str(if *x { "#t" } else { "#f" });
            }
            out.push(')');
        }
        Value::Shorts(xs) => emit_int_array("#s16(", xs.iter(), out),
        Value::Ints(xs) => emit_int_array("#s32(", xs.iter(), out),
        Value::Longs(xs) => emit_int_array("#s64(", xs.iter(), out),
        Value::Floats(xs) => {
            out.push_str("#f32(");
            for (i, x) in xs.iter().enumerate() {
                if i > 0 {
                    out.push(' ');
                }
                let _ = write!(out, "{:?}", x);
            }
            out.push(')');
        }
        Value::Doubles(xs) => {
            out.push_str("#f64(");
            for (i, x) in xs.iter().enumerate() {
                if i > 0 {
                    out.push(' ');
                }
                let _ = write!(out, "{:?}", x);
            }
            out.push(')');
        }
        Value::Time(t) => {
            let _ = write!(out, "#<time {}>", t);
        }
        Value::Date(d) => {
            let _ = write!(out, "#<date {}>", d);
        }
        Value::Symbol(sym) => out.push_str(sym.name()),
        Value::Few(node) => {
            out.push_str("#(");
            frames.push(Frame::Few {
                node: node.clone(),
                next: 0,
            });
        }
        Value::Lot(Lot::Empty) => out.push_str("()"),
        Value::Lot(Lot::Pair(pair)) => {
            out.push('(');
            frames.push(Frame::Chain {
                pair: pair.clone(),
                printed: 1,
            });
            return Some(pair.head());
        }
    }
    None
}

fn emit_int_array<T: std::fmt::Display>(
    open: &str,
    items: impl Iterator<Item = T>,
    out: &mut String,
) {
    out.push_str(open);
    for (i, x) in items.enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let _ = write!(out, "{}", x);
    }
    out.push(')');
}

/// Character literals: named escapes for the named control and space
/// characters, hex escapes for other controls, the literal otherwise.
fn emit_char(c: char, out: &mut String) {
    let named = match c {
        '\0' => Some("null"),
        '\u{7}' => Some("alarm"),
        '\u{8}' => Some("backspace"),
        '\t' => Some("tab"),
        '\n' => Some("newline"),
        '\r' => Some("return"),
        '\u{1b}' => Some("escape"),
        ' ' => Some("space"),
        '\u{7f}' => Some("delete"),
        _ => None,
    };
    match named {
        Some(name) => {
            let _ = write!(out, "#\\{}", name);
        }
        None if c.is_control() => {
            let _ = write!(out, "#\\x{:x}", c as u32);
        }
        None => {
            let _ = write!(out, "#\\{}", c);
        }
    }
}

/// Strings escape the quote, the backslash, and control characters.
fn emit_text(s: &str, out: &mut String) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(out, "\\x{:x};", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
}

// ============================================================================
// Tests
// ============================================================================
