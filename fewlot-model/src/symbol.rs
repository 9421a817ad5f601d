// fewlot-model - Symbol type with checksum-chained interning
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Symbols are interned identifiers compared by content.
//!
//! # Interning
//!
//! Symbols are interned through a global table keyed by a SipHash-1-3
//! content checksum. Two symbols spelled the same way share the same
//! underlying storage, which gives:
//!
//! - **O(1) equality**: comparing symbols is a pointer comparison
//! - **O(1) hashing**: the checksum is computed once at intern time
//! - **Memory efficiency**: identical symbols share storage
//!
//! Checksum collisions are not fatal: each checksum bucket is a chain of
//! distinct spellings resolved by full string comparison.
//!
//! # Memory Behaviour
//!
//! **Important**: interned symbols are never deallocated. The global table
//! holds strong references (`Arc`) to every symbol created during the
//! program's lifetime, so memory grows monotonically with unique spellings.
//! Typical programs use a bounded symbol set, so the overhead is modest.
//!
//! # Thread Safety
//!
//! The table is protected by a `Mutex`, making symbol creation thread-safe.
//! Lookup and comparison are lock-free after creation.

use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, Mutex, OnceLock};

use siphasher::sip::SipHasher13;

/// An interned symbol.
///
/// Symbols with the same spelling share the same underlying storage, so
/// equality and hashing are pointer operations.
#[derive(Clone)]
pub struct Symbol {
    inner: Arc<SymbolInner>,
}

#[derive(Debug)]
struct SymbolInner {
    name: Arc<str>,
    checksum: u64,
}

/// Global symbol table
static SYMBOL_TABLE: OnceLock<Mutex<SymbolTable>> = OnceLock::new();

struct SymbolTable {
    /// Checksum -> chain of distinct spellings with that checksum.
    /// Chains are scanned by full string compare, so a checksum
    /// collision costs a comparison instead of an error.
    buckets: HashMap<u64, Vec<Arc<SymbolInner>>>,
}

/// Content checksum: SipHash-1-3 with fixed zero keys, stable across runs.
fn checksum(name: &str) -> u64 {
    let mut hasher = SipHasher13::new_with_keys(0, 0);
    hasher.write(name.as_bytes());
    hasher.finish()
}

impl SymbolTable {
    fn new() -> Self {
        SymbolTable {
            buckets: HashMap::new(),
        }
    }

    fn intern(&mut self, name: &str) -> Arc<SymbolInner> {
        let sum = checksum(name);
        let chain = self.buckets.entry(sum).or_default();
        if let Some(existing) = chain.iter().find(|s| &*s.name == name) {
            return Arc::clone(existing);
        }
        let inner = Arc::new(SymbolInner {
            name: Arc::from(name),
            checksum: sum,
        });
        chain.push(Arc::clone(&inner));
        inner
    }
}

fn table() -> &'static Mutex<SymbolTable> {
    SYMBOL_TABLE.get_or_init(|| Mutex::new(SymbolTable::new()))
}

impl Symbol {
    /// Intern a symbol with the given spelling.
    pub fn new(name: &str) -> Self {
        let inner = table()
            .lock()
            .expect("Symbol table mutex poisoned: another thread panicked while holding the lock")
            .intern(name);
        Symbol { inner }
    }

    /// Get the spelling.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Get the content checksum computed at intern time.
    #[must_use]
    pub fn checksum(&self) -> u64 {
        self.inner.checksum
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inner.name)
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self)
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        // Due to interning, pointer comparison is sufficient
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for Symbol {}

impl PartialOrd for Symbol {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Symbol {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.inner.name.cmp(&other.inner.name)
    }
}

impl Hash for Symbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // The checksum was computed once at intern time
        state.write_u64(self.inner.checksum);
    }
}

// ============================================================================
// Tests
// ============================================================================
