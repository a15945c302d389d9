//! Sharded symbol table.
//!
//! Maps symbol spellings to `Symbol` handles. One table may back several
//! environments at once, so every shard carries its own lock and the count
//! is atomic.

// Arc is the implementation of SharedSymbolTable.
#![expect(
    clippy::disallowed_types,
    reason = "Arc required for SharedSymbolTable thread-safety"
)]

use super::{Symbol, TableTag};
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use std::borrow::Cow;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Per-shard storage for interned spellings.
struct SymbolShard {
    /// Map from spelling to local index.
    map: FxHashMap<&'static str, u32>,
    /// Spellings by local index.
    spellings: Vec<&'static str>,
}

/// Error when interning a spelling fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InternError {
    /// Shard exceeded the 20-bit local index space.
    ShardOverflow { shard_idx: usize, count: usize },
}

impl std::fmt::Display for InternError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InternError::ShardOverflow { shard_idx, count } => write!(
                f,
                "symbol table shard {shard_idx} is full: {count} symbols, max is {}",
                Symbol::MAX_LOCAL
            ),
        }
    }
}

impl std::error::Error for InternError {}

impl SymbolShard {
    fn new() -> Self {
        Self {
            map: FxHashMap::default(),
            spellings: Vec::with_capacity(128),
        }
    }

    fn with_empty() -> Self {
        let mut shard = Self::new();
        // The empty spelling is local index 0 of shard 0
        let empty: &'static str = "";
        shard.map.insert(empty, 0);
        shard.spellings.push(empty);
        shard
    }
}

/// Spellings interned when a table is created.
///
/// Special-form keywords and the boolean constant names are looked up on
/// every evaluation, so they get stable low indices in their shards.
const CORE_SPELLINGS: &[&str] = &[
    "quote",
    "quasiquote",
    "unquote",
    "unquote-splicing",
    "if",
    "define",
    "set!",
    "lambda",
    "begin",
    "let",
    "let*",
    "letrec",
    "and",
    "or",
    "cond",
    "case",
    "else",
    "=>",
    "do",
    "delay",
    "defmacro",
    "true",
    "false",
    "error",
    "apply",
];

/// Sharded, thread-safe symbol table.
///
/// Interning is O(1) amortized and lookups of already-interned spellings
/// only take a shard read lock. Spellings are leaked and live for the rest
/// of the process, which is what gives symbols their process lifetime.
pub struct SymbolTable {
    shards: [RwLock<SymbolShard>; Symbol::NUM_SHARDS],
    /// Stamped into every handle this table hands out.
    tag: TableTag,
    /// Total number of interned spellings across all shards.
    total_count: AtomicUsize,
}

impl SymbolTable {
    /// Create a table with the core spellings pre-interned.
    pub fn new() -> Self {
        let shards = std::array::from_fn(|i| {
            if i == 0 {
                RwLock::new(SymbolShard::with_empty())
            } else {
                RwLock::new(SymbolShard::new())
            }
        });

        let table = Self {
            shards,
            tag: TableTag::fresh(),
            total_count: AtomicUsize::new(1),
        };
        for spelling in CORE_SPELLINGS {
            table.intern(spelling);
        }
        table
    }

    #[inline]
    fn shard_for(s: &str) -> usize {
        let mut hash = 0u32;
        for byte in s.bytes().take(8) {
            hash = hash.wrapping_mul(31).wrapping_add(u32::from(byte));
        }
        (hash as usize) % Symbol::NUM_SHARDS
    }

    /// Intern a spelling, returning its symbol or an error on overflow.
    pub fn try_intern(&self, s: &str) -> Result<Symbol, InternError> {
        self.insert(Cow::Borrowed(s))
    }

    /// Intern an owned spelling without copying it again.
    pub fn try_intern_owned(&self, s: String) -> Result<Symbol, InternError> {
        self.insert(Cow::Owned(s))
    }

    fn insert(&self, s: Cow<'_, str>) -> Result<Symbol, InternError> {
        let shard_idx = Self::shard_for(&s);
        #[expect(
            clippy::cast_possible_truncation,
            reason = "shard_idx is bounded by NUM_SHARDS (16)"
        )]
        let shard_idx_u32 = shard_idx as u32;
        let shard = &self.shards[shard_idx];

        {
            let guard = shard.read();
            if let Some(&local) = guard.map.get(s.as_ref()) {
                return Ok(Symbol::new(self.tag, shard_idx_u32, local));
            }
        }

        let mut guard = shard.write();

        // Another writer may have won the race for this spelling.
        if let Some(&local) = guard.map.get(s.as_ref()) {
            return Ok(Symbol::new(self.tag, shard_idx_u32, local));
        }

        let count = guard.spellings.len();
        let local = u32::try_from(count)
            .ok()
            .filter(|&local| local <= Symbol::MAX_LOCAL)
            .ok_or(InternError::ShardOverflow { shard_idx, count })?;

        let leaked: &'static str = Box::leak(s.into_owned().into_boxed_str());
        guard.spellings.push(leaked);
        guard.map.insert(leaked, local);

        self.total_count.fetch_add(1, Ordering::Relaxed);

        Ok(Symbol::new(self.tag, shard_idx_u32, local))
    }

    /// Intern a spelling.
    ///
    /// # Panics
    /// Panics if a shard is full. Running out of symbol space leaves no
    /// environment that can safely back an evaluator.
    #[inline]
    pub fn intern(&self, s: &str) -> Symbol {
        self.try_intern(s).unwrap_or_else(|e| panic!("{e}"))
    }

    /// Intern an owned spelling.
    ///
    /// # Panics
    /// Panics if a shard is full.
    pub fn intern_owned(&self, s: String) -> Symbol {
        self.try_intern_owned(s).unwrap_or_else(|e| panic!("{e}"))
    }

    /// Return the symbol for a spelling only if it was already interned.
    pub fn get(&self, s: &str) -> Option<Symbol> {
        let shard_idx = Self::shard_for(s);
        let guard = self.shards[shard_idx].read();
        let local = *guard.map.get(s)?;
        #[expect(
            clippy::cast_possible_truncation,
            reason = "shard_idx is bounded by NUM_SHARDS (16)"
        )]
        let shard_idx_u32 = shard_idx as u32;
        Some(Symbol::new(self.tag, shard_idx_u32, local))
    }

    /// Spelling of a symbol this table interned.
    ///
    /// Returns `None` for a handle stamped by another table, or one that
    /// names a slot nothing was interned into. Spellings are never freed,
    /// so the reference is `'static`.
    pub fn try_resolve(&self, symbol: Symbol) -> Option<&'static str> {
        if !symbol.is_from(self.tag) {
            return None;
        }
        let guard = self.shards.get(symbol.shard())?.read();
        guard.spellings.get(symbol.local()).copied()
    }

    /// Spelling of a symbol this table interned.
    ///
    /// # Panics
    /// Panics if `try_resolve` would return `None`. Code that may see
    /// handles from other tables goes through `SymbolLookup::spelling`.
    pub fn resolve(&self, symbol: Symbol) -> &'static str {
        self.try_resolve(symbol)
            .unwrap_or_else(|| panic!("{symbol:?} was not interned by this table"))
    }

    /// True when `symbol` resolves in this table.
    pub fn owns(&self, symbol: Symbol) -> bool {
        self.try_resolve(symbol).is_some()
    }

    /// This table's handle for the empty spelling `||`.
    pub fn empty(&self) -> Symbol {
        Symbol::new(self.tag, 0, 0)
    }

    /// Tag stamped into this table's handles.
    pub fn tag(&self) -> TableTag {
        self.tag
    }

    /// Number of interned spellings, including the empty one.
    pub fn len(&self) -> usize {
        self.total_count.load(Ordering::Relaxed)
    }

    /// True when only the empty spelling is interned.
    pub fn is_empty(&self) -> bool {
        self.len() <= 1
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SymbolTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SymbolTable")
            .field("tag", &self.tag.raw())
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}

/// Read access to symbol spellings.
///
/// Lets value printing and error construction accept any table handle
/// without depending on how it is shared.
pub trait SymbolLookup {
    /// Spelling of a symbol, or `None` if this table did not intern it.
    fn try_resolve(&self, symbol: Symbol) -> Option<&str>;

    /// Spelling of a symbol, falling back to its `#<symbol ..>` placeholder.
    fn spelling(&self, symbol: Symbol) -> Cow<'_, str> {
        match self.try_resolve(symbol) {
            Some(name) => Cow::Borrowed(name),
            None => Cow::Owned(symbol.to_string()),
        }
    }
}

impl SymbolLookup for SymbolTable {
    fn try_resolve(&self, symbol: Symbol) -> Option<&str> {
        SymbolTable::try_resolve(self, symbol)
    }
}

impl SymbolLookup for SharedSymbolTable {
    fn try_resolve(&self, symbol: Symbol) -> Option<&str> {
        self.0.try_resolve(symbol)
    }
}

/// Shared handle to a `SymbolTable`.
///
/// Use one handle per process when several interpreters must agree on
/// symbol identity; otherwise each global environment can own its own
/// table.
#[derive(Clone)]
pub struct SharedSymbolTable(Arc<SymbolTable>);

impl SharedSymbolTable {
    /// Create a new shared table.
    pub fn new() -> Self {
        SharedSymbolTable(Arc::new(SymbolTable::new()))
    }

    /// True when both handles refer to the same table.
    pub fn same_table(&self, other: &SharedSymbolTable) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Default for SharedSymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SharedSymbolTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("SharedSymbolTable").field(&*self.0).finish()
    }
}

impl std::ops::Deref for SharedSymbolTable {
    type Target = SymbolTable;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
