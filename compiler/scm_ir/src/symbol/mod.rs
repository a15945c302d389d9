//! Interned symbol handle.
//!
//! A `Symbol` is a compact 32-bit identity for a Scheme symbol. Two symbols
//! from the same table are the same symbol exactly when their handles are
//! equal, so comparison never touches the spelling.
//!
//! Every handle carries the tag of the table that interned it. A table
//! refuses to resolve a handle with another tag, which is what keeps a
//! symbol that leaked from one global environment from being read as an
//! unrelated spelling (or an out-of-range index) in another.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU8, Ordering};

/// Identifies the `SymbolTable` a handle came from.
///
/// Tags are handed out round-robin, so after 256 tables two live tables may
/// share one. Resolution still bounds-checks, so a shared tag can at worst
/// name the wrong spelling, never read outside a shard.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct TableTag(u8);

static NEXT_TAG: AtomicU8 = AtomicU8::new(0);

impl TableTag {
    /// Next tag in sequence, wrapping after 255.
    pub fn fresh() -> Self {
        TableTag(NEXT_TAG.fetch_add(1, Ordering::Relaxed))
    }

    #[inline]
    pub const fn from_raw(raw: u8) -> Self {
        TableTag(raw)
    }

    #[inline]
    pub const fn raw(self) -> u8 {
        self.0
    }
}

/// Interned symbol identity.
///
/// Layout, high to low:
/// - Bits 31-24: table tag
/// - Bits 23-20: shard index (0-15)
/// - Bits 19-0: local index within the shard
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd)]
#[repr(transparent)]
pub struct Symbol(u32);

impl Symbol {
    /// Maximum local index per shard.
    pub const MAX_LOCAL: u32 = 0x000F_FFFF;

    /// Number of shards.
    pub const NUM_SHARDS: usize = 16;

    const SHARD_BITS: u32 = 20;
    const TAG_BITS: u32 = 24;

    /// Build a handle from its parts.
    ///
    /// Only a table's own handles resolve against it; a handle assembled by
    /// hand is treated as foreign unless it matches an interned slot.
    #[inline]
    pub fn new(table: TableTag, shard: u32, local: u32) -> Self {
        debug_assert!(shard < 16);
        debug_assert!(local <= Self::MAX_LOCAL);
        Symbol(
            (u32::from(table.0) << Self::TAG_BITS)
                | ((shard & 0xF) << Self::SHARD_BITS)
                | (local & Self::MAX_LOCAL),
        )
    }

    /// Tag of the interning table.
    #[inline]
    pub const fn table(self) -> TableTag {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "the shift leaves only the 8 tag bits"
        )]
        let tag = (self.0 >> Self::TAG_BITS) as u8;
        TableTag(tag)
    }

    /// Extract shard index.
    #[inline]
    pub const fn shard(self) -> usize {
        ((self.0 >> Self::SHARD_BITS) & 0xF) as usize
    }

    /// Extract local index.
    #[inline]
    pub const fn local(self) -> usize {
        (self.0 & Self::MAX_LOCAL) as usize
    }

    /// True when `table` interned this handle.
    #[inline]
    pub fn is_from(self, table: TableTag) -> bool {
        self.table() == table
    }

    /// Get raw u32 value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl Hash for Symbol {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Symbol(table={}, shard={}, local={})",
            self.table().raw(),
            self.shard(),
            self.local()
        )
    }
}

/// Stand-in text for a symbol whose spelling is not at hand.
impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#<symbol {}:{}:{}>",
            self.table().raw(),
            self.shard(),
            self.local()
        )
    }
}
