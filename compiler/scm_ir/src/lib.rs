//! scm IR - symbols and names shared by the scm runtime.
//!
//! - `Symbol`: interned 32-bit symbol identity, stamped with its table's
//!   `TableTag`
//! - `SymbolTable` / `SharedSymbolTable`: the sharded intern table
//! - `text_length` / `check_literal_name`: the literal-name utility used by
//!   library installers
//!
//! Everything here is independent of values and environments so that a
//! reader or printer can depend on it without pulling in the runtime.

mod interner;
mod symbol;
mod text;

pub use interner::{InternError, SharedSymbolTable, SymbolLookup, SymbolTable};
pub use symbol::{Symbol, TableTag};
pub use text::{check_literal_name, text_length, TextError};
