//! The binding store.
//!
//! An `Environment` is a handle to one frame of bindings plus an optional
//! parent frame. The global environment has no parent; the evaluator chains
//! child frames onto it for lexical scopes. Handles are cheap to clone and
//! every clone sees the same frame.
//!
//! `define` always targets the handle's own frame and cannot fail. `set`
//! searches outward and fails when nothing binds the symbol. Keeping the
//! two apart is what makes lexical shadowing work.

// Rc is the intentional implementation detail of LocalScope<T>
#![expect(
    clippy::disallowed_types,
    reason = "Rc is the implementation of LocalScope<T>"
)]

use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use scm_ir::{SharedSymbolTable, Symbol, SymbolLookup};

use crate::errors::{unbound_variable, EvalError, EvalResult};
use crate::value::Value;

/// A single-threaded, shared, interior-mutable frame.
///
/// All frame allocations go through `LocalScope::new`. `Rc` (not `Arc`)
/// makes environments `!Send`, so a binding chain can't be mutated from two
/// threads at once.
#[repr(transparent)]
struct LocalScope<T>(Rc<RefCell<T>>);

impl<T> LocalScope<T> {
    #[inline]
    fn new(value: T) -> Self {
        LocalScope(Rc::new(RefCell::new(value)))
    }

    #[inline]
    fn borrow(&self) -> std::cell::Ref<'_, T> {
        self.0.borrow()
    }

    #[inline]
    fn borrow_mut(&self) -> std::cell::RefMut<'_, T> {
        self.0.borrow_mut()
    }

    #[inline]
    fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<T> Clone for LocalScope<T> {
    #[inline]
    fn clone(&self) -> Self {
        LocalScope(Rc::clone(&self.0))
    }
}

/// One level of an environment chain.
struct Frame {
    /// At most one value per symbol; rebinding overwrites.
    bindings: FxHashMap<Symbol, Value>,
    /// Enclosing frame. Fixed at creation, so chains can't form cycles.
    parent: Option<LocalScope<Frame>>,
}

/// Handle to a frame and, through its parents, a whole binding chain.
#[derive(Clone)]
pub struct Environment {
    frame: LocalScope<Frame>,
    /// Table every symbol in this chain was interned in.
    symbols: SharedSymbolTable,
}

impl Environment {
    /// Create an empty global environment with its own symbol table.
    pub fn create_global() -> Self {
        Self::with_symbols(SharedSymbolTable::new())
    }

    /// Create an empty global environment interning into `symbols`.
    ///
    /// Use this when several interpreters must agree on symbol identity.
    pub fn with_symbols(symbols: SharedSymbolTable) -> Self {
        Environment {
            frame: LocalScope::new(Frame {
                bindings: FxHashMap::default(),
                parent: None,
            }),
            symbols,
        }
    }

    /// Create a new, empty frame whose parent is this one.
    ///
    /// Called by the evaluator when it enters a lexical scope. The new
    /// frame lives as long as some handle to it does.
    #[must_use]
    pub fn child(&self) -> Self {
        Environment {
            frame: LocalScope::new(Frame {
                bindings: FxHashMap::default(),
                parent: Some(self.frame.clone()),
            }),
            symbols: self.symbols.clone(),
        }
    }

    /// True for the top-level frame.
    pub fn is_global(&self) -> bool {
        self.frame.borrow().parent.is_none()
    }

    /// Number of frames in the chain, counting this one.
    pub fn depth(&self) -> usize {
        let mut depth = 1;
        let mut parent = self.frame.borrow().parent.clone();
        while let Some(frame) = parent {
            depth += 1;
            parent = frame.borrow().parent.clone();
        }
        depth
    }

    /// True when both handles refer to the same frame.
    pub fn same_frame(&self, other: &Environment) -> bool {
        self.frame.ptr_eq(&other.frame)
    }

    /// The symbol table this chain interns into.
    pub fn symbols(&self) -> &SharedSymbolTable {
        &self.symbols
    }

    /// Intern `name` in this environment's symbol table.
    pub fn intern(&self, name: &str) -> Symbol {
        self.symbols.intern(name)
    }

    /// Bind `symbol` in this frame, replacing any existing binding here.
    ///
    /// Parent frames are never consulted or modified.
    #[inline]
    pub fn define(&mut self, symbol: Symbol, value: Value) {
        self.frame.borrow_mut().bindings.insert(symbol, value);
    }

    /// Value of the nearest binding of `symbol`, searching outward.
    pub fn lookup(&self, symbol: Symbol) -> EvalResult {
        let mut frame = self.frame.clone();
        loop {
            let current = frame.borrow();
            if let Some(value) = current.bindings.get(&symbol) {
                return Ok(value.clone());
            }
            let parent = current.parent.clone();
            drop(current);
            match parent {
                Some(p) => frame = p,
                None => return Err(unbound_variable(&self.symbols.spelling(symbol))),
            }
        }
    }

    /// Replace the value of the nearest existing binding of `symbol`.
    ///
    /// Fails without creating a binding when no frame in the chain binds it.
    pub fn set(&mut self, symbol: Symbol, value: Value) -> Result<(), EvalError> {
        let mut frame = self.frame.clone();
        loop {
            let mut current = frame.borrow_mut();
            if let Some(slot) = current.bindings.get_mut(&symbol) {
                *slot = value;
                return Ok(());
            }
            let parent = current.parent.clone();
            drop(current);
            match parent {
                Some(p) => frame = p,
                None => return Err(unbound_variable(&self.symbols.spelling(symbol))),
            }
        }
    }

    /// `define` by spelling. Returns the interned symbol.
    pub fn define_named(&mut self, name: &str, value: Value) -> Symbol {
        let symbol = self.intern(name);
        self.define(symbol, value);
        symbol
    }

    /// `lookup` by spelling.
    ///
    /// A spelling that was never interned can't be bound, so it is reported
    /// unbound without growing the symbol table.
    pub fn lookup_named(&self, name: &str) -> EvalResult {
        match self.symbols.get(name) {
            Some(symbol) => self.lookup(symbol),
            None => Err(unbound_variable(name)),
        }
    }

    /// Whether any frame in the chain binds `symbol`.
    pub fn is_bound(&self, symbol: Symbol) -> bool {
        self.lookup(symbol).is_ok()
    }

    /// Whether this frame itself binds `symbol`.
    pub fn is_bound_locally(&self, symbol: Symbol) -> bool {
        self.frame.borrow().bindings.contains_key(&symbol)
    }

    /// Symbols bound in this frame, in no particular order.
    pub fn local_symbols(&self) -> Vec<Symbol> {
        self.frame.borrow().bindings.keys().copied().collect()
    }

    /// Number of bindings in this frame.
    pub fn local_len(&self) -> usize {
        self.frame.borrow().bindings.len()
    }

    /// Every visible binding, nearest frame winning.
    pub fn capture(&self) -> FxHashMap<Symbol, Value> {
        let mut captures = FxHashMap::default();
        let mut frame = Some(self.frame.clone());
        while let Some(current) = frame {
            let scope = current.borrow();
            for (symbol, value) in &scope.bindings {
                captures.entry(*symbol).or_insert_with(|| value.clone());
            }
            frame = scope.parent.clone();
        }
        captures
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::create_global()
    }
}

// Bindings are summarized: closures stored here usually capture this frame.
impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Environment")
            .field("depth", &self.depth())
            .field("bindings", &self.local_len())
            .finish_non_exhaustive()
    }
}
