//! Runtime values.
//!
//! `Value` is a closed sum over everything the primitive libraries produce or
//! consume. Immediates (booleans, characters, integers, symbols, syntax
//! markers) are stored inline; everything else lives behind `Heap<T>`, whose
//! constructor is private to this module, so the factory methods below are
//! the only way to allocate.
//!
//! ```text
//! let s = Value::string("hello");                 // OK
//! let l = Value::list(vec![Value::Int(1)]);       // OK
//! let p = Value::Pair(Heap::new(...));            // ERROR: Heap::new is pub(super)
//! ```
//!
//! Values are single-threaded: `Heap` uses `Rc`, and lambdas hold their
//! environment.

mod condition;
mod heap;
mod procedure;
mod syntax;

use std::fmt::{self, Write as _};

use scm_ir::{Symbol, SymbolLookup};

pub use condition::Condition;
pub use heap::Heap;
pub use procedure::{Arity, Lambda, Primitive, PrimitiveFn};
pub use syntax::SyntaxForm;

/// A cons cell.
#[derive(Clone, Debug)]
pub struct Pair {
    pub car: Value,
    pub cdr: Value,
}

/// Unlinks the `cdr` spine one cell at a time. Dropping a long list through
/// the derived glue would recurse once per cell.
impl Drop for Pair {
    fn drop(&mut self) {
        let mut next = std::mem::replace(&mut self.cdr, Value::Nil);
        while let Value::Pair(cell) = next {
            match Heap::try_unwrap(cell) {
                Ok(mut pair) => next = std::mem::replace(&mut pair.cdr, Value::Nil),
                // Still shared; whoever holds the other handle frees the rest.
                Err(_) => break,
            }
        }
    }
}

/// Runtime value.
#[derive(Clone, Debug)]
pub enum Value {
    // Immediates
    /// The empty list `()`.
    Nil,
    /// Result of forms and procedures with no useful value.
    Unspecified,
    Bool(bool),
    Char(char),
    /// Fixnum. The full numeric tower belongs to the evaluator.
    Int(i64),
    Symbol(Symbol),
    /// Special-form marker bound by the syntax library.
    Syntax(SyntaxForm),
    /// Built-in procedure; identity is the descriptor's address.
    Primitive(&'static Primitive),

    // Heap values
    Str(Heap<String>),
    Pair(Heap<Pair>),
    Lambda(Heap<Lambda>),
    Condition(Heap<Condition>),
}

// Factory Methods

impl Value {
    #[inline]
    pub fn string(s: impl Into<String>) -> Self {
        Value::Str(Heap::new(s.into()))
    }

    #[inline]
    pub fn cons(car: Value, cdr: Value) -> Self {
        Value::Pair(Heap::new(Pair { car, cdr }))
    }

    /// Build a proper list from `items`.
    pub fn list(items: Vec<Value>) -> Self {
        items
            .into_iter()
            .rev()
            .fold(Value::Nil, |tail, item| Value::cons(item, tail))
    }

    #[inline]
    pub fn lambda(lambda: Lambda) -> Self {
        Value::Lambda(Heap::new(lambda))
    }

    #[inline]
    pub fn condition(condition: Condition) -> Self {
        Value::Condition(Heap::new(condition))
    }
}

// Value Methods

impl Value {
    /// Scheme truthiness: only `#f` is false.
    #[inline]
    pub fn is_true(&self) -> bool {
        !matches!(self, Value::Bool(false))
    }

    /// True for primitives and lambdas. Syntax markers are not procedures.
    #[inline]
    pub fn is_procedure(&self) -> bool {
        matches!(self, Value::Primitive(_) | Value::Lambda(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_char(&self) -> Option<char> {
        match self {
            Value::Char(c) => Some(*c),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_symbol(&self) -> Option<Symbol> {
        match self {
            Value::Symbol(s) => Some(*s),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_syntax(&self) -> Option<SyntaxForm> {
        match self {
            Value::Syntax(form) => Some(*form),
            _ => None,
        }
    }

    pub fn as_condition(&self) -> Option<&Condition> {
        match self {
            Value::Condition(c) => Some(c),
            _ => None,
        }
    }

    /// Elements of a proper list, or `None` for anything else.
    pub fn list_to_vec(&self) -> Option<Vec<Value>> {
        let mut items = Vec::new();
        let mut cur = self;
        loop {
            match cur {
                Value::Nil => return Some(items),
                Value::Pair(pair) => {
                    items.push(pair.car.clone());
                    cur = &pair.cdr;
                }
                _ => return None,
            }
        }
    }

    /// Type name for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "null",
            Value::Unspecified => "unspecified",
            Value::Bool(_) => "boolean",
            Value::Char(_) => "char",
            Value::Int(_) => "integer",
            Value::Symbol(_) => "symbol",
            Value::Syntax(_) => "syntax",
            Value::Primitive(_) | Value::Lambda(_) => "procedure",
            Value::Str(_) => "string",
            Value::Pair(_) => "pair",
            Value::Condition(_) => "condition",
        }
    }

    /// `eqv?`: value equality for immediates, identity for heap values.
    pub fn eqv(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) | (Value::Unspecified, Value::Unspecified) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Char(a), Value::Char(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Symbol(a), Value::Symbol(b)) => a == b,
            (Value::Syntax(a), Value::Syntax(b)) => a == b,
            (Value::Primitive(a), Value::Primitive(b)) => std::ptr::eq(*a, *b),
            (Value::Str(a), Value::Str(b)) => Heap::ptr_eq(a, b),
            (Value::Pair(a), Value::Pair(b)) => Heap::ptr_eq(a, b),
            (Value::Lambda(a), Value::Lambda(b)) => Heap::ptr_eq(a, b),
            (Value::Condition(a), Value::Condition(b)) => Heap::ptr_eq(a, b),
            _ => false,
        }
    }

    /// `equal?`: structural equality through pairs, strings and conditions.
    pub fn equal(&self, other: &Value) -> bool {
        let (mut a, mut b) = (self, other);
        // Walk list spines iteratively so long lists don't recurse per cell.
        loop {
            match (a, b) {
                (Value::Pair(pa), Value::Pair(pb)) => {
                    if Heap::ptr_eq(pa, pb) {
                        return true;
                    }
                    if !pa.car.equal(&pb.car) {
                        return false;
                    }
                    a = &pa.cdr;
                    b = &pb.cdr;
                }
                (Value::Str(sa), Value::Str(sb)) => return sa.as_str() == sb.as_str(),
                (Value::Condition(ca), Value::Condition(cb)) => {
                    return ca.message() == cb.message()
                        && ca.irritants().len() == cb.irritants().len()
                        && ca
                            .irritants()
                            .iter()
                            .zip(cb.irritants())
                            .all(|(x, y)| x.equal(y));
                }
                _ => return a.eqv(b),
            }
        }
    }

    /// External representation, as `write` would print it.
    pub fn write_with<L: SymbolLookup + ?Sized>(&self, symbols: &L) -> String {
        self.written(symbols).to_string()
    }

    /// Display adapter for the external representation.
    ///
    /// Symbols the table does not know print as their `#<symbol ..>`
    /// placeholder.
    pub fn written<'a, L: SymbolLookup + ?Sized>(&'a self, symbols: &'a L) -> Written<'a, L> {
        Written {
            value: self,
            symbols,
        }
    }
}

/// `Value` paired with the table that spells its symbols.
pub struct Written<'a, L: SymbolLookup + ?Sized> {
    value: &'a Value,
    symbols: &'a L,
}

impl<L: SymbolLookup + ?Sized> fmt::Display for Written<'_, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_value(self.value, f)
    }
}

impl<L: SymbolLookup + ?Sized> Written<'_, L> {
    fn write_value(&self, value: &Value, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match value {
            Value::Nil => f.write_str("()"),
            Value::Unspecified => f.write_str("#<unspecified>"),
            Value::Bool(true) => f.write_str("#t"),
            Value::Bool(false) => f.write_str("#f"),
            Value::Char(c) => write_char(*c, f),
            Value::Int(n) => write!(f, "{n}"),
            Value::Symbol(s) => f.write_str(&self.symbols.spelling(*s)),
            Value::Syntax(form) => write!(f, "#<syntax {form}>"),
            Value::Primitive(p) => write!(f, "#<primitive {}>", p.name()),
            Value::Str(s) => write_string(s, f),
            Value::Pair(_) => self.write_list(value, f),
            Value::Lambda(l) => match l.name {
                Some(name) => write!(f, "#<procedure {}>", self.symbols.spelling(name)),
                None => f.write_str("#<procedure>"),
            },
            Value::Condition(c) => write!(f, "#<condition {}>", c.message()),
        }
    }

    fn write_list(&self, list: &Value, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char('(')?;
        let mut cur = list;
        let mut first = true;
        loop {
            match cur {
                Value::Pair(pair) => {
                    if !first {
                        f.write_char(' ')?;
                    }
                    first = false;
                    self.write_value(&pair.car, f)?;
                    cur = &pair.cdr;
                }
                Value::Nil => break,
                tail => {
                    f.write_str(" . ")?;
                    self.write_value(tail, f)?;
                    break;
                }
            }
        }
        f.write_char(')')
    }
}

fn write_char(c: char, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("#\\")?;
    match c {
        ' ' => f.write_str("space"),
        '\n' => f.write_str("newline"),
        '\t' => f.write_str("tab"),
        '\r' => f.write_str("return"),
        '\0' => f.write_str("null"),
        '\u{7}' => f.write_str("alarm"),
        '\u{8}' => f.write_str("backspace"),
        '\u{1b}' => f.write_str("escape"),
        '\u{7f}' => f.write_str("delete"),
        c => f.write_char(c),
    }
}

fn write_string(s: &str, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_char('"')?;
    for c in s.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\t' => f.write_str("\\t")?,
            c => f.write_char(c)?,
        }
    }
    f.write_char('"')
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.equal(other)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<char> for Value {
    fn from(c: char) -> Self {
        Value::Char(c)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<Symbol> for Value {
    fn from(s: Symbol) -> Self {
        Value::Symbol(s)
    }
}
